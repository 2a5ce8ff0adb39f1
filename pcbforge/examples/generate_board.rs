//! Generate a small demo board and print the produced files.

use pcbforge::prelude::*;
use std::path::Path;

fn main() -> Result<(), DesignError> {
    let output_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "target/demo_board".to_string());

    let request = GenerateDesignRequest {
        project_name: "demo".to_string(),
        requirements: "battery powered temperature sensor with status LED".to_string(),
        board_params: BoardParameters {
            width: 100.0,
            height: 80.0,
            layers: 2,
        },
        components: vec![
            Component::new("regulator", "Power Regulator"),
            Component::new("sensor", "Temperature Sensor"),
            Component::new("capacitor", "C1"),
        ],
    };

    let output = PcbDesigner::new().generate_design(&request, Path::new(&output_dir))?;

    println!("Generated {} ({} components)", output.dims, output.components);
    for path in &output.layer_files {
        println!("  {}", path.display());
    }
    if let Some(drill) = &output.drill_file {
        println!("  {}", drill.display());
    }
    if let Some(zip) = &output.gerber_zip {
        println!("  {}", zip.display());
    }

    if !output.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &output.suggestions {
            println!("  - {}", suggestion);
        }
    }

    Ok(())
}
