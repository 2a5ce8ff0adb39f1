//! PcbForge CLI - PCB design generation from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use pcbforge::{ComponentLibrary, DesignOutput, GenerateDesignRequest, PcbDesigner};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "pcbforge")]
#[command(about = "PCB design generation tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board design from a JSON request file
    Generate {
        /// Path to the JSON design request
        #[arg(value_name = "REQUEST")]
        request: PathBuf,

        /// Output directory for the generated files
        #[arg(short, long, value_name = "DIR", default_value = "out")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Replace the builtin component library with a JSON table
        #[arg(long, value_name = "FILE")]
        library: Option<PathBuf>,
    },

    /// List the component families of the active library
    Components {
        /// Replace the builtin component library with a JSON table
        #[arg(long, value_name = "FILE")]
        library: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Generate {
            request,
            output,
            format,
            library,
        } => handle_generate(&request, &output, format, library.as_deref()),
        Commands::Components { library } => handle_components(library.as_deref()),
    };

    process::exit(exit_code);
}

fn load_library(path: Option<&Path>) -> Result<ComponentLibrary, String> {
    match path {
        Some(path) => ComponentLibrary::load(path),
        None => Ok(ComponentLibrary::builtin()),
    }
}

fn handle_generate(
    request_path: &Path,
    output_dir: &Path,
    format: OutputFormat,
    library: Option<&Path>,
) -> i32 {
    let request: GenerateDesignRequest = match std::fs::read_to_string(request_path)
        .map_err(|e| format!("cannot read {}: {}", request_path.display(), e))
        .and_then(|content| {
            serde_json::from_str(&content)
                .map_err(|e| format!("invalid request {}: {}", request_path.display(), e))
        }) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e}");
            return 2;
        }
    };

    let library = match load_library(library) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Error: {e}");
            return 2;
        }
    };

    let designer = PcbDesigner::with_library(library);
    match designer.generate_design(&request, output_dir) {
        Ok(output) => {
            match format {
                OutputFormat::Human => print_human(&output),
                OutputFormat::Json => match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return 1;
                    }
                },
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn print_human(output: &DesignOutput) {
    println!("Board: {} ({} components)", output.dims, output.components);
    println!("Layer files:");
    for path in &output.layer_files {
        println!("  {}", path.display());
    }
    match &output.drill_file {
        Some(path) => println!("Drill plan: {}", path.display()),
        None => println!("Drill plan: FAILED (see log)"),
    }
    if let Some(path) = &output.preview_file {
        println!("Preview: {}", path.display());
    }
    match &output.gerber_zip {
        Some(path) => println!("Archive: {}", path.display()),
        None => println!("Archive: FAILED (partial results kept)"),
    }
    if !output.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &output.suggestions {
            println!("  - {}", suggestion);
        }
    }
}

fn handle_components(library: Option<&Path>) -> i32 {
    let library = match load_library(library) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Error: {e}");
            return 2;
        }
    };

    println!("{:<18} {:>5}  {:<34} {}", "TYPE", "PINS", "FOOTPRINT", "SYMBOL");
    for entry in library.entries() {
        println!(
            "{:<18} {:>5}  {:<34} {}",
            entry.tag, entry.pins, entry.footprint, entry.symbol
        );
    }
    0
}
