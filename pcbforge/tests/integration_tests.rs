//! Integration tests for the PcbForge library

use pcbforge::prelude::*;
use std::path::Path;

fn request(
    layers: u32,
    components: Vec<Component>,
    requirements: &str,
) -> GenerateDesignRequest {
    GenerateDesignRequest {
        project_name: "itest".to_string(),
        requirements: requirements.to_string(),
        board_params: BoardParameters {
            width: 100.0,
            height: 80.0,
            layers,
        },
        components,
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_two_layer_board_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let components = vec![
        Component::new("regulator", "U1"),
        Component::new("microcontroller", "U2"),
        Component::new("capacitor", "C1"),
        Component::new("capacitor", "C2"),
    ];
    let output = PcbDesigner::new()
        .generate_design(&request(2, components, ""), dir.path())
        .unwrap();

    // 9 layers for a 2-layer board: no internal planes, bottom kept.
    assert_eq!(output.layer_files.len(), 9);
    let names = file_names(&output.gerber_dir);
    assert!(names.contains(&"F.Cu.GTL".to_string()));
    assert!(names.contains(&"B.Cu.GBL".to_string()));
    assert!(names.contains(&"Edge.Cuts.GKO".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("In")));

    assert_eq!(output.components, 4, "no components added or dropped");
    assert_eq!(output.dims, "100mm × 80mm");

    // Regulator and microcontroller presence both drive advisories.
    assert!(output.suggestions.len() >= 2);
    assert!(output
        .suggestions
        .iter()
        .any(|s| s.contains("reverse polarity") || s.contains("filtering capacitors")));
    assert!(output
        .suggestions
        .iter()
        .any(|s| s.contains("decoupling") || s.contains("reset circuit")));

    assert!(output.drill_file.as_ref().unwrap().exists());
    assert!(output.preview_file.as_ref().unwrap().exists());
    assert!(output.gerber_zip.as_ref().unwrap().exists());
    let zip_name = output.gerber_zip.unwrap();
    assert_eq!(
        zip_name.file_name().unwrap().to_str().unwrap(),
        "itest_gerber.zip"
    );
}

#[test]
fn test_single_layer_board_has_no_bottom_files() {
    let dir = tempfile::tempdir().unwrap();
    let components = vec![Component::new("resistor", "R1")];
    let output = PcbDesigner::new()
        .generate_design(&request(1, components, ""), dir.path())
        .unwrap();

    let names = file_names(&output.gerber_dir);
    assert!(!names.iter().any(|n| n.starts_with("B.")), "{names:?}");
    assert!(!names.iter().any(|n| n.starts_with("In")), "{names:?}");
    assert!(names.contains(&"F.Cu.GTL".to_string()));
    assert_eq!(output.layer_files.len(), 5);
}

#[test]
fn test_four_layer_board_has_internal_planes() {
    let dir = tempfile::tempdir().unwrap();
    let output = PcbDesigner::new()
        .generate_design(&request(4, vec![], ""), dir.path())
        .unwrap();

    let names = file_names(&output.gerber_dir);
    assert!(names.contains(&"In1.Cu.G1L".to_string()));
    assert!(names.contains(&"In2.Cu.G2L".to_string()));
    assert_eq!(output.layer_files.len(), 11);

    let in1 = std::fs::read_to_string(output.gerber_dir.join("In1.Cu.G1L")).unwrap();
    assert!(in1.contains("G04 GND plane*"));
    let in2 = std::fs::read_to_string(output.gerber_dir.join("In2.Cu.G2L")).unwrap();
    assert!(in2.contains("G04 VCC plane*"));
}

#[test]
fn test_power_connections_produce_offset_vias() {
    let dir = tempfile::tempdir().unwrap();
    let component: Component = serde_json::from_str(
        r#"{
            "type": "sensor",
            "name": "U1",
            "pins": 5,
            "connections": {"VCC": ["pin_2"], "GND": ["pin_4"]}
        }"#,
    )
    .unwrap();
    let output = PcbDesigner::new()
        .generate_design(&request(2, vec![component], ""), dir.path())
        .unwrap();

    let drill = std::fs::read_to_string(output.drill_file.unwrap()).unwrap();
    // Single component is centred at (50, 40); pins sit at
    // x + (pin - 5/2) * 2.54. Vias are pad position + (1, 1).
    // pin_2: x = 50 + (2 - 2.5) * 2.54 = 48.73 -> via (49.73, 41).
    assert!(drill.contains("X497300Y410000\n"), "via for VCC pin_2");
    // pin_4: x = 50 + (4 - 2.5) * 2.54 = 53.81 -> via (54.81, 41).
    assert!(drill.contains("X548100Y410000\n"), "via for GND pin_4");
}

#[test]
fn test_requirements_text_drives_augmentation_and_suggestions() {
    let dir = tempfile::tempdir().unwrap();
    let output = PcbDesigner::new()
        .generate_design(
            &request(2, vec![], "arduino controlled stepper motor driver"),
            dir.path(),
        )
        .unwrap();

    // Microcontroller need with no matching part appends the MCU and
    // its decoupling capacitor.
    assert!(output.components >= 2);
    assert!(output
        .suggestions
        .iter()
        .any(|s| s.contains("flyback diodes")));
}

#[test]
fn test_unknown_component_type_is_never_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let components = vec![Component::new("frobnicator", "X1")];
    let output = PcbDesigner::new()
        .generate_design(&request(2, components, ""), dir.path())
        .unwrap();
    assert_eq!(output.components, 1);

    let silk = std::fs::read_to_string(output.gerber_dir.join("F.SilkS.GTO")).unwrap();
    assert!(silk.contains("G04 X1*"));
}

#[test]
fn test_invalid_board_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = request(3, vec![], "");
    let result = PcbDesigner::new().generate_design(&req, dir.path());
    assert!(matches!(result, Err(DesignError::Validation(_))));

    req.board_params.layers = 2;
    req.board_params.height = 0.0;
    let result = PcbDesigner::new().generate_design(&req, dir.path());
    assert!(matches!(result, Err(DesignError::Validation(_))));
}

#[test]
fn test_numeric_scaling_in_emitted_files() {
    let dir = tempfile::tempdir().unwrap();
    // 24.6912mm wide board: outline right edge lands at 23.6912mm
    // after the 1mm corner radius, so the file must carry 236912.
    let req = GenerateDesignRequest {
        project_name: "scale".to_string(),
        requirements: String::new(),
        board_params: BoardParameters {
            width: 24.6912,
            height: 20.0,
            layers: 1,
        },
        components: vec![],
    };
    let output = PcbDesigner::new().generate_design(&req, dir.path()).unwrap();
    let outline = std::fs::read_to_string(output.gerber_dir.join("Edge.Cuts.GKO")).unwrap();
    assert!(outline.contains("X236912Y0D01*"));
}

#[test]
fn test_archive_failure_keeps_partial_results() {
    let dir = tempfile::tempdir().unwrap();
    // Occupy the archive path with a directory so the zip file
    // cannot be created.
    std::fs::create_dir_all(dir.path().join("itest_gerber.zip")).unwrap();

    let components = vec![
        Component::new("regulator", "U1"),
        Component::new("capacitor", "C1"),
    ];
    let output = PcbDesigner::new()
        .generate_design(&request(2, components, ""), dir.path())
        .unwrap();

    assert_eq!(output.gerber_zip, None, "archiving failed, run continues");
    assert_eq!(output.layer_files.len(), 9);
    for path in &output.layer_files {
        assert!(path.exists());
    }
    assert!(output.drill_file.as_ref().unwrap().exists());
    assert!(output.preview_file.as_ref().unwrap().exists());
}

#[test]
fn test_generation_is_deterministic_apart_from_timestamp() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let components = vec![
        Component::new("regulator", "U1"),
        Component::new("capacitor", "C1"),
    ];
    let designer = PcbDesigner::new();
    designer
        .generate_design(&request(2, components.clone(), ""), dir_a.path())
        .unwrap();
    designer
        .generate_design(&request(2, components, ""), dir_b.path())
        .unwrap();

    let strip_date = |s: String| -> String {
        s.lines()
            .filter(|l| !l.starts_with("%TF.CreationDate"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let a = strip_date(std::fs::read_to_string(dir_a.path().join("gerber/F.Cu.GTL")).unwrap());
    let b = strip_date(std::fs::read_to_string(dir_b.path().join("gerber/F.Cu.GTL")).unwrap());
    assert_eq!(a, b);
}
