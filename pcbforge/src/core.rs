//! Design generation pipeline shared by CLI and library callers.
//!
//! A run is synchronous and owns its output directory exclusively.
//! The component library and rule set are read-only, so concurrent
//! runs with distinct output directories need no coordination.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::{augment_components, CircuitNeeds};
use crate::gerber::{drill, stackup, LayerEncoder};
use crate::library::{self, ComponentLibrary};
use crate::model::{BoardParameters, Component};
use crate::rules::DesignRuleSet;
use crate::{netlist, package, placement, preview};

#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    /// Malformed board parameters; fatal, reported before any file
    /// is written.
    #[error("validation error: {0}")]
    Validation(String),
    /// Failure writing one layer or drill file; the pipeline skips
    /// the file and continues.
    #[error("encoding error for {layer}: {source}")]
    Encoding {
        layer: String,
        #[source]
        source: std::io::Error,
    },
    /// Archive creation failure; non-fatal, the run keeps its
    /// partial results.
    #[error("packaging error: {0}")]
    Packaging(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A design generation request as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDesignRequest {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    /// Advisory free text; feeds suggestions only.
    #[serde(default)]
    pub requirements: String,
    pub board_params: BoardParameters,
    #[serde(default)]
    pub components: Vec<Component>,
}

fn default_project_name() -> String {
    "Untitled".to_string()
}

/// Result of one design generation. Produced once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct DesignOutput {
    pub gerber_dir: PathBuf,
    /// Successfully written layer files; a failed layer is omitted.
    pub layer_files: Vec<PathBuf>,
    pub drill_file: Option<PathBuf>,
    pub preview_file: Option<PathBuf>,
    /// `None` (serialized as `null`) when archiving failed.
    pub gerber_zip: Option<PathBuf>,
    pub components: usize,
    pub dims: String,
    pub suggestions: Vec<String>,
}

/// PCB design generator with an injectable component library.
pub struct PcbDesigner {
    library: ComponentLibrary,
    rules: DesignRuleSet,
}

impl Default for PcbDesigner {
    fn default() -> Self {
        Self::new()
    }
}

impl PcbDesigner {
    /// Generator backed by the process-wide shared builtin table, so
    /// repeated construction does not reparse the embedded JSON.
    pub fn new() -> Self {
        Self {
            library: library::global().clone(),
            rules: DesignRuleSet::default(),
        }
    }

    /// Generator backed by a caller-supplied component table.
    pub fn with_library(library: ComponentLibrary) -> Self {
        Self {
            library,
            rules: DesignRuleSet::default(),
        }
    }

    pub fn library(&self) -> &ComponentLibrary {
        &self.library
    }

    /// Run the full pipeline: enrich, analyze, place, synthesize
    /// nets, encode layers and drill plan, render the preview and
    /// package the archive under `output_dir`.
    pub fn generate_design(
        &self,
        request: &GenerateDesignRequest,
        output_dir: &Path,
    ) -> Result<DesignOutput, DesignError> {
        let board = &request.board_params;
        board.validate()?;
        tracing::info!(
            "generating design {:?} ({}, {} layers)",
            request.project_name,
            board.dims(),
            board.layers
        );

        let mut components = request.components.clone();
        self.library.enrich(&mut components);
        let needs = CircuitNeeds::detect(&request.requirements, &components);
        augment_components(&mut components, &needs, &self.library);
        let suggestions = needs.suggestions();

        let gerber_dir = output_dir.join("gerber");
        std::fs::create_dir_all(&gerber_dir)?;

        let nets = netlist::synthesize(&components);
        let positions = placement::place_all(components.len(), board.width, board.height);
        let encoder = LayerEncoder {
            board,
            components: &components,
            positions: &positions,
            nets: &nets,
            rules: &self.rules,
        };

        let mut layer_files = Vec::new();
        for desc in stackup(board.layers) {
            let path = gerber_dir.join(desc.file_name());
            let contents = encoder.encode(&desc);
            match std::fs::write(&path, contents) {
                Ok(()) => layer_files.push(path),
                Err(source) => {
                    let err = DesignError::Encoding {
                        layer: desc.name.to_string(),
                        source,
                    };
                    tracing::error!("{}, skipping layer", err);
                }
            }
        }

        let drill_path = gerber_dir.join("board.drl");
        let drill_contents = drill::encode_drill(board, &components, &positions, &nets, &self.rules);
        let drill_file = match std::fs::write(&drill_path, drill_contents) {
            Ok(()) => Some(drill_path),
            Err(source) => {
                let err = DesignError::Encoding {
                    layer: "board.drl".to_string(),
                    source,
                };
                tracing::error!("{}, skipping drill file", err);
                None
            }
        };

        let preview_path = output_dir.join("preview.png");
        let preview_file = match preview::render(board, &components, &positions).save(&preview_path)
        {
            Ok(()) => Some(preview_path),
            Err(e) => {
                tracing::error!("failed to write preview image: {}", e);
                None
            }
        };

        let zip_path = output_dir.join(format!("{}_gerber.zip", request.project_name));
        let gerber_zip = match package::create_archive(&gerber_dir, &zip_path) {
            Ok(()) => Some(zip_path),
            Err(e) => {
                tracing::warn!("{}, continuing without archive", e);
                None
            }
        };

        Ok(DesignOutput {
            gerber_dir,
            layer_files,
            drill_file,
            preview_file,
            gerber_zip,
            components: components.len(),
            dims: board.dims(),
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(layers: u32, components: Vec<Component>) -> GenerateDesignRequest {
        GenerateDesignRequest {
            project_name: "test".to_string(),
            requirements: String::new(),
            board_params: BoardParameters {
                width: 100.0,
                height: 80.0,
                layers,
            },
            components,
        }
    }

    #[test]
    fn test_validation_happens_before_any_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("design");
        let mut req = request(2, vec![]);
        req.board_params.width = -1.0;
        let result = PcbDesigner::new().generate_design(&req, &out);
        assert!(matches!(result, Err(DesignError::Validation(_))));
        assert!(!out.exists(), "no files may be written on validation error");
    }

    #[test]
    fn test_gerber_zip_serializes_as_null_when_absent() {
        let output = DesignOutput {
            gerber_dir: PathBuf::from("x"),
            layer_files: vec![],
            drill_file: None,
            preview_file: Some(PathBuf::from("preview.png")),
            gerber_zip: None,
            components: 0,
            dims: "100mm × 80mm".to_string(),
            suggestions: vec![],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert!(json["gerber_zip"].is_null());
    }

    #[test]
    fn test_request_defaults() {
        let req: GenerateDesignRequest = serde_json::from_str(
            r#"{"board_params": {"width": 50, "height": 50}}"#,
        )
        .unwrap();
        assert_eq!(req.project_name, "Untitled");
        assert_eq!(req.board_params.layers, 2);
        assert!(req.components.is_empty());
    }
}
