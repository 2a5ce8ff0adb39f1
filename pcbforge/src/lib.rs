//! PcbForge - PCB design generation library
//!
//! Turns a component list and board parameters into a manufacturable
//! board description: per-layer Gerber X2 files, an Excellon-style
//! drill plan, a packaged archive and a rendered preview image.
//!
//! # Quick Start
//!
//! ```no_run
//! use pcbforge::{BoardParameters, Component, GenerateDesignRequest, PcbDesigner};
//! use std::path::Path;
//!
//! let request = GenerateDesignRequest {
//!     project_name: "blinky".to_string(),
//!     requirements: "battery powered status LED".to_string(),
//!     board_params: BoardParameters { width: 100.0, height: 80.0, layers: 2 },
//!     components: vec![Component::new("regulator", "U1")],
//! };
//!
//! let output = PcbDesigner::new()
//!     .generate_design(&request, Path::new("out"))
//!     .unwrap();
//! println!("{} layer files, archive: {:?}", output.layer_files.len(), output.gerber_zip);
//! ```
//!
//! # Pipeline
//!
//! - **Component library**: footprint/pin/symbol enrichment from an
//!   injectable JSON table
//! - **Netlist synthesis**: per-component connection grouping
//! - **Placement**: deterministic uniform grid
//! - **Encoding**: Gerber layers and drill plan with fixed-point
//!   millimetre coordinates
//! - **Packaging**: zip archive plus PNG preview

pub mod analysis;
pub mod core;
pub mod gerber;
pub mod library;
pub mod model;
pub mod netlist;
pub mod package;
pub mod placement;
pub mod preview;
pub mod rules;

// Re-export main types
pub use crate::core::{DesignError, DesignOutput, GenerateDesignRequest, PcbDesigner};
pub use crate::gerber::{stackup, LayerDescriptor, LayerKind};
pub use crate::library::{ComponentLibrary, LibraryEntry};
pub use crate::model::{BoardParameters, Component, Connection, Net, Position};
pub use crate::rules::{DesignRuleSet, DEFAULT_RULES};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        BoardParameters, Component, ComponentLibrary, DesignError, DesignOutput, DesignRuleSet,
        GenerateDesignRequest, PcbDesigner,
    };
}
