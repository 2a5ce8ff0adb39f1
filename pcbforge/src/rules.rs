//! Manufacturing design rules and the fixed aperture table.
//!
//! The rule set and the aperture table are process-wide immutable
//! tables: built once, shared by reference, never mutated. Every
//! feature the encoders emit must be at least its rule minimum.

use serde::{Deserialize, Serialize};

/// Minimum manufacturing tolerances, all in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignRuleSet {
    pub min_trace_width: f64,
    pub min_trace_spacing: f64,
    pub min_drill_size: f64,
    pub min_ring_width: f64,
    pub min_clearance: f64,
    pub thermal_relief_gap: f64,
    pub thermal_relief_connect: f64,
    pub plane_clearance: f64,
}

/// Default rule set for a standard 2-layer prototyping process.
pub const DEFAULT_RULES: DesignRuleSet = DesignRuleSet {
    min_trace_width: 0.2,
    min_trace_spacing: 0.2,
    min_drill_size: 0.3,
    min_ring_width: 0.2,
    min_clearance: 0.254,
    thermal_relief_gap: 0.3,
    thermal_relief_connect: 0.4,
    plane_clearance: 0.4,
};

impl Default for DesignRuleSet {
    fn default() -> Self {
        DEFAULT_RULES
    }
}

/// Aperture D-codes, named by role.
pub mod codes {
    /// 10mil signal trace.
    pub const NARROW_TRACE: u32 = 10;
    /// 20mil power trace.
    pub const WIDE_TRACE: u32 = 11;
    /// 40mil round pad.
    pub const STANDARD_PAD: u32 = 12;
    /// Rectangular pad; also the mask relief opening (pad + 2x clearance).
    pub const RECT_PAD: u32 = 13;
    /// Plated via with concentric hole.
    pub const VIA: u32 = 14;
    /// Thermal relief pad (square polygon).
    pub const THERMAL_PAD: u32 = 15;
    /// Thermal relief trace.
    pub const THERMAL_TRACE: u32 = 16;
    /// Large mounting pad.
    pub const MOUNTING_PAD: u32 = 17;
}

/// Drawing-tool shape for one aperture declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApertureShape {
    /// Circle with an optional concentric hole (plated apertures).
    Circle { diameter: f64, hole: Option<f64> },
    /// Circle carrying the thermal relief gap/connect pair.
    Thermal { diameter: f64 },
    Rect { width: f64, height: f64 },
    Polygon { diameter: f64, vertices: u32 },
}

/// One entry of the fixed aperture table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aperture {
    /// D-code, e.g. 12 for `D12`.
    pub code: u32,
    pub shape: ApertureShape,
}

impl Aperture {
    /// Gerber aperture declaration line, e.g. `%ADD12C,1.016*%`.
    pub fn declaration(&self, rules: &DesignRuleSet) -> String {
        match self.shape {
            ApertureShape::Circle {
                diameter,
                hole: Some(hole),
            } => format!("%ADD{}C,{}X{}*%", self.code, fmt_mm(diameter), fmt_mm(hole)),
            ApertureShape::Circle {
                diameter,
                hole: None,
            } => format!("%ADD{}C,{}*%", self.code, fmt_mm(diameter)),
            ApertureShape::Thermal { diameter } => format!(
                "%ADD{}C,{}X{}X{}*%",
                self.code,
                fmt_mm(diameter),
                fmt_mm(rules.thermal_relief_gap),
                fmt_mm(rules.thermal_relief_connect)
            ),
            ApertureShape::Rect { width, height } => {
                format!("%ADD{}R,{}X{}*%", self.code, fmt_mm(width), fmt_mm(height))
            }
            ApertureShape::Polygon { diameter, vertices } => {
                format!("%ADD{}P,{}X{}*%", self.code, fmt_mm(diameter), vertices)
            }
        }
    }
}

/// The fixed aperture table, declared in full in every layer file
/// regardless of which apertures that layer ends up using.
pub const APERTURES: [Aperture; 8] = [
    Aperture {
        code: codes::NARROW_TRACE,
        shape: ApertureShape::Circle {
            diameter: 0.254,
            hole: None,
        },
    },
    Aperture {
        code: codes::WIDE_TRACE,
        shape: ApertureShape::Circle {
            diameter: 0.508,
            hole: None,
        },
    },
    Aperture {
        code: codes::STANDARD_PAD,
        shape: ApertureShape::Circle {
            diameter: 1.016,
            hole: None,
        },
    },
    // Width is the standard pad (1.016) grown by the 0.254 clearance
    // rule on each side; the height is the fixed elongated pad axis.
    Aperture {
        code: codes::RECT_PAD,
        shape: ApertureShape::Rect {
            width: 1.524,
            height: 2.032,
        },
    },
    Aperture {
        code: codes::VIA,
        shape: ApertureShape::Circle {
            diameter: 0.6,
            hole: Some(0.3),
        },
    },
    Aperture {
        code: codes::THERMAL_PAD,
        shape: ApertureShape::Polygon {
            diameter: 1.8,
            vertices: 4,
        },
    },
    Aperture {
        code: codes::THERMAL_TRACE,
        shape: ApertureShape::Thermal { diameter: 0.254 },
    },
    Aperture {
        code: codes::MOUNTING_PAD,
        shape: ApertureShape::Circle {
            diameter: 3.0,
            hole: None,
        },
    },
];

/// Format a mm size for aperture declarations: trim to the shortest
/// decimal form but always keep one fractional digit for whole values.
pub fn fmt_mm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
