//! Gerber Layer Encoder
//!
//! Emits one Gerber X2 file per physical layer: header, the full
//! aperture table, layer-kind-specific geometry and trailer. All
//! position arithmetic happens in f64 millimetres; coordinates are
//! scaled to the fixed 4.6 format (×10^4) only at emission time.

pub mod drill;

use std::fmt::Write as _;

use chrono::Utc;

use crate::model::{BoardParameters, Component, Net, Position, pin_index};
use crate::rules::{codes, DesignRuleSet, APERTURES};

/// Standard 0.1" pin pitch in mm.
pub const PIN_PITCH: f64 = 2.54;
/// Board outline corner radius in mm.
pub const CORNER_RADIUS: f64 = 1.0;
/// Height of the silkscreen courtyard box in mm.
const SILK_BOX_HEIGHT: f64 = 2.0;

/// Geometry behaviour of a layer, resolved once when the stackup is
/// built — never re-derived from layer-name prefixes at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Copper { internal: bool },
    Mask,
    Paste,
    Silkscreen,
    Outline,
}

/// Which side of the stackup a layer belongs to; drives the
/// single-layer / two-layer skip rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSide {
    Top,
    Bottom,
    Internal,
    Edge,
}

/// One entry of the fixed layer stackup.
#[derive(Debug, Clone, Copy)]
pub struct LayerDescriptor {
    /// Layer tag, e.g. `F.Cu`; also the output file stem.
    pub name: &'static str,
    pub description: &'static str,
    /// Output file extension, e.g. `GTL`.
    pub extension: &'static str,
    /// Gerber X2 file function attribute.
    pub function: &'static str,
    pub kind: LayerKind,
    pub side: LayerSide,
    /// Net name of the filled plane on internal copper layers.
    pub plane: Option<&'static str>,
}

impl LayerDescriptor {
    /// Output file name, `<LayerTag>.<extension>`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }
}

const STACKUP: [LayerDescriptor; 11] = [
    LayerDescriptor {
        name: "F.Cu",
        description: "Top copper layer",
        extension: "GTL",
        function: "Copper,L1,Top",
        kind: LayerKind::Copper { internal: false },
        side: LayerSide::Top,
        plane: None,
    },
    LayerDescriptor {
        name: "In1.Cu",
        description: "Internal plane 1",
        extension: "G1L",
        function: "Copper,L2,Inr",
        kind: LayerKind::Copper { internal: true },
        side: LayerSide::Internal,
        plane: Some("GND"),
    },
    LayerDescriptor {
        name: "In2.Cu",
        description: "Internal plane 2",
        extension: "G2L",
        function: "Copper,L3,Inr",
        kind: LayerKind::Copper { internal: true },
        side: LayerSide::Internal,
        plane: Some("VCC"),
    },
    LayerDescriptor {
        name: "B.Cu",
        description: "Bottom copper layer",
        extension: "GBL",
        function: "Copper,L4,Bot",
        kind: LayerKind::Copper { internal: false },
        side: LayerSide::Bottom,
        plane: None,
    },
    LayerDescriptor {
        name: "F.Mask",
        description: "Top solder mask",
        extension: "GTS",
        function: "Soldermask,Top",
        kind: LayerKind::Mask,
        side: LayerSide::Top,
        plane: None,
    },
    LayerDescriptor {
        name: "B.Mask",
        description: "Bottom solder mask",
        extension: "GBS",
        function: "Soldermask,Bot",
        kind: LayerKind::Mask,
        side: LayerSide::Bottom,
        plane: None,
    },
    LayerDescriptor {
        name: "F.Paste",
        description: "Top paste",
        extension: "GTP",
        function: "Paste,Top",
        kind: LayerKind::Paste,
        side: LayerSide::Top,
        plane: None,
    },
    LayerDescriptor {
        name: "B.Paste",
        description: "Bottom paste",
        extension: "GBP",
        function: "Paste,Bot",
        kind: LayerKind::Paste,
        side: LayerSide::Bottom,
        plane: None,
    },
    LayerDescriptor {
        name: "F.SilkS",
        description: "Top silkscreen",
        extension: "GTO",
        function: "Legend,Top",
        kind: LayerKind::Silkscreen,
        side: LayerSide::Top,
        plane: None,
    },
    LayerDescriptor {
        name: "B.SilkS",
        description: "Bottom silkscreen",
        extension: "GBO",
        function: "Legend,Bot",
        kind: LayerKind::Silkscreen,
        side: LayerSide::Bottom,
        plane: None,
    },
    LayerDescriptor {
        name: "Edge.Cuts",
        description: "Board outline",
        extension: "GKO",
        function: "Profile,NP",
        kind: LayerKind::Outline,
        side: LayerSide::Edge,
        plane: None,
    },
];

/// Layer descriptors for a board configuration: single-layer boards
/// drop bottom and internal layers, two-layer boards drop internal
/// planes, four-layer boards keep the full stackup.
pub fn stackup(layers: u32) -> Vec<LayerDescriptor> {
    STACKUP
        .iter()
        .filter(|desc| match desc.side {
            LayerSide::Bottom => layers > 1,
            LayerSide::Internal => layers == 4,
            LayerSide::Top | LayerSide::Edge => true,
        })
        .copied()
        .collect()
}

/// Scale a mm coordinate to the fixed 4.6 integer field (×10^4),
/// rounding at the fourth decimal.
pub fn coord(mm: f64) -> i64 {
    (mm * 1e4).round() as i64
}

/// X offset of a pin from its component centre at the fixed pitch.
pub fn pin_offset(pin: u32, pin_count: u32) -> f64 {
    (pin as f64 - pin_count as f64 / 2.0) * PIN_PITCH
}

/// Absolute position of one pin of a placed component.
pub fn pin_position(component: &Component, placed: Position, pin: u32) -> Position {
    Position {
        x: placed.x + pin_offset(pin, component.pin_count()),
        y: placed.y,
    }
}

/// Encodes the layers of one design run. Holds only shared borrows;
/// the run's inputs stay read-only.
pub struct LayerEncoder<'a> {
    pub board: &'a BoardParameters,
    pub components: &'a [Component],
    pub positions: &'a [Position],
    pub nets: &'a [Net],
    pub rules: &'a DesignRuleSet,
}

impl<'a> LayerEncoder<'a> {
    /// Encode one layer file. Infallible: the result is written to
    /// disk by the caller, which owns the partial-output policy.
    pub fn encode(&self, desc: &LayerDescriptor) -> String {
        let mut out = String::new();
        self.emit_header(&mut out, desc);
        self.emit_apertures(&mut out);
        match desc.kind {
            LayerKind::Outline => self.emit_outline(&mut out),
            LayerKind::Copper { internal } => self.emit_copper(&mut out, internal, desc.plane),
            LayerKind::Mask => self.emit_mask(&mut out),
            LayerKind::Silkscreen => self.emit_silkscreen(&mut out),
            LayerKind::Paste => {}
        }
        out.push_str("M02*\n");
        out
    }

    fn emit_header(&self, out: &mut String, desc: &LayerDescriptor) {
        let timestamp = Utc::now().format("%Y%m%d%H%M%S");
        let _ = writeln!(out, "%TF.GenerationSoftware,PcbForge,Designer,0.1*%");
        let _ = writeln!(out, "%TF.CreationDate,{timestamp}*%");
        let _ = writeln!(out, "%TF.ProjectId,{}*%", desc.description);
        let _ = writeln!(out, "%TF.Part,Single*%");
        let _ = writeln!(out, "%TF.FileFunction,{}*%", desc.function);
        let _ = writeln!(out, "%TF.FilePolarity,Positive*%");
        let _ = writeln!(out, "%FSLAX46Y46*%");
        let _ = writeln!(out, "%MOMM*%");
    }

    fn emit_apertures(&self, out: &mut String) {
        for aperture in &APERTURES {
            let _ = writeln!(out, "{}", aperture.declaration(self.rules));
        }
    }

    /// Counter-clockwise rounded rectangle along the board boundary:
    /// four straight edges joined by 90° multi-quadrant arcs.
    fn emit_outline(&self, out: &mut String) {
        let (w, h) = (self.board.width, self.board.height);
        let r = CORNER_RADIUS;

        let _ = writeln!(out, "%LPD*%");
        let _ = writeln!(out, "G01*");
        let _ = writeln!(out, "D{}*", codes::NARROW_TRACE);
        let _ = writeln!(out, "X{}Y{}D02*", coord(r), coord(0.0));
        let _ = writeln!(out, "X{}Y{}D01*", coord(w - r), coord(0.0));
        let _ = writeln!(out, "G75*");
        let _ = writeln!(out, "G03*");
        // Arc endpoints with I/J offsets from current point to centre.
        let _ = writeln!(
            out,
            "X{}Y{}I{}J{}D01*",
            coord(w),
            coord(r),
            coord(0.0),
            coord(r)
        );
        let _ = writeln!(out, "G01*");
        let _ = writeln!(out, "X{}Y{}D01*", coord(w), coord(h - r));
        let _ = writeln!(out, "G03*");
        let _ = writeln!(
            out,
            "X{}Y{}I{}J{}D01*",
            coord(w - r),
            coord(h),
            coord(-r),
            coord(0.0)
        );
        let _ = writeln!(out, "G01*");
        let _ = writeln!(out, "X{}Y{}D01*", coord(r), coord(h));
        let _ = writeln!(out, "G03*");
        let _ = writeln!(
            out,
            "X{}Y{}I{}J{}D01*",
            coord(0.0),
            coord(h - r),
            coord(0.0),
            coord(-r)
        );
        let _ = writeln!(out, "G01*");
        let _ = writeln!(out, "X{}Y{}D01*", coord(0.0), coord(r));
        let _ = writeln!(out, "G03*");
        let _ = writeln!(
            out,
            "X{}Y{}I{}J{}D01*",
            coord(r),
            coord(0.0),
            coord(r),
            coord(0.0)
        );
    }

    fn emit_copper(&self, out: &mut String, internal: bool, plane: Option<&str>) {
        if internal {
            if let Some(net) = plane {
                self.emit_plane(out, net);
            }
        }
        for (component, position) in self.components.iter().zip(self.positions) {
            self.emit_pads(out, component, *position);
        }
        self.emit_traces(out);
    }

    /// Filled plane region covering the board minus the plane
    /// clearance margin on all sides.
    fn emit_plane(&self, out: &mut String, net: &str) {
        let c = self.rules.plane_clearance;
        let (w, h) = (self.board.width, self.board.height);
        let _ = writeln!(out, "G04 {net} plane*");
        let _ = writeln!(out, "G36*");
        let _ = writeln!(out, "X{}Y{}D02*", coord(c), coord(c));
        let _ = writeln!(out, "X{}Y{}D01*", coord(w - c), coord(c));
        let _ = writeln!(out, "X{}Y{}D01*", coord(w - c), coord(h - c));
        let _ = writeln!(out, "X{}Y{}D01*", coord(c), coord(h - c));
        let _ = writeln!(out, "X{}Y{}D01*", coord(c), coord(c));
        let _ = writeln!(out, "G37*");
    }

    /// Component pads at the fixed pitch; reserved power/ground pins
    /// get the thermal relief pad aperture, everything else the
    /// standard pad.
    fn emit_pads(&self, out: &mut String, component: &Component, position: Position) {
        let reserved = component.reserved_pin_indices();
        for pin in 0..component.pin_count() {
            let p = pin_position(component, position, pin);
            if reserved.contains(&pin) {
                let _ = writeln!(out, "D{}*", codes::THERMAL_PAD);
            } else {
                let _ = writeln!(out, "D{}*", codes::STANDARD_PAD);
            }
            let _ = writeln!(out, "X{}Y{}D03*", coord(p.x), coord(p.y));
        }
    }

    /// Straight-line trace segments per net, in netlist order: a star
    /// from the net's first pin to each subsequent pin. Intentionally
    /// not a minimum-path router.
    fn emit_traces(&self, out: &mut String) {
        for net in self.nets {
            let Some((component, position)) = self
                .components
                .get(net.component)
                .zip(self.positions.get(net.component))
            else {
                continue;
            };
            if net.is_power() {
                let _ = writeln!(out, "D{}*", codes::WIDE_TRACE);
            } else {
                let _ = writeln!(out, "D{}*", codes::NARROW_TRACE);
            }
            let first = pin_position(component, *position, net_pin_index(&net.pins[0]));
            for pin in &net.pins[1..] {
                let end = pin_position(component, *position, net_pin_index(pin));
                let _ = writeln!(out, "X{}Y{}D02*", coord(first.x), coord(first.y));
                let _ = writeln!(out, "X{}Y{}D01*", coord(end.x), coord(end.y));
            }
        }
    }

    /// Mask relief openings: the rectangular pad aperture (standard
    /// pad grown by the clearance rule on each side) flashed at every
    /// copper pad position.
    fn emit_mask(&self, out: &mut String) {
        let _ = writeln!(out, "D{}*", codes::RECT_PAD);
        for (component, position) in self.components.iter().zip(self.positions) {
            for pin in 0..component.pin_count() {
                let p = pin_position(component, *position, pin);
                let _ = writeln!(out, "X{}Y{}D03*", coord(p.x), coord(p.y));
            }
        }
    }

    /// One courtyard marker per component, labelled with its name.
    fn emit_silkscreen(&self, out: &mut String) {
        for (component, position) in self.components.iter().zip(self.positions) {
            let half_w = (component.pin_count() as f64 * PIN_PITCH) / 2.0;
            let half_h = SILK_BOX_HEIGHT / 2.0;
            let (x, y) = (position.x, position.y);
            let _ = writeln!(out, "G04 {}*", component.name);
            let _ = writeln!(out, "D{}*", codes::NARROW_TRACE);
            let _ = writeln!(out, "X{}Y{}D02*", coord(x - half_w), coord(y - half_h));
            let _ = writeln!(out, "X{}Y{}D01*", coord(x + half_w), coord(y - half_h));
            let _ = writeln!(out, "X{}Y{}D01*", coord(x + half_w), coord(y + half_h));
            let _ = writeln!(out, "X{}Y{}D01*", coord(x - half_w), coord(y + half_h));
            let _ = writeln!(out, "X{}Y{}D01*", coord(x - half_w), coord(y - half_h));
        }
    }
}

/// Pin identifier to layout index; unparseable identifiers fall back
/// to index 0.
pub(crate) fn net_pin_index(id: &str) -> u32 {
    pin_index(id).unwrap_or(0)
}
