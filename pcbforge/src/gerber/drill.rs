//! Drill Encoder
//!
//! Emits the Excellon-style drill plan: a fixed four-tool table,
//! corner mounting holes, per-pin component holes and power/ground
//! vias. Coordinates share the copper layers' ×10^4 scaling and the
//! same pin layout, so holes land on their pads.

use std::fmt::Write as _;

use crate::model::{BoardParameters, Component, Net, Position};
use crate::rules::DesignRuleSet;

use super::{coord, net_pin_index, pin_position};

/// Inset of the corner mounting holes from the board edge, in mm.
const MOUNTING_MARGIN: f64 = 5.0;
/// Via offset from its pad in both axes, in mm. Keeps the via
/// electrically adjacent but not coincident with the pad.
const VIA_OFFSET: f64 = 1.0;

/// One entry of the fixed drill tool table.
#[derive(Debug, Clone, Copy)]
struct DrillTool {
    code: &'static str,
    diameter: f64,
    plated: bool,
}

const STANDARD_PIN: DrillTool = DrillTool {
    code: "T1",
    diameter: 0.8,
    plated: true,
};
const LARGE_PIN: DrillTool = DrillTool {
    code: "T2",
    diameter: 1.0,
    plated: true,
};
const MOUNTING_HOLE: DrillTool = DrillTool {
    code: "T3",
    diameter: 3.2,
    plated: false,
};
const VIA: DrillTool = DrillTool {
    code: "T4",
    diameter: 0.3,
    plated: true,
};

const TOOLS: [DrillTool; 4] = [STANDARD_PIN, LARGE_PIN, MOUNTING_HOLE, VIA];

/// Encode the drill file for one design run.
pub fn encode_drill(
    board: &BoardParameters,
    components: &[Component],
    positions: &[Position],
    nets: &[Net],
    _rules: &DesignRuleSet,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, ";DRILL file {{Generated by PcbForge}}");
    let _ = writeln!(out, "M48");
    let _ = writeln!(out, "METRIC,TZ");
    for tool in &TOOLS {
        let plating = if tool.plated { ";PLATED" } else { ";" };
        let _ = writeln!(out, "{}C{:.1}{}", tool.code, tool.diameter, plating);
    }
    let _ = writeln!(out, "%");
    let _ = writeln!(out, "G90");
    let _ = writeln!(out, "G05");

    emit_mounting_holes(&mut out, board);
    emit_component_holes(&mut out, components, positions);
    emit_vias(&mut out, components, positions, nets);

    let _ = writeln!(out, "M30");
    out
}

/// One unplated hole per board corner, inset by the fixed margin.
fn emit_mounting_holes(out: &mut String, board: &BoardParameters) {
    let m = MOUNTING_MARGIN;
    let corners = [
        (m, m),
        (m, board.height - m),
        (board.width - m, m),
        (board.width - m, board.height - m),
    ];
    let _ = writeln!(out, "{}", MOUNTING_HOLE.code);
    for (x, y) in corners {
        let _ = writeln!(out, "X{}Y{}", coord(x), coord(y));
    }
}

/// Per-pin holes at the copper pad layout; microcontrollers get the
/// large-pin tool.
fn emit_component_holes(out: &mut String, components: &[Component], positions: &[Position]) {
    for (component, position) in components.iter().zip(positions) {
        let tool = if component.kind.eq_ignore_ascii_case("microcontroller") {
            LARGE_PIN
        } else {
            STANDARD_PIN
        };
        let _ = writeln!(out, "{}", tool.code);
        for pin in 0..component.pin_count() {
            let p = pin_position(component, *position, pin);
            let _ = writeln!(out, "X{}Y{}", coord(p.x), coord(p.y));
        }
    }
}

/// One via per reserved power/ground net pin, offset by the fixed
/// (+1, +1) mm from the pin position.
fn emit_vias(out: &mut String, components: &[Component], positions: &[Position], nets: &[Net]) {
    let _ = writeln!(out, "{}", VIA.code);
    for net in nets.iter().filter(|n| n.is_power()) {
        let Some((component, position)) = components
            .get(net.component)
            .zip(positions.get(net.component))
        else {
            continue;
        };
        for pin in &net.pins {
            let p = pin_position(component, *position, net_pin_index(pin));
            let _ = writeln!(out, "X{}Y{}", coord(p.x + VIA_OFFSET), coord(p.y + VIA_OFFSET));
        }
    }
}
