//! Netlist Synthesizer
//!
//! Groups each component's declared pin connections into named nets.
//! This stage works strictly within one component's declaration; it
//! does not attempt cross-component net matching, and it performs no
//! electrical consistency checks. Net order follows component order,
//! then declaration order within a component — trace routing order is
//! derived from it and must not change.

use crate::model::{Component, Net};

/// Synthesize the ordered net list for a design run.
///
/// Components without connections contribute no nets; connection
/// entries with an empty pin list are dropped.
pub fn synthesize(components: &[Component]) -> Vec<Net> {
    let mut nets = Vec::new();
    for (index, component) in components.iter().enumerate() {
        for connection in &component.connections {
            if connection.pins.is_empty() {
                continue;
            }
            nets.push(Net {
                name: connection.role.clone(),
                component: index,
                pins: connection.pins.clone(),
            });
        }
    }
    tracing::debug!("synthesized {} nets from {} components", nets.len(), components.len());
    nets
}
