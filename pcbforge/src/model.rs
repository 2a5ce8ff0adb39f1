//! Core data model: board parameters, components, nets, positions.
//!
//! Everything here is built once per design run and treated as
//! read-only afterwards; the encoders never mutate it.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::DesignError;

/// Reserved net names that drive trace-width, thermal-relief and via
/// selection throughout the encoders.
pub const RESERVED_NETS: [&str; 2] = ["VCC", "GND"];

/// Returns true for the reserved power/ground net names.
pub fn is_reserved_net(name: &str) -> bool {
    RESERVED_NETS.contains(&name)
}

/// Physical board parameters. Immutable once a design generation starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardParameters {
    /// Board width in mm.
    pub width: f64,
    /// Board height in mm.
    pub height: f64,
    /// Copper layer count: 1, 2 or 4.
    #[serde(default = "default_layers")]
    pub layers: u32,
}

fn default_layers() -> u32 {
    2
}

impl Default for BoardParameters {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 80.0,
            layers: 2,
        }
    }
}

impl BoardParameters {
    /// Reject malformed parameters before any file is written.
    pub fn validate(&self) -> Result<(), DesignError> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(DesignError::Validation(format!(
                "board dimensions must be positive, got {}mm x {}mm",
                self.width, self.height
            )));
        }
        if !matches!(self.layers, 1 | 2 | 4) {
            return Err(DesignError::Validation(format!(
                "unsupported layer count {}, expected 1, 2 or 4",
                self.layers
            )));
        }
        Ok(())
    }

    /// Human-readable dimension string, e.g. `100mm × 80mm`.
    pub fn dims(&self) -> String {
        format!("{}mm × {}mm", self.width, self.height)
    }
}

/// A single declared connection: one net role and the pins under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Net role name; `VCC`/`GND` are the reserved power/ground roles.
    pub role: String,
    /// Pin identifiers under this role, e.g. `pin_2`.
    pub pins: Vec<String>,
}

/// An electronic component as supplied by the caller, enriched from
/// the component library before encoding starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Type tag, matched case-insensitively against the library.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    /// Pin count; defaulted from the library during enrichment.
    #[serde(default)]
    pub pins: Option<u32>,
    #[serde(default)]
    pub footprint: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    /// Declared pin connections, in declaration order.
    #[serde(
        default,
        serialize_with = "serialize_connections",
        deserialize_with = "deserialize_connections",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub connections: Vec<Connection>,
}

impl Component {
    /// Bare component with just a type tag and a name.
    pub fn new(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            pins: None,
            footprint: None,
            symbol: None,
            connections: Vec::new(),
        }
    }

    /// Effective pin count; 2 when neither caller nor library set one.
    pub fn pin_count(&self) -> u32 {
        self.pins.unwrap_or(2)
    }

    /// Pin indices whose declared role is a reserved power/ground name.
    pub fn reserved_pin_indices(&self) -> Vec<u32> {
        let mut indices = Vec::new();
        for conn in &self.connections {
            if is_reserved_net(&conn.role) {
                for pin in &conn.pins {
                    if let Some(idx) = pin_index(pin) {
                        indices.push(idx);
                    }
                }
            }
        }
        indices
    }
}

/// Extract the trailing pin number from a pin identifier.
///
/// Accepts `pin_4`, `4`, `PA3` and similar; the last run of ASCII
/// digits is the index. Returns `None` when there is none.
pub fn pin_index(id: &str) -> Option<u32> {
    let digits: String = id
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// A named electrical net: one component's pins under one role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Net {
    pub name: String,
    /// Index of the owning component.
    pub component: usize,
    /// Pin identifiers, in declaration order. Never empty.
    pub pins: Vec<String>,
}

impl Net {
    /// Whether this net is a reserved power/ground net.
    pub fn is_power(&self) -> bool {
        is_reserved_net(&self.name)
    }
}

/// A placed component position in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

fn serialize_connections<S: Serializer>(
    connections: &[Connection],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(connections.len()))?;
    for conn in connections {
        map.serialize_entry(&conn.role, &conn.pins)?;
    }
    map.end()
}

/// Accepts both origin formats for `connections`:
///
/// - primary: `{"VCC": ["pin_2"], "GND": ["pin_4"]}` (role -> pins);
/// - fallback, consulted only when the primary form matched no entry:
///   `{"pin_2": "VCC"}` (pin -> role).
///
/// The fallback ordering matters for ambiguous upstream extractors,
/// so both passes preserve the map's declaration order.
fn deserialize_connections<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Connection>, D::Error> {
    struct ConnectionsVisitor;

    impl<'de> Visitor<'de> for ConnectionsVisitor {
        type Value = Vec<Connection>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of net role to pin list, or pin to net role")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries: Vec<(String, serde_json::Value)> = Vec::new();
            while let Some(entry) = access.next_entry()? {
                entries.push(entry);
            }

            // Primary format: values are pin lists.
            let mut connections: Vec<Connection> = Vec::new();
            for (role, value) in &entries {
                if let serde_json::Value::Array(pins) = value {
                    let pins: Vec<String> = pins
                        .iter()
                        .filter_map(|p| p.as_str().map(str::to_string))
                        .collect();
                    connections.push(Connection {
                        role: role.clone(),
                        pins,
                    });
                }
            }
            if !connections.is_empty() {
                return Ok(connections);
            }

            // Fallback format: string values name the role of a single pin.
            for (pin, value) in &entries {
                if let serde_json::Value::String(role) = value {
                    if let Some(conn) = connections.iter_mut().find(|c| &c.role == role) {
                        conn.pins.push(pin.clone());
                    } else {
                        connections.push(Connection {
                            role: role.clone(),
                            pins: vec![pin.clone()],
                        });
                    }
                }
            }
            Ok(connections)
        }
    }

    deserializer.deserialize_map(ConnectionsVisitor)
}
