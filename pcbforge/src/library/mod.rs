//! Component Library
//!
//! Maps component type tags to footprint, pin count and symbol
//! metadata. The table is data, not code: it ships as a JSON file
//! embedded in the binary as a fallback, and callers can load a
//! replacement table from disk to add component families without
//! recompiling.

pub mod builtin;

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::model::Component;

/// Fallback footprint for types the library does not know.
pub const GENERIC_FOOTPRINT: &str = "Generic_Footprint";
/// Fallback symbol for types the library does not know.
pub const GENERIC_SYMBOL: &str = "Device:Unknown";

/// One component family in the library table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Type tag, matched case-insensitively as a substring of the
    /// component's declared type.
    #[serde(rename = "type")]
    pub tag: String,
    pub footprint: String,
    pub pins: u32,
    pub symbol: String,
}

/// Ordered table of component families. Lookup is first-match in
/// table order, so more specific tags should come first in the file.
#[derive(Debug, Clone)]
pub struct ComponentLibrary {
    entries: Vec<LibraryEntry>,
}

impl ComponentLibrary {
    /// The embedded default table.
    pub fn builtin() -> Self {
        Self {
            entries: builtin::builtin_entries(),
        }
    }

    /// Load a replacement table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        let entries: Vec<LibraryEntry> = serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
        tracing::info!(
            "loaded {} component families from {}",
            entries.len(),
            path.display()
        );
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    /// Find the entry for a component type tag: case-insensitive,
    /// matching the library tag as a substring of the declared type.
    pub fn lookup(&self, component_type: &str) -> Option<&LibraryEntry> {
        if component_type.is_empty() {
            return None;
        }
        let lowered = component_type.to_lowercase();
        self.entries
            .iter()
            .find(|entry| lowered.contains(&entry.tag.to_lowercase()))
    }

    /// Fill missing pin counts, footprints and symbols in place.
    ///
    /// Unknown types fall back to the generic footprint and symbol
    /// rather than erroring; a component is never dropped here.
    pub fn enrich(&self, components: &mut [Component]) {
        for component in components.iter_mut() {
            if let Some(entry) = self.lookup(&component.kind) {
                if component.pins.is_none() {
                    component.pins = Some(entry.pins);
                }
                component.footprint = Some(entry.footprint.clone());
                component.symbol = Some(entry.symbol.clone());
            } else {
                tracing::warn!(
                    "no library entry for component type {:?}, using generic footprint",
                    component.kind
                );
                if component.footprint.is_none() {
                    component.footprint = Some(GENERIC_FOOTPRINT.to_string());
                }
                if component.symbol.is_none() {
                    component.symbol = Some(GENERIC_SYMBOL.to_string());
                }
            }
        }
    }
}

impl Default for ComponentLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Process-wide shared copy of the builtin table. Initialized once,
/// never mutated.
pub fn global() -> &'static ComponentLibrary {
    static LIBRARY: OnceLock<ComponentLibrary> = OnceLock::new();
    LIBRARY.get_or_init(ComponentLibrary::builtin)
}
