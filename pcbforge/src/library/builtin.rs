//! Embedded default component library.
//!
//! The JSON table is compiled into the binary so the library works
//! with no files on disk; `ComponentLibrary::load` replaces it when
//! users maintain their own table.

use super::LibraryEntry;

const EMBEDDED_COMPONENTS: &str = include_str!("../../library/components.json");

/// Parse the embedded table. Invalid entries are skipped with a
/// warning instead of failing the whole table.
pub fn builtin_entries() -> Vec<LibraryEntry> {
    match serde_json::from_str::<Vec<LibraryEntry>>(EMBEDDED_COMPONENTS) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("failed to parse embedded component library: {}", e);
            Vec::new()
        }
    }
}
