//! # Menu Catalog
//!
//! In-memory view of the menu, loaded once at session start. Resolves the
//! raw codes the operator types into menu records.
//!
//! ## Code Resolution
//! ```text
//! raw input ──► trim ──► match alpha_code (ASCII case-insensitive)
//!                  │
//!                  └──► match numeric_code verbatim (digits carry no case)
//! ```

use crate::types::MenuRecord;

/// The loaded menu, read-only to the engine.
///
/// Records keep the order they were loaded in (ascending by id from the
/// database).
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    records: Vec<MenuRecord>,
}

impl MenuCatalog {
    /// Creates a catalog from loaded records.
    pub fn new(records: Vec<MenuRecord>) -> Self {
        MenuCatalog { records }
    }

    /// Looks up a record by a raw operator-typed code.
    ///
    /// The input is trimmed and uppercased before matching the alphabetic
    /// code; the numeric code is matched against the trimmed input
    /// verbatim. Returns `None` when no record matches.
    pub fn find_by_code(&self, raw: &str) -> Option<&MenuRecord> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.records
            .iter()
            .find(|r| r.alpha_code.eq_ignore_ascii_case(trimmed) || r.numeric_code == trimmed)
    }

    /// Looks up a record by its database id.
    pub fn find_by_id(&self, id: i64) -> Option<&MenuRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, in load order.
    pub fn records(&self) -> &[MenuRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MenuCatalog {
        MenuCatalog::new(vec![
            MenuRecord {
                id: 7,
                alpha_code: "IDL".to_string(),
                numeric_code: "101".to_string(),
                description: "Idli (2 pcs)".to_string(),
                general_rate_paise: 3000,
                ac_rate_paise: 3500,
            },
            MenuRecord {
                id: 8,
                alpha_code: "DOS".to_string(),
                numeric_code: "102".to_string(),
                description: "Plain Dosa".to_string(),
                general_rate_paise: 4500,
                ac_rate_paise: 5000,
            },
        ])
    }

    #[test]
    fn test_alpha_code_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_code("idl").unwrap().id, 7);
        assert_eq!(catalog.find_by_code("IDL").unwrap().id, 7);
        assert_eq!(catalog.find_by_code("  Idl ").unwrap().id, 7);
    }

    #[test]
    fn test_numeric_code_matches_verbatim() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_code("102").unwrap().id, 8);
        assert_eq!(catalog.find_by_code(" 101 ").unwrap().id, 7);
    }

    #[test]
    fn test_unknown_code_finds_nothing() {
        let catalog = catalog();
        assert!(catalog.find_by_code("999").is_none());
        assert!(catalog.find_by_code("").is_none());
        assert!(catalog.find_by_code("   ").is_none());
    }

    #[test]
    fn test_find_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_id(8).unwrap().alpha_code, "DOS");
        assert!(catalog.find_by_id(99).is_none());
    }
}
