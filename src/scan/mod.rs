//! Document scanning.
//!
//! Turns a document into the record set the symbol store keeps for its
//! path. A scan always replaces the previous record set wholesale, so
//! symbols deleted from source disappear after the next scan.

pub mod line;
pub mod scope;

pub use line::{classify, Declaration, SourceLine, SymbolKind};
pub use scope::{is_in_mixin_block, scan_declarations};

use crate::document::Document;
use crate::store::{RecordSet, SymbolRecord, SymbolStore};

/// Build the record set for a document. Later declarations of the same
/// name overwrite earlier ones.
pub fn records_for(doc: &Document) -> RecordSet {
    scan_declarations(doc)
        .into_iter()
        .map(|decl| (decl.name.clone(), SymbolRecord::from(decl)))
        .collect()
}

/// Scan a document and replace its record set in the store.
///
/// Persistence failures are logged; the in-memory view of the store is
/// still updated so completion keeps working.
pub fn scan_file(doc: &Document, store: &mut dyn SymbolStore) {
    let records = records_for(doc);
    tracing::debug!(
        "Scanned {}: {} symbols",
        doc.path.display(),
        records.len()
    );

    if let Err(e) = store.set(&doc.path, records) {
        tracing::warn!("Failed to persist symbols for {}: {}", doc.path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "$a: 1\n=m($x)\n  $b: 2\n$a: 3\n";

    #[test]
    fn test_latest_declaration_wins() {
        let records = records_for(&Document::new("/w/a.sass", SOURCE));
        assert_eq!(
            records.keys().cloned().collect::<Vec<_>>(),
            vec!["$a", "$b", "m"]
        );
        assert_eq!(records["$a"].detail, "$a: 3");
        assert_eq!(records["m"].insert, "m($1)");
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let doc = Document::new("/w/a.sass", SOURCE);
        let mut store = MemoryStore::new();

        scan_file(&doc, &mut store);
        let first = store.get(&doc.path).unwrap();
        scan_file(&doc, &mut store);
        let second = store.get(&doc.path).unwrap();

        assert_eq!(*first, *second);
    }

    #[test]
    fn test_rescan_drops_deleted_symbols() {
        let mut store = MemoryStore::new();
        scan_file(&Document::new("/w/a.sass", SOURCE), &mut store);
        scan_file(&Document::new("/w/a.sass", "$a: 1\n"), &mut store);

        let records = store.get(std::path::Path::new("/w/a.sass")).unwrap();
        assert_eq!(records.keys().cloned().collect::<Vec<_>>(), vec!["$a"]);
    }

    #[test]
    fn test_rescan_leaves_other_files_alone() {
        let mut store = MemoryStore::new();
        scan_file(&Document::new("/w/vars.sass", "$v: 1\n"), &mut store);
        scan_file(
            &Document::new("/w/main.sass", "@import vars\n$m: 2\n"),
            &mut store,
        );
        scan_file(&Document::new("/w/main.sass", "@import vars\n"), &mut store);

        let vars = store.get(std::path::Path::new("/w/vars.sass")).unwrap();
        assert!(vars.contains_key("$v"));
    }
}
