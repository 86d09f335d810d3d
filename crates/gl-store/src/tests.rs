use crate::*;
use gl_core::{CodecConfig, PatternClass};
use std::path::PathBuf;
use tempfile::TempDir;

const DOC: &str = "### **📜 Constitutional Framework**\n**Historical Analysis**\n\
The constitutional framework defines government authority.\n\
- **Judicial Review**: the constitutional framework limits government authority.\n\
### **📜 Constitutional Framework**\n**Historical Analysis**\n\
- **Judicial Review**: government authority rests on the constitutional framework.\n\
### **📜 Constitutional Framework**\n**Historical Analysis**\n\
- **Judicial Review**: prices in $ and € stay intact.\n";

fn make_store() -> (TempDir, DocumentStore) {
    let tmp = TempDir::new().unwrap();
    let store = DocumentStore::new(tmp.path());
    (tmp, store)
}

// ========== Paths ==========

#[test]
fn test_side_file_path() {
    let (_tmp, store) = make_store();
    let p = store.side_file_path("docs/report.gl");
    assert!(p.ends_with("docs/report.gl.dict.json"));
    assert!(store.listing_path("a.gl").ends_with("a.gl.dict.md"));
}

#[test]
fn test_absolute_path_passthrough() {
    let (tmp, store) = make_store();
    let abs = tmp.path().join("x.md");
    assert_eq!(store.path(&abs), abs);
}

#[test]
fn test_write_read_string() {
    let (_tmp, store) = make_store();
    store.write_string("nested/dir/doc.md", "hello").unwrap();
    assert!(store.exists("nested/dir/doc.md"));
    assert_eq!(store.read_string("nested/dir/doc.md").unwrap(), "hello");
}

#[test]
fn test_read_missing() {
    let (_tmp, store) = make_store();
    assert!(matches!(store.read_string("missing.md"), Err(StoreError::NotFound { .. })));
}

// ========== Side-files ==========

#[test]
fn test_compress_and_decompress_file() {
    let (_tmp, store) = make_store();
    store.write_string("doc.md", DOC).unwrap();
    let config = CodecConfig::default();

    let bundle = store.compress_file("doc.md", "doc.gl", &config).unwrap();
    assert!(store.exists("doc.gl"));
    assert!(store.side_file_path("doc.gl").exists());
    assert_eq!(bundle.source.as_deref(), Some("doc.md"));
    assert_eq!(bundle.stats.validation.as_deref(), Some("PASS"));
    assert!(bundle.stats.compressed_size < bundle.stats.original_size);
    assert_eq!(bundle.stats.classes.len(), 3);

    store.decompress_file("doc.gl", "restored.md").unwrap();
    assert_eq!(store.read_string("restored.md").unwrap(), DOC);
}

#[test]
fn test_bundle_roundtrip() {
    let (_tmp, store) = make_store();
    store.write_string("doc.md", DOC).unwrap();
    let bundle = store
        .compress_file("doc.md", "doc.gl", &CodecConfig::default())
        .unwrap();
    let loaded = store.load_bundle("doc.gl").unwrap();
    assert_eq!(loaded, bundle);
    assert_eq!(
        loaded.stats.class(PatternClass::Word).unwrap().entries,
        loaded.dictionaries.word.len()
    );
}

#[test]
fn test_missing_side_file() {
    let (_tmp, store) = make_store();
    store.write_string("orphan.gl", "$A").unwrap();
    assert!(matches!(
        store.decompress_file("orphan.gl", "out.md"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn test_corrupt_side_file() {
    let (_tmp, store) = make_store();
    store.write_string("bad.gl", "text").unwrap();
    std::fs::write(store.side_file_path("bad.gl"), "{ not json").unwrap();
    assert!(matches!(
        store.load_bundle("bad.gl"),
        Err(StoreError::CorruptSideFile { .. })
    ));
}

#[test]
fn test_corrupt_compressed_text() {
    let (_tmp, store) = make_store();
    store.write_string("doc.md", DOC).unwrap();
    store
        .compress_file("doc.md", "doc.gl", &CodecConfig::default())
        .unwrap();
    store.write_string("doc.gl", "unknown code $zz").unwrap();
    assert!(matches!(
        store.decompress_file("doc.gl", "out.md"),
        Err(StoreError::Codec(gl_core::GlossaError::CorruptInput { .. }))
    ));
}

#[test]
fn test_listing_file() {
    let (_tmp, store) = make_store();
    store.write_string("doc.md", DOC).unwrap();
    let config = CodecConfig::default();
    let bundle = store.compress_file("doc.md", "doc.gl", &config).unwrap();
    store.write_listing("doc.gl", &bundle.dictionaries).unwrap();
    let listing = store.read_string(store.listing_path("doc.gl")).unwrap();
    assert!(listing.contains("Word Dictionary"));
    let parsed = store.read_listing("doc.gl", &config).unwrap();
    assert_eq!(parsed.total_entries(), bundle.dictionaries.total_entries());
}

// ========== Batch ==========

#[test]
fn test_batch_isolates_failures() {
    let (_tmp, store) = make_store();
    let mut jobs = Vec::new();
    for i in 0..6 {
        let source = PathBuf::from(format!("in/doc{i}.md"));
        store.write_string(&source, &DOC.repeat(i + 1)).unwrap();
        jobs.push((source, PathBuf::from(format!("out/doc{i}.gl"))));
    }
    jobs.insert(2, (PathBuf::from("in/missing.md"), PathBuf::from("out/missing.gl")));

    let outcomes = compress_files(&store, &jobs, &CodecConfig::default());
    assert_eq!(outcomes.len(), 7);
    assert!(!outcomes[2].is_ok());
    assert!(matches!(outcomes[2].result, Err(StoreError::NotFound { .. })));
    assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 6);
    assert_eq!(outcomes[3].source, PathBuf::from("in/doc2.md"));

    let restore: Vec<(PathBuf, PathBuf)> = (0..6)
        .map(|i| {
            (
                PathBuf::from(format!("out/doc{i}.gl")),
                PathBuf::from(format!("restored/doc{i}.md")),
            )
        })
        .collect();
    for (_, result) in decompress_files(&store, &restore) {
        result.unwrap();
    }
    for i in 0..6 {
        assert_eq!(
            store.read_string(format!("restored/doc{i}.md")).unwrap(),
            DOC.repeat(i + 1)
        );
    }
}

#[test]
fn test_compressed_name() {
    let name = batch::compressed_name(std::path::Path::new("docs/a.md"), "gl");
    assert_eq!(name, PathBuf::from("docs/a.md.gl"));
}
