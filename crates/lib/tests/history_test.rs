//! # Schema History Tests
//!
//! Validates the workspace semantics over the persistence port: overwrite
//! by name, active-entry bookkeeping, and durability through the JSON file
//! store.

use sqlgenius::history::{
    HistoryStore, JsonFileHistoryStore, MemoryHistoryStore, SchemaWorkspace, UploadedFile,
};

const FIRST_CONTENT: &str = "CREATE TABLE users (id INT);";
const SECOND_CONTENT: &str = "CREATE TABLE users (id INT, email VARCHAR(255));";

fn workspace() -> SchemaWorkspace {
    SchemaWorkspace::open(Box::new(MemoryHistoryStore::new())).expect("Failed to open workspace")
}

#[test]
fn test_upload_activates_the_file() {
    let mut ws = workspace();
    ws.upload("schema.sql", FIRST_CONTENT).unwrap();

    assert_eq!(ws.active_schema(), FIRST_CONTENT);
    assert_eq!(ws.active_file(), Some("schema.sql"));
    assert_eq!(ws.entries().len(), 1);
}

/// Uploading a file named `schema.sql` twice with different contents
/// results in exactly one entry holding the second content.
#[test]
fn test_reupload_overwrites_instead_of_duplicating() {
    let mut ws = workspace();
    ws.upload("schema.sql", FIRST_CONTENT).unwrap();
    ws.upload("schema.sql", SECOND_CONTENT).unwrap();

    assert_eq!(ws.entries().len(), 1);
    assert_eq!(ws.entries()[0].name, "schema.sql");
    assert_eq!(ws.entries()[0].content, SECOND_CONTENT);
    assert_eq!(ws.active_schema(), SECOND_CONTENT);
}

#[test]
fn test_select_loads_entry_content() {
    let mut ws = workspace();
    ws.upload("a.sql", FIRST_CONTENT).unwrap();
    ws.upload("b.sql", SECOND_CONTENT).unwrap();

    assert!(ws.select("a.sql"));
    assert_eq!(ws.active_schema(), FIRST_CONTENT);
    assert_eq!(ws.active_file(), Some("a.sql"));

    assert!(!ws.select("missing.sql"));
    // A failed selection leaves the active entry alone.
    assert_eq!(ws.active_file(), Some("a.sql"));
}

/// Removing the entry that is currently active clears both the active
/// schema text and the active-file marker.
#[test]
fn test_remove_active_entry_clears_active_schema() {
    let mut ws = workspace();
    ws.upload("schema.sql", FIRST_CONTENT).unwrap();

    assert!(ws.remove("schema.sql").unwrap());
    assert_eq!(ws.active_schema(), "");
    assert_eq!(ws.active_file(), None);
    assert!(ws.entries().is_empty());
}

#[test]
fn test_remove_inactive_entry_keeps_active_schema() {
    let mut ws = workspace();
    ws.upload("a.sql", FIRST_CONTENT).unwrap();
    ws.upload("b.sql", SECOND_CONTENT).unwrap();

    assert!(ws.remove("a.sql").unwrap());
    assert_eq!(ws.active_schema(), SECOND_CONTENT);
    assert_eq!(ws.active_file(), Some("b.sql"));
    assert_eq!(ws.entries().len(), 1);
}

#[test]
fn test_remove_unknown_entry_is_a_noop() {
    let mut ws = workspace();
    ws.upload("a.sql", FIRST_CONTENT).unwrap();

    assert!(!ws.remove("missing.sql").unwrap());
    assert_eq!(ws.entries().len(), 1);
}

#[test]
fn test_manual_edit_clears_the_marker() {
    let mut ws = workspace();
    ws.upload("schema.sql", FIRST_CONTENT).unwrap();

    ws.set_schema_text("CREATE TABLE other (id INT);");
    assert_eq!(ws.active_file(), None);
    assert_eq!(ws.active_schema(), "CREATE TABLE other (id INT);");
    // The history entry itself is untouched.
    assert_eq!(ws.entries()[0].content, FIRST_CONTENT);
}

#[test]
fn test_history_persists_across_workspaces() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("schema_history.json");

    {
        let store = Box::new(JsonFileHistoryStore::new(&path));
        let mut ws = SchemaWorkspace::open(store).unwrap();
        ws.upload("schema.sql", FIRST_CONTENT).unwrap();
        ws.upload("other.sql", SECOND_CONTENT).unwrap();
    }

    let store = Box::new(JsonFileHistoryStore::new(&path));
    let ws = SchemaWorkspace::open(store).unwrap();
    assert_eq!(ws.entries().len(), 2);
    assert_eq!(ws.entries()[0].name, "schema.sql");
    // The active state is session-local; only the list persists.
    assert_eq!(ws.active_file(), None);
    assert_eq!(ws.active_schema(), "");
}

#[test]
fn test_file_store_loads_empty_when_absent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonFileHistoryStore::new(dir.path().join("missing.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_file_store_round_trips_entries() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonFileHistoryStore::new(dir.path().join("history.json"));

    let files = vec![
        UploadedFile {
            name: "a.sql".to_string(),
            content: FIRST_CONTENT.to_string(),
        },
        UploadedFile {
            name: "b.sql".to_string(),
            content: SECOND_CONTENT.to_string(),
        },
    ];
    store.save(&files).unwrap();
    assert_eq!(store.load().unwrap(), files);
}
