use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;

use moviedb::db::{Db, RetrieveSummary, MOVIES_KEY, PERSONS_KEY, TV_SERIES_EPISODES_KEY};
use moviedb::errors::DbError;
use moviedb::movie::MovieKind;
use moviedb::registry::{slots_from_value, Slots};
use moviedb::store::FileStore;
use moviedb::validation::Violation;

fn make_db(dir: &TempDir) -> Db<FileStore> {
    Db::new(FileStore::new(dir.path()), log::discard_logger())
}

fn slots(value: Value) -> Slots {
    slots_from_value(value).expect("slots are an object")
}

fn read_document(dir: &TempDir, key: &str) -> Value {
    let text = fs::read_to_string(dir.path().join(format!("{}.json", key))).expect("read document");

    serde_json::from_str(&text).expect("parse document")
}

#[test]
fn added_persons_survive_a_reload() {
    let dir = tempfile::tempdir().expect("create temporary directory");

    {
        let mut db = make_db(&dir);
        db.retrieve_all();
        db.add_person(slots(json!({ "personId": 1, "name": "Uma Thurman", "role": ["actor"] })))
            .expect("add person");
        db.save_all().expect("save");
    }

    let mut db = make_db(&dir);
    let summary = db.retrieve_all();

    assert_eq!(summary, RetrieveSummary { persons: 1, movies: 0, skipped: 0 });
    assert_eq!(db.persons().ids().collect::<Vec<_>>(), vec![1]);
    assert_eq!(db.persons().get(1).map(|p| p.name()), Some("Uma Thurman"));
}

#[test]
fn missing_directory_loads_as_empty() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let mut db = Db::new(FileStore::new(dir.path().join("absent")), log::discard_logger());

    assert_eq!(db.retrieve_all(), RetrieveSummary::default());

    db.save_all().expect("save creates the directory");
    assert_eq!(read_document(&dir, "absent/persons"), json!({}));
}

#[test]
fn test_data_round_trips_through_files() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let mut db = make_db(&dir);
    db.generate_test_data().expect("generate test data");

    let mut reloaded = make_db(&dir);
    let summary = reloaded.retrieve_all();

    assert_eq!(summary, RetrieveSummary { persons: 16, movies: 6, skipped: 0 });
    assert_eq!(reloaded.persons(), db.persons());
    assert_eq!(reloaded.movies(), db.movies());

    match reloaded.movies().get(5).map(|m| m.kind()) {
        Some(MovieKind::Biography { about }) => assert_eq!(*about, 14),
        other => panic!("expected a biography, got {:?}", other),
    }
}

#[test]
fn saving_without_changes_writes_identical_files() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let mut db = make_db(&dir);
    db.generate_test_data().expect("generate test data");

    let keys = [PERSONS_KEY, MOVIES_KEY, TV_SERIES_EPISODES_KEY];
    let read_all = || {
        keys.iter()
            .map(|k| fs::read(dir.path().join(format!("{}.json", k))).expect("read file"))
            .collect::<Vec<_>>()
    };

    let before = read_all();
    db.retrieve_all();
    db.save_all().expect("save again");

    assert_eq!(read_all(), before);
}

#[test]
fn corrupt_documents_are_treated_as_empty() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let mut db = make_db(&dir);
    db.generate_test_data().expect("generate test data");

    fs::write(dir.path().join("persons.json"), "{ \"1\": ").expect("corrupt persons");

    let summary = db.retrieve_all();

    // every movie references a person, so none of them survive
    assert_eq!(summary.persons, 0);
    assert_eq!(summary.movies, 0);
    assert_eq!(summary.skipped, 6);
}

#[test]
fn destroyed_persons_are_not_resurrected() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let mut db = make_db(&dir);
    db.generate_test_data().expect("generate test data");

    assert!(db.destroy_person(14));
    db.save_all().expect("save");
    db.retrieve_all();

    assert!(!db.persons().contains(14));
    assert!(!db.movies().contains(5));
    assert!(read_document(&dir, MOVIES_KEY).get("5").is_none());
}

#[test]
fn rejected_records_are_never_written() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let mut db = make_db(&dir);
    db.retrieve_all();

    let result = db.add_movie(slots(json!({ "movieId": 10, "title": "", "releaseDate": "1994-05-12" })));
    assert!(matches!(result, Err(DbError::Violation(Violation::Range(_)))));

    db.save_all().expect("save");
    assert_eq!(read_document(&dir, MOVIES_KEY), json!({}));
}

#[test]
fn clearing_empties_the_files() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let mut db = make_db(&dir);
    db.generate_test_data().expect("generate test data");

    db.clear_data().expect("clear data");

    for key in &[PERSONS_KEY, MOVIES_KEY, TV_SERIES_EPISODES_KEY] {
        assert_eq!(read_document(&dir, key), json!({}));
    }
    assert_eq!(make_db(&dir).retrieve_all(), RetrieveSummary::default());
}
