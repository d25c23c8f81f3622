use student_sqlite::{Mutation, StoreConfig, StoreError, StoreResult, StudentRecord, StudentStore};
use tempfile::{NamedTempFile, TempDir};

// Helper function to create an in-memory store for testing
fn create_test_store() -> StoreResult<StudentStore> {
    StudentStore::open_in_memory()
}

// Helper function to create a temporary file-based store
fn create_temp_store() -> StoreResult<(StudentStore, NamedTempFile)> {
    let temp_file = NamedTempFile::new().unwrap();
    let store = StudentStore::open(&StoreConfig::new(temp_file.path()))?;
    Ok((store, temp_file))
}

fn ann() -> StudentRecord {
    StudentRecord::new("12345", "Ann", 20, 88.5)
}

#[test]
fn test_add_then_list() {
    test_add_then_list_impl().unwrap();
}

fn test_add_then_list_impl() -> StoreResult<()> {
    let store = create_test_store()?;

    store.add(&ann())?;

    let students = store.list()?;
    assert_eq!(students, vec![ann()]);
    assert_eq!(store.average_grade()?, 88.5);
    assert_eq!(store.count()?, 1);
    Ok(())
}

#[test]
fn test_duplicate_id_is_rejected() {
    test_duplicate_id_is_rejected_impl().unwrap();
}

fn test_duplicate_id_is_rejected_impl() -> StoreResult<()> {
    let store = create_test_store()?;
    store.add(&ann())?;

    let err = store
        .add(&StudentRecord::new("12345", "Bob", 30, 50.0))
        .unwrap_err();
    match err {
        StoreError::DuplicateKey { id } => assert_eq!(id, "12345"),
        other => panic!("expected DuplicateKey, got {other:?}"),
    }

    let students = store.list()?;
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Ann");
    Ok(())
}

#[test]
fn test_remove() {
    test_remove_impl().unwrap();
}

fn test_remove_impl() -> StoreResult<()> {
    let store = create_test_store()?;
    store.add(&ann())?;
    store.add(&StudentRecord::new("54321", "Bob", 22, 70.0))?;

    assert_eq!(store.remove("12345")?, Mutation::Applied);
    assert!(!store.contains("12345")?);
    assert!(store.contains("54321")?);

    // Removing again is a no-op
    assert_eq!(store.remove("12345")?, Mutation::NotFound);
    assert_eq!(store.remove("99999")?, Mutation::NotFound);
    assert_eq!(store.count()?, 1);
    Ok(())
}

#[test]
fn test_update() {
    test_update_impl().unwrap();
}

fn test_update_impl() -> StoreResult<()> {
    let store = create_test_store()?;
    store.add(&ann())?;

    let changed = StudentRecord::new("12345", "Annie", 21, 91.0);
    assert_eq!(store.update(&changed)?, Mutation::Applied);
    assert_eq!(store.get("12345")?, Some(changed));

    let missing = StudentRecord::new("00000", "Nobody", 40, 10.0);
    assert_eq!(store.update(&missing)?, Mutation::NotFound);
    assert_eq!(store.get("00000")?, None);
    assert_eq!(store.count()?, 1);
    Ok(())
}

#[test]
fn test_not_found_conversion() {
    assert!(Mutation::Applied.ok_or_not_found("12345").is_ok());
    let err = Mutation::NotFound.ok_or_not_found("12345").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { ref id } if id == "12345"));
    assert_eq!(err.to_string(), "Student with ID 12345 does not exist.");
}

#[test]
fn test_average_grade() {
    test_average_grade_impl().unwrap();
}

fn test_average_grade_impl() -> StoreResult<()> {
    let store = create_test_store()?;
    assert_eq!(store.average_grade()?, 0.0);

    store.add(&StudentRecord::new("11111", "Ann", 20, 90.0))?;
    store.add(&StudentRecord::new("22222", "Bob", 21, 70.0))?;
    assert_eq!(store.average_grade()?, 80.0);

    store.remove("11111")?;
    store.remove("22222")?;
    assert_eq!(store.average_grade()?, 0.0);
    Ok(())
}

#[test]
fn test_records_survive_reopen() {
    test_records_survive_reopen_impl().unwrap();
}

fn test_records_survive_reopen_impl() -> StoreResult<()> {
    let (store, temp_file) = create_temp_store()?;
    assert_eq!(store.path(), temp_file.path());
    store.add(&ann())?;
    store.close()?;

    let reopened = StudentStore::open(&StoreConfig::new(temp_file.path()))?;
    assert_eq!(reopened.list()?, vec![ann()]);
    reopened.close()?;
    Ok(())
}

#[test]
fn test_open_unreachable_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("students.db");

    let err = StudentStore::open(&StoreConfig::new(&path)).unwrap_err();
    match err {
        StoreError::StorageUnavailable { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected StorageUnavailable, got {other:?}"),
    }
}

#[test]
fn test_opens_table_created_elsewhere() {
    test_opens_table_created_elsewhere_impl().unwrap();
}

fn test_opens_table_created_elsewhere_impl() -> StoreResult<()> {
    let temp_file = NamedTempFile::new().unwrap();
    {
        let conn = rusqlite::Connection::open(temp_file.path())?;
        conn.execute_batch(
            r#"
            CREATE TABLE students (name TEXT, age INTEGER, grade REAL, id TEXT PRIMARY KEY);
            INSERT INTO students (name, age, grade, id) VALUES ('Cleo', 19, 64.25, '77777');
            "#,
        )?;
    }

    let store = StudentStore::open(&StoreConfig::new(temp_file.path()))?;
    assert_eq!(
        store.get("77777")?,
        Some(StudentRecord::new("77777", "Cleo", 19, 64.25))
    );
    Ok(())
}
