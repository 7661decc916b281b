use super::*;

#[test]
fn open_creates_empty_file_immediately() {
    let dir = temp_dir("fresh");
    let db = Database::open(&dir, "my-database").unwrap();

    assert_eq!(db.path(), dir.join("my-database.json").as_path());
    assert_eq!(read_json(db.path()), json!({ "tables": {} }));
}

#[test]
fn file_layout_matches_documented_format() {
    let dir = temp_dir("layout");
    let db = Database::open(&dir, "layout").unwrap();
    let schema = Schema::new()
        .with_field("id", FieldSpec::primary(FieldType::Number))
        .with_field("name", FieldSpec::new(FieldType::String));
    db.create_table("winners", schema).unwrap();
    db.insert("winners", row(json!({ "name": "59ce", "age": 15 }))).unwrap();

    assert_eq!(
        read_json(db.path()),
        json!({
            "tables": {
                "winners": {
                    "schema": {
                        "id": { "type": "number", "primaryKey": true },
                        "name": { "type": "string" }
                    },
                    "data": [ { "name": "59ce", "age": 15, "id": 1 } ],
                    "nextId": 2
                }
            }
        })
    );
}

#[test]
fn file_is_pretty_printed_with_two_spaces() {
    let dir = temp_dir("pretty");
    let db = Database::open(&dir, "pretty").unwrap();
    db.create_table("t", Schema::new()).unwrap();
    let text = std::fs::read_to_string(db.path()).unwrap();
    assert!(text.starts_with("{\n  \"tables\": {\n    \"t\": {"));
}

#[test]
fn every_mutation_is_written_through() {
    let dir = temp_dir("write_through");
    let db = Database::open(&dir, "wt").unwrap();

    db.create_table("t", Schema::new()).unwrap();
    assert!(read_json(db.path())["tables"]["t"].is_object());

    db.insert("t", row(json!({ "v": 1 }))).unwrap();
    assert_eq!(read_json(db.path())["tables"]["t"]["data"][0]["v"], json!(1));

    db.update("t", 1, row(json!({ "v": 2 }))).unwrap();
    assert_eq!(read_json(db.path())["tables"]["t"]["data"][0]["v"], json!(2));

    db.delete("t", 1).unwrap();
    assert_eq!(read_json(db.path())["tables"]["t"]["data"], json!([]));
    assert_eq!(read_json(db.path())["tables"]["t"]["nextId"], json!(2));

    db.drop_table("t").unwrap();
    assert_eq!(read_json(db.path()), json!({ "tables": {} }));
}

#[test]
fn failed_operations_leave_file_untouched() {
    let dir = temp_dir("failed_ops");
    let db = Database::open(&dir, "f").unwrap();
    db.create_table("t", Schema::new()).unwrap();
    let before = std::fs::read_to_string(db.path()).unwrap();

    assert!(db.create_table("t", Schema::new()).is_err());
    assert!(db.update("t", 3, row(json!({ "x": 1 }))).is_err());
    assert!(db.delete("t", 3).is_err());
    assert!(db.drop_table("ghost").is_err());

    assert_eq!(std::fs::read_to_string(db.path()).unwrap(), before);
}

#[test]
fn reopen_reproduces_tables_rows_and_counters() {
    let dir = temp_dir("roundtrip");
    let snapshot = {
        let db = Database::open(&dir, "rt").unwrap();
        let schema = Schema::new()
            .with_field("name", FieldSpec::new(FieldType::String))
            .with_field("cv", FieldSpec::new(FieldType::File));
        db.create_table("people", schema).unwrap();
        db.create_table("empty", Schema::new()).unwrap();
        db.insert("people", row(json!({ "name": "a", "cv": "a.pdf" }))).unwrap();
        db.insert("people", row(json!({ "name": "b" }))).unwrap();
        db.insert("people", row(json!({ "name": "c", "tags": ["x", "y"] }))).unwrap();
        db.delete("people", 3).unwrap();
        db.update("people", 1, row(json!({ "name": "aa" }))).unwrap();
        db.query("people", &QueryOptions::new()).unwrap()
    };

    let db = Database::open(&dir, "rt").unwrap();
    assert_eq!(db.table_names(), vec!["people", "empty"]);
    assert_eq!(db.query("people", &QueryOptions::new()).unwrap(), snapshot);
    // counter survived: 3 was used and deleted before the restart
    assert_eq!(db.insert("people", row(json!({ "name": "d" }))).unwrap(), 4);
    assert_eq!(db.insert("empty", row(json!({}))).unwrap(), 1);
}

#[test]
fn field_order_survives_roundtrip() {
    let dir = temp_dir("order");
    {
        let db = Database::open(&dir, "o").unwrap();
        db.create_table("t", Schema::new()).unwrap();
        db.insert("t", row(json!({ "zeta": 1, "alpha": 2, "mid": 3 }))).unwrap();
    }
    let db = Database::open(&dir, "o").unwrap();
    let r = db.get_row("t", 1).unwrap();
    let keys: Vec<&str> = r.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid", "id"]);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = temp_dir("no_tmp");
    let db = Database::open(&dir, "t").unwrap();
    db.create_table("t", Schema::new()).unwrap();
    db.save().unwrap();

    assert!(!temp_path(db.path()).exists());
    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn memory_is_source_of_truth_until_reload() {
    let dir = temp_dir("reload");
    let db = Database::open(&dir, "r").unwrap();
    db.create_table("t", Schema::new()).unwrap();

    std::fs::write(
        db.path(),
        r#"{ "tables": { "other": { "schema": {}, "data": [], "nextId": 1 } } }"#,
    )
    .unwrap();
    assert_eq!(db.table_names(), vec!["t"]);

    db.reload().unwrap();
    assert_eq!(db.table_names(), vec!["other"]);
}

#[test]
fn open_creates_missing_data_dir() {
    let dir = temp_dir("nested").join("a").join("b");
    let db = Database::open(&dir, "deep").unwrap();
    assert!(db.path().exists());
}

#[test]
fn failed_save_keeps_memory_and_previous_file() {
    let dir = temp_dir("failed_save");
    let db = Database::open(&dir, "db").unwrap();
    db.create_table("t", Schema::new()).unwrap();
    db.insert("t", row(json!({ "n": 1 }))).unwrap();
    let before = read_json(db.path());

    // a directory squatting on the temp name makes the next write fail
    let tmp = temp_path(db.path());
    std::fs::create_dir(&tmp).unwrap();

    let err = db.insert("t", row(json!({ "n": 2 }))).unwrap_err();
    match &err {
        StoreError::Io { path, .. } => assert_eq!(path, &tmp),
        other => panic!("expected io error, got {other:?}"),
    }

    let res = db.query("t", &QueryOptions::new()).unwrap();
    assert_eq!(res.ids(), vec![1, 2]);
    assert_eq!(read_json(db.path()), before);

    std::fs::remove_dir(&tmp).unwrap();
    db.save().unwrap();
    assert_eq!(read_json(db.path())["tables"]["t"]["data"][1]["n"], json!(2));
}

#[test]
fn failed_rename_cleans_up_temp_file() {
    let dir = temp_dir("failed_rename");
    let target = dir.join("occupied");
    std::fs::create_dir_all(target.join("child")).unwrap();

    let mut catalog = Catalog::new();
    catalog.create_table("t", Schema::new()).unwrap();
    let err = catalog.save_to_path(&target).unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }), "{err:?}");
    assert!(!temp_path(&target).exists());
}
