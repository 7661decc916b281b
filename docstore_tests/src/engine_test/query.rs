use super::*;

#[test]
fn sort_by_string_field_orders_ascending() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();
    db.insert("t", row(json!({ "name": "b" }))).unwrap();
    db.insert("t", row(json!({ "name": "a" }))).unwrap();

    let res = db.query("t", &QueryOptions::new().sort_by("name")).unwrap();
    assert_eq!(res.ids(), vec![2, 1]);
}

#[test]
fn sort_by_number_field_is_numeric_not_lexical() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();
    db.insert("t", row(json!({ "age": 10 }))).unwrap();
    db.insert("t", row(json!({ "age": 9 }))).unwrap();
    db.insert("t", row(json!({ "age": 100 }))).unwrap();
    db.insert("t", row(json!({ "age": 9.5 }))).unwrap();

    let res = db.query("t", &QueryOptions::new().sort_by("age")).unwrap();
    assert_eq!(res.ids(), vec![2, 4, 1, 3]);
}

#[test]
fn string_sort_ignores_case_first() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();
    db.insert("t", row(json!({ "name": "bob" }))).unwrap();
    db.insert("t", row(json!({ "name": "Alice" }))).unwrap();
    db.insert("t", row(json!({ "name": "carol" }))).unwrap();
    db.insert("t", row(json!({ "name": "alice" }))).unwrap();

    let res = db.query("t", &QueryOptions::new().sort_by("name")).unwrap();
    assert_eq!(res.ids(), vec![4, 2, 1, 3]);
}

#[test]
fn rows_missing_the_sort_field_come_first() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();
    db.insert("t", row(json!({ "age": 3 }))).unwrap();
    db.insert("t", row(json!({ "name": "no age" }))).unwrap();
    db.insert("t", row(json!({ "age": 1 }))).unwrap();

    let res = db.query("t", &QueryOptions::new().sort_by("age")).unwrap();
    assert_eq!(res.ids(), vec![2, 3, 1]);
}

#[test]
fn sort_by_id_after_updates() {
    let db = test_db();
    seed_winners_3(&db);
    let res = db.query("winners", &QueryOptions::new().sort_by("id")).unwrap();
    assert_eq!(res.ids(), vec![1, 2, 3]);
}

#[test]
fn filter_excludes_non_matching_rows() {
    let db = test_db();
    seed_winners_3(&db);

    let adults = QueryOptions::new()
        .filter(|r| r.get("age").and_then(Value::as_i64).is_some_and(|a| a >= 18));
    let res = db.query("winners", &adults).unwrap();
    assert_eq!(res.ids(), vec![1, 2]);
}

#[test]
fn filter_and_sort_combine() {
    let db = test_db();
    seed_winners_3(&db);

    let opts = QueryOptions::new()
        .filter(|r| r.get("age").and_then(Value::as_i64).is_some_and(|a| a >= 18))
        .sort_by("name");
    let res = db.query("winners", &opts).unwrap();
    let names: Vec<&str> = res.data.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn field_equals_matches_rendered_value() {
    let db = test_db();
    seed_winners_3(&db);

    let by_name = db
        .query("winners", &QueryOptions::new().field_equals("name", "b"))
        .unwrap();
    assert_eq!(by_name.ids(), vec![3]);

    let by_age = db
        .query("winners", &QueryOptions::new().field_equals("age", "20"))
        .unwrap();
    assert_eq!(by_age.ids(), vec![2]);

    let none = db
        .query("winners", &QueryOptions::new().field_equals("phone", ""))
        .unwrap();
    assert!(none.data.is_empty());
}

#[test]
fn filter_matching_nothing_still_returns_schema() {
    let db = test_db();
    seed_winners_3(&db);
    let res = db.query("winners", &QueryOptions::new().filter(|_| false)).unwrap();
    assert!(res.data.is_empty());
    assert_eq!(res.schema, winners_schema());
}
