use super::*;

#[test]
fn sequential_inserts_get_ids_one_to_n() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();

    let ids: Vec<u64> = (0..5)
        .map(|i| db.insert("t", row(json!({ "n": i }))).unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let res = db.query("t", &QueryOptions::new()).unwrap();
    assert_eq!(res.ids(), vec![1, 2, 3, 4, 5]);
    for (i, r) in res.data.iter().enumerate() {
        assert_eq!(r["n"], json!(i));
    }
}

#[test]
fn deleted_ids_are_never_reused() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();

    let a = db.insert("t", row(json!({ "name": "A" }))).unwrap();
    let b = db.insert("t", row(json!({ "name": "B" }))).unwrap();
    db.delete("t", a).unwrap();
    let c = db.insert("t", row(json!({ "name": "C" }))).unwrap();

    assert_eq!((a, b, c), (1, 2, 3));
    let res = db.query("t", &QueryOptions::new()).unwrap();
    assert_eq!(res.ids(), vec![2, 3]);
}

#[test]
fn deleting_the_newest_row_does_not_rewind_counter() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();
    db.insert("t", row(json!({}))).unwrap();
    let last = db.insert("t", row(json!({}))).unwrap();
    db.delete("t", last).unwrap();
    assert_eq!(db.insert("t", row(json!({}))).unwrap(), 3);
}

#[test]
fn caller_supplied_id_is_overwritten() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();
    let id = db.insert("t", row(json!({ "id": 500, "name": "x" }))).unwrap();
    assert_eq!(id, 1);
    assert_eq!(db.get_row("t", 1).unwrap()["id"], json!(1));
    assert!(db.get_row("t", 500).is_err());
}

#[test]
fn ids_are_per_table() {
    let db = test_db();
    db.create_table("a", Schema::new()).unwrap();
    db.create_table("b", Schema::new()).unwrap();
    db.insert("a", row(json!({}))).unwrap();
    db.insert("a", row(json!({}))).unwrap();
    assert_eq!(db.insert("b", row(json!({}))).unwrap(), 1);
}

#[test]
fn recreated_table_starts_counting_from_one() {
    let db = test_db();
    db.create_table("t", Schema::new()).unwrap();
    db.insert("t", row(json!({}))).unwrap();
    db.insert("t", row(json!({}))).unwrap();
    db.drop_table("t").unwrap();
    db.create_table("t", Schema::new()).unwrap();
    assert_eq!(db.insert("t", row(json!({}))).unwrap(), 1);
}
