use diesel::prelude::*;
use pushkind_portfolio::schema::{categories, portfolio_items, sub_categories};

mod common;

#[test]
fn migrations_create_empty_tables() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("pooled connection");

    let counts: [i64; 3] = [
        categories::table.count().get_result(&mut conn).unwrap(),
        sub_categories::table.count().get_result(&mut conn).unwrap(),
        portfolio_items::table.count().get_result(&mut conn).unwrap(),
    ];
    assert_eq!(counts, [0, 0, 0]);
}
