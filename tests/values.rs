//! Rows as dynamic bags and shared column-name handles.

use std::sync::Arc;

use rowbind::{MapOptions, Row, Value};

#[test]
fn rows_resolve_values_by_normalized_name() {
    let row = Row::from_pairs(vec![
        ("Order_Id".to_string(), Value::I64(9)),
        ("order_id".to_string(), Value::I64(10)),
        ("Total".to_string(), Value::F64(3.5)),
    ]);
    // First occurrence wins on duplicates.
    assert_eq!(row.value("orderid"), Some(&Value::I64(9)));
    assert_eq!(row.value("ORDER_ID"), Some(&Value::I64(9)));
    assert_eq!(row.value("total"), Some(&Value::F64(3.5)));
    assert_eq!(row.value("missing"), None);
}

#[test]
fn keep_original_names_distinguishes_underscored_duplicates() {
    let row = Row::from_pairs(vec![
        ("orderid".to_string(), Value::I64(1)),
        ("order_id".to_string(), Value::I64(2)),
    ]);
    let options = MapOptions {
        keep_original_names: true,
    };
    assert_eq!(row.value_with("order_id", &options), Some(&Value::I64(2)));
    assert_eq!(row.value_with("orderid", &options), Some(&Value::I64(1)));
}

#[test]
fn sibling_rows_share_one_name_allocation() {
    let names: Arc<[String]> = vec!["a".to_string(), "b".to_string()].into();
    let first = Row::new(Arc::clone(&names), vec![Value::I64(1), Value::I64(2)]);
    let second = Row::new(first.share_names(), vec![Value::I64(3), Value::I64(4)]);
    assert!(Arc::ptr_eq(&first.share_names(), &second.share_names()));
    assert_eq!(second.get(1), Some(&Value::I64(4)));
}

#[test]
fn taking_a_value_leaves_null_behind() {
    let mut row = Row::from_pairs(vec![("a".to_string(), Value::Str("x".into()))]);
    assert_eq!(row.take(0), Value::Str("x".into()));
    assert_eq!(row.take(0), Value::Null);
    assert_eq!(row.take(99), Value::Null);
}
