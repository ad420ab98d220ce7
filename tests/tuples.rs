//! Positional tuple construction.

use rowbind::{BindError, BindRows, ConfigError, Mapper, Row, Value};

fn unnamed(values: Vec<Value>) -> Row {
    let names: Vec<String> = (0..values.len()).map(|i| format!("c{i}")).collect();
    Row::new(names.into(), values)
}

#[test]
fn binds_left_to_right_ignoring_names() {
    let mut binder = Mapper::new().tuples::<(i64, String, bool)>().unwrap();
    let out = binder
        .bind_row(unnamed(vec![
            Value::I64(42),
            Value::Str("answer".into()),
            Value::Bool(true),
        ]))
        .unwrap();
    assert_eq!(out, (42, "answer".to_string(), true));
}

#[test]
fn option_elements_accept_null() {
    let mut binder = Mapper::new().tuples::<(i64, Option<String>)>().unwrap();
    let out = binder
        .bind_row(unnamed(vec![Value::I64(1), Value::Null]))
        .unwrap();
    assert_eq!(out, (1, None));
}

#[test]
fn null_into_plain_element_aborts_the_row() {
    let mut binder = Mapper::new().tuples::<(i64, String)>().unwrap();
    let err = binder
        .bind_row(unnamed(vec![Value::I64(1), Value::Null]))
        .unwrap_err();
    match err {
        BindError::AtColumn { column: 1, source } => {
            assert!(matches!(*source, BindError::UnexpectedNull));
        }
        other => panic!("expected column-annotated null error, got {other}"),
    }
}

#[test]
fn narrow_rows_are_rejected() {
    let mut binder = Mapper::new().tuples::<(i64, i64, i64)>().unwrap();
    let err = binder
        .bind_row(unnamed(vec![Value::I64(1), Value::I64(2)]))
        .unwrap_err();
    assert!(matches!(
        err,
        BindError::RowTooNarrow {
            expected: 3,
            got: 2
        }
    ));
}

#[test]
fn extra_trailing_columns_are_ignored() {
    let mut binder = Mapper::new().tuples::<(i64,)>().unwrap();
    let out = binder
        .bind_row(unnamed(vec![Value::I64(5), Value::Str("extra".into())]))
        .unwrap();
    assert_eq!(out, (5,));
}

#[test]
fn cursor_reads_tuples_back_to_back_from_one_row() {
    use rowbind::{FromRow, RowCursor};

    let mut row = unnamed(vec![
        Value::I64(1),
        Value::Str("a".into()),
        Value::I64(2),
        Value::Str("b".into()),
    ]);
    let mut cursor = RowCursor::new(&mut row);
    let first = <(i64, String)>::from_row(&mut cursor).unwrap();
    let second = <(i64, String)>::from_row(&mut cursor).unwrap();
    assert_eq!(first, (1, "a".to_string()));
    assert_eq!(second, (2, "b".to_string()));
    assert_eq!(cursor.position(), 4);
}

#[test]
fn arity_twelve_is_accepted() {
    type Wide = (
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
    );
    let mut binder = Mapper::new().tuples::<Wide>().unwrap();
    let out = binder
        .bind_row(unnamed((0..12).map(Value::I64).collect()))
        .unwrap();
    assert_eq!(out.0, 0);
    assert_eq!(out.11, 11);
}

#[test]
fn arity_thirteen_is_a_configuration_error() {
    type TooWide = (
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
    );
    let err = Mapper::new().tuples::<TooWide>().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ArityExceeded {
            arity: 13,
            max: 12
        }
    ));
}
