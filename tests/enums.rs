//! Enum coercion from member names and ordinals.

use rowbind::{BindError, BindRows, DynEnum, Entity, Mapper, Row, Value};

#[derive(Debug, Default, Clone, Copy, PartialEq, DynEnum)]
enum Status {
    #[default]
    Pending,
    Active,
    Disabled,
}

#[derive(Debug, Default, Clone, PartialEq, Entity)]
struct User {
    id: i64,
    status: Status,
    history: Vec<Status>,
}

fn row(pairs: Vec<(&str, Value)>) -> Row {
    Row::from_pairs(pairs.into_iter().map(|(n, v)| (n.to_string(), v)).collect())
}

#[test]
fn binds_by_member_name() {
    let mut binder = Mapper::new().entities::<User>();
    let out = binder
        .bind_row(row(vec![
            ("id", Value::I64(1)),
            ("status", Value::Str("Active".into())),
        ]))
        .unwrap();
    assert_eq!(out.status, Status::Active);
}

#[test]
fn binds_by_ordinal_from_any_integer_width() {
    let mut binder = Mapper::new().entities::<User>();
    let out = binder
        .bind_row(row(vec![
            ("id", Value::I64(1)),
            ("status", Value::U8(2)),
        ]))
        .unwrap();
    assert_eq!(out.status, Status::Disabled);

    let mut binder = Mapper::new().entities::<User>();
    let out = binder
        .bind_row(row(vec![
            ("id", Value::I64(1)),
            ("status", Value::I64(0)),
        ]))
        .unwrap();
    assert_eq!(out.status, Status::Pending);
}

#[test]
fn unknown_name_aborts_the_row() {
    let mut binder = Mapper::new().entities::<User>();
    let err = binder
        .bind_row(row(vec![
            ("id", Value::I64(1)),
            ("status", Value::Str("Archived".into())),
        ]))
        .unwrap_err();
    match err {
        BindError::AtColumn { column: 1, source } => {
            assert!(matches!(
                *source,
                BindError::EnumParse {
                    target: "Status",
                    ..
                }
            ));
        }
        other => panic!("expected column-annotated parse error, got {other}"),
    }
}

#[test]
fn out_of_range_ordinal_aborts_the_row() {
    let mut binder = Mapper::new().entities::<User>();
    let err = binder
        .bind_row(row(vec![("status", Value::I32(9))]))
        .unwrap_err();
    match err {
        BindError::AtColumn { source, .. } => {
            assert!(matches!(
                *source,
                BindError::OrdinalOutOfRange {
                    ordinal: 9,
                    target: "Status"
                }
            ));
        }
        other => panic!("expected column-annotated ordinal error, got {other}"),
    }
}

#[test]
fn enum_arrays_coerce_elementwise() {
    let mut binder = Mapper::new().entities::<User>();
    let out = binder
        .bind_row(row(vec![(
            "history",
            Value::Array(vec![
                Value::Str("Pending".into()),
                Value::I32(1),
                Value::Str("Disabled".into()),
            ]),
        )]))
        .unwrap();
    assert_eq!(
        out.history,
        [Status::Pending, Status::Active, Status::Disabled]
    );
}

#[test]
fn trait_surface_round_trips() {
    assert_eq!(Status::from_name("Disabled"), Some(Status::Disabled));
    assert_eq!(Status::from_name("disabled"), None);
    assert_eq!(Status::from_ordinal(1), Some(Status::Active));
    assert_eq!(Status::from_ordinal(-1), None);
    assert_eq!(Status::enum_name(), "Status");
}
