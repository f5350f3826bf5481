#[cfg(test)]
mod tests {
    use rowmap::{
        AsValue, Hook, Kind, Mapper, MappingError, Record, Result, Row, RowsCursor, Value,
    };
    use rowmap_tests::{Address, AuditEntry, Customer, ScriptedCursor, init_logs};
    use std::cell::RefCell;

    #[derive(Record, Default, Debug)]
    struct Faker {
        #[tag(db = "id")]
        id: i64,
    }

    fn kind_of(error: &rowmap::Error) -> Option<&MappingError> {
        error.downcast_ref::<MappingError>()
    }

    fn customers(ids: impl IntoIterator<Item = i64>) -> ScriptedCursor {
        ids.into_iter()
            .fold(ScriptedCursor::new(["id", "name"]), |cursor, id| {
                cursor.row([Value::Int64(id), Value::Varchar(format!("customer {id}"))])
            })
    }

    #[test]
    fn single_row() {
        init_logs();
        let mapper = Mapper::default();
        let cursor = ScriptedCursor::new(["id"]).row([Value::Int32(1)]);
        let result = mapper.map::<Faker, _>(cursor, &[]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn every_kind() {
        let mapper = Mapper::default();
        let address = Address {
            street: "Via Roma 1".into(),
            city: "Torino".into(),
        };
        let cursor = ScriptedCursor::new([
            "id", "name", "score", "active", "visits", "nickname", "address",
        ])
        .row([
            Value::UInt32(7),
            Value::Varchar("Ada".into()),
            Value::Blob(b"12.5".to_vec().into()),
            Value::Boolean(true),
            Value::Int16(3),
            Value::Varchar("ada".into()),
            address.clone().as_value(),
        ])
        .row([
            Value::Int8(8),
            Value::Int64(42),
            Value::Float32(0.25),
            Value::Boolean(false),
            Value::Int64(-4),
            Value::Null,
            Value::Null,
        ]);
        let result = mapper.map::<Customer, _>(cursor, &[]).unwrap();
        assert_eq!(
            result,
            [
                Customer {
                    id: 7,
                    name: "Ada".into(),
                    score: 12.5,
                    active: true,
                    visits: 3,
                    nickname: Some("ada".into()),
                    address,
                    scratch: vec![],
                },
                Customer {
                    id: 8,
                    name: "42".into(),
                    score: 0.25,
                    active: false,
                    visits: -4,
                    nickname: None,
                    address: Address::default(),
                    scratch: vec![],
                },
            ]
        );
    }

    #[test]
    fn null_keeps_zero_value() {
        let mapper = Mapper::default();
        let cursor = ScriptedCursor::new(["id", "name", "score", "active", "nickname"]).row([
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
        ]);
        let result = mapper.map::<Customer, _>(cursor, &[]).unwrap();
        assert_eq!(result, [Customer::default()]);
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let mapper = Mapper::default();
        let mut cursor = ScriptedCursor::new(["rank", "id", "scratch"])
            .row([
                Value::Varchar("first".into()),
                Value::Int64(1),
                Value::Blob(b"xyz".to_vec().into()),
            ])
            .row([Value::Boolean(true), Value::Int64(2), Value::Null]);
        let result = mapper.map::<Customer, _>(&mut cursor, &[]).unwrap();
        assert_eq!(result.iter().map(|c| c.id).collect::<Vec<_>>(), [1, 2]);
        assert!(result.iter().all(|c| c.scratch.is_empty()));
        assert_eq!(cursor.populate_calls, 2);
        assert_eq!(cursor.advance_calls, 3);
    }

    #[test]
    fn empty_cursor() {
        let mapper = Mapper::default();
        let result = mapper
            .map::<Customer, _>(ScriptedCursor::new(["id"]), &[])
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn rows_cursor() {
        let mapper = Mapper::default();
        let rows: Vec<Row> = vec![
            [Value::Int32(3), Value::Varchar("Grace".into())].into(),
            [Value::Int32(4), Value::Varchar("Linus".into())].into(),
        ];
        let cursor = RowsCursor::new(["id".to_string(), "name".to_string()], rows);
        let result = mapper.map::<Customer, _>(cursor, &[]).unwrap();
        assert_eq!(
            result.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            ["Grace", "Linus"]
        );
    }

    #[test]
    fn malformed_float_is_an_error() {
        let mapper = Mapper::default();
        let cursor = ScriptedCursor::new(["id", "score"])
            .row([Value::Int64(1), Value::Varchar("1.5".into())])
            .row([Value::Int64(2), Value::Varchar("12,5".into())]);
        let error = mapper.map::<Customer, _>(cursor, &[]).unwrap_err();
        assert!(matches!(
            kind_of(&error),
            Some(MappingError::CoercionFailed {
                field: "score",
                kind: Kind::Float,
                ..
            })
        ));
    }

    #[test]
    fn coercion_faults() {
        let mapper = Mapper::default();
        let cases = [
            ("active", Value::Int8(1), "active", Kind::Boolean),
            ("active", Value::Varchar("true".into()), "active", Kind::Boolean),
            ("visits", Value::Int64(1 << 40), "visits", Kind::Integer),
            ("id", Value::UInt64(u64::MAX), "id", Kind::Integer),
            ("id", Value::Float64(1.0), "id", Kind::Integer),
            ("score", Value::Boolean(true), "score", Kind::Float),
            ("address", Value::Varchar("Torino".into()), "address", Kind::Nested),
            (
                "address",
                Customer::default().as_value(),
                "address",
                Kind::Nested,
            ),
        ];
        for (column, value, field, kind) in cases {
            let cursor = ScriptedCursor::new([column]).row([value]);
            let error = mapper.map::<Customer, _>(cursor, &[]).unwrap_err();
            match kind_of(&error) {
                Some(MappingError::CoercionFailed {
                    field: f, kind: k, ..
                }) => {
                    assert_eq!(*f, field);
                    assert_eq!(*k, kind);
                }
                other => panic!("Unexpected error {other:?} for column `{column}`"),
            }
        }
    }

    #[test]
    fn readonly_field() {
        let mapper = Mapper::default();
        for value in [Value::Varchar("root".into()), Value::Null] {
            let cursor = ScriptedCursor::new(["id", "created_by"]).row([Value::Int64(1), value]);
            let error = mapper.map::<AuditEntry, _>(cursor, &[]).unwrap_err();
            assert_eq!(
                kind_of(&error),
                Some(&MappingError::FieldNotSettable {
                    field: "created_by"
                })
            );
        }
        let mut entry = AuditEntry::default();
        assert!(
            entry
                .set_field_value("created_by", Value::Varchar("root".into()))
                .is_err()
        );
    }

    #[test]
    fn hooks_run_in_order() {
        let mapper = Mapper::default();
        let calls = RefCell::new(Vec::new());
        let first = |c: &mut Customer| -> Result<()> {
            calls.borrow_mut().push(("first", c.id, c.name.clone()));
            c.name = c.name.to_uppercase();
            Ok(())
        };
        let second = |c: &mut Customer| -> Result<()> {
            calls.borrow_mut().push(("second", c.id, c.name.clone()));
            Ok(())
        };
        let hooks: [&dyn Hook<Customer>; 2] = [&first, &second];
        let result = mapper.map::<Customer, _>(customers([1, 2]), &hooks).unwrap();
        assert_eq!(result[0].name, "CUSTOMER 1");
        assert_eq!(result[1].name, "CUSTOMER 2");
        assert_eq!(
            *calls.borrow(),
            [
                ("first", 1, "customer 1".to_string()),
                ("second", 1, "CUSTOMER 1".to_string()),
                ("first", 2, "customer 2".to_string()),
                ("second", 2, "CUSTOMER 2".to_string()),
            ]
        );
    }

    #[test]
    fn hook_failure_discards_everything() {
        let mapper = Mapper::default();
        let mut cursor = customers([1, 2, 3]);
        let accept = |_: &mut Customer| -> Result<()> { Ok(()) };
        let reject = |c: &mut Customer| -> Result<()> {
            if c.id == 2 {
                return Err(rowmap::Error::msg("customer 2 is blocked"));
            }
            Ok(())
        };
        let hooks: [&dyn Hook<Customer>; 2] = [&accept, &reject];
        let error = mapper.map::<Customer, _>(&mut cursor, &hooks).unwrap_err();
        assert_eq!(
            kind_of(&error),
            Some(&MappingError::HookFailed { row: 1, hook: 1 })
        );
        assert_eq!(error.root_cause().to_string(), "customer 2 is blocked");
        assert_eq!(cursor.advance_calls, 2);
    }

    #[test]
    fn cursor_failures() {
        let mapper = Mapper::default();
        let mut cursor = customers([1]).failing_columns();
        let error = mapper.map::<Customer, _>(&mut cursor, &[]).unwrap_err();
        assert_eq!(
            kind_of(&error),
            Some(&MappingError::ColumnEnumerationFailed)
        );
        assert_eq!(
            error.root_cause().to_string(),
            "connection reset while reading the columns"
        );
        assert_eq!(cursor.advance_calls, 0);

        let cursor = customers([1, 2, 3]).failing_populate_at(1);
        let error = mapper.map::<Customer, _>(cursor, &[]).unwrap_err();
        assert_eq!(
            kind_of(&error),
            Some(&MappingError::RowScanFailed { row: 1 })
        );
        assert_eq!(error.root_cause().to_string(), "malformed packet in row 1");
    }
}
