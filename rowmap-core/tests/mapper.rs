mod common;

#[cfg(test)]
mod tests {
    use crate::common::Point;
    use rowmap_core::{
        Error, Hook, Mapper, MappingError, Row, RowLabeled, RowNames, RowsCursor, Value,
        stream,
    };
    use std::sync::Arc;

    fn labels() -> RowNames {
        ["pos_y".to_string(), "pos_x".to_string()].into()
    }

    #[test]
    fn manual_record() {
        let mapper = Mapper::default();
        let rows: Vec<Row> = vec![
            [Value::Int32(2), Value::Int64(1)].into(),
            [Value::Null, Value::UInt8(7)].into(),
        ];
        let points = mapper
            .map::<Point, _>(RowsCursor::new(labels(), rows), &[])
            .unwrap();
        assert_eq!(points, [Point { x: 1, y: 2 }, Point { x: 7, y: 0 }]);
        assert_eq!(mapper.cache().len(), 1);
    }

    #[test]
    fn out_of_range_integer() {
        let mapper = Mapper::default();
        let rows: Vec<Row> = vec![[Value::Int64(1 << 40), Value::Int64(0)].into()];
        let error = mapper
            .map::<Point, _>(RowsCursor::new(labels(), rows), &[])
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<MappingError>(),
            Some(MappingError::CoercionFailed { field: "y", .. })
        ));
    }

    #[test]
    fn label_change_resets_the_cache() {
        let mut mapper = Mapper::default();
        assert_eq!(mapper.tag(), "db");
        mapper.discover::<Point>().unwrap();
        assert!(!mapper.cache().is_empty());
        mapper.set_tag("db");
        assert_eq!(mapper.cache().len(), 1);
        mapper.set_tag("json");
        assert!(mapper.cache().is_empty());
        assert!(mapper.columns_for::<Point>().unwrap().is_empty());
        mapper.set_tag("db");
        let mut columns = mapper.columns_for::<Point>().unwrap();
        columns.sort();
        assert_eq!(columns, ["pos_x", "pos_y"]);
    }

    #[tokio::test]
    async fn map_labeled_stream() {
        let mapper = Mapper::default();
        let rows = [
            RowLabeled::new(labels(), [Value::Int64(4), Value::Int64(3)].into()),
            RowLabeled::new(
                Arc::from(["pos_x".to_string()]),
                [Value::Int16(5)].into(),
            ),
        ];
        let shift = |p: &mut Point| -> rowmap_core::Result<()> {
            p.x += 10;
            Ok(())
        };
        let hooks: [&dyn Hook<Point>; 1] = [&shift];
        let points = mapper
            .map_stream(stream::iter(rows.map(Ok::<_, Error>)), &hooks)
            .await
            .unwrap();
        assert_eq!(points, [Point { x: 13, y: 4 }, Point { x: 15, y: 0 }]);
    }
}
