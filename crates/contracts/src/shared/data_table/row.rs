use serde_json::Value;

use super::value::CellValue;

pub type RowId = String;

/// Trait для строк, которые может отображать таблица
pub trait TableRow {
    /// Уникальный идентификатор строки
    fn row_id(&self) -> RowId;

    /// Значение ячейки по имени поля; отсутствующее поле возвращает `Null`
    fn cell(&self, field: &str) -> CellValue;
}

impl TableRow for Value {
    fn row_id(&self) -> RowId {
        match self.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    fn cell(&self, field: &str) -> CellValue {
        self.get(field).map(CellValue::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_row_access() {
        let row = json!({"id": 7, "title": "Rust 101", "tags": ["a", "b"]});
        assert_eq!(row.row_id(), "7");
        assert_eq!(row.cell("title"), CellValue::Text("Rust 101".into()));
        assert_eq!(row.cell("missing"), CellValue::Null);
        assert_eq!(json!({"id": "c-1"}).row_id(), "c-1");
    }
}
