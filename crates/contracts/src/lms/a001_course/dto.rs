use serde::{Deserialize, Serialize};

/// Страница списка курсов, как её отдаёт `/api/courses`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseListResponse {
    /// Строки таблицы; поля читаются по имени колонки
    pub items: Vec<serde_json::Value>,
    pub total_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_response() {
        let raw = r#"{"items":[{"id":1,"title":"Rust"}],"total_count":31}"#;
        let resp: CourseListResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.items.len(), 1);
        assert_eq!(resp.total_count, 31);
    }
}
