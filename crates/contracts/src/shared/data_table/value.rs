use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cell value read from a row
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<CellValue>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String coercion used by `=`, `in` and `contains`
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::List(items) => items
                .iter()
                .map(CellValue::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Numeric view of the cell; blank and null are not numbers
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_number(s),
            _ => None,
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(items) => CellValue::List(items.iter().map(CellValue::from).collect()),
            Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Single element of a multi-select filter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterScalar {
    Number(serde_json::Number),
    Text(String),
}

impl FilterScalar {
    pub fn to_text(&self) -> String {
        match self {
            FilterScalar::Number(n) => match n.as_i64() {
                Some(i) => i.to_string(),
                None => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
            },
            FilterScalar::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for FilterScalar {
    fn from(s: &str) -> Self {
        FilterScalar::Text(s.to_string())
    }
}

impl From<String> for FilterScalar {
    fn from(s: String) -> Self {
        FilterScalar::Text(s)
    }
}

impl From<i64> for FilterScalar {
    fn from(n: i64) -> Self {
        FilterScalar::Number(n.into())
    }
}

/// Filter value held per field: free text or a multi-select list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Many(Vec<FilterScalar>),
}

impl FilterValue {
    pub fn text(s: impl Into<String>) -> Self {
        FilterValue::Text(s.into())
    }

    pub fn many<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FilterScalar>,
    {
        FilterValue::Many(items.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Many(items) => items.is_empty(),
        }
    }

    /// Elements of the filter set as coerced strings
    pub fn items(&self) -> Vec<String> {
        match self {
            FilterValue::Text(s) => vec![s.clone()],
            FilterValue::Many(items) => items.iter().map(FilterScalar::to_text).collect(),
        }
    }

    /// Value as sent on the wire, lists are comma-joined
    pub fn to_query_value(&self) -> String {
        self.items().join(",")
    }

    /// Numeric view; a list qualifies only when it holds exactly one element
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Text(s) => parse_number(s),
            FilterValue::Many(items) if items.len() == 1 => parse_number(&items[0].to_text()),
            FilterValue::Many(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_coercion() {
        assert_eq!(CellValue::from(&json!(3)).to_text(), "3");
        assert_eq!(CellValue::from(&json!(2.5)).to_text(), "2.5");
        assert_eq!(CellValue::from(&json!(null)).to_text(), "");
        assert_eq!(CellValue::from(&json!(["a", 1])).to_text(), "a,1");
        assert_eq!(CellValue::from(&json!(" 12 ")).as_number(), Some(12.0));
        assert_eq!(CellValue::from(&json!("")).as_number(), None);
        assert_eq!(CellValue::from(&json!("abc")).as_number(), None);
    }

    #[test]
    fn test_filter_value_untagged_json() {
        let v: FilterValue = serde_json::from_str(r#"["draft", 2]"#).unwrap();
        assert_eq!(v.items(), vec!["draft".to_string(), "2".to_string()]);
        assert_eq!(v.to_query_value(), "draft,2");
        let t: FilterValue = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(t, FilterValue::text("abc"));
        assert_eq!(serde_json::to_string(&FilterValue::many([1i64, 2])).unwrap(), "[1,2]");
    }

    #[test]
    fn test_filter_value_emptiness_and_numbers() {
        assert!(FilterValue::text("").is_empty());
        assert!(FilterValue::Many(vec![]).is_empty());
        assert!(!FilterValue::text(" ").is_empty());
        assert_eq!(FilterValue::text("5").as_number(), Some(5.0));
        assert_eq!(FilterValue::many([7i64]).as_number(), Some(7.0));
        assert_eq!(FilterValue::many([1i64, 2]).as_number(), None);
    }
}
