use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::{DataTableError, Result};
use super::operator::FilterOperator;

/// Column type, governs the default operator and the filter widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinSide {
    Left,
}

/// Enumerated choice for `select` columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl From<(&str, &str)> for SelectOption {
    fn from((value, label): (&str, &str)) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Column descriptor supplied by the page that owns the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Unique key into each row object
    pub field: String,
    pub header_name: String,
    #[serde(default = "default_true")]
    pub filterable: bool,
    #[serde(default, rename = "type")]
    pub column_type: ColumnType,
    /// Required when `column_type` is `Select`
    #[serde(default)]
    pub value_options: Vec<SelectOption>,
    /// Overrides the type-implied default operator
    #[serde(default)]
    pub default_operator: Option<FilterOperator>,
    #[serde(default)]
    pub pinned: Option<PinSide>,
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// Initial visibility
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub width: Option<u32>,
}

impl ColumnDef {
    pub fn new(field: &str, header_name: &str, column_type: ColumnType) -> Self {
        Self {
            field: field.to_string(),
            header_name: header_name.to_string(),
            filterable: true,
            column_type,
            value_options: Vec::new(),
            default_operator: None,
            pinned: None,
            sortable: true,
            hidden: false,
            width: None,
        }
    }

    pub fn text(field: &str, header_name: &str) -> Self {
        Self::new(field, header_name, ColumnType::Text)
    }

    pub fn number(field: &str, header_name: &str) -> Self {
        Self::new(field, header_name, ColumnType::Number)
    }

    pub fn select(field: &str, header_name: &str, options: Vec<SelectOption>) -> Self {
        let mut col = Self::new(field, header_name, ColumnType::Select);
        col.value_options = options;
        col
    }

    pub fn with_default_operator(mut self, op: FilterOperator) -> Self {
        self.default_operator = Some(op);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn pinned_left(mut self) -> Self {
        self.pinned = Some(PinSide::Left);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn implied_operator(&self) -> FilterOperator {
        FilterOperator::implied_by(self.column_type)
    }

    pub fn validate(&self) -> Result<()> {
        if self.column_type == ColumnType::Select && self.value_options.is_empty() {
            return Err(DataTableError::MissingValueOptions(self.field.clone()));
        }
        if let Some(op) = self.default_operator {
            if !FilterOperator::for_column_type(self.column_type).contains(&op) {
                return Err(DataTableError::InvalidConfig(format!(
                    "operator '{}' is not offered for column '{}'",
                    op, self.field
                )));
            }
        }
        Ok(())
    }

    /// Label of a select option, falls back to the raw value
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.value_options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }
}

/// Validates a whole column list: unique fields, select options present
pub fn validate_columns(columns: &[ColumnDef]) -> Result<()> {
    let mut seen = HashSet::new();
    for col in columns {
        if !seen.insert(col.field.as_str()) {
            return Err(DataTableError::DuplicateColumn(col.field.clone()));
        }
        col.validate()?;
    }
    Ok(())
}

pub fn find_column<'a>(columns: &'a [ColumnDef], field: &str) -> Option<&'a ColumnDef> {
    columns.iter().find(|c| c.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_without_options_is_rejected() {
        let col = ColumnDef::select("role", "Role", vec![]);
        assert!(matches!(
            col.validate(),
            Err(DataTableError::MissingValueOptions(f)) if f == "role"
        ));
    }

    #[test]
    fn test_default_operator_must_match_column_type() {
        let date = ColumnDef::text("registered_at", "Registered")
            .with_default_operator(FilterOperator::Gte);
        assert!(matches!(date.validate(), Err(DataTableError::InvalidConfig(_))));
        let lessons = ColumnDef::number("lessons", "Lessons")
            .with_default_operator(FilterOperator::Gte);
        assert!(lessons.validate().is_ok());
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let cols = vec![ColumnDef::text("title", "Title"), ColumnDef::number("title", "Again")];
        assert!(matches!(
            validate_columns(&cols),
            Err(DataTableError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let col: ColumnDef = serde_json::from_str(
            r#"{"field":"lessons","header_name":"Lessons","type":"number"}"#,
        )
        .unwrap();
        assert!(col.filterable);
        assert!(col.sortable);
        assert!(!col.hidden);
        assert_eq!(col.column_type, ColumnType::Number);
        assert_eq!(col.default_operator, None);
    }

    #[test]
    fn test_option_label_fallback() {
        let col = ColumnDef::select(
            "status",
            "Status",
            vec![("published", "Опубликован").into()],
        );
        assert_eq!(col.option_label("published"), "Опубликован");
        assert_eq!(col.option_label("draft"), "draft");
    }
}
