//! Product attribute lookups (color, material, manufacturer, ...).
//!
//! Each lookup has its own wire DTO, but they all render through the same
//! row and form shape so one screen serves all eight of them.

use crate::shared::resource::{EntityId, Resource};
use crate::shared::validation::{rules, ValidationErrors};

/// Table row of any lookup
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRow {
    pub id: EntityId,
    pub name: String,
    /// Secondary code (hex value for colors)
    pub code: String,
    pub description: String,
    /// Country for manufacturers, unit for weights
    pub extra: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupForm {
    pub name: String,
    pub code: String,
    pub description: String,
    pub extra: String,
    pub active: bool,
}

impl Default for LookupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            description: String::new(),
            extra: String::new(),
            active: true,
        }
    }
}

impl LookupForm {
    pub fn from_row(row: &LookupRow) -> Self {
        Self {
            name: row.name.clone(),
            code: row.code.clone(),
            description: row.description.clone(),
            extra: row.extra.clone(),
            active: row.active,
        }
    }

    /// Name and description checks every lookup shares
    pub fn validate_common(&self, fields: &LookupFields) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check(
            "name",
            rules::NAME.validate_string(&self.name, fields.name_label),
        );
        if fields.has_description {
            errors.check(
                "description",
                rules::DESCRIPTION.validate_string(&self.description, "Mô tả"),
            );
        }
        errors
    }
}

/// Which optional columns/inputs a lookup screen shows, with their labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupFields {
    pub name_label: &'static str,
    /// Wire field the name column sorts by
    pub name_sort: &'static str,
    pub code_label: Option<&'static str>,
    pub extra_label: Option<&'static str>,
    pub has_description: bool,
    pub search_placeholder: &'static str,
}

/// A [`Resource`] rendered by the shared lookup screen
pub trait LookupResource: Resource<Row = LookupRow, Form = LookupForm> {
    fn fields() -> LookupFields;

    /// Label used in dropdowns of other forms
    fn option_label(row: &LookupRow) -> String {
        row.name.clone()
    }
}

pub(crate) fn text(value: Option<String>) -> String {
    value.unwrap_or_default().trim().to_string()
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" Nhật Bản "), Some("Nhật Bản".to_string()));
    }
}
