use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::labels::format_number;
use crate::shared::validation::{parse_number, ValidationErrors, ValidationRules};

const WEIGHT: ValidationRules = ValidationRules {
    required: true,
    min: Some(1.0),
    max: Some(10_000.0),
    ..ValidationRules::none()
};

pub const UNITS: [&str; 2] = ["g", "kg"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightDto {
    pub id: EntityId,
    #[serde(rename = "giaTriTrongLuong")]
    pub value: f64,
    #[serde(rename = "donVi", default)]
    pub unit: Option<String>,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightRequest {
    #[serde(rename = "giaTriTrongLuong")]
    pub value: f64,
    #[serde(rename = "donVi")]
    pub unit: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

/// Helmet weight class. The form keeps the numeric value in `name`
/// and the unit in `extra`.
pub struct Weight;

impl Resource for Weight {
    type Dto = WeightDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = WeightRequest;

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "weight"
    }

    fn element_name() -> &'static str {
        "Trọng lượng"
    }

    fn list_name() -> &'static str {
        "Quản lý trọng lượng"
    }

    fn endpoint() -> &'static str {
        "/trong-luong"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: WeightDto) -> LookupRow {
        LookupRow {
            id: dto.id,
            name: format_number(dto.value),
            code: String::new(),
            description: text(dto.description),
            extra: text(dto.unit),
            active: dto.active.unwrap_or(true),
        }
    }

    fn form_from_row(row: &LookupRow) -> LookupForm {
        LookupForm::from_row(row)
    }

    fn blank_form() -> LookupForm {
        LookupForm {
            extra: "g".to_string(),
            ..LookupForm::default()
        }
    }

    fn validate(form: &LookupForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check("name", WEIGHT.validate_number_text(&form.name, "Giá trị trọng lượng"));
        if !UNITS.contains(&form.extra.trim()) {
            errors.insert("extra", "Đơn vị phải là g hoặc kg");
        }
        errors
    }

    fn to_request(form: &LookupForm) -> WeightRequest {
        WeightRequest {
            value: parse_number(&form.name).unwrap_or_default(),
            unit: form.extra.trim().to_string(),
            description: optional_text(&form.description),
            active: form.active,
        }
    }
}

impl LookupResource for Weight {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Giá trị trọng lượng",
            name_sort: "giaTriTrongLuong",
            code_label: None,
            extra_label: Some("Đơn vị"),
            has_description: true,
            search_placeholder: "Tìm theo giá trị trọng lượng...",
        }
    }

    fn option_label(row: &LookupRow) -> String {
        format!("{} {}", row.name, row.extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_form_round_trip() {
        let dto: WeightDto =
            serde_json::from_str(r#"{"id":3,"giaTriTrongLuong":1250,"donVi":"g","trangThai":true}"#)
                .unwrap();
        let row = Weight::to_row(dto);
        assert_eq!(row.name, "1.250");
        assert_eq!(Weight::option_label(&row), "1.250 g");

        let form = Weight::form_from_row(&row);
        assert!(Weight::validate(&form).is_empty());
        assert_eq!(Weight::to_request(&form).value, 1250.0);
    }

    #[test]
    fn test_weight_validation() {
        let mut form = Weight::blank_form();
        form.name = "0".to_string();
        form.extra = "lb".to_string();
        let errors = Weight::validate(&form);
        assert_eq!(
            errors.get("name"),
            Some("Giá trị trọng lượng phải lớn hơn hoặc bằng 1")
        );
        assert_eq!(errors.get("extra"), Some("Đơn vị phải là g hoặc kg"));
    }
}
