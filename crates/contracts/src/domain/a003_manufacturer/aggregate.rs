use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::validation::{ValidationErrors, ValidationRules};

const COUNTRY: ValidationRules = ValidationRules {
    max_length: Some(100),
    ..ValidationRules::none()
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturerDto {
    pub id: EntityId,
    #[serde(rename = "ten")]
    pub name: String,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "quocGia", default)]
    pub country: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerRequest {
    #[serde(rename = "ten")]
    pub name: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "quocGia")]
    pub country: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

/// Helmet brand (Honda, Royal, Andes, ...)
pub struct Manufacturer;

impl Resource for Manufacturer {
    type Dto = ManufacturerDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = ManufacturerRequest;

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "manufacturer"
    }

    fn element_name() -> &'static str {
        "Nhà sản xuất"
    }

    fn list_name() -> &'static str {
        "Quản lý nhà sản xuất"
    }

    fn endpoint() -> &'static str {
        "/nha-san-xuat"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: ManufacturerDto) -> LookupRow {
        LookupRow {
            id: dto.id,
            name: dto.name.trim().to_string(),
            code: String::new(),
            description: text(dto.description),
            extra: text(dto.country),
            active: dto.active.unwrap_or(true),
        }
    }

    fn form_from_row(row: &LookupRow) -> LookupForm {
        LookupForm::from_row(row)
    }

    fn validate(form: &LookupForm) -> ValidationErrors {
        let mut errors = form.validate_common(&Self::fields());
        errors.check("extra", COUNTRY.validate_string(&form.extra, "Quốc gia"));
        errors
    }

    fn to_request(form: &LookupForm) -> ManufacturerRequest {
        ManufacturerRequest {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            country: optional_text(&form.extra),
            active: form.active,
        }
    }
}

impl LookupResource for Manufacturer {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Tên nhà sản xuất",
            name_sort: "ten",
            code_label: None,
            extra_label: Some("Quốc gia"),
            has_description: true,
            search_placeholder: "Tìm theo tên nhà sản xuất...",
        }
    }
}
