use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelmetTypeDto {
    pub id: EntityId,
    #[serde(rename = "tenLoai")]
    pub name: String,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelmetTypeRequest {
    #[serde(rename = "tenLoai")]
    pub name: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

/// Helmet type: full-face, 3/4, half
pub struct HelmetType;

impl Resource for HelmetType {
    type Dto = HelmetTypeDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = HelmetTypeRequest;

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "helmet_type"
    }

    fn element_name() -> &'static str {
        "Loại mũ bảo hiểm"
    }

    fn list_name() -> &'static str {
        "Quản lý loại mũ"
    }

    fn endpoint() -> &'static str {
        "/loai-mu"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: HelmetTypeDto) -> LookupRow {
        LookupRow {
            id: dto.id,
            name: dto.name.trim().to_string(),
            code: String::new(),
            description: text(dto.description),
            extra: String::new(),
            active: dto.active.unwrap_or(true),
        }
    }

    fn form_from_row(row: &LookupRow) -> LookupForm {
        LookupForm::from_row(row)
    }

    fn validate(form: &LookupForm) -> ValidationErrors {
        form.validate_common(&Self::fields())
    }

    fn to_request(form: &LookupForm) -> HelmetTypeRequest {
        HelmetTypeRequest {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            active: form.active,
        }
    }
}

impl LookupResource for HelmetType {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Tên loại mũ",
            name_sort: "tenLoai",
            code_label: None,
            extra_label: None,
            has_description: true,
            search_placeholder: "Tìm theo tên loại mũ...",
        }
    }
}
