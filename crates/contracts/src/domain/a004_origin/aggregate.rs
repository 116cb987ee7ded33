use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginDto {
    pub id: EntityId,
    #[serde(rename = "tenXuatXu")]
    pub name: String,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginRequest {
    #[serde(rename = "tenXuatXu")]
    pub name: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

/// Country of origin
pub struct Origin;

impl Resource for Origin {
    type Dto = OriginDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = OriginRequest;

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "origin"
    }

    fn element_name() -> &'static str {
        "Xuất xứ"
    }

    fn list_name() -> &'static str {
        "Quản lý xuất xứ"
    }

    fn endpoint() -> &'static str {
        "/xuat-xu"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: OriginDto) -> LookupRow {
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

    fn to_request(form: &LookupForm) -> OriginRequest {
        OriginRequest {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            active: form.active,
        }
    }
}

impl LookupResource for Origin {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Tên xuất xứ",
            name_sort: "tenXuatXu",
            code_label: None,
            extra_label: None,
            has_description: true,
            search_placeholder: "Tìm theo tên xuất xứ...",
        }
    }
}
