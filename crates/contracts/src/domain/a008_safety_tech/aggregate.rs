use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyTechDto {
    pub id: EntityId,
    #[serde(rename = "tenCongNghe")]
    pub name: String,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyTechRequest {
    #[serde(rename = "tenCongNghe")]
    pub name: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

/// Safety technology, e.g. MIPS
pub struct SafetyTech;

impl Resource for SafetyTech {
    type Dto = SafetyTechDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = SafetyTechRequest;

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "safety_tech"
    }

    fn element_name() -> &'static str {
        "Công nghệ an toàn"
    }

    fn list_name() -> &'static str {
        "Quản lý công nghệ an toàn"
    }

    fn endpoint() -> &'static str {
        "/api/cong-nghe-an-toan"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: SafetyTechDto) -> LookupRow {
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

    fn to_request(form: &LookupForm) -> SafetyTechRequest {
        SafetyTechRequest {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            active: form.active,
        }
    }
}

impl LookupResource for SafetyTech {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Tên công nghệ",
            name_sort: "tenCongNghe",
            code_label: None,
            extra_label: None,
            has_description: true,
            search_placeholder: "Tìm theo tên công nghệ...",
        }
    }
}
