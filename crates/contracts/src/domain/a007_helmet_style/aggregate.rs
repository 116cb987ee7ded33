use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelmetStyleDto {
    pub id: EntityId,
    #[serde(rename = "tenKieuDang")]
    pub name: String,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelmetStyleRequest {
    #[serde(rename = "tenKieuDang")]
    pub name: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

/// Helmet style (shape family)
pub struct HelmetStyle;

impl Resource for HelmetStyle {
    type Dto = HelmetStyleDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = HelmetStyleRequest;

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "helmet_style"
    }

    fn element_name() -> &'static str {
        "Kiểu dáng mũ"
    }

    fn list_name() -> &'static str {
        "Quản lý kiểu dáng mũ"
    }

    fn endpoint() -> &'static str {
        "/kieu-dang-mu"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: HelmetStyleDto) -> LookupRow {
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

    fn to_request(form: &LookupForm) -> HelmetStyleRequest {
        HelmetStyleRequest {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            active: form.active,
        }
    }
}

impl LookupResource for HelmetStyle {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Tên kiểu dáng",
            name_sort: "tenKieuDang",
            code_label: None,
            extra_label: None,
            has_description: true,
            search_placeholder: "Tìm theo tên kiểu dáng...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_mapping() {
        let dto: HelmetStyleDto =
            serde_json::from_str(r#"{"id":2,"tenKieuDang":"Thể thao","moTa":null,"trangThai":false}"#)
                .unwrap();
        let row = HelmetStyle::to_row(dto);
        assert_eq!(row.name, "Thể thao");
        assert_eq!(row.description, "");
        assert!(!row.active);
        assert_eq!(HelmetStyle::full_name(), "a007_helmet_style");
    }
}
