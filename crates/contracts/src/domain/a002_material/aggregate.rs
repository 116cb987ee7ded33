use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDto {
    pub id: EntityId,
    #[serde(rename = "tenChatLieu")]
    pub name: String,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRequest {
    #[serde(rename = "tenChatLieu")]
    pub name: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

/// Shell material, e.g. ABS or carbon fiber
pub struct Material;

impl Resource for Material {
    type Dto = MaterialDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = MaterialRequest;

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "material"
    }

    fn element_name() -> &'static str {
        "Chất liệu vỏ"
    }

    fn list_name() -> &'static str {
        "Quản lý chất liệu vỏ"
    }

    fn endpoint() -> &'static str {
        "/chat-lieu-vo"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: MaterialDto) -> LookupRow {
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

    fn to_request(form: &LookupForm) -> MaterialRequest {
        MaterialRequest {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            active: form.active,
        }
    }
}

impl LookupResource for Material {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Tên chất liệu",
            name_sort: "tenChatLieu",
            code_label: None,
            extra_label: None,
            has_description: true,
            search_placeholder: "Tìm theo tên chất liệu...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_description_is_sent_as_null() {
        let form = LookupForm {
            name: "  Sợi carbon ".to_string(),
            description: "   ".to_string(),
            ..LookupForm::default()
        };
        assert!(Material::validate(&form).is_empty());
        let json = serde_json::to_value(Material::to_request(&form)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"tenChatLieu": "Sợi carbon", "moTa": null, "trangThai": true})
        );
    }

    #[test]
    fn test_long_description_rejected() {
        let form = LookupForm {
            name: "ABS".to_string(),
            description: "x".repeat(501),
            ..LookupForm::default()
        };
        assert_eq!(
            Material::validate(&form).get("description"),
            Some("Mô tả không được vượt quá 500 ký tự")
        );
    }
}
