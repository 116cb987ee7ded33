use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeDto {
    pub id: EntityId,
    #[serde(rename = "tenKichThuoc")]
    pub name: String,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeRequest {
    #[serde(rename = "tenKichThuoc")]
    pub name: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

/// Helmet size (S, M, L, XL, ...)
pub struct Size;

impl Resource for Size {
    type Dto = SizeDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = SizeRequest;

    fn aggregate_index() -> &'static str {
        "a019"
    }

    fn collection_name() -> &'static str {
        "size"
    }

    fn element_name() -> &'static str {
        "Kích thước"
    }

    fn list_name() -> &'static str {
        "Quản lý kích thước"
    }

    fn endpoint() -> &'static str {
        "/kich-thuoc"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: SizeDto) -> LookupRow {
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

    fn to_request(form: &LookupForm) -> SizeRequest {
        SizeRequest {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            active: form.active,
        }
    }
}

impl LookupResource for Size {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Tên kích thước",
            name_sort: "tenKichThuoc",
            code_label: None,
            extra_label: None,
            has_description: true,
            search_placeholder: "Tìm theo tên kích thước...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_row_and_request() {
        let dto: SizeDto =
            serde_json::from_str(r#"{"id":4,"tenKichThuoc":" XL ","trangThai":false}"#).unwrap();
        let row = Size::to_row(dto);
        assert_eq!(row.name, "XL");
        assert!(!row.active);

        let mut form = Size::form_from_row(&row);
        form.description = "  ".into();
        assert!(Size::validate(&form).is_empty());
        let json = serde_json::to_value(Size::to_request(&form)).unwrap();
        assert_eq!(json["tenKichThuoc"], "XL");
        assert!(json["moTa"].is_null());
        assert_eq!(json["trangThai"], false);
    }

    #[test]
    fn test_size_name_required() {
        let form = Size::blank_form();
        assert!(Size::validate(&form).contains("name"));
    }
}
