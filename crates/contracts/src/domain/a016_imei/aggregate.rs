use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::text;
use crate::domain::common::{EntityId, Resource};
use crate::shared::paging::{EnvelopeKind, PageQuery};
use crate::shared::validation::{Pattern, ValidationErrors, ValidationRules};

/// Filter key carrying the product whose serials are listed
pub const PRODUCT_FILTER: &str = "sanPhamId";

const IMEI: ValidationRules = ValidationRules {
    required: true,
    pattern: Some(Pattern::Imei),
    ..ValidationRules::none()
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImeiDto {
    pub id: EntityId,
    #[serde(rename = "soImei")]
    pub imei: String,
    #[serde(rename = "sanPhamId", default)]
    pub product_id: Option<EntityId>,
    #[serde(rename = "sanPhamTen", default)]
    pub product_name: Option<String>,
    #[serde(rename = "sanPhamMa", default)]
    pub product_code: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
    #[serde(rename = "ngayTao", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImeiRequest {
    #[serde(rename = "soImei")]
    pub imei: String,
    #[serde(rename = "sanPhamId")]
    pub product_id: EntityId,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImeiRow {
    pub id: EntityId,
    pub imei: String,
    pub product_id: Option<EntityId>,
    pub product_name: String,
    pub product_code: String,
    pub active: bool,
    pub created_at: String,
}

/// Serial state: `trangThai` true means still in stock
pub fn availability_label(active: bool) -> &'static str {
    if active {
        "Còn hàng"
    } else {
        "Đã bán"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImeiForm {
    pub imei: String,
    pub product_id: Option<EntityId>,
    pub active: bool,
}

impl Default for ImeiForm {
    fn default() -> Self {
        Self {
            imei: String::new(),
            product_id: None,
            active: true,
        }
    }
}

pub fn blank_form_for(product_id: Option<EntityId>) -> ImeiForm {
    ImeiForm {
        product_id,
        ..ImeiForm::default()
    }
}

/// `POST /imei/multiple`
pub fn bulk_path() -> String {
    format!("{}/multiple", Imei::endpoint())
}

// ============================================================================
// Bulk entry
// ============================================================================

/// Result of splitting a pasted block of serials
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImeiBatch {
    pub accepted: Vec<String>,
    /// Serial and the reason it was refused
    pub rejected: Vec<(String, String)>,
}

impl ImeiBatch {
    /// One serial per line, comma or whitespace; duplicates inside the batch are refused
    pub fn parse(raw: &str) -> Self {
        let mut batch = ImeiBatch::default();
        let mut seen = BTreeSet::new();
        for token in raw
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            if let Err(message) = IMEI.validate_string(token, "IMEI") {
                batch.rejected.push((token.to_string(), message));
            } else if !seen.insert(token.to_string()) {
                batch.rejected.push((token.to_string(), "IMEI bị trùng trong danh sách".to_string()));
            } else {
                batch.accepted.push(token.to_string());
            }
        }
        batch
    }

    pub fn requests(&self, product_id: EntityId) -> Vec<ImeiRequest> {
        self.accepted
            .iter()
            .map(|imei| ImeiRequest {
                imei: imei.clone(),
                product_id,
                active: true,
            })
            .collect()
    }
}

/// Serial number tracking per product
pub struct Imei;

impl Resource for Imei {
    type Dto = ImeiDto;
    type Row = ImeiRow;
    type Form = ImeiForm;
    type Request = ImeiRequest;

    fn aggregate_index() -> &'static str {
        "a016"
    }

    fn collection_name() -> &'static str {
        "imei"
    }

    fn element_name() -> &'static str {
        "IMEI"
    }

    fn list_name() -> &'static str {
        "Quản lý IMEI"
    }

    fn endpoint() -> &'static str {
        "/imei"
    }

    fn envelope() -> EnvelopeKind {
        EnvelopeKind::Wrapped
    }

    fn list_path(query: &PageQuery) -> String {
        match query.filter(PRODUCT_FILTER) {
            Some(product_id) => format!("{}/san-pham/{}/page", Self::endpoint(), product_id),
            None => Self::endpoint().to_string(),
        }
    }

    fn row_id(row: &ImeiRow) -> EntityId {
        row.id
    }

    fn to_row(dto: ImeiDto) -> ImeiRow {
        ImeiRow {
            id: dto.id,
            imei: dto.imei.trim().to_string(),
            product_id: dto.product_id,
            product_name: text(dto.product_name),
            product_code: text(dto.product_code),
            active: dto.active.unwrap_or(true),
            created_at: text(dto.created_at),
        }
    }

    fn form_from_row(row: &ImeiRow) -> ImeiForm {
        ImeiForm {
            imei: row.imei.clone(),
            product_id: row.product_id,
            active: row.active,
        }
    }

    fn validate(form: &ImeiForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check("soImei", IMEI.validate_string(&form.imei, "IMEI"));
        if form.product_id.is_none() {
            errors.insert(PRODUCT_FILTER, "Vui lòng chọn sản phẩm");
        }
        errors
    }

    fn to_request(form: &ImeiForm) -> ImeiRequest {
        ImeiRequest {
            imei: form.imei.trim().to_string(),
            product_id: form.product_id.unwrap_or_default(),
            active: form.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path_per_product() {
        let mut query = PageQuery::new(Imei::default_sort(), 10);
        assert_eq!(Imei::list_path(&query), "/imei");
        query.filters.insert(PRODUCT_FILTER.to_string(), "12".to_string());
        assert_eq!(Imei::list_path(&query), "/imei/san-pham/12/page");
        assert_eq!(bulk_path(), "/imei/multiple");
    }

    #[test]
    fn test_imei_must_be_15_digits() {
        let mut form = blank_form_for(Some(3));
        form.imei = "35693803564380".into();
        assert_eq!(
            Imei::validate(&form).get("soImei"),
            Some("IMEI phải gồm đúng 15 chữ số")
        );
        form.imei = "356938035643809".into();
        assert!(Imei::validate(&form).is_empty());
        form.product_id = None;
        assert!(Imei::validate(&form).contains(PRODUCT_FILTER));
    }

    #[test]
    fn test_batch_parse() {
        let batch = ImeiBatch::parse("356938035643809\n356938035643810, abc\n356938035643809");
        assert_eq!(batch.accepted, vec!["356938035643809", "356938035643810"]);
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[1].1, "IMEI bị trùng trong danh sách");
        let requests = batch.requests(5);
        assert!(requests.iter().all(|r| r.product_id == 5 && r.active));
    }

    #[test]
    fn test_row_from_wrapped_payload() {
        let dto: ImeiDto = serde_json::from_str(
            r#"{"id":1,"soImei":"356938035643809","sanPhamId":5,"sanPhamTen":"Mũ Fullface","sanPhamMa":"SP0005","trangThai":false}"#,
        )
        .unwrap();
        let row = Imei::to_row(dto);
        assert_eq!(availability_label(row.active), "Đã bán");
        assert_eq!(row.product_code, "SP0005");
    }
}
