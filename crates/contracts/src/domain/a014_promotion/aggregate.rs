use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::campaign::CampaignPhase;
use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, Resource};
use crate::shared::labels::{format_number, format_vnd};
use crate::shared::paging::EnvelopeKind;
use crate::shared::validation::{parse_number, rules, validate_date_range, ValidationErrors, ValidationRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PromotionKind {
    #[default]
    #[serde(rename = "PHAN_TRAM")]
    Percent,
    #[serde(rename = "SO_TIEN")]
    Amount,
}

impl PromotionKind {
    pub const ALL: [PromotionKind; 2] = [PromotionKind::Percent, PromotionKind::Amount];

    pub fn code(&self) -> &'static str {
        match self {
            PromotionKind::Percent => "PHAN_TRAM",
            PromotionKind::Amount => "SO_TIEN",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PromotionKind::Percent => "Phần trăm",
            PromotionKind::Amount => "Số tiền",
        }
    }
}

const AMOUNT: ValidationRules = ValidationRules {
    required: true,
    min: Some(1.0),
    max: Some(999_999_999.0),
    ..ValidationRules::none()
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionDto {
    pub id: EntityId,
    #[serde(rename = "maDotGiamGia", default)]
    pub code: Option<String>,
    #[serde(rename = "tenDotGiamGia")]
    pub name: String,
    #[serde(rename = "loaiDotGiamGia", default)]
    pub kind: Option<String>,
    /// Percent, sent as a string by the server
    #[serde(rename = "giaTriDotGiam", default)]
    pub percent: Option<String>,
    #[serde(rename = "soTien", default)]
    pub amount: Option<f64>,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "ngayBatDau", default)]
    pub start: Option<String>,
    #[serde(rename = "ngayKetThuc", default)]
    pub end: Option<String>,
    #[serde(rename = "soLuongSuDung", default)]
    pub usage_limit: Option<i64>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionRequest {
    #[serde(rename = "maDotGiamGia")]
    pub code: String,
    #[serde(rename = "tenDotGiamGia")]
    pub name: String,
    #[serde(rename = "loaiDotGiamGia")]
    pub kind: PromotionKind,
    #[serde(rename = "giaTriDotGiam")]
    pub percent: Option<String>,
    #[serde(rename = "soTien")]
    pub amount: Option<f64>,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "ngayBatDau")]
    pub start: String,
    #[serde(rename = "ngayKetThuc")]
    pub end: String,
    #[serde(rename = "soLuongSuDung")]
    pub usage_limit: i64,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRow {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub kind: PromotionKind,
    pub percent: Option<f64>,
    pub amount: Option<f64>,
    pub description: String,
    pub start: String,
    pub end: String,
    pub usage_limit: i64,
    pub active: bool,
}

impl PromotionRow {
    /// "15%" or "200.000 ₫"
    pub fn value_label(&self) -> String {
        match self.kind {
            PromotionKind::Percent => format!("{}%", format_number(self.percent.unwrap_or(0.0))),
            PromotionKind::Amount => format_vnd(self.amount.unwrap_or(0.0)),
        }
    }

    pub fn phase(&self, today: NaiveDate) -> CampaignPhase {
        CampaignPhase::of(&self.start, &self.end, self.active, today)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionForm {
    pub code: String,
    pub name: String,
    pub kind: PromotionKind,
    pub percent: String,
    pub amount: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub usage_limit: String,
    pub active: bool,
}

impl Default for PromotionForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            kind: PromotionKind::Percent,
            percent: String::new(),
            amount: String::new(),
            description: String::new(),
            start: String::new(),
            end: String::new(),
            usage_limit: "1000".to_string(),
            active: true,
        }
    }
}

pub struct Promotion;

impl Resource for Promotion {
    type Dto = PromotionDto;
    type Row = PromotionRow;
    type Form = PromotionForm;
    type Request = PromotionRequest;

    fn aggregate_index() -> &'static str {
        "a014"
    }

    fn collection_name() -> &'static str {
        "promotion"
    }

    fn element_name() -> &'static str {
        "Đợt giảm giá"
    }

    fn list_name() -> &'static str {
        "Quản lý đợt giảm giá"
    }

    fn endpoint() -> &'static str {
        "/api/dot-giam-gia"
    }

    fn envelope() -> EnvelopeKind {
        EnvelopeKind::Wrapped
    }

    fn row_id(row: &PromotionRow) -> EntityId {
        row.id
    }

    fn to_row(dto: PromotionDto) -> PromotionRow {
        PromotionRow {
            id: dto.id,
            code: text(dto.code),
            name: dto.name.trim().to_string(),
            kind: dto
                .kind
                .as_deref()
                .and_then(PromotionKind::from_code)
                .unwrap_or_default(),
            percent: dto.percent.as_deref().and_then(parse_number),
            amount: dto.amount,
            description: text(dto.description),
            start: text(dto.start),
            end: text(dto.end),
            usage_limit: dto.usage_limit.unwrap_or(0),
            active: dto.active.unwrap_or(true),
        }
    }

    fn form_from_row(row: &PromotionRow) -> PromotionForm {
        PromotionForm {
            code: row.code.clone(),
            name: row.name.clone(),
            kind: row.kind,
            percent: row.percent.map(|p| p.to_string()).unwrap_or_default(),
            amount: row.amount.map(|a| a.to_string()).unwrap_or_default(),
            description: row.description.clone(),
            start: row.start.get(..10).unwrap_or(&row.start).to_string(),
            end: row.end.get(..10).unwrap_or(&row.end).to_string(),
            usage_limit: row.usage_limit.to_string(),
            active: row.active,
        }
    }

    fn validate(form: &PromotionForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check("maDotGiamGia", rules::CODE.validate_string(&form.code, "Mã đợt giảm giá"));
        errors.check("tenDotGiamGia", rules::NAME.validate_string(&form.name, "Tên đợt giảm giá"));
        match form.kind {
            PromotionKind::Percent => {
                errors.check(
                    "giaTriDotGiam",
                    rules::PERCENT.validate_number_text(&form.percent, "Giá trị giảm"),
                );
            }
            PromotionKind::Amount => {
                errors.check("soTien", AMOUNT.validate_number_text(&form.amount, "Số tiền giảm"));
            }
        }
        errors.check("moTa", rules::DESCRIPTION.validate_string(&form.description, "Mô tả"));
        errors.check(
            "soLuongSuDung",
            rules::QUANTITY.validate_number_text(&form.usage_limit, "Số lượng sử dụng"),
        );
        validate_date_range(&form.start, &form.end, &mut errors, "ngayBatDau", "ngayKetThuc");
        errors
    }

    fn to_request(form: &PromotionForm) -> PromotionRequest {
        let (percent, amount) = match form.kind {
            PromotionKind::Percent => (parse_number(&form.percent).map(|v| v.to_string()), None),
            PromotionKind::Amount => (None, parse_number(&form.amount)),
        };
        PromotionRequest {
            code: form.code.trim().to_string(),
            name: form.name.trim().to_string(),
            kind: form.kind,
            percent,
            amount,
            description: optional_text(&form.description),
            start: form.start.trim().to_string(),
            end: form.end.trim().to_string(),
            usage_limit: parse_number(&form.usage_limit).unwrap_or_default() as i64,
            active: form.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PromotionForm {
        PromotionForm {
            code: "KM20250301001".into(),
            name: "Giảm giá mùa hè".into(),
            percent: "15".into(),
            start: "2025-06-01".into(),
            end: "2025-06-30".into(),
            ..PromotionForm::default()
        }
    }

    #[test]
    fn test_kind_specific_value() {
        assert!(Promotion::validate(&valid_form()).is_empty());

        let mut form = valid_form();
        form.percent = "120".into();
        assert!(Promotion::validate(&form).contains("giaTriDotGiam"));

        form.kind = PromotionKind::Amount;
        form.amount = "0".into();
        let errors = Promotion::validate(&form);
        assert!(!errors.contains("giaTriDotGiam"));
        assert!(errors.contains("soTien"));
    }

    #[test]
    fn test_end_must_follow_start() {
        let mut form = valid_form();
        form.end = "2025-05-31".into();
        assert_eq!(
            Promotion::validate(&form).get("ngayKetThuc"),
            Some("Ngày kết thúc phải sau ngày bắt đầu")
        );
    }

    #[test]
    fn test_request_sends_only_active_kind_value() {
        let mut form = valid_form();
        form.amount = "50000".into();
        let request = Promotion::to_request(&form);
        assert_eq!(request.percent.as_deref(), Some("15"));
        assert_eq!(request.amount, None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["loaiDotGiamGia"], "PHAN_TRAM");
    }

    #[test]
    fn test_percent_sent_in_dot_notation() {
        let mut form = valid_form();
        form.percent = " 10,5 ".into();
        assert!(Promotion::validate(&form).is_empty());
        assert_eq!(Promotion::to_request(&form).percent.as_deref(), Some("10.5"));
    }

    #[test]
    fn test_row_value_label_and_phase() {
        let dto: PromotionDto = serde_json::from_str(
            r#"{"id":2,"maDotGiamGia":"KM01","tenDotGiamGia":"Tết","loaiDotGiamGia":"SO_TIEN",
               "soTien":200000,"ngayBatDau":"2025-01-20","ngayKetThuc":"2025-02-05","trangThai":true}"#,
        )
        .unwrap();
        let row = Promotion::to_row(dto);
        assert_eq!(row.value_label(), "200.000 ₫");
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(row.phase(today), CampaignPhase::Expired);
    }
}
