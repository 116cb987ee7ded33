use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::campaign::CampaignPhase;
use crate::domain::common::lookup::text;
use crate::domain::common::{EntityId, Resource};
use crate::shared::labels::{format_number, format_vnd};
use crate::shared::paging::EnvelopeKind;
use crate::shared::validation::{
    parse_number, rules, validate_date_range, ValidationErrors, ValidationRules,
};

/// Longest allowed validity window
pub const MAX_VALIDITY_DAYS: i64 = 365;

/// Filter key for the public/personal switch
pub const AUDIENCE_FILTER: &str = "isPublic";

const FIXED_VALUE: ValidationRules = ValidationRules {
    required: true,
    min: Some(1_000.0),
    max: Some(999_999_999.0),
    ..ValidationRules::none()
};

const USAGE: ValidationRules = ValidationRules {
    required: true,
    integer: true,
    min: Some(1.0),
    max: Some(9_999.0),
    ..ValidationRules::none()
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherDto {
    pub id: EntityId,
    #[serde(rename = "maPhieu", default)]
    pub code: Option<String>,
    #[serde(rename = "tenPhieuGiamGia")]
    pub name: String,
    /// false = percent, true = fixed amount
    #[serde(rename = "loaiPhieuGiamGia", default)]
    pub fixed_amount: bool,
    #[serde(rename = "giaTriGiam", default)]
    pub value: Option<f64>,
    #[serde(rename = "giaTriToiThieu", default)]
    pub min_discount: Option<f64>,
    #[serde(rename = "soTienToiDa", default)]
    pub max_discount: Option<f64>,
    #[serde(rename = "hoaDonToiThieu", default)]
    pub min_invoice: Option<f64>,
    #[serde(rename = "soLuongDung", default)]
    pub quantity: Option<i64>,
    #[serde(rename = "ngayBatDau", default)]
    pub start: Option<String>,
    #[serde(rename = "ngayKetThuc", default)]
    pub end: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
    #[serde(rename = "isPublic", default)]
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoucherRequest {
    #[serde(rename = "maPhieu")]
    pub code: String,
    #[serde(rename = "tenPhieuGiamGia")]
    pub name: String,
    #[serde(rename = "loaiPhieuGiamGia")]
    pub fixed_amount: bool,
    #[serde(rename = "giaTriGiam")]
    pub value: f64,
    #[serde(rename = "giaTriToiThieu")]
    pub min_discount: f64,
    #[serde(rename = "soTienToiDa")]
    pub max_discount: f64,
    #[serde(rename = "hoaDonToiThieu")]
    pub min_invoice: f64,
    #[serde(rename = "soLuongDung")]
    pub quantity: i64,
    #[serde(rename = "ngayBatDau")]
    pub start: String,
    #[serde(rename = "ngayKetThuc")]
    pub end: String,
    #[serde(rename = "trangThai")]
    pub active: bool,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    #[serde(rename = "selectedCustomerIds", skip_serializing_if = "Option::is_none")]
    pub customer_ids: Option<Vec<EntityId>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoucherRow {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub fixed_amount: bool,
    pub value: f64,
    pub min_discount: f64,
    pub min_invoice: f64,
    pub quantity: i64,
    pub start: String,
    pub end: String,
    pub active: bool,
    pub is_public: bool,
}

impl VoucherRow {
    pub fn kind_label(&self) -> &'static str {
        kind_label(self.fixed_amount)
    }

    pub fn value_label(&self) -> String {
        if self.fixed_amount {
            format_vnd(self.value)
        } else {
            format!("{}%", format_number(self.value))
        }
    }

    pub fn phase(&self, today: NaiveDate) -> CampaignPhase {
        CampaignPhase::of(&self.start, &self.end, self.active, today)
    }
}

pub fn kind_label(fixed_amount: bool) -> &'static str {
    if fixed_amount {
        "Tiền mặt"
    } else {
        "Phần trăm"
    }
}

pub fn audience_label(is_public: bool) -> &'static str {
    if is_public {
        "Công khai"
    } else {
        "Cá nhân"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoucherForm {
    pub code: String,
    pub name: String,
    pub fixed_amount: bool,
    pub value: String,
    pub min_discount: String,
    pub min_invoice: String,
    pub quantity: String,
    pub start: String,
    pub end: String,
    pub active: bool,
    pub is_public: bool,
    pub customer_ids: Vec<EntityId>,
}

impl Default for VoucherForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            fixed_amount: false,
            value: String::new(),
            min_discount: "0".to_string(),
            min_invoice: "0".to_string(),
            quantity: "1".to_string(),
            start: String::new(),
            end: String::new(),
            active: true,
            is_public: true,
            customer_ids: Vec::new(),
        }
    }
}

impl VoucherForm {
    /// Adds or removes a customer from the personal audience
    pub fn toggle_customer(&mut self, id: EntityId) {
        if let Some(pos) = self.customer_ids.iter().position(|c| *c == id) {
            self.customer_ids.remove(pos);
        } else {
            self.customer_ids.push(id);
        }
    }
}

pub struct Voucher;

impl Resource for Voucher {
    type Dto = VoucherDto;
    type Row = VoucherRow;
    type Form = VoucherForm;
    type Request = VoucherRequest;

    fn aggregate_index() -> &'static str {
        "a015"
    }

    fn collection_name() -> &'static str {
        "voucher"
    }

    fn element_name() -> &'static str {
        "Phiếu giảm giá"
    }

    fn list_name() -> &'static str {
        "Quản lý phiếu giảm giá"
    }

    fn endpoint() -> &'static str {
        "/api/phieu-giam-gia"
    }

    fn envelope() -> EnvelopeKind {
        EnvelopeKind::Wrapped
    }

    fn row_id(row: &VoucherRow) -> EntityId {
        row.id
    }

    fn to_row(dto: VoucherDto) -> VoucherRow {
        VoucherRow {
            id: dto.id,
            code: text(dto.code),
            name: dto.name.trim().to_string(),
            fixed_amount: dto.fixed_amount,
            value: dto.value.or(dto.max_discount).unwrap_or(0.0),
            min_discount: dto.min_discount.unwrap_or(0.0),
            min_invoice: dto.min_invoice.unwrap_or(0.0),
            quantity: dto.quantity.unwrap_or(0),
            start: text(dto.start),
            end: text(dto.end),
            active: dto.active.unwrap_or(true),
            is_public: dto.is_public.unwrap_or(true),
        }
    }

    fn form_from_row(row: &VoucherRow) -> VoucherForm {
        VoucherForm {
            code: row.code.clone(),
            name: row.name.clone(),
            fixed_amount: row.fixed_amount,
            value: row.value.to_string(),
            min_discount: row.min_discount.to_string(),
            min_invoice: row.min_invoice.to_string(),
            quantity: row.quantity.to_string(),
            start: row.start.get(..10).unwrap_or(&row.start).to_string(),
            end: row.end.get(..10).unwrap_or(&row.end).to_string(),
            active: row.active,
            is_public: row.is_public,
            customer_ids: Vec::new(),
        }
    }

    fn validate(form: &VoucherForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check("maPhieu", rules::CODE.validate_string(&form.code, "Mã phiếu"));
        errors.check("tenPhieuGiamGia", rules::NAME.validate_string(&form.name, "Tên phiếu"));

        let value_rule = if form.fixed_amount {
            FIXED_VALUE
        } else {
            rules::PERCENT
        };
        let value = errors
            .check("giaTriGiam", value_rule.validate_number_text(&form.value, "Giá trị giảm"))
            .flatten();

        if form.fixed_amount {
            let min_discount = errors
                .check(
                    "giaTriToiThieu",
                    rules::PRICE.validate_number_text(&form.min_discount, "Số tiền giảm tối thiểu"),
                )
                .flatten();
            if let (Some(min_discount), Some(value)) = (min_discount, value) {
                if min_discount > value {
                    errors.insert(
                        "giaTriToiThieu",
                        "Số tiền giảm tối thiểu không được lớn hơn giá trị giảm",
                    );
                }
            }
        }

        errors.check(
            "hoaDonToiThieu",
            rules::PRICE.validate_number_text(&form.min_invoice, "Hóa đơn tối thiểu"),
        );
        errors.check("soLuongDung", USAGE.validate_number_text(&form.quantity, "Số lượng"));

        if let Some((start, end)) =
            validate_date_range(&form.start, &form.end, &mut errors, "ngayBatDau", "ngayKetThuc")
        {
            if (end - start).num_days() > MAX_VALIDITY_DAYS {
                errors.insert("ngayKetThuc", "Phiếu giảm giá không được có thời hạn quá 1 năm");
            }
        }

        if !form.is_public && form.customer_ids.is_empty() {
            errors.insert(
                "selectedCustomerIds",
                "Chế độ Cá nhân yêu cầu phải chọn ít nhất một khách hàng",
            );
        }
        errors
    }

    fn to_request(form: &VoucherForm) -> VoucherRequest {
        let value = parse_number(&form.value).unwrap_or_default();
        let min_discount = if form.fixed_amount {
            parse_number(&form.min_discount).unwrap_or_default()
        } else {
            0.0
        };
        VoucherRequest {
            code: form.code.trim().to_string(),
            name: form.name.trim().to_string(),
            fixed_amount: form.fixed_amount,
            value,
            min_discount,
            max_discount: value,
            min_invoice: parse_number(&form.min_invoice).unwrap_or_default(),
            quantity: parse_number(&form.quantity).unwrap_or_default() as i64,
            start: form.start.trim().to_string(),
            end: form.end.trim().to_string(),
            active: form.active,
            is_public: form.is_public,
            customer_ids: (!form.is_public).then(|| form.customer_ids.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> VoucherForm {
        VoucherForm {
            code: "PGG_1A2B3C4D".into(),
            name: "Giảm 10% đơn đầu".into(),
            value: "10".into(),
            start: "2025-03-01".into(),
            end: "2025-03-31".into(),
            ..VoucherForm::default()
        }
    }

    #[test]
    fn test_valid_percent_voucher() {
        assert!(Voucher::validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_fixed_amount_needs_at_least_1000() {
        let mut form = valid_form();
        form.fixed_amount = true;
        form.value = "500".into();
        assert!(Voucher::validate(&form).contains("giaTriGiam"));

        form.value = "50000".into();
        form.min_discount = "60000".into();
        assert_eq!(
            Voucher::validate(&form).get("giaTriToiThieu"),
            Some("Số tiền giảm tối thiểu không được lớn hơn giá trị giảm")
        );
    }

    #[test]
    fn test_percent_out_of_range() {
        let mut form = valid_form();
        form.value = "0".into();
        assert!(Voucher::validate(&form).contains("giaTriGiam"));
        form.value = "101".into();
        assert!(Voucher::validate(&form).contains("giaTriGiam"));
    }

    #[test]
    fn test_usage_bounds() {
        let mut form = valid_form();
        form.quantity = "0".into();
        assert!(Voucher::validate(&form).contains("soLuongDung"));
        form.quantity = "10000".into();
        assert!(Voucher::validate(&form).contains("soLuongDung"));
        form.quantity = "2.5".into();
        assert!(Voucher::validate(&form).contains("soLuongDung"));
    }

    #[test]
    fn test_validity_window_capped_at_one_year() {
        let mut form = valid_form();
        form.end = "2026-03-02".into();
        assert_eq!(
            Voucher::validate(&form).get("ngayKetThuc"),
            Some("Phiếu giảm giá không được có thời hạn quá 1 năm")
        );
        form.end = "2026-03-01".into();
        assert!(Voucher::validate(&form).is_empty());
    }

    #[test]
    fn test_personal_voucher_needs_customers() {
        let mut form = valid_form();
        form.is_public = false;
        assert!(Voucher::validate(&form).contains("selectedCustomerIds"));

        form.toggle_customer(7);
        form.toggle_customer(9);
        form.toggle_customer(7);
        assert!(Voucher::validate(&form).is_empty());

        let request = Voucher::to_request(&form);
        assert_eq!(request.customer_ids, Some(vec![9]));
    }

    #[test]
    fn test_public_request_omits_customers() {
        let json = serde_json::to_value(Voucher::to_request(&valid_form())).unwrap();
        assert!(json.get("selectedCustomerIds").is_none());
        assert_eq!(json["giaTriGiam"], 10.0);
        assert_eq!(json["soTienToiDa"], 10.0);
        assert_eq!(json["giaTriToiThieu"], 0.0);
    }

    #[test]
    fn test_row_lifecycle() {
        let row = Voucher::to_row(VoucherDto {
            id: 1,
            code: Some("PGG_A".into()),
            name: "Test".into(),
            fixed_amount: true,
            value: Some(20000.0),
            min_discount: None,
            max_discount: None,
            min_invoice: Some(100000.0),
            quantity: Some(5),
            start: Some("2025-03-01".into()),
            end: Some("2025-03-31".into()),
            active: Some(false),
            is_public: None,
        });
        assert_eq!(row.value_label(), "20.000 ₫");
        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        assert_eq!(row.phase(day(1)), CampaignPhase::Disabled);

        let upcoming: VoucherDto = serde_json::from_str(
            r#"{"id":2,"tenPhieuGiamGia":"x","trangThai":true,"ngayBatDau":"2025-03-10","ngayKetThuc":"2025-03-20"}"#,
        )
        .unwrap();
        assert_eq!(Voucher::to_row(upcoming).phase(day(5)), CampaignPhase::NotStarted);
    }
}
