use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{Capabilities, EntityId, Resource};
use crate::shared::validation::{parse_number, rules, ValidationErrors, ValidationRules};

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    #[serde(rename = "CHO_XAC_NHAN")]
    Pending,
    #[serde(rename = "DA_XAC_NHAN")]
    Confirmed,
    #[serde(rename = "DANG_GIAO_HANG")]
    Shipping,
    #[serde(rename = "DA_GIAO_HANG")]
    Delivered,
    #[serde(rename = "HUY")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    /// Progress steps in display order
    pub const STEPS: [InvoiceStatus; 5] = [
        InvoiceStatus::Pending,
        InvoiceStatus::Confirmed,
        InvoiceStatus::Shipping,
        InvoiceStatus::Delivered,
        InvoiceStatus::Cancelled,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "CHO_XAC_NHAN",
            InvoiceStatus::Confirmed => "DA_XAC_NHAN",
            InvoiceStatus::Shipping => "DANG_GIAO_HANG",
            InvoiceStatus::Delivered => "DA_GIAO_HANG",
            InvoiceStatus::Cancelled => "HUY",
            InvoiceStatus::Unknown => "",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::STEPS
            .into_iter()
            .find(|s| s.code() == code)
            .unwrap_or(InvoiceStatus::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Chờ xác nhận",
            InvoiceStatus::Confirmed => "Đã xác nhận",
            InvoiceStatus::Shipping => "Đang giao hàng",
            InvoiceStatus::Delivered => "Đã giao hàng",
            InvoiceStatus::Cancelled => "Hủy",
            InvoiceStatus::Unknown => "Không xác định",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "status-pending",
            InvoiceStatus::Confirmed => "status-confirmed",
            InvoiceStatus::Shipping => "status-shipping",
            InvoiceStatus::Delivered => "status-delivered",
            InvoiceStatus::Cancelled => "status-cancelled",
            InvoiceStatus::Unknown => "status-unknown",
        }
    }

    /// Width of the progress bar, 0 for unknown statuses
    pub fn progress_percent(&self) -> f64 {
        match Self::STEPS.iter().position(|s| s == self) {
            Some(index) => (index + 1) as f64 / Self::STEPS.len() as f64 * 100.0,
            None => 0.0,
        }
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineDto {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(rename = "sanPhamId", default)]
    pub product_id: Option<EntityId>,
    #[serde(rename = "tenSanPham", default)]
    pub product_name: String,
    #[serde(rename = "soLuong", default)]
    pub quantity: i64,
    #[serde(rename = "donGia", default)]
    pub unit_price: f64,
    #[serde(rename = "thanhTien", default)]
    pub amount: f64,
    #[serde(rename = "ghiChu", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDto {
    pub id: EntityId,
    #[serde(rename = "maHoaDon", default)]
    pub code: Option<String>,
    #[serde(rename = "khachHangId", default)]
    pub customer_id: Option<EntityId>,
    #[serde(rename = "tenKhachHang", default)]
    pub customer_name: Option<String>,
    #[serde(rename = "soDienThoaiKhachHang", default)]
    pub customer_phone: Option<String>,
    #[serde(rename = "emailKhachHang", default)]
    pub customer_email: Option<String>,
    #[serde(rename = "nhanVienId", default)]
    pub staff_id: Option<EntityId>,
    #[serde(rename = "tenNhanVien", default)]
    pub staff_name: Option<String>,
    #[serde(rename = "ngayTao", default)]
    pub created_at: Option<String>,
    #[serde(rename = "ngayThanhToan", default)]
    pub paid_at: Option<String>,
    #[serde(rename = "tongTien", default)]
    pub total: f64,
    #[serde(rename = "tienGiamGia", default)]
    pub discount: Option<f64>,
    #[serde(rename = "thanhTien", default)]
    pub grand_total: f64,
    #[serde(rename = "ghiChu", default)]
    pub notes: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub status: InvoiceStatus,
    #[serde(rename = "viTriBanHang", default)]
    pub channel: Option<String>,
    #[serde(rename = "phuongThucThanhToan", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "diaChiGiaoHang", default)]
    pub shipping_address: Option<String>,
    #[serde(rename = "danhSachSanPham", default)]
    pub lines: Vec<InvoiceLineDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRequest {
    #[serde(rename = "maHoaDon")]
    pub code: String,
    #[serde(rename = "khachHangId")]
    pub customer_id: Option<EntityId>,
    #[serde(rename = "tenKhachHang")]
    pub customer_name: String,
    #[serde(rename = "soDienThoaiKhachHang")]
    pub customer_phone: Option<String>,
    #[serde(rename = "nhanVienId")]
    pub staff_id: Option<EntityId>,
    #[serde(rename = "tongTien")]
    pub total: f64,
    #[serde(rename = "tienGiamGia")]
    pub discount: f64,
    #[serde(rename = "thanhTien")]
    pub grand_total: f64,
    #[serde(rename = "ghiChu")]
    pub notes: Option<String>,
    #[serde(rename = "trangThai")]
    pub status: InvoiceStatus,
    #[serde(rename = "viTriBanHang")]
    pub channel: Option<String>,
    #[serde(rename = "phuongThucThanhToan")]
    pub payment_method: Option<String>,
    #[serde(rename = "diaChiGiaoHang")]
    pub shipping_address: Option<String>,
    #[serde(rename = "danhSachSanPham")]
    pub lines: Vec<InvoiceLineDto>,
}

// ============================================================================
// View models
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRow {
    pub id: EntityId,
    pub code: String,
    pub customer_id: Option<EntityId>,
    pub customer_name: String,
    pub customer_phone: String,
    pub staff_id: Option<EntityId>,
    pub staff_name: String,
    pub created_at: String,
    pub paid_at: String,
    pub total: f64,
    pub discount: f64,
    pub grand_total: f64,
    pub notes: String,
    pub status: InvoiceStatus,
    pub channel: String,
    pub payment_method: String,
    pub shipping_address: String,
    pub lines: Vec<InvoiceLineDto>,
}

impl InvoiceRow {
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvoiceForm {
    pub code: String,
    pub customer_id: Option<EntityId>,
    pub customer_name: String,
    pub customer_phone: String,
    pub staff_id: Option<EntityId>,
    pub total: String,
    pub discount: String,
    pub notes: String,
    pub status: InvoiceStatus,
    pub channel: String,
    pub payment_method: String,
    pub shipping_address: String,
    /// Carried through unchanged, lines are not edited here
    pub lines: Vec<InvoiceLineDto>,
}

impl InvoiceForm {
    /// `tongTien - tienGiamGia`, never negative
    pub fn grand_total(&self) -> f64 {
        let total = parse_number(&self.total).unwrap_or_default();
        let discount = parse_number(&self.discount).unwrap_or_default();
        (total - discount).max(0.0)
    }
}

const TOTAL: ValidationRules = ValidationRules {
    required: true,
    min: Some(1.0),
    max: Some(999_999_999.0),
    ..ValidationRules::none()
};

pub const CHANNELS: [&str; 2] = ["Tại quầy", "Online"];

pub const PAYMENT_METHODS: [&str; 3] = ["Tiền mặt", "Chuyển khoản", "Thẻ"];

/// `PUT /api/hoa-don/{id}/trang-thai?trangThai=...`
pub fn status_update_path(id: EntityId, status: InvoiceStatus) -> String {
    format!("{}/{}/trang-thai?trangThai={}", Invoice::endpoint(), id, status.code())
}

pub struct Invoice;

impl Resource for Invoice {
    type Dto = InvoiceDto;
    type Row = InvoiceRow;
    type Form = InvoiceForm;
    type Request = InvoiceRequest;

    fn aggregate_index() -> &'static str {
        "a013"
    }

    fn collection_name() -> &'static str {
        "invoice"
    }

    fn element_name() -> &'static str {
        "Hóa đơn"
    }

    fn list_name() -> &'static str {
        "Quản lý hóa đơn"
    }

    fn endpoint() -> &'static str {
        "/api/hoa-don"
    }

    /// Invoices are produced by sales, the back office only edits them
    fn capabilities() -> Capabilities {
        Capabilities {
            create: false,
            edit: true,
            delete: true,
        }
    }

    fn row_id(row: &InvoiceRow) -> EntityId {
        row.id
    }

    fn to_row(dto: InvoiceDto) -> InvoiceRow {
        let discount = dto.discount.unwrap_or(0.0);
        InvoiceRow {
            id: dto.id,
            code: text(dto.code),
            customer_id: dto.customer_id,
            customer_name: text(dto.customer_name),
            customer_phone: text(dto.customer_phone),
            staff_id: dto.staff_id,
            staff_name: text(dto.staff_name),
            created_at: text(dto.created_at),
            paid_at: text(dto.paid_at),
            total: dto.total,
            discount,
            grand_total: dto.grand_total,
            notes: text(dto.notes),
            status: dto.status,
            channel: text(dto.channel),
            payment_method: text(dto.payment_method),
            shipping_address: text(dto.shipping_address),
            lines: dto.lines,
        }
    }

    fn form_from_row(row: &InvoiceRow) -> InvoiceForm {
        InvoiceForm {
            code: row.code.clone(),
            customer_id: row.customer_id,
            customer_name: row.customer_name.clone(),
            customer_phone: row.customer_phone.clone(),
            staff_id: row.staff_id,
            total: format!("{}", row.total),
            discount: format!("{}", row.discount),
            notes: row.notes.clone(),
            status: row.status,
            channel: row.channel.clone(),
            payment_method: row.payment_method.clone(),
            shipping_address: row.shipping_address.clone(),
            lines: row.lines.clone(),
        }
    }

    fn validate(form: &InvoiceForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check(
            "tenKhachHang",
            rules::NAME.validate_string(&form.customer_name, "Tên khách hàng"),
        );
        if !form.customer_phone.trim().is_empty() {
            errors.check(
                "soDienThoaiKhachHang",
                rules::PHONE.validate_string(&form.customer_phone, "Số điện thoại"),
            );
        }
        let total = errors
            .check("tongTien", TOTAL.validate_number_text(&form.total, "Tổng tiền"))
            .flatten();
        let discount = errors
            .check(
                "tienGiamGia",
                rules::PRICE
                    .optional()
                    .validate_number_text(&form.discount, "Tiền giảm giá"),
            )
            .flatten();
        if let (Some(total), Some(discount)) = (total, discount) {
            if discount > total {
                errors.insert("tienGiamGia", "Tiền giảm giá không được lớn hơn tổng tiền");
            }
        }
        errors.check("ghiChu", rules::DESCRIPTION.validate_string(&form.notes, "Ghi chú"));
        errors.check(
            "diaChiGiaoHang",
            rules::DESCRIPTION.validate_string(&form.shipping_address, "Địa chỉ giao hàng"),
        );
        if form.status == InvoiceStatus::Unknown {
            errors.insert("trangThai", "Vui lòng chọn trạng thái");
        }
        errors
    }

    fn to_request(form: &InvoiceForm) -> InvoiceRequest {
        InvoiceRequest {
            code: form.code.trim().to_string(),
            customer_id: form.customer_id,
            customer_name: form.customer_name.trim().to_string(),
            customer_phone: optional_text(&form.customer_phone),
            staff_id: form.staff_id,
            total: parse_number(&form.total).unwrap_or_default(),
            discount: parse_number(&form.discount).unwrap_or_default(),
            grand_total: form.grand_total(),
            notes: optional_text(&form.notes),
            status: form.status,
            channel: optional_text(&form.channel),
            payment_method: optional_text(&form.payment_method),
            shipping_address: optional_text(&form.shipping_address),
            lines: form.lines.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 31,
        "maHoaDon": "HD0031",
        "tenKhachHang": "Nguyễn Văn An",
        "ngayTao": "2025-02-14T10:30:00",
        "tongTien": 1200000,
        "tienGiamGia": 100000,
        "thanhTien": 1100000,
        "trangThai": "DANG_GIAO_HANG",
        "viTriBanHang": "Online",
        "danhSachSanPham": [
            {"tenSanPham": "Royal M139", "soLuong": 2, "donGia": 450000, "thanhTien": 900000},
            {"tenSanPham": "Kính chắn gió", "soLuong": 1, "donGia": 300000, "thanhTien": 300000}
        ]
    }"#;

    #[test]
    fn test_status_labels_and_progress() {
        assert_eq!(InvoiceStatus::from_code("DA_XAC_NHAN"), InvoiceStatus::Confirmed);
        assert_eq!(InvoiceStatus::Shipping.label(), "Đang giao hàng");
        assert_eq!(InvoiceStatus::Cancelled.badge_class(), "status-cancelled");
        assert_eq!(InvoiceStatus::Pending.progress_percent(), 20.0);
        assert_eq!(InvoiceStatus::Delivered.progress_percent(), 80.0);
        assert_eq!(InvoiceStatus::Unknown.progress_percent(), 0.0);
    }

    #[test]
    fn test_unknown_status_does_not_break_decoding() {
        let dto: InvoiceDto =
            serde_json::from_str(r#"{"id":1,"trangThai":"TRA_HANG","tongTien":0,"thanhTien":0}"#).unwrap();
        assert_eq!(dto.status, InvoiceStatus::Unknown);
    }

    #[test]
    fn test_mapping_and_item_count() {
        let row = Invoice::to_row(serde_json::from_str(SAMPLE).unwrap());
        assert_eq!(row.status, InvoiceStatus::Shipping);
        assert_eq!(row.item_count(), 3);
        assert_eq!(row.discount, 100_000.0);
    }

    #[test]
    fn test_edit_recomputes_grand_total() {
        let row = Invoice::to_row(serde_json::from_str(SAMPLE).unwrap());
        let mut form = Invoice::form_from_row(&row);
        form.discount = "200000".into();
        assert!(Invoice::validate(&form).is_empty());
        let request = Invoice::to_request(&form);
        assert_eq!(request.grand_total, 1_000_000.0);
        assert_eq!(request.lines.len(), 2);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["trangThai"], "DANG_GIAO_HANG");
    }

    #[test]
    fn test_discount_above_total_rejected() {
        let form = InvoiceForm {
            customer_name: "An".into(),
            total: "100000".into(),
            discount: "150000".into(),
            ..InvoiceForm::default()
        };
        assert_eq!(
            Invoice::validate(&form).get("tienGiamGia"),
            Some("Tiền giảm giá không được lớn hơn tổng tiền")
        );
        let empty_total = InvoiceForm {
            customer_name: "An".into(),
            ..InvoiceForm::default()
        };
        assert_eq!(
            Invoice::validate(&empty_total).get("tongTien"),
            Some("Tổng tiền không được để trống")
        );
    }

    #[test]
    fn test_status_update_path() {
        assert_eq!(
            status_update_path(31, InvoiceStatus::Delivered),
            "/api/hoa-don/31/trang-thai?trangThai=DA_GIAO_HANG"
        );
    }
}
