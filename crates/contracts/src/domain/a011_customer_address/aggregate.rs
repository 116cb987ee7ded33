use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::text;
use crate::domain::common::{EntityId, Resource};
use crate::shared::paging::{PageQuery, SortSpec};
use crate::shared::validation::{rules, ValidationErrors, ValidationRules};

/// Filter key carrying the owning customer
pub const CUSTOMER_FILTER: &str = "khachHangId";

const REGION: ValidationRules = ValidationRules {
    required: true,
    max_length: Some(100),
    ..ValidationRules::none()
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDto {
    pub id: EntityId,
    #[serde(rename = "tenNguoiNhan", default)]
    pub recipient: Option<String>,
    #[serde(rename = "soDienThoai", default)]
    pub phone: Option<String>,
    #[serde(rename = "diaChiChiTiet", default)]
    pub street: Option<String>,
    #[serde(rename = "phuongXa", default)]
    pub ward: Option<String>,
    #[serde(rename = "quanHuyen", default)]
    pub district: Option<String>,
    #[serde(rename = "tinhThanh", default)]
    pub province: Option<String>,
    #[serde(rename = "macDinh", default)]
    pub is_default: bool,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
    #[serde(rename = "khachHangId", default)]
    pub customer_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressRequest {
    #[serde(rename = "tenNguoiNhan")]
    pub recipient: String,
    #[serde(rename = "soDienThoai")]
    pub phone: String,
    #[serde(rename = "diaChiChiTiet")]
    pub street: String,
    #[serde(rename = "phuongXa")]
    pub ward: String,
    #[serde(rename = "quanHuyen")]
    pub district: String,
    #[serde(rename = "tinhThanh")]
    pub province: String,
    #[serde(rename = "macDinh")]
    pub is_default: bool,
    #[serde(rename = "trangThai")]
    pub active: bool,
    #[serde(rename = "khachHangId")]
    pub customer_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressRow {
    pub id: EntityId,
    pub recipient: String,
    pub phone: String,
    pub street: String,
    pub ward: String,
    pub district: String,
    pub province: String,
    pub is_default: bool,
    pub active: bool,
    pub customer_id: Option<EntityId>,
}

impl AddressRow {
    /// "12 Lê Lợi, Phường Bến Nghé, Quận 1, TP. Hồ Chí Minh"
    pub fn full_address(&self) -> String {
        [&self.street, &self.ward, &self.district, &self.province]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn default_label(is_default: bool) -> &'static str {
    if is_default {
        "Mặc định"
    } else {
        "Không mặc định"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressForm {
    pub customer_id: Option<EntityId>,
    pub recipient: String,
    pub phone: String,
    pub street: String,
    pub ward: String,
    pub district: String,
    pub province: String,
    pub is_default: bool,
    pub active: bool,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self {
            customer_id: None,
            recipient: String::new(),
            phone: String::new(),
            street: String::new(),
            ward: String::new(),
            district: String::new(),
            province: String::new(),
            is_default: false,
            active: true,
        }
    }
}

/// `PUT /api/dia-chi-khach-hang/{id}/khach-hang/{customerId}/mac-dinh`
pub fn set_default_path(row: &AddressRow) -> Option<String> {
    row.customer_id.map(|customer_id| {
        format!(
            "{}/{}/khach-hang/{}/mac-dinh",
            CustomerAddress::endpoint(),
            row.id,
            customer_id
        )
    })
}

/// Delivery address of a customer
pub struct CustomerAddress;

impl Resource for CustomerAddress {
    type Dto = AddressDto;
    type Row = AddressRow;
    type Form = AddressForm;
    type Request = AddressRequest;

    fn aggregate_index() -> &'static str {
        "a011"
    }

    fn collection_name() -> &'static str {
        "customer_address"
    }

    fn element_name() -> &'static str {
        "Địa chỉ"
    }

    fn list_name() -> &'static str {
        "Địa chỉ khách hàng"
    }

    fn endpoint() -> &'static str {
        "/api/dia-chi-khach-hang"
    }

    fn default_sort() -> SortSpec {
        SortSpec::desc("macDinh")
    }

    /// Addresses of one customer come from a nested path as a bare array
    fn list_path(query: &PageQuery) -> String {
        match query.filter(CUSTOMER_FILTER) {
            Some(customer_id) => format!("{}/khach-hang/{}", Self::endpoint(), customer_id),
            None => Self::endpoint().to_string(),
        }
    }

    fn delete_path(row: &AddressRow) -> String {
        match row.customer_id {
            Some(customer_id) => format!("{}/{}/khach-hang/{}", Self::endpoint(), row.id, customer_id),
            None => Self::item_path(row.id),
        }
    }

    fn row_id(row: &AddressRow) -> EntityId {
        row.id
    }

    fn to_row(dto: AddressDto) -> AddressRow {
        AddressRow {
            id: dto.id,
            recipient: text(dto.recipient),
            phone: text(dto.phone),
            street: text(dto.street),
            ward: text(dto.ward),
            district: text(dto.district),
            province: text(dto.province),
            is_default: dto.is_default,
            active: dto.active.unwrap_or(true),
            customer_id: dto.customer_id,
        }
    }

    fn form_from_row(row: &AddressRow) -> AddressForm {
        AddressForm {
            customer_id: row.customer_id,
            recipient: row.recipient.clone(),
            phone: row.phone.clone(),
            street: row.street.clone(),
            ward: row.ward.clone(),
            district: row.district.clone(),
            province: row.province.clone(),
            is_default: row.is_default,
            active: row.active,
        }
    }

    fn validate(form: &AddressForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if form.customer_id.is_none() {
            errors.insert(CUSTOMER_FILTER, "Vui lòng chọn khách hàng");
        }
        errors.check("tenNguoiNhan", rules::NAME.validate_string(&form.recipient, "Tên người nhận"));
        errors.check("soDienThoai", rules::PHONE.validate_string(&form.phone, "Số điện thoại"));
        errors.check("diaChiChiTiet", rules::ADDRESS.validate_string(&form.street, "Địa chỉ chi tiết"));
        errors.check("phuongXa", REGION.validate_string(&form.ward, "Phường/Xã"));
        errors.check("quanHuyen", REGION.validate_string(&form.district, "Quận/Huyện"));
        errors.check("tinhThanh", REGION.validate_string(&form.province, "Tỉnh/Thành phố"));
        errors
    }

    fn to_request(form: &AddressForm) -> AddressRequest {
        AddressRequest {
            recipient: form.recipient.trim().to_string(),
            phone: form.phone.trim().to_string(),
            street: form.street.trim().to_string(),
            ward: form.ward.trim().to_string(),
            district: form.district.trim().to_string(),
            province: form.province.trim().to_string(),
            is_default: form.is_default,
            active: form.active,
            customer_id: form.customer_id,
        }
    }
}

/// Prefill a new address with the customer currently being browsed
pub fn blank_form_for(customer_id: Option<EntityId>, first_address: bool) -> AddressForm {
    AddressForm {
        customer_id,
        is_default: first_address,
        ..AddressForm::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> AddressRow {
        CustomerAddress::to_row(
            serde_json::from_str(
                r#"{"id":9,"tenNguoiNhan":"An","soDienThoai":"0912345678","diaChiChiTiet":"12 Lê Lợi",
                   "phuongXa":"Bến Nghé","quanHuyen":"Quận 1","tinhThanh":"TP. Hồ Chí Minh",
                   "macDinh":true,"trangThai":true,"khachHangId":4}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_paths() {
        let mut query = PageQuery::new(CustomerAddress::default_sort(), 10);
        assert_eq!(CustomerAddress::list_path(&query), "/api/dia-chi-khach-hang");
        query.filters.insert(CUSTOMER_FILTER.to_string(), "4".to_string());
        assert_eq!(CustomerAddress::list_path(&query), "/api/dia-chi-khach-hang/khach-hang/4");
        assert_eq!(CustomerAddress::delete_path(&row()), "/api/dia-chi-khach-hang/9/khach-hang/4");
        assert_eq!(
            set_default_path(&row()).as_deref(),
            Some("/api/dia-chi-khach-hang/9/khach-hang/4/mac-dinh")
        );
    }

    #[test]
    fn test_full_address() {
        assert_eq!(row().full_address(), "12 Lê Lợi, Bến Nghé, Quận 1, TP. Hồ Chí Minh");
        let mut partial = row();
        partial.ward.clear();
        assert_eq!(partial.full_address(), "12 Lê Lợi, Quận 1, TP. Hồ Chí Minh");
    }

    #[test]
    fn test_address_requires_customer_and_region() {
        let form = blank_form_for(None, true);
        assert!(form.is_default);
        let errors = CustomerAddress::validate(&form);
        assert_eq!(errors.get(CUSTOMER_FILTER), Some("Vui lòng chọn khách hàng"));
        assert!(errors.contains("tinhThanh"));
        assert!(CustomerAddress::validate(&CustomerAddress::form_from_row(&row())).is_empty());
    }
}
