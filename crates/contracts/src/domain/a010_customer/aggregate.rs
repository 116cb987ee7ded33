use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::person::{gender_from_form, gender_to_form, validate_contact, validate_past_date};
use crate::domain::common::{EntityId, Resource};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDto {
    pub id: EntityId,
    #[serde(rename = "maKhachHang", default)]
    pub code: Option<String>,
    #[serde(rename = "tenKhachHang")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "soDienThoai", default)]
    pub phone: Option<String>,
    #[serde(rename = "diaChi", default)]
    pub address: Option<String>,
    #[serde(rename = "ngaySinh", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "gioiTinh", default)]
    pub male: Option<bool>,
    #[serde(rename = "ngayTao", default)]
    pub created_at: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRequest {
    #[serde(rename = "maKhachHang", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "tenKhachHang")]
    pub name: String,
    pub email: String,
    #[serde(rename = "soDienThoai")]
    pub phone: String,
    #[serde(rename = "ngaySinh")]
    pub birth_date: Option<String>,
    #[serde(rename = "gioiTinh")]
    pub male: Option<bool>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Default address summary
    pub address: String,
    pub birth_date: String,
    pub male: Option<bool>,
    pub created_at: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerForm {
    /// Left empty to let the server assign one
    pub code: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    /// "true" | "false" | ""
    pub gender: String,
    pub active: bool,
}

impl Default for CustomerForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            birth_date: String::new(),
            gender: "true".to_string(),
            active: true,
        }
    }
}

impl CustomerForm {
    pub fn validate_on(&self, today: NaiveDate) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_contact(
            &mut errors,
            "tenKhachHang",
            "Tên khách hàng",
            &self.name,
            &self.email,
            &self.phone,
        );
        errors.check("ngaySinh", validate_past_date(&self.birth_date, "Ngày sinh", today));
        errors
    }
}

pub struct Customer;

impl Resource for Customer {
    type Dto = CustomerDto;
    type Row = CustomerRow;
    type Form = CustomerForm;
    type Request = CustomerRequest;

    fn aggregate_index() -> &'static str {
        "a010"
    }

    fn collection_name() -> &'static str {
        "customer"
    }

    fn element_name() -> &'static str {
        "Khách hàng"
    }

    fn list_name() -> &'static str {
        "Quản lý khách hàng"
    }

    fn endpoint() -> &'static str {
        "/api/khach-hang"
    }

    fn row_id(row: &CustomerRow) -> EntityId {
        row.id
    }

    fn to_row(dto: CustomerDto) -> CustomerRow {
        CustomerRow {
            id: dto.id,
            code: text(dto.code),
            name: dto.name.trim().to_string(),
            email: text(dto.email),
            phone: text(dto.phone),
            address: text(dto.address),
            birth_date: text(dto.birth_date),
            male: dto.male,
            created_at: text(dto.created_at),
            active: dto.active.unwrap_or(true),
        }
    }

    fn form_from_row(row: &CustomerRow) -> CustomerForm {
        CustomerForm {
            code: row.code.clone(),
            name: row.name.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            birth_date: row.birth_date.get(..10).unwrap_or(&row.birth_date).to_string(),
            gender: gender_to_form(row.male),
            active: row.active,
        }
    }

    fn validate(form: &CustomerForm) -> ValidationErrors {
        form.validate_on(Local::now().date_naive())
    }

    fn to_request(form: &CustomerForm) -> CustomerRequest {
        CustomerRequest {
            code: optional_text(&form.code),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            birth_date: optional_text(&form.birth_date),
            male: gender_from_form(&form.gender),
            active: form.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_customer_form_validation() {
        let form = CustomerForm {
            name: "Nguyễn Văn An".into(),
            email: "an@gmail".into(),
            phone: "09123".into(),
            birth_date: "2030-01-01".into(),
            ..CustomerForm::default()
        };
        let errors = form.validate_on(today());
        assert!(!errors.contains("tenKhachHang"));
        assert!(errors.contains("email"));
        assert!(errors.contains("soDienThoai"));
        assert_eq!(errors.get("ngaySinh"), Some("Ngày sinh không được ở tương lai"));
    }

    #[test]
    fn test_request_omits_empty_code() {
        let form = CustomerForm {
            name: " Trần Thị Bình ".into(),
            email: "binh@shop.vn".into(),
            phone: "0987654321".into(),
            gender: "false".into(),
            ..CustomerForm::default()
        };
        assert!(form.validate_on(today()).is_empty());
        let json = serde_json::to_value(Customer::to_request(&form)).unwrap();
        assert!(json.get("maKhachHang").is_none());
        assert_eq!(json["tenKhachHang"], "Trần Thị Bình");
        assert_eq!(json["gioiTinh"], false);
        assert!(json["ngaySinh"].is_null());
    }

    #[test]
    fn test_edit_form_trims_timestamp_birth_date() {
        let dto: CustomerDto = serde_json::from_str(
            r#"{"id":1,"maKhachHang":"KH001","tenKhachHang":"An","ngaySinh":"1999-04-02T00:00:00","gioiTinh":true}"#,
        )
        .unwrap();
        let form = Customer::form_from_row(&Customer::to_row(dto));
        assert_eq!(form.birth_date, "1999-04-02");
        assert_eq!(form.gender, "true");
    }
}
