use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::person::{gender_from_form, gender_to_form, validate_contact, validate_past_date};
use crate::domain::common::{EntityId, Resource};
use crate::shared::paging::{EnvelopeKind, SortSpec};
use crate::shared::validation::{parse_date, rules, ValidationErrors};

/// `GET` returning the next free staff code inside the usual wrapper
pub const GENERATE_CODE_PATH: &str = "/api/nhan-vien/generate-ma-nhan-vien";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDto {
    pub id: EntityId,
    #[serde(rename = "maNhanVien", default)]
    pub code: Option<String>,
    #[serde(rename = "hoTen")]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "soDienThoai", default)]
    pub phone: Option<String>,
    #[serde(rename = "diaChi", default)]
    pub address: Option<String>,
    #[serde(rename = "gioiTinh", default)]
    pub male: Option<bool>,
    #[serde(rename = "ngaySinh", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "ngayVaoLam", default)]
    pub start_date: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffRequest {
    #[serde(rename = "maNhanVien", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "hoTen")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "soDienThoai")]
    pub phone: String,
    #[serde(rename = "diaChi")]
    pub address: Option<String>,
    #[serde(rename = "gioiTinh")]
    pub male: Option<bool>,
    #[serde(rename = "ngaySinh")]
    pub birth_date: Option<String>,
    #[serde(rename = "ngayVaoLam")]
    pub start_date: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffRow {
    pub id: EntityId,
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub male: Option<bool>,
    pub birth_date: String,
    pub start_date: String,
    pub active: bool,
}

/// Staff use their own wording for the active flag
pub fn staff_status_label(active: bool) -> &'static str {
    if active {
        "Đang làm việc"
    } else {
        "Nghỉ việc"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffForm {
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gender: String,
    pub birth_date: String,
    pub start_date: String,
    pub active: bool,
}

impl Default for StaffForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            gender: "true".to_string(),
            birth_date: String::new(),
            start_date: String::new(),
            active: true,
        }
    }
}

impl StaffForm {
    pub fn validate_on(&self, today: NaiveDate) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if !self.code.trim().is_empty() {
            errors.check("maNhanVien", rules::CODE.validate_string(&self.code, "Mã nhân viên"));
        }
        validate_contact(
            &mut errors,
            "hoTen",
            "Họ tên",
            &self.full_name,
            &self.email,
            &self.phone,
        );
        errors.check("diaChi", rules::DESCRIPTION.validate_string(&self.address, "Địa chỉ"));
        let birth = errors
            .check("ngaySinh", validate_past_date(&self.birth_date, "Ngày sinh", today))
            .flatten();
        if let (Some(birth), Some(start)) = (birth, parse_date(&self.start_date)) {
            if start <= birth {
                errors.insert("ngayVaoLam", "Ngày vào làm phải sau ngày sinh");
            }
        } else if !self.start_date.trim().is_empty() && parse_date(&self.start_date).is_none() {
            errors.insert("ngayVaoLam", "Ngày vào làm không hợp lệ");
        }
        errors
    }
}

pub struct Staff;

impl Resource for Staff {
    type Dto = StaffDto;
    type Row = StaffRow;
    type Form = StaffForm;
    type Request = StaffRequest;

    fn aggregate_index() -> &'static str {
        "a012"
    }

    fn collection_name() -> &'static str {
        "staff"
    }

    fn element_name() -> &'static str {
        "Nhân viên"
    }

    fn list_name() -> &'static str {
        "Quản lý nhân viên"
    }

    fn endpoint() -> &'static str {
        "/api/nhan-vien"
    }

    fn envelope() -> EnvelopeKind {
        EnvelopeKind::Wrapped
    }

    fn default_sort() -> SortSpec {
        SortSpec::asc("id")
    }

    fn row_id(row: &StaffRow) -> EntityId {
        row.id
    }

    fn to_row(dto: StaffDto) -> StaffRow {
        StaffRow {
            id: dto.id,
            code: text(dto.code),
            full_name: dto.full_name.trim().to_string(),
            email: text(dto.email),
            phone: text(dto.phone),
            address: text(dto.address),
            male: dto.male,
            birth_date: text(dto.birth_date),
            start_date: text(dto.start_date),
            active: dto.active.unwrap_or(true),
        }
    }

    fn form_from_row(row: &StaffRow) -> StaffForm {
        StaffForm {
            code: row.code.clone(),
            full_name: row.full_name.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            address: row.address.clone(),
            gender: gender_to_form(row.male),
            birth_date: row.birth_date.get(..10).unwrap_or(&row.birth_date).to_string(),
            start_date: row.start_date.get(..10).unwrap_or(&row.start_date).to_string(),
            active: row.active,
        }
    }

    fn validate(form: &StaffForm) -> ValidationErrors {
        form.validate_on(Local::now().date_naive())
    }

    fn to_request(form: &StaffForm) -> StaffRequest {
        StaffRequest {
            code: optional_text(&form.code),
            full_name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: optional_text(&form.address),
            male: gender_from_form(&form.gender),
            birth_date: optional_text(&form.birth_date),
            start_date: optional_text(&form.start_date),
            active: form.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::paging::{decode_body, decode_page, Page};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_wrapped_page_decodes() {
        let body = r#"{"success":true,"message":"Lấy danh sách thành công","data":{
            "content":[{"id":1,"maNhanVien":"NV001","hoTen":"Lê Văn Cường","trangThai":false}],
            "totalElements":1,"totalPages":1,"number":0,"size":10}}"#;
        let page: Page<StaffDto> = decode_page(body, Staff::envelope()).unwrap();
        let row = Staff::to_row(page.content.into_iter().next().unwrap());
        assert_eq!(row.code, "NV001");
        assert_eq!(staff_status_label(row.active), "Nghỉ việc");
    }

    #[test]
    fn test_generated_code_decodes() {
        let code: String =
            decode_body(r#"{"success":true,"message":"OK","data":"NV014"}"#, Staff::envelope()).unwrap();
        assert_eq!(code, "NV014");
    }

    #[test]
    fn test_start_date_after_birth() {
        let form = StaffForm {
            full_name: "Phạm Minh Đức".into(),
            email: "duc@shop.vn".into(),
            phone: "0911222333".into(),
            birth_date: "2000-05-10".into(),
            start_date: "1999-01-01".into(),
            ..StaffForm::default()
        };
        let errors = form.validate_on(today());
        assert_eq!(errors.get("ngayVaoLam"), Some("Ngày vào làm phải sau ngày sinh"));

        let fixed = StaffForm {
            start_date: "2024-03-01".into(),
            ..form
        };
        assert!(fixed.validate_on(today()).is_empty());
    }
}
