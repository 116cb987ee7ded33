use contracts::domain::a012_staff::aggregate::{
    staff_status_label, Staff, StaffForm, StaffRow, GENERATE_CODE_PATH,
};
use contracts::domain::common::Resource;
use contracts::shared::error::ApiError;
use contracts::shared::labels::{format_date, gender_label};
use contracts::shared::paging::decode_body;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a010_customer::ui::list::GENDER_OPTIONS;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::{Badge, Checkbox, Input, RadioGroup, Textarea};
use crate::shared::form::FormHandle;
use crate::shared::http;
use crate::shared::resource_page::{resource_list, Column, FilterDef, ListPage, ResourceView};

async fn generate_code() -> Result<String, ApiError> {
    let body = http::get_text(GENERATE_CODE_PATH, &[]).await?;
    decode_body(&body, Staff::envelope())
}

impl ResourceView for Staff {
    fn search_placeholder() -> &'static str {
        "Tìm theo mã, họ tên, email hoặc số điện thoại..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![FilterDef::new(
            "trangThai",
            &[("", "Tất cả trạng thái"), ("true", "Đang làm việc"), ("false", "Nghỉ việc")],
        )]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Mã NV", "maNhanVien"),
            Column::sortable("Họ tên", "hoTen"),
            Column::plain("Email"),
            Column::plain("Số điện thoại"),
            Column::plain("Giới tính"),
            Column::sortable("Ngày vào làm", "ngayVaoLam"),
            Column::sortable("Trạng thái", "trangThai"),
        ]
    }

    fn cells(row: &StaffRow) -> AnyView {
        let variant = if row.active { "success" } else { "warning" };
        let active = row.active;
        view! {
            <td class="table__cell table__cell--code">{row.code.clone()}</td>
            <td class="table__cell table__cell--name">{row.full_name.clone()}</td>
            <td class="table__cell">{row.email.clone()}</td>
            <td class="table__cell">{row.phone.clone()}</td>
            <td class="table__cell">{gender_label(row.male)}</td>
            <td class="table__cell">{format_date(&row.start_date)}</td>
            <td class="table__cell">
                <Badge variant=variant>{staff_status_label(active)}</Badge>
            </td>
        }
        .into_any()
    }

    fn form(form: FormHandle<StaffForm>) -> AnyView {
        let locked = form.locked();
        view! {
            <div class="form form--two-columns">
                <Input
                    label="Mã nhân viên"
                    value=form.value(|f| f.code.clone())
                    on_input=form.on_input(|f, v| f.code = v)
                    on_blur=form.on_blur("maNhanVien")
                    error=form.error("maNhanVien")
                    placeholder="Tự sinh nếu để trống"
                    disabled=locked
                />
                <Input
                    label="Họ tên"
                    value=form.value(|f| f.full_name.clone())
                    on_input=form.on_input(|f, v| f.full_name = v)
                    on_blur=form.on_blur("hoTen")
                    error=form.error("hoTen")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Email"
                    input_type="email"
                    value=form.value(|f| f.email.clone())
                    on_input=form.on_input(|f, v| f.email = v)
                    on_blur=form.on_blur("email")
                    error=form.error("email")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Số điện thoại"
                    input_type="tel"
                    value=form.value(|f| f.phone.clone())
                    on_input=form.on_input(|f, v| f.phone = v)
                    on_blur=form.on_blur("soDienThoai")
                    error=form.error("soDienThoai")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Ngày sinh"
                    input_type="date"
                    value=form.value(|f| f.birth_date.clone())
                    on_input=form.on_input(|f, v| f.birth_date = v)
                    on_blur=form.on_blur("ngaySinh")
                    error=form.error("ngaySinh")
                    disabled=locked
                />
                <Input
                    label="Ngày vào làm"
                    input_type="date"
                    value=form.value(|f| f.start_date.clone())
                    on_input=form.on_input(|f, v| f.start_date = v)
                    on_blur=form.on_blur("ngayVaoLam")
                    error=form.error("ngayVaoLam")
                    disabled=locked
                />
                <RadioGroup
                    label="Giới tính"
                    name="staff-gender"
                    value=form.value(|f| f.gender.clone())
                    on_change=form.on_input(|f, v| f.gender = v)
                    options=GENDER_OPTIONS.to_vec()
                    disabled=locked
                />
                <Checkbox
                    label="Đang làm việc"
                    checked=form.checked(|f| f.active)
                    on_change=form.on_toggle(|f, v| f.active = v)
                    disabled=locked
                />
                <Textarea
                    label="Địa chỉ"
                    value=form.value(|f| f.address.clone())
                    on_input=form.on_input(|f, v| f.address = v)
                    on_blur=form.on_blur("diaChi")
                    error=form.error("diaChi")
                    disabled=locked
                    rows=2
                />
            </div>
        }
        .into_any()
    }

    fn modal_class() -> &'static str {
        "modal--wide"
    }

    /// The server hands out the next staff code
    fn prefill(form: FormHandle<StaffForm>) {
        spawn_local(async move {
            match generate_code().await {
                Ok(code) => form.edit(|f| {
                    if f.code.trim().is_empty() {
                        f.code = code;
                    }
                }),
                Err(err) => log::warn!("generate staff code: {}", err),
            }
        });
    }
}

#[component]
pub fn StaffList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    resource_list(ListPage::<Staff>::remote(), ctx)
}
