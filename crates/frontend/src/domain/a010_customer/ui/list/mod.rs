use contracts::domain::a010_customer::aggregate::{Customer, CustomerForm, CustomerRow};
use contracts::shared::labels::{format_date, gender_label};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_tab_label, CUSTOMER_ADDRESSES_PREFIX};
use crate::shared::components::ui::{ActiveBadge, Checkbox, Input, RadioGroup};
use crate::shared::form::FormHandle;
use crate::shared::icons::icon;
use crate::shared::resource_page::{resource_list, Column, FilterDef, ListPage, ResourceView};

pub const GENDER_OPTIONS: [(&str, &str); 2] = [("true", "Nam"), ("false", "Nữ")];

impl ResourceView for Customer {
    fn search_placeholder() -> &'static str {
        "Tìm theo tên, email hoặc số điện thoại..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![
            FilterDef::active(),
            FilterDef::new(
                "gioiTinh",
                &[("", "Tất cả giới tính"), ("true", "Nam"), ("false", "Nữ")],
            ),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Mã KH", "maKhachHang"),
            Column::sortable("Tên khách hàng", "tenKhachHang"),
            Column::plain("Email"),
            Column::plain("Số điện thoại"),
            Column::plain("Giới tính"),
            Column::sortable("Ngày sinh", "ngaySinh"),
            Column::plain("Địa chỉ mặc định"),
            Column::sortable("Trạng thái", "trangThai"),
        ]
    }

    fn cells(row: &CustomerRow) -> AnyView {
        view! {
            <td class="table__cell table__cell--code">{row.code.clone()}</td>
            <td class="table__cell table__cell--name">{row.name.clone()}</td>
            <td class="table__cell">{row.email.clone()}</td>
            <td class="table__cell">{row.phone.clone()}</td>
            <td class="table__cell">{gender_label(row.male)}</td>
            <td class="table__cell">{format_date(&row.birth_date)}</td>
            <td class="table__cell table__cell--muted">{row.address.clone()}</td>
            <td class="table__cell"><ActiveBadge active=row.active /></td>
        }
        .into_any()
    }

    fn form(form: FormHandle<CustomerForm>) -> AnyView {
        let locked = form.locked();
        view! {
            <div class="form form--two-columns">
                <Input
                    label="Mã khách hàng"
                    value=form.value(|f| f.code.clone())
                    on_input=form.on_input(|f, v| f.code = v)
                    placeholder="Để trống để hệ thống tự sinh"
                    disabled=locked
                />
                <Input
                    label="Tên khách hàng"
                    value=form.value(|f| f.name.clone())
                    on_input=form.on_input(|f, v| f.name = v)
                    on_blur=form.on_blur("tenKhachHang")
                    error=form.error("tenKhachHang")
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
                <RadioGroup
                    label="Giới tính"
                    name="customer-gender"
                    value=form.value(|f| f.gender.clone())
                    on_change=form.on_input(|f, v| f.gender = v)
                    options=GENDER_OPTIONS.to_vec()
                    disabled=locked
                />
                <Checkbox
                    label="Hoạt động"
                    checked=form.checked(|f| f.active)
                    on_change=form.on_toggle(|f, v| f.active = v)
                    disabled=locked
                />
            </div>
        }
        .into_any()
    }

    fn modal_class() -> &'static str {
        "modal--wide"
    }

    fn row_actions(row: &CustomerRow, ctx: AppGlobalContext) -> Option<AnyView> {
        let key = format!("{}{}", CUSTOMER_ADDRESSES_PREFIX, row.id);
        let title = detail_tab_label("Địa chỉ", &row.name);
        Some(
            view! {
                <button class="button button--icon" title="Địa chỉ giao hàng"
                    on:click=move |_| ctx.open_tab(&key, &title)>
                    {icon("map-pin")}
                </button>
            }
            .into_any(),
        )
    }
}

#[component]
pub fn CustomerList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    resource_list(ListPage::<Customer>::remote(), ctx)
}
