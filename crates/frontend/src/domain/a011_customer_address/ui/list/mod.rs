//! Delivery addresses of one customer, opened as its own tab from the customer list.

use contracts::domain::a010_customer::aggregate::{Customer, CustomerRow};
use contracts::domain::a011_customer_address::aggregate::{
    blank_form_for, default_label, set_default_path, AddressForm, AddressRow, CustomerAddress,
    CUSTOMER_FILTER,
};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::{ActiveBadge, Badge, Checkbox, Input};
use crate::shared::form::FormHandle;
use crate::shared::http;
use crate::shared::icons::icon;
use crate::shared::list_store::ListStore;
use crate::shared::notifications::use_notifier;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use crate::shared::resource_page::{
    delete_dialog, form_modal, pager, table, Column, FilterDef, ListPage, ResourceView,
};

impl ResourceView for CustomerAddress {
    fn filters() -> Vec<FilterDef> {
        Vec::new()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::plain("Người nhận"),
            Column::plain("Số điện thoại"),
            Column::plain("Địa chỉ"),
            Column::plain("Mặc định"),
            Column::plain("Trạng thái"),
        ]
    }

    fn cells(row: &AddressRow) -> AnyView {
        let variant = if row.is_default { "primary" } else { "neutral" };
        let is_default = row.is_default;
        view! {
            <td class="table__cell table__cell--name">{row.recipient.clone()}</td>
            <td class="table__cell">{row.phone.clone()}</td>
            <td class="table__cell">{row.full_address()}</td>
            <td class="table__cell">
                <Badge variant=variant>{default_label(is_default)}</Badge>
            </td>
            <td class="table__cell"><ActiveBadge active=row.active /></td>
        }
        .into_any()
    }

    fn form(form: FormHandle<AddressForm>) -> AnyView {
        let locked = form.locked();
        view! {
            <div class="form form--two-columns">
                <Input
                    label="Tên người nhận"
                    value=form.value(|f| f.recipient.clone())
                    on_input=form.on_input(|f, v| f.recipient = v)
                    on_blur=form.on_blur("tenNguoiNhan")
                    error=form.error("tenNguoiNhan")
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
                    label="Địa chỉ chi tiết"
                    value=form.value(|f| f.street.clone())
                    on_input=form.on_input(|f, v| f.street = v)
                    on_blur=form.on_blur("diaChiChiTiet")
                    error=form.error("diaChiChiTiet")
                    placeholder="Số nhà, tên đường"
                    disabled=locked
                    required=true
                />
                <Input
                    label="Phường/Xã"
                    value=form.value(|f| f.ward.clone())
                    on_input=form.on_input(|f, v| f.ward = v)
                    on_blur=form.on_blur("phuongXa")
                    error=form.error("phuongXa")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Quận/Huyện"
                    value=form.value(|f| f.district.clone())
                    on_input=form.on_input(|f, v| f.district = v)
                    on_blur=form.on_blur("quanHuyen")
                    error=form.error("quanHuyen")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Tỉnh/Thành phố"
                    value=form.value(|f| f.province.clone())
                    on_input=form.on_input(|f, v| f.province = v)
                    on_blur=form.on_blur("tinhThanh")
                    error=form.error("tinhThanh")
                    disabled=locked
                    required=true
                />
                <Checkbox
                    label="Đặt làm địa chỉ mặc định"
                    checked=form.checked(|f| f.is_default)
                    on_change=form.on_toggle(|f, v| f.is_default = v)
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

    fn row_actions(row: &AddressRow, _ctx: AppGlobalContext) -> Option<AnyView> {
        if row.is_default {
            return None;
        }
        let page = use_context::<ListPage<CustomerAddress>>()?;
        let path = set_default_path(row)?;
        Some(
            view! {
                <button class="button button--icon" title="Đặt làm mặc định"
                    on:click=move |_| set_default(page, path.clone())>
                    {icon("star")}
                </button>
            }
            .into_any(),
        )
    }

    fn delete_question(row: &AddressRow) -> String {
        format!("Xóa địa chỉ \"{}\"?", row.full_address())
    }
}

fn set_default(page: ListPage<CustomerAddress>, path: String) {
    spawn_local(async move {
        match http::put_empty(&path).await {
            Ok(_) => {
                page.notifier.success("Đã đặt địa chỉ mặc định");
                page.store.fetch();
            }
            Err(err) => page.notifier.api_error("Đặt địa chỉ mặc định", &err),
        }
    });
}

#[component]
pub fn CustomerAddressList(customer_id: EntityId) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifier = use_notifier();
    let page = ListPage::<CustomerAddress>::new(ListStore::remote(notifier));
    provide_context(page);
    page.store.set_scope(CUSTOMER_FILTER, customer_id.to_string());

    let customer = RwSignal::new(None::<CustomerRow>);
    spawn_local(async move {
        match http::get_one::<Customer>(customer_id).await {
            Ok(row) => {
                let _ = customer.try_set(Some(row));
            }
            Err(err) => notifier.api_error("Tải khách hàng", &err),
        }
    });

    let add = move |_| {
        let first = page.store.state.with_untracked(|s| s.is_loaded && s.items.is_empty());
        page.open_add_with(blank_form_for(Some(customer_id), first));
    };

    view! {
        <PageFrame page_id="a011_customer_address--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Địa chỉ khách hàng"</h1>
                    {move || customer.get().map(|c| view! {
                        <div class="page__subtitle">
                            <span class="page__subtitle-strong">{c.name}</span>
                            <span>{c.code}</span>
                            <span>{c.phone}</span>
                            <span>{c.email}</span>
                        </div>
                    })}
                </div>
                <div class="page__header-right">
                    <button class="button button--secondary" on:click=move |_| page.store.fetch() title="Tải lại">
                        {icon("refresh")}
                    </button>
                    <button class="button button--primary" on:click=add>
                        {icon("plus")}
                        "Thêm địa chỉ"
                    </button>
                </div>
            </div>
            <div class="page__content">
                {move || page.store.state.with(|s| s.error.clone()).map(|e| view! {
                    <div class="error-banner">{icon("alert-triangle")}{e}</div>
                })}
                {table(page, ctx)}
                {pager(page)}
            </div>
            {form_modal(page)}
            {delete_dialog(page)}
        </PageFrame>
    }
}
