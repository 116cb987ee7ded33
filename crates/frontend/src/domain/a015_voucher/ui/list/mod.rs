use contracts::domain::a010_customer::aggregate::{Customer, CustomerRow};
use contracts::domain::a015_voucher::aggregate::{
    audience_label, Voucher, VoucherForm, VoucherRow, AUDIENCE_FILTER,
};
use contracts::shared::code_gen::voucher_code;
use contracts::shared::labels::{format_date, format_number, format_vnd};
use contracts::shared::paging::{PageQuery, SortSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::{Badge, Checkbox, Input, RadioGroup, StatusBadge};
use crate::shared::date_utils::{default_window, today};
use crate::shared::form::FormHandle;
use crate::shared::http;
use crate::shared::notifications::use_notifier;
use crate::shared::resource_page::{resource_list, Column, FilterDef, ListPage, ResourceView};

const DEFAULT_DAYS: i64 = 30;
const CUSTOMER_PAGE_SIZE: usize = 500;

const KIND_OPTIONS: [(&str, &str); 2] = [("false", "Phần trăm"), ("true", "Tiền mặt")];
const AUDIENCE_OPTIONS: [(&str, &str); 2] = [("true", "Công khai"), ("false", "Cá nhân")];

/// Active customers a personal voucher can be assigned to
#[derive(Clone, Copy)]
struct CustomerChoices(RwSignal<Vec<CustomerRow>>);

fn load_customers(choices: CustomerChoices) {
    let notifier = use_notifier();
    spawn_local(async move {
        let mut query = PageQuery::new(SortSpec::asc("tenKhachHang"), CUSTOMER_PAGE_SIZE);
        query.filters.insert("trangThai".to_string(), "true".to_string());
        match http::fetch_page::<Customer>(&query).await {
            Ok(page) => {
                let _ = choices.0.try_set(page.content);
            }
            Err(err) => notifier.api_error("Tải khách hàng", &err),
        }
    });
}

fn customer_picker(form: FormHandle<VoucherForm>, choices: CustomerChoices) -> AnyView {
    let modal = form.modal;
    let locked = form.locked();
    let selected_count = Signal::derive(move || modal.with(|m| m.form.customer_ids.len()));
    let error = form.error("selectedCustomerIds");

    view! {
        <div class="form__group form__group--full">
            <label class="form__label">
                {move || format!("Khách hàng được nhận ({} đã chọn)", selected_count.get())}
            </label>
            <div class="checklist">
                {move || choices.0.with(|customers| customers.iter().map(|c| {
                    let id = c.id;
                    let checked = Signal::derive(move || modal.with(|m| m.form.customer_ids.contains(&id)));
                    view! {
                        <Checkbox
                            label=format!("{} - {} ({})", c.code, c.name, c.phone)
                            checked=checked
                            on_change=Callback::new(move |_| {
                                form.edit(|f| f.toggle_customer(id));
                                modal.update(|m| m.touch("selectedCustomerIds"));
                            })
                            disabled=locked
                        />
                    }
                }).collect_view())}
            </div>
            {move || error.get().map(|e| view! {
                <span class="form__error">{e}</span>
            })}
        </div>
    }
    .into_any()
}

impl ResourceView for Voucher {
    fn search_placeholder() -> &'static str {
        "Tìm theo mã hoặc tên phiếu giảm giá..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![
            FilterDef::active(),
            FilterDef::new(
                AUDIENCE_FILTER,
                &[("", "Tất cả đối tượng"), ("true", "Công khai"), ("false", "Cá nhân")],
            ),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Mã phiếu", "maPhieu"),
            Column::sortable("Tên phiếu", "tenPhieuGiamGia"),
            Column::plain("Loại"),
            Column::plain("Giá trị"),
            Column::plain("Đơn tối thiểu"),
            Column::sortable("Số lượng", "soLuongDung"),
            Column::sortable("Kết thúc", "ngayKetThuc"),
            Column::plain("Đối tượng"),
            Column::plain("Tình trạng"),
        ]
    }

    fn cells(row: &VoucherRow) -> AnyView {
        let phase = row.phase(today());
        let audience = if row.is_public { "primary" } else { "neutral" };
        let is_public = row.is_public;
        view! {
            <td class="table__cell table__cell--code">{row.code.clone()}</td>
            <td class="table__cell table__cell--name">{row.name.clone()}</td>
            <td class="table__cell">{row.kind_label()}</td>
            <td class="table__cell table__cell--number">{row.value_label()}</td>
            <td class="table__cell table__cell--number">{format_vnd(row.min_invoice)}</td>
            <td class="table__cell table__cell--number">{format_number(row.quantity as f64)}</td>
            <td class="table__cell">{format_date(&row.end)}</td>
            <td class="table__cell">
                <Badge variant=audience>{audience_label(is_public)}</Badge>
            </td>
            <td class="table__cell">
                <StatusBadge class=phase.badge_class() label=phase.label() />
            </td>
        }
        .into_any()
    }

    fn form(form: FormHandle<VoucherForm>) -> AnyView {
        let locked = form.locked();
        let modal = form.modal;
        let fixed = Signal::derive(move || modal.with(|m| m.form.fixed_amount));
        let personal = Signal::derive(move || modal.with(|m| !m.form.is_public));
        let choices = use_context::<CustomerChoices>();

        view! {
            <div class="form form--two-columns">
                <Input
                    label="Mã phiếu"
                    value=form.value(|f| f.code.clone())
                    on_input=form.on_input(|f, v| f.code = v)
                    on_blur=form.on_blur("maPhieu")
                    error=form.error("maPhieu")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Tên phiếu giảm giá"
                    value=form.value(|f| f.name.clone())
                    on_input=form.on_input(|f, v| f.name = v)
                    on_blur=form.on_blur("tenPhieuGiamGia")
                    error=form.error("tenPhieuGiamGia")
                    disabled=locked
                    required=true
                />
                <RadioGroup
                    label="Loại phiếu"
                    name="voucher-kind"
                    value=Signal::derive(move || fixed.get().to_string())
                    on_change=Callback::new(move |v: String| form.edit(|f| f.fixed_amount = v == "true"))
                    options=KIND_OPTIONS.to_vec()
                    disabled=locked
                />
                {move || {
                    let label = if fixed.get() { "Giá trị giảm (VNĐ)" } else { "Giá trị giảm (%)" };
                    view! {
                        <Input
                            label=label
                            input_type="number"
                            value=form.value(|f| f.value.clone())
                            on_input=form.on_input(|f, v| f.value = v)
                            on_blur=form.on_blur("giaTriGiam")
                            error=form.error("giaTriGiam")
                            disabled=locked
                            required=true
                        />
                    }
                }}
                <Show when=move || fixed.get()>
                    <Input
                        label="Số tiền giảm tối thiểu (VNĐ)"
                        input_type="number"
                        value=form.value(|f| f.min_discount.clone())
                        on_input=form.on_input(|f, v| f.min_discount = v)
                        on_blur=form.on_blur("giaTriToiThieu")
                        error=form.error("giaTriToiThieu")
                        disabled=locked
                    />
                </Show>
                <Input
                    label="Hóa đơn tối thiểu (VNĐ)"
                    input_type="number"
                    value=form.value(|f| f.min_invoice.clone())
                    on_input=form.on_input(|f, v| f.min_invoice = v)
                    on_blur=form.on_blur("hoaDonToiThieu")
                    error=form.error("hoaDonToiThieu")
                    disabled=locked
                />
                <Input
                    label="Số lượng"
                    input_type="number"
                    value=form.value(|f| f.quantity.clone())
                    on_input=form.on_input(|f, v| f.quantity = v)
                    on_blur=form.on_blur("soLuongDung")
                    error=form.error("soLuongDung")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Ngày bắt đầu"
                    input_type="date"
                    value=form.value(|f| f.start.clone())
                    on_input=form.on_input(|f, v| f.start = v)
                    on_blur=form.on_blur("ngayBatDau")
                    error=form.error("ngayBatDau")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Ngày kết thúc"
                    input_type="date"
                    value=form.value(|f| f.end.clone())
                    on_input=form.on_input(|f, v| f.end = v)
                    on_blur=form.on_blur("ngayKetThuc")
                    error=form.error("ngayKetThuc")
                    disabled=locked
                    required=true
                />
                <RadioGroup
                    label="Đối tượng áp dụng"
                    name="voucher-audience"
                    value=Signal::derive(move || (!personal.get()).to_string())
                    on_change=Callback::new(move |v: String| form.edit(|f| f.is_public = v == "true"))
                    options=AUDIENCE_OPTIONS.to_vec()
                    disabled=locked
                />
                <Checkbox
                    label="Hoạt động"
                    checked=form.checked(|f| f.active)
                    on_change=form.on_toggle(|f, v| f.active = v)
                    disabled=locked
                />
                {move || match (personal.get(), choices) {
                    (true, Some(choices)) => Some(customer_picker(form, choices)),
                    _ => None,
                }}
            </div>
        }
        .into_any()
    }

    fn modal_class() -> &'static str {
        "modal--wide"
    }

    fn prefill(form: FormHandle<VoucherForm>) {
        let code = voucher_code(&Uuid::new_v4().simple().to_string());
        let (start, end) = default_window(today(), DEFAULT_DAYS);
        form.edit(|f| {
            if f.code.is_empty() {
                f.code = code;
            }
            f.start = start;
            f.end = end;
        });
    }
}

#[component]
pub fn VoucherList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let choices = CustomerChoices(RwSignal::new(Vec::new()));
    load_customers(choices);
    provide_context(choices);

    resource_list(ListPage::<Voucher>::remote(), ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        let code = voucher_code(&Uuid::new_v4().simple().to_string());
        assert!(code.starts_with("PGG_"));
        assert_eq!(code.len(), 12);
    }
}
