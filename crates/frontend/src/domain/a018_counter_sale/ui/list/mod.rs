//! Walk-in sales: history table plus the cart form used to ring up a sale.
//!
//! Sales live in the browser; the product search in the cart goes to the
//! store API so prices and stock come from the catalog.

use contracts::domain::a009_product::aggregate::Product;
use contracts::domain::a018_counter_sale::aggregate::{
    new_sale_form, sample_store, CounterSale, CounterSaleForm, CounterSaleResource,
    PaymentMethod, PaymentStatus, SaleStatus, PAYMENT_METHOD_FILTER, PAYMENT_STATUS_FILTER,
    STATUS_FILTER,
};
use contracts::domain::common::EntityId;
use contracts::shared::cart::CartProduct;
use contracts::shared::labels::{format_datetime, format_vnd};
use contracts::shared::local_store::LocalStore;
use contracts::shared::paging::{PageQuery, SortSpec};
use contracts::shared::validation::rules;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::{Input, Select, StatusBadge, Textarea};
use crate::shared::date_utils::today;
use crate::shared::form::FormHandle;
use crate::shared::http;
use crate::shared::icons::icon;
use crate::shared::list_store::ListStore;
use crate::shared::list_utils::SearchInput;
use crate::shared::notifications::use_notifier;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::resource_page::{
    delete_dialog, form_modal, pager, table, toolbar, Column, FilterDef, ListPage, ResourceView,
};

const SEARCH_RESULTS: usize = 8;

fn options<T: Copy>(all: &[T], code: fn(&T) -> &'static str, label: fn(&T) -> &'static str) -> Vec<(String, String)> {
    all.iter()
        .map(|v| (code(v).to_string(), label(v).to_string()))
        .collect()
}

fn by_code<T: Copy>(all: &[T], code: fn(&T) -> &'static str, raw: &str) -> Option<T> {
    all.iter().copied().find(|v| code(v) == raw)
}

fn filter_of<T: Copy>(
    key: &'static str,
    all_label: &str,
    all: &[T],
    code: fn(&T) -> &'static str,
    label: fn(&T) -> &'static str,
) -> FilterDef {
    let mut entries = vec![(String::new(), all_label.to_string())];
    entries.extend(options(all, code, label));
    FilterDef {
        key,
        options: entries,
    }
}

impl ResourceView for CounterSaleResource {
    fn search_placeholder() -> &'static str {
        "Tìm theo mã đơn, tên hoặc số điện thoại khách..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![
            filter_of(STATUS_FILTER, "Tất cả trạng thái", &SaleStatus::ALL, SaleStatus::code, SaleStatus::label),
            filter_of(
                PAYMENT_STATUS_FILTER,
                "Tất cả thanh toán",
                &PaymentStatus::ALL,
                PaymentStatus::code,
                PaymentStatus::label,
            ),
            filter_of(
                PAYMENT_METHOD_FILTER,
                "Tất cả phương thức",
                &PaymentMethod::ALL,
                PaymentMethod::code,
                PaymentMethod::label,
            ),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Mã đơn", "saleNumber"),
            Column::sortable("Khách hàng", "customerName"),
            Column::plain("Nhân viên"),
            Column::plain("Số SP"),
            Column::sortable("Tổng tiền", "totalAmount"),
            Column::plain("Phương thức"),
            Column::plain("Thanh toán"),
            Column::plain("Trạng thái"),
            Column::sortable("Thời gian", "createdAt"),
        ]
    }

    fn cells(row: &CounterSale) -> AnyView {
        let customer = if row.customer_name.is_empty() {
            "Khách lẻ".to_string()
        } else {
            row.customer_name.clone()
        };
        view! {
            <td class="table__cell table__cell--code">{row.sale_number.clone()}</td>
            <td class="table__cell table__cell--name">
                {customer}
                <div class="table__cell--muted">{row.customer_phone.clone()}</div>
            </td>
            <td class="table__cell">{row.staff_name.clone()}</td>
            <td class="table__cell table__cell--number">{row.item_count()}</td>
            <td class="table__cell table__cell--number">{format_vnd(row.total_amount)}</td>
            <td class="table__cell">{row.payment_method.label()}</td>
            <td class="table__cell">
                <StatusBadge class=row.payment_status.badge_class() label=row.payment_status.label() />
            </td>
            <td class="table__cell">
                <StatusBadge class=row.status.badge_class() label=row.status.label() />
            </td>
            <td class="table__cell">{format_datetime(&row.created_at)}</td>
        }
        .into_any()
    }

    fn form(form: FormHandle<CounterSaleForm>) -> AnyView {
        let locked = form.locked();
        let modal = form.modal;

        view! {
            <div class="sale-form">
                <div class="form form--two-columns">
                    <Input
                        label="Mã đơn"
                        value=form.value(|f| f.sale_number.clone())
                        error=form.error("saleNumber")
                        disabled=true
                    />
                    <Input
                        label="Nhân viên bán"
                        value=form.value(|f| f.staff_name.clone())
                        on_input=form.on_input(|f, v| f.staff_name = v)
                        on_blur=form.on_blur("staffName")
                        error=form.error("staffName")
                        disabled=locked
                        required=true
                    />
                    <Input
                        label="Tên khách hàng"
                        value=form.value(|f| f.customer_name.clone())
                        on_input=form.on_input(|f, v| f.customer_name = v)
                        on_blur=form.on_blur("customerName")
                        error=form.error("customerName")
                        placeholder="Khách lẻ"
                        disabled=locked
                    />
                    <Input
                        label="Số điện thoại"
                        input_type="tel"
                        value=form.value(|f| f.customer_phone.clone())
                        on_input=form.on_input(|f, v| f.customer_phone = v)
                        on_blur=form.on_blur("customerPhone")
                        error=form.error("customerPhone")
                        disabled=locked
                    />
                    <Select
                        label="Phương thức thanh toán"
                        value=Signal::derive(move || modal.with(|m| m.form.payment_method.code().to_string()))
                        on_change=Callback::new(move |raw: String| {
                            if let Some(v) = by_code(&PaymentMethod::ALL, PaymentMethod::code, &raw) {
                                form.edit(|f| f.payment_method = v);
                            }
                        })
                        options=Signal::stored(options(&PaymentMethod::ALL, PaymentMethod::code, PaymentMethod::label))
                        disabled=locked
                    />
                    <Select
                        label="Trạng thái thanh toán"
                        value=Signal::derive(move || modal.with(|m| m.form.payment_status.code().to_string()))
                        on_change=Callback::new(move |raw: String| {
                            if let Some(v) = by_code(&PaymentStatus::ALL, PaymentStatus::code, &raw) {
                                form.edit(|f| f.payment_status = v);
                            }
                        })
                        options=Signal::stored(options(&PaymentStatus::ALL, PaymentStatus::code, PaymentStatus::label))
                        disabled=locked
                    />
                    <Select
                        label="Trạng thái đơn"
                        value=Signal::derive(move || modal.with(|m| m.form.status.code().to_string()))
                        on_change=Callback::new(move |raw: String| {
                            if let Some(v) = by_code(&SaleStatus::ALL, SaleStatus::code, &raw) {
                                form.edit(|f| f.status = v);
                            }
                        })
                        options=Signal::stored(options(&SaleStatus::ALL, SaleStatus::code, SaleStatus::label))
                        disabled=locked
                    />
                    <Textarea
                        label="Ghi chú"
                        max_len=rules::DESCRIPTION_MAX
                        value=form.value(|f| f.notes.clone())
                        on_input=form.on_input(|f, v| f.notes = v)
                        on_blur=form.on_blur("notes")
                        error=form.error("notes")
                        disabled=locked
                        rows=2
                    />
                </div>
                <Show when=move || !locked.get()>
                    <ProductSearch on_pick=Callback::new(move |product: CartProduct| {
                        form.edit(|f| f.cart.add(product));
                        modal.update(|m| m.touch("items"));
                    }) />
                </Show>
                {cart_table(form)}
            </div>
        }
        .into_any()
    }

    fn modal_class() -> &'static str {
        "modal--wide"
    }

    fn delete_question(row: &CounterSale) -> String {
        format!("Xóa đơn {}?", row.sale_number)
    }
}

/// Catalog search; picking a result adds it to the cart
#[component]
fn ProductSearch(on_pick: Callback<CartProduct>) -> impl IntoView {
    let notifier = use_notifier();
    let keyword = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<CartProduct>::new());
    // Only the answer to the latest keyword is shown
    let generation = StoredValue::new(0u64);

    let search = move |text: String| {
        keyword.set(text.clone());
        if text.trim().is_empty() {
            results.set(Vec::new());
            return;
        }
        generation.update_value(|g| *g += 1);
        let issued = generation.get_value();
        spawn_local(async move {
            let mut query = PageQuery::new(SortSpec::asc("tenSanPham"), SEARCH_RESULTS);
            query.keyword = text;
            query.filters.insert("trangThai".to_string(), "true".to_string());
            match http::fetch_page::<Product>(&query).await {
                Ok(page) => {
                    if generation.try_get_value() == Some(issued) {
                        let found = page.content.iter().map(|p| p.to_cart_product()).collect();
                        let _ = results.try_set(found);
                    }
                }
                Err(err) => notifier.api_error("Tìm sản phẩm", &err),
            }
        });
    };

    view! {
        <div class="product-search">
            <SearchInput
                value=Signal::derive(move || keyword.get())
                on_change=Callback::new(search)
                placeholder="Tìm sản phẩm để thêm vào giỏ..."
            />
            <ul class="product-search__results">
                {move || results.get().into_iter().map(|product| {
                    let out_of_stock = product.stock == 0;
                    let label = format!("{} - {}", product.code, product.name);
                    let price = format_vnd(product.unit_price);
                    let stock = format!("Tồn: {}", product.stock);
                    view! {
                        <li class="product-search__item" class:product-search__item--disabled=out_of_stock>
                            <span class="product-search__name">{label}</span>
                            <span class="product-search__price">{price}</span>
                            <span class="product-search__stock">{stock}</span>
                            <button class="button button--icon" title="Thêm vào giỏ"
                                disabled=out_of_stock
                                on:click=move |_| on_pick.run(product.clone())>
                                {icon("plus")}
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}

fn number_input(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

fn cart_table(form: FormHandle<CounterSaleForm>) -> AnyView {
    let modal = form.modal;
    let locked = form.locked();
    let items_error = form.error("items");
    let totals = Signal::derive(move || modal.with(|m| m.form.cart.totals()));
    let tax_percent = Signal::derive(move || modal.with(|m| m.form.cart.tax_percent()));

    let set_quantity = move |id: EntityId, raw: String| {
        if let Some(q) = number_input(&raw) {
            form.edit(|f| f.cart.set_quantity(id, q.max(0.0) as u32));
        }
    };
    let set_discount = move |id: EntityId, raw: String| {
        if let Some(d) = number_input(&raw) {
            form.edit(|f| f.cart.set_discount(id, d));
        }
    };

    view! {
        <div class="cart">
            <table class="table__data cart__table">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell">"Sản phẩm"</th>
                        <th class="table__header-cell">"Đơn giá"</th>
                        <th class="table__header-cell">"SL"</th>
                        <th class="table__header-cell">"Giảm (%)"</th>
                        <th class="table__header-cell">"Thành tiền"</th>
                        <th class="table__header-cell"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || modal.with(|m| {
                        if m.form.cart.is_empty() {
                            return view! {
                                <tr><td class="table__cell table__cell--empty" colspan=6>"Giỏ hàng trống"</td></tr>
                            }.into_any();
                        }
                        m.form.cart.lines().iter().map(|line| {
                            let id = line.product.product_id;
                            let over = line.quantity > line.product.stock;
                            view! {
                                <tr class="table__row" class:cart__row--over=over>
                                    <td class="table__cell table__cell--name">
                                        {line.product.name.clone()}
                                        <div class="table__cell--muted">{line.product.code.clone()}</div>
                                    </td>
                                    <td class="table__cell table__cell--number">{format_vnd(line.product.unit_price)}</td>
                                    <td class="table__cell">
                                        <input class="form__input cart__qty" type="number" min="1"
                                            prop:value=line.quantity.to_string()
                                            disabled=move || locked.get()
                                            on:change=move |ev| set_quantity(id, event_target_value(&ev)) />
                                    </td>
                                    <td class="table__cell">
                                        <input class="form__input cart__discount" type="number" min="0" max="100"
                                            prop:value=line.discount_percent.to_string()
                                            disabled=move || locked.get()
                                            on:change=move |ev| set_discount(id, event_target_value(&ev)) />
                                    </td>
                                    <td class="table__cell table__cell--number">{format_vnd(line.net())}</td>
                                    <td class="table__cell table__cell--actions">
                                        <button class="button button--icon button--icon-danger" title="Bỏ khỏi giỏ"
                                            disabled=move || locked.get()
                                            on:click=move |_| form.edit(|f| f.cart.remove(id))>
                                            {icon("x")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view().into_any()
                    })}
                </tbody>
            </table>
            {move || items_error.get().map(|e| view! {
                <div class="form__error">{e}</div>
            })}
            <div class="cart__totals">
                <div class="cart__totals-row">
                    <span>"Tạm tính"</span><span>{move || format_vnd(totals.get().subtotal)}</span>
                </div>
                <div class="cart__totals-row">
                    <span>"Giảm giá"</span><span>{move || format!("-{}", format_vnd(totals.get().discount))}</span>
                </div>
                <div class="cart__totals-row">
                    <span>
                        "Thuế VAT ("
                        <input class="form__input cart__tax" type="number" min="0" max="100"
                            prop:value=move || tax_percent.get().to_string()
                            disabled=move || locked.get()
                            on:change=move |ev| {
                                if let Some(p) = number_input(&event_target_value(&ev)) {
                                    form.edit(|f| f.cart.set_tax_percent(p));
                                }
                            } />
                        "%)"
                    </span>
                    <span>{move || format_vnd(totals.get().tax)}</span>
                </div>
                <div class="cart__totals-row cart__totals-row--grand">
                    <span>"Tổng cộng"</span><span>{move || format_vnd(totals.get().total)}</span>
                </div>
            </div>
        </div>
    }
    .into_any()
}

#[component]
pub fn CounterSaleList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let sales: StoredValue<LocalStore<CounterSale>> = StoredValue::new(sample_store());
    let page = ListPage::<CounterSaleResource>::new(ListStore::local(sales, use_notifier()));
    page.store.load_if_needed();
    let store = page.store;

    let new_sale = move |_| {
        let form = sales.with_value(|s| new_sale_form(today(), s.items()));
        page.open_add_with(form);
    };
    let revenue = Signal::derive(move || {
        store.state.track();
        sales.with_value(|s| {
            s.items()
                .iter()
                .filter(|sale| sale.status == SaleStatus::Completed)
                .map(|sale| sale.total_amount)
                .sum::<f64>()
        })
    });

    view! {
        <PageFrame page_id="a018_counter_sale--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Bán hàng tại quầy"</h1>
                    <span class="page__count">
                        {move || format!("{} đơn", store.state.with(|s| s.total_elements))}
                    </span>
                    <span class="page__count">
                        {move || format!("Doanh thu: {}", format_vnd(revenue.get()))}
                    </span>
                </div>
                <div class="page__header-right">
                    <button class="button button--primary" on:click=new_sale>
                        {icon("shopping-cart")}
                        "Tạo đơn mới"
                    </button>
                </div>
            </div>
            <div class="page__content">
                {toolbar(page)}
                {table(page, ctx)}
                {pager(page)}
            </div>
            {form_modal(page)}
            {delete_dialog(page)}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_code() {
        assert_eq!(
            by_code(&PaymentMethod::ALL, PaymentMethod::code, "transfer"),
            Some(PaymentMethod::Transfer)
        );
        assert_eq!(by_code(&SaleStatus::ALL, SaleStatus::code, "unknown"), None);
    }

    #[test]
    fn test_filters_start_with_all() {
        let filters = CounterSaleResource::filters();
        assert_eq!(filters.len(), 3);
        assert!(filters.iter().all(|f| f.options[0].0.is_empty()));
        assert_eq!(filters[1].options[2].0, "paid");
    }

    #[test]
    fn test_number_input() {
        assert_eq!(number_input(" 2,5 "), Some(2.5));
        assert_eq!(number_input("abc"), None);
    }
}
