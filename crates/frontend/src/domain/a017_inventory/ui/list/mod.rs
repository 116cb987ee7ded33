//! Warehouse stock kept in the browser, with summary cards over all items.

use contracts::domain::a017_inventory::aggregate::{
    locations, sample_store, Inventory, InventoryForm, InventoryItem, InventoryStats,
    InventoryStatus, LOCATION_FILTER, STATUS_FILTER,
};
use contracts::shared::labels::{format_date, format_number, format_vnd};
use contracts::shared::local_store::LocalStore;
use leptos::prelude::*;
use thaw::{Flex, FlexGap};

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::stat_card::{StatCard, StatTone};
use crate::shared::components::ui::{Input, StatusBadge};
use crate::shared::form::FormHandle;
use crate::shared::icons::icon;
use crate::shared::list_store::ListStore;
use crate::shared::notifications::use_notifier;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::resource_page::{
    delete_dialog, form_modal, pager, table, toolbar, Column, FilterDef, ListPage, ResourceView,
};

fn status_filter() -> FilterDef {
    let mut options = vec![(String::new(), "Tất cả trạng thái".to_string())];
    options.extend(
        InventoryStatus::ALL
            .iter()
            .map(|s| (s.code().to_string(), s.label().to_string())),
    );
    FilterDef {
        key: STATUS_FILTER,
        options,
    }
}

impl ResourceView for Inventory {
    fn search_placeholder() -> &'static str {
        "Tìm theo tên, mã sản phẩm, hãng hoặc vị trí..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![status_filter()]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Mã SP", "productCode"),
            Column::sortable("Sản phẩm", "productName"),
            Column::plain("Màu / Size"),
            Column::sortable("Tồn kho", "currentStock"),
            Column::plain("Min / Max"),
            Column::sortable("Đơn giá", "unitPrice"),
            Column::sortable("Giá trị", "totalValue"),
            Column::sortable("Vị trí", "location"),
            Column::sortable("Cập nhật", "lastUpdated"),
            Column::plain("Trạng thái"),
        ]
    }

    fn cells(row: &InventoryItem) -> AnyView {
        let status = row.status();
        view! {
            <td class="table__cell table__cell--code">{row.product_code.clone()}</td>
            <td class="table__cell table__cell--name">
                {row.product_name.clone()}
                <div class="table__cell--muted">{row.manufacturer.clone()}</div>
            </td>
            <td class="table__cell">{format!("{} / {}", row.color, row.size)}</td>
            <td class="table__cell table__cell--number">{row.current_stock}</td>
            <td class="table__cell table__cell--muted">{format!("{} / {}", row.min_stock, row.max_stock)}</td>
            <td class="table__cell table__cell--number">{format_vnd(row.unit_price)}</td>
            <td class="table__cell table__cell--number">{format_vnd(row.total_value())}</td>
            <td class="table__cell">{row.location.clone()}</td>
            <td class="table__cell">{format_date(&row.last_updated)}</td>
            <td class="table__cell">
                <StatusBadge class=status.badge_class() label=status.label() />
            </td>
        }
        .into_any()
    }

    fn form(form: FormHandle<InventoryForm>) -> AnyView {
        let locked = form.locked();
        let modal = form.modal;
        let preview = Signal::derive(move || modal.with(|m| m.form.preview_status()));

        view! {
            <div class="form form--two-columns">
                <Input
                    label="Mã sản phẩm"
                    value=form.value(|f| f.product_code.clone())
                    on_input=form.on_input(|f, v| f.product_code = v)
                    on_blur=form.on_blur("productCode")
                    error=form.error("productCode")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Tên sản phẩm"
                    value=form.value(|f| f.product_name.clone())
                    on_input=form.on_input(|f, v| f.product_name = v)
                    on_blur=form.on_blur("productName")
                    error=form.error("productName")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Hãng sản xuất"
                    value=form.value(|f| f.manufacturer.clone())
                    on_input=form.on_input(|f, v| f.manufacturer = v)
                    on_blur=form.on_blur("manufacturer")
                    error=form.error("manufacturer")
                    disabled=locked
                />
                <Input
                    label="Vị trí"
                    value=form.value(|f| f.location.clone())
                    on_input=form.on_input(|f, v| f.location = v)
                    on_blur=form.on_blur("location")
                    error=form.error("location")
                    placeholder="Kho A - Kệ 1"
                    disabled=locked
                    required=true
                />
                <Input
                    label="Màu sắc"
                    value=form.value(|f| f.color.clone())
                    on_input=form.on_input(|f, v| f.color = v)
                    on_blur=form.on_blur("color")
                    error=form.error("color")
                    disabled=locked
                />
                <Input
                    label="Kích cỡ"
                    value=form.value(|f| f.size.clone())
                    on_input=form.on_input(|f, v| f.size = v)
                    on_blur=form.on_blur("size")
                    error=form.error("size")
                    disabled=locked
                />
                <Input
                    label="Tồn kho hiện tại"
                    input_type="number"
                    value=form.value(|f| f.current_stock.clone())
                    on_input=form.on_input(|f, v| f.current_stock = v)
                    on_blur=form.on_blur("currentStock")
                    error=form.error("currentStock")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Đơn giá (VNĐ)"
                    input_type="number"
                    value=form.value(|f| f.unit_price.clone())
                    on_input=form.on_input(|f, v| f.unit_price = v)
                    on_blur=form.on_blur("unitPrice")
                    error=form.error("unitPrice")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Tồn kho tối thiểu"
                    input_type="number"
                    value=form.value(|f| f.min_stock.clone())
                    on_input=form.on_input(|f, v| f.min_stock = v)
                    on_blur=form.on_blur("minStock")
                    error=form.error("minStock")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Tồn kho tối đa"
                    input_type="number"
                    value=form.value(|f| f.max_stock.clone())
                    on_input=form.on_input(|f, v| f.max_stock = v)
                    on_blur=form.on_blur("maxStock")
                    error=form.error("maxStock")
                    disabled=locked
                    required=true
                />
                <div class="form__group">
                    <label class="form__label">"Trạng thái dự kiến"</label>
                    {move || preview.get().map(|s| view! {
                        <StatusBadge class=s.badge_class() label=s.label() />
                    })}
                </div>
            </div>
        }
        .into_any()
    }

    fn modal_class() -> &'static str {
        "modal--wide"
    }

    fn delete_question(row: &InventoryItem) -> String {
        format!("Xóa mặt hàng \"{}\" khỏi kho?", row.product_name)
    }
}

fn stats_cards(stats: Memo<InventoryStats>) -> impl IntoView {
    let count = move |pick: fn(&InventoryStats) -> usize| {
        Signal::derive(move || format_number(pick(&stats.get()) as f64))
    };
    view! {
        <Flex gap=FlexGap::Large class="stats-row">
            <StatCard label="Còn hàng" icon_name="package" value=count(|s| s.in_stock) tone=StatTone::Good />
            <StatCard label="Sắp hết" icon_name="alert-triangle" value=count(|s| s.low) tone=StatTone::Warning delay_ms=80 />
            <StatCard label="Hết hàng" icon_name="x-circle" value=count(|s| s.out) tone=StatTone::Bad delay_ms=160 />
            <StatCard label="Tồn kho cao" icon_name="layers" value=count(|s| s.overstock) delay_ms=240 />
            <StatCard
                label="Tổng giá trị"
                icon_name="warehouse"
                value=Signal::derive(move || format_vnd(stats.get().total_value))
                delay_ms=320
            />
        </Flex>
    }
}

#[component]
pub fn InventoryList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let items: StoredValue<LocalStore<InventoryItem>> = StoredValue::new(sample_store());
    let page = ListPage::<Inventory>::new(ListStore::local(items, use_notifier()));
    page.store.load_if_needed();

    // Each fetch follows a change of the store, so the page state is the trigger
    let stats = Memo::new(move |_| {
        page.store.state.track();
        items.with_value(|store| InventoryStats::of(store.items()))
    });
    let location_options = Memo::new(move |_| {
        page.store.state.track();
        items.with_value(|store| locations(store.items()))
    });
    let store = page.store;

    view! {
        <PageFrame page_id="a017_inventory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Quản lý tồn kho"</h1>
                    <span class="page__count">
                        {move || format!("{} mặt hàng", store.state.with(|s| s.total_elements))}
                    </span>
                </div>
                <div class="page__header-right">
                    <button class="button button--primary" on:click=move |_| page.open_add()>
                        {icon("plus")}
                        "Thêm mặt hàng"
                    </button>
                </div>
            </div>
            <div class="page__content">
                {stats_cards(stats)}
                <div class="page__toolbar-row">
                    {toolbar(page)}
                    <select
                        class="form__select page__filter"
                        prop:value=move || store.state.with(|s| s.filter(LOCATION_FILTER).to_string())
                        on:change=move |ev| store.set_filter(LOCATION_FILTER, event_target_value(&ev))
                    >
                        <option value="">"Tất cả vị trí"</option>
                        {move || location_options.get().into_iter().map(|location| view! {
                            <option value=location.clone()>{location.clone()}</option>
                        }).collect_view()}
                    </select>
                </div>
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
    fn test_status_filter_codes() {
        let filter = status_filter();
        let codes: Vec<&str> = filter.options.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(codes, vec!["", "in-stock", "low", "out", "overstock"]);
    }
}
