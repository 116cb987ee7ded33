//! Serial numbers: the global list and the per-product tab with bulk entry.

use contracts::domain::a009_product::aggregate::{Product, ProductRow};
use contracts::domain::a016_imei::aggregate::{
    availability_label, blank_form_for, bulk_path, Imei, ImeiBatch, ImeiForm, ImeiRow,
    PRODUCT_FILTER,
};
use contracts::domain::common::EntityId;
use contracts::shared::labels::format_datetime;
use contracts::shared::paging::{PageQuery, SortSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::{Badge, Checkbox, Input, Select, Textarea};
use crate::shared::form::FormHandle;
use crate::shared::http::{self, WriteVerb};
use crate::shared::icons::icon;
use crate::shared::list_store::ListStore;
use crate::shared::notifications::{use_notifier, Notifier};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use crate::shared::resource_page::{
    delete_dialog, form_modal, pager, resource_list, table, toolbar, Column, FilterDef, ListPage,
    ResourceView,
};

const PRODUCT_PAGE_SIZE: usize = 500;

/// Products offered in the IMEI form of the global list
#[derive(Clone, Copy)]
struct ProductChoices(RwSignal<Vec<(String, String)>>);

fn product_label(row: &ProductRow) -> String {
    format!("{} - {}", row.code, row.name)
}

fn load_products(choices: ProductChoices, notifier: Notifier) {
    spawn_local(async move {
        let query = PageQuery::new(SortSpec::asc("tenSanPham"), PRODUCT_PAGE_SIZE);
        match http::fetch_page::<Product>(&query).await {
            Ok(page) => {
                let options = page
                    .content
                    .iter()
                    .map(|p| (p.id.to_string(), product_label(p)))
                    .collect();
                let _ = choices.0.try_set(options);
            }
            Err(err) => notifier.api_error("Tải sản phẩm", &err),
        }
    });
}

impl ResourceView for Imei {
    fn search_placeholder() -> &'static str {
        "Tìm theo số IMEI..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![FilterDef::new(
            "trangThai",
            &[("", "Tất cả"), ("true", "Còn hàng"), ("false", "Đã bán")],
        )]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Số IMEI", "soImei"),
            Column::plain("Mã SP"),
            Column::plain("Sản phẩm"),
            Column::sortable("Ngày tạo", "ngayTao"),
            Column::sortable("Trạng thái", "trangThai"),
        ]
    }

    fn cells(row: &ImeiRow) -> AnyView {
        let variant = if row.active { "success" } else { "neutral" };
        let active = row.active;
        view! {
            <td class="table__cell table__cell--code">{row.imei.clone()}</td>
            <td class="table__cell">{row.product_code.clone()}</td>
            <td class="table__cell table__cell--name">{row.product_name.clone()}</td>
            <td class="table__cell">{format_datetime(&row.created_at)}</td>
            <td class="table__cell">
                <Badge variant=variant>{availability_label(active)}</Badge>
            </td>
        }
        .into_any()
    }

    fn form(form: FormHandle<ImeiForm>) -> AnyView {
        let locked = form.locked();
        let modal = form.modal;
        let product = use_context::<ProductChoices>().map(|choices| {
            view! {
                <Select
                    label="Sản phẩm"
                    value=Signal::derive(move || {
                        modal.with(|m| m.form.product_id.map(|id| id.to_string()).unwrap_or_default())
                    })
                    on_change=Callback::new(move |raw: String| {
                        form.edit(|f| f.product_id = raw.parse().ok());
                        modal.update(|m| m.touch(PRODUCT_FILTER));
                    })
                    options=Signal::derive(move || choices.0.get())
                    placeholder="-- Chọn sản phẩm --"
                    error=form.error(PRODUCT_FILTER)
                    disabled=locked
                    required=true
                />
            }
        });

        view! {
            <div class="form">
                <Input
                    label="Số IMEI"
                    value=form.value(|f| f.imei.clone())
                    on_input=form.on_input(|f, v| f.imei = v)
                    on_blur=form.on_blur("soImei")
                    error=form.error("soImei")
                    placeholder="15 chữ số"
                    disabled=locked
                    required=true
                />
                {product}
                <Checkbox
                    label="Còn hàng"
                    checked=form.checked(|f| f.active)
                    on_change=form.on_toggle(|f, v| f.active = v)
                    disabled=locked
                />
            </div>
        }
        .into_any()
    }

    fn delete_question(row: &ImeiRow) -> String {
        format!("Xóa IMEI {}?", row.imei)
    }
}

#[component]
pub fn ImeiList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let choices = ProductChoices(RwSignal::new(Vec::new()));
    load_products(choices, use_notifier());
    provide_context(choices);

    resource_list(ListPage::<Imei>::remote(), ctx)
}

/// Sends the accepted serials of a pasted block in one request
fn submit_batch(page: ListPage<Imei>, product_id: EntityId, raw: RwSignal<String>, busy: RwSignal<bool>) {
    let batch = ImeiBatch::parse(&raw.get_untracked());
    if batch.accepted.is_empty() {
        page.notifier.warning("Không có IMEI hợp lệ để thêm");
        return;
    }
    busy.set(true);
    spawn_local(async move {
        let requests = batch.requests(product_id);
        match http::write_json(WriteVerb::Post, &bulk_path(), &requests).await {
            Ok(_) => {
                page.notifier
                    .success(format!("Đã thêm {} IMEI", requests.len()));
                if batch.rejected.is_empty() {
                    let _ = raw.try_set(String::new());
                } else {
                    // keep only what still needs fixing
                    let left = batch
                        .rejected
                        .iter()
                        .map(|(imei, _)| imei.as_str())
                        .collect::<Vec<_>>()
                        .join("\n");
                    let _ = raw.try_set(left);
                }
                page.store.fetch();
            }
            Err(err) => page.notifier.api_error("Thêm IMEI hàng loạt", &err),
        }
        let _ = busy.try_set(false);
    });
}

#[component]
pub fn ProductImeiList(product_id: EntityId) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifier = use_notifier();
    let page = ListPage::<Imei>::new(ListStore::remote(notifier));
    page.store.set_scope(PRODUCT_FILTER, product_id.to_string());

    let product = RwSignal::new(None::<ProductRow>);
    spawn_local(async move {
        match http::get_one::<Product>(product_id).await {
            Ok(row) => {
                let _ = product.try_set(Some(row));
            }
            Err(err) => notifier.api_error("Tải sản phẩm", &err),
        }
    });

    let raw = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let preview = Memo::new(move |_| raw.with(|r| ImeiBatch::parse(r)));

    view! {
        <PageFrame page_id="a016_imei--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"IMEI sản phẩm"</h1>
                    {move || product.get().map(|p| view! {
                        <div class="page__subtitle">
                            <span class="page__subtitle-strong">{p.name.clone()}</span>
                            <span>{p.code.clone()}</span>
                            <span>{format!("Tồn kho: {}", p.stock)}</span>
                        </div>
                    })}
                </div>
                <div class="page__header-right">
                    <button class="button button--primary"
                        on:click=move |_| page.open_add_with(blank_form_for(Some(product_id)))>
                        {icon("plus")}
                        "Thêm IMEI"
                    </button>
                </div>
            </div>
            <div class="page__content">
                <div class="bulk-entry">
                    <Textarea
                        label="Nhập nhiều IMEI"
                        value=Signal::derive(move || raw.get())
                        on_input=Callback::new(move |v: String| raw.set(v))
                        placeholder="Mỗi dòng một IMEI, hoặc phân cách bằng dấu phẩy"
                        disabled=Signal::derive(move || busy.get())
                        rows=4
                    />
                    <div class="bulk-entry__summary">
                        {move || preview.with(|b| format!(
                            "{} hợp lệ, {} bị loại", b.accepted.len(), b.rejected.len()
                        ))}
                        <button class="button button--secondary"
                            disabled=move || busy.get() || preview.with(|b| b.accepted.is_empty())
                            on:click=move |_| submit_batch(page, product_id, raw, busy)>
                            {move || if busy.get() { "Đang thêm..." } else { "Thêm hàng loạt" }}
                        </button>
                    </div>
                    <ul class="bulk-entry__rejected">
                        {move || preview.with(|b| b.rejected.iter().map(|(imei, reason)| view! {
                            <li><code>{imei.clone()}</code>": "{reason.clone()}</li>
                        }).collect_view())}
                    </ul>
                </div>
                {toolbar(page)}
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_label() {
        let dto = serde_json::json!({
            "id": 4,
            "maSanPham": "SP004",
            "tenSanPham": "Mũ fullface"
        });
        let row = <Product as contracts::domain::common::Resource>::to_row(
            serde_json::from_value(dto).unwrap(),
        );
        assert_eq!(product_label(&row), "SP004 - Mũ fullface");
    }
}
