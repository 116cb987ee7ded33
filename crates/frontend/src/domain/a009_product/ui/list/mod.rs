use contracts::domain::a009_product::aggregate::{
    suggest_code, Product, ProductAttribute, ProductForm, ProductRow,
};
use contracts::shared::labels::format_vnd;
use contracts::shared::paging::{PageQuery, SortSpec};
use contracts::shared::validation::rules;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::options::AttributeOptions;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_tab_label, PRODUCT_IMEI_PREFIX};
use crate::shared::components::ui::{ActiveBadge, Checkbox, Input, Select, Textarea};
use crate::shared::form::FormHandle;
use crate::shared::http;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifier;
use crate::shared::resource_page::{resource_list, Column, ListPage, ResourceView};

impl ResourceView for Product {
    fn search_placeholder() -> &'static str {
        "Tìm theo mã hoặc tên sản phẩm..."
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Mã SP", "maSanPham"),
            Column::sortable("Tên sản phẩm", "tenSanPham"),
            Column::plain("Loại mũ"),
            Column::plain("Nhà sản xuất"),
            Column::plain("Màu sắc"),
            Column::sortable("Giá bán", "giaBan"),
            Column::sortable("Tồn kho", "soLuongTon"),
            Column::sortable("Trạng thái", "trangThai"),
        ]
    }

    fn cells(row: &ProductRow) -> AnyView {
        view! {
            <td class="table__cell table__cell--code">{row.code.clone()}</td>
            <td class="table__cell table__cell--name">{row.name.clone()}</td>
            <td class="table__cell">{row.attribute(ProductAttribute::HelmetType).to_string()}</td>
            <td class="table__cell">{row.attribute(ProductAttribute::Manufacturer).to_string()}</td>
            <td class="table__cell">{row.attribute(ProductAttribute::Color).to_string()}</td>
            <td class="table__cell table__cell--number">{format_vnd(row.price)}</td>
            <td class="table__cell table__cell--number">{row.stock}</td>
            <td class="table__cell"><ActiveBadge active=row.active /></td>
        }
        .into_any()
    }

    fn form(form: FormHandle<ProductForm>) -> AnyView {
        let locked = form.locked();
        let options = use_context::<AttributeOptions>();

        view! {
            <div class="form form--two-columns">
                <Input
                    label="Mã sản phẩm"
                    value=form.value(|f| f.code.clone())
                    on_input=form.on_input(|f, v| f.code = v)
                    on_blur=form.on_blur("code")
                    error=form.error("code")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Tên sản phẩm"
                    value=form.value(|f| f.name.clone())
                    on_input=form.on_input(|f, v| f.name = v)
                    on_blur=form.on_blur("name")
                    error=form.error("name")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Giá bán (VNĐ)"
                    input_type="number"
                    value=form.value(|f| f.price.clone())
                    on_input=form.on_input(|f, v| f.price = v)
                    on_blur=form.on_blur("price")
                    error=form.error("price")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Số lượng tồn"
                    input_type="number"
                    value=form.value(|f| f.stock.clone())
                    on_input=form.on_input(|f, v| f.stock = v)
                    on_blur=form.on_blur("stock")
                    error=form.error("stock")
                    disabled=locked
                />
                {ProductAttribute::ALL.into_iter().map(|attribute| {
                    let modal = form.modal;
                    let value = Signal::derive(move || {
                        modal.with(|m| m.form.attribute(attribute).map(|id| id.to_string()).unwrap_or_default())
                    });
                    let choices = options
                        .map(|o| o.get(attribute))
                        .unwrap_or_else(|| Signal::stored(Vec::new()));
                    view! {
                        <Select
                            label=attribute.label()
                            value=value
                            on_change=Callback::new(move |raw: String| {
                                form.edit(|f| f.set_attribute(attribute, raw.parse().ok()));
                                modal.update(|m| m.touch(attribute.field()));
                            })
                            options=choices
                            placeholder=format!("-- Chọn {} --", attribute.label().to_lowercase())
                            error=form.error(attribute.field())
                            disabled=locked
                            required=true
                        />
                    }
                }).collect_view()}
                <Textarea
                    label="Mô tả"
                    max_len=rules::DESCRIPTION_MAX
                    value=form.value(|f| f.description.clone())
                    on_input=form.on_input(|f, v| f.description = v)
                    on_blur=form.on_blur("description")
                    error=form.error("description")
                    disabled=locked
                    rows=3
                />
                <Checkbox
                    label="Đang kinh doanh"
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

    /// Next code after the newest product
    fn prefill(form: FormHandle<ProductForm>) {
        spawn_local(async move {
            let query = PageQuery::new(SortSpec::desc("id"), 1);
            let latest = match http::fetch_page::<Product>(&query).await {
                Ok(page) => page.content.into_iter().next(),
                Err(err) => {
                    log::warn!("next product code: {}", err);
                    None
                }
            };
            let code = suggest_code(latest.as_ref());
            form.edit(|f| {
                if f.code.trim().is_empty() {
                    f.code = code;
                }
            });
        });
    }

    fn row_actions(row: &ProductRow, ctx: AppGlobalContext) -> Option<AnyView> {
        let key = format!("{}{}", PRODUCT_IMEI_PREFIX, row.id);
        let title = detail_tab_label("IMEI", &row.code);
        Some(
            view! {
                <button class="button button--icon" title="Quản lý IMEI"
                    on:click=move |_| ctx.open_tab(&key, &title)>
                    {icon("barcode")}
                </button>
            }
            .into_any(),
        )
    }
}

#[component]
pub fn ProductList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let options = AttributeOptions::new();
    options.load_all(use_notifier());
    provide_context(options);

    resource_list(ListPage::<Product>::remote(), ctx)
}
