use contracts::domain::a013_invoice::aggregate::{Invoice, InvoiceForm, InvoiceRow, InvoiceStatus};
use contracts::shared::labels::{format_datetime, format_vnd};
use leptos::prelude::*;

use crate::domain::a013_invoice::ui::form::invoice_form;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_tab_label, INVOICE_DETAIL_PREFIX};
use crate::shared::components::ui::StatusBadge;
use crate::shared::form::FormHandle;
use crate::shared::icons::icon;
use crate::shared::resource_page::{resource_list, Column, FilterDef, ListPage, ResourceView};

fn status_filter() -> FilterDef {
    let mut options = vec![(String::new(), "Tất cả trạng thái".to_string())];
    options.extend(
        InvoiceStatus::STEPS
            .iter()
            .map(|s| (s.code().to_string(), s.label().to_string())),
    );
    FilterDef {
        key: "trangThai",
        options,
    }
}

impl ResourceView for Invoice {
    fn search_placeholder() -> &'static str {
        "Tìm theo mã hóa đơn, tên hoặc số điện thoại khách hàng..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![status_filter()]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Mã HĐ", "maHoaDon"),
            Column::sortable("Khách hàng", "tenKhachHang"),
            Column::plain("Số điện thoại"),
            Column::plain("Nhân viên"),
            Column::sortable("Ngày tạo", "ngayTao"),
            Column::sortable("Thành tiền", "thanhTien"),
            Column::plain("Kênh bán"),
            Column::sortable("Trạng thái", "trangThai"),
        ]
    }

    fn cells(row: &InvoiceRow) -> AnyView {
        view! {
            <td class="table__cell table__cell--code">{row.code.clone()}</td>
            <td class="table__cell table__cell--name">{row.customer_name.clone()}</td>
            <td class="table__cell">{row.customer_phone.clone()}</td>
            <td class="table__cell">{row.staff_name.clone()}</td>
            <td class="table__cell">{format_datetime(&row.created_at)}</td>
            <td class="table__cell table__cell--number">{format_vnd(row.grand_total)}</td>
            <td class="table__cell">{row.channel.clone()}</td>
            <td class="table__cell">
                <StatusBadge class=row.status.badge_class() label=row.status.label() />
            </td>
        }
        .into_any()
    }

    fn form(form: FormHandle<InvoiceForm>) -> AnyView {
        invoice_form(form)
    }

    fn modal_class() -> &'static str {
        "modal--wide"
    }

    fn row_actions(row: &InvoiceRow, ctx: AppGlobalContext) -> Option<AnyView> {
        let key = format!("{}{}", INVOICE_DETAIL_PREFIX, row.id);
        let title = detail_tab_label("Hóa đơn", &row.code);
        Some(
            view! {
                <button class="button button--icon" title="Mở chi tiết hóa đơn"
                    on:click=move |_| ctx.open_tab(&key, &title)>
                    {icon("file-text")}
                </button>
            }
            .into_any(),
        )
    }

    fn delete_question(row: &InvoiceRow) -> String {
        format!("Xóa hóa đơn {}? Thao tác không thể hoàn tác.", row.code)
    }
}

#[component]
pub fn InvoiceList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    resource_list(ListPage::<Invoice>::remote(), ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_starts_with_all() {
        let filter = status_filter();
        assert_eq!(filter.key, "trangThai");
        assert_eq!(filter.options[0].0, "");
        assert_eq!(filter.options.len(), InvoiceStatus::STEPS.len() + 1);
        assert_eq!(filter.options[3].0, "DANG_GIAO_HANG");
    }
}
