use contracts::domain::a014_promotion::aggregate::{
    Promotion, PromotionForm, PromotionKind, PromotionRow,
};
use contracts::shared::code_gen::promotion_code;
use contracts::shared::labels::{format_date, format_number};
use contracts::shared::validation::rules;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::{Checkbox, Input, Select, StatusBadge, Textarea};
use crate::shared::date_utils::{default_window, today};
use crate::shared::form::FormHandle;
use crate::shared::resource_page::{resource_list, Column, FilterDef, ListPage, ResourceView};

/// Days a new promotion runs unless changed
const DEFAULT_DAYS: i64 = 30;

fn kind_options() -> Vec<(String, String)> {
    PromotionKind::ALL
        .iter()
        .map(|k| (k.code().to_string(), k.label().to_string()))
        .collect()
}

impl ResourceView for Promotion {
    fn search_placeholder() -> &'static str {
        "Tìm theo mã hoặc tên đợt giảm giá..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![
            FilterDef::active(),
            FilterDef::new(
                "loaiDotGiamGia",
                &[("", "Tất cả loại"), ("PHAN_TRAM", "Phần trăm"), ("SO_TIEN", "Số tiền")],
            ),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("Mã đợt", "maDotGiamGia"),
            Column::sortable("Tên đợt giảm giá", "tenDotGiamGia"),
            Column::plain("Loại"),
            Column::plain("Giá trị"),
            Column::sortable("Bắt đầu", "ngayBatDau"),
            Column::sortable("Kết thúc", "ngayKetThuc"),
            Column::plain("Số lượng"),
            Column::plain("Tình trạng"),
        ]
    }

    fn cells(row: &PromotionRow) -> AnyView {
        let phase = row.phase(today());
        view! {
            <td class="table__cell table__cell--code">{row.code.clone()}</td>
            <td class="table__cell table__cell--name">{row.name.clone()}</td>
            <td class="table__cell">{row.kind.label()}</td>
            <td class="table__cell table__cell--number">{row.value_label()}</td>
            <td class="table__cell">{format_date(&row.start)}</td>
            <td class="table__cell">{format_date(&row.end)}</td>
            <td class="table__cell table__cell--number">{format_number(row.usage_limit as f64)}</td>
            <td class="table__cell">
                <StatusBadge class=phase.badge_class() label=phase.label() />
            </td>
        }
        .into_any()
    }

    fn form(form: FormHandle<PromotionForm>) -> AnyView {
        let locked = form.locked();
        let modal = form.modal;
        let kind = Signal::derive(move || modal.with(|m| m.form.kind));

        view! {
            <div class="form form--two-columns">
                <Input
                    label="Mã đợt giảm giá"
                    value=form.value(|f| f.code.clone())
                    on_input=form.on_input(|f, v| f.code = v)
                    on_blur=form.on_blur("maDotGiamGia")
                    error=form.error("maDotGiamGia")
                    disabled=locked
                    required=true
                />
                <Input
                    label="Tên đợt giảm giá"
                    value=form.value(|f| f.name.clone())
                    on_input=form.on_input(|f, v| f.name = v)
                    on_blur=form.on_blur("tenDotGiamGia")
                    error=form.error("tenDotGiamGia")
                    disabled=locked
                    required=true
                />
                <Select
                    label="Loại giảm giá"
                    value=Signal::derive(move || kind.get().code().to_string())
                    on_change=Callback::new(move |code: String| {
                        if let Some(k) = PromotionKind::from_code(&code) {
                            form.edit(|f| f.kind = k);
                        }
                    })
                    options=Signal::stored(kind_options())
                    disabled=locked
                    required=true
                />
                {move || match kind.get() {
                    PromotionKind::Percent => view! {
                        <Input
                            label="Giá trị giảm (%)"
                            input_type="number"
                            value=form.value(|f| f.percent.clone())
                            on_input=form.on_input(|f, v| f.percent = v)
                            on_blur=form.on_blur("giaTriDotGiam")
                            error=form.error("giaTriDotGiam")
                            disabled=locked
                            required=true
                        />
                    }.into_any(),
                    PromotionKind::Amount => view! {
                        <Input
                            label="Số tiền giảm (VNĐ)"
                            input_type="number"
                            value=form.value(|f| f.amount.clone())
                            on_input=form.on_input(|f, v| f.amount = v)
                            on_blur=form.on_blur("soTien")
                            error=form.error("soTien")
                            disabled=locked
                            required=true
                        />
                    }.into_any(),
                }}
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
                <Input
                    label="Số lượng sử dụng"
                    input_type="number"
                    value=form.value(|f| f.usage_limit.clone())
                    on_input=form.on_input(|f, v| f.usage_limit = v)
                    on_blur=form.on_blur("soLuongSuDung")
                    error=form.error("soLuongSuDung")
                    disabled=locked
                    required=true
                />
                <Checkbox
                    label="Hoạt động"
                    checked=form.checked(|f| f.active)
                    on_change=form.on_toggle(|f, v| f.active = v)
                    disabled=locked
                />
                <Textarea
                    label="Mô tả"
                    max_len=rules::DESCRIPTION_MAX
                    value=form.value(|f| f.description.clone())
                    on_input=form.on_input(|f, v| f.description = v)
                    on_blur=form.on_blur("moTa")
                    error=form.error("moTa")
                    disabled=locked
                    rows=3
                />
            </div>
        }
        .into_any()
    }

    fn modal_class() -> &'static str {
        "modal--wide"
    }

    /// Fresh code and a validity window starting today
    fn prefill(form: FormHandle<PromotionForm>) {
        let date = today();
        let suffix = (js_sys::Math::random() * 1000.0) as u32;
        let (start, end) = default_window(date, DEFAULT_DAYS);
        form.edit(|f| {
            if f.code.is_empty() {
                f.code = promotion_code(date, suffix);
            }
            f.start = start;
            f.end = end;
        });
    }
}

#[component]
pub fn PromotionList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    resource_list(ListPage::<Promotion>::remote(), ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_options() {
        let options = kind_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], ("PHAN_TRAM".to_string(), "Phần trăm".to_string()));
    }
}
