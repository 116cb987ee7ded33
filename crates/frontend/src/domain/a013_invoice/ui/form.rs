//! Edit form of an invoice, shared by the list modal and the detail tab.

use contracts::domain::a013_invoice::aggregate::{
    InvoiceForm, InvoiceStatus, CHANNELS, PAYMENT_METHODS,
};
use contracts::shared::labels::format_vnd;
use leptos::prelude::*;

use crate::shared::components::ui::{Input, Select, Textarea};
use crate::shared::form::FormHandle;

fn status_options() -> Vec<(String, String)> {
    InvoiceStatus::STEPS
        .iter()
        .map(|s| (s.code().to_string(), s.label().to_string()))
        .collect()
}

fn text_options(values: &[&str]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|v| (v.to_string(), v.to_string()))
        .collect()
}

pub fn invoice_form(form: FormHandle<InvoiceForm>) -> AnyView {
    let locked = form.locked();
    let modal = form.modal;
    let grand_total = Signal::derive(move || modal.with(|m| format_vnd(m.form.grand_total())));
    let status = Signal::derive(move || modal.with(|m| m.form.status.code().to_string()));

    view! {
        <div class="form form--two-columns">
            <Input
                label="Mã hóa đơn"
                value=form.value(|f| f.code.clone())
                disabled=true
            />
            <Select
                label="Trạng thái"
                value=status
                on_change=Callback::new(move |code: String| {
                    form.edit(|f| f.status = InvoiceStatus::from_code(&code));
                    modal.update(|m| m.touch("trangThai"));
                })
                options=Signal::stored(status_options())
                error=form.error("trangThai")
                disabled=locked
                required=true
            />
            <Input
                label="Tên khách hàng"
                value=form.value(|f| f.customer_name.clone())
                on_input=form.on_input(|f, v| f.customer_name = v)
                on_blur=form.on_blur("tenKhachHang")
                error=form.error("tenKhachHang")
                disabled=locked
                required=true
            />
            <Input
                label="Số điện thoại"
                input_type="tel"
                value=form.value(|f| f.customer_phone.clone())
                on_input=form.on_input(|f, v| f.customer_phone = v)
                on_blur=form.on_blur("soDienThoaiKhachHang")
                error=form.error("soDienThoaiKhachHang")
                disabled=locked
            />
            <Input
                label="Tổng tiền (VNĐ)"
                input_type="number"
                value=form.value(|f| f.total.clone())
                on_input=form.on_input(|f, v| f.total = v)
                on_blur=form.on_blur("tongTien")
                error=form.error("tongTien")
                disabled=locked
                required=true
            />
            <Input
                label="Tiền giảm giá (VNĐ)"
                input_type="number"
                value=form.value(|f| f.discount.clone())
                on_input=form.on_input(|f, v| f.discount = v)
                on_blur=form.on_blur("tienGiamGia")
                error=form.error("tienGiamGia")
                disabled=locked
            />
            <div class="form__group">
                <label class="form__label">"Thành tiền"</label>
                <div class="form__static form__static--money">{move || grand_total.get()}</div>
            </div>
            <Select
                label="Kênh bán"
                value=form.value(|f| f.channel.clone())
                on_change=form.on_input(|f, v| f.channel = v)
                options=Signal::stored(text_options(&CHANNELS))
                placeholder="-- Chọn kênh bán --"
                disabled=locked
            />
            <Select
                label="Phương thức thanh toán"
                value=form.value(|f| f.payment_method.clone())
                on_change=form.on_input(|f, v| f.payment_method = v)
                options=Signal::stored(text_options(&PAYMENT_METHODS))
                placeholder="-- Chọn phương thức --"
                disabled=locked
            />
            <Textarea
                label="Địa chỉ giao hàng"
                value=form.value(|f| f.shipping_address.clone())
                on_input=form.on_input(|f, v| f.shipping_address = v)
                on_blur=form.on_blur("diaChiGiaoHang")
                error=form.error("diaChiGiaoHang")
                disabled=locked
                rows=2
            />
            <Textarea
                label="Ghi chú"
                value=form.value(|f| f.notes.clone())
                on_input=form.on_input(|f, v| f.notes = v)
                on_blur=form.on_blur("ghiChu")
                error=form.error("ghiChu")
                disabled=locked
                rows=2
            />
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_options_follow_steps() {
        let options = status_options();
        assert_eq!(options.len(), InvoiceStatus::STEPS.len());
        assert_eq!(options[0], ("CHO_XAC_NHAN".to_string(), "Chờ xác nhận".to_string()));
        assert_eq!(options[4].0, "HUY");
    }
}
