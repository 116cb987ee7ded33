//! One invoice in its own tab.
//!
//! The tab refreshes every `ui.invoice_refresh_secs` while it is mounted so
//! that status changes made at the counter show up. Polling pauses while the
//! edit modal is open and stops when the tab closes.

use contracts::domain::a013_invoice::aggregate::{
    status_update_path, Invoice, InvoiceForm, InvoiceRow, InvoiceStatus,
};
use contracts::domain::common::{EntityId, Resource};
use contracts::shared::labels::{format_datetime, format_number, format_vnd};
use contracts::shared::modal::{ModalController, SubmitAction, SubmitRejected};
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Flex, FlexGap, Table, TableBody, TableCell, TableCellLayout, TableHeader, TableHeaderCell,
    TableRow,
};

use crate::domain::a013_invoice::ui::form::invoice_form;
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::components::ui::StatusBadge;
use crate::shared::config;
use crate::shared::form::FormHandle;
use crate::shared::http;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::notifications::{use_notifier, Notifier};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};

/// Statuses an invoice may move to from `current`
pub fn next_statuses(current: InvoiceStatus) -> Vec<InvoiceStatus> {
    match current {
        InvoiceStatus::Pending => vec![InvoiceStatus::Confirmed, InvoiceStatus::Cancelled],
        InvoiceStatus::Confirmed => vec![InvoiceStatus::Shipping, InvoiceStatus::Cancelled],
        InvoiceStatus::Shipping => vec![InvoiceStatus::Delivered],
        InvoiceStatus::Delivered | InvoiceStatus::Cancelled | InvoiceStatus::Unknown => Vec::new(),
    }
}

#[derive(Clone, Copy)]
struct DetailState {
    id: EntityId,
    invoice: RwSignal<Option<InvoiceRow>>,
    error: RwSignal<Option<String>>,
    in_flight: RwSignal<bool>,
    changing_status: RwSignal<bool>,
    modal: RwSignal<ModalController<InvoiceForm>>,
    notifier: Notifier,
}

impl DetailState {
    fn new(id: EntityId) -> Self {
        Self {
            id,
            invoice: RwSignal::new(None),
            error: RwSignal::new(None),
            in_flight: RwSignal::new(false),
            changing_status: RwSignal::new(false),
            modal: RwSignal::new(ModalController::default()),
            notifier: use_notifier(),
        }
    }

    /// Reload the invoice; a tick that arrives during a load is dropped
    fn load(&self) {
        if self.in_flight.get_untracked() {
            return;
        }
        self.in_flight.set(true);
        let this = *self;
        spawn_local(async move {
            match http::get_one::<Invoice>(this.id).await {
                Ok(row) => {
                    let _ = this.invoice.try_set(Some(row));
                    let _ = this.error.try_set(None);
                }
                Err(err) => {
                    log::warn!("invoice {}: {}", this.id, err);
                    let _ = this.error.try_set(Some(err.to_string()));
                }
            }
            let _ = this.in_flight.try_set(false);
        });
    }

    fn open_edit(&self) {
        if let Some(row) = self.invoice.get_untracked() {
            let form = Invoice::form_from_row(&row);
            self.modal.update(|m| m.open_edit(row.id, form));
        }
    }

    fn submit(&self) {
        let notifier = self.notifier;
        let mut started = None;
        self.modal
            .update(|m| started = Some(m.begin_submit(Invoice::validate)));
        let (id, form) = match started {
            Some(Ok(SubmitAction::Update(id, form))) => (id, form),
            Some(Err(SubmitRejected::Invalid(errors))) => {
                notifier.warning(format!("Vui lòng kiểm tra lại {} trường chưa hợp lệ", errors.len()));
                return;
            }
            _ => return,
        };
        let this = *self;
        spawn_local(async move {
            let result = http::update::<Invoice>(id, &form).await;
            match &result {
                Ok(()) => notifier.success("Cập nhật hóa đơn thành công"),
                Err(err) => notifier.api_error("Cập nhật hóa đơn", err),
            }
            let saved = result.is_ok();
            let _ = this.modal.try_update(|m| m.finish_submit(result));
            if saved {
                this.load();
            }
        });
    }

    fn change_status(&self, status: InvoiceStatus) {
        if self.changing_status.get_untracked() {
            return;
        }
        self.changing_status.set(true);
        let notifier = self.notifier;
        let this = *self;
        spawn_local(async move {
            match http::put_empty(&status_update_path(this.id, status)).await {
                Ok(_) => {
                    notifier.success(format!("Đã chuyển hóa đơn sang \"{}\"", status.label()));
                    this.load();
                }
                Err(err) => notifier.api_error("Cập nhật trạng thái", &err),
            }
            let _ = this.changing_status.try_set(false);
        });
    }
}

#[component]
pub fn InvoiceDetail(id: EntityId) -> impl IntoView {
    let state = DetailState::new(id);
    state.load();

    let poll = StoredValue::new_local(None::<Interval>);
    let period_ms = config::current().ui.invoice_refresh_secs.saturating_mul(1000);
    Effect::new(move |_| {
        let editing = state.modal.with(|m| m.is_open());
        if editing || period_ms == 0 {
            poll.set_value(None);
        } else if poll.with_value(|p| p.is_none()) {
            poll.set_value(Some(Interval::new(period_ms, move || state.load())));
        }
    });
    on_cleanup(move || poll.set_value(None));

    view! {
        <PageFrame page_id="a013_invoice--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || state.invoice.with(|i| {
                            i.as_ref().map(|i| format!("Hóa đơn {}", i.code)).unwrap_or_else(|| "Hóa đơn".to_string())
                        })}
                    </h1>
                    {move || state.invoice.with(|i| i.as_ref().map(|i| view! {
                        <StatusBadge class=i.status.badge_class() label=i.status.label() />
                    }))}
                </div>
                <div class="page__header-right">
                    <button class="button button--secondary" on:click=move |_| state.load() title="Tải lại">
                        {icon("refresh")}
                    </button>
                    <button class="button button--primary" on:click=move |_| state.open_edit()
                        disabled=move || state.invoice.with(|i| i.is_none())>
                        {icon("edit")}
                        "Chỉnh sửa"
                    </button>
                </div>
            </div>
            <div class="page__content">
                {move || state.error.get().map(|e| view! {
                    <div class="error-banner">{icon("alert-triangle")}{e}</div>
                })}
                {move || match state.invoice.get() {
                    None => view! { <div class="page__placeholder">"Đang tải hóa đơn..."</div> }.into_any(),
                    Some(invoice) => invoice_body(state, invoice),
                }}
            </div>
            {edit_modal(state)}
        </PageFrame>
    }
}

fn invoice_body(state: DetailState, invoice: InvoiceRow) -> AnyView {
    let status = invoice.status;
    let progress = format!("width: {}%;", status.progress_percent());
    let item_count = invoice.item_count();

    view! {
        <Flex vertical=true gap=FlexGap::Large>
            <CardAnimated delay_ms=0>
                <div class="invoice-progress">
                    <div class="invoice-progress__steps">
                        {InvoiceStatus::STEPS.into_iter().map(|step| view! {
                            <span class="invoice-progress__step" class:invoice-progress__step--current=step == status>
                                {step.label()}
                            </span>
                        }).collect_view()}
                    </div>
                    <div class="invoice-progress__bar">
                        <div class=format!("invoice-progress__fill {}", status.badge_class()) style=progress></div>
                    </div>
                    <div class="invoice-progress__actions">
                        {next_statuses(status).into_iter().map(|next| {
                            let class = if next == InvoiceStatus::Cancelled {
                                "button button--danger"
                            } else {
                                "button button--primary"
                            };
                            view! {
                                <button class=class
                                    disabled=move || state.changing_status.get()
                                    on:click=move |_| state.change_status(next)>
                                    {next.label()}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                </div>
            </CardAnimated>
            <CardAnimated delay_ms=80>
                <div class="info-grid">
                    {info("Khách hàng", invoice.customer_name.clone())}
                    {info("Số điện thoại", invoice.customer_phone.clone())}
                    {info("Nhân viên", invoice.staff_name.clone())}
                    {info("Ngày tạo", format_datetime(&invoice.created_at))}
                    {info("Ngày thanh toán", format_datetime(&invoice.paid_at))}
                    {info("Kênh bán", invoice.channel.clone())}
                    {info("Thanh toán", invoice.payment_method.clone())}
                    {info("Địa chỉ giao hàng", invoice.shipping_address.clone())}
                    {info("Ghi chú", invoice.notes.clone())}
                </div>
            </CardAnimated>
            <CardAnimated delay_ms=160>
                <h3 class="section__title">{format!("Sản phẩm ({})", item_count)}</h3>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Sản phẩm"</TableHeaderCell>
                            <TableHeaderCell>"Số lượng"</TableHeaderCell>
                            <TableHeaderCell>"Đơn giá"</TableHeaderCell>
                            <TableHeaderCell>"Thành tiền"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {invoice.lines.clone().into_iter().map(|line| view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout truncate=true>{line.product_name.clone()}</TableCellLayout>
                                </TableCell>
                                <TableCell class="text-right">{format_number(line.quantity as f64)}</TableCell>
                                <TableCell class="text-right">{format_vnd(line.unit_price)}</TableCell>
                                <TableCell class="text-right">{format_vnd(line.amount)}</TableCell>
                            </TableRow>
                        }).collect_view()}
                    </TableBody>
                </Table>
                <div class="invoice-totals">
                    <div class="invoice-totals__row">
                        <span>"Tổng tiền"</span><span>{format_vnd(invoice.total)}</span>
                    </div>
                    <div class="invoice-totals__row">
                        <span>"Giảm giá"</span><span>{format!("-{}", format_vnd(invoice.discount))}</span>
                    </div>
                    <div class="invoice-totals__row invoice-totals__row--grand">
                        <span>"Thành tiền"</span><span>{format_vnd(invoice.grand_total)}</span>
                    </div>
                </div>
            </CardAnimated>
        </Flex>
    }
    .into_any()
}

fn info(label: &'static str, value: String) -> impl IntoView {
    let value = if value.trim().is_empty() { "-".to_string() } else { value };
    view! {
        <div class="info-grid__item">
            <span class="info-grid__label">{label}</span>
            <span class="info-grid__value">{value}</span>
        </div>
    }
}

fn edit_modal(state: DetailState) -> AnyView {
    let modal = state.modal;
    let form = FormHandle::new(modal, Invoice::validate);
    let close = move || modal.update(|m| m.close());

    view! {
        <Show when=move || modal.with(|m| m.is_open())>
            <Modal
                title=Signal::derive(move || modal.with(|m| m.title(Invoice::element_name())))
                on_close=Callback::new(move |_| close())
                class="modal--wide"
                footer=move || view! {
                    <button class="button button--secondary" on:click=move |_| close()>"Hủy"</button>
                    <button
                        class="button button--primary"
                        disabled=move || modal.with(|m| m.saving)
                        on:click=move |_| state.submit()
                    >
                        {move || if modal.with(|m| m.saving) { "Đang lưu..." } else { "Lưu" }}
                    </button>
                }
            >
                {move || modal.with(|m| m.server_error.clone()).map(|e| view! {
                    <div class="form__server-error">{icon("alert-triangle")}{e}</div>
                })}
                {invoice_form(form)}
            </Modal>
        </Show>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_statuses_follow_the_flow() {
        assert_eq!(
            next_statuses(InvoiceStatus::Pending),
            vec![InvoiceStatus::Confirmed, InvoiceStatus::Cancelled]
        );
        assert_eq!(next_statuses(InvoiceStatus::Shipping), vec![InvoiceStatus::Delivered]);
    }

    #[test]
    fn test_final_statuses_have_no_actions() {
        assert!(next_statuses(InvoiceStatus::Delivered).is_empty());
        assert!(next_statuses(InvoiceStatus::Cancelled).is_empty());
        assert!(next_statuses(InvoiceStatus::Unknown).is_empty());
    }
}
