//! Generic list screen of a [`Resource`].
//!
//! A screen supplies a [`ResourceView`] (columns, cells, filters, form body)
//! and gets the whole search, paging, add/edit/view modal and delete
//! confirmation flow from [`resource_list`]. Screens with extra needs build
//! from the parts ([`toolbar`], [`table`], [`pager`], [`form_modal`],
//! [`delete_dialog`]) instead.

use contracts::domain::common::{EntityId, Resource};
use contracts::shared::labels::ACTIVE_FILTER_OPTIONS;
use contracts::shared::modal::{DeleteConfirm, ModalController, SubmitAction, SubmitRejected};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config;
use crate::shared::form::FormHandle;
use crate::shared::icons::icon;
use crate::shared::list_store::ListStore;
use crate::shared::list_utils::{SearchInput, SortableHeader};
use crate::shared::modal::{ConfirmDialog, Modal};
use crate::shared::notifications::{use_notifier, Notifier};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};

/// Table column; `sort` is the wire field the column sorts by
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    pub sort: Option<&'static str>,
}

impl Column {
    pub const fn plain(label: &'static str) -> Self {
        Self { label, sort: None }
    }

    pub const fn sortable(label: &'static str, field: &'static str) -> Self {
        Self {
            label,
            sort: Some(field),
        }
    }
}

/// Drop-down filter; the option with an empty value means "all"
#[derive(Debug, Clone)]
pub struct FilterDef {
    pub key: &'static str,
    pub options: Vec<(String, String)>,
}

impl FilterDef {
    pub fn new(key: &'static str, options: &[(&str, &str)]) -> Self {
        Self {
            key,
            options: options
                .iter()
                .map(|(value, label)| (value.to_string(), label.to_string()))
                .collect(),
        }
    }

    /// `trangThai` = true / false
    pub fn active() -> Self {
        Self::new("trangThai", &ACTIVE_FILTER_OPTIONS)
    }
}

/// How a resource renders on its list screen
pub trait ResourceView: Resource {
    fn search_placeholder() -> &'static str {
        "Tìm kiếm..."
    }

    fn filters() -> Vec<FilterDef> {
        vec![FilterDef::active()]
    }

    fn columns() -> Vec<Column>;

    /// The `<td>` cells of one row, in column order
    fn cells(row: &Self::Row) -> AnyView;

    /// Body of the add/edit/view modal
    fn form(form: FormHandle<Self::Form>) -> AnyView;

    fn modal_class() -> &'static str {
        ""
    }

    /// Fill values of a new record that come from the server (next code, ...)
    fn prefill(_form: FormHandle<Self::Form>) {}

    /// Buttons shown before view/edit/delete, e.g. opening a nested tab
    fn row_actions(_row: &Self::Row, _ctx: AppGlobalContext) -> Option<AnyView> {
        None
    }

    fn delete_question(_row: &Self::Row) -> String {
        format!(
            "Bạn có chắc chắn muốn xóa {} này? Thao tác không thể hoàn tác.",
            Self::element_name().to_lowercase()
        )
    }
}

// ============================================================================
// Page state
// ============================================================================

pub struct ListPage<R: Resource> {
    pub store: ListStore<R>,
    pub modal: RwSignal<ModalController<R::Form>>,
    pub confirm: RwSignal<DeleteConfirm<R::Row>>,
    pub notifier: Notifier,
}

impl<R: Resource> Clone for ListPage<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for ListPage<R> {}

impl<R: ResourceView> ListPage<R> {
    pub fn new(store: ListStore<R>) -> Self {
        Self {
            store,
            modal: RwSignal::new(ModalController::default()),
            confirm: RwSignal::new(DeleteConfirm::default()),
            notifier: use_notifier(),
        }
    }

    /// List page backed by the store API, loaded right away
    pub fn remote() -> Self {
        let page = Self::new(ListStore::remote(use_notifier()));
        page.store.load_if_needed();
        page
    }

    pub fn form(&self) -> FormHandle<R::Form> {
        FormHandle::new(self.modal, R::validate)
    }

    pub fn open_add(&self) {
        self.open_add_with(R::blank_form());
        R::prefill(self.form());
    }

    pub fn open_add_with(&self, form: R::Form) {
        self.modal.update(|m| m.open_add(form));
    }

    pub fn open_row(&self, row: &R::Row, edit: bool) {
        let id = R::row_id(row);
        let form = R::form_from_row(row);
        self.modal.update(|m| {
            if edit {
                m.open_edit(id, form)
            } else {
                m.open_view(id, form)
            }
        });
    }

    pub fn close(&self) {
        self.modal.update(|m| m.close());
    }

    /// Validate, send, then close and refetch; on failure the modal stays open
    pub fn submit(&self) {
        let mut started = None;
        self.modal.update(|m| started = Some(m.begin_submit(R::validate)));
        let action = match started {
            Some(Ok(action)) => action,
            Some(Err(SubmitRejected::Invalid(errors))) => {
                self.notifier
                    .warning(format!("Vui lòng kiểm tra lại {} trường chưa hợp lệ", errors.len()));
                return;
            }
            Some(Err(rejected)) => {
                log::debug!("{}: submit ignored ({:?})", R::full_name(), rejected);
                return;
            }
            None => return,
        };

        let this = *self;
        spawn_local(async move {
            let (result, verb) = match action {
                SubmitAction::Create(form) => (this.store.create(form).await, "Thêm"),
                SubmitAction::Update(id, form) => (this.store.update(id, form).await, "Cập nhật"),
            };
            let element = R::element_name().to_lowercase();
            match &result {
                Ok(()) => this.notifier.success(format!("{} {} thành công", verb, element)),
                Err(err) => this.notifier.api_error(&format!("{} {}", verb, element), err),
            }
            let _ = this.modal.try_update(|m| m.finish_submit(result));
        });
    }

    pub fn ask_delete(&self, row: R::Row) {
        self.confirm.update(|c| c.request(row));
    }

    pub fn confirm_delete(&self) {
        let mut pending = None;
        self.confirm.update(|c| pending = c.confirm());
        let Some(row) = pending else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            match this.store.delete(row).await {
                Ok(()) => this
                    .notifier
                    .success(format!("Xóa {} thành công", R::element_name().to_lowercase())),
                Err(err) => this
                    .notifier
                    .api_error(&format!("Xóa {}", R::element_name().to_lowercase()), &err),
            }
            let _ = this.confirm.try_update(|c| c.finish());
        });
    }

    pub fn editing_id(&self) -> Option<EntityId> {
        match self.modal.with_untracked(|m| m.mode) {
            contracts::shared::modal::ModalMode::Edit(id) => Some(id),
            _ => None,
        }
    }
}

// ============================================================================
// Views
// ============================================================================

/// Search box, filters, reset and refresh
pub fn toolbar<R: ResourceView>(page: ListPage<R>) -> AnyView {
    let store = page.store;
    let keyword = Signal::derive(move || store.state.with(|s| s.keyword.clone()));

    view! {
        <div class="page__toolbar">
            <SearchInput
                value=keyword
                on_change=Callback::new(move |value: String| store.set_keyword(value))
                placeholder=R::search_placeholder()
            />
            {R::filters().into_iter().map(|filter| {
                let key = filter.key;
                view! {
                    <select
                        class="form__select page__filter"
                        prop:value=move || store.state.with(|s| s.filter(key).to_string())
                        on:change=move |ev| store.set_filter(key, event_target_value(&ev))
                    >
                        {filter.options.into_iter().map(|(value, label)| {
                            view! { <option value=value>{label}</option> }
                        }).collect_view()}
                    </select>
                }
            }).collect_view()}
            <Show when=move || store.state.with(|s| s.has_criteria())>
                <button class="button button--ghost" on:click=move |_| store.reset()>
                    {icon("x")}
                    "Xóa bộ lọc"
                </button>
            </Show>
            <button class="button button--secondary" on:click=move |_| store.fetch() title="Tải lại">
                {icon("refresh")}
            </button>
        </div>
    }
    .into_any()
}

/// Data table with view/edit/delete actions per row
pub fn table<R: ResourceView>(page: ListPage<R>, ctx: AppGlobalContext) -> AnyView {
    let store = page.store;
    let caps = R::capabilities();
    let columns = R::columns();
    let column_count = columns.len() + 1;
    let sort = Signal::derive(move || store.state.with(|s| s.sort.clone()));
    let on_sort = Callback::new(move |field: &'static str| store.toggle_sort(field));

    view! {
        <div class="table-container" class:table-container--loading=move || store.state.with(|s| s.loading)>
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        {columns.into_iter().map(|column| match column.sort {
                            Some(field) => view! {
                                <SortableHeader label=column.label field=field sort=sort on_sort=on_sort />
                            }.into_any(),
                            None => view! {
                                <th class="table__header-cell">{column.label}</th>
                            }.into_any(),
                        }).collect_view()}
                        <th class="table__header-cell table__header-cell--actions">"Thao tác"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || store.state.with(|state| {
                        if state.items.is_empty() {
                            let text = if state.loading && !state.is_loaded {
                                "Đang tải dữ liệu..."
                            } else {
                                "Không có dữ liệu"
                            };
                            return view! {
                                <tr><td class="table__cell table__cell--empty" colspan=column_count>{text}</td></tr>
                            }.into_any();
                        }
                        state.items.iter().map(|row| {
                            let for_view = row.clone();
                            let for_edit = row.clone();
                            let for_delete = row.clone();
                            view! {
                                <tr class="table__row">
                                    {R::cells(row)}
                                    <td class="table__cell table__cell--actions">
                                        {R::row_actions(row, ctx)}
                                        <button class="button button--icon" title="Xem chi tiết"
                                            on:click=move |_| page.open_row(&for_view, false)>
                                            {icon("eye")}
                                        </button>
                                        {caps.edit.then(|| view! {
                                            <button class="button button--icon" title="Chỉnh sửa"
                                                on:click=move |_| page.open_row(&for_edit, true)>
                                                {icon("edit")}
                                            </button>
                                        })}
                                        {caps.delete.then(|| view! {
                                            <button class="button button--icon button--icon-danger" title="Xóa"
                                                on:click=move |_| page.ask_delete(for_delete.clone())>
                                                {icon("delete")}
                                            </button>
                                        })}
                                    </td>
                                </tr>
                            }
                        }).collect_view().into_any()
                    })}
                </tbody>
            </table>
        </div>
    }
    .into_any()
}

pub fn pager<R: ResourceView>(page: ListPage<R>) -> AnyView {
    let state = page.store.state;
    let store = page.store;
    view! {
        <PaginationControls
            current_page=Signal::derive(move || state.with(|s| s.page))
            total_pages=Signal::derive(move || state.with(|s| s.total_pages))
            range_label=Signal::derive(move || state.with(|s| s.range_label()))
            page_size=Signal::derive(move || state.with(|s| s.page_size))
            on_page_change=Callback::new(move |p| store.go_to_page(p))
            on_page_size_change=Callback::new(move |size| store.set_page_size(size))
            page_size_options=config::current().ui.page_sizes()
        />
    }
    .into_any()
}

/// Add/edit/view modal; save is hidden in view mode
pub fn form_modal<R: ResourceView>(page: ListPage<R>) -> AnyView {
    let modal = page.modal;
    let title = Signal::derive(move || modal.with(|m| m.title(R::element_name())));

    view! {
        <Show when=move || modal.with(|m| m.is_open())>
            <Modal
                title=title
                on_close=Callback::new(move |_| page.close())
                class=R::modal_class().to_string()
                footer=move || view! {
                    <button class="button button--secondary" on:click=move |_| page.close()>
                        {move || if modal.with(|m| m.is_read_only()) { "Đóng" } else { "Hủy" }}
                    </button>
                    <Show when=move || !modal.with(|m| m.is_read_only())>
                        <button
                            class="button button--primary"
                            disabled=move || modal.with(|m| m.saving)
                            on:click=move |_| page.submit()
                        >
                            {move || if modal.with(|m| m.saving) { "Đang lưu..." } else { "Lưu" }}
                        </button>
                    </Show>
                }
            >
                {move || modal.with(|m| m.server_error.clone()).map(|e| view! {
                    <div class="form__server-error">{icon("alert-triangle")}{e}</div>
                })}
                {R::form(page.form())}
            </Modal>
        </Show>
    }
    .into_any()
}

pub fn delete_dialog<R: ResourceView>(page: ListPage<R>) -> AnyView {
    let confirm = page.confirm;
    let message = Signal::derive(move || {
        confirm.with(|c| c.pending.as_ref().map(R::delete_question).unwrap_or_default())
    });

    view! {
        <Show when=move || confirm.with(|c| c.is_open())>
            <ConfirmDialog
                title="Xác nhận xóa"
                message=message
                busy=Signal::derive(move || confirm.with(|c| c.deleting))
                on_confirm=Callback::new(move |_| page.confirm_delete())
                on_cancel=Callback::new(move |_| confirm.update(|c| c.cancel()))
            />
        </Show>
    }
    .into_any()
}

/// The standard list screen: header, toolbar, table, pager and dialogs
pub fn resource_list<R: ResourceView>(page: ListPage<R>, ctx: AppGlobalContext) -> AnyView {
    let can_create = R::capabilities().create;
    let total = Signal::derive(move || page.store.state.with(|s| s.total_elements));

    view! {
        <PageFrame page_id=format!("{}--list", R::full_name()) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{R::list_name()}</h1>
                    <span class="page__count">{move || format!("{} bản ghi", total.get())}</span>
                </div>
                <div class="page__header-right">
                    {can_create.then(|| view! {
                        <button class="button button--primary" on:click=move |_| page.open_add()>
                            {icon("plus")}
                            {format!("Thêm {}", R::element_name().to_lowercase())}
                        </button>
                    })}
                </div>
            </div>
            <div class="page__content">
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
    .into_any()
}
