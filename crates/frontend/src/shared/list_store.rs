//! Reactive store of one paged list screen.
//!
//! [`ListStore`] drives the search cycle of [`ListState`] against a
//! [`RowSource`]: the store API for most resources, an in-memory
//! [`LocalStore`] for screens without a backend.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use contracts::domain::common::{EntityId, Resource};
use contracts::shared::error::ApiError;
use contracts::shared::local_store::{LocalRecord, LocalStore};
use contracts::shared::paging::{Page, PageQuery, DEFAULT_PAGE_SIZE};
use contracts::shared::search_cycle::{FetchOutcome, ListState};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config;
use crate::shared::http;
use crate::shared::notifications::Notifier;

pub type SourceFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>>>>;

/// Where a list screen reads and writes its rows
pub trait RowSource<R: Resource>: Send + Sync {
    fn fetch(&self, query: PageQuery) -> SourceFuture<Page<R::Row>>;

    fn create(&self, form: R::Form) -> SourceFuture<()>;

    fn update(&self, id: EntityId, form: R::Form) -> SourceFuture<()>;

    fn delete(&self, row: R::Row) -> SourceFuture<()>;
}

/// The store API
pub struct RemoteSource;

impl<R: Resource> RowSource<R> for RemoteSource {
    fn fetch(&self, query: PageQuery) -> SourceFuture<Page<R::Row>> {
        Box::pin(async move { http::fetch_page::<R>(&query).await })
    }

    fn create(&self, form: R::Form) -> SourceFuture<()> {
        Box::pin(async move { http::create::<R>(&form).await })
    }

    fn update(&self, id: EntityId, form: R::Form) -> SourceFuture<()> {
        Box::pin(async move { http::update::<R>(id, &form).await })
    }

    fn delete(&self, row: R::Row) -> SourceFuture<()> {
        Box::pin(async move { http::remove::<R>(&row).await })
    }
}

/// In-memory rows for resources whose request body is the row itself
pub struct LocalSource<T: Send + Sync + 'static> {
    store: StoredValue<LocalStore<T>>,
}

impl<T: LocalRecord + Send + Sync + 'static> LocalSource<T> {
    pub fn new(store: LocalStore<T>) -> Self {
        Self::shared(StoredValue::new(store))
    }

    /// Source over a store the screen also reads, e.g. for summary cards
    pub fn shared(store: StoredValue<LocalStore<T>>) -> Self {
        Self { store }
    }
}

impl<R, T> RowSource<R> for LocalSource<T>
where
    T: LocalRecord + Send + Sync + 'static,
    R: Resource<Row = T, Request = T>,
{
    fn fetch(&self, query: PageQuery) -> SourceFuture<Page<T>> {
        let page = self.store.with_value(|store| store.query(&query));
        Box::pin(async move { Ok(page) })
    }

    fn create(&self, form: R::Form) -> SourceFuture<()> {
        let item = R::to_request(&form);
        self.store.update_value(|store| {
            store.create(item);
        });
        Box::pin(async move { Ok(()) })
    }

    fn update(&self, id: EntityId, form: R::Form) -> SourceFuture<()> {
        let item = R::to_request(&form);
        let mut result = Ok(());
        self.store.update_value(|store| result = store.update(id, item).map(|_| ()));
        Box::pin(async move { result })
    }

    fn delete(&self, row: T) -> SourceFuture<()> {
        let mut result = Ok(());
        self.store.update_value(|store| result = store.delete(row.id()));
        Box::pin(async move { result })
    }
}

// ============================================================================
// Store
// ============================================================================

pub struct ListStore<R: Resource> {
    pub state: RwSignal<ListState<R::Row>>,
    source: StoredValue<Arc<dyn RowSource<R>>>,
    notifier: Notifier,
}

impl<R: Resource> Clone for ListStore<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for ListStore<R> {}

impl<R: Resource> ListStore<R> {
    pub fn new(source: Arc<dyn RowSource<R>>, notifier: Notifier) -> Self {
        // Resources with their own page size win over the configured one
        let page_size = if R::default_page_size() != DEFAULT_PAGE_SIZE {
            R::default_page_size()
        } else {
            config::current().ui.default_page_size.max(1)
        };
        Self {
            state: RwSignal::new(ListState::new(R::default_sort(), page_size)),
            source: StoredValue::new(source),
            notifier,
        }
    }

    pub fn remote(notifier: Notifier) -> Self {
        Self::new(Arc::new(RemoteSource), notifier)
    }

    pub fn local<T>(store: StoredValue<LocalStore<T>>, notifier: Notifier) -> Self
    where
        T: LocalRecord + Send + Sync + 'static,
        R: Resource<Row = T, Request = T>,
    {
        Self::new(Arc::new(LocalSource::shared(store)), notifier)
    }

    /// Issue a fetch for the current criteria; late answers of older fetches are dropped
    pub fn fetch(&self) {
        let mut issued = None;
        self.state.update(|state| issued = Some(state.begin_fetch()));
        let Some((ticket, query)) = issued else {
            return;
        };
        let future = self.source.with_value(|source| source.fetch(query));
        let state = self.state;
        let notifier = self.notifier;
        spawn_local(async move {
            let result = future.await;
            let mut outcome = None;
            let applied = state.try_update(|s| outcome = Some(s.apply_page(ticket, result)));
            match (applied, outcome) {
                (Some(_), Some(FetchOutcome::Applied)) => {
                    log::debug!("{}: page loaded", R::full_name());
                }
                (Some(_), Some(FetchOutcome::Stale)) => {
                    log::debug!("{}: stale response dropped", R::full_name());
                }
                (Some(_), Some(FetchOutcome::Failed(err))) => {
                    notifier.api_error(&format!("Tải {}", R::element_name().to_lowercase()), &err);
                }
                _ => log::debug!("{}: list disposed before response", R::full_name()),
            }
        });
    }

    pub fn load_if_needed(&self) {
        if !self.state.with_untracked(|s| s.is_loaded || s.loading) {
            self.fetch();
        }
    }

    fn refetch_if(&self, changed: impl FnOnce(&mut ListState<R::Row>) -> bool) {
        let mut needed = false;
        self.state.update(|state| needed = changed(state));
        if needed {
            self.fetch();
        }
    }

    // ============================================================================
    // Criteria
    // ============================================================================

    pub fn set_keyword(&self, keyword: String) {
        self.refetch_if(|s| s.set_keyword(&keyword));
    }

    pub fn set_filter(&self, key: &str, value: String) {
        self.refetch_if(|s| s.set_filter(key, &value));
    }

    /// Fixed filter of a nested screen, kept across resets
    pub fn set_scope(&self, key: &str, value: String) {
        self.refetch_if(|s| s.set_scope(key, &value));
    }

    pub fn set_page_size(&self, size: usize) {
        self.refetch_if(|s| s.set_page_size(size));
    }

    pub fn toggle_sort(&self, field: &str) {
        self.refetch_if(|s| {
            s.toggle_sort(field);
            true
        });
    }

    pub fn go_to_page(&self, page: usize) {
        self.refetch_if(|s| s.go_to_page(page));
    }

    pub fn reset(&self) {
        self.refetch_if(|s| {
            s.reset_criteria();
            true
        });
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    pub async fn create(&self, form: R::Form) -> Result<(), ApiError> {
        let future = self.source.with_value(|source| source.create(form));
        future.await?;
        self.fetch();
        Ok(())
    }

    pub async fn update(&self, id: EntityId, form: R::Form) -> Result<(), ApiError> {
        let future = self.source.with_value(|source| source.update(id, form));
        future.await?;
        self.fetch();
        Ok(())
    }

    pub async fn delete(&self, row: R::Row) -> Result<(), ApiError> {
        let future = self.source.with_value(|source| source.delete(row));
        future.await?;
        self.state.update(|s| s.after_delete());
        self.fetch();
        Ok(())
    }

    /// All rows currently on screen
    pub fn rows(&self) -> Vec<R::Row> {
        self.state.with(|s| s.items.clone())
    }

    pub fn find(&self, id: EntityId) -> Option<R::Row> {
        self.state
            .with_untracked(|s| s.items.iter().find(|row| R::row_id(row) == id).cloned())
    }
}
