use serde::de::DeserializeOwned;
use serde::Serialize;

use super::paging::{EnvelopeKind, PageQuery, SortSpec, DEFAULT_PAGE_SIZE};
use super::validation::ValidationErrors;

/// Server-side numeric identifier
pub type EntityId = i64;

/// Which actions a list screen offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Capabilities {
    pub const ALL: Capabilities = Capabilities {
        create: true,
        edit: true,
        delete: true,
    };
}

/// One manageable entity of the store API.
///
/// Ties together the wire DTO, the table row, the editable form and the
/// request body, so a single list/modal implementation serves every screen.
pub trait Resource: 'static {
    /// Response body of one entity
    type Dto: DeserializeOwned;
    /// What the table shows
    type Row: Clone + PartialEq + Send + Sync + 'static;
    /// What the modal edits
    type Form: Clone + Default + PartialEq + Send + Sync + 'static;
    /// Create/update request body
    type Request: Serialize;

    // ============================================================================
    // Static metadata
    // ============================================================================

    /// Index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name (e.g. "color")
    fn collection_name() -> &'static str;

    /// UI name of one element (e.g. "Màu sắc")
    fn element_name() -> &'static str;

    /// UI name of the list (e.g. "Quản lý màu sắc")
    fn list_name() -> &'static str;

    /// Base path, e.g. `/mau-sac`
    fn endpoint() -> &'static str;

    /// `a001_color`
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    fn envelope() -> EnvelopeKind {
        EnvelopeKind::Plain
    }

    fn default_sort() -> SortSpec {
        SortSpec::desc("id")
    }

    fn default_page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }

    fn capabilities() -> Capabilities {
        Capabilities::ALL
    }

    /// Path of the list request; nested resources derive it from the filters
    fn list_path(_query: &PageQuery) -> String {
        Self::endpoint().to_string()
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{}", Self::endpoint(), id)
    }

    fn delete_path(row: &Self::Row) -> String {
        Self::item_path(Self::row_id(row))
    }

    // ============================================================================
    // Mapping
    // ============================================================================

    fn row_id(row: &Self::Row) -> EntityId;

    fn to_row(dto: Self::Dto) -> Self::Row;

    fn form_from_row(row: &Self::Row) -> Self::Form;

    /// Empty form for "add"; resources with suggested values override it
    fn blank_form() -> Self::Form {
        Self::Form::default()
    }

    fn validate(form: &Self::Form) -> ValidationErrors;

    /// Only called with a form that passed [`Resource::validate`]
    fn to_request(form: &Self::Form) -> Self::Request;
}
