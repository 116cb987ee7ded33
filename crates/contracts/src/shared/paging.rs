//! Paging primitives shared by every list screen.
//!
//! The server speaks Spring-style pages (`content`, `totalElements`, `totalPages`,
//! `number`, `size`) and a few resources wrap them into
//! `{ success, message, data }`. Both shapes are decoded into [`Page`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Default page size of every list screen
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the pager
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Maximum number of page buttons rendered by the pager
pub const PAGER_WINDOW: usize = 5;

// ============================================================================
// Page
// ============================================================================

/// One page of server results (page index is 0-based)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
    #[serde(default)]
    pub number: usize,
    #[serde(default)]
    pub size: usize,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }

    /// Slice an already filtered collection into a page (client-side lists)
    pub fn from_items(items: Vec<T>, page: usize, size: usize) -> Self {
        let size = size.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(size);
        let content = items.into_iter().skip(page * size).take(size).collect();
        Self {
            content,
            total_elements: total as u64,
            total_pages,
            number: page,
            size,
        }
    }
}

/// `{ success, message, data }` wrapper used by staff, promotions and vouchers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// How a resource's responses are shaped on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Plain,
    Wrapped,
}

/// Decode a response body of the given envelope kind into `T`
pub fn decode_body<T: DeserializeOwned>(body: &str, envelope: EnvelopeKind) -> Result<T, ApiError> {
    match envelope {
        EnvelopeKind::Plain => {
            serde_json::from_str::<T>(body).map_err(|e| ApiError::Decode(e.to_string()))
        }
        EnvelopeKind::Wrapped => {
            let wrapped: ApiResponse<T> =
                serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
            match wrapped.data {
                Some(data) if wrapped.success => Ok(data),
                Some(data) if wrapped.message.is_none() => Ok(data),
                _ => Err(ApiError::Validation(
                    wrapped
                        .message
                        .unwrap_or_else(|| "Máy chủ không trả về dữ liệu".to_string()),
                )),
            }
        }
    }
}

/// Decode a list response: a page, or a bare array for endpoints without paging
pub fn decode_page<T: DeserializeOwned>(
    body: &str,
    envelope: EnvelopeKind,
) -> Result<Page<T>, ApiError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PageOrList<T> {
        Page(Page<T>),
        List(Vec<T>),
    }

    let decoded: PageOrList<T> = decode_body(body, envelope)?;
    Ok(match decoded {
        PageOrList::Page(page) => page,
        PageOrList::List(items) => {
            let size = items.len().max(1);
            Page::from_items(items, 0, size)
        }
    })
}

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort key sent as `sort=field,dir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `"field,dir"`; a missing direction means ascending
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(',').map(str::trim);
        let field = parts.next().filter(|f| !f.is_empty())?;
        let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(d) if d == "asc" || d.is_empty() => SortDirection::Asc,
            None => SortDirection::Asc,
            Some(_) => return None,
        };
        Some(Self {
            field: field.to_string(),
            direction,
        })
    }

    /// Clicking the active column flips the direction, a new column starts ascending
    pub fn toggled(&self, field: &str) -> Self {
        if self.field == field {
            Self {
                field: self.field.clone(),
                direction: self.direction.flip(),
            }
        } else {
            Self::asc(field)
        }
    }

    pub fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }

    /// Header arrow for a column
    pub fn indicator(&self, field: &str) -> &'static str {
        if self.field != field {
            " ⇅"
        } else if self.direction == SortDirection::Asc {
            " ▲"
        } else {
            " ▼"
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// Everything one list request carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: usize,
    pub size: usize,
    pub sort: SortSpec,
    pub keyword: String,
    pub filters: BTreeMap<String, String>,
}

impl PageQuery {
    pub fn new(sort: SortSpec, size: usize) -> Self {
        Self {
            page: 0,
            size,
            sort,
            keyword: String::new(),
            filters: BTreeMap::new(),
        }
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Query pairs in request order; empty keyword and filters are left out
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            params.push(("keyword".to_string(), keyword.to_string()));
        }
        for (key, value) in &self.filters {
            let value = value.trim();
            if !value.is_empty() {
                params.push((key.clone(), value.to_string()));
            }
        }
        params.push(("page".to_string(), self.page.to_string()));
        params.push(("size".to_string(), self.size.to_string()));
        params.push(("sort".to_string(), self.sort.to_param()));
        params
    }
}

/// Page numbers (0-based) shown by the pager: at most [`PAGER_WINDOW`], centred on the current page
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let width = PAGER_WINDOW.min(total_pages);
    let half = PAGER_WINDOW / 2;
    let start = current
        .saturating_sub(half)
        .min(total_pages - width);
    (start..start + width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_decode_plain_page() {
        let body = r#"{"content":[{"id":1},{"id":2}],"totalElements":12,"totalPages":2,"number":0,"size":10}"#;
        let page: Page<Item> = decode_page(body, EnvelopeKind::Plain).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_decode_wrapped_page() {
        let body = r#"{"success":true,"message":"OK","data":{"content":[{"id":7}],"totalElements":1,"totalPages":1,"number":0,"size":10}}"#;
        let page: Page<Item> = decode_page(body, EnvelopeKind::Wrapped).unwrap();
        assert_eq!(page.content, vec![Item { id: 7 }]);
    }

    #[test]
    fn test_decode_wrapped_failure_surfaces_message() {
        let body = r#"{"success":false,"message":"Mã đã tồn tại","data":null}"#;
        let err = decode_body::<Item>(body, EnvelopeKind::Wrapped).unwrap_err();
        assert_eq!(err, ApiError::Validation("Mã đã tồn tại".to_string()));
    }

    #[test]
    fn test_decode_bare_array_as_single_page() {
        let page: Page<Item> = decode_page(r#"[{"id":1},{"id":2},{"id":3}]"#, EnvelopeKind::Plain).unwrap();
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = decode_page::<Item>("<html>", EnvelopeKind::Plain).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_sort_parse_and_toggle() {
        let sort = SortSpec::parse("tenMau,desc").unwrap();
        assert_eq!(sort, SortSpec::desc("tenMau"));
        assert_eq!(sort.toggled("tenMau"), SortSpec::asc("tenMau"));
        assert_eq!(sort.toggled("maMau"), SortSpec::asc("maMau"));
        assert_eq!(SortSpec::parse("id").unwrap(), SortSpec::asc("id"));
        assert!(SortSpec::parse(",asc").is_none());
        assert!(SortSpec::parse("id,sideways").is_none());
    }

    #[test]
    fn test_params_skip_empty_filters() {
        let mut query = PageQuery::new(SortSpec::desc("id"), 10);
        query.keyword = "  đỏ ".to_string();
        query.filters.insert("trangThai".to_string(), "".to_string());
        query.filters.insert("quocGia".to_string(), "Việt Nam".to_string());
        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("keyword".to_string(), "đỏ".to_string()),
                ("quocGia".to_string(), "Việt Nam".to_string()),
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string()),
                ("sort".to_string(), "id,desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_window_bounds() {
        assert_eq!(page_window(0, 0), Vec::<usize>::new());
        assert_eq!(page_window(0, 3), vec![0, 1, 2]);
        assert_eq!(page_window(0, 12), vec![0, 1, 2, 3, 4]);
        assert_eq!(page_window(6, 12), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(11, 12), vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_from_items_slices() {
        let page = Page::from_items((1..=12).collect::<Vec<i32>>(), 1, 5);
        assert_eq!(page.content, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total_pages, 3);
        let empty = Page::from_items(Vec::<i32>::new(), 0, 5);
        assert_eq!(empty.total_pages, 0);
    }
}
