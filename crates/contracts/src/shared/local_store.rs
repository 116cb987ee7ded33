//! In-memory dataset for screens without a backend (inventory, counter sales).
//!
//! Answers the same [`PageQuery`] a remote list would, so the list screen does
//! not care where its rows come from.

use std::cmp::Ordering;

use super::error::ApiError;
use super::paging::{Page, PageQuery, SortDirection};
use super::resource::EntityId;

/// A record the in-memory store can search, filter and sort
pub trait LocalRecord: Clone {
    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);

    /// `keyword` is already lower-cased and non-empty
    fn matches_keyword(&self, keyword: &str) -> bool;

    /// Unknown keys match everything
    fn matches_filter(&self, key: &str, value: &str) -> bool;

    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalStore<T> {
    items: Vec<T>,
    next_id: EntityId,
}

impl<T: LocalRecord> LocalStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        let next_id = items.iter().map(LocalRecord::id).max().unwrap_or(0) + 1;
        Self { items, next_id }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn query(&self, query: &PageQuery) -> Page<T> {
        let keyword = query.keyword.trim().to_lowercase();
        let mut matched: Vec<T> = self
            .items
            .iter()
            .filter(|item| keyword.is_empty() || item.matches_keyword(&keyword))
            .filter(|item| {
                query
                    .filters
                    .iter()
                    .filter(|(_, value)| !value.trim().is_empty())
                    .all(|(key, value)| item.matches_filter(key, value.trim()))
            })
            .cloned()
            .collect();

        let field = query.sort.field.as_str();
        matched.sort_by(|a, b| {
            let cmp = a.compare_by_field(b, field);
            match query.sort.direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        });

        Page::from_items(matched, query.page, query.size)
    }

    /// Assigns the next id; newest records go first
    pub fn create(&mut self, mut item: T) -> T {
        item.set_id(self.next_id);
        self.next_id += 1;
        self.items.insert(0, item.clone());
        item
    }

    pub fn update(&mut self, id: EntityId, mut item: T) -> Result<T, ApiError> {
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or(ApiError::NotFound)?;
        item.set_id(id);
        *slot = item.clone();
        Ok(item)
    }

    pub fn delete(&mut self, id: EntityId) -> Result<(), ApiError> {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}

/// Case-insensitive substring test used by `matches_keyword` implementations
pub fn contains_folded(haystack: &str, keyword: &str) -> bool {
    haystack.to_lowercase().contains(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::paging::SortSpec;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: EntityId,
        title: String,
        tag: String,
    }

    impl LocalRecord for Note {
        fn id(&self) -> EntityId {
            self.id
        }

        fn set_id(&mut self, id: EntityId) {
            self.id = id;
        }

        fn matches_keyword(&self, keyword: &str) -> bool {
            contains_folded(&self.title, keyword)
        }

        fn matches_filter(&self, key: &str, value: &str) -> bool {
            key != "tag" || self.tag == value
        }

        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "title" => self.title.cmp(&other.title),
                _ => self.id.cmp(&other.id),
            }
        }
    }

    fn note(id: EntityId, title: &str, tag: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            tag: tag.to_string(),
        }
    }

    fn store() -> LocalStore<Note> {
        LocalStore::new(vec![
            note(1, "Mũ AGV", "a"),
            note(2, "Mũ Shoei", "b"),
            note(3, "Kính", "a"),
        ])
    }

    #[test]
    fn test_query_filters_sorts_and_pages() {
        let store = store();
        let mut query = PageQuery::new(SortSpec::asc("title"), 10);
        query.keyword = "MŨ".to_string();
        let page = store.query(&query);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.content[0].title, "Mũ AGV");

        query.keyword.clear();
        query.filters.insert("tag".into(), "a".into());
        query.sort = SortSpec::desc("id");
        let ids: Vec<_> = store.query(&query).content.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1]);

        query.filters.clear();
        query.size = 2;
        query.page = 1;
        let page = store.query(&query);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 1);
    }

    #[test]
    fn test_create_update_delete() {
        let mut store = store();
        let created = store.create(note(0, "Găng tay", "c"));
        assert_eq!(created.id, 4);
        assert_eq!(store.items()[0].id, 4);

        let updated = store.update(4, note(0, "Găng tay da", "c")).unwrap();
        assert_eq!(updated.id, 4);
        assert_eq!(store.get(4).map(|n| n.title.as_str()), Some("Găng tay da"));

        assert!(store.delete(4).is_ok());
        assert_eq!(store.delete(4), Err(ApiError::NotFound));
        assert_eq!(store.update(99, note(0, "x", "a")), Err(ApiError::NotFound));
    }
}
