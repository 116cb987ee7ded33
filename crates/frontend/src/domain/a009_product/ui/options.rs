//! Drop-down options of the eight product attributes, loaded from their lookups.

use std::collections::HashMap;

use contracts::domain::a001_color::aggregate::Color;
use contracts::domain::a002_material::aggregate::Material;
use contracts::domain::a003_manufacturer::aggregate::Manufacturer;
use contracts::domain::a004_origin::aggregate::Origin;
use contracts::domain::a005_weight::aggregate::Weight;
use contracts::domain::a006_helmet_type::aggregate::HelmetType;
use contracts::domain::a007_helmet_style::aggregate::HelmetStyle;
use contracts::domain::a008_safety_tech::aggregate::SafetyTech;
use contracts::domain::a009_product::aggregate::ProductAttribute;
use contracts::domain::common::LookupResource;
use contracts::shared::error::ApiError;
use contracts::shared::paging::{PageQuery, SortSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::http;
use crate::shared::notifications::Notifier;

/// Lookups are small; one page holds all active entries
const OPTIONS_PAGE_SIZE: usize = 500;

pub type Options = Vec<(String, String)>;

#[derive(Clone, Copy)]
pub struct AttributeOptions {
    options: RwSignal<HashMap<ProductAttribute, Options>>,
}

impl AttributeOptions {
    pub fn new() -> Self {
        Self {
            options: RwSignal::new(HashMap::new()),
        }
    }

    /// Options of one attribute as `(id, label)`
    pub fn get(&self, attribute: ProductAttribute) -> Signal<Options> {
        let options = self.options;
        Signal::derive(move || options.with(|o| o.get(&attribute).cloned().unwrap_or_default()))
    }

    pub fn load_all(&self, notifier: Notifier) {
        for attribute in ProductAttribute::ALL {
            let this = *self;
            spawn_local(async move {
                match load(attribute).await {
                    Ok(list) => {
                        let _ = this.options.try_update(|o| o.insert(attribute, list));
                    }
                    Err(err) => notifier.api_error(&format!("Tải {}", attribute.label().to_lowercase()), &err),
                }
            });
        }
    }
}

async fn load(attribute: ProductAttribute) -> Result<Options, ApiError> {
    match attribute {
        ProductAttribute::HelmetType => load_lookup::<HelmetType>().await,
        ProductAttribute::Manufacturer => load_lookup::<Manufacturer>().await,
        ProductAttribute::Material => load_lookup::<Material>().await,
        ProductAttribute::Weight => load_lookup::<Weight>().await,
        ProductAttribute::Origin => load_lookup::<Origin>().await,
        ProductAttribute::Style => load_lookup::<HelmetStyle>().await,
        ProductAttribute::SafetyTech => load_lookup::<SafetyTech>().await,
        ProductAttribute::Color => load_lookup::<Color>().await,
    }
}

async fn load_lookup<R: LookupResource>() -> Result<Options, ApiError> {
    let mut query = PageQuery::new(SortSpec::asc(R::fields().name_sort), OPTIONS_PAGE_SIZE);
    query.filters.insert("trangThai".to_string(), "true".to_string());
    let page = http::fetch_page::<R>(&query).await?;
    Ok(page
        .content
        .iter()
        .map(|row| (row.id.to_string(), R::option_label(row)))
        .collect())
}
