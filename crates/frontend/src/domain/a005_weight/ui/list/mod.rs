use contracts::domain::a005_weight::aggregate::{Weight, UNITS};
use contracts::domain::common::{LookupForm, LookupResource, LookupRow};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::form::FormHandle;
use crate::shared::lookup_page::{lookup_cells, lookup_columns, lookup_form};
use crate::shared::resource_page::{resource_list, Column, ListPage, ResourceView};

impl ResourceView for Weight {
    fn search_placeholder() -> &'static str {
        Self::fields().search_placeholder
    }

    fn columns() -> Vec<Column> {
        lookup_columns::<Self>()
    }

    fn cells(row: &LookupRow) -> AnyView {
        lookup_cells::<Self>(row)
    }

    fn form(form: FormHandle<LookupForm>) -> AnyView {
        lookup_form::<Self>(form, Some(&UNITS[..]))
    }
}

#[component]
pub fn WeightList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    resource_list(ListPage::<Weight>::remote(), ctx)
}
