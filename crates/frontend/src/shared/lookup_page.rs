//! Shared columns, cells and form of the eight attribute lookups
//! (color, material, manufacturer, origin, weight, helmet type, style, safety tech).

use contracts::domain::common::{LookupForm, LookupResource, LookupRow};
use contracts::shared::validation::rules;
use leptos::prelude::*;

use crate::shared::components::ui::{ActiveBadge, Checkbox, Input, Select, Textarea};
use crate::shared::form::FormHandle;
use crate::shared::resource_page::Column;

pub fn lookup_columns<R: LookupResource>() -> Vec<Column> {
    let fields = R::fields();
    let mut columns = vec![
        Column::sortable("ID", "id"),
        Column::sortable(fields.name_label, fields.name_sort),
    ];
    if let Some(label) = fields.code_label {
        columns.push(Column::plain(label));
    }
    if let Some(label) = fields.extra_label {
        columns.push(Column::plain(label));
    }
    if fields.has_description {
        columns.push(Column::plain("Mô tả"));
    }
    columns.push(Column::sortable("Trạng thái", "trangThai"));
    columns
}

pub fn lookup_cells<R: LookupResource>(row: &LookupRow) -> AnyView {
    let fields = R::fields();
    let swatch = row.code.clone();
    view! {
        <td class="table__cell table__cell--id">{row.id}</td>
        <td class="table__cell table__cell--name">{R::option_label(row)}</td>
        {fields.code_label.map(|_| view! {
            <td class="table__cell">
                <span class="color-swatch" style:background-color=swatch.clone()></span>
                {swatch}
            </td>
        })}
        {fields.extra_label.map(|_| view! { <td class="table__cell">{row.extra.clone()}</td> })}
        {fields.has_description.then(|| view! {
            <td class="table__cell table__cell--muted">{row.description.clone()}</td>
        })}
        <td class="table__cell"><ActiveBadge active=row.active /></td>
    }
    .into_any()
}

/// Lookup form; `extra_choices` turns the extra field into a drop-down
pub fn lookup_form<R: LookupResource>(
    form: FormHandle<LookupForm>,
    extra_choices: Option<&'static [&'static str]>,
) -> AnyView {
    let fields = R::fields();
    let locked = form.locked();

    view! {
        <div class="form">
            <Input
                label=fields.name_label
                value=form.value(|f| f.name.clone())
                on_input=form.on_input(|f, v| f.name = v)
                on_blur=form.on_blur("name")
                error=form.error("name")
                disabled=locked
                required=true
            />
            {fields.code_label.map(|label| {
                let code = form.value(|f| f.code.clone());
                view! {
                    <div class="form__row">
                        <Input
                            label=label
                            value=code
                            on_input=form.on_input(|f, v| f.code = v)
                            on_blur=form.on_blur("code")
                            error=form.error("code")
                            disabled=locked
                            placeholder="#RRGGBB"
                            required=true
                        />
                        <input
                            type="color"
                            class="form__color-picker"
                            prop:value=move || code.get()
                            disabled=move || locked.get()
                            on:input=move |ev| {
                                let value = event_target_value(&ev).to_uppercase();
                                form.edit(|f| f.code = value);
                            }
                        />
                    </div>
                }
            })}
            {fields.extra_label.map(|label| match extra_choices {
                Some(choices) => view! {
                    <Select
                        label=label
                        value=form.value(|f| f.extra.clone())
                        on_change=form.on_input(|f, v| f.extra = v)
                        options=Signal::stored(
                            choices.iter().map(|c| (c.to_string(), c.to_string())).collect::<Vec<_>>(),
                        )
                        error=form.error("extra")
                        disabled=locked
                        required=true
                    />
                }.into_any(),
                None => view! {
                    <Input
                        label=label
                        value=form.value(|f| f.extra.clone())
                        on_input=form.on_input(|f, v| f.extra = v)
                        on_blur=form.on_blur("extra")
                        error=form.error("extra")
                        disabled=locked
                    />
                }.into_any(),
            })}
            {fields.has_description.then(|| view! {
                <Textarea
                    label="Mô tả"
                    max_len=rules::DESCRIPTION_MAX
                    value=form.value(|f| f.description.clone())
                    on_input=form.on_input(|f, v| f.description = v)
                    on_blur=form.on_blur("description")
                    error=form.error("description")
                    disabled=locked
                    rows=3
                />
            })}
            <Checkbox
                label="Hoạt động"
                checked=form.checked(|f| f.active)
                on_change=form.on_toggle(|f, v| f.active = v)
                disabled=locked
            />
        </div>
    }
    .into_any()
}
