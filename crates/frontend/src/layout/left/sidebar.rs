//! Sidebar with collapsible menu groups; an item opens (or activates) its tab

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "sales",
            label: "Bán hàng",
            icon: "shopping-cart",
            items: vec![
                ("a018_counter_sale", "shopping-cart"),
                ("a013_invoice", "file-text"),
            ],
        },
        MenuGroup {
            id: "products",
            label: "Sản phẩm",
            icon: "helmet",
            items: vec![
                ("a009_product", "helmet"),
                ("a016_imei", "barcode"),
                ("a017_inventory", "warehouse"),
            ],
        },
        MenuGroup {
            id: "attributes",
            label: "Thuộc tính sản phẩm",
            icon: "layers",
            items: vec![
                ("a001_color", "palette"),
                ("a002_material", "layers"),
                ("a003_manufacturer", "package"),
                ("a004_origin", "map-pin"),
                ("a005_weight", "package"),
                ("a006_helmet_type", "helmet"),
                ("a007_helmet_style", "star"),
                ("a008_safety_tech", "shield"),
                ("a019_size", "package"),
            ],
        },
        MenuGroup {
            id: "people",
            label: "Khách hàng & nhân viên",
            icon: "users",
            items: vec![("a010_customer", "users"), ("a012_staff", "user")],
        },
        MenuGroup {
            id: "discounts",
            label: "Khuyến mãi",
            icon: "tag",
            items: vec![("a014_promotion", "tag"), ("a015_voucher", "ticket")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let expanded_groups = RwSignal::new(vec!["sales".to_string()]);

    let toggle_group = move |id: &'static str| {
        expanded_groups.update(|groups| {
            if let Some(pos) = groups.iter().position(|g| g == id) {
                groups.remove(pos);
            } else {
                groups.push(id.to_string());
            }
        });
    };

    view! {
        <nav class="app-sidebar__content">
            {menu_groups().into_iter().map(|group| {
                let id = group.id;
                let is_expanded = move || expanded_groups.with(|g| g.iter().any(|x| x == id));
                view! {
                    <div class="app-sidebar__group">
                        <div class="app-sidebar__item app-sidebar__item--group" on:click=move |_| toggle_group(id)>
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=is_expanded
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <Show when=is_expanded>
                            <div class="app-sidebar__children">
                                {group.items.iter().map(|&(key, icon_name)| {
                                    let label = tab_label_for_key(key);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.with(|a| a.as_deref() == Some(key))
                                            }
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_item_has_a_tab_title() {
        for group in menu_groups() {
            for (key, _) in group.items {
                assert!(!tab_label_for_key(key).is_empty(), "no title for {}", key);
            }
        }
    }
}
