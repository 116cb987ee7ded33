use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Badge content
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    view! {
        <span class=move || format!("badge {}", variant_class())>
            {children()}
        </span>
    }
}

/// Status pill; `class` comes from the status tables, e.g. "status-paid"
#[component]
pub fn StatusBadge(
    #[prop(into)]
    class: String,
    #[prop(into)]
    label: String,
) -> impl IntoView {
    view! {
        <span class=format!("badge badge--status {}", class)>
            {label}
        </span>
    }
}

/// "Hoạt động" / "Ngừng hoạt động"
#[component]
pub fn ActiveBadge(active: bool) -> impl IntoView {
    let variant = if active { "success" } else { "neutral" };
    view! {
        <Badge variant=variant>
            {contracts::shared::labels::active_label(active)}
        </Badge>
    }
}
