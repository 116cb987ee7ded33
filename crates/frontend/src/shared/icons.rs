use leptos::prelude::*;

/// Stroke paths (24x24 viewBox) of each icon
fn paths(name: &str) -> &'static [&'static str] {
    match name {
        // navigation
        "chevron-right" => &["M9 18l6-6-6-6"],
        "chevron-left" => &["M15 18l-6-6 6-6"],
        "chevron-down" => &["M6 9l6 6 6-6"],
        "chevrons-left" => &["M11 17l-5-5 5-5", "M18 17l-5-5 5-5"],
        "chevrons-right" => &["M13 17l5-5-5-5", "M6 17l5-5-5-5"],
        "panel-left-close" => &["M3 5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z", "M9 3v18", "M16 15l-3-3 3-3"],
        "panel-left-open" => &["M3 5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z", "M9 3v18", "M14 9l3 3-3 3"],

        // actions
        "plus" => &["M12 5v14", "M5 12h14"],
        "edit" => &["M12 20h9", "M16.5 3.5a2.12 2.12 0 0 1 3 3L7 19l-4 1 1-4z"],
        "delete" => &["M3 6h18", "M19 6l-1 14a2 2 0 0 1-2 2H8a2 2 0 0 1-2-2L5 6", "M10 11v6", "M14 11v6", "M9 6V4a1 1 0 0 1 1-1h4a1 1 0 0 1 1 1v2"],
        "eye" => &["M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8z", "M12 9a3 3 0 1 0 0 6 3 3 0 0 0 0-6z"],
        "refresh" => &["M23 4v6h-6", "M1 20v-6h6", "M3.51 9a9 9 0 0 1 14.85-3.36L23 10", "M1 14l4.64 4.36A9 9 0 0 0 20.49 15"],
        "search" => &["M11 4a7 7 0 1 0 0 14 7 7 0 0 0 0-14z", "M21 21l-4.35-4.35"],
        "x" => &["M18 6L6 18", "M6 6l12 12"],
        "check" => &["M20 6L9 17l-5-5"],
        "star" => &["M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01z"],
        "minus" => &["M5 12h14"],

        // notices
        "info" => &["M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z", "M12 16v-4", "M12 8h.01"],
        "alert-triangle" => &["M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z", "M12 9v4", "M12 17h.01"],
        "x-circle" => &["M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z", "M15 9l-6 6", "M9 9l6 6"],

        // sections
        "package" => &["M21 16V8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16z", "M3.27 6.96L12 12l8.73-5.04", "M12 22V12"],
        "palette" => &["M12 2a10 10 0 0 0 0 20c1.1 0 2-.9 2-2 0-.5-.2-1-.5-1.3-.3-.4-.5-.8-.5-1.3 0-1.1.9-2 2-2h2.4A5.6 5.6 0 0 0 22 9.8C22 5.5 17.5 2 12 2z", "M7.5 10.5h.01", "M10.5 6.5h.01", "M15.5 7.5h.01"],
        "layers" => &["M12 2L2 7l10 5 10-5-10-5z", "M2 17l10 5 10-5", "M2 12l10 5 10-5"],
        "users" => &["M17 21v-2a4 4 0 0 0-4-4H7a4 4 0 0 0-4 4v2", "M9 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z", "M23 21v-2a4 4 0 0 0-3-3.87", "M16 3.13a4 4 0 0 1 0 7.75"],
        "user" => &["M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2", "M12 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z"],
        "map-pin" => &["M21 10c0 7-9 13-9 13S3 17 3 10a9 9 0 0 1 18 0z", "M12 7a3 3 0 1 0 0 6 3 3 0 0 0 0-6z"],
        "file-text" => &["M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z", "M14 2v6h6", "M16 13H8", "M16 17H8", "M10 9H8"],
        "tag" => &["M20.59 13.41l-7.17 7.17a2 2 0 0 1-2.83 0L2 12V2h10l8.59 8.59a2 2 0 0 1 0 2.82z", "M7 7h.01"],
        "ticket" => &["M3 7a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2v3a2 2 0 0 0 0 4v3a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-3a2 2 0 0 0 0-4z", "M13 5v2", "M13 17v2", "M13 11v2"],
        "barcode" => &["M3 5v14", "M8 5v14", "M12 5v14", "M17 5v14", "M21 5v14"],
        "warehouse" => &["M22 8.35V20a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V8.35A2 2 0 0 1 3.26 6.5l8-3.2a2 2 0 0 1 1.48 0l8 3.2A2 2 0 0 1 22 8.35z", "M6 18h12", "M6 14h12", "M6 10h12"],
        "shopping-cart" => &["M9 20a1 1 0 1 0 0 2 1 1 0 0 0 0-2z", "M20 20a1 1 0 1 0 0 2 1 1 0 0 0 0-2z", "M1 1h4l2.68 13.39a2 2 0 0 0 2 1.61h9.72a2 2 0 0 0 2-1.61L23 6H6"],
        "shield" => &["M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z"],
        "helmet" => &["M4 15a8 8 0 0 1 16 0v2H4z", "M12 7V4", "M4 17h16v2a1 1 0 0 1-1 1H5a1 1 0 0 1-1-1z"],
        "clock" => &["M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z", "M12 6v6l4 2"],

        _ => &["M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z", "M12 8v4l3 3"],
    }
}

pub fn icon(name: &str) -> AnyView {
    let size = if name.starts_with("chevron") { "16" } else { "20" };
    let paths = paths(name);
    view! {
        <svg
            width=size
            height=size
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            {paths.iter().map(|d| view! { <path d=*d /> }).collect_view()}
        </svg>
    }
    .into_any()
}
