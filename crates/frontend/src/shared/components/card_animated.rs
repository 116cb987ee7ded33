//! Thaw [`Card`] that fades in when mounted.
//!
//! The `card-appear` keyframes live in `layout.css`; `delay_ms` staggers a
//! row of cards.

use leptos::prelude::*;
use thaw::Card;

#[component]
pub fn CardAnimated(
    #[prop(optional)]
    delay_ms: u32,
    /// Extra inline style appended after the animation
    #[prop(optional, into)]
    style: String,
    children: Children,
) -> impl IntoView {
    view! {
        <Card attr:style=card_style(delay_ms, &style)>
            {children()}
        </Card>
    }
}

fn card_style(delay_ms: u32, extra: &str) -> String {
    let animation = format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms);
    if extra.is_empty() {
        animation
    } else {
        format!("{} {}", animation, extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_style() {
        assert_eq!(card_style(0, ""), "animation: card-appear 0.28s ease-out 0ms both;");
        assert_eq!(
            card_style(80, "max-width: 400px;"),
            "animation: card-appear 0.28s ease-out 80ms both; max-width: 400px;"
        );
    }
}
