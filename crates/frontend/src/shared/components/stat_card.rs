use leptos::prelude::*;

use super::card_animated::CardAnimated;
use crate::shared::icons::icon;

/// Coloring of a [`StatCard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Good,
    Warning,
    Bad,
}

impl StatTone {
    pub fn class(&self) -> &'static str {
        match self {
            StatTone::Good => "stat-card stat-card--success",
            StatTone::Bad => "stat-card stat-card--error",
            StatTone::Warning => "stat-card stat-card--warning",
            StatTone::Neutral => "stat-card",
        }
    }
}

#[component]
pub fn StatCard(
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    tone: StatTone,
    #[prop(optional)]
    delay_ms: u32,
    #[prop(into, optional)]
    subtitle: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <CardAnimated delay_ms=delay_ms>
            <div class=tone.class()>
                <div class="stat-card__header">
                    <span class="stat-card__icon">{icon(icon_name)}</span>
                    <span class="stat-card__label">{label}</span>
                </div>
                <div class="stat-card__value">{move || value.get()}</div>
                {move || subtitle.get().map(|s| view! {
                    <div class="stat-card__subtitle">{s}</div>
                })}
            </div>
        </CardAnimated>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_class() {
        assert_eq!(StatTone::default().class(), "stat-card");
        assert_eq!(StatTone::Bad.class(), "stat-card stat-card--error");
    }
}
