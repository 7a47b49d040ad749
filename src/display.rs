//! Presentation helpers shared by the CLI and the GUI.

use num_format::{Locale, ToFormattedString};
use std::time::Duration;

/// Map a user-provided locale tag to a `num_format::Locale`.
/// Supported tags (case-insensitive): "en", "us", "en_US", "de", "de_DE", "german", "fr", "es", "it", "pt", "nl"
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Format a population count with locale-aware digit grouping.
pub fn format_population(population: u64, locale_tag: &str) -> String {
    population.to_formatted_string(map_locale(locale_tag))
}

/// Pacing for the optional staggered card reveal: how many of `total` cards
/// are visible `elapsed` after results arrived, revealing one more every
/// `per_card`. A zero `per_card` shows everything at once.
pub fn revealed_cards(elapsed: Duration, per_card: Duration, total: usize) -> usize {
    if per_card.is_zero() {
        return total;
    }
    let shown = (elapsed.as_millis() / per_card.as_millis()) as usize + 1;
    shown.min(total)
}
