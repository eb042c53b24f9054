//! Terminal rendering for turn outcomes and the catalog listing

use owo_colors::OwoColorize;
use yojana_shared::{SchemeCatalog, SlotUpdate, SlotValue, TurnOutcome};

/// Render a slot update as `slot = value`
pub fn format_update(update: &SlotUpdate) -> String {
    let value = match &update.value {
        Some(SlotValue::Number(n)) => n.to_string(),
        Some(SlotValue::Text(s)) => format!("\"{}\"", s),
        None => "null".to_string(),
    };
    format!("{} = {}", update.slot, value)
}

/// Print the emitted message followed by any slot updates
pub fn display_outcome(outcome: &TurnOutcome) {
    if let Some(message) = &outcome.message {
        println!("{}", message);
    }

    if !outcome.updates.is_empty() {
        println!();
        println!("{}", "[SLOTS]".cyan());
        for update in &outcome.updates {
            println!("  {}", format_update(update));
        }
    }
}

/// One-line catalog summary for the listing header
pub fn catalog_summary(catalog: &SchemeCatalog) -> String {
    if catalog.is_empty() {
        return "no scheme documents".to_string();
    }
    let aliases = catalog.aliases().len();
    format!(
        "{} scheme{}, {} alias{}",
        catalog.len(),
        if catalog.len() == 1 { "" } else { "s" },
        aliases,
        if aliases == 1 { "" } else { "es" }
    )
}

/// Print scheme keys with titles, and aliases when asked
pub fn display_catalog(catalog: &SchemeCatalog, show_aliases: bool) {
    println!("{} {}", "[SCHEMES]".cyan(), catalog_summary(catalog).dimmed());
    for record in catalog.records() {
        if record.title.is_empty() {
            println!("  {}", record.key.bold());
        } else {
            println!("  {}  {}", record.key.bold(), record.title.dimmed());
        }
    }

    if show_aliases {
        println!();
        println!("{}", "[ALIASES]".cyan());
        for alias in catalog.aliases() {
            let marker = if catalog.contains(&alias.scheme) {
                String::new()
            } else {
                format!(" {}", "(no document)".yellow())
            };
            println!("  {} -> {}{}", alias.keyword, alias.scheme, marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_update() {
        let amount = SlotUpdate::set("income_amount", Some(SlotValue::Number(2.5)));
        assert_eq!(format_update(&amount), "income_amount = 2.5");

        let unit = SlotUpdate::set("income_unit", Some(SlotValue::Text("lakhs".into())));
        assert_eq!(format_update(&unit), "income_unit = \"lakhs\"");

        let cleared = SlotUpdate::set("income_unit", None);
        assert_eq!(format_update(&cleared), "income_unit = null");
    }

    #[test]
    fn test_catalog_summary() {
        let builtin = SchemeCatalog::builtin().unwrap();
        assert_eq!(catalog_summary(&builtin), "10 schemes, 7 aliases");

        let empty = SchemeCatalog::new(Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert_eq!(catalog_summary(&empty), "no scheme documents");
    }
}
