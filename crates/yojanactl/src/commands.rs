//! Command implementations for yojanactl

use crate::output::{display_catalog, display_outcome};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use yojana_shared::income_resolver::session_income;
use yojana_shared::turn::{slots_from_json, SLOT_INCOME_AMOUNT, SLOT_INCOME_UNIT};
use yojana_shared::{
    AdvisorConfig, Entity, IncomeResolution, SchemeResolution, SlotValue, TurnInput, TurnOutcome,
};

/// Which resolver a host turn is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TurnAction {
    Income,
    Scheme,
}

/// Parse `TYPE=VALUE` into an entity
pub fn parse_entity(raw: &str) -> Result<Entity> {
    match raw.split_once('=') {
        Some((kind, value)) if !kind.trim().is_empty() => {
            Ok(Entity::new(kind.trim(), value.trim()))
        }
        _ => bail!("Invalid entity '{}'. Expected TYPE=VALUE", raw),
    }
}

/// JSON view of an income turn
pub fn income_json(resolution: &IncomeResolution, outcome: &TurnOutcome) -> Value {
    match resolution {
        IncomeResolution::NeedsInput => json!({
            "status": "needs_input",
            "message": outcome.message,
            "updates": outcome.updates,
        }),
        IncomeResolution::Resolved {
            income,
            lpa,
            bracket,
            source,
        } => json!({
            "status": "resolved",
            "income": income,
            "lpa": lpa,
            "bracket": bracket,
            "source": source,
            "message": outcome.message,
            "updates": outcome.updates,
        }),
    }
}

/// JSON view of a scheme turn
pub fn scheme_json(resolution: &SchemeResolution<'_>, outcome: &TurnOutcome) -> Value {
    match resolution {
        SchemeResolution::Found { record, source } => json!({
            "status": "found",
            "scheme": record.key,
            "source": source,
            "message": outcome.message,
        }),
        SchemeResolution::NotFound { candidate } => json!({
            "status": "not_found",
            "candidate": candidate,
            "message": outcome.message,
        }),
    }
}

/// Recommend schemes for a stated income
pub fn income(
    config: &AdvisorConfig,
    text: &str,
    amount: Option<f64>,
    unit: Option<String>,
    as_json: bool,
) -> Result<()> {
    let resolver = config
        .income_resolver()
        .context("Failed to load recommendation bundles")?;

    let mut slots: BTreeMap<String, SlotValue> = BTreeMap::new();
    if let Some(amount) = amount {
        slots.insert(SLOT_INCOME_AMOUNT.to_string(), SlotValue::Number(amount));
    }
    if let Some(unit) = unit {
        slots.insert(SLOT_INCOME_UNIT.to_string(), SlotValue::Text(unit));
    }

    let session = session_income(&slots);
    let resolution = resolver.resolve(session.as_ref(), text);
    let outcome = resolver.respond(&resolution);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&income_json(&resolution, &outcome))?);
    } else {
        display_outcome(&outcome);
    }
    Ok(())
}

/// Show a scheme's details document
pub fn scheme(config: &AdvisorConfig, text: &str, entities: &[String], as_json: bool) -> Result<()> {
    let resolver = config
        .scheme_resolver()
        .context("Failed to load scheme catalog")?;

    let entities = entities
        .iter()
        .map(|raw| parse_entity(raw))
        .collect::<Result<Vec<_>>>()?;

    let resolution = resolver.resolve(&entities, text);
    let outcome = resolver.respond(&resolution);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&scheme_json(&resolution, &outcome))?);
    } else {
        display_outcome(&outcome);
    }
    Ok(())
}

/// Resolve a host turn payload and print the outcome as JSON.
///
/// Payload: `{"text": ..., "entities": [{"entity", "value"}], "slots": {...}}`
pub fn turn(config: &AdvisorConfig, action: TurnAction, input: Option<&Path>) -> Result<()> {
    let raw = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read turn from stdin")?;
            buf
        }
    };

    let outcome = handle_turn(config, action, &raw)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Parse a host payload and run the chosen resolver
pub fn handle_turn(config: &AdvisorConfig, action: TurnAction, raw: &str) -> Result<TurnOutcome> {
    let payload: Value = serde_json::from_str(raw).context("Turn payload is not valid JSON")?;
    let turn = TurnInput::from_json_lenient(&payload);
    debug!(?action, entities = turn.entities.len(), "handling host turn");

    let outcome = match action {
        TurnAction::Income => {
            let slots = payload.get("slots").map(slots_from_json).unwrap_or_default();
            config
                .income_resolver()
                .context("Failed to load recommendation bundles")?
                .outcome(&slots, &turn)
        }
        TurnAction::Scheme => config
            .scheme_resolver()
            .context("Failed to load scheme catalog")?
            .outcome(&turn),
    };
    Ok(outcome)
}

/// List catalog contents
pub fn catalog(config: &AdvisorConfig, show_aliases: bool) -> Result<()> {
    let catalog = config
        .scheme_catalog()
        .context("Failed to load scheme catalog")?;
    display_catalog(&catalog, show_aliases);
    Ok(())
}
