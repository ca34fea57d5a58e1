//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};

use modekit_core::{KvOwner, Page};

use crate::cli::OwnerArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Not-found error pointing at the matching list command.
pub fn not_found(resource_type: &str, identifier: impl ToString, list_command: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: identifier.to_string(),
        list_command: list_command.into(),
    }
}

/// `Page 2 · 10-19 of 42` style footer for paged lists.
pub fn page_footer(page: Page, shown: usize, total: u64) -> String {
    if shown == 0 {
        return format!("Page {} · no items ({total} total)", page.page_number);
    }
    let first = page.skip();
    let last = first.saturating_add(u64::try_from(shown).unwrap_or(u64::MAX) - 1);
    format!("Page {} · {first}-{last} of {total}", page.page_number)
}

/// Key-value owner from `--device` / `--home`.
pub fn owner(args: &OwnerArgs) -> Result<KvOwner, CliError> {
    match (args.device, args.home) {
        (Some(id), None) => Ok(KvOwner::Device(id)),
        (None, Some(id)) => Ok(KvOwner::Home(id)),
        _ => Err(CliError::Validation {
            field: "owner".into(),
            reason: "pass exactly one of --device or --home".into(),
        }),
    }
}

/// Parse a value given on the command line: JSON when it parses, a
/// plain string otherwise.
pub fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}

/// Compact rendering of a JSON value for table cells.
pub fn value_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn fmt_time(time: Option<&DateTime<Utc>>) -> String {
    time.map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

pub fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_parse_and_bare_words_stay_strings() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value(r#"{"on":true}"#), json!({"on": true}));
        assert_eq!(parse_value("living room"), json!("living room"));
    }

    #[test]
    fn string_cells_are_unquoted() {
        assert_eq!(value_cell(&json!("dim")), "dim");
        assert_eq!(value_cell(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn owner_picks_the_given_flag() {
        let args = OwnerArgs {
            device: None,
            home: Some(9),
        };
        assert_eq!(owner(&args).ok(), Some(KvOwner::Home(9)));
    }

    #[test]
    fn footer_counts_from_skip() {
        assert_eq!(page_footer(Page::new(1, 10), 10, 42), "Page 1 · 10-19 of 42");
        assert_eq!(page_footer(Page::new(5, 10), 0, 42), "Page 5 · no items (42 total)");
    }

    #[test]
    fn footer_saturates_on_huge_page_numbers() {
        let max = u64::MAX;
        assert_eq!(
            page_footer(Page::new(max, 10), 3, 5),
            format!("Page {max} · {max}-{max} of 5")
        );
    }

    #[test]
    fn missing_times_render_as_dash() {
        assert_eq!(fmt_time(None), "-");
        assert_eq!(or_dash(Some("")), "-");
    }
}
