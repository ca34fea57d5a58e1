//! Alert command handlers.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::Tabled;

use modekit_core::{Alert, AlertLevel};

use crate::cli::{AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Raised")]
    raised: String,
}

impl AlertRow {
    fn new(a: &Arc<Alert>, color: bool) -> Self {
        Self {
            id: a.id,
            level: level_cell(a.level, color),
            device: a.device_id.map_or_else(|| "-".into(), |d| d.to_string()),
            message: a.message.clone(),
            raised: util::fmt_time(a.creation_time.as_ref()),
        }
    }
}

fn level_cell(level: AlertLevel, color: bool) -> String {
    let text = level.to_string();
    if !color {
        return text;
    }
    match level {
        AlertLevel::Critical => text.red().to_string(),
        AlertLevel::Warning => text.yellow().to_string(),
        AlertLevel::Info | AlertLevel::Unknown => text,
    }
}

pub async fn handle(cmd: AlertsCommand, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        AlertsCommand::List { home, page } => {
            let home_id = home.home_id;
            let page = ctx.page(&page);
            ctx.fetcher
                .fetch_alerts(home_id, page)
                .await
                .map_err(|e| CliError::from(e).for_resource("home", &home_id.to_string(), "homes list"))?;

            let state = ctx.fetcher.state();
            let key = page.key();
            let alerts = ctx
                .selectors
                .alerts
                .select(&state.alerts, &home_id, &key)
                .unwrap_or_default();
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                alerts.as_slice(),
                |a| AlertRow::new(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if let Some(total) = ctx.selectors.alerts.total(&state.alerts, &home_id, &key) {
                output::hint(global, &util::page_footer(page, alerts.len(), total));
            }
            Ok(())
        }

        AlertsCommand::Delete { home, id } => {
            if !util::confirm("alerts delete", &format!("Dismiss alert {id}?"), global.yes)? {
                return Ok(());
            }
            ctx.fetcher
                .delete_alert(home.home_id, id)
                .await
                .map_err(|e| CliError::from(e).for_resource("alert", &id.to_string(), "alerts list"))?;
            output::success(global, &format!("Alert {id} dismissed"));
            Ok(())
        }
    }
}
