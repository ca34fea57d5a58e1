//! Time-series command handlers.

use std::sync::Arc;

use tabled::Tabled;

use modekit_core::{QueryKey, Suppress, TimeSeries};

use crate::cli::{GlobalOpts, SeriesCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "First")]
    first: String,
    #[tabled(rename = "Last")]
    last: String,
}

impl From<&Arc<TimeSeries>> for SeriesRow {
    fn from(s: &Arc<TimeSeries>) -> Self {
        Self {
            id: s.id.clone(),
            module: util::or_dash(Some(&s.module_id)),
            tags: tags(s),
            first: util::fmt_time(s.first_timestamp.as_ref()),
            last: util::fmt_time(s.last_timestamp.as_ref()),
        }
    }
}

fn tags(s: &TimeSeries) -> String {
    if s.tags.is_empty() {
        return "-".into();
    }
    s.tags
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn detail(s: &Arc<TimeSeries>) -> String {
    output::detail(&[
        ("ID", s.id.clone()),
        ("Home", s.home_id.to_string()),
        ("Module", util::or_dash(Some(&s.module_id))),
        ("Tags", tags(s)),
        ("First", util::fmt_time(s.first_timestamp.as_ref())),
        ("Last", util::fmt_time(s.last_timestamp.as_ref())),
    ])
}

pub async fn handle(cmd: SeriesCommand, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        SeriesCommand::List { home } => {
            let home_id = home.home_id;
            // Homes without the TSDB module have no series at all.
            ctx.fetcher
                .fetch_time_series(home_id, Suppress::With(Vec::new()))
                .await?;

            let state = ctx.fetcher.state();
            let series = ctx
                .selectors
                .time_series
                .select(&state.time_series, &home_id, &QueryKey::all())
                .unwrap_or_default();
            let out = output::render_list(
                &global.output,
                series.as_slice(),
                |s| SeriesRow::from(s),
                |s| s.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SeriesCommand::Get { home, id } => {
            let home_id = home.home_id;
            ctx.fetcher
                .fetch_time_series_info(home_id, &id, Suppress::Never)
                .await
                .map_err(|e| CliError::from(e).for_resource("time series", &id, "series list"))?;
            let series = ctx
                .fetcher
                .state()
                .time_series
                .get(&home_id, &id)
                .ok_or_else(|| util::not_found("time series", &id, "series list"))?;
            let out = output::render_single(&global.output, &series, detail, |s| s.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
