//! Home command handlers.

use std::sync::Arc;

use tabled::Tabled;

use modekit_core::{Home, HomeUpdate, NewHome};

use crate::cli::{GlobalOpts, HomesCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct HomeRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Timezone")]
    timezone: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Arc<Home>> for HomeRow {
    fn from(h: &Arc<Home>) -> Self {
        Self {
            id: h.id,
            name: h.name.clone(),
            timezone: util::or_dash(h.timezone.as_deref()),
            created: util::fmt_time(h.creation_time.as_ref()),
        }
    }
}

fn detail(h: &Arc<Home>) -> String {
    output::detail(&[
        ("ID", h.id.to_string()),
        ("Name", h.name.clone()),
        ("Project", h.project_id.to_string()),
        ("Timezone", util::or_dash(h.timezone.as_deref())),
        ("Created", util::fmt_time(h.creation_time.as_ref())),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(cmd: HomesCommand, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        HomesCommand::List { user, page } => {
            let user_id = ctx.user_id(user)?;
            let page = ctx.page(&page);
            ctx.fetcher.fetch_homes(user_id, page).await?;

            let state = ctx.fetcher.state();
            let key = page.key();
            let homes = ctx
                .selectors
                .homes
                .select(&state.homes, &user_id, &key)
                .unwrap_or_default();
            let out = output::render_list(
                &global.output,
                homes.as_slice(),
                |h| HomeRow::from(h),
                |h| h.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if let Some(total) = ctx.selectors.homes.total(&state.homes, &user_id, &key) {
                output::hint(global, &util::page_footer(page, homes.len(), total));
            }
            Ok(())
        }

        HomesCommand::Get { id } => {
            ctx.fetcher
                .fetch_home(id)
                .await
                .map_err(|e| CliError::from(e).for_resource("home", &id.to_string(), "homes list"))?;
            let home = lookup(ctx, id)?;
            let out = output::render_single(&global.output, &home, detail, |h| h.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HomesCommand::Create { name, timezone } => {
            let user_id = ctx.user_id(None)?;
            let home = ctx
                .fetcher
                .create_home(user_id, &NewHome { name, timezone })
                .await?;
            output::success(global, &format!("Home '{}' created (id {})", home.name, home.id));
            let home = Arc::new(home);
            let out = output::render_single(&global.output, &home, detail, |h| h.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HomesCommand::Rename { id, name } => {
            let user_id = ctx.user_id(None)?;
            let update = HomeUpdate {
                name: Some(name),
                timezone: None,
            };
            ctx.fetcher
                .update_home(user_id, id, &update)
                .await
                .map_err(|e| CliError::from(e).for_resource("home", &id.to_string(), "homes list"))?;
            output::success(global, &format!("Home {id} renamed"));
            Ok(())
        }

        HomesCommand::Delete { id } => {
            if !util::confirm("homes delete", &format!("Delete home {id}?"), global.yes)? {
                return Ok(());
            }
            let user_id = ctx.user_id(None)?;
            ctx.fetcher
                .delete_home(user_id, id)
                .await
                .map_err(|e| CliError::from(e).for_resource("home", &id.to_string(), "homes list"))?;
            output::success(global, &format!("Home {id} deleted"));
            Ok(())
        }
    }
}

fn lookup(ctx: &Context, id: u64) -> Result<Arc<Home>, CliError> {
    ctx.fetcher
        .state()
        .homes
        .get(&(), &id)
        .ok_or_else(|| util::not_found("home", id, "homes list"))
}
