//! Smart-module entity command handlers.

use std::sync::Arc;

use tabled::Tabled;

use modekit_core::{Entity, EntityQuery};

use crate::cli::{EntitiesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Properties")]
    properties: usize,
    #[tabled(rename = "Modified")]
    modified: String,
}

impl From<&Arc<Entity>> for EntityRow {
    fn from(e: &Arc<Entity>) -> Self {
        Self {
            id: e.id.clone(),
            class: e.entity_class.clone(),
            name: util::or_dash(e.name.as_deref()),
            properties: e.properties.len(),
            modified: util::fmt_time(e.modification_time.as_ref()),
        }
    }
}

pub async fn handle(
    cmd: EntitiesCommand,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        EntitiesCommand::List { home, class } => {
            let home_id = home.home_id;
            let query = class.map(EntityQuery::class).unwrap_or_default();
            ctx.fetcher
                .fetch_entities(home_id, &query)
                .await
                .map_err(|e| CliError::from(e).for_resource("home", &home_id.to_string(), "homes list"))?;

            let state = ctx.fetcher.state();
            let entities = ctx
                .selectors
                .entities
                .select(&state.entities, &home_id, &query.key())
                .unwrap_or_default();
            let out = output::render_list(
                &global.output,
                entities.as_slice(),
                |e| EntityRow::from(e),
                |e| e.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EntitiesCommand::Delete { home, id } => {
            let prompt = format!("Delete entity '{id}' from home {}?", home.home_id);
            if !util::confirm("entities delete", &prompt, global.yes)? {
                return Ok(());
            }
            ctx.fetcher
                .delete_entity(home.home_id, &id)
                .await
                .map_err(|e| CliError::from(e).for_resource("entity", &id, "entities list"))?;
            output::success(global, &format!("Entity '{id}' deleted"));
            Ok(())
        }
    }
}
