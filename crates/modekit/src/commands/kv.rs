//! Key-value store command handlers.

use std::sync::Arc;

use tabled::Tabled;

use modekit_core::{KeyValue, QueryKey, Suppress};

use crate::cli::{GlobalOpts, KvCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct KeyValueRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Modified")]
    modified: String,
}

impl From<&Arc<KeyValue>> for KeyValueRow {
    fn from(kv: &Arc<KeyValue>) -> Self {
        Self {
            key: kv.key.clone(),
            value: util::value_cell(&kv.value),
            modified: util::fmt_time(kv.modification_time.as_ref()),
        }
    }
}

pub async fn handle(cmd: KvCommand, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        KvCommand::List { owner } => {
            let owner = util::owner(&owner)?;
            ctx.fetcher
                .fetch_key_values(owner, Suppress::Never)
                .await?;

            let state = ctx.fetcher.state();
            let entries = ctx
                .selectors
                .key_values
                .select(&state.key_values, &owner, &QueryKey::all())
                .unwrap_or_default();
            let out = output::render_list(
                &global.output,
                entries.as_slice(),
                |kv| KeyValueRow::from(kv),
                |kv| kv.key.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KvCommand::Get { owner, key } => {
            let owner = util::owner(&owner)?;
            let list_cmd = format!("kv list --{}", owner_flag(&owner.to_string()));
            ctx.fetcher
                .fetch_key_value(owner, &key)
                .await
                .map_err(|e| CliError::from(e).for_resource("key", &key, &list_cmd))?;

            let by_key = ctx
                .selectors
                .key_value_map
                .select(&ctx.fetcher.state().key_values, &owner);
            let entry = by_key
                .get(&key)
                .cloned()
                .ok_or_else(|| util::not_found("key", &key, &list_cmd))?;
            let out = output::render_single(
                &global.output,
                &entry,
                |kv| util::value_cell(&kv.value),
                |kv| util::value_cell(&kv.value),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KvCommand::Set { owner, key, value } => {
            let owner = util::owner(&owner)?;
            let value = util::parse_value(&value);
            ctx.fetcher.set_key_value(owner, &key, &value).await?;
            output::success(global, &format!("{owner}: '{key}' set"));
            Ok(())
        }

        KvCommand::Delete { owner, key } => {
            let owner = util::owner(&owner)?;
            if !util::confirm("kv delete", &format!("Delete '{key}' from {owner}?"), global.yes)? {
                return Ok(());
            }
            ctx.fetcher
                .delete_key_value(owner, &key)
                .await
                .map_err(|e| CliError::from(e).for_resource("key", &key, "kv list"))?;
            output::success(global, &format!("{owner}: '{key}' deleted"));
            Ok(())
        }
    }
}

/// `device:5` → `device 5`, for the list-command hint.
fn owner_flag(owner: &str) -> String {
    owner.replacen(':', " ", 1)
}
