//! Device command handlers.

use std::sync::Arc;

use tabled::Tabled;

use modekit_core::{Device, DeviceUpdate};

use crate::cli::{DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Online")]
    online: &'static str,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

impl From<&Arc<Device>> for DeviceRow {
    fn from(d: &Arc<Device>) -> Self {
        Self {
            id: d.id,
            name: util::or_dash(Some(&d.name)),
            class: d.device_class.clone(),
            tag: util::or_dash(Some(&d.tag)),
            online: if d.is_connected { "yes" } else { "no" },
            last_seen: util::fmt_time(d.last_connect_time.as_ref()),
        }
    }
}

fn detail(d: &Arc<Device>) -> String {
    output::detail(&[
        ("ID", d.id.to_string()),
        ("Name", util::or_dash(Some(&d.name))),
        ("Description", util::or_dash(Some(&d.description))),
        ("Class", d.device_class.clone()),
        ("Tag", util::or_dash(Some(&d.tag))),
        ("Home", d.home_id.map_or_else(|| "-".into(), |h| h.to_string())),
        ("Project", d.project_id.to_string()),
        ("Connected", d.is_connected.to_string()),
        ("Last Seen", util::fmt_time(d.last_connect_time.as_ref())),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    cmd: DevicesCommand,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        DevicesCommand::List { home, page } => {
            let home_id = home.home_id;
            let page = ctx.page(&page);
            ctx.fetcher
                .fetch_devices(home_id, page)
                .await
                .map_err(|e| CliError::from(e).for_resource("home", &home_id.to_string(), "homes list"))?;

            let state = ctx.fetcher.state();
            let key = page.key();
            let devices = ctx
                .selectors
                .devices
                .select(&state.devices, &home_id, &key)
                .unwrap_or_default();
            let out = output::render_list(
                &global.output,
                devices.as_slice(),
                |d| DeviceRow::from(d),
                |d| d.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if let Some(total) = ctx.selectors.devices.total(&state.devices, &home_id, &key) {
                output::hint(global, &util::page_footer(page, devices.len(), total));
            }
            Ok(())
        }

        DevicesCommand::Get { id } => {
            ctx.fetcher
                .fetch_device(id)
                .await
                .map_err(|e| CliError::from(e).for_resource("device", &id.to_string(), "devices list"))?;
            let device = ctx
                .fetcher
                .state()
                .devices
                .get(&(), &id)
                .ok_or_else(|| util::not_found("device", id, "devices list"))?;
            let out = output::render_single(&global.output, &device, detail, |d| d.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Rename {
            home,
            id,
            name,
            description,
        } => {
            let update = DeviceUpdate {
                name: Some(name),
                description,
            };
            ctx.fetcher
                .update_device(home.home_id, id, &update)
                .await
                .map_err(|e| CliError::from(e).for_resource("device", &id.to_string(), "devices list"))?;
            output::success(global, &format!("Device {id} updated"));
            Ok(())
        }

        DevicesCommand::Delete { home, id } => {
            let prompt = format!("Remove device {id} from home {}?", home.home_id);
            if !util::confirm("devices delete", &prompt, global.yes)? {
                return Ok(());
            }
            ctx.fetcher
                .delete_device(home.home_id, id)
                .await
                .map_err(|e| CliError::from(e).for_resource("device", &id.to_string(), "devices list"))?;
            output::success(global, &format!("Device {id} removed"));
            Ok(())
        }
    }
}
