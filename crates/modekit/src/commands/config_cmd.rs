//! Config subcommand handlers.

use dialoguer::{Input, Select};

use modekit_config::{Config, Profile};
use modekit_core::config::DEFAULT_API_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::auth::prompt_err;

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

/// Copy of the config safe to print: plaintext tokens are masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some("********".into());
        }
    }
    cfg
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("modekit configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let url: String = Input::new()
                .with_prompt("API URL")
                .default(DEFAULT_API_URL.into())
                .interact_text()
                .map_err(prompt_err)?;
            url.parse::<url::Url>().map_err(|_| CliError::Validation {
                field: "url".into(),
                reason: format!("invalid URL: {url}"),
            })?;

            let email: String = Input::new()
                .with_prompt("Account email")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let page_size: u64 = Input::new()
                .with_prompt("Page size for list commands")
                .default(modekit_core::config::DEFAULT_PAGE_SIZE)
                .interact_text()
                .map_err(prompt_err)?;

            let mut cfg = config::load_config_or_default();
            let profile = Profile {
                url: Some(url).filter(|u| u != DEFAULT_API_URL),
                email: Some(email).filter(|e| !e.is_empty()),
                page_size: Some(page_size).filter(|&p| p != modekit_core::config::DEFAULT_PAGE_SIZE),
                ..cfg.profiles.get(&profile_name).cloned().unwrap_or_default()
            };
            cfg.profiles.insert(profile_name.clone(), profile);

            let make_default = cfg.profiles.len() == 1 || {
                let choices = &["Yes", "No"];
                Select::new()
                    .with_prompt(format!("Make '{profile_name}' the default profile?"))
                    .items(choices)
                    .default(0)
                    .interact()
                    .map_err(prompt_err)?
                    == 0
            };
            if make_default {
                cfg.default_profile = Some(profile_name.clone());
            }

            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!("\n  Next: modekit login --profile {profile_name}");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| format!("{c:#?}"),
                |_| config::config_path().display().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.profile_name(None);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: modekit config init");
                return Ok(());
            }
            let mut names: Vec<&String> = cfg.profiles.keys().collect();
            names.sort();
            for name in names {
                let marker = if *name == default { " *" } else { "" };
                println!("{name}{marker}");
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::success(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let token = rpassword::prompt_password("Token: ").map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            modekit_config::store_token(&profile_name, &token)?;
            output::success(
                global,
                &format!("Token stored in system keyring for profile '{profile_name}'"),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_masks_plaintext_tokens_only() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "home".into(),
            Profile {
                token: Some("secret".into()),
                ..Profile::default()
            },
        );
        cfg.profiles.insert("lab".into(), Profile::default());

        let shown = redacted(&cfg);
        assert_eq!(shown.profiles["home"].token.as_deref(), Some("********"));
        assert_eq!(shown.profiles["lab"].token, None);
    }

    #[test]
    fn available_profiles_are_sorted() {
        let mut cfg = Config::default();
        assert_eq!(available_profiles(&cfg), "(none)");
        cfg.profiles.insert("b".into(), Profile::default());
        cfg.profiles.insert("a".into(), Profile::default());
        assert_eq!(available_profiles(&cfg), "a, b");
    }
}
