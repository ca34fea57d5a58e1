//! CLI-aware configuration: profile selection plus flag overrides on
//! top of `modekit_config`.

use std::time::Duration;

use secrecy::SecretString;

use modekit_config::{Config, Profile};
use modekit_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use modekit_config::{config_path, load_config_or_default, save_config};

/// Name of the profile this invocation uses.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    cfg.profile_name(global.profile.as_deref())
}

/// Profile for `name`. An explicitly requested profile must exist; the
/// implicit default may be absent, in which case an empty profile (the
/// public API, no token) is used.
pub fn active_profile(global: &GlobalOpts, cfg: &Config, name: &str) -> Result<Profile, CliError> {
    match cfg.profiles.get(name) {
        Some(profile) => Ok(profile.clone()),
        None if global.profile.is_some() => {
            let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            Err(CliError::ProfileNotFound {
                name: name.into(),
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            })
        }
        None => Ok(Profile::default()),
    }
}

/// Build a `ClientConfig` from the profile, then apply CLI flags.
pub fn resolve_client_config(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut client = modekit_config::profile_to_client_config(profile, profile_name, &cfg.defaults)?;

    if let Some(ref raw) = global.url {
        client.url = raw.parse().map_err(|_| CliError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if let Some(ref token) = global.token {
        client.token = Some(SecretString::from(token.clone()));
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }

    Ok(client)
}
