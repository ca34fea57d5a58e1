//! Login / logout handlers.
//!
//! A successful login records the email and user id on the active
//! profile and stores the token in the system keyring (or the config
//! file with `--plaintext`).

use dialoguer::Input;
use secrecy::SecretString;
use tracing::warn;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::Context;

/// Map a dialoguer / interactive I/O failure into CliError.
pub(super) fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub async fn login(args: LoginArgs, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let email = match args.email.or_else(|| ctx.profile.email.clone()) {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(prompt_err)?,
    };
    let password = rpassword::prompt_password(format!("Password for {email}: ")).map_err(prompt_err)?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }

    let session = ctx
        .fetcher
        .login(&email, &SecretString::from(password))
        .await?;

    let mut cfg = config::load_config_or_default();
    let profile = cfg
        .profiles
        .entry(ctx.profile_name.clone())
        .or_insert_with(|| ctx.profile.clone());
    profile.email = Some(email.clone());
    profile.user_id = Some(session.user_id);
    if profile.url.is_none() {
        profile.url.clone_from(&global.url);
    }

    if args.plaintext {
        profile.token = Some(session.token);
    } else {
        modekit_config::store_token(&ctx.profile_name, &session.token)?;
        profile.token = None;
    }
    config::save_config(&cfg)?;

    output::success(
        global,
        &format!(
            "Logged in as {email} (user {}) on profile '{}'",
            session.user_id, ctx.profile_name
        ),
    );
    Ok(())
}

/// Revoke the session, then drop the stored token whatever the
/// platform answered.
pub async fn logout(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.require_token()?;
    if let Err(err) = ctx.fetcher.logout().await {
        warn!(error = %err, "token revocation failed; forgetting it locally");
    }

    modekit_config::forget_token(&ctx.profile_name)?;
    let mut cfg = config::load_config_or_default();
    if let Some(profile) = cfg.profiles.get_mut(&ctx.profile_name) {
        if profile.token.take().is_some() {
            config::save_config(&cfg)?;
        }
    }

    output::success(global, &format!("Logged out of profile '{}'", ctx.profile_name));
    Ok(())
}
