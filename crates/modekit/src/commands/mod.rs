//! Command handlers.
//!
//! Every read follows the same shape: fetch into the cache through the
//! [`Fetcher`], then read back through a memoized selector.

pub mod alerts;
pub mod auth;
pub mod config_cmd;
pub mod devices;
pub mod entities;
pub mod homes;
pub mod kv;
pub mod series;
pub mod util;

use modekit_config::Profile;
use modekit_core::{Fetcher, Page, Selectors};

use crate::cli::{Command, GlobalOpts, PageArgs};
use crate::error::CliError;

/// Everything a handler needs: the cache, its selectors and the active
/// profile.
pub struct Context {
    pub fetcher: Fetcher,
    pub selectors: Selectors,
    pub profile_name: String,
    pub profile: Profile,
    has_token: bool,
}

impl Context {
    pub fn new(fetcher: Fetcher, profile_name: String, profile: Profile, has_token: bool) -> Self {
        Self {
            fetcher,
            selectors: Selectors::default(),
            profile_name,
            profile,
            has_token,
        }
    }

    /// Fail early with a login hint instead of a 401 from the platform.
    pub fn require_token(&self) -> Result<(), CliError> {
        if self.has_token {
            Ok(())
        } else {
            Err(CliError::NoToken {
                profile: self.profile_name.clone(),
            })
        }
    }

    /// `--user` if given, otherwise the user recorded at login.
    pub fn user_id(&self, explicit: Option<u64>) -> Result<u64, CliError> {
        explicit
            .or(self.profile.user_id)
            .ok_or_else(|| CliError::NoUser {
                profile: self.profile_name.clone(),
            })
    }

    /// Page requested on the command line, sized by `--page-size` or the
    /// profile default.
    pub fn page(&self, args: &PageArgs) -> Page {
        Page::new(
            args.page,
            args.page_size.unwrap_or_else(|| self.fetcher.page_size()),
        )
    }
}

/// Route a platform command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    if !matches!(cmd, Command::Login(_) | Command::Logout) {
        ctx.require_token()?;
    }

    match cmd {
        Command::Login(args) => auth::login(args, ctx, global).await,
        Command::Logout => auth::logout(ctx, global).await,
        Command::Homes(args) => homes::handle(args.command, ctx, global).await,
        Command::Devices(args) => devices::handle(args.command, ctx, global).await,
        Command::Kv(args) => kv::handle(args.command, ctx, global).await,
        Command::Entities(args) => entities::handle(args.command, ctx, global).await,
        Command::Series(args) => series::handle(args.command, ctx, global).await,
        Command::Alerts(args) => alerts::handle(args.command, ctx, global).await,
        Command::Config(_) | Command::Completions(_) => {
            Err(CliError::Internal("command dispatched to the wrong handler".into()))
        }
    }
}
