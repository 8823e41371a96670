// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use clap::Subcommand;
use ghr_credentials::{CredentialStore, StoredForm};
use ghr_logging::{CliLogLevel, CliLoggingArgs};
use ghr_rest_client::{ClientBuilder, HttpTransport};
use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod exit;
pub mod output;
pub mod prompt;
pub mod repos;

pub use clap::Parser;

use config::ConfigResult;
use exit::CliError;
use ghr_core::Session;
use output::Output;

/// Component name used for log files
pub const COMPONENT: &str = "ghr";

#[derive(Debug, clap::Parser)]
#[command(
    name = "ghr",
    about = "Browse and manage your GitHub repositories",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Extra configuration file, layered above the user file and environment
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(flatten)]
    pub logging: CliLoggingArgs,

    /// Print one JSON document instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Passphrase for an encrypted credential record
    #[arg(long, global = true, env = "GHR_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store credentials for later commands
    Login(auth::LoginArgs),
    /// Remove stored credentials
    Logout(auth::LogoutArgs),
    /// Show who is logged in and where credentials live
    Status,
    /// Repository operations
    Repos {
        #[command(subcommand)]
        command: repos::RepoCommands,
    },
}

/// Everything a command needs after startup
pub struct Context {
    pub config: ConfigResult,
    pub store: CredentialStore,
    pub session: Arc<Session<HttpTransport>>,
    pub output: Output,
    pub passphrase: Option<String>,
}

impl Context {
    /// Configure the session from the store, prompting for a passphrase if needed
    ///
    /// Fails with a configuration error when nothing is stored.
    pub async fn restore_session(&self) -> Result<()> {
        let passphrase = match (&self.passphrase, self.store.stored_form()?) {
            (Some(pass), _) => Some(pass.clone()),
            (None, StoredForm::Encrypted) => Some(prompt::read_line("Passphrase: ")?),
            (None, _) => None,
        };

        if !self.session.restore(&self.store, passphrase.as_deref()).await? {
            self.output.notifier().error(ghr_core::messages::NOT_INITIALIZED);
            self.output.finish(false, serde_json::Value::Null, |_| {});
            return Err(CliError::reported(
                ghr_rest_client::ErrorKind::Configuration,
                ghr_core::messages::NOT_INITIALIZED,
            )
            .into());
        }
        Ok(())
    }
}

/// Load configuration, initialize logging and dispatch
pub async fn run(cli: Cli) -> Result<()> {
    let overrides = command_overrides(&cli.command);
    let config = config::load_config(cli.config.as_deref(), overrides.as_ref()).map_err(CliError::Config)?;

    let default_level = config.config.logging.level.unwrap_or(CliLogLevel::Warn);
    cli.logging.init(COMPONENT, default_level)?;
    tracing::debug!(scopes = ?config.scopes, "configuration loaded");

    let output = Output::new(cli.json);
    let store = CredentialStore::new(config.config.credentials.clone());
    let builder = ClientBuilder::from_config(&config.config.api);
    let session = Session::with_http(builder)?.with_owner(config.config.owner.clone());

    let ctx = Context {
        config,
        store,
        session: Arc::new(session),
        output,
        passphrase: cli.passphrase,
    };

    match cli.command {
        Commands::Login(args) => args.run(&ctx).await,
        Commands::Logout(args) => args.run(&ctx).await,
        Commands::Status => auth::status(&ctx).await,
        Commands::Repos { command } => command.run(&ctx).await,
    }
}

/// Flags that are also configuration keys
fn command_overrides(command: &Commands) -> Option<serde_json::Value> {
    match command {
        Commands::Repos { command } => command
            .owner_override()
            .map(|owner| ghr_config::env::flags_overlay(&[("owner", owner)])),
        _ => None,
    }
}
