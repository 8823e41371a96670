// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `login`, `logout` and `status`

use anyhow::Result;
use clap::Args;
use ghr_core::{LoginController, LoginOutcome};
use ghr_credentials::{AuthScheme, StoredForm};
use ghr_rest_client::ErrorKind;
use serde_json::json;

use crate::exit::CliError;
use crate::{output, prompt, Context};

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// GitHub login (prompted when omitted)
    #[arg(long)]
    pub username: Option<String>,

    /// Personal access token or password (prompted when omitted)
    #[arg(long, env = "GHR_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// How the secret is sent; defaults to `api.auth-scheme`
    #[arg(long)]
    pub scheme: Option<AuthScheme>,

    /// Store the record encrypted with a passphrase
    #[arg(long)]
    pub encrypt: bool,
}

impl LoginArgs {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let scheme = match self.scheme {
            Some(scheme) => scheme,
            None => ctx.config.default_scheme()?,
        };
        let username = prompt::value_or_prompt(self.username, "Username: ")?;
        let secret_prompt = match scheme {
            AuthScheme::Token => "Token: ",
            AuthScheme::Basic => "Password: ",
        };
        let secret = prompt::value_or_prompt(self.secret, secret_prompt)?;

        let encrypt = self.encrypt || ctx.config.config.credentials.encrypted;
        let passphrase = if encrypt {
            Some(prompt::value_or_prompt(ctx.passphrase.clone(), "Passphrase: ")?)
        } else {
            None
        };

        let mut controller =
            LoginController::new(ctx.session.clone(), ctx.store.clone(), ctx.output.notifier());
        let outcome = controller
            .submit(&username, &secret, scheme, passphrase.as_deref())
            .await;

        match outcome {
            LoginOutcome::LoggedIn { username } => {
                let storage = if encrypt { "encrypted" } else { "plain" };
                let result = json!({ "username": username, "scheme": scheme, "storage": storage });
                ctx.output.finish(true, result, |r| {
                    output::print_line(&format!(
                        "Logged in as {} ({}).",
                        r["username"].as_str().unwrap_or_default(),
                        scheme
                    ));
                });
                Ok(())
            }
            LoginOutcome::Invalid { username, secret } => {
                let message = username.or(secret).unwrap_or_default();
                ctx.output.finish(
                    false,
                    json!({ "username": username, "secret": secret }),
                    |_| {},
                );
                Err(CliError::reported(ErrorKind::Validation, message).into())
            }
            LoginOutcome::Failed(err) => {
                ctx.output.finish(false, json!(null), |_| {});
                Err(CliError::reported(err.kind(), err.to_string()).into())
            }
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct LogoutArgs {
    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl LogoutArgs {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        if !self.yes && !prompt::confirm("Log out and remove stored credentials?")? {
            ctx.output.finish(true, json!({ "logged_out": false }), |_| {
                output::print_line("Cancelled.");
            });
            return Ok(());
        }

        ctx.session.logout(&ctx.store).await?;
        ctx.output.finish(true, json!({ "logged_out": true }), |_| {
            output::print_line("Logged out.");
        });
        Ok(())
    }
}

/// Report the stored credential without contacting the API
pub async fn status(ctx: &Context) -> Result<()> {
    let form = ctx.store.stored_form()?;
    let storage_dir = ctx.store.config().storage_dir()?;

    let (username, scheme) = match form {
        StoredForm::Absent => (None, None),
        StoredForm::Plain => match ctx.store.load().await? {
            Some(credentials) => (Some(credentials.username.clone()), Some(credentials.scheme)),
            None => (None, None),
        },
        StoredForm::Encrypted => match &ctx.passphrase {
            Some(passphrase) => match ctx.store.load_encrypted(passphrase).await? {
                Some(credentials) => (Some(credentials.username.clone()), Some(credentials.scheme)),
                None => (None, None),
            },
            None => (None, None),
        },
    };

    let storage = match form {
        StoredForm::Absent => "absent",
        StoredForm::Plain => "plain",
        StoredForm::Encrypted => "encrypted",
    };
    let result = json!({
        "logged_in": form != StoredForm::Absent,
        "username": username,
        "scheme": scheme,
        "storage": storage,
        "storage_dir": storage_dir,
    });

    ctx.output.finish(true, result, |_| match (form, &username, scheme) {
        (StoredForm::Absent, _, _) => output::print_line("Not logged in."),
        (_, Some(name), Some(scheme)) => {
            output::print_line(&format!("Logged in as {} ({}, {} storage).", name, scheme, storage))
        }
        _ => output::print_line("Logged in (encrypted; pass --passphrase to show the account)."),
    });
    Ok(())
}
