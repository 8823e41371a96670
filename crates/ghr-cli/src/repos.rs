// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `repos list|create|edit|delete`

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use ghr_api_contract::{ListOptions, RepositoryRecord, RepositorySort, SortDirection};
use ghr_core::{
    FormMode, FormOutcome, FormRejection, Outcome, RepoFormController, RepoListController,
};
use ghr_rest_client::{ErrorKind, HttpTransport};
use serde_json::json;

use crate::exit::CliError;
use crate::{output, prompt, Context};

#[derive(Debug, Clone, Subcommand)]
pub enum RepoCommands {
    /// List repositories, newest first by default
    List(ListArgs),
    /// Create a repository for the logged-in user
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change a repository's description; the name stays fixed
    Edit {
        name: String,
        #[arg(long)]
        description: String,
        /// Owner of the repository; defaults to the configured owner
        #[arg(long)]
        owner: Option<String>,
    },
    /// Delete a repository
    Delete {
        name: String,
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
        /// Owner whose list is searched for `name`
        #[arg(long)]
        owner: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// List this user's repositories instead of the configured owner's
    #[arg(long)]
    pub owner: Option<String>,

    #[arg(long, value_enum, default_value_t = SortArg::Created)]
    pub sort: SortArg,

    #[arg(long, value_enum, default_value_t = DirectionArg::Desc)]
    pub direction: DirectionArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum SortArg {
    Created,
    Updated,
    Pushed,
    FullName,
}

impl From<SortArg> for RepositorySort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Created => RepositorySort::Created,
            SortArg::Updated => RepositorySort::Updated,
            SortArg::Pushed => RepositorySort::Pushed,
            SortArg::FullName => RepositorySort::FullName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

impl RepoCommands {
    /// `--owner` given on a command that lists
    pub fn owner_override(&self) -> Option<&str> {
        match self {
            RepoCommands::List(args) => args.owner.as_deref(),
            RepoCommands::Delete { owner, .. } => owner.as_deref(),
            _ => None,
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<()> {
        ctx.restore_session().await?;

        match self {
            RepoCommands::List(args) => list(ctx, &args).await,
            RepoCommands::Create { name, description } => {
                save(ctx, FormMode::Create, None, &name, &description).await
            }
            RepoCommands::Edit {
                name,
                description,
                owner,
            } => {
                let mode = FormMode::Edit {
                    name: name.clone(),
                    description: None,
                };
                save(ctx, mode, owner, &name, &description).await
            }
            RepoCommands::Delete { name, yes, .. } => delete(ctx, &name, yes).await,
        }
    }
}

fn list_controller(ctx: &Context) -> RepoListController<HttpTransport> {
    RepoListController::new(ctx.session.clone(), ctx.output.notifier())
}

fn records_json(records: &[RepositoryRecord]) -> serde_json::Value {
    serde_json::to_value(records).unwrap_or_else(|_| json!([]))
}

async fn list(ctx: &Context, args: &ListArgs) -> Result<()> {
    let options = ListOptions {
        sort: args.sort.into(),
        direction: args.direction.into(),
    };
    let mut controller = list_controller(ctx).with_options(options);

    match controller.refresh().await {
        Outcome::Done(_) => {
            let records = controller.list().records();
            ctx.output.finish(true, records_json(records), |_| {
                output::print_repository_rows(records);
            });
            Ok(())
        }
        Outcome::Failed(err) => {
            ctx.output.finish(false, json!([]), |_| {});
            Err(CliError::reported(err.kind(), err.to_string()).into())
        }
        Outcome::Dismissed => Ok(()),
    }
}

async fn save(
    ctx: &Context,
    mode: FormMode,
    owner: Option<String>,
    name: &str,
    description: &str,
) -> Result<()> {
    let mut form = RepoFormController::new(ctx.session.clone(), ctx.output.notifier(), mode);
    if let Some(owner) = owner {
        form = form.with_owner(owner);
    }

    match form.submit(name, description).await {
        FormOutcome::Saved(record) => {
            let result = records_json(std::slice::from_ref(&record));
            ctx.output.finish(true, result[0].clone(), |_| {
                output::print_repository_rows(std::slice::from_ref(&record));
            });
            Ok(())
        }
        FormOutcome::Rejected(rejection) => {
            ctx.output.finish(false, json!(null), |_| {});
            let (kind, message) = match rejection {
                FormRejection::Invalid(message) => (ErrorKind::Validation, message),
                FormRejection::Remote(err) => (err.kind(), err.to_string()),
            };
            Err(CliError::reported(kind, message).into())
        }
        FormOutcome::Dismissed => Ok(()),
    }
}

async fn delete(ctx: &Context, name: &str, yes: bool) -> Result<()> {
    if !yes && !prompt::confirm(&format!("Delete repository '{}'?", name))? {
        ctx.output.finish(true, json!({ "deleted": false }), |_| {
            output::print_line("Cancelled.");
        });
        return Ok(());
    }

    let mut controller = list_controller(ctx);
    match controller.delete_named(name).await {
        Outcome::Done(_) => {
            ctx.output.finish(true, json!({ "deleted": true, "name": name }), |_| {});
            Ok(())
        }
        Outcome::Failed(err) => {
            ctx.output.finish(false, json!({ "deleted": false }), |_| {});
            Err(CliError::reported(err.kind(), err.to_string()).into())
        }
        Outcome::Dismissed => Ok(()),
    }
}
