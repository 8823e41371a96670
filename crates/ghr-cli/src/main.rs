// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use clap::Parser;
use ghr_cli::{exit, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match ghr_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let status = exit::ExitStatus::for_error(&err);
            if !exit::already_reported(&err) {
                eprintln!("Error: {:#}", err);
            }
            tracing::debug!(error = %format!("{:#}", err), code = status.code(), "command failed");
            ExitCode::from(status.code())
        }
    }
}
