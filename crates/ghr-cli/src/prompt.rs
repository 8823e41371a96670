// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Interactive prompts on stderr/stdin
#![allow(clippy::disallowed_methods)] // CLI is allowed to print to stdout/stderr

use anyhow::Result;
use std::io::{BufRead, Write};

/// Read one line after printing `prompt`; input is echoed
pub fn read_line(prompt: &str) -> Result<String> {
    eprint!("{}", prompt);
    std::io::stderr().flush()?;
    let mut buf = String::new();
    std::io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

/// Use `provided` when present, otherwise ask
pub fn value_or_prompt(provided: Option<String>, prompt: &str) -> Result<String> {
    match provided {
        Some(value) => Ok(value),
        None => read_line(prompt),
    }
}

/// Yes/no question defaulting to no; end of input counts as no
pub fn confirm(question: &str) -> Result<bool> {
    let answer = read_line(&format!("{} [y/N] ", question))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
