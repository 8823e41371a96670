// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! GitHub repository API contract types and validation
//!
//! Only the fields gh-repos consumes are modelled; everything else in
//! GitHub's responses is ignored on deserialization.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
