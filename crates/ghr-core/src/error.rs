// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for session management

use ghr_rest_client::{ApiError, ErrorKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Credentials(#[from] ghr_credentials::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Classification shared with [`ApiError::kind`]; storage problems count as configuration
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Credentials(_) => ErrorKind::Configuration,
            Error::Api(e) => e.kind(),
        }
    }
}
