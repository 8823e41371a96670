// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Local validation rules applied before any request is sent

use crate::error::ApiContractError;
use crate::types::RepositoryMutationRequest;
use validator::{Validate, ValidationError};

pub const NAME_REQUIRED: &str = "Name is required.";
pub const NAME_HAS_SPACES: &str = "Name cannot contain spaces.";

/// Repository names must be non-blank and contain no whitespace
pub fn validate_repository_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(NAME_REQUIRED.into()));
    }
    if name.contains(char::is_whitespace) {
        return Err(ValidationError::new("whitespace").with_message(NAME_HAS_SPACES.into()));
    }
    Ok(())
}

/// Validate a create request
pub fn validate_create_request(request: &RepositoryMutationRequest) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}
