// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Liveness flag for a screen whose responses may arrive after it is gone

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag flipped once when a controller's screen is dismissed
///
/// Clones observe the same flag, so any task holding one can dismiss.
#[derive(Debug, Clone)]
pub struct ScreenLifetime {
    alive: Arc<AtomicBool>,
}

impl Default for ScreenLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenLifetime {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn dismiss(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}
