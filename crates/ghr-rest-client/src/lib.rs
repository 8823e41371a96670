// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! GitHub REST client for gh-repos
//!
//! [`ClientBuilder`] is the single place where a client is configured: base
//! URL, one authentication scheme, request logging and user agent. The
//! resulting [`GitHubClient`] exposes the four repository operations and sends
//! every request through a [`Transport`], which is reqwest in production and a
//! scripted fake in tests.

pub mod api_config;
pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

pub use api_config::{ApiConfig, HttpLogLevel};
pub use auth::*;
pub use client::*;
pub use error::*;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};

pub use reqwest::{header, Method, StatusCode};
