// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Portcullis authorization gate server.
//!
//! This crate provides an HTTP server whose protected routes sit behind an
//! authorization gate: the request body names a subject, the subject is
//! resolved to a role through the policy store, and a (role, path, method)
//! query is put to the policy-evaluation engine before any handler runs.

pub mod api;
pub mod error;
pub mod gate;
pub mod routes;

pub use api::{create_router, AppState};
pub use error::ErrorResponse;
pub use gate::{authorization_gate, Subject, BODY_LIMIT, DEFAULT_ROLE};
