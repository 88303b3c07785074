// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Application state and router assembly.

use std::path::Path;
use std::sync::Arc;

use axum::{
	middleware::from_fn_with_state,
	routing::{get, post},
	Router,
};
use tower_http::services::ServeDir;

use portcullis_authz::PolicyEngine;
use portcullis_db::RoleStore;

use crate::gate::authorization_gate;
use crate::routes;

/// Process-wide collaborators, constructed once at startup.
///
/// Both handles are trait objects so the gate can be exercised against
/// fake collaborators in tests.
#[derive(Clone)]
pub struct AppState {
	pub role_store: Arc<dyn RoleStore>,
	pub engine: Arc<dyn PolicyEngine>,
}

impl AppState {
	pub fn new(role_store: Arc<dyn RoleStore>, engine: Arc<dyn PolicyEngine>) -> Self {
		Self { role_store, engine }
	}
}

/// Create the router: protected content behind the gate, unauthenticated
/// static assets and a liveness probe beside it.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
	let protected = Router::new()
		.route("/content", post(routes::content::content_page))
		.layer(from_fn_with_state(state.clone(), authorization_gate));

	Router::new()
		.route("/health", get(routes::health::health_check))
		.merge(protected)
		.nest_service("/static", ServeDir::new(static_dir))
		.with_state(state)
}
