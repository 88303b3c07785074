// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! The authorization gate middleware.
//!
//! Applied in front of protected routes. Per request, in order:
//!
//! 1. Buffer and parse the JSON body into a [`Subject`]; malformed or
//!    oversized bodies are rejected with 400 before any collaborator is
//!    consulted.
//! 2. Resolve the subject's role through the store. A missing row or a
//!    failed lookup degrades to [`DEFAULT_ROLE`] and the request proceeds.
//!    This fail-open-to-default behavior is intentional and covered by
//!    tests; do not tighten it without revisiting the deployment's policy
//!    rows.
//! 3. Evaluate (role, path, method) against the policy engine. An engine
//!    error yields 500, a deny yields 403, an allow forwards the request
//!    with its body restored.
//!
//! Each collaborator round-trip runs under a bounded deadline so a stalled
//! store or engine cannot wedge the request indefinitely.
//!
//! # Security
//!
//! - All decisions are logged with subject, role, path and method
//! - Rejections carry a generic message; policy details are never echoed

use std::time::Duration;

use axum::{
	body::Body,
	extract::{Request, State},
	http::StatusCode,
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};
use serde::Deserialize;

use portcullis_db::DbError;

use crate::api::AppState;
use crate::error::ErrorResponse;

/// Role substituted when the store has no row for the subject or the
/// lookup fails.
pub const DEFAULT_ROLE: &str = "user";

/// Upper bound on buffered request bodies. Anything larger is rejected
/// the same way as a malformed body.
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Deadline applied to each collaborator round-trip.
const ROUND_TRIP_DEADLINE: Duration = Duration::from_secs(5);

/// The acting identity, taken from the request body.
#[derive(Debug, Clone, Deserialize)]
pub struct Subject {
	pub username: String,
}

/// Gate middleware for protected routes.
///
/// Attach with `axum::middleware::from_fn_with_state`.
pub async fn authorization_gate(
	State(state): State<AppState>,
	request: Request,
	next: Next,
) -> Response {
	let (parts, body) = request.into_parts();

	let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
		Ok(bytes) => bytes,
		Err(e) => {
			tracing::debug!(error = %e, "gate rejected: unreadable body");
			return invalid_request_response();
		}
	};

	let subject: Subject = match serde_json::from_slice(&bytes) {
		Ok(subject) => subject,
		Err(e) => {
			tracing::debug!(error = %e, "gate rejected: body is not a subject document");
			return invalid_request_response();
		}
	};

	let lookup = match tokio::time::timeout(
		ROUND_TRIP_DEADLINE,
		state.role_store.role_for(&subject.username),
	)
	.await
	{
		Ok(result) => result,
		Err(_) => Err(DbError::Internal(format!(
			"role lookup timed out after {ROUND_TRIP_DEADLINE:?}"
		))),
	};
	let role = role_or_default(&subject.username, lookup);

	let path = parts.uri.path().to_string();
	let method = parts.method.as_str().to_string();

	let decision = match tokio::time::timeout(
		ROUND_TRIP_DEADLINE,
		state.engine.evaluate(&role, &path, &method),
	)
	.await
	{
		Ok(result) => result,
		Err(_) => {
			tracing::warn!(
				username = %subject.username,
				role = %role,
				path = %path,
				method = %method,
				"gate rejected: evaluation timed out"
			);
			return evaluation_error_response();
		}
	};

	match decision {
		Err(e) => {
			tracing::warn!(
				username = %subject.username,
				role = %role,
				path = %path,
				method = %method,
				error = %e,
				"gate rejected: evaluation failed"
			);
			evaluation_error_response()
		}
		Ok(false) => {
			tracing::info!(
				username = %subject.username,
				role = %role,
				path = %path,
				method = %method,
				"gate denied"
			);
			forbidden_response()
		}
		Ok(true) => {
			tracing::debug!(
				username = %subject.username,
				role = %role,
				path = %path,
				method = %method,
				"gate allowed"
			);
			let request = Request::from_parts(parts, Body::from(bytes));
			next.run(request).await
		}
	}
}

/// Collapse a role lookup outcome into a role.
///
/// Unknown subject, store failure and lookup timeout all degrade to
/// [`DEFAULT_ROLE`]; failures are logged and never surfaced to the client.
fn role_or_default(username: &str, lookup: Result<Option<String>, DbError>) -> String {
	match lookup {
		Ok(Some(role)) => role,
		Ok(None) => {
			tracing::debug!(username, "no role recorded, using default");
			DEFAULT_ROLE.to_string()
		}
		Err(e) => {
			tracing::warn!(username, error = %e, "role lookup failed, using default role");
			DEFAULT_ROLE.to_string()
		}
	}
}

fn invalid_request_response() -> Response {
	(
		StatusCode::BAD_REQUEST,
		Json(ErrorResponse::new("invalid_request", "Invalid JSON")),
	)
		.into_response()
}

fn evaluation_error_response() -> Response {
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		Json(ErrorResponse::new(
			"evaluation_error",
			"Error checking authorization",
		)),
	)
		.into_response()
}

fn forbidden_response() -> Response {
	(
		StatusCode::FORBIDDEN,
		Json(ErrorResponse::new("forbidden", "Forbidden")),
	)
		.into_response()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn known_role_passes_through() {
		let role = role_or_default("alice", Ok(Some("admin".to_string())));
		assert_eq!(role, "admin");
	}

	#[test]
	fn missing_row_yields_default() {
		assert_eq!(role_or_default("bob", Ok(None)), DEFAULT_ROLE);
	}

	#[test]
	fn store_failure_yields_default() {
		let lookup = Err(DbError::Internal("connection refused".to_string()));
		assert_eq!(role_or_default("bob", lookup), DEFAULT_ROLE);
	}

	#[test]
	fn rejection_statuses() {
		assert_eq!(invalid_request_response().status(), StatusCode::BAD_REQUEST);
		assert_eq!(
			evaluation_error_response().status(),
			StatusCode::INTERNAL_SERVER_ERROR
		);
		assert_eq!(forbidden_response().status(), StatusCode::FORBIDDEN);
	}

	proptest! {
		/// Any successful lookup result maps to the stored role or the
		/// default, never to an empty role.
		#[test]
		fn resolved_role_is_never_empty(role in proptest::option::of("[a-z]{1,12}")) {
			let resolved = role_or_default("subject", Ok(role.clone()));
			prop_assert!(!resolved.is_empty());
			match role {
				Some(r) => prop_assert_eq!(resolved, r),
				None => prop_assert_eq!(resolved, DEFAULT_ROLE),
			}
		}

		/// The fallback is deterministic: the same lookup outcome always
		/// resolves to the same role.
		#[test]
		fn resolution_is_deterministic(role in proptest::option::of("[a-z]{1,12}")) {
			let first = role_or_default("subject", Ok(role.clone()));
			let second = role_or_default("subject", Ok(role));
			prop_assert_eq!(first, second);
		}
	}
}
