// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Error payloads returned to HTTP clients.

use serde::Serialize;

/// JSON body for rejected requests.
///
/// `error` is a stable machine-readable code; `message` is for humans and
/// deliberately does not leak policy details beyond the decision itself.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
	/// Error code: `invalid_request`, `evaluation_error` or `forbidden`.
	pub error: String,
	/// Human-readable message.
	pub message: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
		}
	}
}
