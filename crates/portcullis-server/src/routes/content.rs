// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Protected content handler.
//!
//! Only reachable through the authorization gate; by the time this runs the
//! decision was already "allow".

use axum::response::Html;

/// POST /content - the protected content page.
pub async fn content_page() -> Html<&'static str> {
	tracing::debug!("serving protected content");
	Html(include_str!("../../assets/content.html"))
}
