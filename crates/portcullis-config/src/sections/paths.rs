// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Filesystem paths configuration section.

use std::path::PathBuf;

use serde::Deserialize;

/// Paths configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct PathsConfig {
	/// Directory served unauthenticated under `/static`.
	pub static_dir: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			static_dir: PathBuf::from("./static"),
		}
	}
}

/// Paths configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfigLayer {
	#[serde(default)]
	pub static_dir: Option<PathBuf>,
}

impl PathsConfigLayer {
	pub fn merge(&mut self, other: PathsConfigLayer) {
		if other.static_dir.is_some() {
			self.static_dir = other.static_dir;
		}
	}

	pub fn finalize(self) -> PathsConfig {
		PathsConfig {
			static_dir: self
				.static_dir
				.unwrap_or_else(|| PathsConfig::default().static_dir),
		}
	}
}
