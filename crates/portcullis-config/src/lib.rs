// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Centralized configuration management for the Portcullis gate.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`PORTCULLIS_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use portcullis_config::load_config;
//!
//! let config = load_config()?;
//! println!("Gate listening on {}:{}", config.http.host, config.http.port);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::GateConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved gate configuration.
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub paths: PathsConfig,
	pub logging: LoggingConfig,
}

impl GateConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`PORTCULLIS_SERVER_*`)
/// 2. Config file (`/etc/portcullis/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<GateConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<GateConfig, ConfigError> {
	let mut merged = GateConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<GateConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<GateConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = GateConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: GateConfigLayer) -> Result<GateConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let paths = layer.paths.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url_redacted(),
		static_dir = %paths.static_dir.display(),
		log_level = %logging.level,
		"configuration resolved"
	);

	Ok(GateConfig {
		http,
		database,
		paths,
		logging,
	})
}
