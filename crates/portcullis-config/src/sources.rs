// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::GateConfigLayer;
use crate::sections::{
	DatabaseConfigLayer, HttpConfigLayer, LoggingConfigLayer, PathsConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<GateConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<GateConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(GateConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/portcullis/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<GateConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(GateConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: GateConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `PORTCULLIS_SERVER_<SECTION>_<FIELD>`
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<GateConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(GateConfigLayer {
			http: Some(load_http_from_env()?),
			database: Some(load_database_from_env()?),
			paths: Some(load_paths_from_env()),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError>
where
	T::Err: std::fmt::Display,
{
	match env_var(name) {
		None => Ok(None),
		Some(raw) => raw.parse().map(Some).map_err(|e| ConfigError::InvalidEnv {
			var: name.to_string(),
			message: format!("{e}"),
		}),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("PORTCULLIS_SERVER_HTTP_HOST"),
		port: env_parse("PORTCULLIS_SERVER_HTTP_PORT")?,
	})
}

fn load_database_from_env() -> Result<DatabaseConfigLayer, ConfigError> {
	Ok(DatabaseConfigLayer {
		host: env_var("PORTCULLIS_SERVER_DATABASE_HOST"),
		port: env_parse("PORTCULLIS_SERVER_DATABASE_PORT")?,
		user: env_var("PORTCULLIS_SERVER_DATABASE_USER"),
		password: env_var("PORTCULLIS_SERVER_DATABASE_PASSWORD"),
		dbname: env_var("PORTCULLIS_SERVER_DATABASE_DBNAME"),
	})
}

fn load_paths_from_env() -> PathsConfigLayer {
	PathsConfigLayer {
		static_dir: env_var("PORTCULLIS_SERVER_PATHS_STATIC_DIR").map(PathBuf::from),
	}
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("PORTCULLIS_SERVER_LOGGING_LEVEL"),
	}
}
