// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Portcullis authorization gate server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portcullis_authz::{CasbinEngine, PolicyEngine};
use portcullis_server::{create_router, AppState};

/// Connections the policy adapter keeps to the store.
const ADAPTER_POOL_SIZE: u32 = 8;

/// Portcullis - HTTP authorization gate in front of protected content.
#[derive(Parser, Debug)]
#[command(name = "portcullis-server", about = "Portcullis authorization gate", version)]
struct Args {
	/// Path to a TOML config file (default: /etc/portcullis/server.toml)
	#[arg(long)]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("portcullis-server {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(ref path) => portcullis_config::load_config_with_file(path.clone())?,
		None => portcullis_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url_redacted(),
		"starting portcullis-server"
	);

	// Policy store: role lookups go through the pool, policy rules through
	// the enforcer's own adapter against the same database.
	let database_url = config.database.url();
	let pool = portcullis_db::create_pool(&database_url).await?;
	portcullis_db::run_migrations(&pool).await?;
	let role_store = Arc::new(portcullis_db::UserRepository::new(pool));

	let engine = Arc::new(CasbinEngine::connect(&database_url, ADAPTER_POOL_SIZE).await?);
	engine.load_policy().await?;
	tracing::info!("policy loaded from store");

	let state = AppState::new(role_store, engine);
	let app = create_router(state, &config.paths.static_dir).layer(TraceLayer::new_for_http());

	let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
	tracing::info!(addr = %listener.local_addr()?, "listening");

	axum::serve(listener, app).await?;

	Ok(())
}
