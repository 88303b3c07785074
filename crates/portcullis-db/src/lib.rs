// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Policy store access for the Portcullis gate.
//!
//! The store is PostgreSQL. It holds two things: the `users` table mapping
//! a subject name to its role (owned by this crate), and the `casbin_rule`
//! table holding policy rules (owned by the enforcer's adapter, not touched
//! here).

pub mod error;
pub mod pool;
pub mod user;

pub use error::DbError;
pub use pool::create_pool;
pub use user::{RoleStore, UserRepository};

/// Run embedded migrations for the tables this crate owns.
///
/// The `casbin_rule` table is created by the policy adapter itself and is
/// deliberately absent from these migrations.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), DbError> {
	sqlx::migrate!("./migrations")
		.run(pool)
		.await
		.map_err(|e| DbError::Internal(format!("migration failed: {e}")))?;

	tracing::debug!("database migrations applied");
	Ok(())
}
