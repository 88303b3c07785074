// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! User-to-role lookups against the policy store.
//!
//! The gate resolves each request's subject to a role through [`RoleStore`].
//! The trait exists so the gate can be exercised with a fake store in tests;
//! [`UserRepository`] is the PostgreSQL implementation used in production.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::error::DbError;

/// Single-row role lookup for a subject.
#[async_trait]
pub trait RoleStore: Send + Sync {
	/// Return the role recorded for `username`, or `None` if the subject is
	/// unknown to the store.
	async fn role_for(&self, username: &str) -> Result<Option<String>, DbError>;
}

/// Repository for user rows in the policy store.
///
/// Schema: `users(name TEXT PRIMARY KEY, role_name TEXT NOT NULL)`.
#[derive(Clone)]
pub struct UserRepository {
	pool: PgPool,
}

impl UserRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

#[async_trait]
impl RoleStore for UserRepository {
	#[tracing::instrument(skip(self))]
	async fn role_for(&self, username: &str) -> Result<Option<String>, DbError> {
		let row = sqlx::query("SELECT role_name FROM users WHERE name = $1")
			.bind(username)
			.fetch_optional(&self.pool)
			.await?;

		Ok(match row {
			Some(row) => Some(row.try_get::<String, _>("role_name")?),
			None => None,
		})
	}
}
