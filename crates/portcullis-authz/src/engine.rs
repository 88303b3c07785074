// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! The [`PolicyEngine`] trait and its Casbin-backed implementation.
//!
//! The gate talks to the engine only through the trait, so tests can swap
//! in a fake without touching Casbin or PostgreSQL.

use async_trait::async_trait;
use casbin::prelude::{CoreApi, Enforcer, TryIntoAdapter};
use sqlx_adapter::SqlxAdapter;
use tokio::sync::RwLock;

use crate::error::AuthzError;
use crate::model::rbac_model;

/// Decision interface the gate depends on.
///
/// `evaluate` answers one (subject-role, resource, action) query;
/// `load_policy` hydrates the engine's in-memory state from the policy
/// store and is called once at startup.
#[async_trait]
pub trait PolicyEngine: Send + Sync {
	async fn evaluate(&self, sub: &str, obj: &str, act: &str) -> Result<bool, AuthzError>;
	async fn load_policy(&self) -> Result<(), AuthzError>;
}

/// Casbin enforcer behind the [`PolicyEngine`] interface.
///
/// Evaluation is a read; `load_policy` rewrites in-memory state and takes
/// the write half of the lock. Policy mutation APIs are deliberately not
/// exposed here.
pub struct CasbinEngine {
	enforcer: RwLock<Enforcer>,
}

impl CasbinEngine {
	/// Build an engine whose policies are persisted in PostgreSQL.
	///
	/// The adapter creates its `casbin_rule` table on first use. Fails if
	/// the database is unreachable or the model text is invalid; either is
	/// fatal at startup.
	pub async fn connect(database_url: &str, pool_size: u32) -> Result<Self, AuthzError> {
		let model = rbac_model().await?;
		let adapter = SqlxAdapter::new(database_url, pool_size).await?;
		let enforcer = Enforcer::new(model, adapter).await?;

		tracing::debug!("policy enforcer constructed");
		Ok(Self {
			enforcer: RwLock::new(enforcer),
		})
	}

	/// Build an engine over an arbitrary adapter (in-memory for tests).
	pub async fn with_adapter<A: TryIntoAdapter>(adapter: A) -> Result<Self, AuthzError> {
		let model = rbac_model().await?;
		let enforcer = Enforcer::new(model, adapter).await?;
		Ok(Self {
			enforcer: RwLock::new(enforcer),
		})
	}

	/// Wrap an already-seeded enforcer.
	pub fn from_enforcer(enforcer: Enforcer) -> Self {
		Self {
			enforcer: RwLock::new(enforcer),
		}
	}
}

#[async_trait]
impl PolicyEngine for CasbinEngine {
	async fn evaluate(&self, sub: &str, obj: &str, act: &str) -> Result<bool, AuthzError> {
		let enforcer = self.enforcer.read().await;
		let allowed = enforcer.enforce((sub, obj, act))?;

		tracing::debug!(sub, obj, act, allowed, "policy evaluated");
		Ok(allowed)
	}

	async fn load_policy(&self) -> Result<(), AuthzError> {
		let mut enforcer = self.enforcer.write().await;
		enforcer.load_policy().await?;

		tracing::debug!("policy loaded from store");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use casbin::prelude::{MemoryAdapter, MgmtApi};

	async fn seeded_engine() -> CasbinEngine {
		let model = rbac_model().await.unwrap();
		let mut enforcer = Enforcer::new(model, MemoryAdapter::default()).await.unwrap();

		enforcer
			.add_policy(
				["admin", "/content", "POST"]
					.iter()
					.map(|s| s.to_string())
					.collect(),
			)
			.await
			.unwrap();
		enforcer
			.add_grouping_policy(
				["editor", "admin"].iter().map(|s| s.to_string()).collect(),
			)
			.await
			.unwrap();

		CasbinEngine::from_enforcer(enforcer)
	}

	#[tokio::test]
	async fn grants_matching_policy() {
		let engine = seeded_engine().await;
		assert!(engine.evaluate("admin", "/content", "POST").await.unwrap());
	}

	#[tokio::test]
	async fn denies_unmatched_role() {
		let engine = seeded_engine().await;
		assert!(!engine.evaluate("user", "/content", "POST").await.unwrap());
	}

	#[tokio::test]
	async fn denies_unmatched_method() {
		let engine = seeded_engine().await;
		assert!(!engine.evaluate("admin", "/content", "DELETE").await.unwrap());
	}

	#[tokio::test]
	async fn role_inheritance_applies() {
		let engine = seeded_engine().await;
		// editor inherits admin through g.
		assert!(engine.evaluate("editor", "/content", "POST").await.unwrap());
	}

	#[tokio::test]
	async fn path_patterns_match() {
		let model = rbac_model().await.unwrap();
		let mut enforcer = Enforcer::new(model, MemoryAdapter::default()).await.unwrap();
		enforcer
			.add_policy(
				["admin", "/content/:id", "GET"]
					.iter()
					.map(|s| s.to_string())
					.collect(),
			)
			.await
			.unwrap();
		let engine = CasbinEngine::from_enforcer(enforcer);

		assert!(engine.evaluate("admin", "/content/42", "GET").await.unwrap());
		assert!(!engine.evaluate("admin", "/other/42", "GET").await.unwrap());
	}

	#[tokio::test]
	async fn load_policy_on_memory_adapter_is_a_noop() {
		let engine = CasbinEngine::with_adapter(MemoryAdapter::default())
			.await
			.unwrap();
		engine.load_policy().await.unwrap();
		assert!(!engine.evaluate("user", "/content", "POST").await.unwrap());
	}
}
