// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Policy-evaluation engine boundary for the Portcullis gate.
//!
//! The actual rule matching, role inheritance and policy persistence live in
//! the Casbin enforcer and its PostgreSQL adapter; this crate only defines
//! the interface the gate needs ([`PolicyEngine`]) and wires the enforcer
//! behind it ([`CasbinEngine`]).

pub mod engine;
pub mod error;
pub mod model;

pub use engine::{CasbinEngine, PolicyEngine};
pub use error::AuthzError;
pub use model::{rbac_model, rbac_model_string};
