// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! The RBAC model handed to the enforcer.
//!
//! Requests are `(role, path, method)` triples. `g` carries role
//! inheritance, `keyMatch2` lets policies use path patterns such as
//! `/content/:id`.

use casbin::prelude::DefaultModel;

use crate::error::AuthzError;

const RBAC_MODEL: &str = r#"
[request_definition]
r = sub, obj, act

[policy_definition]
p = sub, obj, act

[role_definition]
g = _, _

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = g(r.sub, p.sub) && keyMatch2(r.obj, p.obj) && r.act == p.act
"#;

/// The model text, for diagnostics and tests.
pub fn rbac_model_string() -> &'static str {
	RBAC_MODEL
}

/// Parse the embedded model into a Casbin [`DefaultModel`].
pub async fn rbac_model() -> Result<DefaultModel, AuthzError> {
	Ok(DefaultModel::from_str(RBAC_MODEL).await?)
}
