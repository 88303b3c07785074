// Copyright (c) 2026 Portcullis Authors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! HTTP route handlers.

pub mod content;
pub mod health;
