// ABOUTME: Domain models re-exported from apelog-core
// ABOUTME: Training entities, schedule value types, and submission inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Common data models

pub use apelog_core::models::*;
