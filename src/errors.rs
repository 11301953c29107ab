// ABOUTME: Unified error handling re-exported from apelog-core
// ABOUTME: Keeps crate::errors paths stable for every server module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error codes, `AppError`, and HTTP rendering live in `apelog-core` so the
//! analytics crate shares them.

pub use apelog_core::errors::*;
