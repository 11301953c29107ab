// ABOUTME: Application constants re-exported from apelog-core
// ABOUTME: Messages, session settings, defaults, and dashboard sentinels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain

pub use apelog_core::constants::*;
