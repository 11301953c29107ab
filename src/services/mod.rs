// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Accounts, program provisioning, log ingestion, and dashboard reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers parse forms and render responses; the rules live here. Each
//! service takes the [`Database`](crate::database::Database) explicitly and opens
//! its own connection or transaction.

/// Registration and login rules
pub mod accounts;

/// Log batch ingestion
pub mod ingestion;

/// Program creation and lazy week/session resolution
pub mod provisioning;

/// Dashboard options, series, and log history
pub mod reporting;
