// ABOUTME: Core types and constants for the apelog training tracker
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Apelog Core
//!
//! Foundation crate shared by the server and the analytics engine. It changes
//! rarely, which keeps incremental rebuilds of the server fast.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, HTTP rendering (feature `http-response`)
//! - **models**: training entities and schedule value types
//! - **constants**: user-facing messages, session settings, defaults

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Program, `MesoCycle`, `TrainingWeek`, Log, ...)
pub mod models;
