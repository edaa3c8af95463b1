//! modcheck - outdated Go module dependency library
//!
//! This library provides:
//! - Go-flavoured semantic version parsing and ordering
//! - Severity classification of newer versions (patch, minor, major, incompatible)
//! - Filtering and ranking of outdated dependencies
//! - go.mod reading and module proxy queries
//! - Table and JSON presentation

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
