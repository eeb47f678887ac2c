//! Test Module
//!
//! Cross-module test suite for the reply engine.
//!
//! ## Test Categories
//! - `brain_tests`: normalization, similarity, intent tables, keywords
//! - `engine_tests`: full pipeline behavior on both tiers
//! - `service_tests`: chat service actor
//! - `config_tests`: environment and file configuration

pub mod engine_tests;
