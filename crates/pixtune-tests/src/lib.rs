//! Integration tests for pixtune crates.
//!
//! This crate contains end-to-end tests that run operators, pipelines and
//! palette extraction together.
