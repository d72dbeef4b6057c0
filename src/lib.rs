//! Chalkbook - local-first content manager for a school website.
//!
//! Content lives as JSON records in a key-value directory store; typed
//! stores load and persist entities, schema-driven forms validate edits,
//! and egui pages tie the two together.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod entities;
pub mod forms;
pub mod pages;
