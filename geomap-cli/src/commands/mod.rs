//! CLI subcommands.

pub mod common;
pub mod config;
pub mod fetch;
pub mod key;
pub mod project;
pub mod providers;
