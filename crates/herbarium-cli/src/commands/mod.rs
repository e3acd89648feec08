//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod distribution;
pub mod extract;
pub mod fetch;
pub mod guide;
pub mod thumbnails;
