//! Subcommand implementations

pub mod demo;
pub mod growth;
pub mod run;
