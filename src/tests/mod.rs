#![warn(clippy::all, clippy::pedantic)]

pub mod config_loader_tests;
pub mod hard_drop_test;
pub mod snapshot_tests;
pub mod time_tests;
