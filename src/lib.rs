pub mod bench;
pub mod config;
pub mod problem;
pub mod search;
pub mod state;
pub mod ui;
