pub mod error;
pub mod validation;
pub mod model;
pub mod store;
pub mod manager;
pub mod commands;
pub mod parser;
pub mod logic;
pub mod db;
pub mod colors;
pub mod migrate;
pub mod config;
pub mod logging;
pub mod cli;
