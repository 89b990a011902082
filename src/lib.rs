pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod logging;
pub mod session;
pub mod ui;
pub mod utils;
pub mod views;
pub mod web;
