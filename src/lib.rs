pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod fetch_error;
pub mod fetcher;
pub mod histogram;
pub mod models;
pub mod pollination;
pub mod season;
pub mod services;
pub mod utils;
