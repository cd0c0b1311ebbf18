pub mod api;
pub mod config;
pub mod errors;
pub mod ml;
pub mod models;
pub mod services;
pub mod storage;
