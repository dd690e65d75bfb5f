pub mod api;
pub mod classify;
pub mod config;
pub mod db;
pub mod ingest;
pub mod models;
