pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod ftp;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod realtime;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role required for every admin panel operation.
pub const SERVICE_ACCESS_ROLE: &str = "admin";
