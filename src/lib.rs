//! Blog posts REST API: five CRUD endpoints over a single document collection.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
