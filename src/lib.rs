//! Equiplend Equipment Loan Management System
//!
//! A Rust implementation of the Equiplend loan-and-reservation server,
//! providing a REST JSON API for managing equipment inventory, loan
//! requests, reservations and special loans.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
