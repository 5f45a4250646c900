//! Shared types, errors, and configuration for Mizan.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - User roles and JWT claims for the authorization gate
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, Role};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
