// server/src/lib.rs

//! HTTP surface over the `storefront` data layer.
//!
//! Handlers only extract the request, authenticate the caller and shape the
//! response; every rule lives in `storefront::repo` and
//! `storefront::serializers`.

pub mod config;
pub mod errors;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
