//! Infrastructure layer module
//!
//! This module contains the ambient adapters around the exporter:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
