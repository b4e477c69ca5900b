//! disease-predictor - ranks probable diseases from reported symptoms
//!
//! A symptom list is encoded into a fixed-length binary feature vector, run
//! through an extremely randomized trees ensemble, and the most probable
//! diseases are returned.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Offline commands (train, check, predict)
//!
//! # Architecture
//! - `catalog`: Symptom and disease tables
//! - `features`: Symptom to feature vector encoding
//! - `model`: Tree ensemble, persistence and training
//! - `ranking`: Top-k selection and tie-break
//! - `training`: Synthetic training data
//! - `services`: Prediction service
//! - `api`: HTTP services and middleware
//! - `interfaces`: Command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod features;
pub mod interfaces;
pub mod model;
pub mod ranking;
pub mod runtime;
pub mod services;
pub mod system;
pub mod training;
