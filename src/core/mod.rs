//! Core library components.
//!
//! This module contains the reusable business logic: sealing, the
//! reconciliation engine, template generation and configuration handling.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod expand;
pub mod keystore;
pub mod reconcile;
pub mod remote;
pub mod secrets;
pub mod template;
pub mod types;
pub mod validation;
