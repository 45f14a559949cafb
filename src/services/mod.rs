//! Service layer for business logic.
//!
//! This module contains services that coordinate the parser and the models.

pub mod dead_keys;

pub use dead_keys::DeadKeyService;
