//! Core Kernel - Foundational types shared across the claims workspace
//!
//! This crate provides the building blocks used by the domain, infrastructure
//! and interface crates:
//! - Strongly-typed claim identifiers
//! - Core error types
//! - Port abstractions for swappable storage adapters

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::ClaimId;
pub use error::CoreError;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
