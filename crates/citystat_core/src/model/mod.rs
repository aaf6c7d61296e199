//! Domain model for the city statistics table.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every row carries exactly three fields in fixed column order.

pub mod city;
