//! # rvw-core
//!
//! Core types shared across the rvw crates.
//!
//! This crate provides the foundational types used by every other crate:
//! - Entity structs mirroring the review backend's JSON payloads
//! - Status enums, including the review lifecycle
//! - Cross-cutting error types
//! - Small response envelopes (health, delete acknowledgements)

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod timestamp;
