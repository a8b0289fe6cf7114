//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain: axum routers, JSON
//! (de)serialization through the `shared` DTOs, and translation of domain
//! errors to HTTP status codes.

pub mod rest;
