//! Host-agnostic building blocks shared by the editor surfaces.
//!
//! Nothing in here knows about webviews, DOM events or the AI transport.

pub mod adapters;
pub mod config;
pub mod errors;
pub mod geometry;
