//! Image ingestion and export
//!
//! - decoding uploads / AI results into [`ImageResource`]s
//! - PNG export of the composite and of masks

pub mod export;
pub mod resource;
pub mod types;

pub use export::{encode_png, export_composite};
pub use resource::{ImageResource, SourceId};
pub use types::*;
