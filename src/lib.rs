//! Lumen - canvas compositing and masking core for a browser photo editor
//!
//! The webview host forwards JSON commands through [`commands::dispatch_json`];
//! everything else in this crate is host-agnostic.

pub mod ai;
pub mod commands;
pub mod core;
pub mod editor;
pub mod file;
pub mod input;
pub mod mask;
pub mod render;
pub mod tool;

pub use editor::{Editor, EditorControls, MaskUpdate};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init() {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Lumen initializing...");
    }
}
