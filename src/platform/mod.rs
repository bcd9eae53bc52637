//! Platform layer
//!
//! Browser shell on wasm32:
//! - DOM renderer and transient effects
//! - Procedural audio cues
//!
//! Natively only a log-backed renderer for the headless demo.

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
pub use headless::LogRenderer;
