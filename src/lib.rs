//! Protect Snap Relay
//!
//! Bridges a UniFi Protect controller to a Telegram chat: an inbound
//! motion-trigger webhook resolves a camera, pulls a still image from the
//! controller, optionally stamps it with the local time, and relays it as a
//! photo message.
//!
//! ## Components
//!
//! 1. ProtectClient - session lifecycle, authenticated GET, camera
//!    discovery, snapshot retrieval (`protect`)
//! 2. TelegramClient - photo/text relay (`telegram`)
//! 3. Overlay - timestamp annotation on JPEG buffers (`overlay`)
//! 4. WebAPI - webhook HTTP surface (`web_api`)
//!
//! ## Design Principles
//!
//! - The controller's response shapes and auth conventions vary across
//!   firmware; discovery and dispatch never assume a single one
//! - Per-endpoint failures are logged and swallowed; only exhaustion of a
//!   fallback chain surfaces as an error

pub mod error;
pub mod models;
pub mod overlay;
pub mod protect;
pub mod state;
pub mod telegram;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
