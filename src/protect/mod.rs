//! ProtectClient - Controller Discovery and Retrieval
//!
//! ## Responsibilities
//!
//! - Session/token lifecycle (API key or password login, 12 h TTL)
//! - Authenticated GET with bearer-header and cookie fallback
//! - Camera directory discovery across endpoint and schema variants
//! - Snapshot retrieval with primary/fallback endpoint chain
//! - Display-name synthesis for camera records
//!
//! Different controller firmware versions expose different endpoints,
//! response shapes, and token conventions; every chain here is
//! first-success-wins over the known variants.

mod client;
mod discovery;
mod naming;
mod session;
mod snapshot;
mod types;

pub use client::ProtectClient;
pub use discovery::extract_cameras;
pub use naming::display_name;
pub use session::{Session, SESSION_TTL};
pub use types::{camera_id, is_camera_like, to_summary, CameraRecord};
