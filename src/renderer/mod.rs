//! Rendering view
//!
//! No drawing happens here: this module turns game state into plain data
//! (player visual state, obstacle boxes, Pod particle instances) that any
//! backend can upload and draw.

pub mod instance;
pub mod view;

pub use instance::ParticleInstance;
pub use view::{FrameView, ObstacleView, PlayerVisual};
