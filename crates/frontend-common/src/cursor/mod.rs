//! Decorative spotlight cursor
//!
//! The trail math lives in [`trail`] and runs anywhere; the component wires
//! it to pointer events and an animation frame loop in the browser.

pub mod capability;
pub mod component;
pub mod frame_loop;
pub mod trail;

pub use capability::PointerCapability;
pub use component::{CursorFrame, CustomCursor};
pub use frame_loop::FrameLoop;
pub use trail::{Point, TrailState, TRAIL_LENGTH};
