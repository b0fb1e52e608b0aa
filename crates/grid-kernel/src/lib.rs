//! Umbrella crate for the `grid-kernel` workspace.
//!
//! Re-exports the grid primitives, the sliding-window engine, and the
//! ready-made filters.

pub use gk_core::*;
pub use gk_filters::{box_blur_f32, box_blur_u8, filter2d_f32};
pub use gk_kernel::*;
