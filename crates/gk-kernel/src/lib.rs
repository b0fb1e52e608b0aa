//! Sliding-window transform engine for dense 2D grids.
//!
//! A [`Kernel`] owns a per-window function and a window half-size. Calling
//! [`Kernel::apply`] with one or more equally shaped grids enumerates every
//! anchor position, builds one [`Window`] per input grid, and writes each
//! invocation's return value into a freshly allocated output grid.
//! [`Kernel::for_each`] is the side-effect variant for functions that return
//! nothing.
//!
//! Traversal runs in two phases: a serial pass over the four border strips
//! with policy-remapped windows, then a parallel pass over the interior where
//! the window footprint is guaranteed in-bounds. Interior rows are split into
//! contiguous blocks, one per worker thread.

mod kernel;
mod partition;
mod window;

pub use kernel::{Kernel, KernelConfig};
pub use partition::{RowBlock, partition_rows};
pub use window::{Window, WindowIter};
