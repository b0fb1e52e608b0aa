//! Foundational primitives for the `grid-kernel` workspace.
//!
//! ## Grids
//! [`Grid`] is a dense, row-major 2D container indexed by `(row, col)`. The
//! transform engine never owns grids; it borrows them for the duration of a
//! call and allocates fresh output grids through [`Grid::new_fill`].
//!
//! ## Border Policies
//! Out-of-range coordinates are remapped per [`BorderPolicy`]: replicate
//! clamps to the nearest edge element, circular wraps with a non-negative
//! modulo, and unchecked asserts the coordinate was already in range.

mod border;
mod coord;
mod error;
mod grid;

pub use border::{BorderPolicy, map_index};
pub use coord::Coord;
pub use error::Error;
pub use grid::{Grid, to_f32, to_u8_clamped};
