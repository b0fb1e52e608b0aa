use std::ops::Range;
use std::panic;
use std::thread;

use gk_core::{BorderPolicy, Coord, Error, Grid};

use crate::partition::{RowBlock, partition_rows};
use crate::window::Window;

/// Construction parameters for a [`Kernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Window half-extent along rows; the window spans `2 * half_rows + 1`.
    pub half_rows: usize,
    /// Window half-extent along columns.
    pub half_cols: usize,
    /// Worker threads for the interior pass. `1` runs on the calling thread.
    pub num_threads: usize,
    /// Remapping policy for border-strip windows (Replicate or Circular).
    pub border: BorderPolicy,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            half_rows: 1,
            half_cols: 1,
            num_threads: 1,
            border: BorderPolicy::Replicate,
        }
    }
}

impl KernelConfig {
    pub fn with_half_size(half: usize) -> Self {
        Self {
            half_rows: half,
            half_cols: half,
            ..Self::default()
        }
    }
}

/// Sliding-window transform engine.
///
/// Owns the per-window function and the window half-extents. Immutable after
/// construction; a kernel can be applied to any number of grid sets.
pub struct Kernel<F> {
    f: F,
    half_rows: usize,
    half_cols: usize,
    window_rows: usize,
    window_cols: usize,
    num_threads: usize,
    border: BorderPolicy,
}

impl<F> std::fmt::Debug for Kernel<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("half_rows", &self.half_rows)
            .field("half_cols", &self.half_cols)
            .field("window_rows", &self.window_rows)
            .field("window_cols", &self.window_cols)
            .field("num_threads", &self.num_threads)
            .field("border", &self.border)
            .finish_non_exhaustive()
    }
}

impl<F> Kernel<F> {
    pub fn new(f: F, config: KernelConfig) -> Result<Self, Error> {
        if config.num_threads == 0 {
            return Err(Error::ZeroThreads);
        }
        if config.border == BorderPolicy::Unchecked {
            return Err(Error::UncheckedBorder);
        }

        Ok(Self {
            f,
            half_rows: config.half_rows,
            half_cols: config.half_cols,
            window_rows: 2 * config.half_rows + 1,
            window_cols: 2 * config.half_cols + 1,
            num_threads: config.num_threads,
            border: config.border,
        })
    }

    pub fn window_rows(&self) -> usize {
        self.window_rows
    }

    pub fn window_cols(&self) -> usize {
        self.window_cols
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn border(&self) -> BorderPolicy {
        self.border
    }

    /// Producing mode: runs the function at every anchor of `grids` and
    /// collects the return values into a new grid of the same shape.
    ///
    /// A panic inside the function is captured per worker and re-raised on
    /// the calling thread once every worker has been joined.
    pub fn apply<T, R>(&self, grids: &[&Grid<T>]) -> Result<Grid<R>, Error>
    where
        T: Sync,
        R: Default + Clone + Send,
        F: Fn(&[Window<'_, T>]) -> R + Sync,
    {
        let (rows, cols) = self.validate(grids)?;
        let mut out = Grid::new_fill(rows, cols, R::default());

        {
            let f = &self.f;
            let out = &mut out;
            self.border_pass(grids, rows, cols, &mut |r, c, ws| {
                *out.get_mut(r, c).expect("border anchor inside output") = f(ws);
            });
        }

        let blocks = partition_rows(self.half_rows, rows - self.half_rows, self.num_threads);
        if blocks.len() == 1 {
            let block = blocks[0];
            let band = &mut out.data_mut()[block.start * cols..block.end * cols];
            self.produce_block(grids, block, cols, band);
        } else {
            let first_row = blocks[0].start;
            let (_, mut rest) = out.data_mut().split_at_mut(first_row * cols);
            let mut jobs = Vec::with_capacity(blocks.len());
            for block in &blocks {
                let (band, tail) = rest.split_at_mut(block.len() * cols);
                rest = tail;
                jobs.push((*block, band));
            }

            thread::scope(|s| {
                let mut handles = Vec::with_capacity(jobs.len());
                for (block, band) in jobs {
                    handles.push(s.spawn(move || self.produce_block(grids, block, cols, band)));
                }
                join_all(handles);
            });
        }

        Ok(out)
    }

    /// Mutating mode: runs the function at every anchor purely for its side
    /// effects. Inputs are only borrowed and come back untouched.
    pub fn for_each<T>(&self, grids: &[&Grid<T>]) -> Result<(), Error>
    where
        T: Sync,
        F: Fn(&[Window<'_, T>]) + Sync,
    {
        let (rows, cols) = self.validate(grids)?;

        let f = &self.f;
        self.border_pass(grids, rows, cols, &mut |_, _, ws| f(ws));

        let blocks = partition_rows(self.half_rows, rows - self.half_rows, self.num_threads);
        if blocks.len() == 1 {
            self.visit_block(grids, blocks[0], cols);
        } else {
            thread::scope(|s| {
                let mut handles = Vec::with_capacity(blocks.len());
                for block in &blocks {
                    let block = *block;
                    handles.push(s.spawn(move || self.visit_block(grids, block, cols)));
                }
                join_all(handles);
            });
        }

        Ok(())
    }

    /// Checks the whole configuration before any pass runs.
    fn validate<T>(&self, grids: &[&Grid<T>]) -> Result<(usize, usize), Error> {
        let first = grids.first().ok_or(Error::EmptyGridList)?;
        let shape = first.shape();

        for grid in &grids[1..] {
            if grid.shape() != shape {
                return Err(Error::ShapeMismatch {
                    expected: shape,
                    actual: grid.shape(),
                });
            }
        }

        // The interior must be non-empty, which also means the window fits
        // the grid. Rejecting here keeps every interior footprint in-bounds.
        if shape.0 <= 2 * self.half_rows || shape.1 <= 2 * self.half_cols {
            return Err(Error::WindowTooLarge {
                window: (self.window_rows, self.window_cols),
                grid: shape,
            });
        }

        Ok(shape)
    }

    /// Serial pass over the four border strips, with policy windows.
    ///
    /// The strips partition the border region without overlap: full-width
    /// top and bottom bands, then left and right bands over the remaining
    /// rows.
    fn border_pass<'g, T, S>(&self, grids: &[&'g Grid<T>], rows: usize, cols: usize, sink: &mut S)
    where
        S: FnMut(usize, usize, &[Window<'g, T>]),
    {
        let mut windows = self.make_windows(grids, self.border);
        let hr = self.half_rows;
        let hc = self.half_cols;

        for_each_anchor(&mut windows, 0..hr, 0..cols, sink);
        for_each_anchor(&mut windows, rows - hr..rows, 0..cols, sink);
        for_each_anchor(&mut windows, hr..rows - hr, 0..hc, sink);
        for_each_anchor(&mut windows, hr..rows - hr, cols - hc..cols, sink);
    }

    fn produce_block<T, R>(&self, grids: &[&Grid<T>], block: RowBlock, cols: usize, band: &mut [R])
    where
        F: Fn(&[Window<'_, T>]) -> R,
    {
        // Interior anchors keep the whole footprint inside the grid, so no
        // remapping is needed regardless of the kernel's border policy.
        let mut windows = self.make_windows(grids, BorderPolicy::Unchecked);
        let f = &self.f;
        let hc = self.half_cols;
        let start = block.start;

        for_each_anchor(
            &mut windows,
            block.start..block.end,
            hc..cols - hc,
            &mut |r, c, ws| {
                band[(r - start) * cols + c] = f(ws);
            },
        );
    }

    fn visit_block<T>(&self, grids: &[&Grid<T>], block: RowBlock, cols: usize)
    where
        F: Fn(&[Window<'_, T>]),
    {
        let mut windows = self.make_windows(grids, BorderPolicy::Unchecked);
        let f = &self.f;
        let hc = self.half_cols;

        for_each_anchor(
            &mut windows,
            block.start..block.end,
            hc..cols - hc,
            &mut |_, _, ws| f(ws),
        );
    }

    fn make_windows<'g, T>(
        &self,
        grids: &[&'g Grid<T>],
        policy: BorderPolicy,
    ) -> Vec<Window<'g, T>> {
        grids
            .iter()
            .map(|grid| {
                Window::new(grid, self.window_rows, self.window_cols, policy)
                    .expect("derived window extents are odd and positive")
            })
            .collect()
    }
}

/// Visits every `(row, col)` anchor of the given ranges in row-major order,
/// re-anchoring all windows before each sink call.
fn for_each_anchor<'g, T, S>(
    windows: &mut [Window<'g, T>],
    row_range: Range<usize>,
    col_range: Range<usize>,
    sink: &mut S,
) where
    S: FnMut(usize, usize, &[Window<'g, T>]),
{
    for r in row_range {
        for c in col_range.clone() {
            let anchor = Coord::new(r as isize, c as isize);
            for w in windows.iter_mut() {
                w.set_anchor(anchor);
            }
            sink(r, c, &*windows);
        }
    }
}

/// Joins every worker, then re-raises the first captured panic.
fn join_all(handles: Vec<thread::ScopedJoinHandle<'_, ()>>) {
    let mut first_panic = None;
    for handle in handles {
        if let Err(payload) = handle.join() {
            first_panic.get_or_insert(payload);
        }
    }

    if let Some(payload) = first_panic {
        panic::resume_unwind(payload);
    }
}
