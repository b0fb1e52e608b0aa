use core::ops::{AddAssign, Mul};

use gk_core::{BorderPolicy, Coord, Error, Grid, map_index};

/// Anchor-centered view into a borrowed grid.
///
/// Local indices `(i, j)` with `0 <= i < rows`, `0 <= j < cols` map to grid
/// coordinate `(anchor.row + i - center.row, anchor.col + j - center.col)`,
/// remapped per the window's [`BorderPolicy`]. An `Unchecked` window whose
/// mapped coordinate leaves the grid panics; that is a defect in traversal
/// bounds, not expected border behavior.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a, T> {
    grid: &'a Grid<T>,
    rows: usize,
    cols: usize,
    grid_rows: usize,
    grid_cols: usize,
    anchor: Coord,
    center: Coord,
    policy: BorderPolicy,
}

impl<'a, T> Window<'a, T> {
    pub fn new(
        grid: &'a Grid<T>,
        rows: usize,
        cols: usize,
        policy: BorderPolicy,
    ) -> Result<Self, Error> {
        if rows == 0 || cols == 0 || rows % 2 == 0 || cols % 2 == 0 {
            return Err(Error::WindowShape { rows, cols });
        }

        Ok(Self {
            grid,
            rows,
            cols,
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
            anchor: Coord::default(),
            center: Coord::new((rows / 2) as isize, (cols / 2) as isize),
            policy,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn center(&self) -> Coord {
        self.center
    }

    pub fn policy(&self) -> BorderPolicy {
        self.policy
    }

    /// Re-anchors the window. Set exactly once before each function call.
    pub fn set_anchor(&mut self, anchor: Coord) {
        self.anchor = anchor;
    }

    /// Policy-remapped access by local window coordinate.
    pub fn at(&self, i: usize, j: usize) -> &'a T {
        debug_assert!(i < self.rows && j < self.cols, "local index out of window");

        let r = self.anchor.row + i as isize - self.center.row;
        let c = self.anchor.col + j as isize - self.center.col;

        let r = map_index(r, self.grid_rows, self.policy).expect("window row outside grid");
        let c = map_index(c, self.grid_cols, self.policy).expect("window col outside grid");

        self.grid.get(r, c).expect("mapped coordinate in bounds")
    }

    pub fn at_coord(&self, p: Coord) -> &'a T {
        self.at(p.row as usize, p.col as usize)
    }

    /// Row-major sum of `weights(i, j) * window(i, j)`.
    pub fn convolve<W, R>(&self, weights: &Grid<W>) -> R
    where
        T: Copy,
        W: Copy + Mul<T, Output = R>,
        R: Default + AddAssign,
    {
        assert_eq!(
            weights.shape(),
            (self.rows, self.cols),
            "weights must match window shape"
        );

        let mut acc = R::default();
        for i in 0..self.rows {
            for (j, &w) in weights.row(i).iter().enumerate() {
                acc += w * *self.at(i, j);
            }
        }

        acc
    }

    /// Fresh row-major cursor over the window's local extent.
    pub fn iter(&self) -> WindowIter<'a, '_, T> {
        WindowIter {
            window: self,
            i: 0,
            j: 0,
        }
    }
}

impl<'a, 'w, T> IntoIterator for &'w Window<'a, T> {
    type Item = &'a T;
    type IntoIter = WindowIter<'a, 'w, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct WindowIter<'a, 'w, T> {
    window: &'w Window<'a, T>,
    i: usize,
    j: usize,
}

impl<'a, T> Iterator for WindowIter<'a, '_, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.window.rows {
            return None;
        }

        let item = self.window.at(self.i, self.j);
        self.j = (self.j + 1) % self.window.cols;
        if self.j == 0 {
            self.i += 1;
        }

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let done = self.i * self.window.cols + self.j;
        let remaining = self.window.rows * self.window.cols - done;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for WindowIter<'_, '_, T> {}

#[cfg(test)]
mod tests {
    use super::Window;
    use gk_core::{BorderPolicy, Coord, Error, Grid};

    fn ramp_grid(rows: usize, cols: usize) -> Grid<i32> {
        let data = (0..rows * cols).map(|v| v as i32).collect();
        Grid::from_vec(rows, cols, data).expect("valid grid")
    }

    #[test]
    fn rejects_even_or_zero_extents() {
        let grid = ramp_grid(4, 4);

        for (rows, cols) in [(0, 3), (3, 0), (2, 3), (3, 4)] {
            let err = Window::new(&grid, rows, cols, BorderPolicy::Unchecked).unwrap_err();
            assert_eq!(err, Error::WindowShape { rows, cols });
        }
    }

    #[test]
    fn interior_mapping_is_anchor_centered() {
        let grid = ramp_grid(5, 5);
        let mut w = Window::new(&grid, 3, 3, BorderPolicy::Unchecked).expect("valid window");
        w.set_anchor(Coord::new(2, 2));

        assert_eq!(*w.at(1, 1), 12);
        assert_eq!(*w.at(0, 0), 6);
        assert_eq!(*w.at(2, 2), 18);
        assert_eq!(*w.at_coord(Coord::new(0, 2)), 8);
    }

    #[test]
    fn replicate_clamps_past_corners() {
        let grid = ramp_grid(4, 4);

        let mut w = Window::new(&grid, 3, 3, BorderPolicy::Replicate).expect("valid window");
        w.set_anchor(Coord::new(0, 0));
        // One step beyond the top-left corner resolves to grid (0, 0).
        assert_eq!(*w.at(0, 0), *grid.get(0, 0).expect("in bounds"));

        w.set_anchor(Coord::new(3, 3));
        assert_eq!(*w.at(2, 2), *grid.get(3, 3).expect("in bounds"));
    }

    #[test]
    fn circular_wraps_to_far_edge() {
        let grid = ramp_grid(4, 4);

        let mut w = Window::new(&grid, 3, 3, BorderPolicy::Circular).expect("valid window");
        w.set_anchor(Coord::new(0, 1));
        // Grid row -1 wraps to the last row.
        assert_eq!(*w.at(0, 1), *grid.get(3, 1).expect("in bounds"));
    }

    #[test]
    #[should_panic(expected = "window row outside grid")]
    fn unchecked_out_of_range_panics() {
        let grid = ramp_grid(4, 4);
        let mut w = Window::new(&grid, 3, 3, BorderPolicy::Unchecked).expect("valid window");
        w.set_anchor(Coord::new(0, 0));
        let _ = w.at(0, 0);
    }

    #[test]
    fn iteration_is_row_major_and_restartable() {
        let grid = ramp_grid(5, 5);
        let mut w = Window::new(&grid, 3, 3, BorderPolicy::Unchecked).expect("valid window");
        w.set_anchor(Coord::new(1, 1));

        let first: Vec<i32> = w.iter().copied().collect();
        assert_eq!(first, vec![0, 1, 2, 5, 6, 7, 10, 11, 12]);

        let second: Vec<i32> = (&w).into_iter().copied().collect();
        assert_eq!(second, first);
        assert_eq!(w.iter().len(), 9);
    }

    #[test]
    fn convolve_weighted_sum() {
        let grid = ramp_grid(5, 5);
        let mut w = Window::new(&grid, 3, 3, BorderPolicy::Unchecked).expect("valid window");
        w.set_anchor(Coord::new(2, 2));

        let identity =
            Grid::from_vec(3, 3, vec![0, 0, 0, 0, 1, 0, 0, 0, 0]).expect("valid weights");
        assert_eq!(w.convolve::<i32, i32>(&identity), 12);

        let ones = Grid::new_fill(3, 3, 1);
        let sum: i32 = w.iter().sum();
        assert_eq!(w.convolve::<i32, i32>(&ones), sum);
    }
}
