//! Ready-made sliding-window filters.
//!
//! Each filter wraps a [`gk_kernel::Kernel`] around a small per-window
//! function: box blur averages the window, [`filter2d_f32`] computes a
//! weighted window sum. Border handling defaults to replicate; pass
//! [`BorderPolicy::Circular`] to `filter2d_f32` for wrap-around semantics.

use gk_core::{BorderPolicy, Error, Grid};
use gk_kernel::{Kernel, KernelConfig, Window};

pub use gk_core::{to_f32, to_u8_clamped};

/// Mean filter over a `(2*half+1)` square window, replicate border.
pub fn box_blur_u8(src: &Grid<u8>, half: usize, num_threads: usize) -> Result<Grid<u8>, Error> {
    let area = ((2 * half + 1) * (2 * half + 1)) as f64;
    let kernel = Kernel::new(
        move |ws: &[Window<'_, u8>]| -> u8 {
            let sum: f64 = ws[0].iter().map(|&v| f64::from(v)).sum();
            (sum / area).round() as u8
        },
        KernelConfig {
            num_threads,
            ..KernelConfig::with_half_size(half)
        },
    )?;

    kernel.apply(&[src])
}

/// Mean filter over a `(2*half+1)` square window, replicate border.
pub fn box_blur_f32(src: &Grid<f32>, half: usize, num_threads: usize) -> Result<Grid<f32>, Error> {
    let area = ((2 * half + 1) * (2 * half + 1)) as f32;
    let kernel = Kernel::new(
        move |ws: &[Window<'_, f32>]| -> f32 {
            let sum: f32 = ws[0].iter().sum();
            sum / area
        },
        KernelConfig {
            num_threads,
            ..KernelConfig::with_half_size(half)
        },
    )?;

    kernel.apply(&[src])
}

/// Weighted window sum with an odd-sized weight grid.
pub fn filter2d_f32(
    src: &Grid<f32>,
    weights: &Grid<f32>,
    border: BorderPolicy,
    num_threads: usize,
) -> Result<Grid<f32>, Error> {
    let (wrows, wcols) = weights.shape();
    if wrows == 0 || wcols == 0 || wrows % 2 == 0 || wcols % 2 == 0 {
        return Err(Error::WindowShape {
            rows: wrows,
            cols: wcols,
        });
    }

    let kernel = Kernel::new(
        |ws: &[Window<'_, f32>]| -> f32 { ws[0].convolve(weights) },
        KernelConfig {
            half_rows: wrows / 2,
            half_cols: wcols / 2,
            num_threads,
            border,
        },
    )?;

    kernel.apply(&[src])
}

#[cfg(test)]
mod tests {
    use gk_core::{BorderPolicy, Error, Grid};

    use crate::{box_blur_f32, box_blur_u8, filter2d_f32, to_f32, to_u8_clamped};

    #[test]
    fn box_blur_keeps_uniform_grids_uniform() {
        let grid = Grid::new_fill(5, 5, 1u8);
        let out = box_blur_u8(&grid, 1, 1).expect("valid call");
        assert_eq!(out.shape(), (5, 5));
        assert!(out.data().iter().all(|&v| v == 1));
    }

    #[test]
    fn box_blur_spreads_a_single_peak() {
        let mut data = vec![0.0f32; 25];
        data[12] = 25.0;
        let grid = Grid::from_vec(5, 5, data).expect("valid grid");

        let out = box_blur_f32(&grid, 1, 1).expect("valid call");
        // Every window containing the peak averages it over 9 cells.
        for r in 1..4 {
            for c in 1..4 {
                let v = *out.get(r, c).expect("in bounds");
                assert!((v - 25.0 / 9.0).abs() < 1e-5);
            }
        }
        assert_eq!(out.get(0, 0), Some(&0.0));

        let total_in: f32 = grid.data().iter().sum();
        let total_out: f32 = out.data().iter().sum();
        assert!((total_in - total_out).abs() < 1e-3, "interior mass preserved");
    }

    #[test]
    fn box_blur_is_thread_count_invariant() {
        let data = (0..64).map(|v| (v * 3 % 256) as u8).collect();
        let grid = Grid::from_vec(8, 8, data).expect("valid grid");

        let serial = box_blur_u8(&grid, 2, 1).expect("valid call");
        let parallel = box_blur_u8(&grid, 2, 3).expect("valid call");
        assert_eq!(serial, parallel);
    }

    #[test]
    fn filter2d_identity_weights_reproduce_input() {
        let data = (0..30).map(|v| v as f32).collect();
        let grid = Grid::from_vec(5, 6, data).expect("valid grid");

        let identity = Grid::from_vec(
            3,
            3,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        )
        .expect("valid weights");

        let out = filter2d_f32(&grid, &identity, BorderPolicy::Replicate, 2).expect("valid call");
        assert_eq!(out, grid);
    }

    #[test]
    fn filter2d_rejects_even_weights() {
        let grid = Grid::new_fill(5, 5, 0.0f32);
        let weights = Grid::new_fill(2, 3, 1.0f32);

        let err = filter2d_f32(&grid, &weights, BorderPolicy::Replicate, 1).unwrap_err();
        assert_eq!(err, Error::WindowShape { rows: 2, cols: 3 });
    }

    #[test]
    fn u8_round_trip_through_f32_filtering() {
        let grid = Grid::new_fill(4, 4, 200u8);
        let blurred = box_blur_f32(&to_f32(&grid), 1, 1).expect("valid call");
        let back = to_u8_clamped(&blurred);
        assert!(back.data().iter().all(|&v| v == 200));
    }
}
