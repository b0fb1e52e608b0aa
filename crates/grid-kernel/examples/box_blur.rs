//! Blurs a synthetic checkerboard and prints a few sample rows.
//!
//! Run with `cargo run --example box_blur`.

use grid_kernel::{BorderPolicy, Grid, Kernel, KernelConfig, Window, box_blur_u8};

fn checkerboard(rows: usize, cols: usize, tile: usize) -> Grid<u8> {
    let mut data = vec![0u8; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            if (r / tile + c / tile) % 2 == 0 {
                data[r * cols + c] = 255;
            }
        }
    }

    Grid::from_vec(rows, cols, data).expect("valid grid")
}

fn print_row(label: &str, row: &[u8]) {
    let cells: Vec<String> = row.iter().map(|v| format!("{v:>3}")).collect();
    println!("{label}: {}", cells.join(" "));
}

fn main() {
    let src = checkerboard(16, 16, 4);

    let blurred = box_blur_u8(&src, 2, 2).expect("box blur");
    print_row("src row 4 ", src.row(4));
    print_row("blur row 4", blurred.row(4));

    // The same filter written directly against the engine, with a circular
    // border so the checkerboard tiles wrap seamlessly.
    let kernel = Kernel::new(
        |ws: &[Window<'_, u8>]| -> u8 {
            let sum: u32 = ws[0].iter().map(|&v| u32::from(v)).sum();
            (sum / 25) as u8
        },
        KernelConfig {
            num_threads: 2,
            border: BorderPolicy::Circular,
            ..KernelConfig::with_half_size(2)
        },
    )
    .expect("valid kernel");

    let wrapped: Grid<u8> = kernel.apply(&[&src]).expect("circular blur");
    print_row("wrap row 0", wrapped.row(0));
}
