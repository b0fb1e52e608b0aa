use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    WindowShape {
        rows: usize,
        cols: usize,
    },
    WindowTooLarge {
        window: (usize, usize),
        grid: (usize, usize),
    },
    ZeroThreads,
    UncheckedBorder,
    EmptyGridList,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected} elements, got {actual}")
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "grid shape mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::WindowShape { rows, cols } => {
                write!(f, "window extents must be odd and positive, got {rows}x{cols}")
            }
            Self::WindowTooLarge { window, grid } => {
                write!(
                    f,
                    "{}x{} window leaves no interior in a {}x{} grid",
                    window.0, window.1, grid.0, grid.1
                )
            }
            Self::ZeroThreads => write!(f, "thread count must be at least 1"),
            Self::UncheckedBorder => {
                write!(f, "border pass requires a remapping policy, got Unchecked")
            }
            Self::EmptyGridList => write!(f, "at least one input grid is required"),
        }
    }
}

impl std::error::Error for Error {}
