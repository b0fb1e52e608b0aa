use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Integer `(row, col)` pair used for anchor positions and window centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coord {
    pub row: isize,
    pub col: isize,
}

impl Coord {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Self::Output {
        Coord {
            row: self.row + rhs.row,
            col: self.col + rhs.col,
        }
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Self::Output {
        Coord {
            row: self.row - rhs.row,
            col: self.col - rhs.col,
        }
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Coord) {
        self.row += rhs.row;
        self.col += rhs.col;
    }
}

impl SubAssign for Coord {
    fn sub_assign(&mut self, rhs: Coord) {
        self.row -= rhs.row;
        self.col -= rhs.col;
    }
}

#[cfg(test)]
mod tests {
    use super::Coord;

    #[test]
    fn componentwise_ops() {
        let a = Coord::new(2, -3);
        let b = Coord::new(1, 5);

        assert_eq!(a + b, Coord::new(3, 2));
        assert_eq!(a - b, Coord::new(1, -8));

        let mut c = a;
        c += b;
        assert_eq!(c, Coord::new(3, 2));
        c -= b;
        assert_eq!(c, a);
    }
}
