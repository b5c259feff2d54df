//! Elementary row operations
//!
//! The three primitive mutators every higher algorithm is built from.
//! The public forms invalidate the derived-state cache before touching the
//! rows; the factorization kernels in this crate work on scratch copies
//! through the raw helpers below, which skip that cost.
//!
//! `start` lets callers skip columns known to already be zero. It is an
//! optimization only: `start = 0` is always correct.

use super::Matrix;
use crate::error::{Error, Result};
use crate::vector::Vector;

/// `rows[target] += c * rows[source]` from column `start` on
///
/// Raw kernel form: no bounds reporting beyond the split, no cache
/// interaction.
pub(crate) fn replace_rows(
    rows: &mut [Vector],
    target: usize,
    source: usize,
    c: f64,
    start: usize,
) -> Result<()> {
    if target == source {
        return Err(Error::invalid_argument(
            "source",
            "row replacement requires two distinct rows",
        ));
    }
    let (t, s) = if target < source {
        let (head, tail) = rows.split_at_mut(source);
        (&mut head[target], &tail[0])
    } else {
        let (head, tail) = rows.split_at_mut(target);
        (&mut tail[0], &head[source])
    };
    t.add_scaled(s, c, start)?;
    Ok(())
}

impl Matrix {
    /// `row[i] *= c` from column `start` on; invalidates cached state
    pub fn row_scale(&mut self, i: usize, c: f64, start: usize) -> Result<&mut Self> {
        if i >= self.nrows() {
            return Err(Error::index_oob(i, self.nrows()));
        }
        self.invalidate();
        self.rows[i].scale(c, start);
        Ok(self)
    }

    /// `row[target] += c * row[source]` from column `start` on;
    /// invalidates cached state
    pub fn row_replace(
        &mut self,
        target: usize,
        source: usize,
        c: f64,
        start: usize,
    ) -> Result<&mut Self> {
        let m = self.nrows();
        if target >= m {
            return Err(Error::index_oob(target, m));
        }
        if source >= m {
            return Err(Error::index_oob(source, m));
        }
        self.invalidate();
        replace_rows(&mut self.rows, target, source, c, start)?;
        Ok(self)
    }

    /// Exchange rows `i1` and `i2`; invalidates cached state
    pub fn row_swap(&mut self, i1: usize, i2: usize) -> Result<&mut Self> {
        let m = self.nrows();
        if i1 >= m {
            return Err(Error::index_oob(i1, m));
        }
        if i2 >= m {
            return Err(Error::index_oob(i2, m));
        }
        self.invalidate();
        self.rows.swap(i1, i2);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_row_scale() {
        let mut a = sample();
        a.row_scale(0, 2.0, 1).unwrap();
        assert_eq!(a.row(0).unwrap().as_slice(), &[1.0, 4.0, 6.0]);
        assert!(a.row_scale(2, 1.0, 0).is_err());
    }

    #[test]
    fn test_row_replace() {
        let mut a = sample();
        a.row_replace(1, 0, -4.0, 0).unwrap();
        assert_eq!(a.row(1).unwrap().as_slice(), &[0.0, -3.0, -6.0]);
        assert!(a.row_replace(0, 0, 1.0, 0).is_err());
    }

    #[test]
    fn test_row_swap_chains() {
        let mut a = sample();
        a.row_swap(0, 1).unwrap().row_scale(0, 0.5, 0).unwrap();
        assert_eq!(a.row(0).unwrap().as_slice(), &[2.0, 2.5, 3.0]);
        assert_eq!(a.row(1).unwrap().as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_start_zero_always_correct() {
        let mut a = sample();
        let mut b = sample();
        a.row_replace(1, 0, 2.0, 0).unwrap();
        // Column 0 of row 1 differs when start skips it.
        b.row_replace(1, 0, 2.0, 1).unwrap();
        let full = a.row(1).unwrap();
        let skipped = b.row(1).unwrap();
        assert_eq!(&full.as_slice()[1..], &skipped.as_slice()[1..]);
        assert_eq!(full.as_slice()[0], 6.0);
        assert_eq!(skipped.as_slice()[0], 4.0);
    }
}
