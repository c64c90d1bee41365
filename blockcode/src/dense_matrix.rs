use thiserror::Error;

use crate::{Gf2, Mod2Vector};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DenseError {
    #[error("Invalid matrix dimensions")]
    InvalidDimensions,
    #[error("Index out of bounds")]
    IndexOutOfBounds,
    #[error("Dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("Not a GF(2) element: {0}")]
    InvalidElement(u8),
}

/// Dense matrix over GF(2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mod2Dense {
    n_rows: usize,
    n_cols: usize,
    /// Data stored as bits packed into u32s
    /// Each row is stored in consecutive u32s
    data: Vec<u32>,
    /// Number of u32s needed per row
    words_per_row: usize,
}

impl Mod2Dense {
    /// Allocate an all-zero matrix.
    pub fn allocate(n_rows: usize, n_cols: usize) -> Result<Self, DenseError> {
        if n_rows == 0 || n_cols == 0 {
            return Err(DenseError::InvalidDimensions);
        }

        let words_per_row = n_cols.div_ceil(32);
        let data = vec![0u32; n_rows * words_per_row];

        Ok(Self {
            n_rows,
            n_cols,
            data,
            words_per_row,
        })
    }

    /// Build a matrix from rows of 0/1 integers.
    pub fn from_rows<const N: usize>(rows: &[[u8; N]]) -> Result<Self, DenseError> {
        let mut matrix = Self::allocate(rows.len(), N)?;

        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                matrix.set(i, j, Gf2::try_from(value)?)?;
            }
        }

        Ok(matrix)
    }

    /// Height
    pub fn rows(&self) -> usize {
        self.n_rows
    }
    /// Width
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Element at (row, col); positions outside the matrix read as zero.
    pub fn get(&self, row: usize, col: usize) -> Gf2 {
        if row >= self.n_rows || col >= self.n_cols {
            return Gf2::Zero;
        }

        let word_index = row * self.words_per_row + col / 32;
        let bit_index = col % 32;

        Gf2::from((self.data[word_index] & (1u32 << bit_index)) != 0)
    }

    pub fn set(&mut self, row: usize, col: usize, value: Gf2) -> Result<(), DenseError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(DenseError::IndexOutOfBounds);
        }

        let word_index = row * self.words_per_row + col / 32;
        let mask = 1u32 << (col % 32);

        match value {
            Gf2::One => self.data[word_index] |= mask,
            Gf2::Zero => self.data[word_index] &= !mask,
        }

        Ok(())
    }

    pub fn flip(&mut self, row: usize, col: usize) -> Result<(), DenseError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(DenseError::IndexOutOfBounds);
        }

        let word_index = row * self.words_per_row + col / 32;
        self.data[word_index] ^= 1u32 << (col % 32);
        Ok(())
    }

    /// Mod-2 matrix product `a · b`; requires `a.cols() == b.rows()`.
    pub fn multiply(a: &Mod2Dense, b: &Mod2Dense) -> Result<Mod2Dense, DenseError> {
        if a.n_cols != b.n_rows {
            return Err(DenseError::DimensionMismatch {
                op: "matrix * matrix",
                left: a.shape(),
                right: b.shape(),
            });
        }

        let mut result = Mod2Dense::allocate(a.n_rows, b.n_cols)?;

        for i in 0..a.n_rows {
            for j in 0..b.n_cols {
                let mut sum = Gf2::Zero;
                for k in 0..a.n_cols {
                    sum += a.get(i, k) * b.get(k, j);
                }
                result.set(i, j, sum)?;
            }
        }

        Ok(result)
    }

    /// Swap the roles of rows and columns.
    pub fn transpose(&self) -> Mod2Dense {
        let mut data = vec![0u32; self.n_cols * self.n_rows.div_ceil(32)];
        let words_per_row = self.n_rows.div_ceil(32);

        for i in 0..self.n_rows {
            for j in 0..self.n_cols {
                if self.get(i, j).is_one() {
                    data[j * words_per_row + i / 32] |= 1u32 << (i % 32);
                }
            }
        }

        Mod2Dense {
            n_rows: self.n_cols,
            n_cols: self.n_rows,
            data,
            words_per_row,
        }
    }

    /// Rank over GF(2), by Gaussian elimination on a scratch copy.
    pub fn rank(&self) -> usize {
        let mut scratch = self.clone();
        let mut rank = 0;

        for col in 0..self.n_cols {
            if rank == self.n_rows {
                break;
            }

            let Some(pivot_row) = (rank..self.n_rows).find(|&r| scratch.get(r, col).is_one())
            else {
                continue;
            };

            scratch.swap_rows(rank, pivot_row);

            for r in 0..self.n_rows {
                if r != rank && scratch.get(r, col).is_one() {
                    scratch.add_row(r, rank);
                }
            }

            rank += 1;
        }

        rank
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&word| word == 0)
    }

    /// Swap two rows
    fn swap_rows(&mut self, row1: usize, row2: usize) {
        if row1 == row2 {
            return;
        }

        for word_offset in 0..self.words_per_row {
            let idx1 = row1 * self.words_per_row + word_offset;
            let idx2 = row2 * self.words_per_row + word_offset;
            self.data.swap(idx1, idx2);
        }
    }

    /// Add row2 to row1 (XOR in GF(2))
    fn add_row(&mut self, row1: usize, row2: usize) {
        for word_offset in 0..self.words_per_row {
            let idx1 = row1 * self.words_per_row + word_offset;
            let idx2 = row2 * self.words_per_row + word_offset;
            self.data[idx1] ^= self.data[idx2];
        }
    }

    /// Get a row as a vector
    pub fn row(&self, row: usize) -> Result<Mod2Vector, DenseError> {
        if row >= self.n_rows {
            return Err(DenseError::IndexOutOfBounds);
        }

        Ok((0..self.n_cols).map(|col| self.get(row, col)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_matrix_basic() {
        let mut matrix = Mod2Dense::allocate(3, 4).unwrap();

        matrix.set(1, 2, Gf2::One).unwrap();
        assert_eq!(matrix.get(1, 2), Gf2::One);
        assert_eq!(matrix.get(1, 1), Gf2::Zero);

        matrix.flip(1, 2).unwrap();
        assert_eq!(matrix.get(1, 2), Gf2::Zero);

        matrix.flip(0, 0).unwrap();
        assert_eq!(matrix.get(0, 0), Gf2::One);

        assert!(matches!(
            matrix.set(3, 0, Gf2::One),
            Err(DenseError::IndexOutOfBounds)
        ));
    }

    #[test]
    fn test_from_rows_validation() {
        assert!(matches!(
            Mod2Dense::from_rows(&[[0u8, 3]]),
            Err(DenseError::InvalidElement(3))
        ));
        assert!(matches!(
            Mod2Dense::from_rows::<2>(&[]),
            Err(DenseError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_dense_matrix_multiply() {
        let a = Mod2Dense::from_rows(&[[1, 0, 1], [0, 1, 0]]).unwrap();
        let b = Mod2Dense::from_rows(&[[0, 1], [1, 0], [0, 1]]).unwrap();

        let result = Mod2Dense::multiply(&a, &b).unwrap();

        // 1*1 + 1*1 wraps to zero
        assert_eq!(result, Mod2Dense::from_rows(&[[0, 0], [1, 0]]).unwrap());
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Mod2Dense::allocate(2, 3).unwrap();
        let b = Mod2Dense::allocate(2, 3).unwrap();

        let err = Mod2Dense::multiply(&a, &b).unwrap_err();
        assert_eq!(
            err,
            DenseError::DimensionMismatch {
                op: "matrix * matrix",
                left: (2, 3),
                right: (2, 3),
            }
        );
    }

    #[test]
    fn test_transpose() {
        let a = Mod2Dense::from_rows(&[[1, 1, 0], [0, 0, 1]]).unwrap();
        let t = a.transpose();

        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t, Mod2Dense::from_rows(&[[1, 0], [1, 0], [0, 1]]).unwrap());
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_transpose_wide_matrix() {
        // more than 32 rows after transposing exercises the word packing
        let mut a = Mod2Dense::allocate(2, 40).unwrap();
        a.set(0, 35, Gf2::One).unwrap();
        a.set(1, 0, Gf2::One).unwrap();

        let t = a.transpose();
        assert_eq!(t.shape(), (40, 2));
        assert_eq!(t.get(35, 0), Gf2::One);
        assert_eq!(t.get(0, 1), Gf2::One);
        assert_eq!(t.get(35, 1), Gf2::Zero);
    }

    #[test]
    fn test_rank() {
        let full = Mod2Dense::from_rows(&[[1, 0, 1], [0, 1, 1]]).unwrap();
        assert_eq!(full.rank(), 2);

        let deficient = Mod2Dense::from_rows(&[[1, 1, 0], [0, 1, 1], [1, 0, 1]]).unwrap();
        assert_eq!(deficient.rank(), 2);

        assert_eq!(Mod2Dense::allocate(3, 3).unwrap().rank(), 0);
    }

    #[test]
    fn test_row() {
        let a = Mod2Dense::from_rows(&[[1, 0, 1], [0, 1, 1]]).unwrap();
        assert_eq!(a.row(1).unwrap().to_bits(), vec![0, 1, 1]);
        assert!(a.row(2).is_err());
    }
}
