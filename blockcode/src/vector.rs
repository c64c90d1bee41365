use serde::{Deserialize, Serialize};

use crate::{DenseError, Gf2, Mod2Dense};

/// Row vector over GF(2)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Mod2Vector {
    bits: Vec<Gf2>,
}

/// Real-valued received samples, one per transmitted bit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SoftVector {
    samples: Vec<f64>,
}

fn length_mismatch(op: &'static str, left: usize, right: usize) -> DenseError {
    DenseError::DimensionMismatch {
        op,
        left: (1, left),
        right: (1, right),
    }
}

impl Mod2Vector {
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![Gf2::Zero; len],
        }
    }

    /// Build a vector from 0/1 integers.
    pub fn from_bits(bits: &[u8]) -> Result<Self, DenseError> {
        bits.iter().map(|&b| Gf2::try_from(b)).collect()
    }

    pub fn to_bits(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| u8::from(b)).collect()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Gf2> {
        self.bits.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Gf2> + '_ {
        self.bits.iter().copied()
    }

    /// Number of ones
    pub fn weight(&self) -> usize {
        self.bits.iter().filter(|b| b.is_one()).count()
    }

    /// Row vector times matrix, reduced mod 2.
    ///
    /// Requires `self.len() == matrix.rows()`; the result has `matrix.cols()` entries.
    pub fn multiply(&self, matrix: &Mod2Dense) -> Result<Mod2Vector, DenseError> {
        if self.len() != matrix.rows() {
            return Err(DenseError::DimensionMismatch {
                op: "vector * matrix",
                left: (1, self.len()),
                right: matrix.shape(),
            });
        }

        Ok((0..matrix.cols())
            .map(|i| {
                self.iter()
                    .enumerate()
                    .fold(Gf2::Zero, |sum, (j, bit)| sum + bit * matrix.get(j, i))
            })
            .collect())
    }

    /// Count of positions where the two vectors differ.
    pub fn hamming_distance(&self, other: &Mod2Vector) -> Result<usize, DenseError> {
        if self.len() != other.len() {
            return Err(length_mismatch("hamming distance", self.len(), other.len()));
        }

        Ok(self
            .bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count())
    }

    /// BPSK symbols, 0 -> -1.0 and 1 -> +1.0
    pub fn bpsk(&self) -> SoftVector {
        self.iter().map(Gf2::bpsk).collect()
    }
}

impl FromIterator<Gf2> for Mod2Vector {
    fn from_iter<I: IntoIterator<Item = Gf2>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl SoftVector {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Inner product with the BPSK image of `codeword`.
    pub fn correlation(&self, codeword: &Mod2Vector) -> Result<f64, DenseError> {
        if self.len() != codeword.len() {
            return Err(length_mismatch("correlation", self.len(), codeword.len()));
        }

        Ok(self
            .samples
            .iter()
            .zip(codeword.iter())
            .map(|(x, bit)| x * bit.bpsk())
            .sum())
    }

    /// Sign slicer: negative samples become 0, everything else 1.
    pub fn hard_decision(&self) -> Mod2Vector {
        self.samples
            .iter()
            .map(|&x| Gf2::from(x >= 0.0))
            .collect()
    }
}

impl FromIterator<f64> for SoftVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_times_matrix() {
        let m = Mod2Dense::from_rows(&[[1, 1, 0], [0, 1, 1]]).unwrap();
        let v = Mod2Vector::from_bits(&[1, 1]).unwrap();

        assert_eq!(v.multiply(&m).unwrap().to_bits(), vec![1, 0, 1]);
    }

    #[test]
    fn test_vector_times_matrix_mismatch() {
        let m = Mod2Dense::allocate(3, 4).unwrap();
        let v = Mod2Vector::zeros(2);

        assert_eq!(
            v.multiply(&m).unwrap_err(),
            DenseError::DimensionMismatch {
                op: "vector * matrix",
                left: (1, 2),
                right: (3, 4),
            }
        );
    }

    #[test]
    fn test_hamming_distance() {
        let a = Mod2Vector::from_bits(&[1, 0, 1, 1]).unwrap();
        let b = Mod2Vector::from_bits(&[0, 0, 1, 0]).unwrap();

        assert_eq!(a.hamming_distance(&b).unwrap(), 2);
        assert_eq!(a.hamming_distance(&a).unwrap(), 0);
        assert!(a.hamming_distance(&Mod2Vector::zeros(3)).is_err());
        assert_eq!(a.weight(), 3);
    }

    #[test]
    fn test_rejects_non_binary_input() {
        assert!(matches!(
            Mod2Vector::from_bits(&[0, 1, 2]),
            Err(DenseError::InvalidElement(2))
        ));
    }

    #[test]
    fn test_correlation_and_slicer() {
        let codeword = Mod2Vector::from_bits(&[1, 0, 1]).unwrap();
        let received = SoftVector::new(vec![0.5, -2.0, -0.25]);

        // 0.5 + 2.0 - 0.25
        assert!((received.correlation(&codeword).unwrap() - 2.25).abs() < 1e-12);
        assert_eq!(received.hard_decision().to_bits(), vec![1, 0, 0]);
        assert_eq!(codeword.bpsk().as_slice(), &[1.0, -1.0, 1.0]);
    }
}
