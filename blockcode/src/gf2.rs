use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

use crate::dense_matrix::DenseError;

/// Element of the two-element field GF(2).
///
/// Addition is XOR and multiplication is AND, so sums never leave the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Gf2 {
    #[default]
    Zero,
    One,
}

impl Gf2 {
    pub fn is_one(self) -> bool {
        self == Gf2::One
    }

    /// BPSK symbol for this bit: 0 -> -1.0, 1 -> +1.0
    pub fn bpsk(self) -> f64 {
        match self {
            Gf2::Zero => -1.0,
            Gf2::One => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        self + Gf2::One
    }
}

impl From<bool> for Gf2 {
    fn from(bit: bool) -> Self {
        if bit {
            Gf2::One
        } else {
            Gf2::Zero
        }
    }
}

impl From<Gf2> for u8 {
    fn from(bit: Gf2) -> Self {
        bit as u8
    }
}

impl TryFrom<u8> for Gf2 {
    type Error = DenseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Gf2::Zero),
            1 => Ok(Gf2::One),
            other => Err(DenseError::InvalidElement(other)),
        }
    }
}

impl Add for Gf2 {
    type Output = Gf2;

    fn add(self, rhs: Gf2) -> Gf2 {
        Gf2::from(self != rhs)
    }
}

impl AddAssign for Gf2 {
    fn add_assign(&mut self, rhs: Gf2) {
        *self = *self + rhs;
    }
}

impl Mul for Gf2 {
    type Output = Gf2;

    fn mul(self, rhs: Gf2) -> Gf2 {
        Gf2::from(self.is_one() && rhs.is_one())
    }
}
