//! Channel models.
//!
//! Channel quality is given in dB as the energy-per-information-bit to noise
//! density ratio. The Gaussian models send BPSK symbols (0 -> -1, 1 -> +1)
//! with noise scaled by the code rate. The bit-flip model derives its flip
//! probability from an M-ary QAM bit-error-rate approximation.

use rand::Rng;
use rand_distr::Normal;
use std::fmt;

use crate::{CodeError, Mod2Vector, SoftVector};

/// Standard deviation of the additive noise for a channel quality in dB.
pub fn noise_sigma(quality_db: f64, rate: f64) -> f64 {
    (0.5 * 10f64.powf(-quality_db / 10.0) / rate).sqrt()
}

/// Modulation order of a square QAM constellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QamOrder(u32);

impl QamOrder {
    pub fn new(order: u32) -> Result<Self, CodeError> {
        if order < 2 || !order.is_power_of_two() {
            return Err(CodeError::InvalidModulationOrder(order));
        }
        Ok(Self(order))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn bits_per_symbol(self) -> u32 {
        self.0.trailing_zeros()
    }
}

/// Bit error rate of M-QAM at `quality_db` for a code of rate `rate`.
///
/// Returns `None` where the approximation is undefined: the effective energy
/// is not positive, or the formula leaves `[0, 1]`.
pub fn qam_bit_error_rate(order: QamOrder, quality_db: f64, rate: f64) -> Option<f64> {
    let m = order.get() as f64;
    let bits = order.bits_per_symbol() as f64;

    let energy = quality_db - 10.0 * (bits / rate).log10();
    let argument = (3.0 * bits * energy / (2.0 * (m - 1.0))).sqrt();
    let ber = 2.0 * (1.0 - 1.0 / m.sqrt()) * libm::erfc(argument) / energy;

    if ber.is_finite() && (0.0..=1.0).contains(&ber) {
        Some(ber)
    } else {
        None
    }
}

/// Additive white Gaussian noise on BPSK symbols
#[derive(Debug, Clone, Copy)]
pub struct AwgnChannel {
    sigma: f64,
    noise: Normal<f64>,
}

impl AwgnChannel {
    pub fn new(sigma: f64) -> Result<Self, CodeError> {
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(CodeError::InvalidNoise(sigma));
        }
        let noise = Normal::new(0.0, sigma).map_err(|_| CodeError::InvalidNoise(sigma))?;
        Ok(Self { sigma, noise })
    }

    pub fn from_quality(quality_db: f64, rate: f64) -> Result<Self, CodeError> {
        Self::new(noise_sigma(quality_db, rate))
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// BPSK-map `codeword` and add an independent noise draw to every symbol.
    pub fn with_noise<R: Rng + ?Sized>(&self, codeword: &Mod2Vector, rng: &mut R) -> SoftVector {
        codeword
            .iter()
            .map(|bit| bit.bpsk() + rng.sample(self.noise))
            .collect()
    }
}

/// Binary symmetric channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinarySymmetricChannel {
    flip_probability: f64,
}

impl BinarySymmetricChannel {
    pub fn new(flip_probability: f64) -> Result<Self, CodeError> {
        if !(0.0..=1.0).contains(&flip_probability) {
            return Err(CodeError::InvalidNoise(flip_probability));
        }
        Ok(Self { flip_probability })
    }

    /// Channel whose flip probability is the QAM bit error rate, if defined.
    pub fn from_qam(order: QamOrder, quality_db: f64, rate: f64) -> Option<Self> {
        qam_bit_error_rate(order, quality_db, rate)
            .map(|flip_probability| Self { flip_probability })
    }

    pub fn flip_probability(&self) -> f64 {
        self.flip_probability
    }

    /// Flip every bit independently with the channel's flip probability.
    pub fn with_error<R: Rng + ?Sized>(&self, codeword: &Mod2Vector, rng: &mut R) -> Mod2Vector {
        codeword
            .iter()
            .map(|bit| {
                if rng.gen_bool(self.flip_probability) {
                    bit.flipped()
                } else {
                    bit
                }
            })
            .collect()
    }
}

/// Channel and decoding strategy pair evaluated by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelModel {
    /// Gaussian noise, soft-decision (maximum correlation) decoding
    Soft,
    /// Gaussian noise, sign slicer, minimum Hamming distance decoding
    HardGaussian,
    /// Bit flips at the QAM bit error rate, minimum Hamming distance decoding
    HardQam { modulation_order: QamOrder },
}

impl ChannelModel {
    /// Modulation order behind the model; the Gaussian models are BPSK.
    pub fn modulation_order(&self) -> u32 {
        match self {
            ChannelModel::Soft | ChannelModel::HardGaussian => 2,
            ChannelModel::HardQam { modulation_order } => modulation_order.get(),
        }
    }

    /// Channel at a given quality, or `None` in the model's undefined region.
    pub fn at_quality(
        &self,
        quality_db: f64,
        rate: f64,
    ) -> Result<Option<ChannelState>, CodeError> {
        Ok(match self {
            ChannelModel::Soft | ChannelModel::HardGaussian => Some(ChannelState::Gaussian(
                AwgnChannel::from_quality(quality_db, rate)?,
            )),
            ChannelModel::HardQam { modulation_order } => {
                BinarySymmetricChannel::from_qam(*modulation_order, quality_db, rate)
                    .map(ChannelState::BitFlip)
            }
        })
    }
}

impl fmt::Display for ChannelModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelModel::Soft => write!(f, "SOFT"),
            ChannelModel::HardGaussian => write!(f, "HARD"),
            ChannelModel::HardQam { modulation_order } => {
                write!(f, "HARD QAM-{}", modulation_order.get())
            }
        }
    }
}

/// A channel model instantiated at one quality value
#[derive(Debug, Clone, Copy)]
pub enum ChannelState {
    Gaussian(AwgnChannel),
    BitFlip(BinarySymmetricChannel),
}
