//! Monte Carlo block-error estimation.
//!
//! Every source vector of the code is sent `trials_per_source` times; the
//! estimate is the mean over sources of the per-source block error rate.
//! Each estimate restarts the generator from the configured seed, so runs are
//! reproducible and estimates at different qualities share their random draws.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::channel::{ChannelModel, ChannelState};
use crate::{CodeError, LinearCode, Mod2Vector, SimulationConfig};

/// One point of an error-rate curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorPoint {
    pub quality_db: f64,
    pub error_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transmission {
    Coded,
    Uncoded,
}

/// Block error rate estimator for one code
#[derive(Debug, Clone)]
pub struct MonteCarlo<'a> {
    code: &'a LinearCode,
    config: SimulationConfig,
}

impl<'a> MonteCarlo<'a> {
    pub fn new(code: &'a LinearCode, config: SimulationConfig) -> Result<Self, CodeError> {
        config.validate()?;
        Ok(Self { code, config })
    }

    pub fn code(&self) -> &LinearCode {
        self.code
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Probability that a decoded message differs from the one sent.
    ///
    /// `None` when the channel model is undefined at this quality.
    pub fn estimate_error(
        &self,
        model: ChannelModel,
        quality_db: f64,
    ) -> Result<Option<f64>, CodeError> {
        self.estimate(model, Transmission::Coded, quality_db)
    }

    /// Baseline without coding: the source bits go over the channel as they
    /// are and are compared bit for bit after the hard decision. The noise
    /// scale is the same as for the coded run.
    pub fn estimate_uncoded_error(
        &self,
        model: ChannelModel,
        quality_db: f64,
    ) -> Result<Option<f64>, CodeError> {
        self.estimate(model, Transmission::Uncoded, quality_db)
    }

    /// Coded error estimates for each quality; undefined points are left out.
    pub fn sweep(
        &self,
        model: ChannelModel,
        qualities: &[f64],
    ) -> Result<Vec<ErrorPoint>, CodeError> {
        let mut points = Vec::with_capacity(qualities.len());
        for &quality_db in qualities {
            if let Some(error_probability) = self.estimate_error(model, quality_db)? {
                log::info!("[{}] Eb/N0={}dB, error={}", model, quality_db, error_probability);
                points.push(ErrorPoint {
                    quality_db,
                    error_probability,
                });
            }
        }
        Ok(points)
    }

    fn estimate(
        &self,
        model: ChannelModel,
        transmission: Transmission,
        quality_db: f64,
    ) -> Result<Option<f64>, CodeError> {
        let Some(channel) = model.at_quality(quality_db, self.code.rate())? else {
            log::warn!("{} undefined at {} dB, no estimate", model, quality_db);
            return Ok(None);
        };

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let trials = self.config.trials_per_source;
        let codebook = self.code.codebook();

        let mut sum_of_rates = 0.0;
        for entry in codebook.entries() {
            let source = &entry.source;
            let sent = match transmission {
                Transmission::Coded => self.code.encode(source)?,
                Transmission::Uncoded => source.clone(),
            };

            let mut errors = 0usize;
            for _ in 0..trials {
                let decoded: Mod2Vector = match (transmission, channel) {
                    (Transmission::Coded, ChannelState::Gaussian(awgn)) => {
                        let received = awgn.with_noise(&sent, &mut rng);
                        if model == ChannelModel::Soft {
                            codebook.decode_soft(&received)?.source.clone()
                        } else {
                            codebook.decode_hard(&received.hard_decision())?.source.clone()
                        }
                    }
                    (Transmission::Coded, ChannelState::BitFlip(bsc)) => {
                        let received = bsc.with_error(&sent, &mut rng);
                        codebook.decode_hard(&received)?.source.clone()
                    }
                    (Transmission::Uncoded, ChannelState::Gaussian(awgn)) => {
                        awgn.with_noise(&sent, &mut rng).hard_decision()
                    }
                    (Transmission::Uncoded, ChannelState::BitFlip(bsc)) => {
                        bsc.with_error(&sent, &mut rng)
                    }
                };

                if &decoded != source {
                    errors += 1;
                }
            }

            sum_of_rates += errors as f64 / trials as f64;
        }

        let probability = sum_of_rates / codebook.len() as f64;

        log::debug!(
            "{} {:?} at {} dB: error {} over {} trials per source",
            model,
            transmission,
            quality_db,
            probability,
            trials
        );

        Ok(Some(probability))
    }
}
