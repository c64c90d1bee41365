//! Channel-quality threshold search and coding gain.
//!
//! The search assumes the error probability does not increase with quality.
//! Monte Carlo estimates only satisfy that on average, so the resolution of
//! a threshold is limited by sampling noise rather than by the bisection.

use serde::{Deserialize, Serialize};

use crate::{ChannelModel, CodeError, MonteCarlo};

/// Coded and uncoded thresholds for one channel model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainReport {
    pub modulation_order: u32,
    pub target_error_probability: f64,
    /// Quality needed with coding, dB
    pub threshold_db: f64,
    /// Quality needed without coding, dB
    pub uncoded_threshold_db: f64,
    /// `uncoded_threshold_db - threshold_db`
    pub gap_db: f64,
}

/// Bisection over `[lower, upper]` for the smallest value meeting the target.
///
/// `upper` is assumed to meet the target and `lower` not to. After each step
/// `upper` is the best known value meeting it; that value is returned, so the
/// result always lies in the range.
pub fn bisect<F>(
    lower: f64,
    upper: f64,
    iterations: u32,
    mut meets_target: F,
) -> Result<f64, CodeError>
where
    F: FnMut(f64) -> Result<bool, CodeError>,
{
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(CodeError::InvalidParameter(format!(
            "Search range [{}, {}] must be finite and non-empty",
            lower, upper
        )));
    }

    let mut lo = lower;
    let mut hi = upper;

    for step in 0..iterations {
        let middle = ((lo + hi) / 2.0).clamp(lo, hi);
        let meets = meets_target(middle)?;
        log::trace!("bisection step {}: {} -> {}", step, middle, meets);

        if meets {
            hi = middle;
        } else {
            lo = middle;
        }
    }

    Ok(hi)
}

impl MonteCarlo<'_> {
    /// Lowest quality at which the coded error estimate falls below `target`.
    pub fn find_threshold(&self, model: ChannelModel, target: f64) -> Result<f64, CodeError> {
        let search = self.config().search;
        bisect(search.lower_db, search.upper_db, search.iterations, |q| {
            // an undefined estimate never meets the target
            Ok(self.estimate_error(model, q)?.is_some_and(|p| p < target))
        })
    }

    /// Same search for uncoded transmission.
    pub fn find_uncoded_threshold(
        &self,
        model: ChannelModel,
        target: f64,
    ) -> Result<f64, CodeError> {
        let search = self.config().search;
        bisect(search.lower_db, search.upper_db, search.iterations, |q| {
            Ok(self
                .estimate_uncoded_error(model, q)?
                .is_some_and(|p| p < target))
        })
    }

    /// Thresholds with and without coding at the configured target probability.
    pub fn coding_gain(&self, model: ChannelModel) -> Result<GainReport, CodeError> {
        let target = self.config().target_error_probability;

        let uncoded_threshold_db = self.find_uncoded_threshold(model, target)?;
        let threshold_db = self.find_threshold(model, target)?;
        let gap_db = uncoded_threshold_db - threshold_db;

        log::info!(
            "[{}] P={}: Eb/N0 = {} dB, uncoded {} dB, efficiency = {} dB",
            model,
            target,
            threshold_db,
            uncoded_threshold_db,
            gap_db
        );

        Ok(GainReport {
            modulation_order: model.modulation_order(),
            target_error_probability: target,
            threshold_db,
            uncoded_threshold_db,
            gap_db,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinearCode, QamOrder, SearchConfig, SimulationConfig};

    #[test]
    fn test_bisect_finds_step() {
        let found = bisect(0.0, 100.0, 32, |x| Ok(x >= 37.5)).unwrap();
        assert!((found - 37.5).abs() < 1e-6);
        assert!(found >= 37.5);
    }

    #[test]
    fn test_bisect_stays_in_range() {
        let never = bisect(0.0, 10.0, 32, |_| Ok(false)).unwrap();
        assert_eq!(never, 10.0);

        let always = bisect(0.0, 10.0, 32, |_| Ok(true)).unwrap();
        assert!((0.0..1e-6).contains(&always));
    }

    #[test]
    fn test_bisect_propagates_errors() {
        let result = bisect(0.0, 1.0, 4, |_| {
            Err(CodeError::InvalidParameter("boom".to_string()))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_bisect_rejects_bad_range() {
        for (lower, upper) in [(10.0, 0.0), (1.0, 1.0), (f64::NAN, 1.0), (0.0, f64::INFINITY)] {
            let result = bisect(lower, upper, 4, |_| Ok(true));
            assert!(
                matches!(result, Err(CodeError::InvalidParameter(_))),
                "[{}, {}] gave {:?}",
                lower,
                upper,
                result
            );
        }
    }

    #[test]
    fn test_bisect_step_count() {
        let mut calls = 0;
        bisect(0.0, 1.0, 7, |_| {
            calls += 1;
            Ok(true)
        })
        .unwrap();
        assert_eq!(calls, 7);
    }

    #[test]
    fn test_undefined_region_pushes_threshold_up() {
        // QAM-64 is undefined below 10 dB at rate 0.6, bisection must never settle there
        let code = LinearCode::standard().unwrap();
        let config = SimulationConfig {
            trials_per_source: 5,
            search: SearchConfig {
                lower_db: 0.0,
                upper_db: 60.0,
                iterations: 12,
            },
            ..Default::default()
        };
        let mc = MonteCarlo::new(&code, config).unwrap();
        let model = ChannelModel::HardQam {
            modulation_order: QamOrder::new(64).unwrap(),
        };

        let threshold = mc.find_threshold(model, 0.5).unwrap();
        assert!(threshold > 10.0 && threshold <= 60.0, "{}", threshold);
    }
}
