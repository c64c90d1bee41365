//! Exhaustive nearest-codeword search.
//!
//! Both searches scan the candidate list linearly, so they only suit small codebooks.
//! Ties keep the earliest candidate, which makes decoding deterministic for a
//! fixed candidate order.

use crate::{DenseError, Mod2Vector, SoftVector};

/// Index of the candidate at minimum Hamming distance from `received`.
///
/// Returns `None` for an empty candidate list.
pub fn nearest_by_hamming<'a, I>(
    received: &Mod2Vector,
    candidates: I,
) -> Result<Option<usize>, DenseError>
where
    I: IntoIterator<Item = &'a Mod2Vector>,
{
    let mut best: Option<(usize, usize)> = None;

    for (i, candidate) in candidates.into_iter().enumerate() {
        let distance = received.hamming_distance(candidate)?;
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((i, distance));
            if distance == 0 {
                break;
            }
        }
    }

    Ok(best.map(|(i, _)| i))
}

/// Index of the candidate whose BPSK image has the largest correlation with
/// `received`. This is the maximum-likelihood choice under Gaussian noise.
pub fn most_correlated<'a, I>(
    received: &SoftVector,
    candidates: I,
) -> Result<Option<usize>, DenseError>
where
    I: IntoIterator<Item = &'a Mod2Vector>,
{
    let mut best: Option<(usize, f64)> = None;

    for (i, candidate) in candidates.into_iter().enumerate() {
        let score = received.correlation(candidate)?;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }

    Ok(best.map(|(i, _)| i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(rows: &[&[u8]]) -> Vec<Mod2Vector> {
        rows.iter()
            .map(|r| Mod2Vector::from_bits(r).unwrap())
            .collect()
    }

    #[test]
    fn test_nearest_by_hamming() {
        let candidates = words(&[&[0, 0, 0, 0], &[1, 1, 1, 0], &[0, 1, 1, 1]]);
        let received = Mod2Vector::from_bits(&[1, 1, 0, 0]).unwrap();

        assert_eq!(nearest_by_hamming(&received, &candidates).unwrap(), Some(1));
    }

    #[test]
    fn test_hamming_tie_keeps_first() {
        let candidates = words(&[&[1, 1, 0], &[0, 1, 1]]);
        let received = Mod2Vector::from_bits(&[0, 1, 0]).unwrap();

        assert_eq!(nearest_by_hamming(&received, &candidates).unwrap(), Some(0));
    }

    #[test]
    fn test_empty_candidates() {
        let received = Mod2Vector::zeros(3);
        assert_eq!(
            nearest_by_hamming(&received, &Vec::<Mod2Vector>::new()).unwrap(),
            None
        );
        assert_eq!(
            most_correlated(&received.bpsk(), &Vec::<Mod2Vector>::new()).unwrap(),
            None
        );
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let candidates = words(&[&[0, 0]]);
        let received = Mod2Vector::zeros(3);

        assert!(matches!(
            nearest_by_hamming(&received, &candidates),
            Err(DenseError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_most_correlated() {
        let candidates = words(&[&[0, 0, 0], &[1, 1, 0], &[1, 1, 1]]);
        // weak third sample still tips the decision toward 111
        let received = SoftVector::new(vec![0.9, 1.1, 0.05]);

        assert_eq!(most_correlated(&received, &candidates).unwrap(), Some(2));

        let received = SoftVector::new(vec![0.9, 1.1, -0.05]);
        assert_eq!(most_correlated(&received, &candidates).unwrap(), Some(1));
    }
}
