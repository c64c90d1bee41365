use std::collections::HashMap;

use crate::{decoder, CodeError, Gf2, Mod2Dense, Mod2Vector, SoftVector};

/// Generator of the default (10,6) code, systematic in the first six positions.
pub const GENERATOR_ROWS: [[u8; 10]; 6] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [0, 1, 0, 0, 0, 0, 0, 1, 1, 1],
    [0, 0, 1, 0, 0, 0, 1, 1, 0, 1],
    [0, 0, 0, 1, 0, 0, 1, 1, 1, 0],
    [0, 0, 0, 0, 1, 0, 1, 1, 1, 1],
    [0, 0, 0, 0, 0, 1, 1, 1, 0, 0],
];

/// Parity-check matrix H of the default code (4 checks over 10 bits).
pub const PARITY_CHECK_ROWS: [[u8; 10]; 4] = [
    [0, 1, 1, 1, 0, 0, 1, 1, 1, 1],
    [0, 1, 0, 0, 1, 1, 0, 1, 1, 1],
    [1, 0, 1, 0, 0, 1, 0, 1, 1, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 1, 1],
];

/// Largest message length for which the codebook is enumerated exhaustively.
pub const MAX_MESSAGE_BITS: usize = 16;

/// All 2^size binary vectors of length `size`, in binary counting order
/// (first position most significant). Size zero yields no vectors.
///
/// Fails for sizes above `MAX_MESSAGE_BITS`.
pub fn enumerate_vectors(size: usize) -> Result<Vec<Mod2Vector>, CodeError> {
    if size > MAX_MESSAGE_BITS {
        return Err(CodeError::InvalidParameter(format!(
            "{} message bits exceed the exhaustive codebook limit of {}",
            size, MAX_MESSAGE_BITS
        )));
    }
    if size == 0 {
        return Ok(Vec::new());
    }

    Ok((0..1usize << size)
        .map(|n| {
            (0..size)
                .map(|i| Gf2::from((n >> (size - 1 - i)) & 1 == 1))
                .collect()
        })
        .collect())
}

/// One codebook row: a codeword and the source vector it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodebookEntry {
    pub codeword: Mod2Vector,
    pub source: Mod2Vector,
}

/// Every codeword of a code, in the enumeration order of its source vectors.
#[derive(Debug, Clone)]
pub struct Codebook {
    entries: Vec<CodebookEntry>,
    index: HashMap<Mod2Vector, usize>,
    min_distance: usize,
}

impl Codebook {
    /// Encode every source vector with `generator`.
    ///
    /// Fails with `NotInjective` if two sources produce the same codeword, and
    /// with `InvalidParameter` for generators with more than `MAX_MESSAGE_BITS` rows.
    pub fn build(generator: &Mod2Dense) -> Result<Self, CodeError> {
        let sources = enumerate_vectors(generator.rows())?;
        let mut entries = Vec::with_capacity(sources.len());
        let mut index = HashMap::with_capacity(sources.len());

        for source in sources {
            let codeword = source.multiply(generator)?;
            if let Some(&previous) = index.get(&codeword) {
                let first: &CodebookEntry = &entries[previous];
                return Err(CodeError::NotInjective {
                    first: first.source.to_bits(),
                    second: source.to_bits(),
                });
            }
            index.insert(codeword.clone(), entries.len());
            entries.push(CodebookEntry { codeword, source });
        }

        // Linear code: minimum distance is the lightest non-zero codeword.
        let min_distance = entries
            .iter()
            .map(|entry| entry.codeword.weight())
            .filter(|&w| w > 0)
            .min()
            .unwrap_or(0);

        Ok(Self {
            entries,
            index,
            min_distance,
        })
    }

    pub fn entries(&self) -> &[CodebookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source vector for an exact codeword.
    pub fn lookup(&self, codeword: &Mod2Vector) -> Option<&Mod2Vector> {
        self.index.get(codeword).map(|&i| &self.entries[i].source)
    }

    pub fn min_distance(&self) -> usize {
        self.min_distance
    }

    /// Hard-decision decoding: entry at minimum Hamming distance from `received`.
    pub fn decode_hard(&self, received: &Mod2Vector) -> Result<&CodebookEntry, CodeError> {
        let best =
            decoder::nearest_by_hamming(received, self.entries.iter().map(|e| &e.codeword))?;
        self.entry_at(best)
    }

    /// Soft-decision decoding: entry whose BPSK image correlates best with `received`.
    pub fn decode_soft(&self, received: &SoftVector) -> Result<&CodebookEntry, CodeError> {
        let best =
            decoder::most_correlated(received, self.entries.iter().map(|e| &e.codeword))?;
        self.entry_at(best)
    }

    fn entry_at(&self, best: Option<usize>) -> Result<&CodebookEntry, CodeError> {
        best.map(|i| &self.entries[i])
            .ok_or_else(|| CodeError::InvalidParameter("empty codebook".to_string()))
    }
}

/// Binary linear block code defined by its generator matrix
#[derive(Debug, Clone)]
pub struct LinearCode {
    generator: Mod2Dense,
    /// H transposed, `n_bits x n_checks`
    parity_check_t: Option<Mod2Dense>,
    codebook: Codebook,
}

impl LinearCode {
    /// The (10,6) code used throughout: `GENERATOR_ROWS` with `PARITY_CHECK_ROWS`.
    pub fn standard() -> Result<Self, CodeError> {
        let generator = Mod2Dense::from_rows(&GENERATOR_ROWS)?;
        let parity_check = Mod2Dense::from_rows(&PARITY_CHECK_ROWS)?;
        Self::new(generator, Some(parity_check.transpose()))
    }

    /// Build a code from a `k x n` generator and optionally the transposed
    /// parity-check matrix (`n x (n - k)`).
    pub fn new(
        generator: Mod2Dense,
        parity_check_t: Option<Mod2Dense>,
    ) -> Result<Self, CodeError> {
        let (k, n) = generator.shape();

        // rank and enumeration cost grow with k, fail before either
        if k > MAX_MESSAGE_BITS {
            return Err(CodeError::InvalidParameter(format!(
                "{} message bits exceed the exhaustive codebook limit of {}",
                k, MAX_MESSAGE_BITS
            )));
        }

        if n < k {
            return Err(CodeError::InvalidParameter(format!(
                "Codeword length ({}) should be at least the message length ({})",
                n, k
            )));
        }

        let rank = generator.rank();
        if rank != k {
            return Err(CodeError::InvalidParameter(format!(
                "Generator has rank {} but {} rows",
                rank, k
            )));
        }

        if let Some(ht) = &parity_check_t {
            if ht.rows() != n || ht.cols() != n - k {
                return Err(CodeError::InvalidParameter(format!(
                    "Parity-check transpose is {}x{}, expected {}x{}",
                    ht.rows(),
                    ht.cols(),
                    n,
                    n - k
                )));
            }
            if !Mod2Dense::multiply(&generator, ht)?.is_zero() {
                return Err(CodeError::InvalidParameter(
                    "Generator rows violate the parity checks".to_string(),
                ));
            }
        }

        let codebook = Codebook::build(&generator)?;

        log::debug!(
            "built ({}, {}) code, {} codewords, minimum distance {}",
            n,
            k,
            codebook.len(),
            codebook.min_distance()
        );

        Ok(Self {
            generator,
            parity_check_t,
            codebook,
        })
    }

    pub fn n_bits(&self) -> usize {
        self.generator.cols()
    }

    pub fn k_message_bits(&self) -> usize {
        self.generator.rows()
    }

    pub fn rate(&self) -> f64 {
        self.k_message_bits() as f64 / self.n_bits() as f64
    }

    pub fn generator(&self) -> &Mod2Dense {
        &self.generator
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn min_distance(&self) -> usize {
        self.codebook.min_distance()
    }

    /// Guaranteed error-correction radius of the hard-decision decoder.
    pub fn correctable_errors(&self) -> usize {
        self.min_distance().saturating_sub(1) / 2
    }

    pub fn encode(&self, source: &Mod2Vector) -> Result<Mod2Vector, CodeError> {
        Ok(source.multiply(&self.generator)?)
    }

    /// `word · Hᵀ`; all-zero exactly for codewords.
    pub fn syndrome(&self, word: &Mod2Vector) -> Result<Mod2Vector, CodeError> {
        let ht = self.parity_check_t.as_ref().ok_or_else(|| {
            CodeError::InvalidParameter("code has no parity-check matrix".to_string())
        })?;
        Ok(word.multiply(ht)?)
    }

    /// Number of unsatisfied parity checks.
    pub fn verify_codeword(&self, word: &Mod2Vector) -> Result<usize, CodeError> {
        Ok(self.syndrome(word)?.weight())
    }
}
