//! Signal encoders
//!
//! Transforms between scalar or textual values and spike trains or
//! activation vectors. Encoders sit at the simulation boundary and are
//! independent of the neuron models.
//!
//! Three schemes:
//!
//! - **Rate coding**: a scalar becomes a Bernoulli spike train whose
//!   frequency is proportional to the value
//! - **Population coding**: a scalar becomes a distributed activation
//!   pattern across neurons with Gaussian tuning curves
//! - **Text coding**: a word becomes a deterministic sparse binary
//!   pattern seeded from a pinned 64-bit hash

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SynfireError};
use crate::sim::SimConfig;

// ============================================================================
// RATE CODING
// ============================================================================

/// Rate encoder: value in [0, 1] ↔ spike frequency
///
/// Encoding is stochastic by design; decode recovers the value only
/// statistically, converging as the encoding window grows.
#[derive(Clone, Copy, Debug)]
pub struct RateEncoder {
    /// Spike frequency (Hz) at value 1.0
    pub max_rate: f32,
    dt_ms: f32,
}

impl RateEncoder {
    /// Create an encoder with the given maximum rate (Hz)
    pub fn new(max_rate: f32, sim: &SimConfig) -> Result<Self> {
        if !(max_rate > 0.0) {
            return Err(SynfireError::invalid(
                "max_rate",
                max_rate as f64,
                "maximum rate must be positive",
            ));
        }
        Ok(Self {
            max_rate,
            dt_ms: sim.dt_ms,
        })
    }

    /// Encode a value in [0, 1] (clipped) as a spike train of
    /// `duration_ms / dt` independent Bernoulli draws.
    pub fn encode<R: Rng + ?Sized>(
        &self,
        value: f32,
        duration_ms: f32,
        rng: &mut R,
    ) -> Vec<bool> {
        let value = value.clamp(0.0, 1.0);
        let n_steps = (duration_ms / self.dt_ms) as usize;
        let prob_per_step = value * self.max_rate * self.dt_ms / 1000.0;
        (0..n_steps).map(|_| rng.gen::<f32>() < prob_per_step).collect()
    }

    /// Decode a spike train back to a value in [0, 1].
    ///
    /// The spike count over the window, as a rate in Hz, normalized by
    /// `max_rate`. An empty train decodes to 0.0.
    pub fn decode(&self, spikes: &[bool], duration_ms: f32) -> f32 {
        if duration_ms <= 0.0 {
            return 0.0;
        }
        let count = spikes.iter().filter(|&&s| s).count() as f32;
        let rate_hz = count / (duration_ms / 1000.0);
        (rate_hz / self.max_rate).clamp(0.0, 1.0)
    }
}

// ============================================================================
// POPULATION CODING
// ============================================================================

/// Population encoder: value ↔ Gaussian tuning-curve activations
///
/// Each of N units has a preferred value, evenly spaced over the range;
/// a unit's activation falls off as a Gaussian of the distance between
/// the input and its preferred value.
#[derive(Clone, Debug)]
pub struct PopulationEncoder {
    preferred: Vec<f32>,
    sigma: f32,
    v_min: f32,
    v_max: f32,
}

impl PopulationEncoder {
    /// Create an encoder with `n` units covering `[v_min, v_max]`.
    ///
    /// Tuning width: `sigma = (v_max - v_min) / (n * 0.5)`.
    pub fn new(n: usize, value_range: (f32, f32)) -> Result<Self> {
        let (v_min, v_max) = value_range;
        if n == 0 {
            return Err(SynfireError::invalid(
                "n_neurons",
                0.0,
                "encoder population size must be positive",
            ));
        }
        if v_min >= v_max {
            return Err(SynfireError::invalid(
                "v_min",
                v_min as f64,
                "value range must be non-empty (v_min < v_max)",
            ));
        }

        let preferred = if n == 1 {
            vec![(v_min + v_max) * 0.5]
        } else {
            let step = (v_max - v_min) / (n - 1) as f32;
            (0..n).map(|i| v_min + step * i as f32).collect()
        };
        let sigma = (v_max - v_min) / (n as f32 * 0.5);

        Ok(Self {
            preferred,
            sigma,
            v_min,
            v_max,
        })
    }

    /// Encode a value as per-unit activations in [0, 1]
    pub fn encode(&self, value: f32) -> Vec<f32> {
        self.preferred
            .iter()
            .map(|&p| {
                let z = (value - p) / self.sigma;
                (-0.5 * z * z).exp()
            })
            .collect()
    }

    /// Decode activations back to a value: the activation-weighted mean
    /// of preferred values. All-zero input decodes to the range midpoint.
    pub fn decode(&self, activations: &[f32]) -> f32 {
        let total: f32 = activations.iter().sum();
        if total == 0.0 {
            return (self.v_min + self.v_max) * 0.5;
        }
        let weighted: f32 = activations
            .iter()
            .zip(self.preferred.iter())
            .map(|(&a, &p)| a * p)
            .sum();
        weighted / total
    }

    /// Number of encoder units
    pub fn len(&self) -> usize {
        self.preferred.len()
    }

    /// Always false: empty encoders cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.preferred.is_empty()
    }

    /// Preferred values, in unit order
    pub fn preferred(&self) -> &[f32] {
        &self.preferred
    }

    /// Tuning-curve width
    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

// ============================================================================
// TEXT CODING
// ============================================================================

/// FNV-1a 64-bit hash, pinned so word patterns are reproducible across
/// implementations (a language runtime's default string hash is not).
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Text encoder: word → deterministic sparse binary pattern
///
/// Each case-folded word hashes to a seed; the seeded generator picks
/// ~N/10 active units. Identical words always produce identical
/// patterns; distinct words produce near-orthogonal patterns (collisions
/// are possible and acceptable). There is no mutable vocabulary.
#[derive(Clone, Copy, Debug)]
pub struct TextEncoder {
    /// Pattern length (number of units)
    pub n: usize,
}

impl TextEncoder {
    /// Create an encoder producing patterns of length `n`
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SynfireError::invalid(
                "n_neurons",
                0.0,
                "pattern length must be positive",
            ));
        }
        Ok(Self { n })
    }

    /// Encode one word as a sparse binary pattern (~10% active units)
    pub fn encode_word(&self, word: &str) -> Vec<f32> {
        let normalized = word.trim().to_lowercase();
        let seed = fnv1a_64(normalized.as_bytes());
        let mut rng = StdRng::seed_from_u64(seed);

        let k = (self.n / 10).max(1);
        let mut pattern = vec![0.0; self.n];
        for idx in rand::seq::index::sample(&mut rng, self.n, k) {
            pattern[idx] = 1.0;
        }
        pattern
    }

    /// Encode whitespace-separated text: word patterns summed, then
    /// max-normalized to [0, 1]. Empty text yields all zeros.
    pub fn encode_text(&self, text: &str) -> Vec<f32> {
        let mut combined = vec![0.0f32; self.n];
        let mut any = false;
        for word in text.split_whitespace() {
            any = true;
            for (acc, w) in combined.iter_mut().zip(self.encode_word(word)) {
                *acc += w;
            }
        }
        if !any {
            return combined;
        }

        let max = combined.iter().cloned().fold(0.0f32, f32::max);
        if max > 0.0 {
            for v in &mut combined {
                *v /= max;
            }
        }
        combined
    }

    /// Cosine similarity of two texts' encoded patterns, in [0, 1];
    /// 0.0 when either pattern has zero norm
    pub fn similarity(&self, text1: &str, text2: &str) -> f32 {
        let p1 = self.encode_text(text1);
        let p2 = self.encode_text(text2);

        let dot: f32 = p1.iter().zip(p2.iter()).map(|(a, b)| a * b).sum();
        let norm1 = p1.iter().map(|v| v * v).sum::<f32>().sqrt();
        let norm2 = p2.iter().map(|v| v * v).sum::<f32>().sqrt();

        if norm1 == 0.0 || norm2 == 0.0 {
            return 0.0;
        }
        dot / (norm1 * norm2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rate_round_trip_converges() {
        let sim = SimConfig::default();
        let enc = RateEncoder::new(100.0, &sim).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let spikes = enc.encode(0.8, 1000.0, &mut rng);
        assert_eq!(spikes.len(), 1000);
        let decoded = enc.decode(&spikes, 1000.0);
        assert!(
            (decoded - 0.8).abs() < 0.2,
            "decoded {decoded} too far from 0.8"
        );
    }

    #[test]
    fn test_rate_higher_value_more_spikes() {
        let sim = SimConfig::default();
        let enc = RateEncoder::new(100.0, &sim).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let high = enc.encode(0.8, 2000.0, &mut rng);
        let low = enc.encode(0.2, 2000.0, &mut rng);
        let count = |s: &[bool]| s.iter().filter(|&&x| x).count();
        assert!(count(&high) > count(&low));
    }

    #[test]
    fn test_rate_clips_input() {
        let sim = SimConfig::default();
        let enc = RateEncoder::new(100.0, &sim).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        // Out-of-range values are clipped, not rejected
        let none = enc.encode(-3.0, 100.0, &mut rng);
        assert!(none.iter().all(|&s| !s));
        assert_eq!(enc.decode(&[], 0.0), 0.0);
    }

    #[test]
    fn test_population_round_trip() {
        let enc = PopulationEncoder::new(20, (0.0, 1.0)).unwrap();
        for &value in &[0.1, 0.3, 0.5, 0.7, 0.9] {
            let decoded = enc.decode(&enc.encode(value));
            assert!(
                (decoded - value).abs() < 0.1,
                "decode(encode({value})) = {decoded}"
            );
        }
    }

    #[test]
    fn test_population_peak_near_value() {
        let enc = PopulationEncoder::new(20, (0.0, 1.0)).unwrap();
        let activations = enc.encode(0.5);
        let (peak, _) = activations
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap();
        assert!((enc.preferred()[peak] - 0.5).abs() <= enc.sigma());
    }

    #[test]
    fn test_population_degenerate_decode() {
        let enc = PopulationEncoder::new(10, (-1.0, 1.0)).unwrap();
        // All-zero activation decodes to the range midpoint
        assert_eq!(enc.decode(&vec![0.0; 10]), 0.0);
    }

    #[test]
    fn test_population_invalid_config() {
        assert!(PopulationEncoder::new(0, (0.0, 1.0)).is_err());
        assert!(PopulationEncoder::new(10, (1.0, 0.0)).is_err());
        assert!(PopulationEncoder::new(10, (0.5, 0.5)).is_err());
    }

    #[test]
    fn test_word_determinism() {
        let enc = TextEncoder::new(100).unwrap();
        assert_eq!(enc.encode_word("hello"), enc.encode_word("hello"));
        // Case folding and trimming normalize to the same pattern
        assert_eq!(enc.encode_word("Hello "), enc.encode_word("hello"));
    }

    #[test]
    fn test_distinct_words_distinct_patterns() {
        let enc = TextEncoder::new(100).unwrap();
        assert_ne!(enc.encode_word("hello"), enc.encode_word("world"));
    }

    #[test]
    fn test_word_sparsity() {
        let enc = TextEncoder::new(100).unwrap();
        let pattern = enc.encode_word("sparse");
        let active = pattern.iter().filter(|&&v| v > 0.0).count();
        assert_eq!(active, 10);
    }

    #[test]
    fn test_empty_text_is_zero() {
        let enc = TextEncoder::new(50).unwrap();
        assert!(enc.encode_text("   ").iter().all(|&v| v == 0.0));
        assert_eq!(enc.similarity("", "anything"), 0.0);
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        let enc = TextEncoder::new(200).unwrap();
        let same = enc.similarity("the quick brown fox", "the quick brown fox");
        let other = enc.similarity("the quick brown fox", "lazy dogs sleep");
        assert!((same - 1.0).abs() < 1e-5);
        assert!(same >= other);
    }
}
