//! STDP synaptic network
//!
//! Spike-timing-dependent plasticity over a dense weight matrix
//! connecting a pre-synaptic population's spikes to a post-synaptic
//! population's input currents.
//!
//! ## Rule
//!
//! ```text
//! Δw = a_plus  * exp(-Δt / tau_plus)   if Δt > 0 (pre before post, LTP)
//! Δw = -a_minus * exp(Δt / tau_minus)  if Δt < 0 (pre after post, LTD)
//! ```
//!
//! The online algorithm approximates this closed form with per-side
//! eligibility traces: leaky accumulators of recent spikes whose decay
//! constants derive from the STDP time constants and the timestep.
//!
//! `a_minus` must exceed `a_plus`: without that asymmetry, correlated
//! activity drives every weight to the maximum and the network loses its
//! ability to discriminate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynfireError};
use crate::sim::SimConfig;

/// STDP learning rule parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StdpRule {
    /// Potentiation amplitude (LTP)
    pub a_plus: f32,
    /// Depression amplitude (LTD); kept slightly above `a_plus`
    pub a_minus: f32,
    /// Potentiation window (ms)
    pub tau_plus: f32,
    /// Depression window (ms)
    pub tau_minus: f32,
}

impl Default for StdpRule {
    fn default() -> Self {
        Self {
            a_plus: 0.01,
            a_minus: 0.012,
            tau_plus: 20.0,
            tau_minus: 20.0,
        }
    }
}

impl StdpRule {
    fn validate(&self) -> Result<()> {
        if !(self.tau_plus > 0.0) {
            return Err(SynfireError::invalid(
                "tau_plus",
                self.tau_plus as f64,
                "STDP time constant must be positive",
            ));
        }
        if !(self.tau_minus > 0.0) {
            return Err(SynfireError::invalid(
                "tau_minus",
                self.tau_minus as f64,
                "STDP time constant must be positive",
            ));
        }
        if self.a_plus < 0.0 {
            return Err(SynfireError::invalid(
                "a_plus",
                self.a_plus as f64,
                "learning amplitude must be non-negative",
            ));
        }
        if self.a_minus < 0.0 {
            return Err(SynfireError::invalid(
                "a_minus",
                self.a_minus as f64,
                "learning amplitude must be non-negative",
            ));
        }
        Ok(())
    }

    /// Closed-form weight change for a single spike pair.
    ///
    /// `dt_ms = t_post - t_pre`: positive when the pre-synaptic neuron
    /// fired first (causal, potentiate), negative when it fired after
    /// (anti-causal, depress), zero at coincidence.
    pub fn compute_dw(&self, dt_ms: f32) -> f32 {
        if dt_ms > 0.0 {
            self.a_plus * (-dt_ms / self.tau_plus).exp()
        } else if dt_ms < 0.0 {
            -self.a_minus * (dt_ms / self.tau_minus).exp()
        } else {
            0.0
        }
    }
}

/// A single synapse: weight, bounds, and (unapplied) transmission delay
///
/// The dense network below stores weights in bulk; this value type
/// exists for drivers that model individual connections. Delay is
/// bookkeeping only — the substrate does not queue spikes across time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Synapse {
    /// Connection strength
    pub weight: f32,
    /// Lower weight bound
    pub w_min: f32,
    /// Upper weight bound
    pub w_max: f32,
    /// Transmission delay (ms), stored but not applied
    pub delay_ms: f32,
}

impl Default for Synapse {
    fn default() -> Self {
        Self {
            weight: 0.5,
            w_min: 0.0,
            w_max: 1.0,
            delay_ms: 1.0,
        }
    }
}

impl Synapse {
    /// Clip the weight into `[w_min, w_max]`
    pub fn clip(&mut self) {
        self.weight = self.weight.clamp(self.w_min, self.w_max);
    }
}

/// Synaptic network configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SynapseConfig {
    /// Fraction of pre→post pairs that are connected (1.0 = dense)
    pub connectivity: f32,
    /// Initial weight for existing connections
    pub initial_weight: f32,
    /// Lower weight bound
    pub w_min: f32,
    /// Upper weight bound
    pub w_max: f32,
    /// Learning rule
    pub rule: StdpRule,
}

impl Default for SynapseConfig {
    fn default() -> Self {
        Self {
            connectivity: 1.0,
            initial_weight: 0.5,
            w_min: 0.0,
            w_max: 1.0,
            rule: StdpRule::default(),
        }
    }
}

/// Weight statistics over existing connections
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub mean: f32,
    pub std: f32,
    pub min: f32,
    pub max: f32,
}

/// Learned state of a network, for persistence and recovery
///
/// The connectivity mask is structural and reconstructed with the
/// network, not part of the snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub weights: Vec<f32>,
    pub pre_trace: Vec<f32>,
    pub post_trace: Vec<f32>,
}

/// Dense STDP-learning weight matrix between two layers
#[derive(Clone, Debug)]
pub struct SynapticNetwork {
    n_pre: usize,
    n_post: usize,
    /// Row-major `n_pre × n_post` weights
    weights: Vec<f32>,
    /// Fixed connectivity mask; masked-out weights stay zero forever
    mask: Vec<bool>,
    /// Pre-synaptic eligibility traces (length `n_pre`)
    pre_trace: Vec<f32>,
    /// Post-synaptic eligibility traces (length `n_post`)
    post_trace: Vec<f32>,
    /// Per-step multiplicative trace decay, from `tau_plus`
    decay_pre: f32,
    /// Per-step multiplicative trace decay, from `tau_minus`
    decay_post: f32,
    config: SynapseConfig,
}

impl SynapticNetwork {
    /// Create a network connecting `n_pre` pre-synaptic to `n_post`
    /// post-synaptic neurons.
    ///
    /// With `connectivity < 1.0` the mask is sampled randomly; use
    /// [`SynapticNetwork::seeded`] for reproducible topology.
    pub fn new(n_pre: usize, n_post: usize, config: SynapseConfig, sim: &SimConfig) -> Result<Self> {
        Self::from_rng(n_pre, n_post, config, sim, &mut rand::thread_rng())
    }

    /// Deterministic variant of [`SynapticNetwork::new`]
    pub fn seeded(
        n_pre: usize,
        n_post: usize,
        config: SynapseConfig,
        sim: &SimConfig,
        seed: u64,
    ) -> Result<Self> {
        Self::from_rng(n_pre, n_post, config, sim, &mut StdRng::seed_from_u64(seed))
    }

    fn from_rng<R: Rng + ?Sized>(
        n_pre: usize,
        n_post: usize,
        config: SynapseConfig,
        sim: &SimConfig,
        rng: &mut R,
    ) -> Result<Self> {
        if n_pre == 0 {
            return Err(SynfireError::invalid(
                "n_pre",
                0.0,
                "layer size must be positive",
            ));
        }
        if n_post == 0 {
            return Err(SynfireError::invalid(
                "n_post",
                0.0,
                "layer size must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&config.connectivity) {
            return Err(SynfireError::invalid(
                "connectivity",
                config.connectivity as f64,
                "connectivity must lie in [0, 1]",
            ));
        }
        if config.w_min > config.w_max {
            return Err(SynfireError::invalid(
                "w_min",
                config.w_min as f64,
                "weight bounds are inverted (w_min > w_max)",
            ));
        }
        config.rule.validate()?;

        let size = n_pre * n_post;
        let mask: Vec<bool> = if config.connectivity >= 1.0 {
            vec![true; size]
        } else {
            (0..size)
                .map(|_| rng.gen::<f32>() < config.connectivity)
                .collect()
        };

        let w0 = config.initial_weight.clamp(config.w_min, config.w_max);
        let weights: Vec<f32> = mask.iter().map(|&m| if m { w0 } else { 0.0 }).collect();

        Ok(Self {
            n_pre,
            n_post,
            weights,
            mask,
            pre_trace: vec![0.0; n_pre],
            post_trace: vec![0.0; n_post],
            decay_pre: (-sim.dt_ms / config.rule.tau_plus).exp(),
            decay_post: (-sim.dt_ms / config.rule.tau_minus).exp(),
            config,
        })
    }

    /// One timestep: learn from this step's spikes and propagate
    /// currents forward.
    ///
    /// Returns the input current each post-synaptic neuron should
    /// receive (`pre · W`). Both spike vectors must match the layer
    /// sizes.
    pub fn step(&mut self, pre_spikes: &[bool], post_spikes: &[bool]) -> Result<Vec<f32>> {
        if pre_spikes.len() != self.n_pre {
            return Err(SynfireError::LengthMismatch {
                what: "pre-synaptic spikes",
                expected: self.n_pre,
                actual: pre_spikes.len(),
            });
        }
        if post_spikes.len() != self.n_post {
            return Err(SynfireError::LengthMismatch {
                what: "post-synaptic spikes",
                expected: self.n_post,
                actual: post_spikes.len(),
            });
        }

        // 1. Decay traces, 2. accumulate this step's spikes
        for (trace, &spiked) in self.pre_trace.iter_mut().zip(pre_spikes) {
            *trace *= self.decay_pre;
            if spiked {
                *trace += 1.0;
            }
        }
        for (trace, &spiked) in self.post_trace.iter_mut().zip(post_spikes) {
            *trace *= self.decay_post;
            if spiked {
                *trace += 1.0;
            }
        }

        let rule = self.config.rule;

        // 3. LTP: a post spike strengthens incoming weights from
        //    recently active pre neurons
        for (j, &post) in post_spikes.iter().enumerate() {
            if !post {
                continue;
            }
            for i in 0..self.n_pre {
                let idx = i * self.n_post + j;
                if self.mask[idx] {
                    self.weights[idx] += rule.a_plus * self.pre_trace[i];
                }
            }
        }

        // 4. LTD: a pre spike weakens its outgoing weights toward
        //    recently active post neurons (backwards causality)
        for (i, &pre) in pre_spikes.iter().enumerate() {
            if !pre {
                continue;
            }
            let row = i * self.n_post;
            for j in 0..self.n_post {
                let idx = row + j;
                if self.mask[idx] {
                    self.weights[idx] -= rule.a_minus * self.post_trace[j];
                }
            }
        }

        // 5. Clip every update so intermediate state stays in-bounds;
        //    masked entries stay zero
        let (w_min, w_max) = (self.config.w_min, self.config.w_max);
        for (w, &m) in self.weights.iter_mut().zip(self.mask.iter()) {
            *w = if m { w.clamp(w_min, w_max) } else { 0.0 };
        }

        // 6. Propagate: current per post neuron = Σ_pre spike · weight
        let mut currents = vec![0.0f32; self.n_post];
        for (i, &pre) in pre_spikes.iter().enumerate() {
            if !pre {
                continue;
            }
            let row = i * self.n_post;
            for (j, current) in currents.iter_mut().enumerate() {
                *current += self.weights[row + j];
            }
        }
        Ok(currents)
    }

    /// Mean weight over existing connections (0.0 when none)
    pub fn mean_weight(&self) -> f32 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for (&w, &m) in self.weights.iter().zip(self.mask.iter()) {
            if m {
                sum += w;
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f32
        }
    }

    /// Weight statistics over existing connections (zeroed when none)
    pub fn weight_stats(&self) -> WeightStats {
        let active: Vec<f32> = self
            .weights
            .iter()
            .zip(self.mask.iter())
            .filter(|(_, &m)| m)
            .map(|(&w, _)| w)
            .collect();
        if active.is_empty() {
            return WeightStats::default();
        }

        let n = active.len() as f32;
        let mean = active.iter().sum::<f32>() / n;
        let var = active.iter().map(|w| (w - mean) * (w - mean)).sum::<f32>() / n;
        let min = active.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = active.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        WeightStats {
            mean,
            std: var.sqrt(),
            min,
            max,
        }
    }

    /// Zero both eligibility traces without touching weights
    pub fn reset_traces(&mut self) {
        self.pre_trace.iter_mut().for_each(|t| *t = 0.0);
        self.post_trace.iter_mut().for_each(|t| *t = 0.0);
    }

    /// Weight of one connection (0.0 for masked-out pairs)
    pub fn weight(&self, pre: usize, post: usize) -> f32 {
        self.weights[pre * self.n_post + post]
    }

    /// Whether a pre→post connection exists
    pub fn is_connected(&self, pre: usize, post: usize) -> bool {
        self.mask[pre * self.n_post + post]
    }

    /// Number of existing connections
    pub fn synapse_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Pre-synaptic layer size
    pub fn n_pre(&self) -> usize {
        self.n_pre
    }

    /// Post-synaptic layer size
    pub fn n_post(&self) -> usize {
        self.n_post
    }

    /// Capture learned weights and traces
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            weights: self.weights.clone(),
            pre_trace: self.pre_trace.clone(),
            post_trace: self.post_trace.clone(),
        }
    }

    /// Restore learned weights and traces from a snapshot.
    ///
    /// The snapshot must come from a network of the same shape; masked
    /// entries are re-zeroed and weights re-clipped on the way in.
    pub fn restore(&mut self, snapshot: &NetworkSnapshot) -> Result<()> {
        if snapshot.weights.len() != self.weights.len() {
            return Err(SynfireError::LengthMismatch {
                what: "snapshot weights",
                expected: self.weights.len(),
                actual: snapshot.weights.len(),
            });
        }
        if snapshot.pre_trace.len() != self.n_pre || snapshot.post_trace.len() != self.n_post {
            return Err(SynfireError::LengthMismatch {
                what: "snapshot traces",
                expected: self.n_pre + self.n_post,
                actual: snapshot.pre_trace.len() + snapshot.post_trace.len(),
            });
        }

        let (w_min, w_max) = (self.config.w_min, self.config.w_max);
        for ((w, &s), &m) in self
            .weights
            .iter_mut()
            .zip(snapshot.weights.iter())
            .zip(self.mask.iter())
        {
            *w = if m { s.clamp(w_min, w_max) } else { 0.0 };
        }
        self.pre_trace.copy_from_slice(&snapshot.pre_trace);
        self.post_trace.copy_from_slice(&snapshot.post_trace);
        Ok(())
    }
}
