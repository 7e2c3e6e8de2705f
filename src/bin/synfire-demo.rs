//! synfire-demo - Two-layer learning demo
//!
//! Drives a rate-encoded input through a pre-synaptic Izhikevich
//! population, an STDP synaptic network, and a post-synaptic population
//! regulated by homeostasis, then reports weight statistics.
//!
//! # Usage
//!
//! ```bash
//! # Default run (0.7 input, 2000 steps)
//! synfire-demo
//!
//! # Custom input value and step count
//! synfire-demo --value 0.3 --steps 5000
//! ```

use anyhow::{bail, Context, Result};
use synfire::{
    HomeostaticRegulator, IzhPreset, Population, RateEncoder, SimConfig, SynapseConfig,
    SynapticNetwork,
};

const N_PRE: usize = 40;
const N_POST: usize = 10;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut value = 0.7f32;
    let mut steps = 2000usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--value" | "-v" => {
                value = iter
                    .next()
                    .context("--value needs a number")?
                    .parse()
                    .context("--value must be a float in [0, 1]")?;
            }
            "--steps" | "-s" => {
                steps = iter
                    .next()
                    .context("--steps needs a number")?
                    .parse()
                    .context("--steps must be a positive integer")?;
            }
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            other => bail!("unknown option: {other}"),
        }
    }

    let sim = SimConfig::default();
    let encoder = RateEncoder::new(100.0, &sim)?;
    let mut pre = Population::izhikevich(N_PRE, IzhPreset::RegularSpiking, 0.5, &sim)?;
    let mut post = Population::izhikevich(N_POST, IzhPreset::RegularSpiking, 0.5, &sim)?;
    let mut net = SynapticNetwork::new(N_PRE, N_POST, SynapseConfig::default(), &sim)?;
    let mut regulator = HomeostaticRegulator::with_defaults(&sim);

    println!(
        "synfire demo: {N_PRE} pre → {N_POST} post, value {value}, {steps} steps, dt {} ms",
        sim.dt_ms
    );
    println!("initial mean weight: {:.4}", net.mean_weight());

    let mut rng = rand::thread_rng();
    let input_train = encoder.encode(value, steps as f32 * sim.dt_ms, &mut rng);

    let mut currents = vec![0.0f32; N_POST];
    let mut pre_spike_total = 0usize;
    let mut post_spike_total = 0usize;

    for (t, &input_spike) in input_train.iter().enumerate().take(steps) {
        // Rate-coded input as a current pulse, homeostatically rescaled
        let drive = if input_spike { 15.0 } else { 2.0 };
        let pre_spikes = pre.step_uniform(regulator.scale_input(drive)).to_vec();

        let post_spikes = post.step(&currents)?.to_vec();
        currents = net.step(&pre_spikes, &post_spikes)?;

        regulator.update(pre.spike_count(), N_PRE);
        pre_spike_total += pre.spike_count();
        post_spike_total += post.spike_count();

        if (t + 1) % 500 == 0 {
            let status = regulator.status();
            println!(
                "step {:>5}: pre activity {:.2}, post activity {:.2}, \
                 avg rate {:.1} Hz, excitability {:.3}, mean weight {:.4}",
                t + 1,
                pre.activity(),
                post.activity(),
                status.activity_avg,
                status.excitability,
                net.mean_weight()
            );
        }
    }

    let stats = net.weight_stats();
    println!();
    println!("pre spikes:  {pre_spike_total}");
    println!("post spikes: {post_spike_total}");
    println!(
        "weights: mean {:.4}, std {:.4}, min {:.4}, max {:.4}",
        stats.mean, stats.std, stats.min, stats.max
    );

    Ok(())
}

fn print_help() {
    println!("synfire-demo - two-layer STDP learning demo");
    println!();
    println!("Options:");
    println!("  -v, --value <float>   input value in [0, 1] (default 0.7)");
    println!("  -s, --steps <int>     simulation steps (default 2000)");
    println!("  -h, --help            show this help");
}
