//! Interpolatability report for a synthetic latent space
//!
//! Sweeps each latent dimension of a toy "decoder" whose attributes respond
//! linearly, quadratically, and with a periodic wobble, then reports
//! smoothness and monotonicity per attribute, both in one shot and through a
//! streaming metric bundle.
//!
//! Run with: cargo run --example interpolatability -p liadrs-metrics

use anyhow::Result;
use liadrs_metrics::{
    monotonicity, smoothness, Metric, MetricBundle, Monotonicity, MonotonicityOptions,
    NamedArrays, PtpMode, ReduceMode, Smoothness, SmoothnessOptions,
};
use scirs2_core::ndarray_ext::{Array3, Axis};

const ATTRIBUTES: [&str; 3] = ["linear", "quadratic", "wobble"];

fn main() -> Result<()> {
    println!("=== Interpolatability Report ===\n");

    let n_samples = 64;
    let n_features = 4;
    let n_interp = 11;
    let step = 0.2;

    // Latent anchors in [-1, 1), swept along every feature
    let z = Array3::from_shape_fn((n_samples, n_features, n_interp), |(s, f, k)| {
        let anchor = ((s * 37 + f * 11) % 20) as f64 / 10.0 - 1.0;
        anchor + step * k as f64
    });

    // Attribute i is driven by feature reg_dim[i]
    let reg_dim = vec![3, 0, 2];
    let mut a = Array3::<f64>::zeros((n_samples, ATTRIBUTES.len(), n_interp));
    a.index_axis_mut(Axis(1), 0)
        .assign(&z.index_axis(Axis(1), reg_dim[0]).mapv(|v| 1.5 * v + 0.3));
    a.index_axis_mut(Axis(1), 1)
        .assign(&z.index_axis(Axis(1), reg_dim[1]).mapv(|v| v * v));
    a.index_axis_mut(Axis(1), 2)
        .assign(&z.index_axis(Axis(1), reg_dim[2]).mapv(|v| v + 0.3 * (6.0 * v).sin()));

    println!("Batch:");
    println!("  z: {:?}", z.shape());
    println!("  a: {:?}", a.shape());
    println!("  reg_dim: {:?}\n", reg_dim);

    let smooth_options = SmoothnessOptions::new().with_reg_dim(reg_dim.clone());
    let robust_options = smooth_options.clone().with_ptp_mode(PtpMode::Quantile(0.9));
    let mono_options = MonotonicityOptions::new().with_reg_dim(reg_dim.clone());

    let smth = smoothness(&z.view().into_dyn(), &a.view().into_dyn(), &smooth_options)?;
    let robust = smoothness(&z.view().into_dyn(), &a.view().into_dyn(), &robust_options)?;
    let mono = monotonicity(&z.view().into_dyn(), &a.view().into_dyn(), &mono_options)?;

    println!("{:<12} {:>12} {:>12} {:>14}", "attribute", "smoothness", "q=0.9", "monotonicity");
    for (i, name) in ATTRIBUTES.iter().enumerate() {
        println!(
            "{:<12} {:>12.4} {:>12.4} {:>14.4}",
            name,
            smth[[i]],
            robust[[i]],
            mono[[i]]
        );
    }

    // Same statistics, accumulated over mini-batches
    println!("\nStreaming over batches of 16 samples...");
    let mut bundle = MetricBundle::from_named(vec![
        (
            "smoothness",
            Box::new(Smoothness::new(
                smooth_options.with_reduce_mode(ReduceMode::All),
            )?) as Box<dyn Metric<f64>>,
        ),
        (
            "monotonicity",
            Box::new(Monotonicity::new(
                mono_options.with_reduce_mode(ReduceMode::All),
            )?) as Box<dyn Metric<f64>>,
        ),
    ]);

    for (z_batch, a_batch) in z
        .axis_chunks_iter(Axis(0), 16)
        .zip(a.axis_chunks_iter(Axis(0), 16))
    {
        let mut inputs = NamedArrays::new();
        inputs.insert("z".to_string(), z_batch.to_owned().into_dyn());
        inputs.insert("a".to_string(), a_batch.to_owned().into_dyn());
        bundle.update_state(&inputs)?;
    }

    for (name, value) in bundle.compute()? {
        println!("  {:<14} {:.4}", name, value.sum());
    }

    println!("\n=== Done ===");
    Ok(())
}
