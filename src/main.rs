// src/main.rs
//
// Sanity demo: the same calls a host script makes against the library.

use std::f64::consts::PI;

use signalgen::SignalGenerator;

/// ===============================
/// Main
/// ===============================

fn main() -> Result<(), signalgen::Error> {
    let sample_rate = 1000.0;
    let amplitude = 1.0;
    let frequency = 5.0;
    let phase = PI / 4.0;
    let n_points = 500;

    let mut generator = SignalGenerator::new(sample_rate)?;

    // --------------------------------
    // Rejected call
    // --------------------------------

    match generator.generate_sine(amplitude, frequency, 0.0, 0) {
        Ok(_) => println!("Zero points unexpectedly accepted"),
        Err(e) => println!("Caught error: {}", e),
    }

    // --------------------------------
    // Tags
    // --------------------------------

    generator.set_tags(["sine", "test", "signalgen"])?;
    println!("Tags: {:?}", generator.get_tags());

    // --------------------------------
    // Generate
    // --------------------------------

    let samples = generator.generate_sine(amplitude, frequency, phase, n_points)?;
    let times = generator.sample_times(n_points)?;

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    println!(
        "Sine {} Hz: {} samples over {:.3} s (min {:.4}, max {:.4})",
        frequency,
        samples.len(),
        n_points as f64 / sample_rate,
        min,
        max
    );
    for (t, y) in times.iter().zip(&samples).take(8) {
        println!("  t={:.3}  y={:+.6}", t, y);
    }

    Ok(())
}
