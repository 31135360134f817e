// src/generator.rs
//
// Deterministic sine sample generation and per-instance tag metadata.

use std::f64::consts::PI;

use log::{debug, trace};

use crate::error::{InvalidArgument, Result};

/// Sample rate used by hosts that don't pick one.
pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;

/// Generates sine sample buffers at a fixed sample rate.
///
/// The sample rate is validated once at construction and never changes.
/// Tags are opaque labels the caller can attach to the instance; they have
/// no effect on generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalGenerator {
    sample_rate: f64,
    tags: Vec<String>,
}

impl SignalGenerator {
    /// Create a generator sampling at `sample_rate` samples per second.
    ///
    /// Fails unless `sample_rate` is a finite number greater than zero.
    pub fn new(sample_rate: f64) -> Result<Self> {
        validate_sample_rate(sample_rate)?;
        debug!("SignalGenerator created at {} Hz", sample_rate);
        Ok(Self {
            sample_rate,
            tags: Vec::new(),
        })
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Render `n_points` samples of `amplitude * sin(2π * frequency * t + phase)`
    /// where `t = i / sample_rate`.
    ///
    /// The point count is checked before the frequency. Nothing is allocated
    /// when either check fails.
    pub fn generate_sine(
        &self,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        n_points: usize,
    ) -> Result<Vec<f64>> {
        validate_sine(frequency, n_points)?;

        let mut samples = vec![0.0; n_points];
        self.fill_sine(amplitude, frequency, phase, &mut samples);
        Ok(samples)
    }

    /// Render one sample per slot of `out`, starting at `t = 0`.
    ///
    /// Arguments are not validated; callers go through [`validate_sine`] first.
    pub(crate) fn fill_sine(&self, amplitude: f64, frequency: f64, phase: f64, out: &mut [f64]) {
        trace!(
            "generate_sine: amp={} freq={} phase={} n={}",
            amplitude,
            frequency,
            phase,
            out.len()
        );

        let omega = 2.0 * PI * frequency;
        for (i, sample) in out.iter_mut().enumerate() {
            let t = i as f64 / self.sample_rate;
            *sample = amplitude * (omega * t + phase).sin();
        }
    }

    /// Time in seconds assigned to each of the first `n_points` sample indices.
    pub fn sample_times(&self, n_points: usize) -> Result<Vec<f64>> {
        validate_point_count(n_points)?;
        Ok((0..n_points)
            .map(|i| i as f64 / self.sample_rate)
            .collect())
    }

    /// Replace the whole tag list.
    ///
    /// An empty input is rejected and the current tags are kept.
    pub fn set_tags<I, S>(&mut self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = collect_tags(tags)?;
        debug!("SignalGenerator tags set: {:?}", self.tags);
        Ok(())
    }

    /// Copy of the current tags, in the order they were set.
    pub fn get_tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    #[inline]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub(crate) fn take_tags(&mut self) -> Vec<String> {
        std::mem::take(&mut self.tags)
    }

    /// Same generator carrying `tags` as-is.
    pub(crate) fn with_tags(self, tags: Vec<String>) -> Self {
        Self { tags, ..self }
    }
}

fn validate_sample_rate(sample_rate: f64) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(InvalidArgument::SampleRate(sample_rate).into())
    }
}

fn validate_point_count(n_points: usize) -> Result<()> {
    if n_points == 0 {
        return Err(InvalidArgument::PointCount(0).into());
    }
    Ok(())
}

/// Check `generate_sine` arguments: point count first, then frequency.
pub(crate) fn validate_sine(frequency: f64, n_points: usize) -> Result<()> {
    validate_point_count(n_points)?;
    validate_frequency(frequency)
}

/// Point count received from a host as a signed integer.
pub(crate) fn point_count(n_points: i32) -> Result<usize> {
    match usize::try_from(n_points) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(InvalidArgument::PointCount(n_points.into()).into()),
    }
}

fn validate_frequency(frequency: f64) -> Result<()> {
    // NaN fails this comparison as well
    if frequency >= 0.0 {
        Ok(())
    } else {
        Err(InvalidArgument::NegativeFrequency(frequency).into())
    }
}

/// Copy `tags` into an owned list, rejecting an empty one.
pub(crate) fn collect_tags<I, S>(tags: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    if tags.is_empty() {
        return Err(InvalidArgument::EmptyTags.into());
    }
    Ok(tags)
}
