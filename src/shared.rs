//! Thread-shared signal generator handle.
//!
//! [`SignalGenerator`] is a plain value, so the borrow checker already keeps
//! `set_tags` exclusive. Hosts that hand the same generator to several
//! threads use [`SharedSignalGenerator`] instead:
//!
//! - The sample rate is read-only after construction and is read without locking
//! - The tag list sits behind a mutex and is only ever swapped whole
//! - Sample generation allocates a fresh buffer per call and takes no lock
//!
//! # Usage
//!
//! ```
//! use signalgen::SharedSignalGenerator;
//!
//! let generator = SharedSignalGenerator::new(48_000.0)?;
//! let worker = generator.clone();
//!
//! std::thread::spawn(move || worker.set_tags(["from", "worker"]))
//!     .join()
//!     .unwrap()?;
//!
//! assert_eq!(generator.get_tags(), vec!["from", "worker"]);
//! # Ok::<(), signalgen::Error>(())
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::error::Result;
use crate::generator::{SignalGenerator, collect_tags};

/// Cloneable handle to one generator shared between threads.
///
/// Clones refer to the same tag list.
#[derive(Debug, Clone)]
pub struct SharedSignalGenerator {
    inner: Arc<SharedState>,
}

#[derive(Debug)]
struct SharedState {
    generator: SignalGenerator,
    tags: Mutex<Vec<String>>,
}

impl SharedSignalGenerator {
    pub fn new(sample_rate: f64) -> Result<Self> {
        Ok(Self::from(SignalGenerator::new(sample_rate)?))
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.inner.generator.sample_rate()
    }

    /// See [`SignalGenerator::generate_sine`].
    pub fn generate_sine(
        &self,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        n_points: usize,
    ) -> Result<Vec<f64>> {
        self.inner
            .generator
            .generate_sine(amplitude, frequency, phase, n_points)
    }

    /// See [`SignalGenerator::sample_times`].
    pub fn sample_times(&self, n_points: usize) -> Result<Vec<f64>> {
        self.inner.generator.sample_times(n_points)
    }

    /// Replace the whole tag list.
    ///
    /// The input is copied and validated before the lock is taken, so a
    /// rejected call never touches the shared list.
    pub fn set_tags<I, S>(&self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = collect_tags(tags)?;
        debug!("SharedSignalGenerator tags set: {:?}", tags);
        *self.lock_tags() = tags;
        Ok(())
    }

    pub fn get_tags(&self) -> Vec<String> {
        self.lock_tags().clone()
    }

    /// Snapshot the shared state as a standalone generator.
    pub fn snapshot(&self) -> SignalGenerator {
        self.inner.generator.clone().with_tags(self.get_tags())
    }

    #[inline]
    pub(crate) fn generator(&self) -> &SignalGenerator {
        &self.inner.generator
    }

    fn lock_tags(&self) -> MutexGuard<'_, Vec<String>> {
        // The list is replaced in a single assignment, so a panic on another
        // thread can't leave it half written.
        self.inner
            .tags
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<SignalGenerator> for SharedSignalGenerator {
    fn from(mut generator: SignalGenerator) -> Self {
        let tags = generator.take_tags();
        Self {
            inner: Arc::new(SharedState {
                generator,
                tags: Mutex::new(tags),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_tags() {
        let generator = SharedSignalGenerator::new(1000.0).unwrap();
        let other = generator.clone();

        other.set_tags(["a", "b"]).unwrap();
        assert_eq!(generator.get_tags(), vec!["a", "b"]);
        assert_eq!(generator.sample_rate(), 1000.0);
    }

    #[test]
    fn test_from_generator_keeps_tags() {
        let mut generator = SignalGenerator::new(8000.0).unwrap();
        generator.set_tags(["sine"]).unwrap();

        let shared = SharedSignalGenerator::from(generator.clone());
        assert_eq!(shared.get_tags(), vec!["sine"]);
        assert_eq!(shared.snapshot(), generator);

        shared.set_tags(["a", "b"]).unwrap();
        assert_eq!(shared.snapshot().tags(), ["a", "b"]);
        assert!(SharedSignalGenerator::new(1.0).unwrap().snapshot().tags().is_empty());
    }

    #[test]
    fn test_rejected_tags_keep_previous() {
        let generator = SharedSignalGenerator::new(1000.0).unwrap();
        generator.set_tags(["keep"]).unwrap();
        assert!(generator.set_tags(Vec::<String>::new()).is_err());
        assert_eq!(generator.get_tags(), vec!["keep"]);
    }

    #[test]
    fn test_generation_matches_core() {
        let shared = SharedSignalGenerator::new(8000.0).unwrap();
        let core = SignalGenerator::new(8000.0).unwrap();
        assert_eq!(
            shared.generate_sine(0.5, 440.0, 0.1, 64).unwrap(),
            core.generate_sine(0.5, 440.0, 0.1, 64).unwrap()
        );
        assert_eq!(shared.sample_times(3).unwrap(), core.sample_times(3).unwrap());
    }

    #[test]
    fn test_concurrent_writers_never_mix_lists() {
        let generator = SharedSignalGenerator::new(48_000.0).unwrap();
        let lists: Vec<Vec<String>> = (0..4)
            .map(|w| (0..8).map(|i| format!("w{w}-{i}")).collect())
            .collect();

        let writers: Vec<_> = lists
            .iter()
            .cloned()
            .map(|list| {
                let generator = generator.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        generator.set_tags(list.clone()).unwrap();
                    }
                })
            })
            .collect();

        let reader = {
            let generator = generator.clone();
            let lists = lists.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let seen = generator.get_tags();
                    assert!(seen.is_empty() || lists.contains(&seen), "mixed list: {seen:?}");
                }
            })
        };

        for writer in writers {
            writer.join().unwrap();
        }
        reader.join().unwrap();

        assert!(lists.contains(&generator.get_tags()));
    }
}
