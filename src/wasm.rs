//! WebAssembly bindings via wasm-bindgen for browser integration.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { signalgen_init, SignalGenerator } from './signalgen.js';
//!
//! await init();
//! signalgen_init();
//!
//! const gen = new SignalGenerator(1000);
//! gen.set_tags(["sine", "test"]);
//!
//! const y = gen.generate_sine(1.0, 5.0, Math.PI / 4, 500); // Float64Array
//! const x = gen.sample_times(500);
//! ```

use wasm_bindgen::prelude::*;

use crate::error::Error;
use crate::generator::{self, DEFAULT_SAMPLE_RATE, point_count};

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the wasm module. Call this once before using any other functions.
/// Sets up panic hooks and console logging.
#[wasm_bindgen]
pub fn signalgen_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

/// Default sample rate for hosts without a preference.
#[wasm_bindgen]
pub fn default_sample_rate() -> f64 {
    DEFAULT_SAMPLE_RATE
}

fn to_js(err: Error) -> JsError {
    log::warn!("signalgen: {}", err);
    JsError::new(&err.to_string())
}

// ═══════════════════════════════════════════════════════════════════════════
// Signal Generator
// ═══════════════════════════════════════════════════════════════════════════

/// Sine signal generator. Invalid arguments throw an `Error`.
#[wasm_bindgen(js_name = SignalGenerator)]
pub struct WasmSignalGenerator {
    inner: generator::SignalGenerator,
}

#[wasm_bindgen(js_class = SignalGenerator)]
impl WasmSignalGenerator {
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: f64) -> Result<WasmSignalGenerator, JsError> {
        let inner = generator::SignalGenerator::new(sample_rate).map_err(to_js)?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn sample_rate(&self) -> f64 {
        self.inner.sample_rate()
    }

    /// Render `n_points` samples as a `Float64Array`.
    pub fn generate_sine(
        &self,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        n_points: i32,
    ) -> Result<Vec<f64>, JsError> {
        let n_points = point_count(n_points).map_err(to_js)?;
        self.inner
            .generate_sine(amplitude, frequency, phase, n_points)
            .map_err(to_js)
    }

    /// Time in seconds of each sample index, for plotting.
    pub fn sample_times(&self, n_points: i32) -> Result<Vec<f64>, JsError> {
        let n_points = point_count(n_points).map_err(to_js)?;
        self.inner.sample_times(n_points).map_err(to_js)
    }

    pub fn set_tags(&mut self, tags: Vec<String>) -> Result<(), JsError> {
        self.inner.set_tags(tags).map_err(to_js)
    }

    pub fn get_tags(&self) -> Vec<String> {
        self.inner.get_tags()
    }
}
