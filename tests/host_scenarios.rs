// End-to-end checks through the public API, the way a host script drives it.

use std::f64::consts::PI;

use signalgen::{Error, InvalidArgument, SharedSignalGenerator, SignalGenerator};

#[test]
fn test_host_script_flow() {
    let generator = SignalGenerator::new(1000.0).unwrap();
    assert_eq!(
        generator.generate_sine(1.0, 5.0, 0.0, 0),
        Err(Error::InvalidArgument(InvalidArgument::PointCount(0)))
    );

    let mut generator = SignalGenerator::new(1000.0).unwrap();
    generator.set_tags(["sine", "test", "signalgen"]).unwrap();
    assert_eq!(generator.get_tags(), vec!["sine", "test", "signalgen"]);

    let phase = PI / 4.0;
    let samples = generator.generate_sine(1.0, 5.0, phase, 500).unwrap();
    let times = generator.sample_times(500).unwrap();
    assert_eq!(samples.len(), 500);
    assert_eq!(times.len(), 500);

    assert!((samples[0] - phase.sin()).abs() < 1e-12);
    // 5 Hz at 1 kHz: one full period every 200 samples
    assert!((samples[200] - samples[0]).abs() < 1e-9);
    assert!((times[499] - 0.499).abs() < 1e-12);
    assert!(samples.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn test_constant_scenario() {
    let generator = SignalGenerator::new(1.0).unwrap();
    assert_eq!(generator.generate_sine(5.0, 0.0, 0.0, 3).unwrap(), vec![0.0; 3]);
}

#[test]
fn test_errors_leave_shared_state_untouched() {
    let generator = SharedSignalGenerator::new(8000.0).unwrap();
    generator.set_tags(["a", "b"]).unwrap();

    assert!(generator.generate_sine(1.0, -1.0, 0.0, 16).is_err());
    assert!(generator.set_tags(Vec::<String>::new()).is_err());

    assert_eq!(generator.get_tags(), vec!["a", "b"]);
    assert_eq!(generator.sample_rate(), 8000.0);
}

#[test]
fn test_invalid_sample_rate_message() {
    let err = SignalGenerator::new(0.0).unwrap_err();
    assert!(err.to_string().contains("positive and nonzero"));
}
