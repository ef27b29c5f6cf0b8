use portfolio_charts::LayoutError;
use portfolio_charts::layout::{Rounding, round_to_magnitude};

#[test]
fn billions() {
    let v = 1_234_567_890.0;
    assert_eq!(round_to_magnitude(v, Rounding::Up).unwrap(), 2_000_000_000.0);
    assert_eq!(round_to_magnitude(v, Rounding::Down).unwrap(), 1_000_000_000.0);
    assert_eq!(round_to_magnitude(v, Rounding::Nearest).unwrap(), 1_000_000_000.0);
}

#[test]
fn negatives_round_toward_their_direction() {
    assert_eq!(round_to_magnitude(-42.0, Rounding::Down).unwrap(), -50.0);
    assert_eq!(round_to_magnitude(-42.0, Rounding::Up).unwrap(), -40.0);
}

#[test]
fn exact_powers_and_small_values() {
    assert_eq!(round_to_magnitude(1000.0, Rounding::Up).unwrap(), 1000.0);
    assert_eq!(round_to_magnitude(75.0, Rounding::Nearest).unwrap(), 80.0);
    let small = round_to_magnitude(0.034, Rounding::Up).unwrap();
    assert!((small - 0.04).abs() < 1e-12);
}

#[test]
fn zero_and_nan_are_errors() {
    assert_eq!(
        round_to_magnitude(0.0, Rounding::Up),
        Err(LayoutError::ZeroMagnitude)
    );
    assert!(matches!(
        round_to_magnitude(f64::NAN, Rounding::Down),
        Err(LayoutError::NonFinite(_))
    ));
}
