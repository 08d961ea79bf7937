// Host-side tests for tuning constants and configuration.

use face_core::config::OVERRIDE_KEYS;
use face_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Layout divisors must leave the features inside the face
    assert!(EYE_RADIUS_DIVISOR > EYE_OFFSET_X_DIVISOR);
    assert!(MOUTH_HALF_WIDTH_DIVISOR > 2.0);
    assert!(FACE_MARGIN_PX >= 0.0);

    // Ratios
    assert!(PUPIL_RATIO > 0.0 && PUPIL_RATIO < 1.0);
    assert!(GRADIENT_INNER_RATIO > 0.0 && GRADIENT_INNER_RATIO < 1.0);
    assert!(GLINT_ALPHA > 0.0 && GLINT_ALPHA <= 1.0);

    // A lid bigger than the eye can cover it completely
    assert!(LID_RADIUS_RATIO > 1.0);
    assert!(MOUTH_MIN_HALF_HEIGHT_PX > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_constants_have_logical_relationships() {
    // A blink must be much shorter than the gap between blinks
    assert!(BLINK_DURATION_MS * 10.0 < BLINK_MIN_INTERVAL_MS);
    assert!(BLINK_INTERVAL_JITTER_MS > 0.0);
    assert!(SMOOTHING_RETAIN >= 0.0 && SMOOTHING_RETAIN < 1.0);
    assert!(MOUTH_AMPLIFICATION > 0.0);
}

#[test]
fn defaults_match_stock_face() {
    let cfg = FaceConfig::default();
    assert_eq!(cfg.blink.duration_ms, 150.0);
    assert_eq!(cfg.blink.min_interval_ms, 2000.0);
    assert_eq!(cfg.blink.interval_jitter_ms, 3000.0);
    assert_eq!(cfg.blink.speed, 1.0);
    assert_eq!(cfg.blink.seed, None);
    assert_eq!(cfg.smoothing.retain, 0.7);
    assert_eq!(cfg.smoothing.amplification, 1.5);
    assert_eq!(cfg.color, None);
    assert!(cfg.validate().is_ok());
}

#[test]
fn validate_rejects_degenerate_blink_settings() {
    let mut cfg = FaceConfig::default();
    cfg.blink.speed = 0.0;
    assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { .. })));

    let mut cfg = FaceConfig::default();
    cfg.blink.duration_ms = f64::NAN;
    assert!(matches!(cfg.validate(), Err(ConfigError::NotFinite { .. })));

    let mut cfg = FaceConfig::default();
    cfg.blink.interval_jitter_ms = -1.0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Negative { .. })));
}

#[test]
fn validate_rejects_retain_outside_unit_interval() {
    let mut cfg = FaceConfig::default();
    cfg.smoothing.retain = 1.0;
    assert_eq!(cfg.validate(), Err(ConfigError::RetainOutOfRange(1.0)));
    cfg.smoothing.retain = -0.1;
    assert_eq!(cfg.validate(), Err(ConfigError::RetainOutOfRange(-0.1)));
    cfg.smoothing.retain = 0.0;
    assert!(cfg.validate().is_ok());
}

#[test]
fn overrides_update_matching_fields() {
    let mut cfg = FaceConfig::default();
    assert_eq!(cfg.apply_override("color", "#336699"), Ok(true));
    assert_eq!(cfg.apply_override("blink-speed", " 2.5 "), Ok(true));
    assert_eq!(cfg.apply_override("blink-seed", "7"), Ok(true));
    assert_eq!(cfg.apply_override("smoothing", "0.5"), Ok(true));
    assert_eq!(cfg.apply_override("amplification", "3"), Ok(true));
    assert_eq!(cfg.color.as_deref(), Some("#336699"));
    assert_eq!(cfg.blink.speed, 2.5);
    assert_eq!(cfg.blink.seed, Some(7));
    assert_eq!(cfg.smoothing.retain, 0.5);
    assert_eq!(cfg.smoothing.amplification, 3.0);
}

#[test]
fn overrides_report_unknown_keys_and_bad_numbers() {
    let mut cfg = FaceConfig::default();
    assert_eq!(cfg.apply_override("volume-source", "external"), Ok(false));
    assert!(cfg.apply_override("blink-speed", "fast").is_err());
    assert!(cfg.apply_override("blink-seed", "-1").is_err());
    // Failed overrides leave the field alone
    assert_eq!(cfg.blink.speed, 1.0);
    assert_eq!(cfg.blink.seed, None);
}

#[test]
fn empty_color_override_clears_color() {
    let mut cfg = FaceConfig::default();
    cfg.apply_override("color", "red").unwrap();
    cfg.apply_override("color", "  ").unwrap();
    assert_eq!(cfg.color, None);
}

#[test]
fn every_advertised_key_is_accepted() {
    for key in OVERRIDE_KEYS {
        let mut cfg = FaceConfig::default();
        assert_eq!(cfg.apply_override(key, "1"), Ok(true), "key {key}");
    }
}
