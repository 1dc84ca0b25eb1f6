use super::*;

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(5).saturating_sub(Millis(9)), Millis::ZERO);
    assert_eq!(Millis(u64::MAX) + Millis(1), Millis(u64::MAX));
    assert_eq!(Millis(1500).as_secs_f64(), 1.5);
}

#[test]
fn hex_colors_parse_with_or_without_hash() {
    assert_eq!(Rgb8::from_hex("#f2dae5").unwrap(), Rgb8::new(0xf2, 0xda, 0xe5));
    assert_eq!(Rgb8::from_hex("00ff10").unwrap(), Rgb8::new(0, 255, 16));
    assert!(Rgb8::from_hex("#fff").is_err());
    assert!(Rgb8::from_hex("#gg0000").is_err());
}

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    let a = Rgb8::new(0, 100, 200);
    let b = Rgb8::new(100, 100, 0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgb8::new(50, 100, 100));
    assert_eq!(a.lerp(b, 7.0), b);
}

#[test]
fn color_serializes_as_hex_string() {
    let json = serde_json::to_string(&Rgb8::new(1, 2, 3)).unwrap();
    assert_eq!(json, "\"#010203\"");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgb8::new(1, 2, 3));
}
