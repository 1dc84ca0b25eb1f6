use super::*;

#[test]
fn empty_row_has_no_targets() {
    assert!(focal_row_targets(800.0, &[], 12.0).is_empty());
}

#[test]
fn single_word_is_centered() {
    assert_eq!(focal_row_targets(800.0, &[100.0], 12.0), vec![350.0]);
}

#[test]
fn earlier_words_stack_to_the_left() {
    let widths = [30.0, 50.0, 60.0];
    let gap = 12.0;
    let t = focal_row_targets(100.0, &widths, gap);
    assert_eq!(t[2], 50.0 - 30.0);
    for i in 0..widths.len() - 1 {
        assert_eq!(t[i], t[i + 1] - gap - widths[i]);
    }
    assert_eq!(t, vec![-84.0, -42.0, 20.0]);
}

#[test]
fn stacking_equations_hold_for_long_rows() {
    let widths: Vec<f64> = (1..=12).map(|i| f64::from(i) * 7.5).collect();
    let w = 1280.0;
    let t = focal_row_targets(w, &widths, 12.0);
    let k = widths.len();
    assert_eq!(t[k - 1], w / 2.0 - widths[k - 1] / 2.0);
    for i in 0..k - 1 {
        assert!((t[i] - (t[i + 1] - 12.0 - widths[i])).abs() < 1e-9);
    }
    let extent = row_extent(&widths, 12.0);
    assert!((t[k - 1] + widths[k - 1] - t[0] - extent).abs() < 1e-9);
}

#[test]
fn over_wide_focal_word_goes_negative() {
    assert_eq!(focal_row_targets(100.0, &[300.0], 12.0), vec![-100.0]);
}
