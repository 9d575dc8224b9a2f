mod common;

use lumen_core::enhance::stretch::{
    bound_by_peak_threshold, bound_by_weighted_percentile, linear_stretch, stretch_peak,
    stretch_percentile, OutputRange, PeakStretchParams, PercentileStretchParams,
};
use lumen_core::histogram::{histogram, Histogram};

use common::{channel_from_rows, constant, pseudo_random};

fn counts_at(entries: &[(usize, u64)]) -> Histogram {
    let mut counts = [0u64; 256];
    for &(level, count) in entries {
        counts[level] = count;
    }
    Histogram::from_counts(counts)
}

// ---------------------------------------------------------------------------
// Weighted percentile bounds
// ---------------------------------------------------------------------------

#[test]
fn test_percentile_extremes_hit_populated_levels() {
    let hist = counts_at(&[(10, 4), (80, 9), (200, 3)]);
    assert_eq!(bound_by_weighted_percentile(&hist, 0.0), 10);
    assert_eq!(bound_by_weighted_percentile(&hist, 100.0), 200);
}

#[test]
fn test_percentile_median() {
    let hist = counts_at(&[(10, 1), (20, 1), (30, 2)]);
    // Cumulative: 1, 2, 4 of 4. Half the mass is reached at 20.
    assert_eq!(bound_by_weighted_percentile(&hist, 50.0), 20);
    assert_eq!(bound_by_weighted_percentile(&hist, 51.0), 30);
}

#[test]
fn test_percentile_empty_histogram() {
    let hist = Histogram::from_counts([0; 256]);
    assert_eq!(bound_by_weighted_percentile(&hist, 5.0), 255);
}

// ---------------------------------------------------------------------------
// Peak threshold bounds
// ---------------------------------------------------------------------------

#[test]
fn test_peak_threshold_bounds() {
    // Peak 100 at level 100, cutoff 5%: counts must exceed 5.
    let hist = counts_at(&[(40, 3), (50, 6), (100, 100), (200, 10), (220, 5)]);
    assert_eq!(bound_by_peak_threshold(&hist, 0.05), (50, 200));
}

#[test]
fn test_peak_threshold_defaults_when_nothing_qualifies() {
    let hist = counts_at(&[(0, 50), (3, 1)]);
    assert_eq!(bound_by_peak_threshold(&hist, 0.05), (0, 255));
}

// ---------------------------------------------------------------------------
// linear_stretch
// ---------------------------------------------------------------------------

#[test]
fn test_linear_stretch_full_range_is_identity() {
    let ch = pseudo_random(20, 20, 0, 255, 17);
    assert_eq!(linear_stretch(&ch, 0, 255, OutputRange::default()), ch);
}

#[test]
fn test_linear_stretch_zero_width_unchanged() {
    let ch = pseudo_random(10, 10, 0, 255, 18);
    assert_eq!(linear_stretch(&ch, 90, 90, OutputRange::default()), ch);
}

#[test]
fn test_linear_stretch_clamps_and_truncates() {
    let ch = channel_from_rows(&[&[40, 50, 100, 150, 200]]);
    let out = linear_stretch(&ch, 50, 150, OutputRange::default());
    // 100 -> 50 * 255 / 100 = 127.5, truncated.
    assert_eq!(out.data.as_slice().unwrap(), &[0, 0, 127, 255, 255]);
}

#[test]
fn test_linear_stretch_custom_output_range() {
    let ch = channel_from_rows(&[&[0, 255]]);
    let out = linear_stretch(&ch, 0, 255, OutputRange { min: 10, max: 20 });
    assert_eq!(out.data.as_slice().unwrap(), &[10, 20]);
}

// ---------------------------------------------------------------------------
// Stretch variants
// ---------------------------------------------------------------------------

#[test]
fn test_stretch_percentile_spans_output_range() {
    let ch = pseudo_random(40, 40, 100, 150, 23);
    let out = stretch_percentile(&ch, &histogram(&ch), &PercentileStretchParams::default());
    assert_eq!(out.min_max(), (0, 255));
}

#[test]
fn test_stretch_peak_extreme_image_unchanged() {
    let ch = channel_from_rows(&[&[0, 0], &[255, 255]]);
    let out = stretch_peak(&ch, &histogram(&ch), &PeakStretchParams::default());
    assert_eq!(out, ch);
}

#[test]
fn test_stretch_constant_unchanged() {
    let ch = constant(12, 12, 128);
    let hist = histogram(&ch);
    assert_eq!(
        stretch_percentile(&ch, &hist, &PercentileStretchParams::default()),
        ch
    );
    assert_eq!(stretch_peak(&ch, &hist, &PeakStretchParams::default()), ch);
}
