mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use lumen_core::enhance::dct::{dct2d, idct2d};
use lumen_core::enhance::sece::{
    discrete_distribution, distribution_entropy, enhance, enhance_with_dct, spatial_entropy,
    tile_edges, tile_grid, tiles, weighting_coefficients, SeceDctParams,
};
use lumen_core::error::LumenError;

use common::{
    constant, diagonal_gradient, is_order_preserving, mean_abs_diff, pseudo_random, sece_texture,
};

// ---------------------------------------------------------------------------
// Tile grid
// ---------------------------------------------------------------------------

#[test]
fn test_tile_grid_square() {
    assert_eq!(tile_grid(256, 256).unwrap(), (16, 16));
    assert_eq!(tile_grid(64, 64).unwrap(), (16, 16));
}

#[test]
fn test_tile_grid_follows_aspect_ratio() {
    assert_eq!(tile_grid(100, 400).unwrap(), (8, 32));
    assert_eq!(tile_grid(400, 100).unwrap(), (32, 8));
}

#[test]
fn test_tile_grid_rejects_extreme_aspect() {
    match tile_grid(1, 5000) {
        Err(LumenError::TileGrid { width, height }) => {
            assert_eq!((width, height), (5000, 1));
        }
        other => panic!("expected TileGrid error, got {other:?}"),
    }
}

#[test]
fn test_tile_edges_rounding() {
    assert_eq!(tile_edges(10, 4), vec![0, 2, 5, 8, 10]);
    assert_eq!(tile_edges(16, 16), (0..=16).collect::<Vec<_>>());
}

#[test]
fn test_tiles_partition_the_image() {
    for (h, w) in [(37, 53), (300, 17), (5, 5), (64, 64), (17, 300)] {
        let grid = tiles(h, w).unwrap();
        let mut coverage = Array2::<u32>::zeros((h, w));
        for tile in &grid {
            assert!(!tile.is_empty());
            for r in tile.rows.clone() {
                for c in tile.cols.clone() {
                    coverage[[r, c]] += 1;
                }
            }
        }
        assert!(
            coverage.iter().all(|&n| n == 1),
            "{h}x{w}: every pixel must be in exactly one tile"
        );
        let covered: usize = grid.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(covered, h * w);
    }
}

// ---------------------------------------------------------------------------
// Spatial entropy and distribution
// ---------------------------------------------------------------------------

#[test]
fn test_spatial_entropy_absent_levels_are_zero() {
    let ch = pseudo_random(64, 64, 100, 120, 8);
    let spatial = spatial_entropy(&ch).unwrap();
    assert_eq!((spatial.rows, spatial.cols), (16, 16));
    for (level, &e) in spatial.entropy.iter().enumerate() {
        assert!(e.is_finite());
        assert!(e >= 0.0);
        if !(100..=120).contains(&level) {
            assert_eq!(e, 0.0, "level {level}");
        }
    }
}

#[test]
fn test_discrete_distribution_sums_to_one() {
    let ch = pseudo_random(64, 64, 0, 255, 12);
    let spatial = spatial_entropy(&ch).unwrap();
    let f = discrete_distribution(&spatial.entropy).unwrap();
    assert_abs_diff_eq!(f.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    assert!(f.iter().all(|&p| p >= 0.0));
    assert!(distribution_entropy(&f) > 0.0);
}

#[test]
fn test_discrete_distribution_degenerate() {
    let zero = [0.0f64; 256];
    assert!(matches!(
        discrete_distribution(&zero),
        Err(LumenError::DegenerateInput(_))
    ));

    let mut single = [0.0f64; 256];
    single[40] = 12.0;
    assert!(matches!(
        discrete_distribution(&single),
        Err(LumenError::DegenerateInput(_))
    ));
}

#[test]
fn test_weighting_coefficients_ramp() {
    let w = weighting_coefficients(3.0, 5, 9);
    assert_abs_diff_eq!(w[[0, 0]], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(w[[4, 8]], 9.0, epsilon = 1e-12);
    assert_abs_diff_eq!(w[[4, 0]], 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(w[[0, 8]], 3.0, epsilon = 1e-12);
}

#[test]
fn test_weighting_coefficients_without_a_ramp() {
    for (h, w) in [(1, 7), (6, 1), (1, 1), (0, 4)] {
        let weights = weighting_coefficients(3.0, h, w);
        assert_eq!(weights.dim(), (h, w));
        assert!(weights.iter().all(|&x| x == 1.0));
    }
}

// ---------------------------------------------------------------------------
// SECE
// ---------------------------------------------------------------------------

#[test]
fn test_sece_constant_unchanged() {
    for (h, w) in [(8, 8), (32, 32)] {
        let ch = constant(h, w, 128);
        assert_eq!(enhance(&ch).unwrap(), ch);
        assert_eq!(enhance_with_dct(&ch, &SeceDctParams::default()).unwrap(), ch);
    }
}

#[test]
fn test_sece_is_order_preserving() {
    let ch = diagonal_gradient(64, 64);
    let out = enhance(&ch).unwrap();
    assert_eq!(out.data.dim(), ch.data.dim());
    assert!(is_order_preserving(&ch, &out));
}

#[test]
fn test_sece_stretches_narrow_range() {
    let ch = pseudo_random(64, 64, 100, 140, 44);
    let (lo, hi) = enhance(&ch).unwrap().min_max();
    assert!(hi - lo > 40, "range {lo}..{hi} not widened");
}

#[test]
fn test_sece_parallel_tiles_match_small_input_behaviour() {
    // Above the parallel thresholds; results must still be deterministic.
    let ch = pseudo_random(300, 300, 0, 255, 45);
    let a = enhance(&ch).unwrap();
    let b = enhance(&ch).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_sece_dct_differs_but_stays_close() {
    let data = Array2::from_shape_fn((64, 64), |(r, c)| ((r + c) * 2) as u8);
    let ch = lumen_core::channel::Channel::new(data).unwrap();
    let plain = enhance(&ch).unwrap();
    let refined = enhance_with_dct(&ch, &SeceDctParams::default()).unwrap();
    assert_ne!(plain, refined);
    let mad = mean_abs_diff(&plain, &refined);
    assert!(mad < 20.0, "mean absolute difference {mad}");
}

#[test]
fn test_sece_dct_single_row_matches_sece() {
    let data = Array2::from_shape_fn((1, 512), |(_, c)| (c / 2 % 256) as u8);
    let ch = lumen_core::channel::Channel::new(data).unwrap();
    let plain = enhance(&ch).unwrap();
    let refined = enhance_with_dct(&ch, &SeceDctParams::default()).unwrap();
    assert_eq!(plain, refined);

    let column = lumen_core::channel::Channel::new(ch.data.t().to_owned()).unwrap();
    assert_eq!(
        enhance(&column).unwrap(),
        enhance_with_dct(&column, &SeceDctParams::default()).unwrap()
    );
}

#[test]
fn test_sece_extreme_aspect_is_an_error() {
    let ch = constant(1, 5000, 10);
    assert!(matches!(enhance(&ch), Err(LumenError::TileGrid { .. })));
}

// ---------------------------------------------------------------------------
// DCT
// ---------------------------------------------------------------------------

#[test]
fn test_dct_round_trip() {
    let data = Array2::from_shape_fn((13, 17), |(r, c)| ((r * 31 + c * 7) % 23) as f64 - 5.5);
    let back = idct2d(&dct2d(&data));
    for (a, b) in data.iter().zip(back.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
}

#[test]
fn test_dct_dc_coefficient() {
    let data = Array2::from_elem((8, 6), 3.0);
    let coeffs = dct2d(&data);
    // Orthonormal: DC = sum / sqrt(H * W), everything else zero.
    assert_abs_diff_eq!(coeffs[[0, 0]], 3.0 * 48.0 / 48f64.sqrt(), epsilon = 1e-9);
    for ((r, c), &v) in coeffs.indexed_iter() {
        if (r, c) != (0, 0) {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_dct_preserves_energy() {
    let data = Array2::from_shape_fn((16, 10), |(r, c)| ((r * 13 + c * 5) % 17) as f64);
    let coeffs = dct2d(&data);
    let e_in: f64 = data.iter().map(|v| v * v).sum();
    let e_out: f64 = coeffs.iter().map(|v| v * v).sum();
    assert_abs_diff_eq!(e_in, e_out, epsilon = 1e-6);
}

#[test]
fn test_dct_large_parallel_round_trip() {
    // 260x260 exceeds the parallel threshold.
    let data = Array2::from_shape_fn((260, 260), |(r, c)| ((r ^ c) % 255) as f64);
    let back = idct2d(&dct2d(&data));
    for (a, b) in data.iter().zip(back.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-7);
    }
}

// ---------------------------------------------------------------------------
// Reference values on a 32x32 texture (16x16 grid of 2x2 tiles)
// ---------------------------------------------------------------------------

const TEXTURE_SECE_LUT: [(u8, u8); 65] = [
    (0, 3), (3, 6), (6, 11), (9, 13), (12, 18), (15, 21), (18, 27), (21, 30),
    (24, 34), (27, 37), (30, 43), (33, 46), (36, 51), (39, 53), (42, 58), (45, 61),
    (48, 67), (51, 69), (54, 74), (57, 77), (60, 83), (63, 86), (66, 91), (69, 93),
    (72, 99), (75, 102), (78, 107), (81, 109), (84, 114), (87, 117), (90, 123),
    (93, 126), (96, 129), (99, 132), (102, 138), (105, 141), (108, 146), (111, 148),
    (114, 153), (117, 156), (120, 162), (123, 164), (126, 169), (129, 172),
    (132, 178), (135, 181), (138, 186), (141, 188), (144, 194), (147, 197),
    (150, 202), (153, 204), (156, 209), (159, 212), (162, 218), (165, 221),
    (168, 225), (171, 228), (174, 234), (177, 237), (180, 242), (183, 244),
    (186, 249), (189, 252), (192, 255),
];

fn pixel_sum(ch: &lumen_core::channel::Channel) -> u64 {
    ch.data.iter().map(|&v| v as u64).sum()
}

#[test]
fn test_spatial_entropy_reference_values() {
    let se = spatial_entropy(&sece_texture(32, 32)).unwrap();
    assert_eq!((se.rows, se.cols), (16, 16));
    assert_eq!(se.entropy.iter().filter(|&&e| e > 0.0).count(), 65);
    for (level, expected) in [(0, 6.0), (3, 6.0), (6, 10.0), (9, 4.0), (12, 10.0), (15, 6.0)] {
        assert_abs_diff_eq!(se.entropy[level], expected, epsilon = 1e-9);
    }
    assert_eq!(se.entropy[1], 0.0);
}

#[test]
fn test_discrete_distribution_reference_values() {
    let se = spatial_entropy(&sece_texture(32, 32)).unwrap();
    let f = discrete_distribution(&se.entropy).unwrap();
    assert_abs_diff_eq!(f[0], 0.01165182804018945, epsilon = 1e-12);
    assert_abs_diff_eq!(f[3], 0.01165182804018945, epsilon = 1e-12);
    assert_abs_diff_eq!(f[6], 0.019574452152509504, epsilon = 1e-12);
    assert_abs_diff_eq!(f[9], 0.007737303134299032, epsilon = 1e-12);
    assert_abs_diff_eq!(f[12], 0.019574452152509504, epsilon = 1e-12);
    assert_abs_diff_eq!(f.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(distribution_entropy(&f).sqrt(), 2.4345524445276623, epsilon = 1e-9);
}

#[test]
fn test_sece_reference_values() {
    let ch = sece_texture(32, 32);
    let out = enhance(&ch).unwrap();
    for (&v, &o) in ch.data.iter().zip(out.data.iter()) {
        let expected = TEXTURE_SECE_LUT
            .iter()
            .find(|(level, _)| *level == v)
            .map(|&(_, mapped)| mapped)
            .unwrap();
        assert_eq!(o, expected, "level {v}");
    }
    assert_eq!(pixel_sum(&out), 132_798);
}

#[test]
fn test_sece_dct_reference_values() {
    // The inverse transform is truncated, not rounded.
    let out = enhance_with_dct(&sece_texture(32, 32), &SeceDctParams::default()).unwrap();
    let row0: Vec<u8> = out.data.row(0).iter().take(8).copied().collect();
    assert_eq!(row0, vec![0, 0, 15, 0, 0, 15, 0, 0]);
    let row31: Vec<u8> = out.data.row(31).iter().skip(24).copied().collect();
    assert_eq!(row31, vec![255, 255, 247, 255, 255, 247, 255, 255]);
    assert_eq!(out.data[[16, 16]], 179);
    assert_eq!(pixel_sum(&out), 132_155);
}
