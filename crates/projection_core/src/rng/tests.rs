//! Unit tests for the projection RNG.

use super::*;
use crate::math::moments::SummaryStatistics;
use crate::math::sampling::sample_standard_normal_pair;

#[test]
fn test_same_seed_same_sequence() {
    let mut a = ProjectionRng::from_seed(99);
    let mut b = ProjectionRng::from_seed(99);

    for _ in 0..1000 {
        assert_eq!(a.gen_uniform(), b.gen_uniform());
    }
    for _ in 0..1000 {
        assert_eq!(a.gen_normal(), b.gen_normal());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = ProjectionRng::from_seed(1);
    let mut b = ProjectionRng::from_seed(2);

    let xs: Vec<f64> = (0..16).map(|_| a.gen_uniform()).collect();
    let ys: Vec<f64> = (0..16).map(|_| b.gen_uniform()).collect();
    assert_ne!(xs, ys);
}

#[test]
fn test_seed_is_tracked() {
    let rng = ProjectionRng::from_seed(42);
    assert_eq!(rng.seed(), 42);
    assert_eq!(rng.method(), NormalMethod::BoxMuller);
}

#[test]
fn test_uniform_ranges() {
    let mut rng = ProjectionRng::from_seed(7);
    for _ in 0..10_000 {
        let u = rng.gen_uniform();
        assert!((0.0..1.0).contains(&u));

        let open = rng.gen_uniform_open();
        assert!(open > 0.0 && open < 1.0);
    }
}

#[test]
fn test_box_muller_spare_is_returned_second() {
    let mut rng = ProjectionRng::from_seed(5);
    let mut reference = ProjectionRng::from_seed(5);

    let pair = reference.gen_normal_pair();
    assert_eq!(rng.gen_normal(), pair.z0);
    assert_eq!(rng.gen_normal(), pair.z1);

    let next = reference.gen_normal_pair();
    assert_eq!(rng.gen_normal(), next.z0);
}

#[test]
fn test_rng_core_drives_free_sampler() {
    let mut rng = ProjectionRng::from_seed(8);
    let mut reference = ProjectionRng::from_seed(8);

    assert_eq!(
        sample_standard_normal_pair(&mut rng),
        reference.gen_normal_pair()
    );
}

#[test]
fn test_fill_normal_matches_gen_normal() {
    for method in [NormalMethod::BoxMuller, NormalMethod::Ziggurat] {
        let mut a = ProjectionRng::from_seed(17).with_method(method);
        let mut b = ProjectionRng::from_seed(17).with_method(method);

        let mut buffer = vec![0.0; 33];
        a.fill_normal(&mut buffer);
        let expected: Vec<f64> = (0..33).map(|_| b.gen_normal()).collect();

        assert_eq!(buffer, expected, "method {}", method);
    }
}

#[test]
fn test_fill_empty_buffers() {
    let mut rng = ProjectionRng::from_seed(3);
    let mut empty: [f64; 0] = [];
    rng.fill_uniform(&mut empty);
    rng.fill_normal(&mut empty);
}

#[test]
fn test_normal_moments_both_methods() {
    const N: usize = 200_000;
    // Five standard errors of the mean / variance estimators.
    let mean_tol = 5.0 / (N as f64).sqrt();
    let var_tol = 5.0 * (2.0 / N as f64).sqrt();

    for method in [NormalMethod::BoxMuller, NormalMethod::Ziggurat] {
        let mut rng = ProjectionRng::from_seed(2025).with_method(method);
        let mut samples = vec![0.0; N];
        rng.fill_normal(&mut samples);

        let stats = SummaryStatistics::from_slice(&samples).unwrap();
        assert!(stats.mean.abs() < mean_tol, "{}: mean {}", method, stats.mean);
        assert!(
            (stats.variance - 1.0).abs() < var_tol,
            "{}: variance {}",
            method,
            stats.variance
        );
    }
}

#[test]
fn test_normal_method_parse_and_display() {
    assert_eq!("box-muller".parse::<NormalMethod>(), Ok(NormalMethod::BoxMuller));
    assert_eq!("Ziggurat".parse::<NormalMethod>(), Ok(NormalMethod::Ziggurat));
    assert!("polar".parse::<NormalMethod>().is_err());
    assert_eq!(NormalMethod::Ziggurat.to_string(), "ziggurat");
}
