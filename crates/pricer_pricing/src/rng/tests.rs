//! Unit tests for the RNG module.
//!
//! Covers:
//! - Seed reproducibility and entropy seeding
//! - Moments and shape of the normal draws
//! - Scripted samplers
//! - Child seed derivation

use super::*;
use std::collections::HashSet;

fn draws(rng: &mut PricerRng, n: usize) -> Vec<f64> {
    let mut buffer = vec![0.0; n];
    rng.fill(&mut buffer).unwrap();
    buffer
}

#[test]
fn test_seed_reproducibility() {
    let mut rng1 = PricerRng::from_seed(12345);
    let mut rng2 = PricerRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.sample().unwrap(), rng2.sample().unwrap());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let a = draws(&mut PricerRng::from_seed(1), 16);
    let b = draws(&mut PricerRng::from_seed(2), 16);
    assert_ne!(a, b);
}

#[test]
fn test_entropy_seeded_generator() {
    let mut rng = PricerRng::from_entropy().expect("OS entropy available in tests");
    assert_eq!(rng.seed(), None);
    assert!(rng.sample().unwrap().is_finite());
}

#[test]
fn test_uniform_range() {
    let mut rng = PricerRng::from_seed(42);
    for _ in 0..10_000 {
        let value = rng.gen_uniform();
        assert!((0.0..1.0).contains(&value), "uniform value {} out of range", value);
    }
}

#[test]
fn test_normal_moments() {
    let n = 200_000;
    let samples = draws(&mut PricerRng::from_seed(7), n);

    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = samples.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    // 5 standard errors of the sample mean
    assert!(mean.abs() < 5.0 / (n as f64).sqrt(), "mean = {}", mean);
    assert!((variance - 1.0).abs() < 0.02, "variance = {}", variance);
}

#[test]
fn test_normal_shape() {
    let n = 200_000;
    let samples = draws(&mut PricerRng::from_seed(99), n);

    let within = |k: f64| samples.iter().filter(|z| z.abs() < k).count() as f64 / n as f64;

    // 68-95-99.7 rule
    assert!((within(1.0) - 0.6827).abs() < 0.01);
    assert!((within(2.0) - 0.9545).abs() < 0.005);
    assert!((within(3.0) - 0.9973).abs() < 0.002);

    let skew = samples.iter().map(|z| z.powi(3)).sum::<f64>() / n as f64;
    let kurtosis = samples.iter().map(|z| z.powi(4)).sum::<f64>() / n as f64;
    assert!(skew.abs() < 0.05, "skew = {}", skew);
    assert!((kurtosis - 3.0).abs() < 0.1, "kurtosis = {}", kurtosis);
}

#[test]
fn test_consecutive_draws_uncorrelated() {
    let n = 100_000;
    let samples = draws(&mut PricerRng::from_seed(2024), n);
    let lag1 = samples.windows(2).map(|w| w[0] * w[1]).sum::<f64>() / (n - 1) as f64;
    assert!(lag1.abs() < 0.02, "lag-1 autocorrelation = {}", lag1);
}

#[test]
fn test_empty_buffer() {
    let mut rng = PricerRng::from_seed(42);
    let mut empty: Vec<f64> = vec![];
    rng.fill_normal(&mut empty);
    assert!(empty.is_empty());
}

#[test]
fn test_constant_sampler() {
    let mut sampler = ConstantSampler(0.0);
    for _ in 0..10 {
        assert_eq!(sampler.sample(), Ok(0.0));
    }
}

#[test]
fn test_replay_sampler_exhaustion() {
    let mut sampler = ReplaySampler::new(vec![1.0, 2.0, 3.0]);
    let mut buffer = [0.0; 2];
    sampler.fill(&mut buffer).unwrap();
    assert_eq!(buffer, [1.0, 2.0]);
    assert_eq!(sampler.remaining(), 1);

    let mut too_long = [0.0; 2];
    assert_eq!(
        sampler.fill(&mut too_long),
        Err(RandomSourceError::Exhausted { draws: 3 })
    );
}

#[test]
fn test_sampler_through_mut_reference() {
    fn take<S: GaussianSampler>(mut s: S) -> f64 {
        s.sample().unwrap()
    }
    let mut rng = PricerRng::from_seed(5);
    let mut twin = PricerRng::from_seed(5);
    assert_eq!(take(&mut rng), twin.gen_normal());
    // the borrowed generator advanced
    assert_eq!(rng.gen_normal(), twin.gen_normal());
}

#[test]
fn test_seed_sequence_children_distinct() {
    let seq = SeedSequence::new(42);
    let children: HashSet<u64> = (0..10_000).map(|i| seq.child(i)).collect();
    assert_eq!(children.len(), 10_000);
    assert_eq!(seq.master(), 42);
}

#[test]
fn test_seed_sequence_streams_uncorrelated() {
    let seq = SeedSequence::new(0);
    let a = draws(&mut PricerRng::from_seed(seq.child(0)), 50_000);
    let b = draws(&mut PricerRng::from_seed(seq.child(1)), 50_000);
    let cross = a.iter().zip(&b).map(|(x, y)| x * y).sum::<f64>() / a.len() as f64;
    assert!(cross.abs() < 0.03, "cross correlation = {}", cross);
}

#[test]
fn test_error_display() {
    let err = RandomSourceError::EntropyUnavailable("getrandom failed".to_string());
    assert_eq!(err.to_string(), "Entropy source unavailable: getrandom failed");
    let err = RandomSourceError::Exhausted { draws: 4 };
    assert!(err.to_string().contains("4 draws"));
}
