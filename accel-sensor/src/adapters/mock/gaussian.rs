use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use common::Sample;

/// Functionality to add some Gaussian noise.
#[derive(Clone, Debug)]
pub(crate) struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates new distribution from mean and stdev. Returns None if stdev is not
    /// finite or negative.
    pub(crate) fn new(mean: f64, stdev: f64) -> Option<Self> {
        Normal::new(mean, stdev).ok().map(|normal| Self { normal })
    }

    /// Sample from distribution
    pub(crate) fn draw_sample(&self, rng: &mut StdRng) -> f64 {
        self.normal.sample(rng)
    }

    /// Adds rounded noise to every axis of `sample`
    pub(crate) fn add_noise(&self, rng: &mut StdRng, sample: Sample) -> Sample {
        let [x, y, z] = sample.inner();
        let mut jitter = || self.draw_sample(rng).round() as i32;
        Sample::new(
            x.saturating_add(jitter()),
            y.saturating_add(jitter()),
            z.saturating_add(jitter()),
        )
    }
}
