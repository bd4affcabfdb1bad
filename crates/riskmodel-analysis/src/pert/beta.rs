//! PERT-Beta distribution via the `statrs` crate.
//!
//! Mean:     mu      = (a + 4b + c) / 6
//! Variance: sigma²  = (mu - a)(c - mu) / 7
//! Shape:    alpha   = ((mu - a)/(c - a)) · ((mu - a)(c - mu)/sigma² - 1)
//!           beta    = alpha · (c - mu)/(mu - a)
//!
//! The impact itself is `a + (c - a)·X` with `X ~ Beta(alpha, beta)` on [0, 1].

use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::{Beta, ContinuousCDF};
use tracing::debug;

use riskmodel_core::errors::EstimateError;
use riskmodel_core::types::ThreePointEstimate;

/// A three-point estimate moment-matched to a Beta on `[minimum, maximum]`.
#[derive(Debug, Clone)]
pub struct PertBeta {
    estimate: ThreePointEstimate,
    mean: f64,
    variance: f64,
    alpha: f64,
    beta: f64,
    unit: Beta,
}

impl PertBeta {
    /// Build the distribution for `estimate`.
    ///
    /// Fails with `InvalidEstimate`/`NonFinite` when the triple is not an
    /// ordered finite estimate, and with `DegenerateDistribution` when the
    /// range or variance is zero.
    pub fn from_estimate(estimate: &ThreePointEstimate) -> Result<Self, EstimateError> {
        estimate.validate()?;
        let (a, b, c) = (estimate.minimum, estimate.most_likely, estimate.maximum);
        let degenerate = |reason: &'static str| EstimateError::DegenerateDistribution {
            minimum: a,
            most_likely: b,
            maximum: c,
            reason,
        };

        if c - a <= 0.0 {
            return Err(degenerate("zero range"));
        }

        let mean = (a + 4.0 * b + c) / 6.0;
        let variance = (mean - a) * (c - mean) / 7.0;
        if variance <= 0.0 || !variance.is_finite() {
            return Err(degenerate("zero variance"));
        }

        let alpha = ((mean - a) / (c - a)) * ((mean - a) * (c - mean) / variance - 1.0);
        let beta = alpha * (c - mean) / (mean - a);
        if !(alpha > 0.0 && beta > 0.0 && alpha.is_finite() && beta.is_finite()) {
            return Err(degenerate("non-positive shape"));
        }

        let unit = Beta::new(alpha, beta).map_err(|_| degenerate("rejected beta shape"))?;
        debug!(minimum = a, most_likely = b, maximum = c, alpha, beta, "pert beta built");

        Ok(Self {
            estimate: *estimate,
            mean,
            variance,
            alpha,
            beta,
            unit,
        })
    }

    pub fn estimate(&self) -> &ThreePointEstimate {
        &self.estimate
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// PERT mean `(a + 4b + c) / 6`.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// PERT variance `(mu - a)(c - mu) / 7`.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Closed support `[minimum, maximum]`.
    pub fn support(&self) -> (f64, f64) {
        (self.estimate.minimum, self.estimate.maximum)
    }

    /// Width of the support, the affine scale.
    pub fn scale(&self) -> f64 {
        self.estimate.range()
    }

    /// Lower bound of the support, the affine offset.
    pub fn offset(&self) -> f64 {
        self.estimate.minimum
    }

    /// P(impact <= x).
    pub fn cdf(&self, x: f64) -> f64 {
        let (lo, hi) = self.support();
        if x <= lo {
            0.0
        } else if x >= hi {
            1.0
        } else {
            self.unit.cdf((x - lo) / self.scale())
        }
    }

    /// Impact at cumulative probability `p`, clamped to the support.
    pub fn quantile(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        let u = self.unit.inverse_cdf(p);
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.5 };
        self.rescale(u)
    }

    /// Draw one rescaled impact.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = self.unit.sample(rng);
        self.rescale(u)
    }

    /// Draw one value on the unit interval.
    pub fn sample_unit<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.unit.sample(rng)
    }

    fn rescale(&self, u: f64) -> f64 {
        let (lo, hi) = self.support();
        (lo + (hi - lo) * u).clamp(lo, hi)
    }
}
