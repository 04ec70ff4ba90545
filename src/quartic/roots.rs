// Closed-form root computation for the quartic family:
//
//     a*x^4 + K(t2)*x^2 + J(t1) = 0,    |t1| = |t2| = 1
//
// The equation is quadratic in x^2, so the roots come from the quadratic
// formula followed by both square-root branches of each solution.

use num::complex::Complex64;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Returned when the leading coefficient of the quartic is zero, which would
/// divide by zero in the quadratic formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateLeadingCoefficient;

impl std::fmt::Display for DegenerateLeadingCoefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "leading coefficient `a` is zero; the quadratic formula divides by 2a"
        )
    }
}

impl std::error::Error for DegenerateLeadingCoefficient {}

/// K(t2) = t2^4 - i*t2^2 - 1
pub fn coefficient_k(t2: Complex64) -> Complex64 {
    t2.powu(4) - Complex64::i() * t2.powu(2) - 1.0
}

/// J(t1) = t1^4 + t1^2 - i*t1 - 1
pub fn coefficient_j(t1: Complex64) -> Complex64 {
    t1.powu(4) + t1.powu(2) - Complex64::i() * t1 - 1.0
}

/// Evaluates a*x^4 + K*x^2 + J. Zero (up to rounding) for every root that
/// `quartic_root_family` returns.
pub fn quartic_residual(a: f64, k: Complex64, j: Complex64, x: Complex64) -> Complex64 {
    a * x.powu(4) + k * x.powu(2) + j
}

/// All four roots of a*x^4 + K(t2)*x^2 + J(t1) = 0 for one sample pair.
///
/// Substituting z = x^2 gives a quadratic with solutions z1, z2; each of
/// those contributes a +/- square-root pair. Every square root taken here is
/// the principal complex branch (`Complex64::sqrt`, cut along the negative
/// real axis). That branch choice is part of the contract: it determines
/// which family each root lands in, and the rendered point clouds depend
/// on it.
///
/// The returned order is [sqrt(z1), sqrt(z2), -sqrt(z1), -sqrt(z2)].
pub fn quartic_root_family(
    a: f64,
    t1: Complex64,
    t2: Complex64,
) -> Result<[Complex64; 4], DegenerateLeadingCoefficient> {
    if a == 0.0 {
        return Err(DegenerateLeadingCoefficient);
    }

    let k = coefficient_k(t2);
    let j = coefficient_j(t1);

    let discriminant_root = (k * k - 4.0 * a * j).sqrt();
    let half_inv_a = 1.0 / (2.0 * a);
    let z1 = (-k + discriminant_root) * half_inv_a;
    let z2 = (-k - discriminant_root) * half_inv_a;

    let x1 = z1.sqrt();
    let x2 = z2.sqrt();
    Ok([x1, x2, -x1, -x2])
}

/// Draws unit-modulus complex numbers with angle uniform in [0, 2*pi).
pub struct UnitCircleSampler {
    angle: Uniform<f64>,
}

impl UnitCircleSampler {
    pub fn new() -> UnitCircleSampler {
        UnitCircleSampler {
            angle: Uniform::from(0.0..std::f64::consts::TAU),
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Complex64 {
        Complex64::from_polar(1.0, self.angle.sample(rng))
    }
}

impl Default for UnitCircleSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws `sample_count` independent (t1, t2) pairs on the unit circle and
/// flattens the four root families into one sequence, interleaved per
/// sample. The output length is exactly `4 * sample_count`.
pub fn sample_root_cloud<R: Rng>(
    a: f64,
    sample_count: usize,
    rng: &mut R,
) -> Result<Vec<Complex64>, DegenerateLeadingCoefficient> {
    if a == 0.0 {
        return Err(DegenerateLeadingCoefficient);
    }

    let sampler = UnitCircleSampler::new();
    let mut cloud = Vec::with_capacity(4 * sample_count);
    for _ in 0..sample_count {
        let t1 = sampler.sample(rng);
        let t2 = sampler.sample(rng);
        let roots = quartic_root_family(a, t1, t2)?;
        cloud.extend_from_slice(&roots);
    }
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use more_asserts::assert_le;

    #[test]
    fn test_root_cloud_length_is_four_per_sample() {
        let mut rng = rand::thread_rng();
        for &sample_count in &[0, 1, 7, 250] {
            let cloud = sample_root_cloud(8.0, sample_count, &mut rng).unwrap();
            assert_eq!(cloud.len(), 4 * sample_count);
        }
    }

    #[test]
    fn test_roots_satisfy_the_quartic() {
        let mut rng = rand::thread_rng();
        let sampler = UnitCircleSampler::new();
        for &a in &[0.01, 0.5, 8.0, -3.0, 14.99] {
            for _ in 0..200 {
                let t1 = sampler.sample(&mut rng);
                let t2 = sampler.sample(&mut rng);
                let k = coefficient_k(t2);
                let j = coefficient_j(t1);
                for x in quartic_root_family(a, t1, t2).unwrap() {
                    let residual = quartic_residual(a, k, j, x).norm();
                    // Scale-aware bound: the terms of the polynomial can be
                    // much larger than the residual they cancel to.
                    let scale = a.abs() * x.norm().powi(4) + k.norm() * x.norm().powi(2) + j.norm();
                    assert_le!(residual, 1e-10 * scale.max(1.0));
                }
            }
        }
    }

    #[test]
    fn test_negated_square_root_branches_are_exact() {
        let mut rng = rand::thread_rng();
        let sampler = UnitCircleSampler::new();
        for _ in 0..100 {
            let t1 = sampler.sample(&mut rng);
            let t2 = sampler.sample(&mut rng);
            let [x1, x2, x3, x4] = quartic_root_family(8.0, t1, t2).unwrap();
            // Bitwise equality, not approximate: x3 and x4 are negations by
            // construction.
            assert_eq!(x3, -x1);
            assert_eq!(x4, -x2);
        }
    }

    #[test]
    fn test_zero_leading_coefficient_is_an_error() {
        let t = Complex64::new(1.0, 0.0);
        assert_eq!(
            quartic_root_family(0.0, t, t),
            Err(DegenerateLeadingCoefficient)
        );
        let mut rng = rand::thread_rng();
        assert!(sample_root_cloud(0.0, 10, &mut rng).is_err());
    }

    #[test]
    fn test_pinned_scenario_at_angle_zero() {
        // a = 8, t1 = t2 = 1:  K = 1 - i - 1 = -i,  J = 1 + 1 - i - 1 = 1 - i
        let a = 8.0;
        let t = Complex64::new(1.0, 0.0);
        let k = coefficient_k(t);
        let j = coefficient_j(t);
        assert_relative_eq!(k.re, 0.0);
        assert_relative_eq!(k.im, -1.0);
        assert_relative_eq!(j.re, 1.0);
        assert_relative_eq!(j.im, -1.0);

        for x in quartic_root_family(a, t, t).unwrap() {
            assert_le!(quartic_residual(a, k, j, x).norm(), 1e-12);
        }
    }

    #[test]
    fn test_principal_branch_convention() {
        // Principal square root: non-negative real part, and non-negative
        // imaginary part on the branch cut.
        let negative_real = Complex64::new(-4.0, 0.0).sqrt();
        assert_relative_eq!(negative_real.re, 0.0);
        assert_relative_eq!(negative_real.im, 2.0);

        let mut rng = rand::thread_rng();
        let sampler = UnitCircleSampler::new();
        for _ in 0..200 {
            let t1 = sampler.sample(&mut rng);
            let t2 = sampler.sample(&mut rng);
            let [x1, x2, _, _] = quartic_root_family(8.0, t1, t2).unwrap();
            assert!(x1.re > 0.0 || (x1.re == 0.0 && x1.im >= 0.0));
            assert!(x2.re > 0.0 || (x2.re == 0.0 && x2.im >= 0.0));
        }
    }

    #[test]
    fn test_unit_circle_sampler_modulus() {
        let mut rng = rand::thread_rng();
        let sampler = UnitCircleSampler::new();
        for _ in 0..1000 {
            let t = sampler.sample(&mut rng);
            assert_relative_eq!(t.norm(), 1.0, epsilon = 1e-12);
        }
    }
}
