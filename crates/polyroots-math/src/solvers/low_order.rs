//! Closed-form solvers for real polynomials of degree one to four.
//!
//! Each solve evaluates the residual of every closed-form root and, if one
//! of them exceeds the tolerance, re-solves with [`JenkinsTraub`]. The
//! iterative result is adopted only when it returns a full set of roots.

use nalgebra::Complex;

use super::jenkins_traub::JenkinsTraub;
use super::{
    residual, CubicRoots, LinearRoot, QuadraticRoots, QuarticRoots, RootMethod, Roots, RootsType,
    SolverConfig, DEFAULT_TOLERANCE,
};
use crate::error::MathResult;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Closed-form root solver for polynomials of degree one to four.
///
/// Quadratics use the citardauq form of the quadratic formula, cubics use
/// Cardano's method and quartics use Ferrari's method. When the residual of
/// any closed-form root exceeds the tolerance the polynomial is solved again
/// with [`JenkinsTraub`].
///
/// A negative tolerance always takes the iterative path.
///
/// Every result must be checked for [`RootsType::Unknown`] before its roots
/// are used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowOrderPolynomialSolver {
    tolerance: f64,
    iterative: JenkinsTraub<f64>,
}

impl Default for LowOrderPolynomialSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl LowOrderPolynomialSolver {
    /// Creates a solver with the given residual tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            iterative: JenkinsTraub::new(),
        }
    }

    /// Creates a solver from a validated configuration.
    pub fn from_config(config: &SolverConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self::new(config.tolerance))
    }

    /// The configuration equivalent to this solver.
    #[must_use]
    pub fn config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance)
    }

    /// Residual above which closed-form roots are refined iteratively.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Sets the tolerance used by subsequent solves.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Builder form of [`Self::set_tolerance`].
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Solves `a·x + b = 0`.
    ///
    /// Returns [`RootsType::Unknown`] when `a` is zero.
    #[must_use]
    pub fn solve_linear(&self, a: f64, b: f64) -> LinearRoot {
        let mut result = LinearRoot::unsolved();
        if a != 0.0 {
            result.roots[0] = Complex::new(-b / a, 0.0);
            result.count = 1;
            result.kind = RootsType::RealRoots;
        }
        result
    }

    /// Solves `a·x² + b·x + c = 0`.
    ///
    /// Degenerates to [`Self::solve_linear`] when `a` is zero. The kind is
    /// [`RootsType::RealRoots`] or [`RootsType::ComplexRoots`].
    #[must_use]
    pub fn solve_quadratic(&self, a: f64, b: f64, c: f64) -> QuadraticRoots {
        if a == 0.0 {
            return widen(&self.solve_linear(b, c));
        }

        let mut result = QuadraticRoots::unsolved();
        result.count = 2;

        // decide the sign of b² - 4ac without subtracting
        let ac = a * c;
        let mut positive = b * b;
        let mut negative = 0.0;
        if ac > 0.0 {
            negative = 4.0 * ac;
        } else {
            positive += (4.0 * ac).abs();
        }

        let sqrt_abs_discriminant = if c == 0.0 {
            b.abs()
        } else if b == 0.0 {
            2.0 * ac.abs().sqrt()
        } else {
            (positive - negative).abs().sqrt()
        };

        if positive > negative {
            if c == 0.0 {
                result.roots[0] = Complex::new(-b / a, 0.0);
                result.roots[1] = Complex::new(0.0, 0.0);
            } else {
                let sign = if b < 0.0 { -1.0 } else { 1.0 };
                let q = -0.5 * (b + sign * sqrt_abs_discriminant);
                result.roots[0] = Complex::new(q / a, 0.0);
                result.roots[1] = Complex::new(c / q, 0.0);
            }
            result.kind = RootsType::RealRoots;
        } else {
            let re = -0.5 * b / a;
            if positive < negative {
                let im = 0.5 * sqrt_abs_discriminant / a;
                result.roots[0] = Complex::new(re, im);
                result.roots[1] = Complex::new(re, -im);
                result.kind = RootsType::ComplexRoots;
            } else {
                result.roots[0] = Complex::new(re, 0.0);
                result.roots[1] = Complex::new(re, 0.0);
                result.kind = RootsType::RealRoots;
            }
        }

        let coefficients = [a, b, c];
        if self.exceeds_tolerance(&coefficients, &result.roots) {
            log::debug!("quadratic residual exceeds tolerance {}, iterating", self.tolerance);

            match self.iterate(&coefficients) {
                Some(roots) => {
                    result.roots.copy_from_slice(&roots);
                    // Roundoff can leave real roots with a tiny imaginary
                    // part, which classifies them as complex.
                    result.kind = if roots[0].im != 0.0 {
                        RootsType::ComplexRoots
                    } else {
                        RootsType::RealRoots
                    };
                    result.method = RootMethod::Iterative;
                }
                None => fail(&mut result),
            }
        }

        result
    }

    /// Solves `a·x³ + b·x² + c·x + d = 0`.
    ///
    /// Degenerates to [`Self::solve_quadratic`] on `(b, c, d)` when `a` is
    /// zero. Otherwise the first root is real and the kind is
    /// [`RootsType::RealRoots`] or [`RootsType::RealAndComplexRoots`].
    #[must_use]
    pub fn solve_cubic(&self, a: f64, b: f64, c: f64, d: f64) -> CubicRoots {
        if a == 0.0 {
            return widen(&self.solve_quadratic(b, c, d));
        }

        let mut result = CubicRoots::unsolved();
        result.count = 3;

        let a2 = b / a;
        let a1 = c / a;
        let a0 = d / a;
        let one_third = 1.0 / 3.0;
        let shift = one_third * a2;

        // depressed cubic
        let q = one_third * (a1 - a2 * shift);
        let r = (0.5 * (a1 * a2 - 3.0 * a0) - one_third * a2 * a2 * shift) / 3.0;
        let delta = q * q * q + r * r;

        if delta >= 0.0 {
            let sqrt_delta = delta.sqrt();
            let s1 = (r + sqrt_delta).cbrt();
            let s2 = (r - sqrt_delta).cbrt();
            let sum = s1 + s2;
            let re = -0.5 * sum - shift;

            result.roots[0] = Complex::new(sum - shift, 0.0);
            if delta == 0.0 {
                result.roots[1] = Complex::new(re, 0.0);
                result.roots[2] = Complex::new(re, 0.0);
                result.kind = RootsType::RealRoots;
            } else {
                let im = 0.5 * SQRT_3 * (s1 - s2);
                result.roots[1] = Complex::new(re, im);
                result.roots[2] = Complex::new(re, -im);
                result.kind = RootsType::RealAndComplexRoots;
            }
        } else {
            // three real roots from complex cube roots
            let sqrt_delta = Complex::new(delta, 0.0).sqrt();
            let s1 = (sqrt_delta + r).powf(one_third);
            let s2 = (-sqrt_delta + r).powf(one_third);
            let sum = s1 + s2;
            let diff = s1 - s2;
            let re = -0.5 * sum.re - shift;
            let offset = 0.5 * SQRT_3 * diff.im;

            result.roots[0] = Complex::new(sum.re - shift, 0.0);
            result.roots[1] = Complex::new(re - offset, 0.0);
            result.roots[2] = Complex::new(re + offset, 0.0);
            result.kind = RootsType::RealRoots;
        }

        let coefficients = [a, b, c, d];
        if self.exceeds_tolerance(&coefficients, &result.roots) {
            log::debug!("cubic residual exceeds tolerance {}, iterating", self.tolerance);

            match self.iterate(&coefficients) {
                Some(roots) => {
                    // the most nearly real root goes first
                    let mut j = if roots[0].im.abs() < roots[1].im.abs() { 0 } else { 1 };
                    if roots[j].im.abs() >= roots[2].im.abs() {
                        j = 2;
                    }

                    result.roots[0] = Complex::new(roots[j].re, 0.0);
                    result.roots[1] = roots[(j + 1) % 3];
                    result.roots[2] = roots[(j + 2) % 3];
                    result.kind = if result.roots[1].im != 0.0 {
                        RootsType::RealAndComplexRoots
                    } else {
                        RootsType::RealRoots
                    };
                    result.method = RootMethod::Iterative;
                }
                None => fail(&mut result),
            }
        }

        result
    }

    /// Solves `a·x³ + b·x² + c·x + d = 0` for a single real root.
    ///
    /// The kind is [`RootsType::RealRoots`] on success. A degenerate cubic
    /// whose remaining roots are all complex yields [`RootsType::Unknown`].
    #[must_use]
    pub fn solve_cubic_real(&self, a: f64, b: f64, c: f64, d: f64) -> (f64, RootsType) {
        let result = self.solve_cubic(a, b, c, d);
        if !result.is_solved() {
            return (0.0, RootsType::Unknown);
        }

        result
            .found()
            .iter()
            .find(|z| z.im == 0.0)
            .map_or((0.0, RootsType::Unknown), |z| (z.re, RootsType::RealRoots))
    }

    /// Solves `a·x⁴ + b·x³ + c·x² + d·x + e = 0`.
    ///
    /// Degenerates to [`Self::solve_cubic`] on `(b, c, d, e)` when `a` is
    /// zero. Otherwise the kind counts the roots with a nonzero imaginary
    /// part, clamped to `RealRoots..=ComplexRoots`.
    #[must_use]
    pub fn solve_quartic(&self, a: f64, b: f64, c: f64, d: f64, e: f64) -> QuarticRoots {
        if a == 0.0 {
            return widen(&self.solve_cubic(b, c, d, e));
        }

        let mut result = QuarticRoots::unsolved();
        result.count = 4;

        let a3 = b / a;
        let a2 = c / a;
        let a1 = d / a;
        let a0 = e / a;
        let aa = a3 * a3;

        let (y, resolved) = self.solve_cubic_real(
            1.0,
            -a2,
            a3 * a1 - 4.0 * a0,
            -aa * a0 + 4.0 * a2 * a0 - a1 * a1,
        );

        if resolved.is_known() {
            result.roots = ferrari(a3, a2, a1, a0, y);
        } else {
            log::debug!("resolvent cubic unsolved, iterating on the quartic");
        }

        let coefficients = [a, b, c, d, e];
        if !resolved.is_known() || self.exceeds_tolerance(&coefficients, &result.roots) {
            log::debug!("quartic residual exceeds tolerance {}, iterating", self.tolerance);

            match self.iterate(&coefficients) {
                Some(roots) => {
                    result.roots.copy_from_slice(&roots);
                    result.method = RootMethod::Iterative;
                }
                None => {
                    fail(&mut result);
                    return result;
                }
            }
        }

        let complex = result.roots.iter().filter(|z| z.im != 0.0).count();
        result.kind = RootsType::from_complex_count(complex);
        result
    }

    fn exceeds_tolerance(&self, coefficients: &[f64], roots: &[Complex<f64>]) -> bool {
        // NaN residuals count as exceeding
        roots
            .iter()
            .any(|&z| !(residual(coefficients, z) <= self.tolerance))
    }

    /// Runs Jenkins–Traub, returning the roots only if all of them converged.
    fn iterate(&self, coefficients: &[f64]) -> Option<Vec<Complex<f64>>> {
        let degree = coefficients.len() - 1;
        let mut roots = vec![Complex::new(0.0, 0.0); degree];

        match self.iterative.find_roots_real(coefficients, &mut roots) {
            Ok(count) if count == degree => Some(roots),
            Ok(count) => {
                log::warn!(
                    "iterative fallback found {} of {} roots, result unknown",
                    count,
                    degree
                );
                None
            }
            Err(e) => {
                log::warn!("iterative fallback rejected coefficients: {}", e);
                None
            }
        }
    }
}

/// Ferrari's factorisation of the monic quartic
/// `x⁴ + a3·x³ + a2·x² + a1·x + a0` given a real root `y` of its resolvent
/// cubic.
fn ferrari(a3: f64, a2: f64, a1: f64, a0: f64, y: f64) -> [Complex<f64>; 4] {
    let aa = a3 * a3;
    let r_sq = 0.25 * aa - a2 + y;
    let term1 = 0.75 * aa - 2.0 * a2 - r_sq;

    let (r, f, g) = if r_sq > 0.0 {
        let r_mag = r_sq.sqrt();
        let term3 = (a3 * a2 - 2.0 * a1 - 0.25 * aa * a3) / r_mag;
        (
            Complex::new(r_mag, 0.0),
            Complex::new(term1 + term3, 0.0).sqrt(),
            Complex::new(term1 - term3, 0.0).sqrt(),
        )
    } else if r_sq < 0.0 {
        // R = i·|R|, so term3 / R is purely imaginary
        let r_mag = (-r_sq).sqrt();
        let term3 = (a3 * a2 - 2.0 * a1 - 0.25 * aa * a3) / r_mag;
        (
            Complex::new(0.0, r_mag),
            Complex::new(term1, -term3).sqrt(),
            Complex::new(term1, term3).sqrt(),
        )
    } else {
        let term3 = y * y - 4.0 * a0;
        let term2 = 2.0 * term3.abs().sqrt();
        let (f_sq, g_sq) = if term3 < 0.0 {
            (Complex::new(term1, term2), Complex::new(term1, -term2))
        } else {
            (Complex::new(term1 + term2, 0.0), Complex::new(term1 - term2, 0.0))
        };
        (Complex::new(0.0, 0.0), f_sq.sqrt(), g_sq.sqrt())
    };

    let half_a3 = Complex::new(0.5 * a3, 0.0);
    [
        (half_a3 - r - f) * -0.5,
        (half_a3 - r + f) * -0.5,
        (half_a3 + r - g) * -0.5,
        (half_a3 + r + g) * -0.5,
    ]
}

/// Copies a lower-degree result into a wider one, zero-padding the tail.
fn widen<const N: usize, const M: usize>(from: &Roots<N>) -> Roots<M> {
    let mut to = Roots::<M>::unsolved();
    to.roots[..from.count].copy_from_slice(from.found());
    to.count = from.count;
    to.kind = from.kind;
    to.method = from.method;
    to
}

fn fail<const N: usize>(result: &mut Roots<N>) {
    result.kind = RootsType::Unknown;
    result.count = 0;
}
