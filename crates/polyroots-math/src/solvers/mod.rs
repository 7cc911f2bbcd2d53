//! Polynomial root-finding algorithms.
//!
//! This module provides two layered solvers:
//!
//! - [`JenkinsTraub`]: three-stage iterative finder for all roots of a
//!   polynomial with complex (or real) coefficients of any degree
//! - [`LowOrderPolynomialSolver`]: closed-form formulas for degree 1 to 4 with
//!   real coefficients, falling back to Jenkins–Traub when a residual exceeds
//!   the configured tolerance
//!
//! # Choosing a Solver
//!
//! | Solver | Degree | Coefficients | Method |
//! |--------|--------|--------------|--------|
//! | Low-order | 1–4 | Real | Quadratic formula, Cardano, Ferrari |
//! | Jenkins–Traub | any | Real or complex | No-shift, fixed-shift, variable-shift |
//!
//! # Example
//!
//! ```rust
//! use polyroots_math::solvers::{LowOrderPolynomialSolver, RootsType};
//!
//! // x^2 - 3x + 2 = (x - 1)(x - 2)
//! let solver = LowOrderPolynomialSolver::default();
//! let result = solver.solve_quadratic(1.0, -3.0, 2.0);
//!
//! assert_eq!(result.kind, RootsType::RealRoots);
//! assert!((result.roots[0].re - 2.0).abs() < 1e-12);
//! assert!((result.roots[1].re - 1.0).abs() < 1e-12);
//! ```

mod jenkins_traub;
mod low_order;

pub use jenkins_traub::JenkinsTraub;
pub use low_order::LowOrderPolynomialSolver;

use nalgebra::Complex;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::numeric::Real;

/// Default residual tolerance above which the low-order solver iterates.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Classification of a root set.
///
/// The ordinals are part of the contract: the quartic solver derives its
/// kind by clamping a count of complex roots into `RealRoots..=ComplexRoots`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum RootsType {
    /// The polynomial could not be solved.
    #[default]
    Unknown = 0,
    /// Every root is real.
    RealRoots = 1,
    /// Some roots are real, the rest are complex conjugates.
    RealAndComplexRoots = 2,
    /// Every root is complex.
    ComplexRoots = 3,
}

impl RootsType {
    /// Returns the ordinal value.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Maps a count of roots with nonzero imaginary part to a kind, clamped
    /// to `RealRoots..=ComplexRoots`.
    #[must_use]
    pub fn from_complex_count(count: usize) -> Self {
        match count {
            0 | 1 => Self::RealRoots,
            2 => Self::RealAndComplexRoots,
            _ => Self::ComplexRoots,
        }
    }

    /// Returns true unless the kind is [`RootsType::Unknown`].
    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

/// How a root set was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RootMethod {
    /// Closed-form algebraic formula.
    #[default]
    ClosedForm,
    /// Jenkins–Traub iteration after the closed form missed the tolerance.
    Iterative,
}

/// Roots of a low-order polynomial.
///
/// Only the first `count` entries are meaningful; when the leading
/// coefficient vanishes the polynomial degenerates and the trailing slots
/// are left at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots<const N: usize> {
    /// The roots.
    pub roots: [Complex<f64>; N],
    /// Number of meaningful roots.
    pub count: usize,
    /// Classification of the roots.
    pub kind: RootsType,
    /// Method that produced the roots.
    pub method: RootMethod,
}

/// Root of a linear polynomial.
pub type LinearRoot = Roots<1>;
/// Roots of a quadratic polynomial.
pub type QuadraticRoots = Roots<2>;
/// Roots of a cubic polynomial.
pub type CubicRoots = Roots<3>;
/// Roots of a quartic polynomial.
pub type QuarticRoots = Roots<4>;

impl<const N: usize> Roots<N> {
    pub(crate) fn unsolved() -> Self {
        Self {
            roots: [Complex::new(0.0, 0.0); N],
            count: 0,
            kind: RootsType::Unknown,
            method: RootMethod::ClosedForm,
        }
    }

    /// Returns true if the kind is not [`RootsType::Unknown`].
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.kind.is_known()
    }

    /// The meaningful roots.
    #[must_use]
    pub fn found(&self) -> &[Complex<f64>] {
        &self.roots[..self.count]
    }

    /// Largest residual of the meaningful roots against `coefficients`.
    #[must_use]
    pub fn max_residual(&self, coefficients: &[f64]) -> f64 {
        self.found()
            .iter()
            .map(|&z| residual(coefficients, z))
            .fold(0.0, f64::max)
    }
}

/// Configuration for the low-order solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Residual above which a closed-form root is refined iteratively.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Checks that the tolerance is a number.
    ///
    /// Negative values are accepted and force the iterative path.
    pub fn validate(&self) -> MathResult<()> {
        if self.tolerance.is_nan() {
            return Err(MathError::invalid_input("tolerance must not be NaN"));
        }
        Ok(())
    }
}

/// Trait for algorithms that find every root of a polynomial.
pub trait PolynomialRootFinder<T: Real>: Send + Sync {
    /// Finds the roots of the polynomial with the given coefficients,
    /// highest degree first.
    ///
    /// Writes the roots into `roots[..count]` and returns `count`, which is
    /// less than the degree if the algorithm did not converge for every root.
    fn find_roots(&self, coefficients: &[Complex<T>], roots: &mut [Complex<T>])
        -> MathResult<usize>;

    /// Returns the name of the algorithm.
    fn name(&self) -> &'static str;
}

/// Evaluates a real-coefficient polynomial at a complex point by Horner's
/// method. Coefficients are ordered highest degree first.
#[must_use]
pub fn evaluate_real_at(coefficients: &[f64], x: Complex<f64>) -> Complex<f64> {
    coefficients
        .iter()
        .fold(Complex::new(0.0, 0.0), |acc, &c| acc * x + c)
}

/// Modulus of the polynomial value at `x`.
#[must_use]
pub fn residual(coefficients: &[f64], x: Complex<f64>) -> f64 {
    evaluate_real_at(coefficients, x).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roots_type_ordinals() {
        assert_eq!(RootsType::Unknown.ordinal(), 0);
        assert_eq!(RootsType::RealRoots.ordinal(), 1);
        assert_eq!(RootsType::RealAndComplexRoots.ordinal(), 2);
        assert_eq!(RootsType::ComplexRoots.ordinal(), 3);
        assert!(RootsType::RealRoots < RootsType::ComplexRoots);
    }

    #[test]
    fn test_roots_type_from_complex_count() {
        assert_eq!(RootsType::from_complex_count(0), RootsType::RealRoots);
        assert_eq!(RootsType::from_complex_count(2), RootsType::RealAndComplexRoots);
        assert_eq!(RootsType::from_complex_count(4), RootsType::ComplexRoots);
        assert!(!RootsType::Unknown.is_known());
    }

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default().with_tolerance(1e-9);
        assert_relative_eq!(config.tolerance, 1e-9);
        assert!(config.validate().is_ok());
        assert!(SolverConfig::new(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_solver_config_serde_defaults() {
        let config: SolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SolverConfig::default());

        let config: SolverConfig = serde_json::from_str(r#"{"tolerance": 1e-3}"#).unwrap();
        assert_relative_eq!(config.tolerance, 1e-3);

        let json = serde_json::to_string(&RootsType::RealAndComplexRoots).unwrap();
        assert_eq!(json, "\"RealAndComplexRoots\"");
    }

    #[test]
    fn test_evaluate_real_at() {
        // x^2 + 1 at x = i
        let value = evaluate_real_at(&[1.0, 0.0, 1.0], Complex::new(0.0, 1.0));
        assert_relative_eq!(value.re, 0.0);
        assert_relative_eq!(value.im, 0.0);

        // 2x^3 - x + 5 at x = 2
        assert_relative_eq!(residual(&[2.0, 0.0, -1.0, 5.0], Complex::new(2.0, 0.0)), 19.0);
    }

    #[test]
    fn test_roots_found_and_residual() {
        let mut roots = Roots::<2>::unsolved();
        assert!(!roots.is_solved());
        assert!(roots.found().is_empty());

        roots.roots[0] = Complex::new(1.0, 0.0);
        roots.count = 1;
        roots.kind = RootsType::RealRoots;
        assert!(roots.is_solved());
        assert_eq!(roots.max_residual(&[1.0, -1.0]), 0.0);
    }
}
