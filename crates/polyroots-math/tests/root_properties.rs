//! Property-based tests for root-finding invariants.
//!
//! These tests verify properties that should hold for any input:
//! - Jenkins–Traub never reports more roots than the degree
//! - Every reported root has a small residual relative to the coefficients
//! - Low-order solves are deterministic

use polyroots_math::prelude::*;
use polyroots_math::Complex;
use proptest::prelude::*;

// =============================================================================
// HELPERS
// =============================================================================

/// Residual bound scaled by the magnitude of the Horner terms at `z`.
fn relative_residual(coefficients: &[f64], z: Complex<f64>) -> f64 {
    let modulus = z.norm();
    let scale = coefficients
        .iter()
        .fold(0.0, |acc, c| acc * modulus + c.abs());
    residual(coefficients, z) / scale.max(f64::MIN_POSITIVE)
}

/// Distinct real roots spaced at least 0.1 apart.
fn distinct_roots() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-50i32..50, 1..8).prop_map(|mut values| {
        values.sort_unstable();
        values.dedup();
        values.into_iter().map(|v| f64::from(v) / 10.0).collect()
    })
}

fn nonzero_coefficient() -> impl Strategy<Value = f64> {
    prop_oneof![-100.0..-0.01f64, 0.01..100.0f64]
}

// =============================================================================
// JENKINS-TRAUB
// =============================================================================

proptest! {
    #[test]
    fn finds_every_distinct_real_root(roots in distinct_roots()) {
        let p = Polynomial::from_roots(&roots);
        let coefficients = p.coefficients();

        let found = p.roots().unwrap();
        prop_assert_eq!(found.len(), roots.len());
        for z in &found {
            prop_assert!(relative_residual(coefficients, *z) < 1e-6);
        }
    }

    #[test]
    fn count_never_exceeds_degree(
        leading in nonzero_coefficient(),
        rest in prop::collection::vec(-100.0..100.0f64, 1..10),
    ) {
        let mut coefficients = vec![leading];
        coefficients.extend(rest);
        let degree = coefficients.len() - 1;

        let solver = JenkinsTraub::<f64>::new();
        let mut roots = vec![Complex::new(f64::NAN, f64::NAN); degree];
        let count = solver.find_roots_real(&coefficients, &mut roots).unwrap();

        prop_assert!(count <= degree);
        for z in &roots[..count] {
            prop_assert!(z.re.is_finite() && z.im.is_finite());
            prop_assert!(relative_residual(&coefficients, *z) < 1e-6);
        }
    }
}

// =============================================================================
// LOW-ORDER SOLVER
// =============================================================================

proptest! {
    #[test]
    fn quadratic_roots_have_small_residuals(
        a in nonzero_coefficient(),
        b in -100.0..100.0f64,
        c in -100.0..100.0f64,
    ) {
        let solver = LowOrderPolynomialSolver::default();
        let result = solver.solve_quadratic(a, b, c);

        prop_assert!(result.is_solved());
        prop_assert_eq!(result.count, 2);
        for z in result.found() {
            prop_assert!(relative_residual(&[a, b, c], *z) < 1e-6);
        }
    }

    #[test]
    fn quartic_solves_are_deterministic(
        a in nonzero_coefficient(),
        b in -10.0..10.0f64,
        c in -10.0..10.0f64,
        d in -10.0..10.0f64,
        e in -10.0..10.0f64,
    ) {
        let solver = LowOrderPolynomialSolver::default();
        let first = solver.solve_quartic(a, b, c, d, e);
        let second = solver.solve_quartic(a, b, c, d, e);

        prop_assert_eq!(first.kind, second.kind);
        prop_assert_eq!(first.method, second.method);
        for (x, y) in first.roots.iter().zip(&second.roots) {
            prop_assert_eq!(x.re.to_bits(), y.re.to_bits());
            prop_assert_eq!(x.im.to_bits(), y.im.to_bits());
        }
    }
}
