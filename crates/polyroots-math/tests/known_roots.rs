//! Integration tests: polynomials with known roots.
//!
//! Covers both solvers through the public API, including the closed-form
//! to iterative fallback on an ill-conditioned cubic.

use approx::assert_relative_eq;
use polyroots_math::prelude::*;
use polyroots_math::Complex;

// =============================================================================
// HELPERS
// =============================================================================

fn sorted_real_parts(roots: &[Complex<f64>]) -> Vec<f64> {
    let mut re: Vec<f64> = roots.iter().map(|z| z.re).collect();
    re.sort_by(|a, b| a.partial_cmp(b).unwrap());
    re
}

fn assert_contains(roots: &[Complex<f64>], expected: Complex<f64>, tolerance: f64) {
    assert!(
        roots.iter().any(|z| (z - expected).norm() < tolerance),
        "{:?} not found in {:?}",
        expected,
        roots
    );
}

// =============================================================================
// LOW-ORDER SOLVER
// =============================================================================

#[test]
fn quadratic_with_real_roots() {
    let solver = LowOrderPolynomialSolver::default();
    let result = solver.solve_quadratic(1.0, -3.0, 2.0);

    assert_eq!(result.kind, RootsType::RealRoots);
    assert_eq!(sorted_real_parts(result.found()), vec![1.0, 2.0]);
}

#[test]
fn quadratic_with_complex_roots() {
    let solver = LowOrderPolynomialSolver::default();
    let result = solver.solve_quadratic(1.0, 0.0, 1.0);

    assert_eq!(result.kind, RootsType::ComplexRoots);
    assert_contains(result.found(), Complex::new(0.0, 1.0), 1e-15);
    assert_contains(result.found(), Complex::new(0.0, -1.0), 1e-15);
}

#[test]
fn cubic_with_three_real_roots() {
    let solver = LowOrderPolynomialSolver::default();
    let result = solver.solve_cubic(1.0, -6.0, 11.0, -6.0);

    assert_eq!(result.kind, RootsType::RealRoots);
    for expected in [1.0, 2.0, 3.0] {
        assert_contains(result.found(), Complex::new(expected, 0.0), 1e-6);
    }
}

#[test]
fn quartic_with_four_real_roots() {
    let solver = LowOrderPolynomialSolver::default();
    let result = solver.solve_quartic(1.0, 0.0, -5.0, 0.0, 4.0);

    assert_eq!(result.kind, RootsType::RealRoots);
    let re = sorted_real_parts(result.found());
    for (actual, expected) in re.iter().zip([-2.0, -1.0, 1.0, 2.0]) {
        assert_relative_eq!(*actual, expected, epsilon = 1e-6);
    }
}

#[test]
fn fallback_does_not_lose_accuracy() {
    // (x - 1)(x - 1.01)(x - 1.02)
    let coefficients = [1.0, -3.03, 3.0602, -1.0302];
    let [a, b, c, d] = coefficients;

    let loose = LowOrderPolynomialSolver::new(1e3).solve_cubic(a, b, c, d);
    let precise = LowOrderPolynomialSolver::new(-1.0).solve_cubic(a, b, c, d);

    assert_eq!(loose.method, RootMethod::ClosedForm);
    assert_eq!(precise.method, RootMethod::Iterative);
    assert!(precise.is_solved());
    assert_eq!(precise.roots[0].im, 0.0);
    assert!(precise.max_residual(&coefficients) <= loose.max_residual(&coefficients) + 1e-12);

    for expected in [1.0, 1.01, 1.02] {
        assert_contains(precise.found(), Complex::new(expected, 0.0), 1e-6);
    }
}

#[test]
fn solver_from_json_config() {
    let config: SolverConfig = serde_json::from_str(r#"{ "tolerance": 1e-9 }"#).unwrap();
    let solver = LowOrderPolynomialSolver::from_config(&config).unwrap();
    assert_relative_eq!(solver.tolerance(), 1e-9);

    let result = solver.solve_cubic(2.0, -4.0, 2.0, -4.0);
    assert_eq!(result.kind, RootsType::RealAndComplexRoots);
    assert!(result.max_residual(&[2.0, -4.0, 2.0, -4.0]) <= 1e-9);
}

#[test]
fn repeated_solves_are_identical() {
    let solver = LowOrderPolynomialSolver::new(-1.0);
    let first = solver.solve_quartic(3.0, -1.0, 2.0, 7.0, -5.0);
    let second = solver.solve_quartic(3.0, -1.0, 2.0, 7.0, -5.0);
    assert_eq!(first, second);
}

// =============================================================================
// JENKINS-TRAUB
// =============================================================================

#[test]
fn double_root_at_origin_is_extracted() {
    let solver = JenkinsTraub::<f64>::new();
    let mut roots = vec![Complex::new(1.0, 1.0); 2];
    let count = solver.find_roots_real(&[1.0, 0.0, 0.0], &mut roots).unwrap();

    assert_eq!(count, 2);
    assert_eq!(roots, vec![Complex::new(0.0, 0.0); 2]);
}

#[test]
fn degree_zero_is_an_error() {
    let solver = JenkinsTraub::<f64>::new();
    let mut roots: Vec<Complex<f64>> = Vec::new();
    assert_eq!(
        solver.find_roots_real(&[1.0], &mut roots),
        Err(MathError::DegreeZero)
    );
}

#[test]
fn wilkinson_like_polynomial() {
    // roots 1..=10
    let expected: Vec<f64> = (1..=10).map(f64::from).collect();
    let p = Polynomial::from_roots(&expected);

    let roots = p.roots().unwrap();
    assert_eq!(roots.len(), 10);
    let re = sorted_real_parts(&roots);
    for (actual, expected) in re.iter().zip(&expected) {
        assert_relative_eq!(*actual, *expected, epsilon = 1e-6);
    }
}

#[test]
fn complex_coefficient_roots() {
    let expected = [
        Complex::new(1.0, 2.0),
        Complex::new(-0.5, 0.25),
        Complex::new(0.0, -3.0),
        Complex::new(2.5, 0.0),
    ];
    let p = Polynomial::from_roots(&expected);

    let roots = p.roots().unwrap();
    assert_eq!(roots.len(), 4);
    for z in expected {
        assert_contains(&roots, z, 1e-9);
    }
}

#[test]
fn companion_matrix_agrees_with_jenkins_traub() {
    let p = Polynomial::new(vec![2.0, -3.0, 0.0, 5.0, -1.0]).unwrap();

    let iterative = p.roots().unwrap();
    let eigenvalues = p.companion_matrix().unwrap().complex_eigenvalues();

    assert_eq!(iterative.len(), eigenvalues.len());
    for z in eigenvalues.iter() {
        assert_contains(&iterative, *z, 1e-8);
    }
}

#[test]
fn root_finder_trait_object() {
    let finders: Vec<Box<dyn PolynomialRootFinder<f64>>> = vec![Box::new(JenkinsTraub::new())];
    let p = Polynomial::from_roots(&[Complex::new(4.0, 0.0), Complex::new(-1.0, 0.0)]);

    for finder in &finders {
        let roots = p.roots_with(finder.as_ref()).unwrap();
        assert_eq!(roots.len(), 2, "{}", finder.name());
        assert_contains(&roots, Complex::new(4.0, 0.0), 1e-12);
        assert_contains(&roots, Complex::new(-1.0, 0.0), 1e-12);
    }
}
