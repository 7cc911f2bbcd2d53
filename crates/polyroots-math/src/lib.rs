//! # Polyroots Math
//!
//! Polynomial root finding for real and complex coefficients.
//!
//! This crate provides:
//!
//! - **Jenkins–Traub**: three-stage iterative finder for every root of a
//!   polynomial of any degree, generic over `f32` and `f64`
//! - **Low-Order Solver**: closed-form quadratic, cubic and quartic formulas
//!   with an iterative fallback when a residual misses the tolerance
//! - **Polynomial**: dense polynomial arithmetic, calculus, long division and
//!   companion matrices
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: overflow-safe complex primitives and radix
//!   scaling of extreme coefficients
//! - **Value Semantics**: solvers hold no mutable state between calls
//! - **Explicit Failure**: invalid input is an error, non-convergence is a
//!   short root count or [`RootsType::Unknown`](solvers::RootsType::Unknown)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod numeric;
pub mod polynomial;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::numeric::{MachineConstants, Real};
    pub use crate::polynomial::Polynomial;
    pub use crate::solvers::{
        evaluate_real_at, residual, CubicRoots, JenkinsTraub, LinearRoot,
        LowOrderPolynomialSolver, PolynomialRootFinder, QuadraticRoots, QuarticRoots, RootMethod,
        Roots, RootsType, SolverConfig,
    };
}

pub use error::{MathError, MathResult};
pub use nalgebra::Complex;
