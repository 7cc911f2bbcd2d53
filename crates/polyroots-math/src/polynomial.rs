//! Dense polynomials with real or complex coefficients.
//!
//! Coefficients are stored highest degree first, so `[1, -3, 2]` is
//! `x² - 3x + 2`. Leading zeros are allowed and are kept by the arithmetic
//! operators; [`Polynomial::trim`] drops them.
//!
//! # Example
//!
//! ```rust
//! use polyroots_math::polynomial::Polynomial;
//!
//! let p = Polynomial::from_roots(&[1.0, 2.0]);
//! assert_eq!(p.coefficients(), &[1.0, -3.0, 2.0]);
//! assert_eq!(p.evaluate(3.0), 2.0);
//! assert_eq!(p.to_string(), "x^2 - 3x + 2");
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use nalgebra::{Complex, ComplexField, DMatrix};

use crate::error::{MathError, MathResult};
use crate::numeric::Real;
use crate::solvers::{JenkinsTraub, PolynomialRootFinder};

/// A polynomial with coefficients of type `T`, highest degree first.
///
/// Never empty: the zero polynomial is `[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T: ComplexField> {
    coefficients: Vec<T>,
}

fn scalar<T: ComplexField>(k: usize) -> T {
    nalgebra::convert(k as f64)
}

/// Index of the first nonzero coefficient, never past the constant term.
fn first_nonzero<T: ComplexField>(coefficients: &[T]) -> usize {
    let last = coefficients.len() - 1;
    coefficients[..last]
        .iter()
        .position(|c| !c.is_zero())
        .unwrap_or(last)
}

impl<T: ComplexField> Polynomial<T> {
    /// Creates a polynomial from coefficients, highest degree first.
    pub fn new(coefficients: Vec<T>) -> MathResult<Self> {
        if coefficients.is_empty() {
            return Err(MathError::EmptyCoefficients);
        }
        Ok(Self { coefficients })
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::constant(T::zero())
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self {
            coefficients: vec![value],
        }
    }

    /// The monic polynomial with the given roots, `(x - r0)(x - r1)...`.
    #[must_use]
    pub fn from_roots(roots: &[T]) -> Self {
        let mut coefficients = Vec::with_capacity(roots.len() + 1);
        coefficients.push(T::one());

        for root in roots {
            coefficients.push(T::zero());
            for i in (1..coefficients.len()).rev() {
                let shifted = coefficients[i - 1].clone() * root.clone();
                coefficients[i] -= shifted;
            }
        }

        Self { coefficients }
    }

    /// The coefficients, highest degree first.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Consumes the polynomial, returning its coefficients.
    #[must_use]
    pub fn into_coefficients(self) -> Vec<T> {
        self.coefficients
    }

    /// Formal degree: the number of coefficients minus one.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Returns true if every coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_zero())
    }

    /// Drops leading zero coefficients, keeping at least the constant term.
    #[must_use]
    pub fn trim(mut self) -> Self {
        let j = first_nonzero(&self.coefficients);
        self.coefficients.drain(..j);
        self
    }

    /// Evaluates the polynomial at `x` by Horner's method.
    pub fn evaluate(&self, x: T) -> T {
        let mut y = self.coefficients[0].clone();
        for c in &self.coefficients[1..] {
            y = y * x.clone() + c.clone();
        }
        y
    }

    /// Evaluates the polynomial at a complex point.
    pub fn evaluate_complex(&self, z: Complex<T::RealField>) -> Complex<T::RealField> {
        let zero = nalgebra::zero::<T::RealField>();
        self.to_complex()
            .into_iter()
            .fold(Complex::new(zero.clone(), zero), |acc, c| acc * z.clone() + c)
    }

    /// The first derivative.
    ///
    /// Leading zeros are skipped; the derivative of a constant is `[0]`.
    #[must_use]
    pub fn derivative(&self) -> Self {
        self.clone().differentiate()
    }

    /// Differentiates in place.
    pub fn differentiate(mut self) -> Self {
        let j = first_nonzero(&self.coefficients);
        self.coefficients.drain(..j);

        if self.coefficients.len() > 1 {
            self.coefficients.pop();
            let m = self.coefficients.len();
            for (i, c) in self.coefficients.iter_mut().enumerate() {
                *c *= scalar::<T>(m - i);
            }
        } else {
            self.coefficients[0] = T::zero();
        }

        self
    }

    /// The antiderivative with constant of integration `c`.
    ///
    /// Leading zeros are skipped.
    #[must_use]
    pub fn anti_derivative(&self, c: T) -> Self {
        self.clone().anti_differentiate(c)
    }

    /// Antidifferentiates in place with constant of integration `c`.
    pub fn anti_differentiate(mut self, c: T) -> Self {
        let j = first_nonzero(&self.coefficients);
        self.coefficients.drain(..j);
        if self.coefficients.len() == 1 && self.coefficients[0].is_zero() {
            self.coefficients.clear();
        }
        self.coefficients.push(c);

        let m = self.coefficients.len();
        for i in 0..m - 1 {
            self.coefficients[i] /= scalar::<T>(m - 1 - i);
        }

        self
    }

    /// Long division, returning the quotient and remainder.
    ///
    /// Leading zeros of the divisor are ignored.
    pub fn div_rem(&self, divisor: &Self) -> MathResult<(Self, Self)> {
        let d = &divisor.coefficients[first_nonzero(&divisor.coefficients)..];
        let lead = d[0].clone();
        if lead.is_zero() {
            return Err(MathError::DivisionByZero);
        }

        let n = self.coefficients.len();
        let m = d.len();
        if n < m {
            return Ok((Self::zero(), self.clone()));
        }

        let mut remainder = self.coefficients.clone();
        let mut quotient = Vec::with_capacity(n - m + 1);
        for i in 0..=n - m {
            let q = remainder[i].clone() / lead.clone();
            for (j, dj) in d.iter().enumerate() {
                remainder[i + j] -= q.clone() * dj.clone();
            }
            quotient.push(q);
        }

        let remainder = if m == 1 {
            vec![T::zero()]
        } else {
            remainder.split_off(n - m + 1)
        };

        Ok((Self { coefficients: quotient }, Self { coefficients: remainder }))
    }

    /// Finds the roots with [`JenkinsTraub`].
    ///
    /// Leading zeros are skipped. Fewer than `degree` roots are returned if
    /// the iteration failed to converge for some of them.
    pub fn roots(&self) -> MathResult<Vec<Complex<T::RealField>>>
    where
        T::RealField: Real,
    {
        self.roots_with(&JenkinsTraub::<T::RealField>::new())
    }

    /// Finds the roots with the given root finder.
    pub fn roots_with<F>(&self, finder: &F) -> MathResult<Vec<Complex<T::RealField>>>
    where
        T::RealField: Real,
        F: PolynomialRootFinder<T::RealField> + ?Sized,
    {
        let coefficients = self.to_complex();
        let coefficients = &coefficients[first_nonzero(&self.coefficients)..];
        let zero = nalgebra::zero::<T::RealField>();

        let mut roots = vec![Complex::new(zero, zero); coefficients.len().saturating_sub(1)];
        let count = finder.find_roots(coefficients, &mut roots)?;
        roots.truncate(count);

        Ok(roots)
    }

    /// The Frobenius companion matrix, whose eigenvalues are the roots.
    ///
    /// Leading zeros are skipped.
    pub fn companion_matrix(&self) -> MathResult<DMatrix<T>> {
        let c = &self.coefficients[first_nonzero(&self.coefficients)..];
        let n = c.len() - 1;
        if n == 0 {
            return Err(MathError::DegreeZero);
        }

        let lead = c[0].clone();
        let mut matrix = DMatrix::zeros(n, n);
        for j in 0..n {
            matrix[(0, j)] = -(c[j + 1].clone() / lead.clone());
        }
        for i in 1..n {
            matrix[(i, i - 1)] = T::one();
        }

        Ok(matrix)
    }

    fn to_complex(&self) -> Vec<Complex<T::RealField>> {
        self.coefficients
            .iter()
            .map(|c| Complex::new(c.clone().real(), c.clone().imaginary()))
            .collect()
    }

    /// Coefficient-wise `self ± rhs`, aligned at the constant term.
    fn combine(&self, rhs: &Self, subtract: bool) -> Self {
        let n = self.coefficients.len();
        let m = rhs.coefficients.len();
        let len = n.max(m);

        let mut coefficients = vec![T::zero(); len];
        for (i, c) in self.coefficients.iter().enumerate() {
            coefficients[len - n + i] += c.clone();
        }
        for (i, c) in rhs.coefficients.iter().enumerate() {
            if subtract {
                coefficients[len - m + i] -= c.clone();
            } else {
                coefficients[len - m + i] += c.clone();
            }
        }

        Self { coefficients }
    }

    fn convolve(&self, rhs: &Self) -> Self {
        let n = self.coefficients.len();
        let m = rhs.coefficients.len();

        let mut coefficients = vec![T::zero(); n + m - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in rhs.coefficients.iter().enumerate() {
                coefficients[i + j] += a.clone() * b.clone();
            }
        }

        Self { coefficients }
    }
}

impl<T: ComplexField> Default for Polynomial<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: ComplexField> Index<usize> for Polynomial<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.coefficients[index]
    }
}

impl<T: ComplexField> IndexMut<usize> for Polynomial<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.coefficients[index]
    }
}

impl<T: ComplexField> Add for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn add(self, rhs: Self) -> Polynomial<T> {
        self.combine(rhs, false)
    }
}

impl<T: ComplexField> Add for Polynomial<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(&rhs, false)
    }
}

impl<T: ComplexField> AddAssign<&Polynomial<T>> for Polynomial<T> {
    fn add_assign(&mut self, rhs: &Self) {
        *self = self.combine(rhs, false);
    }
}

impl<T: ComplexField> Sub for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn sub(self, rhs: Self) -> Polynomial<T> {
        self.combine(rhs, true)
    }
}

impl<T: ComplexField> Sub for Polynomial<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.combine(&rhs, true)
    }
}

impl<T: ComplexField> SubAssign<&Polynomial<T>> for Polynomial<T> {
    fn sub_assign(&mut self, rhs: &Self) {
        *self = self.combine(rhs, true);
    }
}

impl<T: ComplexField> Mul for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Self) -> Polynomial<T> {
        self.convolve(rhs)
    }
}

impl<T: ComplexField> Mul for Polynomial<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.convolve(&rhs)
    }
}

impl<T: ComplexField> MulAssign<&Polynomial<T>> for Polynomial<T> {
    fn mul_assign(&mut self, rhs: &Self) {
        *self = self.convolve(rhs);
    }
}

impl<T: ComplexField> Neg for Polynomial<T> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for c in &mut self.coefficients {
            *c = -c.clone();
        }
        self
    }
}

impl<T: ComplexField> Neg for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn neg(self) -> Polynomial<T> {
        -self.clone()
    }
}

impl<T: ComplexField> fmt::Display for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zero = nalgebra::zero::<T::RealField>();
        let one = nalgebra::one::<T::RealField>();
        let last = self.degree();
        let mut first = true;

        for (i, c) in self.coefficients.iter().enumerate() {
            if c.is_zero() {
                continue;
            }

            let power = last - i;
            let re = c.clone().real();
            let im = c.clone().imaginary();

            if im == zero {
                let negative = re < zero;
                match (first, negative) {
                    (true, true) => write!(f, "-")?,
                    (false, true) => write!(f, " - ")?,
                    (false, false) => write!(f, " + ")?,
                    (true, false) => {}
                }
                let magnitude = re.abs();
                if magnitude != one || power == 0 {
                    write!(f, "{}", magnitude)?;
                }
            } else {
                if !first {
                    write!(f, " + ")?;
                }
                write!(f, "({})", c)?;
            }

            match power {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", power)?,
            }
            first = false;
        }

        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
