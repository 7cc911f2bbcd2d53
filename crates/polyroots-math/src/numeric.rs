//! Floating point primitives shared by the root finders.
//!
//! The complex helpers work on split real/imaginary parts and scale by the
//! larger component before squaring, so neither very large nor very small
//! magnitudes overflow or underflow on the way to the result.

use nalgebra::{Complex, RealField};

/// Real scalar types usable by the iterative root finder.
///
/// Implemented for `f32` and `f64`.
pub trait Real: RealField + Copy {
    /// Radix of the floating point representation.
    fn radix() -> Self;

    /// Smallest `eps` such that `1 + eps > 1`.
    fn machine_epsilon() -> Self;

    /// Largest finite value.
    fn largest() -> Self;

    /// Smallest positive normal value.
    fn smallest_positive() -> Self;

    /// Converts an `f64` literal into this type.
    #[inline]
    fn lit(value: f64) -> Self {
        nalgebra::convert(value)
    }
}

macro_rules! impl_real {
    ($($t:ty),*) => {
        $(
            impl Real for $t {
                #[inline]
                fn radix() -> Self {
                    <$t>::RADIX as $t
                }

                #[inline]
                fn machine_epsilon() -> Self {
                    <$t>::EPSILON
                }

                #[inline]
                fn largest() -> Self {
                    <$t>::MAX
                }

                #[inline]
                fn smallest_positive() -> Self {
                    <$t>::MIN_POSITIVE
                }
            }
        )*
    };
}

impl_real!(f32, f64);

/// Characteristics of the floating point type, fixed for the life of a solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineConstants<T: Real> {
    /// Floating point radix.
    pub base: T,
    /// Maximum relative representation error.
    pub eta: T,
    /// Largest finite value.
    pub infinity: T,
    /// Smallest positive normal value.
    pub smalno: T,
}

impl<T: Real> MachineConstants<T> {
    /// Reads the constants of `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: T::radix(),
            eta: T::machine_epsilon(),
            infinity: T::largest(),
            smalno: T::smallest_positive(),
        }
    }
}

impl<T: Real> Default for MachineConstants<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Modulus of `re + i·im` without overflow.
#[inline]
pub fn complex_modulus<T: Real>(re: T, im: T) -> T {
    let ar = re.abs();
    let ai = im.abs();

    if ar < ai {
        let ratio = ar / ai;
        ai * (T::one() + ratio * ratio).sqrt()
    } else if ar > ai {
        let ratio = ai / ar;
        ar * (T::one() + ratio * ratio).sqrt()
    } else {
        ar * T::lit(std::f64::consts::SQRT_2)
    }
}

/// Complex division `(ar + i·ai) / (br + i·bi)` without overflow.
///
/// Division by zero yields `(largest, largest)`.
#[inline]
pub fn complex_divide<T: Real>(ar: T, ai: T, br: T, bi: T) -> (T, T) {
    if br == T::zero() && bi == T::zero() {
        return (T::largest(), T::largest());
    }

    if br.abs() < bi.abs() {
        let r = br / bi;
        let d = bi + r * br;
        ((ar * r + ai) / d, (ai * r - ar) / d)
    } else {
        let r = bi / br;
        let d = br + r * bi;
        ((ar + ai * r) / d, (ai - ar * r) / d)
    }
}

/// [`complex_divide`] for [`Complex`] values.
#[inline]
pub fn divide<T: Real>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    let (re, im) = complex_divide(a.re, a.im, b.re, b.im);
    Complex::new(re, im)
}
