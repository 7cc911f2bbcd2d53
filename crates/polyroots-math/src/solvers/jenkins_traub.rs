//! Jenkins–Traub root finder for polynomials with complex coefficients.
//!
//! This is the three-stage CPOLY algorithm (ACM TOMS 493):
//!
//! 1. **No shift**: a few H-polynomial steps starting from the derivative,
//!    which accentuate the smaller roots.
//! 2. **Fixed shift**: H-polynomial steps with a shift on a circle whose
//!    radius is a lower bound on the root moduli, until the implied root
//!    estimates agree twice in a row.
//! 3. **Variable shift**: Newton-like refinement of the estimate, stopping
//!    once `|p(s)|` is within a bound on the rounding error of evaluating it.
//!
//! Each converged root is deflated out of the polynomial and the search
//! restarts on the quotient. Up to two passes of nine shifts are tried per
//! root; if all of them fail the roots found so far are returned.

use nalgebra::Complex;

use crate::error::{MathError, MathResult};
use crate::numeric::{complex_divide, complex_modulus, divide, MachineConstants, Real};
use crate::solvers::PolynomialRootFinder;

/// Stage-one steps before each pass.
const NO_SHIFT_STEPS: usize = 5;

/// Major passes with different shift sequences.
const MAJOR_PASSES: usize = 2;

/// Shifts tried per pass.
const SHIFTS_PER_PASS: usize = 9;

/// Stage-two steps per shift, multiplied by the shift number.
const FIXED_SHIFT_STEPS: usize = 10;

/// Stage-three step limit.
const VARIABLE_SHIFT_STEPS: usize = 10;

/// Fixed-shift steps taken into a suspected cluster of zeros.
const CLUSTER_STEPS: usize = 5;

/// Rotation of 94 degrees between successive shifts.
const COS_ROTATION: f64 = -0.069_756_473_744_125_300_776;
const SIN_ROTATION: f64 = -0.997_564_050_259_824_247_613;

/// Jenkins–Traub iterative root finder.
///
/// The solver holds only the machine constants of `T`; all iteration state
/// lives in a workspace created for each call, so a single instance can be
/// shared freely.
///
/// # Example
///
/// ```rust
/// use nalgebra::Complex;
/// use polyroots_math::solvers::JenkinsTraub;
///
/// // x^3 - 1
/// let solver = JenkinsTraub::<f64>::new();
/// let mut roots = vec![Complex::new(0.0, 0.0); 3];
/// let count = solver.find_roots_real(&[1.0, 0.0, 0.0, -1.0], &mut roots).unwrap();
///
/// assert_eq!(count, 3);
/// for z in &roots {
///     assert!(((z * z * z) - 1.0).norm() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JenkinsTraub<T: Real> {
    constants: MachineConstants<T>,
}

impl<T: Real> Default for JenkinsTraub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> JenkinsTraub<T> {
    /// Creates a solver for the scalar type `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constants: MachineConstants::new(),
        }
    }

    /// The machine constants used for scaling and convergence tests.
    #[must_use]
    pub fn constants(&self) -> &MachineConstants<T> {
        &self.constants
    }

    /// Finds the roots of a polynomial with complex coefficients.
    ///
    /// # Arguments
    ///
    /// * `coefficients` - Highest degree first; the leading one must be nonzero
    /// * `roots` - Output buffer with room for at least `degree` roots
    ///
    /// # Returns
    ///
    /// The number of roots written to the front of `roots`. It equals the
    /// degree unless both major passes failed for some root, in which case
    /// the roots found before the failure are returned.
    ///
    /// # Errors
    ///
    /// Degree zero, an empty or undersized buffer, a zero leading
    /// coefficient, or a non-finite coefficient.
    pub fn find_roots(
        &self,
        coefficients: &[Complex<T>],
        roots: &mut [Complex<T>],
    ) -> MathResult<usize> {
        let degree = validate_shape(coefficients.len(), roots.len())?;

        if let Some(index) = coefficients
            .iter()
            .position(|c| !(c.re.is_finite() && c.im.is_finite()))
        {
            return Err(MathError::non_finite(index));
        }

        if coefficients[0].re == T::zero() && coefficients[0].im == T::zero() {
            return Err(MathError::ZeroLeadingCoefficient);
        }

        let mut workspace = Workspace::new(self.constants, degree);
        Ok(workspace.solve(coefficients, &mut roots[..degree]))
    }

    /// Finds the roots of a polynomial with real coefficients.
    ///
    /// The coefficients are promoted to complex; see [`Self::find_roots`].
    pub fn find_roots_real(&self, coefficients: &[T], roots: &mut [Complex<T>]) -> MathResult<usize> {
        validate_shape(coefficients.len(), roots.len())?;

        let promoted: Vec<Complex<T>> = coefficients
            .iter()
            .map(|&c| Complex::new(c, T::zero()))
            .collect();

        self.find_roots(&promoted, roots)
    }

    /// Convenience form of [`Self::find_roots`] that allocates the output
    /// and returns only the roots that were found.
    pub fn roots(&self, coefficients: &[Complex<T>]) -> MathResult<Vec<Complex<T>>> {
        let degree = coefficients.len().saturating_sub(1);
        let mut roots = vec![Complex::new(T::zero(), T::zero()); degree];
        let count = self.find_roots(coefficients, &mut roots)?;
        roots.truncate(count);
        Ok(roots)
    }
}

impl<T: Real> PolynomialRootFinder<T> for JenkinsTraub<T> {
    fn find_roots(
        &self,
        coefficients: &[Complex<T>],
        roots: &mut [Complex<T>],
    ) -> MathResult<usize> {
        Self::find_roots(self, coefficients, roots)
    }

    fn name(&self) -> &'static str {
        "Jenkins-Traub"
    }
}

/// Checks coefficient and buffer sizes, returning the degree.
fn validate_shape(coefficient_count: usize, capacity: usize) -> MathResult<usize> {
    match coefficient_count {
        0 => Err(MathError::EmptyCoefficients),
        1 => Err(MathError::DegreeZero),
        n if capacity < n - 1 => Err(MathError::undersized_output(n - 1, capacity)),
        n => Ok(n - 1),
    }
}

/// Evaluates `p` at `s` by the Horner recurrence over the first `nn + 1`
/// coefficients, storing the partial sums in `q` and returning the value.
fn horner<T: Real>(
    nn: usize,
    sr: T,
    si: T,
    pr: &[T],
    pi: &[T],
    qr: &mut [T],
    qi: &mut [T],
) -> (T, T) {
    qr[0] = pr[0];
    qi[0] = pi[0];
    let mut pvr = qr[0];
    let mut pvi = qi[0];

    for i in 1..=nn {
        let t = pvr * sr - pvi * si + pr[i];
        pvi = pvr * si + pvi * sr + pi[i];
        pvr = t;
        qr[i] = pvr;
        qi[i] = pvi;
    }

    (pvr, pvi)
}

/// Scratch state for a single root-finding call.
///
/// Arrays are indexed highest degree first and sized for the input
/// degree; only the first `n + 1` entries are live as the polynomial is
/// deflated.
struct Workspace<T: Real> {
    constants: MachineConstants<T>,
    /// Current degree of the working polynomial.
    n: usize,
    /// Working polynomial.
    pr: Vec<T>,
    pi: Vec<T>,
    /// H polynomial (degree n - 1).
    hr: Vec<T>,
    hi: Vec<T>,
    /// Horner partial sums of p and h at the shift.
    qpr: Vec<T>,
    qpi: Vec<T>,
    qhr: Vec<T>,
    qhi: Vec<T>,
    /// Saved H polynomial, also used as scratch for moduli.
    shr: Vec<T>,
    shi: Vec<T>,
    /// Current shift s.
    sr: T,
    si: T,
    /// Step t = -p(s) / h(s).
    tr: T,
    ti: T,
    /// p(s).
    pvr: T,
    pvi: T,
    /// Direction of the next shift on the unit circle.
    xx: T,
    yy: T,
    /// Error bounds on complex addition and multiplication.
    are: T,
    mre: T,
}

impl<T: Real> Workspace<T> {
    fn new(constants: MachineConstants<T>, degree: usize) -> Self {
        let size = degree + 1;
        let zero = T::zero();
        let xx = T::lit(0.5 * std::f64::consts::SQRT_2);

        Self {
            constants,
            n: degree,
            pr: vec![zero; size],
            pi: vec![zero; size],
            hr: vec![zero; size],
            hi: vec![zero; size],
            qpr: vec![zero; size],
            qpi: vec![zero; size],
            qhr: vec![zero; size],
            qhi: vec![zero; size],
            shr: vec![zero; size],
            shi: vec![zero; size],
            sr: zero,
            si: zero,
            tr: zero,
            ti: zero,
            pvr: zero,
            pvi: zero,
            xx,
            yy: -xx,
            are: constants.eta,
            mre: T::lit(2.0 * std::f64::consts::SQRT_2) * constants.eta,
        }
    }

    /// Runs the outer loop; `roots` has exactly `degree` slots.
    fn solve(&mut self, coefficients: &[Complex<T>], roots: &mut [Complex<T>]) -> usize {
        let degree = coefficients.len() - 1;
        let zero = T::zero();
        let mut found = 0;

        // zeros at the origin
        while coefficients[self.n].re == zero && coefficients[self.n].im == zero {
            roots[found] = Complex::new(zero, zero);
            found += 1;
            self.n -= 1;
        }

        if found > 0 {
            log::debug!("extracted {} root(s) at the origin", found);
        }

        if self.n == 0 {
            return found;
        }

        for i in 0..=self.n {
            self.pr[i] = coefficients[i].re;
            self.pi[i] = coefficients[i].im;
            self.shr[i] = complex_modulus(self.pr[i], self.pi[i]);
        }

        let factor = self.scale_factor();
        if factor != T::one() {
            log::debug!("scaling coefficients by {}", factor);
            for i in 0..=self.n {
                self.pr[i] *= factor;
                self.pi[i] *= factor;
            }
        }

        while self.n > 1 {
            for i in 0..=self.n {
                self.shr[i] = complex_modulus(self.pr[i], self.pi[i]);
            }
            let bound = self.cauchy_lower_bound();

            match self.search_root(bound) {
                Some((zr, zi)) => {
                    log::trace!("root {} converged at ({}, {})", found, zr, zi);
                    roots[found] = Complex::new(zr, zi);
                    found += 1;
                    self.deflate();
                }
                None => {
                    log::warn!(
                        "Jenkins-Traub failed to converge after {} passes: found {} of {} roots",
                        MAJOR_PASSES,
                        found,
                        degree
                    );
                    return found;
                }
            }
        }

        roots[found] = divide(
            Complex::new(-self.pr[1], -self.pi[1]),
            Complex::new(self.pr[0], self.pi[0]),
        );
        found + 1
    }

    /// Two major passes of shifted searches for one root.
    fn search_root(&mut self, bound: T) -> Option<(T, T)> {
        let cosr = T::lit(COS_ROTATION);
        let sinr = T::lit(SIN_ROTATION);

        for _ in 0..MAJOR_PASSES {
            self.no_shift(NO_SHIFT_STEPS);

            for shift in 1..=SHIFTS_PER_PASS {
                let xxx = cosr * self.xx - sinr * self.yy;
                self.yy = sinr * self.xx + cosr * self.yy;
                self.xx = xxx;
                self.sr = bound * self.xx;
                self.si = bound * self.yy;

                if let Some(zero) = self.fixed_shift(FIXED_SHIFT_STEPS * shift) {
                    return Some(zero);
                }
            }
        }

        None
    }

    /// Replaces p by the quotient p(z) / (z - s) held in qp.
    fn deflate(&mut self) {
        self.n -= 1;
        let live = self.n + 1;
        self.pr[..live].copy_from_slice(&self.qpr[..live]);
        self.pi[..live].copy_from_slice(&self.qpi[..live]);
    }

    /// Power of the radix that keeps the coefficient moduli (in `shr`) away
    /// from overflow and undetected underflow.
    fn scale_factor(&self) -> T {
        let MachineConstants {
            base,
            eta,
            infinity,
            smalno,
        } = self.constants;
        let hi = infinity.sqrt();
        let lo = smalno / eta;
        let mut max = T::zero();
        let mut min = infinity;

        for &x in &self.shr[..=self.n] {
            if x > max {
                max = x;
            }
            if x != T::zero() && x < min {
                min = x;
            }
        }

        if min >= lo && max <= hi {
            return T::one();
        }

        let x = lo / min;
        let sc = if x <= T::one() {
            T::one() / (max.sqrt() * min.sqrt())
        } else if infinity / x > max {
            // scale up only when the largest modulus stays finite
            x
        } else {
            T::one()
        };

        let exponent = (sc.ln() / base.ln() + T::lit(0.5)).trunc();
        base.powf(exponent)
    }

    /// Lower bound on the moduli of the zeros, from the moduli in `shr`.
    ///
    /// Newton's method on `|p0| x^n + ... + |p(n-1)| x - |pn|`, whose single
    /// positive root bounds the root moduli from below.
    fn cauchy_lower_bound(&mut self) -> T {
        let n = self.n;
        let nm1 = n - 1;
        let pt = &mut self.shr;
        let q = &mut self.shi;

        pt[n] = -pt[n];

        // upper estimate of the bound
        let mut x = (((-pt[n]).ln() - pt[0].ln()) / T::lit(n as f64)).exp();
        if pt[nm1] != T::zero() {
            // Newton step at the origin is better, use it
            let xm = -pt[n] / pt[nm1];
            if xm < x {
                x = xm;
            }
        }

        // chop the interval (0, x) until f <= 0
        loop {
            let xm = x * T::lit(0.1);
            let mut f = pt[0];
            for &p in &pt[1..=n] {
                f = f * xm + p;
            }
            if f <= T::zero() {
                break;
            }
            x = xm;
        }

        // Newton iteration until x converges to two decimal places
        let mut dx = x;
        while (dx / x).abs() > T::lit(0.005) {
            q[0] = pt[0];
            for i in 1..=n {
                q[i] = q[i - 1] * x + pt[i];
            }
            let f = q[n];
            let mut df = q[0];
            for &qi in &q[1..n] {
                df = df * x + qi;
            }
            dx = f / df;
            x -= dx;
        }

        x
    }

    /// Stage one: the scaled derivative as initial H, then `l1` unshifted steps.
    fn no_shift(&mut self, l1: usize) {
        let n = self.n;
        let nm1 = n - 1;
        let degree = T::lit(n as f64);

        for i in 0..n {
            let xni = T::lit((n - i) as f64);
            self.hr[i] = xni * self.pr[i] / degree;
            self.hi[i] = xni * self.pi[i] / degree;
        }

        let threshold = self.constants.eta * T::lit(10.0);
        for _ in 0..l1 {
            if complex_modulus(self.hr[nm1], self.hi[nm1])
                > threshold * complex_modulus(self.pr[nm1], self.pi[nm1])
            {
                let (tr, ti) =
                    complex_divide(-self.pr[n], -self.pi[n], self.hr[nm1], self.hi[nm1]);
                self.tr = tr;
                self.ti = ti;
                for j in (1..n).rev() {
                    let t1 = self.hr[j - 1];
                    let t2 = self.hi[j - 1];
                    self.hr[j] = tr * t1 - ti * t2 + self.pr[j];
                    self.hi[j] = tr * t2 + ti * t1 + self.pi[j];
                }
                self.hr[0] = self.pr[0];
                self.hi[0] = self.pi[0];
            } else {
                // constant term of h is essentially zero, shift its coefficients
                for j in (1..n).rev() {
                    self.hr[j] = self.hr[j - 1];
                    self.hi[j] = self.hi[j - 1];
                }
                self.hr[0] = T::zero();
                self.hi[0] = T::zero();
            }
        }
    }

    /// Stage two: up to `l2` fixed-shift steps, handing over to stage three
    /// once the root estimate passes the weak convergence test twice in a row.
    fn fixed_shift(&mut self, l2: usize) -> Option<(T, T)> {
        let n = self.n;
        let half = T::lit(0.5);

        self.evaluate_p();
        let mut h_near_zero = self.calc_t();
        let mut test = true;
        let mut passed = false;
        let mut z = (self.sr + self.tr, self.si + self.ti);

        for j in 1..=l2 {
            let otr = self.tr;
            let oti = self.ti;

            self.next_h(h_near_zero);
            h_near_zero = self.calc_t();
            z = (self.sr + self.tr, self.si + self.ti);

            // no test while h(s) vanishes, after a failed stage three, or on the last step
            if h_near_zero || !test || j == l2 {
                continue;
            }

            if complex_modulus(self.tr - otr, self.ti - oti) >= half * complex_modulus(z.0, z.1) {
                passed = false;
                continue;
            }

            if !passed {
                passed = true;
                continue;
            }

            // passed twice: save h and s, then try stage three
            self.shr[..n].copy_from_slice(&self.hr[..n]);
            self.shi[..n].copy_from_slice(&self.hi[..n]);
            let saved_sr = self.sr;
            let saved_si = self.si;

            if let Some(zero) = self.variable_shift(VARIABLE_SHIFT_STEPS, z) {
                return Some(zero);
            }

            // stage three failed: stop testing and restore h, s, p(s) and t
            test = false;
            self.hr[..n].copy_from_slice(&self.shr[..n]);
            self.hi[..n].copy_from_slice(&self.shi[..n]);
            self.sr = saved_sr;
            self.si = saved_si;
            self.evaluate_p();
            h_near_zero = self.calc_t();
        }

        // last chance with the final H polynomial of stage two
        self.variable_shift(VARIABLE_SHIFT_STEPS, z)
    }

    /// Stage three: variable-shift iteration from `z` for at most `l3` steps.
    fn variable_shift(&mut self, l3: usize, z: (T, T)) -> Option<(T, T)> {
        let MachineConstants { eta, infinity, .. } = self.constants;
        let mut omp = T::zero();
        let mut relstp = T::zero();
        let mut cluster_tried = false;

        self.sr = z.0;
        self.si = z.1;

        for i in 1..=l3 {
            // evaluate p at s and test for convergence
            self.evaluate_p();
            let mp = complex_modulus(self.pvr, self.pvi);
            let ms = complex_modulus(self.sr, self.si);
            if mp <= T::lit(20.0) * self.error_bound(ms, mp) {
                return Some((self.sr, self.si));
            }

            let mut perturbed = false;
            if i != 1 {
                if !(cluster_tried || mp < omp || relstp >= T::lit(0.05)) {
                    // stalled, probably a cluster of zeros: take fixed-shift
                    // steps into the cluster to make one zero dominate
                    let tp = if relstp < eta { eta } else { relstp };
                    cluster_tried = true;

                    let r1 = tp.sqrt();
                    let r2 = self.sr * (T::one() + r1) - self.si * r1;
                    self.si = self.sr * r1 + self.si * (T::one() + r1);
                    self.sr = r2;

                    self.evaluate_p();
                    for _ in 0..CLUSTER_STEPS {
                        let h_near_zero = self.calc_t();
                        self.next_h(h_near_zero);
                    }

                    omp = infinity;
                    perturbed = true;
                } else if mp * T::lit(0.1) > omp {
                    // polynomial value increased significantly
                    return None;
                }
            }

            if !perturbed {
                omp = mp;
            }

            // next iterate
            let h_near_zero = self.calc_t();
            self.next_h(h_near_zero);
            let h_near_zero = self.calc_t();
            if !h_near_zero {
                relstp = complex_modulus(self.tr, self.ti) / complex_modulus(self.sr, self.si);
                self.sr += self.tr;
                self.si += self.ti;
            }
        }

        None
    }

    /// Evaluates p at s into pv, with partial sums in qp.
    fn evaluate_p(&mut self) {
        let (pvr, pvi) = horner(
            self.n,
            self.sr,
            self.si,
            &self.pr,
            &self.pi,
            &mut self.qpr,
            &mut self.qpi,
        );
        self.pvr = pvr;
        self.pvi = pvi;
    }

    /// Computes t = -p(s) / h(s). Returns true if h(s) is essentially zero,
    /// in which case t is set to zero.
    fn calc_t(&mut self) -> bool {
        let nm1 = self.n - 1;
        let (hvr, hvi) = horner(
            nm1,
            self.sr,
            self.si,
            &self.hr,
            &self.hi,
            &mut self.qhr,
            &mut self.qhi,
        );

        let near_zero = complex_modulus(hvr, hvi)
            <= self.are * T::lit(10.0) * complex_modulus(self.hr[nm1], self.hi[nm1]);

        if near_zero {
            self.tr = T::zero();
            self.ti = T::zero();
        } else {
            let (tr, ti) = complex_divide(-self.pvr, -self.pvi, hvr, hvi);
            self.tr = tr;
            self.ti = ti;
        }

        near_zero
    }

    /// Computes the next shifted H polynomial.
    fn next_h(&mut self, h_near_zero: bool) {
        let n = self.n;

        if h_near_zero {
            // h(s) is zero: replace h with qh
            for j in 1..n {
                self.hr[j] = self.qhr[j - 1];
                self.hi[j] = self.qhi[j - 1];
            }
            self.hr[0] = T::zero();
            self.hi[0] = T::zero();
        } else {
            for j in 1..n {
                let t1 = self.qhr[j - 1];
                let t2 = self.qhi[j - 1];
                self.hr[j] = self.tr * t1 - self.ti * t2 + self.qpr[j];
                self.hi[j] = self.tr * t2 + self.ti * t1 + self.qpi[j];
            }
            self.hr[0] = self.qpr[0];
            self.hi[0] = self.qpi[0];
        }
    }

    /// Bound on the rounding error of the Horner evaluation whose partial
    /// sums are in qp, at a point of modulus `ms` where `|p| = mp`.
    fn error_bound(&self, ms: T, mp: T) -> T {
        let are = self.are;
        let mre = self.mre;
        let mut e = complex_modulus(self.qpr[0], self.qpi[0]) * mre / (are + mre);

        for i in 0..=self.n {
            e = e * ms + complex_modulus(self.qpr[i], self.qpi[i]);
        }

        e * (are + mre) - mp * mre
    }
}
