//! Complete elliptic integral of the first kind and Jacobi elliptic functions.
//!
//! Everything here takes the *parameter* `m = k²`, not the modulus `k`.
//! Both routines are built on the arithmetic-geometric mean (AGM), which
//! converges quadratically, so a handful of iterations reach full `f64`
//! precision.

use core::f64::consts::FRAC_PI_2;

/// Iteration cap for the AGM loops.
const MAX_ITERATIONS: usize = 16;

/// Below this `m` the functions reduce to their circular limits.
const CIRCULAR_LIMIT: f64 = 1e-12;

/// Values of the three basic Jacobi elliptic functions at one argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jacobi {
    /// `sn(u | m)`.
    pub sn: f64,
    /// `cn(u | m)`.
    pub cn: f64,
    /// `dn(u | m)`.
    pub dn: f64,
}

impl Jacobi {
    /// `cd(u | m) = cn / dn`.
    #[inline]
    pub fn cd(&self) -> f64 {
        self.cn / self.dn
    }
}

/// Complete elliptic integral of the first kind, `K(m)`.
///
/// Defined for `0 <= m < 1`; returns infinity at `m = 1` and NaN outside
/// the domain.
///
/// # Example
///
/// ```rust
/// use pendulum::elliptic::complete_first_kind;
/// use std::f64::consts::FRAC_PI_2;
///
/// assert!((complete_first_kind(0.0) - FRAC_PI_2).abs() < 1e-15);
/// assert!((complete_first_kind(0.5) - 1.854_074_677_301_372).abs() < 1e-12);
/// ```
pub fn complete_first_kind(m: f64) -> f64 {
    if !(0.0..=1.0).contains(&m) {
        return f64::NAN;
    }
    if m == 1.0 {
        return f64::INFINITY;
    }

    let mut a = 1.0_f64;
    let mut b = (1.0 - m).sqrt();
    for _ in 0..MAX_ITERATIONS {
        if (a - b).abs() <= f64::EPSILON * a {
            break;
        }
        (a, b) = (0.5 * (a + b), (a * b).sqrt());
    }
    FRAC_PI_2 / a
}

/// Jacobi elliptic functions `sn`, `cn`, `dn` at `u` for parameter `m`.
///
/// Uses the descending Landen transformation for the amplitude. For `m`
/// at or near 0 the functions are `sin`, `cos`, 1; at or near 1 they are
/// `tanh`, `sech`, `sech`.
///
/// # Example
///
/// ```rust
/// use pendulum::elliptic::jacobi;
///
/// let j = jacobi(1.0, 0.7);
/// assert!((j.sn * j.sn + j.cn * j.cn - 1.0).abs() < 1e-12);
/// assert!((j.dn * j.dn + 0.7 * j.sn * j.sn - 1.0).abs() < 1e-12);
/// ```
pub fn jacobi(u: f64, m: f64) -> Jacobi {
    if m < CIRCULAR_LIMIT {
        let (sn, cn) = u.sin_cos();
        return Jacobi { sn, cn, dn: 1.0 };
    }
    if m > 1.0 - CIRCULAR_LIMIT {
        let sech = 1.0 / u.cosh();
        return Jacobi {
            sn: u.tanh(),
            cn: sech,
            dn: sech,
        };
    }

    let mut a = [0.0_f64; MAX_ITERATIONS + 1];
    let mut c = [0.0_f64; MAX_ITERATIONS + 1];
    a[0] = 1.0;
    c[0] = m.sqrt();
    let mut b = (1.0 - m).sqrt();

    let mut n = 0;
    while n < MAX_ITERATIONS && (c[n] / a[n]).abs() > f64::EPSILON {
        a[n + 1] = 0.5 * (a[n] + b);
        c[n + 1] = 0.5 * (a[n] - b);
        b = (a[n] * b).sqrt();
        n += 1;
    }

    // Walk back up the sequence from the last amplitude.
    let mut phi = f64::from(1_u32 << n) * a[n] * u;
    for i in (1..=n).rev() {
        phi = 0.5 * ((c[i] * phi.sin() / a[i]).asin() + phi);
    }

    // dn stays positive for real u, and the square root avoids the 0/0 of
    // the cn-ratio form at odd multiples of K.
    let (sn, cn) = phi.sin_cos();
    Jacobi {
        sn,
        cn,
        dn: (1.0 - m * sn * sn).sqrt(),
    }
}
