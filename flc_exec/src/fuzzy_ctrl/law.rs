//! Fuzzy law functions
//!
//! Pure functions making up the controller's inference law. The active
//! control path uses only [`bound`] and [`phi`]; the interval type-2
//! membership functions [`phi1`], [`phi2`], [`phi3`] and the blending
//! weights [`omega12`], [`omega23`] are kept on the public surface for
//! extended inference schemes but are not wired into the cyclic processing.
//!
//! The membership and weighting functions are exact rational expressions.
//! Gain/sigma combinations which cancel a denominator produce infinities or
//! NaNs; this is a known fragility of the formulas and is deliberately not
//! hardened here.

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Clamp a value to the unit interval [-1, 1].
pub fn bound(n: f64) -> f64 {
    if n <= -1.0 {
        -1.0
    }
    else if n >= 1.0 {
        1.0
    }
    else {
        n
    }
}

/// The sliding-mode fuzzy combination rule.
///
/// Combines the two saturated error signals into a single bounded corrective
/// signal. Symmetric in its arguments, and an identity when either argument
/// is zero.
pub fn phi(sigma1: f64, sigma2: f64) -> f64 {
    sigma1 + sigma2 - (sigma1.abs() * sigma2 + sigma1 * sigma2.abs()) / 2.0
}

/// Membership degree of the combined error signal in the negative region.
pub fn phi1(sigma1: f64, sigma2: f64, alpha1: f64, alpha2: f64) -> f64 {
    let a = alpha1 * alpha2;

    ((a*sigma1*(sigma2 + 1.0))/2.0 - (a*sigma1*sigma2)/2.0 + (a*sigma2*(sigma1 + 1.0))/2.0) /
        ((sigma1 + 1.0)*(sigma2 + 1.0) + a*sigma1*sigma2
            - a*sigma1*(sigma2 + 1.0) - a*sigma2*(sigma1 + 1.0)) +
    ((sigma1*(sigma2 + 1.0))/2.0 - (sigma1*sigma2)/2.0 + (sigma2*(sigma1 + 1.0))/2.0) /
        (sigma1*sigma2 - sigma1*(sigma2 + 1.0) - sigma2*(sigma1 + 1.0)
            + a*(sigma1 + 1.0)*(sigma2 + 1.0))
}

/// Membership degree of the combined error signal in the zero region.
pub fn phi2(sigma1: f64, sigma2: f64, alpha1: f64, alpha2: f64) -> f64 {
    let a = alpha1 * alpha2;

    ((sigma1*(sigma2 + 1.0))/2.0 - (a*sigma2*(sigma1 - 1.0))/2.0) /
        (sigma1*(sigma2 + 1.0) - a*sigma1*sigma2
            + a*sigma2*(sigma1 - 1.0) - a*(sigma1 - 1.0)*(sigma2 + 1.0)) -
    ((sigma2*(sigma1 - 1.0))/2.0 - (a*sigma1*(sigma2 + 1.0))/2.0) /
        (sigma2*(sigma1 - 1.0) - a*sigma1*sigma2
            + a*sigma1*(sigma2 + 1.0) - a*(sigma1 - 1.0)*(sigma2 + 1.0))
}

/// Membership degree of the combined error signal in the positive region.
pub fn phi3(sigma1: f64, sigma2: f64, alpha1: f64, alpha2: f64) -> f64 {
    let a = alpha1 * alpha2;

    - ((a*sigma1*(sigma2 - 1.0))/2.0 - (a*sigma1*sigma2)/2.0 + (a*sigma2*(sigma1 - 1.0))/2.0) /
        ((sigma1 - 1.0)*(sigma2 - 1.0) + a*sigma1*sigma2
            - a*sigma1*(sigma2 - 1.0) - a*sigma2*(sigma1 - 1.0)) -
    ((sigma1*(sigma2 - 1.0))/2.0 - (sigma1*sigma2)/2.0 + (sigma2*(sigma1 - 1.0))/2.0) /
        (sigma1*sigma2 - sigma1*(sigma2 - 1.0) - sigma2*(sigma1 - 1.0)
            + a*(sigma1 - 1.0)*(sigma2 - 1.0))
}

/// Blending weight between the negative and zero regions.
pub fn omega12(sigma1: f64, alpha1: f64, alpha2: f64) -> f64 {
    let a = alpha1 * alpha2;

    if sigma1 <= 0.0 {
        (-a * sigma1) / (sigma1 - a * sigma1 + 1.0)
    }
    else {
        (-sigma1) / (sigma1 + a - a * sigma1)
    }
}

/// Blending weight between the zero and positive regions.
pub fn omega23(sigma1: f64, alpha1: f64, alpha2: f64) -> f64 {
    let a = alpha1 * alpha2;

    if sigma1 <= 0.0 {
        (-sigma1) / (a - sigma1 + a * sigma1)
    }
    else {
        (-a * sigma1) / (a * sigma1 - sigma1 + 1.0)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bound() {
        assert_eq!(bound(0.5), 0.5);
        assert_eq!(bound(-0.5), -0.5);
        assert_eq!(bound(1.0), 1.0);
        assert_eq!(bound(-1.0), -1.0);
        assert_eq!(bound(100.0), 1.0);
        assert_eq!(bound(-100.0), -1.0);

        // Idempotent and always in the unit interval
        for i in -40..=40 {
            let n = (i as f64) * 0.1;
            let b = bound(n);

            assert!(b >= -1.0 && b <= 1.0);
            assert_eq!(bound(b), b);
        }
    }

    #[test]
    fn test_phi_identities() {
        // Symmetric in its arguments
        for i in -4..=4 {
            for j in -4..=4 {
                let a = (i as f64) * 0.25;
                let b = (j as f64) * 0.25;

                assert_eq!(phi(a, b), phi(b, a));
            }
        }

        // Identity when either argument is zero
        for i in -4..=4 {
            let a = (i as f64) * 0.25;

            assert_eq!(phi(a, 0.0), a);
            assert_eq!(phi(0.0, a), a);
        }

        // Saturated corners
        assert_eq!(phi(1.0, 1.0), 1.0);
        assert_eq!(phi(-1.0, -1.0), -1.0);
    }

    #[test]
    fn test_it2_members_at_origin() {
        // With zero error signals all region memberships and blending
        // weights vanish
        assert_eq!(phi1(0.0, 0.0, 0.5, 0.5), 0.0);
        assert_eq!(phi2(0.0, 0.0, 0.5, 0.5), 0.0);
        assert_eq!(phi3(0.0, 0.0, 0.5, 0.5), 0.0);
        assert_eq!(omega12(0.0, 0.5, 0.5), 0.0);
        assert_eq!(omega23(0.0, 0.5, 0.5), 0.0);
    }

    #[test]
    fn test_it2_members_finite_interior() {
        // The members are finite for moderate signals and spreads away from
        // the denominator cancellations
        for &(s1, s2) in [(0.5, 0.25), (-0.5, 0.25), (0.75, -0.5), (-0.25, -0.75)].iter() {
            assert!(phi1(s1, s2, 0.5, 0.5).is_finite());
            assert!(phi2(s1, s2, 0.5, 0.5).is_finite());
            assert!(phi3(s1, s2, 0.5, 0.5).is_finite());
            assert!(omega12(s1, 0.5, 0.5).is_finite());
            assert!(omega23(s1, 0.5, 0.5).is_finite());
        }
    }
}
