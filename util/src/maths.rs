//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Shift `a1` by a whole turn so that it lies within pi of `a2`.
///
/// The returned angle is congruent to `a1` modulo 2pi and satisfies
/// `|result - a2| <= pi`. Use this before differencing two angles which may
/// sit on opposite sides of the +/-pi wrap boundary, where the naive
/// difference would be spuriously large.
pub fn denormalize_angle<T>(a1: T, a2: T) -> T
where
    T: Float
{
    let pi_t = T::from(std::f64::consts::PI).unwrap();
    let tau_t = T::from(std::f64::consts::TAU).unwrap();

    if (a2 - a1).abs() > pi_t {
        if a2 < a1 {
            return a1 - tau_t;
        }
        else {
            return a1 + tau_t;
        }
    }

    a1
}

#[cfg(test)]
mod test {
    use super::*;

    const PI: f64 = std::f64::consts::PI;
    const TAU: f64 = std::f64::consts::TAU;

    #[test]
    fn test_denormalize_angle() {
        // Angles already within pi of each other are unchanged
        assert_eq!(denormalize_angle(1f64, 2f64), 1f64);
        assert_eq!(denormalize_angle(-1f64, 1f64), -1f64);
        assert_eq!(denormalize_angle(0f64, PI), 0f64);

        // Angles on opposite sides of the wrap boundary are shifted by a
        // whole turn towards the reference
        assert_eq!(denormalize_angle(3f64, -3f64), 3f64 - TAU);
        assert_eq!(denormalize_angle(-3f64, 3f64), -3f64 + TAU);
    }

    #[test]
    fn test_denormalize_angle_props() {
        // Result is within pi of the reference and congruent to the input
        // modulo 2pi
        for i in -6..=6 {
            for j in -6..=6 {
                let a1 = (i as f64) * 0.5;
                let a2 = (j as f64) * 0.5;
                let r = denormalize_angle(a1, a2);

                assert!((r - a2).abs() <= PI + 1e-12);
                assert!(((r - a1) / TAU - ((r - a1) / TAU).round()).abs() < 1e-12);
            }
        }
    }
}
