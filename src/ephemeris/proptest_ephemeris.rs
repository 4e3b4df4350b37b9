//! Property-based tests for ephemeris computations using proptest.
//!
//! These tests verify that Chebyshev evaluation and segment chaining keep
//! their expected properties across a wide range of inputs.

use proptest::prelude::*;

use super::spk::chebyshev3;
use super::{EphemerisProvider, Ephemeris, Target};
use crate::test_utils::spk::{SegmentSpec, SpkBuilder};
use crate::types::Instant;

/// Reference evaluation: sum c_k T_k(s) with the three-term recurrence.
fn chebyshev_direct(s: f64, c: &[f64]) -> f64 {
    let mut t_prev = 1.0;
    let mut t_curr = s;
    let mut sum = 0.0;
    for (k, &ck) in c.iter().enumerate() {
        let tk = match k {
            0 => 1.0,
            1 => s,
            _ => {
                let t_next = 2.0 * s * t_curr - t_prev;
                t_prev = t_curr;
                t_curr = t_next;
                t_next
            }
        };
        sum += ck * tk;
    }
    sum
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Clenshaw evaluation matches the explicit T_n recurrence on [-1, 1].
    #[test]
    fn prop_clenshaw_matches_recurrence(
        s in -1.0f64..=1.0,
        coefficients in prop::collection::vec(-1.0e6f64..1.0e6, 1..16),
    ) {
        let p = chebyshev3(s, &coefficients, &coefficients, &coefficients);
        let expected = chebyshev_direct(s, &coefficients);
        let scale: f64 = coefficients.iter().map(|c| c.abs()).sum::<f64>().max(1.0);

        prop_assert!(
            (p.x - expected).abs() <= 1e-9 * scale,
            "Clenshaw {} vs direct {} at s={}", p.x, expected, s
        );
        prop_assert_eq!(p.x, p.y);
        prop_assert_eq!(p.y, p.z);
    }

    /// |sum c_k T_k(s)| is bounded by sum |c_k| since |T_k| <= 1 on [-1, 1].
    #[test]
    fn prop_chebyshev_bounded(
        s in -1.0f64..=1.0,
        coefficients in prop::collection::vec(-1.0e3f64..1.0e3, 1..20),
    ) {
        let zeros = vec![0.0; coefficients.len()];
        let p = chebyshev3(s, &coefficients, &zeros, &zeros);
        let bound: f64 = coefficients.iter().map(|c| c.abs()).sum();
        prop_assert!(p.x.abs() <= bound * (1.0 + 1e-12) + 1e-12);
    }

    /// A chained lookup equals the sum of the individual linear segments.
    #[test]
    fn prop_chain_is_additive(
        t in -9.0e8f64..9.0e8,
        a in prop::array::uniform3(-1.0e8f64..1.0e8),
        b in prop::array::uniform3(-1.0e5f64..1.0e5),
        rate in prop::array::uniform3(-50.0f64..50.0),
    ) {
        let bytes = SpkBuilder::new()
            .segment(SegmentSpec::linear(3, 0, a, rate))
            .segment(SegmentSpec::linear(399, 3, b, [0.0; 3]))
            .build();
        let eph = Ephemeris::from_bytes(bytes).unwrap();
        let p = eph.position_km(Target::EARTH, Instant(t)).unwrap();

        for i in 0..3 {
            let expected = a[i] + rate[i] * t + b[i];
            let error = (p[i] - expected).abs();
            let tolerance = 1e-12 * (a[i].abs() + (rate[i] * t).abs() + b[i].abs()) + 1e-6;
            prop_assert!(
                error < tolerance,
                "axis {}: got {} expected {} (error {})", i, p[i], expected, error
            );
        }
    }
}
