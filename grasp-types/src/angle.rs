//! Angle arithmetic for π-periodic grasp orientations.
//!
//! A parallel-jaw gripper rotated by 180° produces the same grasp, so grasp
//! orientation lives on a half-turn: all comparisons here are modulo π. The
//! network encodes orientation as `(cos 2θ, sin 2θ)` — doubling the angle
//! makes the trigonometric representation continuous across the ±π/2 wrap.

use std::f32::consts::{FRAC_PI_2, PI};

/// Wraps an angle into `[0, π)`.
#[must_use]
pub fn normalize_half_turn(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(PI);
    if wrapped >= PI {
        wrapped - PI
    } else {
        wrapped
    }
}

/// Unsigned angular difference between two orientations, modulo π.
///
/// Treats antipodal orientations as identical: `θ` vs `θ + π` gives 0.
/// The result lies in `[0, π/2]` and is symmetric in its arguments.
#[must_use]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = normalize_half_turn(a - b);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Encodes an orientation into its doubled-angle trigonometric channels.
///
/// Returns `(cos 2θ, sin 2θ)`, the target representation for the network's
/// cos/sin output maps.
#[must_use]
pub fn encode_doubled(theta: f32) -> (f32, f32) {
    ((2.0 * theta).cos(), (2.0 * theta).sin())
}

/// Decodes doubled-angle channels back into an orientation.
///
/// `atan2` of the raw channels recovers `2θ` in `(−π, π]`; halving yields an
/// orientation in `(−π/2, π/2]`. The channels need not be normalized —
/// `atan2` only uses their ratio and signs. `(0, 0)` decodes to 0 by the
/// `atan2` convention.
#[must_use]
pub fn decode_doubled(cos: f32, sin: f32) -> f32 {
    sin.atan2(cos) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    const EPS: f32 = 1e-6;

    #[test]
    fn normalize_wraps_into_half_turn() {
        assert!((normalize_half_turn(0.5) - 0.5).abs() < EPS);
        assert!(normalize_half_turn(PI).abs() < 1e-5);
        assert!((normalize_half_turn(-FRAC_PI_4) - 3.0 * FRAC_PI_4).abs() < EPS);
        assert!(normalize_half_turn(3.0 * PI).abs() < 1e-4);
    }

    #[test]
    fn difference_is_symmetric() {
        let a = 0.25;
        let b = 1.7;
        assert!((angular_difference(a, b) - angular_difference(b, a)).abs() < EPS);
    }

    #[test]
    fn difference_identifies_antipodal_orientations() {
        let theta = 0.4;
        assert!(angular_difference(theta, theta + PI).abs() < 1e-5);
        assert!(angular_difference(theta, theta - PI).abs() < 1e-5);
    }

    #[test]
    fn difference_handles_wrap_at_half_pi() {
        // 1.5 rad and -1.5 rad are only ~0.14 rad apart modulo π.
        let diff = angular_difference(1.5, -1.5);
        assert!((diff - (PI - 3.0)).abs() < 1e-5);
    }

    #[test]
    fn encode_decode_round_trip_mod_pi() {
        for i in 0..32 {
            #[allow(clippy::cast_precision_loss)]
            let theta = -PI + (i as f32) * (2.0 * PI / 32.0);
            let (c, s) = encode_doubled(theta);
            let decoded = decode_doubled(c, s);
            assert!(
                angular_difference(decoded, theta) < EPS,
                "round trip failed for theta = {theta}"
            );
        }
    }

    #[test]
    fn decode_range_is_half_open_half_turn() {
        for i in 0..32 {
            #[allow(clippy::cast_precision_loss)]
            let theta = -PI + (i as f32) * (2.0 * PI / 32.0);
            let (c, s) = encode_doubled(theta);
            let decoded = decode_doubled(c, s);
            assert!(decoded > -FRAC_PI_2 - EPS && decoded <= FRAC_PI_2 + EPS);
        }
    }

    #[test]
    fn decode_at_origin_follows_atan2_convention() {
        assert!(decode_doubled(0.0, 0.0).abs() < EPS);
    }

    #[test]
    fn decode_unnormalized_channels() {
        // Scaling both channels must not change the decoded orientation.
        let theta = 0.3;
        let (c, s) = encode_doubled(theta);
        let decoded = decode_doubled(c * 0.17, s * 0.17);
        assert!(angular_difference(decoded, theta) < EPS);
    }
}
