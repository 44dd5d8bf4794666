//! Decoding raw network output channels into grasp maps.

use grasp_types::{angle, GraspMap, GraspMaps, OutputMaps};
use serde::{Deserialize, Serialize};

/// Denormalization factor from the width channel to pixels.
///
/// The dataset normalizes labeled gripper widths by this constant, so the
/// decoder multiplies it back in.
pub const WIDTH_SCALE: f32 = 150.0;

/// Normalized 5-tap Gaussian, `[1, 4, 6, 4, 1] / 16`.
const GAUSSIAN_TAPS: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Configuration for [`decode`].
///
/// # Example
///
/// ```
/// use grasp_training::DecodeConfig;
///
/// let config = DecodeConfig::default();
/// assert_eq!(config.smooth_passes, 1);
/// assert!((config.width_scale - 150.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Number of Gaussian smoothing passes over the position map.
    ///
    /// 0 disables smoothing. One pass suppresses single-pixel speckle before
    /// peak extraction.
    pub smooth_passes: usize,

    /// Width denormalization factor, pixels per unit of raw width output.
    pub width_scale: f32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            smooth_passes: 1,
            width_scale: WIDTH_SCALE,
        }
    }
}

impl DecodeConfig {
    /// Sets the number of smoothing passes.
    #[must_use]
    pub const fn with_smooth_passes(mut self, passes: usize) -> Self {
        self.smooth_passes = passes;
        self
    }

    /// Sets the width denormalization factor.
    #[must_use]
    pub const fn with_width_scale(mut self, scale: f32) -> Self {
        self.width_scale = scale;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width_scale > 0.0 && self.width_scale.is_finite()
    }
}

/// Decodes raw output channels into position, angle, and width maps.
///
/// Pure function over a fixed-shape [`OutputMaps`] set:
///
/// - `angle[i,j] = atan2(sin_raw, cos_raw) / 2` — the channels encode the
///   doubled grasp angle, so halving lands orientations in `(−π/2, π/2]`.
/// - `width[i,j] = width_raw * width_scale`.
/// - `position` = the raw confidence map, run through
///   `config.smooth_passes` rounds of a separable 5-tap Gaussian. Smoothing
///   never changes the map shape.
#[must_use]
pub fn decode(raw: &OutputMaps, config: &DecodeConfig) -> GraspMaps {
    let (rows, cols) = raw.shape();

    let angle_map = GraspMap::from_fn(rows, cols, |r, c| {
        angle::decode_doubled(raw.cos().get(r, c), raw.sin().get(r, c))
    });

    let width_map =
        GraspMap::from_fn(rows, cols, |r, c| raw.width().get(r, c) * config.width_scale);

    let mut position = raw.pos().clone();
    for _ in 0..config.smooth_passes {
        position = gaussian_smooth(&position);
    }

    GraspMaps::new(position, angle_map, width_map)
}

/// One pass of a separable 5-tap Gaussian with clamped borders.
#[allow(clippy::cast_possible_wrap)]
fn gaussian_smooth(map: &GraspMap) -> GraspMap {
    let (rows, cols) = map.shape();
    if rows == 0 || cols == 0 {
        return map.clone();
    }

    let radius = GAUSSIAN_TAPS.len() as isize / 2;

    // Horizontal pass
    let horizontal = GraspMap::from_fn(rows, cols, |r, c| {
        let mut acc = 0.0;
        for (i, tap) in GAUSSIAN_TAPS.iter().enumerate() {
            let offset = i as isize - radius;
            let sample = (c as isize + offset).clamp(0, cols as isize - 1);
            #[allow(clippy::cast_sign_loss)]
            let sample = sample as usize;
            acc += tap * map.get(r, sample);
        }
        acc
    });

    // Vertical pass
    GraspMap::from_fn(rows, cols, |r, c| {
        let mut acc = 0.0;
        for (i, tap) in GAUSSIAN_TAPS.iter().enumerate() {
            let offset = i as isize - radius;
            let sample = (r as isize + offset).clamp(0, rows as isize - 1);
            #[allow(clippy::cast_sign_loss)]
            let sample = sample as usize;
            acc += tap * horizontal.get(sample, c);
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_types::angle::{angular_difference, encode_doubled};
    use std::f32::consts::PI;

    fn raw_maps(rows: usize, cols: usize, theta: f32, width: f32) -> OutputMaps {
        let (cos, sin) = encode_doubled(theta);
        OutputMaps::new(
            GraspMap::zeros(rows, cols),
            GraspMap::filled(rows, cols, cos),
            GraspMap::filled(rows, cols, sin),
            GraspMap::filled(rows, cols, width),
        )
    }

    #[test]
    fn config_default_valid() {
        let config = DecodeConfig::default();
        assert!(config.is_valid());
    }

    #[test]
    fn config_builder() {
        let config = DecodeConfig::default()
            .with_smooth_passes(0)
            .with_width_scale(100.0);
        assert_eq!(config.smooth_passes, 0);
        assert!((config.width_scale - 100.0).abs() < 1e-6);
    }

    #[test]
    fn decode_preserves_shape() {
        let raw = raw_maps(6, 9, 0.3, 0.2);
        let maps = decode(&raw, &DecodeConfig::default());
        assert_eq!(maps.shape(), (6, 9));
    }

    #[test]
    fn decode_recovers_angle_mod_pi() {
        for i in 0..16 {
            #[allow(clippy::cast_precision_loss)]
            let theta = -PI + (i as f32) * (2.0 * PI / 16.0);
            let raw = raw_maps(4, 4, theta, 0.1);
            let maps = decode(&raw, &DecodeConfig::default());
            assert!(
                angular_difference(maps.angle().get(2, 2), theta) < 1e-6,
                "angle not recovered for theta = {theta}"
            );
        }
    }

    #[test]
    fn decode_angle_at_zero_channels_is_zero() {
        let raw = OutputMaps::new(
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 4),
        );
        let maps = decode(&raw, &DecodeConfig::default());
        assert!(maps.angle().get(0, 0).abs() < 1e-6);
    }

    #[test]
    fn decode_scales_width() {
        let raw = raw_maps(4, 4, 0.0, 0.3);
        let maps = decode(&raw, &DecodeConfig::default());
        assert!((maps.width().get(1, 1) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn decode_without_smoothing_keeps_position_raw() {
        let mut pos = GraspMap::zeros(5, 5);
        pos.set(2, 2, 1.0);
        let raw = OutputMaps::new(
            pos.clone(),
            GraspMap::zeros(5, 5),
            GraspMap::zeros(5, 5),
            GraspMap::zeros(5, 5),
        );

        let maps = decode(&raw, &DecodeConfig::default().with_smooth_passes(0));
        assert_eq!(maps.position(), &pos);
    }

    #[test]
    fn smoothing_spreads_a_peak_and_keeps_its_location() {
        let mut pos = GraspMap::zeros(7, 7);
        pos.set(3, 3, 1.0);
        let raw = OutputMaps::new(
            pos,
            GraspMap::zeros(7, 7),
            GraspMap::zeros(7, 7),
            GraspMap::zeros(7, 7),
        );

        let maps = decode(&raw, &DecodeConfig::default());
        let position = maps.position();

        // Peak stays put but is attenuated, and mass leaks to neighbors.
        assert_eq!(position.max_position(), Some((3, 3)));
        assert!(position.get(3, 3) < 1.0);
        assert!(position.get(3, 4) > 0.0);
        assert!(position.get(2, 3) > 0.0);
        // A distant corner stays untouched.
        assert!(position.get(0, 0).abs() < 1e-6);
    }

    #[test]
    fn smoothing_preserves_constant_maps() {
        // The kernel is normalized, so a flat map passes through unchanged
        // (clamped borders included).
        let raw = OutputMaps::new(
            GraspMap::filled(6, 6, 0.4),
            GraspMap::zeros(6, 6),
            GraspMap::zeros(6, 6),
            GraspMap::zeros(6, 6),
        );
        let maps = decode(&raw, &DecodeConfig::default());
        for r in 0..6 {
            for c in 0..6 {
                assert!((maps.position().get(r, c) - 0.4).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn config_serialization() {
        let config = DecodeConfig::default().with_smooth_passes(2);
        let json = serde_json::to_string(&config);
        assert!(json.is_ok());

        let parsed: Result<DecodeConfig, _> = serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), config);
    }
}
