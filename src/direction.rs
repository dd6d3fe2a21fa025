//! Offsets the vignette centre toward the direction of travel.

use crate::config::EffectConfig;
use crate::constants::PASSTHROUGH_RADIUS;
use nalgebra::Vector3;

/// Horizontal and vertical centre offset
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionalShift {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Compute the centre shift for the current radius.
///
/// Vertical shift follows camera pitch and scales with how closed the
/// vignette is, vanishing at the passthrough radius. Horizontal shift is
/// the signed strafe component of the motion direction. Both are zero
/// when `direction_specific` is off.
#[must_use]
pub fn directional_shift(
    config: &EffectConfig,
    camera_forward: &Vector3<f64>,
    camera_right: &Vector3<f64>,
    motion_direction: &Vector3<f64>,
    radius: f64,
) -> DirectionalShift {
    if !config.direction_specific {
        return DirectionalShift::default();
    }

    // Non-finite basis vectors read as zero
    let forward = camera_forward
        .try_normalize(f64::EPSILON)
        .filter(|forward| forward.iter().all(|v| v.is_finite()))
        .unwrap_or_else(Vector3::zeros);
    let closure = (PASSTHROUGH_RADIUS - radius) / PASSTHROUGH_RADIUS;

    DirectionalShift {
        horizontal: strafe_factor(motion_direction, camera_right) * config.directional_horizontal_strength,
        vertical: forward.z * closure * config.directional_vertical_strength,
    }
}

/// Signed length of `motion` projected onto `right`
fn strafe_factor(motion: &Vector3<f64>, right: &Vector3<f64>) -> f64 {
    let right_sq = right.norm_squared();
    if !right_sq.is_finite() || right_sq <= f64::EPSILON {
        return 0.0;
    }
    let projected = right * (motion.dot(right) / right_sq);
    projected.dot(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> EffectConfig {
        EffectConfig {
            direction_specific: true,
            directional_vertical_strength: 2.0,
            directional_horizontal_strength: 3.0,
            ..EffectConfig::default()
        }
    }

    #[test]
    fn test_disabled_is_zero() {
        let config = EffectConfig::default();
        let forward = Vector3::new(1.0, 0.0, 1.0);
        let shift = directional_shift(&config, &forward, &Vector3::y(), &Vector3::y(), 0.3);
        assert_eq!(shift, DirectionalShift::default());
    }

    #[test]
    fn test_passthrough_radius_has_no_vertical_shift() {
        let forward = Vector3::new(1.0, 0.0, 1.0);
        let shift = directional_shift(&enabled(), &forward, &Vector3::y(), &Vector3::x(), 1.5);
        assert_eq!(shift.vertical, 0.0);
        assert_eq!(shift.horizontal, 0.0);
    }

    #[test]
    fn test_vertical_follows_pitch() {
        // 45 degrees up, normalized forward.z = sqrt(0.5)
        let forward = Vector3::new(1.0, 0.0, 1.0);
        let shift = directional_shift(&enabled(), &forward, &Vector3::y(), &Vector3::zeros(), 0.75);
        let expected = 0.5_f64.sqrt() * 0.5 * 2.0;
        assert!((shift.vertical - expected).abs() < 1e-12);

        let down = Vector3::new(1.0, 0.0, -1.0);
        let shift = directional_shift(&enabled(), &down, &Vector3::y(), &Vector3::zeros(), 0.75);
        assert!((shift.vertical + expected).abs() < 1e-12);
    }

    #[test]
    fn test_strafe_sign() {
        let forward = Vector3::x();
        let right = Vector3::y();
        let shift = directional_shift(&enabled(), &forward, &right, &Vector3::y(), 1.0);
        assert!((shift.horizontal - 3.0).abs() < 1e-12);

        let shift = directional_shift(&enabled(), &forward, &right, &-Vector3::y(), 1.0);
        assert!((shift.horizontal + 3.0).abs() < 1e-12);

        // Diagonal forward-right motion
        let diagonal = Vector3::new(1.0, 1.0, 0.0).normalize();
        let shift = directional_shift(&enabled(), &forward, &right, &diagonal, 1.0);
        assert!((shift.horizontal - 3.0 * 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_basis_is_zero() {
        let nan = Vector3::new(f64::NAN, f64::NAN, f64::NAN);
        let shift = directional_shift(&enabled(), &nan, &nan, &Vector3::y(), 0.3);
        assert_eq!(shift, DirectionalShift::default());

        let infinite = Vector3::new(0.0, f64::INFINITY, 0.0);
        let shift = directional_shift(&enabled(), &Vector3::x(), &infinite, &Vector3::y(), 0.3);
        assert_eq!(shift.horizontal, 0.0);
    }
}
