//! Drive and motor speed arguments.
//!
//! All drive commands carry two signed 16-bit values. Velocities are in
//! mm/s, radii in mm, PWM values in raw duty counts.

/// Radius that drives straight. `-32768` is accepted as well.
pub const STRAIGHT: i16 = i16::MAX;
/// Alternate straight-drive radius (`0x8000`).
pub const STRAIGHT_ALT: i16 = i16::MIN;
/// Radius that turns in place clockwise.
pub const TURN_CLOCKWISE: i16 = -1;
/// Radius that turns in place counter-clockwise.
pub const TURN_COUNTER_CLOCKWISE: i16 = 1;

/// Average wheel velocity and turning radius for the Drive command (137).
///
/// A positive radius turns left, a negative radius turns right, a negative
/// velocity drives backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Drive {
    pub velocity: i16,
    pub radius: i16,
}

impl Drive {
    pub const fn new(velocity: i16, radius: i16) -> Self {
        Drive { velocity, radius }
    }

    pub const fn straight(velocity: i16) -> Self {
        Drive::new(velocity, STRAIGHT)
    }

    pub const fn stop() -> Self {
        Drive::straight(0)
    }

    pub const fn is_straight(&self) -> bool {
        self.radius == STRAIGHT || self.radius == STRAIGHT_ALT
    }
}

/// Per-wheel velocities for the DriveDirect command (145).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DriveDirect {
    pub right: i16,
    pub left: i16,
}

impl DriveDirect {
    pub const fn new(right: i16, left: i16) -> Self {
        DriveDirect { right, left }
    }
}

/// Per-wheel PWM for the DrivePWM command (146).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DrivePwm {
    pub right: i16,
    pub left: i16,
}

impl DrivePwm {
    pub const fn new(right: i16, left: i16) -> Self {
        DrivePwm { right, left }
    }
}

/// Cleaning motor duty cycles for the PWMMotors command (144).
///
/// Brush duty is signed (negative reverses the brush); the vacuum only
/// runs forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PwmMotors {
    pub main_brush: i8,
    pub side_brush: i8,
    pub vacuum: u8,
}

impl PwmMotors {
    pub const fn new(main_brush: i8, side_brush: i8, vacuum: u8) -> Self {
        PwmMotors {
            main_brush,
            side_brush,
            vacuum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_straight_sentinels() {
        assert!(Drive::straight(200).is_straight());
        assert!(Drive::new(200, STRAIGHT_ALT).is_straight());
        assert!(!Drive::new(200, 2000).is_straight());
        assert_eq!(Drive::stop(), Drive::new(0, 32767));
    }
}
