//! Flag groups sent as single bitfield bytes.
//!
//! Each type carries its bit table as associated constants. `bits()` packs
//! by those constants, never by field order, so the wire assignment can be
//! checked independently of how the struct is declared.

use crate::frame::pack_bits;
use crate::schedule::Weekdays;

/// Cleaning motor switches for the Motors command (138).
///
/// ```text
/// bit  7..5   4     3     2     1     0
///      n/a   MBD   SBC   MB    V     SB
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Motors {
    pub side_brush: bool,
    pub vacuum: bool,
    pub main_brush: bool,
    /// Run the side brush clockwise instead of counter-clockwise.
    pub side_brush_clockwise: bool,
    /// Run the main brush outward instead of inward.
    pub main_brush_outward: bool,
}

impl Motors {
    pub const SIDE_BRUSH_BIT: u8 = 0;
    pub const VACUUM_BIT: u8 = 1;
    pub const MAIN_BRUSH_BIT: u8 = 2;
    pub const SIDE_BRUSH_CLOCKWISE_BIT: u8 = 3;
    pub const MAIN_BRUSH_OUTWARD_BIT: u8 = 4;

    /// All motors off.
    pub const fn off() -> Self {
        Motors {
            side_brush: false,
            vacuum: false,
            main_brush: false,
            side_brush_clockwise: false,
            main_brush_outward: false,
        }
    }

    /// Brushes and vacuum on, default directions.
    pub const fn cleaning() -> Self {
        Motors {
            side_brush: true,
            vacuum: true,
            main_brush: true,
            side_brush_clockwise: false,
            main_brush_outward: false,
        }
    }

    pub fn bits(&self) -> u8 {
        pack_bits(&[
            (self.side_brush, Self::SIDE_BRUSH_BIT),
            (self.vacuum, Self::VACUUM_BIT),
            (self.main_brush, Self::MAIN_BRUSH_BIT),
            (self.side_brush_clockwise, Self::SIDE_BRUSH_CLOCKWISE_BIT),
            (self.main_brush_outward, Self::MAIN_BRUSH_OUTWARD_BIT),
        ])
    }
}

/// LED state for the LEDs command (139).
///
/// The Clean/Power LED is not a flag: `power_color` runs from green (0) to
/// red (255) and `power_intensity` from off (0) to full (255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Leds {
    pub debris: bool,
    pub spot: bool,
    pub dock: bool,
    pub check_robot: bool,
    pub power_color: u8,
    pub power_intensity: u8,
}

impl Leds {
    pub const DEBRIS_BIT: u8 = 0;
    pub const SPOT_BIT: u8 = 1;
    pub const DOCK_BIT: u8 = 2;
    pub const CHECK_ROBOT_BIT: u8 = 3;

    pub fn bits(&self) -> u8 {
        pack_bits(&[
            (self.debris, Self::DEBRIS_BIT),
            (self.spot, Self::SPOT_BIT),
            (self.dock, Self::DOCK_BIT),
            (self.check_robot, Self::CHECK_ROBOT_BIT),
        ])
    }
}

/// Scheduling panel LEDs for the SchedulingLEDs command (162).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SchedulingLeds {
    /// Day LEDs, sent as their own byte.
    pub weekdays: Weekdays,
    pub schedule: bool,
    pub clock: bool,
    pub am: bool,
    pub pm: bool,
    pub colon: bool,
}

impl SchedulingLeds {
    pub const COLON_BIT: u8 = 0;
    pub const PM_BIT: u8 = 1;
    pub const AM_BIT: u8 = 2;
    pub const CLOCK_BIT: u8 = 3;
    pub const SCHEDULE_BIT: u8 = 4;

    /// The status byte (colon, PM, AM, clock, schedule).
    pub fn bits(&self) -> u8 {
        pack_bits(&[
            (self.colon, Self::COLON_BIT),
            (self.pm, Self::PM_BIT),
            (self.am, Self::AM_BIT),
            (self.clock, Self::CLOCK_BIT),
            (self.schedule, Self::SCHEDULE_BIT),
        ])
    }
}

/// The three digital outputs on the cargo bay connector (147).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitalOutputs {
    pub output0: bool,
    pub output1: bool,
    pub output2: bool,
}

impl DigitalOutputs {
    pub const OUTPUT0_BIT: u8 = 0;
    pub const OUTPUT1_BIT: u8 = 1;
    pub const OUTPUT2_BIT: u8 = 2;

    pub fn bits(&self) -> u8 {
        pack_bits(&[
            (self.output0, Self::OUTPUT0_BIT),
            (self.output1, Self::OUTPUT1_BIT),
            (self.output2, Self::OUTPUT2_BIT),
        ])
    }
}

/// Button presses for the Buttons command (165). Pressed buttons release
/// on their own after 1/6 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Buttons {
    pub clean: bool,
    pub spot: bool,
    pub dock: bool,
    pub minute: bool,
    pub hour: bool,
    pub day: bool,
    pub schedule: bool,
    pub clock: bool,
}

impl Buttons {
    pub const CLEAN_BIT: u8 = 0;
    pub const SPOT_BIT: u8 = 1;
    pub const DOCK_BIT: u8 = 2;
    pub const MINUTE_BIT: u8 = 3;
    pub const HOUR_BIT: u8 = 4;
    pub const DAY_BIT: u8 = 5;
    pub const SCHEDULE_BIT: u8 = 6;
    pub const CLOCK_BIT: u8 = 7;

    pub fn bits(&self) -> u8 {
        pack_bits(&[
            (self.clean, Self::CLEAN_BIT),
            (self.spot, Self::SPOT_BIT),
            (self.dock, Self::DOCK_BIT),
            (self.minute, Self::MINUTE_BIT),
            (self.hour, Self::HOUR_BIT),
            (self.day, Self::DAY_BIT),
            (self.schedule, Self::SCHEDULE_BIT),
            (self.clock, Self::CLOCK_BIT),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Day;

    #[test]
    fn motors_alternating_flags() {
        let m = Motors {
            side_brush: true,
            vacuum: false,
            main_brush: true,
            side_brush_clockwise: false,
            main_brush_outward: true,
        };
        assert_eq!(m.bits(), 0x15);
    }

    #[test]
    fn motors_single_flags_hit_their_bits() {
        let cases = [
            (Motors { side_brush: true, ..Motors::off() }, 0x01),
            (Motors { vacuum: true, ..Motors::off() }, 0x02),
            (Motors { main_brush: true, ..Motors::off() }, 0x04),
            (Motors { side_brush_clockwise: true, ..Motors::off() }, 0x08),
            (Motors { main_brush_outward: true, ..Motors::off() }, 0x10),
        ];
        for (motors, expected) in cases {
            assert_eq!(motors.bits(), expected, "{motors:?}");
        }
        assert_eq!(Motors::off().bits(), 0);
        assert_eq!(Motors::cleaning().bits(), 0x07);
    }

    #[test]
    fn leds_bits() {
        let leds = Leds {
            debris: true,
            check_robot: true,
            ..Default::default()
        };
        assert_eq!(leds.bits(), 0b1001);
        let dock = Leds {
            dock: true,
            power_color: 255,
            power_intensity: 128,
            ..Default::default()
        };
        assert_eq!(dock.bits(), 0b0100);
    }

    #[test]
    fn scheduling_leds_bits() {
        let leds = SchedulingLeds {
            weekdays: Weekdays::none().with(Day::Monday),
            schedule: true,
            colon: true,
            ..Default::default()
        };
        assert_eq!(leds.bits(), 0b1_0001);
        assert_eq!(leds.weekdays.bits(), 0b10);
    }

    #[test]
    fn digital_outputs_bits() {
        let outputs = DigitalOutputs {
            output0: false,
            output1: true,
            output2: true,
        };
        assert_eq!(outputs.bits(), 0b110);
    }

    #[test]
    fn buttons_bits() {
        let clean = Buttons {
            clean: true,
            ..Default::default()
        };
        assert_eq!(clean.bits(), 0x01);
        let clock = Buttons {
            clock: true,
            minute: true,
            ..Default::default()
        };
        assert_eq!(clock.bits(), 0x88);
    }
}
