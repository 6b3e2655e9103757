//! Argument range checks, run before any frame is encoded.
//!
//! Every check is a pure function returning `Option<Error>`. A command's
//! validator runs all of its checks and [`collect`]s them, so one call
//! reports every out-of-range field instead of stopping at the first.

use std::ops::RangeInclusive;

use roomlib_core::error::{Error, ErrorSet, Result};

use crate::motion::{Drive, DriveDirect, DrivePwm, PwmMotors};
use crate::note::{Song, MAX_NOTE, MAX_SONG_NOTES, MIN_NOTE, SONG_SLOTS};
use crate::schedule::{DateTime, Schedule};

pub const BAUD_CODE: RangeInclusive<i64> = 0..=11;
pub const VELOCITY: RangeInclusive<i64> = -500..=500;
pub const RADIUS: RangeInclusive<i64> = -2000..=2000;
pub const WHEEL_PWM: RangeInclusive<i64> = -255..=255;
pub const BRUSH_PWM: RangeInclusive<i64> = -127..=127;
pub const VACUUM_PWM: RangeInclusive<i64> = 0..=127;
pub const NOTE_NUMBER: RangeInclusive<i64> = MIN_NOTE as i64..=MAX_NOTE as i64;
pub const SONG_SLOT: RangeInclusive<i64> = 0..=(SONG_SLOTS as i64 - 1);
pub const SONG_LENGTH: RangeInclusive<i64> = 1..=MAX_SONG_NOTES as i64;
pub const PACKET_COUNT: RangeInclusive<i64> = 1..=255;
pub const HOUR: RangeInclusive<i64> = 0..=23;
pub const MINUTE: RangeInclusive<i64> = 0..=59;
pub const DIGIT_SEGMENTS: RangeInclusive<i64> = 0..=0x7F;
pub const PRINTABLE_ASCII: RangeInclusive<i64> = 32..=126;

/// Drive radii, including the two straight-drive sentinels.
pub const RADII: [RangeInclusive<i64>; 3] = [RADIUS, -32768..=-32768, 32767..=32767];
/// Sensor packet ids: single packets and groups 0-58, extended groups 100-107.
pub const PACKET_IDS: [RangeInclusive<i64>; 2] = [0..=58, 100..=107];
/// Demo numbers, plus 255 to abort the running demo.
pub const DEMO_IDS: [RangeInclusive<i64>; 2] = [0..=9, 255..=255];

/// Number of characters the digit display shows.
pub const DIGIT_COUNT: usize = 4;

fn describe(ranges: &[RangeInclusive<i64>]) -> String {
    ranges
        .iter()
        .map(|r| {
            if r.start() == r.end() {
                r.start().to_string()
            } else {
                format!("{}..={}", r.start(), r.end())
            }
        })
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Check `value` against a union of ranges.
pub fn check_in(
    field: &'static str,
    value: impl Into<i64>,
    ranges: &[RangeInclusive<i64>],
) -> Option<Error> {
    let value = value.into();
    if ranges.iter().any(|r| r.contains(&value)) {
        None
    } else {
        Some(Error::InvalidArgument {
            field,
            value,
            expected: describe(ranges),
        })
    }
}

/// Check `value` against a single range.
pub fn check(field: &'static str, value: impl Into<i64>, range: RangeInclusive<i64>) -> Option<Error> {
    check_in(field, value, std::slice::from_ref(&range))
}

/// Gather check results into one outcome.
pub fn collect(checks: impl IntoIterator<Item = Option<Error>>) -> Result<()> {
    checks
        .into_iter()
        .flatten()
        .collect::<ErrorSet>()
        .into_result(())
}

pub fn baud(code: u8) -> Result<()> {
    collect([check("baud code", code, BAUD_CODE)])
}

pub fn demo(id: u8) -> Result<()> {
    collect([check_in("demo", id, &DEMO_IDS)])
}

pub fn drive(drive: &Drive) -> Result<()> {
    collect([
        check("velocity", drive.velocity, VELOCITY),
        check_in("radius", drive.radius, &RADII),
    ])
}

pub fn drive_direct(drive: &DriveDirect) -> Result<()> {
    collect([
        check("right velocity", drive.right, VELOCITY),
        check("left velocity", drive.left, VELOCITY),
    ])
}

pub fn drive_pwm(drive: &DrivePwm) -> Result<()> {
    collect([
        check("right PWM", drive.right, WHEEL_PWM),
        check("left PWM", drive.left, WHEEL_PWM),
    ])
}

pub fn pwm_motors(motors: &PwmMotors) -> Result<()> {
    collect([
        check("main brush PWM", motors.main_brush, BRUSH_PWM),
        check("side brush PWM", motors.side_brush, BRUSH_PWM),
        check("vacuum PWM", motors.vacuum, VACUUM_PWM),
    ])
}

pub fn song_slot(slot: u8) -> Result<()> {
    collect([check("song slot", slot, SONG_SLOT)])
}

pub fn song(song: &Song) -> Result<()> {
    let header = [
        check("song slot", song.slot, SONG_SLOT),
        check("song length", song.notes.len() as i64, SONG_LENGTH),
    ];
    let notes = song
        .notes
        .iter()
        .map(|note| check("note", note.number, NOTE_NUMBER));
    collect(header.into_iter().chain(notes))
}

pub fn packet_id(id: u8) -> Result<()> {
    collect([check_in("packet id", id, &PACKET_IDS)])
}

pub fn packet_ids(ids: &[u8]) -> Result<()> {
    let count = check("packet count", ids.len() as i64, PACKET_COUNT);
    let each = ids.iter().map(|&id| check_in("packet id", id, &PACKET_IDS));
    collect(std::iter::once(count).chain(each))
}

pub fn schedule(schedule: &Schedule) -> Result<()> {
    collect(schedule.active().flat_map(|(_, time)| {
        [
            check("hour", time.hour, HOUR),
            check("minute", time.minute, MINUTE),
        ]
    }))
}

pub fn date_time(time: &DateTime) -> Result<()> {
    collect([
        check("hour", time.hour, HOUR),
        check("minute", time.minute, MINUTE),
    ])
}

pub fn digit_leds_raw(digits: &[u8; DIGIT_COUNT]) -> Result<()> {
    collect(
        digits
            .iter()
            .map(|&segments| check("digit segments", segments, DIGIT_SEGMENTS)),
    )
}

/// Only the characters that will be displayed are checked.
pub fn digit_leds_ascii(text: &str) -> Result<()> {
    collect(
        text.chars()
            .take(DIGIT_COUNT)
            .map(|c| check("digit character", c as u32, PRINTABLE_ASCII)),
    )
}
