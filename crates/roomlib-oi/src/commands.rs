//! Open Interface command builders.
//!
//! One function per OI command. Builders for commands with arguments run
//! the matching [`validate`](crate::validate) check first and return the
//! complete frame only when every argument passes; otherwise they return
//! all violations and no bytes.
//!
//! All functions are pure. The caller is responsible for sending the frame
//! over a transport.

use bytes::{BufMut, BytesMut};
use roomlib_core::Result;

use crate::bitfield::{Buttons, DigitalOutputs, Leds, Motors, SchedulingLeds};
use crate::frame::{encode_counted, encode_frame, encode_word_pair, opcode};
use crate::motion::{Drive, DriveDirect, DrivePwm, PwmMotors};
use crate::note::Song;
use crate::schedule::{DateTime, Day, Schedule};
use crate::validate::{self, DIGIT_COUNT};

/// Payload byte for PauseResumeStream that pauses the stream.
const STREAM_PAUSE: u8 = 0x00;
/// Payload byte for PauseResumeStream that resumes the stream.
const STREAM_RESUME: u8 = 0x01;

/// Baud rate for each OI baud code, indexed by code.
pub const BAUD_RATES: [u32; 12] = [
    300, 600, 1200, 2400, 4800, 9600, 14400, 19200, 28800, 38400, 57600, 115200,
];

/// Bits per second for a baud code, if the code exists.
pub fn baud_rate_for_code(code: u8) -> Option<u32> {
    BAUD_RATES.get(code as usize).copied()
}

/// Baud code for a rate in bits per second, if the OI supports it.
pub fn baud_code_for_rate(rate: u32) -> Option<u8> {
    BAUD_RATES.iter().position(|&r| r == rate).map(|i| i as u8)
}

// ---------------------------------------------------------------
// Mode and cleaning commands (no arguments)
// ---------------------------------------------------------------

/// Start the OI. Must precede every other command.
pub fn cmd_start() -> Vec<u8> {
    encode_frame(opcode::START, &[])
}

/// Enter Safe mode.
pub fn cmd_safe() -> Vec<u8> {
    encode_frame(opcode::SAFE, &[])
}

/// Enter Full mode (cliff, wheel-drop, and charger safety disabled).
pub fn cmd_full() -> Vec<u8> {
    encode_frame(opcode::FULL, &[])
}

/// Power the robot down.
pub fn cmd_power() -> Vec<u8> {
    encode_frame(opcode::POWER, &[])
}

pub fn cmd_spot() -> Vec<u8> {
    encode_frame(opcode::SPOT, &[])
}

pub fn cmd_clean() -> Vec<u8> {
    encode_frame(opcode::CLEAN, &[])
}

pub fn cmd_max() -> Vec<u8> {
    encode_frame(opcode::MAX, &[])
}

pub fn cmd_seek_dock() -> Vec<u8> {
    encode_frame(opcode::SEEK_DOCK, &[])
}

pub fn cmd_pause_stream() -> Vec<u8> {
    encode_frame(opcode::PAUSE_RESUME_STREAM, &[STREAM_PAUSE])
}

pub fn cmd_resume_stream() -> Vec<u8> {
    encode_frame(opcode::PAUSE_RESUME_STREAM, &[STREAM_RESUME])
}

// ---------------------------------------------------------------
// Commands with arguments
// ---------------------------------------------------------------

/// Change the serial baud rate. `code` indexes [`BAUD_RATES`].
///
/// The robot needs 100 ms before it accepts commands at the new rate.
pub fn cmd_baud(code: u8) -> Result<Vec<u8>> {
    validate::baud(code)?;
    Ok(encode_frame(opcode::BAUD, &[code]))
}

/// Run a built-in demo (Create), or 255 to abort the current one.
pub fn cmd_demo(id: u8) -> Result<Vec<u8>> {
    validate::demo(id)?;
    Ok(encode_frame(opcode::MAX, &[id]))
}

/// Drive at an average velocity along a turning radius.
///
/// # Example
///
/// ```
/// use roomlib_oi::commands::cmd_drive;
/// use roomlib_oi::motion::Drive;
///
/// let frame = cmd_drive(Drive::new(-200, 500)).unwrap();
/// assert_eq!(frame, vec![137, 0xFF, 0x38, 0x01, 0xF4]);
/// ```
pub fn cmd_drive(drive: Drive) -> Result<Vec<u8>> {
    validate::drive(&drive)?;
    Ok(encode_word_pair(opcode::DRIVE, drive.velocity, drive.radius))
}

pub fn cmd_motors(motors: Motors) -> Vec<u8> {
    encode_frame(opcode::MOTORS, &[motors.bits()])
}

pub fn cmd_leds(leds: Leds) -> Vec<u8> {
    encode_frame(
        opcode::LEDS,
        &[leds.bits(), leds.power_color, leds.power_intensity],
    )
}

/// Store a song: `[140][slot][count][number, duration]*`.
pub fn cmd_song(song: &Song) -> Result<Vec<u8>> {
    validate::song(song)?;
    let mut buf = BytesMut::with_capacity(3 + 2 * song.notes.len());
    buf.put_u8(opcode::SONG);
    buf.put_u8(song.slot);
    buf.put_u8(song.notes.len() as u8);
    for note in &song.notes {
        buf.put_u8(note.number);
        buf.put_u8(note.duration);
    }
    Ok(buf.to_vec())
}

pub fn cmd_play(slot: u8) -> Result<Vec<u8>> {
    validate::song_slot(slot)?;
    Ok(encode_frame(opcode::PLAY, &[slot]))
}

/// Request one sensor packet.
pub fn cmd_sensors(packet_id: u8) -> Result<Vec<u8>> {
    validate::packet_id(packet_id)?;
    Ok(encode_frame(opcode::SENSORS, &[packet_id]))
}

pub fn cmd_pwm_motors(motors: PwmMotors) -> Result<Vec<u8>> {
    validate::pwm_motors(&motors)?;
    Ok(encode_frame(
        opcode::PWM_MOTORS,
        &[motors.main_brush as u8, motors.side_brush as u8, motors.vacuum],
    ))
}

/// Right wheel first, then left.
pub fn cmd_drive_direct(drive: DriveDirect) -> Result<Vec<u8>> {
    validate::drive_direct(&drive)?;
    Ok(encode_word_pair(opcode::DRIVE_DIRECT, drive.right, drive.left))
}

/// Right wheel first, then left.
pub fn cmd_drive_pwm(drive: DrivePwm) -> Result<Vec<u8>> {
    validate::drive_pwm(&drive)?;
    Ok(encode_word_pair(opcode::DRIVE_PWM, drive.right, drive.left))
}

pub fn cmd_digital_output(outputs: DigitalOutputs) -> Vec<u8> {
    encode_frame(opcode::DIGITAL_OUTPUT, &[outputs.bits()])
}

/// Start streaming the given packets every 15 ms.
pub fn cmd_stream(packet_ids: &[u8]) -> Result<Vec<u8>> {
    validate::packet_ids(packet_ids)?;
    Ok(encode_counted(opcode::STREAM, packet_ids))
}

/// Request the given packets once, in order.
pub fn cmd_query_list(packet_ids: &[u8]) -> Result<Vec<u8>> {
    validate::packet_ids(packet_ids)?;
    Ok(encode_counted(opcode::QUERY_LIST, packet_ids))
}

pub fn cmd_send_ir(value: u8) -> Vec<u8> {
    encode_frame(opcode::SEND_IR, &[value])
}

pub fn cmd_scheduling_leds(leds: SchedulingLeds) -> Vec<u8> {
    encode_frame(opcode::SCHEDULING_LEDS, &[leds.weekdays.bits(), leds.bits()])
}

/// Raw segment bits for the four digits, leftmost first.
pub fn cmd_digit_leds_raw(digits: [u8; DIGIT_COUNT]) -> Result<Vec<u8>> {
    validate::digit_leds_raw(&digits)?;
    Ok(encode_frame(opcode::DIGIT_LEDS_RAW, &digits))
}

/// Show text on the digit display.
///
/// Only the first four characters are sent; shorter text is padded with
/// spaces.
///
/// ```
/// use roomlib_oi::commands::cmd_digit_leds_ascii;
///
/// assert_eq!(cmd_digit_leds_ascii("A").unwrap(), vec![164, b'A', b' ', b' ', b' ']);
/// assert_eq!(cmd_digit_leds_ascii("ABCDE").unwrap(), vec![164, b'A', b'B', b'C', b'D']);
/// ```
pub fn cmd_digit_leds_ascii(text: &str) -> Result<Vec<u8>> {
    validate::digit_leds_ascii(text)?;
    let mut digits = [b' '; DIGIT_COUNT];
    // Validation guarantees each displayed char is ASCII.
    for (slot, c) in digits.iter_mut().zip(text.chars()) {
        *slot = c as u8;
    }
    Ok(encode_frame(opcode::DIGIT_LEDS_ASCII, &digits))
}

pub fn cmd_buttons(buttons: Buttons) -> Vec<u8> {
    encode_frame(opcode::BUTTONS, &[buttons.bits()])
}

/// Send a weekly schedule: day bits, then hour and minute for all seven
/// days. Inactive days are sent as `0, 0`.
pub fn cmd_schedule(schedule: &Schedule) -> Result<Vec<u8>> {
    validate::schedule(schedule)?;
    let mut buf = BytesMut::with_capacity(16);
    buf.put_u8(opcode::SCHEDULE);
    buf.put_u8(schedule.weekdays().bits());
    for day in Day::ALL {
        let time = schedule.get(day).unwrap_or_default();
        buf.put_u8(time.hour);
        buf.put_u8(time.minute);
    }
    Ok(buf.to_vec())
}

/// Clear the schedule. Same frame as [`cmd_schedule`] with every day off.
pub fn cmd_disable_schedule() -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(16);
    buf.put_u8(opcode::SCHEDULE);
    buf.put_bytes(0, 15);
    buf.to_vec()
}

pub fn cmd_set_date_time(time: DateTime) -> Result<Vec<u8>> {
    validate::date_time(&time)?;
    Ok(encode_frame(
        opcode::SET_DATE_TIME,
        &[time.day.index(), time.hour, time.minute],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{STRAIGHT, STRAIGHT_ALT, TURN_CLOCKWISE};
    use crate::note::Note;
    use crate::schedule::{ScheduleTime, Weekdays};
    use roomlib_core::Error;

    // -----------------------------------------------------------------
    // No-argument commands
    // -----------------------------------------------------------------

    #[test]
    fn bare_opcodes() {
        assert_eq!(cmd_start(), vec![128]);
        assert_eq!(cmd_safe(), vec![131]);
        assert_eq!(cmd_full(), vec![132]);
        assert_eq!(cmd_power(), vec![133]);
        assert_eq!(cmd_spot(), vec![134]);
        assert_eq!(cmd_clean(), vec![135]);
        assert_eq!(cmd_max(), vec![136]);
        assert_eq!(cmd_seek_dock(), vec![143]);
    }

    #[test]
    fn pause_and_resume_stream() {
        assert_eq!(cmd_pause_stream(), vec![150, 0]);
        assert_eq!(cmd_resume_stream(), vec![150, 1]);
    }

    // -----------------------------------------------------------------
    // Baud / demo
    // -----------------------------------------------------------------

    #[test]
    fn baud_frames() {
        assert_eq!(cmd_baud(11).unwrap(), vec![129, 11]);
        assert_eq!(cmd_baud(0).unwrap(), vec![129, 0]);
        assert!(cmd_baud(12).is_err());
    }

    #[test]
    fn baud_table() {
        assert_eq!(baud_rate_for_code(7), Some(19_200));
        assert_eq!(baud_rate_for_code(11), Some(115_200));
        assert_eq!(baud_rate_for_code(12), None);
        assert_eq!(baud_code_for_rate(57_600), Some(10));
        assert_eq!(baud_code_for_rate(250_000), None);
    }

    #[test]
    fn demo_frames() {
        assert_eq!(cmd_demo(3).unwrap(), vec![136, 3]);
        assert_eq!(cmd_demo(255).unwrap(), vec![136, 255]);
        assert!(cmd_demo(42).is_err());
    }

    // -----------------------------------------------------------------
    // Drive family
    // -----------------------------------------------------------------

    #[test]
    fn drive_encodes_big_endian_twos_complement() {
        for v in [-500i16, -256, -1, 0, 1, 255, 500] {
            for r in [-2000i16, -1, 0, 1, 2000, STRAIGHT, STRAIGHT_ALT] {
                let frame = cmd_drive(Drive::new(v, r)).unwrap();
                let [vh, vl] = v.to_be_bytes();
                let [rh, rl] = r.to_be_bytes();
                assert_eq!(frame, vec![137, vh, vl, rh, rl], "({v}, {r})");
            }
        }
    }

    #[test]
    fn drive_turn_in_place() {
        assert_eq!(
            cmd_drive(Drive::new(100, TURN_CLOCKWISE)).unwrap(),
            vec![137, 0x00, 0x64, 0xFF, 0xFF]
        );
        assert_eq!(
            cmd_drive(Drive::straight(0)).unwrap(),
            vec![137, 0x00, 0x00, 0x7F, 0xFF]
        );
    }

    #[test]
    fn drive_out_of_range_velocity() {
        let errs = cmd_drive(Drive::new(501, 0)).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs.iter().all(Error::is_invalid_argument));
    }

    #[test]
    fn drive_reports_both_violations() {
        let errs = cmd_drive(Drive::new(600, 3000)).unwrap_err();
        assert_eq!(errs.len(), 2);
        let text = errs.to_string();
        assert!(text.contains("velocity"));
        assert!(text.contains("radius"));
    }

    #[test]
    fn drive_direct_right_wheel_first() {
        assert_eq!(
            cmd_drive_direct(DriveDirect::new(500, -500)).unwrap(),
            vec![145, 0x01, 0xF4, 0xFE, 0x0C]
        );
        assert_eq!(cmd_drive_direct(DriveDirect::new(501, -501)).unwrap_err().len(), 2);
    }

    #[test]
    fn drive_pwm_frames() {
        assert_eq!(
            cmd_drive_pwm(DrivePwm::new(-255, 255)).unwrap(),
            vec![146, 0xFF, 0x01, 0x00, 0xFF]
        );
        assert_eq!(cmd_drive_pwm(DrivePwm::new(0, 300)).unwrap_err().len(), 1);
    }

    #[test]
    fn pwm_motors_frames() {
        assert_eq!(
            cmd_pwm_motors(PwmMotors::new(-1, 64, 127)).unwrap(),
            vec![144, 0xFF, 64, 127]
        );
        assert!(cmd_pwm_motors(PwmMotors::new(0, 0, 128)).is_err());
    }

    // -----------------------------------------------------------------
    // Bitfield commands
    // -----------------------------------------------------------------

    #[test]
    fn motors_frame() {
        let m = Motors {
            side_brush: true,
            vacuum: false,
            main_brush: true,
            side_brush_clockwise: false,
            main_brush_outward: true,
        };
        assert_eq!(cmd_motors(m), vec![138, 0x15]);
    }

    #[test]
    fn leds_frame() {
        let leds = Leds {
            debris: true,
            spot: true,
            dock: false,
            check_robot: true,
            power_color: 128,
            power_intensity: 255,
        };
        assert_eq!(cmd_leds(leds), vec![139, 0b1011, 128, 255]);
    }

    #[test]
    fn scheduling_leds_frame() {
        let leds = SchedulingLeds {
            weekdays: Weekdays::all(),
            clock: true,
            pm: true,
            ..Default::default()
        };
        assert_eq!(cmd_scheduling_leds(leds), vec![162, 0x7F, 0b1010]);
    }

    #[test]
    fn digital_output_frame() {
        let outputs = DigitalOutputs {
            output0: true,
            output1: false,
            output2: true,
        };
        assert_eq!(cmd_digital_output(outputs), vec![147, 0b101]);
    }

    #[test]
    fn buttons_frame() {
        let b = Buttons {
            dock: true,
            ..Default::default()
        };
        assert_eq!(cmd_buttons(b), vec![165, 0x04]);
    }

    // -----------------------------------------------------------------
    // Songs and sensors
    // -----------------------------------------------------------------

    #[test]
    fn song_frame_counts_notes() {
        let song = Song::new(1, vec![Note::new(60, 32), Note::new(67, 16)]);
        assert_eq!(cmd_song(&song).unwrap(), vec![140, 1, 2, 60, 32, 67, 16]);
    }

    #[test]
    fn song_with_invalid_note_is_rejected() {
        let song = Song::new(0, vec![Note::new(60, 32), Note::new(20, 16)]);
        assert_eq!(cmd_song(&song).unwrap_err().len(), 1);
    }

    #[test]
    fn play_frame() {
        assert_eq!(cmd_play(3).unwrap(), vec![141, 3]);
        assert!(cmd_play(4).is_err());
    }

    #[test]
    fn sensor_frames() {
        assert_eq!(cmd_sensors(7).unwrap(), vec![142, 7]);
        assert_eq!(cmd_stream(&[7, 19, 20]).unwrap(), vec![148, 3, 7, 19, 20]);
        assert_eq!(cmd_query_list(&[100]).unwrap(), vec![149, 1, 100]);
        assert!(cmd_sensors(59).is_err());
        assert!(cmd_stream(&[]).is_err());
    }

    #[test]
    fn send_ir_frame() {
        assert_eq!(cmd_send_ir(0xA5), vec![151, 0xA5]);
    }

    // -----------------------------------------------------------------
    // Digit LEDs
    // -----------------------------------------------------------------

    #[test]
    fn digit_ascii_pads_and_truncates() {
        assert_eq!(cmd_digit_leds_ascii("A").unwrap(), vec![164, b'A', b' ', b' ', b' ']);
        assert_eq!(cmd_digit_leds_ascii("ABCDE").unwrap(), vec![164, b'A', b'B', b'C', b'D']);
        assert_eq!(cmd_digit_leds_ascii("").unwrap(), vec![164, b' ', b' ', b' ', b' ']);
        assert_eq!(cmd_digit_leds_ascii("ABCD").unwrap(), vec![164, b'A', b'B', b'C', b'D']);
    }

    #[test]
    fn digit_ascii_rejects_non_ascii() {
        assert!(cmd_digit_leds_ascii("\u{e9}t\u{e9}").is_err());
    }

    #[test]
    fn digit_raw_frame() {
        assert_eq!(
            cmd_digit_leds_raw([0x3F, 0x06, 0x5B, 0x4F]).unwrap(),
            vec![163, 0x3F, 0x06, 0x5B, 0x4F]
        );
        assert!(cmd_digit_leds_raw([0x80, 0, 0, 0]).is_err());
    }

    // -----------------------------------------------------------------
    // Schedule and clock
    // -----------------------------------------------------------------

    #[test]
    fn schedule_frame_layout() {
        let schedule = Schedule::disabled()
            .with(Day::Sunday, 10, 15)
            .with(Day::Wednesday, 9, 0);
        let frame = cmd_schedule(&schedule).unwrap();
        assert_eq!(
            frame,
            vec![167, 0b0000_1001, 10, 15, 0, 0, 0, 0, 9, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn disable_schedule_matches_empty_schedule() {
        let disabled = cmd_disable_schedule();
        assert_eq!(disabled.len(), 16);
        assert_eq!(disabled[0], 167);
        assert!(disabled[1..].iter().all(|&b| b == 0));
        assert_eq!(disabled, cmd_schedule(&Schedule::disabled()).unwrap());
    }

    #[test]
    fn schedule_rejects_bad_times() {
        let mut schedule = Schedule::disabled();
        schedule.set(Day::Monday, Some(ScheduleTime::new(25, 61)));
        assert_eq!(cmd_schedule(&schedule).unwrap_err().len(), 2);
    }

    #[test]
    fn set_date_time_frame() {
        assert_eq!(
            cmd_set_date_time(DateTime::new(Day::Friday, 13, 45)).unwrap(),
            vec![168, 5, 13, 45]
        );
        assert!(cmd_set_date_time(DateTime::new(Day::Friday, 24, 0)).is_err());
    }
}
