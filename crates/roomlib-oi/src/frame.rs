//! Open Interface frame encoder.
//!
//! An OI frame is a single opcode byte followed by a payload whose length
//! is fixed by the opcode, or announced by a count byte that this module
//! computes. There is no preamble, checksum, or terminator.
//!
//! # Frame format
//!
//! ```text
//! <opcode> [<data>...]
//! ```
//!
//! - Multi-byte values are signed 16-bit, two's complement, high byte first.
//! - Flag groups are packed into one byte per a fixed bit table; unused
//!   high bits are always zero.
//!
//! Everything here is pure: arguments are assumed to be validated already.

use bytes::{BufMut, BytesMut};

/// Opcode bytes, as listed in the Open Interface command table.
pub mod opcode {
    pub const START: u8 = 128;
    pub const BAUD: u8 = 129;
    pub const SAFE: u8 = 131;
    pub const FULL: u8 = 132;
    pub const POWER: u8 = 133;
    pub const SPOT: u8 = 134;
    pub const CLEAN: u8 = 135;
    /// Max cleaning on Roomba; Demo on Create.
    pub const MAX: u8 = 136;
    pub const DRIVE: u8 = 137;
    pub const MOTORS: u8 = 138;
    pub const LEDS: u8 = 139;
    pub const SONG: u8 = 140;
    pub const PLAY: u8 = 141;
    pub const SENSORS: u8 = 142;
    pub const SEEK_DOCK: u8 = 143;
    pub const PWM_MOTORS: u8 = 144;
    pub const DRIVE_DIRECT: u8 = 145;
    pub const DRIVE_PWM: u8 = 146;
    pub const DIGITAL_OUTPUT: u8 = 147;
    pub const STREAM: u8 = 148;
    pub const QUERY_LIST: u8 = 149;
    pub const PAUSE_RESUME_STREAM: u8 = 150;
    pub const SEND_IR: u8 = 151;
    pub const SCHEDULING_LEDS: u8 = 162;
    pub const DIGIT_LEDS_RAW: u8 = 163;
    pub const DIGIT_LEDS_ASCII: u8 = 164;
    pub const BUTTONS: u8 = 165;
    pub const SCHEDULE: u8 = 167;
    pub const SET_DATE_TIME: u8 = 168;
}

/// Encode a frame from an opcode and its payload.
///
/// # Example
///
/// ```
/// use roomlib_oi::frame::{encode_frame, opcode};
///
/// assert_eq!(encode_frame(opcode::PLAY, &[2]), vec![141, 2]);
/// ```
pub fn encode_frame(opcode: u8, payload: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(1 + payload.len());
    buf.put_u8(opcode);
    buf.put_slice(payload);
    buf.to_vec()
}

/// Encode a frame carrying two signed 16-bit words (Drive, DriveDirect,
/// DrivePWM).
pub fn encode_word_pair(opcode: u8, first: i16, second: i16) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(5);
    buf.put_u8(opcode);
    buf.put_slice(&encode_i16(first));
    buf.put_slice(&encode_i16(second));
    buf.to_vec()
}

/// Encode a frame whose payload is a count byte followed by one byte per
/// item (Stream, QueryList).
///
/// Callers must ensure `items.len() <= 255`.
pub fn encode_counted(opcode: u8, items: &[u8]) -> Vec<u8> {
    debug_assert!(items.len() <= u8::MAX as usize);
    let mut buf = BytesMut::with_capacity(2 + items.len());
    buf.put_u8(opcode);
    buf.put_u8(items.len() as u8);
    buf.put_slice(items);
    buf.to_vec()
}

/// Split a signed 16-bit value into `[high, low]` bytes.
///
/// ```
/// use roomlib_oi::frame::encode_i16;
///
/// assert_eq!(encode_i16(-1), [0xFF, 0xFF]);
/// assert_eq!(encode_i16(500), [0x01, 0xF4]);
/// ```
pub fn encode_i16(value: i16) -> [u8; 2] {
    [((value >> 8) & 0xFF) as u8, (value & 0xFF) as u8]
}

/// Pack `(flag, bit index)` pairs into one byte.
///
/// The bit index of each flag comes from the command's table, so the order
/// of `flags` does not matter.
pub fn pack_bits(flags: &[(bool, u8)]) -> u8 {
    flags
        .iter()
        .filter(|(set, _)| *set)
        .fold(0u8, |bits, &(_, bit)| bits | (1 << bit))
}
