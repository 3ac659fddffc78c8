//! CRC engine, sign extension and unit conversion helpers

/// CRC-8 generator polynomial used by the sensor (x^8 + x^4 + x^3 + x^2 + 1)
pub const CRC_POLYNOMIAL: u8 = 0x1D;
/// CRC-8 seed value
pub const CRC_SEED: u8 = 0xFF;
/// Number of registers covered by the parameter CRC (0x08 - 0x0F)
pub const CRC_NUM_REGISTERS: usize = 8;

const POW_2_15: f32 = 32768.0;
const POW_2_7: f32 = 128.0;
const ANGLE_360_VAL: f32 = 360.0;
const TEMP_OFFSET: f32 = 152.0;
const TEMP_DIV: f32 = 2.776;

/// Calculate the CRC-8 the sensor appends to every safety word
///
/// Polynomial 0x1D, seed 0xFF, MSB first, inverted result.
#[must_use]
pub fn crc8(data: &[u8]) -> u8 {
    !data.iter().fold(CRC_SEED, |crc, &byte| crc8_step(crc, byte))
}

/// Calculate the CRC over a command word followed by data words
///
/// Words enter the CRC high byte first, the order in which they travel on
/// the wire.
#[must_use]
pub fn frame_crc(command: u16, words: &[u16]) -> u8 {
    let mut crc = CRC_SEED;
    for word in core::iter::once(&command).chain(words) {
        for byte in word.to_be_bytes() {
            crc = crc8_step(crc, byte);
        }
    }
    !crc
}

/// Calculate the parameter CRC stored in `TCO_Y[7:0]`
///
/// Covers registers 0x08 - 0x0F except the CRC byte itself (15 bytes).
#[must_use]
pub fn parameter_crc(registers: &[u16; CRC_NUM_REGISTERS]) -> u8 {
    let mut bytes = [0u8; 2 * CRC_NUM_REGISTERS];
    for (chunk, register) in bytes.chunks_exact_mut(2).zip(registers) {
        chunk.copy_from_slice(&register.to_be_bytes());
    }
    crc8(&bytes[..2 * CRC_NUM_REGISTERS - 1])
}

fn crc8_step(mut crc: u8, byte: u8) -> u8 {
    crc ^= byte;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC_POLYNOMIAL
        } else {
            crc << 1
        };
    }
    crc
}

/// Sign-extend the lowest `width` bits of `raw` into an `i16`
///
/// `width` must be between 1 and 16.
#[must_use]
pub const fn sign_extend(raw: u16, width: u8) -> i16 {
    let shift = 16 - width as u32;
    #[allow(clippy::cast_possible_wrap)]
    let shifted = (raw << shift) as i16;
    shifted >> shift
}

/// Extract the signed 15-bit value in bits 14:0 (angle value, angle speed)
#[must_use]
pub const fn extract_signed15(raw: u16) -> i16 {
    sign_extend(raw & 0x7FFF, 15)
}

/// Extract the signed 9-bit value in bits 8:0 (temperature, revolutions)
#[must_use]
pub const fn extract_signed9(raw: u16) -> i16 {
    sign_extend(raw & 0x01FF, 9)
}

/// Extract the unsigned 9-bit value in bits 8:0
#[must_use]
pub const fn extract_unsigned9(raw: u16) -> u16 {
    raw & 0x01FF
}

/// Extract the unsigned 11-bit angle range in bits 14:4 of `MOD_2`
#[must_use]
pub const fn extract_angle_range(raw: u16) -> u16 {
    (raw & 0x7FF0) >> 4
}

/// Convert a signed 15-bit angle value to degrees
#[must_use]
pub fn angle_degrees(raw: i16) -> f32 {
    (ANGLE_360_VAL / POW_2_15) * f32::from(raw)
}

/// Convert a signed 9-bit temperature value to °C
#[must_use]
pub fn temperature_celsius(raw: i16) -> f32 {
    (f32::from(raw) + TEMP_OFFSET) / TEMP_DIV
}

/// Convert the `MOD_2` angle range field to degrees
///
/// Returns `None` for a zero range, which the sensor cannot represent.
#[must_use]
pub fn angle_range_degrees(range: u16) -> Option<f32> {
    if range == 0 {
        return None;
    }
    Some(ANGLE_360_VAL * (POW_2_7 / f32::from(range)))
}

/// FIR update period in µs for the `MOD_1` `FIR_MD` setting
#[must_use]
pub fn fir_update_period_us(fir_md: u16) -> Option<f32> {
    match fir_md {
        0 => Some(21.3),
        1 => Some(42.7),
        2 => Some(85.3),
        3 => Some(170.6),
        _ => None,
    }
}

/// Calculate the angle speed in °/s
///
/// `prediction` is 3 when angle prediction is enabled in `MOD_2`, 2 otherwise.
#[must_use]
pub fn angle_speed_dps(angle_range: f32, raw_speed: i16, fir_md: u16, prediction: u16) -> Option<f32> {
    let period_us = fir_update_period_us(fir_md)?;
    let seconds = f32::from(prediction) * period_us * 0.000_001;
    Some(((angle_range / POW_2_15) * f32::from(raw_speed)) / seconds)
}
