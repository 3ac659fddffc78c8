//! Safety word trailing every checked SSC transfer

use crate::config::SlaveNumber;
use crate::error::Error;
use crate::utils::frame_crc;

const STAT_RES: u16 = 0x8000;
const STAT_ERR: u16 = 0x4000;
const STAT_ACC: u16 = 0x2000;
const STAT_ANG: u16 = 0x1000;
const RESP_MASK: u16 = 0x0F00;
const CRC_MASK: u16 = 0x00FF;

/// Safety word sent by the sensor after the data words
///
/// The status bits are active low: a cleared bit reports a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyWord {
    raw: u16,
}

impl SafetyWord {
    /// Create a safety word from the raw value
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self { raw }
    }

    /// Get the raw safety word
    #[must_use]
    pub const fn raw(&self) -> u16 {
        self.raw
    }

    /// `STAT_RES`: chip or watchdog reset occurred since the last `STAT` read
    #[must_use]
    pub const fn reset_occurred(&self) -> bool {
        self.raw & STAT_RES == 0
    }

    /// `STAT_ERR`: system error
    ///
    /// Over/under voltage, VDD negative, GND off or ROM defect.
    #[must_use]
    pub const fn system_error(&self) -> bool {
        self.raw & STAT_ERR == 0
    }

    /// `STAT_ACC`: interface access error (wrong address or lock)
    #[must_use]
    pub const fn interface_access_error(&self) -> bool {
        self.raw & STAT_ACC == 0
    }

    /// `STAT_ANG`: invalid angle value
    #[must_use]
    pub const fn invalid_angle(&self) -> bool {
        self.raw & STAT_ANG == 0
    }

    /// `RESP`: sensor number response indicator
    #[must_use]
    pub const fn response(&self) -> u8 {
        ((self.raw & RESP_MASK) >> 8) as u8
    }

    /// Slave that answered, decoded from the cleared `RESP` bit
    #[must_use]
    pub const fn response_slave(&self) -> Option<SlaveNumber> {
        match self.response() {
            0xE => Some(SlaveNumber::S0),
            0xD => Some(SlaveNumber::S1),
            0xB => Some(SlaveNumber::S2),
            0x7 => Some(SlaveNumber::S3),
            _ => None,
        }
    }

    /// CRC over the command word and the data words
    #[must_use]
    pub const fn crc(&self) -> u8 {
        (self.raw & CRC_MASK) as u8
    }

    /// Validate the transfer that produced this safety word
    ///
    /// # Errors
    ///
    /// The status bits are checked before the CRC, in the order system,
    /// interface access, invalid angle.
    pub fn check(&self, command: u16, data: &[u16]) -> Result<(), Error> {
        if self.system_error() {
            return Err(Error::System);
        }
        if self.interface_access_error() {
            return Err(Error::InterfaceAccess);
        }
        if self.invalid_angle() {
            return Err(Error::InvalidAngle);
        }
        if frame_crc(command, data) != self.crc() {
            return Err(Error::Crc);
        }
        Ok(())
    }
}

impl From<u16> for SafetyWord {
    fn from(raw: u16) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(command: u16, data: &[u16]) -> SafetyWord {
        SafetyWord::new(0xFE00 | u16::from(frame_crc(command, data)))
    }

    #[test]
    fn decodes_status_bits() {
        let word = SafetyWord::new(0xFED3);
        assert!(!word.reset_occurred());
        assert!(!word.system_error());
        assert!(!word.interface_access_error());
        assert!(!word.invalid_angle());
        assert_eq!(word.response(), 0xE);
        assert_eq!(word.response_slave(), Some(SlaveNumber::S0));
        assert_eq!(word.crc(), 0xD3);
    }

    #[test]
    fn response_slaves() {
        assert_eq!(SafetyWord::new(0xFD00).response_slave(), Some(SlaveNumber::S1));
        assert_eq!(SafetyWord::new(0xFB00).response_slave(), Some(SlaveNumber::S2));
        assert_eq!(SafetyWord::new(0xF700).response_slave(), Some(SlaveNumber::S3));
        assert_eq!(SafetyWord::new(0xF000).response_slave(), None);
    }

    #[test]
    fn accepts_valid_frame() {
        assert_eq!(valid(0x8021, &[0x4000]).check(0x8021, &[0x4000]), Ok(()));
        assert_eq!(SafetyWord::new(0xFED3).check(0x8021, &[0x0000]), Ok(()));
    }

    #[test]
    fn check_order_is_system_interface_angle_crc() {
        // every flag cleared and the CRC wrong: system error wins
        assert_eq!(SafetyWord::new(0x0E00).check(0x8021, &[0]), Err(Error::System));
        assert_eq!(
            SafetyWord::new(0xCE00).check(0x8021, &[0]),
            Err(Error::InterfaceAccess)
        );
        assert_eq!(SafetyWord::new(0xEE00).check(0x8021, &[0]), Err(Error::InvalidAngle));
        assert_eq!(SafetyWord::new(0xFE00).check(0x8021, &[0]), Err(Error::Crc));
    }

    #[test]
    fn crc_covers_every_data_word() {
        let data = [0x0801, 0, 0, 0, 0, 0, 0, 0];
        let word = valid(0x8088, &data);
        assert_eq!(word.check(0x8088, &data), Ok(()));
        let mut corrupted = data;
        corrupted[7] = 1;
        assert_eq!(word.check(0x8088, &corrupted), Err(Error::Crc));
    }
}
