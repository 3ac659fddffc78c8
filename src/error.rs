//! Error types for the platform layer and the sensor driver

/// Error reported by a platform abstraction layer (GPIO, SPIC or Timer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PalError {
    /// Bus or pin level failure of the underlying hardware interface
    Interface,
    /// Invalid configuration, e.g. writing a pin configured as input or an
    /// oversized SPI frame
    Config,
    /// Transaction level read failure
    Read,
    /// Transaction level write failure
    Write,
    /// The peripheral was used before `init` or after `deinit`
    Init,
}

/// Error type for TLE5012B operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A platform layer failed; the fault is passed through unmodified
    Pal(PalError),
    /// Safety word reports a system error (over/under voltage, VDD negative,
    /// GND off, ROM defect)
    System,
    /// Safety word reports an interface access error (wrong address or lock)
    InterfaceAccess,
    /// Safety word reports an invalid angle value (`NO_GMR_A` or `NO_GMR_XY`)
    InvalidAngle,
    /// Angle speed could not be derived from the configuration registers
    AngleSpeed,
    /// CRC of the received frame does not match the safety word
    Crc,
    /// Consecutive CRC maintenance failures reached the configured threshold
    PersistentCrcFault,
    /// The bit-field access mode does not permit the operation, or the value
    /// does not fit the field
    Config,
    /// A data operation was issued before `init`
    NotInitialized,
    /// `init` was called on an initialized driver
    AlreadyInitialized,
    /// A bounded wait ran out of time
    Timeout,
}

impl Error {
    /// Map the error onto the sensor's error categories
    ///
    /// Errors that do not originate from the safety word or the CRC map to
    /// `None`.
    #[must_use]
    pub const fn error_type(&self) -> Option<ErrorType> {
        match self {
            Self::System => Some(ErrorType::SystemError),
            Self::InterfaceAccess => Some(ErrorType::InterfaceAccessError),
            Self::InvalidAngle => Some(ErrorType::InvalidAngleError),
            Self::AngleSpeed => Some(ErrorType::AngleSpeedError),
            Self::Crc | Self::PersistentCrcFault => Some(ErrorType::CrcError),
            _ => None,
        }
    }
}

impl From<PalError> for Error {
    fn from(error: PalError) -> Self {
        Self::Pal(error)
    }
}

/// Error categories derived from the safety word and the CRC result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorType {
    /// Safety word was OK
    NoError = 0x00,
    /// Over/under voltage, VDD negative, GND off, ROM defect
    SystemError = 0x01,
    /// Wrong address or wrong lock
    InterfaceAccessError = 0x02,
    /// `NO_GMR_A` = 1 or `NO_GMR_XY` = 1
    InvalidAngleError = 0x03,
    /// Angular speed calculation wrong
    AngleSpeedError = 0x04,
    /// CRC over command, data, `STAT` and `RESP` bits wrong
    CrcError = 0xFF,
}

impl From<ErrorType> for u8 {
    fn from(error: ErrorType) -> u8 {
        error as u8
    }
}
