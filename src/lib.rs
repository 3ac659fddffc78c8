#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod config;
mod driver;
mod error;
pub mod pal;
mod register;
mod regmap;
mod safety;
mod snapshot;
pub mod utils;

pub use config::{
    CRC_FAULT_THRESHOLD, Config, POLL_INTERVAL_US, SlaveNumber, TRIGGER_DELAY_US,
};
pub use driver::Tle5012b;
pub use error::{Error, ErrorType, PalError};
pub use register::{
    ActivationStatusRegister, AddressField, CalibrationMode, IfabRegister,
    InterfaceMode1Register, InterfaceMode2Register, InterfaceMode4Register, InterfaceType,
    MAX_BLOCK_WORDS, MAX_NUM_REG, Opcode, READ_BLOCK_CRC, Register, SafetyMode,
    StatusRegister, TemperatureCoefficientYRegister, UpdateMode,
};
pub use regmap::{Access, BitField, BitFieldId, FieldValue, REGISTER_MAP, RegisterMap};
pub use safety::SafetyWord;
pub use snapshot::{Identity, RegisterSnapshot, SensorType};
