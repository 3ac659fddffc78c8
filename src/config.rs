//! Driver configuration

/// Default wait after an update trigger, in µs
pub const TRIGGER_DELAY_US: u32 = 5;
/// Default number of consecutive CRC maintenance failures treated as
/// persistent
pub const CRC_FAULT_THRESHOLD: u8 = 3;
/// Default polling interval of bounded waits, in µs
pub const POLL_INTERVAL_US: u32 = 100;

/// Sensor slave number on a shared SSC bus (`STAT` `SNR`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum SlaveNumber {
    /// Slave 0
    #[default]
    S0 = 0x0000,
    /// Slave 1
    S1 = 0x2000,
    /// Slave 2
    S2 = 0x4000,
    /// Slave 3
    S3 = 0x6000,
}

impl SlaveNumber {
    /// `STAT` word selecting this slave number
    #[must_use]
    pub const fn stat_word(self) -> u16 {
        self as u16
    }

    /// Decode the 2-bit `SNR` field
    #[must_use]
    pub const fn from_snr(snr: u8) -> Self {
        match snr & 0b11 {
            0 => Self::S0,
            1 => Self::S1,
            2 => Self::S2,
            _ => Self::S3,
        }
    }
}

/// Driver configuration, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Slave number written during `init`
    pub slave: SlaveNumber,
    /// Wait after an update trigger before reading the buffer, in µs
    pub trigger_delay_us: u32,
    /// Consecutive CRC maintenance failures reported as persistent
    pub crc_fault_threshold: u8,
    /// Polling interval of `wait_for_edge`, in µs
    pub poll_interval_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slave: SlaveNumber::S0,
            trigger_delay_us: TRIGGER_DELAY_US,
            crc_fault_threshold: CRC_FAULT_THRESHOLD,
            poll_interval_us: POLL_INTERVAL_US,
        }
    }
}

impl Config {
    /// Use a different slave number
    #[must_use]
    pub const fn with_slave(mut self, slave: SlaveNumber) -> Self {
        self.slave = slave;
        self
    }

    /// Use a different CRC fault threshold (at least 1)
    #[must_use]
    pub const fn with_crc_fault_threshold(mut self, threshold: u8) -> Self {
        self.crc_fault_threshold = if threshold == 0 { 1 } else { threshold };
        self
    }

    /// Use a different `wait_for_edge` polling interval (at least 1 µs)
    #[must_use]
    pub const fn with_poll_interval(mut self, interval_us: u32) -> Self {
        self.poll_interval_us = if interval_us == 0 { 1 } else { interval_us };
        self
    }
}
