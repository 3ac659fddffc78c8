//! Snapshot of the complete register space and sensor identification

use crate::config::SlaveNumber;
use crate::register::{
    ActivationStatusRegister, IfabRegister, InterfaceMode1Register, InterfaceMode2Register,
    InterfaceMode4Register, InterfaceType, MAX_NUM_REG, Register, StatusRegister,
    TemperatureCoefficientYRegister,
};

/// Burst reads covering the register space: start register and length
pub(crate) const SNAPSHOT_BURSTS: [(Register, u8); 5] = [
    (Register::Stat, 15),
    (Register::TcoY, 3),
    (Register::DMag, 2),
    (Register::IifCnt, 1),
    (Register::T25o, 1),
];

/// TLE5012B variant, given by the factory interface setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorType {
    /// IIF interface
    E1000,
    /// PWM interface
    E5000,
    /// PWM interface with fast update and open drain output
    E5020,
    /// HSM interface
    E3005,
    /// SPC interface
    E9000,
}

impl SensorType {
    /// Product name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::E1000 => "TLE5012B_E1000",
            Self::E5000 => "TLE5012B_E5000",
            Self::E5020 => "TLE5012B_E5020",
            Self::E3005 => "TLE5012B_E3005",
            Self::E9000 => "TLE5012B_E9000",
        }
    }
}

/// Interface and variant derived from a register snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// Interface on IFA, IFB and IFC
    pub interface: InterfaceType,
    /// Sensor variant
    pub sensor: SensorType,
    /// Slave number reported by `STAT`
    pub slave: SlaveNumber,
}

/// Raw values of all 22 registers, in address order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterSnapshot {
    registers: [u16; MAX_NUM_REG],
}

impl RegisterSnapshot {
    /// Build a snapshot from register values in [`Register::ALL`] order
    #[must_use]
    pub const fn new(registers: [u16; MAX_NUM_REG]) -> Self {
        Self { registers }
    }

    /// Raw register values in [`Register::ALL`] order
    #[must_use]
    pub const fn registers(&self) -> &[u16; MAX_NUM_REG] {
        &self.registers
    }

    /// Raw value of one register
    #[must_use]
    pub fn get(&self, register: Register) -> u16 {
        self.registers[register.index()]
    }

    pub(crate) fn set(&mut self, register: Register, value: u16) {
        self.registers[register.index()] = value;
    }

    /// `STAT` view
    #[must_use]
    pub fn status(&self) -> StatusRegister {
        StatusRegister(self.get(Register::Stat))
    }

    /// `ACSTAT` view
    #[must_use]
    pub fn activation_status(&self) -> ActivationStatusRegister {
        ActivationStatusRegister(self.get(Register::Acstat))
    }

    /// `MOD_1` view
    #[must_use]
    pub fn mod1(&self) -> InterfaceMode1Register {
        InterfaceMode1Register(self.get(Register::Mod1))
    }

    /// `MOD_2` view
    #[must_use]
    pub fn mod2(&self) -> InterfaceMode2Register {
        InterfaceMode2Register(self.get(Register::Mod2))
    }

    /// `IFAB` view
    #[must_use]
    pub fn ifab(&self) -> IfabRegister {
        IfabRegister(self.get(Register::Ifab))
    }

    /// `MOD_4` view
    #[must_use]
    pub fn mod4(&self) -> InterfaceMode4Register {
        InterfaceMode4Register(self.get(Register::Mod4))
    }

    /// `TCO_Y` view
    #[must_use]
    pub fn tco_y(&self) -> TemperatureCoefficientYRegister {
        TemperatureCoefficientYRegister(self.get(Register::TcoY))
    }

    /// Identify the interface and variant
    ///
    /// PWM variants are told apart by the IFAB setup: E5000 uses the
    /// default filter update rate and push-pull outputs.
    #[must_use]
    pub fn identify(&self) -> Identity {
        let interface = self.mod4().interface();
        let ifab = self.ifab();
        let sensor = match interface {
            InterfaceType::Iif => SensorType::E1000,
            InterfaceType::Pwm if !ifab.firudr() && !ifab.ifabod() => SensorType::E5000,
            InterfaceType::Pwm => SensorType::E5020,
            InterfaceType::Hsm => SensorType::E3005,
            InterfaceType::Spc => SensorType::E9000,
        };
        Identity {
            interface,
            sensor,
            slave: SlaveNumber::from_snr(self.status().snr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(entries: &[(Register, u16)]) -> RegisterSnapshot {
        let mut snapshot = RegisterSnapshot::default();
        for &(register, value) in entries {
            snapshot.set(register, value);
        }
        snapshot
    }

    #[test]
    fn bursts_cover_every_register_once() {
        let mut seen = [false; MAX_NUM_REG];
        for (start, len) in SNAPSHOT_BURSTS {
            for register in &Register::ALL[start.index()..start.index() + usize::from(len)] {
                assert!(!seen[register.index()]);
                seen[register.index()] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn identifies_variants() {
        let iif = with(&[(Register::Mod4, 0x0000)]).identify();
        assert_eq!(iif.interface, InterfaceType::Iif);
        assert_eq!(iif.sensor, SensorType::E1000);

        assert_eq!(with(&[(Register::Mod4, 0x0001)]).identify().sensor, SensorType::E5000);
        assert_eq!(
            with(&[(Register::Mod4, 0x0001), (Register::Ifab, 0x0008)])
                .identify()
                .sensor,
            SensorType::E5020
        );
        assert_eq!(
            with(&[(Register::Mod4, 0x0001), (Register::Ifab, 0x0004)])
                .identify()
                .sensor,
            SensorType::E5020
        );
        assert_eq!(with(&[(Register::Mod4, 0x0002)]).identify().sensor, SensorType::E3005);
        assert_eq!(with(&[(Register::Mod4, 0x0003)]).identify().sensor, SensorType::E9000);
    }

    #[test]
    fn reports_slave_number() {
        let identity = with(&[(Register::Stat, 0x6000)]).identify();
        assert_eq!(identity.slave, SlaveNumber::S3);
        assert_eq!(identity.sensor.name(), "TLE5012B_E1000");
    }
}
