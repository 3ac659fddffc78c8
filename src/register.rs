//! Register addresses, command words and register views for the TLE5012B

/// Number of registers in the sensor's register space
pub const MAX_NUM_REG: usize = 0x16;
/// Largest number of data words a single command can transfer (4-bit ND)
pub const MAX_BLOCK_WORDS: usize = 15;

const READ_SENSOR: u16 = 0x8000;
const WRITE_SENSOR: u16 = 0x5000;
const ADDRESS_MASK: u16 = 0x3F;
const LENGTH_MASK: u16 = 0x0F;

/// Register addresses for the TLE5012B
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Status
    Stat = 0x00,
    /// Activation status
    Acstat = 0x01,
    /// Angle value
    Aval = 0x02,
    /// Angle speed
    Aspd = 0x03,
    /// Angle revolution
    Arev = 0x04,
    /// Frame synchronization and temperature
    Fsync = 0x05,
    /// Interface mode 1
    Mod1 = 0x06,
    /// SIL
    Sil = 0x07,
    /// Interface mode 2
    Mod2 = 0x08,
    /// Interface mode 3
    Mod3 = 0x09,
    /// Offset X
    Offx = 0x0A,
    /// Offset Y
    Offy = 0x0B,
    /// Synchronicity
    Synch = 0x0C,
    /// IFAB
    Ifab = 0x0D,
    /// Interface mode 4
    Mod4 = 0x0E,
    /// Temperature coefficient Y and parameter CRC
    TcoY = 0x0F,
    /// ADC X raw value
    AdcX = 0x10,
    /// ADC Y raw value
    AdcY = 0x11,
    /// Angle vector magnitude
    DMag = 0x14,
    /// Temperature sensor raw value
    TRaw = 0x15,
    /// IIF counter value
    IifCnt = 0x20,
    /// Temperature 25 °C offset value
    T25o = 0x30,
}

impl Register {
    /// All registers in address order
    pub const ALL: [Register; MAX_NUM_REG] = [
        Self::Stat,
        Self::Acstat,
        Self::Aval,
        Self::Aspd,
        Self::Arev,
        Self::Fsync,
        Self::Mod1,
        Self::Sil,
        Self::Mod2,
        Self::Mod3,
        Self::Offx,
        Self::Offy,
        Self::Synch,
        Self::Ifab,
        Self::Mod4,
        Self::TcoY,
        Self::AdcX,
        Self::AdcY,
        Self::DMag,
        Self::TRaw,
        Self::IifCnt,
        Self::T25o,
    ];

    /// Register address (6 bits)
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Look up a register by address
    #[must_use]
    pub fn from_address(address: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.address() == address)
    }

    /// Position of the register in [`Register::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&r| r == self).unwrap_or_default()
    }

    /// Whether the register is covered by the parameter CRC in `TCO_Y[7:0]`
    #[must_use]
    pub const fn is_crc_protected(self) -> bool {
        matches!(self as u8, 0x08..=0x0F)
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

/// Read directly from the register or from the update buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum UpdateMode {
    /// Access the current value
    #[default]
    Current = 0x0000,
    /// Access the snapshot taken at the last update trigger
    Buffered = 0x0400,
}

/// Whether a read is followed by a safety word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyMode {
    /// Request a safety word and validate it
    #[default]
    Checked,
    /// Single data word without safety word (ND = 0)
    Unchecked,
}

/// Direction of a register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    /// Read access
    Read,
    /// Write access, with the configuration lock `1010`
    Write,
}

/// Register access target: address, opcode and block length
///
/// Command word layout:
/// - 15: 1 read, 0 write
/// - 14:11: lock, `0000` for reads, `1010` for configuration writes
/// - 10: update buffer access
/// - 9:4: register address
/// - 3:0: number of data words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressField {
    /// Target register (first register of a burst)
    pub register: Register,
    /// Access direction
    pub opcode: Opcode,
    /// Number of data words (0 - 15)
    pub length: u8,
    /// Update buffer selection
    pub update: UpdateMode,
}

impl AddressField {
    /// Read `length` consecutive words starting at `register`
    #[must_use]
    pub const fn read(register: Register, length: u8) -> Self {
        Self {
            register,
            opcode: Opcode::Read,
            length,
            update: UpdateMode::Current,
        }
    }

    /// Write a single word to `register`
    #[must_use]
    pub const fn write(register: Register) -> Self {
        Self {
            register,
            opcode: Opcode::Write,
            length: 1,
            update: UpdateMode::Current,
        }
    }

    /// Same access, served from the given buffer
    #[must_use]
    pub const fn with_update(mut self, update: UpdateMode) -> Self {
        self.update = update;
        self
    }

    /// Build the 16-bit command word
    #[must_use]
    pub const fn command(&self) -> u16 {
        let base = match self.opcode {
            Opcode::Read => READ_SENSOR,
            Opcode::Write => WRITE_SENSOR,
        };
        base | self.update as u16
            | ((self.register as u16 & ADDRESS_MASK) << 4)
            | (self.length as u16 & LENGTH_MASK)
    }
}

/// Command reading the CRC-protected parameter block 0x08 - 0x0F
pub const READ_BLOCK_CRC: AddressField = AddressField::read(Register::Mod2, 8);

/// Interface mode on the IFA, IFB and IFC pins (`MOD_4` `IFMD`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterfaceType {
    /// Incremental interface
    Iif = 0,
    /// Pulse-width modulation
    Pwm = 1,
    /// Hall switch mode
    Hsm = 2,
    /// Short-PWM-code
    Spc = 3,
}

impl InterfaceType {
    /// Decode the 2-bit `IFMD` field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Iif,
            1 => Self::Pwm,
            2 => Self::Hsm,
            _ => Self::Spc,
        }
    }
}

/// Automatic calibration of offset and amplitude synchronicity (`MOD_2`
/// `AUTOCAL`)
///
/// The CRC check of the calibration registers is disabled by the sensor
/// while auto-calibration is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CalibrationMode {
    /// No auto-calibration
    NoAutoCal = 0,
    /// Update every angle update cycle
    Mode1 = 1,
    /// Update every 1.5 revolutions
    Mode2 = 2,
    /// Update every 11.25°
    Mode3 = 3,
}

bitfield::bitfield! {
    /// STAT
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct StatusRegister(u16);
    impl Debug;
    u8;
    /// Read status
    pub rdst, _: 15;
    /// Slave number
    pub snr, _: 14, 13;
    /// No valid GMR angle value
    pub nogmra, _: 12;
    /// No valid GMR XY values
    pub nogmrxy, _: 11;
    /// Status ROM
    pub srom, _: 10;
    /// Status ADC test
    pub sadct, _: 9;
    /// Status magnitude out of limit
    pub smagol, _: 7;
    /// Status X,Y data out of limit
    pub sxyol, _: 6;
    /// Status overflow
    pub sov, _: 5;
    /// Status digital signal processing unit
    pub sdspu, _: 4;
    /// Status fuse CRC
    pub sfuse, _: 3;
    /// Status voltage regulator
    pub svr, _: 2;
    /// Status watchdog
    pub swd, _: 1;
    /// Status reset
    pub srst, _: 0;
}

bitfield::bitfield! {
    /// ACSTAT
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ActivationStatusRegister(u16);
    impl Debug;
    u8;
    /// Activation of firmware reset
    pub asfrst, set_asfrst: 10;
    /// Enable ADC test vector check
    pub asadct, set_asadct: 9;
    /// Activation of magnitude check
    pub asvegmag, set_asvegmag: 7;
    /// Activation of X,Y out of limit check
    pub asvecxy, set_asvecxy: 6;
    /// Enable DSPU overflow check
    pub asov, set_asov: 5;
    /// Activation DSPU BIST
    pub asdspu, set_asdspu: 4;
    /// Activation fuse CRC
    pub asfuse, set_asfuse: 3;
    /// Enable voltage regulator check
    pub asvr, set_asvr: 2;
    /// Enable DSPU watchdog
    pub aswd, set_aswd: 1;
    /// Activation of hardware reset
    pub asrst, set_asrst: 0;
}

bitfield::bitfield! {
    /// MOD_1
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct InterfaceMode1Register(u16);
    impl Debug;
    u8;
    /// Update rate setting
    pub firmd, set_firmd: 15, 14;
    /// Switch to external clock at start-up only
    pub clksel, set_clksel: 4;
    /// DSPU on hold, no watchdog reset is performed by the DSPU
    pub dspuhold, set_dspuhold: 2;
    /// Incremental interface mode
    pub iifmod, set_iifmod: 1, 0;
}

bitfield::bitfield! {
    /// MOD_2
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct InterfaceMode2Register(u16);
    impl Debug;
    u8;
    /// Angle range: the output is multiplied by `ANG_RANGE / 128`
    ///
    /// - `0x080` = 360° (-180° to 180°)
    /// - `0x200` = 90° (-45° to 45°)
    pub u16, angrange, set_angrange: 14, 4;
    /// Inverts angle, angle speed and revolution counter
    pub angdir, set_angdir: 3;
    /// Angle prediction based on the current angle speed
    pub predict, set_predict: 2;
    /// Automatic calibration mode
    pub autocal, set_autocal: 1, 0;
}

bitfield::bitfield! {
    /// IFAB
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct IfabRegister(u16);
    impl Debug;
    u8;
    /// Orthogonality correction of X and Y components (12-bit signed)
    pub u16, ortho, set_ortho: 15, 4;
    /// Initial filter update rate
    pub firudr, set_firudr: 3;
    /// IFA, IFB, IFC output mode
    pub ifabod, set_ifabod: 2;
    /// Hysteresis (multi-purpose)
    pub ifadhyst, set_ifadhyst: 1, 0;
}

bitfield::bitfield! {
    /// MOD_4
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct InterfaceMode4Register(u16);
    impl Debug;
    u8;
    /// X-offset temperature coefficient (7-bit signed)
    pub tcoxt, set_tcoxt: 15, 9;
    /// Hall switch mode (multi-purpose)
    pub hsmplp, set_hsmplp: 8, 5;
    /// IIF resolution (multi-purpose)
    pub ifabres, set_ifabres: 4, 3;
    /// Interface mode on IFA, IFB, IFC
    pub ifmd, set_ifmd: 1, 0;
}

impl InterfaceMode4Register {
    /// Decoded interface mode
    #[must_use]
    pub fn interface(&self) -> InterfaceType {
        InterfaceType::from_bits(self.ifmd())
    }
}

bitfield::bitfield! {
    /// TCO_Y
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct TemperatureCoefficientYRegister(u16);
    impl Debug;
    u8;
    /// Y-offset temperature coefficient (7-bit signed)
    pub tcoyt, set_tcoyt: 15, 9;
    /// Startup BIST
    pub sbist, set_sbist: 8;
    /// CRC of the parameters 0x08 - 0x0F
    pub crcpar, set_crcpar: 7, 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_words_match_wire_layout() {
        assert_eq!(AddressField::read(Register::Stat, 1).command(), 0x8001);
        assert_eq!(AddressField::read(Register::Aval, 1).command(), 0x8021);
        assert_eq!(
            AddressField::read(Register::Aval, 1)
                .with_update(UpdateMode::Buffered)
                .command(),
            0x8421
        );
        assert_eq!(AddressField::read(Register::Stat, 0).command(), 0x8000);
        assert_eq!(AddressField::write(Register::Mod2).command(), 0x5081);
        assert_eq!(AddressField::write(Register::TcoY).command(), 0x50F1);
        assert_eq!(READ_BLOCK_CRC.command(), 0x8088);
        assert_eq!(AddressField::read(Register::T25o, 1).command(), 0x8301);
    }

    #[test]
    fn register_space_is_complete() {
        assert_eq!(Register::ALL.len(), MAX_NUM_REG);
        for (i, reg) in Register::ALL.iter().enumerate() {
            assert!(u16::from(reg.address()) <= ADDRESS_MASK);
            assert_eq!(reg.index(), i);
            assert_eq!(Register::from_address(reg.address()), Some(*reg));
        }
        assert_eq!(Register::from_address(0x12), None);
    }

    #[test]
    fn crc_protected_range() {
        assert!(!Register::Sil.is_crc_protected());
        assert!(Register::Mod2.is_crc_protected());
        assert!(Register::TcoY.is_crc_protected());
        assert!(!Register::AdcX.is_crc_protected());
    }

    #[test]
    fn status_view_decodes_bits() {
        let stat = StatusRegister(0x8000 | 0x4000 | 0x0008);
        assert!(stat.rdst());
        assert_eq!(stat.snr(), 2);
        assert!(stat.sfuse());
        assert!(!stat.srst());
    }

    #[test]
    fn mod2_view_decodes_angle_range() {
        let mut mod2 = InterfaceMode2Register(0x0804);
        assert_eq!(mod2.angrange(), 0x080);
        assert!(mod2.predict());
        mod2.set_autocal(3);
        assert_eq!(mod2.0, 0x0807);
    }
}
