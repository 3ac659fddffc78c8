//! Bit-field map of the TLE5012B register space
//!
//! Every named field of every register is described by a [`BitField`]:
//! register, bit offset, width, access mode and reset value. The driver uses
//! the map for field level reads and read-modify-write updates.

use crate::register::{AddressField, Register};
use crate::register::Register as Reg;
use self::Access::{R, RES, RU, RW, RWU};
use self::BitFieldId as Id;

/// Access mode of a bit-field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Read only
    R,
    /// Write only
    W,
    /// Read and write
    RW,
    /// Read only, updated by the sensor
    RU,
    /// Read and write, updated by the sensor
    RWU,
    /// Reserved
    RES,
    /// Updated by the sensor, no interface access
    U,
}

impl Access {
    /// Whether the field can be read over SSC
    #[must_use]
    pub const fn is_readable(self) -> bool {
        matches!(self, Self::R | Self::RW | Self::RU | Self::RWU)
    }

    /// Whether the field can be written over SSC
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::W | Self::RW | Self::RWU)
    }
}

/// Identifier of a bit-field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum BitFieldId {
    // STAT
    Srst,
    Swd,
    Svr,
    Sfuse,
    Sdspu,
    Sov,
    Sxyol,
    Smagol,
    StatReserved,
    Sadct,
    Srom,
    NogmrXy,
    NogmrA,
    Snr,
    Rdst,
    // ACSTAT
    Asrst,
    Aswd,
    Asvr,
    Asfuse,
    Asdspu,
    Asov,
    Asvecxy,
    Asvegmag,
    AcstatReserved1,
    Asadct,
    Asfrst,
    AcstatReserved2,
    // AVAL
    AngVal,
    Rdav,
    // ASPD
    AngSpd,
    Rdas,
    // AREV
    Revol,
    Fcnt,
    Rdrev,
    // FSYNC
    Tempr,
    Fsync,
    // MOD_1
    IifMod,
    DspuHold,
    Mod1Reserved1,
    ClkSel,
    Mod1Reserved2,
    FirMd,
    // SIL
    AdctvX,
    AdctvY,
    AdctvEn,
    SilReserved1,
    FuseRel,
    SilReserved2,
    FiltInv,
    FiltPar,
    // MOD_2
    AutoCal,
    Predict,
    AngDir,
    AngRange,
    Mod2Reserved,
    // MOD_3
    PadDrv,
    SscOd,
    SpikeF,
    AngBase,
    // OFFX, OFFY, SYNCH
    OffxReserved,
    XOffset,
    OffyReserved,
    YOffset,
    SynchReserved,
    Synch,
    // IFAB
    IfadHyst,
    IfabOd,
    FirUdr,
    Ortho,
    // MOD_4
    IfMd,
    Mod4Reserved,
    IfabRes,
    HsmPlp,
    TcoXt,
    // TCO_Y
    CrcPar,
    SBist,
    TcoYt,
    // ADC_X, ADC_Y
    AdcX,
    AdcY,
    // D_MAG
    Mag,
    DMagReserved,
    // T_RAW
    TRaw,
    TRawReserved,
    Ttgl,
    // IIF_CNT
    IifCnt,
    IifCntReserved,
    // T25O
    T250,
    T25oReserved,
}

/// Value read from a bit-field
///
/// Signed fields are sign extended to `i16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldValue {
    /// Field without sign
    Unsigned(u16),
    /// Two's complement field
    Signed(i16),
}

impl FieldValue {
    /// Widen the value, keeping the sign
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Unsigned(v) => v as i32,
            Self::Signed(v) => v as i32,
        }
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        Self::Unsigned(value)
    }
}

impl From<i16> for FieldValue {
    fn from(value: i16) -> Self {
        Self::Signed(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Unsigned(u16::from(value))
    }
}

/// Location and properties of a named bit-field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    /// Field identifier
    pub id: BitFieldId,
    /// Datasheet name
    pub name: &'static str,
    /// Register holding the field
    pub register: Register,
    /// Position of the least significant bit
    pub offset: u8,
    /// Number of bits (1 - 16)
    pub width: u8,
    /// Access mode
    pub access: Access,
    /// Reset value of the field
    pub reset: u16,
    /// Field holds a two's complement value
    pub signed: bool,
}

impl BitField {
    const fn new(
        id: BitFieldId,
        name: &'static str,
        register: Register,
        offset: u8,
        width: u8,
        access: Access,
        reset: u16,
    ) -> Self {
        Self {
            id,
            name,
            register,
            offset,
            width,
            access,
            reset,
            signed: false,
        }
    }

    const fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// Mask of the field bits within the register word
    #[must_use]
    pub const fn mask(&self) -> u16 {
        self.max() << self.offset
    }

    /// Largest unsigned value the field can hold
    #[must_use]
    pub const fn max(&self) -> u16 {
        if self.width >= 16 {
            u16::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    /// Extract the field from a register word
    #[must_use]
    pub const fn extract(&self, raw: u16) -> FieldValue {
        let bits = (raw & self.mask()) >> self.offset;
        if self.signed {
            FieldValue::Signed(crate::utils::sign_extend(bits, self.width))
        } else {
            FieldValue::Unsigned(bits)
        }
    }

    /// Encode `value` into the field bits, checking the range
    ///
    /// Unsigned fields take negative values as out of range.
    #[must_use]
    pub fn encode(&self, value: FieldValue) -> Option<u16> {
        match value {
            FieldValue::Unsigned(v) => (v <= self.max()).then_some(v),
            FieldValue::Signed(v) if !self.signed => {
                u16::try_from(v).ok().filter(|&v| v <= self.max())
            }
            FieldValue::Signed(v) => {
                let half = 1i32 << (self.width - 1);
                let v = i32::from(v);
                if (-half..half).contains(&v) {
                    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                    Some((v as u16) & self.max())
                } else {
                    None
                }
            }
        }
    }

    /// Replace the field within `raw`, leaving the other bits untouched
    ///
    /// Returns `None` if `value` does not fit the field.
    #[must_use]
    pub fn insert(&self, raw: u16, value: FieldValue) -> Option<u16> {
        let bits = self.encode(value)?;
        Some((raw & !self.mask()) | (bits << self.offset))
    }
}

const BIT_FIELDS: &[BitField] = &[
    BitField::new(Id::Srst, "SRST", Reg::Stat, 0, 1, RU, 1),
    BitField::new(Id::Swd, "SWD", Reg::Stat, 1, 1, RU, 0),
    BitField::new(Id::Svr, "SVR", Reg::Stat, 2, 1, RU, 0),
    BitField::new(Id::Sfuse, "SFUSE", Reg::Stat, 3, 1, RU, 0),
    BitField::new(Id::Sdspu, "SDSPU", Reg::Stat, 4, 1, RU, 0),
    BitField::new(Id::Sov, "SOV", Reg::Stat, 5, 1, RU, 0),
    BitField::new(Id::Sxyol, "SXYOL", Reg::Stat, 6, 1, RU, 0),
    BitField::new(Id::Smagol, "SMAGOL", Reg::Stat, 7, 1, RU, 0),
    BitField::new(Id::StatReserved, "STAT_RES", Reg::Stat, 8, 1, RES, 0),
    BitField::new(Id::Sadct, "SADCT", Reg::Stat, 9, 1, RU, 0),
    BitField::new(Id::Srom, "SROM", Reg::Stat, 10, 1, RU, 0),
    BitField::new(Id::NogmrXy, "NOGMRXY", Reg::Stat, 11, 1, RU, 0),
    BitField::new(Id::NogmrA, "NOGMRA", Reg::Stat, 12, 1, RU, 0),
    BitField::new(Id::Snr, "SNR", Reg::Stat, 13, 2, RW, 0),
    BitField::new(Id::Rdst, "RDST", Reg::Stat, 15, 1, RU, 0),
    BitField::new(Id::Asrst, "ASRST", Reg::Acstat, 0, 1, RWU, 0),
    BitField::new(Id::Aswd, "ASWD", Reg::Acstat, 1, 1, RW, 1),
    BitField::new(Id::Asvr, "ASVR", Reg::Acstat, 2, 1, RW, 1),
    BitField::new(Id::Asfuse, "ASFUSE", Reg::Acstat, 3, 1, RW, 1),
    BitField::new(Id::Asdspu, "ASDSPU", Reg::Acstat, 4, 1, RW, 1),
    BitField::new(Id::Asov, "ASOV", Reg::Acstat, 5, 1, RW, 1),
    BitField::new(Id::Asvecxy, "ASVECXY", Reg::Acstat, 6, 1, RW, 1),
    BitField::new(Id::Asvegmag, "ASVEGMAG", Reg::Acstat, 7, 1, RW, 1),
    BitField::new(Id::AcstatReserved1, "ACSTAT_RES1", Reg::Acstat, 8, 1, RES, 0),
    BitField::new(Id::Asadct, "ASADCT", Reg::Acstat, 9, 1, RW, 0),
    BitField::new(Id::Asfrst, "ASFRST", Reg::Acstat, 10, 1, RWU, 0),
    BitField::new(Id::AcstatReserved2, "ACSTAT_RES2", Reg::Acstat, 11, 5, RES, 0),
    BitField::new(Id::AngVal, "ANGVAL", Reg::Aval, 0, 15, RU, 0).signed(),
    BitField::new(Id::Rdav, "RDAV", Reg::Aval, 15, 1, RU, 0),
    BitField::new(Id::AngSpd, "ANGSPD", Reg::Aspd, 0, 15, RU, 0).signed(),
    BitField::new(Id::Rdas, "RDAS", Reg::Aspd, 15, 1, RU, 0),
    BitField::new(Id::Revol, "REVOL", Reg::Arev, 0, 9, RU, 0).signed(),
    BitField::new(Id::Fcnt, "FCNT", Reg::Arev, 9, 6, RU, 0),
    BitField::new(Id::Rdrev, "RDREV", Reg::Arev, 15, 1, RU, 0),
    BitField::new(Id::Tempr, "TEMPR", Reg::Fsync, 0, 9, RU, 0).signed(),
    BitField::new(Id::Fsync, "FSYNC", Reg::Fsync, 9, 7, RU, 0),
    BitField::new(Id::IifMod, "IIFMOD", Reg::Mod1, 0, 2, RW, 1),
    BitField::new(Id::DspuHold, "DSPUHOLD", Reg::Mod1, 2, 1, RW, 0),
    BitField::new(Id::Mod1Reserved1, "MOD1_RES1", Reg::Mod1, 3, 1, RES, 0),
    BitField::new(Id::ClkSel, "CLKSEL", Reg::Mod1, 4, 1, RW, 0),
    BitField::new(Id::Mod1Reserved2, "MOD1_RES2", Reg::Mod1, 5, 9, RES, 0),
    BitField::new(Id::FirMd, "FIRMD", Reg::Mod1, 14, 2, RW, 1),
    BitField::new(Id::AdctvX, "ADCTVX", Reg::Sil, 0, 3, RW, 0),
    BitField::new(Id::AdctvY, "ADCTVY", Reg::Sil, 3, 3, RW, 0),
    BitField::new(Id::AdctvEn, "ADCTVEN", Reg::Sil, 6, 1, RW, 0),
    BitField::new(Id::SilReserved1, "SIL_RES1", Reg::Sil, 7, 3, RES, 0),
    BitField::new(Id::FuseRel, "FUSEREL", Reg::Sil, 10, 1, RW, 0),
    BitField::new(Id::SilReserved2, "SIL_RES2", Reg::Sil, 11, 3, RES, 0),
    BitField::new(Id::FiltInv, "FILTINV", Reg::Sil, 14, 1, RW, 0),
    BitField::new(Id::FiltPar, "FILTPAR", Reg::Sil, 15, 1, RW, 0),
    BitField::new(Id::AutoCal, "AUTOCAL", Reg::Mod2, 0, 2, RW, 1),
    BitField::new(Id::Predict, "PREDICT", Reg::Mod2, 2, 1, RW, 0),
    BitField::new(Id::AngDir, "ANGDIR", Reg::Mod2, 3, 1, RW, 0),
    BitField::new(Id::AngRange, "ANGRANGE", Reg::Mod2, 4, 11, RW, 0x080),
    BitField::new(Id::Mod2Reserved, "MOD2_RES", Reg::Mod2, 15, 1, RES, 0),
    BitField::new(Id::PadDrv, "PADDRV", Reg::Mod3, 0, 2, RW, 0),
    BitField::new(Id::SscOd, "SSCOD", Reg::Mod3, 2, 1, RW, 0),
    BitField::new(Id::SpikeF, "SPIKEF", Reg::Mod3, 3, 1, RW, 0),
    BitField::new(Id::AngBase, "ANG_BASE", Reg::Mod3, 4, 12, RW, 0).signed(),
    BitField::new(Id::OffxReserved, "OFFX_RES", Reg::Offx, 0, 4, RES, 0),
    BitField::new(Id::XOffset, "XOFFSET", Reg::Offx, 4, 12, RW, 0).signed(),
    BitField::new(Id::OffyReserved, "OFFY_RES", Reg::Offy, 0, 4, RES, 0),
    BitField::new(Id::YOffset, "YOFFSET", Reg::Offy, 4, 12, RW, 0).signed(),
    BitField::new(Id::SynchReserved, "SYNCH_RES", Reg::Synch, 0, 4, RES, 0),
    BitField::new(Id::Synch, "SYNCH", Reg::Synch, 4, 12, RW, 0).signed(),
    BitField::new(Id::IfadHyst, "IFADHYST", Reg::Ifab, 0, 2, RW, 0),
    BitField::new(Id::IfabOd, "IFABOD", Reg::Ifab, 2, 1, RW, 0),
    BitField::new(Id::FirUdr, "FIRUDR", Reg::Ifab, 3, 1, RW, 0),
    BitField::new(Id::Ortho, "ORTHO", Reg::Ifab, 4, 12, RW, 0).signed(),
    BitField::new(Id::IfMd, "IFMD", Reg::Mod4, 0, 2, RW, 0),
    BitField::new(Id::Mod4Reserved, "MOD4_RES", Reg::Mod4, 2, 1, RES, 0),
    BitField::new(Id::IfabRes, "IFABRES", Reg::Mod4, 3, 2, RW, 0),
    BitField::new(Id::HsmPlp, "HSMPLP", Reg::Mod4, 5, 4, RW, 0),
    BitField::new(Id::TcoXt, "TCOXT", Reg::Mod4, 9, 7, RW, 0).signed(),
    BitField::new(Id::CrcPar, "CRCPAR", Reg::TcoY, 0, 8, RW, 0),
    BitField::new(Id::SBist, "SBIST", Reg::TcoY, 8, 1, RW, 1),
    BitField::new(Id::TcoYt, "TCOYT", Reg::TcoY, 9, 7, RW, 0).signed(),
    BitField::new(Id::AdcX, "ADCX", Reg::AdcX, 0, 16, RU, 0).signed(),
    BitField::new(Id::AdcY, "ADCY", Reg::AdcY, 0, 16, RU, 0).signed(),
    BitField::new(Id::Mag, "MAG", Reg::DMag, 0, 10, RU, 0),
    BitField::new(Id::DMagReserved, "DMAG_RES", Reg::DMag, 10, 6, RES, 0),
    BitField::new(Id::TRaw, "TRAW", Reg::TRaw, 0, 10, RU, 0),
    BitField::new(Id::TRawReserved, "TRAW_RES", Reg::TRaw, 10, 5, RES, 0),
    BitField::new(Id::Ttgl, "TTGL", Reg::TRaw, 15, 1, RU, 0),
    BitField::new(Id::IifCnt, "IIFCNT", Reg::IifCnt, 0, 15, RU, 0),
    BitField::new(Id::IifCntReserved, "IIFCNT_RES", Reg::IifCnt, 15, 1, RES, 0),
    BitField::new(Id::T250, "T250", Reg::T25o, 0, 9, R, 0).signed(),
    BitField::new(Id::T25oReserved, "T25O_RES", Reg::T25o, 9, 7, RES, 0),
];

/// Lookup table over all bit-fields of the sensor
#[derive(Debug, Clone, Copy)]
pub struct RegisterMap {
    fields: &'static [BitField],
}

/// The TLE5012B register map
pub const REGISTER_MAP: RegisterMap = RegisterMap { fields: BIT_FIELDS };

impl RegisterMap {
    /// All bit-fields, ordered by register and offset
    #[must_use]
    pub const fn fields(&self) -> &'static [BitField] {
        self.fields
    }

    /// Resolve a bit-field id to its location
    #[must_use]
    pub fn resolve(&self, id: BitFieldId) -> Option<&'static BitField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Find a bit-field by its datasheet name
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&'static BitField> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Single-word read access to the register holding a bit-field
    #[must_use]
    pub fn address_of(&self, id: BitFieldId) -> Option<AddressField> {
        self.resolve(id).map(|f| AddressField::read(f.register, 1))
    }

    /// Bit-fields of one register
    pub fn fields_of(&self, register: Register) -> impl Iterator<Item = &'static BitField> {
        self.fields.iter().filter(move |f| f.register == register)
    }

    /// Whether any field of the register accepts writes
    #[must_use]
    pub fn is_writable(&self, register: Register) -> bool {
        self.fields_of(register).any(|f| f.access.is_writable())
    }

    /// Register word with every field at its reset value
    #[must_use]
    pub fn reset_value(&self, register: Register) -> u16 {
        self.fields_of(register)
            .fold(0, |acc, f| acc | ((f.reset << f.offset) & f.mask()))
    }
}
