//! Driver for the TLE5012B GMR angle sensor

use crate::{
    config::{Config, SlaveNumber},
    error::Error,
    pal::{Gpio, IntEvent, Mode, NoPin, Spic, Timer},
    register::{
        ActivationStatusRegister, AddressField, CalibrationMode, IfabRegister,
        InterfaceMode1Register, InterfaceMode2Register, InterfaceMode4Register, InterfaceType,
        MAX_BLOCK_WORDS, READ_BLOCK_CRC, Register, SafetyMode, StatusRegister,
        TemperatureCoefficientYRegister, UpdateMode,
    },
    regmap::{BitFieldId, FieldValue, REGISTER_MAP},
    safety::SafetyWord,
    snapshot::{Identity, RegisterSnapshot, SNAPSHOT_BURSTS},
    utils::{self, CRC_NUM_REGISTERS},
};

/// `ACSTAT` value requesting a firmware reset (`ASFRST` with `ASRST`)
const FIRMWARE_RESET: u16 = 0x0401;
/// Words `send_receive` returns on the `STAT` read that clears latched
/// safety flags
const SAFETY_RESET_WORDS: usize = 2;
/// Burst starting at `ASPD`: `ASPD`, `AREV`, `FSYNC`, `MOD_1`, `SIL`, `MOD_2`
const SPEED_BURST_WORDS: usize = 6;
const SPEED_MOD1_INDEX: usize = 3;
const SPEED_MOD2_INDEX: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    Uninitialized,
    Ready,
}

/// TLE5012B driver instance
///
/// Owns the SSC channel, the timer and the optional enable pin of one sensor.
/// All register accesses go through CRC-checked frames unless an unchecked
/// read is requested explicitly.
#[derive(Debug)]
pub struct Tle5012b<SPIC, TIMER, EN = NoPin> {
    spic: SPIC,
    timer: TIMER,
    enable: EN,
    config: Config,
    state: State,
    safety: SafetyWord,
    crc_registers: [u16; CRC_NUM_REGISTERS],
    crc_failures: u8,
}

impl<SPIC, TIMER> Tle5012b<SPIC, TIMER, NoPin>
where
    SPIC: Spic,
    TIMER: Timer,
{
    /// Create a driver for a sensor without a supply switch
    pub fn new(spic: SPIC, timer: TIMER, config: Config) -> Self {
        Self::with_enable_pin(spic, timer, NoPin, config)
    }
}

impl<SPIC, TIMER, EN> Tle5012b<SPIC, TIMER, EN>
where
    SPIC: Spic,
    TIMER: Timer,
    EN: Gpio,
{
    /// Create a driver for a sensor powered through `enable`
    pub fn with_enable_pin(spic: SPIC, timer: TIMER, enable: EN, config: Config) -> Self {
        Self {
            spic,
            timer,
            enable,
            config,
            state: State::Uninitialized,
            safety: SafetyWord::default(),
            crc_registers: [0; CRC_NUM_REGISTERS],
            crc_failures: 0,
        }
    }

    /// Release the platform objects, consuming the driver
    pub fn release(self) -> (SPIC, TIMER, EN) {
        (self.spic, self.timer, self.enable)
    }

    /// Configuration the driver was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether `init` completed
    pub fn is_initialized(&self) -> bool {
        self.state == State::Ready
    }

    /// Safety word of the last checked transfer
    pub fn read_safety(&self) -> SafetyWord {
        self.safety
    }

    /// Registers 0x08 - 0x0F as of the last parameter block read
    pub fn parameter_registers(&self) -> &[u16; CRC_NUM_REGISTERS] {
        &self.crc_registers
    }

    /// Consecutive failed CRC maintenance runs
    pub fn crc_fault_count(&self) -> u8 {
        self.crc_failures
    }

    /// Bring up the platform layer and the sensor
    ///
    /// Powers the sensor, writes the configured slave number and reads the
    /// CRC-protected parameter block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] on a second call. Any failing
    /// step is returned as is; the sensor is then powered down, the platform
    /// layer released and the driver left uninitialized.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.state == State::Ready {
            return Err(Error::AlreadyInitialized);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Initializing TLE5012B as {}", self.config.slave);

        if let Err(error) = self.bring_up() {
            #[cfg(feature = "defmt")]
            defmt::warn!("TLE5012B initialization failed: {}", error);
            self.state = State::Uninitialized;
            if let Err(_teardown_error) = self.shut_down() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Teardown after failed init: {}", _teardown_error);
            }
            return Err(error);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("TLE5012B ready");
        Ok(())
    }

    fn bring_up(&mut self) -> Result<(), Error> {
        self.timer.init()?;
        self.spic.init()?;
        self.enable.init()?;
        self.enable.change_mode(Mode::Output)?;
        self.enable.enable()?;
        self.state = State::Ready;
        self.crc_failures = 0;

        self.write_slave_number(self.config.slave)?;
        self.read_parameter_block()?;
        Ok(())
    }

    /// Power down the sensor and release the platform layer
    ///
    /// Does nothing on an uninitialized driver.
    ///
    /// # Errors
    ///
    /// Returns the first platform error. Every teardown step runs and the
    /// driver is uninitialized afterwards regardless.
    pub fn deinit(&mut self) -> Result<(), Error> {
        if self.state == State::Uninitialized {
            return Ok(());
        }
        self.state = State::Uninitialized;

        #[cfg(feature = "defmt")]
        defmt::debug!("Deinitializing TLE5012B");

        self.shut_down()
    }

    fn shut_down(&mut self) -> Result<(), Error> {
        let disabled = self.enable.disable();
        let enable = self.enable.deinit();
        let spic = self.spic.deinit();
        let timer = self.timer.deinit();
        disabled.and(enable).and(spic).and(timer)?;
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), Error> {
        match self.state {
            State::Ready => Ok(()),
            State::Uninitialized => Err(Error::NotInitialized),
        }
    }

    /// Validate the last safety word against the transfer
    ///
    /// On failure the latched flags are flushed with `reset_safety` and the
    /// original fault is returned.
    fn check_safety(&mut self, command: u16, data: &[u16]) -> Result<(), Error> {
        let Err(error) = self.safety.check(command, data) else {
            return Ok(());
        };

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Safety word 0x{:04X} rejected for command 0x{:04X}: {}",
            self.safety.raw(),
            command,
            error
        );

        if let Err(_reset_error) = self.reset_safety() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Safety reset failed: {}", _reset_error);
        }
        Err(error)
    }

    /// Exchange a read frame and validate it
    ///
    /// `out` is written only when the safety word checks out.
    fn read_frame(&mut self, address: AddressField, out: &mut [u16]) -> Result<(), Error> {
        let len = usize::from(address.length);
        if len == 0 || len > MAX_BLOCK_WORDS || len != out.len() {
            return Err(Error::Config);
        }

        self.latch_if_buffered(address.update)?;
        let command = address.command();
        let mut rx = [0u16; MAX_BLOCK_WORDS + 1];
        self.spic.send_receive(&[command], &mut rx[..=len])?;
        self.safety = SafetyWord::new(rx[len]);
        self.check_safety(command, &rx[..len])?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Read {} words at {}: {:x}", len, address.register, &rx[..len]);

        out.copy_from_slice(&rx[..len]);
        Ok(())
    }

    fn latch_if_buffered(&mut self, update: UpdateMode) -> Result<(), Error> {
        match update {
            UpdateMode::Buffered => self.trigger_update(),
            UpdateMode::Current => Ok(()),
        }
    }

    /// Exchange a write frame and validate it
    fn write_frame(&mut self, register: Register, value: u16) -> Result<(), Error> {
        let command = AddressField::write(register).command();

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:04X} to {}", value, register);

        let mut rx = [0u16; 1];
        self.spic.send_receive(&[command, value], &mut rx)?;
        self.safety = SafetyWord::new(rx[0]);
        self.check_safety(command, &[value])
    }

    fn burst(start: Register, words: &[u16], update: UpdateMode) -> Result<AddressField, Error> {
        let length = u8::try_from(words.len()).map_err(|_| Error::Config)?;
        Ok(AddressField::read(start, length).with_update(update))
    }

    /// Read a register with a checked frame
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_register(&mut self, register: Register) -> Result<u16, Error> {
        self.read_register_with(register, UpdateMode::Current, SafetyMode::Checked)
    }

    /// Read a register from the chosen buffer, with or without safety word
    ///
    /// Buffered reads first latch the update buffer with
    /// [`trigger_update`](Self::trigger_update).
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or, for checked reads, its safety
    /// word check fails.
    pub fn read_register_with(
        &mut self,
        register: Register,
        update: UpdateMode,
        safety: SafetyMode,
    ) -> Result<u16, Error> {
        self.ensure_ready()?;
        match safety {
            SafetyMode::Checked => {
                let mut data = [0u16; 1];
                self.read_frame(AddressField::read(register, 1).with_update(update), &mut data)?;
                Ok(data[0])
            }
            SafetyMode::Unchecked => {
                self.latch_if_buffered(update)?;
                let command = AddressField::read(register, 0).with_update(update).command();
                let mut rx = [0u16; 1];
                self.spic.send_receive(&[command], &mut rx)?;
                Ok(rx[0])
            }
        }
    }

    /// Read `data.len()` consecutive registers starting at `start`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty burst or one longer than 15
    /// words; `data` is left untouched on any error.
    pub fn read_more_registers(
        &mut self,
        start: Register,
        data: &mut [u16],
        update: UpdateMode,
    ) -> Result<(), Error> {
        self.ensure_ready()?;
        let address = Self::burst(start, data, update)?;
        self.read_frame(address, data)
    }

    /// Read a burst from the current registers and validate its CRC
    ///
    /// # Errors
    ///
    /// Returns [`Error::Crc`] on a CRC mismatch; `data` is left untouched on
    /// any error.
    pub fn read_block_crc(&mut self, start: Register, data: &mut [u16]) -> Result<(), Error> {
        self.read_more_registers(start, data, UpdateMode::Current)
    }

    /// Read the CRC-protected registers 0x08 - 0x0F
    ///
    /// # Errors
    ///
    /// Returns an error if the burst fails its safety word check.
    pub fn read_parameter_block(&mut self) -> Result<[u16; CRC_NUM_REGISTERS], Error> {
        self.ensure_ready()?;
        let mut block = [0u16; CRC_NUM_REGISTERS];
        self.read_frame(READ_BLOCK_CRC, &mut block)?;
        self.crc_registers = block;
        Ok(block)
    }

    /// Read a bit-field from the current registers
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the field is not readable.
    pub fn read_from_sensor(&mut self, id: BitFieldId) -> Result<FieldValue, Error> {
        self.read_field_with(id, UpdateMode::Current)
    }

    /// Read a bit-field from the chosen buffer
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the field is not readable.
    pub fn read_field_with(&mut self, id: BitFieldId, update: UpdateMode) -> Result<FieldValue, Error> {
        self.ensure_ready()?;
        let field = REGISTER_MAP.resolve(id).ok_or(Error::Config)?;
        if !field.access.is_readable() {
            return Err(Error::Config);
        }
        let raw = self.read_register_with(field.register, update, SafetyMode::Checked)?;
        Ok(field.extract(raw))
    }

    /// Update a bit-field with a read-modify-write of its register
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] without bus traffic if the field is not
    /// writable or the value does not fit.
    pub fn write_to_sensor(&mut self, id: BitFieldId, value: impl Into<FieldValue>) -> Result<(), Error> {
        self.ensure_ready()?;
        let field = REGISTER_MAP.resolve(id).ok_or(Error::Config)?;
        let value = value.into();
        if !field.access.is_writable() || field.encode(value).is_none() {
            return Err(Error::Config);
        }
        let raw = self.read_register(field.register)?;
        let updated = field.insert(raw, value).ok_or(Error::Config)?;
        self.write_register(field.register, updated)
    }

    /// Write a register
    ///
    /// Writes to registers 0x08 - 0x0F are followed by
    /// [`regular_crc_update`](Self::regular_crc_update).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] without bus traffic if no field of the
    /// register is writable.
    pub fn write_register(&mut self, register: Register, value: u16) -> Result<(), Error> {
        self.ensure_ready()?;
        if !REGISTER_MAP.is_writable(register) {
            return Err(Error::Config);
        }
        self.write_frame(register, value)?;
        if register.is_crc_protected() {
            self.regular_crc_update()?;
        }
        Ok(())
    }

    /// Set the slave number in `STAT`
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails its safety word check.
    pub fn write_slave_number(&mut self, slave: SlaveNumber) -> Result<(), Error> {
        self.write_register(Register::Stat, slave.stat_word())
    }

    /// Select the interface on IFA, IFB and IFC
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the CRC maintenance fails.
    pub fn write_interface_type(&mut self, interface: InterfaceType) -> Result<(), Error> {
        self.write_to_sensor(BitFieldId::IfMd, u16::from(interface as u8))
    }

    /// Select the auto-calibration mode
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the CRC maintenance fails.
    pub fn set_calibration(&mut self, mode: CalibrationMode) -> Result<(), Error> {
        self.write_to_sensor(BitFieldId::AutoCal, u16::from(mode as u8))
    }

    /// Recompute the parameter CRC and store it in `TCO_Y[7:0]`
    ///
    /// # Errors
    ///
    /// Platform errors are returned unchanged. Any other failure, including
    /// `SFUSE` reported afterwards, returns [`Error::Crc`], or
    /// [`Error::PersistentCrcFault`] once `crc_fault_threshold` runs in a row
    /// have failed.
    pub fn regular_crc_update(&mut self) -> Result<(), Error> {
        self.ensure_ready()?;
        match self.update_parameter_crc() {
            Ok(()) => {
                self.crc_failures = 0;
                Ok(())
            }
            Err(Error::Pal(error)) => Err(Error::Pal(error)),
            Err(_error) => {
                self.crc_failures = self.crc_failures.saturating_add(1);

                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "CRC update failed ({} in a row): {}",
                    self.crc_failures,
                    _error
                );

                if self.crc_failures >= self.config.crc_fault_threshold {
                    Err(Error::PersistentCrcFault)
                } else {
                    Err(Error::Crc)
                }
            }
        }
    }

    fn update_parameter_crc(&mut self) -> Result<(), Error> {
        let mut block = self.read_parameter_block()?;
        let crc = utils::parameter_crc(&block);
        let tco_y = (block[CRC_NUM_REGISTERS - 1] & 0xFF00) | u16::from(crc);
        block[CRC_NUM_REGISTERS - 1] = tco_y;
        self.crc_registers = block;

        #[cfg(feature = "defmt")]
        defmt::debug!("Parameter CRC 0x{:02X}", crc);

        self.trigger_update()?;
        self.write_frame(Register::TcoY, tco_y)?;
        if self.read_status()?.sfuse() {
            return Err(Error::Crc);
        }
        Ok(())
    }

    /// Reset the sensor firmware
    ///
    /// # Errors
    ///
    /// Returns an error if the `ACSTAT` write fails.
    pub fn reset_firmware(&mut self) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Firmware reset");
        self.write_register(Register::Acstat, FIRMWARE_RESET)
    }

    /// Clear the latched safety word flags
    ///
    /// Triggers an update and reads `STAT` without checking the response.
    ///
    /// # Errors
    ///
    /// Returns platform errors only.
    pub fn reset_safety(&mut self) -> Result<(), Error> {
        self.ensure_ready()?;
        self.trigger_update()?;
        let command = AddressField::read(Register::Stat, 1).command();
        let mut rx = [0u16; SAFETY_RESET_WORDS];
        self.spic.send_receive(&[command], &mut rx)?;
        Ok(())
    }

    /// Latch the update buffers and wait for the snapshot to settle
    ///
    /// # Errors
    ///
    /// Returns platform errors only.
    pub fn trigger_update(&mut self) -> Result<(), Error> {
        self.ensure_ready()?;
        self.spic.trigger_update()?;
        self.timer.delay_micro(self.config.trigger_delay_us)?;
        Ok(())
    }

    /// Switch the sensor supply on
    ///
    /// # Errors
    ///
    /// Returns the enable pin error.
    pub fn enable_sensor(&mut self) -> Result<(), Error> {
        self.enable.enable()?;
        Ok(())
    }

    /// Switch the sensor supply off
    ///
    /// # Errors
    ///
    /// Returns the enable pin error.
    pub fn disable_sensor(&mut self) -> Result<(), Error> {
        self.enable.disable()?;
        Ok(())
    }

    /// Poll `pin` until `event` occurs
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] after `timeout_ms` milliseconds. A zero
    /// poll interval is treated as 1 µs so the timeout always expires.
    pub fn wait_for_edge<G: Gpio>(
        &mut self,
        pin: &mut G,
        event: IntEvent,
        timeout_ms: u32,
    ) -> Result<(), Error> {
        self.ensure_ready()?;
        pin.register_interrupt(event)?;
        self.timer.start()?;
        let result = self.poll_edge(pin, timeout_ms);
        self.timer.stop()?;
        result
    }

    fn poll_edge<G: Gpio>(&mut self, pin: &mut G, timeout_ms: u32) -> Result<(), Error> {
        loop {
            if pin.interrupt_pending()? {
                return Ok(());
            }
            if self.timer.elapsed()? >= timeout_ms {
                #[cfg(feature = "defmt")]
                defmt::debug!("No edge within {} ms", timeout_ms);
                return Err(Error::Timeout);
            }
            self.timer.delay_micro(self.config.poll_interval_us.max(1))?;
        }
    }

    /// Read `STAT`
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_status(&mut self) -> Result<StatusRegister, Error> {
        self.read_register(Register::Stat).map(StatusRegister)
    }

    /// Read `ACSTAT`
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_activation_status(&mut self) -> Result<ActivationStatusRegister, Error> {
        self.read_active_status(UpdateMode::Current)
    }

    /// Read `ACSTAT` from the chosen buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_active_status(&mut self, update: UpdateMode) -> Result<ActivationStatusRegister, Error> {
        self.read_register_with(Register::Acstat, update, SafetyMode::Checked)
            .map(ActivationStatusRegister)
    }

    /// Read `MOD_1`
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_mod1(&mut self) -> Result<InterfaceMode1Register, Error> {
        self.read_register(Register::Mod1).map(InterfaceMode1Register)
    }

    /// Read `MOD_2`
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_mod2(&mut self) -> Result<InterfaceMode2Register, Error> {
        self.read_register(Register::Mod2).map(InterfaceMode2Register)
    }

    /// Read `IFAB`
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_ifab(&mut self) -> Result<IfabRegister, Error> {
        self.read_register(Register::Ifab).map(IfabRegister)
    }

    /// Read `MOD_4`
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_mod4(&mut self) -> Result<InterfaceMode4Register, Error> {
        self.read_register(Register::Mod4).map(InterfaceMode4Register)
    }

    /// Read `TCO_Y`
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn read_tco_y(&mut self) -> Result<TemperatureCoefficientYRegister, Error> {
        self.read_register(Register::TcoY)
            .map(TemperatureCoefficientYRegister)
    }

    /// Read all 22 registers
    ///
    /// # Errors
    ///
    /// Returns an error if any burst fails its safety word check.
    pub fn read_register_snapshot(&mut self) -> Result<RegisterSnapshot, Error> {
        self.ensure_ready()?;
        let mut snapshot = RegisterSnapshot::default();
        for (start, length) in SNAPSHOT_BURSTS {
            let mut buffer = [0u16; MAX_BLOCK_WORDS];
            let words = &mut buffer[..usize::from(length)];
            self.read_frame(AddressField::read(start, length), words)?;
            for (register, &value) in Register::ALL[start.index()..].iter().zip(words.iter()) {
                snapshot.set(*register, value);
            }
        }
        Ok(snapshot)
    }

    /// Identify the interface setup and sensor variant
    ///
    /// # Errors
    ///
    /// Returns an error if the register snapshot cannot be read.
    pub fn identify(&mut self) -> Result<Identity, Error> {
        let identity = self.read_register_snapshot()?.identify();

        #[cfg(feature = "defmt")]
        defmt::info!("Detected {} ({})", identity.sensor.name(), identity.interface);

        Ok(identity)
    }

    /// Read the signed 15-bit angle value
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn raw_angle_value(&mut self, update: UpdateMode) -> Result<i16, Error> {
        let raw = self.read_register_with(Register::Aval, update, SafetyMode::Checked)?;
        Ok(utils::extract_signed15(raw))
    }

    /// Read the angle in degrees (-180° to 180°)
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn angle_value(&mut self) -> Result<f32, Error> {
        self.angle_value_with(UpdateMode::Current)
    }

    /// Read the angle in degrees from the chosen buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn angle_value_with(&mut self, update: UpdateMode) -> Result<f32, Error> {
        Ok(utils::angle_degrees(self.raw_angle_value(update)?))
    }

    /// Read the signed 15-bit angle speed value
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn raw_angle_speed(&mut self, update: UpdateMode) -> Result<i16, Error> {
        let raw = self.read_register_with(Register::Aspd, update, SafetyMode::Checked)?;
        Ok(utils::extract_signed15(raw))
    }

    /// Read the angle speed in °/s
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn angle_speed(&mut self) -> Result<f32, Error> {
        self.angle_speed_with(UpdateMode::Current)
    }

    /// Read the angle speed in °/s from the chosen buffer
    ///
    /// Speed, `MOD_1` and `MOD_2` are read in a single burst so the
    /// conversion uses the configuration that produced the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAngle`] for a zero angle range and
    /// [`Error::AngleSpeed`] for an unknown FIR update rate.
    pub fn angle_speed_with(&mut self, update: UpdateMode) -> Result<f32, Error> {
        let mut words = [0u16; SPEED_BURST_WORDS];
        self.read_more_registers(Register::Aspd, &mut words, update)?;

        let raw_speed = utils::extract_signed15(words[0]);
        let mod1 = InterfaceMode1Register(words[SPEED_MOD1_INDEX]);
        let mod2 = InterfaceMode2Register(words[SPEED_MOD2_INDEX]);
        let range = utils::angle_range_degrees(mod2.angrange()).ok_or(Error::InvalidAngle)?;
        let prediction = if mod2.predict() { 3 } else { 2 };
        utils::angle_speed_dps(range, raw_speed, u16::from(mod1.firmd()), prediction)
            .ok_or(Error::AngleSpeed)
    }

    /// Read the signed 9-bit revolution counter
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn num_revolutions(&mut self) -> Result<i16, Error> {
        self.num_revolutions_with(UpdateMode::Current)
    }

    /// Read the revolution counter from the chosen buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn num_revolutions_with(&mut self, update: UpdateMode) -> Result<i16, Error> {
        let raw = self.read_register_with(Register::Arev, update, SafetyMode::Checked)?;
        Ok(utils::extract_signed9(raw))
    }

    /// Read the signed 9-bit temperature value
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn raw_temperature(&mut self, update: UpdateMode) -> Result<i16, Error> {
        let raw = self.read_register_with(Register::Fsync, update, SafetyMode::Checked)?;
        Ok(utils::extract_signed9(raw))
    }

    /// Read the temperature in °C
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn temperature(&mut self) -> Result<f32, Error> {
        self.temperature_with(UpdateMode::Current)
    }

    /// Read the temperature in °C from the chosen buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn temperature_with(&mut self, update: UpdateMode) -> Result<f32, Error> {
        Ok(utils::temperature_celsius(self.raw_temperature(update)?))
    }

    /// Read the 11-bit angle range setting
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn raw_angle_range(&mut self) -> Result<u16, Error> {
        let raw = self.read_register(Register::Mod2)?;
        Ok(utils::extract_angle_range(raw))
    }

    /// Read the angle range in degrees
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAngle`] for a zero range setting.
    pub fn angle_range(&mut self) -> Result<f32, Error> {
        utils::angle_range_degrees(self.raw_angle_range()?).ok_or(Error::InvalidAngle)
    }

    /// Read the raw X signal of the GMR bridge
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn raw_x(&mut self) -> Result<i16, Error> {
        let raw = self.read_register(Register::AdcX)?;
        Ok(utils::sign_extend(raw, 16))
    }

    /// Read the raw Y signal of the GMR bridge
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer or its safety word check fails.
    pub fn raw_y(&mut self) -> Result<i16, Error> {
        let raw = self.read_register(Register::AdcY)?;
        Ok(utils::sign_extend(raw, 16))
    }
}
