//! Digital pins used by the sensor board (enable switch, interface pins)

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::digital::Wait;

use crate::error::PalError;

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Input
    Input,
    /// Push-pull output
    Output,
}

/// Pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic low
    Low,
    /// Logic high
    High,
}

/// Edge reported by an interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntEvent {
    /// High to low transition
    FallingEdge,
    /// Low to high transition
    RisingEdge,
}

/// Logic polarity of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VLogic {
    /// Active low
    Negative,
    /// Active high
    #[default]
    Positive,
}

impl VLogic {
    const fn active(self) -> Level {
        match self {
            Self::Negative => Level::Low,
            Self::Positive => Level::High,
        }
    }

    const fn inactive(self) -> Level {
        match self {
            Self::Negative => Level::High,
            Self::Positive => Level::Low,
        }
    }
}

/// General purpose pin
#[allow(clippy::missing_errors_doc)]
pub trait Gpio {
    /// Bring up the pin
    fn init(&mut self) -> Result<(), PalError>;
    /// Release the pin
    fn deinit(&mut self) -> Result<(), PalError>;
    /// Switch the pin direction
    fn change_mode(&mut self, mode: Mode) -> Result<(), PalError>;
    /// Sample the pin level
    fn read(&mut self) -> Result<Level, PalError>;
    /// Drive the pin; fails with [`PalError::Config`] on inputs
    fn write(&mut self, level: Level) -> Result<(), PalError>;
    /// Drive the active level of the pin's logic
    fn enable(&mut self) -> Result<(), PalError>;
    /// Drive the inactive level of the pin's logic
    fn disable(&mut self) -> Result<(), PalError>;
    /// Report a fault latched by a previous access
    fn check_error_status(&self) -> Result<(), PalError>;
    /// Select the edge reported by [`Gpio::interrupt_pending`]
    fn register_interrupt(&mut self, event: IntEvent) -> Result<(), PalError>;
    /// Whether the registered edge occurred since the last call
    fn interrupt_pending(&mut self) -> Result<bool, PalError>;
}

/// [`Gpio`] over an `embedded-hal` pin
///
/// Edges are detected by comparing consecutive samples, so
/// [`Gpio::interrupt_pending`] must be polled faster than the signal
/// toggles. Pins that implement [`Wait`] can block on the edge instead with
/// [`HalGpio::wait_for_interrupt`].
#[derive(Debug)]
pub struct HalGpio<P> {
    pin: P,
    mode: Mode,
    logic: VLogic,
    initialized: bool,
    faulted: bool,
    event: Option<IntEvent>,
    last_level: Option<Level>,
}

impl<P> HalGpio<P>
where
    P: InputPin + OutputPin,
{
    /// Wrap a pin
    pub fn new(pin: P, mode: Mode, logic: VLogic) -> Self {
        Self {
            pin,
            mode,
            logic,
            initialized: false,
            faulted: false,
            event: None,
            last_level: None,
        }
    }

    /// Release the pin, consuming the adapter
    pub fn release(self) -> P {
        self.pin
    }

    fn ready(&self) -> Result<(), PalError> {
        if self.initialized {
            Ok(())
        } else {
            Err(PalError::Init)
        }
    }

    fn pin_error(&mut self) -> PalError {
        #[cfg(feature = "defmt")]
        defmt::warn!("GPIO access failed");
        self.faulted = true;
        PalError::Interface
    }
}

impl<P> HalGpio<P>
where
    P: InputPin + OutputPin + Wait,
{
    /// Wait for the registered edge
    ///
    /// # Errors
    ///
    /// Returns [`PalError::Config`] if no edge was registered, or
    /// [`PalError::Interface`] if the pin reports an error.
    pub async fn wait_for_interrupt(&mut self) -> Result<(), PalError> {
        self.ready()?;
        let result = match self.event.ok_or(PalError::Config)? {
            IntEvent::FallingEdge => self.pin.wait_for_falling_edge().await,
            IntEvent::RisingEdge => self.pin.wait_for_rising_edge().await,
        };
        result.map_err(|_| self.pin_error())
    }
}

impl<P> Gpio for HalGpio<P>
where
    P: InputPin + OutputPin,
{
    fn init(&mut self) -> Result<(), PalError> {
        self.initialized = true;
        self.faulted = false;
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), PalError> {
        self.initialized = false;
        self.event = None;
        self.last_level = None;
        Ok(())
    }

    fn change_mode(&mut self, mode: Mode) -> Result<(), PalError> {
        self.ready()?;
        self.mode = mode;
        Ok(())
    }

    fn read(&mut self) -> Result<Level, PalError> {
        self.ready()?;
        match self.pin.is_high() {
            Ok(true) => Ok(Level::High),
            Ok(false) => Ok(Level::Low),
            Err(_) => Err(self.pin_error()),
        }
    }

    fn write(&mut self, level: Level) -> Result<(), PalError> {
        self.ready()?;
        if self.mode == Mode::Input {
            return Err(PalError::Config);
        }
        let result = match level {
            Level::Low => self.pin.set_low(),
            Level::High => self.pin.set_high(),
        };
        result.map_err(|_| self.pin_error())
    }

    fn enable(&mut self) -> Result<(), PalError> {
        self.write(self.logic.active())
    }

    fn disable(&mut self) -> Result<(), PalError> {
        self.write(self.logic.inactive())
    }

    fn check_error_status(&self) -> Result<(), PalError> {
        if self.faulted {
            Err(PalError::Interface)
        } else {
            Ok(())
        }
    }

    fn register_interrupt(&mut self, event: IntEvent) -> Result<(), PalError> {
        self.ready()?;
        self.event = Some(event);
        self.last_level = None;
        Ok(())
    }

    fn interrupt_pending(&mut self) -> Result<bool, PalError> {
        let event = self.event.ok_or(PalError::Config)?;
        let level = self.read()?;
        let edge = matches!(
            (event, self.last_level, level),
            (IntEvent::FallingEdge, Some(Level::High), Level::Low)
                | (IntEvent::RisingEdge, Some(Level::Low), Level::High)
        );
        self.last_level = Some(level);
        Ok(edge)
    }
}

/// Placeholder for an absent pin
///
/// Every operation succeeds without effect and reads as low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoPin;

impl Gpio for NoPin {
    fn init(&mut self) -> Result<(), PalError> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), PalError> {
        Ok(())
    }

    fn change_mode(&mut self, _mode: Mode) -> Result<(), PalError> {
        Ok(())
    }

    fn read(&mut self) -> Result<Level, PalError> {
        Ok(Level::Low)
    }

    fn write(&mut self, _level: Level) -> Result<(), PalError> {
        Ok(())
    }

    fn enable(&mut self) -> Result<(), PalError> {
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PalError> {
        Ok(())
    }

    fn check_error_status(&self) -> Result<(), PalError> {
        Ok(())
    }

    fn register_interrupt(&mut self, _event: IntEvent) -> Result<(), PalError> {
        Ok(())
    }

    fn interrupt_pending(&mut self) -> Result<bool, PalError> {
        Ok(false)
    }
}
