//! Delays and elapsed-time measurement

use embedded_hal::delay::DelayNs;

use crate::error::PalError;

/// Millisecond timer with blocking delays
#[allow(clippy::missing_errors_doc)]
pub trait Timer {
    /// Bring up the timer
    fn init(&mut self) -> Result<(), PalError>;
    /// Release the timer
    fn deinit(&mut self) -> Result<(), PalError>;
    /// Start measuring from zero
    fn start(&mut self) -> Result<(), PalError>;
    /// Milliseconds since [`Timer::start`]
    fn elapsed(&self) -> Result<u32, PalError>;
    /// Stop measuring
    fn stop(&mut self) -> Result<(), PalError>;
    /// Block for `ms` milliseconds
    fn delay_milli(&mut self, ms: u32) -> Result<(), PalError>;
    /// Block for `us` microseconds
    fn delay_micro(&mut self, us: u32) -> Result<(), PalError>;
}

/// [`Timer`] over an `embedded-hal` [`DelayNs`]
///
/// Elapsed time is the sum of the delays performed since
/// [`Timer::start`]. Work done between delays is not counted, which is
/// enough for bounded polling loops that sleep between polls.
#[derive(Debug)]
pub struct DelayTimer<D> {
    delay: D,
    initialized: bool,
    running: bool,
    elapsed_us: u64,
}

impl<D> DelayTimer<D>
where
    D: DelayNs,
{
    /// Wrap a delay provider
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            initialized: false,
            running: false,
            elapsed_us: 0,
        }
    }

    /// Release the delay provider, consuming the adapter
    pub fn release(self) -> D {
        self.delay
    }

    fn ready(&self) -> Result<(), PalError> {
        if self.initialized {
            Ok(())
        } else {
            Err(PalError::Init)
        }
    }

    fn advance(&mut self, us: u64) {
        if self.running {
            self.elapsed_us = self.elapsed_us.saturating_add(us);
        }
    }
}

impl<D> Timer for DelayTimer<D>
where
    D: DelayNs,
{
    fn init(&mut self) -> Result<(), PalError> {
        self.initialized = true;
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), PalError> {
        self.initialized = false;
        self.running = false;
        Ok(())
    }

    fn start(&mut self) -> Result<(), PalError> {
        self.ready()?;
        self.running = true;
        self.elapsed_us = 0;
        Ok(())
    }

    fn elapsed(&self) -> Result<u32, PalError> {
        self.ready()?;
        if !self.running {
            return Err(PalError::Init);
        }
        Ok(u32::try_from(self.elapsed_us / 1000).unwrap_or(u32::MAX))
    }

    fn stop(&mut self) -> Result<(), PalError> {
        self.ready()?;
        self.running = false;
        Ok(())
    }

    fn delay_milli(&mut self, ms: u32) -> Result<(), PalError> {
        self.ready()?;
        self.delay.delay_ms(ms);
        self.advance(u64::from(ms) * 1000);
        Ok(())
    }

    fn delay_micro(&mut self, us: u32) -> Result<(), PalError> {
        self.ready()?;
        self.delay.delay_us(us);
        self.advance(u64::from(us));
        Ok(())
    }
}
