//! SSC frame exchange over SPI

use embedded_hal::spi::{Error as _, ErrorKind, Operation, SpiDevice};

use crate::error::PalError;

/// Largest number of words sent in one frame (command and data word)
pub const MAX_TX_WORDS: usize = 2;
/// Largest number of words received in one frame (data words and safety word)
pub const MAX_RX_WORDS: usize = 16;

/// Synchronous serial channel to the sensor
pub trait Spic {
    /// Bring up the interface
    ///
    /// # Errors
    ///
    /// Returns an error if the peripheral cannot be configured.
    fn init(&mut self) -> Result<(), PalError>;

    /// Shut down the interface
    ///
    /// # Errors
    ///
    /// Returns an error if the peripheral cannot be released.
    fn deinit(&mut self) -> Result<(), PalError>;

    /// Pulse chip select so the sensor snapshots its update buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the pulse cannot be generated.
    fn trigger_update(&mut self) -> Result<(), PalError>;

    /// Clock out `sent` and clock in `received`, MSB first, within one chip
    /// select assertion
    ///
    /// # Errors
    ///
    /// Returns an error on bus failures or oversized frames.
    fn send_receive(&mut self, sent: &[u16], received: &mut [u16]) -> Result<(), PalError>;

    /// Report a fault latched by a previous transfer
    ///
    /// # Errors
    ///
    /// Returns the latched fault.
    fn check_error_status(&self) -> Result<(), PalError>;
}

/// [`Spic`] over an `embedded-hal` [`SpiDevice`]
///
/// Each frame is one SPI transaction: the command words are written, then
/// the response words are read while MOSI idles.
#[derive(Debug)]
pub struct HalSpic<SPI> {
    spi: SPI,
    initialized: bool,
    last_error: Option<ErrorKind>,
}

impl<SPI> HalSpic<SPI>
where
    SPI: SpiDevice<u8>,
{
    /// Wrap an SPI device
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            initialized: false,
            last_error: None,
        }
    }

    /// Release the SPI device, consuming the adapter
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Kind of the last bus error, if any
    pub fn last_error_kind(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Forget a latched bus error
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn bus_error(&mut self, kind: ErrorKind) -> PalError {
        #[cfg(feature = "defmt")]
        defmt::warn!("SPI bus error: {}", defmt::Debug2Format(&kind));
        self.last_error = Some(kind);
        PalError::Interface
    }
}

impl<SPI> Spic for HalSpic<SPI>
where
    SPI: SpiDevice<u8>,
{
    fn init(&mut self) -> Result<(), PalError> {
        self.initialized = true;
        self.last_error = None;
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), PalError> {
        self.initialized = false;
        Ok(())
    }

    fn trigger_update(&mut self) -> Result<(), PalError> {
        if !self.initialized {
            return Err(PalError::Init);
        }
        // empty transaction: chip select low then high, no clocks
        self.spi
            .transaction(&mut [])
            .map_err(|e| self.bus_error(e.kind()))
    }

    fn send_receive(&mut self, sent: &[u16], received: &mut [u16]) -> Result<(), PalError> {
        if !self.initialized {
            return Err(PalError::Init);
        }
        if sent.is_empty() || sent.len() > MAX_TX_WORDS || received.len() > MAX_RX_WORDS {
            return Err(PalError::Config);
        }

        let mut tx = [0u8; 2 * MAX_TX_WORDS];
        for (chunk, word) in tx.chunks_exact_mut(2).zip(sent) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        let tx = &tx[..2 * sent.len()];
        let mut rx = [0u8; 2 * MAX_RX_WORDS];
        let rx = &mut rx[..2 * received.len()];

        #[cfg(feature = "defmt")]
        defmt::trace!("SSC tx {=[u8]:x}, expecting {} words", tx, received.len());

        let result = if rx.is_empty() {
            self.spi.transaction(&mut [Operation::Write(tx)])
        } else {
            self.spi
                .transaction(&mut [Operation::Write(tx), Operation::Read(&mut *rx)])
        };
        result.map_err(|e| self.bus_error(e.kind()))?;

        #[cfg(feature = "defmt")]
        defmt::trace!("SSC rx {=[u8]:x}", rx);

        for (word, chunk) in received.iter_mut().zip(rx.chunks_exact(2)) {
            *word = u16::from_be_bytes([chunk[0], chunk[1]]);
        }
        Ok(())
    }

    fn check_error_status(&self) -> Result<(), PalError> {
        match self.last_error {
            Some(_) => Err(PalError::Interface),
            None => Ok(()),
        }
    }
}
