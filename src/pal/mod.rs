//! Platform abstraction layer
//!
//! The driver talks to hardware only through the [`Spic`], [`Gpio`] and
//! [`Timer`] traits. Adapters over `embedded-hal` 1.0 are provided for
//! boards that already expose those traits.

mod gpio;
mod spic;
mod timer;

pub use gpio::{Gpio, HalGpio, IntEvent, Level, Mode, NoPin, VLogic};
pub use spic::{HalSpic, MAX_RX_WORDS, MAX_TX_WORDS, Spic};
pub use timer::{DelayTimer, Timer};
