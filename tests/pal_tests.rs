//! Tests for the embedded-hal adapters of the platform layer.

use embedded_hal::spi::{ErrorKind, ErrorType, Operation, SpiDevice};
use embedded_hal_mock::eh1::digital::{
    Edge, Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use tle5012b::PalError;
use tle5012b::pal::{Gpio, HalGpio, HalSpic, IntEvent, Level, Mode, NoPin, Spic, VLogic};

/// SPI device whose every transaction fails.
struct FailingSpi;

impl ErrorType for FailingSpi {
    type Error = ErrorKind;
}

impl SpiDevice<u8> for FailingSpi {
    fn transaction(&mut self, _operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
        Err(ErrorKind::ModeFault)
    }
}

#[test]
fn spic_exchanges_words_msb_first() {
    let expectations = [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x50, 0x81, 0x08, 0x05]),
        SpiTransaction::read_vec(vec![0xFE, 0x94]),
        SpiTransaction::transaction_end(),
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x80, 0x21]),
        SpiTransaction::read_vec(vec![0x40, 0x00, 0xFE, 0x39]),
        SpiTransaction::transaction_end(),
    ];
    let mut spic = HalSpic::new(SpiMock::new(&expectations));
    spic.init().unwrap();

    let mut safety = [0u16; 1];
    spic.send_receive(&[0x5081, 0x0805], &mut safety).unwrap();
    assert_eq!(safety, [0xFE94]);

    let mut response = [0u16; 2];
    spic.send_receive(&[0x8021], &mut response).unwrap();
    assert_eq!(response, [0x4000, 0xFE39]);
    assert_eq!(spic.check_error_status(), Ok(()));

    spic.release().done();
}

#[test]
fn spic_trigger_pulses_chip_select() {
    let expectations = [
        SpiTransaction::transaction_start(),
        SpiTransaction::transaction_end(),
    ];
    let mut spic = HalSpic::new(SpiMock::new(&expectations));
    spic.init().unwrap();

    spic.trigger_update().unwrap();

    spic.release().done();
}

#[test]
fn spic_rejects_bad_frames_without_bus_traffic() {
    let mut spic = HalSpic::new(SpiMock::<u8>::new(&[]));

    let mut rx = [0u16; 2];
    assert_eq!(spic.send_receive(&[0x8021], &mut rx), Err(PalError::Init));
    assert_eq!(spic.trigger_update(), Err(PalError::Init));

    spic.init().unwrap();
    assert_eq!(spic.send_receive(&[], &mut rx), Err(PalError::Config));
    assert_eq!(
        spic.send_receive(&[0x5081, 0x0805, 0x0000], &mut rx),
        Err(PalError::Config)
    );
    let mut oversized = [0u16; 17];
    assert_eq!(spic.send_receive(&[0x800F], &mut oversized), Err(PalError::Config));

    spic.deinit().unwrap();
    assert_eq!(spic.send_receive(&[0x8021], &mut rx), Err(PalError::Init));

    spic.release().done();
}

#[test]
fn spic_keeps_bus_error_kind() {
    let mut spic = HalSpic::new(FailingSpi);
    spic.init().unwrap();

    let mut rx = [0u16; 2];
    assert_eq!(spic.send_receive(&[0x8021], &mut rx), Err(PalError::Interface));
    assert_eq!(spic.last_error_kind(), Some(ErrorKind::ModeFault));
    assert_eq!(spic.check_error_status(), Err(PalError::Interface));

    spic.clear_error();
    assert_eq!(spic.check_error_status(), Ok(()));
}

#[test]
fn gpio_enable_follows_logic() {
    let pin = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::get(PinState::High),
    ]);
    let mut gpio = HalGpio::new(pin, Mode::Output, VLogic::Negative);
    assert_eq!(gpio.enable(), Err(PalError::Init));
    gpio.init().unwrap();

    gpio.enable().unwrap();
    gpio.disable().unwrap();
    assert_eq!(gpio.read(), Ok(Level::High));

    gpio.release().done();
}

#[test]
fn gpio_input_cannot_be_driven() {
    let pin = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let mut gpio = HalGpio::new(pin, Mode::Input, VLogic::Positive);
    gpio.init().unwrap();

    assert_eq!(gpio.write(Level::High), Err(PalError::Config));
    gpio.change_mode(Mode::Output).unwrap();
    gpio.write(Level::High).unwrap();

    gpio.release().done();
}

#[test]
fn gpio_detects_rising_edge_by_sampling() {
    let pin = PinMock::new(&[
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
    ]);
    let mut gpio = HalGpio::new(pin, Mode::Input, VLogic::Positive);
    gpio.init().unwrap();

    assert_eq!(gpio.interrupt_pending(), Err(PalError::Config));
    gpio.register_interrupt(IntEvent::RisingEdge).unwrap();

    let pending: Vec<bool> = (0..5).map(|_| gpio.interrupt_pending().unwrap()).collect();
    assert_eq!(pending, [false, false, false, true, false]);

    gpio.release().done();
}

#[test]
fn no_pin_is_inert() {
    let mut pin = NoPin;
    pin.init().unwrap();
    pin.enable().unwrap();
    pin.write(Level::High).unwrap();
    assert_eq!(pin.read(), Ok(Level::Low));
    pin.register_interrupt(IntEvent::FallingEdge).unwrap();
    assert_eq!(pin.interrupt_pending(), Ok(false));
}

#[tokio::test]
async fn gpio_waits_for_registered_edge() {
    let pin = PinMock::new(&[
        PinTransaction::wait_for_edge(Edge::Falling),
        PinTransaction::wait_for_edge(Edge::Rising),
    ]);
    let mut gpio = HalGpio::new(pin, Mode::Input, VLogic::Positive);
    gpio.init().unwrap();

    assert_eq!(gpio.wait_for_interrupt().await, Err(PalError::Config));

    gpio.register_interrupt(IntEvent::FallingEdge).unwrap();
    gpio.wait_for_interrupt().await.unwrap();
    gpio.register_interrupt(IntEvent::RisingEdge).unwrap();
    gpio.wait_for_interrupt().await.unwrap();

    gpio.release().done();
}
