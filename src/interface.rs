use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_io::Write;

use crate::command::Command;
use crate::error::{Error, ErrorKind};
use crate::frame;

/// Hold time for the low and high flanks of a control-line pulse.
pub(crate) const PULSE_HOLD_MS: u32 = 1;

/// Settle time after the reset pulse.
///
/// The controller re-initialises after a reset and ignores frames for
/// roughly this long; callers see `reset` as a multi-second call.
pub(crate) const RESET_SETTLE_MS: u32 = 2_000;

/// Settle time after the wake-up pulse.
pub(crate) const WAKE_SETTLE_MS: u32 = 10;

/// The connection between display and the controlling device: the serial
/// transport plus the two control lines that bring the controller into a
/// responsive state.
pub(crate) struct DisplayInterface<UART, WAKE, RST, DELAY> {
    /// Serial transport, write half
    uart: UART,
    /// WAKE_UP line, leaves stop mode without a full reset
    wake: WAKE,
    /// RST line, hard-resets the controller
    rst: RST,
    delay: DELAY,
}

impl<UART, WAKE, RST, DELAY> DisplayInterface<UART, WAKE, RST, DELAY>
where
    UART: Write,
    WAKE: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new `DisplayInterface` struct
    pub fn new(uart: UART, wake: WAKE, rst: RST, delay: DELAY) -> Self {
        DisplayInterface {
            uart,
            wake,
            rst,
            delay,
        }
    }

    /// Drives both control lines to their rest level (high).
    pub fn init(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.wake.set_high().map_err(ErrorKind::Wake)?;
        self.rst.set_high().map_err(ErrorKind::Reset)
    }

    /// Frames a command and hands it to the transport in a single write.
    ///
    /// A short write leaves the controller with a truncated frame and is
    /// surfaced as [`ErrorKind::ShortWrite`]; there is no partial-write
    /// recovery on this link.
    pub fn send(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> Result<(), Error<UART, WAKE, RST>> {
        let frame = frame::encode(command, payload)?;

        let written = self.uart.write(&frame).map_err(ErrorKind::Serial)?;
        if written < frame.len() {
            return Err(ErrorKind::ShortWrite {
                written,
                expected: frame.len(),
            });
        }

        self.uart.flush().map_err(ErrorKind::Serial)
    }

    /// Resets the controller.
    ///
    /// Blocks through the whole pulse train, including the two-second
    /// settle time the controller needs before it accepts frames again.
    pub fn reset(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        pulse(&mut self.rst, &mut self.delay, RESET_SETTLE_MS).map_err(ErrorKind::Reset)
    }

    /// Wakes the controller from stop mode.
    ///
    /// See [`Epd4in3::sleep`](crate::Epd4in3::sleep)
    pub fn wake(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        pulse(&mut self.wake, &mut self.delay, WAKE_SETTLE_MS).map_err(ErrorKind::Wake)
    }

    /// Hands the collaborators back.
    pub fn release(self) -> (UART, WAKE, RST, DELAY) {
        (self.uart, self.wake, self.rst, self.delay)
    }
}

/// One low → high → low pulse train with the protocol hold times,
/// followed by the line's settle wait.
fn pulse<PIN, DELAY>(pin: &mut PIN, delay: &mut DELAY, settle_ms: u32) -> Result<(), PIN::Error>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    pin.set_low()?;
    delay.delay_ms(PULSE_HOLD_MS);
    pin.set_high()?;
    delay.delay_ms(PULSE_HOLD_MS);
    pin.set_low()?;
    delay.delay_ms(settle_ms);

    Ok(())
}
