//! Async variant of the driver
//!
//! Same framing, same pulse timings; the serial write and the timed
//! waits yield to the executor instead of blocking. The control lines
//! stay ordinary [`OutputPin`]s, setting a push-pull output is not worth
//! a suspension point.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::Write;

use crate::color::Color;
use crate::command::Command;
use crate::config::{ChineseFont, EnglishFont, MemoryMode, Rotation};
use crate::error::{Error, ErrorKind};
use crate::frame;
use crate::interface::{PULSE_HOLD_MS, RESET_SETTLE_MS, WAKE_SETTLE_MS};
use crate::payload;

/// Epd4in3 driver, async flavor
///
/// The operation surface mirrors [`crate::Epd4in3`] one to one.
pub struct Epd4in3<UART, WAKE, RST, DELAY> {
    uart: UART,
    wake: WAKE,
    rst: RST,
    delay: DELAY,
}

impl<UART, WAKE, RST, DELAY> Epd4in3<UART, WAKE, RST, DELAY>
where
    UART: Write,
    WAKE: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new driver and drives both control lines to their high
    /// rest level.
    pub fn new(
        uart: UART,
        mut wake: WAKE,
        mut rst: RST,
        delay: DELAY,
    ) -> Result<Self, Error<UART, WAKE, RST>> {
        wake.set_high().map_err(ErrorKind::Wake)?;
        rst.set_high().map_err(ErrorKind::Reset)?;

        Ok(Epd4in3 {
            uart,
            wake,
            rst,
            delay,
        })
    }

    /// Frames a command and hands it to the transport in a single write.
    async fn send(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> Result<(), Error<UART, WAKE, RST>> {
        let frame = frame::encode(command, payload)?;

        let written = self.uart.write(&frame).await.map_err(ErrorKind::Serial)?;
        if written < frame.len() {
            return Err(ErrorKind::ShortWrite {
                written,
                expected: frame.len(),
            });
        }

        self.uart.flush().await.map_err(ErrorKind::Serial)
    }

    /// Hard-resets the controller; the two-second settle time is spent
    /// in the executor, not busy-waiting.
    pub async fn reset(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.rst.set_low().map_err(ErrorKind::Reset)?;
        self.delay.delay_ms(PULSE_HOLD_MS).await;
        self.rst.set_high().map_err(ErrorKind::Reset)?;
        self.delay.delay_ms(PULSE_HOLD_MS).await;
        self.rst.set_low().map_err(ErrorKind::Reset)?;
        self.delay.delay_ms(RESET_SETTLE_MS).await;

        Ok(())
    }

    /// Wakes the controller from stop mode.
    pub async fn wake(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.wake.set_low().map_err(ErrorKind::Wake)?;
        self.delay.delay_ms(PULSE_HOLD_MS).await;
        self.wake.set_high().map_err(ErrorKind::Wake)?;
        self.delay.delay_ms(PULSE_HOLD_MS).await;
        self.wake.set_low().map_err(ErrorKind::Wake)?;
        self.delay.delay_ms(WAKE_SETTLE_MS).await;

        Ok(())
    }

    /// Sends a raw command byte with an arbitrary payload.
    pub async fn send_raw(
        &mut self,
        command: u8,
        payload: &[u8],
    ) -> Result<(), Error<UART, WAKE, RST>> {
        let command = Command::from_address(command).ok_or(ErrorKind::InvalidCommand(command))?;
        self.send(command, payload).await
    }

    /// Asks the controller for a sign of life.
    pub async fn handshake(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::Handshake, &[]).await
    }

    /// Switches the serial link to a new baud rate.
    pub async fn set_baud_rate(&mut self, baud: u32) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::SetBaudRate, &baud.to_be_bytes()).await
    }

    /// Requests the current baud rate; the reply arrives on the
    /// controller's TX line.
    pub async fn read_baud_rate(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::ReadBaudRate, &[]).await
    }

    /// Selects the storage area that fonts and images are read from.
    pub async fn set_memory_mode(&mut self, mode: MemoryMode) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::SetMemoryMode, &[mode as u8]).await
    }

    /// Puts the controller into its low-power stop mode.
    pub async fn sleep(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::EnterStopMode, &[]).await
    }

    /// Commits the drawing buffer to the panel.
    pub async fn update(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::Update, &[]).await
    }

    /// Sets the screen orientation.
    pub async fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::SetRotation, &[rotation as u8]).await
    }

    /// Copies the font library from the TF card into NAND flash.
    pub async fn import_font(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::ImportFont, &[]).await
    }

    /// Copies the image files from the TF card into NAND flash.
    pub async fn import_image(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::ImportImage, &[]).await
    }

    /// Sets the foreground and background gray levels.
    pub async fn set_color(
        &mut self,
        foreground: Color,
        background: Color,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::SetColor, &[foreground as u8, background as u8])
            .await
    }

    /// Selects the dot-matrix size of the English font.
    pub async fn set_english_font(
        &mut self,
        font: EnglishFont,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::SetEnglishFont, &[font as u8]).await
    }

    /// Selects the dot-matrix size of the Chinese font.
    pub async fn set_chinese_font(
        &mut self,
        font: ChineseFont,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::SetChineseFont, &[font as u8]).await
    }

    /// Draws a single pixel in the foreground color.
    pub async fn draw_pixel(&mut self, x: u16, y: u16) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::DrawPixel, &payload::words(&[x, y])).await
    }

    /// Draws a line between two points.
    pub async fn draw_line(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::DrawLine, &payload::words(&[x0, y0, x1, y1]))
            .await
    }

    /// Fills the rectangle spanned by two corner points.
    pub async fn fill_rectangle(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::FillRectangle, &payload::words(&[x0, y0, x1, y1]))
            .await
    }

    /// Draws a circle outline around a center point.
    pub async fn draw_circle(
        &mut self,
        x: u16,
        y: u16,
        radius: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::DrawCircle, &payload::words(&[x, y, radius]))
            .await
    }

    /// Draws a filled circle around a center point.
    pub async fn fill_circle(
        &mut self,
        x: u16,
        y: u16,
        radius: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::FillCircle, &payload::words(&[x, y, radius]))
            .await
    }

    /// Draws a triangle outline through three points.
    pub async fn draw_triangle(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(
            Command::DrawTriangle,
            &payload::words(&[x0, y0, x1, y1, x2, y2]),
        )
        .await
    }

    /// Draws a filled triangle through three points.
    pub async fn fill_triangle(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(
            Command::FillTriangle,
            &payload::words(&[x0, y0, x1, y1, x2, y2]),
        )
        .await
    }

    /// Clears the whole drawing buffer to the background color.
    pub async fn clear(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.send(Command::Clear, &[]).await
    }

    /// Draws text with its top-left corner at the given position.
    pub async fn display_text(
        &mut self,
        x: u16,
        y: u16,
        text: &[u8],
    ) -> Result<(), Error<UART, WAKE, RST>> {
        let payload = payload::positioned(x, y, text)?;
        self.send(Command::DisplayText, &payload).await
    }

    /// Draws a bitmap from the active storage area, by filename.
    pub async fn display_image(
        &mut self,
        x: u16,
        y: u16,
        name: &[u8],
    ) -> Result<(), Error<UART, WAKE, RST>> {
        let payload = payload::positioned(x, y, name)?;
        self.send(Command::DisplayImage, &payload).await
    }

    /// Consumes the driver and hands the collaborators back.
    pub fn release(self) -> (UART, WAKE, RST, DELAY) {
        (self.uart, self.wake, self.rst, self.delay)
    }
}
