//! A simple Driver for the Waveshare 4.3inch e-Paper UART Display
//!
//! Build with the help of documentation/code from [Waveshare](https://www.waveshare.com/wiki/4.3inch_e-Paper_UART_Module)
//! and the controller manual as orientation.
//!
//! The controller renders all primitives itself: the host frames a
//! command, writes it to the serial link and at some point commits the
//! drawing buffer with [`update`](Epd4in3::update). The protocol carries
//! no acknowledgements, so every operation returns as soon as the frame
//! left the transport.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_io::Write;

use crate::color::Color;
use crate::command::Command;
use crate::config::{ChineseFont, EnglishFont, MemoryMode, Rotation};
use crate::error::{Error, ErrorKind};
use crate::interface::DisplayInterface;
use crate::payload;

/// Epd4in3 driver
///
/// One instance owns the serial transport and both control lines for the
/// lifetime of the link.
pub struct Epd4in3<UART, WAKE, RST, DELAY> {
    /// Connection Interface
    interface: DisplayInterface<UART, WAKE, RST, DELAY>,
}

impl<UART, WAKE, RST, DELAY> Epd4in3<UART, WAKE, RST, DELAY>
where
    UART: Write,
    WAKE: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new driver from the serial transport, the WAKE_UP and
    /// RST output pins and a delay provider.
    ///
    /// Both control lines are driven to their high rest level. The
    /// controller itself is not touched; after power-up, call
    /// [`reset`](Self::reset) or [`wake`](Self::wake) before the first
    /// command.
    pub fn new(
        uart: UART,
        wake: WAKE,
        rst: RST,
        delay: DELAY,
    ) -> Result<Self, Error<UART, WAKE, RST>> {
        let mut interface = DisplayInterface::new(uart, wake, rst, delay);
        interface.init()?;

        Ok(Epd4in3 { interface })
    }

    /// Hard-resets the controller via the RST line.
    ///
    /// Blocking for the full settle time: the controller needs about two
    /// seconds before it accepts frames again.
    pub fn reset(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.reset()
    }

    /// Wakes the controller from stop mode via the WAKE_UP line.
    pub fn wake(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.wake()
    }

    /// Sends a raw command byte with an arbitrary payload.
    ///
    /// The byte must be part of the controller's command table; anything
    /// else is rejected before a frame is built. The typed operations
    /// below are the usual way in.
    pub fn send_raw(&mut self, command: u8, payload: &[u8]) -> Result<(), Error<UART, WAKE, RST>> {
        let command = Command::from_address(command).ok_or(ErrorKind::InvalidCommand(command))?;
        self.interface.send(command, payload)
    }

    /// Asks the controller for a sign of life.
    ///
    /// A responsive controller answers "OK" on its TX line.
    pub fn handshake(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::Handshake, &[])
    }

    /// Switches the serial link to a new baud rate.
    ///
    /// Takes effect as soon as the controller processes the frame, so
    /// reconfigure the host side of the link right after this call. The
    /// controller starts up at [`BAUD_RATE`](crate::BAUD_RATE).
    pub fn set_baud_rate(&mut self, baud: u32) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::SetBaudRate, &baud.to_be_bytes())
    }

    /// Requests the current baud rate.
    ///
    /// The reply arrives on the controller's TX line, which this driver
    /// does not read.
    pub fn read_baud_rate(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::ReadBaudRate, &[])
    }

    /// Selects the storage area that fonts and images are read from.
    pub fn set_memory_mode(&mut self, mode: MemoryMode) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::SetMemoryMode, &[mode as u8])
    }

    /// Puts the controller into its low-power stop mode.
    ///
    /// It stops accepting frames until [`wake`](Self::wake) pulses the
    /// WAKE_UP line.
    pub fn sleep(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::EnterStopMode, &[])
    }

    /// Commits the drawing buffer to the panel.
    ///
    /// Drawing operations are invisible until this runs; the refresh
    /// itself takes a few seconds of panel flashing.
    pub fn update(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::Update, &[])
    }

    /// Sets the screen orientation.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::SetRotation, &[rotation as u8])
    }

    /// Copies the font library from the TF card into NAND flash.
    ///
    /// Takes noticeable time; the controller prints progress on its TX
    /// line while it runs.
    pub fn import_font(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::ImportFont, &[])
    }

    /// Copies the image files from the TF card into NAND flash.
    pub fn import_image(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::ImportImage, &[])
    }

    /// Sets the foreground and background gray levels for all following
    /// drawing operations.
    pub fn set_color(
        &mut self,
        foreground: Color,
        background: Color,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface
            .send(Command::SetColor, &[foreground as u8, background as u8])
    }

    /// Selects the dot-matrix size of the English font.
    pub fn set_english_font(&mut self, font: EnglishFont) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::SetEnglishFont, &[font as u8])
    }

    /// Selects the dot-matrix size of the Chinese font.
    pub fn set_chinese_font(&mut self, font: ChineseFont) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::SetChineseFont, &[font as u8])
    }

    /// Draws a single pixel in the foreground color.
    pub fn draw_pixel(&mut self, x: u16, y: u16) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::DrawPixel, &payload::words(&[x, y]))
    }

    /// Draws a line between two points.
    pub fn draw_line(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface
            .send(Command::DrawLine, &payload::words(&[x0, y0, x1, y1]))
    }

    /// Fills the rectangle spanned by two corner points with the
    /// foreground color.
    pub fn fill_rectangle(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface
            .send(Command::FillRectangle, &payload::words(&[x0, y0, x1, y1]))
    }

    /// Draws a circle outline around a center point.
    pub fn draw_circle(
        &mut self,
        x: u16,
        y: u16,
        radius: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface
            .send(Command::DrawCircle, &payload::words(&[x, y, radius]))
    }

    /// Draws a filled circle around a center point.
    pub fn fill_circle(
        &mut self,
        x: u16,
        y: u16,
        radius: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface
            .send(Command::FillCircle, &payload::words(&[x, y, radius]))
    }

    /// Draws a triangle outline through three points.
    pub fn draw_triangle(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(
            Command::DrawTriangle,
            &payload::words(&[x0, y0, x1, y1, x2, y2]),
        )
    }

    /// Draws a filled triangle through three points.
    pub fn fill_triangle(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(
            Command::FillTriangle,
            &payload::words(&[x0, y0, x1, y1, x2, y2]),
        )
    }

    /// Clears the whole drawing buffer to the background color.
    pub fn clear(&mut self) -> Result<(), Error<UART, WAKE, RST>> {
        self.interface.send(Command::Clear, &[])
    }

    /// Draws text with its top-left corner at the given position.
    ///
    /// `text` must already be in the charset of the active font: Latin-1
    /// for the ASCII fonts, GBK for the Chinese fonts. The frame length
    /// delimits it, no terminator is appended.
    pub fn display_text(
        &mut self,
        x: u16,
        y: u16,
        text: &[u8],
    ) -> Result<(), Error<UART, WAKE, RST>> {
        let payload = payload::positioned(x, y, text)?;
        self.interface.send(Command::DisplayText, &payload)
    }

    /// Draws a bitmap from the active storage area.
    ///
    /// `name` is the full filename on the storage medium, e.g.
    /// `b"PIC7.BMP"`; the image's top-left corner lands at the given
    /// position.
    pub fn display_image(
        &mut self,
        x: u16,
        y: u16,
        name: &[u8],
    ) -> Result<(), Error<UART, WAKE, RST>> {
        let payload = payload::positioned(x, y, name)?;
        self.interface.send(Command::DisplayImage, &payload)
    }

    /// Consumes the driver and hands the collaborators back.
    pub fn release(self) -> (UART, WAKE, RST, DELAY) {
        self.interface.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame;
    use crate::testutil::{MockSerial, RecordingDelay};
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    type TestEpd = Epd4in3<MockSerial, PinMock, PinMock, RecordingDelay>;

    fn epd(serial: MockSerial) -> TestEpd {
        let wake = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let rst = PinMock::new(&[PinTransaction::set(PinState::High)]);

        Epd4in3::new(serial, wake, rst, RecordingDelay::new()).unwrap()
    }

    fn finish(epd: TestEpd) -> std::vec::Vec<u8> {
        let (serial, mut wake, mut rst, _) = epd.release();
        wake.done();
        rst.done();
        serial.written
    }

    #[test]
    fn handshake_writes_the_reference_frame() {
        let mut epd = epd(MockSerial::new());
        epd.handshake().unwrap();

        assert_eq!(
            finish(epd),
            [0xA5, 0x00, 0x09, 0x00, 0xCC, 0x33, 0xC3, 0x3C, 0xAC]
        );
    }

    #[test]
    fn draw_pixel_packs_coordinates_big_endian() {
        let mut epd = epd(MockSerial::new());
        epd.draw_pixel(0x0102, 0x0304).unwrap();

        let written = finish(epd);
        assert_eq!(written[3], 0x20);
        assert_eq!(&written[4..8], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn set_color_sends_foreground_then_background() {
        let mut epd = epd(MockSerial::new());
        epd.set_color(Color::Black, Color::White).unwrap();

        let written = finish(epd);
        assert_eq!(written[3], 0x10);
        assert_eq!(&written[4..6], &[0x00, 0x03]);
    }

    #[test]
    fn display_text_places_the_raw_bytes() {
        let mut epd = epd(MockSerial::new());
        epd.display_text(0x000A, 0x0014, b"hello").unwrap();

        let expected = frame::encode(
            Command::DisplayText,
            &[0x00, 0x0A, 0x00, 0x14, b'h', b'e', b'l', b'l', b'o'],
        )
        .unwrap();
        assert_eq!(finish(epd), &expected[..]);
    }

    #[test]
    fn display_image_takes_a_filename() {
        let mut epd = epd(MockSerial::new());
        epd.display_image(0, 0, b"PIC7.BMP").unwrap();

        let expected = frame::encode(
            Command::DisplayImage,
            &[0x00, 0x00, 0x00, 0x00, b'P', b'I', b'C', b'7', b'.', b'B', b'M', b'P'],
        )
        .unwrap();
        assert_eq!(finish(epd), &expected[..]);
    }

    #[test]
    fn operations_map_to_their_opcodes() {
        let mut epd = epd(MockSerial::new());

        epd.set_memory_mode(MemoryMode::Nand).unwrap();
        epd.set_rotation(Rotation::Inverted).unwrap();
        epd.set_english_font(EnglishFont::Ascii48).unwrap();
        epd.set_chinese_font(ChineseFont::Gbk64).unwrap();
        epd.draw_line(0, 0, 100, 200).unwrap();
        epd.fill_rectangle(10, 10, 20, 20).unwrap();
        epd.draw_circle(50, 50, 25).unwrap();
        epd.fill_circle(50, 50, 25).unwrap();
        epd.draw_triangle(0, 0, 10, 0, 0, 10).unwrap();
        epd.fill_triangle(0, 0, 10, 0, 0, 10).unwrap();
        epd.clear().unwrap();
        epd.update().unwrap();
        epd.sleep().unwrap();

        let written = finish(epd);

        // walk the stream frame by frame via the length field
        let mut seen = std::vec::Vec::new();
        let mut rest = &written[..];
        while !rest.is_empty() {
            assert_eq!(rest[0], frame::FRAME_START);
            // the length field happens to equal the full frame size:
            // both count command + payload + 8 scaffolding bytes
            let len = u16::from_be_bytes([rest[1], rest[2]]) as usize;
            seen.push(rest[3]);
            rest = &rest[len..];
        }

        assert_eq!(
            seen,
            [0x07, 0x0D, 0x1E, 0x1F, 0x22, 0x24, 0x26, 0x27, 0x28, 0x29, 0x2E, 0x0A, 0x08]
        );
    }

    #[test]
    fn send_raw_rejects_unknown_commands() {
        let mut epd = epd(MockSerial::new());

        let err = epd.send_raw(0x42, &[]).unwrap_err();
        assert_eq!(err, ErrorKind::InvalidCommand(0x42));

        epd.send_raw(0x2E, &[]).unwrap();
        assert_eq!(
            finish(epd),
            [0xA5, 0x00, 0x09, 0x2E, 0xCC, 0x33, 0xC3, 0x3C, 0x82]
        );
    }

    #[test]
    fn oversized_text_is_rejected_before_the_transport() {
        let mut epd = epd(MockSerial::new());

        let text = [b'x'; 500];
        let err = epd.display_text(0, 0, &text).unwrap_err();

        assert_eq!(err, ErrorKind::PayloadTooLarge { len: 504 });
        assert!(finish(epd).is_empty());
    }

    #[test]
    fn set_baud_rate_packs_a_32_bit_value() {
        let mut epd = epd(MockSerial::new());
        epd.set_baud_rate(115_200).unwrap();

        let written = finish(epd);
        assert_eq!(written[3], 0x01);
        assert_eq!(&written[4..8], &115_200u32.to_be_bytes());
    }

    #[test]
    fn reset_and_wake_drive_their_own_line() {
        let serial = MockSerial::new();
        let wake = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let rst = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);

        let mut epd = Epd4in3::new(serial, wake, rst, RecordingDelay::new()).unwrap();
        epd.reset().unwrap();
        epd.wake().unwrap();

        let (serial, mut wake, mut rst, delay) = epd.release();
        assert!(serial.written.is_empty());
        assert_eq!(
            delay.delays_ns,
            [
                1_000_000,
                1_000_000,
                2_000_000_000,
                1_000_000,
                1_000_000,
                10_000_000u64
            ]
        );
        wake.done();
        rst.done();
    }
}
