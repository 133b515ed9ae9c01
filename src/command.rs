//! UART commands of the 4.3inch e-Paper display controller
//!
//! Every frame on the link invokes exactly one of these. The set is fixed
//! by the controller firmware; a byte outside of it makes the controller
//! print an error string on its TX line and drop the frame.

/// Epd4in3 commands
///
/// Should rarely (never?) be needed directly, the driver exposes a typed
/// operation for each of them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// A responsive controller answers a handshake with "OK".
    Handshake = 0x00,
    /// Switch the serial link to a new baud rate.
    ///
    /// The only parameter is the new rate as a 32-bit value. The change
    /// takes effect as soon as the frame is processed, so the host side
    /// of the link has to be reconfigured right after sending it.
    SetBaudRate = 0x01,
    /// The controller reports the current baud rate on its TX line.
    ReadBaudRate = 0x02,
    /// Select the storage area (NAND flash or TF card) that fonts and
    /// images are read from.
    SetMemoryMode = 0x07,
    /// Enter the low-power stop mode.
    ///
    /// The controller stops accepting frames until the WAKE_UP line is
    /// pulsed.
    EnterStopMode = 0x08,
    /// Refresh the panel from the drawing buffer.
    ///
    /// All drawing operations only touch the buffer; nothing is visible
    /// until this command is sent.
    Update = 0x0A,
    /// Set the screen orientation (normal or upside down).
    SetRotation = 0x0D,
    /// Copy the font library from the TF card into NAND flash.
    ///
    /// This takes noticeable time; the controller prints progress dots
    /// while it runs.
    ImportFont = 0x0E,
    /// Copy the image files from the TF card into NAND flash.
    ImportImage = 0x0F,
    /// Set the foreground and background gray levels used by all
    /// following drawing operations.
    SetColor = 0x10,
    /// Select the dot-matrix size of the built-in English font.
    SetEnglishFont = 0x1E,
    /// Select the dot-matrix size of the built-in Chinese (GBK) font.
    SetChineseFont = 0x1F,
    /// Draw a single pixel in the foreground color.
    DrawPixel = 0x20,
    /// Draw a line between two points.
    DrawLine = 0x22,
    /// Fill the rectangle spanned by two corner points.
    FillRectangle = 0x24,
    /// Draw a circle outline from center point and radius.
    DrawCircle = 0x26,
    /// Draw a filled circle from center point and radius.
    FillCircle = 0x27,
    /// Draw a triangle outline through three points.
    DrawTriangle = 0x28,
    /// Draw a filled triangle through three points.
    FillTriangle = 0x29,
    /// Clear the whole drawing buffer to the background color.
    Clear = 0x2E,
    /// Draw a string at a position, using the active fonts and colors.
    DisplayText = 0x30,
    /// Draw a bitmap from the active storage area, by filename.
    DisplayImage = 0x70,
}

impl Command {
    /// Returns the wire address of the command
    pub fn address(self) -> u8 {
        self as u8
    }

    /// Looks an address up in the controller's command table.
    pub fn from_address(address: u8) -> Option<Self> {
        match address {
            0x00 => Some(Command::Handshake),
            0x01 => Some(Command::SetBaudRate),
            0x02 => Some(Command::ReadBaudRate),
            0x07 => Some(Command::SetMemoryMode),
            0x08 => Some(Command::EnterStopMode),
            0x0A => Some(Command::Update),
            0x0D => Some(Command::SetRotation),
            0x0E => Some(Command::ImportFont),
            0x0F => Some(Command::ImportImage),
            0x10 => Some(Command::SetColor),
            0x1E => Some(Command::SetEnglishFont),
            0x1F => Some(Command::SetChineseFont),
            0x20 => Some(Command::DrawPixel),
            0x22 => Some(Command::DrawLine),
            0x24 => Some(Command::FillRectangle),
            0x26 => Some(Command::DrawCircle),
            0x27 => Some(Command::FillCircle),
            0x28 => Some(Command::DrawTriangle),
            0x29 => Some(Command::FillTriangle),
            0x2E => Some(Command::Clear),
            0x30 => Some(Command::DisplayText),
            0x70 => Some(Command::DisplayImage),
            _ => None,
        }
    }
}
