use core::fmt::{Debug, Display, Formatter};

use crate::frame::FrameError;

/// Epd error type
///
/// Generic over the error types of the three injected collaborators: the
/// serial transport `S`, the WAKE_UP line `W` and the RST line `R`.
///
/// Every error is surfaced synchronously by the call that produced it.
/// The link carries no acknowledgements, so there is nothing to retry
/// against and the driver never does.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind<S, W, R> {
    /// The serial write failed
    Serial(S),

    /// The transport accepted fewer bytes than the frame holds.
    ///
    /// The controller now holds a truncated frame; fatal for this call.
    ShortWrite {
        /// Bytes the transport took.
        written: usize,
        /// Size of the frame.
        expected: usize,
    },

    /// Encountered an error on the WAKE_UP GPIO
    Wake(W),

    /// Encountered an error on the RST GPIO
    Reset(R),

    /// The payload would overflow the controller's command buffer
    PayloadTooLarge {
        /// Size of the rejected payload.
        len: usize,
    },

    /// The raw command byte is not in the controller's command table
    InvalidCommand(u8),
}

/// The driver's error, spelled with the collaborator types themselves.
pub type Error<UART, WAKE, RST> = ErrorKind<
    <UART as embedded_io::ErrorType>::Error,
    <WAKE as embedded_hal::digital::ErrorType>::Error,
    <RST as embedded_hal::digital::ErrorType>::Error,
>;

impl<S, W, R> From<FrameError> for ErrorKind<S, W, R> {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::PayloadTooLarge { len } => ErrorKind::PayloadTooLarge { len },
        }
    }
}

impl<S, W, R> Display for ErrorKind<S, W, R>
where
    S: Debug,
    W: Debug,
    R: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Serial(err) => write!(f, "serial transport error: {:?}", err),
            Self::ShortWrite { written, expected } => write!(
                f,
                "transport accepted {} of {} frame bytes",
                written, expected
            ),
            Self::Wake(err) => write!(f, "error on the WAKE_UP line: {:?}", err),
            Self::Reset(err) => write!(f, "error on the RST line: {:?}", err),
            Self::PayloadTooLarge { len } => {
                write!(f, "payload of {} bytes overflows the command buffer", len)
            }
            Self::InvalidCommand(address) => {
                write!(f, "0x{:02X} is not a controller command", address)
            }
        }
    }
}
