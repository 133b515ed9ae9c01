//! A simple Driver for the Waveshare 4.3inch e-Paper UART Display
//!
//! This driver was built using [`embedded-hal`] and [`embedded-io`]
//! traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/~1.0
//! [`embedded-io`]: https://docs.rs/embedded-io/~0.6
//!
//! # Requirements
//!
//! ### Serial
//!
//! - 115200 baud after power-up, changeable with `set_baud_rate`
//! - 8 data bits, no parity, one stop bit
//! - only the controller's RX line is driven; replies on its TX line are
//!   not read by this driver
//!
//! ### Other....
//!
//! - WAKE_UP and RST are push-pull outputs, high at rest
//! - after `reset()` the controller takes about two seconds to come back
//! - drawing operations only touch the controller's buffer, nothing is
//!   visible until `update()` commits it to the panel
//!
//! # Examples
//!
//! ```ignore
//! use epd4in3_uart::prelude::*;
//!
//! let mut epd = Epd4in3::new(uart, wake, rst, delay)?;
//!
//! epd.wake()?;
//! epd.handshake()?;
//!
//! epd.set_color(Color::Black, Color::White)?;
//! epd.clear()?;
//! epd.draw_circle(200, 150, 80)?;
//! epd.display_text(40, 40, b"hello")?;
//!
//! epd.update()?;
//!
//! epd.sleep()?;
//! ```
//!
//!
#![no_std]

#[cfg(test)]
extern crate std;

pub mod color;

pub mod command;

pub mod config;

pub mod error;

pub mod frame;

mod driver;

/// Interface for the physical connection between display and the controlling device
mod interface;

mod payload;

#[cfg(feature = "async")]
pub mod asynch;

#[cfg(test)]
mod testutil;

pub use crate::driver::Epd4in3;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::{ChineseFont, EnglishFont, MemoryMode, Rotation};
    pub use crate::error::{Error, ErrorKind};
    pub use crate::Epd4in3;
    pub use crate::BAUD_RATE;
}

/// Baud rate the controller uses after power-up -
/// For more infos see [Requirements: Serial](index.html#serial)
pub const BAUD_RATE: u32 = 115_200;
