//! Recording fakes for the injected collaborators.
//!
//! `embedded-hal-mock` covers the control-line pins; these two cover the
//! serial transport and the delay provider, recording every call so the
//! tests can check byte streams and hold times.

use std::vec::Vec;

/// Captures everything the driver writes.
///
/// An optional capacity cap models a transport that accepts short
/// writes.
pub struct MockSerial {
    pub written: Vec<u8>,
    capacity: Option<usize>,
}

impl MockSerial {
    pub fn new() -> Self {
        MockSerial {
            written: Vec::new(),
            capacity: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MockSerial {
            written: Vec::new(),
            capacity: Some(capacity),
        }
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = core::convert::Infallible;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let accepted = match self.capacity {
            Some(capacity) => buf.len().min(capacity.saturating_sub(self.written.len())),
            None => buf.len(),
        };
        self.written.extend_from_slice(&buf[..accepted]);

        Ok(accepted)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Records every requested hold time in nanoseconds instead of waiting.
pub struct RecordingDelay {
    pub delays_ns: Vec<u64>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        RecordingDelay {
            delays_ns: Vec::new(),
        }
    }
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.delays_ns.push(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ns.push(u64::from(ms) * 1_000_000);
    }
}
