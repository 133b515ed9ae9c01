//! Wire framing for the UART link
//!
//! Every command travels in one self-delimiting frame:
//!
//! ```text
//! ┌───────────┬───────────┬───────────┬────────────┬─────────────────┬───────────┐
//! │ 0xA5      │ length    │ command   │ payload    │ 0xCC 0x33       │ checksum  │
//! │ (1 byte)  │ (2 bytes) │ (1 byte)  │ (0..503)   │ 0xC3 0x3C       │ (1 byte)  │
//! └───────────┴───────────┴───────────┴────────────┴─────────────────┴───────────┘
//! ```
//!
//! The length field is big-endian and counts command and payload plus a
//! fixed overhead of 8 bytes. It must match what the controller's parser
//! consumes exactly: a wrong length desynchronizes the link and corrupts
//! every following frame until a reset.

use crate::command::Command;
use heapless::Vec;

/// First byte of every frame.
pub const FRAME_START: u8 = 0xA5;

/// Fixed four-byte sequence closing the frame body, right before the
/// checksum.
pub const FRAME_TRAILER: [u8; 4] = [0xCC, 0x33, 0xC3, 0x3C];

/// Amount the transmitted length field exceeds the size of command and
/// payload.
///
/// A protocol constant, not a sum to recompute: the controller's parser
/// counts the start byte, the length field itself, the trailer and the
/// checksum this way.
pub const FRAME_LEN_OVERHEAD: usize = 8;

/// Size of the controller's command buffer. No frame may exceed it.
pub const MAX_FRAME_SIZE: usize = 512;

/// Largest payload that still fits a frame.
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - FRAME_LEN_OVERHEAD - 1;

/// One complete wire frame, start byte through checksum.
pub type Frame = Vec<u8, MAX_FRAME_SIZE>;

/// Errors produced while building a frame, before any byte leaves the
/// host.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The payload would overflow the controller's command buffer.
    PayloadTooLarge {
        /// Size of the rejected payload.
        len: usize,
    },
}

/// Serializes a command and its payload into a complete frame.
///
/// Pure and deterministic: identical inputs always yield the identical
/// byte sequence, and no partially built frame is ever observable.
pub fn encode(command: Command, payload: &[u8]) -> Result<Frame, FrameError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge { len: payload.len() });
    }

    let len = (1 + payload.len() + FRAME_LEN_OVERHEAD) as u16;

    // The bound check above keeps all of this within capacity.
    let mut frame = Frame::new();
    let _ = frame.push(FRAME_START);
    let _ = frame.extend_from_slice(&len.to_be_bytes());
    let _ = frame.push(command.address());
    let _ = frame.extend_from_slice(payload);
    let _ = frame.extend_from_slice(&FRAME_TRAILER);

    let verify = checksum(&frame);
    let _ = frame.push(verify);

    Ok(frame)
}

/// Running XOR over all preceding frame bytes, the controller's frame
/// check.
fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, byte| acc ^ byte)
}
