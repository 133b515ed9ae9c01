//! Payload builders for the typed operations
//!
//! Coordinates, radii and dimensions travel as big-endian 16-bit words in
//! argument order. Text and filenames follow their position as raw bytes,
//! delimited by the frame length alone.

use heapless::Vec;

use crate::frame::{FrameError, MAX_PAYLOAD_SIZE};

/// Packs coordinate words big-endian, in argument order.
///
/// The capacity covers the largest numeric payload, the six words of a
/// triangle.
pub(crate) fn words(values: &[u16]) -> Vec<u8, 12> {
    let mut payload = Vec::new();
    for value in values {
        let _ = payload.extend_from_slice(&value.to_be_bytes());
    }
    payload
}

/// A position followed by text or filename bytes.
pub(crate) fn positioned(
    x: u16,
    y: u16,
    bytes: &[u8],
) -> Result<Vec<u8, MAX_PAYLOAD_SIZE>, FrameError> {
    let mut payload = Vec::new();
    let _ = payload.extend_from_slice(&x.to_be_bytes());
    let _ = payload.extend_from_slice(&y.to_be_bytes());
    payload
        .extend_from_slice(bytes)
        .map_err(|()| FrameError::PayloadTooLarge {
            len: 4 + bytes.len(),
        })?;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_big_endian_in_argument_order() {
        let payload = words(&[0x0102, 0x0304]);
        assert_eq!(&payload[..], &[0x01, 0x02, 0x03, 0x04]);

        let payload = words(&[10, 20, 30, 40, 50, 60]);
        assert_eq!(
            &payload[..],
            &[0, 10, 0, 20, 0, 30, 0, 40, 0, 50, 0, 60]
        );
    }

    #[test]
    fn positioned_keeps_bytes_unterminated() {
        let payload = positioned(0x000A, 0x0014, b"GLUT32.FNT").unwrap();
        assert_eq!(&payload[..4], &[0x00, 0x0A, 0x00, 0x14]);
        assert_eq!(&payload[4..], b"GLUT32.FNT");
    }

    #[test]
    fn positioned_rejects_overlong_bytes() {
        let text = [b'x'; MAX_PAYLOAD_SIZE];
        assert_eq!(
            positioned(0, 0, &text),
            Err(FrameError::PayloadTooLarge {
                len: 4 + MAX_PAYLOAD_SIZE
            })
        );
    }
}
