//! Device command envelopes.
//!
//! Every command starts with a little-endian `u16` holding the length of the whole
//! envelope, these two bytes included:
//!
//! ```text
//! send animation: [len:u16][03 00 00][gif_len:u32][crc32(gif):u32][02 01][gif...]
//! clear:          [len:u16][03 80]
//! brightness:     [len:u16][04 80][0..=100]
//! led on/off:     [len:u16][07 01][00|01]
//! delete screen:  [len:u16][02 01][01 00][index]
//! ```

use crate::foundation::error::{TrainboardError, TrainboardResult};

/// Command tag for "upload animation".
pub const CMD_SEND_ANIMATION: [u8; 3] = [0x03, 0x00, 0x00];
/// Sub-command tag for a GIF payload.
pub const SUBCMD_GIF: [u8; 2] = [0x02, 0x01];
/// Command tag for "clear stored screens".
pub const CMD_CLEAR: [u8; 2] = [0x03, 0x80];
/// Command tag for "set brightness".
pub const CMD_BRIGHTNESS: [u8; 2] = [0x04, 0x80];
/// Command tag for "LED power".
pub const CMD_LED: [u8; 2] = [0x07, 0x01];
/// Command tag for "delete stored screen".
pub const CMD_DELETE_SCREEN: [u8; 4] = [0x02, 0x01, 0x01, 0x00];

const LEN_FIELD: usize = 2;

/// Fully framed bytes for one device write. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Envelope(Vec<u8>);

impl Envelope {
    /// Framed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Total length, length prefix included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: every envelope carries at least its length prefix and tag.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take ownership of the framed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Prefix `body` with the total-length field.
    fn frame(body: &[u8]) -> TrainboardResult<Self> {
        let total = body.len() + LEN_FIELD;
        let len = u16::try_from(total).map_err(|_| TrainboardError::FrameTooLarge {
            len: total,
            max: usize::from(u16::MAX),
        })?;
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(body);
        Ok(Self(out))
    }
}

/// Wrap an encoded GIF in the "upload animation" envelope.
pub fn send_animation(gif: &[u8]) -> TrainboardResult<Envelope> {
    let payload_len = u32::try_from(gif.len()).map_err(|_| TrainboardError::FrameTooLarge {
        len: gif.len(),
        max: u32::MAX as usize,
    })?;
    let checksum = crc32fast::hash(gif);

    let mut body = Vec::with_capacity(CMD_SEND_ANIMATION.len() + 8 + SUBCMD_GIF.len() + gif.len());
    body.extend_from_slice(&CMD_SEND_ANIMATION);
    body.extend_from_slice(&payload_len.to_le_bytes());
    body.extend_from_slice(&checksum.to_le_bytes());
    body.extend_from_slice(&SUBCMD_GIF);
    body.extend_from_slice(gif);
    Envelope::frame(&body)
}

/// Short fixed-payload device commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Erase every stored screen.
    Clear,
    /// Set panel brightness, 0–100.
    SetBrightness(u8),
    /// Switch the LED matrix on or off.
    SetLed(bool),
    /// Delete one stored screen by index.
    DeleteScreen(u8),
}

impl DeviceCommand {
    /// Validated [`DeviceCommand::SetBrightness`].
    pub fn brightness(value: i64) -> TrainboardResult<Self> {
        if !(0..=100).contains(&value) {
            return Err(TrainboardError::invalid_argument("brightness", value, "0..=100"));
        }
        Ok(Self::SetBrightness(value as u8))
    }

    /// Validated [`DeviceCommand::DeleteScreen`].
    pub fn delete_screen(index: i64) -> TrainboardResult<Self> {
        let idx = u8::try_from(index)
            .map_err(|_| TrainboardError::invalid_argument("screen index", index, "0..=255"))?;
        Ok(Self::DeleteScreen(idx))
    }

    /// Frame this command.
    pub fn to_envelope(self) -> TrainboardResult<Envelope> {
        match self {
            Self::Clear => Envelope::frame(&CMD_CLEAR),
            Self::SetBrightness(v) => {
                if v > 100 {
                    return Err(TrainboardError::invalid_argument("brightness", v, "0..=100"));
                }
                Envelope::frame(&[CMD_BRIGHTNESS[0], CMD_BRIGHTNESS[1], v])
            }
            Self::SetLed(on) => Envelope::frame(&[CMD_LED[0], CMD_LED[1], u8::from(on)]),
            Self::DeleteScreen(idx) => {
                let mut body = CMD_DELETE_SCREEN.to_vec();
                body.push(idx);
                Envelope::frame(&body)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/envelope.rs"]
mod tests;
