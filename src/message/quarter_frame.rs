#![doc = r#"
MIDI time code quarter frames

A full SMPTE time stamp (`hh:mm:ss:ff`) is sent as eight `0xF1` messages,
each carrying one nibble of one field in the data byte `0ppp_vvvv`:

| piece | carries                                   |
|-------|-------------------------------------------|
| 0 / 1 | frame, low / high nibble                  |
| 2 / 3 | second, low / high nibble                 |
| 4 / 5 | minute, low / high nibble                 |
| 6 / 7 | hour, low / high nibble                   |

Piece 7 has room to spare: bit 0 is the hour's fifth bit, and bits 1-2
carry the [`SmpteFps`] rate code.

Decoding a quarter frame is stateless. Use [`MtcTimecode`] to put a
time stamp back together.
"#]

use crate::{CodecError, SmpteFps};

/// The time code field a quarter frame contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimecodeField {
    /// Pieces 0 and 1
    Frame,
    /// Pieces 2 and 3
    Second,
    /// Pieces 4 and 5
    Minute,
    /// Pieces 6 and 7
    Hour,
}

/// One of the eight pieces of a MIDI time code stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuarterFrame {
    piece: u8,
    nibble: u8,
}

impl QuarterFrame {
    /// Creates a quarter frame from a piece number (`0..=7`) and its nibble (`0..=15`).
    pub const fn new(piece: u8, nibble: u8) -> Result<Self, CodecError> {
        if piece > 7 {
            return Err(CodecError::ValueOutOfRange {
                value: piece as u16,
                max: 7,
            });
        }
        if nibble > 0x0F {
            return Err(CodecError::ValueOutOfRange {
                value: nibble as u16,
                max: 0x0F,
            });
        }
        Ok(Self { piece, nibble })
    }

    /// Creates piece 7 from the hour's fifth bit and the frame rate.
    pub const fn hour_high(hour_bit: bool, rate: SmpteFps) -> Self {
        Self {
            piece: 7,
            nibble: (rate.rate_code() << 1) | hour_bit as u8,
        }
    }

    /// Reads the data byte of an `0xF1` message.
    pub const fn from_data_byte(byte: u8) -> Self {
        Self {
            piece: (byte >> 4) & 0b111,
            nibble: byte & 0x0F,
        }
    }

    /// Returns the `0ppp_vvvv` data byte
    pub const fn to_data_byte(&self) -> u8 {
        (self.piece << 4) | self.nibble
    }

    /// The piece number, `0..=7`
    pub const fn piece(&self) -> u8 {
        self.piece
    }

    /// The raw low nibble of the data byte
    pub const fn nibble(&self) -> u8 {
        self.nibble
    }

    /// The field this piece belongs to
    pub const fn field(&self) -> TimecodeField {
        match self.piece >> 1 {
            0 => TimecodeField::Frame,
            1 => TimecodeField::Second,
            2 => TimecodeField::Minute,
            _ => TimecodeField::Hour,
        }
    }

    /// True for odd pieces, which carry the high nibble of their field.
    pub const fn is_high_nibble(&self) -> bool {
        self.piece & 1 == 1
    }

    /// The bits this piece contributes to its field, not yet shifted into place.
    pub const fn value(&self) -> u8 {
        if self.piece == 7 {
            self.nibble & 0b1
        } else {
            self.nibble
        }
    }

    /// The frame rate, only carried by piece 7.
    pub const fn rate(&self) -> Option<SmpteFps> {
        if self.piece == 7 {
            Some(SmpteFps::from_rate_code(self.nibble >> 1))
        } else {
            None
        }
    }
}

/// A complete time stamp assembled by [`MtcTimecode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timecode {
    /// Frame rate announced by piece 7
    pub rate: SmpteFps,
    /// Hours, `0..=23`
    pub hour: u8,
    /// Minutes
    pub minute: u8,
    /// Seconds
    pub second: u8,
    /// Frames
    pub frame: u8,
}

#[doc = r#"
Collects quarter frames into a [`Timecode`].

A stamp is reported once all eight pieces have been seen and piece 7 arrives.

# Example
```rust
# use midiwire::prelude::*;
let mut mtc = MtcTimecode::default();
// 01:02:03:04 at 25 fps
let data = [0x04, 0x10, 0x23, 0x30, 0x42, 0x50, 0x61, 0x72];
let mut stamp = None;
for byte in data {
    stamp = mtc.apply(QuarterFrame::from_data_byte(byte));
}
let stamp = stamp.unwrap();
assert_eq!((stamp.hour, stamp.minute, stamp.second, stamp.frame), (1, 2, 3, 4));
assert_eq!(stamp.rate, SmpteFps::TwentyFive);
```
"#]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MtcTimecode {
    fields: [u8; 4],
    rate: Option<SmpteFps>,
    received: u8,
}

impl MtcTimecode {
    /// Stores the piece, returning the full stamp once it is complete.
    pub fn apply(&mut self, frame: QuarterFrame) -> Option<Timecode> {
        let slot = &mut self.fields[frame.field() as usize];
        if frame.is_high_nibble() {
            *slot = (*slot & 0x0F) | (frame.value() << 4);
        } else {
            *slot = (*slot & 0xF0) | frame.value();
        }
        if let Some(rate) = frame.rate() {
            self.rate = Some(rate);
        }
        self.received |= 1 << frame.piece();

        if frame.piece() != 7 || self.received != 0xFF {
            return None;
        }
        let [frames, second, minute, hour] = self.fields;
        Some(Timecode {
            rate: self.rate?,
            hour,
            minute,
            second,
            frame: frames,
        })
    }

    /// Forgets every received piece.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[test]
fn piece_seven_carries_rate() {
    use pretty_assertions::assert_eq;
    let frame = QuarterFrame::from_data_byte(0x77);
    assert_eq!(frame.piece(), 7);
    assert_eq!(frame.field(), TimecodeField::Hour);
    assert!(frame.is_high_nibble());
    assert_eq!(frame.value(), 1);
    assert_eq!(frame.rate(), Some(SmpteFps::Thirty));
    assert_eq!(QuarterFrame::hour_high(true, SmpteFps::Thirty), frame);
}

#[test]
fn incomplete_timecode_is_not_reported() {
    let mut mtc = MtcTimecode::default();
    assert_eq!(mtc.apply(QuarterFrame::from_data_byte(0x00)), None);
    assert_eq!(mtc.apply(QuarterFrame::from_data_byte(0x72)), None);
}
