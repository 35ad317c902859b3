use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    SmpteFps,
    file::ChunkError,
    reader::{ReadResult, read_u16},
};

#[doc = r#"
How the tracks of a file relate to each other

```text
MThd <length> <format> <ntrks> <division>
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Format {
    /// Format 0: a single track holding every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks played at the same time
    Simultaneous = 1,
    /// Format 2: independent single-track patterns
    SequentiallyIndependent = 2,
}

impl Format {
    /// The format number, `0`, `1` or `2`
    pub fn number(self) -> u16 {
        self.into()
    }
}

#[doc = r#"
The meaning of delta-times in a file.

The top bit of the header's division word selects the variant:
- `0`: the lower 15 bits are ticks per quarter note
- `1`: the upper byte is a negative SMPTE frame rate (two's complement),
  the lower byte the number of ticks per frame

# Example
```rust
# use midiwire::prelude::*;
assert_eq!(
    Division::from_raw(0x0050),
    Division::TicksPerQuarterNote { resolution: 80 }
);
assert_eq!(
    Division::from_raw(0xE250),
    Division::FramesPerSecond { fps: 30, units_per_frame: 80 }
);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Division {
    /// Musical time
    TicksPerQuarterNote {
        /// Ticks per quarter note, `1..=32767`
        resolution: u16,
    },
    /// Absolute time
    FramesPerSecond {
        /// Nominal frames per second, usually 24, 25, 29 or 30
        fps: u8,
        /// Ticks per frame
        units_per_frame: u8,
    },
}

impl Division {
    /// Interprets the division word of a header chunk.
    pub const fn from_raw(raw: u16) -> Self {
        if raw & 0x8000 == 0 {
            return Self::TicksPerQuarterNote {
                resolution: raw & 0x7FFF,
            };
        }
        // -fps is stored in two's complement
        let fps = ((!raw >> 8) & 0x7F) as u8 + 1;
        Self::FramesPerSecond {
            fps,
            units_per_frame: (raw & 0xFF) as u8,
        }
    }

    /// Returns the matching [`SmpteFps`] for frame based divisions with a standard rate
    pub const fn smpte_fps(&self) -> Option<SmpteFps> {
        match self {
            Self::FramesPerSecond { fps, .. } => SmpteFps::from_division(*fps),
            Self::TicksPerQuarterNote { .. } => None,
        }
    }

    /// Returns the ticks per quarter note, if the file uses musical time
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote { resolution } => Some(*resolution),
            Self::FramesPerSecond { .. } => None,
        }
    }
}

/// The contents of the `MThd` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: Format,
    track_count: u16,
    division: Division,
}

impl Header {
    /// Create a new header
    pub const fn new(format: Format, track_count: u16, division: Division) -> Self {
        Self {
            format,
            track_count,
            division,
        }
    }

    /// Reads the header from a chunk body of `length` bytes at `start`.
    ///
    /// Bytes past the first six are ignored.
    pub fn parse(bytes: &[u8], start: usize, length: u32) -> Result<Self, ChunkError> {
        if length < 6 {
            return Err(ChunkError::HeaderTooShort(length));
        }
        let end = start + 6;
        let read = |offset: usize| -> ReadResult<u16> {
            read_u16(bytes, start + offset, end).map(|(value, _)| value)
        };
        let raw_format = read(0)?;
        let format =
            Format::try_from(raw_format).map_err(|_| ChunkError::InvalidFormat(raw_format))?;

        Ok(Self {
            format,
            track_count: read(2)?,
            division: Division::from_raw(read(4)?),
        })
    }

    /// The file format
    pub const fn format(&self) -> Format {
        self.format
    }

    /// The number of tracks the header announces.
    ///
    /// This is not checked against the track chunks actually present.
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// How delta-times are to be interpreted
    pub const fn division(&self) -> Division {
        self.division
    }
}

#[test]
fn frames_per_second_division() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Division::from_raw(0xE728),
        Division::FramesPerSecond {
            fps: 25,
            units_per_frame: 40
        }
    );
    assert_eq!(
        Division::from_raw(0xE350).smpte_fps(),
        Some(SmpteFps::TwentyNine)
    );
    assert_eq!(Division::from_raw(0x01E0).ticks_per_quarter_note(), Some(480));
}

#[test]
fn header_rejects_unknown_format() {
    use pretty_assertions::assert_eq;
    let body = [0x00, 0x03, 0x00, 0x01, 0x00, 0x60];
    assert_eq!(
        Header::parse(&body, 0, 6),
        Err(ChunkError::InvalidFormat(3))
    );
    assert_eq!(Header::parse(&body, 0, 4), Err(ChunkError::HeaderTooShort(4)));
}
