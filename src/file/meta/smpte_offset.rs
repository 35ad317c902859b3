#![doc = r#"
SMPTE Offset - the SMPTE time at which a track is to start

```text
FF 54 05 hr mn se fr ff
```

The hour byte is packed as `0rrhhhhh`: `rr` is the [`SmpteFps`] rate code and
`hhhhh` the hour. `ff` is the fractional frame in hundredths of a frame.

The five bytes are kept as they appear in the file; the accessors decode them.
"#]

use crate::prelude::SmpteFps;

/// A track's starting position in SMPTE time code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The packed rate and hour byte
    pub hour: u8,
    /// Minute component of the time code
    pub minute: u8,
    /// Second component of the time code
    pub second: u8,
    /// Frame number within the current second
    pub frame: u8,
    /// Hundredths of a frame
    pub fractional_frame: u8,
}

impl SmpteOffset {
    /// Reads the first five bytes of the payload.
    pub const fn from_bytes(data: [u8; 5]) -> Self {
        Self {
            hour: data[0],
            minute: data[1],
            second: data[2],
            frame: data[3],
            fractional_frame: data[4],
        }
    }

    /// The frame rate from bits 5-6 of the hour byte
    pub const fn fps(&self) -> SmpteFps {
        SmpteFps::from_rate_code(self.hour >> 5)
    }

    /// The hour without the rate bits
    pub const fn hours(&self) -> u8 {
        self.hour & 0b0001_1111
    }

    /// Calculate the offset in microseconds using a different frame rate.
    ///
    /// Useful when the file's header declares a frame rate that disagrees with the offset's.
    pub const fn as_micros_with_override(&self, fps: SmpteFps) -> f64 {
        ((((self.hours() as u64 * 3600) + (self.minute as u64) * 60 + self.second as u64)
            * 1_000_000) as f64)
            + ((self.frame as u64) * 1_000_000) as f64 / fps.as_f64()
            + ((self.fractional_frame as u32) * 10_000) as f64 / fps.as_f64()
    }

    /// Convert this SMPTE offset to microseconds, using its own frame rate.
    pub const fn as_micros(&self) -> f64 {
        self.as_micros_with_override(self.fps())
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // these are the bytes after 00 FF 54 05
    let offset = SmpteOffset::from_bytes([0x41, 0x17, 0x2D, 0x0C, 0x22]);

    assert_eq!(offset.fps(), SmpteFps::TwentyNine);
    assert_eq!(offset.hours(), 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.fractional_frame, 34);
}

#[test]
fn smpte_offset_micros() {
    // 00:00:01, frame 12.5 at 25 fps
    let offset = SmpteOffset::from_bytes([0x20, 0, 1, 12, 50]);
    assert_eq!(offset.fps(), SmpteFps::TwentyFive);
    assert!((offset.as_micros() - 1_500_000.).abs() < 0.01);
    assert!((offset.as_micros_with_override(SmpteFps::Thirty) - 1_416_666.67).abs() < 0.01);
}
