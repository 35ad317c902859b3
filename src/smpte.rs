#![doc = r#"
SMPTE frame rates

MIDI expresses absolute time in SMPTE time code in three places:
the division word of a file header, the SMPTE offset meta event and
the MIDI time code quarter frame message. The latter two share a 2-bit
rate code:

| code | rate                     |
|------|--------------------------|
| `00` | 24 fps (film)            |
| `01` | 25 fps (PAL/SECAM)       |
| `10` | 29.97 fps (NTSC drop)    |
| `11` | 30 fps (NTSC non-drop)   |
"#]

/// The possible FPS (Frames Per Second) for MIDI time code
///
/// The "TwentyNine" variant represents 29.97 fps, also known as "drop-frame" timecode.
/// No frames are dropped; the time code numbering skips values to stay aligned with
/// real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001)
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// Reads the 2-bit rate code. Only the lowest two bits are considered.
    pub const fn from_rate_code(code: u8) -> Self {
        match code & 0b11 {
            0 => Self::TwentyFour,
            1 => Self::TwentyFive,
            2 => Self::TwentyNine,
            _ => Self::Thirty,
        }
    }

    /// Returns the 2-bit rate code
    pub const fn rate_code(&self) -> u8 {
        match self {
            Self::TwentyFour => 0,
            Self::TwentyFive => 1,
            Self::TwentyNine => 2,
            Self::Thirty => 3,
        }
    }

    /// Matches the nominal frame count used by a header division.
    ///
    /// A division declaring 29 frames means drop frame.
    pub const fn from_division(fps: u8) -> Option<Self> {
        match fps {
            24 => Some(Self::TwentyFour),
            25 => Some(Self::TwentyFive),
            29 => Some(Self::TwentyNine),
            30 => Some(Self::Thirty),
            _ => None,
        }
    }

    /// Get the nominal frame rate as an integer division value.
    ///
    /// Drop-frame 29.97 fps returns 30 here, as MIDI uses the nominal rate
    /// when counting frames.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// Get the actual frame rate, including the fractional drop-frame rate.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

/// NTSC drop-frame rate: 29.97002997... fps
const DROP_FRAME: f64 = 30_000. / 1001.;

#[test]
fn rate_codes() {
    use pretty_assertions::assert_eq;
    for code in 0..4 {
        assert_eq!(SmpteFps::from_rate_code(code).rate_code(), code);
    }
    assert_eq!(SmpteFps::from_division(29), Some(SmpteFps::TwentyNine));
    assert_eq!(SmpteFps::from_division(31), None);
}
