use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The high nibble of a status byte (`status >> 4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum StatusNibble {
    /// `0x8n`
    NoteOff = 0x8,
    /// `0x9n`
    NoteOn = 0x9,
    /// `0xAn`
    PolyAftertouch = 0xA,
    /// `0xBn`
    Control = 0xB,
    /// `0xCn`
    Program = 0xC,
    /// `0xDn`
    ChannelAftertouch = 0xD,
    /// `0xEn`
    Pitchbend = 0xE,
    /// `0xFn`, dispatched again by [`SystemStatus`]
    System = 0xF,
}

impl StatusNibble {
    /// Reads the high nibble of a status byte.
    ///
    /// Returns `None` for data bytes (leading bit cleared).
    pub fn of(status: u8) -> Option<Self> {
        Self::try_from(status >> 4).ok()
    }

    /// The number of bytes, status included, a message with this status occupies.
    ///
    /// System messages are reported as one byte; their real length depends on the low nibble.
    pub const fn message_len(&self) -> usize {
        use StatusNibble::*;
        match self {
            NoteOff | NoteOn | PolyAftertouch | Control | Pitchbend => 3,
            Program | ChannelAftertouch => 2,
            System => 1,
        }
    }

    /// Combines the nibble with a low nibble into a status byte.
    pub fn with_low(self, low: u8) -> u8 {
        (u8::from(self) << 4) + (low & 0x0F)
    }
}

/// The low nibble of a system status byte (`status & 0xF`).
///
/// `0x4`, `0x5`, `0x9` and `0xD` are undefined by MIDI 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum SystemStatus {
    /// `0xF0`
    SysexStart = 0x0,
    /// `0xF1`
    QuarterFrame = 0x1,
    /// `0xF2`
    SongPointer = 0x2,
    /// `0xF3`
    SongSelect = 0x3,
    /// `0xF6`
    TuneRequest = 0x6,
    /// `0xF7`
    SysexEnd = 0x7,
    /// `0xF8`
    Clock = 0x8,
    /// `0xFA`
    Start = 0xA,
    /// `0xFB`
    Continue = 0xB,
    /// `0xFC`
    Stop = 0xC,
    /// `0xFE`
    ActiveSense = 0xE,
    /// `0xFF`
    Reset = 0xF,
}

impl SystemStatus {
    /// The full status byte, `0xF0 | low nibble`
    pub fn status_byte(self) -> u8 {
        StatusNibble::System.with_low(self.into())
    }
}

#[test]
fn status_nibbles() {
    use pretty_assertions::assert_eq;
    assert_eq!(StatusNibble::of(0x93), Some(StatusNibble::NoteOn));
    assert_eq!(StatusNibble::of(0x40), None);
    assert_eq!(StatusNibble::Pitchbend.with_low(5), 0xE5);
    assert_eq!(SystemStatus::Reset.status_byte(), 0xFF);
    assert!(SystemStatus::try_from(0x4).is_err());
}
