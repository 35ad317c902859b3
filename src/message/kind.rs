use core::{fmt, str::FromStr};

use crate::CodecError;
use alloc::string::ToString;

#[doc = r#"
The tag of a [`MidiMessage`](crate::MidiMessage).

Displays and parses as the conventional camel-cased message name.

# Example
```rust
# use midiwire::prelude::*;
let kind: MessageKind = "quarterFrameMTC".parse().unwrap();
assert_eq!(kind, MessageKind::QuarterFrameMtc);
assert_eq!(kind.to_string(), "quarterFrameMTC");

assert!(matches!(
    "polyPressure".parse::<MessageKind>(),
    Err(CodecError::UnsupportedMessageType(_))
));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    /// `noteOff`
    NoteOff,
    /// `noteOn`
    NoteOn,
    /// `aftertouch`
    Aftertouch,
    /// `control`
    Control,
    /// `program`
    Program,
    /// `pitchbend`
    Pitchbend,
    /// `sysex`
    Sysex,
    /// `quarterFrameMTC`
    QuarterFrameMtc,
    /// `songPointer`
    SongPointer,
    /// `songSelect`
    SongSelect,
    /// `tuneRequest`
    TuneRequest,
    /// `clock`
    Clock,
    /// `start`
    Start,
    /// `continue`
    Continue,
    /// `stop`
    Stop,
    /// `activeSense`
    ActiveSense,
    /// `reset`
    Reset,
}

impl MessageKind {
    /// Every message kind, in status byte order.
    pub const ALL: [MessageKind; 17] = [
        Self::NoteOff,
        Self::NoteOn,
        Self::Aftertouch,
        Self::Control,
        Self::Program,
        Self::Pitchbend,
        Self::Sysex,
        Self::QuarterFrameMtc,
        Self::SongPointer,
        Self::SongSelect,
        Self::TuneRequest,
        Self::Clock,
        Self::Start,
        Self::Continue,
        Self::Stop,
        Self::ActiveSense,
        Self::Reset,
    ];

    /// The conventional name of the message
    pub const fn name(&self) -> &'static str {
        use MessageKind::*;
        match self {
            NoteOff => "noteOff",
            NoteOn => "noteOn",
            Aftertouch => "aftertouch",
            Control => "control",
            Program => "program",
            Pitchbend => "pitchbend",
            Sysex => "sysex",
            QuarterFrameMtc => "quarterFrameMTC",
            SongPointer => "songPointer",
            SongSelect => "songSelect",
            TuneRequest => "tuneRequest",
            Clock => "clock",
            Start => "start",
            Continue => "continue",
            Stop => "stop",
            ActiveSense => "activeSense",
            Reset => "reset",
        }
    }

    /// True for the messages that carry a channel
    pub const fn is_channel_voice(&self) -> bool {
        use MessageKind::*;
        matches!(
            self,
            NoteOff | NoteOn | Aftertouch | Control | Program | Pitchbend
        )
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MessageKind {
    type Err = CodecError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CodecError::UnsupportedMessageType(s.to_string()))
    }
}

#[test]
fn names_round_trip() {
    use pretty_assertions::assert_eq;
    for kind in MessageKind::ALL {
        assert_eq!(kind.name().parse::<MessageKind>().unwrap(), kind);
    }
}
