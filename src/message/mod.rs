#![doc = r#"
The MIDI wire message codec.

# Hierarchy
```text
                      |--------------|
                      | MidiMessage  |
                      |--------------|
                     /                \
|------------------------|     |----------------|
| Channel Voice (8x..Ex) |     | System (Fx)    |
|------------------------|     |----------------|
                                /              \
                     |---------------|   |-----------------|
                     | System Common |   | System Realtime |
                     |---------------|   |-----------------|
```

[`decode`] dispatches on the high nibble of the status byte, and once more
on the low nibble for system messages. [`encode`] is its exact inverse.
"#]

mod kind;
pub use kind::*;

mod status;
pub use status::*;

mod quarter_frame;
pub use quarter_frame::*;

mod decoder;
pub use decoder::*;

mod encoder;
pub use encoder::*;

use crate::{Channel, DataByte, U14};
use alloc::vec::Vec;

#[doc = r#"
A single MIDI wire message.

Channel voice variants carry the [`Channel`] taken from the low nibble of the status byte.

A note-on with a velocity of zero is never produced by [`decode`]; it is reported
as [`MidiMessage::NoteOff`] with a velocity of zero.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MidiMessage {
    /// Release a note (`0x8n`)
    NoteOff {
        /// The channel
        channel: Channel,
        /// The note number
        note: DataByte,
        /// Release velocity
        velocity: DataByte,
    },
    /// Press a note (`0x9n`)
    NoteOn {
        /// The channel
        channel: Channel,
        /// The note number
        note: DataByte,
        /// Attack velocity
        velocity: DataByte,
    },
    /// Polyphonic (`0xAn`) or channel (`0xDn`) pressure.
    ///
    /// `note` is `Some` for the polyphonic form and `None` for the channel form.
    Aftertouch {
        /// The channel
        channel: Channel,
        /// The pressed note, for polyphonic aftertouch
        note: Option<DataByte>,
        /// The pressure
        pressure: DataByte,
    },
    /// Control change (`0xBn`)
    Control {
        /// The channel
        channel: Channel,
        /// The controller number
        number: DataByte,
        /// The controller value
        value: DataByte,
    },
    /// Program change (`0xCn`)
    Program {
        /// The channel
        channel: Channel,
        /// The program number
        program: DataByte,
    },
    /// Pitch bend (`0xEn`), centered at `8192`
    Pitchbend {
        /// The channel
        channel: Channel,
        /// The bend amount
        value: U14,
    },
    /// System exclusive (`0xF0 .. 0xF7`).
    ///
    /// `data` excludes the framing bytes.
    Sysex {
        /// The payload between the framing bytes
        data: Vec<u8>,
    },
    /// MIDI time code quarter frame (`0xF1`)
    QuarterFrameMtc(QuarterFrame),
    /// Song position pointer (`0xF2`), in MIDI beats
    SongPointer {
        /// Sixteenth notes since the start of the song
        value: U14,
    },
    /// Song select (`0xF3`)
    SongSelect {
        /// The song number
        value: DataByte,
    },
    /// Tune request (`0xF6`)
    TuneRequest,
    /// Timing clock (`0xF8`)
    Clock,
    /// Start (`0xFA`)
    Start,
    /// Continue (`0xFB`)
    Continue,
    /// Stop (`0xFC`)
    Stop,
    /// Active sensing (`0xFE`)
    ActiveSense,
    /// System reset (`0xFF`)
    Reset,
}

impl MidiMessage {
    /// Returns the tag of this message
    pub const fn kind(&self) -> MessageKind {
        use MidiMessage::*;
        match self {
            NoteOff { .. } => MessageKind::NoteOff,
            NoteOn { .. } => MessageKind::NoteOn,
            Aftertouch { .. } => MessageKind::Aftertouch,
            Control { .. } => MessageKind::Control,
            Program { .. } => MessageKind::Program,
            Pitchbend { .. } => MessageKind::Pitchbend,
            Sysex { .. } => MessageKind::Sysex,
            QuarterFrameMtc(_) => MessageKind::QuarterFrameMtc,
            SongPointer { .. } => MessageKind::SongPointer,
            SongSelect { .. } => MessageKind::SongSelect,
            TuneRequest => MessageKind::TuneRequest,
            Clock => MessageKind::Clock,
            Start => MessageKind::Start,
            Continue => MessageKind::Continue,
            Stop => MessageKind::Stop,
            ActiveSense => MessageKind::ActiveSense,
            Reset => MessageKind::Reset,
        }
    }

    /// Returns the channel for channel voice messages
    pub const fn channel(&self) -> Option<Channel> {
        use MidiMessage::*;
        match self {
            NoteOff { channel, .. }
            | NoteOn { channel, .. }
            | Aftertouch { channel, .. }
            | Control { channel, .. }
            | Program { channel, .. }
            | Pitchbend { channel, .. } => Some(*channel),
            _ => None,
        }
    }
}
