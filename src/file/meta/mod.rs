#![doc = r#"
Meta events

Meta events only exist inside MIDI files. On the wire of a track they look like

```text
FF <type> <length: vlq> <data>
```

Their length is explicit, so a malformed payload never desynchronizes the
track: [`MetaEvent::parse`] reports it and the parser moves on.
"#]

mod smpte_offset;
pub use smpte_offset::*;

mod signature;
pub use signature::*;

mod tempo;
pub use tempo::*;

use crate::file::MetaError;
use alloc::{string::String, vec::Vec};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The known meta event type bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MetaType {
    /// `0x00`
    SequenceNumber = 0x00,
    /// `0x01`
    Text = 0x01,
    /// `0x02`
    Copyright = 0x02,
    /// `0x03`, sequence or track name
    Name = 0x03,
    /// `0x04`
    InstrumentName = 0x04,
    /// `0x05`
    Lyric = 0x05,
    /// `0x06`
    Marker = 0x06,
    /// `0x07`
    CuePoint = 0x07,
    /// `0x20`
    ChannelPrefix = 0x20,
    /// `0x2F`
    EndOfTrack = 0x2F,
    /// `0x51`
    Tempo = 0x51,
    /// `0x54`
    SmpteOffset = 0x54,
    /// `0x58`
    TimeSignature = 0x58,
    /// `0x59`
    KeySignature = 0x59,
    /// `0x7F`
    SequencerSpecific = 0x7F,
}

/// A decoded meta event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaEvent {
    /// Pattern number of a format 2 track, or sequence number
    SequenceNumber(u16),
    /// Free text
    Text(String),
    /// Copyright notice
    Copyright(String),
    /// Sequence or track name
    Name(String),
    /// Instrument description
    InstrumentName(String),
    /// A syllable of lyrics
    Lyric(String),
    /// Rehearsal letter or section name
    Marker(String),
    /// Description of something happening on stage or screen
    CuePoint(String),
    /// The channel that following meta and sysex events relate to
    ChannelPrefix(u8),
    /// The required last event of a track
    EndOfTrack,
    /// Tempo change
    Tempo(Tempo),
    /// The SMPTE time the track starts at
    SmpteOffset(SmpteOffset),
    /// Time signature
    TimeSignature(TimeSignature),
    /// Key signature
    KeySignature(KeySignature),
    /// Manufacturer specific data
    SequencerSpecific(Vec<u8>),
    /// A meta type this crate does not interpret, kept verbatim.
    Unknown {
        /// The type byte
        meta_type: u8,
        /// The payload
        data: Vec<u8>,
    },
}

impl MetaEvent {
    /// Decodes the payload of a meta event of type `meta_type`.
    ///
    /// Unknown types are not an error; they become [`MetaEvent::Unknown`].
    /// Payload bytes past a fixed layout are ignored.
    pub fn parse(meta_type: u8, data: &[u8]) -> Result<Self, MetaError> {
        let Ok(known) = MetaType::try_from(meta_type) else {
            return Ok(Self::Unknown {
                meta_type,
                data: data.to_vec(),
            });
        };
        let event = match known {
            MetaType::SequenceNumber => Self::SequenceNumber(u16::from_be_bytes(fixed(data)?)),
            MetaType::Text => Self::Text(ascii(data)),
            MetaType::Copyright => Self::Copyright(ascii(data)),
            MetaType::Name => Self::Name(ascii(data)),
            MetaType::InstrumentName => Self::InstrumentName(ascii(data)),
            MetaType::Lyric => Self::Lyric(ascii(data)),
            MetaType::Marker => Self::Marker(ascii(data)),
            MetaType::CuePoint => Self::CuePoint(ascii(data)),
            MetaType::ChannelPrefix => {
                let [channel] = fixed(data)?;
                Self::ChannelPrefix(channel)
            }
            MetaType::EndOfTrack => Self::EndOfTrack,
            MetaType::Tempo => Self::Tempo(Tempo::from_bytes(fixed(data)?)),
            MetaType::SmpteOffset => Self::SmpteOffset(SmpteOffset::from_bytes(fixed(data)?)),
            MetaType::TimeSignature => {
                Self::TimeSignature(TimeSignature::from_bytes(fixed(data)?))
            }
            MetaType::KeySignature => Self::KeySignature(KeySignature::from_bytes(fixed(data)?)),
            MetaType::SequencerSpecific => Self::SequencerSpecific(data.to_vec()),
        };
        Ok(event)
    }

    /// The type byte this event is stored under
    pub fn meta_type(&self) -> u8 {
        let known = match self {
            Self::SequenceNumber(_) => MetaType::SequenceNumber,
            Self::Text(_) => MetaType::Text,
            Self::Copyright(_) => MetaType::Copyright,
            Self::Name(_) => MetaType::Name,
            Self::InstrumentName(_) => MetaType::InstrumentName,
            Self::Lyric(_) => MetaType::Lyric,
            Self::Marker(_) => MetaType::Marker,
            Self::CuePoint(_) => MetaType::CuePoint,
            Self::ChannelPrefix(_) => MetaType::ChannelPrefix,
            Self::EndOfTrack => MetaType::EndOfTrack,
            Self::Tempo(_) => MetaType::Tempo,
            Self::SmpteOffset(_) => MetaType::SmpteOffset,
            Self::TimeSignature(_) => MetaType::TimeSignature,
            Self::KeySignature(_) => MetaType::KeySignature,
            Self::SequencerSpecific(_) => MetaType::SequencerSpecific,
            Self::Unknown { meta_type, .. } => return *meta_type,
        };
        known.into()
    }

    /// Returns the text of the text-like events
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text)
            | Self::Copyright(text)
            | Self::Name(text)
            | Self::InstrumentName(text)
            | Self::Lyric(text)
            | Self::Marker(text)
            | Self::CuePoint(text) => Some(text),
            _ => None,
        }
    }
}

/// One char per byte. Bytes above `0x7F` map to the matching Latin-1 code point.
fn ascii(data: &[u8]) -> String {
    data.iter().map(|&byte| byte as char).collect()
}

fn fixed<const N: usize>(data: &[u8]) -> Result<[u8; N], MetaError> {
    data.get(..N)
        .and_then(|head| head.try_into().ok())
        .ok_or(MetaError::Length {
            expected: N,
            found: data.len(),
        })
}

#[test]
fn fixed_layouts() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        MetaEvent::parse(0x51, &[0x07, 0xA1, 0x20]),
        Ok(MetaEvent::Tempo(Tempo::new(500_000)))
    );
    assert_eq!(
        MetaEvent::parse(0x00, &[0x01, 0x02]),
        Ok(MetaEvent::SequenceNumber(0x0102))
    );
    assert_eq!(
        MetaEvent::parse(0x58, &[4, 2, 24, 8]),
        Ok(MetaEvent::TimeSignature(TimeSignature {
            numerator: 4,
            denominator: 2,
            clocks_per_click: 24,
            thirty_seconds_per_quarter: 8,
        }))
    );
    assert_eq!(
        MetaEvent::parse(0x51, &[0x07, 0xA1]),
        Err(MetaError::Length {
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn text_and_passthrough() {
    use pretty_assertions::assert_eq;
    let name = MetaEvent::parse(0x03, b"Piano").unwrap();
    assert_eq!(name.text(), Some("Piano"));
    assert_eq!(name.meta_type(), 0x03);

    let port = MetaEvent::parse(0x21, &[0x01]).unwrap();
    assert_eq!(
        port,
        MetaEvent::Unknown {
            meta_type: 0x21,
            data: alloc::vec![0x01],
        }
    );
    assert_eq!(port.meta_type(), 0x21);
    assert_eq!(MetaEvent::parse(0x2F, &[]), Ok(MetaEvent::EndOfTrack));
}
