use crate::{
    CodecError, MidiMessage, decode,
    file::{MetaEvent, SmfError},
    message::StatusNibble,
    reader::{ReadResult, read_exact, read_slice, read_vlq},
};
use alloc::vec::Vec;

/// What a [`TrackEvent`] holds
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackEventKind {
    /// A MIDI message, including system exclusive
    Message(MidiMessage),
    /// A meta event
    Meta(MetaEvent),
    /// An event that could not be decoded
    Error {
        /// Why it could not be decoded
        error: SmfError,
        /// The event's bytes, excluding the delta-time
        raw_data: Vec<u8>,
    },
}

/// An event in a track, with its timing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    delta_time: u32,
    time_elapsed: u64,
    kind: TrackEventKind,
}

impl TrackEvent {
    /// Create a new track event
    pub const fn new(delta_time: u32, time_elapsed: u64, kind: TrackEventKind) -> Self {
        Self {
            delta_time,
            time_elapsed,
            kind,
        }
    }

    /// Ticks since the previous event
    pub const fn delta_time(&self) -> u32 {
        self.delta_time
    }

    /// Ticks since the start of the track
    pub const fn time_elapsed(&self) -> u64 {
        self.time_elapsed
    }

    /// The event
    pub fn kind(&self) -> &TrackEventKind {
        &self.kind
    }

    /// The MIDI message, if this is one
    pub fn message(&self) -> Option<&MidiMessage> {
        match &self.kind {
            TrackEventKind::Message(message) => Some(message),
            _ => None,
        }
    }

    /// The meta event, if this is one
    pub fn meta_event(&self) -> Option<&MetaEvent> {
        match &self.kind {
            TrackEventKind::Meta(meta) => Some(meta),
            _ => None,
        }
    }

    /// The error, if this event could not be decoded
    pub fn error(&self) -> Option<&SmfError> {
        match &self.kind {
            TrackEventKind::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The undecodable bytes, if this event could not be decoded
    pub fn raw_data(&self) -> Option<&[u8]> {
        match &self.kind {
            TrackEventKind::Error { raw_data, .. } => Some(raw_data),
            _ => None,
        }
    }
}

#[doc = r#"
A parsed `MTrk` chunk.

`errors` holds, in order, every error recorded while parsing the track. A
track-fatal error is always the last one, and no events follow it.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<TrackEvent>,
    errors: Vec<SmfError>,
}

impl Track {
    /// Create a new track from events, without errors
    pub fn new(events: Vec<TrackEvent>) -> Self {
        Self {
            events,
            errors: Vec::new(),
        }
    }

    /// The events of the track, in order
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// The errors recorded while parsing the track
    pub fn errors(&self) -> &[SmfError] {
        &self.errors
    }

    /// The `time_elapsed` of the last event
    pub fn end_time(&self) -> u64 {
        self.events.last().map_or(0, TrackEvent::time_elapsed)
    }

    /// Iterates over the MIDI messages of the track
    pub fn messages(&self) -> impl Iterator<Item = &MidiMessage> {
        self.events.iter().filter_map(TrackEvent::message)
    }
}

/// The last channel voice message's status, lent to following data bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunningStatus {
    status: u8,
    /// Length of the message, status byte included
    len: usize,
}

/// The result of reading one event
struct Step {
    delta_time: u32,
    kind: TrackEventKind,
    consumed: usize,
    running_status: Option<RunningStatus>,
}

#[doc = r#"
Parses the track data in `bytes[start..start + length]`.

Events that fail to decode are kept as [`TrackEventKind::Error`] and parsing
continues with the next event. Two conditions make the position of the next
event unknowable and end the track early, keeping the events read so far:
a data byte with no running status to borrow, and an event that runs past the
end of the track.

# Example
```rust
# use midiwire::prelude::*;
// note-on, a running status note-on, end of track
let data = [0x00, 0x90, 60, 100, 0x10, 62, 101, 0x00, 0xFF, 0x2F, 0x00];
let track = parse_track(&data, 0, data.len());

assert!(track.errors().is_empty());
assert_eq!(track.events().len(), 3);
assert_eq!(track.end_time(), 16);
```
"#]
pub fn parse_track(bytes: &[u8], start: usize, length: usize) -> Track {
    let end = start.saturating_add(length).min(bytes.len());
    let mut track = Track::default();
    let mut position = start;
    let mut time_elapsed: u64 = 0;
    let mut running_status = None;

    while position < end {
        let step = match read_event(bytes, position, end, running_status) {
            Ok(step) => step,
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Abandoning track at {position}: {error}");
                track.errors.push(error);
                break;
            }
        };
        time_elapsed += step.delta_time as u64;
        if let TrackEventKind::Error { error, .. } = &step.kind {
            #[cfg(feature = "tracing")]
            tracing::warn!("Skipping event at {position}: {error}");
            track.errors.push(error.clone());
        }
        track
            .events
            .push(TrackEvent::new(step.delta_time, time_elapsed, step.kind));
        position += step.consumed;
        running_status = step.running_status;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Parsed track at {start}: {} events, {} errors",
        track.events.len(),
        track.errors.len()
    );
    track
}

/// Reads the event at `position`: its delta-time, then the event itself.
///
/// `Err` is returned only for conditions that end the track.
fn read_event(
    bytes: &[u8],
    position: usize,
    end: usize,
    running_status: Option<RunningStatus>,
) -> Result<Step, SmfError> {
    let (delta_time, delta_len) = read_vlq(bytes, position, end).map_err(SmfError::Truncated)?;
    let at = position + delta_len;
    let ([first], _) = read_exact::<1>(bytes, at, end).map_err(SmfError::Truncated)?;

    let (kind, event_len, running_status) = match first {
        0xFF => {
            let (kind, len) = read_meta(bytes, at, end).map_err(SmfError::Truncated)?;
            (kind, len, None)
        }
        0xF0 => {
            let (data, len) = read_sized(bytes, at + 1, end).map_err(SmfError::Truncated)?;
            let mut message = Vec::with_capacity(data.len() + 1);
            message.push(0xF0);
            message.extend_from_slice(data);
            let kind = match decode(&message) {
                Ok(decoded) => TrackEventKind::Message(decoded),
                Err(source) => event_error(at, source, message),
            };
            (kind, 1 + len, None)
        }
        0xF7 => {
            let (data, len) = read_sized(bytes, at + 1, end).map_err(SmfError::Truncated)?;
            (decode_event(data, at), 1 + len, None)
        }
        status => match StatusNibble::of(status) {
            Some(nibble) => {
                let len = nibble.message_len();
                let message = read_slice(bytes, at, len, end).map_err(SmfError::Truncated)?;
                let kind = decode_event(message, at);
                let running_status = match (&kind, nibble) {
                    (TrackEventKind::Message(_), StatusNibble::System) => running_status,
                    (TrackEventKind::Message(_), _) => Some(RunningStatus { status, len }),
                    _ => running_status,
                };
                (kind, len, running_status)
            }
            None => {
                let Some(previous) = running_status else {
                    return Err(SmfError::RunningStatusWithoutStatus {
                        offset: at,
                        byte: status,
                    });
                };
                let data_len = previous.len - 1;
                let data = read_slice(bytes, at, data_len, end).map_err(SmfError::Truncated)?;
                let mut message = Vec::with_capacity(previous.len);
                message.push(previous.status);
                message.extend_from_slice(data);
                let kind = match decode(&message) {
                    Ok(decoded) => TrackEventKind::Message(decoded),
                    Err(source) => event_error(at, source, message),
                };
                (kind, data_len, Some(previous))
            }
        },
    };

    Ok(Step {
        delta_time,
        kind,
        consumed: delta_len + event_len,
        running_status,
    })
}

/// Reads `FF <type> <length> <data>` at `at`.
fn read_meta(bytes: &[u8], at: usize, end: usize) -> ReadResult<(TrackEventKind, usize)> {
    let ([meta_type], type_len) = read_exact::<1>(bytes, at + 1, end)?;
    let (data, sized_len) = read_sized(bytes, at + 1 + type_len, end)?;
    let kind = match MetaEvent::parse(meta_type, data) {
        Ok(meta) => TrackEventKind::Meta(meta),
        Err(kind) => TrackEventKind::Error {
            error: SmfError::Meta {
                offset: at,
                meta_type,
                kind,
            },
            raw_data: data.to_vec(),
        },
    };
    Ok((kind, 1 + type_len + sized_len))
}

/// Reads a variable-length quantity and that many bytes after it.
fn read_sized(bytes: &[u8], position: usize, end: usize) -> ReadResult<(&[u8], usize)> {
    let (len, len_len) = read_vlq(bytes, position, end)?;
    let data = read_slice(bytes, position + len_len, len as usize, end)?;
    Ok((data, len_len + data.len()))
}

fn decode_event(message: &[u8], at: usize) -> TrackEventKind {
    match decode(message) {
        Ok(decoded) => TrackEventKind::Message(decoded),
        Err(source) => event_error(at, source, message.to_vec()),
    }
}

fn event_error(offset: usize, source: CodecError, raw_data: Vec<u8>) -> TrackEventKind {
    TrackEventKind::Error {
        error: SmfError::Event { offset, source },
        raw_data,
    }
}

#[test]
fn running_status_borrows_previous_status() {
    use crate::{Channel, DataByte};
    use pretty_assertions::assert_eq;
    let data = [
        0x00, 0x91, 60, 100, // note on
        0x60, 62, 101, // running status note on
        0x00, 62, 0, // running status, zero velocity
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let track = parse_track(&data, 0, data.len());
    assert!(track.errors().is_empty());

    let messages: Vec<_> = track.messages().cloned().collect();
    let channel = Channel::new(1).unwrap();
    assert_eq!(
        messages,
        [
            MidiMessage::NoteOn {
                channel,
                note: DataByte::new(60).unwrap(),
                velocity: DataByte::new(100).unwrap(),
            },
            MidiMessage::NoteOn {
                channel,
                note: DataByte::new(62).unwrap(),
                velocity: DataByte::new(101).unwrap(),
            },
            MidiMessage::NoteOff {
                channel,
                note: DataByte::new(62).unwrap(),
                velocity: DataByte::new(0).unwrap(),
            },
        ]
    );
    assert_eq!(track.events()[1].time_elapsed(), 0x60);
    assert_eq!(track.events()[3].meta_event(), Some(&MetaEvent::EndOfTrack));
}

#[test]
fn running_status_without_status_ends_track() {
    use pretty_assertions::assert_eq;
    let data = [
        0x00, 0xFF, 0x03, 0x01, b'A', // name
        0x00, 60, 100, // data bytes with nothing to borrow
        0x00, 0x90, 60, 100,
    ];
    let track = parse_track(&data, 0, data.len());
    assert_eq!(track.events().len(), 1);
    assert_eq!(
        track.errors(),
        &[SmfError::RunningStatusWithoutStatus {
            offset: 6,
            byte: 60
        }]
    );
}

#[test]
fn meta_events_clear_running_status() {
    let data = [
        0x00, 0x90, 60, 100, //
        0x00, 0xFF, 0x01, 0x00, // empty text
        0x00, 62, 100,
    ];
    let track = parse_track(&data, 0, data.len());
    assert_eq!(track.events().len(), 2);
    assert!(track.errors()[0].is_track_fatal());
}

#[test]
fn sysex_clears_running_status() {
    use pretty_assertions::assert_eq;
    let data = [
        0x00, 0x90, 60, 100, //
        0x00, 0xF0, 0x02, 0x43, 0xF7, // sysex
        0x00, 62, 100,
    ];
    let track = parse_track(&data, 0, data.len());
    assert_eq!(track.events().len(), 2);
    assert_eq!(
        track.errors(),
        &[SmfError::RunningStatusWithoutStatus {
            offset: 10,
            byte: 62
        }]
    );

    let data = [
        0x00, 0x90, 60, 100, //
        0x00, 0xF7, 0x01, 0xFA, // escaped start
        0x00, 62, 100,
    ];
    let track = parse_track(&data, 0, data.len());
    assert_eq!(track.events().len(), 2);
    assert_eq!(track.events()[1].message(), Some(&MidiMessage::Start));
    assert_eq!(
        track.errors(),
        &[SmfError::RunningStatusWithoutStatus {
            offset: 9,
            byte: 62
        }]
    );
}

#[test]
fn single_byte_system_events_keep_running_status() {
    use crate::{Channel, DataByte};
    use pretty_assertions::assert_eq;
    let data = [
        0x00, 0x93, 60, 100, //
        0x00, 0xF8, // clock
        0x00, 62, 100, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let track = parse_track(&data, 0, data.len());
    assert!(track.errors().is_empty());
    assert_eq!(track.events()[1].message(), Some(&MidiMessage::Clock));
    assert_eq!(
        track.events()[2].message(),
        Some(&MidiMessage::NoteOn {
            channel: Channel::new(3).unwrap(),
            note: DataByte::new(62).unwrap(),
            velocity: DataByte::new(100).unwrap(),
        })
    );
}

#[test]
fn running_status_with_one_data_byte() {
    use crate::{Channel, DataByte};
    use pretty_assertions::assert_eq;
    let data = [
        0x00, 0xC2, 0x05, // program change
        0x00, 0x07, // running status program change
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let track = parse_track(&data, 0, data.len());
    assert!(track.errors().is_empty());

    let channel = Channel::new(2).unwrap();
    let messages: Vec<_> = track.messages().cloned().collect();
    assert_eq!(
        messages,
        [
            MidiMessage::Program {
                channel,
                program: DataByte::new(5).unwrap(),
            },
            MidiMessage::Program {
                channel,
                program: DataByte::new(7).unwrap(),
            },
        ]
    );
    assert_eq!(track.events()[2].meta_event(), Some(&MetaEvent::EndOfTrack));
}

#[test]
fn bad_events_are_recorded_and_skipped() {
    use pretty_assertions::assert_eq;
    let data = [
        0x00, 0xF4, // undefined system status
        0x00, 0xFF, 0x51, 0x01, 0x07, // tempo with a short payload
        0x00, 0xF7, 0x02, 0x43, 0x12, // escaped bytes that are not a message
        0x00, 0xF0, 0x03, 0x43, 0x12, 0xF7, // sysex
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let track = parse_track(&data, 0, data.len());
    assert_eq!(track.events().len(), 5);
    assert_eq!(track.errors().len(), 3);
    assert_eq!(track.events()[0].raw_data(), Some(&[0xF4][..]));
    assert_eq!(track.events()[1].raw_data(), Some(&[0x07][..]));
    assert_eq!(track.events()[2].raw_data(), Some(&[0x43, 0x12][..]));
    assert_eq!(
        track.events()[3].message(),
        Some(&MidiMessage::Sysex {
            data: alloc::vec![0x43, 0x12],
        })
    );
}

#[test]
fn event_past_track_end_is_fatal() {
    use crate::reader::ReaderError;
    use pretty_assertions::assert_eq;
    // the note-on needs a third byte, but the track ends
    let data = [0x00, 0xC0, 0x05, 0x00, 0x90, 60, 100];
    let track = parse_track(&data, 0, 6);
    assert_eq!(track.events().len(), 1);
    assert_eq!(track.errors(), &[SmfError::Truncated(ReaderError::oob(6))]);
}
