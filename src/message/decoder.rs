use super::{MessageKind, MidiMessage, QuarterFrame, StatusNibble, SystemStatus};
use crate::{Channel, CodecError, DataByte, U14};

#[doc = r#"
Decodes exactly one MIDI wire message, status byte first.

Bytes past the length required by the status byte are ignored, except for
system exclusive, which keeps everything between the `0xF0` and a trailing `0xF7`.

# Errors
- [`CodecError::Empty`] for an empty slice
- [`CodecError::UnrecognizedMessage`] if the first byte is not a status byte, or
  is one of the undefined system statuses (`0xF4`, `0xF5`, `0xF7`, `0xF9`, `0xFD`)
- [`CodecError::Truncated`] if the data bytes are missing
- [`CodecError::InvalidDataByte`] if a data byte has its leading bit set

# Example
```rust
# use midiwire::prelude::*;
let message = decode(&[0xE3, 0x00, 0x40]).unwrap();
assert_eq!(
    message,
    MidiMessage::Pitchbend {
        channel: Channel::new(3).unwrap(),
        value: U14::CENTER,
    }
);
```
"#]
pub fn decode(bytes: &[u8]) -> Result<MidiMessage, CodecError> {
    let Some(&status) = bytes.first() else {
        return Err(CodecError::Empty);
    };
    let Some(nibble) = StatusNibble::of(status) else {
        return Err(CodecError::UnrecognizedMessage(bytes.to_vec()));
    };
    let channel = Channel::from_status(status);

    let message = match nibble {
        StatusNibble::NoteOff => {
            let [note, velocity] = data_bytes(bytes, MessageKind::NoteOff)?;
            MidiMessage::NoteOff {
                channel,
                note,
                velocity,
            }
        }
        StatusNibble::NoteOn => {
            let [note, velocity] = data_bytes(bytes, MessageKind::NoteOn)?;
            if velocity.value() == 0 {
                MidiMessage::NoteOff {
                    channel,
                    note,
                    velocity,
                }
            } else {
                MidiMessage::NoteOn {
                    channel,
                    note,
                    velocity,
                }
            }
        }
        StatusNibble::PolyAftertouch => {
            let [note, pressure] = data_bytes(bytes, MessageKind::Aftertouch)?;
            MidiMessage::Aftertouch {
                channel,
                note: Some(note),
                pressure,
            }
        }
        StatusNibble::Control => {
            let [number, value] = data_bytes(bytes, MessageKind::Control)?;
            MidiMessage::Control {
                channel,
                number,
                value,
            }
        }
        StatusNibble::Program => {
            let [program] = data_bytes(bytes, MessageKind::Program)?;
            MidiMessage::Program { channel, program }
        }
        StatusNibble::ChannelAftertouch => {
            let [pressure] = data_bytes(bytes, MessageKind::Aftertouch)?;
            MidiMessage::Aftertouch {
                channel,
                note: None,
                pressure,
            }
        }
        StatusNibble::Pitchbend => {
            let [lsb, msb] = data_bytes(bytes, MessageKind::Pitchbend)?;
            MidiMessage::Pitchbend {
                channel,
                value: U14::from_lsb_msb(lsb.value(), msb.value()),
            }
        }
        StatusNibble::System => decode_system(bytes)?,
    };
    Ok(message)
}

fn decode_system(bytes: &[u8]) -> Result<MidiMessage, CodecError> {
    let status = SystemStatus::try_from(bytes[0] & 0x0F)
        .map_err(|_| CodecError::UnrecognizedMessage(bytes.to_vec()))?;

    let message = match status {
        SystemStatus::SysexStart => {
            let data = bytes.strip_prefix(&[0xF0]).unwrap_or(bytes);
            let data = data.strip_suffix(&[0xF7]).unwrap_or(data);
            MidiMessage::Sysex {
                data: data.to_vec(),
            }
        }
        SystemStatus::QuarterFrame => {
            let [byte] = data_bytes(bytes, MessageKind::QuarterFrameMtc)?;
            MidiMessage::QuarterFrameMtc(QuarterFrame::from_data_byte(byte.value()))
        }
        SystemStatus::SongPointer => {
            let [lsb, msb] = data_bytes(bytes, MessageKind::SongPointer)?;
            MidiMessage::SongPointer {
                value: U14::from_lsb_msb(lsb.value(), msb.value()),
            }
        }
        SystemStatus::SongSelect => {
            let [value] = data_bytes(bytes, MessageKind::SongSelect)?;
            MidiMessage::SongSelect { value }
        }
        SystemStatus::TuneRequest => MidiMessage::TuneRequest,
        // a lone end-of-exclusive has no meaning outside a sysex
        SystemStatus::SysexEnd => return Err(CodecError::UnrecognizedMessage(bytes.to_vec())),
        SystemStatus::Clock => MidiMessage::Clock,
        SystemStatus::Start => MidiMessage::Start,
        SystemStatus::Continue => MidiMessage::Continue,
        SystemStatus::Stop => MidiMessage::Stop,
        SystemStatus::ActiveSense => MidiMessage::ActiveSense,
        SystemStatus::Reset => MidiMessage::Reset,
    };
    Ok(message)
}

/// Reads the `N` data bytes following the status byte.
fn data_bytes<const N: usize>(
    bytes: &[u8],
    kind: MessageKind,
) -> Result<[DataByte; N], CodecError> {
    let Some(data) = bytes.get(1..=N) else {
        return Err(CodecError::Truncated {
            kind,
            expected: N + 1,
            found: bytes.len(),
        });
    };
    let mut out = [DataByte::default(); N];
    for (index, (slot, &byte)) in out.iter_mut().zip(data).enumerate() {
        *slot = DataByte::new(byte).map_err(|_| CodecError::InvalidDataByte {
            index: index + 1,
            byte,
        })?;
    }
    Ok(out)
}

#[test]
fn note_on_without_velocity_is_note_off() {
    use pretty_assertions::assert_eq;
    let message = decode(&[0x95, 60, 0]).unwrap();
    assert_eq!(
        message,
        MidiMessage::NoteOff {
            channel: Channel::new(5).unwrap(),
            note: DataByte::new(60).unwrap(),
            velocity: DataByte::new(0).unwrap(),
        }
    );
}

#[test]
fn aftertouch_forms() {
    use pretty_assertions::assert_eq;
    let poly = decode(&[0xA1, 64, 90]).unwrap();
    let MidiMessage::Aftertouch { note, pressure, .. } = poly else {
        panic!("expected aftertouch");
    };
    assert_eq!(note, Some(DataByte::new(64).unwrap()));
    assert_eq!(pressure.value(), 90);

    let channel = decode(&[0xD1, 90]).unwrap();
    let MidiMessage::Aftertouch { note, pressure, .. } = channel else {
        panic!("expected aftertouch");
    };
    assert_eq!(note, None);
    assert_eq!(pressure.value(), 90);
}

#[test]
fn sysex_strips_one_frame_on_each_side() {
    use pretty_assertions::assert_eq;
    let message = decode(&[0xF0, 0x7E, 0xF0, 0xF7, 0xF7]).unwrap();
    assert_eq!(
        message,
        MidiMessage::Sysex {
            data: alloc::vec![0x7E, 0xF0, 0xF7],
        }
    );
    // an unterminated packet keeps its tail
    let message = decode(&[0xF0, 0x43, 0x10]).unwrap();
    assert_eq!(
        message,
        MidiMessage::Sysex {
            data: alloc::vec![0x43, 0x10],
        }
    );
}

#[test]
fn unrecognized_status() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        decode(&[0x15]),
        Err(CodecError::UnrecognizedMessage(alloc::vec![0x15]))
    );
    assert_eq!(
        decode(&[0xF4]),
        Err(CodecError::UnrecognizedMessage(alloc::vec![0xF4]))
    );
    assert_eq!(decode(&[]), Err(CodecError::Empty));
}

#[test]
fn truncated_and_invalid_data() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        decode(&[0x90, 60]),
        Err(CodecError::Truncated {
            kind: MessageKind::NoteOn,
            expected: 3,
            found: 2,
        })
    );
    assert_eq!(
        decode(&[0xB0, 7, 0x80]),
        Err(CodecError::InvalidDataByte {
            index: 2,
            byte: 0x80,
        })
    );
}
