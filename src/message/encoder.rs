use super::{MidiMessage, StatusNibble, SystemStatus};
use crate::CodecError;
use alloc::{vec, vec::Vec};

#[doc = r#"
Encodes a message into its wire bytes.

This is the inverse of [`decode`](crate::decode):
- [`MidiMessage::Aftertouch`] with a `note` produces the 3-byte polyphonic form (`0xAn`),
  without one the 2-byte channel form (`0xDn`).
- [`MidiMessage::Sysex`] gets its `0xF0`/`0xF7` framing added.

# Errors
[`CodecError::FramingAlreadyPresent`] if sysex `data` begins with `0xF0` or ends with `0xF7`.

# Example
```rust
# use midiwire::prelude::*;
let message = MidiMessage::Sysex { data: vec![0x7E, 0x7F, 0x09, 0x01] };
assert_eq!(encode(&message).unwrap(), [0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7]);

let framed = MidiMessage::Sysex { data: vec![0xF0, 0x01] };
assert_eq!(encode(&framed), Err(CodecError::FramingAlreadyPresent));
```
"#]
pub fn encode(message: &MidiMessage) -> Result<Vec<u8>, CodecError> {
    use MidiMessage::*;
    let bytes = match message {
        NoteOff {
            channel,
            note,
            velocity,
        } => vec![
            StatusNibble::NoteOff.with_low(channel.index()),
            note.value(),
            velocity.value(),
        ],
        NoteOn {
            channel,
            note,
            velocity,
        } => vec![
            StatusNibble::NoteOn.with_low(channel.index()),
            note.value(),
            velocity.value(),
        ],
        Aftertouch {
            channel,
            note: Some(note),
            pressure,
        } => vec![
            StatusNibble::PolyAftertouch.with_low(channel.index()),
            note.value(),
            pressure.value(),
        ],
        Aftertouch {
            channel,
            note: None,
            pressure,
        } => vec![
            StatusNibble::ChannelAftertouch.with_low(channel.index()),
            pressure.value(),
        ],
        Control {
            channel,
            number,
            value,
        } => vec![
            StatusNibble::Control.with_low(channel.index()),
            number.value(),
            value.value(),
        ],
        Program { channel, program } => vec![
            StatusNibble::Program.with_low(channel.index()),
            program.value(),
        ],
        Pitchbend { channel, value } => {
            let [lsb, msb] = value.to_lsb_msb();
            vec![StatusNibble::Pitchbend.with_low(channel.index()), lsb, msb]
        }
        Sysex { data } => {
            if data.first() == Some(&0xF0) || data.last() == Some(&0xF7) {
                return Err(CodecError::FramingAlreadyPresent);
            }
            let mut bytes = Vec::with_capacity(data.len() + 2);
            bytes.push(SystemStatus::SysexStart.status_byte());
            bytes.extend_from_slice(data);
            bytes.push(SystemStatus::SysexEnd.status_byte());
            bytes
        }
        QuarterFrameMtc(frame) => vec![
            SystemStatus::QuarterFrame.status_byte(),
            frame.to_data_byte(),
        ],
        SongPointer { value } => {
            let [lsb, msb] = value.to_lsb_msb();
            vec![SystemStatus::SongPointer.status_byte(), lsb, msb]
        }
        SongSelect { value } => vec![SystemStatus::SongSelect.status_byte(), value.value()],
        TuneRequest => vec![SystemStatus::TuneRequest.status_byte()],
        Clock => vec![SystemStatus::Clock.status_byte()],
        Start => vec![SystemStatus::Start.status_byte()],
        Continue => vec![SystemStatus::Continue.status_byte()],
        Stop => vec![SystemStatus::Stop.status_byte()],
        ActiveSense => vec![SystemStatus::ActiveSense.status_byte()],
        Reset => vec![SystemStatus::Reset.status_byte()],
    };
    Ok(bytes)
}

#[test]
fn aftertouch_form_follows_note() {
    use crate::{Channel, DataByte};
    use pretty_assertions::assert_eq;
    let channel = Channel::new(2).unwrap();
    let pressure = DataByte::new(33).unwrap();

    let poly = MidiMessage::Aftertouch {
        channel,
        note: Some(DataByte::new(61).unwrap()),
        pressure,
    };
    assert_eq!(encode(&poly).unwrap(), [0xA2, 61, 33]);

    let mono = MidiMessage::Aftertouch {
        channel,
        note: None,
        pressure,
    };
    assert_eq!(encode(&mono).unwrap(), [0xD2, 33]);
}

#[test]
fn sysex_framing_is_a_caller_contract() {
    use pretty_assertions::assert_eq;
    let trailing = MidiMessage::Sysex {
        data: vec![0x01, 0xF7],
    };
    assert_eq!(encode(&trailing), Err(CodecError::FramingAlreadyPresent));

    let empty = MidiMessage::Sysex { data: vec![] };
    assert_eq!(encode(&empty).unwrap(), [0xF0, 0xF7]);
}
