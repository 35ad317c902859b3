use midiwire::prelude::*;
use pretty_assertions::assert_eq;

fn data(byte: u8) -> DataByte {
    DataByte::new(byte).unwrap()
}

fn channel(index: u8) -> Channel {
    Channel::new(index).unwrap()
}

/// Checks both directions of the codec for one message
fn round_trip(message: MidiMessage, bytes: &[u8]) {
    assert_eq!(encode(&message).unwrap(), bytes, "encoding {message:?}");
    assert_eq!(decode(bytes).unwrap(), message, "decoding {bytes:02X?}");
}

#[test]
fn channel_voice_messages() {
    round_trip(
        MidiMessage::NoteOff {
            channel: channel(0),
            note: data(60),
            velocity: data(64),
        },
        &[0x80, 60, 64],
    );
    round_trip(
        MidiMessage::NoteOn {
            channel: channel(15),
            note: data(127),
            velocity: data(1),
        },
        &[0x9F, 127, 1],
    );
    round_trip(
        MidiMessage::Aftertouch {
            channel: channel(3),
            note: Some(data(40)),
            pressure: data(127),
        },
        &[0xA3, 40, 127],
    );
    round_trip(
        MidiMessage::Aftertouch {
            channel: channel(3),
            note: None,
            pressure: data(0),
        },
        &[0xD3, 0],
    );
    round_trip(
        MidiMessage::Control {
            channel: channel(9),
            number: data(64),
            value: data(127),
        },
        &[0xB9, 64, 127],
    );
    round_trip(
        MidiMessage::Program {
            channel: channel(1),
            program: data(42),
        },
        &[0xC1, 42],
    );
    round_trip(
        MidiMessage::Pitchbend {
            channel: channel(7),
            value: U14::MAX,
        },
        &[0xE7, 0x7F, 0x7F],
    );
    round_trip(
        MidiMessage::Pitchbend {
            channel: channel(7),
            value: U14::new(0).unwrap(),
        },
        &[0xE7, 0x00, 0x00],
    );
}

#[test]
fn every_channel_and_data_value() {
    for index in 0..16 {
        for value in 0..128 {
            // velocity zero is a note off
            let velocity = value.max(1);
            round_trip(
                MidiMessage::NoteOn {
                    channel: channel(index),
                    note: data(value),
                    velocity: data(velocity),
                },
                &[0x90 | index, value, velocity],
            );
            round_trip(
                MidiMessage::Control {
                    channel: channel(index),
                    number: data(value),
                    value: data(127 - value),
                },
                &[0xB0 | index, value, 127 - value],
            );
        }
    }
}

#[test]
fn fourteen_bit_values() {
    for value in [0u16, 1, 127, 128, 8191, 8192, 16383] {
        let value = U14::new(value).unwrap();
        let [lsb, msb] = value.to_lsb_msb();
        round_trip(MidiMessage::SongPointer { value }, &[0xF2, lsb, msb]);
        round_trip(
            MidiMessage::Pitchbend {
                channel: channel(0),
                value,
            },
            &[0xE0, lsb, msb],
        );
    }
    assert_eq!(
        decode(&[0xF2, 0x01, 0x02]).unwrap(),
        MidiMessage::SongPointer {
            value: U14::new((0x02 << 7) | 0x01).unwrap()
        }
    );
}

#[test]
fn system_messages() {
    round_trip(MidiMessage::SongSelect { value: data(5) }, &[0xF3, 5]);
    round_trip(MidiMessage::TuneRequest, &[0xF6]);
    round_trip(MidiMessage::Clock, &[0xF8]);
    round_trip(MidiMessage::Start, &[0xFA]);
    round_trip(MidiMessage::Continue, &[0xFB]);
    round_trip(MidiMessage::Stop, &[0xFC]);
    round_trip(MidiMessage::ActiveSense, &[0xFE]);
    round_trip(MidiMessage::Reset, &[0xFF]);
    round_trip(
        MidiMessage::Sysex {
            data: vec![0x7E, 0x7F, 0x09, 0x01],
        },
        &[0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7],
    );
}

#[test]
fn quarter_frames() {
    for byte in 0..0x80u8 {
        let message = decode(&[0xF1, byte]).unwrap();
        let MidiMessage::QuarterFrameMtc(frame) = &message else {
            panic!("expected a quarter frame, got {message:?}");
        };
        assert_eq!(frame.piece(), byte >> 4);
        assert_eq!(frame.rate().is_some(), byte >> 4 == 7);
        assert_eq!(encode(&message).unwrap(), [0xF1, byte]);
    }

    let seconds_high = decode(&[0xF1, 0x32]).unwrap();
    let MidiMessage::QuarterFrameMtc(frame) = seconds_high else {
        panic!("expected a quarter frame");
    };
    assert_eq!(frame.field(), TimecodeField::Second);
    assert!(frame.is_high_nibble());
    assert_eq!(frame.value(), 2);

    let hour_high =
        MidiMessage::QuarterFrameMtc(QuarterFrame::hour_high(true, SmpteFps::TwentyNine));
    assert_eq!(encode(&hour_high).unwrap(), [0xF1, 0x75]);
}

#[test]
fn note_on_zero_velocity_decodes_as_note_off() {
    let message = decode(&[0x90, 64, 0]).unwrap();
    assert_eq!(message.kind(), MessageKind::NoteOff);
    assert_eq!(
        message,
        MidiMessage::NoteOff {
            channel: channel(0),
            note: data(64),
            velocity: data(0),
        }
    );
}

#[test]
fn sysex_framing() {
    assert_eq!(
        encode(&MidiMessage::Sysex {
            data: vec![0xF0, 0x43]
        }),
        Err(CodecError::FramingAlreadyPresent)
    );
    assert_eq!(
        encode(&MidiMessage::Sysex {
            data: vec![0x43, 0xF7]
        }),
        Err(CodecError::FramingAlreadyPresent)
    );
    assert_eq!(
        decode(&[0xF0, 0xF0, 0x01, 0xF7, 0xF7]).unwrap(),
        MidiMessage::Sysex {
            data: vec![0xF0, 0x01, 0xF7]
        }
    );
}

#[test]
fn decode_failures() {
    assert_eq!(
        decode(&[0x15]),
        Err(CodecError::UnrecognizedMessage(vec![0x15]))
    );
    for status in [0xF4, 0xF5, 0xF7, 0xF9, 0xFD] {
        assert_eq!(
            decode(&[status]),
            Err(CodecError::UnrecognizedMessage(vec![status]))
        );
    }
    assert!(matches!(
        decode(&[0xC0]),
        Err(CodecError::Truncated {
            kind: MessageKind::Program,
            expected: 2,
            found: 1,
        })
    ));
}

#[test]
fn message_accessors() {
    let message = decode(&[0xB4, 7, 100]).unwrap();
    assert_eq!(message.kind(), MessageKind::Control);
    assert_eq!(message.channel(), Some(channel(4)));
    assert!(message.kind().is_channel_voice());
    assert_eq!(decode(&[0xF8]).unwrap().channel(), None);
    assert_eq!(
        "tuneRequest".parse::<MessageKind>().unwrap(),
        MessageKind::TuneRequest
    );
    assert_eq!(
        "noteon".parse::<MessageKind>(),
        Err(CodecError::UnsupportedMessageType("noteon".into()))
    );
}
