mod common;

use common::{SmfBuilder, TrackBuilder};
use midiwire::{prelude::*, reader::ReaderError};
use pretty_assertions::assert_eq;

fn note_on(channel: u8, note: u8, velocity: u8) -> MidiMessage {
    MidiMessage::NoteOn {
        channel: Channel::new(channel).unwrap(),
        note: DataByte::new(note).unwrap(),
        velocity: DataByte::new(velocity).unwrap(),
    }
}

fn note_off(channel: u8, note: u8, velocity: u8) -> MidiMessage {
    MidiMessage::NoteOff {
        channel: Channel::new(channel).unwrap(),
        note: DataByte::new(note).unwrap(),
        velocity: DataByte::new(velocity).unwrap(),
    }
}

#[test]
fn minimal_format_zero_file() {
    let bytes = SmfBuilder::default()
        .header(0, 1, 96)
        .track(
            TrackBuilder::default()
                .event(0, &[0x90, 60, 100])
                .event(96, &[0x80, 60, 64])
                .end_of_track(0),
        )
        .build();

    let file = parse_file(&bytes);
    assert!(file.is_ok(), "{:?}", file.errors());

    let header = file.header().unwrap();
    assert_eq!(header.format(), Format::SingleMultiChannel);
    assert_eq!(header.format().number(), 0);
    assert_eq!(header.track_count(), 1);
    assert_eq!(
        header.division(),
        Division::TicksPerQuarterNote { resolution: 96 }
    );

    assert_eq!(file.tracks().len(), 1);
    let events = file.tracks()[0].events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].message(), Some(&note_on(0, 60, 100)));
    assert_eq!(events[1].message(), Some(&note_off(0, 60, 64)));
    assert_eq!(events[1].delta_time(), 96);
    assert_eq!(events[1].time_elapsed(), 96);
    assert_eq!(events[2].meta_event(), Some(&MetaEvent::EndOfTrack));
}

#[test]
fn running_status_in_file() {
    let bytes = SmfBuilder::default()
        .header(0, 1, 480)
        .track(
            TrackBuilder::default()
                .event(0, &[0x93, 60, 100])
                .event(10, &[62, 101])
                .end_of_track(0),
        )
        .build();

    let file = parse_file(&bytes);
    assert!(file.is_ok());
    let track = &file.tracks()[0];
    let messages: Vec<_> = track.messages().cloned().collect();
    assert_eq!(messages, [note_on(3, 60, 100), note_on(3, 62, 101)]);
    assert_eq!(track.events().len(), 3);
    assert_eq!(track.end_time(), 10);
}

#[test]
fn running_status_before_any_voice_message() {
    let bytes = SmfBuilder::default()
        .header(1, 2, 480)
        .track(
            TrackBuilder::default()
                .meta(0, 0x03, b"Lead")
                .event(0, &[60, 100])
                .event(0, &[0x90, 60, 100])
                .end_of_track(0),
        )
        .track(
            TrackBuilder::default()
                .event(0, &[0x90, 48, 90])
                .end_of_track(0),
        )
        .build();

    let file = parse_file(&bytes);
    let first = &file.tracks()[0];
    assert_eq!(first.events().len(), 1);
    assert_eq!(first.events()[0].meta_event().and_then(MetaEvent::text), Some("Lead"));
    assert_eq!(first.errors().len(), 1);
    assert!(first.errors()[0].is_track_fatal());

    // the next track is unaffected
    let second = &file.tracks()[1];
    assert!(second.errors().is_empty());
    assert_eq!(second.events().len(), 2);

    assert_eq!(file.errors(), first.errors());
}

#[test]
fn file_errors_concatenate_track_errors() {
    let bytes = SmfBuilder::default()
        .header(1, 2, 96)
        .track(
            TrackBuilder::default()
                .event(0, &[0xF5])
                .event(0, &[0x90, 60, 100])
                .event(0, &[0xF9])
                .end_of_track(0),
        )
        .track(
            TrackBuilder::default()
                .event(0, &[0xFD])
                .end_of_track(0),
        )
        .build();

    let file = parse_file(&bytes);
    assert_eq!(file.errors().len(), 3);
    assert_eq!(file.tracks()[0].errors().len(), 2);
    assert_eq!(file.tracks()[1].errors().len(), 1);

    let mut expected = file.tracks()[0].errors().to_vec();
    expected.extend_from_slice(file.tracks()[1].errors());
    assert_eq!(file.errors(), expected);

    // failed events stay in place with their bytes
    let events = file.tracks()[0].events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].raw_data(), Some(&[0xF5][..]));
    assert!(matches!(
        events[0].error(),
        Some(SmfError::Event {
            source: CodecError::UnrecognizedMessage(_),
            ..
        })
    ));
    assert_eq!(events[1].message(), Some(&note_on(0, 60, 100)));
}

#[test]
fn system_common_messages_need_their_data() {
    // inside a track, system messages are read as single bytes
    let bytes = SmfBuilder::default()
        .header(0, 1, 96)
        .track(
            TrackBuilder::default()
                .event(0, &[0xF8])
                .event(0, &[0xF2])
                .end_of_track(0),
        )
        .build();

    let file = parse_file(&bytes);
    let events = file.tracks()[0].events();
    assert_eq!(events[0].message(), Some(&MidiMessage::Clock));
    assert!(matches!(
        events[1].error(),
        Some(SmfError::Event {
            source: CodecError::Truncated {
                kind: MessageKind::SongPointer,
                ..
            },
            ..
        })
    ));
    assert_eq!(file.errors().len(), 1);
}

#[test]
fn sysex_events() {
    let bytes = SmfBuilder::default()
        .header(0, 1, 96)
        .track(
            TrackBuilder::default()
                .sysex(0, &[0x41, 0x10, 0x42, 0x12])
                .event(0, &[0xF7, 0x01, 0xFA])
                .end_of_track(0),
        )
        .build();

    let file = parse_file(&bytes);
    assert!(file.is_ok(), "{:?}", file.errors());
    let messages: Vec<_> = file.tracks()[0].messages().cloned().collect();
    assert_eq!(
        messages,
        [
            MidiMessage::Sysex {
                data: vec![0x41, 0x10, 0x42, 0x12]
            },
            MidiMessage::Start,
        ]
    );
}

#[test]
fn meta_events() {
    let bytes = SmfBuilder::default()
        .header(1, 1, 480)
        .track(
            TrackBuilder::default()
                .meta(0, 0x00, &[0x00, 0x07])
                .meta(0, 0x02, b"(c) 2024")
                .meta(0, 0x20, &[0x09])
                .meta(0, 0x51, &[0x07, 0xA1, 0x20])
                .meta(0, 0x54, &[0x61, 0x00, 0x00, 0x0A, 0x00])
                .meta(0, 0x58, &[3, 2, 24, 8])
                .meta(0, 0x59, &[0xFE, 0x01])
                .meta(0, 0x7F, &[0x00, 0x00, 0x41])
                .meta(0, 0x60, &[0x01, 0x02])
                .end_of_track(0),
        )
        .build();

    let file = parse_file(&bytes);
    assert!(file.is_ok(), "{:?}", file.errors());
    let metas: Vec<_> = file.tracks()[0]
        .events()
        .iter()
        .filter_map(TrackEvent::meta_event)
        .cloned()
        .collect();

    assert_eq!(
        metas,
        [
            MetaEvent::SequenceNumber(7),
            MetaEvent::Copyright("(c) 2024".into()),
            MetaEvent::ChannelPrefix(9),
            MetaEvent::Tempo(Tempo::new(500_000)),
            MetaEvent::SmpteOffset(SmpteOffset {
                hour: 0x61,
                minute: 0,
                second: 0,
                frame: 10,
                fractional_frame: 0,
            }),
            MetaEvent::TimeSignature(TimeSignature {
                numerator: 3,
                denominator: 2,
                clocks_per_click: 24,
                thirty_seconds_per_quarter: 8,
            }),
            MetaEvent::KeySignature(KeySignature::new(-2, true)),
            MetaEvent::SequencerSpecific(vec![0x00, 0x00, 0x41]),
            MetaEvent::Unknown {
                meta_type: 0x60,
                data: vec![0x01, 0x02],
            },
            MetaEvent::EndOfTrack,
        ]
    );

    let MetaEvent::SmpteOffset(offset) = &metas[4] else {
        panic!("expected an SMPTE offset");
    };
    assert_eq!(offset.fps(), SmpteFps::Thirty);
    assert_eq!(offset.hours(), 1);
}

#[test]
fn frames_per_second_division() {
    let bytes = SmfBuilder::default()
        .header(0, 1, 0xE250)
        .track(TrackBuilder::default().end_of_track(0))
        .build();

    let file = parse_file(&bytes);
    let division = file.header().unwrap().division();
    assert_eq!(
        division,
        Division::FramesPerSecond {
            fps: 30,
            units_per_frame: 80
        }
    );
    assert_eq!(division.smpte_fps(), Some(SmpteFps::Thirty));
}

#[test]
fn truncated_chunk_keeps_partial_result() {
    let mut bytes = SmfBuilder::default()
        .header(1, 2, 96)
        .track(
            TrackBuilder::default()
                .event(0, &[0x90, 60, 100])
                .end_of_track(0),
        )
        .build();
    // a second track that claims 100 bytes but has 3
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&100u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x90, 0x40]);

    let file = parse_file(&bytes);
    assert!(file.header().is_some());
    assert_eq!(file.tracks().len(), 1);
    assert_eq!(file.tracks()[0].events().len(), 2);
    assert_eq!(file.errors().len(), 1);
    assert!(file.errors()[0].is_file_fatal());
    assert!(matches!(
        file.errors()[0],
        SmfError::Chunk(ChunkError::Truncated {
            tag: ChunkTag::Track,
            length: 100,
            available: 3,
            ..
        })
    ));
}

#[test]
fn garbage_after_last_chunk() {
    let bytes = SmfBuilder::default()
        .header(0, 1, 96)
        .track(TrackBuilder::default().end_of_track(0))
        .raw(&[0x00, 0x00])
        .build();

    let file = parse_file(&bytes);
    assert_eq!(file.tracks().len(), 1);
    assert_eq!(
        file.errors(),
        [SmfError::Chunk(ChunkError::Read(ReaderError::oob(bytes.len())))]
    );
}

#[test]
fn bad_header() {
    let bytes = SmfBuilder::default()
        .header(7, 1, 96)
        .track(TrackBuilder::default().end_of_track(0))
        .build();

    let file = parse_file(&bytes);
    assert!(file.header().is_none());
    assert!(file.tracks().is_empty());
    assert_eq!(
        file.errors(),
        [SmfError::Chunk(ChunkError::InvalidFormat(7))]
    );
}

#[test]
fn event_overrunning_track() {
    let bytes = SmfBuilder::default()
        .header(0, 1, 96)
        .track(
            TrackBuilder::default()
                .event(0, &[0xC0, 0x05])
                .meta(0, 0x01, b"text"),
        )
        .build();
    // shrink the chunk so the text's declared length runs past it
    let mut bytes = bytes;
    let track_start = 14 + 8;
    let length = (bytes.len() - track_start - 2) as u32;
    bytes[18..22].copy_from_slice(&length.to_be_bytes());
    bytes.truncate(track_start + length as usize);

    let file = parse_file(&bytes);
    let track = &file.tracks()[0];
    assert_eq!(track.events().len(), 1);
    assert!(matches!(track.errors(), [SmfError::Truncated(_)]));
    assert_eq!(file.errors().len(), 1);
}

#[test]
fn long_delta_times() {
    let bytes = SmfBuilder::default()
        .header(0, 1, 96)
        .track(
            TrackBuilder::default()
                .event(0x0FFF_FFFF, &[0xF8])
                .event(128, &[0xF8])
                .end_of_track(0),
        )
        .build();

    let file = parse_file(&bytes);
    assert!(file.is_ok());
    let events = file.tracks()[0].events();
    assert_eq!(events[0].delta_time(), 0x0FFF_FFFF);
    assert_eq!(events[1].time_elapsed(), 0x0FFF_FFFF + 128);
}
