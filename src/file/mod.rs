#![doc = r#"
Standard MIDI File parsing

[`parse_file`] scans the chunks of a file, reads the `MThd` header, parses every
`MTrk` chunk with [`parse_track`] and skips everything else.

# Error handling

Parsing is best-effort and always returns a [`MidiFile`]:
- an event the codec rejects is kept as an error event, and parsing continues;
- a track whose byte alignment is lost is cut short, keeping the events before;
- a corrupt chunk layout stops the parse, keeping the header and tracks before.

Every error ends up in [`MidiFile::errors`], in the order it was found.
"#]

mod chunk;
pub use chunk::*;

mod error;
pub use error::*;

mod header;
pub use header::*;

pub mod meta;
pub use meta::MetaEvent;

mod track;
pub use track::*;

use alloc::vec::Vec;

#[doc = r#"
A parsed Standard MIDI File

# Example
```rust
# use midiwire::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let file = parse_file(&bytes);
assert!(file.is_ok());

let header = file.header().unwrap();
assert_eq!(header.format(), Format::SingleMultiChannel);
assert_eq!(header.track_count(), 1);
assert_eq!(header.division(), Division::TicksPerQuarterNote { resolution: 96 });
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    header: Option<Header>,
    tracks: Vec<Track>,
    errors: Vec<SmfError>,
}

impl MidiFile {
    /// Parse a set of bytes into a file struct. See [`parse_file`].
    pub fn parse(bytes: &[u8]) -> Self {
        parse_file(bytes)
    }

    /// Returns the header, if a `MThd` chunk was read
    pub const fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Returns the tracks, in file order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Returns every error recorded in the file: the errors of each track in
    /// order, followed by a chunk error if one stopped the parse.
    pub fn errors(&self) -> &[SmfError] {
        &self.errors
    }

    /// True if no error was recorded while parsing.
    ///
    /// A buffer without any `MThd` chunk records no error, so also check
    /// [`MidiFile::header`] to tell a MIDI file from other data.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Takes the parsed parts out of the file
    pub fn into_parts(self) -> (Option<Header>, Vec<Track>, Vec<SmfError>) {
        (self.header, self.tracks, self.errors)
    }
}

/// Parses a complete Standard MIDI File. Never fails; see [`MidiFile::errors`].
pub fn parse_file(bytes: &[u8]) -> MidiFile {
    let mut file = MidiFile::default();
    if let Err(error) = scan_chunks(bytes, &mut file) {
        #[cfg(feature = "tracing")]
        tracing::warn!("Stopped parsing MIDI file: {error}");
        file.errors.push(SmfError::Chunk(error));
    }
    file
}

fn scan_chunks(bytes: &[u8], file: &mut MidiFile) -> Result<(), ChunkError> {
    let mut position = 0;
    while position < bytes.len() {
        let (chunk, consumed) = ChunkHeader::read(bytes, position)?;
        let start = position + consumed;
        let length = chunk.length as usize;

        #[cfg(feature = "tracing")]
        tracing::debug!("{} chunk at {position}, {length} bytes", chunk.tag);

        match chunk.tag {
            ChunkTag::Header => {
                file.header = Some(Header::parse(bytes, start, chunk.length)?);
            }
            ChunkTag::Track => {
                let track = parse_track(bytes, start, length);
                file.errors.extend(track.errors().iter().cloned());
                file.tracks.push(track);
            }
            ChunkTag::Unknown(_) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("Skipping unknown chunk {}", chunk.tag);
            }
        }
        position = start + length;
    }
    Ok(())
}

#[test]
fn unknown_chunks_are_skipped() {
    use pretty_assertions::assert_eq;
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 1, 0x01, 0xE0, //
        b'X', b'Y', b'Z', b'!', 0, 0, 0, 2, 0xAB, 0xCD, //
        b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
    ];
    let file = parse_file(&bytes);
    assert!(file.is_ok());
    assert_eq!(file.tracks().len(), 1);
    assert_eq!(file.header().map(Header::format), Some(Format::Simultaneous));
}

#[test]
fn empty_buffer_is_an_empty_file() {
    let file = parse_file(&[]);
    assert!(file.is_ok());
    assert!(file.header().is_none());
    assert!(file.tracks().is_empty());
}

#[test]
fn non_midi_input_has_no_header() {
    let file = parse_file(b"RIFF\0\0\0\x02ab");
    assert!(file.is_ok());
    assert!(file.header().is_none());
    assert!(file.tracks().is_empty());
}
