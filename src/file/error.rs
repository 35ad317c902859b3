use crate::{CodecError, file::ChunkTag, reader::ReaderError};
use thiserror::Error;

#[doc = r#"
An error recorded while parsing a Standard MIDI File.

[`parse_file`](crate::parse_file) never fails. These errors are recorded on
the scope they affect and on [`MidiFile::errors`](crate::MidiFile::errors):

| variant                                        | scope                                   |
|------------------------------------------------|-----------------------------------------|
| [`SmfError::Event`], [`SmfError::Meta`]        | one event; parsing continues            |
| [`SmfError::RunningStatusWithoutStatus`], [`SmfError::Truncated`] | the rest of the track is abandoned |
| [`SmfError::Chunk`]                            | the rest of the file is abandoned       |
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmfError {
    /// The chunk layout is corrupt
    #[error("Malformed chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// The message codec rejected an event
    #[error("Event at {offset}: {source}")]
    Event {
        /// Offset of the event's first byte (after the delta-time)
        offset: usize,
        /// The codec failure
        source: CodecError,
    },
    /// A meta event's payload does not fit its type
    #[error("Meta event {meta_type:#04X} at {offset}: {kind}")]
    Meta {
        /// Offset of the `0xFF` byte
        offset: usize,
        /// The meta type byte
        meta_type: u8,
        /// What is wrong with it
        kind: MetaError,
    },
    /// A data byte appeared where a status byte was expected and there is
    /// no earlier voice message to borrow a status from
    #[error("Running status byte {byte:#04X} at {offset} without a preceding voice message")]
    RunningStatusWithoutStatus {
        /// Offset of the byte
        offset: usize,
        /// The byte
        byte: u8,
    },
    /// An event runs past the end of its track, or one of its lengths is unreadable
    #[error("Event overruns its track: {0}")]
    Truncated(ReaderError),
}

impl SmfError {
    /// True if the error ended the track it occurred in.
    pub const fn is_track_fatal(&self) -> bool {
        matches!(
            self,
            Self::RunningStatusWithoutStatus { .. } | Self::Truncated(_)
        )
    }

    /// True if the error ended the parse of the file.
    pub const fn is_file_fatal(&self) -> bool {
        matches!(self, Self::Chunk(_))
    }
}

/// Structural errors found while scanning chunks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChunkError {
    /// The chunk type and length could not be read
    #[error("Incomplete chunk header: {0}")]
    Read(#[from] ReaderError),
    /// The chunk claims more bytes than the buffer has left
    #[error("{tag} chunk at {offset} declares {length} bytes, {available} available")]
    Truncated {
        /// The chunk type
        tag: ChunkTag,
        /// Offset of the chunk type
        offset: usize,
        /// The declared length
        length: u32,
        /// Bytes left after the chunk header
        available: usize,
    },
    /// The header chunk is too short to hold format, track count and division
    #[error("Header chunk is {0} bytes long, expected at least 6")]
    HeaderTooShort(u32),
    /// The header declares a format other than 0, 1 or 2
    #[error("Invalid file format {0}")]
    InvalidFormat(u16),
}

/// Problems with the payload of a meta event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaError {
    /// The payload is shorter than the event's fixed layout
    #[error("payload has {found} bytes, expected {expected}")]
    Length {
        /// Bytes required
        expected: usize,
        /// Bytes present
        found: usize,
    },
}
