#![doc = r#"
MIDI file chunks

A file is a sequence of chunks, each a 4-character ASCII type followed by a
32-bit big-endian length and that many bytes of data:

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
...
[Track Chunk N: "MTrk"]
[Optional Unknown Chunks]
```

Any type other than `MThd` or `MTrk` is an unknown chunk and is skipped.
"#]

use core::fmt;

use crate::{
    file::ChunkError,
    reader::{read_exact, read_u32},
};

/// The type of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChunkTag {
    /// `MThd`
    Header,
    /// `MTrk`
    Track,
    /// Anything else
    Unknown([u8; 4]),
}

impl ChunkTag {
    /// Identifies a chunk type
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        match bytes {
            [b'M', b'T', b'h', b'd'] => Self::Header,
            [b'M', b'T', b'r', b'k'] => Self::Track,
            _ => Self::Unknown(bytes),
        }
    }

    /// The four type bytes
    pub const fn to_bytes(&self) -> [u8; 4] {
        match self {
            Self::Header => *b"MThd",
            Self::Track => *b"MTrk",
            Self::Unknown(bytes) => *bytes,
        }
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            if byte.is_ascii_graphic() {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02X}")?;
            }
        }
        Ok(())
    }
}

/// The 8-byte prefix of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// The chunk type
    pub tag: ChunkTag,
    /// The number of data bytes that follow
    pub length: u32,
}

impl ChunkHeader {
    /// The size of the type and length fields
    pub const SIZE: usize = 8;

    /// Reads a chunk prefix at `position`, returning it and the bytes consumed.
    ///
    /// Fails if the declared length runs past the end of `bytes`.
    pub fn read(bytes: &[u8], position: usize) -> Result<(Self, usize), ChunkError> {
        let end = bytes.len();
        let (tag, tag_len) = read_exact::<4>(bytes, position, end)?;
        let (length, len_len) = read_u32(bytes, position + tag_len, end)?;
        let tag = ChunkTag::from_bytes(tag);
        let consumed = tag_len + len_len;

        let available = end - (position + consumed);
        if length as usize > available {
            return Err(ChunkError::Truncated {
                tag,
                offset: position,
                length,
                available,
            });
        }
        Ok((Self { tag, length }, consumed))
    }
}

#[test]
fn reads_chunk_prefix() {
    use pretty_assertions::assert_eq;
    let bytes = *b"MTrk\x00\x00\x00\x04\x00\xFF\x2F\x00";
    let (header, consumed) = ChunkHeader::read(&bytes, 0).unwrap();
    assert_eq!(consumed, ChunkHeader::SIZE);
    assert_eq!(header.tag, ChunkTag::Track);
    assert_eq!(header.length, 4);
}

#[test]
fn rejects_oversized_chunk() {
    use pretty_assertions::assert_eq;
    let bytes = *b"XFIH\x00\x00\x00\x10\x00";
    assert_eq!(
        ChunkHeader::read(&bytes, 0),
        Err(ChunkError::Truncated {
            tag: ChunkTag::Unknown(*b"XFIH"),
            offset: 0,
            length: 16,
            available: 1,
        })
    );
}
