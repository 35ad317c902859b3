#![doc = r#"
Primitive reads over a byte buffer.

Every function takes the buffer and a position, and returns the value together
with the number of bytes it consumed. No cursor is kept anywhere: the caller
advances its own position by the returned count.

The `end` argument bounds reads that must not run past a region
(the end of a chunk or track), independent of the buffer's length.
"#]

mod error;
pub use error::*;

/// The longest variable-length quantity MIDI files use, `0x0FFF_FFFF`.
pub const MAX_VLQ_LEN: usize = 4;

#[doc = r#"
Reads a variable-length quantity starting at `position`.

Seven bits per byte, most significant group first. A byte with its leading bit set
means more bytes follow.

# Example
```rust
# use midiwire::reader::read_vlq;
assert_eq!(read_vlq(&[0x00], 0, 1).unwrap(), (0, 1));
assert_eq!(read_vlq(&[0x81, 0x00], 0, 2).unwrap(), (128, 2));
assert_eq!(read_vlq(&[0xFF, 0x7F], 0, 2).unwrap(), (16383, 2));
```
"#]
pub fn read_vlq(bytes: &[u8], position: usize, end: usize) -> ReadResult<(u32, usize)> {
    let end = end.min(bytes.len());
    let mut value: u32 = 0;
    for consumed in 0..MAX_VLQ_LEN {
        let at = position + consumed;
        if at >= end {
            return Err(ReaderError::oob(at));
        }
        let byte = bytes[at];
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok((value, consumed + 1));
        }
    }
    Err(ReaderError::new(position, ReaderErrorKind::VlqTooLong))
}

/// Reads `N` bytes starting at `position`.
pub fn read_exact<const N: usize>(
    bytes: &[u8],
    position: usize,
    end: usize,
) -> ReadResult<([u8; N], usize)> {
    let out = read_slice(bytes, position, N, end)?;
    let mut array = [0; N];
    array.copy_from_slice(out);
    Ok((array, N))
}

/// Borrows `len` bytes starting at `position`.
pub fn read_slice(bytes: &[u8], position: usize, len: usize, end: usize) -> ReadResult<&[u8]> {
    let end = end.min(bytes.len());
    match position.checked_add(len) {
        Some(stop) if stop <= end => Ok(&bytes[position..stop]),
        _ => Err(ReaderError::oob(end)),
    }
}

/// Reads a big-endian `u16`.
pub fn read_u16(bytes: &[u8], position: usize, end: usize) -> ReadResult<(u16, usize)> {
    let (raw, consumed) = read_exact::<2>(bytes, position, end)?;
    Ok((u16::from_be_bytes(raw), consumed))
}

/// Reads a big-endian `u32`.
pub fn read_u32(bytes: &[u8], position: usize, end: usize) -> ReadResult<(u32, usize)> {
    let (raw, consumed) = read_exact::<4>(bytes, position, end)?;
    Ok((u32::from_be_bytes(raw), consumed))
}

#[test]
fn vlq_reads() {
    use pretty_assertions::assert_eq;
    assert_eq!(read_vlq(&[0x40], 0, 1).unwrap(), (0x40, 1));
    assert_eq!(read_vlq(&[0x7F], 0, 1).unwrap(), (0x7F, 1));
    assert_eq!(read_vlq(&[0x00, 0x81, 0x80, 0x00], 1, 4).unwrap(), (0x4000, 3));
    assert_eq!(
        read_vlq(&[0xFF, 0xFF, 0xFF, 0x7F], 0, 4).unwrap(),
        (0x0FFF_FFFF, 4)
    );
}

#[test]
fn vlq_failures() {
    use pretty_assertions::assert_eq;
    // region ends before the terminating byte
    assert_eq!(read_vlq(&[0x81, 0x00], 0, 1), Err(ReaderError::oob(1)));
    assert_eq!(
        read_vlq(&[0x80, 0x80, 0x80, 0x80, 0x00], 0, 5),
        Err(ReaderError::new(0, ReaderErrorKind::VlqTooLong))
    );
}

#[test]
fn big_endian_reads() {
    use pretty_assertions::assert_eq;
    let bytes = [0x00, 0x00, 0x00, 0x06, 0x01, 0xE0];
    assert_eq!(read_u32(&bytes, 0, 6).unwrap(), (6, 4));
    assert_eq!(read_u16(&bytes, 4, 6).unwrap(), (480, 2));
    assert!(read_u16(&bytes, 5, 6).unwrap_err().is_out_of_bounds());
}
