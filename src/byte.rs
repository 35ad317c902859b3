use core::fmt;

use crate::CodecError;

#[doc = r#"
A 7-bit MIDI data byte.

Every byte following a status byte on the wire has its leading bit cleared,
so the representable range is `0..=127`.

# Example
```rust
# use midiwire::prelude::*;
let byte = DataByte::new(100).unwrap();
assert_eq!(byte.value(), 100);

assert!(DataByte::new(128).is_err());
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// The largest data byte, `127`.
    pub const MAX: Self = Self(0x7F);

    /// Create a new data byte.
    ///
    /// Checks for correctness (leading 0 bit).
    pub const fn new(byte: u8) -> Result<Self, CodecError> {
        if byte > 0x7F {
            return Err(CodecError::ValueOutOfRange {
                value: byte as u16,
                max: 0x7F,
            });
        }
        Ok(Self(byte))
    }

    /// Creates a data byte, discarding the leading bit.
    pub const fn new_masked(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// Returns the byte
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = CodecError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DataByte> for u8 {
    fn from(value: DataByte) -> Self {
        value.0
    }
}

impl fmt::Display for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A MIDI channel, numbered from `0` to `15` as it appears in the
/// low nibble of a channel voice status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel(u8);

impl Channel {
    /// Create a new channel from `0..=15`.
    pub const fn new(channel: u8) -> Result<Self, CodecError> {
        if channel > 0x0F {
            return Err(CodecError::ValueOutOfRange {
                value: channel as u16,
                max: 0x0F,
            });
        }
        Ok(Self(channel))
    }

    /// Takes the channel out of the low nibble of a status byte.
    pub const fn from_status(status: u8) -> Self {
        Self(status & 0x0F)
    }

    /// Returns the zero-based channel number
    pub const fn index(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Channel {
    type Error = CodecError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // humans count channels from one
        write!(f, "{}", self.0 + 1)
    }
}

#[doc = r#"
A 14-bit value carried across two data bytes, least significant byte first.

Used by pitch bend and song position pointer messages.

# Example
```rust
# use midiwire::prelude::*;
let value = U14::from_lsb_msb(0x7F, 0x7F);
assert_eq!(value.value(), 16383);
assert_eq!(value.to_lsb_msb(), [0x7F, 0x7F]);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct U14(u16);

impl U14 {
    /// The largest 14-bit value, `16383`.
    pub const MAX: Self = Self(0x3FFF);
    /// The center of the range, used as "no bend" by pitch bend.
    pub const CENTER: Self = Self(0x2000);

    /// Create a new 14-bit value from `0..=16383`.
    pub const fn new(value: u16) -> Result<Self, CodecError> {
        if value > 0x3FFF {
            return Err(CodecError::ValueOutOfRange { value, max: 0x3FFF });
        }
        Ok(Self(value))
    }

    /// Packs the lower 7 bits of each byte.
    pub const fn from_lsb_msb(lsb: u8, msb: u8) -> Self {
        Self((((msb & 0x7F) as u16) << 7) | (lsb & 0x7F) as u16)
    }

    /// Splits the value into `[lsb, msb]` data bytes.
    pub const fn to_lsb_msb(&self) -> [u8; 2] {
        [(self.0 & 0x7F) as u8, (self.0 >> 7) as u8]
    }

    /// Returns the value
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for U14 {
    type Error = CodecError;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[test]
fn u14_packs_lsb_first() {
    use pretty_assertions::assert_eq;
    assert_eq!(U14::from_lsb_msb(0x00, 0x40), U14::CENTER);
    assert_eq!(U14::from_lsb_msb(0x01, 0x00).value(), 1);
    assert_eq!(U14::from_lsb_msb(0x00, 0x01).value(), 128);
    assert_eq!(U14::new(0x2001).unwrap().to_lsb_msb(), [0x01, 0x40]);
    assert!(U14::new(16384).is_err());
}

#[test]
fn channel_bounds() {
    assert!(Channel::new(15).is_ok());
    assert!(Channel::new(16).is_err());
    assert_eq!(Channel::from_status(0x9A).index(), 10);
}
