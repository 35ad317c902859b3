use alloc::{string::String, vec::Vec};
use thiserror::Error;

use crate::MessageKind;

#[doc = r#"
Errors produced by the message codec.

[`decode`](crate::decode) and [`encode`](crate::encode) return these directly to the caller.
The SMF parser catches them per event and records them instead.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodecError {
    /// The status byte (or the system sub-type) does not name a known message.
    ///
    /// Carries the offending bytes.
    #[error("Unrecognized MIDI message: {0:02X?}")]
    UnrecognizedMessage(Vec<u8>),
    /// A message type name that does not exist.
    #[error("Unsupported message type: {0}")]
    UnsupportedMessageType(String),
    /// System exclusive data passed to the encoder already starts with `0xF0` or ends with `0xF7`.
    #[error("System exclusive data must not contain the 0xF0/0xF7 framing bytes")]
    FramingAlreadyPresent,
    /// The message is shorter than its status byte requires.
    #[error("{kind} needs {expected} bytes, found {found}")]
    Truncated {
        /// The message the status byte selected
        kind: MessageKind,
        /// The required length, including the status byte
        expected: usize,
        /// The number of bytes available
        found: usize,
    },
    /// The message was empty.
    #[error("Empty MIDI message")]
    Empty,
    /// A byte in a data position has its leading bit set.
    #[error("Invalid data byte {byte:#04X} at index {index}")]
    InvalidDataByte {
        /// Index into the message
        index: usize,
        /// The offending byte
        byte: u8,
    },
    /// A value does not fit the field it was given to.
    #[error("Value {value} is larger than {max}")]
    ValueOutOfRange {
        /// The value provided
        value: u16,
        /// The largest allowed value
        max: u16,
    },
}
