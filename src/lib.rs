#![doc = r#"
A MIDI 1.0 wire message codec and Standard MIDI File (SMF) parser.

# Overview

This crate provides two independent pieces:

- The **message codec** ([`message`]): [`decode`] turns one raw wire message
  (status byte first) into a [`MidiMessage`], and [`encode`] turns a
  [`MidiMessage`] back into bytes.
- The **SMF parser** ([`file`]): [`parse_file`] turns the bytes of a `.mid` file into a
  [`MidiFile`], a header plus an ordered list of tracks of timed events.

The parser is best-effort. It never returns an error to the caller: a corrupt
event is recorded on the event itself and on its track, a desynchronized track is
cut short, and structural damage to the chunk layout stops the parse. Every recorded
error is also collected on [`MidiFile::errors`].

# Example
```rust
use midiwire::prelude::*;

let bytes = [0x90, 60, 0];
// note-on with zero velocity is a note-off
let message = decode(&bytes).unwrap();
assert_eq!(message.kind(), MessageKind::NoteOff);
assert_eq!(encode(&message).unwrap(), [0x80, 60, 0]);
```

# Features
- `std` (default): enables `std` support in the error crates. Without it the crate is `no_std + alloc`.
- `tracing` (default): emits diagnostics through [`tracing`](https://docs.rs/tracing).
- `serde`: derives `Serialize`/`Deserialize` for all data types.
"#]
#![warn(missing_docs)]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod byte;
pub use byte::*;

mod error;
pub use error::*;

pub mod message;
pub use message::{MessageKind, MidiMessage, decode, encode};

pub mod reader;

pub mod file;
pub use file::{MidiFile, parse_file, parse_track};

mod smpte;
pub use smpte::*;

/// Common re-exports
pub mod prelude {
    pub use crate::{
        byte::*,
        error::*,
        file::{meta::*, *},
        message::*,
        smpte::*,
    };
}
