#[doc = r#"
A time signature

```text
FF 58 04 nn dd cc bb
```
- `nn`: numerator
- `dd`: denominator as a power of two (`2` is a quarter note, `3` an eighth)
- `cc`: MIDI clocks per metronome click
- `bb`: notated 32nd notes per MIDI quarter note (24 clocks)
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// The beat unit, as an exponent of two
    pub denominator: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// 32nd notes per quarter note
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// Reads the four payload bytes as they appear in the file
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            numerator: bytes[0],
            denominator: bytes[1],
            clocks_per_click: bytes[2],
            thirty_seconds_per_quarter: bytes[3],
        }
    }

    /// The beat unit as a note value, e.g. `8` for x/8.
    ///
    /// Returns `None` if the exponent does not fit a `u32`.
    pub const fn denominator_value(&self) -> Option<u32> {
        1u32.checked_shl(self.denominator as u32)
    }
}

#[doc = r#"
A key signature

```text
FF 59 02 sf mi
```
`sf` is the number of sharps (positive) or flats (negative), `mi` is `0` for
major and `1` for minor.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    accidentals: i8,
    minor: bool,
}

impl KeySignature {
    /// Create a key signature
    pub const fn new(accidentals: i8, minor: bool) -> Self {
        Self { accidentals, minor }
    }

    /// Reads the two payload bytes
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            accidentals: bytes[0] as i8,
            minor: bytes[1] != 0,
        }
    }

    /// Sharps if positive, flats if negative
    pub const fn accidentals(&self) -> i8 {
        self.accidentals
    }

    /// True for minor keys
    pub const fn is_minor(&self) -> bool {
        self.minor
    }
}

#[test]
fn signatures() {
    use pretty_assertions::assert_eq;
    let six_eight = TimeSignature::from_bytes([6, 3, 36, 8]);
    assert_eq!(six_eight.denominator_value(), Some(8));

    let e_flat_major = KeySignature::from_bytes([0xFD, 0x00]);
    assert_eq!(e_flat_major.accidentals(), -3);
    assert!(!e_flat_major.is_minor());

    let e_minor = KeySignature::from_bytes([0x01, 0x01]);
    assert_eq!(e_minor, KeySignature::new(1, true));
}
