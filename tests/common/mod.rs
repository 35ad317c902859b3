#![allow(dead_code)]

/// Encodes a variable-length quantity
pub fn vlq(mut value: u32) -> Vec<u8> {
    let mut out = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.insert(0, (value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    out
}

/// Builds the bytes of a MIDI file chunk by chunk
#[derive(Default)]
pub struct SmfBuilder {
    bytes: Vec<u8>,
}

impl SmfBuilder {
    pub fn header(mut self, format: u16, tracks: u16, division: u16) -> Self {
        self.bytes.extend_from_slice(b"MThd");
        self.bytes.extend_from_slice(&6u32.to_be_bytes());
        self.bytes.extend_from_slice(&format.to_be_bytes());
        self.bytes.extend_from_slice(&tracks.to_be_bytes());
        self.bytes.extend_from_slice(&division.to_be_bytes());
        self
    }

    pub fn chunk(mut self, tag: &[u8; 4], data: &[u8]) -> Self {
        self.bytes.extend_from_slice(tag);
        self.bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn track(self, track: TrackBuilder) -> Self {
        self.chunk(b"MTrk", &track.bytes)
    }

    /// Appends bytes verbatim
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builds track data event by event
#[derive(Default)]
pub struct TrackBuilder {
    bytes: Vec<u8>,
}

impl TrackBuilder {
    /// A delta-time followed by the event's bytes
    pub fn event(mut self, delta: u32, event: &[u8]) -> Self {
        self.bytes.extend(vlq(delta));
        self.bytes.extend_from_slice(event);
        self
    }

    pub fn meta(self, delta: u32, meta_type: u8, data: &[u8]) -> Self {
        let mut event = vec![0xFF, meta_type];
        event.extend(vlq(data.len() as u32));
        event.extend_from_slice(data);
        self.event(delta, &event)
    }

    pub fn sysex(self, delta: u32, data: &[u8]) -> Self {
        let mut event = vec![0xF0];
        event.extend(vlq(data.len() as u32 + 1));
        event.extend_from_slice(data);
        event.push(0xF7);
        self.event(delta, &event)
    }

    pub fn end_of_track(self, delta: u32) -> Self {
        self.meta(delta, 0x2F, &[])
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
