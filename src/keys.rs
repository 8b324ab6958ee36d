//! Raw key decoding.
//!
//! One read of up to four bytes from the input stream becomes exactly one
//! [`Key`]. Control bytes map to named keys, CSI/SS3 escape sequences map to
//! navigation keys, and everything else is carried as a rune.
//!
//! A sequence whose bytes arrive across two reads is not reassembled: the
//! first read decodes as a bare Escape and the rest as stray runes.

use std::io::{self, Read};

use tracing::trace;

/// Maximum bytes consumed by a single read.
pub const READ_CHUNK: usize = 4;

/// Consecutive empty reads tolerated before the stream is treated as closed.
const MAX_EMPTY_READS: usize = 64;

// ============================================================================
// TYPES
// ============================================================================

/// Closed set of keys the prompts understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Printable rune, undecodable input, or an empty read.
    Unknown,
    Enter,
    Backspace,
    Tab,
    Escape,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    CtrlA,
    CtrlC,
    CtrlD,
    CtrlE,
    CtrlK,
    CtrlU,
    CtrlW,
}

/// A decoded key press.
///
/// `rune` is set for printable input and for the few control keys that
/// have a natural character (Tab, Enter, Space).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub kind: KeyKind,
    pub rune: Option<char>,
}

impl Key {
    /// A named key with no rune.
    pub const fn named(kind: KeyKind) -> Self {
        Key { kind, rune: None }
    }

    /// A printable or decoded character.
    pub const fn char(c: char) -> Self {
        Key {
            kind: KeyKind::Unknown,
            rune: Some(c),
        }
    }

    /// Result of an empty or undecodable read.
    pub const fn unknown() -> Self {
        Key::named(KeyKind::Unknown)
    }

    /// The rune if it is something a buffer should accept.
    ///
    /// Control characters (C0, DEL, C1) are never text, even when a rune is
    /// attached (Tab, Enter).
    pub fn printable(&self) -> Option<char> {
        self.rune.filter(|c| !c.is_control())
    }
}

// ============================================================================
// DECODING (pure)
// ============================================================================

/// Decode the bytes of one read into a key.
pub fn decode(buf: &[u8]) -> Key {
    let Some(&first) = buf.first() else {
        return Key::unknown();
    };

    match first {
        1 => Key::named(KeyKind::CtrlA),
        3 => Key::named(KeyKind::CtrlC),
        4 => Key::named(KeyKind::CtrlD),
        5 => Key::named(KeyKind::CtrlE),
        8 | 127 => Key::named(KeyKind::Backspace),
        9 => Key {
            kind: KeyKind::Tab,
            rune: Some('\t'),
        },
        10 | 13 => Key {
            kind: KeyKind::Enter,
            rune: Some('\n'),
        },
        11 => Key::named(KeyKind::CtrlK),
        21 => Key::named(KeyKind::CtrlU),
        23 => Key::named(KeyKind::CtrlW),
        27 => decode_escape(buf),
        32 => Key {
            kind: KeyKind::Space,
            rune: Some(' '),
        },
        33..=126 => Key::char(first as char),
        0xC0..=0xFF => match decode_utf8(buf) {
            Some(c) => Key::char(c),
            None => Key::unknown(),
        },
        _ => Key::unknown(),
    }
}

/// Disambiguate `ESC`, `ESC [ x`, `ESC O x` and `ESC [ n ~`.
fn decode_escape(buf: &[u8]) -> Key {
    let escape = Key::named(KeyKind::Escape);

    match buf.get(1) {
        Some(b'[') => match (buf.get(2), buf.get(3)) {
            (Some(b'A'), _) => Key::named(KeyKind::Up),
            (Some(b'B'), _) => Key::named(KeyKind::Down),
            (Some(b'C'), _) => Key::named(KeyKind::Right),
            (Some(b'D'), _) => Key::named(KeyKind::Left),
            (Some(b'H'), _) => Key::named(KeyKind::Home),
            (Some(b'F'), _) => Key::named(KeyKind::End),
            (Some(b'1'), Some(b'~')) => Key::named(KeyKind::Home),
            (Some(b'3'), Some(b'~')) => Key::named(KeyKind::Delete),
            (Some(b'4'), Some(b'~')) => Key::named(KeyKind::End),
            _ => escape,
        },
        Some(b'O') => match buf.get(2) {
            Some(b'A') => Key::named(KeyKind::Up),
            Some(b'B') => Key::named(KeyKind::Down),
            Some(b'C') => Key::named(KeyKind::Right),
            Some(b'D') => Key::named(KeyKind::Left),
            Some(b'H') => Key::named(KeyKind::Home),
            Some(b'F') => Key::named(KeyKind::End),
            _ => escape,
        },
        _ => escape,
    }
}

/// Decode the UTF-8 sequence a lead byte opens.
///
/// The lead byte's high bits pick the length. Returns None when the read
/// holds too few bytes, a continuation byte is malformed, or the encoding
/// is overlong or a surrogate.
fn decode_utf8(buf: &[u8]) -> Option<char> {
    let len = match *buf.first()? {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    };
    let bytes = buf.get(..len)?;
    std::str::from_utf8(bytes).ok()?.chars().next()
}

// ============================================================================
// READER (effects)
// ============================================================================

/// Reads one key per call from a byte stream.
pub struct KeyReader<R> {
    inner: R,
    empty_reads: usize,
}

impl<R: Read> KeyReader<R> {
    pub fn new(inner: R) -> Self {
        KeyReader {
            inner,
            empty_reads: 0,
        }
    }

    /// Block until the next key arrives.
    ///
    /// A zero-length read yields [`Key::unknown`]; callers skip it and read
    /// again. After a long run of empty reads the stream is reported as
    /// closed. Read errors other than `Interrupted` are returned verbatim.
    pub fn read_key(&mut self) -> io::Result<Key> {
        let mut buf = [0u8; READ_CHUNK];
        let n = loop {
            match self.inner.read(&mut buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if n == 0 {
            self.empty_reads += 1;
            if self.empty_reads >= MAX_EMPTY_READS {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input stream closed",
                ));
            }
            return Ok(Key::unknown());
        }

        self.empty_reads = 0;
        let key = decode(&buf[..n]);
        trace!(bytes = ?&buf[..n], ?key, "decoded key");
        Ok(key)
    }
}

// ============================================================================
// TESTS
// ============================================================================
