use std::io::{self, Read};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use super::Events;
use crate::event::{Event, KeyCode, KeyEvent, Modifiers};

const ESC: u8 = 0x1b;

/// Events decoded from the bytes of a reader thread.
pub struct AnsiEvents {
    input: Receiver<io::Result<Vec<u8>>>,
    decoder: AnsiDecoder,
}

impl AnsiEvents {
    /// Start a thread that reads from `reader` and forwards what it reads.
    ///
    /// The thread stops at end of input or after the first read error.
    pub fn spawn<R: Read + Send + 'static>(mut reader: R) -> io::Result<Self> {
        let (sender, receiver) = crossbeam_channel::unbounded();

        thread::Builder::new()
            .name("input".to_owned())
            .spawn(move || {
                let mut buf = [0; 1024];

                loop {
                    let result = match reader.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => Ok(buf[..n].to_vec()),
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                        Err(err) => Err(err),
                    };

                    let failed = result.is_err();
                    if sender.send(result).is_err() || failed {
                        break;
                    }
                }

                log::debug!("input thread finished");
            })?;

        Ok(Self {
            input: receiver,
            decoder: AnsiDecoder::default(),
        })
    }
}

impl Events for AnsiEvents {
    fn read_with_deadline(&mut self, deadline: Instant) -> io::Result<Option<Event>> {
        let mut received = false;

        loop {
            if let Some(event) = self.decoder.next_event() {
                return Ok(Some(event));
            }

            match self.input.recv_deadline(deadline) {
                Ok(bytes) => {
                    self.decoder.feed(&bytes?);
                    received = true;
                }

                // The rest of a sequence may still be on its way.
                Err(RecvTimeoutError::Timeout) if received => return Ok(None),

                // A whole wait went by, so anything left over was a lone
                // escape or a cut-off sequence.
                Err(RecvTimeoutError::Timeout) => return Ok(self.decoder.flush()),

                Err(RecvTimeoutError::Disconnected) => {
                    return match self.decoder.flush() {
                        Some(event) => Ok(Some(event)),
                        None => Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "input closed",
                        )),
                    };
                }
            }
        }
    }
}

/// Turns a byte stream from a terminal in raw mode into key events.
#[derive(Debug, Default)]
pub struct AnsiDecoder {
    pending: Vec<u8>,
}

enum Parsed {
    Event(Event, usize),
    Incomplete,
}

impl AnsiDecoder {
    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Decode the next complete event, if there is one.
    pub fn next_event(&mut self) -> Option<Event> {
        match parse(&self.pending) {
            Parsed::Event(event, len) => {
                self.pending.drain(..len);
                Some(event)
            }
            Parsed::Incomplete => None,
        }
    }

    /// Give up waiting for the rest of a sequence.
    ///
    /// A lone escape byte becomes [`KeyCode::Escape`], anything else
    /// incomplete becomes [`Event::Unknown`].
    pub fn flush(&mut self) -> Option<Event> {
        if let Some(event) = self.next_event() {
            return Some(event);
        }

        let event = match self.pending.as_slice() {
            [] => return None,
            [ESC] => Event::key_no_mods(KeyCode::Escape),
            _ => Event::Unknown,
        };

        self.pending.clear();
        Some(event)
    }
}

fn parse(bytes: &[u8]) -> Parsed {
    match bytes {
        [] | [ESC] => Parsed::Incomplete,

        [ESC, b'[', rest @ ..] => match parse_csi(rest) {
            Parsed::Event(event, len) => Parsed::Event(event, len + 2),
            Parsed::Incomplete => Parsed::Incomplete,
        },

        [ESC, b'O'] => Parsed::Incomplete,
        [ESC, b'O', b, ..] => Parsed::Event(ss3_key(*b), 3),

        // Not a sequence we know, so the escape key on its own.
        [ESC, ..] => Parsed::Event(Event::key_no_mods(KeyCode::Escape), 1),

        [b'\r', ..] => key(KeyCode::Return),
        [b'\n', ..] => key(KeyCode::Newline),
        [b'\t', ..] => key(KeyCode::Tab),
        [0x7f | 0x08, ..] => key(KeyCode::Backspace),

        [b @ 1..=26, ..] => Parsed::Event(
            Event::Key(KeyEvent::new_with_mods(
                KeyCode::Char(char::from(b'A' + b - 1)),
                Modifiers::CTRL,
            )),
            1,
        ),

        [first, ..] => parse_char(bytes, *first),
    }
}

fn key(key_code: KeyCode) -> Parsed {
    Parsed::Event(Event::key_no_mods(key_code), 1)
}

fn parse_char(bytes: &[u8], first: u8) -> Parsed {
    let len = match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Parsed::Event(Event::Unknown, 1),
    };

    let Some(encoded) = bytes.get(..len) else {
        return Parsed::Incomplete;
    };

    match std::str::from_utf8(encoded).ok().and_then(|s| s.chars().next()) {
        Some(ch) if !ch.is_control() => Parsed::Event(Event::key_no_mods(KeyCode::Char(ch)), len),
        _ => Parsed::Event(Event::Unknown, len),
    }
}

/// Parse the part of a control sequence after `ESC [`.
fn parse_csi(bytes: &[u8]) -> Parsed {
    // Parameter and intermediate bytes, then a single final byte.
    let Some(final_index) = bytes.iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return Parsed::Incomplete;
    };

    let params = &bytes[..final_index];
    let len = final_index + 1;

    if !params.iter().all(|b| (0x20..=0x3f).contains(b)) {
        return Parsed::Event(Event::Unknown, len);
    }

    let params: Vec<Option<u16>> = params
        .split(|&b| b == b';')
        .map(|p| std::str::from_utf8(p).ok()?.parse().ok())
        .collect();

    let modifiers = match params.get(1) {
        Some(Some(m)) => Modifiers::from_bits_truncate(m.saturating_sub(1) as u8),
        _ => Modifiers::empty(),
    };

    let key_code = match (bytes[final_index], params.first().copied().flatten()) {
        (b'A', _) => KeyCode::Up,
        (b'B', _) => KeyCode::Down,
        (b'C', _) => KeyCode::Right,
        (b'D', _) => KeyCode::Left,
        (b'H', _) => KeyCode::Home,
        (b'F', _) => KeyCode::End,

        (b'~', Some(n)) => match tilde_key(n) {
            Some(key_code) => key_code,
            None => return Parsed::Event(Event::Unknown, len),
        },

        _ => return Parsed::Event(Event::Unknown, len),
    };

    Parsed::Event(Event::Key(KeyEvent::new_with_mods(key_code, modifiers)), len)
}

fn tilde_key(n: u16) -> Option<KeyCode> {
    let key_code = match n {
        1 | 7 => KeyCode::Home,
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,

        11..=15 => KeyCode::Fn((n - 10) as u8),
        17..=21 => KeyCode::Fn((n - 11) as u8),
        23 | 24 => KeyCode::Fn((n - 12) as u8),

        _ => return None,
    };

    Some(key_code)
}

/// Keys sent as `ESC O <byte>` when the terminal is in application mode.
fn ss3_key(b: u8) -> Event {
    let key_code = match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P'..=b'S' => KeyCode::Fn(b - b'P' + 1),
        _ => return Event::Unknown,
    };

    Event::key_no_mods(key_code)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};
    use std::time::{Duration, Instant};

    use super::{AnsiDecoder, AnsiEvents};
    use crate::event::{Event, KeyCode, KeyEvent, Modifiers};
    use crate::platform::Events;

    fn decode_all(bytes: &[u8]) -> Vec<Event> {
        let mut decoder = AnsiDecoder::default();
        decoder.feed(bytes);

        let mut events = vec![];
        while let Some(event) = decoder.flush() {
            events.push(event);
        }
        events
    }

    fn key(key_code: KeyCode) -> Event {
        Event::key_no_mods(key_code)
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent::new_with_mods(KeyCode::Char(ch), Modifiers::CTRL))
    }

    #[test]
    fn printable() {
        assert_eq!(
            decode_all(b"a Z~"),
            vec![
                key(KeyCode::Char('a')),
                key(KeyCode::Char(' ')),
                key(KeyCode::Char('Z')),
                key(KeyCode::Char('~')),
            ]
        );
    }

    #[test]
    fn multi_byte_chars() {
        assert_eq!(
            decode_all("£€".as_bytes()),
            vec![key(KeyCode::Char('£')), key(KeyCode::Char('€'))]
        );
    }

    #[test]
    fn split_char_waits() {
        let mut decoder = AnsiDecoder::default();
        decoder.feed(&"€".as_bytes()[..2]);
        assert_eq!(decoder.next_event(), None);

        decoder.feed(&"€".as_bytes()[2..]);
        assert_eq!(decoder.next_event(), Some(key(KeyCode::Char('€'))));
    }

    #[test]
    fn control_keys() {
        assert_eq!(
            decode_all(b"\r\n\t\x7f\x11\x01"),
            vec![
                key(KeyCode::Return),
                key(KeyCode::Newline),
                key(KeyCode::Tab),
                key(KeyCode::Backspace),
                ctrl('Q'),
                ctrl('A'),
            ]
        );
    }

    #[test]
    fn arrows() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                key(KeyCode::Up),
                key(KeyCode::Down),
                key(KeyCode::Right),
                key(KeyCode::Left),
            ]
        );

        assert_eq!(
            decode_all(b"\x1bOA\x1bOD"),
            vec![key(KeyCode::Up), key(KeyCode::Left)]
        );
    }

    #[test]
    fn tilde_keys() {
        assert_eq!(
            decode_all(b"\x1b[1~\x1b[4~\x1b[5~\x1b[6~\x1b[3~\x1b[2~"),
            vec![
                key(KeyCode::Home),
                key(KeyCode::End),
                key(KeyCode::PageUp),
                key(KeyCode::PageDown),
                key(KeyCode::Delete),
                key(KeyCode::Insert),
            ]
        );

        assert_eq!(
            decode_all(b"\x1b[15~\x1b[24~"),
            vec![key(KeyCode::Fn(5)), key(KeyCode::Fn(12))]
        );
    }

    #[test]
    fn modifiers() {
        assert_eq!(
            decode_all(b"\x1b[1;5A\x1b[3;2~"),
            vec![
                Event::Key(KeyEvent::new_with_mods(KeyCode::Up, Modifiers::CTRL)),
                Event::Key(KeyEvent::new_with_mods(KeyCode::Delete, Modifiers::SHIFT)),
            ]
        );
    }

    #[test]
    fn unknown_sequences() {
        assert_eq!(
            decode_all(b"\x1b[99~\x1b[5zq"),
            vec![Event::Unknown, Event::Unknown, key(KeyCode::Char('q'))]
        );
    }

    #[test]
    fn escape() {
        let mut decoder = AnsiDecoder::default();
        decoder.feed(b"\x1b");

        // Could still be the start of a sequence.
        assert_eq!(decoder.next_event(), None);
        assert_eq!(decoder.flush(), Some(key(KeyCode::Escape)));
        assert_eq!(decoder.flush(), None);

        assert_eq!(
            decode_all(b"\x1bx"),
            vec![key(KeyCode::Escape), key(KeyCode::Char('x'))]
        );
    }

    #[test]
    fn split_sequence_waits() {
        let mut decoder = AnsiDecoder::default();
        decoder.feed(b"\x1b[1");
        assert_eq!(decoder.next_event(), None);

        decoder.feed(b"~a");
        assert_eq!(decoder.next_event(), Some(key(KeyCode::Home)));
        assert_eq!(decoder.next_event(), Some(key(KeyCode::Char('a'))));
        assert_eq!(decoder.next_event(), None);
    }

    #[test]
    fn events_from_reader() {
        let reader = Cursor::new(b"hi\x1b[A\x11".to_vec());
        let mut events = AnsiEvents::spawn(reader).unwrap();

        let deadline = || Instant::now() + Duration::from_secs(5);

        let mut read = vec![];
        for _ in 0..4 {
            read.push(events.read_with_deadline(deadline()).unwrap());
        }

        assert_eq!(
            read,
            vec![
                Some(key(KeyCode::Char('h'))),
                Some(key(KeyCode::Char('i'))),
                Some(key(KeyCode::Up)),
                Some(ctrl('Q')),
            ]
        );

        let err = events.read_with_deadline(deadline()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn no_key_before_deadline() {
        let (mut writer, reader) = pipe();
        let mut events = AnsiEvents::spawn(reader).unwrap();

        let start = Instant::now();
        assert_eq!(
            events
                .read_with_deadline(start + Duration::from_millis(20))
                .unwrap(),
            None
        );

        std::io::Write::write_all(&mut writer, b"k").unwrap();
        assert_eq!(
            events
                .read_with_deadline(Instant::now() + Duration::from_secs(5))
                .unwrap(),
            Some(key(KeyCode::Char('k')))
        );
    }

    #[test]
    fn sequence_split_across_deadline() {
        let (mut writer, reader) = pipe();
        let mut events = AnsiEvents::spawn(reader).unwrap();

        let soon = || Instant::now() + Duration::from_millis(200);

        std::io::Write::write_all(&mut writer, b"\x1b").unwrap();
        assert_eq!(events.read_with_deadline(soon()).unwrap(), None);

        std::io::Write::write_all(&mut writer, b"[A").unwrap();
        assert_eq!(
            events
                .read_with_deadline(Instant::now() + Duration::from_secs(5))
                .unwrap(),
            Some(key(KeyCode::Up))
        );
    }

    #[test]
    fn lone_escape_after_quiet_wait() {
        let (mut writer, reader) = pipe();
        let mut events = AnsiEvents::spawn(reader).unwrap();

        let soon = || Instant::now() + Duration::from_millis(200);

        std::io::Write::write_all(&mut writer, b"\x1b").unwrap();
        assert_eq!(events.read_with_deadline(soon()).unwrap(), None);
        assert_eq!(
            events.read_with_deadline(soon()).unwrap(),
            Some(key(KeyCode::Escape))
        );
    }

    /// A reader that blocks until bytes are written to the other end.
    fn pipe() -> (PipeWriter, PipeReader) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (PipeWriter(sender), PipeReader(receiver))
    }

    struct PipeWriter(crossbeam_channel::Sender<Vec<u8>>);
    struct PipeReader(crossbeam_channel::Receiver<Vec<u8>>);

    impl std::io::Write for PipeWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .send(buf.to_vec())
                .map_err(|_| io::Error::from(io::ErrorKind::BrokenPipe))?;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl std::io::Read for PipeReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.recv() {
                Ok(bytes) => {
                    let len = bytes.len().min(buf.len());
                    buf[..len].copy_from_slice(&bytes[..len]);
                    Ok(len)
                }
                Err(_) => Ok(0),
            }
        }
    }
}
