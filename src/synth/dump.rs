//! Parameters dump stream decoding.
//!
//! The device answers a dump request with text lines:
//!
//! ```text
//! MIDI_VALUES_START
//! 44:7F
//! 4e:10
//! MIDI_VALUES_END
//! ```
//!
//! Each data line holds a CC number and its value as 2 hex digits each.
//! Any other line is device log output.

use nom::{
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map_res},
    sequence::separated_pair,
    IResult,
};

use std::sync::Arc;

use crate::synth::Error;

pub const START: &str = "MIDI_VALUES_START";
pub const END: &str = "MIDI_VALUES_END";

const DATA_LINE_LEN: usize = 5;
const DATA_SEPARATOR_IDX: usize = 2;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum State {
    #[default]
    Idle,
    InDump,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    Start,
    /// End of the dump with the number of values received.
    End { count: usize },
    /// A raw `(cc number, value)` pair, not range checked.
    Value { nb: u8, value: u8 },
    Log(Arc<str>),
}

fn hex_byte(i: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |hex| {
        u8::from_str_radix(hex, 16)
    })(i)
}

fn is_data_line(line: &str) -> bool {
    let mut chars = line.chars();
    chars.clone().count() == DATA_LINE_LEN && chars.nth(DATA_SEPARATOR_IDX) == Some(':')
}

/// Parses a `XX:YY` data line.
pub fn parse_data_line(line: &str) -> Result<(u8, u8), Error> {
    all_consuming(separated_pair(hex_byte, tag(":"), hex_byte))(line)
        .map(|(_, pair)| pair)
        .map_err(|_| Error::DumpLine(line.into()))
}

/// Decodes complete lines and tracks the dump state.
#[derive(Debug, Default)]
pub struct LineDecoder {
    state: State,
    count: usize,
}

impl LineDecoder {
    pub fn state(&self) -> State {
        self.state
    }

    /// Decodes a line stripped from its terminators.
    ///
    /// Sentinels are checked before data lines.
    pub fn decode(&mut self, line: &str) -> Result<Line, Error> {
        if line == END {
            self.state = State::Idle;
            let count = std::mem::take(&mut self.count);

            return Ok(Line::End { count });
        }

        if line == START {
            self.state = State::InDump;
            self.count = 0;

            return Ok(Line::Start);
        }

        if self.state == State::InDump && is_data_line(line) {
            let (nb, value) = parse_data_line(line)?;
            self.count += 1;

            return Ok(Line::Value { nb, value });
        }

        Ok(Line::Log(line.into()))
    }
}

/// Reassembles lines from a fragmented byte stream.
#[derive(Debug, Default)]
pub struct Decoder {
    buf: Vec<u8>,
    lines: LineDecoder,
}

impl Decoder {
    pub fn state(&self) -> State {
        self.lines.state()
    }

    /// Returns the bytes of the pending incomplete line.
    #[cfg(test)]
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    /// Pushes a chunk of bytes and decodes the lines it completes.
    ///
    /// Bytes following the last `'\n'` are kept until the next push.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<Line, Error>> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.buf[start..].iter().position(|&byte| byte == b'\n') {
            let end = start + pos;

            let raw = String::from_utf8_lossy(&self.buf[start..end]);
            let line = raw.trim_matches(|c| c == '\r' || c == '\n');
            lines.push(self.lines.decode(line));

            start = end + 1;
        }

        self.buf.drain(..start);

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_data_line, Decoder, Line, LineDecoder, State};

    const STREAM: &[u8] = b"booting\r\n\
        10:20\n\
        MIDI_VALUES_START\r\n\
        44:7F\n\
        4e:10\n\
        Calculation load: 12 %\n\
        4G:10\n\
        0a:00\n\
        MIDI_VALUES_END\n\
        5d:01\n\
        trailing";

    fn stringify(lines: Vec<Result<Line, super::Error>>) -> Vec<Result<Line, String>> {
        lines
            .into_iter()
            .map(|res| res.map_err(|err| err.to_string()))
            .collect()
    }

    #[test]
    fn data_line() {
        assert_eq!(parse_data_line("44:7F").unwrap(), (0x44, 0x7f));
        assert_eq!(parse_data_line("4e:10").unwrap(), (0x4e, 0x10));
        assert_eq!(parse_data_line("ff:FF").unwrap(), (0xff, 0xff));

        assert!(parse_data_line("4G:10").is_err());
        assert!(parse_data_line("44-10").is_err());
        assert!(parse_data_line("44:1").is_err());
        assert!(parse_data_line("44:100").is_err());
        assert!(parse_data_line("+4:10").is_err());
    }

    #[test]
    fn line_decoder() {
        let mut decoder = LineDecoder::default();
        assert_eq!(decoder.state(), State::Idle);

        // Not in a dump
        assert_eq!(decoder.decode("44:7F").unwrap(), Line::Log("44:7F".into()));

        assert_eq!(decoder.decode("MIDI_VALUES_START").unwrap(), Line::Start);
        assert_eq!(decoder.state(), State::InDump);

        assert_eq!(
            decoder.decode("44:7F").unwrap(),
            Line::Value {
                nb: 0x44,
                value: 0x7f
            }
        );
        assert_eq!(
            decoder.decode("not a value").unwrap(),
            Line::Log("not a value".into())
        );
        assert!(decoder.decode("zz:00").is_err());
        assert_eq!(decoder.state(), State::InDump);

        assert_eq!(
            decoder.decode("MIDI_VALUES_END").unwrap(),
            Line::End { count: 1 }
        );
        assert_eq!(decoder.state(), State::Idle);

        assert_eq!(decoder.decode("44:7F").unwrap(), Line::Log("44:7F".into()));
    }

    #[test]
    fn end_without_start() {
        let mut decoder = LineDecoder::default();

        assert_eq!(
            decoder.decode("MIDI_VALUES_END").unwrap(),
            Line::End { count: 0 }
        );
        assert_eq!(decoder.state(), State::Idle);
    }

    #[test]
    fn restart_resets_count() {
        let mut decoder = LineDecoder::default();

        decoder.decode("MIDI_VALUES_START").unwrap();
        decoder.decode("44:7F").unwrap();
        decoder.decode("MIDI_VALUES_START").unwrap();
        decoder.decode("4e:10").unwrap();

        assert_eq!(
            decoder.decode("MIDI_VALUES_END").unwrap(),
            Line::End { count: 1 }
        );
    }

    #[test]
    fn whole_stream() {
        let mut decoder = Decoder::default();
        let lines = stringify(decoder.push(STREAM));

        assert_eq!(
            lines,
            vec![
                Ok(Line::Log("booting".into())),
                Ok(Line::Log("10:20".into())),
                Ok(Line::Start),
                Ok(Line::Value {
                    nb: 0x44,
                    value: 0x7f
                }),
                Ok(Line::Value {
                    nb: 0x4e,
                    value: 0x10
                }),
                Ok(Line::Log("Calculation load: 12 %".into())),
                Err(r#"Malformed dump line "4G:10""#.to_string()),
                Ok(Line::Value {
                    nb: 0x0a,
                    value: 0x00
                }),
                Ok(Line::End { count: 3 }),
                Ok(Line::Log("5d:01".into())),
            ]
        );

        assert_eq!(decoder.pending(), b"trailing");
        assert_eq!(decoder.state(), State::Idle);
    }

    #[test]
    fn byte_by_byte() {
        let expected = stringify(Decoder::default().push(STREAM));

        let mut decoder = Decoder::default();
        let mut lines = Vec::new();
        for byte in STREAM {
            lines.extend(decoder.push(std::slice::from_ref(byte)));
        }

        assert_eq!(stringify(lines), expected);
        assert_eq!(decoder.pending(), b"trailing");
    }

    #[test]
    fn split_crlf() {
        let mut decoder = Decoder::default();

        assert!(decoder.push(b"MIDI_VALUES_START\r").is_empty());
        assert_eq!(decoder.push(b"\n44:7").len(), 1);
        assert_eq!(decoder.state(), State::InDump);

        let lines = stringify(decoder.push(b"F\r\n"));
        assert_eq!(
            lines,
            vec![Ok(Line::Value {
                nb: 0x44,
                value: 0x7f
            })]
        );
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn invalid_utf8() {
        let mut decoder = Decoder::default();
        let lines = decoder.push(b"MIDI_VALUES_START\n\xff\xfe:00\n");

        assert_eq!(lines.len(), 2);
        assert!(lines[1].is_err());
        assert_eq!(decoder.state(), State::InDump);
    }

    mod props {
        use proptest::prelude::*;

        use super::{stringify, Decoder, STREAM};

        proptest! {
            #[test]
            fn fragmentation_invariance(
                cuts in proptest::collection::vec(0..=STREAM.len(), 0..24),
            ) {
                let expected = stringify(Decoder::default().push(STREAM));

                let mut cuts = cuts;
                cuts.sort_unstable();
                let mut decoder = Decoder::default();
                let mut lines = Vec::new();
                let mut prev = 0;
                for cut in cuts.into_iter().chain(std::iter::once(STREAM.len())) {
                    lines.extend(decoder.push(&STREAM[prev..cut]));
                    prev = cut;
                }

                prop_assert_eq!(stringify(lines), expected);
                prop_assert_eq!(decoder.pending(), b"trailing");
            }
        }
    }
}
