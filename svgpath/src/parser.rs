//! Scanner for the SVG path data mini-language.

use thiserror::Error;

/// A path data command, sans case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cmd {
    Move,
    Line,
    Horiz,
    Vert,
    Cubic,
    SmoothCubic,
    Quad,
    SmoothQuad,
    Arc,
    Close,
}

impl Cmd {
    pub(crate) fn from_letter(letter: u8) -> Option<(Cmd, bool)> {
        let cmd = match letter.to_ascii_lowercase() {
            b'm' => Cmd::Move,
            b'l' => Cmd::Line,
            b'h' => Cmd::Horiz,
            b'v' => Cmd::Vert,
            b'c' => Cmd::Cubic,
            b's' => Cmd::SmoothCubic,
            b'q' => Cmd::Quad,
            b't' => Cmd::SmoothQuad,
            b'a' => Cmd::Arc,
            b'z' => Cmd::Close,
            _ => return None,
        };
        Some((cmd, letter.is_ascii_lowercase()))
    }

    pub(crate) fn letter(self, relative: bool) -> char {
        let letter = match self {
            Cmd::Move => 'M',
            Cmd::Line => 'L',
            Cmd::Horiz => 'H',
            Cmd::Vert => 'V',
            Cmd::Cubic => 'C',
            Cmd::SmoothCubic => 'S',
            Cmd::Quad => 'Q',
            Cmd::SmoothQuad => 'T',
            Cmd::Arc => 'A',
            Cmd::Close => 'Z',
        };
        if relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }

    /// How many numbers one set of arguments carries.
    pub(crate) fn arity(self) -> usize {
        match self {
            Cmd::Close => 0,
            Cmd::Horiz | Cmd::Vert => 1,
            Cmd::Move | Cmd::Line | Cmd::SmoothQuad => 2,
            Cmd::SmoothCubic | Cmd::Quad => 4,
            Cmd::Cubic => 6,
            Cmd::Arc => 7,
        }
    }
}

/// One command with one set of arguments. Implicit repetitions in the
/// source expand to separate segments.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment {
    pub(crate) cmd: Cmd,
    pub(crate) relative: bool,
    pub(crate) args: Vec<f64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("path data must begin with a moveto (offset {0})")]
    ExpectedMoveTo(usize),
    #[error("unexpected character '{1}' (offset {0})")]
    UnexpectedChar(usize, char),
    #[error("expected a number (offset {0})")]
    ExpectedNumber(usize),
    #[error("arc flag must be 0 or 1 (offset {0})")]
    BadArcFlag(usize),
}

pub(crate) fn parse(data: &str) -> Result<Vec<Segment>, ParseError> {
    let mut scanner = Scanner {
        data: data.as_bytes(),
        pos: 0,
    };
    let mut segments: Vec<Segment> = Vec::new();
    scanner.skip_separators();
    while !scanner.at_end() {
        let start = scanner.pos;
        let byte = scanner.peek();
        let (cmd, relative) = if byte.is_ascii_alphabetic() {
            scanner.pos += 1;
            Cmd::from_letter(byte).ok_or(ParseError::UnexpectedChar(start, byte as char))?
        } else {
            // a bare coordinate set repeats the previous command
            match segments.last() {
                None => return Err(ParseError::ExpectedMoveTo(start)),
                Some(prev) if prev.cmd == Cmd::Close => {
                    return Err(ParseError::UnexpectedChar(start, byte as char))
                }
                Some(prev) if prev.cmd == Cmd::Move => (Cmd::Line, prev.relative),
                Some(prev) => (prev.cmd, prev.relative),
            }
        };
        if segments.is_empty() && cmd != Cmd::Move {
            return Err(ParseError::ExpectedMoveTo(start));
        }

        let mut args = Vec::with_capacity(cmd.arity());
        for i in 0..cmd.arity() {
            scanner.skip_separators();
            // arc flags are single characters; "011 0" is four numbers
            let value = if cmd == Cmd::Arc && (i == 3 || i == 4) {
                scanner.scan_flag()?
            } else {
                scanner.scan_number()?
            };
            args.push(value);
        }
        segments.push(Segment {
            cmd,
            relative,
            args,
        });
        scanner.skip_separators();
    }
    Ok(segments)
}

struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn peek(&self) -> u8 {
        self.data[self.pos]
    }

    /// Skip whitespace and at most one comma.
    fn skip_separators(&mut self) {
        let mut seen_comma = false;
        while !self.at_end() {
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' | b'\x0c' => self.pos += 1,
                b',' if !seen_comma => {
                    seen_comma = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }
    }

    fn scan_flag(&mut self) -> Result<f64, ParseError> {
        match self.data.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0.0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1.0)
            }
            _ => Err(ParseError::BadArcFlag(self.pos)),
        }
    }

    fn scan_number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        if matches!(self.data.get(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut digits = 0;
        while matches!(self.data.get(self.pos), Some(b'0'..=b'9')) {
            self.pos += 1;
            digits += 1;
        }
        if let Some(b'.') = self.data.get(self.pos) {
            self.pos += 1;
            while matches!(self.data.get(self.pos), Some(b'0'..=b'9')) {
                self.pos += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            self.pos = start;
            return Err(ParseError::ExpectedNumber(start));
        }
        if matches!(self.data.get(self.pos), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.data.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let mut exp_digits = 0;
            while matches!(self.data.get(self.pos), Some(b'0'..=b'9')) {
                self.pos += 1;
                exp_digits += 1;
            }
            // "1e" with no exponent digits is the number 1 followed by junk
            if exp_digits == 0 {
                self.pos = mark;
            }
        }
        let text = std::str::from_utf8(&self.data[start..self.pos]).expect("scanned ascii");
        text.parse()
            .map_err(|_| ParseError::ExpectedNumber(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(segments: &[Segment]) -> Vec<Vec<f64>> {
        segments.iter().map(|s| s.args.clone()).collect()
    }

    #[test]
    fn basic_commands() {
        let segments = parse("M10 10L20 20z").unwrap();
        assert_eq!(3, segments.len());
        assert_eq!(
            vec![(Cmd::Move, false), (Cmd::Line, false), (Cmd::Close, true)],
            segments
                .iter()
                .map(|s| (s.cmd, s.relative))
                .collect::<Vec<_>>()
        );
        assert_eq!(vec![vec![10.0, 10.0], vec![20.0, 20.0], vec![]], args(&segments));
    }

    #[test]
    fn implicit_repetition_after_move_is_line() {
        let segments = parse("m10 10 20 20").unwrap();
        assert_eq!(
            vec![(Cmd::Move, true), (Cmd::Line, true)],
            segments
                .iter()
                .map(|s| (s.cmd, s.relative))
                .collect::<Vec<_>>()
        );

        let segments = parse("M10 10 20 20").unwrap();
        assert_eq!(Cmd::Line, segments[1].cmd);
        assert!(!segments[1].relative);
    }

    #[test]
    fn implicit_repetition_of_curves() {
        let segments = parse("M0 0c1 1 2 2 3 3 4 4 5 5 6 6").unwrap();
        assert_eq!(3, segments.len());
        assert_eq!(Cmd::Cubic, segments[2].cmd);
        assert_eq!(vec![4.0, 4.0, 5.0, 5.0, 6.0, 6.0], segments[2].args);
    }

    #[test]
    fn packed_arc_flags() {
        let segments = parse("M0 0a1 1 0 011 0").unwrap();
        assert_eq!(vec![1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0], segments[1].args);
    }

    #[test]
    fn bad_arc_flag() {
        assert_eq!(
            Err(ParseError::BadArcFlag(11)),
            parse("M0 0a1 1 0 2 0 1 1")
        );
    }

    #[test]
    fn packed_decimals() {
        let segments = parse("M1.5.5.5 1").unwrap();
        assert_eq!(vec![vec![1.5, 0.5], vec![0.5, 1.0]], args(&segments));
    }

    #[test]
    fn comma_separators() {
        let segments = parse("M10,10 L,20,20").unwrap();
        assert_eq!(vec![vec![10.0, 10.0], vec![20.0, 20.0]], args(&segments));
    }

    #[test]
    fn exponents_and_signs() {
        let segments = parse("M1e2-1.5e-1").unwrap();
        assert_eq!(vec![vec![100.0, -0.15]], args(&segments));
    }

    #[test]
    fn must_start_with_moveto() {
        assert_eq!(Err(ParseError::ExpectedMoveTo(0)), parse("L10 10"));
        assert_eq!(Err(ParseError::ExpectedMoveTo(0)), parse("10 10"));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            Err(ParseError::UnexpectedChar(4, 'X')),
            parse("M0 0X10 10")
        );
    }

    #[test]
    fn numbers_cannot_follow_close() {
        assert_eq!(Err(ParseError::UnexpectedChar(5, '5')), parse("M0 0z5"));
    }

    #[test]
    fn truncated_arguments() {
        assert_eq!(Err(ParseError::ExpectedNumber(3)), parse("M10"));
    }

    #[test]
    fn empty_input_is_an_empty_path() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
    }
}
