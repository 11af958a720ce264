//! SVG path data, parsed into segments that can be transformed and
//! reserialized.
//!
//! Commands are kept as written: arcs stay arcs, `H` stays `H`, relative
//! stays relative until asked otherwise. That is what lets the
//! absolute/round/relative/round pipeline produce compact output without
//! changing what the path draws.
//!
//! ```
//! use svgpath::SvgPath;
//!
//! let d = SvgPath::parse("M0 0L10 0 10 10z")
//!     .unwrap()
//!     .translate(0.0, -800.0)
//!     .scale(1.0, -1.0)
//!     .absolute()
//!     .round(1)
//!     .relative()
//!     .round(1)
//!     .to_string();
//! assert_eq!("M0 800l10 0 0-10z", d);
//! ```

mod parser;

use std::fmt;
use std::str::FromStr;

pub use parser::ParseError;
use parser::{Cmd, Segment};

#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    segments: Vec<Segment>,
}

impl SvgPath {
    pub fn parse(data: &str) -> Result<SvgPath, ParseError> {
        parser::parse(data).map(|segments| SvgPath { segments })
    }

    pub fn translate(self, tx: f64, ty: f64) -> SvgPath {
        self.transform(1.0, 1.0, tx, ty)
    }

    pub fn scale(self, sx: f64, sy: f64) -> SvgPath {
        self.transform(sx, sy, 0.0, 0.0)
    }

    fn transform(mut self, sx: f64, sy: f64, tx: f64, ty: f64) -> SvgPath {
        for (i, seg) in self.segments.iter_mut().enumerate() {
            // relative coordinates are deltas and only scale; the leading
            // moveto positions the contour even when written `m`
            let translated = !seg.relative || (i == 0 && seg.cmd == Cmd::Move);
            let (dx, dy) = if translated { (tx, ty) } else { (0.0, 0.0) };
            match seg.cmd {
                Cmd::Horiz => seg.args[0] = seg.args[0] * sx + dx,
                Cmd::Vert => seg.args[0] = seg.args[0] * sy + dy,
                Cmd::Close => {}
                Cmd::Arc => {
                    seg.args[0] = (seg.args[0] * sx).abs();
                    seg.args[1] = (seg.args[1] * sy).abs();
                    // a mirrored ellipse spins the other way
                    if sx * sy < 0.0 {
                        if seg.args[2] != 0.0 {
                            seg.args[2] = -seg.args[2];
                        }
                        seg.args[4] = 1.0 - seg.args[4];
                    }
                    seg.args[5] = seg.args[5] * sx + dx;
                    seg.args[6] = seg.args[6] * sy + dy;
                }
                _ => {
                    for pair in seg.args.chunks_exact_mut(2) {
                        pair[0] = pair[0] * sx + dx;
                        pair[1] = pair[1] * sy + dy;
                    }
                }
            }
        }
        self
    }

    /// Rewrite every segment with absolute coordinates.
    pub fn absolute(mut self) -> SvgPath {
        let (mut x, mut y) = (0.0, 0.0);
        let (mut cx, mut cy) = (0.0, 0.0);
        for seg in &mut self.segments {
            let (nx, ny) = seg.endpoint(x, y, cx, cy);
            if seg.relative {
                match seg.cmd {
                    Cmd::Horiz => seg.args[0] += x,
                    Cmd::Vert => seg.args[0] += y,
                    Cmd::Close => {}
                    Cmd::Arc => {
                        seg.args[5] += x;
                        seg.args[6] += y;
                    }
                    _ => {
                        for pair in seg.args.chunks_exact_mut(2) {
                            pair[0] += x;
                            pair[1] += y;
                        }
                    }
                }
                seg.relative = false;
            }
            (x, y) = (nx, ny);
            if seg.cmd == Cmd::Move {
                (cx, cy) = (x, y);
            }
        }
        self
    }

    /// Rewrite every segment but the leading moveto with relative
    /// coordinates.
    pub fn relative(mut self) -> SvgPath {
        let (mut x, mut y) = (0.0, 0.0);
        let (mut cx, mut cy) = (0.0, 0.0);
        for (i, seg) in self.segments.iter_mut().enumerate() {
            let (nx, ny) = seg.endpoint(x, y, cx, cy);
            if !seg.relative && !(i == 0 && seg.cmd == Cmd::Move) {
                match seg.cmd {
                    Cmd::Horiz => seg.args[0] -= x,
                    Cmd::Vert => seg.args[0] -= y,
                    Cmd::Close => {}
                    Cmd::Arc => {
                        seg.args[5] -= x;
                        seg.args[6] -= y;
                    }
                    _ => {
                        for pair in seg.args.chunks_exact_mut(2) {
                            pair[0] -= x;
                            pair[1] -= y;
                        }
                    }
                }
                seg.relative = true;
            }
            (x, y) = (nx, ny);
            if seg.cmd == Cmd::Move {
                (cx, cy) = (x, y);
            }
        }
        self
    }

    /// Round coordinates to `digits` decimals.
    ///
    /// The rounding error of each endpoint is carried into the next
    /// relative segment (and restored at close-path) so relative output
    /// does not drift. Arc rotations keep two extra digits; arc flags are
    /// not coordinates and are left alone.
    pub fn round(mut self, digits: u8) -> SvgPath {
        let factor = 10f64.powi(digits as i32);
        let rotation_factor = 10f64.powi(digits as i32 + 2);
        let (mut dx, mut dy) = (0.0, 0.0);
        let (mut contour_dx, mut contour_dy) = (0.0, 0.0);
        for seg in &mut self.segments {
            match seg.cmd {
                Cmd::Horiz => {
                    if seg.relative {
                        seg.args[0] += dx;
                    }
                    let rounded = round_to(seg.args[0], factor);
                    dx = seg.args[0] - rounded;
                    seg.args[0] = rounded;
                }
                Cmd::Vert => {
                    if seg.relative {
                        seg.args[0] += dy;
                    }
                    let rounded = round_to(seg.args[0], factor);
                    dy = seg.args[0] - rounded;
                    seg.args[0] = rounded;
                }
                Cmd::Close => {
                    (dx, dy) = (contour_dx, contour_dy);
                }
                Cmd::Move => {
                    if seg.relative {
                        seg.args[0] += dx;
                        seg.args[1] += dy;
                    }
                    let rx = round_to(seg.args[0], factor);
                    let ry = round_to(seg.args[1], factor);
                    dx = seg.args[0] - rx;
                    dy = seg.args[1] - ry;
                    (contour_dx, contour_dy) = (dx, dy);
                    seg.args[0] = rx;
                    seg.args[1] = ry;
                }
                Cmd::Arc => {
                    if seg.relative {
                        seg.args[5] += dx;
                        seg.args[6] += dy;
                    }
                    let rx = round_to(seg.args[5], factor);
                    let ry = round_to(seg.args[6], factor);
                    dx = seg.args[5] - rx;
                    dy = seg.args[6] - ry;
                    seg.args[0] = round_to(seg.args[0], factor);
                    seg.args[1] = round_to(seg.args[1], factor);
                    seg.args[2] = round_to(seg.args[2], rotation_factor);
                    seg.args[5] = rx;
                    seg.args[6] = ry;
                }
                _ => {
                    let n = seg.args.len();
                    if seg.relative {
                        seg.args[n - 2] += dx;
                        seg.args[n - 1] += dy;
                    }
                    let rx = round_to(seg.args[n - 2], factor);
                    let ry = round_to(seg.args[n - 1], factor);
                    dx = seg.args[n - 2] - rx;
                    dy = seg.args[n - 1] - ry;
                    for arg in &mut seg.args {
                        *arg = round_to(*arg, factor);
                    }
                }
            }
        }
        self
    }
}

impl Segment {
    /// Absolute endpoint given the current point and contour start.
    fn endpoint(&self, x: f64, y: f64, cx: f64, cy: f64) -> (f64, f64) {
        let (dx, dy) = if self.relative { (x, y) } else { (0.0, 0.0) };
        match self.cmd {
            Cmd::Horiz => (self.args[0] + dx, y),
            Cmd::Vert => (x, self.args[0] + dy),
            Cmd::Close => (cx, cy),
            _ => {
                let n = self.args.len();
                (self.args[n - 2] + dx, self.args[n - 1] + dy)
            }
        }
    }
}

fn round_to(value: f64, factor: f64) -> f64 {
    (value * factor).round() / factor
}

impl FromStr for SvgPath {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<SvgPath, ParseError> {
        SvgPath::parse(s)
    }
}

impl fmt::Display for SvgPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev: Option<(Cmd, bool)> = None;
        for seg in &self.segments {
            let elided = prev == Some((seg.cmd, seg.relative)) && seg.cmd != Cmd::Move;
            if !elided {
                write!(f, "{}", seg.cmd.letter(seg.relative))?;
            }
            for (i, &arg) in seg.args.iter().enumerate() {
                let arg = if arg == 0.0 { 0.0 } else { arg };
                // a minus sign separates on its own; after an elided
                // command the first argument still needs a separator
                if (i > 0 || elided) && arg >= 0.0 {
                    f.write_str(" ")?;
                }
                write!(f, "{arg}")?;
            }
            prev = Some((seg.cmd, seg.relative));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn path(data: &str) -> SvgPath {
        SvgPath::parse(data).unwrap()
    }

    #[test]
    fn serialize_is_compact() {
        assert_eq!("M10-5l-3-4", path("M 10 -5 l -3 -4").to_string());
        assert_eq!("M0 0L10 10 20 20", path("M0 0L10 10L20 20").to_string());
        // repeated movetos cannot be elided, they would become linetos
        assert_eq!("M0 0M10 10", path("M0 0M10 10").to_string());
    }

    #[test]
    fn absolute_basic() {
        assert_eq!("M10 10L30 30", path("m10 10l20 20").absolute().to_string());
    }

    #[test]
    fn absolute_horiz_vert_arc() {
        assert_eq!(
            "M1 2H11V22A5 5 0 0 1 31 42",
            path("m1 2h10v20a5 5 0 0 1 20 20").absolute().to_string()
        );
    }

    #[test]
    fn relative_keeps_leading_moveto() {
        assert_eq!(
            "M10 10l20 20 0 10z",
            path("M10 10L30 30 30 40Z").relative().to_string()
        );
    }

    #[test]
    fn close_returns_to_contour_start() {
        assert_eq!(
            "M10 10l10 10zl-5-5",
            path("M10 10L20 20ZL5 5").relative().to_string()
        );
    }

    #[test]
    fn relative_horiz_vert() {
        assert_eq!("M0 0h10v5h-3", path("M0 0H10V5H7").relative().to_string());
    }

    #[test]
    fn translate_skips_relative_segments() {
        assert_eq!("M13 14l5 5", path("M10 10l5 5").translate(3.0, 4.0).to_string());
    }

    #[test]
    fn translate_treats_leading_lowercase_moveto_as_absolute() {
        assert_eq!("m13 14l5 5", path("m10 10l5 5").translate(3.0, 4.0).to_string());
    }

    #[test]
    fn scale_scales_horiz_vert() {
        assert_eq!("M20 30h8v18", path("M10 10h4v6").scale(2.0, 3.0).to_string());
    }

    #[test]
    fn mirroring_flips_arc_sweep() {
        assert_eq!(
            "M0 0a5 5 0 0 0 10 0",
            path("M0 0a5 5 0 0 1 10 0").scale(1.0, -1.0).to_string()
        );
    }

    #[test]
    fn mirroring_negates_arc_rotation() {
        assert_eq!(
            "M0 0a5 5-30 1 0 10 0",
            path("M0 0a5 5 30 1 1 10 0").scale(1.0, -1.0).to_string()
        );
    }

    #[test]
    fn round_compensates_drift() {
        // uncompensated, every 0.04 would round away to nothing
        assert_eq!(
            "m0 0l0 0 0.1 0 0 0",
            path("m0 0l.04 0 .04 0 .04 0").round(1).to_string()
        );
    }

    #[test]
    fn round_leaves_arc_flags_and_keeps_rotation_precision() {
        assert_eq!(
            "M0 0a5.6 5.6 30.123 1 0 10.6 10.4",
            path("M0 0a5.5555 5.5555 30.123456 1 0 10.55 10.44")
                .round(1)
                .to_string()
        );
    }

    #[test]
    fn negative_zero_never_serializes() {
        assert_eq!("M0 0l10 0", path("M0 0l10 0").scale(1.0, -1.0).to_string());
    }

    #[test]
    fn font_projection_pipeline() {
        let d = path("M0 0L10 0 10 10z")
            .translate(0.0, -800.0)
            .scale(1.0, -1.0)
            .absolute()
            .round(1)
            .relative()
            .round(1)
            .to_string();
        assert_eq!("M0 800l10 0 0-10z", d);
    }

    #[test]
    fn close_then_move_serializes_adjacent() {
        let d = path("M0 0 L10 10 Z M20 20 L30 30 Z")
            .absolute()
            .round(1)
            .relative()
            .round(1)
            .to_string();
        assert_eq!("M0 0l10 10zm20 20l10 10z", d);
    }

    #[test]
    fn from_str_round_trips() {
        let parsed: SvgPath = "M0 0L10 10".parse().unwrap();
        assert_eq!(path("M0 0L10 10"), parsed);
    }
}
