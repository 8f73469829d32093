//! Path-data parser: turns an SVG/AVG-style path string into a [`CompiledPath`].
//!
//! The parser is a pure syntax layer. Relative coordinates are expanded to absolute,
//! shorthand/smooth commands are expanded to explicit control points, and arcs are
//! stored atomically with all seven parameters (geometric expansion happens in the
//! bounds calculator). Parsing never panics and never returns an error: malformed
//! input yields whatever was accumulated before the first unparseable token, with the
//! compiled path's `failed` flag set.

use tracing::debug;

use super::tokenizer::{TokenType, Tokenizer};
use super::{CompiledPath, PathOp};

/// Parses a path-data string into a compiled path.
pub fn parse(path_data: &str) -> CompiledPath {
    let mut parser = Parser {
        tok: Tokenizer::new(path_data),
        out: CompiledPath::default(),
        pen: (0.0, 0.0),
        mirror: (0.0, 0.0),
        prev_cmd: ' ',
        pending_move: None,
    };
    parser.run();
    parser.out
}

/// Per-parse-call cursor state: pen position, the mirror control point for smooth
/// curves, the previously-seen command letter, and the not-yet-emitted trailing move.
/// Discarded when the call returns.
struct Parser<'a> {
    tok: Tokenizer<'a>,
    out: CompiledPath,
    pen: (f64, f64),
    mirror: (f64, f64),
    prev_cmd: char,
    pending_move: Option<(f64, f64)>,
}

impl Parser<'_> {
    fn run(&mut self) {
        loop {
            match self.tok.peek() {
                TokenType::End => break,
                TokenType::Number => {
                    // Values with no governing command.
                    self.fail();
                    return;
                }
                TokenType::Character => {}
            }
            let Some(cmd) = self.tok.expect_char() else {
                self.fail();
                return;
            };
            let ok = match cmd {
                'M' | 'm' => self.cmd_move(cmd == 'm'),
                'L' | 'l' => self.cmd_line(cmd == 'l'),
                'H' | 'h' => self.cmd_axis_line(cmd == 'h', true),
                'V' | 'v' => self.cmd_axis_line(cmd == 'v', false),
                'C' | 'c' => self.cmd_cubic(cmd == 'c'),
                'S' | 's' => self.cmd_smooth_cubic(cmd == 's'),
                'Q' | 'q' => self.cmd_quad(cmd == 'q'),
                'T' | 't' => self.cmd_smooth_quad(cmd == 't'),
                'A' | 'a' => self.cmd_arc(cmd == 'a'),
                'Z' | 'z' => self.cmd_close(),
                other => {
                    debug!(command = %other, "unrecognized path command");
                    false
                }
            };
            if !ok {
                self.fail();
                return;
            }
            self.prev_cmd = cmd.to_ascii_uppercase();
        }
        self.flush_move();
    }

    fn fail(&mut self) {
        self.flush_move();
        self.out.mark_failed();
    }

    /// Emits the most recent pending move. Earlier moves in a run are dead and never
    /// reach the compiled output.
    fn flush_move(&mut self) {
        if let Some((x, y)) = self.pending_move.take() {
            self.out.push(PathOp::Move, &[x, y]);
        }
    }

    fn number(&mut self) -> Option<f64> {
        self.tok.expect_number()
    }

    fn more_args(&mut self) -> bool {
        self.tok.peek() == TokenType::Number
    }

    fn cmd_move(&mut self, rel: bool) -> bool {
        // Each coordinate pair after the letter is an independent move; only the last
        // one in the run survives.
        loop {
            let Some(mut x) = self.number() else {
                return false;
            };
            let Some(mut y) = self.number() else {
                return false;
            };
            if rel {
                x += self.pen.0;
                y += self.pen.1;
            }
            self.pen = (x, y);
            self.pending_move = Some((x, y));
            if !self.more_args() {
                return true;
            }
        }
    }

    fn cmd_line(&mut self, rel: bool) -> bool {
        loop {
            let Some(mut x) = self.number() else {
                return false;
            };
            let Some(mut y) = self.number() else {
                return false;
            };
            if rel {
                x += self.pen.0;
                y += self.pen.1;
            }
            self.flush_move();
            self.out.push(PathOp::Line, &[x, y]);
            self.pen = (x, y);
            if !self.more_args() {
                return true;
            }
        }
    }

    /// `H`/`h` and `V`/`v`: the missing coordinate is synthesized from the pen.
    fn cmd_axis_line(&mut self, rel: bool, horizontal: bool) -> bool {
        loop {
            let Some(mut v) = self.number() else {
                return false;
            };
            let (x, y) = if horizontal {
                if rel {
                    v += self.pen.0;
                }
                (v, self.pen.1)
            } else {
                if rel {
                    v += self.pen.1;
                }
                (self.pen.0, v)
            };
            self.flush_move();
            self.out.push(PathOp::Line, &[x, y]);
            self.pen = (x, y);
            if !self.more_args() {
                return true;
            }
        }
    }

    fn cmd_cubic(&mut self, rel: bool) -> bool {
        loop {
            let Some(mut x1) = self.number() else {
                return false;
            };
            let Some(mut y1) = self.number() else {
                return false;
            };
            let Some(mut x2) = self.number() else {
                return false;
            };
            let Some(mut y2) = self.number() else {
                return false;
            };
            let Some(mut x) = self.number() else {
                return false;
            };
            let Some(mut y) = self.number() else {
                return false;
            };
            if rel {
                x1 += self.pen.0;
                y1 += self.pen.1;
                x2 += self.pen.0;
                y2 += self.pen.1;
                x += self.pen.0;
                y += self.pen.1;
            }
            self.flush_move();
            self.out.push(PathOp::Cubic, &[x1, y1, x2, y2, x, y]);
            self.mirror = (2.0 * x - x2, 2.0 * y - y2);
            self.pen = (x, y);
            if !self.more_args() {
                return true;
            }
        }
    }

    fn cmd_smooth_cubic(&mut self, rel: bool) -> bool {
        // The first control point mirrors the previous cubic's second control point,
        // or collapses to the pen when the previous command was not a cubic.
        let mut continues_curve = matches!(self.prev_cmd, 'C' | 'S');
        loop {
            let (x1, y1) = if continues_curve {
                self.mirror
            } else {
                self.pen
            };
            let Some(mut x2) = self.number() else {
                return false;
            };
            let Some(mut y2) = self.number() else {
                return false;
            };
            let Some(mut x) = self.number() else {
                return false;
            };
            let Some(mut y) = self.number() else {
                return false;
            };
            if rel {
                x2 += self.pen.0;
                y2 += self.pen.1;
                x += self.pen.0;
                y += self.pen.1;
            }
            self.flush_move();
            self.out.push(PathOp::Cubic, &[x1, y1, x2, y2, x, y]);
            self.mirror = (2.0 * x - x2, 2.0 * y - y2);
            self.pen = (x, y);
            if !self.more_args() {
                return true;
            }
            continues_curve = true;
        }
    }

    fn cmd_quad(&mut self, rel: bool) -> bool {
        loop {
            let Some(mut x1) = self.number() else {
                return false;
            };
            let Some(mut y1) = self.number() else {
                return false;
            };
            let Some(mut x) = self.number() else {
                return false;
            };
            let Some(mut y) = self.number() else {
                return false;
            };
            if rel {
                x1 += self.pen.0;
                y1 += self.pen.1;
                x += self.pen.0;
                y += self.pen.1;
            }
            self.flush_move();
            self.out.push(PathOp::Quad, &[x1, y1, x, y]);
            self.mirror = (2.0 * x - x1, 2.0 * y - y1);
            self.pen = (x, y);
            if !self.more_args() {
                return true;
            }
        }
    }

    fn cmd_smooth_quad(&mut self, rel: bool) -> bool {
        let mut continues_curve = matches!(self.prev_cmd, 'Q' | 'T');
        loop {
            let (x1, y1) = if continues_curve {
                self.mirror
            } else {
                self.pen
            };
            let Some(mut x) = self.number() else {
                return false;
            };
            let Some(mut y) = self.number() else {
                return false;
            };
            if rel {
                x += self.pen.0;
                y += self.pen.1;
            }
            self.flush_move();
            self.out.push(PathOp::Quad, &[x1, y1, x, y]);
            self.mirror = (2.0 * x - x1, 2.0 * y - y1);
            self.pen = (x, y);
            if !self.more_args() {
                return true;
            }
            continues_curve = true;
        }
    }

    fn cmd_arc(&mut self, rel: bool) -> bool {
        loop {
            let Some(rx) = self.number() else {
                return false;
            };
            let Some(ry) = self.number() else {
                return false;
            };
            let Some(rot) = self.number() else {
                return false;
            };
            let Some(large_arc) = self.number() else {
                return false;
            };
            let Some(sweep) = self.number() else {
                return false;
            };
            let Some(mut x) = self.number() else {
                return false;
            };
            let Some(mut y) = self.number() else {
                return false;
            };
            if rel {
                x += self.pen.0;
                y += self.pen.1;
            }
            self.flush_move();
            self.out
                .push(PathOp::Arc, &[rx, ry, rot, large_arc, sweep, x, y]);
            self.pen = (x, y);
            if !self.more_args() {
                return true;
            }
        }
    }

    fn cmd_close(&mut self) -> bool {
        // A run of Z/z commands emits a single Close.
        if self.prev_cmd != 'Z' {
            self.flush_move();
            self.out.push(PathOp::Close, &[]);
        }
        true
    }
}
