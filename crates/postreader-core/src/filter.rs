use std::fmt::Write as _;

/// POST value the reader reports when no code is latched.
pub const IDLE: u8 = 0xFF;

/// Printed before a run of codes that follows an idle byte.
pub const RUN_BREAK: &str = "\n";

/// Renders one POST frame, given the last byte of everything rendered before.
///
/// Idle bytes print nothing. Every other byte prints as `"XX "`, and a run of
/// codes that follows an idle byte starts on a new line. Returns the new last
/// byte, which is the input `last` for an empty frame.
pub fn render_frame(last: u8, frame: &[u8], out: &mut String) -> u8 {
    let mut last = last;
    for &code in frame {
        if code != IDLE {
            if last == IDLE {
                out.push_str(RUN_BREAK);
            }
            let _ = write!(out, "{code:02X} ");
        }
        last = code;
    }
    last
}

/// Carries the last-byte state between frames.
#[derive(Debug, Clone)]
pub struct RunFilter {
    last: u8,
}

impl Default for RunFilter {
    fn default() -> Self {
        Self { last: IDLE }
    }
}

impl RunFilter {
    pub fn last(&self) -> u8 {
        self.last
    }

    pub fn feed(&mut self, frame: &[u8]) -> String {
        let mut out = String::new();
        self.last = render_frame(self.last, frame, &mut out);
        out
    }
}
