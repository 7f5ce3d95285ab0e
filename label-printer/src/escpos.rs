//! ESC/POS command builder

use crate::encoding::{convert_to_cp1252, text_width, truncate_width};

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;

/// Chainable ESC/POS buffer for one label
///
/// Text stays UTF-8 until [`EscPosBuilder::build`] converts it to
/// Windows-1252.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// `width` is the printable line length in characters at normal size
    /// (48 on the 5" drop-off labels)
    pub fn new(width: usize) -> Self {
        let mut builder = Self {
            buf: Vec::with_capacity(512),
            width,
        };
        builder.cmd(&[ESC, b'@']);
        builder
    }

    fn cmd(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Printable text only: control characters become spaces so submitted
    /// strings can never form printer commands
    pub fn text(&mut self, s: &str) -> &mut Self {
        let mut utf8 = [0u8; 4];
        for c in s.chars() {
            let c = if c.is_control() { ' ' } else { c };
            self.buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        }
        self
    }

    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write text word-wrapped to the paper width, one line per chunk
    ///
    /// `scale` is the horizontal magnification currently selected
    /// (2 after [`double_size`](Self::double_size)).
    pub fn line_wrap(&mut self, s: &str, scale: usize) -> &mut Self {
        let max = (self.width / scale.max(1)).max(1);
        for row in wrap(s, max) {
            self.line(&row);
        }
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Print and feed `lines` lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.cmd(&[ESC, b'd', lines])
    }

    pub fn center(&mut self) -> &mut Self {
        self.cmd(&[ESC, b'a', 0x01])
    }

    pub fn left(&mut self) -> &mut Self {
        self.cmd(&[ESC, b'a', 0x00])
    }

    pub fn bold(&mut self) -> &mut Self {
        self.cmd(&[ESC, b'E', 0x01])
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.cmd(&[ESC, b'E', 0x00])
    }

    /// Single-dot underline
    pub fn underline(&mut self) -> &mut Self {
        self.cmd(&[ESC, b'-', 0x01])
    }

    pub fn underline_off(&mut self) -> &mut Self {
        self.cmd(&[ESC, b'-', 0x00])
    }

    /// 2x width and height; wrap with `scale = 2` while active
    pub fn double_size(&mut self) -> &mut Self {
        self.cmd(&[GS, b'!', 0x11])
    }

    pub fn double_height(&mut self) -> &mut Self {
        self.cmd(&[GS, b'!', 0x01])
    }

    pub fn reset_size(&mut self) -> &mut Self {
        self.cmd(&[GS, b'!', 0x00])
    }

    /// Full cut
    pub fn cut(&mut self) -> &mut Self {
        self.cmd(&[GS, b'V', 0x00])
    }

    /// Finish the job, transcoding text to Windows-1252
    pub fn build(self) -> Vec<u8> {
        convert_to_cp1252(&self.buf)
    }

    /// Build without conversion (for debugging or ASCII-only content)
    pub fn build_raw(self) -> Vec<u8> {
        self.buf
    }
}

/// Split text into rows of at most `max` printed cells, breaking on spaces
/// where possible and hard-splitting words longer than a row.
fn wrap(s: &str, max: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in s.split_whitespace() {
        let mut word = word.to_string();
        while text_width(&word) > max {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            let head = truncate_width(&word, max);
            word = word.chars().skip(max).collect();
            rows.push(head);
        }
        if word.is_empty() {
            continue;
        }

        if current.is_empty() {
            current = word;
        } else if text_width(&current) + 1 + text_width(&word) <= max {
            current.push(' ');
            current.push_str(&word);
        } else {
            rows.push(std::mem::replace(&mut current, word));
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}
