//! Byte-cursor tokenizer for path-data strings.
//!
//! Whitespace and commas are separators and are skipped between tokens. Numbers are
//! scanned longest-match (optional sign, digits, fraction, exponent), so compact SVG
//! packing like `"0.5.5"` (-> 0.5, .5) and `"1-2"` (-> 1, -2) splits correctly.
//! Failure is reported through return values only; the cursor is left unmoved on a
//! mismatched expectation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// A single alphabetic command letter.
    Character,
    /// Anything that is not a letter and not end-of-input. The bytes may still fail
    /// to scan as a float; `expect_number` reports that without consuming.
    Number,
    End,
}

#[derive(Debug)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn skip_separators(&mut self) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' | b',' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Reports the type of the next token without consuming it.
    pub fn peek(&mut self) -> TokenType {
        self.skip_separators();
        let bytes = self.src.as_bytes();
        if self.pos >= bytes.len() {
            TokenType::End
        } else if bytes[self.pos].is_ascii_alphabetic() {
            TokenType::Character
        } else {
            TokenType::Number
        }
    }

    /// Consumes and returns the next command letter, or leaves the cursor unmoved.
    pub fn expect_char(&mut self) -> Option<char> {
        self.skip_separators();
        let bytes = self.src.as_bytes();
        if self.pos < bytes.len() && bytes[self.pos].is_ascii_alphabetic() {
            let ch = bytes[self.pos] as char;
            self.pos += 1;
            Some(ch)
        } else {
            None
        }
    }

    /// Consumes and returns the next float, or leaves the cursor unmoved.
    pub fn expect_number(&mut self) -> Option<f64> {
        self.skip_separators();
        let save = self.pos;
        let bytes = self.src.as_bytes();
        let mut i = self.pos;

        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
            let exp_start = i;
            i += 1;
            if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
                i += 1;
            }
            let digits_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            // A bare `e` with no exponent digits is not part of the number.
            if i == digits_start {
                i = exp_start;
            }
        }

        match self.src[save..i].parse::<f64>() {
            Ok(v) => {
                self.pos = i;
                Some(v)
            }
            Err(_) => {
                self.pos = save;
                None
            }
        }
    }

    pub fn at_end(&mut self) -> bool {
        self.peek() == TokenType::End
    }
}
