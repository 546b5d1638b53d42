//! Bounded lexical scanner shared by the heuristic adapters
//!
//! The scanner understands just enough of a language's surface syntax to
//! step over string literals, comments and bracketed groups, so that a
//! statement terminator is only recognized where it really ends a statement.
//! Every forward search is bounded by a caller-supplied lookahead limit.

/// Surface syntax of one language family
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    /// Line comment opener (`#`, `//`)
    pub line_comment: &'static str,
    /// Block comment delimiters
    pub block_comment: Option<(&'static str, &'static str)>,
    /// `"""` / `'''` strings that may span lines
    pub triple_quoted: bool,
    /// C++ raw strings: `R"delim(...)delim"`
    pub raw_strings: bool,
    /// C++14 digit separators: `1'000'000`
    pub digit_separators: bool,
    /// `#` directives at the start of a line are skipped
    pub preprocessor: bool,
    /// A backslash before a newline joins two physical lines
    pub line_continuation: bool,
}

pub const PYTHON: Lexicon = Lexicon {
    line_comment: "#",
    block_comment: None,
    triple_quoted: true,
    raw_strings: false,
    digit_separators: false,
    preprocessor: false,
    line_continuation: true,
};

pub const JAVA: Lexicon = Lexicon {
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    triple_quoted: true,
    raw_strings: false,
    digit_separators: false,
    preprocessor: false,
    line_continuation: false,
};

pub const CPP: Lexicon = Lexicon {
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    triple_quoted: false,
    raw_strings: true,
    digit_separators: true,
    preprocessor: true,
    line_continuation: true,
};

/// Which bytes end a value when found outside strings, comments and brackets
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminators {
    pub newline: bool,
    pub semicolon: bool,
    pub colon: bool,
    /// A lone `=` (not part of `==`, `<=`, `+=`, ...)
    pub assignment: bool,
    /// A `,` followed by another declarator (`name =`, `name;`, `name,`)
    pub declarator_comma: bool,
}

/// Why a value scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// A terminator byte at this position
    Terminator(usize),
    /// A closing bracket with no matching opener at this position
    Unbalanced(usize),
    EndOfText,
    /// The lookahead bound was exceeded
    Limit,
}

/// Result of scanning a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueScan {
    /// End of the last code byte (trailing whitespace and comments excluded)
    pub end: usize,
    pub stop: Stop,
}

pub struct Scanner<'s> {
    text: &'s str,
    bytes: &'s [u8],
    lexicon: &'s Lexicon,
}

impl<'s> Scanner<'s> {
    pub fn new(text: &'s str, lexicon: &'s Lexicon) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            lexicon,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn byte(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    pub fn slice(&self, start: usize, end: usize) -> &'s str {
        self.text.get(start..end).unwrap_or("")
    }

    pub fn starts_with(&self, pos: usize, pattern: &str) -> bool {
        self.bytes
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(pattern.as_bytes()))
    }

    /// Position of the next `\n` at or after `pos`, or the end of text
    pub fn line_end(&self, pos: usize) -> usize {
        self.bytes
            .get(pos..)
            .and_then(|rest| rest.iter().position(|&b| b == b'\n'))
            .map(|i| pos + i)
            .unwrap_or(self.len())
    }

    /// End of the identifier starting at `pos`, if one does
    pub fn ident_end(&self, pos: usize) -> Option<usize> {
        let first = self.byte(pos)?;
        if !is_ident_start(first) {
            return None;
        }
        let mut end = pos + 1;
        while self.byte(end).is_some_and(is_ident_byte) {
            end += 1;
        }
        Some(end)
    }

    /// Identifier text starting at `pos`
    pub fn ident_at(&self, pos: usize) -> Option<(&'s str, usize)> {
        let end = self.ident_end(pos)?;
        Some((self.slice(pos, end), end))
    }

    /// Skip spaces and tabs, staying on the current line
    pub fn skip_inline_space(&self, mut pos: usize) -> usize {
        while matches!(self.byte(pos), Some(b' ' | b'\t' | b'\r' | b'\x0c')) {
            pos += 1;
        }
        pos
    }

    /// Skip whitespace, comments and preprocessor lines
    pub fn skip_trivia(&self, mut pos: usize) -> usize {
        loop {
            while self.byte(pos).is_some_and(|b| b.is_ascii_whitespace()) {
                pos += 1;
            }
            if let Some(end) = self.comment_end(pos) {
                pos = end;
                continue;
            }
            if self.lexicon.preprocessor && self.byte(pos) == Some(b'#') && self.at_line_start(pos) {
                pos = self.directive_end(pos);
                continue;
            }
            return pos;
        }
    }

    /// If a comment starts at `pos`, the position just past it.
    /// Line comments end before their newline.
    pub fn comment_end(&self, pos: usize) -> Option<usize> {
        if self.starts_with(pos, self.lexicon.line_comment) {
            return Some(self.line_end(pos));
        }
        let (open, close) = self.lexicon.block_comment?;
        if !self.starts_with(pos, open) {
            return None;
        }
        let body = pos + open.len();
        Some(
            self.text
                .get(body..)
                .and_then(|rest| rest.find(close))
                .map(|i| body + i + close.len())
                .unwrap_or(self.len()),
        )
    }

    /// If a string or character literal starts at `pos`, the position just past it.
    /// Unterminated single-line literals end at their newline.
    pub fn literal_end(&self, pos: usize) -> Option<usize> {
        let quote = self.byte(pos)?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }
        let previous = pos.checked_sub(1).and_then(|p| self.byte(p));
        if quote == b'\'' && self.lexicon.digit_separators && previous.is_some_and(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        if quote == b'"' && self.lexicon.raw_strings && previous == Some(b'R') {
            if let Some(end) = self.raw_string_end(pos) {
                return Some(end);
            }
        }
        if self.lexicon.triple_quoted {
            let triple = if quote == b'"' { "\"\"\"" } else { "'''" };
            if self.starts_with(pos, triple) {
                let mut i = pos + 3;
                while i < self.len() {
                    if self.bytes[i] == b'\\' {
                        i += 2;
                    } else if self.starts_with(i, triple) {
                        return Some(i + 3);
                    } else {
                        i += 1;
                    }
                }
                return Some(self.len());
            }
        }

        let mut i = pos + 1;
        while i < self.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'\n' => return Some(i),
                b if b == quote => return Some(i + 1),
                _ => i += 1,
            }
        }
        Some(self.len())
    }

    /// Scan a value starting at `start` until a terminator outside any
    /// literal, comment or bracket group. A closing bracket that does not
    /// match the innermost open one stops the scan as unbalanced.
    pub fn scan_value(&self, start: usize, terminators: Terminators, limit: usize) -> ValueScan {
        self.scan_value_until(start, terminators, limit, |_| false)
    }

    /// Like [`Scanner::scan_value`], but a newline inside an open bracket
    /// group also stops the scan as unbalanced, at that newline, when
    /// `starts_statement` accepts the line after it.
    pub fn scan_value_until(
        &self,
        start: usize,
        terminators: Terminators,
        limit: usize,
        starts_statement: impl Fn(usize) -> bool,
    ) -> ValueScan {
        let mut closers: Vec<u8> = Vec::new();
        let mut pos = start;
        let mut code_end = start;

        while pos < self.len() {
            if pos - start > limit {
                return ValueScan { end: code_end, stop: Stop::Limit };
            }
            if let Some(end) = self.comment_end(pos) {
                pos = end;
                continue;
            }
            if let Some(end) = self.literal_end(pos) {
                pos = end;
                code_end = end;
                continue;
            }

            let b = self.bytes[pos];
            if b == b'\\' && self.lexicon.line_continuation {
                let next = if self.starts_with(pos + 1, "\r\n") { pos + 3 } else { pos + 2 };
                if self.byte(next - 1) == Some(b'\n') {
                    pos = next;
                    continue;
                }
            }

            let terminated = match b {
                b'(' => {
                    closers.push(b')');
                    false
                }
                b'[' => {
                    closers.push(b']');
                    false
                }
                b'{' => {
                    closers.push(b'}');
                    false
                }
                b')' | b']' | b'}' => {
                    if closers.pop() != Some(b) {
                        return ValueScan { end: code_end, stop: Stop::Unbalanced(pos) };
                    }
                    false
                }
                b'\n' if !closers.is_empty() && starts_statement(pos + 1) => {
                    return ValueScan { end: code_end, stop: Stop::Unbalanced(pos) };
                }
                _ if !closers.is_empty() => false,
                b'\n' => terminators.newline,
                b';' => terminators.semicolon,
                b':' => terminators.colon && !self.starts_with(pos, "::") && !self.starts_with(pos.saturating_sub(1), "::"),
                b'=' => terminators.assignment && self.is_lone_equals(pos),
                b',' => terminators.declarator_comma && self.declarator_follows(pos + 1),
                _ => false,
            };
            if terminated {
                return ValueScan { end: code_end, stop: Stop::Terminator(pos) };
            }

            if !b.is_ascii_whitespace() {
                code_end = pos + 1;
            }
            pos += 1;
        }

        ValueScan { end: code_end, stop: Stop::EndOfText }
    }

    /// Text of `start..end` with comments and line continuations blanked out
    pub fn code_text(&self, start: usize, end: usize) -> String {
        let mut text = String::with_capacity(end.saturating_sub(start));
        let mut chunk = start;
        let mut pos = start;
        while pos < end {
            if let Some(literal) = self.literal_end(pos) {
                pos = literal;
                continue;
            }
            let skip_to = self.comment_end(pos).or_else(|| {
                let continued = self.lexicon.line_continuation
                    && self.byte(pos) == Some(b'\\')
                    && matches!(self.byte(pos + 1), Some(b'\n' | b'\r'));
                continued.then_some(pos + 1)
            });
            if let Some(skip_to) = skip_to {
                text.push_str(self.slice(chunk, pos));
                text.push(' ');
                pos = skip_to.min(end);
                chunk = pos;
                continue;
            }
            pos += 1;
        }
        text.push_str(self.slice(chunk, end.max(chunk)));
        text
    }

    /// Start of the line holding `pos`
    pub fn line_start(&self, pos: usize) -> usize {
        self.bytes[..pos.min(self.len())]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1)
    }

    /// Width of the leading whitespace on the line holding `pos`
    pub fn indentation(&self, pos: usize) -> usize {
        let start = self.line_start(pos);
        self.skip_inline_space(start) - start
    }

    /// Whether the `=` at `pos` is a plain assignment
    pub fn is_lone_equals(&self, pos: usize) -> bool {
        let previous = pos.checked_sub(1).and_then(|p| self.byte(p));
        self.byte(pos) == Some(b'=')
            && self.byte(pos + 1) != Some(b'=')
            && !previous.is_some_and(|b| b"=!<>:+-*/%&|^@~".contains(&b))
    }

    /// Whether another declarator (`name =`, `name,`, `name;`, `name[`, `*name`) starts at `pos`
    pub fn declarator_follows(&self, pos: usize) -> bool {
        let mut pos = self.skip_trivia(pos);
        while matches!(self.byte(pos), Some(b'*' | b'&')) {
            pos = self.skip_trivia(pos + 1);
        }
        let Some(end) = self.ident_end(pos) else {
            return false;
        };
        let next = self.skip_trivia(end);
        match self.byte(next) {
            Some(b'=') => self.is_lone_equals(next),
            Some(b',' | b';' | b'[' | b'{') => true,
            _ => false,
        }
    }

    /// Position just past the bracket group opened at `pos`
    pub fn group_end(&self, pos: usize, open: u8, close: u8, limit: usize) -> Option<usize> {
        if self.byte(pos) != Some(open) {
            return None;
        }
        let mut depth = 0usize;
        let mut i = pos;
        while i < self.len() && i - pos <= limit {
            if let Some(end) = self.comment_end(i).or_else(|| self.literal_end(i)) {
                i = end;
                continue;
            }
            let b = self.bytes[i];
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            i += 1;
        }
        None
    }

    fn at_line_start(&self, pos: usize) -> bool {
        self.bytes[..pos]
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n')
            .all(|b| b.is_ascii_whitespace())
    }

    /// End of a preprocessor directive, following backslash continuations
    fn directive_end(&self, pos: usize) -> usize {
        let mut end = self.line_end(pos);
        while end < self.len() && self.slice(pos, end).trim_end().ends_with('\\') {
            end = self.line_end(end + 1);
        }
        end
    }

    fn raw_string_end(&self, pos: usize) -> Option<usize> {
        let open = self.bytes.get(pos + 1..)?.iter().take(17).position(|&b| b == b'(')?;
        let delimiter = self.slice(pos + 1, pos + 1 + open);
        if delimiter.contains(|c: char| c.is_whitespace() || c == '\\' || c == ')') {
            return None;
        }
        let closing = format!("){}\"", delimiter);
        let body = pos + 2 + open;
        Some(
            self.text
                .get(body..)
                .and_then(|rest| rest.find(&closing))
                .map(|i| body + i + closing.len())
                .unwrap_or(self.len()),
        )
    }
}

/// Identifier bytes are ASCII word characters or any non-ASCII byte, so that
/// identifiers never split a multi-byte character.
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

/// Collapse every whitespace run to a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Maps byte offsets to line/column locations
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.bytes().enumerate().filter(|(_, b)| *b == b'\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    pub fn location(&self, offset: usize) -> crate::variable::SourceLocation {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        crate::variable::SourceLocation::new(line, offset - line_start + 1, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: Terminators = Terminators {
        newline: true,
        semicolon: true,
        colon: false,
        assignment: false,
        declarator_comma: false,
    };

    #[test]
    fn test_literal_end() {
        let scanner = Scanner::new(r#"x = "a\"b" + 'c'"#, &PYTHON);
        assert_eq!(scanner.literal_end(4), Some(10));
        assert_eq!(scanner.literal_end(13), Some(16));
        assert_eq!(scanner.literal_end(0), None);
    }

    #[test]
    fn test_triple_quoted_spans_lines() {
        let text = "s = \"\"\"one\ntwo\"\"\"\nt = 1";
        let scanner = Scanner::new(text, &PYTHON);
        let scan = scanner.scan_value(4, STATEMENT, 1024);
        assert_eq!(scanner.slice(4, scan.end), "\"\"\"one\ntwo\"\"\"");
        assert_eq!(scan.stop, Stop::Terminator(17));
    }

    #[test]
    fn test_value_spans_brackets_but_stops_at_newline() {
        let text = "[1,\n 2]  # trailing\ny = 2";
        let scanner = Scanner::new(text, &PYTHON);
        let scan = scanner.scan_value(0, STATEMENT, 1024);
        assert_eq!(scanner.slice(0, scan.end), "[1,\n 2]");
        assert!(matches!(scan.stop, Stop::Terminator(p) if scanner.byte(p) == Some(b'\n')));
    }

    #[test]
    fn test_terminator_inside_string_ignored() {
        let scanner = Scanner::new("\"a;b\"; next", &JAVA);
        let scan = scanner.scan_value(0, STATEMENT, 1024);
        assert_eq!(scan.stop, Stop::Terminator(5));
    }

    #[test]
    fn test_unbalanced_close_stops() {
        let scanner = Scanner::new("1 }", &JAVA);
        let scan = scanner.scan_value(0, STATEMENT, 1024);
        assert_eq!(scan, ValueScan { end: 1, stop: Stop::Unbalanced(2) });
    }

    #[test]
    fn test_mismatched_close_stops() {
        let scanner = Scanner::new("(1 }; x", &JAVA);
        assert_eq!(scanner.scan_value(0, STATEMENT, 1024).stop, Stop::Unbalanced(3));
    }

    #[test]
    fn test_open_group_stops_at_new_statement() {
        let text = "foo(1,\n  2,\nnext = 3";
        let scanner = Scanner::new(text, &PYTHON);
        let scan = scanner.scan_value_until(0, STATEMENT, 1024, |line| scanner.indentation(line) == 0);
        assert_eq!(scanner.slice(0, scan.end), "foo(1,\n  2,");
        assert_eq!(scan.stop, Stop::Unbalanced(11));
        assert_eq!(scanner.scan_value(0, STATEMENT, 1024).stop, Stop::EndOfText);
    }

    #[test]
    fn test_line_start_and_indentation() {
        let scanner = Scanner::new("a\n    b = 1\n", &PYTHON);
        assert_eq!(scanner.line_start(8), 2);
        assert_eq!(scanner.indentation(8), 4);
        assert_eq!(scanner.indentation(0), 0);
    }

    #[test]
    fn test_limit_bounds_scan() {
        let text = format!("[{}]", "1, ".repeat(100));
        let scanner = Scanner::new(&text, &PYTHON);
        assert_eq!(scanner.scan_value(0, STATEMENT, 16).stop, Stop::Limit);
    }

    #[test]
    fn test_declarator_comma() {
        let terms = Terminators { semicolon: true, declarator_comma: true, ..Default::default() };
        let scanner = Scanner::new("new HashMap<A, B>(), b = 2;", &JAVA);
        let scan = scanner.scan_value(0, terms, 1024);
        assert_eq!(scanner.slice(0, scan.end), "new HashMap<A, B>()");
        assert_eq!(scan.stop, Stop::Terminator(19));
    }

    #[test]
    fn test_cpp_raw_string_and_digit_separator() {
        let scanner = Scanner::new("R\"x(a;\")x\"; int n = 1'000;", &CPP);
        assert_eq!(scanner.literal_end(1), Some(10));
        let n = scanner.slice(0, scanner.len()).find("1'000").unwrap();
        assert_eq!(scanner.literal_end(n + 1), None);
    }

    #[test]
    fn test_skip_trivia_preprocessor() {
        let text = "#include <vector>\n#define X \\\n  1\n// note\nint x;";
        let scanner = Scanner::new(text, &CPP);
        let pos = scanner.skip_trivia(0);
        assert_eq!(scanner.slice(pos, pos + 3), "int");
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.location(0).line, 1);
        assert_eq!(index.location(3).line, 2);
        assert_eq!(index.location(4).column, 2);
    }

    #[test]
    fn test_code_text_drops_comments() {
        let text = "[1, /* one */ 2, // two\n 3]";
        let scanner = Scanner::new(text, &JAVA);
        assert_eq!(collapse_whitespace(&scanner.code_text(0, text.len())), "[1, 2, 3]");
        let scanner = Scanner::new("'#' # hash", &PYTHON);
        assert_eq!(scanner.code_text(0, 3), "'#'");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  [1,\n\t 2]  "), "[1, 2]");
    }
}
