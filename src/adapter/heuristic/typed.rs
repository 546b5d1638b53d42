//! Java and C++ declaration scanner
//!
//! Matches `[modifiers] Type [<args>] [*|&] name [dims] (= init | {init})? (, next)* ;`
//! at statement starts. A type head must look like a type: a primitive
//! keyword, a capitalized or qualified name, a C++ `_t` alias, a well-known
//! library type, or `var`/`auto`. The declared type becomes the record kind,
//! except for `var`/`auto` where the initializer shape decides.

use crate::Result;
use crate::adapter::framework::LanguageAdapter;
use crate::language::{AdapterFamily, LanguageTag};
use crate::variable::{self, ValueKind, VariableRecord, NO_VALUE};
use super::cues::{CueFlavor, infer_kind};
use super::scanner::{self, CPP, JAVA, Lexicon, LineIndex, Scanner, Stop, Terminators, is_ident_byte};
use super::{HeuristicOptions, Matched};

const DECLARATION_END: Terminators = Terminators {
    newline: false,
    semicolon: true,
    colon: false,
    assignment: false,
    declarator_comma: true,
};

/// Syntax tables for one statically typed language
#[derive(Debug)]
pub struct Dialect {
    tag: LanguageTag,
    name: &'static str,
    lexicon: &'static Lexicon,
    primitives: &'static [&'static str],
    inferred: &'static [&'static str],
    /// Lowercase type names accepted without qualification
    library_types: &'static [&'static str],
    modifiers: &'static [&'static str],
    keywords: &'static [&'static str],
    /// Keywords whose `(` opens a header that may hold a declaration
    headers: &'static [&'static str],
    separator: &'static str,
    annotations: bool,
    pointer_declarators: bool,
    brace_init: bool,
    /// Any `::`-qualified name is taken as a type
    qualified_types: bool,
    /// `size_t`-style aliases are taken as types
    alias_suffix: Option<&'static str>,
}

pub static JAVA_DIALECT: Dialect = Dialect {
    tag: LanguageTag::Java,
    name: "Java",
    lexicon: &JAVA,
    primitives: &["boolean", "byte", "char", "short", "int", "long", "float", "double", "void"],
    inferred: &["var"],
    library_types: &[],
    modifiers: &[
        "public", "protected", "private", "static", "final", "abstract", "transient", "volatile",
        "synchronized", "native", "strictfp", "sealed",
    ],
    keywords: &[
        "assert", "break", "case", "catch", "class", "continue", "default", "do", "else", "enum",
        "extends", "finally", "for", "goto", "if", "implements", "import", "instanceof",
        "interface", "new", "package", "permits", "return", "super", "switch", "this", "throw",
        "throws", "try", "while", "yield", "null", "true", "false",
    ],
    headers: &["for", "try"],
    separator: ".",
    annotations: true,
    pointer_declarators: false,
    brace_init: false,
    qualified_types: false,
    alias_suffix: None,
};

pub static CPP_DIALECT: Dialect = Dialect {
    tag: LanguageTag::Cpp,
    name: "C++",
    lexicon: &CPP,
    primitives: &[
        "bool", "char", "wchar_t", "char8_t", "char16_t", "char32_t", "short", "int", "long",
        "signed", "unsigned", "float", "double", "void",
    ],
    inferred: &["auto"],
    library_types: &[
        "string", "wstring", "string_view", "vector", "map", "set", "unordered_map",
        "unordered_set", "list", "deque", "array", "pair", "tuple", "optional", "variant",
        "function", "shared_ptr", "unique_ptr", "weak_ptr",
    ],
    modifiers: &[
        "const", "constexpr", "consteval", "constinit", "static", "extern", "inline", "volatile",
        "mutable", "register", "thread_local", "virtual", "explicit",
    ],
    keywords: &[
        "alignas", "alignof", "asm", "break", "case", "catch", "class", "co_await", "co_return",
        "co_yield", "concept", "continue", "decltype", "default", "delete", "do", "else", "enum",
        "export", "false", "for", "friend", "goto", "if", "namespace", "new", "noexcept",
        "nullptr", "operator", "private", "protected", "public", "requires", "return", "sizeof",
        "static_assert", "static_cast", "dynamic_cast", "reinterpret_cast", "const_cast",
        "struct", "switch", "template", "this", "throw", "true", "try", "typedef", "typeid",
        "typename", "union", "using", "while",
    ],
    headers: &["for", "if", "switch"],
    separator: "::",
    annotations: false,
    pointer_declarators: true,
    brace_init: true,
    qualified_types: true,
    alias_suffix: Some("_t"),
};

/// A parsed type head
struct TypeHead {
    text: String,
    inferred: bool,
    end: usize,
}

/// Heuristic adapter for Java and C++ sources
#[derive(Debug, Clone)]
pub struct TypedAdapter {
    dialect: &'static Dialect,
    options: HeuristicOptions,
}

impl TypedAdapter {
    pub fn java(options: HeuristicOptions) -> Self {
        Self { dialect: &JAVA_DIALECT, options }
    }

    pub fn cpp(options: HeuristicOptions) -> Self {
        Self { dialect: &CPP_DIALECT, options }
    }

    fn is_reserved(&self, word: &str) -> bool {
        let d = self.dialect;
        d.keywords.contains(&word) || d.modifiers.contains(&word) || d.primitives.contains(&word)
    }

    fn match_declaration(&self, scanner: &Scanner, lines: &LineIndex, start: usize) -> Option<Matched> {
        let limit = self.options.max_lookahead;
        let indent = scanner.indentation(start);
        let pos = self.skip_modifiers(scanner, start)?;
        let head = self.parse_type(scanner, pos)?;
        let mut pos = head.end;
        let mut records = Vec::new();

        // Ends the declaration, keeping the declarators already matched
        let finish = |records: Vec<VariableRecord>, next: usize| {
            (!records.is_empty()).then(|| Matched { records, next: next.max(start + 1) })
        };

        loop {
            pos = scanner.skip_trivia(pos);
            let mut declared_type = head.text.clone();
            if self.dialect.pointer_declarators {
                while let Some(b @ (b'*' | b'&')) = scanner.byte(pos) {
                    declared_type.push(b as char);
                    pos = scanner.skip_trivia(pos + 1);
                }
            }

            let Some((name, name_end)) = scanner.ident_at(pos) else {
                return finish(records, pos);
            };
            if self.is_reserved(name) {
                return finish(records, pos);
            }
            let at = lines.location(pos);
            let name_pos = pos;
            pos = scanner.skip_trivia(name_end);

            while scanner.byte(pos) == Some(b'[') {
                let Some(end) = scanner.group_end(pos, b'[', b']', limit) else {
                    return finish(records, pos);
                };
                declared_type.push_str(&scanner::collapse_whitespace(scanner.slice(pos, end)));
                pos = scanner.skip_trivia(end);
            }

            let kind_of = |value: &str| {
                if head.inferred {
                    infer_kind(value, CueFlavor::CLike)
                } else {
                    ValueKind::Declared(declared_type.clone())
                }
            };

            let (value, terminator) = match scanner.byte(pos) {
                Some(b'=') if scanner.is_lone_equals(pos) => {
                    let value_start = scanner.skip_trivia(pos + 1);
                    let scan = scanner.scan_value_until(value_start, DECLARATION_END, limit, |line| {
                        self.starts_declaration(scanner, line, indent)
                    });
                    match scan.stop {
                        Stop::Terminator(end) => {
                            (scanner::collapse_whitespace(&scanner.code_text(value_start, scan.end)), end)
                        }
                        Stop::Limit => {
                            tracing::warn!(
                                language = %self.dialect.tag,
                                variable = name,
                                offset = name_pos,
                                max_lookahead = limit,
                                "declaration exceeds lookahead, skipping"
                            );
                            return Some(Matched { records, next: scanner.line_end(name_pos) + 1 });
                        }
                        Stop::Unbalanced(end) => return Some(Matched { records, next: end }),
                        Stop::EndOfText => return finish(records, scanner.len()),
                    }
                }
                Some(b'{') if self.dialect.brace_init => {
                    let Some(end) = scanner.group_end(pos, b'{', b'}', limit) else {
                        return finish(records, pos + 1);
                    };
                    let after = scanner.skip_trivia(end);
                    if !matches!(scanner.byte(after), Some(b';' | b',')) {
                        return finish(records, pos + 1);
                    }
                    (scanner::collapse_whitespace(&scanner.code_text(pos, end)), after)
                }
                Some(b';' | b',') => (String::new(), pos),
                _ => return finish(records, pos),
            };

            if value.is_empty() && terminator != pos {
                return finish(records, terminator + 1);
            }
            let record = if value.is_empty() {
                let kind = if head.inferred {
                    ValueKind::Uninitialized
                } else {
                    ValueKind::Declared(declared_type.clone())
                };
                VariableRecord::new(name, NO_VALUE, kind, at)
            } else {
                let kind = kind_of(&value);
                VariableRecord::new(name, value, kind, at)
            };
            tracing::trace!(variable = name, kind = %record.kind, line = at.line, "declaration");
            records.push(record);

            if scanner.byte(terminator) == Some(b';') {
                return Some(Matched { records, next: terminator + 1 });
            }
            pos = terminator + 1;
        }
    }

    /// Whether the line at `line` opens a declaration indented at most `indent`
    fn starts_declaration(&self, scanner: &Scanner, line: usize, indent: usize) -> bool {
        let pos = scanner.skip_inline_space(line);
        if pos - line > indent {
            return false;
        }
        let Some(head) = self
            .skip_modifiers(scanner, pos)
            .and_then(|pos| self.parse_type(scanner, pos))
        else {
            return false;
        };
        let mut pos = scanner.skip_trivia(head.end);
        if self.dialect.pointer_declarators {
            while matches!(scanner.byte(pos), Some(b'*' | b'&')) {
                pos = scanner.skip_trivia(pos + 1);
            }
        }
        let Some((name, end)) = scanner.ident_at(pos) else {
            return false;
        };
        let next = scanner.skip_trivia(end);
        !self.is_reserved(name)
            && match scanner.byte(next) {
                Some(b'=') => scanner.is_lone_equals(next),
                Some(b';' | b',' | b'[') => true,
                Some(b'{') => self.dialect.brace_init,
                _ => false,
            }
    }

    /// Skip modifiers and annotations in front of a type
    fn skip_modifiers(&self, scanner: &Scanner, start: usize) -> Option<usize> {
        let mut pos = start;
        loop {
            if self.dialect.annotations && scanner.byte(pos) == Some(b'@') {
                let mut end = scanner.ident_end(pos + 1)?;
                while scanner.byte(end) == Some(b'.') {
                    end = scanner.ident_end(end + 1)?;
                }
                let after = scanner.skip_trivia(end);
                pos = match scanner.group_end(after, b'(', b')', self.options.max_lookahead) {
                    Some(close) => scanner.skip_trivia(close),
                    None => after,
                };
                continue;
            }
            match scanner.ident_at(pos) {
                Some((word, end)) if self.dialect.modifiers.contains(&word) => {
                    pos = scanner.skip_trivia(end);
                }
                _ => return Some(pos),
            }
        }
    }

    fn parse_type(&self, scanner: &Scanner, start: usize) -> Option<TypeHead> {
        let d = self.dialect;
        let (first, mut end) = scanner.ident_at(start)?;
        if d.keywords.contains(&first) {
            return None;
        }
        if d.inferred.contains(&first) {
            return Some(TypeHead { text: first.to_string(), inferred: true, end });
        }

        let mut text = first.to_string();
        let mut last = first;
        let mut qualified = false;

        // `unsigned long long`
        if d.primitives.contains(&first) {
            loop {
                let next = scanner.skip_trivia(end);
                match scanner.ident_at(next) {
                    Some((word, word_end)) if d.primitives.contains(&word) => {
                        text.push(' ');
                        text.push_str(word);
                        end = word_end;
                    }
                    _ => break,
                }
            }
        }

        loop {
            if scanner.byte(end) == Some(b'<') {
                let close = self.type_arguments_end(scanner, end)?;
                text.push_str(&scanner::collapse_whitespace(scanner.slice(end, close)));
                end = close;
                continue;
            }
            if scanner.starts_with(end, d.separator) {
                let (segment, segment_end) = scanner.ident_at(end + d.separator.len())?;
                text.push_str(d.separator);
                text.push_str(segment);
                last = segment;
                qualified = true;
                end = segment_end;
                continue;
            }
            break;
        }

        loop {
            let open = scanner.skip_trivia(end);
            if scanner.byte(open) != Some(b'[') {
                break;
            }
            let close = scanner.skip_trivia(open + 1);
            if scanner.byte(close) != Some(b']') {
                break;
            }
            text.push_str("[]");
            end = close + 1;
        }

        let accepted = d.primitives.contains(&first)
            || last.starts_with(|c: char| c.is_ascii_uppercase())
            || d.library_types.contains(&last)
            || (qualified && d.qualified_types)
            || d.alias_suffix.is_some_and(|suffix| last.ends_with(suffix));
        accepted.then_some(TypeHead { text, inferred: false, end })
    }

    /// End of a `<...>` type argument list, if the text there looks like one
    fn type_arguments_end(&self, scanner: &Scanner, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut pos = open;
        while pos - open <= self.options.max_lookahead {
            match scanner.byte(pos)? {
                b'<' => depth += 1,
                b'>' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(pos + 1);
                    }
                }
                b'&' if scanner.byte(pos + 1) == Some(b'&') => return None,
                b if is_ident_byte(b) || b.is_ascii_whitespace() || b",.:?*&[]".contains(&b) => {}
                _ => return None,
            }
            pos += 1;
        }
        None
    }

    /// Position after the next statement boundary
    fn next_statement_start(&self, scanner: &Scanner, start: usize) -> usize {
        let mut pos = start;
        while pos < scanner.len() {
            if let Some(end) = scanner.comment_end(pos).or_else(|| scanner.literal_end(pos)) {
                pos = end;
                continue;
            }
            match scanner.byte(pos) {
                Some(b';' | b'{' | b'}') => return pos + 1,
                Some(b':') if scanner.starts_with(pos, "::") => pos += 1,
                Some(b':') => return pos + 1,
                Some(b'(') if self.opens_header(scanner, pos) => return pos + 1,
                _ => {}
            }
            pos += 1;
        }
        scanner.len()
    }

    fn opens_header(&self, scanner: &Scanner, paren: usize) -> bool {
        let mut end = paren;
        while end > 0 && scanner.byte(end - 1).is_some_and(|b| b.is_ascii_whitespace()) {
            end -= 1;
        }
        let mut begin = end;
        while begin > 0 && scanner.byte(begin - 1).is_some_and(is_ident_byte) {
            begin -= 1;
        }
        self.dialect.headers.contains(&scanner.slice(begin, end))
    }
}

impl LanguageAdapter for TypedAdapter {
    fn language_name(&self) -> &str {
        self.dialect.name
    }

    fn languages(&self) -> &[LanguageTag] {
        std::slice::from_ref(&self.dialect.tag)
    }

    fn family(&self) -> AdapterFamily {
        AdapterFamily::Heuristic
    }

    fn extract(&self, text: &str) -> Result<Vec<VariableRecord>> {
        let scanner = Scanner::new(text, self.dialect.lexicon);
        let lines = LineIndex::new(text);
        let mut records = Vec::new();
        let mut pos = 0;

        loop {
            pos = scanner.skip_trivia(pos);
            if pos >= scanner.len() {
                break;
            }
            match self.match_declaration(&scanner, &lines, pos) {
                Some(matched) => {
                    records.extend(matched.records);
                    pos = matched.next;
                }
                None => pos = self.next_statement_start(&scanner, pos),
            }
        }

        variable::sort_by_position(&mut records);
        tracing::debug!(language = %self.dialect.tag, records = records.len(), "extracted declarations");
        Ok(records)
    }
}
