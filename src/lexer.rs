//! Lexer for TypeScript declaration files
//!
//! Converts source text into a stream of tokens. Only the token set that can
//! appear in a `.d.ts` file is distinguished; any other punctuation is handed
//! to the parser as `Invalid` and rejected there (or skipped inside
//! initializers the translator never looks at).

use std::iter::Peekable;
use std::str::CharIndices;

use crate::atom::{Atom, AtomTable};

/// Source span information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Token types for declaration files
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, kept as written (`0xff`, `1e3`, `42`)
    Number(Atom),
    /// String literal with escapes resolved and quotes removed
    String(Atom),
    /// Template literal, raw text including the backticks
    Template(Atom),
    True,
    False,
    Null,

    Identifier(Atom),
    /// Class private name, including the leading `#`
    PrivateName(Atom),

    // JavaScript keywords
    Function,
    Var,
    Let,
    Const,
    Class,
    Extends,
    Implements,
    Static,
    Import,
    Export,
    Typeof,
    Void,
    New,
    This,
    Default,

    // TypeScript keywords
    Type,
    Interface,
    Enum,
    Namespace,
    Module,
    Declare,
    Abstract,
    Readonly,
    Public,
    Private,
    Protected,
    Keyof,
    Any,

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Dot,       // .
    DotDotDot, // ...
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;
    Question,  // ?
    Arrow,     // =>
    Eq,        // =
    Lt,        // <
    Gt,        // >
    Pipe,      // |
    Amp,       // &
    Star,      // *
    Minus,     // -
    Bang,      // !
    At,        // @

    // Special
    Eof,
    Invalid(char),
}

impl TokenKind {
    /// Source text of a reserved word, so it can double as a property name.
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Function => "function",
            TokenKind::Var => "var",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::Class => "class",
            TokenKind::Extends => "extends",
            TokenKind::Implements => "implements",
            TokenKind::Static => "static",
            TokenKind::Import => "import",
            TokenKind::Export => "export",
            TokenKind::Typeof => "typeof",
            TokenKind::Void => "void",
            TokenKind::New => "new",
            TokenKind::This => "this",
            TokenKind::Default => "default",
            TokenKind::Type => "type",
            TokenKind::Interface => "interface",
            TokenKind::Enum => "enum",
            TokenKind::Namespace => "namespace",
            TokenKind::Module => "module",
            TokenKind::Declare => "declare",
            TokenKind::Abstract => "abstract",
            TokenKind::Readonly => "readonly",
            TokenKind::Public => "public",
            TokenKind::Private => "private",
            TokenKind::Protected => "protected",
            TokenKind::Keyof => "keyof",
            TokenKind::Any => "any",
            _ => return None,
        };
        Some(text)
    }
}

/// A token with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: u32, column: u32) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

/// Lexer state checkpoint for backtracking
#[derive(Clone)]
pub struct LexerCheckpoint {
    current_pos: usize,
    line: u32,
    column: u32,
    saw_newline: bool,
}

/// Lexer for tokenizing declaration-file source
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    /// Offset of `chars` within `source` (non-zero after a restore)
    chars_base_offset: usize,
    current_pos: usize,
    line: u32,
    column: u32,
    start_pos: usize,
    start_line: u32,
    start_column: u32,
    /// Set when a line terminator preceded the current token (for ASI)
    saw_newline: bool,
    atoms: &'a mut AtomTable,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, atoms: &'a mut AtomTable) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            chars_base_offset: 0,
            current_pos: 0,
            line: 1,
            column: 1,
            start_pos: 0,
            start_line: 1,
            start_column: 1,
            saw_newline: false,
            atoms,
        }
    }

    pub fn atoms(&mut self) -> &mut AtomTable {
        self.atoms
    }

    /// Create a checkpoint of the current lexer state for backtracking
    pub fn checkpoint(&self) -> LexerCheckpoint {
        LexerCheckpoint {
            current_pos: self.current_pos,
            line: self.line,
            column: self.column,
            saw_newline: self.saw_newline,
        }
    }

    /// Restore the lexer state from a checkpoint
    pub fn restore(&mut self, checkpoint: LexerCheckpoint) {
        self.current_pos = checkpoint.current_pos;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
        self.saw_newline = checkpoint.saw_newline;
        self.chars_base_offset = checkpoint.current_pos;
        self.chars = self
            .source
            .get(checkpoint.current_pos..)
            .unwrap_or("")
            .char_indices()
            .peekable();
    }

    /// Get the next token from the source
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.start_pos = self.current_pos;
        self.start_line = self.line;
        self.start_column = self.column;

        let Some((_pos, ch)) = self.advance() else {
            return Token::eof(self.current_pos, self.line, self.column);
        };

        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '?' => TokenKind::Question,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '|' => TokenKind::Pipe,
            '&' => TokenKind::Amp,
            '*' => TokenKind::Star,
            '-' => TokenKind::Minus,
            '!' => TokenKind::Bang,
            '@' => TokenKind::At,

            '.' => self.scan_dot(),
            '=' => {
                if self.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Eq
                }
            }

            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.skip_template();
                self.raw_token(TokenKind::Template)
            }

            '#' if self.peek().is_some_and(is_id_start) => {
                while self.peek().is_some_and(is_id_continue) {
                    self.advance();
                }
                self.raw_token(TokenKind::PrivateName)
            }

            '0'..='9' => self.scan_number(),

            c if is_id_start(c) => self.scan_identifier(c),

            c => TokenKind::Invalid(c),
        };

        Token::new(kind, self.make_span())
    }

    /// Check if there was a newline before the current token
    pub fn had_newline_before(&self) -> bool {
        self.saw_newline
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = self.chars_base_offset + pos + ch.len_utf8();
            if is_line_terminator(ch) {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_next(&self) -> Option<char> {
        let slice = self.source.get(self.current_pos..)?;
        let mut iter = slice.chars();
        iter.next();
        iter.next()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn make_span(&self) -> Span {
        Span::new(
            self.start_pos,
            self.current_pos,
            self.start_line,
            self.start_column,
        )
    }

    fn skip_whitespace_and_comments(&mut self) {
        self.saw_newline = false;

        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}') => {
                    self.advance();
                }
                Some(ch) if is_line_terminator(ch) => {
                    self.saw_newline = true;
                    self.advance();
                }
                Some('/') => match self.peek_next() {
                    // `///` reference directives are plain line comments here
                    Some('/') => {
                        self.advance();
                        self.advance();
                        while let Some(ch) = self.peek() {
                            if is_line_terminator(ch) {
                                break;
                            }
                            self.advance();
                        }
                    }
                    Some('*') => {
                        self.advance();
                        self.advance();
                        loop {
                            match self.advance() {
                                Some((_, '*')) if self.peek() == Some('/') => {
                                    self.advance();
                                    break;
                                }
                                Some((_, ch)) if is_line_terminator(ch) => {
                                    self.saw_newline = true;
                                }
                                Some(_) => {}
                                None => break,
                            }
                        }
                    }
                    _ => break,
                },
                _ => break,
            }
        }
    }

    fn scan_dot(&mut self) -> TokenKind {
        if self.peek() == Some('.') && self.peek_next() == Some('.') {
            self.advance();
            self.advance();
            TokenKind::DotDotDot
        } else if matches!(self.peek(), Some('0'..='9')) {
            self.scan_number()
        } else {
            TokenKind::Dot
        }
    }

    fn scan_string(&mut self, quote: char) -> TokenKind {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some((_, c)) if c == quote => break,
                Some((_, '\\')) => match self.advance() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'b')) => value.push('\x08'),
                    Some((_, 'f')) => value.push('\x0C'),
                    Some((_, 'v')) => value.push('\x0B'),
                    Some((_, '0')) => value.push('\0'),
                    Some((_, 'x')) => {
                        if let Some(ch) = self.scan_hex_escape(2).and_then(char::from_u32) {
                            value.push(ch);
                        }
                    }
                    Some((_, 'u')) => {
                        if let Some(ch) = self.scan_unicode_escape() {
                            value.push(ch);
                        }
                    }
                    // Line continuation
                    Some((_, ch)) if is_line_terminator(ch) => {}
                    Some((_, c)) => value.push(c),
                    None => break,
                },
                // Unterminated string
                Some((_, ch)) if is_line_terminator(ch) => break,
                Some((_, c)) => value.push(c),
                None => break,
            }
        }

        TokenKind::String(self.atoms.get_or_insert(&value))
    }

    /// Skip to the closing backtick, positioned just after the opening one.
    /// Substitutions may nest braces and further templates.
    fn skip_template(&mut self) {
        let mut depth = 0usize;
        while let Some((_, ch)) = self.advance() {
            match ch {
                '\\' => {
                    self.advance();
                }
                '`' if depth == 0 => return,
                '`' => self.skip_template(),
                '$' if self.peek() == Some('{') => {
                    self.advance();
                    depth += 1;
                }
                '{' if depth > 0 => depth += 1,
                '}' if depth > 0 => depth -= 1,
                _ => {}
            }
        }
    }

    /// Token carrying the source text scanned so far
    fn raw_token(&mut self, kind: fn(Atom) -> TokenKind) -> TokenKind {
        let text = self
            .source
            .get(self.start_pos..self.current_pos)
            .unwrap_or("")
            .to_string();
        kind(self.atoms.get_or_insert(&text))
    }

    fn scan_hex_escape(&mut self, count: usize) -> Option<u32> {
        let mut hex_str = String::new();
        for _ in 0..count {
            match self.peek() {
                Some(ch) if ch.is_ascii_hexdigit() => {
                    hex_str.push(ch);
                    self.advance();
                }
                _ => return None,
            }
        }
        u32::from_str_radix(&hex_str, 16).ok()
    }

    /// `\uNNNN` or `\u{N...}`, positioned just after the `u`
    fn scan_unicode_escape(&mut self) -> Option<char> {
        if !self.match_char('{') {
            return self.scan_hex_escape(4).and_then(char::from_u32);
        }
        let mut hex_str = String::new();
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '}' {
                break;
            }
            hex_str.push(ch);
        }
        u32::from_str_radix(&hex_str, 16)
            .ok()
            .and_then(char::from_u32)
    }

    /// Numbers are only ever echoed back as text, so the literal is kept
    /// verbatim instead of being converted to a value.
    fn scan_number(&mut self) -> TokenKind {
        let mut prev = '0';
        let mut seen_dot = self
            .source
            .get(self.start_pos..self.current_pos)
            .is_some_and(|s| s.starts_with('.'));
        let is_hex = self.peek().is_some_and(|c| c == 'x' || c == 'X');

        while let Some(ch) = self.peek() {
            let accept = if ch.is_ascii_alphanumeric() || ch == '_' {
                true
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                (ch == '+' || ch == '-') && !is_hex && (prev == 'e' || prev == 'E')
            };
            if !accept {
                break;
            }
            prev = ch;
            self.advance();
        }

        let text = self
            .source
            .get(self.start_pos..self.current_pos)
            .unwrap_or("0")
            .to_string();
        TokenKind::Number(self.atoms.get_or_insert(&text))
    }

    fn scan_identifier(&mut self, first: char) -> TokenKind {
        let mut name = String::new();
        name.push(first);

        while let Some(ch) = self.peek() {
            if is_id_continue(ch) {
                name.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match name.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,

            "function" => TokenKind::Function,
            "var" => TokenKind::Var,
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "class" => TokenKind::Class,
            "extends" => TokenKind::Extends,
            "implements" => TokenKind::Implements,
            "static" => TokenKind::Static,
            "import" => TokenKind::Import,
            "export" => TokenKind::Export,
            "typeof" => TokenKind::Typeof,
            "void" => TokenKind::Void,
            "new" => TokenKind::New,
            "this" => TokenKind::This,
            "default" => TokenKind::Default,

            "type" => TokenKind::Type,
            "interface" => TokenKind::Interface,
            "enum" => TokenKind::Enum,
            "namespace" => TokenKind::Namespace,
            "module" => TokenKind::Module,
            "declare" => TokenKind::Declare,
            "abstract" => TokenKind::Abstract,
            "readonly" => TokenKind::Readonly,
            "public" => TokenKind::Public,
            "private" => TokenKind::Private,
            "protected" => TokenKind::Protected,
            "keyof" => TokenKind::Keyof,
            "any" => TokenKind::Any,

            _ => TokenKind::Identifier(self.atoms.get_or_insert(&name)),
        }
    }
}

/// ECMAScript line terminators: LF, LS (U+2028), PS (U+2029)
fn is_line_terminator(ch: char) -> bool {
    ch == '\n' || ch == '\u{2028}' || ch == '\u{2029}'
}

/// Check if a character can start an identifier
fn is_id_start(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_xid::UnicodeXID::is_xid_start(ch)
}

/// Check if a character can continue an identifier
fn is_id_continue(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_xid::UnicodeXID::is_xid_continue(ch)
}
