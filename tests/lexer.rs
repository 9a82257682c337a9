//! Tests for the lexer
//!
//! These tests verify that the lexer tokenizes declaration-file source.

use tern_dts::lexer::{Lexer, Span, TokenKind};
use tern_dts::{Atom, AtomTable};

/// Helper to create an Atom from &str in tests
fn s(value: &str) -> Atom {
    Atom::from(value)
}

fn lex(source: &str) -> Vec<TokenKind> {
    let mut atoms = AtomTable::new();
    let mut lexer = Lexer::new(source, &mut atoms);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            break;
        }
        tokens.push(token.kind);
    }
    tokens
}

fn spans(source: &str) -> Vec<Span> {
    let mut atoms = AtomTable::new();
    let mut lexer = Lexer::new(source, &mut atoms);
    let mut spans = vec![];
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            break;
        }
        spans.push(token.span);
    }
    spans
}

#[test]
fn test_keywords() {
    assert_eq!(
        lex("declare namespace module interface class enum type export import"),
        vec![
            TokenKind::Declare,
            TokenKind::Namespace,
            TokenKind::Module,
            TokenKind::Interface,
            TokenKind::Class,
            TokenKind::Enum,
            TokenKind::Type,
            TokenKind::Export,
            TokenKind::Import,
        ]
    );
    assert_eq!(
        lex("public private protected static readonly abstract keyof typeof"),
        vec![
            TokenKind::Public,
            TokenKind::Private,
            TokenKind::Protected,
            TokenKind::Static,
            TokenKind::Readonly,
            TokenKind::Abstract,
            TokenKind::Keyof,
            TokenKind::Typeof,
        ]
    );
}

#[test]
fn test_contextual_words_are_identifiers() {
    assert_eq!(
        lex("string number boolean global constructor get set from as is"),
        vec![
            TokenKind::Identifier(s("string")),
            TokenKind::Identifier(s("number")),
            TokenKind::Identifier(s("boolean")),
            TokenKind::Identifier(s("global")),
            TokenKind::Identifier(s("constructor")),
            TokenKind::Identifier(s("get")),
            TokenKind::Identifier(s("set")),
            TokenKind::Identifier(s("from")),
            TokenKind::Identifier(s("as")),
            TokenKind::Identifier(s("is")),
        ]
    );
}

#[test]
fn test_identifiers() {
    assert_eq!(
        lex("$ _private jQuery$ café"),
        vec![
            TokenKind::Identifier(s("$")),
            TokenKind::Identifier(s("_private")),
            TokenKind::Identifier(s("jQuery$")),
            TokenKind::Identifier(s("café")),
        ]
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        lex("true false null 42 'x'"),
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::Number(s("42")),
            TokenKind::String(s("x")),
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(lex(r#""a\nb""#), vec![TokenKind::String(s("a\nb"))]);
    assert_eq!(lex(r#""A\u{1F600}""#), vec![TokenKind::String(s("A\u{1F600}"))]);
    assert_eq!(lex(r#""\x41""#), vec![TokenKind::String(s("A"))]);
}

#[test]
fn test_unterminated_string_stops_at_line_end() {
    assert_eq!(
        lex("\"abc\nx"),
        vec![TokenKind::String(s("abc")), TokenKind::Identifier(s("x"))]
    );
}

#[test]
fn test_punctuation() {
    assert_eq!(
        lex("( ) { } [ ] . ... , : ; ? => = < > | & * - ! @"),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Dot,
            TokenKind::DotDotDot,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Question,
            TokenKind::Arrow,
            TokenKind::Eq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Pipe,
            TokenKind::Amp,
            TokenKind::Star,
            TokenKind::Minus,
            TokenKind::Bang,
            TokenKind::At,
        ]
    );
}

#[test]
fn test_nested_generics_close_separately() {
    assert_eq!(
        lex("A<B<C>>"),
        vec![
            TokenKind::Identifier(s("A")),
            TokenKind::Lt,
            TokenKind::Identifier(s("B")),
            TokenKind::Lt,
            TokenKind::Identifier(s("C")),
            TokenKind::Gt,
            TokenKind::Gt,
        ]
    );
}

#[test]
fn test_template_literals() {
    assert_eq!(
        lex("`on${string}` x"),
        vec![
            TokenKind::Template(s("`on${string}`")),
            TokenKind::Identifier(s("x")),
        ]
    );
    assert_eq!(
        lex(r"`a\`b` `${ { x: `in${y}` } }`"),
        vec![
            TokenKind::Template(s(r"`a\`b`")),
            TokenKind::Template(s("`${ { x: `in${y}` } }`")),
        ]
    );
}

#[test]
fn test_private_names() {
    assert_eq!(
        lex("#count; # x"),
        vec![
            TokenKind::PrivateName(s("#count")),
            TokenKind::Semicolon,
            TokenKind::Invalid('#'),
            TokenKind::Identifier(s("x")),
        ]
    );
}

#[test]
fn test_unknown_characters_are_invalid() {
    assert_eq!(
        lex("a + b"),
        vec![
            TokenKind::Identifier(s("a")),
            TokenKind::Invalid('+'),
            TokenKind::Identifier(s("b")),
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        lex("/** docs */ declare // trailing\n/* block */ var"),
        vec![TokenKind::Declare, TokenKind::Var]
    );
}

#[test]
fn test_spans_track_lines_and_columns() {
    assert_eq!(
        spans("declare\n  var x;"),
        vec![
            Span::new(0, 7, 1, 1),
            Span::new(10, 13, 2, 3),
            Span::new(14, 15, 2, 7),
            Span::new(15, 16, 2, 8),
        ]
    );
}

#[test]
fn test_eof_is_sticky() {
    let mut atoms = AtomTable::new();
    let mut lexer = Lexer::new("x", &mut atoms);
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier(s("x")));
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_identifiers_are_interned() {
    let mut atoms = AtomTable::new();
    let mut lexer = Lexer::new("foo foo bar", &mut atoms);
    while lexer.next_token().kind != TokenKind::Eof {}
    assert_eq!(atoms.len(), 2);
    assert!(atoms.get("foo").is_some());
}
