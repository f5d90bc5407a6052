//! Tokens produced by the SDL lexer.

/// A half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Bang,
    Dollar,
    Eq,

    // Literals and names
    Name,
    Int,
    String,

    // Errors and end of input
    Unknown,
    UnterminatedString,
    Eof,
}

impl TokenKind {
    /// Human-readable description used in parse errors.
    pub fn describe(self) -> &'static str {
        match self {
            Self::LBrace => "`{`",
            Self::RBrace => "`}`",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::LBracket => "`[`",
            Self::RBracket => "`]`",
            Self::Colon => "`:`",
            Self::Bang => "`!`",
            Self::Dollar => "`$`",
            Self::Eq => "`=`",
            Self::Name => "a name",
            Self::Int => "an integer",
            Self::String => "a string",
            Self::Unknown => "an unknown character",
            Self::UnterminatedString => "an unterminated string",
            Self::Eof => "end of input",
        }
    }
}

/// A single token with its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
