//! MDX Tokens - the atomic units of MDX output.
//!
//! Every node of the statement tree renders into a [`TokenStream`], which is
//! serialized to text in one place so quoting rules live here and nowhere else.

use std::sync::LazyLock;

use regex::Regex;

/// Names matching this pattern may be written without brackets.
static BARE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Words that must always be bracketed when used as a name segment.
const RESERVED: &[&str] = &[
    "AND", "AS", "BY", "CASE", "CELL", "COLUMNS", "CHAPTERS", "ELSE", "EMPTY", "END", "FROM", "IS",
    "MEMBER", "NON", "NOT", "NULL", "ON", "OR", "PAGES", "PROPERTIES", "ROWS", "SECTIONS", "SELECT",
    "SET", "THEN", "WHEN", "WHERE", "WITH", "XOR",
];

/// Words that navigate from an expression when they follow a dot.
const NAVIGATION: &[&str] = &[
    "AllMembers",
    "Caption",
    "Children",
    "CurrentMember",
    "DefaultMember",
    "Dimension",
    "FirstChild",
    "FirstSibling",
    "Hierarchy",
    "LastChild",
    "LastSibling",
    "Level",
    "Members",
    "Name",
    "NextMember",
    "Ordinal",
    "Parent",
    "PrevMember",
    "Siblings",
    "UniqueName",
    "Value",
];

/// True when `name` is read as navigation after a dot, e.g. `.Children`.
pub fn is_navigation(name: &str) -> bool {
    NAVIGATION.iter().any(|p| p.eq_ignore_ascii_case(name))
}

/// MDX Token - every possible element in an MDX statement.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    With,
    Set,
    As,
    Select,
    NonEmpty,
    On,
    From,
    Where,
    CellProperties,
    DimensionProperties,
    Null,

    // === Punctuation ===
    Comma,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // === Whitespace / Formatting ===
    Space,
    Newline,

    // === Dynamic Content ===
    /// One segment of a compound name; bracketed only when required.
    Ident(String),
    /// Name segment that is always bracketed
    QuotedIdent(String),
    /// Member key segment: `&[key]`
    KeyIdent(String),
    /// Integer literal
    LitInt(i64),
    /// Float literal
    LitFloat(f64),
    /// String literal
    LitString(String),
    /// Unquoted symbol such as `ASC` or `POST`
    Symbol(String),
    /// Function, property or operator name, rendered as given
    FunctionName(String),
}

impl Token {
    /// Serialize this token to MDX text.
    pub fn serialize(&self) -> String {
        match self {
            // Keywords
            Token::With => "WITH".into(),
            Token::Set => "SET".into(),
            Token::As => "AS".into(),
            Token::Select => "SELECT".into(),
            Token::NonEmpty => "NON EMPTY".into(),
            Token::On => "ON".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::CellProperties => "CELL PROPERTIES".into(),
            Token::DimensionProperties => "DIMENSION PROPERTIES".into(),
            Token::Null => "NULL".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::LBrace => "{".into(),
            Token::RBrace => "}".into(),

            // Whitespace
            Token::Space => " ".into(),
            Token::Newline => "\n".into(),

            Token::Ident(name) => quote_identifier(name),
            Token::QuotedIdent(name) => bracket(name),
            Token::KeyIdent(key) => format!("&{}", bracket(key)),
            Token::LitInt(n) => n.to_string(),
            Token::LitFloat(f) => {
                if f.is_nan() {
                    panic!("Cannot serialize NaN to MDX")
                }
                if f.is_infinite() {
                    panic!("Cannot serialize Infinity to MDX")
                }
                let mut buffer = ryu::Buffer::new();
                buffer.format(*f).to_string()
            }
            Token::LitString(s) => format!("\"{}\"", s.replace('"', "\"\"")),
            Token::Symbol(s) => s.clone(),
            Token::FunctionName(name) => name.clone(),
        }
    }
}

/// Render a name segment, bracketing it unless it is a plain, non-reserved word.
pub fn quote_identifier(name: &str) -> String {
    let reserved = RESERVED.iter().any(|kw| kw.eq_ignore_ascii_case(name));
    if BARE_IDENT.is_match(name) && !reserved {
        name.to_string()
    } else {
        bracket(name)
    }
}

fn bracket(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// A stream of tokens that can be serialized to MDX.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Append a dotted name built from the given segment tokens.
    pub fn dotted(&mut self, segments: impl IntoIterator<Item = Token>) -> &mut Self {
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                self.push(Token::Dot);
            }
            self.push(segment);
        }
        self
    }

    /// Serialize all tokens to an MDX string.
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(Token::serialize).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
    pub fn lbrace(&mut self) -> &mut Self {
        self.push(Token::LBrace)
    }
    pub fn rbrace(&mut self) -> &mut Self {
        self.push(Token::RBrace)
    }
}
