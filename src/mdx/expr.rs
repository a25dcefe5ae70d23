//! Expression AST - the node algebra of an MDX statement.
//!
//! Every set, tuple, function call and literal the converter produces is an
//! [`Expr`]. Calls carry a [`Syntax`] that decides how they are written out,
//! so `Members` on a level and `CrossJoin(a, b)` are the same node kind.

use std::fmt;

use serde::Serialize;

use super::name::{LevelRef, MemberRef, Name, Segment};
use super::token::{Token, TokenStream};

// =============================================================================
// Expression AST
// =============================================================================

/// An MDX expression.
///
/// Every variant must be handled in `to_tokens()` - the compiler enforces this.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Expr {
    /// Literal values
    Literal(Literal),

    /// Compound identifier that is not resolved against metadata: `[Measures].[Sales]`
    Identifier(Name),

    /// Reference to a dimension member
    Member(MemberRef),

    /// Reference to a hierarchy level
    Level(LevelRef),

    /// Function, property, operator or set constructor applied to arguments
    Call {
        name: String,
        syntax: Syntax,
        args: Vec<Expr>,
    },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    /// Bare keyword-like symbol, e.g. `ASC` or `POST`
    Symbol(String),
    String(String),
    Int(i64),
    Float(f64),
    Null,
}

/// How a call is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Syntax {
    /// `Name(arg, ...)`
    Function,
    /// `arg.Name`
    Property,
    /// `arg.Name(rest, ...)`
    Method,
    /// `{arg, ...}`
    Braces,
    /// `(arg, ...)`
    Parentheses,
    /// `(left Name right)`
    Infix,
    /// `Name arg`
    Prefix,
}

// =============================================================================
// Expression to Tokens
// =============================================================================

impl Expr {
    /// Convert this expression to a token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            Expr::Literal(lit) => {
                ts.push(match lit {
                    Literal::Symbol(s) => Token::Symbol(s.clone()),
                    Literal::String(s) => Token::LitString(s.clone()),
                    Literal::Int(n) => Token::LitInt(*n),
                    Literal::Float(f) => Token::LitFloat(*f),
                    Literal::Null => Token::Null,
                });
            }

            Expr::Identifier(name) => {
                ts.append(&name.to_tokens());
            }

            Expr::Member(member) => {
                ts.append(&member.to_tokens());
            }

            Expr::Level(level) => {
                ts.append(&level.to_tokens());
            }

            Expr::Call { name, syntax, args } => match syntax {
                Syntax::Function => {
                    ts.push(Token::FunctionName(name.clone()));
                    ts.lparen();
                    append_list(&mut ts, args);
                    ts.rparen();
                }
                Syntax::Property => {
                    if let Some(target) = args.first() {
                        ts.append(&target.to_tokens()).push(Token::Dot);
                    }
                    ts.push(Token::FunctionName(name.clone()));
                }
                Syntax::Method => {
                    if let Some(target) = args.first() {
                        ts.append(&target.to_tokens()).push(Token::Dot);
                    }
                    ts.push(Token::FunctionName(name.clone()));
                    ts.lparen();
                    append_list(&mut ts, args.get(1..).unwrap_or_default());
                    ts.rparen();
                }
                Syntax::Braces => {
                    ts.lbrace();
                    append_list(&mut ts, args);
                    ts.rbrace();
                }
                Syntax::Parentheses => {
                    ts.lparen();
                    append_list(&mut ts, args);
                    ts.rparen();
                }
                Syntax::Infix => {
                    ts.lparen();
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            ts.space().push(Token::FunctionName(name.clone())).space();
                        }
                        ts.append(&arg.to_tokens());
                    }
                    ts.rparen();
                }
                Syntax::Prefix => {
                    let mut operand = TokenStream::new();
                    append_list(&mut operand, args);
                    ts.push(Token::FunctionName(name.clone()));
                    // `--` opens a line comment.
                    if name.chars().all(char::is_alphabetic)
                        || (name.ends_with('-') && operand.serialize().starts_with('-'))
                    {
                        ts.space();
                    }
                    ts.append(&operand);
                }
            },
        }

        ts
    }

    /// Generate MDX text for this expression.
    pub fn to_mdx(&self) -> String {
        self.to_tokens().serialize()
    }

    /// True for a bare member reference, which is not a valid set operand.
    pub fn is_member(&self) -> bool {
        matches!(self, Expr::Member(_))
    }

    /// Wrap a bare member in a singleton set; any other expression is returned as-is.
    pub fn into_set_operand(self) -> Expr {
        if self.is_member() {
            set(vec![self])
        } else {
            self
        }
    }

    /// The call name and arguments if this is a call with the given syntax.
    pub fn as_call(&self, syntax: Syntax) -> Option<(&str, &[Expr])> {
        match self {
            Expr::Call {
                name,
                syntax: s,
                args,
            } if *s == syntax => Some((name.as_str(), args.as_slice())),
            _ => None,
        }
    }
}

fn append_list(ts: &mut TokenStream, args: &[Expr]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            ts.comma().space();
        }
        ts.append(&arg.to_tokens());
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_mdx())
    }
}

impl From<MemberRef> for Expr {
    fn from(member: MemberRef) -> Self {
        Expr::Member(member)
    }
}

impl From<LevelRef> for Expr {
    fn from(level: LevelRef) -> Self {
        Expr::Level(level)
    }
}

// =============================================================================
// Expression Constructors
// =============================================================================

/// Generic call node.
pub fn call(name: &str, syntax: Syntax, args: Vec<Expr>) -> Expr {
    Expr::Call {
        name: name.into(),
        syntax,
        args,
    }
}

/// Function call: `name(args...)`.
pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    call(name, Syntax::Function, args)
}

/// Property access: `target.name`.
pub fn property(target: Expr, name: &str) -> Expr {
    call(name, Syntax::Property, vec![target])
}

/// Method call: `target.name(args...)`.
pub fn method(target: Expr, name: &str, args: Vec<Expr>) -> Expr {
    let mut all = Vec::with_capacity(args.len() + 1);
    all.push(target);
    all.extend(args);
    call(name, Syntax::Method, all)
}

/// Set constructor: `{a, b, ...}`.
pub fn set(members: Vec<Expr>) -> Expr {
    call("{}", Syntax::Braces, members)
}

/// The empty set `{}`.
pub fn empty_set() -> Expr {
    set(vec![])
}

/// Tuple or parenthesised expression: `(a, b, ...)`.
pub fn tuple(members: Vec<Expr>) -> Expr {
    call("()", Syntax::Parentheses, members)
}

/// Binary operator: `(left op right)`.
pub fn infix(op: &str, left: Expr, right: Expr) -> Expr {
    call(op, Syntax::Infix, vec![left, right])
}

/// Unary operator: `op operand`.
pub fn prefix(op: &str, operand: Expr) -> Expr {
    call(op, Syntax::Prefix, vec![operand])
}

/// Unquoted symbol literal.
pub fn symbol(s: &str) -> Expr {
    Expr::Literal(Literal::Symbol(s.into()))
}

/// Create a string literal.
pub fn lit_str(s: &str) -> Expr {
    Expr::Literal(Literal::String(s.into()))
}

/// Create an integer literal.
pub fn lit_int(n: i64) -> Expr {
    Expr::Literal(Literal::Int(n))
}

/// Create a float literal.
pub fn lit_float(f: f64) -> Expr {
    Expr::Literal(Literal::Float(f))
}

/// Compound identifier from segments.
pub fn ident<I, S>(segments: I) -> Expr
where
    I: IntoIterator<Item = S>,
    S: Into<Segment>,
{
    Expr::Identifier(Name::new(segments))
}
