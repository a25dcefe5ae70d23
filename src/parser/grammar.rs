//! Grammar for MDX value and set expressions using chumsky.
//!
//! Operator precedence, loosest first: `OR`/`XOR`, `AND`, comparison,
//! `+`/`-`, `*`/`/`, `:` (range), prefix `-`/`NOT`, then `.` navigation.

use chumsky::prelude::*;

use crate::mdx::expr::{
    func, infix, lit_float, lit_int, method, prefix, property, set, tuple, Expr, Literal, Syntax,
};
use crate::mdx::name::{Name, Segment};
use crate::mdx::token::{is_navigation, Token};

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// One dotted step as written.
#[derive(Debug, Clone)]
enum Part {
    Bare(String),
    Quoted(String),
    Key(String),
}

impl Part {
    fn into_segment(self) -> Segment {
        match self {
            Part::Bare(s) | Part::Quoted(s) => Segment::Name(s),
            Part::Key(key) => Segment::Key { key },
        }
    }

    /// Text used when the step becomes a call name.
    fn written(&self) -> String {
        match self {
            Part::Bare(s) | Part::Quoted(s) => s.clone(),
            Part::Key(key) => Token::KeyIdent(key.clone()).serialize(),
        }
    }
}

/// Apply one `.segment` or `.segment(args)` step to the expression on its left.
fn navigate(target: Expr, part: Part, args: Option<Vec<Expr>>) -> Expr {
    if let Some(args) = args {
        return method(target, &part.written(), args);
    }
    match (target, part) {
        (target, Part::Bare(name)) if is_navigation(&name) => property(target, &name),
        (Expr::Identifier(name), part) => Expr::Identifier(name.child(part.into_segment())),
        (target, part) => property(target, &part.written()),
    }
}

/// Case-insensitive keyword.
fn keyword<'src>(
    word: &'static str,
) -> impl Parser<'src, &'src str, &'static str, Extra<'src>> + Clone {
    text::ident()
        .filter(move |s: &&str| s.eq_ignore_ascii_case(word))
        .to(word)
        .padded()
}

/// Quoted string literal with the quote character doubled as its escape.
fn quoted_string<'src>(
    quote: char,
) -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    let escaped = match quote {
        '\'' => "''",
        _ => "\"\"",
    };
    just(quote)
        .ignore_then(
            choice((just(escaped).to(quote), none_of(quote)))
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just(quote))
}

/// Create the expression parser.
pub fn expression<'src>() -> impl Parser<'src, &'src str, Expr, Extra<'src>> {
    recursive(|expr| {
        let bracketed = just('[')
            .ignore_then(
                choice((just("]]").to(']'), none_of(']')))
                    .repeated()
                    .collect::<String>(),
            )
            .then_ignore(just(']'));
        let key = just('&').ignore_then(bracketed.clone()).map(Part::Key);
        let quoted = bracketed.map(Part::Quoted);
        let bare = text::ident().map(|s: &str| Part::Bare(s.to_string()));
        let segment = choice((key, quoted, bare));

        let list = expr
            .clone()
            .separated_by(just(',').padded())
            .collect::<Vec<_>>();
        let call_args = list
            .clone()
            .delimited_by(just('(').padded(), just(')').padded());

        // 12, 1.5, .5, 1e5, 2.5E-3
        let exponent = one_of("eE")
            .then(one_of("+-").or_not())
            .then(text::digits(10));
        let number = choice((
            text::digits(10)
                .then(just('.').then(text::digits(10)).or_not())
                .ignored(),
            just('.').then(text::digits(10)).ignored(),
        ))
        .then(exponent.or_not())
        .to_slice()
        .try_map(|s: &str, span| {
            if s.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
                match s.parse::<f64>() {
                    Ok(f) if f.is_finite() => Ok(lit_float(f)),
                    Ok(_) => Err(Rich::custom(span, "numeric literal out of range")),
                    Err(e) => Err(Rich::custom(span, e)),
                }
            } else {
                s.parse::<i64>()
                    .map(lit_int)
                    .map_err(|e| Rich::custom(span, e))
            }
        });

        let string = quoted_string('"')
            .or(quoted_string('\''))
            .map(|s| Expr::Literal(Literal::String(s)));

        let function = text::ident()
            .then(call_args.clone())
            .map(|(name, args): (&str, Vec<Expr>)| func(name, args));

        let braces = list
            .clone()
            .delimited_by(just('{').padded(), just('}').padded())
            .map(set);

        // A parenthesised operator expression is grouping, not a one-element tuple.
        let parens = list
            .delimited_by(just('(').padded(), just(')').padded())
            .map(|items: Vec<Expr>| match <[Expr; 1]>::try_from(items) {
                Ok([inner]) if inner.as_call(Syntax::Infix).is_some() => inner,
                Ok([inner]) => tuple(vec![inner]),
                Err(items) => tuple(items),
            });

        let name = segment
            .clone()
            .map(|part: Part| Expr::Identifier(Name::new([part.into_segment()])));

        let atom = choice((number, string, braces, parens, function, name)).padded();

        let postfix = atom
            .foldl(
                just('.')
                    .ignore_then(segment)
                    .then(call_args.or_not())
                    .repeated(),
                |target, (part, args)| navigate(target, part, args),
            )
            .padded()
            .boxed();

        let unary = choice((just('-').padded().to("-"), keyword("NOT")))
            .repeated()
            .foldr(postfix, |op, operand| prefix(op, operand))
            .boxed();

        let range = unary.clone().foldl(
            just(':').padded().to(":").then(unary).repeated(),
            |l, (op, r)| infix(op, l, r),
        );

        let product = range.clone().foldl(
            choice((just('*').to("*"), just('/').to("/")))
                .padded()
                .then(range)
                .repeated(),
            |l, (op, r)| infix(op, l, r),
        );

        let sum = product
            .clone()
            .foldl(
                choice((just('+').to("+"), just('-').to("-")))
                    .padded()
                    .then(product)
                    .repeated(),
                |l, (op, r)| infix(op, l, r),
            )
            .boxed();

        let comparison_op = choice((
            just("<>").to("<>"),
            just("<=").to("<="),
            just(">=").to(">="),
            just('=').to("="),
            just('<').to("<"),
            just('>').to(">"),
        ))
        .padded();

        let comparison = sum.clone().foldl(
            comparison_op.then(sum).repeated(),
            |l, (op, r)| infix(op, l, r),
        );

        let conjunction = comparison.clone().foldl(
            keyword("AND").then(comparison).repeated(),
            |l, (op, r)| infix(op, l, r),
        );

        conjunction.clone().foldl(
            choice((keyword("OR"), keyword("XOR")))
                .then(conjunction)
                .repeated(),
            |l, (op, r)| infix(op, l, r),
        )
    })
}

/// The expression parser anchored to the whole input.
pub fn parser<'src>() -> impl Parser<'src, &'src str, Expr, Extra<'src>> {
    expression().padded().then_ignore(end())
}
