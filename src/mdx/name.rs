//! Compound names and the opaque metadata references carried through the tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::token::{is_navigation, Token, TokenStream};

/// One segment of a compound name.
///
/// In model files a name segment is a plain string and a key segment is
/// `{ key = "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// `Drink` or `[San Francisco]`
    Name(String),
    /// Member key: `&[2024]`
    Key { key: String },
}

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key { key: key.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Segment::Name(s) | Segment::Key { key: s } => s,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Segment::Key { .. })
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Name(s)
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Name(s.to_string())
    }
}

impl From<&String> for Segment {
    fn from(s: &String) -> Self {
        Segment::Name(s.clone())
    }
}

impl PartialEq<&str> for Segment {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Segment::Name(s) if s == other)
    }
}

/// A compound name: an ordered list of segments such as `[Time].[2024].[Q1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(Vec<Segment>);

impl Name {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// A single-segment name.
    pub fn simple(name: impl Into<String>) -> Self {
        Self(vec![Segment::Name(name.into())])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(Segment::text)
    }

    /// Return a new name with `segment` appended.
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Segments after the first that spell a navigation word such as
    /// `Children` are always bracketed, so `[Product].[Children]` stays a member.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.dotted(self.0.iter().enumerate().map(|(i, segment)| match segment {
            Segment::Key { key } => Token::KeyIdent(key.clone()),
            Segment::Name(s) if i > 0 && is_navigation(s) => Token::QuotedIdent(s.clone()),
            Segment::Name(s) => Token::Ident(s.clone()),
        }));
        ts
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tokens().serialize())
    }
}

macro_rules! name_ref {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $ty(Name);

        impl $ty {
            pub fn new<I, S>(segments: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<Segment>,
            {
                Self(Name::new(segments))
            }

            pub fn name(&self) -> &Name {
                &self.0
            }

            pub fn to_tokens(&self) -> TokenStream {
                self.0.to_tokens()
            }
        }

        impl From<Name> for $ty {
            fn from(name: Name) -> Self {
                Self(name)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

name_ref!(
    /// Unique name of a dimension member, e.g. `[Product].[Drink]`.
    MemberRef
);

name_ref!(
    /// Unique name of a hierarchy level, e.g. `[Time].[Quarter]`.
    LevelRef
);

name_ref!(
    /// Name of the cube a statement selects from.
    CubeRef
);
