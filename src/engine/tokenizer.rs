//! Tokenization and token shape classification.
//!
//! The notation is whitespace-delimited: every structural marker rides on a
//! token. A token may start with `(` (it opens a node scope and names the
//! node's handle) or with `:` (it is a relation label), and may end with one
//! or more `)` characters, each of which closes one enclosing scope.
//!
//! Tokens are never rewritten. Instead each token records how many closers it
//! carries and the reader keeps count of how many of them it has consumed.
//!
//! ## Limitations
//!
//! - Literals containing whitespace (for example a quoted name with a space)
//!   are split into several tokens and will be misread. This is not
//!   corrected here.

use crate::Options;

bitflags::bitflags! {
    /// Structural markers carried by a token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenShape: u8 {
        /// Leading `(`: opens a node scope.
        const OPENS    = 1 << 0;
        /// Leading `:`: a relation label.
        const RELATION = 1 << 1;
        /// One or more trailing `)`.
        const CLOSES   = 1 << 2;
    }
}

/// A whitespace-delimited slice of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Position in the token sequence.
    pub index: usize,
    /// The raw token text.
    pub text: &'a str,
    pub shape: TokenShape,
    /// Number of trailing `)` characters.
    pub closers: usize,
}

impl<'a> Token<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        let closers = regex!(r"\)+$").find(text).map(|m| m.len()).unwrap_or(0);
        let mut shape = TokenShape::empty();
        if text.starts_with('(') {
            shape |= TokenShape::OPENS;
        } else if text.starts_with(':') {
            shape |= TokenShape::RELATION;
        }
        if closers > 0 {
            shape |= TokenShape::CLOSES;
        }
        Token { index, text, shape, closers }
    }

    pub fn opens(&self) -> bool {
        self.shape.contains(TokenShape::OPENS)
    }

    pub fn is_relation(&self) -> bool {
        self.shape.contains(TokenShape::RELATION)
    }

    pub fn closes(&self) -> bool {
        self.shape.contains(TokenShape::CLOSES)
    }

    /// Token text with trailing `)` characters removed.
    pub fn stripped(&self) -> &'a str {
        &self.text[..self.text.len() - self.closers]
    }

    /// Token text without its structural markers: the leading `(` or `:` and
    /// the trailing `)`s.
    ///
    /// ```text
    /// "(p"      -> "p"
    /// ":ARG1"   -> "ARG1"
    /// "dollar)" -> "dollar"
    /// "2003))"  -> "2003"
    /// ```
    pub fn body(&self) -> &'a str {
        let stripped = self.stripped();
        if self.opens() || self.is_relation() { &stripped[1..] } else { stripped }
    }
}

/// Split `text` on whitespace into classified tokens.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    tokenize_with(text, &Options::default())
}

/// Split `text` on whitespace into classified tokens, honoring
/// [`Options::skip_comment_lines`].
pub fn tokenize_with<'a>(text: &'a str, options: &Options) -> Vec<Token<'a>> {
    let words: Vec<&'a str> = if options.skip_comment_lines {
        text.lines().filter(|line| !regex!(r"^\s*#").is_match(line)).flat_map(str::split_whitespace).collect()
    } else {
        text.split_whitespace().collect()
    };

    let tokens: Vec<Token<'a>> = words.into_iter().enumerate().map(|(index, word)| Token::new(index, word)).collect();
    tracing::debug!(count = tokens.len(), "tokenized input");
    tokens
}
