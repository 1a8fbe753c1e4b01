//! Recursive-descent reader: tokens → forest of node scopes.
//!
//! This is the only place that interprets token structure. Both the node list
//! and the edge list are derived from the forest it produces, so the two can
//! never disagree about where a scope opens or closes.
//!
//! ## State machine
//!
//! The reader is driven by token shape:
//!
//! ```text
//! SCAN ──"(h"──▶ OPEN      handle = h, skip separator, read concept,
//!   │                      descend into the new scope
//!   ├──":r"───▶ RELATION  read value: "(h" → OPEN (nested node)
//!   │                                 else → atom
//!   ├──"…)"───▶ CLOSE     consume ONE pending ')' and return to caller
//!   └──other──▶ skip      (also at top level, and a relation whose value
//!                          slot holds another relation)
//! ```
//!
//! ## Closers
//!
//! Tokens are never rewritten. The cursor remembers how many of the current
//! token's trailing `)` have been consumed, and whether the token's body has
//! already been interpreted (as a concept or an atom value). A token such as
//! `4600000000))` is first read as an atom, then closes two scopes: the
//! innermost scope consumes one closer and returns, its caller sees one
//! closer still pending on the same token and returns as well.
//!
//! ## Invariants
//!
//! - Every `(`-token becomes exactly one `Scope`, in textual order.
//! - A scope's position is its parent's position extended by the number of
//!   nested scopes collected before it in the same parent.
//! - A successful read consumed every token and every closer exactly once.

use crate::{Options, ParseError, Position};

use super::tokenizer::Token;

/// A node definition together with everything written inside its parentheses.
///
/// `handle` and `concept` are never empty: `( / x)` and `(a / )` are
/// truncated definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scope<'a> {
    pub handle: &'a str,
    pub concept: &'a str,
    pub position: Position,
    /// Index of the opening `(handle` token.
    pub opened_at: usize,
    pub items: Vec<Item<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item<'a> {
    /// `:label value`
    Relation { label: &'a str, index: usize, value: Value<'a> },
    /// A nested node written without a relation label in front of it.
    Nested(Scope<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Value<'a> {
    Node(Scope<'a>),
    /// A bare value token with its closers stripped. It may turn out to be a
    /// reentrant handle or a literal; the reader does not decide.
    Atom(&'a str),
}

impl<'a> Scope<'a> {
    /// Nested scopes directly inside this one, labeled or not, in order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Scope<'a>> {
        self.items.iter().filter_map(|item| match item {
            Item::Relation { value: Value::Node(scope), .. } | Item::Nested(scope) => Some(scope),
            Item::Relation { value: Value::Atom(_), .. } => None,
        })
    }
}

/// All top-level scopes of one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Forest<'a> {
    pub roots: Vec<Scope<'a>>,
}

/// Read position within the token slice.
struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    /// Closers of `tokens[pos]` already consumed.
    closed: usize,
    /// Whether the body of `tokens[pos]` has already been read.
    interpreted: bool,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Cursor { tokens, pos: 0, closed: 0, interpreted: false }
    }

    fn current(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek(&self, offset: usize) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos + offset)
    }

    fn pending_closers(&self) -> usize {
        self.current().map(|t| t.closers - self.closed).unwrap_or(0)
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.closed = 0;
        self.interpreted = false;
    }

    /// Move forward `n` tokens and mark the landing token as read.
    fn settle_after(&mut self, n: usize) {
        self.pos += n;
        self.closed = 0;
        self.interpreted = true;
    }

    fn close_one(&mut self) {
        self.closed += 1;
    }

    fn end(&self) -> usize {
        self.tokens.len()
    }
}

pub(crate) struct Reader<'t, 'a, 'o> {
    cursor: Cursor<'t, 'a>,
    options: &'o Options,
}

/// Read `tokens` into a forest, or report the first structural problem.
pub(crate) fn read_forest<'a>(tokens: &[Token<'a>], options: &Options) -> Result<Forest<'a>, ParseError> {
    Reader::new(tokens, options).read()
}

impl<'t, 'a, 'o> Reader<'t, 'a, 'o> {
    pub fn new(tokens: &'t [Token<'a>], options: &'o Options) -> Self {
        Reader { cursor: Cursor::new(tokens), options }
    }

    /// Top-level loop: a sequence of root node definitions.
    pub fn read(mut self) -> Result<Forest<'a>, ParseError> {
        let mut roots: Vec<Scope<'a>> = Vec::new();

        while let Some(tok) = self.cursor.current() {
            if self.cursor.interpreted {
                if self.cursor.pending_closers() > 0 {
                    return Err(ParseError::UnexpectedClose { index: tok.index });
                }
                self.cursor.advance();
                continue;
            }

            if tok.opens() {
                let root = self.read_node(tok, Position::root(roots.len()), 0)?;
                roots.push(root);
                continue;
            }

            if tok.closes() && tok.stripped().is_empty() {
                return Err(ParseError::UnexpectedClose { index: tok.index });
            }
            if self.options.reject_stray_tokens {
                return Err(ParseError::StrayToken { index: tok.index, token: tok.text.to_string() });
            }
            // Words outside any node (corpus metadata, prose, a stray
            // relation) are skipped. Closers glued to them still count.
            tracing::trace!(token = tok.text, index = tok.index, "skip top-level token");
            self.cursor.interpreted = true;
        }

        tracing::debug!(roots = roots.len(), tokens = self.cursor.end(), "read forest");
        Ok(Forest { roots })
    }

    /// OPEN: the cursor is on `opener`, a fresh `(handle` token.
    fn read_node(&mut self, opener: &'t Token<'a>, position: Position, depth: usize) -> Result<Scope<'a>, ParseError> {
        ensure_unclosed(opener)?;

        if let Some(limit) = self.options.max_depth {
            if depth >= limit {
                return Err(ParseError::TooDeep { index: opener.index, limit });
            }
        }

        let handle = opener.body();
        let truncated = || ParseError::TruncatedNode { index: opener.index, handle: handle.to_string() };

        let separator = self.cursor.peek(1).ok_or_else(truncated)?;
        let concept_tok = self.cursor.peek(2).ok_or_else(truncated)?;
        if separator.closes() || separator.opens() || separator.is_relation() {
            return Err(truncated());
        }
        if self.options.strict_separator && separator.text != "/" {
            return Err(ParseError::MissingSeparator { index: separator.index, found: separator.text.to_string() });
        }
        if concept_tok.opens() || concept_tok.is_relation() {
            return Err(truncated());
        }

        let concept = concept_tok.stripped();
        if handle.is_empty() || concept.is_empty() {
            return Err(truncated());
        }
        tracing::trace!(%position, handle, concept, index = opener.index, "open node");

        // The concept token's own closers belong to this node's scope.
        self.cursor.settle_after(2);

        let mut scope = Scope { handle, concept, position, opened_at: opener.index, items: Vec::new() };
        self.read_scope(&mut scope, depth)?;
        Ok(scope)
    }

    /// Collect the contents of `scope` until one of its closers is consumed.
    fn read_scope(&mut self, scope: &mut Scope<'a>, depth: usize) -> Result<(), ParseError> {
        let mut nested = 0usize;

        loop {
            let Some(tok) = self.cursor.current() else {
                return Err(ParseError::UnclosedScope {
                    handle: scope.handle.to_string(),
                    opened_at: scope.opened_at,
                    end: self.cursor.end(),
                });
            };

            if self.cursor.interpreted {
                if self.cursor.pending_closers() > 0 {
                    self.cursor.close_one();
                    tracing::trace!(handle = scope.handle, index = tok.index, "close node");
                    return Ok(());
                }
                self.cursor.advance();
                continue;
            }

            if tok.opens() {
                let child = self.read_node(tok, scope.position.child(nested), depth + 1)?;
                nested += 1;
                scope.items.push(Item::Nested(child));
                continue;
            }

            if tok.is_relation() {
                ensure_unclosed(tok)?;
                let label = tok.body();
                let value_tok = self.cursor.peek(1).ok_or(ParseError::MissingValue { index: tok.index })?;
                if value_tok.is_relation() {
                    if self.options.reject_stray_tokens {
                        return Err(ParseError::MissingValue { index: tok.index });
                    }
                    // No value: the next relation is read on its own.
                    tracing::trace!(label, index = tok.index, "relation without value");
                    self.cursor.interpreted = true;
                    continue;
                }

                let value = if value_tok.opens() {
                    self.cursor.advance();
                    let child = self.read_node(value_tok, scope.position.child(nested), depth + 1)?;
                    nested += 1;
                    Value::Node(child)
                } else {
                    // Atom: its closers are handled by the loop like any other.
                    self.cursor.settle_after(1);
                    tracing::trace!(label, value = value_tok.body(), index = value_tok.index, "atom value");
                    Value::Atom(value_tok.body())
                };
                scope.items.push(Item::Relation { label, index: tok.index, value });
                continue;
            }

            // Anything else (stray separators, trailing words) is skipped; its
            // closers still count.
            self.cursor.interpreted = true;
        }
    }
}

fn ensure_unclosed(tok: &Token<'_>) -> Result<(), ParseError> {
    if tok.closes() {
        return Err(ParseError::ClosedStructuralToken { index: tok.index, token: tok.text.to_string() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn read(text: &str) -> Result<Forest<'_>, ParseError> {
        read_forest(&tokenize(text), &Options::default())
    }

    #[test]
    fn leaf_node_closes_on_its_concept_token() {
        let forest = read("(d / dollar)").unwrap();
        assert_eq!(forest.roots.len(), 1);
        let d = &forest.roots[0];
        assert_eq!((d.handle, d.concept), ("d", "dollar"));
        assert!(d.items.is_empty());
        assert_eq!(d.position.to_string(), "0");
    }

    #[test]
    fn closer_cluster_unwinds_several_scopes() {
        let forest = read("(a / x :r (b / y :s (c / z :lit 7))) ").unwrap();
        let a = &forest.roots[0];
        let b = a.children().next().unwrap();
        let c = b.children().next().unwrap();
        assert_eq!(c.handle, "c");
        assert_eq!(c.position.to_string(), "0.0.0");
        assert_eq!(c.items, vec![Item::Relation { label: "lit", index: 11, value: Value::Atom("7") }]);
    }

    #[test]
    fn siblings_are_numbered_in_order() {
        let forest = read("(a / x :r (b / y) :s (c / z) :t lit :u (d / w))").unwrap();
        let positions: Vec<String> = forest.roots[0].children().map(|s| s.position.to_string()).collect();
        assert_eq!(positions, vec!["0.0", "0.1", "0.2"]);
    }

    #[test]
    fn standalone_closer_tokens_are_accepted() {
        let forest = read("(a / x :r (b / y ) )").unwrap();
        assert_eq!(forest.roots[0].children().count(), 1);
    }

    #[test]
    fn unlabeled_nested_node_is_kept() {
        let forest = read("(a / x (b / y))").unwrap();
        assert!(matches!(forest.roots[0].items[0], Item::Nested(ref b) if b.handle == "b"));
    }

    #[test]
    fn several_roots() {
        let forest = read("(a / x) (b / y :r a)").unwrap();
        let positions: Vec<String> = forest.roots.iter().map(|s| s.position.to_string()).collect();
        assert_eq!(positions, vec!["0", "1"]);
    }

    #[test]
    fn missing_closer_reports_end_of_input() {
        let err = read("(a / x :r (b / y)").unwrap_err();
        assert_eq!(err, ParseError::UnclosedScope { handle: "a".into(), opened_at: 0, end: 7 });
        assert_eq!(err.index(), 7);
    }

    #[test]
    fn surplus_closer_is_rejected() {
        let err = read("(a / x))").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedClose { index: 2 });
        assert_eq!(read("(a / x) )").unwrap_err(), ParseError::UnexpectedClose { index: 3 });
    }

    #[test]
    fn top_level_words_are_skipped() {
        let forest = read("the graph is (a / x :r (b / y))").unwrap();
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].handle, "a");
        assert_eq!(forest.roots[0].children().next().unwrap().handle, "b");

        let forest = read("# ::snt Hello .\n(a / x) :r b").unwrap();
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].position.to_string(), "0");
    }

    #[test]
    fn closers_on_skipped_top_level_words_are_rejected() {
        assert_eq!(read("(a / x) b)").unwrap_err(), ParseError::UnexpectedClose { index: 3 });
        assert_eq!(read("hello) (a / x)").unwrap_err(), ParseError::UnexpectedClose { index: 0 });
    }

    #[test]
    fn stray_tokens_are_rejected_on_request() {
        let opts = Options { reject_stray_tokens: true, ..Options::default() };
        let tokens = tokenize("hello (a / x)");
        assert_eq!(read_forest(&tokens, &opts).unwrap_err(), ParseError::StrayToken { index: 0, token: "hello".into() });
        let tokens = tokenize("(a / x) :r b");
        assert!(matches!(read_forest(&tokens, &opts).unwrap_err(), ParseError::StrayToken { index: 3, .. }));
        let tokens = tokenize("(a / x :r :s b)");
        assert_eq!(read_forest(&tokens, &opts).unwrap_err(), ParseError::MissingValue { index: 3 });
    }

    #[test]
    fn truncated_definitions() {
        assert_eq!(read("(a /").unwrap_err(), ParseError::TruncatedNode { index: 0, handle: "a".into() });
        assert_eq!(read("(a x)").unwrap_err(), ParseError::TruncatedNode { index: 0, handle: "a".into() });
        assert!(matches!(read("(a / :r b)").unwrap_err(), ParseError::TruncatedNode { .. }));
    }

    #[test]
    fn empty_handle_or_concept_is_truncated() {
        assert_eq!(read("(a / )").unwrap_err(), ParseError::TruncatedNode { index: 0, handle: "a".into() });
        assert_eq!(read("(a / ))").unwrap_err(), ParseError::TruncatedNode { index: 0, handle: "a".into() });
        assert_eq!(read("( / x)").unwrap_err(), ParseError::TruncatedNode { index: 0, handle: String::new() });
        assert_eq!(
            read("(a / x :r ( / y))").unwrap_err(),
            ParseError::TruncatedNode { index: 4, handle: String::new() }
        );
    }

    #[test]
    fn relation_at_end_of_input_has_no_value() {
        assert_eq!(read("(a / x :r").unwrap_err(), ParseError::MissingValue { index: 3 });
    }

    #[test]
    fn relation_followed_by_relation_is_dropped() {
        let forest = read("(a / x :r :s (b / y))").unwrap();
        let a = &forest.roots[0];
        assert_eq!(a.items.len(), 1);
        assert!(matches!(a.items[0], Item::Relation { label: "s", index: 4, value: Value::Node(ref b) } if b.handle == "b"));
        assert_eq!(a.children().next().unwrap().position.to_string(), "0.0");

        let forest = read("(a / x :r :s b)").unwrap();
        assert_eq!(forest.roots[0].items, vec![Item::Relation { label: "s", index: 4, value: Value::Atom("b") }]);
    }

    #[test]
    fn strict_separator() {
        let opts = Options { strict_separator: true, ..Options::default() };
        let tokens = tokenize("(a - x)");
        assert_eq!(
            read_forest(&tokens, &opts).unwrap_err(),
            ParseError::MissingSeparator { index: 1, found: "-".into() }
        );
        // Lenient by default.
        assert!(read("(a - x)").is_ok());
    }

    #[test]
    fn depth_limit() {
        let opts = Options { max_depth: Some(2), ..Options::default() };
        let tokens = tokenize("(a / x :r (b / y :s (c / z)))");
        assert_eq!(read_forest(&tokens, &opts).unwrap_err(), ParseError::TooDeep { index: 8, limit: 2 });

        let tokens = tokenize("(a / x :r (b / y))");
        assert!(read_forest(&tokens, &opts).is_ok());
    }

    #[test]
    fn closers_on_structural_tokens_are_rejected() {
        assert!(matches!(read("(a / x :r)").unwrap_err(), ParseError::ClosedStructuralToken { index: 3, .. }));
    }

    #[test]
    fn empty_input_reads_as_empty_forest() {
        assert_eq!(read("").unwrap(), Forest::default());
    }
}
