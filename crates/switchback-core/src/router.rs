//! The router: one value, three directions.
//!
//! A [`Router<A>`] packages three pure functions over [`RequestData`]:
//! 1. **parse**: consume a grammar-defined prefix of the request data,
//!    yielding the remainder and a typed match
//! 2. **print**: render a value back into the minimal request fragment
//!    that would parse to it
//! 3. **template**: like print, but with variable parts rendered as
//!    placeholder tokens instead of serialized values
//!
//! All three derive from the same combinator expression, so the URL a
//! router matches and the URL it generates for the same value cannot
//! drift apart.
//!
//! The algebra: [`Router::map`] transports matches through a
//! [`PartialIso`]; [`Router::product`] sequences two grammars and pairs
//! their matches; [`Router::or`] tries alternatives left to right, each
//! against the original input; [`Router::fail`] is the identity for
//! `or`. Parse consumes exactly what its grammar matched (segments, the
//! guarded method, the matched query key, the taken body), so printing
//! a value and parsing the result hands back any trailing data
//! untouched.
//!
//! Failure everywhere is plain `None`: no diagnostics, no partial
//! state. A router that did not match is indistinguishable from one
//! that was never tried, which is what makes `or` safe to chain.

use std::sync::Arc;

use crate::combinators::end;
use crate::data::RequestData;
use crate::iso::PartialIso;

type ParseFn<A> = Arc<dyn Fn(RequestData) -> Option<(RequestData, A)> + Send + Sync>;
type PrintFn<A> = Arc<dyn Fn(&A) -> Option<RequestData> + Send + Sync>;

/// A bidirectional route grammar matching values of type `A`.
pub struct Router<A> {
    parse: ParseFn<A>,
    print: PrintFn<A>,
    template: PrintFn<A>,
}

impl<A> Clone for Router<A> {
    fn clone(&self) -> Self {
        Router {
            parse: Arc::clone(&self.parse),
            print: Arc::clone(&self.print),
            template: Arc::clone(&self.template),
        }
    }
}

impl<A> std::fmt::Debug for Router<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<A: 'static> Router<A> {
    /// Build a router from its three directions.
    ///
    /// This is how every primitive is defined; most callers compose
    /// existing primitives instead.
    pub fn new<P, Q, T>(parse: P, print: Q, template: T) -> Self
    where
        P: Fn(RequestData) -> Option<(RequestData, A)> + Send + Sync + 'static,
        Q: Fn(&A) -> Option<RequestData> + Send + Sync + 'static,
        T: Fn(&A) -> Option<RequestData> + Send + Sync + 'static,
    {
        Router {
            parse: Arc::new(parse),
            print: Arc::new(print),
            template: Arc::new(template),
        }
    }

    /// Consume a prefix of `data`, yielding the remainder and the match.
    pub fn parse(&self, data: RequestData) -> Option<(RequestData, A)> {
        (self.parse)(data)
    }

    /// Render `value` as the request fragment that parses back to it,
    /// or `None` when this grammar cannot represent the value.
    pub fn print(&self, value: &A) -> Option<RequestData> {
        (self.print)(value)
    }

    /// Render the placeholder shape of the grammar. The value selects
    /// the branch in an alternative; its fields are never serialized.
    pub fn template(&self, value: &A) -> Option<RequestData> {
        (self.template)(value)
    }

    /// The router that never matches and prints nothing. Identity for
    /// [`Router::or`] and a safe terminal fallback.
    pub fn fail() -> Self {
        Router::new(|_| None, |_| None, |_| None)
    }

    /// Transport matches through a partial isomorphism.
    ///
    /// Parsing applies the iso forward and fails the parse when the iso
    /// declines; printing and templating run it backward first, then
    /// delegate.
    pub fn map<B: 'static>(self, iso: PartialIso<A, B>) -> Router<B> {
        let parse_router = self.clone();
        let print_router = self.clone();
        let template_router = self;
        let parse_iso = iso.clone();
        let print_iso = iso.clone();
        let template_iso = iso;
        Router::new(
            move |data| {
                let (rest, value) = parse_router.parse(data)?;
                let mapped = parse_iso.apply(&value)?;
                Some((rest, mapped))
            },
            move |b: &B| {
                let a = print_iso.unapply(b)?;
                print_router.print(&a)
            },
            move |b: &B| {
                let a = template_iso.unapply(b)?;
                template_router.template(&a)
            },
        )
    }

    /// Sequence two grammars, pairing their matches.
    ///
    /// The left side parses first; the right side parses the remainder.
    /// Printing concatenates both fragments, and when exactly one side
    /// prints, the product prints that side alone.
    pub fn product<B: 'static>(self, other: Router<B>) -> Router<(A, B)> {
        let parse_left = self.clone();
        let print_left = self.clone();
        let template_left = self;
        let parse_right = other.clone();
        let print_right = other.clone();
        let template_right = other;
        Router::new(
            move |data| {
                let (after_left, a) = parse_left.parse(data)?;
                let (rest, b) = parse_right.parse(after_left)?;
                Some((rest, (a, b)))
            },
            move |pair: &(A, B)| {
                merge_fragments(print_left.print(&pair.0), print_right.print(&pair.1))
            },
            move |pair: &(A, B)| {
                merge_fragments(
                    template_left.template(&pair.0),
                    template_right.template(&pair.1),
                )
            },
        )
    }

    /// Sequence with a unit grammar on the right, keeping only the left
    /// match.
    pub fn discard_right(self, other: Router<()>) -> Router<A> {
        let parse_left = self.clone();
        let print_left = self.clone();
        let template_left = self;
        let parse_right = other.clone();
        let print_right = other.clone();
        let template_right = other;
        Router::new(
            move |data| {
                let (after_left, a) = parse_left.parse(data)?;
                let (rest, ()) = parse_right.parse(after_left)?;
                Some((rest, a))
            },
            move |a: &A| merge_fragments(print_left.print(a), print_right.print(&())),
            move |a: &A| merge_fragments(template_left.template(a), template_right.template(&())),
        )
    }

    /// Try `self`, and on a failed parse try `other` against the
    /// original input.
    ///
    /// Left-biased with no backtracking: once the left branch matches,
    /// its remainder stands, even if the top-level end-of-input check
    /// later rejects it. Order alternatives most-specific first.
    /// Printing and templating also prefer the left branch, falling
    /// back when it cannot represent the value.
    pub fn or(self, other: Router<A>) -> Router<A> {
        let parse_left = self.clone();
        let print_left = self.clone();
        let template_left = self;
        let parse_right = other.clone();
        let print_right = other.clone();
        let template_right = other;
        Router::new(
            move |data: RequestData| {
                let saved = data.clone();
                parse_left.parse(data).or_else(|| parse_right.parse(saved))
            },
            move |a: &A| print_left.print(a).or_else(|| print_right.print(a)),
            move |a: &A| {
                template_left
                    .template(a)
                    .or_else(|| template_right.template(a))
            },
        )
    }

    /// Fold alternatives in order over [`Router::fail`].
    pub fn one_of(routers: impl IntoIterator<Item = Router<A>>) -> Router<A> {
        routers.into_iter().fold(Router::fail(), Router::or)
    }

    /// Parse `data` to completion: the grammar must consume every path
    /// segment and the body. Leftover query keys are tolerated, so
    /// unrelated tracking parameters do not break matching. This is the
    /// only place totality is enforced.
    pub fn match_data(&self, data: RequestData) -> Option<A> {
        let total = self.clone().discard_right(end());
        let (_, value) = total.parse(data)?;
        Some(value)
    }
}

impl Router<()> {
    /// Sequence with a grammar on the right, keeping only its match.
    pub fn discard_left<B: 'static>(self, other: Router<B>) -> Router<B> {
        let parse_left = self.clone();
        let print_left = self.clone();
        let template_left = self;
        let parse_right = other.clone();
        let print_right = other.clone();
        let template_right = other;
        Router::new(
            move |data| {
                let (after_left, ()) = parse_left.parse(data)?;
                parse_right.parse(after_left)
            },
            move |b: &B| merge_fragments(print_left.print(&()), print_right.print(b)),
            move |b: &B| merge_fragments(template_left.template(&()), template_right.template(b)),
        )
    }
}

/// Merge the printed fragments of a sequenced pair.
///
/// Both present: concatenate. Exactly one present: that side alone, so
/// a grammar half with no output never blocks the half that has one.
/// Neither present: nothing.
fn merge_fragments(lhs: Option<RequestData>, rhs: Option<RequestData>) -> Option<RequestData> {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => Some(lhs.concat(rhs)),
        (lhs, rhs) => lhs.or(rhs),
    }
}
