//! Partial isomorphisms: the invertible half-steps routes are built from.
//!
//! A [`PartialIso<A, B>`] is a pair of pure partial functions:
//! 1. **apply**: `&A -> Option<B>`, the parsing direction
//! 2. **unapply**: `&B -> Option<A>`, the printing direction
//!
//! "Partial" because either direction may decline (`"abc"` is not an
//! integer; a route value may have no representation). The two functions
//! are expected to be mutually inverse wherever they succeed: if
//! `apply(a)` yields `b`, then `unapply(b)` yields `a` back, and
//! symmetrically. Nothing enforces the law at runtime; it is checked by
//! the tests of every primitive shipped here, and callers writing their
//! own isos are expected to do the same.
//!
//! Both halves are stored behind [`Arc`], so an iso clones cheaply and a
//! router built from one is safe to share across threads.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

type ApplyFn<A, B> = Arc<dyn Fn(&A) -> Option<B> + Send + Sync>;

/// An invertible partial mapping between `A` and `B`.
pub struct PartialIso<A, B> {
    apply: ApplyFn<A, B>,
    unapply: ApplyFn<B, A>,
}

impl<A, B> Clone for PartialIso<A, B> {
    fn clone(&self) -> Self {
        PartialIso {
            apply: Arc::clone(&self.apply),
            unapply: Arc::clone(&self.unapply),
        }
    }
}

impl<A, B> std::fmt::Debug for PartialIso<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialIso").finish_non_exhaustive()
    }
}

impl<A: 'static, B: 'static> PartialIso<A, B> {
    /// Build an iso from its two directions.
    ///
    /// The caller owns the round-trip law: wherever `apply` succeeds,
    /// `unapply` must take the result back to an equal value.
    pub fn new<F, G>(apply: F, unapply: G) -> Self
    where
        F: Fn(&A) -> Option<B> + Send + Sync + 'static,
        G: Fn(&B) -> Option<A> + Send + Sync + 'static,
    {
        PartialIso {
            apply: Arc::new(apply),
            unapply: Arc::new(unapply),
        }
    }

    /// Run the parsing direction.
    pub fn apply(&self, a: &A) -> Option<B> {
        (self.apply)(a)
    }

    /// Run the printing direction.
    pub fn unapply(&self, b: &B) -> Option<A> {
        (self.unapply)(b)
    }

    /// Swap the two directions.
    pub fn inverted(self) -> PartialIso<B, A> {
        PartialIso {
            apply: self.unapply,
            unapply: self.apply,
        }
    }

    /// Sequence two isos.
    ///
    /// Applying threads forward through both, unapplying threads
    /// backward in reverse order; either direction short-circuits on the
    /// first `None`.
    pub fn then<C: 'static>(self, next: PartialIso<B, C>) -> PartialIso<A, C> {
        let PartialIso { apply, unapply } = self;
        let PartialIso {
            apply: next_apply,
            unapply: next_unapply,
        } = next;
        PartialIso {
            apply: Arc::new(move |a: &A| apply(a).and_then(|b| next_apply(&b))),
            unapply: Arc::new(move |c: &C| next_unapply(c).and_then(|b| unapply(&b))),
        }
    }
}

impl<A: Clone + 'static> PartialIso<A, A> {
    /// The identity iso: both directions succeed with a clone.
    pub fn identity() -> Self {
        PartialIso::new(|a: &A| Some(a.clone()), |a: &A| Some(a.clone()))
    }
}

impl<T: FromStr + Display + 'static> PartialIso<String, T> {
    /// String to `T` through its `FromStr`/`Display` pair.
    ///
    /// The law holds for types whose `Display` output reparses to an
    /// equal value, which is the case for the std numeric and boolean
    /// types this backs.
    pub fn from_str() -> Self {
        PartialIso::new(
            |s: &String| s.parse::<T>().ok(),
            |value: &T| Some(value.to_string()),
        )
    }
}

impl PartialIso<String, i64> {
    pub fn int() -> Self {
        PartialIso::from_str()
    }
}

impl PartialIso<String, f64> {
    pub fn float() -> Self {
        PartialIso::from_str()
    }
}

impl PartialIso<String, bool> {
    pub fn boolean() -> Self {
        PartialIso::from_str()
    }
}

impl PartialIso<String, ()> {
    /// Match one fixed string, printing it back on the way out.
    pub fn exactly(expected: impl Into<String>) -> Self {
        let expected = expected.into();
        let printed = expected.clone();
        PartialIso::new(
            move |s: &String| (*s == expected).then_some(()),
            move |_: &()| Some(printed.clone()),
        )
    }
}

impl<A: Clone + 'static> PartialIso<(A, ()), A> {
    /// Erase a unit marker from a pair.
    ///
    /// The discard combinators on routers are this iso packaged with a
    /// product.
    pub fn drop_unit() -> Self {
        PartialIso::new(
            |(a, ()): &(A, ())| Some(a.clone()),
            |a: &A| Some((a.clone(), ())),
        )
    }
}

impl<A: Clone + 'static, B: Clone + 'static> PartialIso<(A, B), (B, A)> {
    /// Swap the sides of a pair.
    pub fn commute() -> Self {
        PartialIso::new(
            |(a, b): &(A, B)| Some((b.clone(), a.clone())),
            |(b, a): &(B, A)| Some((a.clone(), b.clone())),
        )
    }
}

impl<A: Clone + 'static, B: Clone + 'static, C: Clone + 'static> PartialIso<((A, B), C), (A, B, C)> {
    /// Unnest a left-leaning product into a flat triple.
    pub fn flatten3() -> Self {
        PartialIso::new(
            |((a, b), c): &((A, B), C)| Some((a.clone(), b.clone(), c.clone())),
            |(a, b, c): &(A, B, C)| Some(((a.clone(), b.clone()), c.clone())),
        )
    }
}

impl<B: 'static> PartialIso<Option<String>, B> {
    /// Lift a string iso to the query-value domain, requiring the value
    /// to be present.
    pub fn req(inner: PartialIso<String, B>) -> Self {
        let unapply_inner = inner.clone();
        PartialIso::new(
            move |value: &Option<String>| value.as_ref().and_then(|s| inner.apply(s)),
            move |b: &B| unapply_inner.unapply(b).map(Some),
        )
    }
}

impl<B: 'static> PartialIso<Option<String>, Option<B>> {
    /// Lift a string iso to the query-value domain, reading an absent
    /// value as `None`.
    ///
    /// A value that is present but fails the inner iso fails the whole
    /// mapping rather than flattening to `None`, so a malformed
    /// `?page=abc` is a non-match, not a silent default.
    pub fn opt(inner: PartialIso<String, B>) -> Self {
        let unapply_inner = inner.clone();
        PartialIso::new(
            move |value: &Option<String>| match value {
                Some(s) => inner.apply(s).map(Some),
                None => Some(None),
            },
            move |b: &Option<B>| match b {
                Some(b) => unapply_inner.unapply(b).map(Some),
                None => Some(None),
            },
        )
    }
}

impl PartialIso<Vec<u8>, String> {
    /// Body bytes to UTF-8 text; invalid UTF-8 declines.
    pub fn utf8() -> Self {
        PartialIso::new(
            |bytes: &Vec<u8>| String::from_utf8(bytes.clone()).ok(),
            |s: &String| Some(s.clone().into_bytes()),
        )
    }
}

impl<T: Serialize + DeserializeOwned + 'static> PartialIso<Vec<u8>, T> {
    /// Body bytes to a serde value through JSON.
    pub fn json() -> Self {
        PartialIso::new(
            |bytes: &Vec<u8>| serde_json::from_slice(bytes).ok(),
            |value: &T| serde_json::to_vec(value).ok(),
        )
    }
}
