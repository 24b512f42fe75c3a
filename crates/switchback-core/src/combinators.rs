//! The primitive grammars routes are assembled from.
//!
//! Each primitive claims one kind of request material:
//! - [`lit`] and [`root`]: fixed path segments
//! - [`path_param`] / [`path`]: one typed path segment
//! - [`query_param`] / [`query`] / [`query_opt`]: one query key
//! - [`method`] and the verb shorthands: the request method
//! - [`body`], [`string_body`], [`json_body`]: the request body
//! - [`end`]: the end-of-input check appended by [`Router::match_data`]
//!
//! Every primitive prints exactly the material it parses, so composed
//! routers inherit print/parse agreement for free.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::data::{Method, RequestData};
use crate::iso::PartialIso;
use crate::router::Router;

/// Match and consume exactly one fixed path segment.
///
/// Prints the segment unconditionally. The empty string degenerates to
/// [`root`].
pub fn lit(segment: impl Into<String>) -> Router<()> {
    let segment = segment.into();
    if segment.is_empty() {
        return root();
    }
    let expected = segment.clone();
    let printed = segment.clone();
    let templated = segment;
    Router::new(
        move |data: RequestData| {
            let (head, rest) = data.take_leading_segment()?;
            (head == expected).then_some((rest, ()))
        },
        move |_: &()| {
            Some(RequestData {
                path: vec![printed.clone()],
                ..Default::default()
            })
        },
        move |_: &()| {
            Some(RequestData {
                path: vec![templated.clone()],
                ..Default::default()
            })
        },
    )
}

/// The root grammar: consumes nothing, prints an empty fragment. A
/// route built from it alone renders as `/`.
pub fn root() -> Router<()> {
    Router::new(
        |data| Some((data, ())),
        |_: &()| Some(RequestData::default()),
        |_: &()| Some(RequestData::default()),
    )
}

/// Consume one path segment through a `String` iso.
///
/// Printing runs the iso backward and fails when it declines; the
/// template renders the placeholder token for `A`.
pub fn path_param<A: 'static>(iso: PartialIso<String, A>) -> Router<A> {
    let parse_iso = iso.clone();
    let print_iso = iso;
    let token = placeholder::<A>();
    Router::new(
        move |data: RequestData| {
            let (head, rest) = data.take_leading_segment()?;
            let value = parse_iso.apply(&head)?;
            Some((rest, value))
        },
        move |value: &A| {
            let segment = print_iso.unapply(value)?;
            Some(RequestData {
                path: vec![segment],
                ..Default::default()
            })
        },
        move |_: &A| {
            Some(RequestData {
                path: vec![token.clone()],
                ..Default::default()
            })
        },
    )
}

/// One typed path segment through the type's `FromStr`/`Display` pair.
pub fn path<T>() -> Router<T>
where
    T: FromStr + Display + 'static,
{
    path_param(PartialIso::from_str())
}

/// Read one query key through an `Option<String>` iso.
///
/// An absent key and a present-but-valueless key both reach the iso as
/// `None`. A successful parse removes the key from the remainder.
/// Printing emits a one-entry query fragment; an entry whose value is
/// `None` is dropped when a target is rendered.
pub fn query_param<A: 'static>(
    key: impl Into<String>,
    iso: PartialIso<Option<String>, A>,
) -> Router<A> {
    let key = key.into();
    let parse_key = key.clone();
    let print_key = key.clone();
    let template_key = key;
    let parse_iso = iso.clone();
    let print_iso = iso;
    let token = placeholder::<A>();
    Router::new(
        move |mut data: RequestData| {
            let value = data.query.remove(&parse_key).flatten();
            let matched = parse_iso.apply(&value)?;
            Some((data, matched))
        },
        move |value: &A| {
            let rendered = print_iso.unapply(value)?;
            Some(RequestData {
                query: BTreeMap::from([(print_key.clone(), rendered)]),
                ..Default::default()
            })
        },
        move |_: &A| {
            Some(RequestData {
                query: BTreeMap::from([(template_key.clone(), Some(token.clone()))]),
                ..Default::default()
            })
        },
    )
}

/// A required typed query parameter.
pub fn query<T>(key: impl Into<String>) -> Router<T>
where
    T: FromStr + Display + 'static,
{
    query_param(key, PartialIso::req(PartialIso::from_str()))
}

/// An optional typed query parameter. Absent reads as `None`; present
/// but malformed is a non-match.
pub fn query_opt<T>(key: impl Into<String>) -> Router<Option<T>>
where
    T: FromStr + Display + 'static,
{
    query_param(key, PartialIso::opt(PartialIso::from_str()))
}

/// Guard on the request method and consume it.
///
/// Parsing fails when the data carries no method or a different one.
pub fn method(expected: Method) -> Router<()> {
    Router::new(
        move |mut data: RequestData| (data.method.take() == Some(expected)).then_some((data, ())),
        move |_: &()| {
            Some(RequestData {
                method: Some(expected),
                ..Default::default()
            })
        },
        move |_: &()| {
            Some(RequestData {
                method: Some(expected),
                ..Default::default()
            })
        },
    )
}

/// Guard on GET.
pub fn get() -> Router<()> {
    method(Method::Get)
}

/// Guard on POST.
pub fn post() -> Router<()> {
    method(Method::Post)
}

/// Guard on PUT.
pub fn put() -> Router<()> {
    method(Method::Put)
}

/// Guard on PATCH.
pub fn patch() -> Router<()> {
    method(Method::Patch)
}

/// Guard on DELETE.
pub fn delete() -> Router<()> {
    method(Method::Delete)
}

/// Guard on HEAD.
pub fn head() -> Router<()> {
    method(Method::Head)
}

/// Guard on OPTIONS.
pub fn options() -> Router<()> {
    method(Method::Options)
}

/// Take the whole request body as bytes.
///
/// Fails when no body is present; the remainder's body is cleared.
pub fn body() -> Router<Vec<u8>> {
    Router::new(
        |mut data: RequestData| {
            let bytes = data.body.take()?;
            Some((data, bytes))
        },
        |bytes: &Vec<u8>| {
            Some(RequestData {
                body: Some(bytes.clone()),
                ..Default::default()
            })
        },
        |bytes: &Vec<u8>| {
            Some(RequestData {
                body: Some(bytes.clone()),
                ..Default::default()
            })
        },
    )
}

/// The request body as UTF-8 text.
pub fn string_body() -> Router<String> {
    body().map(PartialIso::utf8())
}

/// The request body as a JSON value of type `T`.
pub fn json_body<T>() -> Router<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    body().map(PartialIso::json())
}

/// Succeed only when no path segments and no body remain.
///
/// Leftover query keys pass. [`Router::match_data`] appends this to
/// enforce totality; it is rarely composed by hand.
pub fn end() -> Router<()> {
    Router::new(
        |data: RequestData| (data.path.is_empty() && data.body.is_none()).then_some((data, ())),
        |_: &()| Some(RequestData::default()),
        |_: &()| Some(RequestData::default()),
    )
}

/// The template token for a parameter of type `A`: a colon followed by
/// the type name with module paths stripped (`:i64`, `:String`,
/// `:Option<String>`).
fn placeholder<A>() -> String {
    let full = std::any::type_name::<A>();
    let mut short = String::new();
    let mut ident = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' {
            ident.push(c);
        } else if c == ':' {
            ident.clear();
        } else {
            short.push_str(&ident);
            ident.clear();
            short.push(c);
        }
    }
    short.push_str(&ident);
    format!(":{short}")
}
