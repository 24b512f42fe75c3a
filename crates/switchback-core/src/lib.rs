//! # Switchback Core
//!
//! Bidirectional route descriptions: one combinator expression is at
//! once a parser from request data to a typed route value, a printer
//! from that value back to a path, query, and body, and a template
//! renderer for its placeholder shape. Because all three read off the
//! same grammar, the URLs an application matches and the URLs it
//! generates cannot drift apart.
//!
//! This crate is **transport-agnostic**: it never touches URL strings,
//! sockets, or percent signs. It only prescribes how grammars compose
//! and what they consume.
//!
//! ## Architecture
//!
//! ```text
//! RequestData            ← method? + path segments + query map + body?
//!     │
//! PartialIso<A, B>       ← invertible partial steps (apply / unapply)
//!     │
//! Router<A>              ← parse + print + template from one grammar
//!     │
//! combinators            ← lit, path, query, method, body, end
//! ```
//!
//! ## Example
//!
//! ```
//! use switchback_core::{PartialIso, RequestData, lit, path};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Route {
//!     Episode(i64),
//! }
//!
//! let episode = lit("episodes").discard_left(path::<i64>()).map(PartialIso::new(
//!     |id: &i64| Some(Route::Episode(*id)),
//!     |route: &Route| match route {
//!         Route::Episode(id) => Some(*id),
//!     },
//! ));
//!
//! let inbound = RequestData {
//!     path: vec!["episodes".into(), "42".into()],
//!     ..Default::default()
//! };
//! assert_eq!(episode.match_data(inbound), Some(Route::Episode(42)));
//!
//! let outbound = episode.print(&Route::Episode(42)).unwrap();
//! assert_eq!(outbound.path, vec!["episodes", "42"]);
//! ```

pub mod combinators;
pub mod data;
pub mod iso;
pub mod router;

pub use combinators::{
    body, delete, end, get, head, json_body, lit, method, options, patch, path, path_param, post,
    put, query, query_opt, query_param, root, string_body,
};
pub use data::{Method, ParseMethodError, RequestData};
pub use iso::PartialIso;
pub use router::Router;
