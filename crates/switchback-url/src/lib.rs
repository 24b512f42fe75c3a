//! # Switchback URL
//!
//! The transport adapter for Switchback routers: a minimal [`Request`]
//! value, the origin-form target codec, and the [`RouterExt`] surface
//! that matches requests, URLs, and target strings against a router and
//! renders requests, targets, and URLs back out of route values.
//!
//! The core stays free of URL strings and percent signs; everything
//! lossy or textual happens here, through the router's public parse,
//! print, and template operations.
//!
//! ## Example
//!
//! ```
//! use switchback_core::{lit, path};
//! use switchback_url::RouterExt;
//!
//! let user = lit("users").discard_left(path::<i64>());
//! assert_eq!(user.match_path("/users/42"), Some(42));
//! assert_eq!(user.path_for(&42).as_deref(), Some("/users/42"));
//! assert_eq!(user.template_path(&0).as_deref(), Some("/users/:i64"));
//! ```

pub mod ext;
pub mod request;
pub mod target;

pub use ext::RouterExt;
pub use request::{Request, request_data, request_from};
pub use target::{parse_path, parse_query, render_target, split_target};
pub use url::Url;
