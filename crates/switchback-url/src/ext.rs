//! The convenience surface over core routers.

use switchback_core::{Method, RequestData, Router};
use url::Url;

use crate::request::{Request, request_data, request_from};
use crate::target::{parse_path, parse_query, render_target, split_target};

/// Matching and rendering over transport requests, URL values, and
/// target strings.
///
/// `match_url` and `match_path` carry no method, so the method defaults
/// to GET; routes guarded on other methods only match through
/// [`RouterExt::match_request`].
pub trait RouterExt<A> {
    /// Match a transport request to completion.
    fn match_request(&self, request: &Request) -> Option<A>;

    /// Match an absolute URL. Scheme, host, and fragment are ignored.
    fn match_url(&self, url: &Url) -> Option<A>;

    /// Match an origin-form target (`/path?query`) or an absolute URL
    /// string.
    fn match_path(&self, target: &str) -> Option<A>;

    /// The request that parses back to `value`.
    fn request_for(&self, value: &A) -> Option<Request>;

    /// The rendered target for `value`, always starting with `/`.
    fn path_for(&self, value: &A) -> Option<String>;

    /// The absolute URL for `value` under `base`.
    fn url_for(&self, value: &A, base: &Url) -> Option<Url>;

    /// The placeholder request for the branch `value` selects.
    fn template_request(&self, value: &A) -> Option<Request>;

    /// The placeholder target for the branch `value` selects.
    fn template_path(&self, value: &A) -> Option<String>;

    /// The placeholder URL for the branch `value` selects, under `base`.
    fn template_url(&self, value: &A, base: &Url) -> Option<Url>;
}

impl<A: 'static> RouterExt<A> for Router<A> {
    fn match_request(&self, request: &Request) -> Option<A> {
        self.match_data(request_data(request))
    }

    fn match_url(&self, url: &Url) -> Option<A> {
        self.match_data(RequestData {
            method: Some(Method::Get),
            path: parse_path(url.path()),
            query: url.query().map(parse_query).unwrap_or_default(),
            body: None,
        })
    }

    fn match_path(&self, target: &str) -> Option<A> {
        if let Ok(url) = Url::parse(target) {
            return self.match_url(&url);
        }
        let (path, query) = split_target(target);
        self.match_data(RequestData {
            method: Some(Method::Get),
            path,
            query,
            body: None,
        })
    }

    fn request_for(&self, value: &A) -> Option<Request> {
        self.print(value).map(|data| request_from(&data))
    }

    fn path_for(&self, value: &A) -> Option<String> {
        self.print(value).map(|data| render_target(&data))
    }

    fn url_for(&self, value: &A, base: &Url) -> Option<Url> {
        let target = self.path_for(value)?;
        base.join(&target).ok()
    }

    fn template_request(&self, value: &A) -> Option<Request> {
        self.template(value).map(|data| request_from(&data))
    }

    fn template_path(&self, value: &A) -> Option<String> {
        self.template(value).map(|data| render_target(&data))
    }

    fn template_url(&self, value: &A, base: &Url) -> Option<Url> {
        let target = self.template_path(value)?;
        base.join(&target).ok()
    }
}
