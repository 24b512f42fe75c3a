//! End-to-end scenarios across the core algebra and the URL adapter.

use serde::{Deserialize, Serialize};
use switchback_core::{
    Method, PartialIso, Router, get, json_body, lit, path, post, query, query_opt, root,
};
use switchback_url::{Request, RouterExt, Url};

#[derive(Debug, Clone, PartialEq)]
enum Site {
    Home,
    User(i64),
    Doc(String),
    Search(String),
    Page(i64, Option<i64>),
}

/// Iso for a payload-free route variant.
fn unit_variant<T>(route: T) -> PartialIso<(), T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let expected = route.clone();
    PartialIso::new(
        move |_: &()| Some(route.clone()),
        move |candidate: &T| (*candidate == expected).then_some(()),
    )
}

fn site_router() -> Router<Site> {
    let user = get()
        .discard_left(lit("users"))
        .discard_left(path::<i64>())
        .map(PartialIso::new(
            |id: &i64| Some(Site::User(*id)),
            |site: &Site| match site {
                Site::User(id) => Some(*id),
                _ => None,
            },
        ));

    let doc = get()
        .discard_left(lit("docs"))
        .discard_left(path::<String>())
        .map(PartialIso::new(
            |slug: &String| Some(Site::Doc(slug.clone())),
            |site: &Site| match site {
                Site::Doc(slug) => Some(slug.clone()),
                _ => None,
            },
        ));

    let search = get()
        .discard_left(lit("search"))
        .discard_left(query::<String>("q"))
        .map(PartialIso::new(
            |q: &String| Some(Site::Search(q.clone())),
            |site: &Site| match site {
                Site::Search(q) => Some(q.clone()),
                _ => None,
            },
        ));

    let page = get()
        .discard_left(lit("pages"))
        .discard_left(path::<i64>())
        .product(query_opt::<i64>("version"))
        .map(PartialIso::new(
            |(id, version): &(i64, Option<i64>)| Some(Site::Page(*id, *version)),
            |site: &Site| match site {
                Site::Page(id, version) => Some((*id, *version)),
                _ => None,
            },
        ));

    let home = get().discard_left(root()).map(unit_variant(Site::Home));

    // The root route parses any input, so it goes last.
    Router::one_of([user, doc, search, page, home])
}

#[test]
fn matches_and_prints_the_user_route() {
    let site = site_router();
    assert_eq!(site.match_path("/users/42"), Some(Site::User(42)));
    assert_eq!(site.match_path("/users/abc"), None);
    assert_eq!(site.match_path("/users/42/profile"), None);
    assert_eq!(site.path_for(&Site::User(42)).as_deref(), Some("/users/42"));
}

#[test]
fn the_method_guard_distinguishes_requests() {
    let site = site_router();
    assert_eq!(
        site.match_request(&Request::get("/users/9")),
        Some(Site::User(9))
    );
    assert_eq!(site.match_request(&Request::post("/users/9")), None);
}

#[test]
fn search_round_trips_with_query() {
    let site = site_router();
    assert_eq!(
        site.match_path("/search?q=cats"),
        Some(Site::Search("cats".to_string()))
    );
    assert_eq!(
        site.path_for(&Site::Search("cats".to_string())).as_deref(),
        Some("/search?q=cats")
    );
    // Unrelated query keys do not break the match.
    assert_eq!(
        site.match_path("/search?q=cats&utm_source=feed"),
        Some(Site::Search("cats".to_string()))
    );
    // Escapes decode on the way in and re-encode on the way out.
    assert_eq!(
        site.match_path("/search?q=ca%20ts"),
        Some(Site::Search("ca ts".to_string()))
    );
    assert_eq!(
        site.path_for(&Site::Search("ca ts".to_string())).as_deref(),
        Some("/search?q=ca%20ts")
    );
}

#[test]
fn path_segments_percent_round_trip() {
    let site = site_router();
    assert_eq!(
        site.match_path("/docs/hello%20world"),
        Some(Site::Doc("hello world".to_string()))
    );
    assert_eq!(
        site.path_for(&Site::Doc("hello world".to_string()))
            .as_deref(),
        Some("/docs/hello%20world")
    );
    // A slash inside a segment value stays escaped.
    assert_eq!(
        site.path_for(&Site::Doc("a/b".to_string())).as_deref(),
        Some("/docs/a%2Fb")
    );
    assert_eq!(site.match_path("/docs/a%2Fb"), Some(Site::Doc("a/b".to_string())));
}

#[test]
fn optional_query_params_read_absent_as_none() {
    let site = site_router();
    assert_eq!(site.match_path("/pages/5"), Some(Site::Page(5, None)));
    assert_eq!(
        site.match_path("/pages/5?version=2"),
        Some(Site::Page(5, Some(2)))
    );
    assert_eq!(site.match_path("/pages/5?version=latest"), None);
    assert_eq!(
        site.path_for(&Site::Page(5, None)).as_deref(),
        Some("/pages/5")
    );
    assert_eq!(
        site.path_for(&Site::Page(5, Some(2))).as_deref(),
        Some("/pages/5?version=2")
    );
}

#[test]
fn the_root_route_renders_as_slash() {
    let site = site_router();
    assert_eq!(site.match_path("/"), Some(Site::Home));
    assert_eq!(site.path_for(&Site::Home).as_deref(), Some("/"));

    let base = Url::parse("https://example.com").unwrap();
    assert_eq!(
        site.url_for(&Site::Home, &base).unwrap().as_str(),
        "https://example.com/"
    );
}

#[test]
fn absolute_urls_match_ignoring_host_and_fragment() {
    let site = site_router();
    let url = Url::parse("https://example.com/users/42?utm_source=feed#anchor").unwrap();
    assert_eq!(site.match_url(&url), Some(Site::User(42)));
    assert_eq!(
        site.match_path("https://example.com/users/7"),
        Some(Site::User(7))
    );
}

#[test]
fn url_for_joins_against_a_base() {
    let site = site_router();
    let base = Url::parse("https://example.com/app").unwrap();
    assert_eq!(
        site.url_for(&Site::User(42), &base).unwrap().as_str(),
        "https://example.com/users/42"
    );
}

#[test]
fn templates_render_placeholder_targets() {
    let site = site_router();
    insta::assert_snapshot!(site.template_path(&Site::User(0)).unwrap(), @"/users/:i64");
    insta::assert_snapshot!(
        site.template_path(&Site::Doc(String::new())).unwrap(),
        @"/docs/:String"
    );
    insta::assert_snapshot!(
        site.template_path(&Site::Search(String::new())).unwrap(),
        @"/search?q=:String"
    );

    let base = Url::parse("https://example.com").unwrap();
    assert_eq!(
        site.template_url(&Site::User(0), &base).unwrap().as_str(),
        "https://example.com/users/:i64"
    );

    let request = site.template_request(&Site::Search(String::new())).unwrap();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.target, "/search?q=:String");
}

#[derive(Debug, Clone, PartialEq)]
enum Feed {
    All,
    ByTag(String),
}

#[test]
fn alternative_order_decides_overlapping_grammars() {
    let all = lit("feed").map(unit_variant(Feed::All));
    let by_tag = lit("feed")
        .discard_left(path::<String>())
        .map(PartialIso::new(
            |tag: &String| Some(Feed::ByTag(tag.clone())),
            |feed: &Feed| match feed {
                Feed::ByTag(tag) => Some(tag.clone()),
                Feed::All => None,
            },
        ));

    let table = all.clone().or(by_tag.clone());
    assert_eq!(table.match_path("/feed"), Some(Feed::All));
    // The shorter grammar commits on the shared prefix and the leftover
    // segment fails the end check; there is no backtracking.
    assert_eq!(table.match_path("/feed/rust"), None);

    let flipped = by_tag.or(all);
    assert_eq!(
        flipped.match_path("/feed/rust"),
        Some(Feed::ByTag("rust".to_string()))
    );
    assert_eq!(flipped.match_path("/feed"), Some(Feed::All));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NewUser {
    name: String,
}

#[test]
fn json_requests_round_trip() {
    let router = post()
        .discard_left(lit("users"))
        .discard_left(json_body::<NewUser>());
    let ada = NewUser {
        name: "ada".to_string(),
    };

    let request = router.request_for(&ada).unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.target, "/users");
    assert_eq!(router.match_request(&request), Some(ada.clone()));

    // A GET against the same target does not match.
    assert_eq!(router.match_request(&Request::get("/users")), None);

    // The same body built by hand.
    let by_hand = Request::post("/users").with_body(serde_json::to_vec(&ada).unwrap());
    assert_eq!(router.match_request(&by_hand), Some(ada));
}
