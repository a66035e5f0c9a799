use muxrouter::Router;

use hyper::{Body, Request};
use proptest::prelude::*;

fn article_router() -> Router {
    let mut router = Router::new();
    router
        .host("{subdomain:[a-z]+}.example.com")
        .path("/articles/{category}/{id:[0-9]+}")
        .queries(&["filter", "{filter}"])
        .name("article");
    router
}

proptest! {
    #[test]
    fn built_urls_match_their_route(
        subdomain in "[a-z]{1,8}",
        category in "[a-zA-Z0-9 _-]{1,12}",
        id in "[0-9]{1,6}",
        filter in "[a-z0-9 &=+%]{1,10}",
    ) {
        let router = article_router();
        let route = router.named("article").unwrap();
        let url = route
            .url(&["subdomain", &subdomain, "category", &category, "id", &id, "filter", &filter])
            .unwrap();

        let req = Request::builder()
            .uri(url.to_string())
            .body(Body::empty())
            .unwrap();
        let m = router.match_request(&req);
        prop_assert!(m.is_match());
        prop_assert_eq!(m.vars.get("subdomain"), Some(subdomain.as_str()));
        prop_assert_eq!(m.vars.get("category"), Some(category.as_str()));
        prop_assert_eq!(m.vars.get("id"), Some(id.as_str()));
        prop_assert_eq!(m.vars.get("filter"), Some(filter.as_str()));
    }

    #[test]
    fn values_outside_the_pattern_are_rejected(id in "[a-z]{1,6}") {
        let router = article_router();
        let route = router.named("article").unwrap();
        let result = route.url(&["subdomain", "www", "category", "c", "id", &id, "filter", "f"]);
        prop_assert!(result.is_err());
    }
}
