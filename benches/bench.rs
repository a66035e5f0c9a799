//! Path cleaning and routing benchmarks.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hyper::{Body, Request, Response};
use muxrouter::path::clean;
use muxrouter::{RegexCache, Router};

// path, result
fn clean_tests() -> Vec<(&'static str, &'static str)> {
    vec![
        // Already clean
        ("/", "/"),
        ("/abc", "/abc"),
        ("/a/b/c", "/a/b/c"),
        ("/abc/", "/abc/"),
        ("/a/b/c/", "/a/b/c/"),
        // missing root
        ("", "/"),
        ("a/", "/a/"),
        ("abc", "/abc"),
        ("abc/def", "/abc/def"),
        ("a/b/c", "/a/b/c"),
        // Remove doubled slash
        ("//", "/"),
        ("/abc//", "/abc/"),
        ("/abc//def//ghi", "/abc/def/ghi"),
        ("//abc//", "/abc/"),
        // Remove . elements
        (".", "/"),
        ("./", "/"),
        ("/abc/./def", "/abc/def"),
        ("/abc/.", "/abc"),
        // Remove .. elements
        ("..", "/"),
        ("../../abc", "/abc"),
        ("/abc/def/../ghi/../jkl", "/abc/jkl"),
        ("/abc/def/../../../ghi/jkl/../../../mno", "/mno"),
        // Combinations
        ("abc/./../def", "/def"),
        ("abc/../../././../def", "/def"),
    ]
}

fn bench_path_clean(c: &mut Criterion) {
    let tests = clean_tests();

    c.bench_function("path_clean", |b| {
        b.iter(|| {
            for test in &tests {
                black_box(clean(test.0));
                black_box(clean(test.1));
            }
        });
    });
}

fn bench_path_clean_long(c: &mut Criterion) {
    let mut test_paths: Vec<(String, String)> = Vec::new();
    for i in (1..1234).step_by(7) {
        let ss = "a".repeat(i);

        let correct_path = format!("/{}", ss);
        test_paths.push((ss.clone(), correct_path.clone()));
        test_paths.push((format!("//{}", ss), correct_path.clone()));
        test_paths.push((format!("//{}/b/..", ss), correct_path));
    }

    c.bench_function("path_clean_long", |b| {
        b.iter(|| {
            for test in &test_paths {
                black_box(clean(&test.0));
                black_box(clean(&test.1));
            }
        });
    });
}

async fn handler(_: Request<Body>) -> hyper::Result<Response<Body>> {
    Ok(Response::new(Body::empty()))
}

fn build_router(num_routes: usize) -> Router {
    let mut router = Router::new();
    router.regex_compiler(RegexCache::new());

    for i in 0..num_routes / 2 {
        router.get(&format!("/api/v1/resource{i}"), handler);
        router.get(&format!("/api/v1/resource{i}/{{id:[0-9]+}}"), handler);
    }

    router
}

fn request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn bench_match(c: &mut Criterion) {
    let router = build_router(100);
    let hit = request("/api/v1/resource25/12345");
    let miss = request("/api/v1/nonexistent/path");

    c.bench_function("param_match", |b| {
        b.iter(|| black_box(router.match_request(&hit).is_match()));
    });
    c.bench_function("miss", |b| {
        b.iter(|| black_box(router.match_request(&miss).is_match()));
    });
}

criterion_group!(benches, bench_path_clean, bench_path_clean_long, bench_match);
criterion_main!(benches);
