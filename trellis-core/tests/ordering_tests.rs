//! Integration tests for route precedence and group dispatch order

use trellis_core::*;

fn table_for(patterns: &[&str]) -> RouteTable {
    let mut controller = ControllerDeclaration::new("TestController", "/");
    for pattern in patterns {
        controller = controller.route(RouteDeclaration::new("GET", *pattern, "handler"));
    }
    RouteCollector::new(RouterConfig::default())
        .collect(&[controller], &[])
        .unwrap()
}

fn patterns_of(table: &RouteTable, prefix: &str) -> Vec<String> {
    table
        .group(prefix)
        .unwrap()
        .iter()
        .map(|entry| entry.pattern.raw().to_string())
        .collect()
}

#[test]
fn test_literals_before_params_before_wildcards() {
    let table = table_for(&["/files/**", "/files/:id", "/files/recent"]);

    assert_eq!(
        patterns_of(&table, "/"),
        ["/files/recent", "/files/:id", "/files/**"]
    );
}

#[test]
fn test_more_literal_segments_first() {
    let table = table_for(&["/users/:id/:section", "/users/:id/posts/:pid"]);

    assert_eq!(
        patterns_of(&table, "/"),
        ["/users/:id/posts/:pid", "/users/:id/:section"]
    );
}

#[test]
fn test_deeper_path_first_on_weight_tie() {
    let table = table_for(&["/x/:a", "/x/:a/:b"]);

    assert_eq!(patterns_of(&table, "/"), ["/x/:a/:b", "/x/:a"]);
}

#[test]
fn test_longer_normalized_form_first() {
    // Same class, weight, and depth; the longer placeholder form is the
    // more constrained pattern
    let table = table_for(&["/users/x/:id", "/users/:id/posts"]);

    assert_eq!(
        patterns_of(&table, "/"),
        ["/users/:id/posts", "/users/x/:id"]
    );
}

#[test]
fn test_shorter_raw_pattern_breaks_final_tie() {
    let table = table_for(&["/x/**", "/x/*"]);

    assert_eq!(patterns_of(&table, "/"), ["/x/*", "/x/**"]);
}

#[test]
fn test_root_before_catch_all() {
    let table = table_for(&["/*", "/"]);

    assert_eq!(patterns_of(&table, "/"), ["/", "/*"]);
}

#[test]
fn test_method_variants_keep_declaration_order() {
    let table = RouteCollector::new(RouterConfig::default())
        .collect(
            &[ControllerDeclaration::new("TestController", "/")
                .route(RouteDeclaration::new("GET", "/a", "get_a"))
                .route(RouteDeclaration::new("POST", "/a", "post_a"))
                .route(RouteDeclaration::new("PUT", "/a", "put_a"))],
            &[],
        )
        .unwrap();

    let methods: Vec<&str> = table
        .group("/")
        .unwrap()
        .iter()
        .map(|entry| entry.method.as_str())
        .collect();
    assert_eq!(methods, ["GET", "POST", "PUT"]);
}

#[test]
fn test_longest_prefix_group_first() {
    let table = RouteCollector::new(RouterConfig::default())
        .collect(
            &[
                ControllerDeclaration::new("HomeController", "/")
                    .route(RouteDeclaration::new("GET", "/", "index")),
                ControllerDeclaration::new("StatusController", "/api")
                    .route(RouteDeclaration::new("GET", "/status", "status")),
                ControllerDeclaration::new("UserController", "/api/users")
                    .route(RouteDeclaration::new("GET", "/:id", "find_one")),
            ],
            &[],
        )
        .unwrap();

    let prefixes: Vec<&str> = table
        .flattened()
        .iter()
        .map(|entry| entry.group_prefix.as_str())
        .collect();
    assert_eq!(prefixes, ["/api/users", "/api", "/"]);
}

#[test]
fn test_priority_breaks_prefix_length_tie() {
    let table = RouteCollector::new(RouterConfig::default())
        .collect(
            &[
                ControllerDeclaration::new("AaaController", "/aaa")
                    .priority(1)
                    .route(RouteDeclaration::new("GET", "/", "a")),
                ControllerDeclaration::new("BbbController", "/bbb")
                    .priority(9)
                    .route(RouteDeclaration::new("GET", "/", "b")),
            ],
            &[],
        )
        .unwrap();

    let prefixes: Vec<&str> = table
        .priority_list()
        .iter()
        .map(|record| record.prefix.as_str())
        .collect();
    assert_eq!(prefixes, ["/bbb", "/aaa"]);
}

#[test]
fn test_first_seen_breaks_full_tie() {
    let table = RouteCollector::new(RouterConfig::default())
        .collect(
            &[
                ControllerDeclaration::new("AaaController", "/aaa")
                    .route(RouteDeclaration::new("GET", "/", "a")),
                ControllerDeclaration::new("BbbController", "/bbb")
                    .route(RouteDeclaration::new("GET", "/", "b")),
            ],
            &[],
        )
        .unwrap();

    let prefixes: Vec<&str> = table
        .priority_list()
        .iter()
        .map(|record| record.prefix.as_str())
        .collect();
    assert_eq!(prefixes, ["/aaa", "/bbb"]);
}

#[test]
fn test_full_rest_surface_dispatch_order() {
    let table = RouteCollector::new(RouterConfig::new().global_prefix("/api"))
        .collect(
            &[
                ControllerDeclaration::new("UserController", "/users")
                    .route(RouteDeclaration::new("GET", "/", "find_all"))
                    .route(RouteDeclaration::new("GET", "/recent", "find_recent"))
                    .route(RouteDeclaration::new("GET", "/:id", "find_one"))
                    .route(RouteDeclaration::new("GET", "/:id/posts", "find_posts"))
                    .route(RouteDeclaration::new("GET", "/:id/*", "user_fallback")),
                ControllerDeclaration::new("FileController", "/files")
                    .route(RouteDeclaration::new("GET", "/**", "serve"))
                    .route(RouteDeclaration::new("GET", "/latest", "latest")),
                ControllerDeclaration::new("AppController", "/")
                    .ignore_global_prefix()
                    .route(RouteDeclaration::new("GET", "/", "home"))
                    .route(RouteDeclaration::new("GET", "/*", "not_found")),
            ],
            &[],
        )
        .unwrap();

    let order: Vec<(String, String)> = table
        .flattened()
        .iter()
        .map(|entry| (entry.group_prefix.clone(), entry.pattern.raw().to_string()))
        .collect();

    let expected: Vec<(String, String)> = [
        ("/api/users", "/recent"),
        ("/api/users", "/"),
        ("/api/users", "/:id/posts"),
        ("/api/users", "/:id"),
        ("/api/users", "/:id/*"),
        ("/api/files", "/latest"),
        ("/api/files", "/**"),
        ("/", "/"),
        ("/", "/*"),
    ]
    .iter()
    .map(|(prefix, pattern)| (prefix.to_string(), pattern.to_string()))
    .collect();

    assert_eq!(order, expected);
}
