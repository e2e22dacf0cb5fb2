// RESTful routing example: controllers, global prefix, and dispatch order

use trellis::logging::{LogConfig, LogFormat, LogLevel};
use trellis::prelude::*;

#[tokio::main]
async fn main() -> Result<(), RouterError> {
    let _guard = LogConfig::new()
        .level(LogLevel::Debug)
        .format(LogFormat::Pretty)
        .with_colors(true)
        .init();

    let declarations = StaticDeclarations::new()
        .controller(
            ControllerDeclaration::new("UserController", "/users")
                .middleware("request-logger")
                .route(RouteDeclaration::new("GET", "/", "find_all"))
                .route(RouteDeclaration::new("GET", "/recent", "find_recent"))
                .route(RouteDeclaration::new("GET", "/:id", "find_one"))
                .route(RouteDeclaration::new("POST", "/", "create").middleware("body-parser"))
                .route(RouteDeclaration::new("GET", "/healthz", "health").ignore_prefix()),
        )
        .controller(
            ControllerDeclaration::new("FileController", "/files")
                .route(RouteDeclaration::new("GET", "/**", "serve"))
                .route(RouteDeclaration::new("GET", "/latest", "latest")),
        )
        .controller(
            ControllerDeclaration::new("HomeController", "/")
                .ignore_global_prefix()
                .route(RouteDeclaration::new("GET", "/", "home"))
                .route(RouteDeclaration::new("GET", "/*", "not_found")),
        );

    let service =
        RouterService::with_config(declarations, RouterConfig::new().global_prefix("/api"));

    println!("Route groups (dispatch order):");
    for record in service.group_priority_list().await? {
        println!("  {:>5}  {}", record.priority, record.prefix);
    }

    println!("\nRoutes (dispatch order):");
    for entry in service.flattened_routes().await? {
        println!(
            "  {:<6} {:<12} {:<12} -> {}",
            entry.method,
            entry.group_prefix,
            entry.pattern.raw(),
            entry.handler
        );
    }

    Ok(())
}
