// Function trigger example: timers, queues, and HTTP-shaped webhooks

use serde_json::json;
use trellis::prelude::*;

#[tokio::main]
async fn main() -> Result<(), RouterError> {
    let declarations = StaticDeclarations::new()
        .trigger(
            TriggerDeclaration::new("SyncController", "nightly-sync", "timer", "run_sync")
                .payload("schedule", json!("0 0 * * *")),
        )
        .trigger(
            TriggerDeclaration::new("ImageController", "resize-images", "queue", "resize")
                .payload("queue", json!("images"))
                .payload("batch_size", json!(16)),
        )
        .trigger(
            TriggerDeclaration::new("HookController", "github-hook", "webhook", "on_push")
                .http("POST", "/webhooks/github"),
        );

    // The global prefix never applies to trigger entries
    let service =
        RouterService::with_config(declarations, RouterConfig::new().global_prefix("/api"));

    println!("Registered triggers:");
    for entry in service.flattened_routes().await? {
        let Some(binding) = &entry.trigger else {
            continue;
        };
        if entry.is_http() {
            println!(
                "  {:<10} {:<16} {} {} -> {}",
                binding.kind,
                binding.name,
                entry.method,
                entry.pattern.raw(),
                entry.handler
            );
        } else {
            println!(
                "  {:<10} {:<16} payload={} -> {}",
                binding.kind,
                binding.name,
                serde_json::to_string(&binding.payload).unwrap_or_default(),
                entry.handler
            );
        }
    }

    Ok(())
}
