//! Async handler example
//!
//! Demonstrates deferred handler replies: the console call returns
//! immediately and the message is forwarded once the handler settles.
//!
//! Run with: cargo run --example async_handlers

use async_trait::async_trait;
use console_interceptor::prelude::*;
use serde_json::json;
use std::time::Duration;

/// Pretends to look up a request id before letting the message through
struct Enricher;

#[async_trait]
impl AsyncHandler for Enricher {
    async fn handle(&self, call: &Invocation) -> std::result::Result<Decision, HandlerError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let mut arguments = vec![json!("[req-7f3a]")];
        arguments.extend(call.arguments.iter().cloned());
        Ok(Decision::with_arguments(arguments))
    }
}

fn main() -> Result<()> {
    println!("=== Console Interceptor - Async Handlers Example ===\n");

    let context = ConsoleContext::with_console(StdConsole::new());
    let options = InterceptOptions::builder()
        .handler_timeout(Duration::from_secs(1))
        .build();
    context.enable(async_handler(Enricher), options)?;

    let console = context.console();
    for i in 0..3 {
        console.info(&[json!(format!("request {} handled", i))])?;
    }
    println!("1. Three calls returned before any output was written");

    std::thread::sleep(Duration::from_millis(200));

    println!(
        "\n2. {} deferred replies, {} forwarded",
        context.metrics().deferred(),
        context.metrics().forwarded()
    );

    context.disable();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
