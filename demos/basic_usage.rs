//! Basic interception example
//!
//! Demonstrates suppressing, rewriting and redirecting console calls.
//!
//! Run with: cargo run --example basic_usage

use console_interceptor::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Console Interceptor - Basic Usage Example ===\n");

    let context = ConsoleContext::with_console(StdConsole::new());

    println!("1. Before interception:");
    context.console().log(&[json!("plain log"), json!(1)])?;
    context.console().debug(&[json!("debug is visible")])?;

    let disable = context.enable(
        handler(|call, _| {
            let decision = match call.method {
                // Hide debug noise
                ConsoleMethod::Debug => Decision::Suppress,
                // Promote warnings to errors
                ConsoleMethod::Warn => Decision::redirect(ConsoleMethod::Error),
                // Prefix everything else
                _ => Decision::with_arguments(
                    std::iter::once(json!("[app]"))
                        .chain(call.arguments.iter().cloned())
                        .collect::<Vec<_>>(),
                ),
            };
            Ok(decision.into())
        }),
        InterceptOptions::default(),
    )?;

    println!("\n2. While intercepted:");
    let console = context.console();
    console.log(&[json!("plain log"), json!(1)])?;
    console.debug(&[json!("debug is hidden")])?;
    console.warn(&[json!("warning promoted to error")])?;

    disable.disable();

    println!("\n3. After disable:");
    context.console().debug(&[json!("debug is visible again")])?;

    let metrics = context.metrics();
    println!(
        "\nIntercepted {} calls: {} suppressed, {} redirected",
        metrics.intercepted(),
        metrics.suppressed(),
        metrics.redirected()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
