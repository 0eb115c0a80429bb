//! Error recovery example
//!
//! Demonstrates the default recovery after a failing handler, and a custom
//! `on_error` callback that keeps interception alive.
//!
//! Run with: cargo run --example error_recovery

use console_interceptor::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Console Interceptor - Error Recovery Example ===\n");

    println!("1. Default recovery (error logged, console restored, call replayed):");
    let context = ConsoleContext::with_console(StdConsole::new());
    context.enable(
        handler(|_, _| Err("lookup service unavailable".into())),
        InterceptOptions::default(),
    )?;
    context.console().log(&[json!("this message still gets through")])?;
    println!("   interception enabled afterwards: {}", context.is_enabled());

    println!("\n2. Custom on_error keeps interception enabled:");
    let context = ConsoleContext::with_console(StdConsole::new());
    let options = InterceptOptions::builder()
        .on_error(|error, recovery| {
            eprintln!("   [on_error] {} while handling '{}'", error, recovery.method());
            recovery.log();
        })
        .build();
    context.enable(
        handler(|call, _| {
            if call.arguments.is_empty() {
                return Err("empty console call".into());
            }
            Ok(Decision::PassThrough.into())
        }),
        options,
    )?;
    context.console().warn(&[])?;
    context.console().warn(&[json!("regular warning")])?;
    println!("   interception enabled afterwards: {}", context.is_enabled());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
