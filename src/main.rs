// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Mustekala CLI - DevTools Response Interception
//!
//! Example usage and demonstration of the mustekala library.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use mustekala::{
    BodyRewriter, DebuggerSession, ExchangeOutcome, HeaderAudit, InterceptConfig,
    InterceptionHandler, PluginRegistry, ScriptInjector, TrafficLogger,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mustekala=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "intercept" => {
            if args.len() < 3 {
                eprintln!("Usage: mustekala intercept <ws-url>");
                return ExitCode::from(1);
            }
            let registry = PluginRegistry::new();
            run_session(&args[2], registry).await
        }
        "inject" => {
            if args.len() < 4 {
                eprintln!("Usage: mustekala inject <ws-url> <script-src>");
                return ExitCode::from(1);
            }
            let registry =
                PluginRegistry::new().with_mutator("injector", ScriptInjector::external(&args[3]));
            run_session(&args[2], registry).await
        }
        "rewrite" => {
            if args.len() < 5 {
                eprintln!("Usage: mustekala rewrite <ws-url> <find> <replace>");
                return ExitCode::from(1);
            }
            let registry = PluginRegistry::new()
                .with_mutator("rewriter", BodyRewriter::new(&args[3], &args[4]));
            run_session(&args[2], registry).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("mustekala {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Mustekala - DevTools Response Interception for Security Testing

USAGE:
    mustekala <COMMAND> [OPTIONS]

COMMANDS:
    intercept <ws-url>                  Observe and audit intercepted responses
    inject <ws-url> <script-src>        Inject a script tag into document responses
    rewrite <ws-url> <find> <replace>   Replace literal text in response bodies
    help                                Show this help message
    version                             Show version information

The <ws-url> is a page target's DevTools endpoint, e.g.
ws://localhost:9222/devtools/page/<target-id> (start the browser with
--remote-debugging-port=9222 and list targets at http://localhost:9222/json).

EXAMPLES:
    mustekala intercept ws://localhost:9222/devtools/page/8A09
    mustekala inject ws://localhost:9222/devtools/page/8A09 https://attacker.example/hook.js
    mustekala rewrite ws://localhost:9222/devtools/page/8A09 "Example Domain" "Intercepted"

For more information, see: https://github.com/bountyyfi/mustekala
"#
    );
}

/// Attach to the target, run interception until the connection closes,
/// then print a summary of what flowed through.
async fn run_session(ws_url: &str, registry: PluginRegistry) -> ExitCode {
    // every session observes traffic and audits security headers
    let audit = HeaderAudit::new();
    let findings = Arc::clone(&audit.findings);
    let registry = registry
        .with_analyzer("traffic-log", TrafficLogger::default())
        .with_analyzer("header-audit", audit);

    match intercept(ws_url, registry).await {
        Ok(summary) => {
            println!("\n=== Session summary ===");
            println!("Exchanges handled: {}", summary.handled);
            println!("  mutated:       {}", summary.mutated);
            println!("  passed through: {}", summary.passed_through);
            println!("  failed stages: {}", summary.failed);

            let findings = findings.read();
            if !findings.is_empty() {
                println!("\n=== Missing security headers ({}) ===", findings.len());
                for finding in findings.iter() {
                    println!("  {} missing {}", finding.url, finding.header);
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Interception failed: {:#}", e);
            ExitCode::from(1)
        }
    }
}

struct SessionSummary {
    handled: usize,
    mutated: usize,
    passed_through: usize,
    failed: usize,
}

async fn intercept(ws_url: &str, registry: PluginRegistry) -> anyhow::Result<SessionSummary> {
    let config = InterceptConfig::default();

    let mut session = DebuggerSession::connect(ws_url)
        .await
        .with_context(|| format!("connecting to {}", ws_url))?;
    session
        .attach(&config)
        .await
        .context("enabling protocol domains and interception")?;

    let transport = Arc::new(session.transport());
    let handler = Arc::new(InterceptionHandler::new(
        transport,
        Arc::new(registry),
        config,
    ));
    let log = handler.exchange_log();

    session
        .run(Arc::clone(&handler))
        .await
        .context("interception event loop")?;

    let failed = log.count(ExchangeOutcome::FetchFailed)
        + log.count(ExchangeOutcome::DecodeFailed)
        + log.count(ExchangeOutcome::MutationFailed);

    Ok(SessionSummary {
        handled: log.len(),
        mutated: log.count(ExchangeOutcome::Mutated),
        passed_through: log.count(ExchangeOutcome::PassThrough)
            + log.count(ExchangeOutcome::OutOfScope)
            + log.count(ExchangeOutcome::MissingId),
        failed,
    })
}
