//! Slated command-line entry point.
//!
//! Reads a scheduling request from the arguments, runs it through the
//! pipeline, and prints the outcome as JSON.

#![allow(clippy::print_stdout)]

use anyhow::Context as _;
use slated_app::AppContext;
use slated_infra::config::loader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    slated_app::logging::init();

    let config = loader::load().context("failed to load configuration")?;
    info!(
        tenant_id = %config.auth.tenant_id,
        channel = config.notify.default_channel.as_str(),
        "starting"
    );
    let ctx = AppContext::init(config);

    let mut args = std::env::args().skip(1);
    let user_request = args
        .next()
        .context("usage: slated <request text> [caller-id]")?;
    let caller_id = args.next().unwrap_or_else(|| "anonymous".to_string());

    let outcome = ctx.handle(&user_request, &caller_id).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
