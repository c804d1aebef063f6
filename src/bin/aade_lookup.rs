//! Command-line publicity lookup.
//!
//! Usage: `aade-lookup <afm> [called_by_afm] [--debug]`
//!
//! Credentials come from `AADE_USERNAME` / `AADE_PASSWORD` (a `.env` file is
//! honoured). The normalized result is printed as JSON.

use aade_publicity::client::get_company_publicity;
use dotenvy::dotenv;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let debug = args.iter().any(|a| a == "--debug");
    args.retain(|a| a != "--debug");

    tracing_subscriber::fmt()
        .with_env_filter(if debug {
            "aade_publicity=debug"
        } else {
            "aade_publicity=warn"
        })
        .init();

    let afm = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("usage: aade-lookup <afm> [called_by_afm] [--debug]"))?;
    let called_by = args.get(1).map(String::as_str);

    let username = env::var("AADE_USERNAME")
        .map_err(|_| anyhow::anyhow!("AADE_USERNAME environment variable required"))?;
    let password = env::var("AADE_PASSWORD")
        .map_err(|_| anyhow::anyhow!("AADE_PASSWORD environment variable required"))?;

    let result = get_company_publicity(afm, &username, &password, called_by, debug).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.has_errors {
        std::process::exit(2);
    }
    Ok(())
}
