use anyhow::Result;
use safesend_core::SafeSendConfig;

fn main() -> Result<()> {
    let config = SafeSendConfig::load()?;

    println!("SafeSend Configuration:\n");
    println!("  Catalog URL: {}", config.catalog_url);
    println!("  RPC URL: {}", config.rpc_url);
    println!("  Safe Address: {}", config.safe_address.as_deref().unwrap_or("(not set)"));
    match config.chain_id {
        Some(chain_id) => println!("  Chain ID: {}", chain_id),
        None => println!("  Chain ID: (from RPC)"),
    }
    println!("  Balance Timeout: {} ms", config.balance_timeout_ms);
    println!("  Log Level: {}", config.log_level);
    Ok(())
}
