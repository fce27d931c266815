use anyhow::Context;
use poolparty_migration_core::{chain_name, MigrationConfig};

fn main() -> anyhow::Result<()> {
    let config = MigrationConfig::from_env().context("Failed to load migration config")?;

    println!("Pool Party Migration Configuration:\n");
    println!(
        "  Expected Chain: {} ({})",
        config.expected_chain_id,
        chain_name(config.expected_chain_id)
    );
    println!("  Identifier Prefix: {}", config.identifier_prefix);
    println!("  Strict Addresses: {}", config.strict_addresses);
    println!("  Require Token Identity: {}", config.require_token_identity);
    println!("\n{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
