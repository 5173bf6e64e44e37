use std::sync::Arc;

use crate::config::Config;
use crate::fingerprint::{build_fingerprint, collect_inventory};
use crate::hardware::HostInventory;
use crate::output::output_data;

pub async fn handle_show_command(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let fingerprint = build_fingerprint(Arc::new(HostInventory)).await?;
    output_data(&fingerprint, format)?;
    Ok(())
}

pub async fn handle_inventory_command(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let inventory = collect_inventory(Arc::new(HostInventory)).await?;
    output_data(&inventory, format)?;
    Ok(())
}

pub fn handle_decode_command(
    cfg: &Config,
    payload: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let fingerprint = cfg.strategy.decode(payload)?;
    output_data(&fingerprint, format)?;
    Ok(())
}
