//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Caravel;

/// Remove everything a previous generation produced
pub fn run(app: &Caravel) -> Result<()> {
    if app.public_dir.exists() {
        fs::remove_dir_all(&app.public_dir)?;
        tracing::info!("Deleted: {:?}", app.public_dir);
    }

    Ok(())
}
