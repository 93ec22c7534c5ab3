use histoscan_core::config::{user_config_dir, AnalysisConfig};

/// Write the default configuration to `~/.histoscan/histoscan.yml`.
///
/// Safe to run multiple times: an existing file is kept unless `force` is true.
pub fn cmd_init(force: bool) -> Result<(), String> {
    let config_dir = user_config_dir().ok_or("Could not determine home directory")?;
    let config_path = config_dir.join("histoscan.yml");

    println!(
        "Initializing histoscan configuration in: {}",
        config_dir.display()
    );

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| format!("Failed to create config directory: {}", e))?;

    if config_path.exists() && !force {
        println!("  Skipped: histoscan.yml (already exists, use --force to overwrite)");
        return Ok(());
    }

    let yaml = AnalysisConfig::default()
        .to_yaml()
        .map_err(|e| format!("Failed to render default config: {}", e))?;
    std::fs::write(&config_path, yaml)
        .map_err(|e| format!("Failed to write {}: {}", config_path.display(), e))?;

    println!("  Wrote: histoscan.yml");
    println!();
    println!("Edit {} to change transform and scorer defaults.", config_path.display());
    Ok(())
}
