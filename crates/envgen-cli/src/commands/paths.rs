//! Configuration path command.

use std::path::Path;

use envgen_config::{list_snapshots_in, user_config_dir, user_snapshots_dir};

pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let snapshots_dir = user_snapshots_dir();

    println!("Config directory: {}", user_config_dir().display());
    println!(
        "Settings file:    {}{}",
        config_path.display(),
        if config_path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!("Snapshots:        {}", snapshots_dir.display());

    let names = list_snapshots_in(&snapshots_dir);
    if names.is_empty() {
        println!("  (none)");
    } else {
        for name in names {
            println!("  {name}");
        }
    }
    Ok(())
}
