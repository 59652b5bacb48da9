//! The `tfsmoke markers` command: list the embedded preset library.

use anyhow::{Result, bail};

use tfsmoke_core::presets;

/// Execute `tfsmoke markers`.
pub fn run_markers(provider: Option<&str>) -> Result<()> {
    let providers = match provider {
        Some(p) => {
            if !presets::available_providers().iter().any(|known| known == p) {
                bail!(
                    "unknown provider {p:?} (available: {})",
                    presets::available_providers().join(", ")
                );
            }
            vec![p.to_owned()]
        }
        None => presets::available_providers(),
    };

    for provider in providers {
        println!("{provider}:");
        for preset in presets::presets_for_provider(&provider) {
            println!(
                "  {:<24} {:<40} {}",
                preset.name, preset.marker, preset.description
            );
        }
        println!();
    }

    Ok(())
}
