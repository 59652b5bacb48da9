//! Marker preset library.
//!
//! Provides a built-in library of resource-type markers for common
//! providers (AWS, Google, Azure). The presets are defined in
//! `markers.toml` and embedded in the binary at compile time.

use serde::Deserialize;

use crate::check::MarkerCheck;

/// A single marker preset from the embedded library.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerPreset {
    /// Check name (e.g. `compute_instance`), unique within a provider.
    pub name: String,
    /// Provider group this preset belongs to (e.g. `aws`).
    pub provider: String,
    /// Human-readable description of the resource kind.
    pub description: String,
    /// The substring expected in plan output.
    pub marker: String,
}

/// Container for deserializing the embedded TOML file.
#[derive(Debug, Deserialize)]
struct PresetLibrary {
    presets: Vec<MarkerPreset>,
}

/// The embedded marker presets TOML.
static MARKERS_TOML: &str = include_str!("markers.toml");

/// Load all marker presets from the embedded library.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. This is a compile-time
/// invariant: if the binary was built, the TOML is valid.
pub fn load_presets() -> Vec<MarkerPreset> {
    let lib: PresetLibrary =
        toml::from_str(MARKERS_TOML).expect("embedded markers.toml is invalid");
    lib.presets
}

/// Return presets for a given provider group.
pub fn presets_for_provider(provider: &str) -> Vec<MarkerPreset> {
    load_presets()
        .into_iter()
        .filter(|p| p.provider == provider)
        .collect()
}

/// Return the presets of a provider as ready-to-evaluate checks, in
/// library order.
pub fn checks_for_provider(provider: &str) -> Vec<MarkerCheck> {
    presets_for_provider(provider)
        .into_iter()
        .map(|p| MarkerCheck::new(p.name, p.marker))
        .collect()
}

/// Return the distinct provider groups in the library, sorted.
pub fn available_providers() -> Vec<String> {
    let mut providers: Vec<String> = load_presets().into_iter().map(|p| p.provider).collect();
    providers.sort_unstable();
    providers.dedup();
    providers
}
