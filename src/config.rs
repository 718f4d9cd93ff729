use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

use crate::filter::{SIGMA_DEFAULT, SIGMA_MAX, SIGMA_MIN};

const CONFIG_FILE_NAME: &str = "filterlab.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub image_limits: ImageLimits,
    pub default_sigma: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_limits: ImageLimits::default(),
            default_sigma: SIGMA_DEFAULT,
        }
    }
}

impl AppConfig {
    /// Read the first parseable config from the candidate locations,
    /// falling back to defaults.
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match toml::from_str::<Self>(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Self::default()
    }

    pub fn effective_image_limits(&self) -> ImageLimits {
        self.image_limits.sanitized()
    }

    /// Sigma used to seed the slider; kept inside the slider's range.
    pub fn initial_sigma(&self) -> f32 {
        if self.default_sigma.is_finite() {
            self.default_sigma.clamp(SIGMA_MIN, SIGMA_MAX)
        } else {
            SIGMA_DEFAULT
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Filterlab", "Filterlab") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(
                base_dirs
                    .config_dir()
                    .join("filterlab")
                    .join(CONFIG_FILE_NAME),
            );
        }

        paths
    }
}

/// Decode-time limits protecting against pathological inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        // Clamp to reasonable operating bounds to avoid pathological configs.
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(1_000_000, 5_000_000_000); // 1 MP .. 5 GP
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_limits_stay_in_bounds() {
        let limits = ImageLimits {
            image_dim: 1,
            total_pixels: 0,
            alloc_bytes: u64::MAX,
        }
        .sanitized();
        assert_eq!(limits.image_dim, 64);
        assert_eq!(limits.total_pixels, 1_000_000);
        assert_eq!(limits.alloc_bytes, 8 * 1024 * 1024 * 1024);
    }

    #[test]
    fn initial_sigma_falls_back_on_nonsense() {
        let cfg = AppConfig {
            default_sigma: f32::NAN,
            ..AppConfig::default()
        };
        assert!((cfg.initial_sigma() - SIGMA_DEFAULT).abs() < f32::EPSILON);

        let cfg = AppConfig {
            default_sigma: 99.0,
            ..AppConfig::default()
        };
        assert!((cfg.initial_sigma() - SIGMA_MAX).abs() < f32::EPSILON);
    }
}
