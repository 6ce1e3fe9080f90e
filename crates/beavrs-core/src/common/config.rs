//! Design constants for the BEAVRS model.
//!
//! Every field has a serde default equal to the benchmark value, so a JSON
//! override file only needs the entries it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub core_dimension: CoreDimension,
    pub two_d_bounds: TwoDBounds,
    pub water: WaterConfig,
    pub pin: PinConfig,
    pub lattice: LatticeConfig,
    pub axial: AxialConfig,
    pub radial: RadialConfig,
    pub run: RunConfig,
    pub plots: PlotConfig,
    pub cmfd: CmfdConfig,
}

impl ModelConfig {
    pub fn is_three_d(&self) -> bool {
        self.core_dimension == CoreDimension::ThreeD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreDimension {
    #[default]
    TwoD,
    ThreeD,
}

/// Reflective slab the 2-D model is cut to.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TwoDBounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for TwoDBounds {
    fn default() -> Self {
        Self {
            lower: 220.0,
            upper: 230.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WaterConfig {
    /// g/cc
    pub density: f64,
    pub boron_ppm: f64,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            density: 0.73986,
            boron_ppm: 975.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PinConfig {
    pub pellet_or: f64,
    pub clad_ir: f64,
    pub clad_or: f64,
    pub guide_tube_ir: f64,
    pub guide_tube_or: f64,
    pub guide_tube_dash_ir: f64,
    pub guide_tube_dash_or: f64,
    pub plenum_spring_or: f64,
    /// Burnable absorber rod radii, innermost first.
    pub burnable_absorber: [f64; 8],
    pub instrument_tube_ir: f64,
    pub instrument_tube_or: f64,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            pellet_or: 0.39218,
            clad_ir: 0.40005,
            clad_or: 0.45720,
            guide_tube_ir: 0.56134,
            guide_tube_or: 0.60198,
            guide_tube_dash_ir: 0.50419,
            guide_tube_dash_or: 0.54610,
            plenum_spring_or: 0.06459,
            burnable_absorber: [
                0.21400, 0.23051, 0.24130, 0.42672, 0.43688, 0.48387, 0.56134, 0.60198,
            ],
            instrument_tube_ir: 0.43688,
            instrument_tube_or: 0.48387,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub pin_pitch: f64,
    pub lattice_pitch: f64,
    pub baffle_width: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            pin_pitch: 1.25984,
            lattice_pitch: 21.50364,
            baffle_width: 2.2225,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AxialConfig {
    pub lowest_extent: f64,
    pub highest_extent: f64,
    pub bottom_fuel_stack: f64,
    pub top_active_core: f64,
    /// Bottom of a bank at zero steps withdrawn.
    pub step0_height: f64,
    pub step_width: f64,
}

impl Default for AxialConfig {
    fn default() -> Self {
        Self {
            lowest_extent: 0.0,
            highest_extent: 455.444,
            bottom_fuel_stack: 36.007,
            top_active_core: 401.767,
            step0_height: 45.079,
            step_width: 1.58173,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RadialConfig {
    pub core_barrel_ir: f64,
    pub core_barrel_or: f64,
    pub neutron_shield_or: f64,
    pub rpv_ir: f64,
    pub rpv_or: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            core_barrel_ir: 187.96,
            core_barrel_or: 193.675,
            neutron_shield_or: 199.39,
            rpv_ir: 230.0,
            rpv_or: 251.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    pub cross_sections: String,
    pub batches: u32,
    pub inactive: u32,
    pub particles: u64,
    pub verbosity: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cross_sections: "cross_sections.xml".to_string(),
            batches: 350,
            inactive: 250,
            particles: 4_000_000,
            verbosity: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotConfig {
    pub pixels: u32,
    pub burnable_absorber_mask: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            pixels: 6000,
            burnable_absorber_mask: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CmfdConfig {
    pub pin_to_box_factor: f64,
    pub mesh_dim: usize,
    pub axial_dim: usize,
    pub albedo: String,
    pub energy: String,
    /// Rows of the radial coarse-mesh map, top row first.
    pub map: Vec<String>,
    pub begin: u32,
    pub active_flush: u32,
    pub keff_tol: f64,
    pub feedback: bool,
}

impl Default for CmfdConfig {
    fn default() -> Self {
        Self {
            pin_to_box_factor: 1.0,
            mesh_dim: 17,
            axial_dim: 5,
            albedo: "0.0 0.0 0.0 0.0 1.0 1.0".to_string(),
            energy: "0.0 0.625e-6 20.0".to_string(),
            map: DEFAULT_CMFD_MAP.iter().map(|row| row.to_string()).collect(),
            begin: 5,
            active_flush: 81,
            keff_tol: 99.9,
            feedback: true,
        }
    }
}

/// 1 marks reflector boxes, 2 marks fueled boxes.
const DEFAULT_CMFD_MAP: [&str; 17] = [
    "1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1",
    "1 1 1 1 1 2 2 2 2 2 2 2 1 1 1 1 1",
    "1 1 1 2 2 2 2 2 2 2 2 2 2 2 1 1 1",
    "1 1 2 2 2 2 2 2 2 2 2 2 2 2 2 1 1",
    "1 1 2 2 2 2 2 2 2 2 2 2 2 2 2 1 1",
    "1 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 1",
    "1 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 1",
    "1 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 1",
    "1 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 1",
    "1 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 1",
    "1 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 1",
    "1 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 1",
    "1 1 2 2 2 2 2 2 2 2 2 2 2 2 2 1 1",
    "1 1 2 2 2 2 2 2 2 2 2 2 2 2 2 1 1",
    "1 1 1 2 2 2 2 2 2 2 2 2 2 2 1 1 1",
    "1 1 1 1 1 2 2 2 2 2 2 2 1 1 1 1 1",
    "1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read model configuration '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse model configuration '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_model_config(config_path: impl AsRef<Path>) -> Result<ModelConfig, ConfigError> {
    let config_path = config_path.as_ref();
    let source = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreDimension, ModelConfig, load_model_config};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_reproduce_benchmark_values() {
        let config = ModelConfig::default();

        assert_eq!(config.core_dimension, CoreDimension::TwoD);
        assert_eq!(config.water.boron_ppm, 975.0);
        assert_eq!(config.pin.burnable_absorber[4], config.pin.instrument_tube_ir);
        assert_eq!(config.pin.burnable_absorber[5], config.pin.instrument_tube_or);
        assert_eq!(config.lattice.lattice_pitch, 21.50364);
        assert_eq!(config.cmfd.map.len(), config.cmfd.mesh_dim);
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("model.json");
        fs::write(
            &path,
            r#"{ "core_dimension": "three_d", "water": { "boron_ppm": 600.0 } }"#,
        )
        .expect("config should be written");

        let config = load_model_config(&path).expect("config should load");

        assert!(config.is_three_d());
        assert_eq!(config.water.boron_ppm, 600.0);
        assert_eq!(config.water.density, 0.73986);
        assert_eq!(config.run.batches, 350);
    }

    #[test]
    fn malformed_json_reports_parse_error_with_path() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").expect("config should be written");

        let error = load_model_config(&path).expect_err("parse should fail");
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = load_model_config(temp.path().join("absent.json"))
            .expect_err("read should fail");
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = ModelConfig::default();
        let json = serde_json::to_string_pretty(&config).expect("config should serialize");
        let parsed: ModelConfig = serde_json::from_str(&json).expect("config should parse");
        assert_eq!(parsed.run, config.run);
        assert_eq!(parsed.cmfd.map, config.cmfd.map);
        assert_eq!(parsed.core_dimension, config.core_dimension);
    }
}
