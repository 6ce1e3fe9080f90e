//! Physical constants and fixed lattice counts shared by the builders.
//!
//! Design dimensions (radii, pitches, elevations) live in
//! [`crate::common::config::ModelConfig`] so they can be overridden.

pub const AVOGADRO: f64 = 0.602_214_129_f64; // x 1e24, so N = rho * N_A / M is in atoms/b-cm

pub const HYDROGEN_MASS: f64 = 1.007_94_f64;
pub const OXYGEN_MASS: f64 = 15.999_4_f64;
pub const BORON_MASS: f64 = 10.811_f64;
pub const WATER_MASS: f64 = 2.0 * HYDROGEN_MASS + OXYGEN_MASS;

pub const H1_ABUNDANCE: f64 = 0.999_885_f64;
pub const H2_ABUNDANCE: f64 = 0.000_115_f64;
pub const O16_ABUNDANCE: f64 = 0.997_57_f64;
pub const O17_ABUNDANCE: f64 = 0.000_38_f64;
pub const O18_ABUNDANCE: f64 = 0.002_05_f64;
pub const B10_ABUNDANCE: f64 = 0.199_f64;
pub const B11_ABUNDANCE: f64 = 0.801_f64;

pub const CONTINUOUS_XS: &str = "71c";
pub const LIGHT_WATER_SAB: &str = "lwtr";
pub const LIGHT_WATER_SAB_XS: &str = "15t";

/// Pins per assembly side.
pub const ASSEMBLY_DIMENSION: usize = 17;
/// Assemblies per core lattice side, including the baffle ring.
pub const CORE_DIMENSION: usize = 19;
/// Assemblies across the fueled region.
pub const FUELED_ASSEMBLIES_ACROSS: usize = 15;
pub const ASSEMBLY_COUNT: usize = 193;

/// Full withdrawal of one control bank, in steps.
pub const BANK_FULL_STEPS: i64 = 228;
pub const MAX_CONTROL_STEP: i64 = 574;
