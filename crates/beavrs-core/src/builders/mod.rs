pub mod assembly;
pub mod baffle;
pub mod core_lattice;
pub mod loading;
pub mod materials;
pub mod pin;
pub mod pins;
pub mod run;
pub mod stack;
pub mod surfaces;
pub mod water;

use crate::common::config::ModelConfig;
use crate::domain::{BuildResult, RunParameters, UniverseId};
use crate::model::ModelContext;
use baffle::{BaffleUniverses, build_baffle};
use materials::{MaterialLibrary, build_materials};
use pins::{PinUniverses, build_pin_universes};
use std::collections::HashMap;
use surfaces::{SurfaceCatalogue, build_surfaces};
use tracing::info;

/// A fully built core model: registries plus the handles builders returned.
#[derive(Debug, Clone)]
pub struct ReactorModel {
    pub ctx: ModelContext,
    pub library: MaterialLibrary,
    pub surfaces: SurfaceCatalogue,
    pub pins: PinUniverses,
    pub baffle: BaffleUniverses,
    /// Assembly universe per core position label.
    pub assemblies: HashMap<&'static str, UniverseId>,
    pub core: UniverseId,
    pub run: RunParameters,
    pub three_d: bool,
}

impl ReactorModel {
    /// Composition check: every fill and lattice entry names a defined
    /// universe and cell ids are unique.
    pub fn validate(&self) -> BuildResult<()> {
        self.ctx.validate()
    }

    pub fn assembly(&self, position: &str) -> Option<UniverseId> {
        self.assemblies.get(position).copied()
    }
}

/// Builds the whole model in one fresh context. Any failure aborts the
/// build; a model is only returned once it validates.
pub fn build_beavrs_model(config: &ModelConfig) -> BuildResult<ReactorModel> {
    let mut ctx = ModelContext::default();
    let three_d = config.is_three_d();

    let library = build_materials(&mut ctx, &config.water)?;
    let surfaces = build_surfaces(&mut ctx, config)?;
    let pins = build_pin_universes(&mut ctx, &surfaces, &library, three_d)?;
    let baffle = build_baffle(
        &mut ctx,
        &config.lattice,
        &library,
        pins.water_mod,
        surfaces.dummy_outer,
    )?;
    info!(shapes = baffle.len(), "built baffle universes");

    let assemblies =
        core_lattice::build_assemblies(&mut ctx, &config.lattice, &surfaces, &library, &pins)?;
    let core = core_lattice::build_core(
        &mut ctx,
        &config.lattice,
        &surfaces,
        &library,
        pins.water_mod,
        &baffle,
        &assemblies,
    )?;
    let run = run::build_run_parameters(&mut ctx, config, &library)?;

    let model = ReactorModel {
        ctx,
        library,
        surfaces,
        pins,
        baffle,
        assemblies,
        core,
        run,
        three_d,
    };
    model.validate()?;
    info!(
        materials = model.ctx.materials.len(),
        surfaces = model.ctx.surfaces.len(),
        cells = model.ctx.cells.len(),
        lattices = model.ctx.lattices.len(),
        three_d,
        "model build complete"
    );
    Ok(model)
}
