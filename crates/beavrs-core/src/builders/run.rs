use super::materials::MaterialLibrary;
use crate::common::config::{CmfdConfig, ModelConfig};
use crate::common::constants::{ASSEMBLY_DIMENSION, FUELED_ASSEMBLIES_ACROSS};
use crate::domain::{
    BuildResult, CellContent, CmfdSettings, EntropyMesh, Plot, PlotColorBy, PlotMask, Rgb,
    RunParameters, RunSettings, SourceBox, Tally, TallyMesh,
};
use crate::model::ModelContext;
use tracing::info;

/// Pins across the fueled region: 15 assemblies of 17 pins.
const PINS_ACROSS: u32 = (FUELED_ASSEMBLIES_ACROSS * ASSEMBLY_DIMENSION) as u32;
const AXIAL_ENTROPY_LAYERS: u32 = 100;

/// Axial range of the fueled region, or the thin 2-D slab.
fn fueled_axial_range(config: &ModelConfig) -> (f64, f64) {
    if config.is_three_d() {
        (config.axial.bottom_fuel_stack, config.axial.top_active_core)
    } else {
        (config.two_d_bounds.lower, config.two_d_bounds.upper)
    }
}

fn fueled_half_width(config: &ModelConfig) -> f64 {
    FUELED_ASSEMBLIES_ACROSS as f64 * config.lattice.lattice_pitch / 2.0
}

pub fn run_settings(config: &ModelConfig) -> RunSettings {
    let half = fueled_half_width(config);
    let (bottom, top) = fueled_axial_range(config);
    let fueled = SourceBox {
        lower_left: [-half, -half, bottom],
        upper_right: [half, half, top],
    };
    let layers = if config.is_three_d() {
        AXIAL_ENTROPY_LAYERS
    } else {
        1
    };

    RunSettings {
        cross_sections: config.run.cross_sections.clone(),
        batches: config.run.batches,
        inactive: config.run.inactive,
        particles: config.run.particles,
        verbosity: config.run.verbosity,
        entropy: EntropyMesh {
            dimension: [PINS_ACROSS, PINS_ACROSS, layers],
            extent: fueled,
        },
        source: fueled,
    }
}

/// Material colours of the core slice plot, keyed by material registry name.
const MATERIAL_COLORS: [(&str, Rgb); 12] = [
    ("water-mod", Rgb(198, 226, 255)),
    ("inconel", Rgb(101, 101, 101)),
    ("carbon steel", Rgb(0, 0, 0)),
    ("zirc", Rgb(201, 201, 201)),
    ("SS304", Rgb(0, 0, 0)),
    ("air", Rgb(255, 255, 255)),
    ("helium", Rgb(255, 218, 185)),
    ("borosilicate", Rgb(0, 255, 0)),
    ("control rod", Rgb(255, 0, 0)),
    ("UO2 1.6", Rgb(142, 35, 35)),
    ("UO2 2.4", Rgb(255, 215, 0)),
    ("UO2 3.1", Rgb(0, 0, 128)),
];

/// The material slice through the core mid-plane, plus the absorber
/// position mask when enabled.
pub fn build_plots(
    ctx: &mut ModelContext,
    config: &ModelConfig,
    library: &MaterialLibrary,
) -> BuildResult<Vec<Plot>> {
    let origin = [
        0.0,
        0.0,
        (config.axial.highest_extent - config.axial.lowest_extent) / 2.0,
    ];
    let span = config.radial.rpv_or * 2.0 + 10.0;
    let pixels = [config.plots.pixels, config.plots.pixels];

    let colors = MATERIAL_COLORS
        .iter()
        .filter_map(|(key, rgb)| {
            ctx.materials
                .get(key)
                .map(|material| (material.id.get(), *rgb))
        })
        .collect();
    let mut plots = vec![Plot {
        id: ctx.ids.plot()?,
        filename: "center_mats".to_string(),
        color_by: PlotColorBy::Material,
        background: Rgb::WHITE,
        origin,
        width: [span, span],
        pixels,
        colors,
        mask: None,
    }];

    if config.plots.burnable_absorber_mask {
        let absorber_cells: Vec<u32> = ctx
            .cells
            .records()
            .filter(|cell| cell.content == CellContent::Material(library.borosilicate))
            .map(|cell| cell.id.get())
            .collect();
        plots.push(Plot {
            id: ctx.ids.plot()?,
            filename: "ba_positions".to_string(),
            color_by: PlotColorBy::Cell,
            background: Rgb::WHITE,
            origin,
            width: [span, span],
            pixels,
            colors: absorber_cells.iter().map(|id| (*id, Rgb::BLACK)).collect(),
            mask: Some(PlotMask {
                components: absorber_cells,
                background: Rgb::WHITE,
            }),
        });
    }
    Ok(plots)
}

/// One pin-resolution mesh over the fueled region with a nu-fission tally.
pub fn tallies(config: &ModelConfig) -> (Vec<TallyMesh>, Vec<Tally>) {
    let lower_left = -fueled_half_width(config);
    let width = -lower_left * 2.0 / f64::from(PINS_ACROSS);
    let mesh = TallyMesh {
        id: 1,
        dimension: [PINS_ACROSS, PINS_ACROSS],
        lower_left: [lower_left, lower_left],
        width: [width, width],
    };
    let tally = Tally {
        id: 1,
        mesh: mesh.id,
        scores: vec!["nu-fission".to_string()],
    };
    (vec![mesh], vec![tally])
}

/// Axial map text: the radial map once in 2-D; in 3-D one copy per layer
/// between two edge layers whose fueled boxes are relabelled as reflector.
fn cmfd_map(cmfd: &CmfdConfig, layers: Option<usize>) -> String {
    let plain = cmfd.map.join("\n");
    let Some(layers) = layers else {
        return plain;
    };
    let edge = plain.replace('2', "1");
    let mut blocks = Vec::with_capacity(layers + 2);
    blocks.push(edge.clone());
    blocks.extend(std::iter::repeat_n(plain, layers));
    blocks.push(edge);
    blocks.join("\n")
}

pub fn cmfd_settings(config: &ModelConfig) -> CmfdSettings {
    let cmfd = &config.cmfd;
    let pitch = config.lattice.lattice_pitch / cmfd.pin_to_box_factor;
    let half = pitch * cmfd.mesh_dim as f64 / 2.0;

    let (bottom, top, axial_dim, map) = if !config.is_three_d() {
        (
            config.two_d_bounds.lower,
            config.two_d_bounds.upper,
            1,
            cmfd_map(cmfd, None),
        )
    } else if cmfd.axial_dim > 1 {
        let bottom = config.axial.bottom_fuel_stack;
        let top = config.axial.top_active_core;
        let layer = (top - bottom) / cmfd.axial_dim as f64;
        (
            bottom - layer,
            top + layer,
            cmfd.axial_dim + 2,
            cmfd_map(cmfd, Some(cmfd.axial_dim)),
        )
    } else {
        (
            config.axial.bottom_fuel_stack,
            config.axial.top_active_core,
            cmfd.axial_dim,
            cmfd_map(cmfd, None),
        )
    };

    CmfdSettings {
        lower_left: [-half, -half, bottom],
        upper_right: [half, half, top],
        dimension: [cmfd.mesh_dim, cmfd.mesh_dim, axial_dim],
        map,
        albedo: cmfd.albedo.clone(),
        energy: cmfd.energy.clone(),
        begin: cmfd.begin,
        active_flush: cmfd.active_flush,
        keff_tol: cmfd.keff_tol,
        feedback: cmfd.feedback,
    }
}

pub fn build_run_parameters(
    ctx: &mut ModelContext,
    config: &ModelConfig,
    library: &MaterialLibrary,
) -> BuildResult<RunParameters> {
    let settings = run_settings(config);
    let plots = build_plots(ctx, config, library)?;
    let (meshes, tallies) = tallies(config);
    let cmfd = cmfd_settings(config);
    info!(
        batches = settings.batches,
        particles = settings.particles,
        plots = plots.len(),
        cmfd_layers = cmfd.dimension[2],
        "assembled run parameters"
    );
    Ok(RunParameters {
        settings,
        plots,
        meshes,
        tallies,
        cmfd,
    })
}
