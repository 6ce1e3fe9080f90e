use beavrs_core::builders::loading::CORE_LOADING;
use beavrs_core::common::config::CoreDimension;
use beavrs_core::domain::{CellContent, UniverseId};
use beavrs_core::render::{render_documents, write_documents};
use beavrs_core::{ModelConfig, ReactorModel, build_beavrs_model};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn two_d_model() -> ReactorModel {
    build_beavrs_model(&ModelConfig::default()).expect("default model should build")
}

#[test]
fn every_core_position_gets_one_assembly() {
    let model = two_d_model();

    assert_eq!(model.assemblies.len(), 193);
    let distinct: HashSet<_> = model.assemblies.values().copied().collect();
    assert_eq!(distinct.len(), 193);
    for slot in &CORE_LOADING {
        assert!(model.assembly(slot.position).is_some(), "{}", slot.position);
    }
    assert_eq!(model.baffle.len(), 12);
}

#[test]
fn core_lattice_references_only_defined_universes() {
    let model = two_d_model();
    model.validate().expect("built model should validate");

    let core = model
        .ctx
        .lattices
        .records()
        .find(|lattice| lattice.id == model.core)
        .expect("core lattice should be registered");
    assert_eq!(core.dimension, 19);
    assert_eq!(core.universes.len(), 19 * 19);

    let defined = model.ctx.defined_universes();
    assert!(core.universes.iter().all(|universe| defined.contains(universe)));
    let used: HashSet<_> = core.universes.iter().copied().collect();
    for universe in model.assemblies.values() {
        assert!(used.contains(universe), "assembly {universe} missing from the core");
    }
    assert!(used.contains(&model.pins.water_mod));
}

#[test]
fn root_universe_holds_the_vessel_cells() {
    let model = two_d_model();

    let root_cells: Vec<_> = model
        .ctx
        .cells
        .ordered()
        .into_iter()
        .filter(|(_, cell)| cell.universe == UniverseId::ROOT)
        .collect();
    assert_eq!(root_cells.len(), 12);
    assert_eq!(root_cells[0].0, "inside core barrel");
    assert_eq!(root_cells[0].1.content, CellContent::Fill(model.core));
    assert_eq!(root_cells[11].0, "rpv");
    assert_eq!(
        root_cells[11].1.content,
        CellContent::Material(model.library.carbon_steel)
    );
}

#[test]
fn identifiers_are_unique_per_entity_class() {
    let model = two_d_model();
    let ctx = &model.ctx;

    let materials: HashSet<_> = ctx.materials.records().map(|material| material.id).collect();
    assert_eq!(materials.len(), ctx.materials.len());
    assert_eq!(ctx.materials.len(), 1 + 193 + 11);

    let surfaces: Vec<_> = ctx
        .surfaces
        .records()
        .filter(|surface| !surface.dupe)
        .map(|surface| surface.id)
        .collect();
    let distinct: HashSet<_> = surfaces.iter().copied().collect();
    assert_eq!(distinct.len(), surfaces.len());

    let cells: HashSet<_> = ctx.cells.records().map(|cell| cell.id).collect();
    assert_eq!(cells.len(), ctx.cells.len());

    let cell_universes: HashSet<_> = ctx.cells.records().map(|cell| cell.universe).collect();
    for lattice in ctx.lattices.records() {
        assert!(
            !cell_universes.contains(&lattice.id),
            "lattice {} shares an id with a cell universe",
            lattice.id
        );
    }
}

#[test]
fn three_d_model_builds_and_validates() {
    let config = ModelConfig {
        core_dimension: CoreDimension::ThreeD,
        ..ModelConfig::default()
    };

    let model = build_beavrs_model(&config).expect("3-D model should build");

    assert!(model.three_d);
    assert_eq!(model.assemblies.len(), 193);
    assert_eq!(model.run.settings.entropy.dimension[2], 100);
    assert!(model.ctx.cells.contains_key("Fuel 3.1 w/o stackK4"));
}

#[test]
fn rendering_is_deterministic() {
    let first = render_documents(&two_d_model());
    let second = render_documents(&two_d_model());

    assert_eq!(first, second);
}

#[test]
fn documents_are_written_to_the_output_directory() {
    let model = two_d_model();
    let temp = TempDir::new().expect("tempdir should be created");
    let output_dir = temp.path().join("beavrs");

    let written = write_documents(&model, &output_dir, true).expect("documents should write");

    assert_eq!(written.len(), 7);
    let geometry = fs::read_to_string(output_dir.join("geometry.xml")).expect("geometry.xml");
    let rendered_surfaces = geometry.matches("<surface ").count();
    let unique_surfaces = model
        .ctx
        .surfaces
        .records()
        .filter(|surface| !surface.dupe)
        .count();
    assert_eq!(rendered_surfaces, unique_surfaces);
    assert_eq!(geometry.matches("<cell ").count(), model.ctx.cells.len());
    assert_eq!(geometry.matches("<lattice ").count(), model.ctx.lattices.len());
    assert!(geometry.contains("coeffs=\"10.70860\""));
    assert!(geometry.contains("<!-- Main Core Lattice -->"));

    let materials = fs::read_to_string(output_dir.join("materials.xml")).expect("materials.xml");
    assert_eq!(materials.matches("<material ").count(), model.ctx.materials.len());
    assert!(materials.contains("<sab name=\"lwtr\" xs=\"15t\" />"));

    let coolant_map =
        fs::read_to_string(output_dir.join("coolant_map.txt")).expect("coolant_map.txt");
    assert_eq!(coolant_map.lines().count(), 19);
}
