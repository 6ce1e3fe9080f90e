use super::assembly::{AssemblySpec, make_assembly, pin_grid};
use super::baffle::BaffleUniverses;
use super::loading::{CORE_LOADING, CORE_MAP, Enrichment, SHOULD_BE_23BA1P, WATER_TOKEN};
use super::materials::MaterialLibrary;
use super::pins::PinUniverses;
use super::surfaces::SurfaceCatalogue;
use crate::common::config::LatticeConfig;
use crate::common::constants::{ASSEMBLY_DIMENSION, CORE_DIMENSION};
use crate::domain::{
    BuildError, BuildResult, Cell, CellContent, HalfSpace, Lattice, MaterialId, Region,
    SurfaceId, UniverseId,
};
use crate::model::ModelContext;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Builds one assembly universe per fueled core position, lowest enrichment
/// first, keyed by position label.
pub fn build_assemblies(
    ctx: &mut ModelContext,
    lattice: &LatticeConfig,
    surfaces: &SurfaceCatalogue,
    library: &MaterialLibrary,
    pins: &PinUniverses,
) -> BuildResult<HashMap<&'static str, UniverseId>> {
    let mut assemblies = HashMap::with_capacity(CORE_LOADING.len());
    let lower_left = -(ASSEMBLY_DIMENSION as f64) * lattice.pin_pitch / 2.0;

    for enrichment in Enrichment::ALL {
        let before = assemblies.len();
        for slot in CORE_LOADING.iter().filter(|slot| slot.enrichment == enrichment) {
            let Some(position_pins) = pins.at(slot.position) else {
                return Err(BuildError::MissingRequiredField {
                    name: slot.key(),
                    field: "pin universes",
                });
            };
            let grid = pin_grid(
                &position_pins.choices(enrichment),
                slot.instrumented(),
                slot.absorbers,
            );
            let mut spec = AssemblySpec::new(slot.key())
                .comment(slot.comment())
                .dimension(ASSEMBLY_DIMENSION)
                .lower_left(lower_left)
                .pitch(lattice.pin_pitch)
                .universes(grid);
            if assemblies.is_empty() {
                spec = spec.section("Core Lattice universes");
            }

            match slot.note {
                Some(SHOULD_BE_23BA1P) => warn!(
                    position = slot.position,
                    declared = slot.absorbers.label().unwrap_or("none"),
                    "loading data flags this absorber pattern as {SHOULD_BE_23BA1P}"
                ),
                Some(note) => debug!(position = slot.position, note, "loading note"),
                None => {}
            }

            let universe = make_assembly(
                ctx,
                &surfaces.lattice_box,
                library.coolant_for(slot.position),
                spec,
            )?;
            debug!(key = %slot.key(), universe = %universe, "built assembly");
            assemblies.insert(slot.position, universe);
        }
        info!(
            enrichment = enrichment.weight_percent(),
            assemblies = assemblies.len() - before,
            "built fuel assemblies"
        );
    }
    Ok(assemblies)
}

/// Universe for one core-map token.
fn resolve_token(
    token: &str,
    water: UniverseId,
    baffle: &BaffleUniverses,
    assemblies: &HashMap<&'static str, UniverseId>,
) -> Option<UniverseId> {
    if token == WATER_TOKEN {
        Some(water)
    } else if let Some(universe) = baffle.resolve(token) {
        Some(universe)
    } else {
        assemblies.get(token).copied()
    }
}

/// Row-major universes of the core lattice, top row first.
pub fn core_grid(
    water: UniverseId,
    baffle: &BaffleUniverses,
    assemblies: &HashMap<&'static str, UniverseId>,
) -> BuildResult<Vec<UniverseId>> {
    let mut grid = Vec::with_capacity(CORE_DIMENSION * CORE_DIMENSION);
    for (row, tokens) in CORE_MAP.iter().enumerate() {
        for (column, token) in tokens.iter().enumerate() {
            let universe = resolve_token(token, water, baffle, assemblies).ok_or_else(|| {
                BuildError::UnknownCoreToken {
                    row,
                    column,
                    token: token.to_string(),
                }
            })?;
            grid.push(universe);
        }
    }
    Ok(grid)
}

fn bounded(mut half_spaces: Vec<HalfSpace>, surfaces: &SurfaceCatalogue) -> Region {
    half_spaces.push(HalfSpace::above(surfaces.lower_bound));
    half_spaces.push(HalfSpace::below(surfaces.upper_bound));
    Region::new(half_spaces)
}

fn annulus(inner: SurfaceId, outer: SurfaceId) -> Vec<HalfSpace> {
    vec![HalfSpace::above(inner), HalfSpace::below(outer)]
}

struct ShieldSector {
    key: &'static str,
    comment: &'static str,
    steel: bool,
    planes: [HalfSpace; 2],
}

fn shield_sectors(surfaces: &SurfaceCatalogue) -> [ShieldSector; 8] {
    let planes = &surfaces.shield_planes;
    let (nw_bot, nw_top) = (planes.nw_bot_se_top, planes.nw_top_se_bot);
    let (ne_bot, ne_top) = (planes.ne_bot_sw_top, planes.ne_top_sw_bot);
    let sector = |key, comment, steel, planes| ShieldSector {
        key,
        comment,
        steel,
        planes,
    };
    [
        sector(
            "shield panel NW",
            "neutron shield panel NW",
            true,
            [HalfSpace::above(nw_bot), HalfSpace::below(nw_top)],
        ),
        sector(
            "shield panel N",
            "",
            false,
            [HalfSpace::above(nw_top), HalfSpace::below(ne_top)],
        ),
        sector(
            "shield panel SE",
            "neutron shield panel SE",
            true,
            [HalfSpace::below(nw_bot), HalfSpace::above(nw_top)],
        ),
        sector(
            "shield panel E",
            "",
            false,
            [HalfSpace::above(nw_bot), HalfSpace::above(ne_bot)],
        ),
        sector(
            "shield panel NE",
            "neutron shield panel NE",
            true,
            [HalfSpace::above(ne_bot), HalfSpace::below(ne_top)],
        ),
        sector(
            "shield panel S",
            "",
            false,
            [HalfSpace::below(nw_top), HalfSpace::above(ne_top)],
        ),
        sector(
            "shield panel SW",
            "neutron shield panel SW",
            true,
            [HalfSpace::below(ne_bot), HalfSpace::above(ne_top)],
        ),
        sector(
            "shield panel W",
            "",
            false,
            [HalfSpace::below(nw_bot), HalfSpace::below(ne_bot)],
        ),
    ]
}

/// Registers the 19x19 core lattice and the root-universe cells around it:
/// core barrel, neutron shield panels, downcomer and pressure vessel.
pub fn build_core(
    ctx: &mut ModelContext,
    lattice: &LatticeConfig,
    surfaces: &SurfaceCatalogue,
    library: &MaterialLibrary,
    water: UniverseId,
    baffle: &BaffleUniverses,
    assemblies: &HashMap<&'static str, UniverseId>,
) -> BuildResult<UniverseId> {
    let grid = core_grid(water, baffle, assemblies)?;
    let core = ctx.add_lattice("Main Core", |id| Lattice {
        id,
        dimension: CORE_DIMENSION,
        lower_left: -(CORE_DIMENSION as f64) * lattice.lattice_pitch / 2.0,
        pitch: lattice.lattice_pitch,
        universes: grid,
        section: None,
        comment: Some("Main Core Lattice".to_string()),
    })?;

    ctx.add_cell("inside core barrel", |id| {
        Cell::new(
            id,
            UniverseId::ROOT,
            CellContent::Fill(core),
            bounded(vec![HalfSpace::below(surfaces.core_barrel_ir)], surfaces),
        )
        .with_section("Main universe cells")
        .with_comment("inside core barrel")
    })?;
    let mut material_cell = |key: &str, comment: &str, material: MaterialId, region: Region| {
        ctx.add_cell(key, |id| {
            Cell::new(id, UniverseId::ROOT, CellContent::Material(material), region)
                .maybe_comment(comment)
        })
    };
    material_cell(
        "core barrel",
        "core barrel",
        library.ss304,
        bounded(annulus(surfaces.core_barrel_ir, surfaces.core_barrel_or), surfaces),
    )?;
    for sector in shield_sectors(surfaces) {
        let mut half_spaces = annulus(surfaces.core_barrel_or, surfaces.neutron_shield_or);
        half_spaces.extend(sector.planes);
        let material = if sector.steel {
            library.ss304
        } else {
            library.water_mod
        };
        material_cell(sector.key, sector.comment, material, bounded(half_spaces, surfaces))?;
    }
    material_cell(
        "downcomer",
        "downcomer",
        library.water_mod,
        bounded(annulus(surfaces.neutron_shield_or, surfaces.rpv_ir), surfaces),
    )?;
    material_cell(
        "rpv",
        "pressure vessel",
        library.carbon_steel,
        bounded(annulus(surfaces.rpv_ir, surfaces.rpv_or), surfaces),
    )?;

    info!(
        lattice = %core,
        root_cells = ctx.cells.records().filter(|cell| cell.universe.is_root()).count(),
        "built core lattice and vessel"
    );
    Ok(core)
}

/// Coolant index of each core position, top row first: baffle and water
/// positions are 0 and assemblies count from 2 in loading order.
pub fn coolant_index_map() -> Vec<Vec<usize>> {
    CORE_MAP
        .iter()
        .map(|tokens| {
            tokens
                .iter()
                .map(|token| {
                    CORE_LOADING
                        .iter()
                        .position(|slot| slot.position == *token)
                        .map_or(0, |index| index + 2)
                })
                .collect()
        })
        .collect()
}

/// [`coolant_index_map`] as right-aligned text, one core row per line.
pub fn coolant_index_text() -> String {
    let mut text = String::new();
    for row in coolant_index_map() {
        let line: Vec<_> = row.iter().map(|index| format!("{index:>3}")).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{coolant_index_map, coolant_index_text, core_grid};
    use crate::builders::baffle::BaffleUniverses;
    use crate::builders::loading::{CORE_LOADING, CORE_MAP};
    use crate::common::constants::{ASSEMBLY_COUNT, CORE_DIMENSION};
    use crate::domain::{BuildError, UniverseId};
    use std::collections::HashMap;

    #[test]
    fn coolant_indices_start_at_two_in_loading_order() {
        let map = coolant_index_map();
        assert_eq!(map.len(), CORE_DIMENSION);
        assert_eq!(map[0], vec![0; CORE_DIMENSION]);
        // L1 is the first fueled position and sits at row 2, column 6.
        assert_eq!(CORE_MAP[2][6], CORE_LOADING[0].position);
        assert_eq!(map[2][6], 2);
        assert_eq!(map[2][5], 0);

        let mut fueled: Vec<_> = map.iter().flatten().copied().filter(|index| *index > 0).collect();
        fueled.sort_unstable();
        assert_eq!(fueled, (2..ASSEMBLY_COUNT + 2).collect::<Vec<_>>());

        let text = coolant_index_text();
        assert_eq!(text.lines().count(), CORE_DIMENSION);
        assert!(text.lines().nth(2).expect("third row").contains("  2   3   4"));
    }

    #[test]
    fn unresolved_token_reports_its_position() {
        let baffle = BaffleUniverses::default();
        let assemblies: HashMap<&'static str, UniverseId> = HashMap::new();

        let error = core_grid(UniverseId::new(1), &baffle, &assemblies)
            .expect_err("empty baffle set cannot resolve the map");

        assert_eq!(
            error,
            BuildError::UnknownCoreToken {
                row: 1,
                column: 5,
                token: "bafnw".to_string(),
            }
        );
    }
}
