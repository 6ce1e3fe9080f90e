use super::assembly::PinChoices;
use super::loading::{CORE_LOADING, Enrichment};
use super::materials::MaterialLibrary;
use super::pin::{Annulus, make_pin};
use super::stack::make_stack;
use super::surfaces::SurfaceCatalogue;
use crate::domain::{BuildResult, Cell, CellContent, HalfSpace, Region, SurfaceId, UniverseId};
use crate::model::ModelContext;
use std::collections::HashMap;
use tracing::info;

/// Pin universes of one core position, all cooled by that position's coolant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionPins {
    pub water: UniverseId,
    pub guide_tube: UniverseId,
    pub instrument_tube: UniverseId,
    pub burnable_absorber: UniverseId,
    /// Indexed like [`Enrichment::ALL`].
    pub fuel: [UniverseId; 3],
}

impl PositionPins {
    pub fn choices(&self, enrichment: Enrichment) -> PinChoices {
        let fuel = match enrichment {
            Enrichment::Low => self.fuel[0],
            Enrichment::Medium => self.fuel[1],
            Enrichment::High => self.fuel[2],
        };
        PinChoices {
            fuel,
            guide_tube: self.guide_tube,
            instrument_tube: self.instrument_tube,
            burnable_absorber: self.burnable_absorber,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinUniverses {
    /// Moderator-filled universe used for every empty lattice slot.
    pub water_mod: UniverseId,
    pub positions: HashMap<&'static str, PositionPins>,
}

impl PinUniverses {
    pub fn at(&self, position: &str) -> Option<&PositionPins> {
        self.positions.get(position)
    }
}

/// Wraps `pin` between the lowest and highest extents, moderator above and
/// below, when the model is axially resolved.
fn axial_wrap(
    ctx: &mut ModelContext,
    surfaces: &SurfaceCatalogue,
    water_mod: UniverseId,
    name: &str,
    pin: UniverseId,
    three_d: bool,
) -> BuildResult<UniverseId> {
    if !three_d {
        return Ok(pin);
    }
    let stack = ctx.new_universe()?;
    make_stack(
        ctx,
        name,
        stack,
        &[surfaces.lowest_extent, surfaces.highest_extent],
        &[water_mod, pin, water_mod],
    )?;
    Ok(stack)
}

fn pin_universe(
    ctx: &mut ModelContext,
    name: &str,
    section: &str,
    surfaces: &[SurfaceId],
    annuli: &[Annulus<'_>],
) -> BuildResult<UniverseId> {
    let universe = ctx.new_universe()?;
    make_pin(ctx, name, section, universe, surfaces, annuli)?;
    Ok(universe)
}

/// Builds the empty water pins and, for every core position, the guide
/// tube, instrument tube, burnable absorber and fuel pins.
pub fn build_pin_universes(
    ctx: &mut ModelContext,
    surfaces: &SurfaceCatalogue,
    library: &MaterialLibrary,
    three_d: bool,
) -> BuildResult<PinUniverses> {
    let inside_dummy = Region::new(vec![HalfSpace::below(surfaces.dummy_outer)]);

    let water_mod = ctx.new_universe()?;
    ctx.add_cell("water pin mod", |id| {
        Cell::new(
            id,
            water_mod,
            CellContent::Material(library.water_mod),
            inside_dummy.clone(),
        )
        .with_section("Empty water pincell universes")
    })?;

    let mut water = Vec::with_capacity(CORE_LOADING.len());
    for slot in &CORE_LOADING {
        let universe = ctx.new_universe()?;
        ctx.add_cell(format!("water pin cool{}", slot.position), |id| {
            Cell::new(
                id,
                universe,
                CellContent::Material(library.coolant_for(slot.position)),
                inside_dummy.clone(),
            )
            .with_comment(format!("Empty water pincell universe Bundle {}", slot.position))
        })?;
        water.push(universe);
    }

    let mut positions = HashMap::with_capacity(CORE_LOADING.len());
    for (slot, water) in CORE_LOADING.iter().zip(water) {
        let position = slot.position;
        let coolant = library.coolant_for(position);
        let wrap = |ctx: &mut ModelContext, name: &str, pin: UniverseId| {
            axial_wrap(ctx, surfaces, water_mod, &format!("{name} stack{position}"), pin, three_d)
        };

        let guide_tube = pin_universe(
            ctx,
            &format!("GT empty{position}"),
            &format!("Pincells Bundle {position}"),
            &[surfaces.guide_tube_ir, surfaces.guide_tube_or],
            &[
                (library.water_mod, "empty guide tube"),
                (library.zirc, ""),
                (coolant, ""),
            ],
        )?;
        let guide_tube = wrap(ctx, "GT empty", guide_tube)?;

        let instrument_tube = pin_universe(
            ctx,
            &format!("GT instr{position}"),
            "",
            &[
                surfaces.instrument_tube_ir,
                surfaces.instrument_tube_or,
                surfaces.guide_tube_ir,
                surfaces.guide_tube_or,
            ],
            &[
                (library.air, "instr guide tube above dashpot"),
                (library.zirc, ""),
                (library.water_mod, ""),
                (library.zirc, ""),
                (coolant, ""),
            ],
        )?;
        let instrument_tube = wrap(ctx, "GT instr", instrument_tube)?;

        let burnable_absorber = pin_universe(
            ctx,
            &format!("burn abs{position}"),
            "",
            &surfaces.burnable_absorber,
            &[
                (library.air, "burnable absorber pin"),
                (library.ss304, ""),
                (library.air, ""),
                (library.borosilicate, ""),
                (library.air, ""),
                (library.ss304, ""),
                (library.water_mod, ""),
                (library.zirc, ""),
                (coolant, ""),
            ],
        )?;
        let burnable_absorber = wrap(ctx, "burn abs", burnable_absorber)?;

        let mut fuel = [water_mod; 3];
        for (index, enrichment) in Enrichment::ALL.iter().enumerate() {
            let percent = enrichment.weight_percent();
            let name = format!("Fuel {percent} w/o");
            let comment = format!("UO2 Fuel {percent} w/o");
            let pin = pin_universe(
                ctx,
                &format!("{name}{position}"),
                "",
                &[surfaces.pellet_or, surfaces.clad_ir, surfaces.clad_or],
                &[
                    (library.fuel(*enrichment), comment.as_str()),
                    (library.helium, ""),
                    (library.zirc, ""),
                    (coolant, ""),
                ],
            )?;
            fuel[index] = wrap(ctx, &name, pin)?;
        }

        positions.insert(
            position,
            PositionPins {
                water,
                guide_tube,
                instrument_tube,
                burnable_absorber,
                fuel,
            },
        );
    }

    info!(
        positions = positions.len(),
        cells = ctx.cells.len(),
        axial_stacks = three_d,
        "built pin cell universes"
    );
    Ok(PinUniverses {
        water_mod,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::build_pin_universes;
    use crate::builders::loading::Enrichment;
    use crate::builders::materials::build_materials;
    use crate::builders::surfaces::build_surfaces;
    use crate::common::config::{CoreDimension, ModelConfig};
    use crate::common::constants::ASSEMBLY_COUNT;
    use crate::domain::CellContent;
    use crate::model::ModelContext;

    fn build(config: &ModelConfig) -> (ModelContext, super::PinUniverses) {
        let mut ctx = ModelContext::default();
        let library = build_materials(&mut ctx, &config.water).expect("materials");
        let surfaces = build_surfaces(&mut ctx, config).expect("surfaces");
        let pins = build_pin_universes(&mut ctx, &surfaces, &library, config.is_three_d())
            .expect("pins");
        (ctx, pins)
    }

    #[test]
    fn every_position_gets_its_own_coolant_pins() {
        let (ctx, pins) = build(&ModelConfig::default());

        assert_eq!(pins.positions.len(), ASSEMBLY_COUNT);
        // 1 moderator pin, 193 coolant pins, then 3 + 5 + 9 + 3 * 4 cells per position.
        assert_eq!(ctx.cells.len(), 1 + ASSEMBLY_COUNT + ASSEMBLY_COUNT * 29);

        let coolant = ctx.materials.get("water-coolK4").expect("K4 coolant").id;
        let outer = ctx.cells.get("Fuel 2.4 w/oK4 last").expect("K4 fuel outer cell");
        assert_eq!(outer.content, CellContent::Material(coolant));
        let guide = ctx.cells.get("GT emptyK4").expect("K4 guide tube");
        assert_eq!(guide.section.as_deref(), Some("Pincells Bundle K4"));

        let k4 = pins.at("K4").expect("K4 pins");
        let choices = k4.choices(Enrichment::High);
        assert_eq!(choices.fuel, k4.fuel[2]);
        assert_ne!(choices.fuel, k4.fuel[0]);
    }

    #[test]
    fn three_d_wraps_each_lattice_pin_in_an_axial_stack() {
        let config = ModelConfig {
            core_dimension: CoreDimension::ThreeD,
            ..ModelConfig::default()
        };
        let (ctx, pins) = build(&config);

        let k4 = pins.at("K4").expect("K4 pins");
        let stack = ctx.cells.get("Fuel 1.6 w/o stackK40").expect("fuel stack middle");
        assert_eq!(stack.universe, k4.fuel[0]);
        let bottom = ctx.cells.get("Fuel 1.6 w/o stackK4").expect("fuel stack bottom");
        assert_eq!(bottom.content, CellContent::Fill(pins.water_mod));
        assert!(ctx.cells.contains_key("GT instr stackK4last"));
        ctx.validate().expect("pins should only reference defined universes");
    }
}
