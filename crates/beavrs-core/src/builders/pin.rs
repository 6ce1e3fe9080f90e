use crate::domain::{
    BuildError, BuildResult, Cell, CellContent, CellId, HalfSpace, MaterialId, Region, SurfaceId,
    UniverseId,
};
use crate::model::ModelContext;

/// One radial region of a pin: its material and an optional comment.
pub type Annulus<'a> = (MaterialId, &'a str);

/// Half-space bounds for the `k + 1` regions cut by `k` nested surfaces,
/// innermost first.
pub(crate) fn nested_regions(surfaces: &[SurfaceId]) -> Vec<Region> {
    let mut regions = Vec::with_capacity(surfaces.len() + 1);
    if let Some(first) = surfaces.first() {
        regions.push(Region::new(vec![HalfSpace::below(*first)]));
    }
    for pair in surfaces.windows(2) {
        regions.push(Region::new(vec![
            HalfSpace::above(pair[0]),
            HalfSpace::below(pair[1]),
        ]));
    }
    if let Some(last) = surfaces.last() {
        regions.push(Region::new(vec![HalfSpace::above(*last)]));
    }
    regions
}

/// Cell keys `name`, `name 0`, `name 1`, ..., `name last`.
fn pin_cell_keys(name: &str, count: usize) -> Vec<String> {
    let mut keys = Vec::with_capacity(count);
    keys.push(name.to_string());
    keys.extend((0..count.saturating_sub(2)).map(|index| format!("{name} {index}")));
    if count > 1 {
        keys.push(format!("{name} last"));
    }
    keys
}

/// Fills `universe` with one material cell per annulus.
///
/// `annuli` runs innermost to outermost and must be one longer than
/// `radial_surfaces`. Nothing is registered when the lengths disagree.
pub fn make_pin(
    ctx: &mut ModelContext,
    name: &str,
    section: &str,
    universe: UniverseId,
    radial_surfaces: &[SurfaceId],
    annuli: &[Annulus<'_>],
) -> BuildResult<Vec<CellId>> {
    if radial_surfaces.is_empty() || annuli.len() != radial_surfaces.len() + 1 {
        return Err(BuildError::LengthMismatch {
            builder: "pin",
            name: name.to_string(),
            what: "annuli (one more than the radial surfaces)",
            expected: radial_surfaces.len().max(1) + 1,
            actual: annuli.len(),
        });
    }

    let keys = pin_cell_keys(name, annuli.len());
    for key in &keys {
        ctx.cells.ensure_vacant(key)?;
    }

    let regions = nested_regions(radial_surfaces);
    let mut cells = Vec::with_capacity(annuli.len());
    for (index, ((key, region), (material, comment))) in
        keys.into_iter().zip(regions).zip(annuli).enumerate()
    {
        let id = ctx.add_cell(key, |id| {
            let cell = Cell::new(id, universe, CellContent::Material(*material), region)
                .maybe_comment(comment);
            if index == 0 {
                cell.maybe_section(section)
            } else {
                cell
            }
        })?;
        cells.push(id);
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::make_pin;
    use crate::domain::{
        BuildError, CellContent, Density, Material, Surface, SurfaceKind,
    };
    use crate::model::ModelContext;

    fn cylinder(ctx: &mut ModelContext, key: &str, radius: &str) -> crate::domain::SurfaceId {
        ctx.add_surface(key, |id| {
            Surface::new(id, SurfaceKind::ZCylinder, format!("0.0 0.0 {radius}"))
        })
        .expect("surface should register")
    }

    fn material(ctx: &mut ModelContext, key: &str) -> crate::domain::MaterialId {
        ctx.add_material(key, |id| Material::new(id, key, Density::new(1.0)))
            .expect("material should register")
    }

    #[test]
    fn three_annuli_give_inner_shell_and_outer_cells() {
        let mut ctx = ModelContext::default();
        let r1 = cylinder(&mut ctx, "R1", "0.392180");
        let r2 = cylinder(&mut ctx, "R2", "0.457200");
        let fuel = material(&mut ctx, "fuel");
        let gap = material(&mut ctx, "gap");
        let clad = material(&mut ctx, "clad");
        let universe = ctx.new_universe().expect("universe id");

        let cells = make_pin(
            &mut ctx,
            "Fuel",
            "",
            universe,
            &[r1, r2],
            &[(fuel, "fuel"), (gap, "gap"), (clad, "clad")],
        )
        .expect("pin should build");

        assert_eq!(cells.len(), 3);
        let regions: Vec<_> = ctx
            .cells
            .ordered()
            .into_iter()
            .map(|(_, cell)| {
                assert_eq!(cell.universe, universe);
                cell.region.to_string()
            })
            .collect();
        assert_eq!(
            regions,
            [format!("-{r1}"), format!("{r1} -{r2}"), format!("{r2}")]
        );
        let inner = ctx.cells.get("Fuel").expect("innermost cell");
        assert_eq!(inner.content, CellContent::Material(fuel));
        assert_eq!(inner.comment.as_deref(), Some("fuel"));
        assert!(inner.section.is_none());
        assert!(ctx.cells.contains_key("Fuel 0"));
        assert!(ctx.cells.contains_key("Fuel last"));
    }

    #[test]
    fn interior_cells_are_bounded_by_consecutive_surfaces() {
        let mut ctx = ModelContext::default();
        let surfaces: Vec<_> = (0..8)
            .map(|index| cylinder(&mut ctx, &format!("burnabs rad {index}"), "0.5"))
            .collect();
        let air = material(&mut ctx, "air");
        let universe = ctx.new_universe().expect("universe id");
        let annuli = vec![(air, ""); 9];

        make_pin(&mut ctx, "burn abs", "Pins", universe, &surfaces, &annuli)
            .expect("pin should build");

        assert_eq!(ctx.cells.len(), 9);
        for index in 1..8 {
            let cell = ctx
                .cells
                .get(&format!("burn abs {}", index - 1))
                .expect("interior cell");
            assert_eq!(
                cell.region.to_string(),
                format!("{} -{}", surfaces[index - 1], surfaces[index])
            );
            assert!(cell.comment.is_none());
        }
        let first = ctx.cells.get("burn abs").expect("innermost cell");
        assert_eq!(first.section.as_deref(), Some("Pins"));
    }

    #[test]
    fn length_mismatch_leaves_the_registry_untouched() {
        let mut ctx = ModelContext::default();
        let r1 = cylinder(&mut ctx, "R1", "0.39");
        let r2 = cylinder(&mut ctx, "R2", "0.45");
        let water = material(&mut ctx, "water");
        let universe = ctx.new_universe().expect("universe id");

        let error = make_pin(
            &mut ctx,
            "short",
            "",
            universe,
            &[r1, r2],
            &[(water, ""), (water, "")],
        )
        .expect_err("two annuli for two surfaces should fail");

        assert!(matches!(
            error,
            BuildError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
        assert!(ctx.cells.is_empty());
        assert_eq!(ctx.ids.cell().expect("cell id").get(), 1);
    }

    #[test]
    fn duplicate_name_is_rejected_before_any_cell_is_added() {
        let mut ctx = ModelContext::default();
        let r1 = cylinder(&mut ctx, "R1", "0.39");
        let water = material(&mut ctx, "water");
        let universe = ctx.new_universe().expect("universe id");

        make_pin(&mut ctx, "pin", "", universe, &[r1], &[(water, ""), (water, "")])
            .expect("first pin");
        let error = make_pin(&mut ctx, "pin", "", universe, &[r1], &[(water, ""), (water, "")])
            .expect_err("second pin with the same name");

        assert!(matches!(error, BuildError::DuplicateKey { .. }));
        assert_eq!(ctx.cells.len(), 2);
    }
}
