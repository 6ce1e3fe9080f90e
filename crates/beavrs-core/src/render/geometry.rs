use super::{close_document, open_document, trailing_comment, xml_comment};
use crate::common::format::shortest_float;
use crate::domain::{Cell, CellContent, Lattice, Surface};
use crate::model::ModelContext;

fn push_section(content: &mut String, section: Option<&str>) {
    if let Some(section) = section {
        content.push('\n');
        content.push_str(&xml_comment(section));
        content.push('\n');
    }
}

fn surface_line(surface: &Surface) -> String {
    let boundary = surface
        .boundary
        .map(|boundary| format!(" boundary=\"{}\"", boundary.as_str()))
        .unwrap_or_default();
    format!(
        "  <surface id=\"{}\" type=\"{}\" coeffs=\"{}\"{boundary} />{}\n",
        surface.id,
        surface.kind.as_str(),
        surface.coeffs,
        trailing_comment(surface.comment.as_deref())
    )
}

fn cell_line(cell: &Cell) -> String {
    let content = match cell.content {
        CellContent::Fill(universe) => format!("fill=\"{universe}\""),
        CellContent::Material(material) => format!("material=\"{material}\""),
    };
    let region = if cell.region.is_empty() {
        String::new()
    } else {
        format!(" surfaces=\"{}\"", cell.region)
    };
    format!(
        "  <cell id=\"{}\" universe=\"{}\" {content}{region} />{}\n",
        cell.id,
        cell.universe,
        trailing_comment(cell.comment.as_deref())
    )
}

fn lattice_block(lattice: &Lattice) -> String {
    let dimension = lattice.dimension;
    let lower_left = shortest_float(lattice.lower_left);
    let pitch = shortest_float(lattice.pitch);
    let mut block = format!(
        "  <lattice id=\"{}\" type=\"rectangular\" dimension=\"{dimension} {dimension}\">{}\n",
        lattice.id,
        trailing_comment(lattice.comment.as_deref())
    );
    block.push_str(&format!("    <lower_left>{lower_left} {lower_left}</lower_left>\n"));
    block.push_str(&format!("    <width>{pitch} {pitch}</width>\n"));
    block.push_str("    <universes>\n");
    for row in lattice.rows() {
        let ids: Vec<_> = row.iter().map(|universe| format!("{universe:>4}")).collect();
        block.push_str(&format!("    {}\n", ids.join(" ")));
    }
    block.push_str("    </universes>\n");
    block.push_str("  </lattice>\n");
    block
}

/// Surfaces (aliases skipped), then cells, then lattices, each in
/// registration order with section comments where a record opens one.
pub fn render_geometry(ctx: &ModelContext) -> String {
    let mut content = open_document("geometry");

    for (_, surface) in ctx.surfaces.ordered() {
        if surface.dupe {
            continue;
        }
        push_section(&mut content, surface.section.as_deref());
        content.push_str(&surface_line(surface));
    }
    content.push('\n');

    for (_, cell) in ctx.cells.ordered() {
        push_section(&mut content, cell.section.as_deref());
        content.push_str(&cell_line(cell));
    }
    content.push('\n');

    for (_, lattice) in ctx.lattices.ordered() {
        push_section(&mut content, lattice.section.as_deref());
        content.push('\n');
        content.push_str(&lattice_block(lattice));
    }
    content.push('\n');

    close_document(&mut content, "geometry");
    content
}

#[cfg(test)]
mod tests {
    use super::render_geometry;
    use crate::domain::{
        BoundaryCondition, Cell, CellContent, Density, HalfSpace, Lattice, Material, Region,
        Surface, SurfaceKind, UniverseId,
    };
    use crate::model::ModelContext;

    #[test]
    fn aliases_are_skipped_and_sections_open_groups() {
        let mut ctx = ModelContext::default();
        let water = ctx
            .add_material("water", |id| Material::new(id, "water", Density::new(1.0)))
            .expect("material");
        let radius = ctx
            .add_surface("burnabs rad 5", |id| {
                Surface::new(id, SurfaceKind::ZCylinder, "0.0 0.0 0.436880")
                    .with_section("Pincell surfaces")
            })
            .expect("surface");
        ctx.alias_surface("instr tube IR", radius, "instrument tube thimble IR")
            .expect("alias");
        let bound = ctx
            .add_surface("upper bound", |id| {
                Surface::new(id, SurfaceKind::ZPlane, "230.0000")
                    .with_boundary(BoundaryCondition::Reflective)
                    .with_comment("upper problem boundary")
            })
            .expect("surface");
        let pin = ctx.new_universe().expect("universe");
        ctx.add_cell("pin", |id| {
            Cell::new(
                id,
                pin,
                CellContent::Material(water),
                Region::new(vec![HalfSpace::below(radius)]),
            )
            .with_section("Pin cells")
        })
        .expect("cell");
        let grid = ctx
            .add_lattice("grid", |id| Lattice {
                id,
                dimension: 2,
                lower_left: -1.0,
                pitch: 1.0,
                universes: vec![pin; 4],
                section: None,
                comment: Some("test lattice".to_string()),
            })
            .expect("lattice");
        ctx.add_cell("root", |id| {
            Cell::new(
                id,
                UniverseId::ROOT,
                CellContent::Fill(grid),
                Region::new(vec![HalfSpace::below(bound)]),
            )
        })
        .expect("cell");

        let text = render_geometry(&ctx);

        assert_eq!(text.matches("<surface ").count(), 2);
        assert!(!text.contains("instrument tube thimble IR"));
        assert!(text.contains(
            "\n<!-- Pincell surfaces -->\n  <surface id=\"1\" type=\"z-cylinder\" coeffs=\"0.0 0.0 0.436880\" />\n"
        ));
        assert!(text.contains(
            "<surface id=\"2\" type=\"z-plane\" coeffs=\"230.0000\" boundary=\"reflective\" /> <!-- upper problem boundary -->"
        ));
        assert!(text.contains("\n<!-- Pin cells -->\n  <cell id=\"1\" universe=\"1\" material=\"1\" surfaces=\"-1\" />"));
        assert!(text.contains("<cell id=\"2\" universe=\"0\" fill=\"2\" surfaces=\"-2\" />"));
        assert!(text.contains(
            "<lattice id=\"2\" type=\"rectangular\" dimension=\"2 2\"> <!-- test lattice -->"
        ));
        assert!(text.contains("<lower_left>-1.0 -1.0</lower_left>"));
        assert!(text.contains("    <universes>\n       1    1\n       1    1\n    </universes>"));

        let surfaces = text.find("<surface ").expect("surfaces");
        let cells = text.find("<cell ").expect("cells");
        let lattices = text.find("<lattice ").expect("lattices");
        assert!(surfaces < cells && cells < lattices);
    }
}
