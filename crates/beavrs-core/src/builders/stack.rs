use super::pin::nested_regions;
use crate::domain::{BuildError, BuildResult, Cell, CellContent, CellId, SurfaceId, UniverseId};
use crate::model::ModelContext;

/// Fills `universe` with one fill cell per axial segment, bottom to top.
///
/// Cells are keyed `name`, `name0`, ..., `namelast`; the first carries `name`
/// as its comment.
pub fn make_stack(
    ctx: &mut ModelContext,
    name: &str,
    universe: UniverseId,
    axial_surfaces: &[SurfaceId],
    fills: &[UniverseId],
) -> BuildResult<Vec<CellId>> {
    if axial_surfaces.is_empty() || fills.len() != axial_surfaces.len() + 1 {
        return Err(BuildError::LengthMismatch {
            builder: "axial stack",
            name: name.to_string(),
            what: "fills (one more than the axial surfaces)",
            expected: axial_surfaces.len().max(1) + 1,
            actual: fills.len(),
        });
    }

    let mut keys = vec![name.to_string()];
    keys.extend((0..fills.len() - 2).map(|index| format!("{name}{index}")));
    keys.push(format!("{name}last"));
    for key in &keys {
        ctx.cells.ensure_vacant(key)?;
    }

    let regions = nested_regions(axial_surfaces);
    let mut cells = Vec::with_capacity(fills.len());
    for (index, ((key, region), fill)) in keys.into_iter().zip(regions).zip(fills).enumerate() {
        let id = ctx.add_cell(key, |id| {
            let cell = Cell::new(id, universe, CellContent::Fill(*fill), region);
            if index == 0 {
                cell.with_comment(name)
            } else {
                cell
            }
        })?;
        cells.push(id);
    }
    Ok(cells)
}
