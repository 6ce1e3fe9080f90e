use super::materials::MaterialLibrary;
use crate::common::config::LatticeConfig;
use crate::common::format::{coefficient, general_float_padded, shortest_float};
use crate::domain::{
    BuildError, BuildResult, Cell, CellContent, HalfSpace, Lattice, MaterialId, Region, Sense, Surface,
    SurfaceId, SurfaceKind, UniverseId,
};
use crate::model::ModelContext;
use std::collections::HashMap;
use tracing::info;

/// One of the four baffle planes, each `baffle_width` in from a face of a
/// quarter-assembly lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Face {
    North,
    South,
    East,
    West,
}

/// Baffle universe shapes. The name says where the steel sits inside the
/// universe; the core-map code says where the universe sits in the core, so
/// the two point in opposite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaffleKind {
    North,
    South,
    East,
    West,
    EdgesNw,
    EdgesNe,
    EdgesSw,
    EdgesSe,
    CornerNw,
    CornerNe,
    CornerSe,
    CornerSw,
}

/// What one quarter of a baffle lattice holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quarter {
    Own,
    Water,
    Side(Face),
}

struct DummyCell {
    key: &'static str,
    steel: bool,
    region: &'static [(Face, Sense)],
}

const fn dummy(key: &'static str, steel: bool, region: &'static [(Face, Sense)]) -> DummyCell {
    DummyCell { key, steel, region }
}

use Face::{East as E, North as N, South as S, West as W};
use Sense::{Negative as Below, Positive as Above};

impl BaffleKind {
    /// Build order. Plain sides come first since edges reuse their dummies.
    pub const ALL: [Self; 12] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::EdgesNw,
        Self::EdgesNe,
        Self::EdgesSw,
        Self::EdgesSe,
        Self::CornerNw,
        Self::CornerNe,
        Self::CornerSe,
        Self::CornerSw,
    ];

    /// Five-character token used in the core map.
    pub const fn code(self) -> &'static str {
        match self {
            Self::North => "bafs_",
            Self::South => "bafn_",
            Self::East => "bafw_",
            Self::West => "bafe_",
            Self::EdgesNw => "bfcse",
            Self::EdgesNe => "bfcsw",
            Self::EdgesSw => "bfcne",
            Self::EdgesSe => "bfcnw",
            Self::CornerNw => "bafse",
            Self::CornerNe => "bafsw",
            Self::CornerSe => "bafnw",
            Self::CornerSw => "bafne",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Registry key suffix: `north`, `edges NW`, `corner NW`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::EdgesNw => "edges NW",
            Self::EdgesNe => "edges NE",
            Self::EdgesSw => "edges SW",
            Self::EdgesSe => "edges SE",
            Self::CornerNw => "corner NW",
            Self::CornerNe => "corner NE",
            Self::CornerSe => "corner SE",
            Self::CornerSw => "corner SW",
        }
    }

    fn description(self) -> String {
        match self.name().split_once(' ') {
            Some((shape, direction)) => format!("{direction} {shape}"),
            None => self.name().to_string(),
        }
    }

    fn dummy_cells(self) -> [DummyCell; 3] {
        match self {
            Self::North => [
                dummy("baffle dummy north", true, &[(N, Above)]),
                dummy("baf dummy north 2", false, &[(N, Below)]),
                dummy("", false, &[]),
            ],
            Self::South => [
                dummy("baffle dummy south", false, &[(S, Above)]),
                dummy("baf dummy south 2", true, &[(S, Below)]),
                dummy("", false, &[]),
            ],
            Self::East => [
                dummy("baffle dummy east", true, &[(E, Above)]),
                dummy("baf dummy east 2", false, &[(E, Below)]),
                dummy("", false, &[]),
            ],
            Self::West => [
                dummy("baffle dummy west", false, &[(W, Above)]),
                dummy("baf dummy west 2", true, &[(W, Below)]),
                dummy("", false, &[]),
            ],
            Self::EdgesNw => [
                dummy("baf dummy edges NW", false, &[(W, Above), (N, Below)]),
                dummy("baf dmy edges NW 2", true, &[(W, Above), (N, Above)]),
                dummy("baf dmy edges NW 3", true, &[(W, Below)]),
            ],
            Self::EdgesNe => [
                dummy("baf dummy edges NE", false, &[(N, Below), (E, Below)]),
                dummy("baf dmy edges NE 2", true, &[(N, Above), (E, Below)]),
                dummy("baf dmy edges NE 3", true, &[(E, Above)]),
            ],
            Self::EdgesSw => [
                dummy("baf dummy edges SW", false, &[(S, Above), (W, Above)]),
                dummy("baf dmy edges SW 2", true, &[(S, Below), (W, Above)]),
                dummy("baf dmy edges SW 3", true, &[(W, Below)]),
            ],
            Self::EdgesSe => [
                dummy("baf dummy edges SE", false, &[(S, Above), (E, Below)]),
                dummy("baf dmy edges SE 2", true, &[(S, Below), (E, Below)]),
                dummy("baf dmy edges SE 3", true, &[(E, Above)]),
            ],
            Self::CornerNw => [
                dummy("baf dummy corner NW", false, &[(W, Below), (N, Below)]),
                dummy("baf dmy corner NW 2", false, &[(W, Above)]),
                dummy("baf dmy corner NW 3", true, &[(N, Above), (W, Below)]),
            ],
            Self::CornerNe => [
                dummy("baf dummy corner NE", false, &[(E, Above), (N, Below)]),
                dummy("baf dmy corner NE 2", false, &[(E, Below)]),
                dummy("baf dmy corner NE 3", true, &[(N, Above), (E, Above)]),
            ],
            Self::CornerSe => [
                dummy("baf dummy corner SE", false, &[(E, Above), (S, Above)]),
                dummy("baf dmy corner SE 2", false, &[(E, Below)]),
                dummy("baf dmy corner SE 3", true, &[(S, Below), (E, Above)]),
            ],
            Self::CornerSw => [
                dummy("baf dummy corner SW", false, &[(W, Below), (S, Above)]),
                dummy("baf dmy corner SW 2", false, &[(W, Above)]),
                dummy("baf dmy corner SW 3", true, &[(S, Below), (W, Below)]),
            ],
        }
    }

    /// 2x2 lattice contents, top row first.
    fn quarters(self) -> [Quarter; 4] {
        use Quarter::{Own, Side, Water};
        match self {
            Self::North => [Own, Own, Water, Water],
            Self::South => [Water, Water, Own, Own],
            Self::East => [Water, Own, Water, Own],
            Self::West => [Own, Water, Own, Water],
            Self::EdgesNw => [Own, Side(N), Side(W), Water],
            Self::EdgesNe => [Side(N), Own, Water, Side(E)],
            Self::EdgesSw => [Side(W), Water, Own, Side(S)],
            Self::EdgesSe => [Water, Side(E), Side(S), Own],
            Self::CornerNw => [Own, Water, Water, Water],
            Self::CornerNe => [Water, Own, Water, Water],
            Self::CornerSe => [Water, Water, Water, Own],
            Self::CornerSw => [Water, Water, Own, Water],
        }
    }
}

/// Universes of the twelve baffle shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaffleUniverses {
    universes: HashMap<BaffleKind, UniverseId>,
}

impl BaffleUniverses {
    pub fn get(&self, kind: BaffleKind) -> Option<UniverseId> {
        self.universes.get(&kind).copied()
    }

    /// Universe for a core-map token such as `bafn_`.
    pub fn resolve(&self, code: &str) -> Option<UniverseId> {
        BaffleKind::from_code(code).and_then(|kind| self.get(kind))
    }

    pub fn len(&self) -> usize {
        self.universes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }
}

/// Registers the four baffle planes, then for each shape its dummy
/// universe, a 2x2 quarter-pitch lattice and the cell wrapping it.
pub fn build_baffle(
    ctx: &mut ModelContext,
    lattice: &LatticeConfig,
    library: &MaterialLibrary,
    water_pin: UniverseId,
    dummy_outer: SurfaceId,
) -> BuildResult<BaffleUniverses> {
    let offset = lattice.lattice_pitch / 4.0 - lattice.baffle_width;
    let width_note = format!(
        "chosen for 2x2 baffle lattice, so w={}",
        shortest_float(lattice.baffle_width)
    );
    let north = ctx.add_surface("baffle surf north", |id| {
        Surface::new(id, SurfaceKind::YPlane, general_float_padded(offset, 5, 8))
            .with_section("Baffle surfaces")
            .with_comment(width_note)
    })?;
    let south = ctx.add_surface("baffle surf south", |id| {
        Surface::new(id, SurfaceKind::YPlane, coefficient(-offset))
    })?;
    let east = ctx.add_surface("baffle surf east", |id| {
        Surface::new(id, SurfaceKind::XPlane, general_float_padded(offset, 5, 8))
    })?;
    let west = ctx.add_surface("baffle surf west", |id| {
        Surface::new(id, SurfaceKind::XPlane, coefficient(-offset))
    })?;
    let plane = |face: Face| match face {
        Face::North => north,
        Face::South => south,
        Face::East => east,
        Face::West => west,
    };

    let mut dummies: HashMap<Face, UniverseId> = HashMap::new();
    let mut universes = HashMap::with_capacity(BaffleKind::ALL.len());
    let mut first_cell = true;
    for kind in BaffleKind::ALL {
        let own = ctx.new_universe()?;
        for cell in kind.dummy_cells().iter().filter(|cell| !cell.key.is_empty()) {
            let material: MaterialId = if cell.steel {
                library.ss304
            } else {
                library.water_mod
            };
            let region = Region::new(
                cell.region
                    .iter()
                    .map(|(face, sense)| HalfSpace {
                        surface: plane(*face),
                        sense: *sense,
                    })
                    .collect(),
            );
            let section = std::mem::take(&mut first_cell);
            ctx.add_cell(cell.key, |id| {
                let cell = Cell::new(id, own, CellContent::Material(material), region);
                if section {
                    cell.with_section("Baffle cells")
                } else {
                    cell
                }
            })?;
        }
        let face = match kind {
            BaffleKind::North => Some(Face::North),
            BaffleKind::South => Some(Face::South),
            BaffleKind::East => Some(Face::East),
            BaffleKind::West => Some(Face::West),
            _ => None,
        };
        if let Some(face) = face {
            dummies.insert(face, own);
        }

        let mut grid = Vec::with_capacity(4);
        for quarter in kind.quarters() {
            grid.push(match quarter {
                Quarter::Own => own,
                Quarter::Water => water_pin,
                Quarter::Side(face) => side_dummy(&dummies, face, kind)?,
            });
        }

        let description = kind.description();
        let key = format!("baffle {}", kind.name());
        let lattice_id = ctx.add_lattice(key.as_str(), |id| Lattice {
            id,
            dimension: 2,
            lower_left: -lattice.lattice_pitch / 2.0,
            pitch: lattice.lattice_pitch / 2.0,
            universes: grid,
            section: None,
            comment: Some(format!("Baffle {description}")),
        })?;
        let universe = ctx.new_universe()?;
        ctx.add_cell(key, |id| {
            Cell::new(
                id,
                universe,
                CellContent::Fill(lattice_id),
                Region::new(vec![HalfSpace::below(dummy_outer)]),
            )
            .with_comment(format!("{description} baffle universe"))
        })?;
        universes.insert(kind, universe);
    }

    info!(
        shapes = universes.len(),
        width = lattice.baffle_width,
        "built baffle universes"
    );
    Ok(BaffleUniverses { universes })
}

/// Universe of the plain side shape for `face`. Plain sides come first in
/// [`BaffleKind::ALL`], so edge shapes find them already built.
fn side_dummy(
    dummies: &HashMap<Face, UniverseId>,
    face: Face,
    kind: BaffleKind,
) -> BuildResult<UniverseId> {
    dummies
        .get(&face)
        .copied()
        .ok_or_else(|| BuildError::MissingRequiredField {
            name: format!("baffle {}", kind.name()),
            field: "side universe",
        })
}

#[cfg(test)]
mod tests {
    use super::{BaffleKind, Face, build_baffle, side_dummy};
    use crate::domain::{BuildError, UniverseId};
    use std::collections::HashMap;
    use crate::builders::materials::build_materials;
    use crate::common::config::ModelConfig;
    use crate::domain::{CellContent, HalfSpace, Region, Surface, SurfaceKind};
    use crate::model::ModelContext;
    use std::collections::HashSet;

    fn build() -> (ModelContext, super::BaffleUniverses, crate::domain::UniverseId) {
        let config = ModelConfig::default();
        let mut ctx = ModelContext::default();
        let library = build_materials(&mut ctx, &config.water).expect("materials");
        let outer = ctx
            .add_surface("dummy outer", |id| {
                Surface::new(id, SurfaceKind::Sphere, "0.0 0.0 0.0 4000")
            })
            .expect("outer sphere");
        let water_pin = ctx.new_universe().expect("universe id");
        ctx.add_cell("water pin mod", |id| {
            crate::domain::Cell::new(
                id,
                water_pin,
                CellContent::Material(library.water_mod),
                Region::new(vec![HalfSpace::below(outer)]),
            )
        })
        .expect("water pin");
        let baffle =
            build_baffle(&mut ctx, &config.lattice, &library, water_pin, outer).expect("baffle");
        (ctx, baffle, water_pin)
    }

    #[test]
    fn codes_are_distinct_and_resolve_back() {
        let codes: HashSet<_> = BaffleKind::ALL.iter().map(|kind| kind.code()).collect();
        assert_eq!(codes.len(), 12);
        for kind in BaffleKind::ALL {
            assert_eq!(kind.code().len(), 5);
            assert_eq!(BaffleKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(BaffleKind::from_code("bafn_"), Some(BaffleKind::South));
        assert_eq!(BaffleKind::from_code("bfcnw"), Some(BaffleKind::EdgesSe));
        assert_eq!(BaffleKind::from_code("K4"), None);
    }

    #[test]
    fn baffle_planes_sit_one_width_inside_the_quarter_cell() {
        let (ctx, _, _) = build();
        let coeffs = |key: &str| ctx.surfaces.get(key).expect("baffle plane").coeffs.clone();
        assert_eq!(coeffs("baffle surf north"), "3.153400");
        assert_eq!(coeffs("baffle surf east"), "3.153400");
        assert_eq!(coeffs("baffle surf south"), "-3.15341");
        assert_eq!(coeffs("baffle surf west"), "-3.15341");
        let north = ctx.surfaces.get("baffle surf north").expect("north plane");
        assert_eq!(north.section.as_deref(), Some("Baffle surfaces"));
        assert_eq!(
            north.comment.as_deref(),
            Some("chosen for 2x2 baffle lattice, so w=2.2225")
        );
    }

    #[test]
    fn every_shape_is_a_two_by_two_lattice_in_its_own_universe() {
        let (ctx, baffle, water_pin) = build();
        assert_eq!(baffle.len(), 12);

        let distinct: HashSet<_> = BaffleKind::ALL
            .iter()
            .map(|kind| baffle.get(*kind).expect("universe"))
            .collect();
        assert_eq!(distinct.len(), 12);

        for kind in BaffleKind::ALL {
            let key = format!("baffle {}", kind.name());
            let lattice = ctx.lattices.get(&key).expect("baffle lattice");
            assert_eq!(lattice.dimension, 2);
            assert_eq!(lattice.universes.len(), 4);
            assert!((lattice.pitch - 21.50364 / 2.0).abs() < 1.0e-12);
            let cell = ctx.cells.get(&key).expect("wrapping cell");
            assert_eq!(cell.content, CellContent::Fill(lattice.id));
            assert_eq!(Some(cell.universe), baffle.get(kind));
        }

        let north = ctx.lattices.get("baffle north").expect("north lattice");
        assert_eq!(north.universes[2], water_pin);
        assert_eq!(north.universes[0], north.universes[1]);
        let edges = ctx.lattices.get("baffle edges NW").expect("edges lattice");
        assert_eq!(edges.universes[1], north.universes[0]);
        assert_eq!(edges.comment.as_deref(), Some("Baffle NW edges"));
        ctx.validate().expect("baffle references only defined universes");
    }

    #[test]
    fn dummy_cells_put_steel_on_the_named_side() {
        let (ctx, _, _) = build();
        let steel = ctx.materials.get("SS304").expect("steel").id;
        let north_plane = ctx.surfaces.get("baffle surf north").expect("plane").id;

        let north = ctx.cells.get("baffle dummy north").expect("north dummy");
        assert_eq!(north.content, CellContent::Material(steel));
        assert_eq!(north.region.to_string(), north_plane.to_string());
        assert_eq!(north.section.as_deref(), Some("Baffle cells"));

        let corner = ctx.cells.get("baf dmy corner SW 3").expect("corner steel");
        assert_eq!(corner.content, CellContent::Material(steel));
        assert_eq!(corner.region.half_spaces().len(), 2);
        assert!(ctx.cells.get("baf dummy corner SW").expect("corner water").section.is_none());
    }

    #[test]
    fn edge_shapes_require_their_side_universe() {
        let mut dummies = HashMap::new();
        dummies.insert(Face::North, UniverseId::new(7));

        assert_eq!(
            side_dummy(&dummies, Face::North, BaffleKind::EdgesNw).expect("north is built"),
            UniverseId::new(7)
        );
        let error = side_dummy(&dummies, Face::West, BaffleKind::EdgesNw)
            .expect_err("west side was never built");
        assert!(matches!(
            error,
            BuildError::MissingRequiredField { field: "side universe", .. }
        ));
        assert_eq!(error.exit_code(), 2);
    }
}
