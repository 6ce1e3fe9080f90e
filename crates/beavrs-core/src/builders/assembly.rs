use crate::common::constants::ASSEMBLY_DIMENSION;
use crate::domain::{
    BuildError, BuildResult, Cell, CellContent, HalfSpace, Lattice, MaterialId, Region, SurfaceId,
    UniverseId,
};
use crate::model::ModelContext;

/// Guide-tube positions `a`..`y` in reading order, as (row, column) of the
/// 17x17 pin lattice with row 0 at the top.
pub const GUIDE_TUBE_POSITIONS: [(char, usize, usize); 25] = [
    ('a', 2, 5),
    ('b', 2, 8),
    ('c', 2, 11),
    ('d', 3, 3),
    ('e', 3, 13),
    ('f', 5, 2),
    ('g', 5, 5),
    ('h', 5, 8),
    ('i', 5, 11),
    ('j', 5, 14),
    ('k', 8, 2),
    ('l', 8, 5),
    ('m', 8, 8),
    ('n', 8, 11),
    ('o', 8, 14),
    ('p', 11, 2),
    ('q', 11, 5),
    ('r', 11, 8),
    ('s', 11, 11),
    ('t', 11, 14),
    ('u', 13, 3),
    ('v', 13, 13),
    ('w', 14, 5),
    ('x', 14, 8),
    ('y', 14, 11),
];

/// The central guide tube, which holds the instrument thimble when present.
pub const CENTER_POSITION: char = 'm';

/// Burnable absorber loading of one assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsorberPattern {
    Empty,
    Ba12,
    Ba16,
    Ba20,
    Ba15Nw,
    Ba15Ne,
    Ba15Sw,
    Ba15Se,
    Ba6N,
    Ba6S,
    Ba6W,
    Ba6E,
}

impl AbsorberPattern {
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Ba12 => Some("12BA"),
            Self::Ba16 => Some("16BA"),
            Self::Ba20 => Some("20BA"),
            Self::Ba15Nw => Some("15BANW"),
            Self::Ba15Ne => Some("15BANE"),
            Self::Ba15Sw => Some("15BASW"),
            Self::Ba15Se => Some("15BASE"),
            Self::Ba6N => Some("6BAN"),
            Self::Ba6S => Some("6BAS"),
            Self::Ba6W => Some("6BAW"),
            Self::Ba6E => Some("6BAE"),
        }
    }

    /// Guide-tube letters that hold an absorber rod.
    pub const fn positions(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Ba12 => "acdefjptuvwy",
            Self::Ba16 => "abcdefjkoptuvwxy",
            Self::Ba20 => "abcdefgijkopqstuvwxy",
            Self::Ba15Nw => "ghijlnoqrstvwxy",
            Self::Ba15Ne => "fghiklnpqrsuwxy",
            Self::Ba15Sw => "abceghijlnoqrst",
            Self::Ba15Se => "abcdfghiklnpqrs",
            Self::Ba6N => "ptuvwy",
            Self::Ba6S => "acdefj",
            Self::Ba6W => "cejtvy",
            Self::Ba6E => "adfpuw",
        }
    }

    pub fn rod_count(self) -> usize {
        self.positions().len()
    }
}

/// Pin universes available to one assembly's lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinChoices {
    pub fuel: UniverseId,
    pub guide_tube: UniverseId,
    pub instrument_tube: UniverseId,
    pub burnable_absorber: UniverseId,
}

/// Row-major 17x17 pin grid: fuel everywhere except the guide-tube
/// positions, which get an absorber rod, the instrument tube (centre only)
/// or an empty guide tube.
pub fn pin_grid(
    pins: &PinChoices,
    instrumented: bool,
    absorbers: AbsorberPattern,
) -> Vec<UniverseId> {
    let mut grid = vec![pins.fuel; ASSEMBLY_DIMENSION * ASSEMBLY_DIMENSION];
    let rods = absorbers.positions();
    for (letter, row, column) in GUIDE_TUBE_POSITIONS {
        let universe = if letter == CENTER_POSITION {
            if instrumented {
                pins.instrument_tube
            } else {
                pins.guide_tube
            }
        } else if rods.contains(letter) {
            pins.burnable_absorber
        } else {
            pins.guide_tube
        };
        grid[row * ASSEMBLY_DIMENSION + column] = universe;
    }
    grid
}

/// The four planes bounding an assembly lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeBox {
    pub x_max: SurfaceId,
    pub x_min: SurfaceId,
    pub y_max: SurfaceId,
    pub y_min: SurfaceId,
}

impl LatticeBox {
    pub fn interior(&self) -> Region {
        Region::new(vec![
            HalfSpace::below(self.x_max),
            HalfSpace::above(self.x_min),
            HalfSpace::below(self.y_max),
            HalfSpace::above(self.y_min),
        ])
    }
}

/// Lattice parameters of one assembly. `dimension`, `lower_left`, `pitch`
/// and `universes` are required by [`make_assembly`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblySpec {
    pub name: String,
    pub comment: Option<String>,
    pub section: Option<String>,
    pub dimension: Option<usize>,
    pub lower_left: Option<f64>,
    pub pitch: Option<f64>,
    pub universes: Option<Vec<UniverseId>>,
}

impl AssemblySpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn lower_left(mut self, lower_left: f64) -> Self {
        self.lower_left = Some(lower_left);
        self
    }

    pub fn pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn universes(mut self, universes: Vec<UniverseId>) -> Self {
        self.universes = Some(universes);
        self
    }
}

/// Water cells around the lattice box: key suffix, comment, region.
fn exterior_cells(bounds: &LatticeBox) -> [(&'static str, &'static str, Region); 4] {
    [
        (
            " woflattice",
            "water west of lattice",
            Region::new(vec![
                HalfSpace::below(bounds.x_min),
                HalfSpace::below(bounds.y_max),
                HalfSpace::above(bounds.y_min),
            ]),
        ),
        (
            " noflattice",
            "water north of lattice",
            Region::new(vec![HalfSpace::above(bounds.y_max)]),
        ),
        (
            " eoflattice",
            "water east of lattice",
            Region::new(vec![
                HalfSpace::above(bounds.x_max),
                HalfSpace::below(bounds.y_max),
                HalfSpace::above(bounds.y_min),
            ]),
        ),
        (
            " soflattice",
            "water south of lattice",
            Region::new(vec![HalfSpace::below(bounds.y_min)]),
        ),
    ]
}

/// Registers the lattice `spec.name`, a bounding cell `<name> lattice` that
/// holds it, and four water cells outside the box, all in a new assembly
/// universe which is returned.
pub fn make_assembly(
    ctx: &mut ModelContext,
    bounds: &LatticeBox,
    water: MaterialId,
    spec: AssemblySpec,
) -> BuildResult<UniverseId> {
    let missing = |field| BuildError::MissingRequiredField {
        name: spec.name.clone(),
        field,
    };
    let dimension = spec
        .dimension
        .filter(|dimension| *dimension > 0)
        .ok_or_else(|| missing("dimension"))?;
    let lower_left = spec.lower_left.ok_or_else(|| missing("lower_left"))?;
    let pitch = spec.pitch.ok_or_else(|| missing("width"))?;
    let universes = spec
        .universes
        .clone()
        .filter(|universes| !universes.is_empty())
        .ok_or_else(|| missing("universes"))?;
    if universes.len() != dimension * dimension {
        return Err(BuildError::LengthMismatch {
            builder: "assembly",
            name: spec.name.clone(),
            what: "lattice universes",
            expected: dimension * dimension,
            actual: universes.len(),
        });
    }

    let name = spec.name.as_str();
    let lattice_key = format!("{name} lattice");
    ctx.lattices.ensure_vacant(name)?;
    ctx.cells.ensure_vacant(&lattice_key)?;
    let exterior = exterior_cells(bounds);
    for (suffix, _, _) in &exterior {
        ctx.cells.ensure_vacant(&format!("{name}{suffix}"))?;
    }

    let lattice = ctx.add_lattice(name, |id| Lattice {
        id,
        dimension,
        lower_left,
        pitch,
        universes,
        section: spec.section.clone(),
        comment: spec.comment.clone(),
    })?;

    let assembly = ctx.new_universe()?;
    ctx.add_cell(lattice_key, |id| {
        let mut cell = Cell::new(id, assembly, CellContent::Fill(lattice), bounds.interior());
        cell.comment = spec.comment.clone();
        cell.section = spec.section.clone();
        cell
    })?;

    for (suffix, comment, region) in exterior {
        ctx.add_cell(format!("{name}{suffix}"), |id| {
            Cell::new(id, assembly, CellContent::Material(water), region).with_comment(comment)
        })?;
    }

    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::{
        AbsorberPattern, AssemblySpec, CENTER_POSITION, GUIDE_TUBE_POSITIONS, LatticeBox,
        PinChoices, make_assembly, pin_grid,
    };
    use crate::common::constants::ASSEMBLY_DIMENSION;
    use crate::domain::{
        BuildError, CellContent, Density, HalfSpace, Material, Surface, SurfaceKind, UniverseId,
    };
    use crate::model::ModelContext;
    use std::collections::HashSet;

    fn lattice_box(ctx: &mut ModelContext) -> LatticeBox {
        let mut plane = |key: &str, kind| {
            ctx.add_surface(key, |id| Surface::new(id, kind, "10.70860"))
                .expect("surface should register")
        };
        LatticeBox {
            x_max: plane("lat box xtop", SurfaceKind::XPlane),
            x_min: plane("lat box xbot", SurfaceKind::XPlane),
            y_max: plane("lat box ytop", SurfaceKind::YPlane),
            y_min: plane("lat box ybot", SurfaceKind::YPlane),
        }
    }

    fn choices() -> PinChoices {
        PinChoices {
            fuel: UniverseId::new(1),
            guide_tube: UniverseId::new(2),
            instrument_tube: UniverseId::new(3),
            burnable_absorber: UniverseId::new(4),
        }
    }

    #[test]
    fn guide_tube_positions_are_distinct_and_symmetric() {
        let coordinates: HashSet<_> = GUIDE_TUBE_POSITIONS
            .iter()
            .map(|(_, row, column)| (*row, *column))
            .collect();
        assert_eq!(coordinates.len(), 25);
        for (row, column) in &coordinates {
            let last = ASSEMBLY_DIMENSION - 1;
            assert!(coordinates.contains(&(last - row, *column)));
            assert!(coordinates.contains(&(*row, last - column)));
            assert!(coordinates.contains(&(*column, *row)));
        }
        let letters: String = GUIDE_TUBE_POSITIONS.iter().map(|(letter, _, _)| *letter).collect();
        assert_eq!(letters, "abcdefghijklmnopqrstuvwxy");
    }

    #[test]
    fn absorber_patterns_never_use_the_centre_and_match_their_counts() {
        let cases = [
            (AbsorberPattern::Empty, 0),
            (AbsorberPattern::Ba12, 12),
            (AbsorberPattern::Ba16, 16),
            (AbsorberPattern::Ba20, 20),
            (AbsorberPattern::Ba15Nw, 15),
            (AbsorberPattern::Ba15Ne, 15),
            (AbsorberPattern::Ba15Sw, 15),
            (AbsorberPattern::Ba15Se, 15),
            (AbsorberPattern::Ba6N, 6),
            (AbsorberPattern::Ba6S, 6),
            (AbsorberPattern::Ba6W, 6),
            (AbsorberPattern::Ba6E, 6),
        ];
        for (pattern, count) in cases {
            assert_eq!(pattern.rod_count(), count, "{pattern:?}");
            assert!(!pattern.positions().contains(CENTER_POSITION));
        }
    }

    #[test]
    fn pin_grid_places_instrument_and_absorbers() {
        let pins = choices();
        let grid = pin_grid(&pins, true, AbsorberPattern::Ba16);

        let count = |universe| grid.iter().filter(|entry| **entry == universe).count();
        assert_eq!(count(pins.instrument_tube), 1);
        assert_eq!(count(pins.burnable_absorber), 16);
        assert_eq!(count(pins.guide_tube), 8);
        assert_eq!(count(pins.fuel), 264);
        assert_eq!(grid[8 * ASSEMBLY_DIMENSION + 8], pins.instrument_tube);

        let plain = pin_grid(&pins, false, AbsorberPattern::Empty);
        assert_eq!(plain[8 * ASSEMBLY_DIMENSION + 8], pins.guide_tube);
        assert_eq!(plain.iter().filter(|entry| **entry == pins.guide_tube).count(), 25);
    }

    #[test]
    fn exterior_cells_tile_the_box_from_outside() {
        let mut ctx = ModelContext::default();
        let bounds = lattice_box(&mut ctx);
        let water = ctx
            .add_material("water", |id| Material::new(id, "water", Density::new(0.7)))
            .expect("material");
        let pin = ctx.new_universe().expect("universe id");
        let spec = AssemblySpec::new("Fuel 1.6 w/oL1")
            .comment("Assembly 1.6 w/o")
            .dimension(17)
            .lower_left(-10.70864)
            .pitch(1.25984)
            .universes(vec![pin; 289]);

        let assembly = make_assembly(&mut ctx, &bounds, water, spec).expect("assembly");

        let inside = ctx.cells.get("Fuel 1.6 w/oL1 lattice").expect("bounding cell");
        assert_eq!(inside.universe, assembly);
        let box_faces: HashSet<HalfSpace> = inside.region.half_spaces().iter().copied().collect();

        let mut outward = HashSet::new();
        for suffix in [" woflattice", " noflattice", " eoflattice", " soflattice"] {
            let cell = ctx
                .cells
                .get(&format!("Fuel 1.6 w/oL1{suffix}"))
                .expect("exterior cell");
            assert_eq!(cell.universe, assembly);
            assert_eq!(cell.content, CellContent::Material(water));
            let escapes: Vec<_> = cell
                .region
                .half_spaces()
                .iter()
                .filter(|half_space| !box_faces.contains(*half_space))
                .collect();
            assert_eq!(escapes.len(), 1, "{suffix} leaves the box through one face");
            assert!(box_faces.contains(&escapes[0].flipped()));
            outward.insert(*escapes[0]);
        }
        let expected: HashSet<_> = box_faces.iter().map(|face| face.flipped()).collect();
        assert_eq!(outward, expected);
    }

    #[test]
    fn missing_lattice_fields_are_reported_by_name() {
        let mut ctx = ModelContext::default();
        let bounds = lattice_box(&mut ctx);
        let water = ctx
            .add_material("water", |id| Material::new(id, "water", Density::new(0.7)))
            .expect("material");

        let error = make_assembly(
            &mut ctx,
            &bounds,
            water,
            AssemblySpec::new("K4").dimension(17).lower_left(-10.0).pitch(1.0),
        )
        .expect_err("universes are required");
        assert_eq!(
            error,
            BuildError::MissingRequiredField {
                name: "K4".to_string(),
                field: "universes",
            }
        );

        let error = make_assembly(&mut ctx, &bounds, water, AssemblySpec::new("K4"))
            .expect_err("dimension is required");
        assert!(matches!(
            error,
            BuildError::MissingRequiredField { field: "dimension", .. }
        ));
        assert!(ctx.lattices.is_empty());
        assert!(ctx.cells.is_empty());
    }
}
