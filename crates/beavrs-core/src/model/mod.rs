pub mod allocator;
pub mod registry;

pub use allocator::{IdAllocator, IdRange, IdScope};
pub use registry::{Registered, Registry};

use crate::domain::{
    BuildError, BuildResult, Cell, CellContent, CellId, Lattice, Material, MaterialId, Surface,
    SurfaceId, UniverseId,
};
use std::collections::HashSet;

/// Allocator plus the four geometry registries of one model build.
///
/// Builders take `&mut ModelContext`; concurrent builds use separate contexts.
#[derive(Debug, Clone)]
pub struct ModelContext {
    pub ids: IdAllocator,
    pub materials: Registry<Material>,
    pub surfaces: Registry<Surface>,
    pub cells: Registry<Cell>,
    pub lattices: Registry<Lattice>,
}

impl Default for ModelContext {
    fn default() -> Self {
        Self::new(IdRange::DEFAULT)
    }
}

impl ModelContext {
    pub fn new(range: IdRange) -> Self {
        Self {
            ids: IdAllocator::new(range),
            materials: Registry::new("material"),
            surfaces: Registry::new("surface"),
            cells: Registry::new("cell"),
            lattices: Registry::new("lattice"),
        }
    }

    pub fn add_material(
        &mut self,
        key: impl Into<String>,
        make: impl FnOnce(MaterialId) -> Material,
    ) -> BuildResult<MaterialId> {
        let key = key.into();
        self.materials.ensure_vacant(&key)?;
        let id = self.ids.material()?;
        self.materials.insert(key, make(id))?;
        Ok(id)
    }

    pub fn add_surface(
        &mut self,
        key: impl Into<String>,
        make: impl FnOnce(SurfaceId) -> Surface,
    ) -> BuildResult<SurfaceId> {
        let key = key.into();
        self.surfaces.ensure_vacant(&key)?;
        let id = self.ids.surface()?;
        self.surfaces.insert(key, make(id))?;
        Ok(id)
    }

    /// Registers an existing surface under a second name without a new id.
    pub fn alias_surface(
        &mut self,
        key: impl Into<String>,
        original: SurfaceId,
        comment: &str,
    ) -> BuildResult<SurfaceId> {
        let source = self
            .surfaces
            .records()
            .find(|surface| surface.id == original && !surface.dupe)
            .map(|surface| surface.alias(comment));
        let key = key.into();
        let Some(alias) = source else {
            return Err(BuildError::MissingRequiredField {
                name: key,
                field: "aliased surface",
            });
        };
        self.surfaces.insert(key, alias)?;
        Ok(original)
    }

    pub fn add_cell(
        &mut self,
        key: impl Into<String>,
        make: impl FnOnce(CellId) -> Cell,
    ) -> BuildResult<CellId> {
        let key = key.into();
        self.cells.ensure_vacant(&key)?;
        let id = self.ids.cell()?;
        self.cells.insert(key, make(id))?;
        Ok(id)
    }

    /// Lattices take their id from the universe scope.
    pub fn add_lattice(
        &mut self,
        key: impl Into<String>,
        make: impl FnOnce(UniverseId) -> Lattice,
    ) -> BuildResult<UniverseId> {
        let key = key.into();
        self.lattices.ensure_vacant(&key)?;
        let id = self.ids.universe()?;
        self.lattices.insert(key, make(id))?;
        Ok(id)
    }

    pub fn new_universe(&mut self) -> BuildResult<UniverseId> {
        self.ids.universe()
    }

    /// Universes that some cell or lattice defines, plus the root.
    pub fn defined_universes(&self) -> HashSet<UniverseId> {
        let mut defined: HashSet<_> = self.cells.records().map(|cell| cell.universe).collect();
        defined.extend(self.lattices.records().map(|lattice| lattice.id));
        defined.insert(UniverseId::ROOT);
        defined
    }

    /// Checks that every fill and lattice entry names a defined universe,
    /// that lattice grids are square, and that cell ids are distinct.
    pub fn validate(&self) -> BuildResult<()> {
        let defined = self.defined_universes();

        for (key, cell) in self.cells.ordered() {
            let CellContent::Fill(universe) = cell.content else {
                continue;
            };
            if !defined.contains(&universe) {
                return Err(BuildError::UndefinedUniverse {
                    referrer: format!("cell '{key}'"),
                    universe,
                });
            }
        }

        for (key, lattice) in self.lattices.ordered() {
            let expected = lattice.dimension * lattice.dimension;
            if lattice.universes.len() != expected {
                return Err(BuildError::LengthMismatch {
                    builder: "lattice",
                    name: key.to_string(),
                    what: "universes",
                    expected,
                    actual: lattice.universes.len(),
                });
            }
            if let Some(universe) = lattice
                .universes
                .iter()
                .find(|universe| !defined.contains(universe))
            {
                return Err(BuildError::UndefinedUniverse {
                    referrer: format!("lattice '{key}'"),
                    universe: *universe,
                });
            }
        }

        let mut cell_ids = HashSet::new();
        for (key, cell) in self.cells.ordered() {
            if !cell_ids.insert(cell.id) {
                return Err(BuildError::DuplicateKey {
                    registry: "cell id",
                    key: format!("{} ({key})", cell.id),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ModelContext;
    use crate::domain::{
        BuildError, Cell, CellContent, HalfSpace, Lattice, Material, Density, Region, Surface,
        SurfaceKind, UniverseId,
    };

    #[test]
    fn duplicate_cell_key_does_not_consume_an_id() {
        let mut ctx = ModelContext::default();
        let water = ctx
            .add_material("water", |id| Material::new(id, "water", Density::new(1.0)))
            .expect("material should register");
        let universe = ctx.new_universe().expect("universe id");
        let make = |id| {
            Cell::new(
                id,
                universe,
                CellContent::Material(water),
                Region::default(),
            )
        };

        ctx.add_cell("only", make).expect("first cell");
        let error = ctx.add_cell("only", make).expect_err("duplicate cell");
        assert!(matches!(error, BuildError::DuplicateKey { registry: "cell", .. }));
        assert_eq!(ctx.ids.cell().expect("cell id").get(), 2);
    }

    #[test]
    fn aliases_reuse_the_original_surface_id() {
        let mut ctx = ModelContext::default();
        let original = ctx
            .add_surface("burnabs rad 5", |id| {
                Surface::new(id, SurfaceKind::ZCylinder, "0.0 0.0 0.436880")
            })
            .expect("surface should register");
        let alias = ctx
            .alias_surface("instr tube IR", original, "instrument tube thimble IR")
            .expect("alias should register");

        assert_eq!(alias, original);
        assert_eq!(ctx.surfaces.len(), 2);
        assert!(ctx.surfaces.get("instr tube IR").is_some_and(|surface| surface.dupe));
    }

    #[test]
    fn validate_rejects_fill_of_an_undefined_universe() {
        let mut ctx = ModelContext::default();
        let outer = ctx
            .add_surface("outer", |id| Surface::new(id, SurfaceKind::Sphere, "0 0 0 1"))
            .expect("surface");
        let ghost = ctx.new_universe().expect("universe id");
        ctx.add_cell("root", |id| {
            Cell::new(
                id,
                UniverseId::ROOT,
                CellContent::Fill(ghost),
                Region::new(vec![HalfSpace::below(outer)]),
            )
        })
        .expect("cell");

        let error = ctx.validate().expect_err("ghost universe should be reported");
        assert_eq!(
            error,
            BuildError::UndefinedUniverse {
                referrer: "cell 'root'".to_string(),
                universe: ghost,
            }
        );
    }

    #[test]
    fn validate_accepts_lattices_of_defined_universes() {
        let mut ctx = ModelContext::default();
        let water = ctx
            .add_material("water", |id| Material::new(id, "water", Density::new(1.0)))
            .expect("material");
        let pin = ctx.new_universe().expect("universe id");
        ctx.add_cell("pin", |id| {
            Cell::new(id, pin, CellContent::Material(water), Region::default())
        })
        .expect("cell");
        let lattice = ctx
            .add_lattice("grid", |id| Lattice {
                id,
                dimension: 2,
                lower_left: -1.0,
                pitch: 1.0,
                universes: vec![pin; 4],
                section: None,
                comment: None,
            })
            .expect("lattice");
        ctx.add_cell("root", |id| {
            Cell::new(id, UniverseId::ROOT, CellContent::Fill(lattice), Region::default())
        })
        .expect("cell");

        ctx.validate().expect("model should be closed");
    }
}
