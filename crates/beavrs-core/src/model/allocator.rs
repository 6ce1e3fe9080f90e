use crate::domain::{
    BuildError, BuildResult, CellId, EntityClass, MaterialId, PlotId, SurfaceId, UniverseId,
};
use std::collections::HashSet;

/// Inclusive identifier range. A lower bound of zero behaves like one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub lower: u32,
    pub upper: u32,
}

impl IdRange {
    pub const DEFAULT: Self = Self {
        lower: 1,
        upper: 1_000_000,
    };

    pub const fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    pub const fn contains(self, value: u32) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl Default for IdRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set of identifiers already handed out for one entity class.
#[derive(Debug, Clone)]
pub struct IdScope {
    class: EntityClass,
    issued: HashSet<u32>,
    // Every value in [1, dense_until) is issued.
    dense_until: u32,
}

impl IdScope {
    pub fn new(class: EntityClass) -> Self {
        Self {
            class,
            issued: HashSet::new(),
            dense_until: 1,
        }
    }

    pub fn class(&self) -> EntityClass {
        self.class
    }

    pub fn contains(&self, id: u32) -> bool {
        self.issued.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    /// Marks `id` as taken without scanning. Returns false if it already was.
    pub fn reserve(&mut self, id: u32) -> bool {
        let inserted = self.issued.insert(id);
        self.advance_dense_prefix();
        inserted
    }

    /// Lowest unused positive value in `range`, which is then marked as
    /// issued. Zero is never handed out, whatever the range's lower bound.
    pub fn next_id(&mut self, range: IdRange) -> BuildResult<u32> {
        let lower = range.lower.max(1);
        let mut candidate = if lower <= self.dense_until {
            self.dense_until
        } else {
            lower
        };

        while self.issued.contains(&candidate) {
            candidate = candidate
                .checked_add(1)
                .ok_or_else(|| self.exhausted(range))?;
        }
        if !range.contains(candidate) {
            return Err(self.exhausted(range));
        }

        self.issued.insert(candidate);
        self.advance_dense_prefix();
        Ok(candidate)
    }

    fn advance_dense_prefix(&mut self) {
        while self.issued.contains(&self.dense_until) {
            self.dense_until += 1;
        }
    }

    fn exhausted(&self, range: IdRange) -> BuildError {
        BuildError::IdSpaceExhausted {
            class: self.class,
            lower: range.lower,
            upper: range.upper,
        }
    }
}

/// One independent scope per entity class, all drawing from the same range.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    range: IdRange,
    materials: IdScope,
    surfaces: IdScope,
    cells: IdScope,
    universes: IdScope,
    plots: IdScope,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(IdRange::DEFAULT)
    }
}

impl IdAllocator {
    pub fn new(range: IdRange) -> Self {
        Self {
            range,
            materials: IdScope::new(EntityClass::Material),
            surfaces: IdScope::new(EntityClass::Surface),
            cells: IdScope::new(EntityClass::Cell),
            universes: IdScope::new(EntityClass::Universe),
            plots: IdScope::new(EntityClass::Plot),
        }
    }

    pub fn range(&self) -> IdRange {
        self.range
    }

    pub fn scope(&self, class: EntityClass) -> &IdScope {
        match class {
            EntityClass::Material => &self.materials,
            EntityClass::Surface => &self.surfaces,
            EntityClass::Cell => &self.cells,
            EntityClass::Universe => &self.universes,
            EntityClass::Plot => &self.plots,
        }
    }

    fn scope_mut(&mut self, class: EntityClass) -> &mut IdScope {
        match class {
            EntityClass::Material => &mut self.materials,
            EntityClass::Surface => &mut self.surfaces,
            EntityClass::Cell => &mut self.cells,
            EntityClass::Universe => &mut self.universes,
            EntityClass::Plot => &mut self.plots,
        }
    }

    pub fn next(&mut self, class: EntityClass) -> BuildResult<u32> {
        let range = self.range;
        self.scope_mut(class).next_id(range)
    }

    pub fn material(&mut self) -> BuildResult<MaterialId> {
        self.next(EntityClass::Material).map(MaterialId::new)
    }

    pub fn surface(&mut self) -> BuildResult<SurfaceId> {
        self.next(EntityClass::Surface).map(SurfaceId::new)
    }

    pub fn cell(&mut self) -> BuildResult<CellId> {
        self.next(EntityClass::Cell).map(CellId::new)
    }

    pub fn universe(&mut self) -> BuildResult<UniverseId> {
        self.next(EntityClass::Universe).map(UniverseId::new)
    }

    pub fn plot(&mut self) -> BuildResult<PlotId> {
        self.next(EntityClass::Plot).map(PlotId::new)
    }

    pub fn issued(&self, class: EntityClass) -> usize {
        self.scope(class).len()
    }
}
