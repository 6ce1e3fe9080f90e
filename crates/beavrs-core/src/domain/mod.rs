pub mod errors;
pub mod ids;
pub mod records;
pub mod run;

pub use errors::{BuildError, BuildErrorCategory, BuildResult, ExitPlaceholder};
pub use ids::{CellId, EntityClass, MaterialId, PlotId, SurfaceId, UniverseId};
pub use records::{
    BoundaryCondition, Cell, CellContent, Density, FractionBasis, HalfSpace, Lattice, Material,
    Nuclide, Region, Sense, Surface, SurfaceKind, ThermalScattering,
};
pub use run::{
    CmfdSettings, EntropyMesh, Plot, PlotColorBy, PlotMask, Rgb, RunParameters, RunSettings,
    SourceBox, Tally, TallyMesh,
};
