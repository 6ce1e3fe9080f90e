use super::ids::{CellId, MaterialId, SurfaceId, UniverseId};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FractionBasis {
    Atom,
    Weight,
}

impl FractionBasis {
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Atom => "ao",
            Self::Weight => "wo",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nuclide {
    pub name: String,
    pub xs: String,
    pub basis: FractionBasis,
    pub fraction: f64,
}

impl Nuclide {
    pub fn atom(name: impl Into<String>, xs: impl Into<String>, fraction: f64) -> Self {
        Self {
            name: name.into(),
            xs: xs.into(),
            basis: FractionBasis::Atom,
            fraction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermalScattering {
    pub name: String,
    pub xs: String,
}

/// Mass density in g/cc. `decimals` pins the printed form to fixed-point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    pub grams_per_cc: f64,
    pub decimals: Option<usize>,
}

impl Density {
    pub const fn new(grams_per_cc: f64) -> Self {
        Self {
            grams_per_cc,
            decimals: None,
        }
    }

    pub const fn fixed(grams_per_cc: f64, decimals: usize) -> Self {
        Self {
            grams_per_cc,
            decimals: Some(decimals),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub comment: String,
    pub density: Density,
    pub nuclides: Vec<Nuclide>,
    pub sab: Vec<ThermalScattering>,
}

impl Material {
    pub fn new(id: MaterialId, comment: impl Into<String>, density: Density) -> Self {
        Self {
            id,
            comment: comment.into(),
            density,
            nuclides: Vec::new(),
            sab: Vec::new(),
        }
    }

    pub fn with_nuclides(mut self, nuclides: Vec<Nuclide>) -> Self {
        self.nuclides = nuclides;
        self
    }

    pub fn with_sab(mut self, name: impl Into<String>, xs: impl Into<String>) -> Self {
        self.sab.push(ThermalScattering {
            name: name.into(),
            xs: xs.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Sphere,
    XPlane,
    YPlane,
    ZPlane,
    Plane,
    ZCylinder,
}

impl SurfaceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::XPlane => "x-plane",
            Self::YPlane => "y-plane",
            Self::ZPlane => "z-plane",
            Self::Plane => "plane",
            Self::ZCylinder => "z-cylinder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    Vacuum,
    Reflective,
}

impl BoundaryCondition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vacuum => "vacuum",
            Self::Reflective => "reflective",
        }
    }
}

/// A quadric or plane. Coefficients are kept as the exact text written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub id: SurfaceId,
    pub kind: SurfaceKind,
    pub coeffs: String,
    pub boundary: Option<BoundaryCondition>,
    /// Alias of an earlier surface with the same id; never rendered twice.
    pub dupe: bool,
    pub section: Option<String>,
    pub comment: Option<String>,
}

impl Surface {
    pub fn new(id: SurfaceId, kind: SurfaceKind, coeffs: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            coeffs: coeffs.into(),
            boundary: None,
            dupe: false,
            section: None,
            comment: None,
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Same surface registered under another name.
    pub fn alias(&self, comment: impl Into<String>) -> Self {
        Self {
            dupe: true,
            section: None,
            comment: Some(comment.into()),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Negative,
    Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfSpace {
    pub surface: SurfaceId,
    pub sense: Sense,
}

impl HalfSpace {
    pub const fn below(surface: SurfaceId) -> Self {
        Self {
            surface,
            sense: Sense::Negative,
        }
    }

    pub const fn above(surface: SurfaceId) -> Self {
        Self {
            surface,
            sense: Sense::Positive,
        }
    }

    pub const fn flipped(self) -> Self {
        Self {
            surface: self.surface,
            sense: match self.sense {
                Sense::Negative => Sense::Positive,
                Sense::Positive => Sense::Negative,
            },
        }
    }
}

impl Display for HalfSpace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.sense {
            Sense::Negative => write!(f, "-{}", self.surface),
            Sense::Positive => write!(f, "{}", self.surface),
        }
    }
}

/// Intersection of half-spaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region(Vec<HalfSpace>);

impl Region {
    pub fn new(half_spaces: Vec<HalfSpace>) -> Self {
        Self(half_spaces)
    }

    pub fn half_spaces(&self) -> &[HalfSpace] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, half_space) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{half_space}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellContent {
    Material(MaterialId),
    Fill(UniverseId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: CellId,
    pub universe: UniverseId,
    pub content: CellContent,
    pub region: Region,
    pub section: Option<String>,
    pub comment: Option<String>,
}

impl Cell {
    pub fn new(id: CellId, universe: UniverseId, content: CellContent, region: Region) -> Self {
        Self {
            id,
            universe,
            content,
            region,
            section: None,
            comment: None,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn maybe_section(self, section: &str) -> Self {
        if section.is_empty() {
            self
        } else {
            self.with_section(section)
        }
    }

    pub fn maybe_comment(self, comment: &str) -> Self {
        if comment.is_empty() {
            self
        } else {
            self.with_comment(comment)
        }
    }
}

/// Square rectangular lattice. `universes` is row-major, first row at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    pub id: UniverseId,
    pub dimension: usize,
    pub lower_left: f64,
    pub pitch: f64,
    pub universes: Vec<UniverseId>,
    pub section: Option<String>,
    pub comment: Option<String>,
}

impl Lattice {
    pub fn rows(&self) -> impl Iterator<Item = &[UniverseId]> {
        self.universes.chunks(self.dimension.max(1))
    }
}
