use super::ids::PlotId;
use std::fmt::{Display, Formatter};

/// Axis-aligned box given by two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceBox {
    pub lower_left: [f64; 3],
    pub upper_right: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyMesh {
    pub dimension: [u32; 3],
    pub extent: SourceBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub cross_sections: String,
    pub batches: u32,
    pub inactive: u32,
    pub particles: u64,
    pub verbosity: u32,
    pub entropy: EntropyMesh,
    pub source: SourceBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(255, 255, 255);
    pub const BLACK: Self = Self(0, 0, 0);
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotColorBy {
    Cell,
    Material,
}

impl PlotColorBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cell => "cell",
            Self::Material => "mat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotMask {
    pub components: Vec<u32>,
    pub background: Rgb,
}

/// An xy slice plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub id: PlotId,
    pub filename: String,
    pub color_by: PlotColorBy,
    pub background: Rgb,
    pub origin: [f64; 3],
    pub width: [f64; 2],
    pub pixels: [u32; 2],
    /// Entity id (material or cell, per `color_by`) to colour.
    pub colors: Vec<(u32, Rgb)>,
    pub mask: Option<PlotMask>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TallyMesh {
    pub id: u32,
    pub dimension: [u32; 2],
    pub lower_left: [f64; 2],
    pub width: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub id: u32,
    pub mesh: u32,
    pub scores: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CmfdSettings {
    pub lower_left: [f64; 3],
    pub upper_right: [f64; 3],
    pub dimension: [usize; 3],
    /// One map block per axial layer, joined by blank-free newlines.
    pub map: String,
    pub albedo: String,
    pub energy: String,
    pub begin: u32,
    pub active_flush: u32,
    pub keff_tol: f64,
    pub feedback: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    pub settings: RunSettings,
    pub plots: Vec<Plot>,
    pub meshes: Vec<TallyMesh>,
    pub tallies: Vec<Tally>,
    pub cmfd: CmfdSettings,
}
