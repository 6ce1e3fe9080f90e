//! Core loading of BEAVRS cycle 1: which assembly type sits at each core
//! position, and the 19x19 map of positions and baffle pieces.

use super::assembly::AbsorberPattern;
use crate::common::constants::{ASSEMBLY_COUNT, CORE_DIMENSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Enrichment {
    Low,
    Medium,
    High,
}

impl Enrichment {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Weight percent U-235 as written in keys and comments.
    pub const fn weight_percent(self) -> &'static str {
        match self {
            Self::Low => "1.6",
            Self::Medium => "2.4",
            Self::High => "3.1",
        }
    }
}

/// What occupies the central guide tube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CenterTube {
    GuideTube,
    Instrument,
}

pub const SPARE_LOCATION: &str = "Sp spare location";
pub const SECONDARY_SOURCE: &str = "4 secondary source rods here";
pub const SHOULD_BE_23BA1P: &str = "really should be 23BA1P";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyLoading {
    pub position: &'static str,
    pub enrichment: Enrichment,
    pub center: CenterTube,
    pub absorbers: AbsorberPattern,
    /// Known uncertainty in the loading data at this position.
    pub note: Option<&'static str>,
}

impl AssemblyLoading {
    const fn noted(self, note: &'static str) -> Self {
        Self {
            note: Some(note),
            ..self
        }
    }

    pub const fn instrumented(&self) -> bool {
        matches!(self.center, CenterTube::Instrument)
    }

    /// `" + instr + 12BA"`-style qualifiers followed by the position.
    fn qualifiers(&self) -> String {
        let mut text = String::new();
        if self.instrumented() {
            text.push_str(" + instr");
        }
        if let Some(label) = self.absorbers.label() {
            text.push_str(" + ");
            text.push_str(label);
        }
        text.push_str(self.position);
        text
    }

    /// Registry key, e.g. `Fuel 2.4 w/o + instr + 12BAK4`.
    pub fn key(&self) -> String {
        format!(
            "Fuel {} w/o{}",
            self.enrichment.weight_percent(),
            self.qualifiers()
        )
    }

    /// Lattice comment, e.g. `Assembly 1.6 w/o no BAs + instrL5`.
    pub fn comment(&self) -> String {
        let no_absorbers = if self.absorbers.label().is_none() {
            " no BAs"
        } else {
            ""
        };
        format!(
            "Assembly {} w/o{no_absorbers}{}",
            self.enrichment.weight_percent(),
            self.qualifiers()
        )
    }
}

const fn slot(
    position: &'static str,
    enrichment: Enrichment,
    center: CenterTube,
    absorbers: AbsorberPattern,
) -> AssemblyLoading {
    AssemblyLoading {
        position,
        enrichment,
        center,
        absorbers,
        note: None,
    }
}

use AbsorberPattern as P;
use CenterTube as C;
use Enrichment as E;

/// Every fueled position in reading order (top row first, west to east).
pub const CORE_LOADING: [AssemblyLoading; ASSEMBLY_COUNT] = [
    slot("L1", E::High, C::GuideTube, P::Empty),
    slot("K1", E::High, C::GuideTube, P::Ba6N),
    slot("J1", E::High, C::Instrument, P::Empty).noted(SPARE_LOCATION),
    slot("H1", E::High, C::GuideTube, P::Ba6N),
    slot("G1", E::High, C::GuideTube, P::Empty),
    slot("F1", E::High, C::Instrument, P::Ba6N),
    slot("E1", E::High, C::GuideTube, P::Empty),
    slot("N2", E::High, C::Instrument, P::Empty),
    slot("M2", E::High, C::GuideTube, P::Empty),
    slot("L2", E::High, C::GuideTube, P::Ba16),
    slot("K2", E::Low, C::Instrument, P::Empty),
    slot("J2", E::High, C::GuideTube, P::Ba20),
    slot("H2", E::Low, C::Instrument, P::Empty),
    slot("G2", E::High, C::GuideTube, P::Ba20).noted(SHOULD_BE_23BA1P),
    slot("F2", E::Low, C::GuideTube, P::Empty),
    slot("E2", E::High, C::GuideTube, P::Ba16),
    slot("D2", E::High, C::GuideTube, P::Empty),
    slot("C2", E::High, C::GuideTube, P::Empty),
    slot("P3", E::High, C::GuideTube, P::Empty),
    slot("N3", E::High, C::GuideTube, P::Ba15Nw),
    slot("M3", E::Medium, C::GuideTube, P::Ba16),
    slot("L3", E::Low, C::GuideTube, P::Empty),
    slot("K3", E::Medium, C::GuideTube, P::Ba16),
    slot("J3", E::Low, C::GuideTube, P::Empty),
    slot("H3", E::Medium, C::Instrument, P::Ba16),
    slot("G3", E::Low, C::GuideTube, P::Empty),
    slot("F3", E::Medium, C::Instrument, P::Ba16),
    slot("E3", E::Low, C::GuideTube, P::Empty),
    slot("D3", E::Medium, C::Instrument, P::Ba16),
    slot("C3", E::High, C::GuideTube, P::Ba15Ne),
    slot("B3", E::High, C::Instrument, P::Empty),
    slot("P4", E::High, C::Instrument, P::Empty),
    slot("N4", E::Medium, C::Instrument, P::Ba16),
    slot("M4", E::Medium, C::GuideTube, P::Empty),
    slot("L4", E::Medium, C::GuideTube, P::Ba16),
    slot("K4", E::Low, C::GuideTube, P::Empty).noted(SECONDARY_SOURCE),
    slot("J4", E::Medium, C::GuideTube, P::Ba12),
    slot("H4", E::Low, C::Instrument, P::Empty),
    slot("G4", E::Medium, C::GuideTube, P::Ba12),
    slot("F4", E::Low, C::GuideTube, P::Empty),
    slot("E4", E::Medium, C::GuideTube, P::Ba16),
    slot("D4", E::Medium, C::GuideTube, P::Empty),
    slot("C4", E::Medium, C::GuideTube, P::Ba16),
    slot("B4", E::High, C::GuideTube, P::Empty),
    slot("R5", E::High, C::GuideTube, P::Empty),
    slot("P5", E::High, C::GuideTube, P::Ba16),
    slot("N5", E::Low, C::GuideTube, P::Empty),
    slot("M5", E::Medium, C::GuideTube, P::Ba16),
    slot("L5", E::Low, C::Instrument, P::Empty),
    slot("K5", E::Medium, C::GuideTube, P::Ba12),
    slot("J5", E::Low, C::GuideTube, P::Empty),
    slot("H5", E::Medium, C::GuideTube, P::Ba12),
    slot("G5", E::Low, C::Instrument, P::Empty),
    slot("F5", E::Medium, C::GuideTube, P::Ba12),
    slot("E5", E::Low, C::Instrument, P::Empty),
    slot("D5", E::Medium, C::GuideTube, P::Ba16),
    slot("C5", E::Low, C::Instrument, P::Empty),
    slot("B5", E::High, C::GuideTube, P::Ba16),
    slot("A5", E::High, C::GuideTube, P::Empty),
    slot("R6", E::High, C::Instrument, P::Ba6W),
    slot("P6", E::Low, C::GuideTube, P::Empty),
    slot("N6", E::Medium, C::Instrument, P::Ba16),
    slot("M6", E::Low, C::GuideTube, P::Empty),
    slot("L6", E::Medium, C::GuideTube, P::Ba12),
    slot("K6", E::Low, C::Instrument, P::Empty),
    slot("J6", E::Medium, C::GuideTube, P::Ba12),
    slot("H6", E::Low, C::Instrument, P::Empty),
    slot("G6", E::Medium, C::GuideTube, P::Ba12),
    slot("F6", E::Low, C::GuideTube, P::Empty),
    slot("E6", E::Medium, C::GuideTube, P::Ba12),
    slot("D6", E::Low, C::GuideTube, P::Empty),
    slot("C6", E::Medium, C::GuideTube, P::Ba16),
    slot("B6", E::Low, C::Instrument, P::Empty),
    slot("A6", E::High, C::GuideTube, P::Ba6E),
    slot("R7", E::High, C::GuideTube, P::Empty),
    slot("P7", E::High, C::GuideTube, P::Ba20),
    slot("N7", E::Low, C::GuideTube, P::Empty),
    slot("M7", E::Medium, C::Instrument, P::Ba12),
    slot("L7", E::Low, C::GuideTube, P::Empty),
    slot("K7", E::Medium, C::GuideTube, P::Ba12),
    slot("J7", E::Low, C::Instrument, P::Empty),
    slot("H7", E::Medium, C::GuideTube, P::Ba16),
    slot("G7", E::Low, C::GuideTube, P::Empty),
    slot("F7", E::Medium, C::Instrument, P::Ba12),
    slot("E7", E::Low, C::GuideTube, P::Empty),
    slot("D7", E::Medium, C::GuideTube, P::Ba12),
    slot("C7", E::Low, C::Instrument, P::Empty),
    slot("B7", E::High, C::GuideTube, P::Ba20),
    slot("A7", E::High, C::GuideTube, P::Empty).noted(SPARE_LOCATION),
    slot("R8", E::High, C::Instrument, P::Ba6W),
    slot("P8", E::Low, C::GuideTube, P::Empty),
    slot("N8", E::Medium, C::Instrument, P::Ba16),
    slot("M8", E::Low, C::GuideTube, P::Empty),
    slot("L8", E::Medium, C::Instrument, P::Ba12),
    slot("K8", E::Low, C::GuideTube, P::Empty),
    slot("J8", E::Medium, C::Instrument, P::Ba16),
    slot("H8", E::Low, C::GuideTube, P::Empty),
    slot("G8", E::Medium, C::GuideTube, P::Ba16),
    slot("F8", E::Low, C::Instrument, P::Empty),
    slot("E8", E::Medium, C::GuideTube, P::Ba12),
    slot("D8", E::Low, C::Instrument, P::Empty),
    slot("C8", E::Medium, C::Instrument, P::Ba16),
    slot("B8", E::Low, C::Instrument, P::Empty),
    slot("A8", E::High, C::GuideTube, P::Ba6E),
    slot("R9", E::High, C::GuideTube, P::Empty).noted(SPARE_LOCATION),
    slot("P9", E::High, C::Instrument, P::Ba20),
    slot("N9", E::Low, C::GuideTube, P::Empty),
    slot("M9", E::Medium, C::GuideTube, P::Ba12),
    slot("L9", E::Low, C::GuideTube, P::Empty),
    slot("K9", E::Medium, C::GuideTube, P::Ba12),
    slot("J9", E::Low, C::GuideTube, P::Empty),
    slot("H9", E::Medium, C::GuideTube, P::Ba16),
    slot("G9", E::Low, C::Instrument, P::Empty),
    slot("F9", E::Medium, C::GuideTube, P::Ba12),
    slot("E9", E::Low, C::Instrument, P::Empty),
    slot("D9", E::Medium, C::GuideTube, P::Ba12),
    slot("C9", E::Low, C::GuideTube, P::Empty),
    slot("B9", E::High, C::GuideTube, P::Ba20),
    slot("A9", E::High, C::Instrument, P::Empty),
    slot("R10", E::High, C::GuideTube, P::Ba6W),
    slot("P10", E::Low, C::GuideTube, P::Empty),
    slot("N10", E::Medium, C::GuideTube, P::Ba16),
    slot("M10", E::Low, C::GuideTube, P::Empty),
    slot("L10", E::Medium, C::Instrument, P::Ba12),
    slot("K10", E::Low, C::GuideTube, P::Empty),
    slot("J10", E::Medium, C::Instrument, P::Ba12),
    slot("H10", E::Low, C::GuideTube, P::Empty),
    slot("G10", E::Medium, C::GuideTube, P::Ba12),
    slot("F10", E::Low, C::GuideTube, P::Empty),
    slot("E10", E::Medium, C::GuideTube, P::Ba12),
    slot("D10", E::Low, C::Instrument, P::Empty),
    slot("C10", E::Medium, C::GuideTube, P::Ba16),
    slot("B10", E::Low, C::GuideTube, P::Empty),
    slot("A10", E::High, C::GuideTube, P::Ba6E),
    slot("R11", E::High, C::Instrument, P::Empty),
    slot("P11", E::High, C::GuideTube, P::Ba16),
    slot("N11", E::Low, C::GuideTube, P::Empty),
    slot("M11", E::Medium, C::GuideTube, P::Ba16),
    slot("L11", E::Low, C::Instrument, P::Empty),
    slot("K11", E::Medium, C::GuideTube, P::Ba12),
    slot("J11", E::Low, C::GuideTube, P::Empty),
    slot("H11", E::Medium, C::Instrument, P::Ba12),
    slot("G11", E::Low, C::GuideTube, P::Empty),
    slot("F11", E::Medium, C::GuideTube, P::Ba12),
    slot("E11", E::Low, C::Instrument, P::Empty),
    slot("D11", E::Medium, C::GuideTube, P::Ba16),
    slot("C11", E::Low, C::GuideTube, P::Empty),
    slot("B11", E::High, C::GuideTube, P::Ba16),
    slot("A11", E::High, C::GuideTube, P::Empty),
    slot("P12", E::High, C::GuideTube, P::Empty),
    slot("N12", E::Medium, C::GuideTube, P::Ba16),
    slot("M12", E::Medium, C::GuideTube, P::Empty),
    slot("L12", E::Medium, C::GuideTube, P::Ba16),
    slot("K12", E::Low, C::Instrument, P::Empty),
    slot("J12", E::Medium, C::GuideTube, P::Ba12),
    slot("H12", E::Low, C::GuideTube, P::Empty),
    slot("G12", E::Medium, C::Instrument, P::Ba12),
    slot("F12", E::Low, C::GuideTube, P::Empty).noted(SECONDARY_SOURCE),
    slot("E12", E::Medium, C::GuideTube, P::Ba16),
    slot("D12", E::Medium, C::Instrument, P::Empty),
    slot("C12", E::Medium, C::GuideTube, P::Ba16),
    slot("B12", E::High, C::GuideTube, P::Empty),
    slot("P13", E::High, C::GuideTube, P::Empty),
    slot("N13", E::High, C::Instrument, P::Ba15Sw),
    slot("M13", E::Medium, C::GuideTube, P::Ba16),
    slot("L13", E::Low, C::Instrument, P::Empty),
    slot("K13", E::Medium, C::GuideTube, P::Ba16),
    slot("J13", E::Low, C::GuideTube, P::Empty),
    slot("H13", E::Medium, C::Instrument, P::Ba16),
    slot("G13", E::Low, C::GuideTube, P::Empty),
    slot("F13", E::Medium, C::GuideTube, P::Ba16),
    slot("E13", E::Low, C::GuideTube, P::Empty),
    slot("D13", E::Medium, C::GuideTube, P::Ba16),
    slot("C13", E::High, C::GuideTube, P::Ba15Se),
    slot("B13", E::High, C::Instrument, P::Empty),
    slot("N14", E::High, C::Instrument, P::Empty),
    slot("M14", E::High, C::GuideTube, P::Empty),
    slot("L14", E::High, C::GuideTube, P::Ba16),
    slot("K14", E::Low, C::GuideTube, P::Empty),
    slot("J14", E::High, C::Instrument, P::Ba20),
    slot("H14", E::Low, C::GuideTube, P::Empty),
    slot("G14", E::High, C::GuideTube, P::Ba20).noted(SHOULD_BE_23BA1P),
    slot("F14", E::Low, C::Instrument, P::Empty),
    slot("E14", E::High, C::GuideTube, P::Ba16),
    slot("D14", E::High, C::Instrument, P::Empty),
    slot("C14", E::High, C::GuideTube, P::Empty),
    slot("L15", E::High, C::Instrument, P::Empty),
    slot("K15", E::High, C::GuideTube, P::Ba6S),
    slot("J15", E::High, C::GuideTube, P::Empty),
    slot("H15", E::High, C::Instrument, P::Ba6S),
    slot("G15", E::High, C::GuideTube, P::Empty).noted(SPARE_LOCATION),
    slot("F15", E::High, C::GuideTube, P::Ba6S),
    slot("E15", E::High, C::GuideTube, P::Empty),
];

/// Placeholder for plain water outside the baffle.
pub const WATER_TOKEN: &str = ".";

/// Core lattice, top row first. Entries are core positions, baffle codes or
/// [`WATER_TOKEN`].
pub const CORE_MAP: [[&str; CORE_DIMENSION]; CORE_DIMENSION] = [
    [".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", "."],
    [".", ".", ".", ".", ".", "bafnw", "bafn_", "bafn_", "bafn_", "bafn_", "bafn_", "bafn_", "bafn_", "bafne", ".", ".", ".", ".", "."],
    [".", ".", ".", "bafnw", "bafn_", "bfcnw", "L1", "K1", "J1", "H1", "G1", "F1", "E1", "bfcne", "bafn_", "bafne", ".", ".", "."],
    [".", ".", "bafnw", "bfcnw", "N2", "M2", "L2", "K2", "J2", "H2", "G2", "F2", "E2", "D2", "C2", "bfcne", "bafne", ".", "."],
    [".", ".", "bafw_", "P3", "N3", "M3", "L3", "K3", "J3", "H3", "G3", "F3", "E3", "D3", "C3", "B3", "bafe_", ".", "."],
    [".", "bafnw", "bfcnw", "P4", "N4", "M4", "L4", "K4", "J4", "H4", "G4", "F4", "E4", "D4", "C4", "B4", "bfcne", "bafne", "."],
    [".", "bafw_", "R5", "P5", "N5", "M5", "L5", "K5", "J5", "H5", "G5", "F5", "E5", "D5", "C5", "B5", "A5", "bafe_", "."],
    [".", "bafw_", "R6", "P6", "N6", "M6", "L6", "K6", "J6", "H6", "G6", "F6", "E6", "D6", "C6", "B6", "A6", "bafe_", "."],
    [".", "bafw_", "R7", "P7", "N7", "M7", "L7", "K7", "J7", "H7", "G7", "F7", "E7", "D7", "C7", "B7", "A7", "bafe_", "."],
    [".", "bafw_", "R8", "P8", "N8", "M8", "L8", "K8", "J8", "H8", "G8", "F8", "E8", "D8", "C8", "B8", "A8", "bafe_", "."],
    [".", "bafw_", "R9", "P9", "N9", "M9", "L9", "K9", "J9", "H9", "G9", "F9", "E9", "D9", "C9", "B9", "A9", "bafe_", "."],
    [".", "bafw_", "R10", "P10", "N10", "M10", "L10", "K10", "J10", "H10", "G10", "F10", "E10", "D10", "C10", "B10", "A10", "bafe_", "."],
    [".", "bafw_", "R11", "P11", "N11", "M11", "L11", "K11", "J11", "H11", "G11", "F11", "E11", "D11", "C11", "B11", "A11", "bafe_", "."],
    [".", "bafsw", "bfcsw", "P12", "N12", "M12", "L12", "K12", "J12", "H12", "G12", "F12", "E12", "D12", "C12", "B12", "bfcse", "bafse", "."],
    [".", ".", "bafw_", "P13", "N13", "M13", "L13", "K13", "J13", "H13", "G13", "F13", "E13", "D13", "C13", "B13", "bafe_", ".", "."],
    [".", ".", "bafsw", "bfcsw", "N14", "M14", "L14", "K14", "J14", "H14", "G14", "F14", "E14", "D14", "C14", "bfcse", "bafse", ".", "."],
    [".", ".", ".", "bafsw", "bafs_", "bfcsw", "L15", "K15", "J15", "H15", "G15", "F15", "E15", "bfcse", "bafs_", "bafse", ".", ".", "."],
    [".", ".", ".", ".", ".", "bafsw", "bafs_", "bafs_", "bafs_", "bafs_", "bafs_", "bafs_", "bafs_", "bafse", ".", ".", ".", ".", "."],
    [".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", "."],
];

pub fn loading_for(position: &str) -> Option<&'static AssemblyLoading> {
    CORE_LOADING.iter().find(|slot| slot.position == position)
}
