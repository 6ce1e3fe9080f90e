use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Entity classes that draw identifiers from separate scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityClass {
    Material,
    Surface,
    Cell,
    Universe,
    Plot,
}

impl EntityClass {
    pub const ALL: [Self; 5] = [
        Self::Material,
        Self::Surface,
        Self::Cell,
        Self::Universe,
        Self::Plot,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Surface => "surface",
            Self::Cell => "cell",
            Self::Universe => "universe",
            Self::Plot => "plot",
        }
    }
}

impl Display for EntityClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(MaterialId);
entity_id!(SurfaceId);
entity_id!(CellId);
entity_id!(
    /// Universe identifier. Lattices share this scope with plain universes.
    UniverseId
);
entity_id!(PlotId);

impl UniverseId {
    /// The outermost universe. Never handed out by the allocator.
    pub const ROOT: Self = Self(0);

    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}
