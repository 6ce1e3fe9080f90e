use super::ids::{EntityClass, UniverseId};
use std::path::PathBuf;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl BuildErrorCategory {
    pub const fn exit_placeholder(self) -> ExitPlaceholder {
        match self {
            Self::Success => ExitPlaceholder {
                exit_code: 0,
                rust_category: "Success",
            },
            Self::InputValidationError => ExitPlaceholder {
                exit_code: 2,
                rust_category: "InputValidationError",
            },
            Self::IoSystemError => ExitPlaceholder {
                exit_code: 3,
                rust_category: "IoSystemError",
            },
            Self::ComputationError => ExitPlaceholder {
                exit_code: 4,
                rust_category: "ComputationError",
            },
            Self::InternalError => ExitPlaceholder {
                exit_code: 5,
                rust_category: "InternalError",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.exit_placeholder().exit_code
    }

    pub const fn rust_category(self) -> &'static str {
        self.exit_placeholder().rust_category
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitPlaceholder {
    pub exit_code: i32,
    pub rust_category: &'static str,
}

/// Every failure the model builder can report. All of them abort the build.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("key '{key}' is already registered in the {registry} registry")]
    DuplicateKey { registry: &'static str, key: String },
    #[error("no unused {class} identifier left in [{lower}, {upper}]")]
    IdSpaceExhausted {
        class: EntityClass,
        lower: u32,
        upper: u32,
    },
    #[error("{builder} '{name}' expects {expected} {what}, got {actual}")]
    LengthMismatch {
        builder: &'static str,
        name: String,
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("control rod step {step} is outside [0, {max}]")]
    InvalidStep { step: i64, max: i64 },
    #[error("'{name}' is missing required field '{field}'")]
    MissingRequiredField { name: String, field: &'static str },
    #[error("{referrer} refers to universe {universe}, which no cell or lattice defines")]
    UndefinedUniverse {
        referrer: String,
        universe: UniverseId,
    },
    #[error("core map cell ({row}, {column}) holds unknown token '{token}'")]
    UnknownCoreToken {
        row: usize,
        column: usize,
        token: String,
    },
    #[error("failed to write '{}': {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub const fn category(&self) -> BuildErrorCategory {
        match self {
            Self::InvalidStep { .. } | Self::MissingRequiredField { .. } => {
                BuildErrorCategory::InputValidationError
            }
            Self::DuplicateKey { .. }
            | Self::LengthMismatch { .. }
            | Self::UndefinedUniverse { .. }
            | Self::UnknownCoreToken { .. } => BuildErrorCategory::InternalError,
            Self::IdSpaceExhausted { .. } => BuildErrorCategory::ComputationError,
            Self::Io { .. } => BuildErrorCategory::IoSystemError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "MODEL.DUPLICATE_KEY",
            Self::IdSpaceExhausted { .. } => "MODEL.ID_EXHAUSTED",
            Self::LengthMismatch { .. } => "MODEL.LENGTH_MISMATCH",
            Self::InvalidStep { .. } => "INPUT.INVALID_STEP",
            Self::MissingRequiredField { .. } => "INPUT.MISSING_FIELD",
            Self::UndefinedUniverse { .. } => "MODEL.UNDEFINED_UNIVERSE",
            Self::UnknownCoreToken { .. } => "MODEL.UNKNOWN_CORE_TOKEN",
            Self::Io { .. } => "IO.WRITE",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category()
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}
