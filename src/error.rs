use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse binary: {0}")]
    ObjectParse(#[from] object::read::Error),

    #[error("No debug information found. Compile with -g to include DWARF debug info.")]
    NoDebugInfo,

    #[error("Unsupported binary format. Only ELF, Mach-O and PE binaries are supported.")]
    UnsupportedFormat,

    #[error("DWARF parsing error: {0}")]
    Dwarf(String),

    #[error("base type `{name}` of member `{path}` has no known primitive mapping")]
    UnmappedBaseType { path: String, name: String },

    #[error("could not resolve the typedef chain of member `{path}`")]
    BrokenTypedefChain { path: String },

    #[error("member `{path}` is a multi-dimensional array, which cannot be flattened")]
    MultiDimensionalArray { path: String },

    #[error("member `{path}` has unsupported kind {kind}")]
    UnsupportedMemberKind { path: String, kind: String },

    #[error("no searched module defines a type named `{0}`")]
    NotFound(String),
}

impl Error {
    /// True for failures produced while walking a located aggregate, as
    /// opposed to failures locating or loading one. The search coordinator
    /// keeps the last of these for the final report.
    pub fn is_flatten_failure(&self) -> bool {
        matches!(
            self,
            Error::UnmappedBaseType { .. }
                | Error::BrokenTypedefChain { .. }
                | Error::MultiDimensionalArray { .. }
                | Error::UnsupportedMemberKind { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
