pub mod cli;
pub mod dwarf;
pub mod error;
pub mod kinds;
pub mod loader;
pub mod modules;
pub mod output;
pub mod search;
pub mod types;

pub use cli::{Cli, Commands, OutputFormat, SizeFormat};
pub use dwarf::{AggregateRef, DwarfContext};
pub use error::{Error, Result};
pub use kinds::PrimitiveKind;
pub use loader::{BinaryData, LoadedDwarf};
pub use modules::process_modules;
pub use output::{JsonFormatter, ShellFormatter, TableFormatter};
pub use search::{flatten_type, size_of_type};
pub use types::{FieldEntry, FlatStruct, TypeSize};
