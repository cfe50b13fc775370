use crate::dwarf::{AggregateRef, DwarfContext};
use crate::error::{Error, Result};
use crate::loader::BinaryData;
use crate::types::{FlatStruct, TypeSize};
use std::path::{Path, PathBuf};

/// Flatten `type_name` by searching `modules` in order.
///
/// Modules are opened one at a time and released before the next is tried, so
/// at most one debug-info source is live at any point. The first module whose
/// debug info yields a complete flattening wins; see [`search_modules`] for
/// how failures along the way are treated.
pub fn flatten_type(modules: &[PathBuf], type_name: &str, verbose: bool) -> Result<FlatStruct> {
    search_modules(modules, type_name, verbose, flatten_op)
}

/// Report the declared byte size of `type_name` without flattening members.
pub fn size_of_type(modules: &[PathBuf], type_name: &str, verbose: bool) -> Result<TypeSize> {
    search_modules(modules, type_name, verbose, size_op)
}

fn flatten_op<'d>(
    ctx: &DwarfContext<'d>,
    aggregate: &AggregateRef<'d>,
    module: &Path,
) -> Result<FlatStruct> {
    let fields = ctx.flatten(aggregate)?;
    Ok(FlatStruct {
        name: aggregate.name().to_string(),
        module: module.to_path_buf(),
        size: aggregate.declared_size(),
        fields,
    })
}

fn size_op<'d>(
    _ctx: &DwarfContext<'d>,
    aggregate: &AggregateRef<'d>,
    module: &Path,
) -> Result<TypeSize> {
    Ok(TypeSize {
        name: aggregate.name().to_string(),
        module: module.to_path_buf(),
        size: aggregate.declared_size(),
    })
}

/// Run `op` against the first module that defines `type_name`, in module
/// order.
///
/// A module that cannot be read or carries no usable debug info is a silent
/// non-match. A module that defines the type but fails the operation does not
/// end the search either: another module may carry a fully resolvable
/// definition under the same name. The last concrete failure is reported only
/// when every module has been exhausted; plain absence everywhere is
/// `NotFound`.
fn search_modules<T>(
    modules: &[PathBuf],
    type_name: &str,
    verbose: bool,
    op: for<'d> fn(&DwarfContext<'d>, &AggregateRef<'d>, &Path) -> Result<T>,
) -> Result<T> {
    let mut last_failure: Option<Error> = None;

    for module in modules {
        if verbose {
            eprintln!("structmap: searching module {}", module.display());
        }

        let binary = match BinaryData::load(module) {
            Ok(binary) => binary,
            Err(e) => {
                if verbose {
                    eprintln!("structmap: skipping {}: {}", module.display(), e);
                }
                continue;
            }
        };
        let loaded = match binary.load_dwarf() {
            Ok(loaded) => loaded,
            Err(e) => {
                if verbose {
                    eprintln!("structmap: skipping {}: {}", module.display(), e);
                }
                continue;
            }
        };

        let dwarf = loaded.borrow();
        let ctx = DwarfContext::new(&dwarf);

        let aggregate = match ctx.find_aggregate(type_name) {
            Ok(Some(aggregate)) => aggregate,
            Ok(None) => continue,
            Err(e) => {
                if verbose {
                    eprintln!("structmap: skipping {}: {}", module.display(), e);
                }
                continue;
            }
        };

        if verbose {
            eprintln!(
                "structmap: found `{}` in {} ({} bytes)",
                type_name,
                module.display(),
                aggregate.declared_size()
            );
        }

        match op(&ctx, &aggregate, module) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!(
                    "structmap: `{}` in {} could not be used: {}",
                    type_name,
                    module.display(),
                    e
                );
                last_failure = Some(e);
            }
        }
    }

    Err(last_failure.unwrap_or_else(|| Error::NotFound(type_name.to_string())))
}
