mod context;
mod walker;

pub use context::{AggregateRef, DwarfContext};
pub use walker::TypeWalker;

use crate::error::{Error, Result};
use crate::loader::DwarfSlice;
use gimli::{AttributeValue, DebuggingInformationEntry, Dwarf, Unit};

/// Extract a u64 value from a DWARF attribute, handling the various constant
/// encoding forms. Returns None for negative Sdata values (invalid for
/// sizes/extents).
pub(crate) fn read_u64_from_attr(attr: Option<AttributeValue<DwarfSlice<'_>>>) -> Option<u64> {
    match attr? {
        AttributeValue::Udata(v) => Some(v),
        AttributeValue::Data1(v) => Some(v as u64),
        AttributeValue::Data2(v) => Some(v as u64),
        AttributeValue::Data4(v) => Some(v as u64),
        AttributeValue::Data8(v) => Some(v),
        AttributeValue::Sdata(v) if v >= 0 => Some(v as u64),
        _ => None,
    }
}

/// Read the DW_AT_name of a DIE as an owned string.
pub(crate) fn die_name<'a>(
    dwarf: &Dwarf<DwarfSlice<'a>>,
    unit: &Unit<DwarfSlice<'a>>,
    entry: &DebuggingInformationEntry<'_, '_, DwarfSlice<'a>>,
) -> Result<Option<String>> {
    match entry.attr_value(gimli::DW_AT_name) {
        Ok(Some(attr)) => {
            let name = dwarf
                .attr_string(unit, attr)
                .map_err(|e| Error::Dwarf(format!("Failed to read name: {}", e)))?;
            Ok(Some(name.to_string_lossy().to_string()))
        }
        Ok(None) => Ok(None),
        Err(e) => Err(Error::Dwarf(format!("Failed to read name attribute: {}", e))),
    }
}
