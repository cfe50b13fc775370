use crate::error::{Error, Result};
use crate::loader::DwarfSlice;
use crate::types::FieldEntry;
use gimli::{AttributeValue, Dwarf, Unit, UnitOffset};

use super::{TypeWalker, die_name, read_u64_from_attr};

/// Query interface over one module's debug info.
pub struct DwarfContext<'a> {
    dwarf: &'a Dwarf<DwarfSlice<'a>>,
}

/// Handle to a located aggregate definition: the owning compilation unit, the
/// DIE offset of the definition, and its declared size. Valid for as long as
/// the module's debug info stays loaded.
pub struct AggregateRef<'a> {
    unit: Unit<DwarfSlice<'a>>,
    offset: UnitOffset,
    name: String,
    byte_size: u64,
}

impl<'a> AggregateRef<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total size in bytes as declared by the compiler, padding and alignment
    /// included. Not recomputed from members.
    pub fn declared_size(&self) -> u64 {
        self.byte_size
    }
}

impl<'a> DwarfContext<'a> {
    pub fn new(dwarf: &'a Dwarf<DwarfSlice<'a>>) -> Self {
        Self { dwarf }
    }

    /// Locate the first aggregate (struct, class or union) named `type_name`.
    ///
    /// Units are scanned in order and the first complete definition wins;
    /// forward declarations and aggregates without a declared size are
    /// skipped. Absence is `Ok(None)`, the expected outcome while searching
    /// across modules.
    pub fn find_aggregate(&self, type_name: &str) -> Result<Option<AggregateRef<'a>>> {
        let mut units = self.dwarf.units();

        while let Some(header) =
            units.next().map_err(|e| Error::Dwarf(format!("Failed to read unit header: {}", e)))?
        {
            let unit = self
                .dwarf
                .unit(header)
                .map_err(|e| Error::Dwarf(format!("Failed to parse unit: {}", e)))?;

            if let Some((offset, byte_size)) = self.find_in_unit(&unit, type_name)? {
                return Ok(Some(AggregateRef {
                    unit,
                    offset,
                    name: type_name.to_string(),
                    byte_size,
                }));
            }
        }

        Ok(None)
    }

    fn find_in_unit(
        &self,
        unit: &Unit<DwarfSlice<'a>>,
        type_name: &str,
    ) -> Result<Option<(UnitOffset, u64)>> {
        let mut entries = unit.entries();

        while let Some((_, entry)) =
            entries.next_dfs().map_err(|e| Error::Dwarf(format!("Failed to read DIE: {}", e)))?
        {
            if !matches!(
                entry.tag(),
                gimli::DW_TAG_structure_type
                    | gimli::DW_TAG_class_type
                    | gimli::DW_TAG_union_type
            ) {
                continue;
            }

            // Forward declarations carry no layout.
            if matches!(
                entry.attr_value(gimli::DW_AT_declaration),
                Ok(Some(AttributeValue::Flag(true)))
            ) {
                continue;
            }

            match die_name(self.dwarf, unit, entry)? {
                Some(name) if name == type_name => {}
                _ => continue,
            }

            let Some(byte_size) =
                read_u64_from_attr(entry.attr_value(gimli::DW_AT_byte_size).ok().flatten())
            else {
                continue;
            };

            return Ok(Some((entry.offset(), byte_size)));
        }

        Ok(None)
    }

    /// Flatten a located aggregate into its ordered primitive fields.
    pub fn flatten(&self, aggregate: &AggregateRef<'a>) -> Result<Vec<FieldEntry>> {
        let walker = TypeWalker::new(self.dwarf, &aggregate.unit);
        walker.flatten(aggregate.offset)
    }
}
