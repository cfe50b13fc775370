use crate::error::{Error, Result};
use crate::kinds::PrimitiveKind;
use crate::loader::DwarfSlice;
use crate::types::FieldEntry;
use gimli::{AttributeValue, DebuggingInformationEntry, Dwarf, Unit, UnitOffset};

use super::{die_name, read_u64_from_attr};

/// Typedef chains in valid debug info are short; anything past this is a
/// dangling or cyclic reference.
const MAX_TYPEDEF_HOPS: usize = 32;

/// Concrete members cannot contain their own aggregate by value, so nesting
/// this deep means the metadata is malformed.
const MAX_NESTING: usize = 64;

type Die<'abbrev, 'unit, 'a> = DebuggingInformationEntry<'abbrev, 'unit, DwarfSlice<'a>>;

/// Recursive flattening of one aggregate's member graph into an ordered list
/// of primitive fields.
///
/// The walk is depth-first in declaration order: a nested aggregate's fields
/// appear contiguously in place of the member that introduced them. Any
/// member that cannot be reduced to primitives aborts the whole walk; no
/// partial results are returned, since a consumer packing raw bytes from a
/// truncated layout would silently corrupt everything past the gap.
pub struct TypeWalker<'a, 'u> {
    dwarf: &'u Dwarf<DwarfSlice<'a>>,
    unit: &'u Unit<DwarfSlice<'a>>,
}

impl<'a, 'u> TypeWalker<'a, 'u> {
    pub fn new(dwarf: &'u Dwarf<DwarfSlice<'a>>, unit: &'u Unit<DwarfSlice<'a>>) -> Self {
        Self { dwarf, unit }
    }

    /// Flatten the aggregate whose definition starts at `aggregate`.
    /// An aggregate without members yields an empty list, not an error.
    pub fn flatten(&self, aggregate: UnitOffset) -> Result<Vec<FieldEntry>> {
        self.flatten_aggregate(aggregate, "", 0)
    }

    fn flatten_aggregate(
        &self,
        offset: UnitOffset,
        prefix: &str,
        depth: usize,
    ) -> Result<Vec<FieldEntry>> {
        if depth > MAX_NESTING {
            return Err(Error::Dwarf(format!(
                "aggregate nesting exceeds {} levels at `{}`",
                MAX_NESTING, prefix
            )));
        }

        let mut fields = Vec::new();
        let mut tree = self
            .unit
            .entries_tree(Some(offset))
            .map_err(|e| Error::Dwarf(format!("Failed to create entries tree: {}", e)))?;
        let root =
            tree.root().map_err(|e| Error::Dwarf(format!("Failed to get tree root: {}", e)))?;

        let mut children = root.children();
        while let Some(child) = children
            .next()
            .map_err(|e| Error::Dwarf(format!("Failed to iterate members: {}", e)))?
        {
            let entry = child.entry();
            if entry.tag() != gimli::DW_TAG_member {
                continue;
            }
            fields.extend(self.flatten_member(entry, prefix, depth)?);
        }

        Ok(fields)
    }

    fn flatten_member(
        &self,
        entry: &Die<'_, '_, 'a>,
        prefix: &str,
        depth: usize,
    ) -> Result<Vec<FieldEntry>> {
        let member_name = die_name(self.dwarf, self.unit, entry)?;
        let display_path =
            format!("{}{}", prefix, member_name.as_deref().unwrap_or("<anonymous>"));

        let Some(type_offset) = self.type_ref(entry)? else {
            return Err(Error::BrokenTypedefChain { path: display_path });
        };
        let terminal = self.resolve_terminal(type_offset, &display_path)?;
        let terminal_entry = self.entry(terminal)?;

        match terminal_entry.tag() {
            gimli::DW_TAG_base_type => {
                let path = self.named_path(prefix, member_name, &terminal_entry)?;
                let kind = self.base_kind(&terminal_entry, &path)?;
                Ok(vec![FieldEntry::new(path, kind)])
            }

            gimli::DW_TAG_array_type => {
                let path = self.named_path(prefix, member_name, &terminal_entry)?;
                self.flatten_array(&terminal_entry, &path)
            }

            gimli::DW_TAG_structure_type
            | gimli::DW_TAG_class_type
            | gimli::DW_TAG_union_type => {
                // An anonymous aggregate member injects its fields into the
                // parent's namespace, matching C lookup rules.
                let nested_prefix = match &member_name {
                    Some(name) => format!("{}{}.", prefix, name),
                    None => prefix.to_string(),
                };
                self.flatten_aggregate(terminal_entry.offset(), &nested_prefix, depth + 1)
            }

            tag => Err(Error::UnsupportedMemberKind { path: display_path, kind: tag.to_string() }),
        }
    }

    /// Expand a one-dimensional array of a base type into indexed entries.
    fn flatten_array(
        &self,
        array_entry: &Die<'_, '_, 'a>,
        path: &str,
    ) -> Result<Vec<FieldEntry>> {
        let dimensions = self.array_dimensions(array_entry.offset())?;
        if dimensions.len() != 1 {
            return Err(Error::MultiDimensionalArray { path: path.to_string() });
        }
        let Some(extent) = dimensions[0] else {
            return Err(Error::UnsupportedMemberKind {
                path: path.to_string(),
                kind: "flexible array member".to_string(),
            });
        };

        let Some(element_offset) = self.type_ref(array_entry)? else {
            return Err(Error::BrokenTypedefChain { path: path.to_string() });
        };
        let element_terminal = self.resolve_terminal(element_offset, path)?;
        let element_entry = self.entry(element_terminal)?;

        if element_entry.tag() != gimli::DW_TAG_base_type {
            return Err(Error::UnsupportedMemberKind {
                path: path.to_string(),
                kind: format!("array of {}", element_entry.tag()),
            });
        }

        let kind = self.base_kind(&element_entry, path)?;
        let mut fields = Vec::with_capacity(extent as usize);
        for index in 0..extent {
            fields.push(FieldEntry::new(format!("{}[{}]", path, index), kind));
        }
        Ok(fields)
    }

    /// Follow typedef edges (and transparent const/volatile qualifiers) until
    /// a terminal node is reached.
    fn resolve_terminal(&self, start: UnitOffset, path: &str) -> Result<UnitOffset> {
        let mut offset = start;

        for _ in 0..MAX_TYPEDEF_HOPS {
            let entry = self.entry(offset)?;
            match entry.tag() {
                gimli::DW_TAG_typedef
                | gimli::DW_TAG_const_type
                | gimli::DW_TAG_volatile_type => match self.type_ref(&entry)? {
                    Some(next) => offset = next,
                    None => {
                        return Err(Error::BrokenTypedefChain { path: path.to_string() });
                    }
                },
                _ => return Ok(offset),
            }
        }

        Err(Error::BrokenTypedefChain { path: path.to_string() })
    }

    fn base_kind(&self, entry: &Die<'_, '_, 'a>, path: &str) -> Result<PrimitiveKind> {
        let name = die_name(self.dwarf, self.unit, entry)?
            .unwrap_or_else(|| "<unnamed>".to_string());
        PrimitiveKind::from_base_name(&name)
            .ok_or_else(|| Error::UnmappedBaseType { path: path.to_string(), name })
    }

    /// Path of a member that must be named; anonymous members only make sense
    /// for spliced aggregates.
    fn named_path(
        &self,
        prefix: &str,
        member_name: Option<String>,
        terminal_entry: &Die<'_, '_, 'a>,
    ) -> Result<String> {
        match member_name {
            Some(name) => Ok(format!("{}{}", prefix, name)),
            None => Err(Error::UnsupportedMemberKind {
                path: format!("{}<anonymous>", prefix),
                kind: format!("anonymous {}", terminal_entry.tag()),
            }),
        }
    }

    /// Extents of each DW_TAG_subrange_type child, in order. A dimension
    /// without a count or upper bound yields None.
    fn array_dimensions(&self, array_offset: UnitOffset) -> Result<Vec<Option<u64>>> {
        let mut dimensions = Vec::new();
        let mut tree = self
            .unit
            .entries_tree(Some(array_offset))
            .map_err(|e| Error::Dwarf(format!("Failed to create entries tree: {}", e)))?;
        let root =
            tree.root().map_err(|e| Error::Dwarf(format!("Failed to get tree root: {}", e)))?;

        let mut children = root.children();
        while let Some(child) = children
            .next()
            .map_err(|e| Error::Dwarf(format!("Failed to iterate subranges: {}", e)))?
        {
            let entry = child.entry();
            if entry.tag() != gimli::DW_TAG_subrange_type {
                continue;
            }

            let count = read_u64_from_attr(entry.attr_value(gimli::DW_AT_count).ok().flatten())
                .or_else(|| {
                    // DW_AT_upper_bound is 0-indexed.
                    read_u64_from_attr(
                        entry.attr_value(gimli::DW_AT_upper_bound).ok().flatten(),
                    )
                    .map(|upper| upper + 1)
                });
            dimensions.push(count);
        }

        Ok(dimensions)
    }

    fn entry(&self, offset: UnitOffset) -> Result<Die<'u, 'u, 'a>> {
        self.unit
            .entry(offset)
            .map_err(|e| Error::Dwarf(format!("Failed to get type entry: {}", e)))
    }

    fn type_ref(&self, entry: &Die<'_, '_, 'a>) -> Result<Option<UnitOffset>> {
        match entry.attr_value(gimli::DW_AT_type) {
            Ok(Some(AttributeValue::UnitRef(offset))) => Ok(Some(offset)),
            Ok(Some(AttributeValue::DebugInfoRef(debug_info_offset))) => {
                // Convert section offset to unit offset.
                if let Some(unit_debug_offset) = self.unit.header.offset().as_debug_info_offset() {
                    let unit_offset =
                        UnitOffset(debug_info_offset.0.saturating_sub(unit_debug_offset.0));
                    Ok(Some(unit_offset))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }
}
