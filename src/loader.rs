use crate::error::{Error, Result};
use gimli::{Dwarf, DwarfSections, EndianSlice, RunTimeEndian, SectionId};
use memmap2::Mmap;
use object::{Object, ObjectSection};
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

/// A memory-mapped binary module.
pub struct BinaryData {
    pub mmap: Mmap,
}

pub type DwarfSlice<'a> = EndianSlice<'a, RunTimeEndian>;

/// DWARF sections read out of one module. Sections borrow from the mmap where
/// possible; compressed sections are held as owned buffers.
pub struct LoadedDwarf<'a> {
    sections: DwarfSections<Cow<'a, [u8]>>,
    endian: RunTimeEndian,
}

impl BinaryData {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mmap lives as long as
        // BinaryData.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap })
    }

    pub fn load_dwarf(&self) -> Result<LoadedDwarf<'_>> {
        let object = object::File::parse(&*self.mmap)?;

        if !matches!(
            object.format(),
            object::BinaryFormat::Elf | object::BinaryFormat::MachO | object::BinaryFormat::Pe
        ) {
            return Err(Error::UnsupportedFormat);
        }

        let endian =
            if object.is_little_endian() { RunTimeEndian::Little } else { RunTimeEndian::Big };

        let load_section = |id: SectionId| -> std::result::Result<Cow<'_, [u8]>, gimli::Error> {
            let section = object
                .section_by_name(id.name())
                .or_else(|| object.section_by_name(&id.name().replace(".debug_", ".zdebug_")));
            match section {
                Some(section) => {
                    Ok(section.uncompressed_data().unwrap_or(Cow::Borrowed(&[][..])))
                }
                None => Ok(Cow::Borrowed(&[][..])),
            }
        };

        let sections =
            DwarfSections::load(load_section).map_err(|e| Error::Dwarf(e.to_string()))?;
        let loaded = LoadedDwarf { sections, endian };

        let dwarf = loaded.borrow();
        let mut units = dwarf.units();
        if units.next().map_err(|e| Error::Dwarf(e.to_string()))?.is_none() {
            return Err(Error::NoDebugInfo);
        }

        Ok(loaded)
    }
}

impl<'a> LoadedDwarf<'a> {
    /// Borrow the owned section data as a queryable `Dwarf`.
    pub fn borrow(&self) -> Dwarf<DwarfSlice<'_>> {
        self.sections.borrow(|section| EndianSlice::new(section, self.endian))
    }
}
