use serde::Serialize;
use std::fmt;

/// Abstract primitive kind of a flattened field.
///
/// Each variant corresponds to one fixed-width encode/decode primitive; the
/// string form (`as_str`) is what gets written into the output map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    Unsigned,
    Long,
    ULong,
    Int64,
    Uint64,
    Float,
    Double,
    LongDouble,
    /// Single-byte boolean storage (`bool` / `_Bool`).
    Byte,
}

/// Canonical DWARF base-type spellings and the kind each maps to.
///
/// Compilers spell the same primitive several ways ("unsigned int",
/// "unsigned", "long unsigned int", ...), so the table carries every spelling
/// observed in practice. Matching is exact and case-sensitive; an unknown
/// spelling must surface as an error upstream, because guessing a width would
/// corrupt every offset-dependent consumer of the map.
const BASE_TYPE_MAP: &[(&str, PrimitiveKind)] = &[
    ("unsigned", PrimitiveKind::Unsigned),
    ("signed int", PrimitiveKind::Int),
    ("unsigned int", PrimitiveKind::Unsigned),
    ("int", PrimitiveKind::Int),
    ("short unsigned int", PrimitiveKind::UShort),
    ("signed short", PrimitiveKind::Short),
    ("unsigned short", PrimitiveKind::UShort),
    ("short int", PrimitiveKind::Short),
    ("char", PrimitiveKind::Char),
    ("signed char", PrimitiveKind::Char),
    ("unsigned char", PrimitiveKind::UChar),
    ("signed long", PrimitiveKind::Long),
    ("long int", PrimitiveKind::Long),
    ("unsigned long", PrimitiveKind::ULong),
    ("long unsigned int", PrimitiveKind::ULong),
    ("bool", PrimitiveKind::Byte),
    ("_Bool", PrimitiveKind::Byte),
    ("long long unsigned int", PrimitiveKind::Uint64),
    ("long long int", PrimitiveKind::Int64),
    ("signed long long", PrimitiveKind::Int64),
    ("unsigned long long", PrimitiveKind::Uint64),
    ("double", PrimitiveKind::Double),
    ("double double", PrimitiveKind::LongDouble),
    ("single float", PrimitiveKind::Float),
    ("float", PrimitiveKind::Float),
    ("long double", PrimitiveKind::LongDouble),
];

impl PrimitiveKind {
    /// Map a canonical DWARF base-type name to its primitive kind.
    /// Returns `None` for unknown spellings; never defaults.
    pub fn from_base_name(name: &str) -> Option<Self> {
        BASE_TYPE_MAP.iter().find(|(spelling, _)| *spelling == name).map(|&(_, kind)| kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Char => "char",
            PrimitiveKind::UChar => "uchar",
            PrimitiveKind::Short => "short",
            PrimitiveKind::UShort => "ushort",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Unsigned => "unsigned",
            PrimitiveKind::Long => "long",
            PrimitiveKind::ULong => "ulong",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::LongDouble => "longdouble",
            PrimitiveKind::Byte => "byte",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_spellings() {
        assert_eq!(PrimitiveKind::from_base_name("int"), Some(PrimitiveKind::Int));
        assert_eq!(PrimitiveKind::from_base_name("long unsigned int"), Some(PrimitiveKind::ULong));
        assert_eq!(PrimitiveKind::from_base_name("short unsigned int"), Some(PrimitiveKind::UShort));
        assert_eq!(PrimitiveKind::from_base_name("_Bool"), Some(PrimitiveKind::Byte));
        assert_eq!(PrimitiveKind::from_base_name("single float"), Some(PrimitiveKind::Float));
        assert_eq!(
            PrimitiveKind::from_base_name("long long unsigned int"),
            Some(PrimitiveKind::Uint64)
        );
    }

    #[test]
    fn alternate_spellings_collapse_to_one_kind() {
        for spelling in ["unsigned", "unsigned int"] {
            assert_eq!(PrimitiveKind::from_base_name(spelling), Some(PrimitiveKind::Unsigned));
        }
        for spelling in ["signed long", "long int"] {
            assert_eq!(PrimitiveKind::from_base_name(spelling), Some(PrimitiveKind::Long));
        }
    }

    #[test]
    fn unknown_spellings_are_rejected() {
        assert_eq!(PrimitiveKind::from_base_name("int128"), None);
        assert_eq!(PrimitiveKind::from_base_name("__int128"), None);
        assert_eq!(PrimitiveKind::from_base_name(""), None);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(PrimitiveKind::from_base_name("Int"), None);
        assert_eq!(PrimitiveKind::from_base_name("_bool"), None);
    }

    #[test]
    fn kind_strings_are_lowercase_prefixes() {
        assert_eq!(PrimitiveKind::UShort.as_str(), "ushort");
        assert_eq!(PrimitiveKind::LongDouble.as_str(), "longdouble");
        assert_eq!(PrimitiveKind::Uint64.to_string(), "uint64");
    }
}
