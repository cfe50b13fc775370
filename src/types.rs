use crate::kinds::PrimitiveKind;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// One flattened primitive field: a dotted path from the root aggregate plus
/// the primitive kind stored at that position.
#[derive(Debug, Clone, Serialize)]
pub struct FieldEntry {
    pub path: String,
    pub kind: PrimitiveKind,
}

/// A fully flattened aggregate, in depth-first declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct FlatStruct {
    pub name: String,
    /// The module whose debug info defined the type.
    pub module: PathBuf,
    /// Declared size in bytes, as recorded by the compiler (padding included).
    pub size: u64,
    pub fields: Vec<FieldEntry>,
}

/// Result of a size-only query.
#[derive(Debug, Clone, Serialize)]
pub struct TypeSize {
    pub name: String,
    pub module: PathBuf,
    pub size: u64,
}

impl FieldEntry {
    pub fn new(path: String, kind: PrimitiveKind) -> Self {
        Self { path, kind }
    }
}

impl FlatStruct {
    /// View the fields as an ordered path -> kind map, the shape consumed by
    /// the shell formatter. Paths are unique within one flatten result, so no
    /// insert can clobber an earlier entry.
    pub fn field_map(&self) -> IndexMap<String, &'static str> {
        self.fields.iter().map(|f| (f.path.clone(), f.kind.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlatStruct {
        FlatStruct {
            name: "Line".to_string(),
            module: PathBuf::from("/usr/lib/libgeom.so"),
            size: 16,
            fields: vec![
                FieldEntry::new("a.x".to_string(), PrimitiveKind::Int),
                FieldEntry::new("a.y".to_string(), PrimitiveKind::Int),
                FieldEntry::new("b.x".to_string(), PrimitiveKind::Int),
                FieldEntry::new("b.y".to_string(), PrimitiveKind::Int),
            ],
        }
    }

    #[test]
    fn field_map_preserves_traversal_order() {
        let flat = sample();
        let map = flat.field_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a.x", "a.y", "b.x", "b.y"]);
        assert_eq!(map["a.y"], "int");
    }

    #[test]
    fn serializes_kind_as_prefix_string() {
        let flat = sample();
        let json = serde_json::to_value(&flat).expect("serialize");
        assert_eq!(json["fields"][0]["kind"], "int");
        assert_eq!(json["size"], 16);
    }
}
