use crate::types::FlatStruct;
use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};

pub struct TableFormatter {
    no_color: bool,
}

impl TableFormatter {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    pub fn format(&self, flat: &FlatStruct) -> String {
        let mut output = String::new();

        let header = format!(
            "{} ({} bytes, {} field{}) from {}",
            flat.name,
            flat.size,
            flat.fields.len(),
            if flat.fields.len() == 1 { "" } else { "s" },
            flat.module.display()
        );

        if self.no_color {
            output.push_str(&header);
        } else {
            output.push_str(&header.bold().to_string());
        }
        output.push('\n');

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Field", "Type"]);

        for field in &flat.fields {
            table.add_row(vec![field.path.as_str(), field.kind.as_str()]);
        }

        output.push_str(&table.to_string());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::PrimitiveKind;
    use crate::types::FieldEntry;
    use std::path::PathBuf;

    #[test]
    fn table_lists_every_field_in_order() {
        let flat = FlatStruct {
            name: "Line".to_string(),
            module: PathBuf::from("libgeom.so"),
            size: 16,
            fields: vec![
                FieldEntry::new("a.x".to_string(), PrimitiveKind::Int),
                FieldEntry::new("a.y".to_string(), PrimitiveKind::Int),
                FieldEntry::new("b.x".to_string(), PrimitiveKind::Int),
            ],
        };

        let out = TableFormatter::new(true).format(&flat);
        assert!(out.contains("Line (16 bytes, 3 fields) from libgeom.so"));
        let ax = out.find("a.x").expect("a.x present");
        let ay = out.find("a.y").expect("a.y present");
        let bx = out.find("b.x").expect("b.x present");
        assert!(ax < ay && ay < bx);
    }

    #[test]
    fn empty_struct_still_renders_header() {
        let flat = FlatStruct {
            name: "Empty".to_string(),
            module: PathBuf::from("a.out"),
            size: 0,
            fields: Vec::new(),
        };

        let out = TableFormatter::new(true).format(&flat);
        assert!(out.contains("Empty (0 bytes, 0 fields) from a.out"));
    }
}
