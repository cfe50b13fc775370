use crate::types::FlatStruct;

/// Renders a flattened struct as a bash `declare -A` statement, the shape a
/// shell consumer can eval and index by field path.
pub struct ShellFormatter<'a> {
    binding: &'a str,
}

impl<'a> ShellFormatter<'a> {
    pub fn new(binding: &'a str) -> Self {
        Self { binding }
    }

    pub fn format(&self, flat: &FlatStruct) -> String {
        let mut output = String::new();
        output.push_str(&format!("declare -A {}=(", self.binding));

        for (path, kind) in flat.field_map() {
            output.push_str(&format!(" [\"{}\"]=\"{}\"", path, kind));
        }

        output.push_str(" )");
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
    fn renders_declare_statement_in_field_order() {
        let flat = FlatStruct {
            name: "Buf".to_string(),
            module: PathBuf::from("a.out"),
            size: 4,
            fields: vec![
                FieldEntry::new("data[0]".to_string(), PrimitiveKind::Char),
                FieldEntry::new("data[1]".to_string(), PrimitiveKind::Char),
            ],
        };

        let out = ShellFormatter::new("buf").format(&flat);
        assert_eq!(out, "declare -A buf=( [\"data[0]\"]=\"char\" [\"data[1]\"]=\"char\" )");
    }

    #[test]
    fn empty_struct_renders_empty_array() {
        let flat = FlatStruct {
            name: "Empty".to_string(),
            module: PathBuf::from("a.out"),
            size: 0,
            fields: Vec::new(),
        };

        let out = ShellFormatter::new("e").format(&flat);
        assert_eq!(out, "declare -A e=( )");
    }
}
