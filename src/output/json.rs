use crate::types::{FlatStruct, TypeSize};
use serde::Serialize;

#[derive(Serialize)]
struct Output<'a, T: Serialize> {
    version: &'static str,
    #[serde(rename = "struct")]
    payload: &'a T,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format(&self, flat: &FlatStruct) -> String {
        self.render(flat)
    }

    pub fn format_size(&self, size: &TypeSize) -> String {
        self.render(size)
    }

    fn render<T: Serialize>(&self, payload: &T) -> String {
        let output = Output { version: env!("CARGO_PKG_VERSION"), payload };

        if self.pretty {
            serde_json::to_string_pretty(&output)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(&output).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::PrimitiveKind;
    use crate::types::FieldEntry;
    use std::path::PathBuf;

    fn flat() -> FlatStruct {
        FlatStruct {
            name: "Point".to_string(),
            module: PathBuf::from("/usr/lib/libgeom.so"),
            size: 8,
            fields: vec![
                FieldEntry::new("x".to_string(), PrimitiveKind::Int),
                FieldEntry::new("y".to_string(), PrimitiveKind::Int),
            ],
        }
    }

    #[test]
    fn json_formatter_pretty() {
        let formatter = JsonFormatter::new(true);
        let out = formatter.format(&flat());
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(parsed["struct"]["name"], "Point");
        assert_eq!(parsed["struct"]["fields"][1]["path"], "y");
    }

    #[test]
    fn json_formatter_compact() {
        let formatter = JsonFormatter::new(false);
        let out = formatter.format(&flat());
        assert!(out.contains("\"version\""));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn json_formatter_size() {
        let formatter = JsonFormatter::new(false);
        let size =
            TypeSize { name: "Point".to_string(), module: PathBuf::from("a.so"), size: 148 };
        let parsed: serde_json::Value =
            serde_json::from_str(&formatter.format_size(&size)).expect("valid JSON");
        assert_eq!(parsed["struct"]["size"], 148);
    }
}
