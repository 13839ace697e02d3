use std::path::Path;

use colored::Colorize;
use loom_core::{DirectoryResolver, SCHEMA_URI_PREFIX, SchemaResolver};

pub fn run(module: &Path, schema_name: &str, document: &Path) -> Result<(), String> {
    let resolver = DirectoryResolver::new(module.join("schemas"));
    let schema = resolver
        .resolve(&format!("{SCHEMA_URI_PREFIX}{schema_name}"))
        .map_err(|e| e.to_string())?;

    let text = std::fs::read_to_string(document)
        .map_err(|e| format!("failed to read '{}': {e}", document.display()))?;
    let doc: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| format!("'{}' is not valid JSON: {e}", document.display()))?;

    match loom_core::validate(&doc, &schema, &resolver) {
        Ok(()) => {
            println!(
                "  {} '{}' is valid against {schema_name}",
                "ok".green().bold(),
                document.display()
            );
            Ok(())
        }
        Err(e) => match e.validation() {
            Some(violation) => Err(format!("'{}': {}", document.display(), violation.message)),
            None => Err(e.to_string()),
        },
    }
}
