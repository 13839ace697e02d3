use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, ValidationError};

/// URI prefix under which content-module schemas are addressed.
///
/// `loom:schemas/scene_schema.json` names the file `scene_schema.json` in the
/// module's `schemas/` directory.
pub const SCHEMA_URI_PREFIX: &str = "loom:schemas/";

/// Maps a schema URI to a schema document.
pub trait SchemaResolver {
    /// Fetch the schema identified by `uri`.
    ///
    /// Fails with [`CoreError::SchemaNotFound`] when the URI is not recognized
    /// or names nothing.
    fn resolve(&self, uri: &str) -> CoreResult<Value>;
}

/// Resolves `loom:schemas/<file>` URIs against a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    dir: PathBuf,
}

impl DirectoryResolver {
    /// Create a resolver reading schema files from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SchemaResolver for DirectoryResolver {
    fn resolve(&self, uri: &str) -> CoreResult<Value> {
        let not_found = || CoreError::SchemaNotFound(uri.to_string());

        let name = uri.strip_prefix(SCHEMA_URI_PREFIX).ok_or_else(not_found)?;
        // Only plain file names inside the schema directory are addressable.
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(not_found());
        }

        let text = std::fs::read_to_string(self.dir.join(name)).map_err(|_| not_found())?;
        serde_json::from_str(&text).map_err(|e| CoreError::InvalidSchema {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Resolves URIs from an in-memory table. Handy for fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    schemas: HashMap<String, Value>,
}

impl MemoryResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `schema` under `uri`.
    pub fn with_schema(mut self, uri: impl Into<String>, schema: Value) -> Self {
        self.schemas.insert(uri.into(), schema);
        self
    }
}

impl SchemaResolver for MemoryResolver {
    fn resolve(&self, uri: &str) -> CoreResult<Value> {
        self.schemas
            .get(uri)
            .cloned()
            .ok_or_else(|| CoreError::SchemaNotFound(uri.to_string()))
    }
}

/// The structured object types the engine knows schemas for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// A location node.
    Scene,
    /// Quest summary, goals, and obstacles.
    Story,
    /// The whole game state.
    GameState,
}

impl ObjectType {
    /// Every known object type.
    pub const ALL: [ObjectType; 3] = [Self::Scene, Self::Story, Self::GameState];

    /// The snake_case name used in configuration and schema file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Story => "story",
            Self::GameState => "game_state",
        }
    }

    /// URI of this type's schema.
    pub fn schema_uri(&self) -> String {
        format!("{SCHEMA_URI_PREFIX}{}_schema.json", self.name())
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| CoreError::UnknownObjectType(s.to_string()))
    }
}

/// Schema access for the known object types, backed by a resolver.
pub struct Schemas {
    resolver: Box<dyn SchemaResolver>,
}

impl Schemas {
    /// Wrap a resolver.
    pub fn new(resolver: impl SchemaResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }

    /// Schemas read from a directory of `*_schema.json` files.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirectoryResolver::new(dir))
    }

    /// The underlying resolver.
    pub fn resolver(&self) -> &dyn SchemaResolver {
        self.resolver.as_ref()
    }

    /// Fetch the schema document for `object_type`.
    pub fn schema(&self, object_type: ObjectType) -> CoreResult<Value> {
        self.resolver.resolve(&object_type.schema_uri())
    }

    /// Validate `document` against the schema for `object_type`.
    pub fn validate(&self, document: &Value, object_type: ObjectType) -> CoreResult<()> {
        let schema = self.schema(object_type)?;
        validate(document, &schema, self.resolver())
    }
}

impl fmt::Debug for Schemas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schemas").finish_non_exhaustive()
    }
}

/// Validate `document` against `schema`, resolving external `$ref`s with
/// `resolver`.
///
/// Supports the JSON-Schema keywords used by content modules: `type`, `enum`,
/// `const`, `required`, `properties`, `additionalProperties`, `items`,
/// `minItems`/`maxItems`, `minLength`/`maxLength`, `minimum`/`maximum`,
/// `allOf`/`anyOf`/`oneOf`, and `$ref` (local `#/...` pointers and resolver
/// URIs with optional fragments). Unknown keywords are ignored.
///
/// Returns the first violation found.
pub fn validate(document: &Value, schema: &Value, resolver: &dyn SchemaResolver) -> CoreResult<()> {
    let base = schema.get("$id").and_then(Value::as_str).unwrap_or_default();
    Checker {
        resolver,
        bases: vec![base.to_string()],
        active: Vec::new(),
    }
    .check(document, schema, schema, &JsonPath::root())
}

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Path from the document root to the value being checked.
#[derive(Debug, Clone, Default)]
struct JsonPath(Vec<Segment>);

impl JsonPath {
    fn root() -> Self {
        Self::default()
    }

    fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.to_string()));
        Self(segments)
    }

    fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

fn violation(path: &JsonPath, message: String) -> CoreError {
    CoreError::Validation(ValidationError::new(path.to_string(), message))
}

struct Checker<'r> {
    resolver: &'r dyn SchemaResolver,
    /// URIs of the schema documents being walked, innermost last.
    bases: Vec<String>,
    /// `$ref` targets being followed, with the instance path they apply to.
    active: Vec<(String, String)>,
}

impl Checker<'_> {
    fn check(&mut self, instance: &Value, schema: &Value, root: &Value, path: &JsonPath) -> CoreResult<()> {
        let schema = match schema {
            Value::Bool(true) => return Ok(()),
            Value::Bool(false) => return Err(violation(path, format!("{path} is not allowed"))),
            Value::Object(map) => map,
            _ => return Ok(()),
        };

        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            self.check_ref(instance, reference, root, path)?;
        }

        if let Some(expected) = schema.get("type") {
            check_type(instance, expected, path)?;
        }

        if let Some(Value::Array(options)) = schema.get("enum") {
            if !options.contains(instance) {
                let allowed: Vec<String> = options.iter().map(Value::to_string).collect();
                return Err(violation(
                    path,
                    format!("{path} should be one of [{}]", allowed.join(", ")),
                ));
            }
        }

        if let Some(expected) = schema.get("const") {
            if instance != expected {
                return Err(violation(path, format!("{path} should be {expected}")));
            }
        }

        match instance {
            Value::Object(object) => self.check_object(object, schema, root, path)?,
            Value::Array(items) => self.check_array(items, schema, root, path)?,
            Value::String(text) => check_string(text, schema, path)?,
            Value::Number(_) => check_number(instance, schema, path)?,
            _ => {}
        }

        self.check_combinators(instance, schema, root, path)
    }

    fn check_ref(&mut self, instance: &Value, reference: &str, root: &Value, path: &JsonPath) -> CoreResult<()> {
        let (base, fragment) = reference.split_once('#').unwrap_or((reference, ""));

        // Following the same target again for the same value can never end.
        let document_uri = match base {
            "" => self.bases.last().cloned().unwrap_or_default(),
            uri => uri.to_string(),
        };
        let key = (format!("{document_uri}#{fragment}"), path.to_string());
        if self.active.contains(&key) {
            return Err(CoreError::InvalidSchema {
                uri: key.0,
                reason: format!("$ref cycle while checking {path}"),
            });
        }

        self.active.push(key);
        let result = if base.is_empty() {
            pointer(root, fragment, reference).and_then(|target| self.check(instance, target, root, path))
        } else {
            self.check_external(instance, base, fragment, reference, path)
        };
        self.active.pop();
        result
    }

    fn check_external(
        &mut self,
        instance: &Value,
        base: &str,
        fragment: &str,
        reference: &str,
        path: &JsonPath,
    ) -> CoreResult<()> {
        let document = self.resolver.resolve(base)?;
        let target = pointer(&document, fragment, reference)?;

        self.bases.push(base.to_string());
        let result = self.check(instance, target, &document, path);
        self.bases.pop();
        result
    }

    fn check_object(
        &mut self,
        object: &Map<String, Value>,
        schema: &Map<String, Value>,
        root: &Value,
        path: &JsonPath,
    ) -> CoreResult<()> {
        if let Some(Value::Array(required)) = schema.get("required") {
            for name in required.iter().filter_map(Value::as_str) {
                if !object.contains_key(name) {
                    let missing = path.key(name);
                    return Err(violation(&missing, format!("{missing} is a required property")));
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        let additional = schema.get("additionalProperties");

        for (key, value) in object {
            let child = path.key(key);
            match (properties.and_then(|p| p.get(key)), additional) {
                (Some(property), _) => self.check(value, property, root, &child)?,
                (None, Some(Value::Bool(false))) => {
                    return Err(violation(&child, format!("{child} is not an allowed property")));
                }
                (None, Some(extra)) => self.check(value, extra, root, &child)?,
                (None, None) => {}
            }
        }

        Ok(())
    }

    fn check_array(
        &mut self,
        items: &[Value],
        schema: &Map<String, Value>,
        root: &Value,
        path: &JsonPath,
    ) -> CoreResult<()> {
        if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                return Err(violation(path, format!("{path} should have at least {min} items")));
            }
        }
        if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
            if (items.len() as u64) > max {
                return Err(violation(path, format!("{path} should have at most {max} items")));
            }
        }

        if let Some(item_schema) = schema.get("items") {
            for (i, item) in items.iter().enumerate() {
                self.check(item, item_schema, root, &path.index(i))?;
            }
        }

        Ok(())
    }

    fn check_combinators(
        &mut self,
        instance: &Value,
        schema: &Map<String, Value>,
        root: &Value,
        path: &JsonPath,
    ) -> CoreResult<()> {
        if let Some(Value::Array(all)) = schema.get("allOf") {
            for sub in all {
                self.check(instance, sub, root, path)?;
            }
        }

        if let Some(Value::Array(any)) = schema.get("anyOf") {
            if self.count_matches(instance, any, root, path)? == 0 {
                return Err(violation(
                    path,
                    format!("{path} does not match any of the allowed schemas"),
                ));
            }
        }

        if let Some(Value::Array(one)) = schema.get("oneOf") {
            let matches = self.count_matches(instance, one, root, path)?;
            if matches != 1 {
                return Err(violation(
                    path,
                    format!("{path} should match exactly one schema but matched {matches}"),
                ));
            }
        }

        Ok(())
    }

    /// Count the schemas `instance` satisfies. Resolution failures propagate.
    fn count_matches(&mut self, instance: &Value, schemas: &[Value], root: &Value, path: &JsonPath) -> CoreResult<usize> {
        let mut matches = 0;
        for sub in schemas {
            match self.check(instance, sub, root, path) {
                Ok(()) => matches += 1,
                Err(CoreError::Validation(_)) => {}
                Err(other) => return Err(other),
            }
        }
        Ok(matches)
    }
}

fn pointer<'a>(document: &'a Value, fragment: &str, reference: &str) -> CoreResult<&'a Value> {
    if fragment.is_empty() {
        return Ok(document);
    }
    document
        .pointer(fragment)
        .ok_or_else(|| CoreError::SchemaNotFound(reference.to_string()))
}

fn type_matches(instance: &Value, name: &str) -> bool {
    match name {
        "null" => instance.is_null(),
        "boolean" => instance.is_boolean(),
        "string" => instance.is_string(),
        "array" => instance.is_array(),
        "object" => instance.is_object(),
        "number" => instance.is_number(),
        "integer" => match instance {
            Value::Number(n) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            _ => false,
        },
        _ => true,
    }
}

fn check_type(instance: &Value, expected: &Value, path: &JsonPath) -> CoreResult<()> {
    let names: Vec<&str> = match expected {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect(),
        _ => return Ok(()),
    };

    if names.iter().any(|name| type_matches(instance, name)) {
        Ok(())
    } else {
        Err(violation(
            path,
            format!("{path} should be of type {}", names.join(" or ")),
        ))
    }
}

fn check_string(text: &str, schema: &Map<String, Value>, path: &JsonPath) -> CoreResult<()> {
    let length = text.chars().count() as u64;
    if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
        if length < min {
            return Err(violation(
                path,
                format!("{path} should be at least {min} characters long"),
            ));
        }
    }
    if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
        if length > max {
            return Err(violation(
                path,
                format!("{path} should be at most {max} characters long"),
            ));
        }
    }
    Ok(())
}

fn check_number(instance: &Value, schema: &Map<String, Value>, path: &JsonPath) -> CoreResult<()> {
    let Some(value) = instance.as_f64() else {
        return Ok(());
    };

    if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
        if value < min {
            return Err(violation(path, format!("{path} should be >= {min}")));
        }
    }
    if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
        if value > max {
            return Err(violation(path, format!("{path} should be <= {max}")));
        }
    }
    if let Some(min) = schema.get("exclusiveMinimum").and_then(Value::as_f64) {
        if value <= min {
            return Err(violation(path, format!("{path} should be > {min}")));
        }
    }
    if let Some(max) = schema.get("exclusiveMaximum").and_then(Value::as_f64) {
        if value >= max {
            return Err(violation(path, format!("{path} should be < {max}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "player": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "level": { "type": "integer" },
                        "inventory": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["name"]
                },
                "location": { "type": "string" },
                "score": { "type": "integer" }
            },
            "required": ["player", "location", "score"]
        })
    }

    fn message(result: CoreResult<()>) -> String {
        match result {
            Err(CoreError::Validation(e)) => e.message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    fn content_schemas() -> Schemas {
        Schemas::from_dir(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../content/default/schemas"
        ))
    }

    #[test]
    fn self_referencing_schema_is_invalid() {
        let err = validate(&json!({}), &json!({"$ref": "#"}), &MemoryResolver::new()).unwrap_err();
        assert!(
            matches!(&err, CoreError::InvalidSchema { reason, .. } if reason.contains("cycle")),
            "{err:?}"
        );
    }

    #[test]
    fn cross_document_ref_cycle_is_invalid() {
        let resolver = MemoryResolver::new()
            .with_schema("loom:schemas/a.json", json!({"$ref": "loom:schemas/b.json"}))
            .with_schema("loom:schemas/b.json", json!({"allOf": [{"$ref": "loom:schemas/a.json"}]}));
        let err = validate(&json!(1), &json!({"$ref": "loom:schemas/a.json"}), &resolver).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSchema { .. }), "{err:?}");
    }

    #[test]
    fn recursive_schema_follows_nested_values() {
        let tree = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "children": { "type": "array", "items": { "$ref": "#" } }
            },
            "required": ["name"]
        });
        let doc = json!({"name": "root", "children": [{"name": "leaf", "children": []}]});
        assert!(validate(&doc, &tree, &MemoryResolver::new()).is_ok());

        let bad = json!({"name": "root", "children": [{"children": []}]});
        assert_eq!(
            message(validate(&bad, &tree, &MemoryResolver::new())),
            "children[0].name is a required property"
        );
    }

    #[test]
    fn valid_document_passes() {
        let doc = json!({
            "player": { "name": "John", "level": 5, "inventory": ["sword", "shield"] },
            "location": "castle",
            "score": 1000
        });
        assert!(validate(&doc, &player_schema(), &MemoryResolver::new()).is_ok());
    }

    #[test]
    fn wrong_type_names_path_and_constraint() {
        let doc = json!({
            "player": { "name": "John" },
            "location": "castle",
            "score": "1000"
        });
        let msg = message(validate(&doc, &player_schema(), &MemoryResolver::new()));
        assert_eq!(msg, "score should be of type integer");
    }

    #[test]
    fn nested_paths_include_indices() {
        let doc = json!({
            "player": { "name": "John", "inventory": ["sword", 3] },
            "location": "castle",
            "score": 1
        });
        let msg = message(validate(&doc, &player_schema(), &MemoryResolver::new()));
        assert_eq!(msg, "player.inventory[1] should be of type string");
    }

    #[test]
    fn missing_required_property() {
        let doc = json!({ "player": {}, "location": "castle", "score": 1 });
        let err = validate(&doc, &player_schema(), &MemoryResolver::new()).unwrap_err();
        let validation = err.validation().unwrap();
        assert_eq!(validation.path, "player.name");
        assert_eq!(validation.message, "player.name is a required property");
    }

    #[test]
    fn integer_accepts_whole_floats_only() {
        let schema = json!({ "type": "integer" });
        let resolver = MemoryResolver::new();
        assert!(validate(&json!(3), &schema, &resolver).is_ok());
        assert!(validate(&json!(3.0), &schema, &resolver).is_ok());
        assert!(validate(&json!(3.5), &schema, &resolver).is_err());
    }

    #[test]
    fn union_types() {
        let schema = json!({ "type": ["string", "null"] });
        let resolver = MemoryResolver::new();
        assert!(validate(&json!(null), &schema, &resolver).is_ok());
        assert_eq!(
            message(validate(&json!(1), &schema, &resolver)),
            "(root) should be of type string or null"
        );
    }

    #[test]
    fn additional_properties_false() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "integer" } },
            "additionalProperties": false
        });
        let msg = message(validate(&json!({ "a": 1, "b": 2 }), &schema, &MemoryResolver::new()));
        assert_eq!(msg, "b is not an allowed property");
    }

    #[test]
    fn enum_and_bounds() {
        let resolver = MemoryResolver::new();
        let schema = json!({ "enum": ["north", "south"] });
        assert!(validate(&json!("north"), &schema, &resolver).is_ok());
        assert!(validate(&json!("east"), &schema, &resolver).is_err());

        let schema = json!({ "type": "integer", "minimum": 0 });
        assert_eq!(
            message(validate(&json!(-1), &schema, &resolver)),
            "(root) should be >= 0"
        );

        let schema = json!({ "type": "string", "minLength": 1 });
        assert!(validate(&json!(""), &schema, &resolver).is_err());

        let schema = json!({ "type": "array", "maxItems": 1 });
        assert!(validate(&json!([1, 2]), &schema, &resolver).is_err());
    }

    #[test]
    fn external_ref_is_resolved() {
        let resolver = MemoryResolver::new().with_schema(
            "loom:schemas/exit_schema.json",
            json!({ "type": "object", "required": ["id"] }),
        );
        let schema = json!({
            "type": "array",
            "items": { "$ref": "loom:schemas/exit_schema.json" }
        });

        assert!(validate(&json!([{ "id": "door" }]), &schema, &resolver).is_ok());
        assert_eq!(
            message(validate(&json!([{ "id": "door" }, {}]), &schema, &resolver)),
            "[1].id is a required property"
        );
    }

    #[test]
    fn local_ref_with_fragment() {
        let schema = json!({
            "$defs": { "name": { "type": "string" } },
            "properties": { "name": { "$ref": "#/$defs/name" } }
        });
        let resolver = MemoryResolver::new();
        assert!(validate(&json!({ "name": "x" }), &schema, &resolver).is_ok());
        assert!(validate(&json!({ "name": 1 }), &schema, &resolver).is_err());
    }

    #[test]
    fn unresolvable_ref_is_schema_not_found() {
        let schema = json!({ "$ref": "loom:schemas/missing.json" });
        let err = validate(&json!({}), &schema, &MemoryResolver::new()).unwrap_err();
        assert!(matches!(err, CoreError::SchemaNotFound(uri) if uri == "loom:schemas/missing.json"));
    }

    #[test]
    fn any_of_and_one_of() {
        let resolver = MemoryResolver::new();
        let schema = json!({ "anyOf": [{ "type": "string" }, { "type": "integer" }] });
        assert!(validate(&json!(1), &schema, &resolver).is_ok());
        assert!(validate(&json!(true), &schema, &resolver).is_err());

        let schema = json!({ "oneOf": [{ "type": "number" }, { "type": "integer" }] });
        assert!(validate(&json!(1.5), &schema, &resolver).is_ok());
        assert!(validate(&json!(1), &schema, &resolver).is_err());
    }

    #[test]
    fn directory_resolver_rejects_foreign_uris() {
        let resolver = DirectoryResolver::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../content/default/schemas"
        ));
        assert!(resolver.resolve("loom:schemas/scene_schema.json").is_ok());
        for uri in [
            "https://example.com/scene_schema.json",
            "loom:schemas/../Cargo.toml",
            "loom:schemas/",
            "loom:schemas/nope.json",
        ] {
            assert!(
                matches!(resolver.resolve(uri), Err(CoreError::SchemaNotFound(_))),
                "{uri} should not resolve"
            );
        }
    }

    #[test]
    fn object_type_names_round_trip() {
        for object_type in ObjectType::ALL {
            assert_eq!(object_type.name().parse::<ObjectType>().unwrap(), object_type);
        }
        assert_eq!(
            ObjectType::Scene.schema_uri(),
            "loom:schemas/scene_schema.json"
        );
        assert!("dragon".parse::<ObjectType>().is_err());
    }

    #[test]
    fn content_scene_schema_requires_exit_ids() {
        let schemas = content_schemas();
        let scene = json!({
            "id": "hallway",
            "title": "Hallway",
            "description": "A long, dark hallway.",
            "exits": [{ "id": "door_1", "direction": "west", "description": "Door" }]
        });
        assert!(schemas.validate(&scene, ObjectType::Scene).is_ok());

        let broken = json!({ "id": "hallway", "exits": [{ "direction": "west" }] });
        let err = schemas.validate(&broken, ObjectType::Scene).unwrap_err();
        assert_eq!(err.validation().unwrap().path, "exits[0].id");

        let untitled = json!({ "title": "Hallway" });
        assert!(schemas.validate(&untitled, ObjectType::Scene).is_err());
    }
}
