use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Number, Value};

use crate::error::{CoreResult, ValidationError};
use crate::schema::{ObjectType, Schemas};

/// A way out of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hidden: Option<bool>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Exit {
    /// Create an exit leading `direction`.
    pub fn new(
        id: impl Into<String>,
        direction: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            direction: Some(direction.into()),
            description: Some(description.into()),
            locked: None,
            hidden: None,
            extra: Map::new(),
        }
    }

    /// Mark the exit as locked.
    pub fn locked(mut self) -> Self {
        self.locked = Some(true);
        self
    }

    /// Mark the exit as hidden from the player.
    pub fn hidden(mut self) -> Self {
        self.hidden = Some(true);
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Direction phrase ("north", "down the ladder").
    pub fn direction(&self) -> &str {
        self.direction.as_deref().unwrap_or_default()
    }

    /// Text describing the exit. Falls back to `short_description`.
    pub fn description(&self) -> &str {
        self.description
            .as_deref()
            .or_else(|| self.extra.get("short_description").and_then(Value::as_str))
            .unwrap_or_default()
    }

    /// Whether the exit is locked.
    pub fn is_locked(&self) -> bool {
        self.locked == Some(true)
    }

    /// Whether the exit is hidden from the player.
    pub fn is_hidden(&self) -> bool {
        self.hidden == Some(true)
    }
}

/// A location node. Immutable once constructed; updating a scene means
/// replacing it with a newly validated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exits: Option<Vec<Exit>>,
    #[serde(
        default,
        deserialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    number_of_visits: Option<u64>,
    /// Fields the engine does not interpret (`summary`, `internal_notes`, ...).
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Scene {
    /// Validate `value` against the scene schema and build a scene from it.
    pub fn from_value(value: Value, schemas: &Schemas) -> CoreResult<Self> {
        schemas.validate(&value, ObjectType::Scene)?;
        Self::from_validated(value)
    }

    /// Parse scene JSON text, validating it against the scene schema.
    pub fn from_json(text: &str, schemas: &Schemas) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ValidationError::new("(root)", format!("invalid JSON: {e}")))?;
        Self::from_value(value, schemas)
    }

    fn from_validated(value: Value) -> CoreResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| ValidationError::new("(root)", e.to_string()).into())
    }

    /// A bare scene with only an identifier. Chain the `with_*` builders to
    /// fill it in.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            short_description: None,
            long_description: None,
            exits: None,
            number_of_visits: None,
            extra: Map::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append an exit.
    pub fn with_exit(mut self, exit: Exit) -> Self {
        self.exits.get_or_insert_with(Vec::new).push(exit);
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Title, if the scene has one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Main description, falling back to the long then the short form.
    pub fn description(&self) -> &str {
        self.description
            .as_deref()
            .or(self.long_description.as_deref())
            .or(self.short_description.as_deref())
            .unwrap_or_default()
    }

    /// All exits in display order, hidden ones included.
    pub fn exits(&self) -> &[Exit] {
        self.exits.as_deref().unwrap_or_default()
    }

    /// Exits the player may see.
    pub fn visible_exits(&self) -> impl Iterator<Item = &Exit> {
        self.exits().iter().filter(|exit| !exit.is_hidden())
    }

    /// How often the player has been here, if tracked.
    pub fn number_of_visits(&self) -> Option<u64> {
        self.number_of_visits
    }

    /// Notes meant for the model only.
    pub fn internal_notes(&self) -> Option<&str> {
        self.extra.get("internal_notes").and_then(Value::as_str)
    }

    /// Any field not interpreted by the engine.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// The scene as a JSON document.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Accepts any non-negative whole number, including `3.0`, since the schema's
/// `integer` type does.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(n) = number.as_u64() {
        return Ok(Some(n));
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(Some(f as u64)),
        _ => Err(de::Error::custom(format!(
            "expected a non-negative whole number, found {number}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::json;

    fn schemas() -> Schemas {
        Schemas::from_dir(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../content/default/schemas"
        ))
    }

    fn hallway() -> Value {
        json!({
            "id": "hallway",
            "title": "Hallway",
            "short_description": "You are in a long, dark hallway.",
            "exits": [
                { "id": "door_1", "direction": "west", "short_description": "Door" }
            ]
        })
    }

    #[test]
    fn from_value_preserves_document() {
        let scene = Scene::from_value(hallway(), &schemas()).unwrap();
        assert_eq!(scene.id(), "hallway");
        assert_eq!(scene.title(), Some("Hallway"));
        assert_eq!(scene.description(), "You are in a long, dark hallway.");
        assert_eq!(scene.exits()[0].description(), "Door");
        assert_eq!(scene.to_value(), hallway());
    }

    #[test]
    fn from_json_rejects_missing_id() {
        let mut doc = hallway();
        doc.as_object_mut().unwrap().remove("id");
        let err = Scene::from_json(&doc.to_string(), &schemas()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(e) if e.path == "id"));
    }

    #[test]
    fn from_json_rejects_malformed_text() {
        let err = Scene::from_json(r#"{"title": "Hallway""#, &schemas()).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn unknown_fields_survive() {
        let doc = json!({
            "id": "starting_room",
            "summary": "A small room.",
            "internal_notes": "The rug hides a trapdoor.",
            "number_of_visits": 0,
            "description": "A torch-lit room."
        });
        let scene = Scene::from_value(doc.clone(), &schemas()).unwrap();
        assert_eq!(scene.internal_notes(), Some("The rug hides a trapdoor."));
        assert_eq!(scene.field("summary"), Some(&json!("A small room.")));
        assert_eq!(scene.number_of_visits(), Some(0));
        assert_eq!(scene.to_value(), doc);
    }

    #[test]
    fn visit_count_accepts_whole_floats_and_large_values() {
        let doc = json!({ "id": "cellar", "number_of_visits": 1.0 });
        let scene = Scene::from_value(doc, &schemas()).unwrap();
        assert_eq!(scene.number_of_visits(), Some(1));
        assert_eq!(scene.to_value()["number_of_visits"], json!(1));

        let doc = json!({ "id": "cellar", "number_of_visits": 4_294_967_296_u64 });
        let scene = Scene::from_value(doc, &schemas()).unwrap();
        assert_eq!(scene.number_of_visits(), Some(4_294_967_296));
    }

    #[test]
    fn visit_count_rejects_fractions() {
        let doc = json!({ "id": "cellar", "number_of_visits": 1.5 });
        assert!(Scene::from_value(doc, &schemas()).is_err());
    }

    #[test]
    fn hidden_exits_are_filtered() {
        let scene = Scene::new("cellar")
            .with_exit(Exit::new("stairs", "up", "Stone stairs"))
            .with_exit(Exit::new("trapdoor", "down", "A trapdoor").hidden())
            .with_exit(Exit::new("gate", "north", "Iron gate").locked());

        let visible: Vec<&str> = scene.visible_exits().map(Exit::id).collect();
        assert_eq!(visible, vec!["stairs", "gate"]);
        assert!(scene.exits()[2].is_locked());
    }

    #[test]
    fn explicitly_unhidden_exit_is_visible() {
        let doc = json!({
            "id": "cellar",
            "exits": [{ "id": "trapdoor", "direction": "down", "description": "Trapdoor", "hidden": false }]
        });
        let scene = Scene::from_value(doc, &schemas()).unwrap();
        assert_eq!(scene.visible_exits().count(), 1);
    }
}
