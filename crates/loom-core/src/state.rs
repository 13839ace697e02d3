use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::scene::Scene;
use crate::schema::{ObjectType, Schemas};

/// Control metadata for the turn loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMeta {
    /// Whether the scene is rendered at the start of the next turn.
    pub describe_current_scene: bool,
    /// The last raw player input.
    pub last_action: Option<String>,
    /// Number of turns started so far.
    pub turn_count: u64,
}

impl Default for EngineMeta {
    fn default() -> Self {
        Self {
            describe_current_scene: true,
            last_action: None,
            turn_count: 0,
        }
    }
}

/// The authoritative world snapshot.
///
/// Values are only produced through validating constructors and `with_*`
/// updates, each of which checks the candidate against the game-state schema
/// before returning it. A rejected update leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    current_scene: Scene,
    inventory: Vec<String>,
    story: Map<String, Value>,
    engine: EngineMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
}

impl GameState {
    /// Build the starting state: default engine metadata, no feedback.
    pub fn initial(
        current_scene: Scene,
        inventory: Vec<String>,
        story: Map<String, Value>,
        schemas: &Schemas,
    ) -> CoreResult<Self> {
        Self {
            current_scene,
            inventory,
            story,
            engine: EngineMeta::default(),
            feedback: None,
        }
        .validated(schemas)
    }

    /// Validate a whole game-state document and build a state from it.
    pub fn from_value(value: Value, schemas: &Schemas) -> CoreResult<Self> {
        schemas
            .validate(&value, ObjectType::GameState)
            .map_err(into_state_error)?;
        serde_json::from_value(value)
            .map_err(|e| CoreError::StateValidation(ValidationError::new("(root)", e.to_string())))
    }

    /// The state as a JSON document.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// The scene the player is in.
    pub fn current_scene(&self) -> &Scene {
        &self.current_scene
    }

    /// Carried items in display order.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Quest summary, goals, and obstacles.
    pub fn story(&self) -> &Map<String, Value> {
        &self.story
    }

    /// Turn-loop metadata.
    pub fn engine(&self) -> &EngineMeta {
        &self.engine
    }

    /// Pending one-shot message for the player.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Replace the current scene.
    pub fn with_current_scene(&self, scene: Scene, schemas: &Schemas) -> CoreResult<Self> {
        Self {
            current_scene: scene,
            ..self.clone()
        }
        .validated(schemas)
    }

    /// Replace the inventory.
    pub fn with_inventory(&self, items: Vec<String>, schemas: &Schemas) -> CoreResult<Self> {
        Self {
            inventory: items,
            ..self.clone()
        }
        .validated(schemas)
    }

    /// Set or clear the pending feedback.
    pub fn with_feedback(&self, feedback: Option<String>, schemas: &Schemas) -> CoreResult<Self> {
        Self {
            feedback,
            ..self.clone()
        }
        .validated(schemas)
    }

    /// Replace the engine metadata.
    pub fn with_engine(&self, engine: EngineMeta, schemas: &Schemas) -> CoreResult<Self> {
        Self {
            engine,
            ..self.clone()
        }
        .validated(schemas)
    }

    /// Render the current scene if the engine flag asks for it.
    ///
    /// Returns the rendered text (or `None` when description was suppressed
    /// for this turn) and the follow-up state, whose flag is re-armed so the
    /// next turn describes the scene again. Scene data is never touched.
    pub fn describe_current_scene<F>(&self, render: F) -> (Option<String>, Self)
    where
        F: FnOnce(&Scene) -> String,
    {
        let text = self
            .engine
            .describe_current_scene
            .then(|| render(&self.current_scene));

        let mut next = self.clone();
        next.engine.describe_current_scene = true;
        (text, next)
    }

    /// Take the pending feedback, returning it with a state where it is
    /// cleared.
    pub fn take_feedback(&self) -> (Option<String>, Self) {
        let mut next = self.clone();
        let feedback = next.feedback.take();
        (feedback, next)
    }

    fn validated(self, schemas: &Schemas) -> CoreResult<Self> {
        match schemas.validate(&self.to_value(), ObjectType::GameState) {
            Ok(()) => Ok(self),
            Err(e) => {
                let e = into_state_error(e);
                tracing::error!(error = %e, "rejected game state update");
                Err(e)
            }
        }
    }
}

fn into_state_error(error: CoreError) -> CoreError {
    match error {
        CoreError::Validation(e) => CoreError::StateValidation(e),
        other => other,
    }
}
