use loom_core::{CoreError, CoreResult, GameState, ObjectType, Scene, Schemas};
use loom_llm::{LlmClient, LlmError};
use serde_json::Value;

use crate::content::{AgentConfig, JSON_CRUNCHER};
use crate::dispatch::ObjectSynthesizer;
use crate::error::{EngineError, EngineResult};
use crate::extract::parse_structured;

/// Default number of model replies tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Coerces model output into schema-valid objects.
pub struct Synthesizer<'a> {
    client: &'a dyn LlmClient,
    agent: &'a AgentConfig,
    schemas: &'a Schemas,
    max_attempts: u32,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer driving `agent` through `client`.
    pub fn new(client: &'a dyn LlmClient, agent: &'a AgentConfig, schemas: &'a Schemas) -> Self {
        Self {
            client,
            agent,
            schemas,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the attempt budget. At least one attempt is always made.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// The attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The first prompt sent for `text`.
    pub fn initial_prompt(&self, text: &str, object_type: ObjectType) -> EngineResult<String> {
        let prompt = self.agent.object_prompt(object_type).ok_or_else(|| {
            EngineError::MissingObjectPrompt {
                agent: JSON_CRUNCHER.to_string(),
                object_type,
            }
        })?;

        let mut message = format!(
            "{}\n\n{text}\n\nExample {object_type} object(s):\n\n",
            prompt.user_prompt
        );
        for example in &prompt.examples {
            let pretty = serde_json::to_string_pretty(example)
                .map_err(|e| EngineError::Content(e.to_string()))?;
            message.push_str(&format!("```json\n{pretty}\n```\n\n"));
        }
        Ok(message)
    }
}

impl ObjectSynthesizer for Synthesizer<'_> {
    fn synthesize(&self, text: &str, object_type: ObjectType) -> EngineResult<Value> {
        let system_prompt = self.agent.full_system_prompt();
        let base = self.initial_prompt(text, object_type)?;
        let mut message = base.clone();

        for attempt in 1..=self.max_attempts {
            let reply = match self.client.complete(&system_prompt, &message, &self.agent.llm) {
                Ok(reply) => reply,
                Err(LlmError::EmptyResponse) => String::new(),
                Err(e) => return Err(e.into()),
            };

            let doc = match parse_structured(&reply) {
                Ok(doc) => Value::Object(doc),
                Err(EngineError::StructuralParse(reason)) => {
                    tracing::warn!(attempt, %object_type, %reason, "malformed reply, retrying");
                    message = malformed_prompt(&reason, &reply, &base);
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.check(&doc, object_type) {
                Ok(()) => {
                    tracing::debug!(attempt, %object_type, "synthesized object");
                    return Ok(doc);
                }
                Err(CoreError::Validation(e) | CoreError::StateValidation(e)) => {
                    tracing::warn!(attempt, %object_type, error = %e, "reply failed validation, retrying");
                    message = validation_prompt(&e.message, &reply, &base);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(EngineError::SynthesisExhausted {
            object_type,
            attempts: self.max_attempts,
        })
    }
}

impl Synthesizer<'_> {
    /// Validate `doc` and make sure it converts to the engine's typed value,
    /// so callers never see a reply that only the schema accepts.
    fn check(&self, doc: &Value, object_type: ObjectType) -> CoreResult<()> {
        match object_type {
            ObjectType::Scene => Scene::from_value(doc.clone(), self.schemas).map(drop),
            ObjectType::GameState => GameState::from_value(doc.clone(), self.schemas).map(drop),
            ObjectType::Story => self.schemas.validate(doc, object_type),
        }
    }
}

fn validation_prompt(error: &str, reply: &str, base: &str) -> String {
    format!(
        "(There was a JSON validation error. Please correct your JSON object and resubmit it. \
         Error message: \"{error}\")\n\nYour previous response:\n{reply}\n\n{base}"
    )
}

fn malformed_prompt(reason: &str, reply: &str, base: &str) -> String {
    format!(
        "(Your previous response was malformed and could not be read as a JSON object: \
         {reason}. Please try again.)\n\nYour previous response:\n{reply}\n\n{base}"
    )
}
