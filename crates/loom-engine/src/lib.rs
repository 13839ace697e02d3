//! The Loom turn pipeline.
//!
//! Narrator replies flow through [`extract_commands`] into the
//! [`Dispatcher`], which applies each directive to the [`GameState`] in
//! order. Directives that need structured data go through the
//! [`Synthesizer`], which keeps re-prompting the model until its reply
//! validates against the target schema or the attempt budget runs out.
//!
//! [`GameState`]: loom_core::GameState

/// Content modules.
///
/// A module is a directory holding `config.yml` (agent prompts, the starting
/// scene, story, and inventory) and a `schemas/` directory. It is loaded once
/// at startup and read-only afterwards.
pub mod content;
/// Directive extraction from narrator prose.
///
/// The narrator annotates its reply with bracketed tags such as
/// `<FEEDBACK>` or `<UPDATE SCENE>`. Each tag owns the text that follows it,
/// up to the next tag or the end of the reply.
pub mod directive;
/// Applying directives to the game state.
pub mod dispatch;
/// Error types for the pipeline.
pub mod error;
/// Pulling machine-readable payloads out of model prose.
///
/// Models wrap JSON in triple-backtick fences, often with a language tag and
/// surrounding chatter. The canonical payload is usually the last block, so
/// blocks are counted from the end of the text.
pub mod extract;
/// Player input grammar.
pub mod input;
/// The narrator agent.
pub mod narrator;
/// Scene text for players and for prompts.
pub mod render;
/// The scene generator agent.
///
/// Asks the model for a prose description of a new or revised scene, then
/// has the synthesizer turn that prose into a validated scene object.
pub mod scene_gen;
/// The turn loop state holder.
///
/// A `GameSession` owns the current `GameState` between turns. Each turn
/// starts with `begin_turn` and ends with `process`; a failed turn leaves the
/// state exactly as it was so the player can retry.
pub mod session;
/// Schema-checked structured-object synthesis.
///
/// The model is asked to turn free text into a JSON object of a given type.
/// Each reply is parsed and validated; on failure the model is re-prompted
/// with the problem and its own reply, up to a fixed number of attempts.
pub mod synth;

pub use content::{AgentConfig, ContentModule, ModuleConfig, ObjectPrompt};
pub use directive::{Command, CommandKind, SceneContext, extract_commands};
pub use dispatch::{Dispatcher, ObjectSynthesizer, SceneWriter};
pub use error::{EngineError, EngineResult};
pub use extract::{extract_block, extract_structured_object, parse_structured};
pub use input::{PlayerInput, parse_input};
pub use narrator::Narrator;
pub use render::{render_inventory, render_scene, scene_to_text};
pub use scene_gen::SceneGenerator;
pub use session::{GameSession, TurnIntro, TurnOutcome};
pub use synth::{DEFAULT_MAX_ATTEMPTS, Synthesizer};
