use loom_core::{EngineMeta, GameState};
use loom_llm::LlmClient;

use crate::content::{ContentModule, JSON_CRUNCHER, NARRATOR, SCENE_GENERATOR};
use crate::dispatch::Dispatcher;
use crate::error::EngineResult;
use crate::input::{HELP_TEXT, PlayerInput, parse_input};
use crate::narrator::Narrator;
use crate::render::{render_inventory, render_scene};
use crate::scene_gen::SceneGenerator;
use crate::synth::{DEFAULT_MAX_ATTEMPTS, Synthesizer};

/// What the player sees before typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnIntro {
    /// The turn number, starting at 1.
    pub turn: u64,
    /// Pending feedback from the previous turn.
    pub feedback: Option<String>,
    /// The rendered scene, unless the previous command suppressed it.
    pub scene: Option<String>,
}

/// How a processed input ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Keep playing; show `output` if present.
    Continue {
        /// Immediate text for the player.
        output: Option<String>,
    },
    /// The player left.
    Quit,
}

/// A running game.
pub struct GameSession<'a> {
    state: GameState,
    content: &'a ContentModule,
    client: &'a dyn LlmClient,
    max_attempts: u32,
}

impl<'a> GameSession<'a> {
    /// Start a game from the module's initial state.
    pub fn new(content: &'a ContentModule, client: &'a dyn LlmClient) -> EngineResult<Self> {
        Ok(Self {
            state: content.initial_state()?,
            content,
            client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Set the synthesis attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// The current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance the turn counter, then collect pending feedback and the scene
    /// description.
    pub fn begin_turn(&mut self) -> EngineResult<TurnIntro> {
        let schemas = self.content.schemas();
        let engine = EngineMeta {
            turn_count: self.state.engine().turn_count + 1,
            ..self.state.engine().clone()
        };
        let state = self.state.with_engine(engine, schemas)?;

        let (feedback, state) = state.take_feedback();
        let (scene, state) = state.describe_current_scene(render_scene);
        let turn = state.engine().turn_count;
        self.state = state;

        Ok(TurnIntro {
            turn,
            feedback: feedback.filter(|f| !f.trim().is_empty()),
            scene,
        })
    }

    /// Handle one line of player input.
    pub fn process(&mut self, input: &str) -> EngineResult<TurnOutcome> {
        let command = parse_input(input);
        if command == PlayerInput::Quit {
            return Ok(TurnOutcome::Quit);
        }

        let schemas = self.content.schemas();
        let engine = EngineMeta {
            last_action: Some(input.trim().to_string()),
            describe_current_scene: command.describes_scene_next(),
            ..self.state.engine().clone()
        };
        let recorded = self.state.with_engine(engine, schemas)?;

        let (output, next) = match &command {
            PlayerInput::Look { target: None } => (None, recorded),
            PlayerInput::Inventory => (Some(render_inventory(recorded.inventory())), recorded),
            PlayerInput::Help => (Some(HELP_TEXT.to_string()), recorded),
            PlayerInput::State => {
                let dump = serde_json::to_string_pretty(&recorded.to_value()).unwrap_or_default();
                (Some(dump), recorded)
            }
            PlayerInput::Look {
                target: Some(target),
            } => (None, self.narrate(&recorded, |n, s| n.look_at(target, s))?),
            PlayerInput::Go { direction } => (None, self.narrate(&recorded, |n, s| n.go(direction, s))?),
            PlayerInput::Use { item } => (None, self.narrate(&recorded, |n, s| n.use_item(item, s))?),
            PlayerInput::Action { text } => (None, self.narrate(&recorded, |n, s| n.act(text, s))?),
            PlayerInput::Quit => return Ok(TurnOutcome::Quit),
        };

        self.state = next;
        Ok(TurnOutcome::Continue { output })
    }

    fn narrate<F>(&self, state: &GameState, ask: F) -> EngineResult<GameState>
    where
        F: FnOnce(&Narrator<'_>, &GameState) -> EngineResult<String>,
    {
        let schemas = self.content.schemas();
        let narrator = Narrator::new(self.client, self.content.agent(NARRATOR)?);
        let reply = ask(&narrator, state)?;
        tracing::debug!(%reply, "narrator replied");

        let synthesizer = Synthesizer::new(self.client, self.content.agent(JSON_CRUNCHER)?, schemas)
            .with_max_attempts(self.max_attempts);
        let generator = SceneGenerator::new(
            self.client,
            self.content.agent(SCENE_GENERATOR)?,
            &synthesizer,
            schemas,
        );

        Dispatcher::new(&generator, &synthesizer, schemas).dispatch(&reply, state)
    }
}
