use std::fmt;
use std::sync::LazyLock;

use loom_core::{GameState, Scene};
use regex_lite::Regex;

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][A-Za-z _]*)>").expect("valid regex"));

/// What a directive asks the engine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Build a new scene from a description.
    GenerateScene,
    /// Revise the current scene.
    UpdateScene,
    /// Rebuild the current scene from a full description.
    RestructureScene,
    /// Show a message to the player.
    Feedback,
    /// Do nothing.
    Noop,
    /// A tag the engine does not know.
    Unknown(String),
}

impl CommandKind {
    /// Normalize a tag (`UPDATE SCENE` becomes `update_scene`) and classify it.
    pub fn from_tag(tag: &str) -> Self {
        let name = tag.trim().to_lowercase().replace(' ', "_");
        match name.as_str() {
            "generate_scene" => Self::GenerateScene,
            "update_scene" => Self::UpdateScene,
            "restructure_scene" => Self::RestructureScene,
            "feedback" => Self::Feedback,
            "noop" => Self::Noop,
            _ => Self::Unknown(name),
        }
    }

    /// The normalized snake_case name.
    pub fn name(&self) -> &str {
        match self {
            Self::GenerateScene => "generate_scene",
            Self::UpdateScene => "update_scene",
            Self::RestructureScene => "restructure_scene",
            Self::Feedback => "feedback",
            Self::Noop => "noop",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The scene a command works from.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneContext {
    /// The scene being left, for `generate_scene`.
    LastScene(Scene),
    /// The scene being revised, for `update_scene`.
    Scene(Scene),
}

impl SceneContext {
    /// The scene itself.
    pub fn scene(&self) -> &Scene {
        match self {
            Self::LastScene(scene) | Self::Scene(scene) => scene,
        }
    }
}

/// One extracted directive. Consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// What to do.
    pub kind: CommandKind,
    /// Trimmed text following the tag.
    pub payload: String,
    /// Scene reference for scene-building kinds.
    pub context: Option<SceneContext>,
}

impl Command {
    /// A command with no scene context.
    pub fn new(kind: CommandKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
            context: None,
        }
    }

    /// Attach `state`'s current scene as context where the kind needs one.
    pub fn with_context_from(mut self, state: &GameState) -> Self {
        let scene = state.current_scene().clone();
        self.context = match self.kind {
            CommandKind::GenerateScene => Some(SceneContext::LastScene(scene)),
            CommandKind::UpdateScene => Some(SceneContext::Scene(scene)),
            _ => None,
        };
        self
    }
}

/// Split narrator prose into directives, in reply order.
///
/// Text before the first tag is narration for the player's benefit only and
/// is dropped. A reply without tags yields no commands.
pub fn extract_commands(text: &str, state: &GameState) -> Vec<Command> {
    let tags: Vec<_> = DIRECTIVE_RE.captures_iter(text).collect();

    let commands: Vec<Command> = tags
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let tag = caps.get(1)?;
            let end = tags
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());

            let payload = text[whole.end()..end].trim();
            Some(Command::new(CommandKind::from_tag(tag.as_str()), payload).with_context_from(state))
        })
        .collect();

    tracing::debug!(
        count = commands.len(),
        kinds = ?commands.iter().map(|c| c.kind.name()).collect::<Vec<_>>(),
        "extracted commands"
    );
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_core::{Exit, Schemas};
    use proptest::prelude::*;
    use serde_json::{Map, json};

    fn schemas() -> Schemas {
        Schemas::from_dir(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../content/default/schemas"
        ))
    }

    fn state() -> GameState {
        let scene = Scene::new("starting_room")
            .with_title("Starting Room")
            .with_description("A torch-lit room.")
            .with_exit(Exit::new("trapdoor_1", "down", "Hidden trapdoor").hidden());
        let story: Map<_, _> = json!({"main_quest": "Escape."})
            .as_object()
            .cloned()
            .unwrap();
        GameState::initial(scene, vec![], story, &schemas()).unwrap()
    }

    #[test]
    fn single_generate_scene() {
        let state = state();
        let commands =
            extract_commands("You can enter. <GENERATE SCENE> A library with a window.", &state);

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].kind, CommandKind::GenerateScene);
        assert_eq!(commands[0].payload, "A library with a window.");
        assert_eq!(
            commands[0].context,
            Some(SceneContext::LastScene(state.current_scene().clone()))
        );
    }

    #[test]
    fn feedback_then_update() {
        let state = state();
        let commands = extract_commands(
            "<FEEDBACK> You move the rug and discover a trapdoor! <UPDATE SCENE> Make the trapdoor exit unhidden.",
            &state,
        );

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].kind, CommandKind::Feedback);
        assert_eq!(
            commands[0].payload,
            "You move the rug and discover a trapdoor!"
        );
        assert_eq!(commands[0].context, None);

        assert_eq!(commands[1].kind, CommandKind::UpdateScene);
        assert_eq!(commands[1].payload, "Make the trapdoor exit unhidden.");
        assert_eq!(
            commands[1].context,
            Some(SceneContext::Scene(state.current_scene().clone()))
        );
    }

    #[test]
    fn no_tags_no_commands() {
        assert!(extract_commands("You look around. Nothing happens.", &state()).is_empty());
        assert!(extract_commands("", &state()).is_empty());
    }

    #[test]
    fn tag_normalization() {
        assert_eq!(CommandKind::from_tag("UPDATE SCENE"), CommandKind::UpdateScene);
        assert_eq!(CommandKind::from_tag("Restructure Scene"), CommandKind::RestructureScene);
        assert_eq!(CommandKind::from_tag("NOOP"), CommandKind::Noop);
        assert_eq!(
            CommandKind::from_tag("CAST SPELL"),
            CommandKind::Unknown("cast_spell".into())
        );
    }

    #[test]
    fn multiline_payloads_and_bare_tags() {
        let commands = extract_commands("<FEEDBACK>\nLine one.\nLine two.\n<NOOP>", &state());
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].payload, "Line one.\nLine two.");
        assert_eq!(commands[1].kind, CommandKind::Noop);
        assert_eq!(commands[1].payload, "");
    }

    #[test]
    fn comparison_signs_are_not_tags() {
        let commands = extract_commands("<FEEDBACK> The dial reads 3 < 5 > 1.", &state());
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].payload, "The dial reads 3 < 5 > 1.");
    }

    #[test]
    fn unknown_tags_are_kept() {
        let commands = extract_commands("<DANCE> A jig. <FEEDBACK> Fun.", &state());
        assert_eq!(commands[0].kind, CommandKind::Unknown("dance".into()));
        assert_eq!(commands[1].payload, "Fun.");
    }

    proptest! {
        #[test]
        fn extraction_never_panics(text in "(<[A-Z ]{0,12}>|[^<>]{0,20}|[<>]){0,10}") {
            let state = state();
            for command in extract_commands(&text, &state) {
                prop_assert_eq!(command.payload.trim(), command.payload.as_str());
            }
        }
    }
}
