/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Look around, or examine something.
    Look {
        /// What to examine; `None` re-describes the scene.
        target: Option<String>,
    },
    /// Move somewhere.
    Go {
        /// Direction phrase ("north", "through the arch").
        direction: String,
    },
    /// Use an item.
    Use {
        /// The item phrase ("key on the door").
        item: String,
    },
    /// List carried items.
    Inventory,
    /// Show the command list.
    Help,
    /// Dump the game state as JSON.
    State,
    /// Leave the game.
    Quit,
    /// Anything else, passed to the narrator verbatim.
    Action {
        /// The raw input.
        text: String,
    },
}

impl PlayerInput {
    /// Whether the scene should be re-described at the start of the next
    /// turn. Out-of-world commands keep the screen quiet.
    pub fn describes_scene_next(&self) -> bool {
        !matches!(self, Self::Inventory | Self::Help | Self::State)
    }
}

/// Command list shown by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  look, l              describe the scene again
  look <thing>         examine something
  go <direction>       move (or just type a direction)
  use <item>           use something
  inventory, i         list what you carry
  state                show the game state as JSON
  help                 show this list
  quit, q              leave the game
Anything else is passed to the narrator as an action.";

const LOOK_VERBS: &[&str] = &["look", "l", "examine", "x"];
const GO_VERBS: &[&str] = &["go", "walk"];
const USE_VERBS: &[&str] = &["use"];
const INVENTORY_VERBS: &[&str] = &["inventory", "i"];
const HELP_VERBS: &[&str] = &["help", "?"];
const STATE_VERBS: &[&str] = &["state"];
const QUIT_VERBS: &[&str] = &["quit", "q"];

const DIRECTIONS: &[&str] = &[
    "n", "north", "s", "south", "e", "east", "w", "west", "u", "up", "d", "down", "ne",
    "northeast", "nw", "northwest", "se", "southeast", "sw", "southwest",
];

/// Parse one line of player input.
pub fn parse_input(input: &str) -> PlayerInput {
    let input = input.trim();
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = words.first() else {
        return PlayerInput::Look { target: None };
    };

    let verb = first.to_lowercase();
    let rest = &words[1..];

    if DIRECTIONS.contains(&verb.as_str()) && rest.is_empty() {
        return PlayerInput::Go {
            direction: expand_direction(&verb).to_string(),
        };
    }
    if LOOK_VERBS.contains(&verb.as_str()) {
        return parse_look(rest);
    }
    if GO_VERBS.contains(&verb.as_str()) && !rest.is_empty() {
        let direction = rest.join(" ");
        return PlayerInput::Go {
            direction: expand_direction(&direction).to_string(),
        };
    }
    if USE_VERBS.contains(&verb.as_str()) && !rest.is_empty() {
        return PlayerInput::Use {
            item: rest.join(" "),
        };
    }

    if rest.is_empty() {
        if INVENTORY_VERBS.contains(&verb.as_str()) {
            return PlayerInput::Inventory;
        }
        if HELP_VERBS.contains(&verb.as_str()) {
            return PlayerInput::Help;
        }
        if STATE_VERBS.contains(&verb.as_str()) {
            return PlayerInput::State;
        }
        if QUIT_VERBS.contains(&verb.as_str()) {
            return PlayerInput::Quit;
        }
    }

    PlayerInput::Action {
        text: input.to_string(),
    }
}

fn parse_look(rest: &[&str]) -> PlayerInput {
    // Skip "at" if present
    let target = match rest.first() {
        Some(word) if word.eq_ignore_ascii_case("at") => &rest[1..],
        _ => rest,
    };

    if target.is_empty() {
        PlayerInput::Look { target: None }
    } else {
        PlayerInput::Look {
            target: Some(target.join(" ")),
        }
    }
}

fn expand_direction(direction: &str) -> &str {
    match direction {
        "n" => "north",
        "s" => "south",
        "e" => "east",
        "w" => "west",
        "u" => "up",
        "d" => "down",
        "ne" => "northeast",
        "nw" => "northwest",
        "se" => "southeast",
        "sw" => "southwest",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_look() {
        assert_eq!(parse_input("look"), PlayerInput::Look { target: None });
        assert_eq!(parse_input("l"), PlayerInput::Look { target: None });
        assert_eq!(parse_input(""), PlayerInput::Look { target: None });
        assert_eq!(
            parse_input("examine the rug"),
            PlayerInput::Look {
                target: Some("the rug".to_string())
            }
        );
        assert_eq!(
            parse_input("look at the rug"),
            PlayerInput::Look {
                target: Some("the rug".to_string())
            }
        );
    }

    #[test]
    fn parse_movement() {
        assert_eq!(
            parse_input("n"),
            PlayerInput::Go {
                direction: "north".to_string()
            }
        );
        assert_eq!(
            parse_input("go through the wooden door"),
            PlayerInput::Go {
                direction: "through the wooden door".to_string()
            }
        );
        assert_eq!(
            parse_input("walk d"),
            PlayerInput::Go {
                direction: "down".to_string()
            }
        );
    }

    #[test]
    fn parse_use() {
        assert_eq!(
            parse_input("use key on door"),
            PlayerInput::Use {
                item: "key on door".to_string()
            }
        );
    }

    #[test]
    fn parse_meta_commands() {
        assert_eq!(parse_input("i"), PlayerInput::Inventory);
        assert_eq!(parse_input("INVENTORY"), PlayerInput::Inventory);
        assert_eq!(parse_input("help"), PlayerInput::Help);
        assert_eq!(parse_input("state"), PlayerInput::State);
        assert_eq!(parse_input("quit"), PlayerInput::Quit);
        assert_eq!(parse_input("q"), PlayerInput::Quit);
    }

    #[test]
    fn everything_else_is_an_action() {
        assert_eq!(
            parse_input("  dance a jig  "),
            PlayerInput::Action {
                text: "dance a jig".to_string()
            }
        );
        assert_eq!(
            parse_input("go"),
            PlayerInput::Action {
                text: "go".to_string()
            }
        );
        assert_eq!(
            parse_input("north of here is a castle"),
            PlayerInput::Action {
                text: "north of here is a castle".to_string()
            }
        );
        assert_eq!(
            parse_input("quit whining"),
            PlayerInput::Action {
                text: "quit whining".to_string()
            }
        );
    }

    #[test]
    fn out_of_world_commands_suppress_description() {
        assert!(!PlayerInput::Inventory.describes_scene_next());
        assert!(!PlayerInput::State.describes_scene_next());
        assert!(PlayerInput::Look { target: None }.describes_scene_next());
    }
}
