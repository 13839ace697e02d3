use colored::Colorize;
use loom_core::{Exit, Scene};

/// Player-facing scene text: emphasized title, description, visible exits.
pub fn render_scene(scene: &Scene) -> String {
    let mut out = String::new();

    if let Some(title) = scene.title() {
        out.push_str(&format!("{}\n", title.bold().underline()));
    }
    out.push_str(scene.description());

    let exits: Vec<&Exit> = scene.visible_exits().collect();
    if !exits.is_empty() {
        out.push_str(&format!("\n\n{}\n", "Exits:".underline()));
        out.push_str(&exit_lines(&exits));
    }

    out
}

/// Model-facing scene text. Unlike [`render_scene`] it is uncolored and
/// includes the scene's internal notes.
pub fn scene_to_text(scene: &Scene) -> String {
    let mut out = String::new();

    if let Some(title) = scene.title() {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(scene.description());

    let exits: Vec<&Exit> = scene.visible_exits().collect();
    if !exits.is_empty() {
        out.push_str("\n\nExits:\n");
        out.push_str(&exit_lines(&exits));
    }

    if let Some(notes) = scene.internal_notes() {
        out.push_str(&format!("\n\nInternal Notes:\n{notes}"));
    }

    out
}

/// The player's inventory as a list.
pub fn render_inventory(items: &[String]) -> String {
    if items.is_empty() {
        return "You are not carrying anything.".to_string();
    }

    let mut out = String::from("You are carrying:");
    for item in items {
        out.push_str(&format!("\n- {item}"));
    }
    out
}

fn exit_lines(exits: &[&Exit]) -> String {
    exits
        .iter()
        .map(|exit| format!("- {}: {}", capitalize(exit.direction()), exit.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
