use std::path::Path;

pub fn run(dir: &Path) -> Result<(), String> {
    let module = super::load_module(dir)?;

    let scene = module
        .initial_scene()
        .map_err(|e| format!("initial scene: {e}"))?;
    module
        .initial_story()
        .map_err(|e| format!("story: {e}"))?;
    let state = module
        .initial_state()
        .map_err(|e| format!("initial game state: {e}"))?;

    println!("  All checks passed for '{}'.", module.root().display());
    println!(
        "  {} agents, starting in '{}' with {} exits, {} items",
        module.config().agents.len(),
        scene.id(),
        scene.exits().len(),
        state.inventory().len()
    );

    Ok(())
}
