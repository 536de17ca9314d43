//! `quickclick replay`: run a scripted session and print each step's outcome.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use quickclick_config::{Settings, Tuning};
use quickclick_core::{Script, Simulator, load_page};

pub(crate) fn replay(page_path: &Path, script_path: &Path, settings: Settings, tuning: Tuning) -> Result<()> {
    let page = load_page(page_path)
        .with_context(|| format!("loading page {}", page_path.display()))?;
    let script = Script::load(script_path)
        .with_context(|| format!("loading script {}", script_path.display()))?;
    info!(steps = script.steps.len(), "replaying session");

    let mut sim = Simulator::new(page, settings, tuning)?;
    sim.start();
    println!("start      {}", sim.report());

    for (i, step) in script.steps.iter().enumerate() {
        let report = sim
            .run_step(step)
            .with_context(|| format!("step {} ({step:?})", i + 1))?;
        println!("step {:<5} {}", i + 1, report);
    }
    Ok(())
}
