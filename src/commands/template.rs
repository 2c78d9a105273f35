//! Implementation of the `morio template` command.
//!
//! For each agent, renders the main configuration template and then every
//! enabled module area. The variable context is re-read before each step
//! so defaults harvested by the main template are visible to its modules.
//! The first failure aborts the run; files already written stay in place.

use crate::agents::Agent;
use crate::context::ClientContext;
use crate::error::Result;
use crate::modules::ModuleArea;
use crate::template::{RenderedFile, Renderer};
use crate::vars::VarStore;
use tracing::info;

/// Files rendered for one agent.
#[derive(Debug, Clone)]
pub struct AgentRender {
    pub config: RenderedFile,
    pub modules: Vec<RenderedFile>,
}

/// Render the configuration of every agent.
pub fn render_all(ctx: &ClientContext) -> Result<Vec<(Agent, AgentRender)>> {
    let store = VarStore::from_context(ctx);
    let renderer = Renderer::new(&store, ctx.layout_path());

    Agent::ALL
        .iter()
        .map(|agent| Ok((*agent, render_agent(ctx, &store, &renderer, *agent)?)))
        .collect()
}

fn render_agent(
    ctx: &ClientContext,
    store: &VarStore,
    renderer: &Renderer<'_>,
    agent: Agent,
) -> Result<AgentRender> {
    let vars = store.get_all()?;
    let config = renderer.render_file(
        &ctx.config_template_path(agent),
        &ctx.rendered_config_path(agent),
        &vars,
    )?;

    let mut modules = Vec::new();
    for area in ModuleArea::for_agent(agent) {
        let vars = store.get_all()?;
        modules.extend(renderer.render_folder(
            &ctx.area_dir(area),
            &ctx.area_output_dir(area),
            &vars,
        )?);
    }

    info!(%agent, modules = modules.len(), "templated agent configuration");
    Ok(AgentRender { config, modules })
}

/// Execute the `morio template` command.
pub fn cmd_template(ctx: &ClientContext) -> Result<()> {
    for (agent, render) in render_all(ctx)? {
        println!(
            "Templated {} configuration: {}",
            agent,
            render.config.destination.display()
        );
        for module in &render.modules {
            println!("  - {}", module.destination.display());
        }
    }
    Ok(())
}
