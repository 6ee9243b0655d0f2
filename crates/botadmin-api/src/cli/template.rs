//! Message-template CLI subcommands.
//!
//! Listing and detail views over the catalog projection, plus entry points
//! into the interactive draft editor. Deleting always asks for
//! confirmation unless `--force` is passed.

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use botadmin_core::template::{TemplateCatalog, TemplateDraft};
use botadmin_types::template::MessageTemplate;

use crate::state::AppState;

use super::editor;

/// Message-template subcommands.
#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List templates, optionally filtered by category.
    List {
        /// Only show templates in this category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one template's full step sequence.
    Show {
        /// Template id.
        id: i64,
    },

    /// List the categories currently in use.
    Categories,

    /// Create a new template interactively.
    New,

    /// Edit an existing template interactively.
    Edit {
        /// Template id.
        id: i64,
    },

    /// Delete a template.
    Delete {
        /// Template id.
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Handle a template subcommand.
pub async fn handle_template_command(
    cmd: TemplateCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        TemplateCommand::List { category } => list_templates(state, category, json).await,
        TemplateCommand::Show { id } => show_template(state, id, json).await,
        TemplateCommand::Categories => list_categories(state, json).await,
        TemplateCommand::New => {
            let catalog = TemplateCatalog::new(state.template_store());
            editor::run_editor(state, catalog, TemplateDraft::new()).await
        }
        TemplateCommand::Edit { id } => edit_template(state, id).await,
        TemplateCommand::Delete { id, force } => delete_template(state, id, force, json).await,
    }
}

async fn list_templates(state: &AppState, category: Option<String>, json: bool) -> Result<()> {
    let mut catalog = TemplateCatalog::new(state.template_store());
    catalog.set_filter(category);
    catalog
        .refresh()
        .await
        .context("could not load templates from the backend")?;

    if json {
        println!("{}", serde_json::to_string_pretty(catalog.templates())?);
        return Ok(());
    }

    if catalog.templates().is_empty() {
        println!();
        println!("  {}", style("No templates yet.").dim());
        println!("  Create one with: badmin template new");
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Category", "Steps", "Keywords", "Active"]);

    for template in catalog.templates() {
        let active = if template.is_active {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(template.id.map_or("-".to_string(), |id| id.to_string())),
            Cell::new(&template.name),
            Cell::new(template.category.as_deref().unwrap_or("-")),
            Cell::new(template.steps.len()),
            Cell::new(template.trigger_keywords.join(", ")),
            active,
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

async fn show_template(state: &AppState, id: i64, json: bool) -> Result<()> {
    let template = fetch_template(state, id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    print_template_detail(&template);
    Ok(())
}

async fn list_categories(state: &AppState, json: bool) -> Result<()> {
    let catalog = TemplateCatalog::new(state.template_store());
    let categories = catalog
        .categories()
        .await
        .context("could not load categories from the backend")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!();
    if categories.is_empty() {
        println!("  {}", style("No categories in use.").dim());
    } else {
        for category in categories {
            println!("  {}", style(category).cyan());
        }
    }
    println!();
    Ok(())
}

async fn edit_template(state: &AppState, id: i64) -> Result<()> {
    let mut catalog = TemplateCatalog::new(state.template_store());
    catalog
        .refresh()
        .await
        .context("could not load templates from the backend")?;
    let draft = catalog
        .start_edit(id)
        .ok_or_else(|| anyhow!("no template with id {id}"))?;
    editor::run_editor(state, catalog, draft).await
}

async fn delete_template(state: &AppState, id: i64, force: bool, json: bool) -> Result<()> {
    let mut catalog = TemplateCatalog::new(state.template_store());
    catalog
        .refresh()
        .await
        .context("could not load templates from the backend")?;
    let name = catalog
        .find(id)
        .map(|t| t.name.clone())
        .ok_or_else(|| anyhow!("no template with id {id}"))?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete template '{name}'? This cannot be undone"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  {}", style("Aborted.").dim());
            return Ok(());
        }
    }

    catalog
        .delete(id)
        .await
        .with_context(|| format!("could not delete template '{name}'"))?;

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!();
        println!(
            "  {} Deleted template '{}'",
            style("ok").green(),
            style(&name).cyan()
        );
        println!();
    }
    Ok(())
}

/// Refresh a throwaway catalog and pull one template out of it.
async fn fetch_template(state: &AppState, id: i64) -> Result<MessageTemplate> {
    let mut catalog = TemplateCatalog::new(state.template_store());
    catalog
        .refresh()
        .await
        .context("could not load templates from the backend")?;
    catalog
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow!("no template with id {id}"))
}

/// Styled step-by-step detail view.
pub fn print_template_detail(template: &MessageTemplate) {
    println!();
    println!(
        "  {} {}",
        style(&template.name).cyan().bold(),
        if template.is_active {
            style("(active)").green()
        } else {
            style("(inactive)").dim()
        }
    );
    if let Some(description) = &template.description {
        println!("  {}", style(description).dim());
    }
    if let Some(category) = &template.category {
        println!("  category: {}", style(category).magenta());
    }
    if !template.trigger_keywords.is_empty() {
        println!(
            "  keywords: {}",
            style(template.trigger_keywords.join(", ")).dim()
        );
    }
    if let Some(updated) = template.updated_at {
        println!(
            "  updated:  {}",
            style(updated.format("%Y-%m-%d %H:%M UTC")).dim()
        );
    }
    println!();

    for step in &template.steps {
        let delay = if step.delay_seconds > 0 {
            format!(" +{}s", step.delay_seconds)
        } else {
            String::new()
        };
        println!(
            "  {} {}{}",
            style(format!("#{}", step.order + 1)).dim(),
            style(step.kind.to_string()).yellow(),
            style(delay).dim()
        );
        if !step.content.is_empty() {
            println!("     {}", step.content);
        }
        if let Some(asset) = &step.asset_ref {
            println!("     {}", style(asset).blue().underlined());
        }
    }
    println!();
}
