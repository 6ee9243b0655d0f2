//! Interactive template draft editor.
//!
//! Drives a [`TemplateDraft`] through a dialoguer menu loop: metadata,
//! step add/edit/move/remove, keyword editing, asset upload, and finally
//! submission through the catalog. The catalog's authoritative entry is
//! untouched until the save succeeds, so discarding here never corrupts
//! the list view.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};

use botadmin_core::template::{
    AssetBindingWorker, MoveDirection, StepField, TemplateCatalog, TemplateDraft, TemplateStore,
};
use botadmin_types::error::SubmitError;
use botadmin_types::template::{StepKind, MAX_DELAY_SECONDS};

use crate::cli::spinner;
use crate::state::AppState;

const STEP_KINDS: [StepKind; 5] = [
    StepKind::Text,
    StepKind::Image,
    StepKind::Document,
    StepKind::Audio,
    StepKind::Video,
];

/// Run the editor loop until the draft is saved or discarded.
pub async fn run_editor<S: TemplateStore>(
    state: &AppState,
    mut catalog: TemplateCatalog<S>,
    mut draft: TemplateDraft,
) -> Result<()> {
    let worker = AssetBindingWorker::new(state.uploader());

    if draft.template().name.is_empty() {
        edit_details(&mut draft)?;
    }

    loop {
        print_draft(&draft);

        let actions = [
            "Edit details (name, description, category)",
            "Add step",
            "Edit step",
            "Move step",
            "Remove step",
            "Edit keywords",
            "Toggle active",
            "Save",
            "Discard",
        ];
        let choice = Select::new()
            .with_prompt("Template editor")
            .items(&actions)
            .default(7)
            .interact()?;

        match choice {
            0 => edit_details(&mut draft)?,
            1 => {
                let index = draft.add_step();
                println!("  {} Added step #{}", style("ok").green(), index + 1);
            }
            2 => edit_step(&worker, &mut draft).await?,
            3 => move_step(&mut draft)?,
            4 => remove_step(&mut draft)?,
            5 => edit_keywords(&mut draft)?,
            6 => {
                let active = !draft.template().is_active;
                draft.set_active(active);
            }
            7 => {
                let spinner = spinner("saving template...");
                let result = catalog.submit(&draft).await;
                spinner.finish_and_clear();
                match result {
                    Ok(saved) => {
                        println!();
                        println!(
                            "  {} Saved template '{}'",
                            style("ok").green(),
                            style(&saved.name).cyan()
                        );
                        super::template::print_template_detail(&saved);
                        return Ok(());
                    }
                    Err(SubmitError::Validation(e)) => {
                        println!("  {} {}", style("!").yellow().bold(), e);
                    }
                    Err(SubmitError::Api(e)) => {
                        println!("  {} could not save: {}", style("x").red().bold(), e);
                    }
                }
            }
            _ => {
                let discard = Confirm::new()
                    .with_prompt("Discard this draft?")
                    .default(false)
                    .interact()?;
                if discard {
                    println!("  {}", style("Draft discarded.").dim());
                    return Ok(());
                }
            }
        }
    }
}

fn edit_details(draft: &mut TemplateDraft) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Name")
        .with_initial_text(draft.template().name.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.set_name(&name);

    let description: String = Input::new()
        .with_prompt("Description (optional)")
        .with_initial_text(draft.template().description.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    draft.set_description(&description);

    let category: String = Input::new()
        .with_prompt("Category (optional, e.g. bienvenida, productos, soporte)")
        .with_initial_text(draft.template().category.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    draft.set_category(&category);
    Ok(())
}

async fn edit_step(
    worker: &AssetBindingWorker<botadmin_infra::http::HttpAssetUploader>,
    draft: &mut TemplateDraft,
) -> Result<()> {
    let Some(index) = pick_step(draft, "Edit which step?")? else {
        return Ok(());
    };

    let fields = [
        "Kind",
        "Content / caption",
        "Asset path or URL",
        "Upload a local file",
        "Delay seconds",
        "Back",
    ];
    let choice = Select::new()
        .with_prompt(format!("Step #{}", index + 1))
        .items(&fields)
        .default(1)
        .interact()?;

    match choice {
        0 => {
            let labels: Vec<String> = STEP_KINDS.iter().map(|k| k.to_string()).collect();
            let kind = Select::new()
                .with_prompt("Kind")
                .items(&labels)
                .default(0)
                .interact()?;
            draft.update_step(index, StepField::Kind(STEP_KINDS[kind]))?;
        }
        1 => {
            let content: String = Input::new()
                .with_prompt("Content (use {variable} for variables)")
                .with_initial_text(draft.steps()[index].content.clone())
                .allow_empty(true)
                .interact_text()?;
            draft.update_step(index, StepField::Content(content))?;
        }
        2 => {
            let asset: String = Input::new()
                .with_prompt("Asset path or URL (empty to clear)")
                .with_initial_text(draft.steps()[index].asset_ref.clone().unwrap_or_default())
                .allow_empty(true)
                .interact_text()?;
            let asset = asset.trim().to_string();
            draft.update_step(index, StepField::AssetRef((!asset.is_empty()).then_some(asset)))?;
        }
        3 => upload_asset(worker, draft, index).await?,
        4 => {
            let delay: u32 = Input::new()
                .with_prompt(format!("Delay in seconds (0-{MAX_DELAY_SECONDS})"))
                .with_initial_text(draft.steps()[index].delay_seconds.to_string())
                .interact_text()?;
            draft.update_step(index, StepField::DelaySeconds(delay))?;
        }
        _ => {}
    }
    Ok(())
}

/// Upload a local file and bind the result to the step. A failed upload
/// leaves the step untouched; the draft stays editable throughout.
async fn upload_asset(
    worker: &AssetBindingWorker<botadmin_infra::http::HttpAssetUploader>,
    draft: &mut TemplateDraft,
    index: usize,
) -> Result<()> {
    if worker.is_uploading(index) {
        println!(
            "  {} an upload is already running for step #{}",
            style("!").yellow().bold(),
            index + 1
        );
        return Ok(());
    }

    let path: String = Input::new().with_prompt("Local file").interact_text()?;
    let path = PathBuf::from(path.trim());

    let category = draft.template().upload_category().to_string();
    let spinner = spinner("uploading...");
    let result = worker.bind(index, &path, &category).await;
    spinner.finish_and_clear();

    match result {
        Ok(binding) => {
            println!(
                "  {} uploaded as {}",
                style("ok").green(),
                style(&binding.asset_ref).blue()
            );
            draft.bind_asset(index, binding)?;
        }
        Err(e) => {
            println!("  {} upload failed: {}", style("x").red().bold(), e);
        }
    }
    Ok(())
}

fn move_step(draft: &mut TemplateDraft) -> Result<()> {
    let Some(index) = pick_step(draft, "Move which step?")? else {
        return Ok(());
    };
    let direction = Select::new()
        .with_prompt("Direction")
        .items(&["up", "down"])
        .default(0)
        .interact()?;
    let direction = if direction == 0 {
        MoveDirection::Up
    } else {
        MoveDirection::Down
    };
    if !draft.move_step(index, direction) {
        println!("  {}", style("That step is already at the edge.").dim());
    }
    Ok(())
}

fn remove_step(draft: &mut TemplateDraft) -> Result<()> {
    let Some(index) = pick_step(draft, "Remove which step?")? else {
        return Ok(());
    };
    match draft.remove_step(index) {
        Ok(()) => println!("  {} Removed step #{}", style("ok").green(), index + 1),
        Err(e) => println!("  {} {}", style("!").yellow().bold(), e),
    }
    Ok(())
}

fn edit_keywords(draft: &mut TemplateDraft) -> Result<()> {
    loop {
        let keywords = draft.template().trigger_keywords.clone();
        if keywords.is_empty() {
            println!("  {}", style("No trigger keywords yet.").dim());
        } else {
            println!("  keywords: {}", style(keywords.join(", ")).cyan());
        }

        let choice = Select::new()
            .with_prompt("Trigger keywords")
            .items(&["Add keyword", "Remove keyword", "Back"])
            .default(2)
            .interact()?;
        match choice {
            0 => {
                let keyword: String = Input::new()
                    .with_prompt("Keyword")
                    .allow_empty(true)
                    .interact_text()?;
                if !draft.add_keyword(&keyword) {
                    println!("  {}", style("Empty or already present, skipped.").dim());
                }
            }
            1 => {
                if keywords.is_empty() {
                    continue;
                }
                let index = Select::new()
                    .with_prompt("Remove which?")
                    .items(&keywords)
                    .default(0)
                    .interact()?;
                draft.remove_keyword(&keywords[index]);
            }
            _ => return Ok(()),
        }
    }
}

/// Select a step by its summary; `None` when there is nothing to pick.
fn pick_step(draft: &TemplateDraft, prompt: &str) -> Result<Option<usize>> {
    if draft.steps().is_empty() {
        return Ok(None);
    }
    if draft.steps().len() == 1 {
        return Ok(Some(0));
    }
    let items: Vec<String> = draft
        .steps()
        .iter()
        .map(|step| {
            format!(
                "#{} [{}] {}",
                step.order + 1,
                step.kind,
                truncate(step.content.as_str(), 40)
            )
        })
        .collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(Some(index))
}

fn print_draft(draft: &TemplateDraft) {
    let template = draft.template();
    println!();
    println!(
        "  {} {} {}",
        style(if template.name.is_empty() {
            "(unnamed)"
        } else {
            &template.name
        })
        .cyan()
        .bold(),
        style(template.category.as_deref().unwrap_or("")).magenta(),
        if template.is_active {
            style("active").green()
        } else {
            style("inactive").dim()
        }
    );
    for step in draft.steps() {
        let body = if step.kind.requires_asset() {
            step.asset_ref.clone().unwrap_or_else(|| "(no asset yet)".to_string())
        } else {
            step.content.clone()
        };
        println!(
            "    {} {} {} {}",
            style(format!("#{}", step.order + 1)).dim(),
            style(step.kind.to_string()).yellow(),
            truncate(&body, 50),
            if step.delay_seconds > 0 {
                style(format!("+{}s", step.delay_seconds)).dim().to_string()
            } else {
                String::new()
            }
        );
    }
    println!();
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}
