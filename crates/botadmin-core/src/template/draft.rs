//! Editable template draft.
//!
//! A draft is a private copy of a [`MessageTemplate`]; the catalog's
//! authoritative entry is untouched until the draft is submitted. All step
//! mutations go through the draft's own operations (never direct index
//! assignment) so the order-contiguity invariant holds after every call:
//! `steps[i].order == i`.

use botadmin_types::error::ValidationError;
use botadmin_types::template::{
    MessageTemplate, StepKind, StepUnit, MAX_CATEGORY_LEN, MAX_DELAY_SECONDS, MAX_NAME_LEN,
};

use super::upload::AssetBinding;

/// A single typed field patch for one step.
#[derive(Debug, Clone)]
pub enum StepField {
    Kind(StepKind),
    Content(String),
    AssetRef(Option<String>),
    DelaySeconds(u32),
}

/// Direction of an adjacent step transposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// An editable copy of a message template.
#[derive(Debug, Clone)]
pub struct TemplateDraft {
    template: MessageTemplate,
}

impl TemplateDraft {
    /// A fresh draft: unnamed, active, one default text step.
    pub fn new() -> Self {
        Self {
            template: MessageTemplate::new(),
        }
    }

    /// An editable copy of an existing template.
    pub fn from_template(template: &MessageTemplate) -> Self {
        Self {
            template: template.clone(),
        }
    }

    /// Read access to the underlying template.
    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// The steps in delivery order.
    pub fn steps(&self) -> &[StepUnit] {
        &self.template.steps
    }

    /// Consume the draft, yielding the template for submission.
    pub fn into_template(self) -> MessageTemplate {
        self.template
    }

    // --- Metadata ---

    pub fn set_name(&mut self, name: &str) {
        self.template.name = name.trim().to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        let trimmed = description.trim();
        self.template.description = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn set_category(&mut self, category: &str) {
        let trimmed = category.trim();
        self.template.category = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn set_active(&mut self, active: bool) {
        self.template.is_active = active;
    }

    /// Add a trigger keyword. Keywords are trimmed and de-duplicated
    /// case-insensitively; returns false when nothing was added.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            return false;
        }
        let lower = trimmed.to_lowercase();
        if self
            .template
            .trigger_keywords
            .iter()
            .any(|k| k.to_lowercase() == lower)
        {
            return false;
        }
        self.template.trigger_keywords.push(trimmed.to_string());
        true
    }

    /// Remove a trigger keyword (exact match). Returns false if absent.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.template.trigger_keywords.len();
        self.template.trigger_keywords.retain(|k| k != keyword);
        self.template.trigger_keywords.len() != before
    }

    // --- Step operations ---

    /// Append a new default text step at the end of the sequence.
    /// Returns the new step's index.
    pub fn add_step(&mut self) -> usize {
        let order = self.template.steps.len() as u32;
        self.template.steps.push(StepUnit::text(order));
        self.template.steps.len() - 1
    }

    /// Patch one field of the step at `index`. Delays are clamped into
    /// `[0, 60]`. No renumbering happens here.
    pub fn update_step(&mut self, index: usize, field: StepField) -> Result<(), ValidationError> {
        let step = self
            .template
            .steps
            .get_mut(index)
            .ok_or(ValidationError::StepOutOfRange(index))?;

        match field {
            StepField::Kind(kind) => step.kind = kind,
            StepField::Content(content) => step.content = content,
            StepField::AssetRef(asset_ref) => step.asset_ref = asset_ref,
            StepField::DelaySeconds(delay) => step.delay_seconds = delay.min(MAX_DELAY_SECONDS),
        }
        Ok(())
    }

    /// Remove the step at `index` and renumber the survivors to `0..len`.
    ///
    /// A template may never become empty, so removing the last remaining
    /// step is rejected.
    pub fn remove_step(&mut self, index: usize) -> Result<(), ValidationError> {
        if self.template.steps.len() <= 1 {
            return Err(ValidationError::LastStep);
        }
        if index >= self.template.steps.len() {
            return Err(ValidationError::StepOutOfRange(index));
        }
        self.template.steps.remove(index);
        self.renumber();
        Ok(())
    }

    /// Swap the step at `index` with its neighbor in `direction`.
    ///
    /// An adjacent transposition keeps every intermediate state valid and
    /// runs in O(1). Moves that would leave the sequence are a no-op;
    /// returns whether a swap happened.
    pub fn move_step(&mut self, index: usize, direction: MoveDirection) -> bool {
        let len = self.template.steps.len();
        if index >= len {
            return false;
        }
        let neighbor = match direction {
            MoveDirection::Up => {
                if index == 0 {
                    return false;
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 >= len {
                    return false;
                }
                index + 1
            }
        };
        self.template.steps.swap(index, neighbor);
        self.template.steps[index].order = index as u32;
        self.template.steps[neighbor].order = neighbor as u32;
        true
    }

    /// Write a resolved asset into the step at `index`. The uploaded
    /// file's display name becomes the caption only when the user has not
    /// already typed one.
    pub fn bind_asset(&mut self, index: usize, binding: AssetBinding) -> Result<(), ValidationError> {
        let step = self
            .template
            .steps
            .get_mut(index)
            .ok_or(ValidationError::StepOutOfRange(index))?;

        step.asset_ref = Some(binding.asset_ref);
        if step.content.trim().is_empty() {
            step.content = binding.display_name;
        }
        Ok(())
    }

    // --- Validation ---

    /// Check the draft against every submit-time invariant.
    ///
    /// Media steps may carry an empty `asset_ref` while being edited; the
    /// invariant is enforced here, on the submit path, not at step-add
    /// time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.template.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.template.name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong(MAX_NAME_LEN));
        }
        if let Some(category) = &self.template.category {
            if category.chars().count() > MAX_CATEGORY_LEN {
                return Err(ValidationError::CategoryTooLong(MAX_CATEGORY_LEN));
            }
        }
        if self.template.steps.is_empty() {
            return Err(ValidationError::NoSteps);
        }
        for (index, step) in self.template.steps.iter().enumerate() {
            if step.order != index as u32 {
                return Err(ValidationError::NonContiguousOrder {
                    expected: self.template.steps.len(),
                });
            }
            if !step.is_complete() {
                return Err(if step.kind.requires_asset() {
                    ValidationError::MissingAsset {
                        index,
                        kind: step.kind.to_string(),
                    }
                } else {
                    ValidationError::EmptyContent { index }
                });
            }
        }
        Ok(())
    }

    fn renumber(&mut self) {
        for (i, step) in self.template.steps.iter_mut().enumerate() {
            step.order = i as u32;
        }
    }
}

impl Default for TemplateDraft {
    fn default() -> Self {
        Self::new()
    }
}
