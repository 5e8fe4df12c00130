//! Implements InputPort. Inquire-based interactive views.
//!
//! Main menu routes between the Timeline view and the Image Editor view. Each view
//! owns its own state; one request is in flight at a time.

use crate::adapters::persistence::ImageStore;
use crate::adapters::ui::progress::Spinner;
use crate::adapters::ui::render;
use crate::domain::{DomainError, ImageEditState, TimelineEvent, Topic};
use crate::ports::InputPort;
use crate::usecases::{ImageEditService, TimelineForm, TimelineService};
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{MultiSelect, Select, Text};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const MENU_TIMELINE: &str = "Timeline: what changed since I was born";
const MENU_EDITOR: &str = "Image Editor";
const MENU_QUIT: &str = "Quit";

const EDIT_AGAIN: &str = "Edit again";
const EDIT_NEW_IMAGE: &str = "Load another image";
const EDIT_RESET: &str = "Reset";
const BACK: &str = "Back";

const EMPTY_PROMPT_MESSAGE: &str = "Please describe how to edit the image.";

/// Applies a global inquire theme matching the banner.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("▶").with_fg(Color::LightYellow));
    inquire::set_global_render_config(config);
}

/// Cancelled prompts (Esc / Ctrl-C) mean "go back", not failure.
fn prompt_result<T>(res: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    timeline: Arc<TimelineService>,
    editor: Arc<ImageEditService>,
    store: Arc<ImageStore>,
}

impl TuiInputPort {
    pub fn new(
        timeline: Arc<TimelineService>,
        editor: Arc<ImageEditService>,
        store: Arc<ImageStore>,
    ) -> Self {
        Self {
            timeline,
            editor,
            store,
        }
    }

    fn ask_timeline_form(&self) -> Result<Option<TimelineForm>, DomainError> {
        let Some(birth_year) = prompt_result(
            Text::new("Birth year:")
                .with_help_message("1900 - present")
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(country) = prompt_result(
            Text::new("Country (optional):")
                .with_help_message("Leave empty for a global perspective")
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(search_term) = prompt_result(
            Text::new("Track one thing (optional):")
                .with_help_message("e.g. 'dinosaurs', 'coffee'. Overrides country and topics")
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        let topics = if search_term.trim().is_empty() {
            let Some(topics) = prompt_result(
                MultiSelect::new("Topics (none = diverse mix):", Topic::ALL.to_vec()).prompt(),
            )?
            else {
                return Ok(None);
            };
            topics
        } else {
            Vec::new()
        };

        Ok(Some(TimelineForm {
            birth_year,
            country,
            topics,
            search_term,
        }))
    }

    /// Timeline view. Returns an editor prompt when the user picks "visualize".
    async fn run_timeline(&self) -> Result<Option<String>, DomainError> {
        let Some(form) = self.ask_timeline_form()? else {
            return Ok(None);
        };
        let query = match TimelineService::validate(&form) {
            Ok(q) => q,
            Err(e) => {
                render::print_error(&e.to_string());
                return Ok(None);
            }
        };

        let spinner = Spinner::start("Consulting the archives...");
        let result = self.timeline.generate(&query).await;
        let response = match result {
            Ok(r) => {
                spinner.finish_ok("Timeline ready");
                r.into_response()
            }
            Err(e) => {
                spinner.finish_err();
                debug!(error = %e, "timeline view error");
                render::print_error(TimelineService::FAILURE_MESSAGE);
                return Ok(None);
            }
        };

        render::print_timeline(&response);
        self.offer_visualize(&response.events)
    }

    fn offer_visualize(&self, events: &[TimelineEvent]) -> Result<Option<String>, DomainError> {
        let legends: Vec<&TimelineEvent> = events.iter().filter(|e| e.is_mystical()).collect();
        if legends.is_empty() {
            return Ok(None);
        }
        let mut options: Vec<String> = legends
            .iter()
            .map(|e| format!("Visualize ({}): {}", e.year, e.original_belief))
            .collect();
        options.push(BACK.to_string());

        let Some(choice) =
            prompt_result(Select::new("Visualize a legend?", options.clone()).prompt())?
        else {
            return Ok(None);
        };
        Ok(options
            .iter()
            .position(|o| *o == choice)
            .and_then(|i| legends.get(i))
            .map(|e| e.visualize_prompt()))
    }

    /// Ask for an image file until one loads. Returns false if the user backs out.
    async fn load_image(&self, state: &mut ImageEditState) -> Result<bool, DomainError> {
        loop {
            let Some(path) = prompt_result(
                Text::new("Image path:")
                    .with_help_message("png, jpg, jpeg, webp or gif")
                    .prompt(),
            )?
            else {
                return Ok(false);
            };
            match self.store.load_data_url(&PathBuf::from(path.trim())).await {
                Ok(url) => {
                    state.load_image(url);
                    return Ok(true);
                }
                Err(e) => {
                    state.error = Some(e.to_string());
                    render::print_error(&e.to_string());
                }
            }
        }
    }

    /// Image editor view. `initial_prompt` pre-fills the instruction.
    async fn run_editor(&self, initial_prompt: String) -> Result<(), DomainError> {
        let mut state = ImageEditState::with_prompt(initial_prompt);

        loop {
            if state.original_image.is_none() && !self.load_image(&mut state).await? {
                return Ok(());
            }

            let Some(instruction) = prompt_result(
                Text::new("Describe the edit:")
                    .with_initial_value(&state.prompt)
                    .with_help_message("e.g. 'Add a retro filter', 'Make it look like a sketch'")
                    .prompt(),
            )?
            else {
                return Ok(());
            };
            state.prompt = instruction;

            if state.prompt.trim().is_empty() {
                state.error = Some(EMPTY_PROMPT_MESSAGE.to_string());
                render::print_error(EMPTY_PROMPT_MESSAGE);
                continue;
            }

            if let Some(original) = state.original_image.clone() {
                state.begin();
                let spinner = Spinner::start("Editing image...");
                let outcome = self.editor.edit(&original, &state.prompt).await;
                match &outcome {
                    Ok(generated) => {
                        spinner.finish_ok("Image ready");
                        match self.store.save_data_url(generated).await {
                            Ok(path) => println!("Saved edited image to {}", path.display()),
                            Err(e) => render::print_error(&e.to_string()),
                        }
                    }
                    Err(_) => spinner.finish_err(),
                }
                state.finish(outcome);
                if let Some(err) = state.error.as_deref() {
                    render::print_error(err);
                }
            }

            let options = vec![EDIT_AGAIN, EDIT_NEW_IMAGE, EDIT_RESET, BACK];
            match prompt_result(Select::new("Next:", options).prompt())? {
                Some(EDIT_AGAIN) => {}
                Some(EDIT_NEW_IMAGE) => state.original_image = None,
                Some(EDIT_RESET) => state.reset(),
                _ => return Ok(()),
            }
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let options = vec![MENU_TIMELINE, MENU_EDITOR, MENU_QUIT];
            let choice =
                prompt_result(Select::new("What would you like to do?", options).prompt())?;
            match choice {
                Some(MENU_TIMELINE) => {
                    if let Some(prompt) = self.run_timeline().await? {
                        self.run_editor(prompt).await?;
                    }
                }
                Some(MENU_EDITOR) => self.run_editor(String::new()).await?,
                _ => return Ok(()),
            }
        }
    }
}
