use iced::widget::{button, column, row, text, text_input, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod config;
mod error;
mod gemini;
mod ingest;
mod state;
mod ui;

use error::EditError;
use gemini::GeminiClient;
use state::data::{EditedImage, SourceImage, EDITED_FILENAME};
use state::status::OperationStatus;

/// Maximum prompt length in characters
const PROMPT_MAX: usize = 1000;

/// Main application state
struct PromptEditor {
    /// Client for the Gemini image editing endpoint
    client: GeminiClient,
    /// The currently selected source image
    source: Option<SourceImage>,
    /// The AI-edited result, if the last request succeeded
    edited: Option<EditedImage>,
    /// The edit description typed by the user
    prompt: String,
    /// Lifecycle of the current edit request
    operation: OperationStatus,
    /// Status line for save results and general notes
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the image pick button
    PickImage,
    /// Background file load completed
    ImageLoaded(Result<SourceImage, EditError>),
    /// User typed in the prompt field
    PromptChanged(String),
    /// User clicked the submit button
    Submit,
    /// The edit request completed
    EditFinished(Result<EditedImage, EditError>),
    /// User clicked save on the original pane
    SaveOriginal,
    /// User clicked save on the edited pane
    SaveEdited,
    /// Background save completed with the written path or an error
    SaveFinished(Result<String, String>),
}

impl PromptEditor {
    /// Create a new instance of the application
    fn new(config: config::AppConfig) -> (Self, Task<Message>) {
        log::info!("starting with model {}", config.model);

        (
            PromptEditor {
                client: GeminiClient::new(config.api_key, config.model),
                source: None,
                edited: None,
                prompt: String::new(),
                operation: OperationStatus::Idle,
                status: String::from("Ready."),
            },
            Task::none(),
        )
    }

    /// Submit is allowed only with an image, a non-empty prompt, and no
    /// request already in flight
    fn can_submit(&self) -> bool {
        self.source.is_some()
            && !self.prompt.trim().is_empty()
            && !self.operation.is_in_flight()
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                // Show the native file picker, filtered to images
                let file = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", ingest::IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    return Task::perform(
                        ingest::load_source_image(path),
                        Message::ImageLoaded,
                    );
                }

                Task::none()
            }
            Message::ImageLoaded(Ok(source)) => {
                self.status = format!("Selected {}.", source.filename);
                self.source = Some(source);
                // A new source invalidates the previous result and error
                self.edited = None;
                self.operation = OperationStatus::Idle;
                Task::none()
            }
            Message::ImageLoaded(Err(error)) => {
                // Prior source and result stay untouched
                log::warn!("ingest failed: {}", error);
                self.operation = OperationStatus::Failed(error.to_string());
                Task::none()
            }
            Message::PromptChanged(value) => {
                self.prompt = clamp_prompt(value);
                Task::none()
            }
            Message::Submit => {
                let Some(source) = self.source.clone() else {
                    self.operation =
                        OperationStatus::Failed(EditError::MissingInput.to_string());
                    return Task::none();
                };
                if self.prompt.trim().is_empty() || self.operation.is_in_flight() {
                    self.operation =
                        OperationStatus::Failed(EditError::MissingInput.to_string());
                    return Task::none();
                }

                self.edited = None;
                self.operation = OperationStatus::InFlight;
                self.status = String::from("Sending edit request...");

                let client = self.client.clone();
                let prompt = self.prompt.clone();

                Task::perform(
                    async move { client.edit_image(&prompt, &source).await },
                    Message::EditFinished,
                )
            }
            Message::EditFinished(Ok(edited)) => {
                self.edited = Some(edited);
                self.operation = OperationStatus::Succeeded;
                self.status = String::from("Edit complete.");
                Task::none()
            }
            Message::EditFinished(Err(error)) => {
                log::error!("edit failed: {}", error);
                self.operation = OperationStatus::Failed(error.to_string());
                self.status = String::from("Ready.");
                Task::none()
            }
            Message::SaveOriginal => {
                let Some(source) = &self.source else {
                    return Task::none();
                };
                save_with_dialog(source.download_name(), source.bytes.clone())
            }
            Message::SaveEdited => {
                let Some(edited) = &self.edited else {
                    return Task::none();
                };
                save_with_dialog(EDITED_FILENAME.to_string(), edited.bytes.clone())
            }
            Message::SaveFinished(Ok(path)) => {
                log::info!("saved {}", path);
                self.status = format!("Saved to {}.", path);
                Task::none()
            }
            Message::SaveFinished(Err(message)) => {
                log::warn!("save failed: {}", message);
                self.status = format!("Could not save: {}", message);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let in_flight = self.operation.is_in_flight();

        let pick_label = if self.source.is_some() {
            "Change Image"
        } else {
            "Select an Image"
        };

        let submit_label = if in_flight {
            "Generating..."
        } else {
            "Apply AI Edit"
        };

        let mut controls: Column<Message> = column![
            text("AI Photo Editor").size(28),
            button(pick_label)
                .on_press(Message::PickImage)
                .padding(10),
        ]
        .spacing(12)
        .padding(20)
        .width(Length::Fixed(340.0));

        if let Some(source) = &self.source {
            controls = controls.push(text(format!("Selected: {}", source.filename)).size(12));
        }

        controls = controls
            .push(
                text_input(
                    "e.g., 'make the sky look like a galaxy'",
                    &self.prompt,
                )
                .on_input(Message::PromptChanged)
                .padding(10),
            )
            .push(text(format!("{} / {}", self.prompt.chars().count(), PROMPT_MAX)).size(12))
            .push(
                button(submit_label)
                    .on_press_maybe(self.can_submit().then_some(Message::Submit))
                    .padding(12),
            );

        if let Some(message) = self.operation.error() {
            controls = controls.push(text(message.to_string()).size(14).style(text::danger));
        }

        controls = controls.push(text(&self.status).size(12));

        let edited_hint = if in_flight {
            "Generating..."
        } else {
            "Your edited image will appear here."
        };

        let panes = row![
            ui::panes::image_pane(
                "Original",
                self.source.as_ref().map(|s| s.bytes.as_slice()),
                "Upload an image to get started.",
                Message::SaveOriginal,
                false,
            ),
            ui::panes::image_pane(
                "Edited",
                self.edited.as_ref().map(|e| e.bytes.as_slice()),
                edited_hint,
                Message::SaveEdited,
                in_flight,
            ),
        ]
        .spacing(10);

        row![controls, panes]
            .align_y(Alignment::Start)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Clamp the prompt to the maximum length, counting characters
fn clamp_prompt(value: String) -> String {
    if value.chars().count() <= PROMPT_MAX {
        value
    } else {
        value.chars().take(PROMPT_MAX).collect()
    }
}

/// Ask for a destination via the native save dialog, then write async
fn save_with_dialog(suggested_name: String, bytes: Vec<u8>) -> Task<Message> {
    let destination = FileDialog::new()
        .set_title("Save Image")
        .set_file_name(&suggested_name)
        .save_file();

    let Some(path) = destination else {
        return Task::none();
    };

    Task::perform(write_image(path, bytes), Message::SaveFinished)
}

/// Write image bytes to disk, reporting the path written
async fn write_image(path: PathBuf, bytes: Vec<u8>) -> Result<String, String> {
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| e.to_string())?;
    Ok(path.display().to_string())
}

fn main() -> iced::Result {
    dotenvy::dotenv().ok();
    env_logger::init();

    // The credential is required before the UI ever starts
    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("❌ {}", message);
            eprintln!("   Set it in the environment or in a .env file.");
            std::process::exit(1);
        }
    };

    iced::application(
        "AI Photo Editor",
        PromptEditor::update,
        PromptEditor::view,
    )
    .theme(PromptEditor::theme)
    .centered()
    .run_with(move || PromptEditor::new(config.clone()))
}
