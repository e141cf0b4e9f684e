//! StudioApp: the TEA model.
//!
//! All state lives here. Update receives TuiMessages, mutates state.
//! View reads state to produce ratatui widgets. No side effects in view.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use tui_menu::{MenuItem, MenuState};

use crate::config::StudioConfig;
use crate::generation::copy::CopyIndicator;
use crate::generation::panel::{PanelReceiver, PanelUpdate};
use crate::generation::{
    ContentType, GenerationBackend, GenerationError, ImageFlavor, MockImageBackend,
    MockTextBackend, Panel, TextFlavor,
};
use crate::shell::{ActiveTab, Shell};
use crate::sinks::{ClipboardSink, HttpExporter, ImageExporter, Osc52Clipboard};

use super::dashboard::format_bytes;
use super::event::TuiMessage;
use super::prompt::PromptInput;

/// Actions that can be triggered from the menu bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    SwitchTab(ActiveTab),
    ToggleDarkMode,
    Generate,
    Copy,
    Download,
    ShowShortcuts,
    Quit,
}

/// Everything the panels talk to. Swapped for fakes in tests.
pub struct StudioServices {
    pub image_backend: Arc<dyn GenerationBackend<ImageFlavor>>,
    pub text_backend: Arc<dyn GenerationBackend<TextFlavor>>,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub exporter: Arc<dyn ImageExporter>,
    pub copied_display: Duration,
}

impl StudioServices {
    /// Mock backends, terminal clipboard and HTTP export, tuned by config.
    pub fn from_config(config: &StudioConfig) -> Self {
        Self {
            image_backend: Arc::new(MockImageBackend::new(
                config.latency(),
                config.image_base_url.clone(),
            )),
            text_backend: Arc::new(MockTextBackend::new(config.latency())),
            clipboard: Arc::new(Osc52Clipboard),
            exporter: Arc::new(HttpExporter::new(config.download_dir())),
            copied_display: config.copied_display(),
        }
    }
}

/// Receivers for panel events, drained by the runner.
pub struct PanelChannels {
    pub image: PanelReceiver<ImageFlavor>,
    pub text: PanelReceiver<TextFlavor>,
}

/// Build the menu item tree for the menu bar.
pub fn build_menu_items() -> Vec<MenuItem<MenuAction>> {
    vec![
        MenuItem::group(
            "File",
            vec![
                MenuItem::item("Generate    ⏎", MenuAction::Generate),
                MenuItem::item("Download   ^S", MenuAction::Download),
                MenuItem::item("Copy       ^Y", MenuAction::Copy),
                MenuItem::item("Quit       ^C", MenuAction::Quit),
            ],
        ),
        MenuItem::group(
            "View",
            vec![
                MenuItem::item("Image Generator", MenuAction::SwitchTab(ActiveTab::Image)),
                MenuItem::item("Text Generator", MenuAction::SwitchTab(ActiveTab::Text)),
                MenuItem::item("Dark Mode  ^D", MenuAction::ToggleDarkMode),
            ],
        ),
        MenuItem::group(
            "Help",
            vec![MenuItem::item("Shortcuts  F1", MenuAction::ShowShortcuts)],
        ),
    ]
}

/// The main TUI application state (TEA model).
pub struct StudioApp {
    /// Active tab + dark mode.
    pub shell: Shell,
    pub image: Panel<ImageFlavor>,
    pub text: Panel<TextFlavor>,
    pub image_prompt: PromptInput,
    pub text_prompt: PromptInput,
    /// Selected template for the text generator.
    pub content_type: ContentType,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// One-line message for the status bar.
    pub status: Option<String>,
    /// Menu bar state (tui-menu).
    pub menu_state: MenuState<MenuAction>,
    /// Whether the menu bar has keyboard focus (dropdowns visible).
    pub menu_active: bool,
    /// Shortcuts overlay visible.
    pub show_help: bool,
    /// Animation tick counter.
    pub tick: u64,
    clipboard: Arc<dyn ClipboardSink>,
    exporter: Arc<dyn ImageExporter>,
}

impl StudioApp {
    /// Create the app and the channels its panels report on.
    pub fn new(shell: Shell, services: StudioServices) -> anyhow::Result<(Self, PanelChannels)> {
        let (image, image_rx) = Panel::new(services.image_backend);
        let (text, text_rx) = Panel::with_copy_indicator(
            services.text_backend,
            CopyIndicator::new(services.copied_display),
        );
        let app = Self {
            shell,
            image,
            text,
            image_prompt: PromptInput::new()?,
            text_prompt: PromptInput::new()?,
            content_type: ContentType::default(),
            should_quit: false,
            status: None,
            menu_state: MenuState::new(build_menu_items()),
            menu_active: false,
            show_help: false,
            tick: 0,
            clipboard: services.clipboard,
            exporter: services.exporter,
        };
        let channels = PanelChannels {
            image: image_rx,
            text: text_rx,
        };
        Ok((app, channels))
    }

    /// Handle a TUI message (TEA update).
    pub fn update(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Input(key) => {
                super::input::handle_key(self, key);
            }
            TuiMessage::Image(event) => {
                let update = self.image.handle_event(event);
                self.apply_panel_update(update);
            }
            TuiMessage::Text(event) => {
                let update = self.text.handle_event(event);
                self.apply_panel_update(update);
            }
            TuiMessage::Tick => {
                self.tick = self.tick.wrapping_add(1);
            }
            TuiMessage::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn apply_panel_update(&mut self, update: PanelUpdate) {
        match update {
            PanelUpdate::Exported(Ok(receipt)) => {
                self.status = Some(format!(
                    "Saved {} ({})",
                    receipt.path.display(),
                    format_bytes(receipt.bytes)
                ));
            }
            PanelUpdate::Exported(Err(e)) => {
                self.status = Some(format!("Download failed: {e}"));
            }
            PanelUpdate::Settled | PanelUpdate::CopyCleared | PanelUpdate::Ignored => {}
        }
    }

    /// The prompt buffer of the visible tab.
    pub fn active_prompt_mut(&mut self) -> &mut PromptInput {
        match self.shell.active_tab() {
            ActiveTab::Image => &mut self.image_prompt,
            ActiveTab::Text => &mut self.text_prompt,
        }
    }

    /// Submit the visible tab's prompt.
    pub fn submit_active(&mut self) {
        let outcome = match self.shell.active_tab() {
            ActiveTab::Image => self.image.submit(&self.image_prompt.text(), ()),
            ActiveTab::Text => self.text.submit(&self.text_prompt.text(), self.content_type),
        };
        match outcome {
            Ok(ticket) => {
                info!(tab = ?self.shell.active_tab(), seq = ticket.seq(), "generation started");
                self.status = None;
            }
            Err(GenerationError::EmptyPrompt) => {
                debug!(tab = ?self.shell.active_tab(), "empty prompt");
            }
            Err(e) => {
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        let dark = self.shell.toggle_dark_mode();
        self.status = Some(if self.shell.is_persistent() {
            format!("Dark mode {}", if dark { "on" } else { "off" })
        } else {
            format!(
                "Dark mode {} (not saved: storage unavailable)",
                if dark { "on" } else { "off" }
            )
        });
    }

    pub fn cycle_content_type(&mut self) {
        self.content_type = self.content_type.next();
    }

    /// Copy the generated text. No-op without a result.
    pub fn copy_result(&mut self) {
        if self.text.copy_result(self.clipboard.as_ref()) {
            self.status = Some("Copied to clipboard".into());
        }
    }

    /// Download the generated image. No-op without a result.
    pub fn export_result(&mut self) {
        if self.image.export_result(Arc::clone(&self.exporter)) {
            self.status = Some("Downloading image...".into());
        }
    }

    /// Run a menu bar action.
    pub fn apply_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::SwitchTab(tab) => self.shell.set_active_tab(tab),
            MenuAction::ToggleDarkMode => self.toggle_dark_mode(),
            MenuAction::Generate => self.submit_active(),
            MenuAction::Copy => self.copy_result(),
            MenuAction::Download => self.export_result(),
            MenuAction::ShowShortcuts => self.show_help = true,
            MenuAction::Quit => self.should_quit = true,
        }
    }
}
