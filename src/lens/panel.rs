//! Interactive address panel
//!
//! A [`Panel`] is the state behind one input mode's view: the input text,
//! the outcome of the last generate action, and a [`Pager`] over the
//! resulting addresses. Every user action is a [`PanelCommand`] handed to
//! [`Panel::dispatch`]; the front end only renders [`Panel::view`].
//!
//! ```text
//! Idle --generate--> Resolving --ok--> Geocoding --addresses--> Displaying
//!                        |                 |
//!                        +-----error-------+------empty------> Failed
//! any state --reset--> Idle
//! ```
//!
//! A [`Workbench`] holds one panel per mode, like tabs in a window.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::lens::address::{AddressError, AddressLens, Coordinate, InputMode};
use crate::lens::pager::Pager;

/// Where a panel is in its generate cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Resolving,
    Geocoding,
    Displaying,
    Failed(AddressError),
}

impl PanelState {
    pub fn name(&self) -> &'static str {
        match self {
            PanelState::Idle => "idle",
            PanelState::Resolving => "resolving",
            PanelState::Geocoding => "geocoding",
            PanelState::Displaying => "displaying",
            PanelState::Failed(_) => "failed",
        }
    }
}

/// A discrete user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    /// Replace the input text (typing)
    Input(String),
    /// Replace the input text with pasted clipboard content
    Paste(String),
    /// Run the resolve + reverse geocode pipeline on the current input
    Generate,
    /// Show the next address
    Next,
    /// Show the previous address
    Previous,
    /// Clear everything and return to idle
    Reset,
}

/// Visual treatment of the result text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Success,
    Error,
}

/// Everything a front end needs to draw a panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub mode: InputMode,
    pub title: &'static str,
    pub prompt: &'static str,
    pub input: String,
    pub state: &'static str,
    pub count: usize,
    pub count_label: String,
    pub index_label: String,
    pub message: String,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

pub struct Panel<'a> {
    mode: InputMode,
    lens: AddressLens<'a>,
    input: String,
    state: PanelState,
    pager: Pager,
    coordinate: Option<Coordinate>,
}

impl<'a> Panel<'a> {
    pub fn new(mode: InputMode, lens: AddressLens<'a>) -> Self {
        Self {
            mode,
            lens,
            input: String::new(),
            state: PanelState::Idle,
            pager: Pager::default(),
            coordinate: None,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Handle one user action.
    ///
    /// Errors report why a paste or generate was rejected; the panel state
    /// already reflects the failure when one is returned.
    pub fn dispatch(&mut self, command: PanelCommand) -> Result<(), AddressError> {
        self.dispatch_with_rng(command, &mut rand::rng())
    }

    /// [`Panel::dispatch`] with a caller-supplied RNG for postal sampling
    pub fn dispatch_with_rng<R: Rng + ?Sized>(
        &mut self,
        command: PanelCommand,
        rng: &mut R,
    ) -> Result<(), AddressError> {
        match command {
            PanelCommand::Input(text) => {
                self.input = text;
                Ok(())
            }
            PanelCommand::Paste(text) => self.paste(&text),
            PanelCommand::Generate => self.generate(rng),
            PanelCommand::Next => {
                if self.state == PanelState::Displaying {
                    self.pager.advance();
                }
                Ok(())
            }
            PanelCommand::Previous => {
                if self.state == PanelState::Displaying {
                    self.pager.retreat();
                }
                Ok(())
            }
            PanelCommand::Reset => {
                self.reset();
                Ok(())
            }
        }
    }

    fn paste(&mut self, text: &str) -> Result<(), AddressError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AddressError::EmptyPaste);
        }
        self.input = text.to_string();
        Ok(())
    }

    fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), AddressError> {
        self.pager.clear();
        self.coordinate = None;

        self.state = PanelState::Resolving;
        debug!("[{}] resolving {:?}", self.mode, self.input);
        let coordinate = match self
            .lens
            .resolver()
            .resolve_with_rng(self.mode, &self.input, rng)
        {
            Ok(c) => c,
            Err(e) => return self.fail(e),
        };
        self.coordinate = Some(coordinate);

        self.state = PanelState::Geocoding;
        debug!("[{}] reverse geocoding {}", self.mode, coordinate);
        let addresses = self.lens.reverse_geocoder().addresses(coordinate);
        if addresses.is_empty() {
            return self.fail(AddressError::NoAddresses);
        }

        info!(
            "[{}] found {} addresses for {}",
            self.mode,
            addresses.len(),
            self.input.trim()
        );
        self.pager.reset(addresses);
        self.state = PanelState::Displaying;
        Ok(())
    }

    fn fail(&mut self, error: AddressError) -> Result<(), AddressError> {
        info!("[{}] generate failed: {}", self.mode, error);
        self.pager.clear();
        self.state = PanelState::Failed(error);
        Err(error)
    }

    fn reset(&mut self) {
        self.input.clear();
        self.pager.clear();
        self.coordinate = None;
        self.state = PanelState::Idle;
    }

    pub fn view(&self) -> PanelView {
        let displaying = self.state == PanelState::Displaying;
        let count = if displaying { self.pager.len() } else { 0 };

        let (message, tone) = match self.state {
            PanelState::Displaying => (
                self.pager.current().cloned().unwrap_or_default(),
                Tone::Success,
            ),
            PanelState::Failed(e) => (e.status_message().to_string(), Tone::Error),
            _ => (String::new(), Tone::Neutral),
        };

        let index_label = if displaying {
            format!("Address {} of {}", self.pager.position() + 1, count)
        } else {
            String::new()
        };

        PanelView {
            mode: self.mode,
            title: self.mode.title(),
            prompt: self.mode.prompt(),
            input: self.input.clone(),
            state: self.state.name(),
            count,
            count_label: format!("Found: {} addresses", count),
            index_label,
            message,
            tone,
            coordinate: self.coordinate.filter(|_| displaying),
            prev_enabled: displaying && self.pager.has_previous(),
            next_enabled: displaying && self.pager.has_next(),
        }
    }
}

/// One panel per input mode, with one of them active
pub struct Workbench<'a> {
    ip: Panel<'a>,
    postal: Panel<'a>,
    active: InputMode,
}

impl<'a> Workbench<'a> {
    /// Both panels share the same lens configuration
    pub fn new(lens: impl Fn() -> AddressLens<'a>) -> Self {
        Self {
            ip: Panel::new(InputMode::Ip, lens()),
            postal: Panel::new(InputMode::Postal, lens()),
            active: InputMode::Ip,
        }
    }

    pub fn active_mode(&self) -> InputMode {
        self.active
    }

    /// Switch tabs; each panel keeps its own state
    pub fn switch(&mut self, mode: InputMode) {
        self.active = mode;
    }

    pub fn panel(&self, mode: InputMode) -> &Panel<'a> {
        match mode {
            InputMode::Ip => &self.ip,
            InputMode::Postal => &self.postal,
        }
    }

    pub fn active(&self) -> &Panel<'a> {
        self.panel(self.active)
    }

    pub fn active_mut(&mut self) -> &mut Panel<'a> {
        match self.active {
            InputMode::Ip => &mut self.ip,
            InputMode::Postal => &mut self.postal,
        }
    }

    /// Send a command to the active panel
    pub fn dispatch(&mut self, command: PanelCommand) -> Result<(), AddressError> {
        self.active_mut().dispatch(command)
    }
}
