//! Top-level game: simulation state plus the collaborators it loads from
//!
//! [`Game::step`] is the scheduling boundary. The host calls it once per
//! tick with that tick's input events and presents the returned frame; the
//! simulation never blocks or sleeps.

use glam::Vec2;
use thiserror::Error;

use crate::assets::{AssetError, AssetLibrary, AssetProvider};
use crate::persistence::{LevelStore, LoadError};
use crate::platform::{InputEvent, InputState};
use crate::renderer::Frame;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, tick};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("malformed asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub struct Game {
    state: GameState,
    levels: Box<dyn LevelStore>,
    assets: AssetLibrary,
    input: InputState,
}

impl Game {
    /// Validate assets and every level up front, then start on level 0
    pub fn new(
        settings: &Settings,
        levels: Box<dyn LevelStore>,
        provider: &dyn AssetProvider,
    ) -> Result<Self, GameError> {
        let assets = AssetLibrary::load(provider)?;

        let count = levels.level_count();
        if count == 0 {
            return Err(LoadError::NoLevels.into());
        }
        for index in 0..count {
            levels.load(index)?;
        }
        log::info!("Validated {count} levels");

        let mut state = GameState::new(settings.seed, settings.liters, levels.as_ref(), &assets)?;
        state.screen_shake_enabled = settings.effective_screen_shake();
        state.view_size = Vec2::new(settings.display_width as f32, settings.display_height as f32);

        Ok(Self {
            state,
            levels,
            assets,
            input: InputState::default(),
        })
    }

    /// Run one tick with this frame's input events
    pub fn step(&mut self, events: &[InputEvent]) -> Result<Frame, GameError> {
        let input = self.input.frame_input(events);
        let frame = tick(&mut self.state, &input, self.levels.as_ref(), &self.assets)?;
        if frame.quit {
            log::info!("Quit requested after {} ticks", self.state.time_ticks);
        }
        Ok(frame)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }
}
