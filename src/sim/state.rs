//! Game state and level bookkeeping
//!
//! Everything the frame tick reads or writes lives here. A level reload is a
//! plain replacement of [`LevelState`] that also zeroes the per-level
//! counters in [`RunState`]. The level index and death count survive it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clouds::{CLOUD_COUNT, Clouds};
use super::effects::Effects;
use super::machine::Machine;
use super::player::Player;
use super::rect::Rect;
use super::soda::Soda;
use super::tilemap::{TileKind, Tilemap};
use super::water::Water;
use crate::assets::AssetLibrary;
use crate::consts::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::persistence::{LevelStore, LoadError};

/// Transition counter value at the start of a level (fully faded out)
pub const TRANSITION_START: f32 = -30.0;
/// Transition counter value that swaps in the next level
pub const TRANSITION_END: f32 = 30.0;
/// Fade-in speed per frame
pub const FADE_IN_STEP: f32 = 0.25;
/// Death counter value from which the screen fades out
pub const DEATH_FADE_FRAMES: u32 = 10;
/// Death counter value past which the level reloads
pub const DEATH_RELOAD_FRAMES: u32 = 40;
/// Shake applied by a death or a smashed machine
pub const IMPACT_SHAKE: f32 = 16.0;

/// Large decor variant that sheds leaves
const TREE_VARIANT: u32 = 2;
/// Spawner variants: 0 places the player, 1 places a machine
const PLAYER_SPAWNER: u32 = 0;
const MACHINE_SPAWNER: u32 = 1;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Normal play
    Playing,
    /// Death counter running; the player is frozen
    Dying,
    /// Fading in or out around a level load; the banner replaces the HUD
    Transitioning,
}

/// Counters that outlive a single level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunState {
    pub level_index: usize,
    /// Milliliters collected
    pub score: f64,
    /// Machines smashed
    pub destroyed: u32,
    pub deaths: u32,
}

/// Everything created fresh by a level load
#[derive(Debug, Clone)]
pub struct LevelState {
    pub tilemap: Tilemap,
    /// Tree canopies that drop leaves
    pub leaf_spawners: Vec<Rect>,
    pub machines: Vec<Machine>,
    pub bottles: Vec<Water>,
    pub sodas: Vec<Soda>,
    pub effects: Effects,
    /// Player start position
    pub spawn: Vec2,
    /// Camera position (top-left of the view in world units)
    pub scroll: Vec2,
    /// 0 while alive, otherwise frames since death
    pub dead: u32,
    /// Negative while fading in, positive while fading out
    pub transition: f32,
    /// Score for each bottle; 0 when the level has none
    pub score_per_bottle: f64,
}

impl LevelState {
    /// Consume the markers of a freshly loaded tilemap into entities and
    /// place the player on its spawner
    pub fn load(
        mut tilemap: Tilemap,
        liters: f64,
        player: &mut Player,
        assets: &AssetLibrary,
    ) -> Self {
        let leaf_spawners = tilemap
            .extract(&[(TileKind::LargeDecor, TREE_VARIANT)], true)
            .into_iter()
            .map(|tree| Rect::new(tree.pos.x + 4.0, tree.pos.y + 4.0, 23.0, 13.0))
            .collect();

        let mut spawn = None;
        let mut machines = Vec::new();
        let spawners = tilemap.extract(
            &[
                (TileKind::Spawners, PLAYER_SPAWNER),
                (TileKind::Spawners, MACHINE_SPAWNER),
            ],
            false,
        );
        for spawner in spawners {
            if spawner.variant != PLAYER_SPAWNER {
                machines.push(Machine::new(spawner.pos, assets));
            } else if spawn.is_none() {
                spawn = Some(spawner.pos);
            } else {
                log::warn!("Ignoring extra player spawner at {:?}", spawner.pos);
            }
        }

        let spawn = spawn.unwrap_or_else(|| {
            log::warn!("Level has no player spawner; keeping {:?}", player.body.pos);
            player.body.pos
        });
        player.respawn(spawn);

        let bottles: Vec<Water> = tilemap
            .extract(&[(TileKind::Water, 0)], false)
            .into_iter()
            .map(|bottle| Water::new(bottle.pos, assets))
            .collect();
        let score_per_bottle = if bottles.is_empty() {
            0.0
        } else {
            liters / bottles.len() as f64
        };

        Self {
            tilemap,
            leaf_spawners,
            machines,
            bottles,
            sodas: Vec::new(),
            effects: Effects::default(),
            spawn,
            scroll: Vec2::ZERO,
            dead: 0,
            transition: TRANSITION_START,
            score_per_bottle,
        }
    }

    /// Nothing left to smash or collect
    pub fn is_cleared(&self) -> bool {
        self.machines.is_empty() && self.bottles.is_empty()
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Liters shared out across each level's bottles
    pub liters: f64,
    pub view_size: Vec2,
    /// When false the shake counter still runs but the jitter is zero
    pub screen_shake_enabled: bool,
    pub run: RunState,
    pub level: LevelState,
    pub player: Player,
    pub clouds: Clouds,
    /// Horizontal intent (-1, 0, 1) applied on the next player update
    pub movement: f32,
    /// Jitter magnitude in pixels; decays by 1 per frame
    pub screenshake: f32,
}

impl GameState {
    /// Create a new game on level 0
    pub fn new(
        seed: u64,
        liters: f64,
        levels: &dyn LevelStore,
        assets: &AssetLibrary,
    ) -> Result<Self, LoadError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = Clouds::new(assets.images("clouds"), CLOUD_COUNT, &mut rng);
        let mut player = Player::new(Vec2::ZERO, assets);
        let level = LevelState::load(levels.load(0)?, liters, &mut player, assets);
        log::info!("Starting run with seed {seed} on level 0 of {}", levels.level_count());

        Ok(Self {
            seed,
            rng,
            time_ticks: 0,
            liters,
            view_size: Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
            screen_shake_enabled: true,
            run: RunState::default(),
            level,
            player,
            clouds,
            movement: 0.0,
            screenshake: 0.0,
        })
    }

    pub fn phase(&self) -> GamePhase {
        if self.level.dead > 0 {
            GamePhase::Dying
        } else if self.level.transition != 0.0 {
            GamePhase::Transitioning
        } else {
            GamePhase::Playing
        }
    }

    /// Replace the level with a fresh load of `index`
    pub fn load_level(
        &mut self,
        index: usize,
        levels: &dyn LevelStore,
        assets: &AssetLibrary,
    ) -> Result<(), LoadError> {
        let tilemap = levels.load(index)?;
        self.level = LevelState::load(tilemap, self.liters, &mut self.player, assets);
        self.run.level_index = index;
        self.run.score = 0.0;
        self.run.destroyed = 0;
        log::info!(
            "Loaded level {index}: {} machines, {} bottles",
            self.level.machines.len(),
            self.level.bottles.len()
        );
        Ok(())
    }

    /// Start the death sequence and shake the screen; returns false if it
    /// was already running
    pub fn kill_player(&mut self) -> bool {
        if self.level.dead > 0 {
            return false;
        }
        self.level.dead = 1;
        self.run.deaths += 1;
        self.shake(IMPACT_SHAKE);
        log::info!("Player died on level {} (death #{})", self.run.level_index, self.run.deaths);
        true
    }

    /// Raise the shake to at least `amount`
    pub fn shake(&mut self, amount: f32) {
        self.screenshake = self.screenshake.max(amount);
    }
}
