//! Fixed timestep simulation tick
//!
//! One call advances the game by one frame and composes that frame's draw
//! list. Update and draw are interleaved in a fixed order so that the draw
//! list is back to front: background, clouds, tiles, machines, bottles,
//! player, sodas, effects, HUD.

use glam::Vec2;
use rand::Rng;

use super::particle::{Particle, ParticleKind};
use super::soda::SodaOutcome;
use super::state::{
    DEATH_FADE_FRAMES, DEATH_RELOAD_FRAMES, FADE_IN_STEP, GameState, IMPACT_SHAKE, TRANSITION_END,
};
use crate::assets::AssetLibrary;
use crate::audio::SoundEffect;
use crate::consts::CAMERA_EASE;
use crate::persistence::{LevelStore, LoadError};
use crate::renderer::shapes::colors;
use crate::renderer::{DrawList, Frame};

/// A leaf drops when `random * LEAF_ODDS < canopy area`
const LEAF_ODDS: f32 = 49999.0;
const LEAF_VELOCITY: Vec2 = Vec2::new(-0.1, 0.3);

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held horizontal direction after this frame's key events (-1, 0 or 1)
    pub movement: f32,
    /// Jump key went down this frame
    pub jump: bool,
    /// Dash key went down this frame
    pub dash: bool,
    /// Quit requested
    pub quit: bool,
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    levels: &dyn LevelStore,
    assets: &AssetLibrary,
) -> Result<Frame, LoadError> {
    let mut draw = DrawList::default();
    let mut sounds = Vec::new();
    state.time_ticks += 1;

    draw.fullscreen("background", 0);
    state.screenshake = (state.screenshake - 1.0).max(0.0);

    advance_transition(state, levels, assets)?;
    advance_death(state, levels, assets)?;

    // Ease the camera toward centring the player
    let target = state.player.body.rect().center() - state.view_size / 2.0;
    state.level.scroll += (target - state.level.scroll) / CAMERA_EASE;
    let offset = state.level.scroll.trunc();

    spawn_leaves(state, assets);

    state.clouds.update();
    state.clouds.render(&mut draw, offset, state.view_size);
    state.level.tilemap.render(&mut draw, offset, state.view_size);

    let alive = state.level.dead == 0;

    // Machines
    let mut smashed = Vec::new();
    {
        let player = alive.then_some(&state.player);
        let level = &mut state.level;
        let rng = &mut state.rng;
        level.machines.retain_mut(|machine| {
            let kill = machine.update(
                &level.tilemap,
                Vec2::ZERO,
                player,
                &mut level.sodas,
                &mut level.effects,
                assets,
                rng,
            );
            machine.render(&mut draw, offset);
            if kill {
                smashed.push(machine.body.pos);
            }
            !kill
        });
    }
    for pos in smashed {
        state.run.destroyed += 1;
        state.shake(IMPACT_SHAKE);
        sounds.push(SoundEffect::Machine);
        log::info!("Machine at {pos:?} destroyed ({} total)", state.run.destroyed);
    }

    // Bottles
    let player_rect = alive.then(|| state.player.body.rect());
    let mut collected = 0;
    state.level.bottles.retain_mut(|bottle| {
        let catch = bottle.update(player_rect.as_ref());
        bottle.render(&mut draw, offset);
        if catch {
            collected += 1;
        }
        !catch
    });
    for _ in 0..collected {
        state.run.score += state.level.score_per_bottle;
        sounds.push(SoundEffect::Water);
        log::debug!("Bottle collected, score {}", state.run.score);
    }

    // Player
    if alive {
        let movement = Vec2::new(state.movement, 0.0);
        let update = state.player.update(
            &state.level.tilemap,
            movement,
            &mut state.level.effects,
            assets,
            &mut state.rng,
        );
        state.player.render(&mut draw, offset);
        if update.fell {
            log::debug!("Player fell out of the level");
            state.kill_player();
        }
    }

    // Sodas: move, draw, then resolve
    let mut hit = false;
    {
        let player = (state.level.dead == 0).then_some(&state.player);
        let level = &mut state.level;
        let rng = &mut state.rng;
        level.sodas.retain_mut(|soda| {
            soda.advance();
            soda.render(&mut draw, offset);
            let outcome = soda.resolve(&level.tilemap, player, &mut level.effects, rng);
            hit |= outcome == SodaOutcome::HitPlayer;
            !outcome.is_spent()
        });
    }
    if hit && state.kill_player() {
        sounds.push(SoundEffect::SodaHit);
        let center = state.player.body.rect().center();
        state.level.effects.impact_burst(center, assets, &mut state.rng);
    }

    state.level.effects.update_and_render(&mut draw, offset);

    apply_input(state, input, assets, &mut sounds);

    draw_overlay(state, &mut draw, assets);

    let shake_offset = if state.screenshake > 0.0 {
        let s = state.screenshake;
        let jitter = Vec2::new(
            state.rng.random::<f32>() * s - s / 2.0,
            state.rng.random::<f32>() * s - s / 2.0,
        );
        if state.screen_shake_enabled { jitter } else { Vec2::ZERO }
    } else {
        Vec2::ZERO
    };

    Ok(Frame {
        draw,
        shake_offset,
        sounds,
        quit: input.quit,
    })
}

/// Level-complete fade out, next level load, and the fade in
fn advance_transition(
    state: &mut GameState,
    levels: &dyn LevelStore,
    assets: &AssetLibrary,
) -> Result<(), LoadError> {
    if state.level.dead == 0 && state.level.is_cleared() {
        state.level.transition += 1.0;
        if state.level.transition > TRANSITION_END {
            let last = levels.level_count().saturating_sub(1);
            let next = (state.run.level_index + 1).min(last);
            log::info!("Level {} cleared, moving to {next}", state.run.level_index);
            state.load_level(next, levels, assets)?;
        }
    }
    if state.level.transition < 0.0 {
        state.level.transition += FADE_IN_STEP;
    }
    Ok(())
}

/// Run the death counter: fade out, then reload the level from scratch
fn advance_death(
    state: &mut GameState,
    levels: &dyn LevelStore,
    assets: &AssetLibrary,
) -> Result<(), LoadError> {
    if state.level.dead == 0 {
        return Ok(());
    }
    state.level.dead += 1;
    if state.level.dead >= DEATH_FADE_FRAMES {
        state.level.transition = (state.level.transition + 1.0).min(TRANSITION_END);
    }
    if state.level.dead > DEATH_RELOAD_FRAMES {
        log::info!("Respawning on level {}", state.run.level_index);
        state.load_level(state.run.level_index, levels, assets)?;
    }
    Ok(())
}

fn spawn_leaves(state: &mut GameState, assets: &AssetLibrary) {
    for canopy in &state.level.leaf_spawners {
        if state.rng.random::<f32>() * LEAF_ODDS < canopy.area() {
            let pos = Vec2::new(
                canopy.x + state.rng.random::<f32>() * canopy.w,
                canopy.y + state.rng.random::<f32>() * canopy.h,
            );
            let frame = state.rng.random_range(0..=20);
            state
                .level
                .effects
                .particles
                .push(Particle::new(ParticleKind::Leaf, pos, LEAF_VELOCITY, frame, assets));
        }
    }
}

/// Key edges arrive after the frame's updates; movement applies next frame
fn apply_input(
    state: &mut GameState,
    input: &TickInput,
    assets: &AssetLibrary,
    sounds: &mut Vec<SoundEffect>,
) {
    state.movement = input.movement.clamp(-1.0, 1.0);
    if state.level.dead > 0 {
        return;
    }
    if input.jump && state.player.jump() {
        sounds.push(SoundEffect::Jump);
    }
    if input.dash
        && state
            .player
            .dash(&mut state.level.effects, assets, &mut state.rng)
    {
        sounds.push(SoundEffect::Dash);
    }
}

/// Score HUD while playing, the level's phrase banner while transitioning
fn draw_overlay(state: &GameState, draw: &mut DrawList, assets: &AssetLibrary) {
    if state.level.transition != 0.0 {
        let phrases = assets.image_count("phrases");
        if phrases > 0 {
            draw.fullscreen("phrases", state.run.level_index.min(phrases - 1));
        }
        return;
    }
    draw.text(
        format!("{:.0} mL", state.run.score),
        Vec2::new(32.0, 32.0),
        colors::HUD_TEXT,
    );
    draw.image("liters", 0, Vec2::new(10.0, 30.0), false);
    draw.text(
        state.run.destroyed.to_string(),
        Vec2::new(32.0, 55.0),
        colors::HUD_TEXT,
    );
    draw.image("target", 0, Vec2::new(10.0, 50.0), false);
}
