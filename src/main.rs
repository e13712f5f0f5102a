//! Hidratate - native headless entry point
//!
//! Loads settings, levels and the asset manifest, then runs the simulation
//! at 60 Hz against the headless presenter and a silent audio sink. A
//! windowed host plugs its own `Presenter`, `AudioSink` and input events
//! into the same loop.

use std::fs;

use hidratate::assets::AssetManifest;
use hidratate::audio::{AudioManager, NullSink};
use hidratate::persistence::DirLevelStore;
use hidratate::platform::{FramePacer, InputEvent};
use hidratate::renderer::{HeadlessPresenter, Presenter};
use hidratate::{Game, GameError, Settings};

fn main() -> Result<(), GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hidratate (native) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".to_string());
    let settings = Settings::load(&settings_path);

    let levels = DirLevelStore::open(&settings.levels_dir)?;
    let manifest = match fs::read_to_string(&settings.asset_manifest) {
        Ok(text) => AssetManifest::from_json(&text)?,
        Err(err) => {
            log::warn!(
                "No asset manifest at {} ({err}); using the stock art set",
                settings.asset_manifest.display()
            );
            AssetManifest::with_defaults()
        }
    };

    let mut game = Game::new(&settings, Box::new(levels), &manifest)?;

    let mut audio = AudioManager::new(NullSink);
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_music_volume(settings.music_volume);
    audio.start_background();

    let (width, height) = settings.window_size();
    log::info!(
        "Display {}x{} upscaled to {width}x{height}",
        settings.display_width,
        settings.display_height
    );

    let mut presenter = HeadlessPresenter::default();
    let mut pacer = FramePacer::default();
    let events: Vec<InputEvent> = Vec::new();

    'run: loop {
        for _ in 0..pacer.wait() {
            let frame = game.step(&events)?;
            audio.play_all(&frame.sounds);
            presenter.present(&frame);

            let done = settings.max_frames > 0 && presenter.frames >= settings.max_frames;
            if frame.quit || done {
                break 'run;
            }
        }
    }

    audio.shutdown();
    let run = &game.state().run;
    log::info!(
        "Stopped after {} frames on level {}: {:.0} mL, {} machines, {} deaths",
        presenter.frames,
        run.level_index,
        run.score,
        run.destroyed,
        run.deaths
    );
    Ok(())
}
