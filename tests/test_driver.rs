use std::collections::VecDeque;

use flappy_jet::audio::{AudioSink, Cue};
use flappy_jet::config::GameConfig;
use flappy_jet::driver::{Control, Driver};
use flappy_jet::entities::*;
use flappy_jet::persistence::SaveStore;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct Recorder(Vec<Cue>);

impl AudioSink for Recorder {
    fn play(&mut self, cue: Cue) {
        self.0.push(cue);
    }
}

fn make_driver(dir: &tempfile::TempDir) -> Driver<Recorder, StdRng> {
    Driver::new(
        GameConfig::default(),
        FrameCounts::default(),
        SaveStore::new(save_path(dir)),
        Recorder::default(),
        StdRng::seed_from_u64(42),
    )
}

fn save_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("save.json")
}

fn reload(dir: &tempfile::TempDir) -> Progress {
    SaveStore::new(save_path(dir)).load()
}

fn block_jet(driver: &mut Driver<Recorder, StdRng>) {
    driver.world.pipes = VecDeque::from(vec![PipePair {
        top: Rect::new(60, 0, 100, 600),
        bottom: Rect::new(60, 620, 100, 30),
    }]);
}

fn coin_on_jet(driver: &mut Driver<Recorder, StdRng>) {
    let y = driver.world.jet.y as i32 + 5;
    driver.world.coins.push(Rect::new(63, y, 30, 30));
}

fn run_to_game_over(driver: &mut Driver<Recorder, StdRng>) {
    for _ in 0..1000 {
        assert_eq!(driver.frame(&[]), Control::Continue);
        if driver.world.phase == Phase::Waiting {
            return;
        }
    }
    panic!("never reached the game-over screen");
}

#[test]
fn fresh_start_fall_to_floor() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = make_driver(&dir);
    assert_eq!(driver.world.score, 0);
    assert_eq!(driver.world.progress.high_score, 0);
    assert!(!save_path(&dir).exists());

    run_to_game_over(&mut driver);

    assert_eq!(driver.world.last_score, 0);
    assert_eq!(driver.world.progress.high_score, 0);
    let text = std::fs::read_to_string(save_path(&dir)).unwrap();
    assert_eq!(text, r#"{"highScore":0,"totalCoins":0}"#);
}

#[test]
fn coins_then_pipe_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    SaveStore::new(save_path(&dir))
        .save(&Progress { high_score: 10, total_coins: 0 })
        .unwrap();
    let mut driver = make_driver(&dir);

    for _ in 0..3 {
        coin_on_jet(&mut driver);
        driver.frame(&[]);
    }
    block_jet(&mut driver);
    driver.frame(&[]);

    assert_eq!(driver.world.last_score, 15);
    assert_eq!(reload(&dir), Progress { high_score: 15, total_coins: 3 });
}

#[test]
fn reset_scores_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = make_driver(&dir);
    coin_on_jet(&mut driver);
    driver.frame(&[]);
    block_jet(&mut driver);
    run_to_game_over(&mut driver);
    assert_eq!(reload(&dir), Progress { high_score: 5, total_coins: 1 });

    assert_eq!(driver.frame(&[Input::ResetScores]), Control::Continue);

    assert_eq!(driver.world.phase, Phase::Waiting);
    assert_eq!(driver.world.coins_collected, 0);
    assert_eq!(reload(&dir), Progress::default());
}

#[test]
fn quit_persists_before_stopping() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = make_driver(&dir);
    coin_on_jet(&mut driver);
    driver.frame(&[]);

    let control = driver.frame(&[Input::Quit]);

    assert_eq!(control, Control::Quit);
    assert_eq!(reload(&dir), Progress { high_score: 0, total_coins: 1 });
}

#[test]
fn persist_saves_mid_session_coins() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = make_driver(&dir);

    coin_on_jet(&mut driver);
    driver.frame(&[]);
    assert_eq!(driver.world.phase, Phase::Playing);
    assert!(!save_path(&dir).exists());

    driver.persist();

    assert_eq!(reload(&dir), Progress { high_score: 0, total_coins: 1 });
    assert_eq!(driver.world.phase, Phase::Playing);
}

#[test]
fn quit_stops_before_later_inputs_and_the_tick() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = make_driver(&dir);
    let y = driver.world.jet.y;

    let control = driver.frame(&[Input::QuitRequested, Input::Jump]);

    assert_eq!(control, Control::Quit);
    assert_eq!(driver.world.jet.y, y);
    assert_eq!(driver.world.jet.velocity, 0.0);
}

#[test]
fn cues_follow_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = make_driver(&dir);
    driver.frame(&[Input::Jump]);
    coin_on_jet(&mut driver);
    driver.frame(&[]);
    block_jet(&mut driver);
    run_to_game_over(&mut driver);
    driver.frame(&[Input::Restart]);

    let cues = &driver.audio().0;
    assert_eq!(
        &cues[..6],
        &[
            Cue::MusicStart,
            Cue::Jump,
            Cue::Coin,
            Cue::Hit,
            Cue::Explosion,
            Cue::MusicStop,
        ]
    );
    assert!(matches!(cues[6], Cue::GameOver(_)));
    assert_eq!(cues[7], Cue::MusicStart);
    assert_eq!(cues.len(), 8);
}

#[test]
fn restart_resumes_play_in_the_same_frame() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = make_driver(&dir);
    block_jet(&mut driver);
    run_to_game_over(&mut driver);

    driver.frame(&[Input::Restart]);

    assert_eq!(driver.world.phase, Phase::Playing);
    assert_eq!(driver.world.pipes.len(), 1);
    assert_eq!(driver.world.pipes[0].x(), 796);
    assert_eq!(driver.world.score, 0);
}

#[test]
fn unwritable_save_file_does_not_stop_the_game() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = Driver::new(
        GameConfig::default(),
        FrameCounts::default(),
        SaveStore::new(dir.path().join("missing").join("save.json")),
        Recorder::default(),
        StdRng::seed_from_u64(1),
    );
    block_jet(&mut driver);
    run_to_game_over(&mut driver);
    assert_eq!(driver.frame(&[Input::Restart]), Control::Continue);
}
