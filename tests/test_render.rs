use std::collections::VecDeque;
use std::io;

use flappy_jet::assets::{Image, Sprites};
use flappy_jet::compute::{init_state, tick};
use flappy_jet::config::GameConfig;
use flappy_jet::entities::*;
use flappy_jet::render::{draw_frame, Anchor, Canvas, Rgb};

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, PartialEq)]
enum Call {
    Image { image: Image, x: i32, y: i32, rotation: f64 },
    Rect { rect: Rect, filled: bool },
    Text(String),
    Present,
}

#[derive(Default)]
struct RecordingCanvas {
    calls: Vec<Call>,
}

impl Canvas for RecordingCanvas {
    fn draw_image(&mut self, image: &Image, x: i32, y: i32, rotation: f64) -> io::Result<()> {
        self.calls.push(Call::Image { image: image.clone(), x, y, rotation });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, _color: Rgb, filled: bool) -> io::Result<()> {
        self.calls.push(Call::Rect { rect, filled });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _color: Rgb, _anchor: Anchor) -> io::Result<()> {
        self.calls.push(Call::Text(text.to_string()));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

fn make_world() -> (GameWorld, Sprites) {
    let config = GameConfig::default();
    let sprites = Sprites::placeholder(&config);
    let mut world = init_state(config, sprites.frame_counts(), Progress::default(), &mut StdRng::seed_from_u64(3));
    world.pipes = VecDeque::from(vec![PipePair {
        top: Rect::new(500, 0, 100, 150),
        bottom: Rect::new(500, 350, 100, 300),
    }]);
    world.coins = vec![Rect::new(300, 200, 30, 30)];
    (world, sprites)
}

fn texts(calls: &[Call]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn playing_frame_draws_in_fixed_order() {
    let (mut world, sprites) = make_world();
    world.jet.velocity = -2.0;
    world.score = 6;
    world.coins_collected = 1;
    world.progress.high_score = 9;

    let mut canvas = RecordingCanvas::default();
    draw_frame(&mut canvas, &world, &sprites).unwrap();

    let expected = vec![
        Call::Image { image: sprites.background.clone(), x: 0, y: 0, rotation: 0.0 },
        Call::Image { image: sprites.pipe_flipped.clone(), x: 500, y: 150 - 650, rotation: 0.0 },
        Call::Image { image: sprites.pipe.clone(), x: 500, y: 350, rotation: 0.0 },
        Call::Image { image: sprites.coin.clone(), x: 300, y: 200, rotation: 0.0 },
        Call::Image { image: sprites.thrust[0].clone(), x: 50, y: 325, rotation: 8.0 },
        Call::Text("Score: 6".to_string()),
        Call::Text("Coins: 1".to_string()),
        Call::Text("High Score: 9".to_string()),
        Call::Present,
    ];
    assert_eq!(canvas.calls, expected);
}

#[test]
fn idle_jet_uses_plain_frame() {
    let (mut world, sprites) = make_world();
    world.jet.velocity = 1.0;
    let mut canvas = RecordingCanvas::default();
    draw_frame(&mut canvas, &world, &sprites).unwrap();
    assert!(canvas.calls.contains(&Call::Image {
        image: sprites.jet[0].clone(),
        x: 50,
        y: 325,
        rotation: -4.0,
    }));
}

#[test]
fn dying_frame_hides_jet_and_shows_explosion() {
    let (mut world, sprites) = make_world();
    world.pipes = VecDeque::from(vec![PipePair {
        top: Rect::new(60, 0, 100, 600),
        bottom: Rect::new(60, 620, 100, 30),
    }]);
    tick(&mut world, &mut StdRng::seed_from_u64(3));
    assert!(matches!(world.phase, Phase::Dying { .. }));

    let mut canvas = RecordingCanvas::default();
    draw_frame(&mut canvas, &world, &sprites).unwrap();

    let jet_drawn = canvas.calls.iter().any(|c| match c {
        Call::Image { image, .. } => sprites.jet.contains(image) || sprites.thrust.contains(image),
        _ => false,
    });
    assert!(!jet_drawn);

    let explosion_at = canvas.calls.iter().position(|c| {
        *c == Call::Image {
            image: sprites.explosion[0].clone(),
            x: world.explosion.x,
            y: world.explosion.y,
            rotation: 0.0,
        }
    });
    let first_text = canvas.calls.iter().position(|c| matches!(c, Call::Text(_)));
    assert!(explosion_at.unwrap() < first_text.unwrap());

    // The dying HUD has no high score line.
    assert_eq!(texts(&canvas.calls), vec!["Score: 0", "Coins: 0"]);
    assert_eq!(canvas.calls.last(), Some(&Call::Present));
}

#[test]
fn short_explosion_keeps_jet_hidden_until_game_over() {
    let (mut world, mut sprites) = make_world();
    sprites.explosion.truncate(2);
    world.frames = sprites.frame_counts();
    world.pipes = VecDeque::from(vec![PipePair {
        top: Rect::new(60, 0, 100, 600),
        bottom: Rect::new(60, 620, 100, 30),
    }]);
    let mut rng = StdRng::seed_from_u64(3);
    tick(&mut world, &mut rng);

    let mut dying_frames = 0;
    let mut frames_with_jet = 0;
    while matches!(world.phase, Phase::Dying { .. }) {
        let mut canvas = RecordingCanvas::default();
        draw_frame(&mut canvas, &world, &sprites).unwrap();
        let jet_drawn = canvas.calls.iter().any(|c| match c {
            Call::Image { image, .. } => sprites.jet.contains(image) || sprites.thrust.contains(image),
            _ => false,
        });
        if jet_drawn {
            frames_with_jet += 1;
        }
        dying_frames += 1;
        tick(&mut world, &mut rng);
    }

    assert!(!world.explosion.active);
    assert_eq!(dying_frames, world.config.dying_frames);
    assert_eq!(frames_with_jet, 0);
}

#[test]
fn game_over_screen_lists_scores_and_keys() {
    let (mut world, sprites) = make_world();
    world.phase = Phase::Waiting;
    world.last_score = 14;
    world.progress.high_score = 21;

    let mut canvas = RecordingCanvas::default();
    draw_frame(&mut canvas, &world, &sprites).unwrap();

    assert_eq!(
        texts(&canvas.calls),
        vec![
            "GAME OVER",
            "SCORE",
            "14",
            "BEST",
            "21",
            "Press R to Restart",
            "Press Q to Quit",
            "Press Z to Reset Scores",
        ]
    );
    let score_box = Rect::new(350, 216, 100, 130);
    assert!(canvas.calls.contains(&Call::Rect { rect: score_box, filled: true }));
    assert!(canvas.calls.contains(&Call::Rect { rect: score_box, filled: false }));
    assert_eq!(canvas.calls.last(), Some(&Call::Present));
}
