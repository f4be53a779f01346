use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

const BANNERS: [&str; 4] = ["PERFECT!", "FLAWLESS!", "SHARP EYES!", "TRUTH SEEKER!"];
const SYMBOLS: [char; 6] = ['*', '+', '✦', '✓', '★', '•'];
const GRAVITY: f64 = 12.0;
const STEP_SECS: f64 = 0.1;

/// One piece of confetti.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    age: f64,
    max_age: f64,
}

impl Particle {
    fn burst<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-4.0..4.0),
            vel_y: rng.gen_range(-6.0..-1.0),
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..6),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
        }
    }

    /// Returns false once the particle has burnt out.
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
        self.age += dt;
        self.age < self.max_age
    }
}

/// Confetti shown over the results screen after a perfect game.
#[derive(Debug)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub banner: &'static str,
    started: Option<Instant>,
    duration: Duration,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            banner: BANNERS[0],
            started: None,
            duration: Duration::from_secs(3),
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        self.start_with(width, height, &mut rand::thread_rng());
    }

    pub fn start_with<R: Rng>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.width = width as f64;
        self.height = height as f64;
        self.banner = BANNERS.choose(rng).copied().unwrap_or(BANNERS[0]);
        self.started = Some(Instant::now());

        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        self.particles = (0..40)
            .map(|_| {
                let x = cx + rng.gen_range(-12.0..12.0);
                let y = cy + rng.gen_range(-4.0..4.0);
                Particle::burst(x, y, rng)
            })
            .collect();
    }

    pub fn is_active(&self) -> bool {
        self.started.is_some()
    }

    /// Advance one animation step. Ends the celebration after its duration.
    pub fn update(&mut self) {
        let Some(started) = self.started else {
            return;
        };
        if started.elapsed() >= self.duration {
            self.stop();
            return;
        }
        self.step(STEP_SECS);
    }

    fn step(&mut self, dt: f64) {
        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(dt);
            let on_screen = p.y <= height + 2.0 && p.x >= -2.0 && p.x <= width + 2.0;
            alive && on_screen
        });
    }

    pub fn stop(&mut self) {
        self.started = None;
        self.particles.clear();
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
