use rand::seq::SliceRandom;
use rand::Rng;
use std::time::SystemTime;

/// How long the new-record confetti stays on screen, in seconds.
pub const CONFETTI_SECS: f64 = 5.0;

const PIECE_COUNT: usize = 120;
const GRAVITY: f64 = 6.0;

/// One piece of falling confetti.
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl ConfettiPiece {
    fn spawn_at_top(width: f64) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            x: rng.gen_range(0.0..width.max(1.0)),
            y: rng.gen_range(-4.0..0.0),
            vel_x: rng.gen_range(-1.5..1.5),
            vel_y: rng.gen_range(2.0..6.0),
            symbol: *['*', 'o', '+', '~', '.', 'x']
                .choose(&mut rng)
                .unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.5..CONFETTI_SECS),
        }
    }

    /// Advance one timestep; returns false once the piece has aged out.
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;

        self.age += dt;
        self.age < self.max_age
    }
}

/// New-record celebration overlay. Active for a fixed window after the
/// game-over screen first appears, then clears itself.
#[derive(Debug)]
pub struct Confetti {
    pub pieces: Vec<ConfettiPiece>,
    pub started_at: SystemTime,
    pub duration: f64,
    pub is_active: bool,
    pub width: f64,
    pub height: f64,
}

impl Confetti {
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            started_at: SystemTime::now(),
            duration: CONFETTI_SECS,
            is_active: false,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        self.pieces.clear();
        self.started_at = SystemTime::now();
        self.is_active = true;
        self.width = width as f64;
        self.height = height as f64;

        for _ in 0..PIECE_COUNT {
            self.pieces.push(ConfettiPiece::spawn_at_top(self.width));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.pieces.clear();
    }

    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        let elapsed = self.started_at.elapsed().unwrap_or_default().as_secs_f64();
        if elapsed >= self.duration {
            self.stop();
            return;
        }

        // Fixed timestep, one update per runner tick
        let dt = 0.1;
        let (width, height) = (self.width, self.height);
        self.pieces.retain_mut(|piece| {
            let still_alive = piece.update(dt);

            let buffer = 5.0;
            let off_screen =
                piece.y > height + buffer || piece.x < -buffer || piece.x > width + buffer;
            still_alive && !off_screen
        });
    }
}

impl Default for Confetti {
    fn default() -> Self {
        Self::new()
    }
}
