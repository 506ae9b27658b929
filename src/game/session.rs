use log::{debug, info};
use ratatui::style::Color;

use super::entities::{Alien, Bullet, Platform, Player, BULLET_WIDTH};
use super::surface::{Font, Surface};
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Won,
    Lost,
}

/// Game input, already decoded from whatever the host delivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
}

/// The two text readouts shown next to the play field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readouts {
    pub score: String,
    pub lives: String,
}

impl Readouts {
    fn new(score: u32, lives: i32) -> Self {
        Self {
            score: format!("Score: {}", score),
            lives: format!("Lives: {}", lives),
        }
    }
}

pub struct Session {
    config: GameConfig,
    platform: Platform,
    player: Player,
    bullets: Vec<Bullet>,
    aliens: Vec<Alien>,
    phase: Phase,
    score: u32,
    lives: i32,
    alien_dir: i32, // 1 = right, -1 = left
    descent_timer_ms: u64,
    readouts: Readouts,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            platform: Platform::new(&config),
            player: Player::new(&config),
            bullets: Vec::new(),
            aliens: Vec::new(),
            phase: Phase::Idle,
            score: 0,
            lives: config.starting_lives,
            alien_dir: 1,
            descent_timer_ms: 0,
            readouts: Readouts::new(0, config.starting_lives),
            config,
        }
    }

    /// Start a new session. Returns false (and changes nothing) while one is running.
    pub fn initialize(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.readouts = Readouts::new(self.score, self.lives);
        self.player.x = self.config.player_start_x();
        self.aliens = Alien::grid(&self.config);
        self.bullets.clear();
        self.descent_timer_ms = 0;
        self.phase = Phase::Running;
        info!(
            "session started: {} aliens, {} lives",
            self.aliens.len(),
            self.lives
        );
        true
    }

    /// Run one frame of simulation and drawing. Returns whether another frame
    /// should be scheduled.
    pub fn advance_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.is_running() {
            return false;
        }

        surface.clear();
        surface.set_fill_color(Color::White);
        let platform = self.platform.bounds;
        surface.fill_rect(platform.x, platform.y, platform.width, platform.height);
        let player = self.player.bounds();
        surface.fill_rect(player.x, player.y, player.width, player.height);

        self.update_bullets();
        for bullet in &self.bullets {
            let b = bullet.bounds();
            surface.fill_rect(b.x, b.y, b.width, b.height);
        }

        self.check_hits();
        for alien in &self.aliens {
            let a = alien.bounds();
            surface.fill_rect(a.x, a.y, a.width, a.height);
        }

        self.update_aliens();
        self.check_end(surface);

        self.is_running()
    }

    pub fn handle_key(&mut self, key: Key) {
        if !self.is_running() {
            return;
        }
        match key {
            Key::Left => {
                self.player.x = (self.player.x - self.player.speed).max(0);
            }
            Key::Right => {
                let max_x = self.config.surface_width - self.player.width;
                self.player.x = (self.player.x + self.player.speed).min(max_x);
            }
            Key::Fire => {
                if !self.bullets.is_empty() {
                    return;
                }
                let x = self.player.x + self.player.width / 2 - BULLET_WIDTH / 2;
                let y = if self.player.rests_on(&self.platform) {
                    self.platform.bounds.y - 1
                } else {
                    self.player.y
                };
                self.bullets.push(Bullet { x, y });
            }
        }
    }

    fn update_bullets(&mut self) {
        for b in &mut self.bullets {
            b.y -= self.config.bullet_step;
        }
        self.bullets.retain(|b| b.y >= 0);
    }

    /// Each alien is tested against the bullets still in flight; the first
    /// overlapping bullet destroys it and is consumed.
    fn check_hits(&mut self) {
        let bullets = &mut self.bullets;
        let mut hits = 0u32;
        self.aliens.retain(|alien| {
            let body = alien.bounds();
            match bullets.iter().position(|b| b.bounds().overlaps(&body)) {
                Some(i) => {
                    bullets.remove(i);
                    debug!("alien hit at ({}, {})", alien.x, alien.y);
                    hits += 1;
                    false
                }
                None => true,
            }
        });
        if hits > 0 {
            self.score += hits * self.config.points_per_alien;
            self.readouts.score = format!("Score: {}", self.score);
        }
    }

    fn update_aliens(&mut self) {
        // Edge contact is judged on positions from the previous frame.
        let width = self.config.surface_width;
        let touching = self.aliens.iter().any(|a| {
            let b = a.bounds();
            b.right() >= width || b.x <= 0
        });
        if touching {
            self.alien_dir = -self.alien_dir;
            debug!("alien direction now {}", self.alien_dir);
        }

        let dx = self.alien_dir * self.config.alien_speed;
        for alien in &mut self.aliens {
            alien.x += dx;
        }

        self.descent_timer_ms += self.config.frame_ms;
        if self.descent_timer_ms >= self.config.descent_interval_ms {
            for alien in &mut self.aliens {
                alien.y += self.config.row_drop;
            }
            self.descent_timer_ms -= self.config.descent_interval_ms;
            debug!("aliens descended, carry {}ms", self.descent_timer_ms);
        }
    }

    fn check_end<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (cx, cy) = (self.config.surface_width / 2, self.config.surface_height / 2);

        if self.aliens.is_empty() {
            surface.set_fill_color(Color::White);
            surface.set_font(Font::BANNER);
            surface.fill_text("You Win!", cx - 60, cy);
            self.phase = Phase::Won;
            info!("session won with score {}", self.score);
        }

        // Every alien at the player's row costs a life, so a full row can end the game at once.
        let player_y = self.player.y;
        let landed = self
            .aliens
            .iter()
            .filter(|a| a.bounds().bottom() >= player_y)
            .count();
        for _ in 0..landed {
            self.lives -= 1;
            self.readouts.lives = format!("Lives: {}", self.lives);
            debug!("alien reached the player row, {} lives left", self.lives);
            if self.lives <= 0 && self.phase != Phase::Lost {
                surface.set_fill_color(Color::White);
                surface.set_font(Font::BANNER);
                surface.fill_text("Game Over!", cx - 80, cy);
                self.phase = Phase::Lost;
                info!("session lost with score {}", self.score);
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn readouts(&self) -> &Readouts {
        &self.readouts
    }

    #[cfg(test)]
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn alien_direction(&self) -> i32 {
        self.alien_dir
    }

    /// Time left until the grid next drops a row.
    pub fn next_descent_ms(&self) -> u64 {
        self.config.descent_interval_ms.saturating_sub(self.descent_timer_ms)
    }
}
