use std::time::Duration;

pub const SURFACE_WIDTH: i32 = 480;
pub const SURFACE_HEIGHT: i32 = 360;
pub const PLATFORM_HEIGHT: i32 = 20;
pub const PLAYER_WIDTH: i32 = 40;
pub const PLAYER_HEIGHT: i32 = 20;
/// Distance from the surface bottom to the player's top edge.
pub const PLAYER_LIFT: i32 = 50;
pub const PLAYER_SPEED: i32 = 5;
pub const BULLET_STEP: i32 = 5;
pub const ALIEN_ROWS: usize = 3;
pub const ALIEN_COLS: usize = 5;
pub const ALIEN_GAP: i32 = 10;
pub const ALIEN_ORIGIN: (i32, i32) = (50, 50);
pub const ALIEN_SPEED: i32 = 2;
pub const FRAME_MS: u64 = 16; // ~60 FPS
pub const DESCENT_INTERVAL_MS: u64 = 5000;
pub const ROW_DROP: i32 = 20;
pub const STARTING_LIVES: i32 = 3;
pub const POINTS_PER_ALIEN: u32 = 10;

/// Geometry and tuning for one game. All distances are surface pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub surface_width: i32,
    pub surface_height: i32,
    pub platform_height: i32,
    pub player_width: i32,
    pub player_height: i32,
    pub player_lift: i32,
    pub player_speed: i32,
    pub bullet_step: i32,
    pub alien_rows: usize,
    pub alien_cols: usize,
    pub alien_gap: i32,
    pub alien_origin: (i32, i32),
    pub alien_speed: i32,
    pub frame_ms: u64,
    pub descent_interval_ms: u64,
    pub row_drop: i32,
    pub starting_lives: i32,
    pub points_per_alien: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            platform_height: PLATFORM_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_lift: PLAYER_LIFT,
            player_speed: PLAYER_SPEED,
            bullet_step: BULLET_STEP,
            alien_rows: ALIEN_ROWS,
            alien_cols: ALIEN_COLS,
            alien_gap: ALIEN_GAP,
            alien_origin: ALIEN_ORIGIN,
            alien_speed: ALIEN_SPEED,
            frame_ms: FRAME_MS,
            descent_interval_ms: DESCENT_INTERVAL_MS,
            row_drop: ROW_DROP,
            starting_lives: STARTING_LIVES,
            points_per_alien: POINTS_PER_ALIEN,
        }
    }
}

impl GameConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Player x that centers the player on the surface.
    pub fn player_start_x(&self) -> i32 {
        self.surface_width / 2 - self.player_width / 2
    }

    pub fn player_y(&self) -> i32 {
        self.surface_height - self.player_lift
    }

    pub fn platform_y(&self) -> i32 {
        self.surface_height - self.platform_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_canvas_geometry() {
        let config = GameConfig::default();
        assert_eq!(config.player_start_x(), 220);
        assert_eq!(config.player_y(), 310);
        assert_eq!(config.platform_y(), 340);
        assert_eq!(config.tick_rate(), Duration::from_millis(16));
    }

    #[test]
    fn player_does_not_rest_on_platform_by_default() {
        let config = GameConfig::default();
        assert_ne!(config.player_y() + config.player_height, config.platform_y());
    }
}
