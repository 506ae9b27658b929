use crate::config::GameConfig;

pub const BULLET_WIDTH: i32 = 2;
pub const BULLET_HEIGHT: i32 = 10;
pub const ALIEN_WIDTH: i32 = 20;
pub const ALIEN_HEIGHT: i32 = 20;

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.player_start_x(),
            y: config.player_y(),
            width: config.player_width,
            height: config.player_height,
            speed: config.player_speed,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// True when the player's bottom edge sits exactly on the platform top.
    pub fn rests_on(&self, platform: &Platform) -> bool {
        self.y + self.height == platform.bounds.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

impl Bullet {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
}

impl Alien {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, ALIEN_WIDTH, ALIEN_HEIGHT)
    }

    /// Fresh formation in row-major order.
    pub fn grid(config: &GameConfig) -> Vec<Alien> {
        let (origin_x, origin_y) = config.alien_origin;
        let mut aliens = Vec::with_capacity(config.alien_rows * config.alien_cols);
        for row in 0..config.alien_rows {
            for col in 0..config.alien_cols {
                aliens.push(Alien {
                    x: col as i32 * (ALIEN_WIDTH + config.alien_gap) + origin_x,
                    y: row as i32 * (ALIEN_HEIGHT + config.alien_gap) + origin_y,
                });
            }
        }
        aliens
    }
}

/// Static ledge along the bottom of the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Platform {
    pub bounds: Bounds,
}

impl Platform {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bounds: Bounds::new(
                0,
                config.platform_y(),
                config.surface_width,
                config.platform_height,
            ),
        }
    }
}
