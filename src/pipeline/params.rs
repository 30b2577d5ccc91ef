//! Pipeline constants.
//!
//! The downstream predictors were trained against these exact values, so
//! changing any of them invalidates the model artifacts.

// Coordinate frame
pub const SPATIAL_UNIT: f64 = 3.0; // external units per internal unit
pub const DEPTH_OFFSET: f64 = 1620.0;
pub const ORIGIN_X: f64 = 240.0;
pub const ORIGIN_Y: f64 = 70.0;
pub const ROTATION_DEG: f64 = 35.5;

// Discretization
pub const CELL_SIZE: f64 = 3.0;
pub const FLOOR_THRESHOLD: f64 = 10.0;
pub const LOWER_FLOOR_HEIGHT: f64 = 0.0;
pub const UPPER_FLOOR_HEIGHT: f64 = 14.0;

// Polar occupancy grid
pub const ANGLE_BINS: usize = 20;
pub const RANGE_BINS: usize = 20;
pub const MAX_RANGE: f64 = 100.0;

// Egocentric wall grid
pub const WALL_GRID_SIZE: usize = 21;
pub const MAP_MAX_X: i64 = 130;
pub const MAP_MAX_Y: i64 = 70;

// Prediction
pub const BUCKETS: [usize; 4] = [0, 5, 10, 20];
pub const MAX_LOOKAHEAD: usize = 1_000; // ticks
pub const VELOCITY_WINDOW: usize = 10;

// Entities
pub const NPC_ALIVE: i32 = 1;
pub const NPC_DEAD: i32 = 0;
pub const OPEN_DOOR_COUNT: usize = 17;
pub const CLOSED_DOOR_COUNT: usize = 90;
