use glam::Vec3;

// Shared tuning constants for the carousel, the page helpers and the hero scene.

// Carousel
pub const AUTOPLAY_PERIOD_MS: u32 = 5_000;
pub const RESIZE_DEBOUNCE_MS: u32 = 100;
pub const SWIPE_THRESHOLD_PX: f32 = 50.0; // strictly greater than this navigates
pub const WIDE_VIEWPORT_PX: f64 = 1024.0; // three slides at or above
pub const MEDIUM_VIEWPORT_PX: f64 = 768.0; // two slides at or above

// Navbar
pub const NAVBAR_SCROLL_THRESHOLD_PX: f64 = 100.0;
pub const NAVBAR_BG_SCROLLED: &str = "rgba(10, 15, 26, 0.95)";
pub const NAVBAR_BG_TOP: &str = "rgba(10, 15, 26, 0.8)";

// Scroll reveal
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_HOME: Vec3 = Vec3::new(0.0, 5.0, 12.0);
pub const CAMERA_LOOK_AT: Vec3 = Vec3::new(2.0, 0.0, 0.0); // garden sits right of centre
pub const CAMERA_PARALLAX_X: f32 = 0.5;
pub const CAMERA_PARALLAX_Y: f32 = 0.2;
pub const CAMERA_FOLLOW_RATE: f32 = 3.0; // 1/s, ~0.05 per frame at 60 Hz

// Ground plane
pub const GROUND_WIDTH: f32 = 30.0;
pub const GROUND_DEPTH: f32 = 20.0;
pub const GROUND_SEGMENTS: u32 = 128;
pub const GROUND_Y: f32 = -2.0;
pub const POINTER_PARKED: [f32; 2] = [-100.0, -100.0]; // far outside the ripple radius

// Decorative solids
pub const MAX_SOLIDS: usize = 8;
pub const SOLID_BOB_AMPLITUDE: f32 = 0.15;
pub const SOLID_SPIN_X_PER_SEC: f32 = 0.06;
pub const SOLID_SPIN_Y_PER_SEC: f32 = 0.12;
pub const SOLID_SPEED_MIN: f32 = 0.1;
pub const SOLID_SPEED_SPAN: f32 = 0.2;

// Particles
pub const PARTICLE_COUNT: usize = 300;
pub const PARTICLE_SIZE: f32 = 50.0;
pub const PARTICLE_SPAWN_MIN: Vec3 = Vec3::new(2.0, -2.0, -3.0);
pub const PARTICLE_SPAWN_SIZE: Vec3 = Vec3::new(5.0, 3.0, 6.0);
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Palette
pub const CLEAR_RGB: [f32; 3] = [0.039, 0.059, 0.102]; // #0a0f1a
pub const NEON_RGB: [f32; 3] = [0.0, 0.961, 1.0]; // #00f5ff
pub const ACCENT_RGB: [f32; 3] = [1.0, 0.420, 0.420]; // #ff6b6b

// Lights: position, colour, intensity, reach
pub const KEY_LIGHT_POS: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const KEY_LIGHT_INTENSITY: f32 = 2.0;
pub const FILL_LIGHT_POS: Vec3 = Vec3::new(-5.0, 0.0, 5.0);
pub const FILL_LIGHT_INTENSITY: f32 = 1.0;
pub const LIGHT_DISTANCE: f32 = 20.0;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 1.2;
pub const BLOOM_RADIUS: f32 = 0.5;
pub const BLOOM_THRESHOLD: f32 = 0.1;
