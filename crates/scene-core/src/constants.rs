// Shared scene tuning constants used by both web and native frontends.

// Sparkles (safe knobs)
pub const SPARKLE_COUNT: usize = 100;
pub const SPARKLE_SIZE: f32 = 6.5; // base point size before depth falloff
pub const SPARKLE_ALPHA: f32 = 0.30; // global alpha knob

// Sparkle sampling volume
pub const SPARKLE_ATTEMPTS_PER_PARTICLE: usize = 35;
pub const SPARKLE_RADIUS_SCALE: f32 = 0.95;
pub const SPARKLE_RADIUS_PAD: f32 = 0.25;
pub const SPARKLE_RADIAL_EXPONENT: f32 = 0.55; // < 1 pushes samples toward the shell
pub const SPARKLE_Y_FLATTEN: f32 = 0.85;
pub const SPARKLE_Y_LIFT: f32 = 0.2;

// Keep-clear zones
pub const MODEL_CLEAR_RADIUS: f32 = 0.35; // fraction of sampling radius
pub const MODEL_CLEAR_BELOW: f32 = 0.10; // fraction of model height
pub const MODEL_CLEAR_ABOVE: f32 = 0.90;
pub const TEXT_CLEAR_RADIUS: f32 = 0.75; // fraction of sampling radius
pub const TEXT_CLEAR_BELOW: f32 = 0.18; // world units
pub const TEXT_CLEAR_ABOVE: f32 = 0.25;

// Per-particle attribute ranges
pub const SPARKLE_SPEED_MIN: f32 = 0.8;
pub const SPARKLE_SPEED_SPAN: f32 = 1.4;

// Sparkle point sizing
pub const SPARKLE_MIN_DEPTH: f32 = 0.8;
pub const SPARKLE_MIN_PX: f32 = 1.0;
pub const SPARKLE_MAX_PX: f32 = 10.0; // prevent huge blobs

// Twinkle palette, written to the target as-is (display values)
pub const SPARKLE_COOL_RGB: [f32; 3] = [0.65, 0.85, 1.0];
pub const SPARKLE_WARM_RGB: [f32; 3] = [1.0, 0.78, 0.55];

// Text sign
pub const BIRTHDAY_TEXT: &str = "Happy Birthday";
pub const SIGN_WIDTH: f32 = 1.25;
pub const SIGN_HEIGHT: f32 = 0.32;
pub const SIGN_LIFT_FRACTION: f32 = 0.92; // of model height, above model center
pub const SIGN_LIFT_PAD: f32 = 0.35;
pub const SIGN_PULSE_AMOUNT: f32 = 0.02;
pub const SIGN_PULSE_RATE: f32 = 2.0;

// Model fit
pub const MODEL_DESIRED_SIZE: f32 = 0.7;
pub const MODEL_FLOOR_GAP: f32 = 0.005;
pub const MODEL_SWAY_AMOUNT: f32 = 0.08; // radians
pub const MODEL_SWAY_RATE: f32 = 0.35;
pub const ORBIT_TARGET_LIFT: f32 = 0.25; // fraction of model height

// Camera
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 200.0;
pub const CAMERA_START_EYE: [f32; 3] = [0.7, 0.55, 1.6];
pub const CAMERA_START_DISTANCE: f32 = 1.6;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Zoom limits (edit these)
pub const ZOOM_IN_LIMIT: f32 = 3.00; // can't zoom in closer than this
pub const ZOOM_OUT_LIMIT: f32 = 4.00;

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // dolly scale per wheel event
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_POLAR_EPS: f32 = 1.0e-3;

// Environment (colours are sRGB display values)
pub const FLOOR_SIZE: f32 = 20.0;
pub const FLOOR_RGB: [f32; 3] = [10.0 / 255.0, 11.0 / 255.0, 20.0 / 255.0]; // #0a0b14
pub const FOG_RGB: [f32; 3] = [5.0 / 255.0, 6.0 / 255.0, 10.0 / 255.0]; // #05060a
pub const CLEAR_RGB: [f32; 3] = [0.0, 0.0, 0.0]; // no scene background
pub const FOG_DENSITY: f32 = 0.045;
pub const TONE_EXPOSURE: f32 = 1.9;
pub const DEFAULT_DIFFUSE_RGB: [f32; 3] = [0.8, 0.8, 0.8];
