// Pointer and wheel bookkeeping for orbit controls. Kept free of DOM types.

/// What a drag does to the orbit.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    Rotate,
    Pan,
}

// PointerEvent.button values
pub const BUTTON_PRIMARY: i16 = 0;
pub const BUTTON_SECONDARY: i16 = 2;

/// Primary button rotates, or pans while ctrl/meta/shift is held; secondary pans.
#[inline]
pub fn drag_mode(button: i16, pan_modifier: bool) -> Option<DragMode> {
    match button {
        BUTTON_PRIMARY if pan_modifier => Some(DragMode::Pan),
        BUTTON_PRIMARY => Some(DragMode::Rotate),
        BUTTON_SECONDARY => Some(DragMode::Pan),
        _ => None,
    }
}

/// One active pointer drag. Only the pointer that started the drag moves it.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub mode: DragMode,
    pub last: [f32; 2],
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, mode: DragMode, x: f32, y: f32) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.mode = mode;
        self.last = [x, y];
    }

    /// Pixel delta since the previous event, or None if not dragging with this pointer.
    pub fn move_to(&mut self, pointer_id: i32, x: f32, y: f32) -> Option<[f32; 2]> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let d = [x - self.last[0], y - self.last[1]];
        self.last = [x, y];
        Some(d)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}

/// One dolly step per wheel event, whatever its magnitude; positive zooms out.
#[inline]
pub fn wheel_notches(delta_y: f64) -> f32 {
    if delta_y > 0.0 {
        1.0
    } else if delta_y < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Parse the zoom slider's value, falling back when the field is empty or garbage.
#[inline]
pub fn slider_distance(raw: &str, fallback: f32) -> f32 {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|d| d.is_finite())
        .unwrap_or(fallback)
}
