//! Host input state

use glam::Vec2;

/// Input the host forwards to the simulation.
///
/// Two controls exist: a lure (a pointer held down somewhere in the arena)
/// and a flash request (a one-frame button press).
#[derive(Debug, Default)]
pub struct Input {
    /// Lure position while held
    lure: Option<Vec2>,
    /// Lure pressed this frame
    lure_just_pressed: bool,
    /// Lure released this frame
    lure_just_released: bool,
    /// Flash requested this frame
    flash_just_pressed: bool,
}

impl Input {
    /// Create an idle input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the end of each frame to clear per-frame state
    pub fn update(&mut self) {
        self.lure_just_pressed = false;
        self.lure_just_released = false;
        self.flash_just_pressed = false;
    }

    /// Hold the lure at `position`
    pub fn press_lure(&mut self, position: Vec2) {
        if self.lure.is_none() {
            self.lure_just_pressed = true;
        }
        self.lure = Some(position);
    }

    /// Move a held lure; ignored while released
    pub fn move_lure(&mut self, position: Vec2) {
        if let Some(lure) = &mut self.lure {
            *lure = position;
        }
    }

    /// Let go of the lure
    pub fn release_lure(&mut self) {
        if self.lure.take().is_some() {
            self.lure_just_released = true;
        }
    }

    /// Request a flash roll this frame
    pub fn press_flash(&mut self) {
        self.flash_just_pressed = true;
    }

    /// Lure position while held
    pub fn lure(&self) -> Option<Vec2> {
        self.lure
    }

    /// Check if the lure was pressed this frame
    pub fn is_lure_just_pressed(&self) -> bool {
        self.lure_just_pressed
    }

    /// Check if the lure was released this frame
    pub fn is_lure_just_released(&self) -> bool {
        self.lure_just_released
    }

    /// Check if a flash was requested this frame
    pub fn is_flash_just_pressed(&self) -> bool {
        self.flash_just_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lure_press_move_release() {
        let mut input = Input::new();
        input.press_lure(Vec2::ONE);
        assert!(input.is_lure_just_pressed());
        assert_eq!(input.lure(), Some(Vec2::ONE));

        input.update();
        assert!(!input.is_lure_just_pressed());

        input.move_lure(Vec2::ZERO);
        assert_eq!(input.lure(), Some(Vec2::ZERO));

        input.release_lure();
        assert!(input.is_lure_just_released());
        assert_eq!(input.lure(), None);

        // Moving a released lure does nothing
        input.move_lure(Vec2::ONE);
        assert_eq!(input.lure(), None);
    }

    #[test]
    fn test_flash_lasts_one_frame() {
        let mut input = Input::new();
        input.press_flash();
        assert!(input.is_flash_just_pressed());

        input.update();
        assert!(!input.is_flash_just_pressed());
    }
}
