//! Per-frame input snapshot

use imkit_graphics::{Rect, Vec2};

/// Bytes of text input buffered per frame.
pub const INPUT_MAX: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const COUNT: usize = 3;

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Shift,
    Ctrl,
    Del,
    Enter,
    Tab,
    Backspace,
    Copy,
    Cut,
    Paste,
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
    TextStart,
    TextEnd,
    Undo,
    Redo,
    SelectAll,
    WordLeft,
    WordRight,
    ScrollStart,
    ScrollEnd,
    ScrollDown,
    ScrollUp,
}

impl Key {
    pub const COUNT: usize = 26;

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ButtonState {
    pub down: bool,
    /// Number of transitions since the frame started.
    pub clicked: u32,
    pub clicked_pos: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub down: bool,
    pub clicked: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mouse {
    pub buttons: [ButtonState; MouseButton::COUNT],
    pub pos: Vec2,
    pub prev: Vec2,
    pub delta: Vec2,
    pub scroll_delta: Vec2,
    pub grab: bool,
    pub grabbed: bool,
    pub ungrab: bool,
}

impl Mouse {
    pub fn button(&self, button: MouseButton) -> &ButtonState {
        &self.buttons[button.index()]
    }

    pub fn button_mut(&mut self, button: MouseButton) -> &mut ButtonState {
        &mut self.buttons[button.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyboard {
    pub keys: [KeyState; Key::COUNT],
    text: [u8; INPUT_MAX],
    text_len: usize,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self {
            keys: [KeyState::default(); Key::COUNT],
            text: [0; INPUT_MAX],
            text_len: 0,
        }
    }
}

impl Keyboard {
    pub fn key(&self, key: Key) -> &KeyState {
        &self.keys[key.index()]
    }

    /// UTF-8 text typed this frame.
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.text[..self.text_len]).unwrap_or_default()
    }
}

/// Everything the host reported between `input_begin` and `input_end`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Input {
    pub keyboard: Keyboard,
    pub mouse: Mouse,
}

impl Input {
    /// Clears per-frame transitions; held buttons and keys stay down.
    pub fn begin(&mut self) {
        self.keyboard.text_len = 0;
        for button in &mut self.mouse.buttons {
            button.clicked = 0;
        }
        self.mouse.scroll_delta = Vec2::ZERO;
        self.mouse.prev = self.mouse.pos;
        self.mouse.delta = Vec2::ZERO;
        for key in &mut self.keyboard.keys {
            key.clicked = 0;
        }
    }

    pub fn end(&mut self) {
        if self.mouse.grab {
            self.mouse.grab = false;
        }
        if self.mouse.ungrab {
            self.mouse.grabbed = false;
            self.mouse.ungrab = false;
            self.mouse.grab = false;
        }
    }

    pub fn motion(&mut self, x: f32, y: f32) {
        self.mouse.pos = Vec2::new(x, y);
        self.mouse.delta = self.mouse.pos - self.mouse.prev;
    }

    pub fn key(&mut self, key: Key, down: bool) {
        let state = &mut self.keyboard.keys[key.index()];
        if state.down != down {
            state.clicked += 1;
        }
        state.down = down;
    }

    pub fn button(&mut self, button: MouseButton, x: f32, y: f32, down: bool) {
        let state = self.mouse.button_mut(button);
        if state.down == down {
            return;
        }
        state.clicked_pos = Vec2::new(x, y);
        state.down = down;
        state.clicked += 1;
    }

    pub fn scroll(&mut self, delta: Vec2) {
        self.mouse.scroll_delta += delta;
    }

    /// Appends one UTF-8 encoded character; dropped when the frame's text
    /// buffer is full.
    pub fn glyph(&mut self, glyph: &str) -> bool {
        let Some(ch) = glyph.chars().next() else {
            return false;
        };
        self.unicode(ch)
    }

    pub fn unicode(&mut self, ch: char) -> bool {
        let len = ch.len_utf8();
        if self.keyboard.text_len + len >= INPUT_MAX {
            log::warn!("text input buffer full, dropping {ch:?}");
            return false;
        }
        let start = self.keyboard.text_len;
        ch.encode_utf8(&mut self.keyboard.text[start..start + len]);
        self.keyboard.text_len += len;
        true
    }

    pub fn grab_mouse(&mut self) {
        self.mouse.grab = true;
        self.mouse.grabbed = true;
    }

    pub fn ungrab_mouse(&mut self) {
        self.mouse.ungrab = true;
    }

    /// A completed click (press then release) happened this frame.
    pub fn has_mouse_click(&self, button: MouseButton) -> bool {
        let state = self.mouse.button(button);
        state.clicked > 0 && !state.down
    }

    /// The last transition of `button` happened inside `rect`.
    pub fn has_mouse_click_in_rect(&self, button: MouseButton, rect: Rect) -> bool {
        rect.contains(self.mouse.button(button).clicked_pos)
    }

    pub fn has_mouse_click_down_in_rect(&self, button: MouseButton, rect: Rect, down: bool) -> bool {
        self.has_mouse_click_in_rect(button, rect) && self.mouse.button(button).down == down
    }

    /// `button` was released inside `rect` this frame.
    pub fn is_mouse_click_in_rect(&self, button: MouseButton, rect: Rect) -> bool {
        self.has_mouse_click_down_in_rect(button, rect, false) && self.mouse.button(button).clicked > 0
    }

    pub fn is_mouse_click_down_in_rect(&self, button: MouseButton, rect: Rect, down: bool) -> bool {
        self.has_mouse_click_down_in_rect(button, rect, down) && self.mouse.button(button).clicked > 0
    }

    pub fn any_mouse_click_in_rect(&self, rect: Rect) -> bool {
        [MouseButton::Left, MouseButton::Middle, MouseButton::Right]
            .into_iter()
            .any(|button| self.is_mouse_click_in_rect(button, rect))
    }

    pub fn is_mouse_hovering_rect(&self, rect: Rect) -> bool {
        rect.contains(self.mouse.pos)
    }

    pub fn is_mouse_prev_hovering_rect(&self, rect: Rect) -> bool {
        rect.contains(self.mouse.prev)
    }

    pub fn mouse_clicked(&self, button: MouseButton, rect: Rect) -> bool {
        self.is_mouse_hovering_rect(rect) && self.is_mouse_click_in_rect(button, rect)
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse.button(button).down
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        let state = self.mouse.button(button);
        state.down && state.clicked > 0
    }

    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        let state = self.mouse.button(button);
        !state.down && state.clicked > 0
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        let state = self.keyboard.key(key);
        (state.down && state.clicked > 0) || (!state.down && state.clicked >= 2)
    }

    pub fn is_key_released(&self, key: Key) -> bool {
        let state = self.keyboard.key(key);
        (!state.down && state.clicked > 0) || (state.down && state.clicked >= 2)
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keyboard.key(key).down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_in_one_frame_is_a_click() {
        let mut input = Input::default();
        input.begin();
        input.button(MouseButton::Left, 5.0, 5.0, true);
        input.button(MouseButton::Left, 5.0, 5.0, false);
        input.end();

        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(input.has_mouse_click(MouseButton::Left));
        assert!(input.is_mouse_click_in_rect(MouseButton::Left, rect));
        assert!(input.is_mouse_released(MouseButton::Left));
        assert!(!input.is_mouse_pressed(MouseButton::Left));
    }

    #[test]
    fn begin_keeps_held_state_but_clears_transitions() {
        let mut input = Input::default();
        input.button(MouseButton::Right, 1.0, 1.0, true);
        input.key(Key::Shift, true);
        input.motion(4.0, 3.0);
        input.begin();

        assert!(input.is_mouse_down(MouseButton::Right));
        assert!(!input.is_mouse_pressed(MouseButton::Right));
        assert!(input.is_key_down(Key::Shift));
        assert!(!input.is_key_pressed(Key::Shift));
        assert_eq!(input.mouse.prev, Vec2::new(4.0, 3.0));
        assert_eq!(input.mouse.delta, Vec2::ZERO);
    }

    #[test]
    fn motion_tracks_delta_from_previous_frame() {
        let mut input = Input::default();
        input.motion(10.0, 10.0);
        input.begin();
        input.motion(13.0, 8.0);
        assert_eq!(input.mouse.delta, Vec2::new(3.0, -2.0));
        assert!(input.is_mouse_prev_hovering_rect(Rect::new(9.0, 9.0, 2.0, 2.0)));
    }

    #[test]
    fn repeated_button_state_is_ignored() {
        let mut input = Input::default();
        input.button(MouseButton::Left, 0.0, 0.0, true);
        input.button(MouseButton::Left, 50.0, 50.0, true);
        assert_eq!(input.mouse.button(MouseButton::Left).clicked, 1);
        assert_eq!(input.mouse.button(MouseButton::Left).clicked_pos, Vec2::ZERO);
    }

    #[test]
    fn text_buffer_is_bounded() {
        let mut input = Input::default();
        for _ in 0..INPUT_MAX {
            input.unicode('a');
        }
        assert_eq!(input.keyboard.text().len(), INPUT_MAX - 1);
        assert!(!input.glyph("é"));
        input.begin();
        assert!(input.glyph("é"));
        assert_eq!(input.keyboard.text(), "é");
    }

    #[test]
    fn key_tapped_within_a_frame_counts_as_pressed_and_released() {
        let mut input = Input::default();
        input.key(Key::Enter, true);
        input.key(Key::Enter, false);
        assert!(input.is_key_pressed(Key::Enter));
        assert!(input.is_key_released(Key::Enter));
    }

    #[test]
    fn ungrab_resets_grab_state_at_end() {
        let mut input = Input::default();
        input.grab_mouse();
        input.end();
        assert!(input.mouse.grabbed);
        assert!(!input.mouse.grab);
        input.ungrab_mouse();
        input.end();
        assert!(!input.mouse.grabbed);
    }
}
