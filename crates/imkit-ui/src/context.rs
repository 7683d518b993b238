//! The immediate-mode context and its frame lifecycle
//!
//! A frame runs `input_begin` .. `input_end`, any number of `begin` .. `end`
//! window blocks, then [`Context::commands`] (or a vertex conversion) and
//! finally [`Context::clear`]. Windows that were not begun during a frame are
//! collected by the following `clear`.

use crate::clipboard::Clipboard;
use crate::config::{Config, MemoryConfig};
use crate::input::{Input, Key, MouseButton};
use crate::page::{PageElement, WindowId};
use crate::panel::{HostKind, PanelHost, PanelType};
use crate::stack::{ButtonBehavior, ConfigStacks};
use crate::style::{CursorKind, FontId, Style};
use crate::widgets::{Canvas, WidgetStates};
use crate::window::{WindowFlags, WindowName};
use imkit_core::collections::map::HashMap;
use imkit_core::hash::{self, Hash};
use imkit_core::{
    heap_allocator, set_next, ArenaBuffer, BufferSide, Clipping, CommandBuffer, Commands, Font, MemoryPool,
    MemoryStatus, SharedAllocator,
};
use imkit_graphics::{Color, Rect, Vec2};
use std::rc::Rc;

/// Entities per pool page when the pool is backed by a single fixed block.
const FIXED_PAGE_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InsertLocation {
    Front,
    Back,
}

pub struct Context {
    pub(crate) input: Input,
    pub(crate) style: Style,
    pub(crate) memory: ArenaBuffer,
    pub(crate) pool: MemoryPool<PageElement>,
    /// Pool slots are charged against the back of `memory`.
    pub(crate) charge_arena: bool,
    /// `clear` may release the whole arena because entities live elsewhere.
    use_pool: bool,
    fonts: Vec<Rc<dyn Font>>,
    clipboard: Option<Box<dyn Clipboard>>,
    pub(crate) last_widget_state: WidgetStates,
    pub(crate) button_behavior: ButtonBehavior,
    pub(crate) stacks: ConfigStacks,
    overlay: CommandBuffer,

    pub(crate) begin: Option<WindowId>,
    pub(crate) end: Option<WindowId>,
    pub(crate) active: Option<WindowId>,
    pub(crate) current: Option<WindowId>,
    /// The last `begin` could not get a window; its `end` is a no-op.
    begin_failed: bool,
    count: u32,
    pub(crate) index: HashMap<Hash, WindowId>,
    pub(crate) seq: u32,
    build: bool,
    head: Option<usize>,
    dirty: bool,
    config: Config,
}

impl Context {
    pub fn new(config: Config, font: Rc<dyn Font>) -> Self {
        Self::with_allocator(config, font, heap_allocator())
    }

    /// Context whose growable memory is requested from `allocator`. Fixed
    /// memory configurations ignore it.
    pub fn with_allocator(config: Config, font: Rc<dyn Font>, allocator: SharedAllocator) -> Self {
        let (memory, pool, charge_arena) = match config.memory {
            MemoryConfig::Dynamic {
                initial_size,
                grow_factor,
                page_capacity,
            } => (
                ArenaBuffer::new(Rc::clone(&allocator), initial_size, grow_factor),
                MemoryPool::new(allocator, page_capacity),
                false,
            ),
            MemoryConfig::Fixed { size } => (
                ArenaBuffer::fixed(size),
                MemoryPool::new(heap_allocator(), FIXED_PAGE_CAPACITY),
                true,
            ),
            MemoryConfig::Split {
                command_size,
                pool_size,
            } => (ArenaBuffer::fixed(command_size), MemoryPool::fixed(pool_size), false),
        };
        let mut style = Style::new(config.theme);
        style.cursor_visible = config.cursor_visible;
        log::debug!("context created with {:?}", config.memory);

        Self {
            input: Input::default(),
            style,
            memory,
            pool,
            charge_arena,
            use_pool: !charge_arena,
            fonts: vec![font],
            clipboard: None,
            last_widget_state: WidgetStates::empty(),
            button_behavior: ButtonBehavior::Default,
            stacks: ConfigStacks::default(),
            overlay: CommandBuffer::new(Clipping::Off),
            begin: None,
            end: None,
            active: None,
            current: None,
            begin_failed: false,
            count: 0,
            index: HashMap::default(),
            seq: 1,
            build: false,
            head: None,
            dirty: false,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Registers another font; select it with [`Context::push_font`] or by
    /// setting the style's font.
    pub fn add_font(&mut self, font: Rc<dyn Font>) -> FontId {
        self.fonts.push(font);
        FontId(self.fonts.len() as u32 - 1)
    }

    /// Font selected by the style, falling back to the first registered one.
    pub fn font(&self) -> Rc<dyn Font> {
        match self.fonts.get(self.style.font.0 as usize) {
            Some(font) => Rc::clone(font),
            None => Rc::clone(&self.fonts[0]),
        }
    }

    /// Every registered font, indexed by [`FontId`]. Text commands refer to
    /// fonts by this index.
    pub fn fonts(&self) -> &[Rc<dyn Font>] {
        &self.fonts
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn Clipboard>) {
        self.clipboard = Some(clipboard);
    }

    pub fn clipboard_mut(&mut self) -> Option<&mut (dyn Clipboard + 'static)> {
        self.clipboard.as_deref_mut()
    }

    pub fn memory_status(&self) -> MemoryStatus {
        self.memory.info()
    }

    /// Live windows, panels and state tables.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn pool_page_count(&self) -> usize {
        self.pool.page_count()
    }

    /// Number of windows in the z-order list.
    pub fn window_count(&self) -> u32 {
        self.count
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }

    /// Releases every window and all memory.
    pub fn free(&mut self) {
        self.memory.free();
        self.pool.free_all();
        self.index.clear();
        self.begin = None;
        self.end = None;
        self.active = None;
        self.current = None;
        self.count = 0;
        self.head = None;
        self.build = false;
        self.overlay = CommandBuffer::new(Clipping::Off);
    }

    /// Gives `f` a canvas on the current window's command buffer.
    pub(crate) fn with_canvas<R: Default>(&mut self, f: impl FnOnce(&mut Canvas<'_>, Option<&Input>) -> R) -> R {
        let Some(win) = self.current else {
            return R::default();
        };
        let font = self.font();
        let font_id = self.style.font.0;
        let Some(PageElement::Window(window)) = self.pool.get_mut(win.0) else {
            return R::default();
        };
        let mut canvas = Canvas {
            buffer: &mut window.buffer,
            arena: &mut self.memory,
            font: &*font,
            font_id,
        };
        f(&mut canvas, Some(&self.input))
    }

    /// Paints the background of a freshly started row in dynamic panels.
    pub(crate) fn row_background(&mut self, row: imkit_layout::RowStart) {
        let Some(win) = self.current else {
            return;
        };
        let dynamic = self
            .current_panel()
            .is_some_and(|panel| panel.flags.contains(WindowFlags::DYNAMIC));
        if !dynamic {
            return;
        }
        let Some(bounds) = self.window(win).map(|w| w.bounds) else {
            return;
        };
        let background = self.style.window.background;
        let rect = Rect::new(bounds.x, row.y - 1.0, bounds.w, row.height + 1.0);
        self.with_canvas(|canvas, _| canvas.fill_rect(rect, 0.0, background));
    }

    pub fn input_begin(&mut self) {
        self.dirty = true;
        self.input.begin();
        self.style.cursor_last = Some(self.style.cursor_active);
    }

    pub fn input_end(&mut self) {
        self.input.end();
    }

    pub fn input_motion(&mut self, x: f32, y: f32) {
        self.input.motion(x, y);
    }

    pub fn input_key(&mut self, key: Key, down: bool) {
        self.input.key(key, down);
    }

    pub fn input_button(&mut self, button: MouseButton, x: f32, y: f32, down: bool) {
        self.input.button(button, x, y, down);
    }

    pub fn input_scroll(&mut self, delta: Vec2) {
        self.input.scroll(delta);
    }

    /// Queues an ASCII character; non-ASCII bytes are ignored.
    pub fn input_char(&mut self, c: u8) -> bool {
        c.is_ascii() && self.input.unicode(c as char)
    }

    pub fn input_unicode(&mut self, ch: char) -> bool {
        self.input.unicode(ch)
    }

    pub fn input_glyph(&mut self, glyph: &str) -> bool {
        self.input.glyph(glyph)
    }

    pub fn input_grab_mouse(&mut self) {
        self.input.grab_mouse();
    }

    pub fn input_ungrab_mouse(&mut self) {
        self.input.ungrab_mouse();
    }

    /// Pushes a font onto the font stack and selects it.
    pub fn push_font(&mut self, font: FontId) -> bool {
        self.stacks.push_font(&mut self.style, font)
    }

    pub fn pop_font(&mut self) -> bool {
        self.stacks.pop_font(&mut self.style)
    }

    pub fn push_button_behavior(&mut self, behavior: ButtonBehavior) -> bool {
        self.stacks.push_button_behavior(&mut self.button_behavior, behavior)
    }

    pub fn pop_button_behavior(&mut self) -> bool {
        self.stacks.pop_button_behavior(&mut self.button_behavior)
    }

    /// Style and stacks together for the generic push/pop operations.
    pub fn config_stacks(&mut self) -> (&mut ConfigStacks, &mut Style) {
        (&mut self.stacks, &mut self.style)
    }

    pub(crate) fn window_ids(&self) -> Vec<WindowId> {
        let mut ids = Vec::with_capacity(self.count as usize);
        let mut cursor = self.begin;
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.window(id).and_then(|w| w.next);
        }
        ids
    }

    pub(crate) fn find_window(&self, hash: Hash, name: &str) -> Option<WindowId> {
        let id = *self.index.get(&hash)?;
        let win = self.window(id)?;
        (win.name_string.as_str() == WindowName::new(name).as_str()).then_some(id)
    }

    pub(crate) fn insert_window(&mut self, id: WindowId, location: InsertLocation) {
        if self.window_ids().contains(&id) {
            debug_assert!(false, "window inserted twice");
            return;
        }
        let Some(begin) = self.begin else {
            if let Some(win) = self.window_mut(id) {
                win.next = None;
                win.prev = None;
            }
            self.begin = Some(id);
            self.end = Some(id);
            self.count = 1;
            return;
        };
        match location {
            InsertLocation::Back => {
                let end = self.end;
                if let Some(end_win) = end.and_then(|e| self.window_mut(e)) {
                    end_win.flags.insert(WindowFlags::ROM);
                    end_win.next = Some(id);
                }
                if let Some(win) = self.window_mut(id) {
                    win.prev = end;
                    win.next = None;
                    win.flags.remove(WindowFlags::ROM);
                }
                self.end = Some(id);
                self.active = Some(id);
            }
            InsertLocation::Front => {
                if let Some(begin_win) = self.window_mut(begin) {
                    begin_win.prev = Some(id);
                }
                if let Some(win) = self.window_mut(id) {
                    win.next = Some(begin);
                    win.prev = None;
                    win.flags.remove(WindowFlags::ROM);
                }
                self.begin = Some(id);
            }
        }
        self.count += 1;
    }

    pub(crate) fn remove_window(&mut self, id: WindowId) {
        let Some((prev, next)) = self.window(id).map(|w| (w.prev, w.next)) else {
            return;
        };
        if self.begin == Some(id) || self.end == Some(id) {
            if self.begin == Some(id) {
                self.begin = next;
                if let Some(next_win) = next.and_then(|n| self.window_mut(n)) {
                    next_win.prev = None;
                }
            }
            if self.end == Some(id) {
                self.end = prev;
                if let Some(prev_win) = prev.and_then(|p| self.window_mut(p)) {
                    prev_win.next = None;
                }
            }
        } else {
            if let Some(next_win) = next.and_then(|n| self.window_mut(n)) {
                next_win.prev = prev;
            }
            if let Some(prev_win) = prev.and_then(|p| self.window_mut(p)) {
                prev_win.next = next;
            }
        }
        if self.active == Some(id) || self.active.is_none() {
            self.active = self.end;
            if let Some(end_win) = self.end.and_then(|e| self.window_mut(e)) {
                end_win.flags.remove(WindowFlags::ROM);
            }
        }
        if let Some(win) = self.window_mut(id) {
            win.next = None;
            win.prev = None;
        }
        self.count = self.count.saturating_sub(1);
    }

    /// Starts a window whose title is its name.
    pub fn begin(&mut self, name: &str, bounds: Rect, flags: WindowFlags) -> bool {
        self.begin_titled(name, name, bounds, flags)
    }

    /// Starts the window `name`, creating it on first use. Returns whether
    /// its body is visible; [`end`](Self::end) must be called either way.
    pub fn begin_titled(&mut self, name: &str, title: &str, bounds: Rect, flags: WindowFlags) -> bool {
        if self.current.is_some() {
            debug_assert!(false, "begin called while another window is open");
            log::warn!("begin({name:?}) while another window is open");
            return false;
        }
        self.dirty = true;
        self.begin_failed = false;
        let flags = flags & WindowFlags::PUBLIC;
        let name_hash = hash::hash_str(name, hash::seed::WINDOW);

        let win = match self.find_window(name_hash, name) {
            None => {
                let Some(id) = self.create_window() else {
                    log::warn!("no memory left for window {name:?}");
                    self.begin_failed = true;
                    return false;
                };
                let location = if flags.contains(WindowFlags::BACKGROUND) {
                    InsertLocation::Front
                } else {
                    InsertLocation::Back
                };
                self.insert_window(id, location);
                if let Some(win) = self.window_mut(id) {
                    win.buffer = CommandBuffer::new(Clipping::On);
                    win.flags = flags;
                    win.bounds = bounds;
                    win.name = name_hash;
                    win.name_string = WindowName::new(name);
                    win.popup.win = None;
                    win.widgets_disabled = false;
                }
                self.index.insert(name_hash, id);
                if self.active.is_none() {
                    self.active = Some(id);
                }
                log::debug!("created window {name:?}");
                id
            }
            Some(id) => {
                let seq = self.seq;
                let Some(win) = self.window_mut(id) else {
                    return false;
                };
                win.flags.remove(WindowFlags::PUBLIC);
                win.flags.insert(flags);
                if !win.flags.intersects(WindowFlags::MOVABLE | WindowFlags::SCALABLE) {
                    win.bounds = bounds;
                }
                if win.seq == seq {
                    debug_assert!(false, "window {name:?} begun twice in one frame");
                    log::warn!("window {name:?} begun twice in one frame");
                    return false;
                }
                win.seq = seq;
                let hidden = win.flags.contains(WindowFlags::HIDDEN);
                if self.active.is_none() && !hidden {
                    self.active = Some(id);
                    self.end = Some(id);
                }
                id
            }
        };

        let Some(flags) = self.window(win).map(|w| w.flags) else {
            return false;
        };
        if flags.contains(WindowFlags::HIDDEN) {
            self.current = Some(win);
            if let Some(window) = self.window_mut(win) {
                window.layout = None;
            }
            return false;
        }
        if let Some((buffer, arena)) = self.window_buffer(win) {
            buffer.start(arena);
        }

        if !flags.contains(WindowFlags::NO_INPUT) {
            self.activate_on_input(win);
        }

        let Some(panel) = self.create_panel() else {
            self.current = Some(win);
            if let Some(window) = self.window_mut(win) {
                window.layout = None;
            }
            return false;
        };
        if let Some(window) = self.window_mut(win) {
            window.layout = Some(panel);
        }
        self.current = Some(win);
        let Some(mut host) = self.window_host(win, panel) else {
            return false;
        };
        let visible = self.panel_begin(&mut host, Some(title), PanelType::Window);
        self.commit_window_host(&host);
        visible
    }

    fn collapsed_bounds(&self, id: WindowId, header_height: f32) -> Option<Rect> {
        let win = self.window(id)?;
        Some(if win.flags.contains(WindowFlags::MINIMIZED) {
            Rect::new(win.bounds.x, win.bounds.y, win.bounds.w, header_height)
        } else {
            win.bounds
        })
    }

    fn popup_blocks(&self, id: WindowId, area: Rect) -> bool {
        let Some(win) = self.window(id) else {
            return false;
        };
        let Some(popup) = win.popup.win.filter(|_| win.popup.active) else {
            return false;
        };
        !win.flags.contains(WindowFlags::HIDDEN)
            && self.window(popup).is_some_and(|p| area.intersects(&p.bounds))
    }

    /// Hover and click activation: brings `win` to the top of the z-order
    /// unless another window covers the mouse.
    fn activate_on_input(&mut self, win: WindowId) {
        let header = &self.style.window.header;
        let header_height = self.font().height() + 2.0 * header.padding.y + 2.0 * header.label_padding.y;
        let Some(win_bounds) = self.collapsed_bounds(win, header_height) else {
            return;
        };
        let left = *self.input.mouse.button(MouseButton::Left);
        let in_panel =
            self.input.has_mouse_click_down_in_rect(MouseButton::Left, win_bounds, true) && left.clicked != 0;
        let hovered = self.input.is_mouse_hovering_rect(win_bounds);
        let next_of = |ctx: &Self, id: WindowId| ctx.window(id).and_then(|w| w.next);

        let mut blocker = Some(win);
        if self.active != Some(win) && hovered && !left.down {
            blocker = next_of(self, win);
            while let Some(iter) = blocker {
                let Some(iter_bounds) = self.collapsed_bounds(iter, header_height) else {
                    break;
                };
                let hidden = self.window(iter).is_some_and(|w| w.flags.contains(WindowFlags::HIDDEN));
                if win_bounds.intersects(&iter_bounds) && !hidden {
                    break;
                }
                if self.popup_blocks(iter, win_bounds) {
                    break;
                }
                blocker = next_of(self, iter);
            }
        }

        if blocker.is_some() && in_panel && self.end != Some(win) {
            blocker = next_of(self, win);
            while let Some(iter) = blocker {
                let Some(iter_bounds) = self.collapsed_bounds(iter, header_height) else {
                    break;
                };
                let hidden = self.window(iter).is_some_and(|w| w.flags.contains(WindowFlags::HIDDEN));
                if iter_bounds.contains(self.input.mouse.pos) && !hidden {
                    break;
                }
                if self.popup_blocks(iter, win_bounds) {
                    break;
                }
                blocker = next_of(self, iter);
            }
        }

        let Some(flags) = self.window(win).map(|w| w.flags) else {
            return;
        };
        match blocker {
            Some(iter) if !flags.contains(WindowFlags::ROM) && flags.contains(WindowFlags::BACKGROUND) => {
                if let Some(window) = self.window_mut(win) {
                    window.flags.insert(WindowFlags::ROM);
                }
                let iter_background = match self.window_mut(iter) {
                    Some(iter_win) => {
                        iter_win.flags.remove(WindowFlags::ROM);
                        iter_win.flags.contains(WindowFlags::BACKGROUND)
                    }
                    None => return,
                };
                self.active = Some(iter);
                if !iter_background {
                    self.remove_window(iter);
                    self.insert_window(iter, InsertLocation::Back);
                }
            }
            _ => {
                if blocker.is_none() && self.end != Some(win) {
                    if !flags.contains(WindowFlags::BACKGROUND) {
                        self.remove_window(win);
                        self.insert_window(win, InsertLocation::Back);
                    }
                    if let Some(window) = self.window_mut(win) {
                        window.flags.remove(WindowFlags::ROM);
                    }
                    self.active = Some(win);
                }
                if self.end != Some(win) && !flags.contains(WindowFlags::BACKGROUND) {
                    if let Some(window) = self.window_mut(win) {
                        window.flags.insert(WindowFlags::ROM);
                    }
                }
            }
        }
    }

    /// Closes the window opened by the last [`begin`](Self::begin).
    pub fn end(&mut self) {
        if self.current.is_none() && std::mem::take(&mut self.begin_failed) {
            return;
        }
        let Some(win) = self.current else {
            debug_assert!(false, "end called without begin");
            log::warn!("end called without a matching begin");
            return;
        };
        let Some((layout, flags)) = self.window(win).map(|w| (w.layout, w.flags)) else {
            self.current = None;
            return;
        };
        let Some(panel) = layout else {
            self.current = None;
            return;
        };
        if flags.contains(WindowFlags::HIDDEN) {
            self.free_panel(panel);
            if let Some(window) = self.window_mut(win) {
                window.layout = None;
            }
            self.current = None;
            return;
        }
        if self.panel(panel).is_some_and(|p| p.kind != PanelType::Window) {
            debug_assert!(false, "end called with an open group or popup");
            log::warn!("end called with an open group or popup");
        }
        if let Some(mut host) = self.window_host(win, panel) {
            self.panel_end(&mut host);
            self.commit_window_host(&host);
        }
        self.free_panel(panel);
        if let Some(window) = self.window_mut(win) {
            window.layout = None;
        }
        self.current = None;
    }

    /// Ends the frame: releases this frame's commands, collects windows and
    /// state that were not used, and advances the frame counter. Calling it
    /// again before any new frame activity does nothing.
    pub fn clear(&mut self) {
        if !self.dirty {
            log::trace!("clear skipped, frame {} already cleared", self.seq);
            return;
        }
        if self.current.is_some() {
            debug_assert!(false, "clear called inside begin/end");
            log::warn!("clear called inside begin/end");
            return;
        }
        self.dirty = false;
        if self.use_pool {
            self.memory.clear();
        } else {
            self.memory.reset(BufferSide::Front);
        }
        self.build = false;
        self.head = None;
        self.last_widget_state = WidgetStates::empty();
        self.style.cursor_active = CursorKind::Arrow;
        self.overlay = CommandBuffer::new(Clipping::Off);

        let seq = self.seq;
        for id in self.window_ids() {
            if let Some(win) = self.window_mut(id) {
                win.popup.buf.active = false;
            }
            let Some((flags, win_seq, prev)) = self.window(id).map(|w| (w.flags, w.seq, w.prev)) else {
                continue;
            };
            if flags.contains(WindowFlags::MINIMIZED) && !flags.contains(WindowFlags::CLOSED) && win_seq == seq {
                continue;
            }
            if flags.intersects(WindowFlags::HIDDEN | WindowFlags::CLOSED) && self.active == Some(id) {
                self.active = prev;
                if let Some(prev) = prev.and_then(|p| self.window_mut(p)) {
                    prev.flags.remove(WindowFlags::ROM);
                }
            }

            if let Some(popup) = self.window(id).and_then(|w| w.popup.win) {
                if self.window(popup).is_some_and(|p| p.seq != seq) {
                    self.free_window(popup);
                    if let Some(win) = self.window_mut(id) {
                        win.popup.win = None;
                    }
                    log::debug!("collected popup of window {id:?}");
                }
            }

            let mut table = self.window(id).and_then(|w| w.tables);
            while let Some(tid) = table {
                let Some((next, table_seq)) = self.table(tid).map(|t| (t.next, t.seq)) else {
                    break;
                };
                if table_seq != seq {
                    self.remove_table(id, tid);
                    self.free_table(tid);
                    if let Some(win) = self.window_mut(id) {
                        win.table_count = win.table_count.saturating_sub(1);
                    }
                }
                table = next.map(crate::page::TableId);
            }

            let Some(win) = self.window(id) else {
                continue;
            };
            if win.seq != seq || win.flags.contains(WindowFlags::CLOSED) {
                log::debug!("collected window {:?}", win.name_string);
                self.remove_window(id);
                self.free_window(id);
            }
        }
        self.seq = self.seq.wrapping_add(1);
    }

    /// Links every visible window buffer in z-order, then active popups,
    /// then the cursor overlay, into one command list.
    pub fn build(&mut self) {
        if self.build {
            return;
        }
        self.build = true;

        self.overlay = CommandBuffer::new(Clipping::Off);
        if self.style.cursor_visible && !self.input.mouse.grabbed {
            if let Some(cursor) = self.style.active_cursor().copied() {
                self.overlay.start(&self.memory);
                let pos = self.input.mouse.pos;
                let rect = Rect::new(
                    pos.x - cursor.offset.x,
                    pos.y - cursor.offset.y,
                    cursor.size.x,
                    cursor.size.y,
                );
                self.overlay.draw_image(&mut self.memory, rect, &cursor.image, Color::WHITE);
                self.overlay.finish(&self.memory);
            }
        }

        let mut chains: Vec<(usize, usize)> = Vec::new();
        let ids = self.window_ids();
        for &id in &ids {
            let Some(win) = self.window(id) else {
                continue;
            };
            if win.flags.contains(WindowFlags::HIDDEN) || win.seq != self.seq {
                continue;
            }
            if let (Some(first), Some(last)) = (win.buffer.begin(), win.buffer.last()) {
                chains.push((first, last));
            }
        }
        for &id in &ids {
            let Some(win) = self.window_mut(id) else {
                continue;
            };
            let buf = win.popup.buf;
            win.popup.buf.active = false;
            if !buf.active {
                continue;
            }
            if let (Some(first), Some(last)) = (buf.first, buf.last) {
                chains.push((first, last));
            }
        }
        if let (Some(first), Some(last)) = (self.overlay.begin(), self.overlay.last()) {
            chains.push((first, last));
        }

        for pair in chains.windows(2) {
            set_next(&mut self.memory, pair[0].1, Some(pair[1].0));
        }
        if let Some(&(_, last)) = chains.last() {
            set_next(&mut self.memory, last, None);
        }
        self.head = chains.first().map(|&(first, _)| first);
        log::trace!("built command list from {} chains", chains.len());
    }

    /// Draw commands of the frame, building the list on first use. The list
    /// stays valid until [`clear`](Self::clear).
    pub fn commands(&mut self) -> Commands<'_> {
        self.build();
        Commands::new(&self.memory, self.head)
    }

    /// Read access to the arena the command list lives in.
    pub fn memory(&self) -> &ArenaBuffer {
        &self.memory
    }

    /// Head offset of the built command list.
    pub fn command_head(&mut self) -> Option<usize> {
        self.build();
        self.head
    }

    /// Looks up `hash` in the current window's state table.
    pub fn find_value(&mut self, hash: Hash) -> Option<u32> {
        let win = self.current?;
        let slot = self.find_slot(win, hash)?;
        self.slot_value(slot)
    }

    /// Stores a new value for `hash` in the current window's state table.
    pub fn add_value(&mut self, hash: Hash, value: u32) -> bool {
        let Some(win) = self.current else {
            return false;
        };
        self.add_slot(win, hash, value).is_some()
    }

    /// Updates `hash`, adding it when missing.
    pub fn set_value(&mut self, hash: Hash, value: u32) -> bool {
        let Some(win) = self.current else {
            return false;
        };
        match self.find_slot(win, hash) {
            Some(slot) => self.set_slot_value(slot, value),
            None => self.add_slot(win, hash, value).is_some(),
        }
    }

    pub(crate) fn group_host(&self, win: WindowId, panel: crate::page::PanelId, bounds: Rect, flags: WindowFlags) -> Option<PanelHost> {
        let window = self.window(win)?;
        Some(PanelHost {
            kind: HostKind::Group,
            window: win,
            panel,
            bounds,
            flags,
            scroll: Default::default(),
            buffer: window.buffer,
        })
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
