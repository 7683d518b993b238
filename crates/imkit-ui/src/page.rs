//! Pool-resident entities and their typed ids
//!
//! Windows, panels and state tables share one [`MemoryPool`] so a context can
//! run out of a single fixed block. Ids stay valid until the entity is freed;
//! a stale id simply resolves to `None`.

use crate::context::Context;
use crate::panel::Panel;
use crate::window::Window;
use imkit_core::{ArenaBuffer, BufferSide, CommandBuffer, PoolId, StateTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) PoolId);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PanelId(pub(crate) PoolId);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableId(pub(crate) PoolId);

#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug)]
pub(crate) enum PageElement {
    Window(Window),
    Panel(Panel),
    Table(StateTable),
}

impl Context {
    /// Stores `element`; in single-block mode a fresh slot is first charged
    /// against the back of the command arena.
    fn alloc_element(&mut self, element: PageElement) -> Option<PoolId> {
        if self.charge_arena && !self.pool.has_free() {
            let size = imkit_core::MemoryPool::<PageElement>::slot_size();
            let align = imkit_core::MemoryPool::<PageElement>::slot_align();
            if let Err(err) = self.memory.alloc(BufferSide::Back, size, align) {
                log::warn!("no room for another page element: {err}");
                return None;
            }
        }
        match self.pool.alloc(element) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("page element pool exhausted: {err}");
                None
            }
        }
    }

    pub(crate) fn create_window(&mut self) -> Option<WindowId> {
        let id = self.alloc_element(PageElement::Window(Window::new(self.seq)))?;
        Some(WindowId(id))
    }

    pub(crate) fn create_panel(&mut self) -> Option<PanelId> {
        self.alloc_element(PageElement::Panel(Panel::default())).map(PanelId)
    }

    pub(crate) fn create_table(&mut self) -> Option<TableId> {
        self.alloc_element(PageElement::Table(StateTable::new(self.seq))).map(TableId)
    }

    pub(crate) fn free_panel(&mut self, id: PanelId) {
        self.pool.free(id.0);
    }

    pub(crate) fn free_table(&mut self, id: TableId) {
        self.pool.free(id.0);
    }

    /// Releases a window together with its popup, panel and state tables.
    pub(crate) fn free_window(&mut self, id: WindowId) {
        if let Some(popup) = self.window_mut(id).and_then(|w| w.popup.win.take()) {
            self.free_window(popup);
        }
        let Some(win) = self.window(id) else {
            return;
        };
        let name = win.name;
        let layout = win.layout;
        let mut table = win.tables;
        while let Some(tid) = table {
            table = self.table(tid).and_then(|t| t.next).map(TableId);
            self.free_table(tid);
        }
        if let Some(panel) = layout {
            self.free_panel(panel);
        }
        if self.index.get(&name) == Some(&id) {
            self.index.remove(&name);
        }
        self.pool.free(id.0);
    }

    pub(crate) fn window(&self, id: WindowId) -> Option<&Window> {
        match self.pool.get(id.0)? {
            PageElement::Window(win) => Some(win),
            _ => None,
        }
    }

    pub(crate) fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        match self.pool.get_mut(id.0)? {
            PageElement::Window(win) => Some(win),
            _ => None,
        }
    }

    /// A window's command buffer together with the arena it records into.
    pub(crate) fn window_buffer(&mut self, id: WindowId) -> Option<(&mut CommandBuffer, &mut ArenaBuffer)> {
        match self.pool.get_mut(id.0)? {
            PageElement::Window(win) => Some((&mut win.buffer, &mut self.memory)),
            _ => None,
        }
    }

    pub(crate) fn panel(&self, id: PanelId) -> Option<&Panel> {
        match self.pool.get(id.0)? {
            PageElement::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub(crate) fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        match self.pool.get_mut(id.0)? {
            PageElement::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub(crate) fn table(&self, id: TableId) -> Option<&StateTable> {
        match self.pool.get(id.0)? {
            PageElement::Table(table) => Some(table),
            _ => None,
        }
    }

    pub(crate) fn table_mut(&mut self, id: TableId) -> Option<&mut StateTable> {
        match self.pool.get_mut(id.0)? {
            PageElement::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Innermost panel of the current window.
    pub(crate) fn current_panel_id(&self) -> Option<PanelId> {
        self.current.and_then(|id| self.window(id)).and_then(|win| win.layout)
    }

    pub(crate) fn current_panel(&self) -> Option<&Panel> {
        self.current_panel_id().and_then(|id| self.panel(id))
    }

    pub(crate) fn current_panel_mut(&mut self) -> Option<&mut Panel> {
        let id = self.current_panel_id()?;
        self.panel_mut(id)
    }

    /// Slot of `hash` in the window's state tables; a hit keeps the page alive.
    pub(crate) fn find_slot(&mut self, win: WindowId, hash: imkit_core::hash::Hash) -> Option<(TableId, usize)> {
        let seq = self.window(win)?.seq;
        let mut cursor = self.window(win)?.tables;
        while let Some(tid) = cursor {
            let table = self.table_mut(tid)?;
            if let Some(index) = table.find(hash) {
                table.seq = seq;
                return Some((tid, index));
            }
            cursor = table.next.map(TableId);
        }
        None
    }

    /// Appends `hash` to the head page, linking a new page when it is full.
    pub(crate) fn add_slot(
        &mut self,
        win: WindowId,
        hash: imkit_core::hash::Hash,
        value: u32,
    ) -> Option<(TableId, usize)> {
        let head = self.window(win)?.tables;
        let head_full = match head {
            Some(tid) => self.table(tid).map_or(true, StateTable::is_full),
            None => true,
        };
        let head = if head_full {
            let tid = self.create_table()?;
            if let Some(old) = head {
                if let Some(old_table) = self.table_mut(old) {
                    old_table.prev = Some(tid.0);
                }
            }
            if let Some(table) = self.table_mut(tid) {
                table.next = head.map(|old| old.0);
            }
            let window = self.window_mut(win)?;
            window.tables = Some(tid);
            window.table_count += 1;
            log::debug!("window {:?} grew to {} state tables", window.name_string, window.table_count);
            tid
        } else {
            head?
        };
        let seq = self.window(win)?.seq;
        let table = self.table_mut(head)?;
        table.seq = seq;
        let index = table.insert(hash, value)?;
        Some((head, index))
    }

    pub(crate) fn slot_value(&self, (table, index): (TableId, usize)) -> Option<u32> {
        self.table(table)?.value(index)
    }

    pub(crate) fn set_slot_value(&mut self, (table, index): (TableId, usize), value: u32) -> bool {
        self.table_mut(table).is_some_and(|t| t.set_value(index, value))
    }

    /// Unlinks a state table page from its window's chain.
    pub(crate) fn remove_table(&mut self, win: WindowId, tid: TableId) {
        let Some((prev, next)) = self.table(tid).map(|t| (t.prev, t.next)) else {
            return;
        };
        if let Some(window) = self.window_mut(win) {
            if window.tables == Some(tid) {
                window.tables = next.map(TableId);
            }
        }
        if let Some(next) = next {
            if let Some(table) = self.table_mut(TableId(next)) {
                table.prev = prev;
            }
        }
        if let Some(prev) = prev {
            if let Some(table) = self.table_mut(TableId(prev)) {
                table.next = next;
            }
        }
        if let Some(table) = self.table_mut(tid) {
            table.next = None;
            table.prev = None;
        }
    }
}
