use super::*;
use crate::test_support::{click_frame, context, frame, press_frame, texts};

const TITLED: WindowFlags = WindowFlags::TITLE.union(WindowFlags::NO_SCROLLBAR);
const MAIN: Rect = Rect::new(0.0, 0.0, 200.0, 200.0);

fn other_window(ctx: &mut Context) {
    ctx.begin("B", Rect::new(220.0, 0.0, 100.0, 100.0), TITLED);
    ctx.end();
}

#[test]
fn popup_is_drawn_after_every_window() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("A", MAIN, TITLED);
        ctx.layout_row_dynamic(20.0, 1);
        assert!(ctx.popup_begin(PopupKind::Static, "menu", WindowFlags::empty(), Rect::new(10.0, 10.0, 120.0, 80.0)));
        ctx.layout_row_dynamic(20.0, 1);
        ctx.label("inside", TextAlign::LEFT);
        ctx.popup_end();
        ctx.label("after", TextAlign::LEFT);
        ctx.end();
        other_window(ctx);
    });
    assert_eq!(texts(&mut ctx), ["A", "after", "B", "inside"]);
}

#[test]
fn open_popup_makes_parent_read_only() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("A", MAIN, TITLED);
        assert!(ctx.popup_begin(PopupKind::Dynamic, "p", WindowFlags::empty(), Rect::new(0.0, 0.0, 80.0, 80.0)));
        ctx.popup_end();
        let flags = ctx.current_panel().map_or(WindowFlags::empty(), |panel| panel.flags());
        assert!(flags.contains(WindowFlags::ROM));

        assert!(ctx.popup_begin(PopupKind::Dynamic, "p", WindowFlags::empty(), Rect::new(0.0, 0.0, 80.0, 80.0)));
        ctx.popup_close();
        ctx.popup_end();
        let flags = ctx.current_panel().map_or(WindowFlags::empty(), |panel| panel.flags());
        assert!(flags.contains(WindowFlags::REMOVE_ROM));
        ctx.end();
    });
}

#[test]
fn popup_with_other_name_waits_for_active_one() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("A", MAIN, TITLED);
        assert!(ctx.popup_begin(PopupKind::Static, "first", WindowFlags::empty(), Rect::new(0.0, 0.0, 80.0, 80.0)));
        ctx.popup_end();
        assert!(!ctx.popup_begin(PopupKind::Static, "second", WindowFlags::empty(), Rect::new(0.0, 0.0, 80.0, 80.0)));
        ctx.end();
    });
}

#[test]
fn popup_scroll_is_stored_on_the_popup() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("A", MAIN, TITLED);
        assert!(ctx.popup_begin(PopupKind::Static, "p", WindowFlags::empty(), Rect::new(0.0, 0.0, 80.0, 80.0)));
        ctx.popup_set_scroll(Scroll::new(0, 12));
        assert_eq!(ctx.popup_get_scroll(), Scroll::new(0, 12));
        ctx.popup_end();
        ctx.end();
    });
}

fn contextual(ctx: &mut Context) -> bool {
    ctx.begin("A", MAIN, TITLED);
    let trigger = ctx.window_get_bounds();
    let open = ctx.contextual_begin(WindowFlags::empty(), Vec2::new(100.0, 80.0), trigger);
    if open {
        ctx.layout_row_dynamic(20.0, 1);
        ctx.contextual_item_label("Copy", TextAlign::LEFT);
        ctx.contextual_end();
    }
    ctx.end();
    open
}

#[test]
fn contextual_menu_opens_on_right_click_and_closes_outside() {
    let mut ctx = context();
    assert!(!frame(&mut ctx, contextual));
    ctx.clear();
    assert!(click_frame(&mut ctx, MouseButton::Right, Vec2::new(100.0, 100.0), contextual));
    assert_eq!(texts(&mut ctx), ["A", "Copy"]);
    ctx.clear();
    assert!(frame(&mut ctx, contextual));
    ctx.clear();
    assert!(!press_frame(&mut ctx, MouseButton::Left, Vec2::new(20.0, 40.0), contextual));
}

#[test]
fn contextual_item_click_closes_menu() {
    let mut ctx = context();
    frame(&mut ctx, contextual);
    ctx.clear();
    click_frame(&mut ctx, MouseButton::Right, Vec2::new(100.0, 100.0), contextual);
    ctx.clear();
    // The first item sits at the top of the menu body.
    let clicked = press_frame(&mut ctx, MouseButton::Left, Vec2::new(130.0, 110.0), |ctx| {
        ctx.begin("A", MAIN, TITLED);
        let trigger = ctx.window_get_bounds();
        let mut clicked = false;
        if ctx.contextual_begin(WindowFlags::empty(), Vec2::new(100.0, 80.0), trigger) {
            ctx.layout_row_dynamic(20.0, 1);
            clicked = ctx.contextual_item_label("Copy", TextAlign::LEFT);
            ctx.contextual_end();
        }
        ctx.end();
        clicked
    });
    assert!(clicked);
    ctx.clear();
    assert!(!frame(&mut ctx, contextual));
}

fn combo(ctx: &mut Context) -> (Rect, bool) {
    ctx.begin("A", MAIN, TITLED);
    ctx.layout_row_dynamic(25.0, 1);
    let header = ctx.layout_widget_bounds();
    let open = ctx.combo_begin_label("Apple", Vec2::new(150.0, 120.0));
    if open {
        ctx.layout_row_dynamic(20.0, 1);
        ctx.combo_item_label("Apple", TextAlign::LEFT);
        ctx.combo_item_label("Pear", TextAlign::LEFT);
        ctx.combo_end();
    }
    ctx.end();
    (header, open)
}

#[test]
fn combo_opens_on_header_press_and_stays_open() {
    let mut ctx = context();
    let (header, open) = frame(&mut ctx, combo);
    assert!(!open);
    ctx.clear();
    let at = Vec2::new(header.x + 10.0, header.y + 8.0);
    let (_, open) = press_frame(&mut ctx, MouseButton::Left, at, combo);
    assert!(open);
    assert_eq!(texts(&mut ctx), ["A", "Apple", "Apple", "Pear"]);
    ctx.clear();
    assert!(frame(&mut ctx, combo).1);
}

#[test]
fn tooltip_is_drawn_on_top() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("A", MAIN, TITLED);
        ctx.layout_row_dynamic(20.0, 1);
        ctx.tooltip("hint");
        ctx.end();
        other_window(ctx);
    });
    assert_eq!(texts(&mut ctx), ["A", "B", "hint"]);
    ctx.clear();
    frame(&mut ctx, |ctx| {
        ctx.begin("A", MAIN, TITLED);
        ctx.end();
    });
    assert_eq!(texts(&mut ctx), ["A"]);
}

fn menubar(ctx: &mut Context) -> (Rect, bool) {
    ctx.begin("A", MAIN, TITLED);
    ctx.menubar_begin();
    ctx.layout_row_static(20.0, 60.0, 1);
    let header = ctx.layout_widget_bounds();
    let open = ctx.menu_begin_label("File", TextAlign::LEFT, Vec2::new(120.0, 100.0));
    if open {
        ctx.layout_row_dynamic(20.0, 1);
        ctx.menu_item_label("Open", TextAlign::LEFT);
        ctx.menu_end();
    }
    ctx.menubar_end();
    ctx.end();
    (header, open)
}

#[test]
fn menu_opens_from_menubar() {
    let mut ctx = context();
    let (header, open) = frame(&mut ctx, menubar);
    assert!(!open);
    ctx.clear();
    let at = Vec2::new(header.x + 10.0, header.y + 8.0);
    let (_, open) = press_frame(&mut ctx, MouseButton::Left, at, menubar);
    assert!(open);
    assert_eq!(texts(&mut ctx), ["A", "File", "Open"]);
}

#[test]
fn menubar_moves_content_below_it() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("A", MAIN, TITLED);
        let before = ctx.window_get_content_region();
        ctx.menubar_begin();
        ctx.layout_row_static(20.0, 60.0, 1);
        ctx.widget();
        ctx.menubar_end();
        let after = ctx.window_get_content_region();
        assert!(after.y > before.y);
        assert!(after.h < before.h);
        ctx.end();
    });
}
