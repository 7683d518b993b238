use super::*;
use crate::test_support::{context, frame, press_frame, texts};
use crate::window::WindowFlags;

const MAIN: Rect = Rect::new(0.0, 0.0, 200.0, 200.0);

fn single_row<R>(ctx: &mut Context, ui: impl FnOnce(&mut Context) -> R) -> R {
    ctx.begin("Widgets", MAIN, WindowFlags::NO_SCROLLBAR);
    ctx.layout_row_dynamic(30.0, 1);
    let result = ui(ctx);
    ctx.end();
    result
}

fn first_slot(ctx: &mut Context) -> Rect {
    let bounds = frame(ctx, |ctx| single_row(ctx, |ctx| ctx.layout_widget_bounds()));
    ctx.clear();
    bounds
}

fn inside(bounds: Rect) -> Vec2 {
    Vec2::new(bounds.x + 4.0, bounds.y + bounds.h / 2.0)
}

#[test]
fn button_triggers_on_press_only() {
    let mut ctx = context();
    let bounds = first_slot(&mut ctx);
    assert!(press_frame(&mut ctx, MouseButton::Left, inside(bounds), |ctx| {
        single_row(ctx, |ctx| ctx.button_label("Go"))
    }));
    ctx.clear();
    // Still held, but no new press.
    assert!(!frame(&mut ctx, |ctx| single_row(ctx, |ctx| ctx.button_label("Go"))));
}

#[test]
fn repeater_button_triggers_while_held() {
    let mut ctx = context();
    let bounds = first_slot(&mut ctx);
    let repeat = |ctx: &mut Context| {
        single_row(ctx, |ctx| {
            ctx.push_button_behavior(ButtonBehavior::Repeater);
            let clicked = ctx.button_label("More");
            ctx.pop_button_behavior();
            clicked
        })
    };
    assert!(press_frame(&mut ctx, MouseButton::Left, inside(bounds), repeat));
    ctx.clear();
    assert!(frame(&mut ctx, repeat));
}

#[test]
fn hovering_a_button_sets_hover_state() {
    let mut ctx = context();
    let bounds = first_slot(&mut ctx);
    let at = inside(bounds);
    ctx.input_begin();
    ctx.input_motion(at.x, at.y);
    ctx.input_end();
    let clicked = single_row(&mut ctx, |ctx| ctx.button_label("Hover"));
    assert!(!clicked);
    assert!(ctx.widget_is_hovered());
    assert!(ctx.last_widget_state().contains(WidgetStates::ENTERED));
}

#[test]
fn checkbox_toggles_on_click() {
    let mut ctx = context();
    let bounds = first_slot(&mut ctx);
    let mut active = false;
    let changed = press_frame(&mut ctx, MouseButton::Left, inside(bounds), |ctx| {
        single_row(ctx, |ctx| ctx.checkbox_label("Enabled", &mut active))
    });
    assert!(changed);
    assert!(active);
    assert_eq!(texts(&mut ctx), ["Enabled"]);
    ctx.clear();
    let changed = frame(&mut ctx, |ctx| single_row(ctx, |ctx| ctx.checkbox_label("Enabled", &mut active)));
    assert!(!changed);
    assert!(active);
}

#[test]
fn disabled_widgets_ignore_input() {
    let mut ctx = context();
    let bounds = first_slot(&mut ctx);
    let clicked = press_frame(&mut ctx, MouseButton::Left, inside(bounds), |ctx| {
        single_row(ctx, |ctx| {
            ctx.widget_disable_begin();
            let clicked = ctx.button_label("Off");
            ctx.widget_disable_end();
            clicked
        })
    });
    assert!(!clicked);
    assert_eq!(texts(&mut ctx), ["Off"]);
    ctx.clear();
    let state = frame(&mut ctx, |ctx| {
        single_row(ctx, |ctx| {
            ctx.widget_disable_begin();
            let (_, state) = ctx.widget();
            ctx.widget_disable_end();
            state
        })
    });
    assert_eq!(state, WidgetLayoutState::Disabled);
    assert!(state.is_visible());
}

#[test]
fn widget_without_mouse_is_read_only() {
    let mut ctx = context();
    let state = frame(&mut ctx, |ctx| single_row(ctx, |ctx| ctx.widget().1));
    assert_eq!(state, WidgetLayoutState::Rom);
    assert!(state.is_visible());
    assert!(!state.accepts_input());
}

#[test]
fn labels_outside_the_clip_are_skipped() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Short", Rect::new(0.0, 0.0, 200.0, 70.0), WindowFlags::NO_SCROLLBAR);
        ctx.layout_row_dynamic(30.0, 1);
        for text in ["one", "two", "three", "four"] {
            ctx.label(text, TextAlign::LEFT);
        }
        ctx.end();
    });
    assert_eq!(texts(&mut ctx), ["one", "two"]);
}

#[test]
fn widget_fitting_reaches_into_panel_padding() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        single_row(ctx, |ctx| {
            let plain = ctx.layout_widget_bounds();
            let (fitted, _) = ctx.widget_fitting(Vec2::new(2.0, 2.0));
            assert!(fitted.x < plain.x);
            assert!(fitted.w > plain.w);
        })
    });
}

#[test]
fn spacing_leaves_slots_empty() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Widgets", MAIN, WindowFlags::NO_SCROLLBAR);
        ctx.layout_row_dynamic(30.0, 3);
        let row = ctx.layout_widget_bounds();
        ctx.spacing(2);
        let (third, _) = ctx.widget();
        assert!(third.x > row.x + row.w / 2.0);
        assert!(third.max_x() <= row.max_x() + 1.0);
        assert!(third.w < row.w / 2.0);
        ctx.end();
    });
}

#[test]
fn symbol_button_reports_press() {
    let mut ctx = context();
    let bounds = first_slot(&mut ctx);
    assert!(press_frame(&mut ctx, MouseButton::Left, inside(bounds), |ctx| {
        single_row(ctx, |ctx| ctx.button_symbol(Symbol::Plus))
    }));
}

#[test]
fn triangles_point_along_their_heading() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    let up = triangle_from_direction(r, Vec2::ZERO, Heading::Up);
    assert_eq!(up[0], Vec2::new(5.0, 0.0));
    let right = triangle_from_direction(r, Vec2::ZERO, Heading::Right);
    assert_eq!(right[1], Vec2::new(10.0, 5.0));
    let down = triangle_from_direction(r, Vec2::new(1.0, 1.0), Heading::Down);
    assert_eq!(down[2], Vec2::new(5.0, 9.0));
}
