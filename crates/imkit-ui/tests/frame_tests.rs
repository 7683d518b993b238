use imkit_core::CommandKind;
use imkit_graphics::{Rect, Vec2};
use imkit_testing::prelude::*;
use imkit_ui::prelude::*;

const MAIN: Rect = Rect::new(0.0, 0.0, 240.0, 240.0);

fn body<R>(ctx: &mut Context, ui: impl FnOnce(&mut Context) -> R) -> R {
    ctx.begin("Main", MAIN, WindowFlags::NO_SCROLLBAR);
    let result = ui(ctx);
    ctx.end();
    result
}

/// Bounds of the first row slot, which is where a tree header lands too.
fn first_row(harness: &mut Harness) -> Rect {
    let (bounds, _) = harness.frame(|ctx| {
        body(ctx, |ctx| {
            ctx.layout_row_dynamic(30.0, 1);
            ctx.layout_widget_bounds()
        })
    });
    bounds
}

fn columns(values: &[f32]) -> impl FnOnce(&mut Context) + '_ {
    move |ctx: &mut Context| {
        body(ctx, |ctx| {
            ctx.layout_row_dynamic(60.0, 1);
            if ctx.chart_begin(ChartType::Column, 2, 0.0, 10.0) {
                for value in values {
                    ctx.chart_push(*value);
                }
                ctx.chart_end();
            }
        })
    }
}

fn section(ctx: &mut Context) -> bool {
    let open = ctx.tree_push(TreeType::Tab, "Section", CollapseState::Minimized);
    if open {
        ctx.layout_row_dynamic(20.0, 1);
        ctx.label("child", TextAlign::LEFT);
        ctx.tree_pop();
    }
    open
}

#[test]
fn titled_window_records_title_and_body() {
    init_logging();
    let mut harness = Harness::new();
    let (_, output) = harness.frame(|ctx| {
        ctx.begin("Demo", MAIN, WindowFlags::TITLE | WindowFlags::BORDER);
        ctx.layout_row_dynamic(20.0, 1);
        ctx.label("hello", TextAlign::LEFT);
        ctx.end();
    });
    assert_eq!(output.texts, ["Demo", "hello"]);
    assert!(output.count(CommandKind::Scissor) >= 1);
    assert_eq!(harness.frames(), 1);
}

#[test]
fn pressing_a_button_reports_once() {
    init_logging();
    let mut harness = Harness::new();
    let bounds = first_row(&mut harness);
    let button = |ctx: &mut Context| {
        body(ctx, |ctx| {
            ctx.layout_row_dynamic(30.0, 1);
            ctx.button_label("Go")
        })
    };
    harness.press(MouseButton::Left, Vec2::new(bounds.x + 4.0, bounds.y + 4.0));
    let (pressed, _) = harness.frame(button);
    assert!(pressed);
    let (held, _) = harness.frame(button);
    assert!(!held);
}

#[test]
fn tree_expands_on_header_click_and_remembers_it() {
    init_logging();
    let mut harness = Harness::new();
    let header = first_row(&mut harness);

    let (open, output) = harness.frame(|ctx| body(ctx, section));
    assert!(!open);
    assert_eq!(output.texts, ["Section"]);

    harness.press(MouseButton::Left, Vec2::new(header.x + 40.0, header.y + 3.0));
    let (open, output) = harness.frame(|ctx| body(ctx, section));
    assert!(open);
    assert_eq!(output.texts, ["Section", "child"]);

    harness.release(MouseButton::Left, Vec2::new(header.x + 40.0, header.y + 3.0));
    let (open, _) = harness.frame(|ctx| body(ctx, section));
    assert!(open);
}

#[test]
fn line_chart_connects_its_values() {
    init_logging();
    let mut harness = Harness::new();
    let (_, output) = harness.frame(|ctx| {
        body(ctx, |ctx| {
            ctx.layout_row_dynamic(60.0, 1);
            if ctx.chart_begin(ChartType::Lines, 3, 0.0, 10.0) {
                for value in [2.0, 8.0, 5.0] {
                    ctx.chart_push(value);
                }
                ctx.chart_end();
            }
        })
    });
    assert_eq!(output.count(CommandKind::Line), 2);
}

#[test]
fn column_chart_ignores_values_past_its_count() {
    init_logging();
    let mut harness = Harness::new();
    let (_, two) = harness.frame(columns(&[3.0, 6.0]));
    let (_, four) = harness.frame(columns(&[3.0, 6.0, 9.0, 1.0]));
    assert_eq!(two.count(CommandKind::RectFilled), four.count(CommandKind::RectFilled));
}

#[test]
fn closed_window_stays_closed() {
    init_logging();
    let mut harness = Harness::new();
    harness.frame(|ctx| body(ctx, |_| ()));
    harness.context().window_close("Main");
    let (visible, output) = harness.frame(|ctx| {
        let visible = ctx.begin("Main", MAIN, WindowFlags::NO_SCROLLBAR);
        ctx.end();
        visible
    });
    assert!(!visible);
    assert!(output.kinds.is_empty());
    assert!(harness.context().window_is_closed("Main"));
}

#[test]
fn untouched_windows_disappear_after_a_frame() {
    init_logging();
    let mut harness = Harness::new();
    harness.frame(|ctx| {
        body(ctx, |_| ());
        ctx.begin("Other", Rect::new(250.0, 0.0, 100.0, 100.0), WindowFlags::empty());
        ctx.end();
    });
    assert_eq!(harness.context().window_count(), 2);
    harness.frame(|ctx| body(ctx, |_| ()));
    assert_eq!(harness.context().window_count(), 1);
    assert!(harness.context().window_find("Other").is_none());
}
