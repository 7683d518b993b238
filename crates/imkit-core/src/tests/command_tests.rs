use super::*;
use crate::font::Glyph;

struct FixedWidth;

impl Font for FixedWidth {
    fn height(&self) -> f32 {
        10.0
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * 8.0
    }

    fn query_glyph(&self, _codepoint: char, _next: Option<char>) -> Glyph {
        Glyph {
            width: 8.0,
            height: 10.0,
            xadvance: 8.0,
            ..Glyph::default()
        }
    }
}

fn recorder() -> (ArenaBuffer, CommandBuffer) {
    let arena = ArenaBuffer::fixed(4096);
    let mut buffer = CommandBuffer::new(Clipping::On);
    buffer.start(&arena);
    (arena, buffer)
}

#[test]
fn every_push_is_iterated_once() {
    let (mut arena, mut buffer) = recorder();
    buffer.push_scissor(&mut arena, Rect::new(0.0, 0.0, 200.0, 200.0));
    for i in 0..5 {
        buffer.fill_rect(
            &mut arena,
            Rect::new(i as f32 * 10.0, 0.0, 8.0, 8.0),
            0.0,
            Color::RED,
        );
    }
    buffer.stroke_line(
        &mut arena,
        Vec2::new(0.0, 0.0),
        Vec2::new(5.0, 5.0),
        1.0,
        Color::WHITE,
    );

    let kinds: Vec<_> = buffer.iter(&arena).map(|c| c.kind()).collect();
    assert_eq!(buffer.len(), 7);
    assert_eq!(kinds.len(), 7);
    assert_eq!(kinds[0], CommandKind::Scissor);
    assert_eq!(kinds[6], CommandKind::Line);
}

#[test]
fn clipped_fill_rect_allocates_nothing() {
    let (mut arena, mut buffer) = recorder();
    buffer.push_scissor(&mut arena, Rect::new(0.0, 0.0, 100.0, 100.0));
    let before = arena.allocated();
    buffer.fill_rect(&mut arena, Rect::new(200.0, 200.0, 10.0, 10.0), 0.0, Color::RED);
    assert_eq!(arena.allocated(), before);
    assert_eq!(buffer.len(), 1);
}

#[test]
fn invisible_primitives_are_skipped() {
    let (mut arena, mut buffer) = recorder();
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    buffer.fill_rect(&mut arena, r, 0.0, Color::TRANSPARENT);
    buffer.stroke_rect(&mut arena, r, 0.0, 0.0, Color::RED);
    buffer.fill_rect(&mut arena, Rect::new(0.0, 0.0, 0.0, 10.0), 0.0, Color::RED);
    buffer.stroke_line(&mut arena, Vec2::ZERO, Vec2::new(1.0, 1.0), 0.0, Color::RED);
    buffer.fill_polygon(&mut arena, &[], Color::RED);
    assert!(buffer.is_empty());
    assert_eq!(arena.allocated(), 0);
}

#[test]
fn scissor_replaces_clip() {
    let (mut arena, mut buffer) = recorder();
    let first = Rect::new(0.0, 0.0, 50.0, 50.0);
    let second = Rect::new(10.0, 10.0, 5.0, 5.0);
    buffer.push_scissor(&mut arena, first);
    buffer.push_scissor(&mut arena, second);
    assert_eq!(buffer.clip, second);

    let clips: Vec<_> = buffer
        .iter(&arena)
        .filter_map(|c| match c {
            Command::Scissor(s) => Some(s.rect()),
            _ => None,
        })
        .collect();
    assert_eq!(clips, vec![first, second]);
}

#[test]
fn polygon_points_survive_encoding() {
    let (mut arena, mut buffer) = recorder();
    let points = [
        Vec2::new(1.0, 2.0),
        Vec2::new(30.0, 4.0),
        Vec2::new(-5.0, 60.0),
    ];
    buffer.fill_polygon(&mut arena, &points, Color::BLUE);

    let mut iter = buffer.iter(&arena);
    match iter.next() {
        Some(Command::PolygonFilled(payload, decoded)) => {
            assert_eq!(payload.point_count, 3);
            assert_eq!(decoded.iter().collect::<Vec<_>>(), points.to_vec());
        }
        other => panic!("unexpected command {other:?}"),
    }
    assert!(iter.next().is_none());
}

#[test]
fn text_is_clamped_to_bounds() {
    let (mut arena, mut buffer) = recorder();
    buffer.draw_text(
        &mut arena,
        Rect::new(0.0, 0.0, 20.0, 10.0),
        "hello",
        0,
        &FixedWidth,
        Color::TRANSPARENT,
        Color::WHITE,
    );
    match buffer.iter(&arena).next() {
        Some(Command::Text(payload, text)) => {
            assert_eq!(text, "he");
            assert_eq!(payload.length, 2);
            assert_eq!(payload.height, 10.0);
        }
        other => panic!("unexpected command {other:?}"),
    }

    buffer.draw_text(
        &mut arena,
        Rect::new(0.0, 0.0, 4.0, 10.0),
        "x",
        0,
        &FixedWidth,
        Color::TRANSPARENT,
        Color::WHITE,
    );
    assert_eq!(buffer.len(), 1);
}

#[test]
fn full_arena_drops_commands_silently() {
    let mut arena = ArenaBuffer::fixed(40);
    let mut buffer = CommandBuffer::new(Clipping::Off);
    buffer.start(&arena);
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    buffer.fill_rect(&mut arena, r, 0.0, Color::RED);
    buffer.fill_rect(&mut arena, r, 0.0, Color::RED);
    buffer.fill_rect(&mut arena, r, 0.0, Color::RED);
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.iter(&arena).count(), 1);
}

#[test]
fn relinking_splices_records() {
    let (mut arena, mut buffer) = recorder();
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    buffer.fill_rect(&mut arena, r, 0.0, Color::RED);
    let first = buffer.last().expect("first");
    buffer.fill_rect(&mut arena, r, 0.0, Color::GREEN);
    buffer.fill_rect(&mut arena, r, 0.0, Color::BLUE);
    let third = buffer.last().expect("third");

    assert!(set_next(&mut arena, first, Some(third)));
    let colors: Vec<_> = buffer
        .iter(&arena)
        .filter_map(|c| match c {
            Command::RectFilled(f) => Some(f.color),
            _ => None,
        })
        .collect();
    assert_eq!(colors, vec![Color::RED, Color::BLUE]);
    assert_eq!(next_of(&arena, third), None);
}

fn fill_colors(buffer: &CommandBuffer, arena: &ArenaBuffer) -> Vec<Color> {
    buffer
        .iter(arena)
        .filter_map(|c| match c {
            Command::RectFilled(f) => Some(f.color),
            _ => None,
        })
        .collect()
}

#[test]
fn rollback_discards_later_records() {
    let (mut arena, mut buffer) = recorder();
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    buffer.fill_rect(&mut arena, r, 0.0, Color::RED);
    let checkpoint = buffer.checkpoint(&arena);
    let front = arena.allocated();
    buffer.push_scissor(&mut arena, Rect::new(0.0, 0.0, 5.0, 5.0));
    buffer.fill_rect(&mut arena, r, 0.0, Color::GREEN);

    buffer.rollback(&mut arena, checkpoint);
    assert_eq!(arena.allocated(), front);
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.clip, Rect::NULL);
    assert_eq!(fill_colors(&buffer, &arena), vec![Color::RED]);
}

#[test]
fn detach_removes_a_middle_chain() {
    let (mut arena, mut buffer) = recorder();
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    buffer.fill_rect(&mut arena, r, 0.0, Color::RED);
    let before = buffer.last();
    buffer.fill_rect(&mut arena, r, 0.0, Color::GREEN);
    let first = buffer.last().expect("green");
    buffer.fill_rect(&mut arena, r, 0.0, Color::WHITE);
    let last = buffer.last().expect("white");
    buffer.fill_rect(&mut arena, r, 0.0, Color::BLUE);

    assert_eq!(buffer.detach(&mut arena, before, first, last), 2);
    assert_eq!(buffer.len(), 2);
    assert_eq!(fill_colors(&buffer, &arena), vec![Color::RED, Color::BLUE]);
    assert_eq!(Commands::new(&arena, Some(first)).count(), 2);
}

#[test]
fn detach_at_the_tail_moves_last() {
    let (mut arena, mut buffer) = recorder();
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    buffer.fill_rect(&mut arena, r, 0.0, Color::RED);
    let before = buffer.last();
    buffer.fill_rect(&mut arena, r, 0.0, Color::GREEN);
    let only = buffer.last().expect("green");

    buffer.detach(&mut arena, before, only, only);
    assert_eq!(buffer.last(), before);
    buffer.fill_rect(&mut arena, r, 0.0, Color::BLUE);
    assert_eq!(fill_colors(&buffer, &arena), vec![Color::RED, Color::BLUE]);
}
