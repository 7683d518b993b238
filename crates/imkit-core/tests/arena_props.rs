use imkit_core::{heap_allocator, ArenaBuffer, BufferSide, Span};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Alloc { back: bool, size: usize, align_shift: u32 },
    Mark { back: bool },
    Reset { back: bool },
}

fn side(back: bool) -> BufferSide {
    if back {
        BufferSide::Back
    } else {
        BufferSide::Front
    }
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (any::<bool>(), 1usize..64, 0u32..4).prop_map(|(back, size, align_shift)| Op::Alloc { back, size, align_shift }),
        1 => any::<bool>().prop_map(|back| Op::Mark { back }),
        1 => any::<bool>().prop_map(|back| Op::Reset { back }),
    ]
}

proptest! {
    #[test]
    fn fixed_arena_never_overlaps(ops in prop::collection::vec(op(), 1..64)) {
        let mut arena = ArenaBuffer::fixed(512);
        for op in ops {
            match op {
                Op::Alloc { back, size, align_shift } => {
                    let align = 1usize << align_shift;
                    if let Ok(span) = arena.alloc(side(back), size, align) {
                        prop_assert_eq!(span.start(arena.capacity()) % align, 0);
                    }
                }
                Op::Mark { back } => arena.mark(side(back)),
                Op::Reset { back } => arena.reset(side(back)),
            }
            prop_assert!(arena.allocated() <= arena.size());
            prop_assert!(arena.size() <= arena.capacity());
        }
    }

    #[test]
    fn dynamic_growth_preserves_every_live_allocation(
        sizes in prop::collection::vec((any::<bool>(), 1usize..48, any::<u8>()), 1..40)
    ) {
        let mut arena = ArenaBuffer::new(heap_allocator(), 8, 2.0);
        let mut live: Vec<(Span, Vec<u8>)> = Vec::new();
        for (back, size, fill) in sizes {
            let bytes = vec![fill; size];
            let span = arena.push(side(back), &bytes, 4).expect("dynamic arena grows");
            live.push((span, bytes));
            for (span, expected) in &live {
                prop_assert_eq!(arena.bytes(*span), expected.as_slice());
            }
            prop_assert!(arena.allocated() <= arena.size());
        }
    }
}
