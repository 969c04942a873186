//! Structural tests. These reach into the arena and check the span
//! bookkeeping after every mutation.

use std::collections::HashMap;

use super::{
    node::{HEAD, TAIL},
    Config, SkipList,
};
use crate::Error;

fn seeded(seed: u64) -> SkipList<i64> {
    SkipList::with_config(Config::new().seed(seed)).unwrap()
}

fn check_invariants<T: Ord + std::fmt::Debug>(list: &SkipList<T>) {
    // Level 0: strictly increasing, backward links mirror forward links.
    let mut distance = HashMap::new();
    distance.insert(HEAD, 0usize);
    let mut cur = HEAD;
    let mut hops = 0;
    let mut previous: Option<&T> = None;
    while cur != TAIL {
        let next = list.nodes[cur].next[0];
        assert_eq!(list.nodes[next].prev, cur, "prev link of slot {next}");
        assert_eq!(list.nodes[cur].span[0], 1, "level-0 span of slot {cur}");
        hops += 1;
        distance.insert(next, hops);
        if let Some(e) = list.element(next) {
            if let Some(p) = previous {
                assert!(p < e, "{p:?} must precede {e:?}");
            }
            assert!(list.nodes[next].height() <= list.max_level);
            previous = Some(e);
        }
        cur = next;
    }
    assert_eq!(hops, list.len + 1);

    // Every level: spans match real level-0 distances and sum to len + 1.
    for level in 0..list.max_level {
        let mut cur = HEAD;
        let mut total = 0;
        while cur != TAIL {
            let next = list.nodes[cur].next[level];
            let span = list.nodes[cur].span[level];
            assert_eq!(
                span,
                distance[&next] - distance[&cur],
                "span of slot {cur} at level {level}"
            );
            total += span;
            cur = next;
        }
        assert_eq!(total, list.len + 1, "level {level} total");
    }

    for &slot in &list.free {
        assert!(list.nodes[slot].element.is_none());
    }
}

#[test]
fn empty_list() {
    let list: SkipList<i64> = SkipList::new();
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
    assert_eq!(list.max_level, 1);
    check_invariants(&list);
}

#[test]
fn spans_hold_after_every_add() {
    let mut list = seeded(7);
    for x in [50, 10, 90, 30, 70, 20, 80, 40, 60, 0] {
        assert!(list.add(x));
        check_invariants(&list);
    }
    assert_eq!(list.len(), 10);
}

#[test]
fn spans_hold_after_every_remove() {
    let mut list = seeded(11);
    list.extend(0..200);
    check_invariants(&list);
    for x in (0..200).filter(|x| x % 3 != 1) {
        assert_eq!(list.remove(&x), Some(x));
        check_invariants(&list);
    }
    assert_eq!(list.len(), 67);
}

#[test]
fn removed_slots_are_recycled() {
    let mut list = seeded(3);
    list.extend(0..32);
    let slots = list.nodes.len();
    for x in 0..16 {
        list.remove(&x);
    }
    assert_eq!(list.free.len(), 16);
    list.extend(100..116);
    assert_eq!(list.nodes.len(), slots);
    assert!(list.free.is_empty());
    check_invariants(&list);
}

#[test]
fn levels_shrink_when_tall_towers_leave() {
    let mut list = seeded(5);
    list.extend(0..500);
    assert!(list.max_level > 1);
    for x in 0..500 {
        list.remove(&x);
    }
    assert!(list.is_empty());
    assert_eq!(list.max_level, 1);
    check_invariants(&list);
}

#[test]
fn tower_height_respects_ceiling() {
    let mut list = SkipList::with_config(Config::new().max_levels(2).seed(9)).unwrap();
    list.extend(0..1000);
    assert!(list.max_level <= 2);
    assert!(list.nodes.iter().skip(2).all(|n| n.height() <= 2));
    check_invariants(&list);
}

#[test]
fn rebuild_yields_perfect_towers() {
    let mut list = seeded(13);
    list.extend((0..64).rev());
    list.rebuild();
    check_invariants(&list);

    let mut cur = list.nodes[HEAD].next[0];
    let mut rank = 1usize;
    while cur != TAIL {
        let expected = 1 + rank.trailing_zeros() as usize;
        assert_eq!(list.nodes[cur].height(), expected, "rank {rank}");
        cur = list.nodes[cur].next[0];
        rank += 1;
    }
    assert_eq!(list.max_level, 7);
}

#[test]
fn rebuild_then_mutate() {
    let mut list = seeded(17);
    list.extend(0..100);
    list.rebuild();
    for x in (0..100).step_by(7) {
        list.remove(&x);
        check_invariants(&list);
    }
    for x in 100..150 {
        list.add(x);
    }
    check_invariants(&list);
    for i in 0..list.len() {
        assert_eq!(list.get(i), list.get_linear(i));
    }
}

#[test]
fn rebuild_empty_list() {
    let mut list = seeded(19);
    list.rebuild();
    check_invariants(&list);
    assert!(list.add(1));
    check_invariants(&list);
}

#[test]
fn cursor_removal_keeps_spans() {
    let mut list = seeded(23);
    list.extend(0..64);
    let mut cursor = list.cursor_mut();
    while let Some(&x) = cursor.next() {
        if x % 2 == 0 {
            assert_eq!(cursor.remove(), Ok(x));
        }
    }
    check_invariants(&list);
    assert_eq!(list.len(), 32);
    assert_eq!(list.first(), Some(&1));
}

#[test]
fn cursor_rejects_double_remove() {
    let mut list = seeded(29);
    list.extend([1, 2, 3]);
    let mut cursor = list.cursor_mut();
    assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
    cursor.next();
    assert_eq!(cursor.remove(), Ok(1));
    assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
    check_invariants(&list);
}

#[test]
fn pop_from_both_ends() {
    let mut list = seeded(31);
    list.extend(0..40);
    assert_eq!(list.pop_first(), Some(0));
    check_invariants(&list);
    assert_eq!(list.pop_last(), Some(39));
    check_invariants(&list);
    assert_eq!(list.len(), 38);
}

#[test]
fn clear_resets_arena() {
    let mut list = seeded(37);
    list.extend(0..50);
    list.clear();
    assert_eq!(list.nodes.len(), 2);
    assert!(list.is_empty());
    check_invariants(&list);
    list.extend([3, 1, 2]);
    check_invariants(&list);
}

#[test]
fn same_seed_same_towers() {
    let mut a = seeded(41);
    let mut b = seeded(41);
    a.extend(0..300);
    b.extend(0..300);
    let heights = |l: &SkipList<i64>| l.nodes.iter().map(|n| n.height()).collect::<Vec<_>>();
    assert_eq!(heights(&a), heights(&b));
}
