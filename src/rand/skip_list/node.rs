use smallvec::{smallvec, SmallVec};

/// Arena slot index. Links between nodes are slots, never references.
pub(super) type Idx = usize;

/// Head sentinel. Always slot 0, never freed.
pub(super) const HEAD: Idx = 0;
/// Tail sentinel. Always slot 1, never freed.
pub(super) const TAIL: Idx = 1;

/// Expected tower height is 2, so most towers stay inline.
pub(super) type Tower<V> = SmallVec<[V; 4]>;

/// Per-call scratch buffers sized to the active level count.
pub(super) type LevelBuf<V> = SmallVec<[V; 16]>;

#[derive(Clone)]
pub(super) struct Node<T> {
    /// `None` for both sentinels and for slots sitting on the free list.
    pub(super) element: Option<T>,
    /// Forward link per level. The length is the tower height.
    pub(super) next: Tower<Idx>,
    /// Level-0 hops skipped by `next[level]`.
    pub(super) span: Tower<usize>,
    /// Level-0 predecessor.
    pub(super) prev: Idx,
}

impl<T> Node<T> {
    pub(super) fn sentinel(levels: usize) -> Self {
        Self {
            element: None,
            next: smallvec![TAIL; levels],
            span: smallvec![1; levels],
            prev: HEAD,
        }
    }

    pub(super) fn new(element: T, height: usize) -> Self {
        Self {
            element: Some(element),
            next: smallvec![TAIL; height],
            span: smallvec![1; height],
            prev: HEAD,
        }
    }

    /// Reuses a released slot for a fresh element.
    pub(super) fn reset(&mut self, element: T, height: usize) {
        self.element = Some(element);
        self.next.clear();
        self.next.resize(height, TAIL);
        self.span.clear();
        self.span.resize(height, 1);
        self.prev = HEAD;
    }

    /// Drops all links and hands the element back.
    pub(super) fn release(&mut self) -> Option<T> {
        self.next.clear();
        self.span.clear();
        self.prev = HEAD;
        self.element.take()
    }

    pub(super) fn height(&self) -> usize {
        self.next.len()
    }
}

/// Result of a search: for every active level, the last node strictly
/// before the target position and its level-0 distance from head.
pub(super) struct Path {
    pub(super) update: LevelBuf<Idx>,
    pub(super) rank: LevelBuf<usize>,
}

impl Path {
    pub(super) fn new(levels: usize) -> Self {
        Self {
            update: smallvec![HEAD; levels],
            rank: smallvec![0; levels],
        }
    }

    /// Extends the path over levels that were just activated. Only head
    /// lives on those levels, at distance zero.
    pub(super) fn extend_to(&mut self, levels: usize) {
        self.update.resize(levels, HEAD);
        self.rank.resize(levels, 0);
    }

    pub(super) fn pred(&self) -> Idx {
        self.update[0]
    }
}
