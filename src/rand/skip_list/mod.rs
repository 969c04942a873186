//! Indexable skip list.
//!
//! An ordered set of unique elements kept on a tower of sorted linked
//! levels. Level 0 chains every element, each higher level skips over
//! roughly half of the level below it. Every forward link also records its
//! span, the number of level-0 hops it jumps, which makes rank lookups
//! logarithmic alongside key lookups.
//!
//! ```text
//! Level 2: HEAD ----------------(3)---------------> C ---(2)--> TAIL
//! Level 1: HEAD ------(2)-----> B ------(1)-------> C ---(2)--> TAIL
//! Level 0: HEAD -(1)-> A -(1)-> B -(1)-> C -(1)-> D -(1)-> TAIL
//! ```
//!
//! Nodes live in an arena and refer to each other by slot index, so the
//! forward, backward and span links never form ownership cycles. Removed
//! slots are recycled through a free list.
//!
//! Not thread safe. Share behind a lock if needed.

mod iter;
mod level;
mod node;
mod rank;
#[cfg(test)]
mod tests;

use log::{debug, trace};
use std::{borrow::Borrow, fmt::Debug};

use crate::Result;

pub use iter::{CursorMut, IntoIter, Iter};
pub use level::Config;

use level::LevelGenerator;
use node::{Idx, Node, Path, HEAD, TAIL};

#[derive(Clone)]
pub struct SkipList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<Idx>,
    len: usize,
    /// Number of levels currently in use, at least 1.
    max_level: usize,
    levels: LevelGenerator,
}

impl<T> SkipList<T> {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        debug!("creating skip list with {:?}", config);
        Ok(Self::from_config(&config))
    }

    fn from_config(config: &Config) -> Self {
        let levels = LevelGenerator::new(config);
        let ceiling = levels.max_levels();
        Self {
            nodes: vec![Node::sentinel(ceiling), Node::sentinel(ceiling)],
            free: Vec::new(),
            len: 0,
            max_level: 1,
            levels,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<&T> {
        self.element(self.nodes[HEAD].next[0])
    }

    pub fn last(&self) -> Option<&T> {
        self.element(self.nodes[TAIL].prev)
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        let target = self.nodes[HEAD].next[0];
        if target == TAIL {
            return None;
        }
        let path = self.path_to(1);
        self.unlink(&path, target)
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        let target = self.nodes[TAIL].prev;
        if target == HEAD {
            return None;
        }
        let path = self.path_to(self.len);
        self.unlink(&path, target)
    }

    pub fn clear(&mut self) {
        let ceiling = self.levels.max_levels();
        self.nodes.clear();
        self.nodes.push(Node::sentinel(ceiling));
        self.nodes.push(Node::sentinel(ceiling));
        self.free.clear();
        self.len = 0;
        self.max_level = 1;
    }

    /// Element stored at `idx`, `None` for the sentinels.
    fn element(&self, idx: Idx) -> Option<&T> {
        self.nodes[idx].element.as_ref()
    }

    /// Draws a tower height and activates any levels it reaches for the
    /// first time.
    fn choose_level(&mut self) -> usize {
        let height = self.levels.choose();
        if height > self.max_level {
            trace!("raising active levels from {} to {}", self.max_level, height);
            let head = &mut self.nodes[HEAD];
            for level in self.max_level..height {
                head.next[level] = TAIL;
                head.span[level] = self.len + 1;
            }
            self.max_level = height;
        }
        height
    }

    /// Retires top levels that only link head to tail.
    fn shrink_levels(&mut self) {
        let before = self.max_level;
        while self.max_level > 1 && self.nodes[HEAD].next[self.max_level - 1] == TAIL {
            self.max_level -= 1;
        }
        if before != self.max_level {
            trace!("lowering active levels from {} to {}", before, self.max_level);
        }
    }

    fn alloc(&mut self, element: T, height: usize) -> Idx {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx].reset(element, height);
                idx
            }
            None => {
                self.nodes.push(Node::new(element, height));
                self.nodes.len() - 1
            }
        }
    }

    /// Splices `target` out of every level using the predecessors in `path`
    /// and releases its slot.
    fn unlink(&mut self, path: &Path, target: Idx) -> Option<T> {
        let height = self.nodes[target].height();
        for level in 0..height {
            let next = self.nodes[target].next[level];
            let span = self.nodes[target].span[level];
            let pred = &mut self.nodes[path.update[level]];
            pred.next[level] = next;
            pred.span[level] += span - 1;
        }
        for level in height..self.max_level {
            self.nodes[path.update[level]].span[level] -= 1;
        }

        let succ = self.nodes[target].next[0];
        self.nodes[succ].prev = path.pred();
        self.len -= 1;
        self.shrink_levels();

        self.free.push(target);
        self.nodes[target].release()
    }
}

impl<T: Ord> SkipList<T> {
    /// Walks from the top active level down, stopping on each level at the
    /// last node whose element is strictly less than `x`.
    fn find<Q>(&self, x: &Q) -> Path
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path = Path::new(self.max_level);
        let mut cur = HEAD;
        let mut traveled = 0;
        for level in (0..self.max_level).rev() {
            loop {
                let node = &self.nodes[cur];
                match self.element(node.next[level]) {
                    Some(e) if e.borrow() < x => {
                        traveled += node.span[level];
                        cur = node.next[level];
                    }
                    _ => break,
                }
            }
            path.update[level] = cur;
            path.rank[level] = traveled;
        }
        path
    }

    /// Slot holding `x`, if the search in `path` landed right before it.
    fn matching<Q>(&self, path: &Path, x: &Q) -> Option<Idx>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let candidate = self.nodes[path.pred()].next[0];
        self.element(candidate)
            .filter(|e| (*e).borrow() == x)
            .map(|_| candidate)
    }

    pub fn contains<Q>(&self, x: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let path = self.find(x);
        self.matching(&path, x).is_some()
    }

    /// Inserts `element`. Returns `false` and leaves the list untouched if an
    /// equal element is already present.
    pub fn add(&mut self, element: T) -> bool {
        let mut path = self.find(&element);
        if self.matching(&path, &element).is_some() {
            return false;
        }

        let height = self.choose_level();
        path.extend_to(self.max_level);
        let idx = self.alloc(element, height);
        let position = path.rank[0] + 1;

        for level in 0..height {
            let pred = path.update[level];
            let old_next = self.nodes[pred].next[level];
            let old_span = self.nodes[pred].span[level];
            let to_new = position - path.rank[level];

            let node = &mut self.nodes[idx];
            node.next[level] = old_next;
            node.span[level] = old_span + 1 - to_new;

            let pred = &mut self.nodes[pred];
            pred.next[level] = idx;
            pred.span[level] = to_new;
        }
        for level in height..self.max_level {
            self.nodes[path.update[level]].span[level] += 1;
        }

        let succ = self.nodes[idx].next[0];
        self.nodes[idx].prev = path.pred();
        self.nodes[succ].prev = idx;
        self.len += 1;
        true
    }

    /// Removes `x` and hands back the stored element, `None` if absent.
    pub fn remove<Q>(&mut self, x: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let path = self.find(x);
        let target = self.matching(&path, x)?;
        self.unlink(&path, target)
    }

    /// Smallest element greater than or equal to `x`.
    pub fn ceiling<Q>(&self, x: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let path = self.find(x);
        self.element(self.nodes[path.pred()].next[0])
    }

    /// Largest element less than or equal to `x`.
    pub fn floor<Q>(&self, x: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let path = self.find(x);
        match self.matching(&path, x) {
            Some(idx) => self.element(idx),
            None => self.element(path.pred()),
        }
    }
}

impl<T> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for SkipList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SkipList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SkipList<T> {}

impl<T: Ord> Extend<T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}
