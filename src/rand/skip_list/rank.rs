use log::debug;
use smallvec::smallvec;
use std::{borrow::Borrow, ops::Index};

use super::{
    level::perfect_height,
    node::{Idx, LevelBuf, Path, HEAD, TAIL},
    SkipList,
};
use crate::{Error, Result};

impl<T> SkipList<T> {
    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    /// Element at zero-based rank `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.get_log(index)
    }

    /// Walks `index + 1` hops along level 0.
    pub fn get_linear(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        let mut cur = HEAD;
        for _ in 0..=index {
            cur = self.nodes[cur].next[0];
        }
        self.element(cur).ok_or_else(|| self.out_of_range(index))
    }

    /// Descends the levels while accumulating spans, never overshooting the
    /// target distance `index + 1` from head.
    pub fn get_log(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        let target = index + 1;
        let mut cur = HEAD;
        let mut traveled = 0;
        for level in (0..self.max_level).rev() {
            loop {
                let node = &self.nodes[cur];
                let reach = traveled + node.span[level];
                if reach > target {
                    break;
                }
                traveled = reach;
                cur = node.next[level];
                if traveled == target {
                    return self.element(cur).ok_or_else(|| self.out_of_range(index));
                }
            }
        }
        Err(self.out_of_range(index))
    }

    /// Predecessors of the node sitting `distance` level-0 hops from head.
    pub(super) fn path_to(&self, distance: usize) -> Path {
        let mut path = Path::new(self.max_level);
        let mut cur = HEAD;
        let mut traveled = 0;
        for level in (0..self.max_level).rev() {
            loop {
                let node = &self.nodes[cur];
                let reach = traveled + node.span[level];
                if reach >= distance {
                    break;
                }
                traveled = reach;
                cur = node.next[level];
            }
            path.update[level] = cur;
            path.rank[level] = traveled;
        }
        path
    }

    /// Rebuilds the towers into a perfect skip list: the element at 1-based
    /// rank `r` gets height `1 + trailing_zeros(r)`. Nodes keep their slots
    /// and elements, only links and spans change.
    pub fn rebuild(&mut self) {
        let ceiling = self.levels.max_levels();
        let mut last: LevelBuf<(Idx, usize)> = smallvec![(HEAD, 0); ceiling];
        let mut top = 1;
        let mut rank = 0;
        let mut cur = self.nodes[HEAD].next[0];

        while cur != TAIL {
            rank += 1;
            let height = perfect_height(rank, ceiling);
            top = top.max(height);

            let node = &mut self.nodes[cur];
            let following = node.next[0];
            node.next.resize(height, TAIL);
            node.span.resize(height, 1);

            for (level, slot) in last.iter_mut().enumerate().take(height) {
                let (pred, pred_rank) = *slot;
                let pred = &mut self.nodes[pred];
                pred.next[level] = cur;
                pred.span[level] = rank - pred_rank;
                *slot = (cur, rank);
            }
            cur = following;
        }

        for (level, &(pred, pred_rank)) in last.iter().enumerate().take(top) {
            let pred = &mut self.nodes[pred];
            pred.next[level] = TAIL;
            pred.span[level] = self.len + 1 - pred_rank;
        }
        self.max_level = top;
        debug!(
            "rebuilt skip list of {} elements over {} levels",
            self.len, self.max_level
        );
    }
}

impl<T: Ord> SkipList<T> {
    /// Zero-based rank of `x`, `None` if absent.
    pub fn rank<Q>(&self, x: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let path = self.find(x);
        self.matching(&path, x).map(|_| path.rank[0])
    }
}

impl<T> Index<usize> for SkipList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(element) => element,
            Err(err) => panic!("{}", err),
        }
    }
}
