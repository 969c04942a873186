use std::iter::FusedIterator;

use super::{
    node::{Idx, HEAD, TAIL},
    SkipList,
};
use crate::{Error, Result};

/// Borrowing iterator over the elements in ascending order.
pub struct Iter<'a, T> {
    list: &'a SkipList<T>,
    front: Idx,
    back: Idx,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let idx = self.front;
        self.front = list.nodes[idx].next[0];
        self.remaining -= 1;
        list.element(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let idx = self.back;
        self.back = list.nodes[idx].prev;
        self.remaining -= 1;
        list.element(idx)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning iterator, drains the list from both ends.
pub struct IntoIter<T> {
    list: SkipList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for SkipList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> SkipList<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.nodes[HEAD].next[0],
            back: self.nodes[TAIL].prev,
            remaining: self.len,
        }
    }

    /// Forward cursor that may remove the element it just yielded. It holds
    /// the list exclusively, so removal through the cursor is the only way
    /// to mutate the list while walking it.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            list: self,
            cur: HEAD,
            rank: 0,
            ready: false,
        }
    }
}

/// Mutation-aware cursor over the elements in ascending order.
///
/// The cursor starts before the first element. [`CursorMut::next`] steps
/// onto the following element and [`CursorMut::remove`] deletes it again,
/// leaving the cursor on the predecessor so that iteration resumes with the
/// element after the removed one.
pub struct CursorMut<'a, T> {
    list: &'a mut SkipList<T>,
    cur: Idx,
    /// Level-0 distance of `cur` from head.
    rank: usize,
    ready: bool,
}

impl<'a, T> CursorMut<'a, T> {
    pub fn has_next(&self) -> bool {
        self.list.nodes[self.cur].next[0] != TAIL
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&T> {
        let next = self.list.nodes[self.cur].next[0];
        if next == TAIL {
            return None;
        }
        self.cur = next;
        self.rank += 1;
        self.ready = true;
        self.list.element(next)
    }

    /// The element last yielded by `next`, if it has not been removed.
    pub fn current(&self) -> Option<&T> {
        if !self.ready {
            return None;
        }
        self.list.element(self.cur)
    }

    /// Removes the element last yielded by `next`. Fails when nothing was
    /// yielded yet or the element was already removed.
    pub fn remove(&mut self) -> Result<T> {
        if !self.ready {
            return Err(Error::NoCurrentElement);
        }
        let path = self.list.path_to(self.rank);
        let element = self
            .list
            .unlink(&path, self.cur)
            .ok_or(Error::NoCurrentElement)?;
        self.cur = path.pred();
        self.rank -= 1;
        self.ready = false;
        Ok(element)
    }
}
