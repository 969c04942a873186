mod skip_list;

pub use skip_list::{Config, CursorMut, IntoIter, Iter, SkipList};
pub use crate::MAX_LEVELS;
