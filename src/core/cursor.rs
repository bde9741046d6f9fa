#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Keyboard selection over the current suggestions.
///
/// `index` is `None` when nothing is highlighted. Movement wraps over
/// `0..count`; with no suggestions the cursor never leaves `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    index: Option<usize>,
    count: usize,
}

impl NavigationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Signed form of the index, `-1` for no selection.
    pub fn position(&self) -> isize {
        self.index.map_or(-1, |index| index as isize)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        self.index = None;
        self.count = 0;
    }

    /// Starts over on a fresh set of `count` suggestions.
    pub fn reset_to(&mut self, count: usize) {
        self.index = None;
        self.count = count;
    }

    pub fn step(&mut self, direction: Direction) -> Option<usize> {
        if self.count == 0 {
            self.index = None;
            return None;
        }

        let last = self.count - 1;
        let next = match (direction, self.index) {
            (Direction::Up, None) | (Direction::Up, Some(0)) => last,
            (Direction::Up, Some(index)) => (index - 1).min(last),
            (Direction::Down, None) => 0,
            (Direction::Down, Some(index)) if index >= last => 0,
            (Direction::Down, Some(index)) => index + 1,
        };
        self.index = Some(next);
        self.index
    }
}
