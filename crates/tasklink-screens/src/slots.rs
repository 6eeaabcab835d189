use tracing::warn;

/// Fixed-size storage filled one index at a time by an array transfer.
#[derive(Debug, Clone)]
pub struct Slots<T> {
    slots: Vec<Option<T>>,
    announced: bool,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            announced: false,
        }
    }
}

impl<T> Slots<T> {
    /// Drops previous contents and allocates `count` empty slots. A count
    /// that cannot be allocated leaves the storage empty and unannounced.
    pub fn reset(&mut self, count: usize) {
        self.clear();
        if let Err(error) = self.slots.try_reserve_exact(count) {
            warn!(count, %error, "cannot make room for transfer");
            return;
        }
        self.slots.resize_with(count, || None);
        self.announced = true;
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.announced = false;
    }

    /// Stores `value` at `index`. Returns `false` for an index outside the
    /// announced count.
    pub fn fill(&mut self, index: usize, value: T) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => {
                warn!(index, count = self.slots.len(), "item index out of range");
                false
            }
        }
    }

    /// Count announced by the last transfer, if any.
    pub fn count(&self) -> Option<usize> {
        self.announced.then_some(self.slots.len())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Filled slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    pub fn filled(&self) -> usize {
        self.iter().count()
    }

    /// Every announced slot has arrived.
    pub fn is_complete(&self) -> bool {
        self.announced && self.slots.iter().all(Option::is_some)
    }
}
