use crate::core::markup::{Markup, MarkupItem};

/// The generated wrapper placed right after the bound input. Owned and
/// mutated by exactly one controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsContainer {
    markup: Markup,
}

impl ResultsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, markup: Markup) {
        self.markup = markup;
    }

    pub fn clear(&mut self) {
        self.markup = Markup::empty();
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    pub fn items(&self) -> &[MarkupItem] {
        self.markup.items.as_slice()
    }

    pub fn item(&self, index: usize) -> Option<&MarkupItem> {
        self.markup.items.get(index)
    }

    /// Marks exactly the item at `index` as active, clearing every other.
    pub fn set_active(&mut self, index: Option<usize>) {
        for (idx, item) in self.markup.items.iter_mut().enumerate() {
            item.active = Some(idx) == index;
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.markup.items.iter().position(|item| item.active)
    }
}

#[cfg(test)]
mod tests {
    use super::ResultsContainer;
    use crate::core::markup::{Markup, MarkupItem};

    fn filled(n: usize) -> ResultsContainer {
        let mut container = ResultsContainer::new();
        container.replace(Markup::with_items(
            (0..n)
                .map(|i| MarkupItem::new(format!("raw{i}"), format!("Item {i}")))
                .collect(),
        ));
        container
    }

    #[test]
    fn active_marker_is_exclusive() {
        let mut container = filled(3);
        container.set_active(Some(0));
        container.set_active(Some(2));
        assert_eq!(container.active_index(), Some(2));
        assert_eq!(container.items().iter().filter(|i| i.active).count(), 1);
    }

    #[test]
    fn out_of_range_index_clears_marker() {
        let mut container = filled(2);
        container.set_active(Some(1));
        container.set_active(Some(5));
        assert_eq!(container.active_index(), None);
    }

    #[test]
    fn clear_drops_markup() {
        let mut container = filled(2);
        container.clear();
        assert!(container.is_empty());
        assert!(container.item(0).is_none());
    }
}
