/// A node of a menu tree.
///
/// Holds the text shown to the user, an opaque `state` payload that the menu never
/// looks at, and an ordered list of children. Children can only be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<T> {
    text: String,
    state: T,
    children: Vec<MenuItem<T>>,
}

impl<T> MenuItem<T> {
    /// Create a childless item.
    pub fn new(text: impl Into<String>, state: T) -> Self {
        Self {
            text: text.into(),
            state,
            children: Vec::new(),
        }
    }

    /// Text displayed next to the item's label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caller-owned payload.
    pub fn state(&self) -> &T {
        &self.state
    }

    /// Append `child` after the existing children and return a handle to it.
    pub fn push(&mut self, child: MenuItem<T>) -> &mut MenuItem<T> {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_child(mut self, child: MenuItem<T>) -> Self {
        self.children.push(child);
        self
    }

    /// Children in display order.
    pub fn children(&self) -> &[MenuItem<T>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&MenuItem<T>> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut MenuItem<T>> {
        self.children.get_mut(index)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nesting levels below this item: 0 for a leaf, otherwise one more
    /// than the deepest child.
    ///
    /// Walks the whole subtree on every call.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}
