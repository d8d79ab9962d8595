use crate::config::MenuConfig;
use crate::console::Console;
use crate::error::MenuError;
use crate::item::MenuItem;
use crate::labels::LabelSequence;
use regex::{Regex, RegexBuilder};
use std::ops::{Deref, DerefMut};
use tracing::{debug, info, trace};

/// Why a line of input did not select a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mismatch {
    /// The line does not fit the composite pattern.
    Pattern,
    /// The label captured for `depth` is not one the sequence produces.
    Label { depth: usize },
    /// The label at `depth` points past the last sibling.
    OutOfRange {
        depth: usize,
        index: usize,
        len: usize,
    },
}

/// Interactive selection over a tree of [`MenuItem`]s.
///
/// Every sibling list is labelled with the [`LabelSequence`] configured for its
/// depth: the root's children use `labels[0]`, their children `labels[1]`, and so on.
/// The user picks a node by typing the labels of the path to it, root first, without
/// separators. With `[Alpha, Numeric]`, `b2` means "second child of the second child".
///
/// A `Menu` derefs to its root item, so it can be built up with
/// [`MenuItem::push`] directly.
///
/// Example
/// ```
/// use label_menu::{LabelSequence, Menu, MenuItem, StreamConsole};
/// use std::io::Cursor;
///
/// let root = MenuItem::new("Pick:", "root")
///     .with_child(MenuItem::new("Fruit", "fruit").with_child(MenuItem::new("Apple", "apple")))
///     .with_child(MenuItem::new("Vegetable", "veg"));
/// let menu = Menu::new(root, [LabelSequence::ALPHA, LabelSequence::NUMERIC]);
///
/// let mut console = StreamConsole::new(Cursor::new(b"zz\na1\n".to_vec()), Vec::new());
/// let chosen = menu.choose(&mut console).unwrap();
/// assert_eq!(chosen.text(), "Apple");
/// ```
#[derive(Debug, Clone)]
pub struct Menu<T> {
    root: MenuItem<T>,
    labels: Vec<LabelSequence>,
    prompt: Option<String>,
}

impl<T> Menu<T> {
    /// Wrap `root`, labelling depth `d` with the `d`-th entry of `labels`.
    pub fn new(root: MenuItem<T>, labels: impl IntoIterator<Item = LabelSequence>) -> Self {
        Self {
            root,
            labels: labels.into_iter().collect(),
            prompt: None,
        }
    }

    /// Wrap `root` using the labels and prompt of `config`.
    pub fn from_config(root: MenuItem<T>, config: &MenuConfig) -> Self {
        Self {
            root,
            labels: config.labels.clone(),
            prompt: config.prompt.clone(),
        }
    }

    pub fn labels(&self) -> &[LabelSequence] {
        &self.labels
    }

    pub fn set_labels(&mut self, labels: impl IntoIterator<Item = LabelSequence>) {
        self.labels = labels.into_iter().collect();
    }

    /// Replace the prompt text; `None` falls back to the root item's text.
    pub fn set_prompt(&mut self, prompt: Option<String>) {
        self.prompt = prompt;
    }

    /// Prompt shown before reading a line, always followed by a single space.
    pub fn prompt(&self) -> String {
        let text = self.prompt.as_deref().unwrap_or(self.root.text());
        format!("{} ", text)
    }

    pub fn root(&self) -> &MenuItem<T> {
        &self.root
    }

    pub fn into_root(self) -> MenuItem<T> {
        self.root
    }

    /// Label sequences in use for the current tree, one per depth.
    ///
    /// Fails when the tree is deeper than the configured list.
    fn sequences(&self) -> Result<&[LabelSequence], MenuError> {
        let depth = self.root.depth();
        if self.labels.len() < depth {
            return Err(MenuError::Configuration {
                depth,
                configured: self.labels.len(),
            });
        }
        Ok(&self.labels[..depth])
    }

    fn compile(sequences: &[LabelSequence]) -> Result<Regex, MenuError> {
        let groups: String = sequences
            .iter()
            .map(|sequence| format!("({})", sequence.pattern()))
            .collect();
        let pattern = format!("^{}$", groups);
        trace!(%pattern, "compiling selection pattern");
        Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
    }

    /// Composite pattern accepted by [`choose`](Self::choose).
    ///
    /// One capturing group per depth, concatenated and anchored, matched
    /// case-insensitively. A tree without children yields `^$`.
    pub fn pattern(&self) -> Result<Regex, MenuError> {
        Self::compile(self.sequences()?)
    }

    /// Write every item below the root to `console`, depth first.
    ///
    /// Each row reads `"{indent}{label}: {text}"` with one space of indent per depth.
    /// Labels are assigned afresh on every call, so an unchanged tree renders the
    /// same way each time.
    pub fn render<C: Console + ?Sized>(&self, console: &mut C) -> Result<(), MenuError> {
        let sequences = self.sequences()?;
        Self::render_level(self.root.children(), 0, sequences, console)
    }

    fn render_level<C: Console + ?Sized>(
        items: &[MenuItem<T>],
        depth: usize,
        sequences: &[LabelSequence],
        console: &mut C,
    ) -> Result<(), MenuError> {
        if items.is_empty() {
            return Ok(());
        }
        let indent = " ".repeat(depth);
        for (item, label) in items.iter().zip(sequences[depth].labels()) {
            console.render(&format!("{}{}: {}", indent, label, item.text()))?;
            Self::render_level(item.children(), depth + 1, sequences, console)?;
        }
        Ok(())
    }

    /// Resolve a single line of input without any I/O.
    ///
    /// Returns `Ok(None)` when the line does not select a node.
    pub fn resolve(&self, line: &str) -> Result<Option<&MenuItem<T>>, MenuError> {
        let sequences = self.sequences()?;
        let pattern = Self::compile(sequences)?;
        Ok(self.walk(&pattern, sequences, line).ok())
    }

    fn walk(
        &self,
        pattern: &Regex,
        sequences: &[LabelSequence],
        line: &str,
    ) -> Result<&MenuItem<T>, Mismatch> {
        let captures = pattern.captures(line).ok_or(Mismatch::Pattern)?;
        let mut node = &self.root;
        for (depth, sequence) in sequences.iter().enumerate() {
            if node.is_leaf() {
                break;
            }
            let label = captures
                .get(depth + 1)
                .map(|m| m.as_str())
                .ok_or(Mismatch::Label { depth })?;
            let index = sequence
                .parse_label(label)
                .ok_or(Mismatch::Label { depth })?;
            node = node.child(index).ok_or(Mismatch::OutOfRange {
                depth,
                index,
                len: node.children().len(),
            })?;
        }
        Ok(node)
    }

    /// Render the tree, read a line and return the node it selects.
    ///
    /// Lines that do not select a node are discarded and the whole cycle repeats,
    /// with no limit on attempts. The call only fails before any I/O on a
    /// configuration error, or when the console itself fails (closed input,
    /// interrupt, write errors).
    pub fn choose<C: Console + ?Sized>(&self, console: &mut C) -> Result<&MenuItem<T>, MenuError> {
        let sequences = self.sequences()?;
        let pattern = Self::compile(sequences)?;
        let prompt = self.prompt();

        loop {
            console.clear()?;
            Self::render_level(self.root.children(), 0, sequences, console)?;
            console.render("")?;
            let line = console.read_line(&prompt)?;

            match self.walk(&pattern, sequences, &line) {
                Ok(node) => {
                    info!(input = %line, item = node.text(), "menu item selected");
                    return Ok(node);
                }
                Err(reason) => debug!(input = %line, ?reason, "input rejected"),
            }
        }
    }

    /// Like [`choose`](Self::choose), returning the chosen item's payload.
    pub fn choose_state<C: Console + ?Sized>(&self, console: &mut C) -> Result<&T, MenuError> {
        self.choose(console).map(MenuItem::state)
    }
}

impl<T> Deref for Menu<T> {
    type Target = MenuItem<T>;

    fn deref(&self) -> &MenuItem<T> {
        &self.root
    }
}

impl<T> DerefMut for Menu<T> {
    fn deref_mut(&mut self) -> &mut MenuItem<T> {
        &mut self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::StreamConsole;
    use std::io::Cursor;

    type TestConsole = StreamConsole<Cursor<Vec<u8>>, Vec<u8>>;

    fn console(input: &str) -> TestConsole {
        StreamConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: TestConsole) -> String {
        let (_, out) = console.into_parts();
        String::from_utf8(out).unwrap()
    }

    fn flat_menu() -> Menu<&'static str> {
        let root = MenuItem::new("Choose:", "root")
            .with_child(MenuItem::new("A", "a"))
            .with_child(MenuItem::new("B", "b"));
        Menu::new(root, [LabelSequence::ALPHA])
    }

    fn two_level_menu() -> Menu<&'static str> {
        let root = MenuItem::new("Choose:", "root")
            .with_child(
                MenuItem::new("X", "x")
                    .with_child(MenuItem::new("X1", "x1"))
                    .with_child(MenuItem::new("X2", "x2")),
            )
            .with_child(MenuItem::new("Y", "y").with_child(MenuItem::new("Y1", "y1")));
        Menu::new(root, [LabelSequence::ALPHA, LabelSequence::NUMERIC])
    }

    #[test]
    fn test_flat_menu_selects_by_letter() {
        let menu = flat_menu();
        assert_eq!(menu.choose(&mut console("a\n")).unwrap().text(), "A");
        assert_eq!(menu.choose(&mut console("b\n")).unwrap().text(), "B");
    }

    #[test]
    fn test_rejected_input_retries_until_valid() {
        let menu = flat_menu();
        let mut con = console("c\n\n1\nb\n");
        assert_eq!(menu.choose_state(&mut con).unwrap(), &"b");

        let screen = "a: A\nb: B\n\nChoose: ";
        assert_eq!(output(con), screen.repeat(4));
    }

    #[test]
    fn test_input_closed_propagates() {
        let menu = flat_menu();
        let mut con = console("c\nq\n");
        assert!(matches!(menu.choose(&mut con), Err(MenuError::InputClosed)));
        assert_eq!(output(con).matches("Choose: ").count(), 3);
    }

    #[test]
    fn test_two_level_selection() {
        let menu = two_level_menu();
        assert_eq!(menu.choose_state(&mut console("a1\n")).unwrap(), &"x1");
        assert_eq!(menu.choose_state(&mut console("a2\n")).unwrap(), &"x2");
        assert_eq!(menu.choose_state(&mut console("b1\n")).unwrap(), &"y1");
    }

    #[test]
    fn test_out_of_range_child_is_retried() {
        let menu = two_level_menu();
        let mut con = console("a9\nb2\nx1\nB1\n");
        assert_eq!(menu.choose_state(&mut con).unwrap(), &"y1");
        assert_eq!(output(con).matches("Choose: ").count(), 4);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let menu = two_level_menu();
        assert_eq!(menu.resolve("A2").unwrap().unwrap().text(), "X2");
        assert_eq!(flat_menu().resolve("B").unwrap().unwrap().text(), "B");
    }

    #[test]
    fn test_partial_path_does_not_match() {
        let menu = two_level_menu();
        assert!(menu.resolve("a").unwrap().is_none());
        assert!(menu.resolve("1").unwrap().is_none());
        assert!(menu.resolve(" a1").unwrap().is_none());
        assert!(menu.resolve("a1x").unwrap().is_none());
    }

    #[test]
    fn test_leaf_ignores_remaining_groups() {
        let root = MenuItem::new("Choose:", 0)
            .with_child(MenuItem::new("Leaf", 1))
            .with_child(MenuItem::new("Branch", 2).with_child(MenuItem::new("Inner", 3)));
        let menu = Menu::new(root, [LabelSequence::ALPHA, LabelSequence::NUMERIC]);

        assert_eq!(menu.resolve("a7").unwrap().unwrap().text(), "Leaf");
        assert_eq!(menu.resolve("b1").unwrap().unwrap().text(), "Inner");
        assert!(menu.resolve("b2").unwrap().is_none());
    }

    #[test]
    fn test_childless_root_resolves_on_empty_line() {
        let menu = Menu::new(MenuItem::new("Nothing here", ()), Vec::<LabelSequence>::new());
        assert_eq!(menu.pattern().unwrap().as_str(), "^$");

        let mut con = console("x\n\n");
        let chosen = menu.choose(&mut con).unwrap();
        assert_eq!(chosen.text(), "Nothing here");
        assert_eq!(output(con), "\nNothing here \nNothing here ");
    }

    #[test]
    fn test_too_few_label_sequences_fails_before_io() {
        let menu = Menu::new(two_level_menu().into_root(), [LabelSequence::ALPHA]);
        let mut con = console("a1\n");

        let err = menu.choose(&mut con).unwrap_err();
        assert!(matches!(
            err,
            MenuError::Configuration {
                depth: 2,
                configured: 1
            }
        ));
        assert!(output(con).is_empty());
    }

    #[test]
    fn test_extra_label_sequences_are_ignored() {
        let menu = Menu::new(
            flat_menu().into_root(),
            [LabelSequence::NUMERIC, LabelSequence::ALPHA],
        );
        assert_eq!(menu.pattern().unwrap().captures_len(), 2);
        assert_eq!(menu.resolve("2").unwrap().unwrap().text(), "B");
    }

    #[test]
    fn test_render_is_indented_and_repeatable() {
        let menu = two_level_menu();
        let mut con = console("");
        menu.render(&mut con).unwrap();
        menu.render(&mut con).unwrap();

        let once = "a: X\n 1: X1\n 2: X2\nb: Y\n 1: Y1\n";
        assert_eq!(output(con), once.repeat(2));
    }

    #[test]
    fn test_same_alphabet_on_adjacent_levels() {
        let mut menu = Menu::new(MenuItem::new("Choose:", ()), [LabelSequence::ALPHA; 2]);
        for i in 0..3 {
            let parent = menu.push(MenuItem::new(format!("P{}", i), ()));
            for j in 0..3 {
                parent.push(MenuItem::new(format!("P{}C{}", i, j), ()));
            }
        }

        assert_eq!(menu.resolve("bc").unwrap().unwrap().text(), "P1C2");
        assert_eq!(menu.resolve("ca").unwrap().unwrap().text(), "P2C0");
        assert!(menu.resolve("ab").unwrap().is_some());
    }

    #[test]
    fn test_config_prompt_overrides_root_text() {
        let config = MenuConfig {
            labels: vec![LabelSequence::NUMERIC],
            prompt: Some(">".to_string()),
            clear_screen: false,
        };
        let menu = Menu::from_config(flat_menu().into_root(), &config);
        let mut con = console("2\n");

        assert_eq!(menu.choose(&mut con).unwrap().text(), "B");
        assert_eq!(output(con), "1: A\n2: B\n\n> ");
    }
}
