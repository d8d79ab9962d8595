//! A small label-driven selection menu for line-oriented terminals.
//!
//! A tree of [`MenuItem`]s is printed with a short label in front of every row. Each
//! nesting depth gets its own label alphabet ([`LabelSequence`]), so a whole path can
//! be typed as one token: with letters for the first level and numbers for the
//! second, `b2` selects the second child of the second item.
//!
//! The main entry point is [`Menu`], which renders the tree to a [`Console`], reads a
//! line and walks the tree, asking again until the input names an existing item.
//! [`TerminalConsole`] drives a real terminal through `rustyline`; [`StreamConsole`]
//! works over any reader and writer.

pub mod config;
mod console;
mod error;
mod item;
mod labels;
mod menu;

pub use config::MenuConfig;
pub use console::{Console, StreamConsole, TerminalConsole};
pub use error::MenuError;
pub use item::MenuItem;
pub use labels::{LabelSequence, Labels};

/// Just a convenient re-export of the selection engine.
///
/// See [`Menu`] for the high-level API and examples.
pub use menu::Menu;
