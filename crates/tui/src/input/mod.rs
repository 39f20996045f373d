//! Keyboard input: tty reader, byte decoder and the query line editor.

mod editor;
mod keys;
pub(crate) mod reader;

pub use editor::QueryEditor;
pub use keys::{KEY_TIMEOUT, Key, KeyDecoder};
