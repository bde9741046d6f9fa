pub mod cursor;
pub mod markup;
pub mod suggestion;

pub use cursor::{Direction, NavigationCursor};
pub use markup::{
    FormatKind, Formatter, ListFormatter, Markup, MarkupItem, NoopFormatter, SharedFormatter,
};
pub use suggestion::{Suggestion, SuggestionSet};
