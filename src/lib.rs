pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod widget;

pub use config::{WidgetConfig, WidgetOptions};
pub use core::cursor::{Direction, NavigationCursor};
pub use core::markup::{FormatKind, Formatter, Markup, MarkupItem, SharedFormatter};
pub use core::suggestion::{Suggestion, SuggestionSet};
pub use error::{ConfigError, LookupError};
pub use lookup::{LookupDispatch, LookupExecutor, LookupTransport};
pub use widget::{SuggestionSearch, attach, attach_matching};
