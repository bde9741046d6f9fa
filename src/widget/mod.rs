pub mod attach;
pub mod container;
pub mod controller;
pub mod element;
pub mod text_edit;

pub use attach::{attach, attach_matching};
pub use container::ResultsContainer;
pub use controller::{InFlightLookup, KeyDownOutcome, SuggestionSearch, navigation_direction};
pub use element::{Form, FormSubmission, InputElement, SearchField, select};
