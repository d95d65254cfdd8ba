pub mod models;
pub mod parser;
pub mod source;

pub use models::CalendarEvent;
pub use parser::{parse, EventParser};
pub use source::{CommandSource, EventSource};
