// Export components
pub mod calendar;
pub mod notifier;
pub mod reminder;

pub use calendar::{CalendarEvent, CommandSource, EventSource};
pub use notifier::{Notifier, ProcessNotifier};
pub use reminder::{ReminderScheduler, ReminderState};
