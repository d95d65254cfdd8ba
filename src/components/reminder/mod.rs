mod scheduler;
mod state;

pub use scheduler::ReminderScheduler;
pub use state::ReminderState;
