pub mod event;
pub mod time_slot;
