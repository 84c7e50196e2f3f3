//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod console;
pub mod input;

pub use console::console_task;
pub use input::{input_task, RemoteInput};
