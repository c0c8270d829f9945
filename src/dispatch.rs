//! First-token dispatch and external process invocation

pub mod invoker;
pub mod runner;
pub mod verb;

pub use invoker::{Invoker, ProcessInvoker};
pub use runner::dispatch;
pub use verb::Verb;
