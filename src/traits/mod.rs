pub mod observer;
pub mod processor;

pub use observer::{NoopObserver, Observers, RunEvent, RunObserver};
pub use processor::{Arguments, Outputs, Processor};
