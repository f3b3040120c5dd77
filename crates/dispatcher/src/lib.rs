pub mod dispatcher;
pub mod error;
pub mod log;

pub use dispatcher::{Dispatcher, DynDispatcher};
pub use error::DispatchError;
pub use log::LogDispatcher;
