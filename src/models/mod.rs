pub mod event;
pub mod persona;
pub mod response;

pub use event::*;
pub use persona::*;
pub use response::*;
