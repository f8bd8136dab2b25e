pub mod event;
pub use event::*;

pub(crate) mod lenient;

pub mod ledger;
pub use ledger::*;

pub mod session;
pub use session::*;

pub mod snapshot;
pub use snapshot::*;

pub mod stakes;
pub use stakes::*;
