pub mod board;
pub use board::*;

pub mod pace;
pub use pace::*;

pub mod participation;
pub use participation::*;

pub mod playtime;
pub use playtime::*;

pub mod report;
pub use report::*;

pub mod status;
pub use status::*;

pub mod summary;
pub use summary::*;
