pub mod access;
pub use access::*;

pub mod club;
pub use club::*;

pub mod player;
pub use player::*;
