pub use self::{action::*, board::*, game::*};

pub mod action;
pub mod board;
pub mod game;
