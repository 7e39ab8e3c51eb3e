mod constants;
mod game;
mod multiplier;
mod settlement;

pub use constants::*;
pub use game::*;
pub use multiplier::*;
pub use settlement::*;

#[cfg(test)]
mod tests;
