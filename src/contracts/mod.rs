pub mod wild_guess;

pub use wild_guess::WildGuess;
