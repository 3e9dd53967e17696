pub mod neutral;
pub mod yahoo;
