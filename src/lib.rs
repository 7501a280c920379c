#![doc = include_str!("../README.md")]

mod failure;
pub use failure::*;

mod number;
pub use number::*;

mod decode_error;
pub use decode_error::*;

mod outcome;
pub use outcome::*;

mod collector;
pub use collector::*;
