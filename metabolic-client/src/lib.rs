mod calculator;
mod client;

pub use calculator::{Calculation, Calculator};
pub use client::*;
