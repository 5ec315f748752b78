#![cfg_attr(not(feature = "std"), no_std)]

pub mod activity;
pub mod ecosystem;

pub use activity::*;
pub use ecosystem::*;
