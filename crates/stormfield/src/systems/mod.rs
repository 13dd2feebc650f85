pub mod carousel;
pub mod lightning;
pub mod rng;
pub mod starfield;
