//! Domain layer: cycle orchestration and the pieces it is made of

pub mod accounting;
pub mod confirmation;
pub mod cycle;
pub mod interfaces;
pub mod pool;
