pub mod ai;
pub mod debris;
pub mod physics;
pub mod proximity;
