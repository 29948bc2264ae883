pub mod ai;
pub mod ailments;
pub mod battler;
pub mod capture;
pub mod damage;
pub mod effects;
pub mod encounter;
pub mod escape;
pub mod execution;
pub mod menu;
pub mod rewards;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;
