pub mod action_select;
pub mod tick;

pub use action_select::{score_advert, select_advert, Selection};
pub use tick::{advance_tick, run_ticks, SimulationEvent};
