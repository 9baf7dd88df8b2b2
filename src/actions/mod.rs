pub mod action;
pub mod advert;
pub mod queue;

pub use action::{Action, Requirements};
pub use advert::Advert;
pub use queue::{ActionQueue, QueuedAction};
