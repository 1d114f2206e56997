//! Service layer: collaborators the routes delegate to

pub mod swap_actions;

pub use swap_actions::{SwapActionHandler, TableSwapActions};
