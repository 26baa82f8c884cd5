//! Domain Entities

mod merchant;
mod payment_link;
mod webhook;

pub use merchant::*;
pub use payment_link::*;
pub use webhook::*;
