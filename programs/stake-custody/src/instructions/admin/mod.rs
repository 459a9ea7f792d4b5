//! Admin instructions for the stake custody program

pub mod enable_token;
pub mod pause;
pub mod pause_token;
pub mod unpause;
pub mod update_authority;

pub use enable_token::*;
pub use pause::*;
pub use pause_token::*;
pub use unpause::*;
pub use update_authority::*;
