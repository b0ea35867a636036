//! Command registry and palette controller: filtering, selection, keyboard
//! arbitration, and the open/close lifecycle of the overlay.

pub mod command;
pub mod controller;
mod handle;
pub mod keyboard;
pub mod modal;
pub mod registry;
mod render;

pub use command::{Action, Command, NewCommand};
pub use controller::{PaletteController, PaletteOptions};
pub use handle::PaletteHandle;
pub use keyboard::{KeyCombo, KeyContext, PaletteIntent};
pub use modal::ModalStack;
pub use registry::CommandRegistry;
pub use render::build_list_view;
