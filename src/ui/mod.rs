pub mod dialogs;
pub mod explorer_view;
pub mod keybindings;
pub mod tutorial_card;

pub use dialogs::HelpDialog;
