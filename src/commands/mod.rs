pub mod generate;
pub mod inspect;

pub use generate::handle_generate_command;
pub use inspect::{handle_decode_command, handle_inventory_command, handle_show_command};
