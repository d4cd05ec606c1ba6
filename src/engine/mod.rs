mod actions;
mod aliases;
mod character;
mod items;
mod movement;
mod normalize;
mod output;
mod render;

pub use actions::{MISSING_ITEM_TEXT, try_action};
pub use aliases::{AliasData, AliasTable};
pub use character::Character;
pub use items::{handle_drop, handle_examine, handle_inventory, handle_take};
pub use movement::{MoveOutcome, enter_room, try_handle_movement};
pub use normalize::Normalizer;
pub use output::{Output, OutputBlock};
pub use render::render_room;
