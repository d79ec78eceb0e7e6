pub mod item;
pub mod player_inventory;

pub use item::{merge_into_slots, ItemId, ItemStack};
pub use player_inventory::PlayerInventory;
