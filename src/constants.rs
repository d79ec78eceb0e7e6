// Inventory GUI Constants
//
// Slot counts and grid sizes shared by the host model, the components and the
// event router. Gui layouts derive their offsets from these values.

/// Host slot layout
pub mod slots {
    /// Hotbar slots at the start of a player's storage
    pub const HOTBAR_SIZE: usize = 9;
    /// Hotbar plus the three main storage rows
    pub const PLAYER_STORAGE_SIZE: usize = 36;
    /// First storage slot of the main rows
    pub const MAIN_STORAGE_START: usize = HOTBAR_SIZE;
    /// Raw slot index the host reports for clicks outside any inventory
    pub const OUTSIDE_SLOT: i32 = -999;
    /// Items stack to this amount unless they say otherwise
    pub const DEFAULT_MAX_STACK_SIZE: u32 = 64;
}

/// Grid dimensions of the player-inventory component
pub mod grid {
    pub const ROW_LENGTH: usize = 9;
    /// Three storage rows and the hotbar
    pub const PLAYER_INVENTORY_ROWS: usize = 4;
    pub const MAX_CHEST_ROWS: usize = 6;
    /// A barrel renders three rows on top of the player inventory
    pub const BARREL_ROWS: usize = 3;
}

/// Router lifecycle defaults
pub mod lifecycle {
    /// Shutdown passes before giving up on reopening guis
    pub const SHUTDOWN_MAX_PASSES: usize = 10;
    /// Scheduler and host event drain rounds per settle
    pub const MAX_SETTLE_ROUNDS: usize = 64;
}

pub use slots::{DEFAULT_MAX_STACK_SIZE, HOTBAR_SIZE, OUTSIDE_SLOT, PLAYER_STORAGE_SIZE};
