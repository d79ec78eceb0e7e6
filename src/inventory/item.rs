use crate::constants::DEFAULT_MAX_STACK_SIZE;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of an item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

fn default_max_stack_size() -> u32 {
    DEFAULT_MAX_STACK_SIZE
}

/// A stack always holds at least one item per slot
fn deserialize_max_stack_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    u32::deserialize(deserializer).map(|size| size.max(1))
}

/// Represents a stack of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub count: u32,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_max_stack_size", deserialize_with = "deserialize_max_stack_size")]
    pub max_stack_size: u32,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_id: ItemId, count: u32) -> Self {
        Self {
            item_id,
            count,
            display_name: None,
            max_stack_size: DEFAULT_MAX_STACK_SIZE,
        }
    }

    /// Create a single item
    pub fn single(item_id: ItemId) -> Self {
        Self::new(item_id, 1)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_max_stack_size(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = max_stack_size.max(1);
        self
    }

    /// Same item and meta, ignoring the amount
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id
            && self.display_name == other.display_name
            && self.max_stack_size == other.max_stack_size
    }

    /// Try to add items to this stack, returns remaining items
    pub fn try_add(&mut self, count: u32) -> u32 {
        let space = self.max_stack_size.saturating_sub(self.count);
        let to_add = count.min(space);
        self.count += to_add;
        count - to_add
    }

    /// Split the stack, taking up to the specified count
    pub fn split(&mut self, count: u32) -> Option<ItemStack> {
        if count == 0 || self.count == 0 {
            return None;
        }

        let taken = count.min(self.count);
        self.count -= taken;

        let mut result = self.clone();
        result.count = taken;
        Some(result)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.max_stack_size
    }
}

/// Merge `item` into `slots`, similar stacks first and then empty slots.
/// Returns the amount that did not fit.
pub fn merge_into_slots(slots: &mut [Option<ItemStack>], item: &ItemStack) -> u32 {
    let mut remaining = item.count;
    let per_slot = item.max_stack_size.max(1);

    for stack in slots.iter_mut().flatten() {
        if remaining == 0 {
            break;
        }

        if stack.is_similar(item) {
            remaining = stack.try_add(remaining);
        }
    }

    for slot in slots.iter_mut() {
        if remaining == 0 {
            break;
        }

        if slot.is_none() {
            let placed = remaining.min(per_slot);
            let mut stack = item.clone();
            stack.count = placed;
            *slot = Some(stack);
            remaining -= placed;
        }
    }

    remaining
}
