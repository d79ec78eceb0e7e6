use crate::inventory::ItemStack;
use serde::Deserialize;

fn default_price_multiplier() -> f32 {
    0.0
}

/// A trade offered by a merchant gui
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MerchantRecipe {
    pub result: ItemStack,
    /// One or two stacks the viewer pays with
    #[serde(default)]
    pub ingredients: Vec<ItemStack>,
    #[serde(default)]
    pub uses: u32,
    pub max_uses: u32,
    #[serde(default)]
    pub villager_experience: u32,
    #[serde(default = "default_price_multiplier")]
    pub price_multiplier: f32,
}

impl MerchantRecipe {
    pub fn new(result: ItemStack, max_uses: u32) -> Self {
        Self {
            result,
            ingredients: Vec::new(),
            uses: 0,
            max_uses,
            villager_experience: 0,
            price_multiplier: default_price_multiplier(),
        }
    }

    pub fn with_ingredient(mut self, ingredient: ItemStack) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn with_villager_experience(mut self, experience: u32) -> Self {
        self.villager_experience = experience;
        self
    }
}
