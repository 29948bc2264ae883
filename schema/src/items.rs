use crate::EffectKind;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[repr(u8)]
pub enum Item {
    // Cures
    Serum = 1,
    Shovel = 3,
    WetTowel = 4,
    Refresher = 6,

    // Foods
    Chocolate = 7,
    Sandwich = 10,
    Steak = 12,
    FullMeal = 18,

    // Drinks
    Juice = 9,
    Potion = 19,

    // Herbs
    LuckHerb = 25,
    StrongHerb = 31,
    ToughHerb = 32,
    QuickHerb = 33,

    // Key items
    FishingRod = 39,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ItemFlags: u8 {
        const REUSABLE    = 0x01;
        const MENU_ONLY   = 0x02;
        const BATTLE_ONLY = 0x04;
        const ANYWHERE    = Self::MENU_ONLY.bits() | Self::BATTLE_ONLY.bits();
        const IMPORTANT   = 0x08;
    }
}

/// One usability flag as written in the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemUse {
    Reusable,
    MenuOnly,
    BattleOnly,
    Anywhere,
    Important,
}

impl From<ItemUse> for ItemFlags {
    fn from(value: ItemUse) -> Self {
        match value {
            ItemUse::Reusable => ItemFlags::REUSABLE,
            ItemUse::MenuOnly => ItemFlags::MENU_ONLY,
            ItemUse::BattleOnly => ItemFlags::BATTLE_ONLY,
            ItemUse::Anywhere => ItemFlags::ANYWHERE,
            ItemUse::Important => ItemFlags::IMPORTANT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemData {
    pub name: String,
    pub price: u32,
    #[serde(default)]
    pub effect: EffectKind,
    #[serde(default)]
    pub argument: i32,
    #[serde(default)]
    pub uses: Vec<ItemUse>,
    #[serde(default)]
    pub description: String,
}

impl ItemData {
    pub fn flags(&self) -> ItemFlags {
        self.uses
            .iter()
            .fold(ItemFlags::empty(), |flags, usage| flags | ItemFlags::from(*usage))
    }

    pub fn usable_in_battle(&self) -> bool {
        self.flags().contains(ItemFlags::BATTLE_ONLY)
    }

    pub fn is_reusable(&self) -> bool {
        self.flags().contains(ItemFlags::REUSABLE)
    }
}
