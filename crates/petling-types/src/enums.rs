//! Enumeration types for the Petling pet model.
//!
//! Every enum here serializes as a lowercase string so that snapshots
//! written by earlier clients (`"happy"`, `"egg"`, `"collectible"`) load
//! without translation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// The pet's displayed mood.
///
/// Mood is never set directly: the engine derives it from the four stats,
/// the sleep flag, and the alive flag on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Mood {
    /// No need is pressing.
    #[default]
    Happy,
    /// Hunger is above the hungry threshold.
    Hungry,
    /// Happiness is below the sad threshold.
    Sad,
    /// Cleanliness is below the dirty threshold.
    Dirty,
    /// The pet is asleep. Wins over every other living mood.
    Sleepy,
    /// The pet is not alive.
    Dead,
}

impl core::fmt::Display for Mood {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Happy => write!(f, "happy"),
            Self::Hungry => write!(f, "hungry"),
            Self::Sad => write!(f, "sad"),
            Self::Dirty => write!(f, "dirty"),
            Self::Sleepy => write!(f, "sleepy"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Life stage of the pet.
///
/// Ordering follows the direction of growth (`Egg < Baby < Adult`). The
/// engine only ever moves a pet forward along this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Stage {
    /// Freshly created pet.
    #[default]
    Egg,
    /// Hatched pet.
    Baby,
    /// Fully grown pet.
    Adult,
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Egg => write!(f, "egg"),
            Self::Baby => write!(f, "baby"),
            Self::Adult => write!(f, "adult"),
        }
    }
}

// ---------------------------------------------------------------------------
// Item kinds
// ---------------------------------------------------------------------------

/// Category of a purchasable item.
///
/// Catalog entries whose `type` is not one of the known categories
/// deserialize as [`ItemKind::Unknown`] instead of failing the whole
/// catalog. Purchases of unknown items are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Lowers hunger when bought.
    Food,
    /// Raises happiness when bought.
    Toy,
    /// Added to the inventory when bought.
    Collectible,
    /// Any category this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Toy => write!(f, "toy"),
            Self::Collectible => write!(f, "collectible"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Reason a care or economy action was refused.
///
/// Rejections are ordinary outcomes, not faults: the pet state is left
/// exactly as it was before the action was attempted (apart from the
/// time-advance every action performs first).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, thiserror::Error,
)]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The action needs a living pet.
    #[error("the pet is not alive")]
    PetDead,
    /// Revive was requested for a pet that is alive.
    #[error("the pet is already alive")]
    AlreadyAlive,
    /// The purchase costs more than the current balance.
    #[error("insufficient funds: item costs {cost}, balance is {balance}")]
    InsufficientFunds {
        /// Price of the item.
        cost: u64,
        /// Balance at the time of the purchase.
        balance: u64,
    },
    /// The daily tap allowance is used up.
    #[error("daily tap limit of {cap} reached")]
    DailyTapLimit {
        /// The configured daily cap.
        cap: u32,
    },
    /// Play was requested while the pet is asleep.
    #[error("the pet is sleeping")]
    Sleeping,
    /// The item's category is not food, toy, or collectible.
    #[error("unknown item type")]
    UnknownItemType,
    /// Less than one full hour has passed since the last payout.
    #[error("passive income is not ready yet")]
    IncomeNotReady,
}
