mod wire;

pub use wire::{FORMAT_TYPE, FormattedItem, WireFormatter};
