//! Composite consumers: Card, Drawer, ButtonGroup, OptionGroup.
//!
//! Each composite pairs a format pass with its own composition policy:
//! which roles it intercepts, what it injects, and what counts as misuse.

pub mod button_group;
pub mod card;
pub mod drawer;
pub mod group;

pub use button_group::ButtonGroup;
pub use card::{Card, CardLayout};
pub use drawer::{Drawer, DrawerParts};
pub use group::OptionGroup;
