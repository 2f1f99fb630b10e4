pub mod item;
pub mod record;
pub mod roster;
pub mod staff;
pub mod summary;
