//! Database query functions organized by table.

pub mod chunks;
pub mod meta;
pub mod nodes;
pub mod oplog;
pub mod tabs;
