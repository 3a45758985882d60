pub mod branch;
pub mod entry;
pub mod entry_type;
pub mod form_data;
pub mod sector;

pub use branch::Branch;
pub use entry::{Entry, EntryPatch};
pub use entry_type::EntryType;
pub use form_data::{FormData, MetaPatch};
pub use sector::Sector;
