pub mod compare;
pub mod format;
pub mod lead;
pub mod listing;
pub mod search;
pub mod slug;
