pub mod connection;
pub mod leads;
pub mod listings;
pub mod photos;
pub mod social_posts;

pub use connection::{init_db, Database};
pub use listings::ListingScope;
