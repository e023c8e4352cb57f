pub mod compare;
pub mod contact;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod home;
pub mod inbox;
pub mod listing_form;
pub mod login;
pub mod photos;
pub mod search;

pub use compare::compare_page;
pub use contact::{contact_page, offer_page, thanks_page};
pub use dashboard::{dashboard_page, DashboardVm};
pub use detail::{detail_page, DetailVm};
pub use error::error_page;
pub use home::home_page;
pub use inbox::{inbox_page, message_page};
pub use listing_form::{listing_form_page, listing_form_values, ListingFormVm};
pub use login::login_page;
pub use photos::{photos_page, PhotosVm};
pub use search::{search_page, SearchVm};
