pub mod admin;
pub mod site;
