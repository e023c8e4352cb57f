mod admin_auth_tests;
mod admin_listing_tests;
mod api_tests;
mod inbox_tests;
mod lead_tests;
mod photo_tests;
mod public_tests;
