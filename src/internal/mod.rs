pub mod last_searches;
pub mod models;
pub mod notification;
pub mod saved_search;
pub mod stories;
pub mod ui;
