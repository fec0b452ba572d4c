pub mod api_utils;
pub mod config;
pub mod icons;
pub mod list_utils;
pub mod load_guard;
pub mod page_frame;
pub mod page_standard;
pub mod retry;
