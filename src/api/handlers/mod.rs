//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod backup;
pub mod health;
pub mod links;
pub mod redirect;
pub mod settings;
pub mod stats;

pub use ab_tests::validate_ab_tests_handler;
pub use backup::{export_handler, import_handler};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, get_link_by_code_handler, get_link_handler,
    list_links_handler, update_link_handler,
};
pub use redirect::redirect_handler;
pub use settings::{
    add_domain_handler, get_settings_handler, remove_domain_handler,
    update_default_domain_handler,
};
pub use stats::stats_handler;
