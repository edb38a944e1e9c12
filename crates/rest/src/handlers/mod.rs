//! HTTP request handlers.

pub mod admin;
pub mod health;
pub mod records;
pub mod tenant_info;

pub use admin::count_all_records;
pub use health::health_handler;
pub use records::{
    count_records, create_record, delete_record, list_records, patch_record, read_record,
    update_record,
};
pub use tenant_info::current_tenant_handler;
