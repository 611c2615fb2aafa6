mod activity_log;
mod log_store;

pub use activity_log::EncryptedActivityLog;
pub use log_store::EncryptedLogStore;
