pub mod audit_log;

pub use audit_log::TracingObserver;
