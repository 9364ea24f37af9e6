//! remfn Executor - routes remote SQL function calls to their transport
//!
//! [`SqlFunctionExecutors`] owns the language capability table and the
//! optional Thrift and gRPC transport clients, and forwards each execution
//! to the client matching the function's implementation type.

pub mod client;
pub mod config;
pub mod error;
pub mod executors;
pub mod metrics;

pub use client::{FunctionFuture, GrpcSqlFunctionExecutor, ThriftSqlFunctionExecutor};
pub use config::{ConfigError, ExecutorConfig};
pub use error::ExecutorError;
pub use executors::SqlFunctionExecutors;
pub use metrics::{DispatchMetrics, DispatchOutcome};
