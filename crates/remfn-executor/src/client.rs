//! Transport client contracts consumed by the dispatcher.
//!
//! Implementations own connection management, serialization, retries and
//! timeouts. They are shared across concurrent callers and must be safe to
//! call from any thread.

use std::sync::Arc;

use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use futures::future::BoxFuture;
use remfn_core::{PageCodec, RemoteScalarFunctionImplementation, SqlFunctionResult};

/// Pending result of a remote invocation. Transport failures are carried
/// inside as-is.
pub type FunctionFuture = BoxFuture<'static, anyhow::Result<SqlFunctionResult>>;

/// Client for functions served over Thrift (and any non-gRPC protocol).
pub trait ThriftSqlFunctionExecutor: Send + Sync {
    /// Install the page codec. Called once at startup, before any execution.
    fn set_page_codec(&self, codec: Arc<PageCodec>);

    fn execute_function(
        &self,
        source: &str,
        function: &RemoteScalarFunctionImplementation,
        input: &RecordBatch,
        channels: &[usize],
        argument_types: &[DataType],
        return_type: &DataType,
    ) -> FunctionFuture;
}

/// Client for functions served over gRPC.
///
/// The gRPC wire format carries argument types with the encoded page, so
/// only the return type is passed.
pub trait GrpcSqlFunctionExecutor: Send + Sync {
    /// Install the page codec. Called once at startup, before any execution.
    fn set_page_codec(&self, codec: Arc<PageCodec>);

    fn execute_function(
        &self,
        source: &str,
        function: &RemoteScalarFunctionImplementation,
        input: &RecordBatch,
        channels: &[usize],
        return_type: &DataType,
    ) -> FunctionFuture;
}
