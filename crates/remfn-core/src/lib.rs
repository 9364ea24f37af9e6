//! remfn Core - function handles and wire codec for remote SQL functions
//!
//! This crate provides the data model shared by the executor dispatcher and
//! the transport clients that call out-of-process function implementations.

pub mod codec;
pub mod function;
pub mod language;

pub use codec::PageCodec;
pub use function::{
    RemoteScalarFunctionImplementation, ScalarFunctionImplementation, SqlFunctionId,
    SqlFunctionResult,
};
pub use language::{ImplementationType, Language, ParseError};

// Re-export for downstream consumers
pub use arrow::datatypes::DataType;
pub use arrow::record_batch::RecordBatch;
