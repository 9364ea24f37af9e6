//! Page codec shared by every remote function transport.
//!
//! Input pages and result columns are encoded as Arrow IPC streams. One
//! [`PageCodec`] is handed to each transport client at startup so that page
//! data looks the same on every wire, whichever protocol carries it.
//!
//! ## Wire format
//!
//! - Input: the selected channels of the page, in channel order, as a single
//!   IPC stream with one record batch.
//! - Result: an IPC stream whose batches hold exactly one column named
//!   [`RESULT_COLUMN`].

use std::io::Cursor;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::compute::concat;
use arrow::datatypes::{Field, Schema};
use arrow::error::{ArrowError, Result};
use arrow::ipc::reader::StreamReader;
use arrow::ipc::writer::{IpcWriteOptions, StreamWriter};
use arrow::record_batch::RecordBatch;

/// Column name used for encoded function results.
pub const RESULT_COLUMN: &str = "result";

/// Arrow IPC encoder/decoder for function input pages and result columns.
#[derive(Debug, Clone, Default)]
pub struct PageCodec {
    options: IpcWriteOptions,
}

impl PageCodec {
    pub fn new(options: IpcWriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IpcWriteOptions {
        &self.options
    }

    /// Encode the given channels of `page` as function arguments.
    ///
    /// Channels may repeat; an out-of-range channel is an error.
    pub fn encode_channels(&self, page: &RecordBatch, channels: &[usize]) -> Result<Vec<u8>> {
        let arguments = page.project(channels)?;
        self.encode_batch(&arguments)
    }

    pub fn encode_batch(&self, batch: &RecordBatch) -> Result<Vec<u8>> {
        let mut writer =
            StreamWriter::try_new_with_options(Vec::new(), &batch.schema(), self.options.clone())?;
        writer.write(batch)?;
        writer.finish()?;
        writer.into_inner()
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<RecordBatch>> {
        let reader = StreamReader::try_new(Cursor::new(bytes), None)?;
        reader.collect()
    }

    /// Encode a single result column.
    pub fn encode_result(&self, result: ArrayRef) -> Result<Vec<u8>> {
        let schema = Schema::new(vec![Field::new(
            RESULT_COLUMN,
            result.data_type().clone(),
            true,
        )]);
        let batch = RecordBatch::try_new(Arc::new(schema), vec![result])?;
        self.encode_batch(&batch)
    }

    /// Decode a result column, concatenating it if it spans several batches.
    pub fn decode_result(&self, bytes: &[u8]) -> Result<ArrayRef> {
        let batches = self.decode(bytes)?;
        let mut columns = Vec::with_capacity(batches.len());
        for batch in &batches {
            if batch.num_columns() != 1 {
                return Err(ArrowError::InvalidArgumentError(format!(
                    "expected a single result column, got {}",
                    batch.num_columns()
                )));
            }
            columns.push(batch.column(0).as_ref());
        }
        if columns.is_empty() {
            return Err(ArrowError::InvalidArgumentError(
                "result stream contains no batches".to_string(),
            ));
        }
        concat(&columns)
    }
}
