//! Capability table and transport dispatch for remote SQL functions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use remfn_core::{ImplementationType, Language, PageCodec, ScalarFunctionImplementation};
use tracing::{debug, info, warn};

use crate::client::{FunctionFuture, GrpcSqlFunctionExecutor, ThriftSqlFunctionExecutor};
use crate::config::ExecutorConfig;
use crate::error::ExecutorError;
use crate::metrics::{DispatchMetrics, DispatchOutcome};

const THRIFT_TRANSPORT: &str = "Thrift";
const GRPC_TRANSPORT: &str = "gRPC";

/// Routes remote function executions to the Thrift or gRPC client.
///
/// The language table and the client slots are fixed at construction, so
/// the dispatcher can be shared across threads without locking. Either
/// client may be absent, in which case functions that need it fail with
/// [`ExecutorError::NotConfigured`].
pub struct SqlFunctionExecutors {
    supported_languages: HashMap<Language, ImplementationType>,
    thrift_executor: Option<Arc<dyn ThriftSqlFunctionExecutor>>,
    grpc_executor: Option<Arc<dyn GrpcSqlFunctionExecutor>>,
    metrics: DispatchMetrics,
}

impl SqlFunctionExecutors {
    pub fn new(
        supported_languages: HashMap<Language, ImplementationType>,
        thrift_executor: Option<Arc<dyn ThriftSqlFunctionExecutor>>,
        grpc_executor: Option<Arc<dyn GrpcSqlFunctionExecutor>>,
    ) -> Self {
        let executors = Self {
            supported_languages,
            thrift_executor,
            grpc_executor,
            metrics: DispatchMetrics::new(),
        };
        executors.log_capabilities();
        executors
    }

    /// Build from configuration. A client whose transport is disabled in
    /// `config` is dropped, leaving its slot empty.
    pub fn from_config(
        config: &ExecutorConfig,
        thrift_executor: Option<Arc<dyn ThriftSqlFunctionExecutor>>,
        grpc_executor: Option<Arc<dyn GrpcSqlFunctionExecutor>>,
    ) -> Self {
        Self::new(
            config.supported_languages.clone(),
            thrift_executor.filter(|_| config.thrift_enabled),
            grpc_executor.filter(|_| config.grpc_enabled),
        )
    }

    fn log_capabilities(&self) {
        let mut languages: Vec<_> = self.supported_languages.iter().collect();
        languages.sort_by(|a, b| a.0.cmp(b.0));

        for (language, implementation_type) in &languages {
            if **implementation_type == ImplementationType::Rest {
                warn!(
                    %language,
                    "{} functions are executed through the {} client",
                    implementation_type, THRIFT_TRANSPORT
                );
            }
            let transport_present = match implementation_type {
                ImplementationType::Grpc => self.grpc_executor.is_some(),
                _ => self.thrift_executor.is_some(),
            };
            if !transport_present {
                warn!(
                    %language,
                    implementation_type = %implementation_type,
                    "Language is supported but its transport client is not configured"
                );
            }
        }

        info!(
            languages = ?languages,
            thrift = self.thrift_executor.is_some(),
            grpc = self.grpc_executor.is_some(),
            "SqlFunctionExecutors initialized"
        );
    }

    /// Install the shared page codec on every configured client.
    ///
    /// Call once, before the first execution.
    pub fn configure_codec(&self, codec: Arc<PageCodec>) {
        if let Some(executor) = &self.thrift_executor {
            executor.set_page_codec(codec.clone());
        }
        if let Some(executor) = &self.grpc_executor {
            executor.set_page_codec(codec);
        }
    }

    pub fn supported_languages(&self) -> HashSet<&Language> {
        self.supported_languages.keys().collect()
    }

    pub fn implementation_type(&self, language: &Language) -> Option<ImplementationType> {
        self.supported_languages.get(language).copied()
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Forward one invocation to the client for the function's
    /// implementation type.
    ///
    /// Local failures are returned immediately. The returned future is the
    /// client's own; its failures are not retried or rewrapped here.
    pub fn execute_function(
        &self,
        source: &str,
        implementation: &ScalarFunctionImplementation,
        input: &RecordBatch,
        channels: &[usize],
        argument_types: &[DataType],
        return_type: &DataType,
    ) -> Result<FunctionFuture, ExecutorError> {
        let ScalarFunctionImplementation::Remote(function) = implementation else {
            self.metrics.record(None, DispatchOutcome::InvalidHandle);
            return Err(ExecutorError::InvalidHandleKind {
                kind: implementation.kind(),
            });
        };

        let implementation_type = function.implementation_type();
        debug!(
            function = %function.function_id(),
            %implementation_type,
            rows = input.num_rows(),
            "Dispatching remote function"
        );

        match implementation_type {
            ImplementationType::Grpc => {
                let Some(executor) = &self.grpc_executor else {
                    return Err(self.not_configured(implementation_type, GRPC_TRANSPORT));
                };
                self.metrics
                    .record(Some(implementation_type), DispatchOutcome::Dispatched);
                Ok(executor.execute_function(source, function, input, channels, return_type))
            }
            _ => {
                let Some(executor) = &self.thrift_executor else {
                    return Err(self.not_configured(implementation_type, THRIFT_TRANSPORT));
                };
                self.metrics
                    .record(Some(implementation_type), DispatchOutcome::Dispatched);
                Ok(executor.execute_function(
                    source,
                    function,
                    input,
                    channels,
                    argument_types,
                    return_type,
                ))
            }
        }
    }

    fn not_configured(
        &self,
        implementation_type: ImplementationType,
        transport: &'static str,
    ) -> ExecutorError {
        self.metrics
            .record(Some(implementation_type), DispatchOutcome::NotConfigured);
        ExecutorError::NotConfigured {
            implementation_type,
            transport,
        }
    }
}
