//! Prometheus counters for function dispatch decisions.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;
use remfn_core::ImplementationType;
use std::sync::Arc;

/// What the dispatcher did with a call.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum DispatchOutcome {
    Dispatched,
    InvalidHandle,
    NotConfigured,
}

impl DispatchOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Dispatched => "dispatched",
            DispatchOutcome::InvalidHandle => "invalid_handle",
            DispatchOutcome::NotConfigured => "not_configured",
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DispatchLabel {
    /// `None` when the handle was not remote and carries no type.
    pub implementation_type: Option<ImplementationType>,
    pub outcome: DispatchOutcome,
}

impl prometheus_client::encoding::EncodeLabelSet for DispatchLabel {
    fn encode(
        &self,
        mut encoder: prometheus_client::encoding::LabelSetEncoder,
    ) -> Result<(), std::fmt::Error> {
        use prometheus_client::encoding::EncodeLabel;
        let implementation_type = self
            .implementation_type
            .map(|t| t.as_str())
            .unwrap_or("none");
        ("implementation_type", implementation_type).encode(encoder.encode_label())?;
        ("outcome", self.outcome.as_str()).encode(encoder.encode_label())?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct DispatchMetrics {
    pub dispatches: Family<DispatchLabel, Counter>,
    pub registry: Arc<Registry>,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let dispatches = Family::<DispatchLabel, Counter>::default();
        registry.register(
            "remfn_function_dispatch",
            "Remote function calls by implementation type and dispatch outcome",
            dispatches.clone(),
        );

        Self {
            dispatches,
            registry: Arc::new(registry),
        }
    }

    pub fn record(
        &self,
        implementation_type: Option<ImplementationType>,
        outcome: DispatchOutcome,
    ) {
        self.dispatches
            .get_or_create(&DispatchLabel {
                implementation_type,
                outcome,
            })
            .inc();
    }

    /// Current count for one label combination. Reading an unseen label
    /// does not create a series.
    pub fn count(
        &self,
        implementation_type: Option<ImplementationType>,
        outcome: DispatchOutcome,
    ) -> u64 {
        self.dispatches
            .get(&DispatchLabel {
                implementation_type,
                outcome,
            })
            .map(|counter| counter.get())
            .unwrap_or(0)
    }

    /// Encode all metrics as Prometheus text format.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buf = String::new();
        encode(&mut buf, &self.registry)?;
        Ok(buf)
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_per_label() {
        let metrics = DispatchMetrics::new();
        metrics.record(Some(ImplementationType::Grpc), DispatchOutcome::Dispatched);
        metrics.record(Some(ImplementationType::Grpc), DispatchOutcome::Dispatched);
        metrics.record(Some(ImplementationType::Thrift), DispatchOutcome::NotConfigured);

        assert_eq!(
            metrics.count(Some(ImplementationType::Grpc), DispatchOutcome::Dispatched),
            2
        );
        assert_eq!(
            metrics.count(Some(ImplementationType::Thrift), DispatchOutcome::NotConfigured),
            1
        );
        assert_eq!(
            metrics.count(Some(ImplementationType::Thrift), DispatchOutcome::Dispatched),
            0
        );
    }

    #[test]
    fn test_count_does_not_create_series() {
        let metrics = DispatchMetrics::new();
        metrics.record(Some(ImplementationType::Thrift), DispatchOutcome::Dispatched);

        let before = metrics.encode().unwrap();
        assert_eq!(
            metrics.count(Some(ImplementationType::Grpc), DispatchOutcome::Dispatched),
            0
        );
        let after = metrics.encode().unwrap();

        assert_eq!(before, after);
        assert!(!after.contains("implementation_type=\"GRPC\""), "{after}");
    }

    #[test]
    fn test_encode_text_format() {
        let metrics = DispatchMetrics::new();
        metrics.record(Some(ImplementationType::Rest), DispatchOutcome::Dispatched);
        metrics.record(None, DispatchOutcome::InvalidHandle);

        let text = metrics.encode().unwrap();
        assert!(text.contains("remfn_function_dispatch_total"), "{text}");
        assert!(
            text.contains("implementation_type=\"REST\",outcome=\"dispatched\""),
            "{text}"
        );
        assert!(
            text.contains("implementation_type=\"none\",outcome=\"invalid_handle\""),
            "{text}"
        );
    }
}
