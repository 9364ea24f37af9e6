//! Resolved scalar function implementations and their results.

use std::fmt;
use std::time::Duration;

use arrow::array::ArrayRef;
use arrow::datatypes::DataType;

use crate::language::{ImplementationType, Language};

/// Identity of a SQL function: qualified name plus argument types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlFunctionId {
    name: String,
    argument_types: Vec<DataType>,
}

impl SqlFunctionId {
    pub fn new(name: impl Into<String>, argument_types: Vec<DataType>) -> Self {
        Self {
            name: name.into(),
            argument_types,
        }
    }

    /// Qualified name, e.g. `catalog.schema.function`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn argument_types(&self) -> &[DataType] {
        &self.argument_types
    }
}

impl fmt::Display for SqlFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.argument_types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// A function implementation that runs outside the engine process.
///
/// Built by function resolution; executors only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteScalarFunctionImplementation {
    function_id: SqlFunctionId,
    version: String,
    language: Language,
    implementation_type: ImplementationType,
}

impl RemoteScalarFunctionImplementation {
    pub fn new(
        function_id: SqlFunctionId,
        version: impl Into<String>,
        language: Language,
        implementation_type: ImplementationType,
    ) -> Self {
        Self {
            function_id,
            version: version.into(),
            language,
            implementation_type,
        }
    }

    pub fn function_id(&self) -> &SqlFunctionId {
        &self.function_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Protocol family this implementation is reached over. Authoritative
    /// at execution time.
    pub fn implementation_type(&self) -> ImplementationType {
        self.implementation_type
    }
}

/// Every kind of resolved scalar function implementation the engine knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarFunctionImplementation {
    /// Native implementation compiled into the engine.
    Builtin { name: String },
    /// Function whose body is a SQL expression, inlined at planning time.
    Sql { body: String },
    /// Out-of-process implementation invoked over a wire protocol.
    Remote(RemoteScalarFunctionImplementation),
}

impl ScalarFunctionImplementation {
    /// Short name of the implementation kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ScalarFunctionImplementation::Builtin { .. } => "builtin",
            ScalarFunctionImplementation::Sql { .. } => "sql",
            ScalarFunctionImplementation::Remote(_) => "remote",
        }
    }

    pub fn as_remote(&self) -> Option<&RemoteScalarFunctionImplementation> {
        match self {
            ScalarFunctionImplementation::Remote(remote) => Some(remote),
            _ => None,
        }
    }
}

impl From<RemoteScalarFunctionImplementation> for ScalarFunctionImplementation {
    fn from(remote: RemoteScalarFunctionImplementation) -> Self {
        ScalarFunctionImplementation::Remote(remote)
    }
}

/// Output of one remote invocation: the result column and the CPU time the
/// remote side reported for computing it.
#[derive(Debug, Clone)]
pub struct SqlFunctionResult {
    result: ArrayRef,
    cpu_time: Duration,
}

impl SqlFunctionResult {
    pub fn new(result: ArrayRef, cpu_time: Duration) -> Self {
        Self { result, cpu_time }
    }

    pub fn result(&self) -> &ArrayRef {
        &self.result
    }

    pub fn cpu_time(&self) -> Duration {
        self.cpu_time
    }

    pub fn into_result(self) -> ArrayRef {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array};
    use std::sync::Arc;

    fn remote(implementation_type: ImplementationType) -> RemoteScalarFunctionImplementation {
        RemoteScalarFunctionImplementation::new(
            SqlFunctionId::new("udf.math.add", vec![DataType::Int64, DataType::Int64]),
            "1",
            Language::new("python").unwrap(),
            implementation_type,
        )
    }

    #[test]
    fn test_function_id_display() {
        let id = SqlFunctionId::new("udf.math.add", vec![DataType::Int64, DataType::Utf8]);
        assert_eq!(id.to_string(), "udf.math.add(Int64, Utf8)");

        let nullary = SqlFunctionId::new("udf.misc.now", vec![]);
        assert_eq!(nullary.to_string(), "udf.misc.now()");
    }

    #[test]
    fn test_implementation_kinds() {
        let builtin = ScalarFunctionImplementation::Builtin {
            name: "abs".to_string(),
        };
        let sql = ScalarFunctionImplementation::Sql {
            body: "RETURN x + 1".to_string(),
        };
        let remote: ScalarFunctionImplementation = remote(ImplementationType::Grpc).into();

        assert_eq!(builtin.kind(), "builtin");
        assert_eq!(sql.kind(), "sql");
        assert_eq!(remote.kind(), "remote");

        assert!(builtin.as_remote().is_none());
        assert!(sql.as_remote().is_none());
        let handle = remote.as_remote().unwrap();
        assert_eq!(handle.implementation_type(), ImplementationType::Grpc);
        assert_eq!(handle.language().as_str(), "PYTHON");
        assert_eq!(handle.version(), "1");
    }

    #[test]
    fn test_function_result() {
        let array = Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef;
        let result = SqlFunctionResult::new(array, Duration::from_millis(12));
        assert_eq!(result.cpu_time(), Duration::from_millis(12));
        assert_eq!(result.result().len(), 3);
        assert_eq!(result.into_result().len(), 3);
    }
}
