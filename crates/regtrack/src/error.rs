use crate::config::ConfigError;
use crate::export::ExportError;
use crate::registrations::{LifecycleError, MonitorError, StoreError, WorkflowError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Snapshot(serde_json::Error),
    Lifecycle(LifecycleError),
    Store(StoreError),
    Monitor(MonitorError),
    Workflow(WorkflowError),
    Export(ExportError),
}

impl AppError {
    /// Process exit status for the operator binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Lifecycle(_)
            | AppError::Workflow(WorkflowError::InvalidTransition { .. })
            | AppError::Workflow(WorkflowError::Lifecycle(_)) => 2,
            AppError::Export(ExportError::Empty { .. }) => 3,
            _ => 1,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Snapshot(err) => write!(f, "snapshot error: {}", err),
            AppError::Lifecycle(err) => write!(f, "lifecycle error: {}", err),
            AppError::Store(err) => write!(f, "store error: {}", err),
            AppError::Monitor(err) => write!(f, "expiry scan error: {}", err),
            AppError::Workflow(err) => write!(f, "workflow error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Snapshot(err) => Some(err),
            AppError::Lifecycle(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Monitor(err) => Some(err),
            AppError::Workflow(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Snapshot(value)
    }
}

impl From<LifecycleError> for AppError {
    fn from(value: LifecycleError) -> Self {
        Self::Lifecycle(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<MonitorError> for AppError {
    fn from(value: MonitorError) -> Self {
        Self::Monitor(value)
    }
}

impl From<WorkflowError> for AppError {
    fn from(value: WorkflowError) -> Self {
        Self::Workflow(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}
