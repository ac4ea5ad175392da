use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn allocation(context: impl Into<String>, bytes: usize) -> Error {
        Error(
            ErrorKind::AllocationFailure {
                context: context.into(),
                bytes,
                source: None,
            }
            .into(),
        )
    }

    pub fn try_reserve(context: impl Into<String>, bytes: usize, source: TryReserveError) -> Error {
        Error(
            ErrorKind::AllocationFailure {
                context: context.into(),
                bytes,
                source: Some(source),
            }
            .into(),
        )
    }

    pub fn out_of_bounds(operation: &'static str, index: usize, length: usize) -> Error {
        Error(
            ErrorKind::IndexOutOfBounds {
                operation,
                index,
                length,
            }
            .into(),
        )
    }

    /// Returns `true` if this error is an [`ErrorKind::InvalidArgument`].
    pub fn is_invalid_arg(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }

    /// Returns `true` if this error is an [`ErrorKind::AllocationFailure`].
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::AllocationFailure { .. })
    }

    /// Returns `true` if this error is an [`ErrorKind::IndexOutOfBounds`].
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexOutOfBounds { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("failed to allocate {bytes} bytes for {context}")]
    AllocationFailure {
        context: String,
        bytes: usize,
        #[source]
        source: Option<TryReserveError>,
    },

    #[error("index {index} out of bounds for {operation} (length {length})")]
    IndexOutOfBounds {
        operation: &'static str,
        index: usize,
        length: usize,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
