use std::borrow::Cow;

use thiserror::Error;

/// Message carried by [`IanError::InvalidMeshHeader`] when the four
/// redundant mesh header records disagree.
pub const MESH_HEADER_MISMATCH: &str = "Mesh header mismatch";

/// Message carried by [`IanError::InvalidMeshHeader`] when the duplicate
/// faces offset at byte 112 disagrees with the mesh header.
pub const FACES_OFFSET_MISMATCH: &str = "Faces offset mismatch";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IanError {
    #[error("Invalid file version")]
    InvalidVersion { found: u32 },
    #[error("{0}")]
    InvalidMeshHeader(String),
    #[error("Out of bounds access to {field} at offset {offset}: need {needed} bytes, have {available}")]
    OutOfBounds {
        field: Cow<'static, str>,
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("Malformed interchange input on line {line}: {message}")]
    MalformedInterchangeInput { line: usize, message: String },
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
}

pub type Status = Result<(), IanError>;

impl IanError {
    pub fn out_of_bounds(
        field: impl Into<Cow<'static, str>>,
        offset: usize,
        needed: usize,
        available: usize,
    ) -> Self {
        IanError::OutOfBounds {
            field: field.into(),
            offset,
            needed,
            available,
        }
    }

    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        IanError::MalformedInterchangeInput {
            line,
            message: message.into(),
        }
    }

    /// Replaces the field description of an `OutOfBounds` error.
    /// Other variants pass through untouched.
    pub fn with_field(self, name: impl Into<Cow<'static, str>>) -> Self {
        match self {
            IanError::OutOfBounds {
                offset,
                needed,
                available,
                ..
            } => IanError::OutOfBounds {
                field: name.into(),
                offset,
                needed,
                available,
            },
            other => other,
        }
    }
}

/// Attaches a field description to out-of-bounds failures.
pub trait FieldContext<T> {
    fn field(self, name: &'static str) -> Result<T, IanError>;

    fn field_with<F, S>(self, name: F) -> Result<T, IanError>
    where
        F: FnOnce() -> S,
        S: Into<Cow<'static, str>>;
}

impl<T> FieldContext<T> for Result<T, IanError> {
    fn field(self, name: &'static str) -> Result<T, IanError> {
        self.map_err(|e| e.with_field(name))
    }

    fn field_with<F, S>(self, name: F) -> Result<T, IanError>
    where
        F: FnOnce() -> S,
        S: Into<Cow<'static, str>>,
    {
        self.map_err(|e| e.with_field(name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            IanError::InvalidVersion { found: 7 }.to_string(),
            "Invalid file version"
        );
        assert_eq!(
            IanError::InvalidMeshHeader(MESH_HEADER_MISMATCH.into()).to_string(),
            "Mesh header mismatch"
        );
        assert_eq!(
            IanError::InvalidMeshHeader(FACES_OFFSET_MISMATCH.into()).to_string(),
            "Faces offset mismatch"
        );
    }

    #[test]
    fn test_field_context_only_touches_out_of_bounds() {
        let err: Result<(), IanError> = Err(IanError::out_of_bounds("u32", 40, 4, 2));
        match err.field("vertex 3 position") {
            Err(IanError::OutOfBounds { field, offset, .. }) => {
                assert_eq!(field, "vertex 3 position");
                assert_eq!(offset, 40);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let err: Result<(), IanError> = Err(IanError::InvalidVersion { found: 1 });
        assert_eq!(
            err.field_with(|| format!("face {}", 1)),
            Err(IanError::InvalidVersion { found: 1 })
        );
    }
}
