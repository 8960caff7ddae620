//! Character input handed to lexers.

/// Owned source text with an optional name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharStream {
    data: String,
    source_name: Option<String>,
}

impl CharStream {
    /// Wraps `data` without copying it.
    pub fn from_string(data: String) -> Self {
        Self {
            data,
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    #[inline]
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<&str> for CharStream {
    fn from(data: &str) -> Self {
        Self::from_string(data.to_owned())
    }
}
