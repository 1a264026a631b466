//! Connection state of the listening stream

use serde::{Deserialize, Serialize};

/// Whether the decoder currently holds an open stream
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    /// Status text shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected => "Conectado",
            Self::Disconnected => "Desconectado",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_disconnected() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
        assert!(!ConnectionState::default().is_connected());
    }

    #[test]
    fn test_labels() {
        assert_eq!(ConnectionState::Connected.label(), "Conectado");
        assert_eq!(ConnectionState::Disconnected.label(), "Desconectado");
    }
}
