//! Payment method selection.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The payment method chosen at checkout. Exactly one is active at a time;
/// exclusivity comes from this being an enum rather than a set of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Klarna hosted/embedded payment session.
    Klarna,
    /// PayPal. Not integrated; checkout rejects this method.
    Paypal,
    /// Development-only path that creates the order directly, bypassing
    /// real payment processors.
    Dummy,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Klarna => "klarna",
            Self::Paypal => "paypal",
            Self::Dummy => "dummy",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Klarna).unwrap(),
            "\"klarna\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"dummy\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Dummy);
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(serde_json::from_str::<PaymentMethod>("\"bitcoin\"").is_err());
    }
}
