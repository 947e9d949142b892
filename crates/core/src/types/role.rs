//! User roles with different permission levels.
//!
//! Roles mirror the loan-tracking backend's user model. Wire values are
//! SCREAMING_SNAKE_CASE to match what the API serializes.

use serde::{Deserialize, Serialize};

/// Role assigned to a back-office user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Full access including user management.
    Admin,
    /// Client relationship officer.
    ChargeClientele,
    /// Loan analyst.
    AnalystePrets,
    /// Loan administrator - can approve and release disbursements.
    AdministrateurPrets,
    /// Repayment officer.
    ChargeRemboursement,
    /// Agency director.
    DirecteurAgence,
    /// Read-only access to all screens.
    Readonly,
}

impl UserRole {
    /// The wire representation used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::ChargeClientele => "CHARGE_CLIENTELE",
            Self::AnalystePrets => "ANALYSTE_PRETS",
            Self::AdministrateurPrets => "ADMINISTRATEUR_PRETS",
            Self::ChargeRemboursement => "CHARGE_REMBOURSEMENT",
            Self::DirecteurAgence => "DIRECTEUR_AGENCE",
            Self::Readonly => "READONLY",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "CHARGE_CLIENTELE" => Ok(Self::ChargeClientele),
            "ANALYSTE_PRETS" => Ok(Self::AnalystePrets),
            "ADMINISTRATEUR_PRETS" => Ok(Self::AdministrateurPrets),
            "CHARGE_REMBOURSEMENT" => Ok(Self::ChargeRemboursement),
            "DIRECTEUR_AGENCE" => Ok(Self::DirecteurAgence),
            "READONLY" => Ok(Self::Readonly),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&UserRole::AdministrateurPrets).expect("serialize");
        assert_eq!(json, "\"ADMINISTRATEUR_PRETS\"");
        let back: UserRole = serde_json::from_str("\"CHARGE_CLIENTELE\"").expect("deserialize");
        assert_eq!(back, UserRole::ChargeClientele);
    }

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [
            UserRole::Admin,
            UserRole::ChargeClientele,
            UserRole::AnalystePrets,
            UserRole::AdministrateurPrets,
            UserRole::ChargeRemboursement,
            UserRole::DirecteurAgence,
            UserRole::Readonly,
        ] {
            let parsed: UserRole = role.as_str().parse().expect("parse");
            assert_eq!(parsed, role);
        }
        assert!("SUPER_USER".parse::<UserRole>().is_err());
    }
}
