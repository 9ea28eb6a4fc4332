use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Commander,
    FieldAgent,
    DataAnalyst,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "commander" => Ok(Self::Commander),
            "fieldagent" | "field_agent" => Ok(Self::FieldAgent),
            "dataanalyst" | "data_analyst" => Ok(Self::DataAnalyst),
            _ => Err(()),
        }
    }
}

/// Capability interface to the external credential collaborator. The core
/// never sees secrets beyond this call.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, agency_id: &str, secret: &str) -> Option<Role>;
}

#[derive(Debug, Clone)]
struct Account {
    agency_id: &'static str,
    secret: &'static str,
    role: Role,
}

/// Plaintext fixture accounts for development and demos.
#[derive(Debug, Clone)]
pub struct MockCredentialStore {
    accounts: Vec<Account>,
}

impl Default for MockCredentialStore {
    fn default() -> Self {
        Self {
            accounts: vec![
                Account {
                    agency_id: "Cmdr-001",
                    secret: "password123",
                    role: Role::Commander,
                },
                Account {
                    agency_id: "Agent-47",
                    secret: "fieldpass",
                    role: Role::FieldAgent,
                },
                Account {
                    agency_id: "Analyst-A",
                    secret: "secure",
                    role: Role::DataAnalyst,
                },
            ],
        }
    }
}

impl Authenticator for MockCredentialStore {
    fn authenticate(&self, agency_id: &str, secret: &str) -> Option<Role> {
        self.accounts
            .iter()
            .find(|account| account.agency_id == agency_id && account.secret == secret)
            .map(|account| account.role)
    }
}
