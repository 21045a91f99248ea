use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid operator id: {0}")]
    InvalidOperatorId(String),

    #[error("a cluster needs at least one operator")]
    EmptyOperatorSet,

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

/// An account address, always held in lower case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| IdentityError::InvalidAddress(s.to_string()))?;

        let mut raw = [0u8; 20];
        hex::decode_to_slice(digits, &mut raw)
            .map_err(|_| IdentityError::InvalidAddress(s.to_string()))?;

        Ok(Address(format!("0x{}", hex::encode(raw))))
    }
}

impl TryFrom<String> for Address {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(pub u64);

impl OperatorId {
    /// Parses a comma separated list such as `"1, 2,3"`, keeping the order.
    pub fn parse_list(input: &str) -> Result<Vec<OperatorId>, IdentityError> {
        let ids = input
            .split(|c: char| c == ',' || c == '-')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::parse::<OperatorId>)
            .collect::<Result<Vec<_>, _>>()?;

        if ids.is_empty() {
            return Err(IdentityError::EmptyOperatorSet);
        }
        Ok(ids)
    }
}

impl FromStr for OperatorId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(OperatorId)
            .map_err(|_| IdentityError::InvalidOperatorId(s.to_string()))
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The indexer's identifier of a cluster record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(String);

impl ClusterId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner and operator set of a cluster.
///
/// The operator order is significant: it is part of the cluster's on-chain
/// identity and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterKey {
    pub owner: Address,
    pub operator_ids: Vec<OperatorId>,
}

impl ClusterKey {
    pub fn new(owner: Address, operator_ids: Vec<OperatorId>) -> Result<Self, IdentityError> {
        if operator_ids.is_empty() {
            return Err(IdentityError::EmptyOperatorSet);
        }
        Ok(Self {
            owner,
            operator_ids,
        })
    }

    /// `<lower-cased owner>-<id>-<id>...`
    pub fn cluster_id(&self) -> ClusterId {
        ClusterId(format!("{}-{}", self.owner, self.operators_joined("-")))
    }

    /// Operator ids joined with `separator`, for display.
    pub fn operators_joined(&self, separator: &str) -> String {
        self.operator_ids
            .iter()
            .map(OperatorId::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Networks the indexer publishes a subgraph for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Holesky,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Holesky];

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Holesky => "holesky",
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Mainnet
    }
}

impl FromStr for Network {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "ethereum" => Ok(Network::Mainnet),
            "holesky" | "testnet" => Ok(Network::Holesky),
            other => Err(IdentityError::UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
