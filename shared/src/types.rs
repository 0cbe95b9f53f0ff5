use std::{fmt, str::FromStr};

use thiserror::Error;

/// The part a process plays in the cluster, fixed at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NodeRole {
    /// A single node with no network dependency
    #[default]
    Standalone,
    /// Connects out to the server and follows its merged frames
    NetClient,
    /// Accepts every client, merges their events and gates the swap
    NetServer,
}

impl NodeRole {
    /// Whether frames must pass through the network barrier
    pub fn is_networked(self) -> bool {
        !matches!(self, NodeRole::Standalone)
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeRole::Standalone => "Standalone",
            NodeRole::NetClient => "NetClient",
            NodeRole::NetServer => "NetServer",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown node role '{value}'. Expected one of: Standalone, NetClient, NetServer")]
pub struct ParseNodeRoleError {
    pub value: String,
}

impl FromStr for NodeRole {
    type Err = ParseNodeRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "standalone" => Ok(NodeRole::Standalone),
            "netclient" | "client" => Ok(NodeRole::NetClient),
            "netserver" | "server" => Ok(NodeRole::NetServer),
            _ => Err(ParseNodeRoleError {
                value: value.to_string(),
            }),
        }
    }
}
