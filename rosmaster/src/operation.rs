use derive_more::Display;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("Unrecognized command: {_0}")]
pub struct UnrecognizedOperation(pub String);

/// The master API methods this client knows how to call
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub enum Operation {
    #[display(fmt = "{}", "self.method_name()")]
    ServiceClients,
    #[display(fmt = "{}", "self.method_name()")]
    PublishedTopics,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::ServiceClients, Operation::PublishedTopics];

    /// Remote XML-RPC method name, also used as the command name
    pub fn method_name(self) -> &'static str {
        use Operation::*;
        match self {
            ServiceClients => "getServiceClients",
            PublishedTopics => "getPublishedTopics",
        }
    }

    pub fn description(self) -> &'static str {
        use Operation::*;
        match self {
            ServiceClients => "Get list of authorized subscriber clients",
            PublishedTopics => "Get list of published topics",
        }
    }
}

impl FromStr for Operation {
    type Err = UnrecognizedOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.method_name() == s)
            .ok_or_else(|| UnrecognizedOperation(s.to_owned()))
    }
}
