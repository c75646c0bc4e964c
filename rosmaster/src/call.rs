use crate::{CallerId, Operation, ServiceName, Subgraph};
use xmlrpc::Request;

/// One master API call with its method-specific argument.
///
/// Every call is sent as `method(caller_id, argument)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MasterCall {
    ServiceClients { service: ServiceName },
    PublishedTopics { subgraph: Subgraph },
}

impl MasterCall {
    pub fn service_clients<S: Into<ServiceName>>(service: S) -> Self {
        MasterCall::ServiceClients {
            service: service.into(),
        }
    }

    /// `None` asks for topics across the whole graph
    pub fn published_topics(subgraph: Option<Subgraph>) -> Self {
        MasterCall::PublishedTopics {
            subgraph: subgraph.unwrap_or_default(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            MasterCall::ServiceClients { .. } => Operation::ServiceClients,
            MasterCall::PublishedTopics { .. } => Operation::PublishedTopics,
        }
    }

    pub fn argument(&self) -> &str {
        match self {
            MasterCall::ServiceClients { service } => service.as_str(),
            MasterCall::PublishedTopics { subgraph } => subgraph.as_str(),
        }
    }

    pub fn to_request(&self, caller_id: &CallerId) -> Request<'static> {
        Request::new(self.operation().method_name())
            .arg(caller_id.as_str().to_owned())
            .arg(self.argument().to_owned())
    }
}

#[cfg(test)]
pub(crate) fn request_xml(call: &MasterCall, caller_id: &CallerId) -> String {
    let mut body = Vec::new();
    call.to_request(caller_id)
        .write_as_xml(&mut body)
        .expect("write request");
    String::from_utf8(body).expect("utf8 request")
}
