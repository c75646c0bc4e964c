use crate::{
    response::ResponseError, CallerId, DisplayValue, MasterCall, MasterResponse, MasterUri,
    ServiceName, Subgraph,
};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, trace};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("{method} failed talking to the master at {uri}")]
    Transport {
        method: &'static str,
        uri: String,
        #[source]
        error: xmlrpc::Error,
    },

    #[error("{method} faulted on the master with code {code}: {message}")]
    Fault {
        method: &'static str,
        code: i32,
        message: String,
    },

    #[error("{method} returned a malformed response")]
    MalformedResponse {
        method: &'static str,
        #[source]
        error: ResponseError,
    },
}

/// Blocking XML-RPC client bound to a single master.
///
/// Each call is one HTTP round trip. Nothing is retried.
#[derive(Clone, Debug)]
pub struct MasterClient {
    uri: MasterUri,
    http: Client,
}

impl MasterClient {
    /// `timeout` of `None` waits on the master indefinitely
    pub fn new(uri: MasterUri, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ClientError::HttpClient)?;
        Ok(MasterClient { uri, http })
    }

    pub fn uri(&self) -> &MasterUri {
        &self.uri
    }

    pub fn call(
        &self,
        caller_id: &CallerId,
        call: &MasterCall,
    ) -> Result<MasterResponse, ClientError> {
        let method = call.operation().method_name();
        debug!(
            method,
            master = %self.uri,
            caller_id = %caller_id,
            argument = call.argument(),
            "Calling master"
        );

        let request = call.to_request(caller_id);
        let value = request
            .call(self.http.post(self.uri.as_str()))
            .map_err(|error| match error.fault() {
                Some(fault) => ClientError::Fault {
                    method,
                    code: fault.fault_code,
                    message: fault.fault_string.clone(),
                },
                None => ClientError::Transport {
                    method,
                    uri: self.uri.to_string(),
                    error,
                },
            })?;
        trace!(method, payload = ?value, "Raw master response");

        let response = MasterResponse::try_from(value)
            .map_err(|error| ClientError::MalformedResponse { method, error })?;
        debug!(
            method,
            code = %DisplayValue(&response.code),
            status = %response.status(),
            msg = %DisplayValue(&response.msg),
            "Master responded"
        );
        Ok(response)
    }

    pub fn get_service_clients(
        &self,
        caller_id: &CallerId,
        service: ServiceName,
    ) -> Result<MasterResponse, ClientError> {
        self.call(caller_id, &MasterCall::ServiceClients { service })
    }

    pub fn get_published_topics(
        &self,
        caller_id: &CallerId,
        subgraph: Subgraph,
    ) -> Result<MasterResponse, ClientError> {
        self.call(caller_id, &MasterCall::PublishedTopics { subgraph })
    }
}
