use crate::opts::{Command, PublishedTopics, ServiceClients};
use anyhow::Result;
use rosmaster::{
    format_result, DisplayValue, MasterCall, MasterResponse, Operation, StatusCode, Subgraph,
};
use tracing::{debug, warn};

pub fn handle(command: Command) -> Result<()> {
    debug!(command = %command.operation(), "Dispatching");

    let (common, call) = match command {
        Command::ServiceClients(ServiceClients { common, service }) => {
            (common, MasterCall::service_clients(service))
        }
        Command::PublishedTopics(PublishedTopics { common, subgraph }) => (
            common,
            MasterCall::published_topics(subgraph.map(Subgraph::from)),
        ),
    };

    let target = common.resolve_target()?;
    let response = target.client.call(&target.caller_id, &call)?;

    log_response(call.operation(), &response);
    println!("{}", format_result(call.operation(), &response));

    Ok(())
}

fn log_response(operation: Operation, response: &MasterResponse) {
    if response.status() != StatusCode::Success {
        warn!(
            method = %operation,
            code = %DisplayValue(&response.code),
            status = %response.status(),
            msg = %DisplayValue(&response.msg),
            "Master did not report success"
        );
        return;
    }

    match operation {
        Operation::ServiceClients => match response.service_clients() {
            Ok(clients) => debug!(count = clients.len(), ?clients, "Authorized service clients"),
            Err(error) => warn!(%error, "Unexpected getServiceClients payload"),
        },
        Operation::PublishedTopics => match response.published_topics() {
            Ok(topics) => debug!(count = topics.len(), "Published topics"),
            Err(error) => warn!(%error, "Unexpected getPublishedTopics payload"),
        },
    }
}
