pub mod call;
pub mod client;
pub mod display;
pub mod operation;
pub mod response;
pub mod types;

pub use call::MasterCall;
pub use client::{ClientError, MasterClient};
pub use display::{describe_type, format_result, DisplayValue};
pub use operation::{Operation, UnrecognizedOperation};
pub use response::{MasterResponse, ResponseError, StatusCode, TopicInfo};
pub use rosmaster_config::MasterUri;
pub use types::{CallerId, ServiceName, Subgraph};

/// XML-RPC value type carried in master responses
pub use xmlrpc::Value;
