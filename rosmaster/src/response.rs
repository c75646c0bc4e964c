use crate::display::describe_type;
use derive_more::Display;
use xmlrpc::Value;

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Expected a [code, message, value] array, got {_0}")]
    NotATriple(String),
    #[error("Expected {expected} in the payload, got {found}")]
    Payload {
        expected: &'static str,
        found: String,
    },
}

/// Status of a master API call, the first element of every response
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub enum StatusCode {
    #[display(fmt = "success")]
    Success,
    #[display(fmt = "failure")]
    Failure,
    #[display(fmt = "error")]
    Error,
    #[display(fmt = "unknown ({})", _0)]
    Unknown(i64),
    /// The master sent something other than an integer
    #[display(fmt = "not an integer")]
    NotAnInteger,
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        match code {
            1 => StatusCode::Success,
            0 => StatusCode::Failure,
            -1 => StatusCode::Error,
            other => StatusCode::Unknown(other.into()),
        }
    }
}

impl From<&Value> for StatusCode {
    fn from(code: &Value) -> Self {
        match code {
            Value::Int(code) => StatusCode::from(*code),
            Value::Int64(wide) => match i32::try_from(*wide) {
                Ok(code) => StatusCode::from(code),
                Err(_) => StatusCode::Unknown(*wide),
            },
            _ => StatusCode::NotAnInteger,
        }
    }
}

/// The `(code, msg, val)` triple every master API method returns.
///
/// All three are kept exactly as received, nothing is checked beyond the
/// array shape. Elements past the third are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct MasterResponse {
    pub code: Value,
    pub msg: Value,
    pub val: Value,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TopicInfo {
    pub name: String,
    pub datatype: String,
}

impl MasterResponse {
    pub fn status(&self) -> StatusCode {
        StatusCode::from(&self.code)
    }

    /// Addresses of the clients authorized for a service
    pub fn service_clients(&self) -> Result<Vec<String>, ResponseError> {
        self.payload_items()?
            .iter()
            .map(|item| {
                item.as_str().map(str::to_owned).ok_or_else(|| ResponseError::Payload {
                    expected: "a string address",
                    found: describe_type(item),
                })
            })
            .collect()
    }

    /// `[[topic, type], ...]` pairs
    pub fn published_topics(&self) -> Result<Vec<TopicInfo>, ResponseError> {
        self.payload_items()?
            .iter()
            .map(|item| match item.as_array() {
                Some([Value::String(name), Value::String(datatype)]) => Ok(TopicInfo {
                    name: name.clone(),
                    datatype: datatype.clone(),
                }),
                _ => Err(ResponseError::Payload {
                    expected: "a [topic, type] pair",
                    found: describe_type(item),
                }),
            })
            .collect()
    }

    fn payload_items(&self) -> Result<&[Value], ResponseError> {
        self.val.as_array().ok_or_else(|| ResponseError::Payload {
            expected: "an array",
            found: describe_type(&self.val),
        })
    }
}

impl TryFrom<Value> for MasterResponse {
    type Error = ResponseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut items = match value {
            Value::Array(items) if items.len() >= 3 => items,
            other => return Err(ResponseError::NotATriple(describe_type(&other))),
        };
        items.truncate(3);
        let [code, msg, val] = <[Value; 3]>::try_from(items).map_err(|items: Vec<Value>| {
            ResponseError::NotATriple(describe_type(&Value::Array(items)))
        })?;
        Ok(MasterResponse { code, msg, val })
    }
}
