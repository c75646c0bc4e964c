use crate::name_newtype;

name_newtype!(CallerId);
name_newtype!(ServiceName);
name_newtype!(Subgraph);

impl Default for CallerId {
    fn default() -> Self {
        CallerId(rosmaster_config::DEFAULT_CALLER_ID.to_owned())
    }
}

/// The empty subgraph matches every topic
impl Default for Subgraph {
    fn default() -> Self {
        Subgraph(String::new())
    }
}

#[macro_export]
macro_rules! name_newtype {
    ($t:ident) => {
        #[derive(
            Clone,
            Eq,
            PartialEq,
            Ord,
            PartialOrd,
            Hash,
            Debug,
            derive_more::Deref,
            derive_more::Display,
            derive_more::Into,
        )]
        pub struct $t(String);

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl $t {
            pub fn new<T: Into<String>>(s: T) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}
