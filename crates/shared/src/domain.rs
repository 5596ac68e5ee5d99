use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backends derive years and paper numbers from file names, so they show up
/// on the wire either as JSON strings or as bare integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Text(String),
    Int(i64),
}

impl LabelRepr {
    fn into_string(self) -> String {
        match self {
            LabelRepr::Text(text) => text.trim().to_string(),
            LabelRepr::Int(value) => value.to_string(),
        }
    }
}

macro_rules! label_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                LabelRepr::deserialize(deserializer).map(|repr| Self(repr.into_string()))
            }
        }
    };
}

label_newtype!(Year);
label_newtype!(PaperNumber);
