//! Documentation, type and deprecation facts about library functions, form
//! types, properties and commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One type name or a list of alternatives (`"str"` or `["str", "null"]`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum TypeNames {
    One(String),
    Many(Vec<String>),
}

impl Default for TypeNames {
    fn default() -> Self {
        TypeNames::Many(Vec::new())
    }
}

impl TypeNames {
    pub fn render(&self) -> String {
        match self {
            TypeNames::One(name) => name.clone(),
            TypeNames::Many(names) => names.join(" | "),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct ArgSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_names: TypeNames,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
pub struct ReturnSpec {
    #[serde(rename = "type", default)]
    pub type_names: TypeNames,
    #[serde(default)]
    pub desc: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub args: Vec<ArgSpec>,
    pub returns: ReturnSpec,
}

/// Structural type descriptor of a library member.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "RawTypeInfo", into = "RawTypeInfo")]
pub enum TypeInfo {
    /// A plain value of the named type(s).
    Names(Vec<String>),
    /// A callable with its argument list and return descriptor.
    Callable(Signature),
    /// Any other structured descriptor (`gtor`, `ctor`, ...).
    Structured { kind: String },
}

impl TypeInfo {
    pub fn is_callable(&self) -> bool {
        matches!(self, TypeInfo::Callable(_))
    }

    pub fn signature(&self) -> Option<&Signature> {
        match self {
            TypeInfo::Callable(sig) => Some(sig),
            _ => None,
        }
    }
}

/// Wire shape of [`TypeInfo`]: a string, a list of strings, or an object
/// tagged by its `type` key (`"function"` for callables).
#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
#[serde(untagged)]
pub enum RawTypeInfo {
    Name(String),
    Names(Vec<String>),
    Object {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<ArgSpec>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        returns: Option<ReturnSpec>,
    },
}

impl From<RawTypeInfo> for TypeInfo {
    fn from(raw: RawTypeInfo) -> Self {
        match raw {
            RawTypeInfo::Name(name) => TypeInfo::Names(vec![name]),
            RawTypeInfo::Names(names) => TypeInfo::Names(names),
            RawTypeInfo::Object {
                kind,
                args,
                returns,
            } => {
                if kind == "function" {
                    TypeInfo::Callable(Signature {
                        args,
                        returns: returns.unwrap_or_default(),
                    })
                } else {
                    TypeInfo::Structured { kind }
                }
            }
        }
    }
}

impl From<TypeInfo> for RawTypeInfo {
    fn from(info: TypeInfo) -> Self {
        match info {
            TypeInfo::Names(mut names) if names.len() == 1 => {
                RawTypeInfo::Name(names.remove(0))
            }
            TypeInfo::Names(names) => RawTypeInfo::Names(names),
            TypeInfo::Callable(sig) => RawTypeInfo::Object {
                kind: "function".to_string(),
                args: sig.args,
                returns: Some(sig.returns),
            },
            TypeInfo::Structured { kind } => RawTypeInfo::Object {
                kind,
                args: Vec::new(),
                returns: None,
            },
        }
    }
}

/// Property type: base type name plus its type options, e.g. `["str", {"lower": true}]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct PropType(
    pub String,
    #[serde(default)] pub serde_json::Map<String, serde_json::Value>,
);

impl PropType {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn opts(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.1
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    /// Sigiled key, e.g. `$lib.print`.
    pub key: String,
    pub doc: Option<String>,
    pub deprecated: bool,
    pub type_info: TypeInfo,
}

impl LibraryEntry {
    pub fn is_callable(&self) -> bool {
        self.type_info.is_callable()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.type_info.signature()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    /// Full property name, unique across all form types (`inet:fqdn:zone`).
    pub key: String,
    /// Name relative to its form (`zone`).
    pub name: String,
    pub doc: String,
    pub deprecated: bool,
    pub prop_type: Option<PropType>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FormTypeEntry {
    pub key: String,
    pub doc: String,
    pub deprecated: bool,
    /// Properties of the form, keyed by relative name, in model order.
    pub props: indexmap::IndexMap<String, PropertyEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommandEntry {
    pub key: String,
    pub doc: Option<String>,
    pub deprecated: bool,
    pub help: String,
}

/// Borrowed view over any index entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetadataEntry<'a> {
    Library(&'a LibraryEntry),
    FormType(&'a FormTypeEntry),
    Property(&'a PropertyEntry),
    Command(&'a CommandEntry),
}

impl<'a> MetadataEntry<'a> {
    /// Documentation text, `None` when absent or blank.
    pub fn doc(&self) -> Option<&'a str> {
        let doc = match self {
            MetadataEntry::Library(e) => e.doc.as_deref(),
            MetadataEntry::FormType(e) => Some(e.doc.as_str()),
            MetadataEntry::Property(e) => Some(e.doc.as_str()),
            MetadataEntry::Command(e) => e.doc.as_deref(),
        };
        doc.filter(|d| !d.trim().is_empty())
    }

    pub fn deprecated(&self) -> bool {
        match self {
            MetadataEntry::Library(e) => e.deprecated,
            MetadataEntry::FormType(e) => e.deprecated,
            MetadataEntry::Property(e) => e.deprecated,
            MetadataEntry::Command(e) => e.deprecated,
        }
    }
}
