//! The runtime model collaborator: a structured description of the library
//! functions, form types, properties and commands of the target system.

use crate::models::{PropType, RawTypeInfo, TypeInfo};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct DeprecationDef {
    #[serde(default, rename = "eolvers")]
    pub eol_version: Option<String>,
    #[serde(default, rename = "eoldate")]
    pub eol_date: Option<String>,
    #[serde(default)]
    pub mesg: Option<String>,
}

impl DeprecationDef {
    pub fn has_end_of_life(&self) -> bool {
        self.eol_version.is_some() || self.eol_date.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct LibraryLocalDef {
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(rename = "type")]
    #[schemars(with = "RawTypeInfo")]
    pub type_info: TypeInfo,
    #[serde(default)]
    pub deprecated: Option<DeprecationDef>,
}

/// A library namespace, e.g. path `["inet", "http"]` for `$lib.inet.http`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct LibraryDef {
    #[serde(default)]
    pub path: Vec<String>,
    /// Whether the whole library carries a deprecation notice.
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub locals: Vec<LibraryLocalDef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct PropDef {
    pub name: String,
    pub full: String,
    #[serde(default, rename = "type")]
    pub prop_type: Option<PropType>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct FormDef {
    pub name: String,
    #[serde(default)]
    pub props: Vec<PropDef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct CommandDef {
    pub name: String,
    #[serde(default)]
    pub brief: Option<String>,
    #[serde(default)]
    pub help: String,
}

/// Queried once per index build. A section the model cannot supply is `None`.
pub trait RuntimeModel {
    fn libraries(&self) -> Option<&[LibraryDef]>;
    fn types(&self) -> Option<&[TypeDef]>;
    fn forms(&self) -> Option<&[FormDef]>;
    fn commands(&self) -> Option<&[CommandDef]>;
}

/// A runtime model captured as a JSON document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
pub struct ModelDump {
    /// Version of the system the dump was taken from.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub libraries: Option<Vec<LibraryDef>>,
    #[serde(default)]
    pub types: Option<Vec<TypeDef>>,
    #[serde(default)]
    pub forms: Option<Vec<FormDef>>,
    #[serde(default)]
    pub commands: Option<Vec<CommandDef>>,
}

impl RuntimeModel for ModelDump {
    fn libraries(&self) -> Option<&[LibraryDef]> {
        self.libraries.as_deref()
    }

    fn types(&self) -> Option<&[TypeDef]> {
        self.types.as_deref()
    }

    fn forms(&self) -> Option<&[FormDef]> {
        self.forms.as_deref()
    }

    fn commands(&self) -> Option<&[CommandDef]> {
        self.commands.as_deref()
    }
}
