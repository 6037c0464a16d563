//! Metadata Index
//!
//! An immutable snapshot of everything the runtime model knows about library
//! functions, form types, properties and commands. A snapshot is built once
//! per session (or loaded from the cache) and never mutated afterwards; a
//! rebuild produces a fresh snapshot that replaces the old one wholesale.

pub mod handle;
pub mod source;

pub use handle::IndexHandle;
pub use source::IndexSource;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stormscope_api::models::{
    CommandEntry, FormTypeEntry, LibraryEntry, PropertyEntry,
};
use stormscope_api::runtime::{CommandDef, FormDef, LibraryDef, RuntimeModel, TypeDef};

/// Bumped whenever the serialized layout of [`IndexSnapshot`] changes.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Root of every library key.
pub const LIBRARY_ROOT: &str = "$lib";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IndexSnapshot {
    pub format_version: u32,
    /// Version of the system the snapshot was built from.
    pub version: String,
    pub libraries: IndexMap<String, LibraryEntry>,
    pub form_types: IndexMap<String, FormTypeEntry>,
    pub properties: IndexMap<String, PropertyEntry>,
    pub commands: IndexMap<String, CommandEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    pub libraries: usize,
    pub form_types: usize,
    pub properties: usize,
    pub commands: usize,
}

impl IndexSnapshot {
    pub fn empty(version: impl Into<String>) -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            version: version.into(),
            libraries: IndexMap::new(),
            form_types: IndexMap::new(),
            properties: IndexMap::new(),
            commands: IndexMap::new(),
        }
    }

    /// Builds a snapshot from the runtime model. Sections the model cannot
    /// supply are left empty.
    pub fn build(model: &dyn RuntimeModel, version: impl Into<String>) -> Self {
        let mut snapshot = Self::empty(version);

        match model.libraries() {
            Some(libs) => snapshot.add_libraries(libs),
            None => tracing::warn!("Runtime model has no library section; index left without libraries"),
        }

        match model.types() {
            Some(types) => snapshot.add_types(types),
            None => tracing::warn!("Runtime model has no type section; index left without form types"),
        }

        match model.forms() {
            Some(forms) => snapshot.add_forms(forms),
            None => tracing::warn!("Runtime model has no form section; index left without properties"),
        }

        match model.commands() {
            Some(cmds) => snapshot.add_commands(cmds),
            None => tracing::warn!("Runtime model has no command section; index left without commands"),
        }

        let stats = snapshot.stats();
        tracing::info!(
            "Built metadata index {}: {} libraries, {} form types, {} properties, {} commands",
            snapshot.version,
            stats.libraries,
            stats.form_types,
            stats.properties,
            stats.commands
        );

        snapshot
    }

    fn add_libraries(&mut self, libs: &[LibraryDef]) {
        for lib in libs {
            for local in &lib.locals {
                let key = library_key(&lib.path, &local.name);
                let local_eol = local
                    .deprecated
                    .as_ref()
                    .is_some_and(|d| d.has_end_of_life());

                self.libraries.insert(
                    key.clone(),
                    LibraryEntry {
                        key,
                        doc: local.desc.clone(),
                        deprecated: lib.deprecated || local_eol,
                        type_info: local.type_info.clone(),
                    },
                );
            }
        }
    }

    fn add_types(&mut self, types: &[TypeDef]) {
        for ty in types {
            self.form_types.insert(
                ty.name.clone(),
                FormTypeEntry {
                    key: ty.name.clone(),
                    doc: ty.doc.clone().unwrap_or_default(),
                    deprecated: ty.deprecated,
                    props: IndexMap::new(),
                },
            );
        }
    }

    fn add_forms(&mut self, forms: &[FormDef]) {
        for form in forms {
            let entry = self
                .form_types
                .entry(form.name.clone())
                .or_insert_with(|| FormTypeEntry {
                    key: form.name.clone(),
                    doc: String::new(),
                    deprecated: false,
                    props: IndexMap::new(),
                });

            for prop in &form.props {
                let prop_entry = PropertyEntry {
                    key: prop.full.clone(),
                    name: prop.name.clone(),
                    doc: prop.doc.clone().unwrap_or_default(),
                    deprecated: prop.deprecated,
                    prop_type: prop.prop_type.clone(),
                };
                entry.props.insert(prop.name.clone(), prop_entry.clone());
                self.properties.insert(prop.full.clone(), prop_entry);
            }
        }
    }

    fn add_commands(&mut self, cmds: &[CommandDef]) {
        for cmd in cmds {
            self.commands.insert(
                cmd.name.clone(),
                CommandEntry {
                    key: cmd.name.clone(),
                    doc: cmd.brief.clone(),
                    deprecated: false,
                    help: cmd.help.clone(),
                },
            );
        }
    }

    pub fn library(&self, key: &str) -> Option<&LibraryEntry> {
        self.libraries.get(key)
    }

    pub fn form_type(&self, key: &str) -> Option<&FormTypeEntry> {
        self.form_types.get(key)
    }

    pub fn property(&self, key: &str) -> Option<&PropertyEntry> {
        self.properties.get(key)
    }

    pub fn command(&self, key: &str) -> Option<&CommandEntry> {
        self.commands.get(key)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            libraries: self.libraries.len(),
            form_types: self.form_types.len(),
            properties: self.properties.len(),
            commands: self.commands.len(),
        }
    }
}

/// `$lib.<path...>.<name>`
pub fn library_key(path: &[String], name: &str) -> String {
    let mut key = String::from(LIBRARY_ROOT);
    for part in path {
        key.push('.');
        key.push_str(part);
    }
    key.push('.');
    key.push_str(name);
    key
}
