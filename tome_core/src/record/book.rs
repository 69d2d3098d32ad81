//! Book - readable items, some of which teach a spell

use super::Spell;
use crate::types::{ActorValue, FormKey, FormLink};
use serde::{Deserialize, Serialize};

/// What reading a book grants
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BookTeaches {
    #[default]
    Nothing,
    Spell(FormLink<Spell>),
    Skill(ActorValue),
    Perk(FormKey),
}

/// Value carried by a script property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScriptPropertyValue {
    Object(FormKey),
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptProperty {
    pub name: String,
    pub value: ScriptPropertyValue,
}

/// A script attached to a record, with its filled properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<ScriptProperty>,
}

impl ScriptEntry {
    pub fn new(name: impl Into<String>) -> Self {
        ScriptEntry {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: ScriptPropertyValue) -> Self {
        self.properties.push(ScriptProperty {
            name: name.into(),
            value,
        });
        self
    }

    /// Find the object reference stored under `name`, ignoring properties of other kinds
    pub fn object_property(&self, name: &str) -> Option<&FormKey> {
        self.properties.iter().find_map(|p| match &p.value {
            ScriptPropertyValue::Object(key) if p.name == name => Some(key),
            _ => None,
        })
    }
}

/// Scripting attachment of a record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VirtualMachineAdapter {
    #[serde(default)]
    pub scripts: Vec<ScriptEntry>,
}

impl VirtualMachineAdapter {
    pub fn script(&self, name: &str) -> Option<&ScriptEntry> {
        self.scripts.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub form_key: FormKey,
    #[serde(default)]
    pub editor_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub keywords: Vec<FormKey>,
    #[serde(default)]
    pub teaches: BookTeaches,
    #[serde(default)]
    pub virtual_machine_adapter: Option<VirtualMachineAdapter>,
}

impl Book {
    pub fn new(form_key: FormKey, name: impl Into<String>) -> Self {
        Book {
            form_key,
            editor_id: None,
            name: Some(name.into()),
            keywords: Vec::new(),
            teaches: BookTeaches::Nothing,
            virtual_machine_adapter: None,
        }
    }

    pub fn with_keyword(mut self, keyword: FormKey) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn teaching(mut self, spell: FormKey) -> Self {
        self.teaches = BookTeaches::Spell(FormLink::new(spell));
        self
    }

    pub fn with_script(mut self, script: ScriptEntry) -> Self {
        self.virtual_machine_adapter
            .get_or_insert_with(VirtualMachineAdapter::default)
            .scripts
            .push(script);
        self
    }

    pub fn has_keyword(&self, keyword: &FormKey) -> bool {
        self.keywords.contains(keyword)
    }
}
