//! Core identifier and enum types shared by every record kind

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

use crate::record::MajorRecord;
use crate::source::LinkCache;

/// Error parsing a plugin file name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModKeyError {
    #[error("Plugin file name is empty")]
    Empty,
    #[error("Plugin file name has no extension: {0}")]
    MissingExtension(String),
    #[error("Unknown plugin extension in {0}")]
    UnknownExtension(String),
}

/// Error parsing a `XXXXXX:Plugin.esp` form key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormKeyError {
    #[error("Form key is missing the ':' separator: {0}")]
    MissingSeparator(String),
    #[error("Invalid form id in {0}")]
    InvalidId(String),
    #[error(transparent)]
    ModKey(#[from] ModKeyError),
}

/// Plugin file type, determined by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModType {
    Master,
    Plugin,
    Light,
}

impl ModType {
    pub fn extension(&self) -> &'static str {
        match self {
            ModType::Master => "esm",
            ModType::Plugin => "esp",
            ModType::Light => "esl",
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "esm" => Some(ModType::Master),
            "esp" => Some(ModType::Plugin),
            "esl" => Some(ModType::Light),
            _ => None,
        }
    }
}

/// Unique key of a plugin in the load order (base name + type)
///
/// Names compare case-insensitively, as plugin file names do in the game's
/// data folder; the original spelling is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModKey {
    name: String,
    mod_type: ModType,
}

impl ModKey {
    pub fn new(name: impl Into<String>, mod_type: ModType) -> Self {
        ModKey {
            name: name.into(),
            mod_type,
        }
    }

    /// Parse a file name such as `Skyrim.esm`
    pub fn from_file_name(file_name: &str) -> Result<Self, ModKeyError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(ModKeyError::Empty);
        }
        let (name, ext) = file_name
            .rsplit_once('.')
            .ok_or_else(|| ModKeyError::MissingExtension(file_name.to_string()))?;
        if name.is_empty() {
            return Err(ModKeyError::Empty);
        }
        let mod_type = ModType::from_extension(ext)
            .ok_or_else(|| ModKeyError::UnknownExtension(file_name.to_string()))?;
        Ok(ModKey::new(name, mod_type))
    }

    /// Base name without extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name including extension
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.mod_type.extension())
    }
}

impl PartialEq for ModKey {
    fn eq(&self, other: &Self) -> bool {
        self.mod_type == other.mod_type && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for ModKey {}

impl Hash for ModKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.name.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        self.mod_type.hash(state);
    }
}

impl fmt::Display for ModKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.mod_type.extension())
    }
}

impl FromStr for ModKey {
    type Err = ModKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModKey::from_file_name(s)
    }
}

impl TryFrom<String> for ModKey {
    type Error = ModKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ModKey::from_file_name(&s)
    }
}

impl From<ModKey> for String {
    fn from(key: ModKey) -> Self {
        key.file_name()
    }
}

/// Stable identity of a record: local id plus the plugin that first defined it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormKey {
    pub id: u32,
    pub mod_key: ModKey,
}

impl FormKey {
    pub fn new(id: u32, mod_key: ModKey) -> Self {
        FormKey { id, mod_key }
    }

    /// The `VendorItemSpellTome` keyword from the base game master
    pub fn vendor_item_spell_tome() -> Self {
        FormKey::new(0x0937A5, ModKey::new("Skyrim", ModType::Master))
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}:{}", self.id, self.mod_key)
    }
}

impl FromStr for FormKey {
    type Err = FormKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, file_name) = s
            .split_once(':')
            .ok_or_else(|| FormKeyError::MissingSeparator(s.to_string()))?;
        let id = u32::from_str_radix(id.trim(), 16)
            .map_err(|_| FormKeyError::InvalidId(s.to_string()))?;
        Ok(FormKey::new(id, ModKey::from_file_name(file_name)?))
    }
}

impl TryFrom<String> for FormKey {
    type Error = FormKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FormKey> for String {
    fn from(key: FormKey) -> Self {
        key.to_string()
    }
}

/// Typed reference to another record
///
/// Serialized as the bare form key string. Resolution only succeeds when the
/// referenced record exists and is of kind `R`.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct FormLink<R> {
    key: FormKey,
    #[serde(skip)]
    kind: PhantomData<fn() -> R>,
}

impl<R> FormLink<R> {
    pub fn new(key: FormKey) -> Self {
        FormLink {
            key,
            kind: PhantomData,
        }
    }

    pub fn key(&self) -> &FormKey {
        &self.key
    }
}

impl<R: MajorRecord> FormLink<R> {
    /// Resolve through the link cache, `None` if missing or of another kind
    pub fn try_resolve<'a>(&self, cache: &'a dyn LinkCache) -> Option<&'a R> {
        cache.lookup(&self.key).and_then(R::from_record)
    }
}

impl<R> Clone for FormLink<R> {
    fn clone(&self) -> Self {
        FormLink::new(self.key.clone())
    }
}

impl<R> PartialEq for FormLink<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<R> Eq for FormLink<R> {}

impl<R> fmt::Debug for FormLink<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FormLink").field(&self.key).finish()
    }
}

impl<R> From<FormKey> for FormLink<R> {
    fn from(key: FormKey) -> Self {
        FormLink::new(key)
    }
}

/// How a magic effect is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastType {
    ConstantEffect,
    FireAndForget,
    Concentration,
    Scroll,
}

/// Governing skill of a magic effect (or taught by a skill book)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorValue {
    None,
    // Magic schools
    Alteration,
    Conjuration,
    Destruction,
    Illusion,
    Restoration,
    Enchanting,
    // Combat
    OneHanded,
    TwoHanded,
    Archery,
    Block,
    HeavyArmor,
    LightArmor,
    // Stealth
    Smithing,
    Sneak,
    Lockpicking,
    Pickpocket,
    Speech,
    Alchemy,
}

/// The five schools a spell tome can be labelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagicSchool {
    Alteration,
    Conjuration,
    Destruction,
    Illusion,
    Restoration,
}

impl MagicSchool {
    pub fn from_actor_value(av: ActorValue) -> Option<Self> {
        match av {
            ActorValue::Alteration => Some(MagicSchool::Alteration),
            ActorValue::Conjuration => Some(MagicSchool::Conjuration),
            ActorValue::Destruction => Some(MagicSchool::Destruction),
            ActorValue::Illusion => Some(MagicSchool::Illusion),
            ActorValue::Restoration => Some(MagicSchool::Restoration),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MagicSchool::Alteration => "Alteration",
            MagicSchool::Conjuration => "Conjuration",
            MagicSchool::Destruction => "Destruction",
            MagicSchool::Illusion => "Illusion",
            MagicSchool::Restoration => "Restoration",
        }
    }
}
