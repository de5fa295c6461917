//! Asset document shapes
//!
//! Full `.menu` and `.mate` documents as exchanged with a load/save
//! collaborator. Only the command list and the property list are transcoded;
//! header fields pass through untouched.

use serde::{Deserialize, Serialize};

use super::{Command, Property};

pub const MENU_SIGNATURE: &str = "CM3D2_MENU";
pub const MATE_SIGNATURE: &str = "CM3D2_MATERIAL";
pub const DEFAULT_VERSION: i32 = 1000;

/// A `.menu` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MenuDocument {
    #[serde(default = "default_menu_signature")]
    pub signature: String,

    /// Size of the body section as recorded by the source file
    #[serde(default)]
    pub body_size: i32,

    #[serde(default = "default_version")]
    pub version: i32,

    /// Original source file name of the item
    #[serde(default)]
    pub src_file_name: String,

    /// Display name shown in the in-game list
    #[serde(default)]
    pub item_name: String,

    /// Item category (e.g. `wear`, `hairf`)
    #[serde(default)]
    pub category: String,

    /// Description text
    #[serde(default)]
    pub info_text: String,

    #[serde(default)]
    pub commands: Vec<Command>,
}

fn default_menu_signature() -> String {
    MENU_SIGNATURE.to_string()
}

fn default_mate_signature() -> String {
    MATE_SIGNATURE.to_string()
}

fn default_version() -> i32 {
    DEFAULT_VERSION
}

impl Default for MenuDocument {
    fn default() -> Self {
        Self {
            signature: default_menu_signature(),
            body_size: 0,
            version: DEFAULT_VERSION,
            src_file_name: String::new(),
            item_name: String::new(),
            category: String::new(),
            info_text: String::new(),
            commands: Vec::new(),
        }
    }
}

/// A `.mate` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MateDocument {
    #[serde(default = "default_mate_signature")]
    pub signature: String,

    #[serde(default = "default_version")]
    pub version: i32,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub material: Material,
}

impl Default for MateDocument {
    fn default() -> Self {
        Self {
            signature: default_mate_signature(),
            version: DEFAULT_VERSION,
            name: String::new(),
            material: Material::default(),
        }
    }
}

/// Material section of a `.mate` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Material {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub shader_name: String,

    #[serde(default)]
    pub shader_filename: String,

    #[serde(default)]
    pub properties: Vec<Property>,
}
