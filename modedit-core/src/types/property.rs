//! Material property types
//!
//! A material carries an ordered list of shader properties. Each property is
//! one variant of a closed set, discriminated by its `TypeName` tag on the
//! wire. Field names follow the JSON the asset loaders exchange (PascalCase).
//!
//! Numbers are stored as `f32`, the storage width of the asset format.

use serde::{Deserialize, Serialize};

/// Tag names as they appear in `TypeName`
pub mod tags {
    pub const TEX: &str = "tex";
    pub const COL: &str = "col";
    pub const VEC: &str = "vec";
    pub const F: &str = "f";
    pub const RANGE: &str = "range";
    pub const TEX_OFFSET: &str = "tex_offset";
    pub const TEX_SCALE: &str = "tex_scale";
    pub const KEYWORD: &str = "keyword";
    pub const UNKNOWN: &str = "unknown";

    /// Texture sub-tags as they appear in `SubTag`
    pub const TEX2D: &str = "tex2d";
    pub const CUBE: &str = "cube";
    pub const TEX_RT: &str = "texRT";
    pub const NULL: &str = "null";
}

/// A material property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "TypeName")]
pub enum Property {
    #[serde(rename = "tex")]
    Tex(TexProperty),

    #[serde(rename = "col")]
    Col(ColProperty),

    #[serde(rename = "vec")]
    Vec(VecProperty),

    #[serde(rename = "f")]
    F(FProperty),

    #[serde(rename = "range")]
    Range(RangeProperty),

    #[serde(rename = "tex_offset")]
    TexOffset(TexOffsetProperty),

    #[serde(rename = "tex_scale")]
    TexScale(TexScaleProperty),

    #[serde(rename = "keyword")]
    Keyword(KeywordProperty),

    /// Sentinel for a property kind this editor cannot represent
    #[serde(rename = "unknown")]
    Unknown(UnknownProperty),
}

impl Property {
    /// The `TypeName` tag of this variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Property::Tex(_) => tags::TEX,
            Property::Col(_) => tags::COL,
            Property::Vec(_) => tags::VEC,
            Property::F(_) => tags::F,
            Property::Range(_) => tags::RANGE,
            Property::TexOffset(_) => tags::TEX_OFFSET,
            Property::TexScale(_) => tags::TEX_SCALE,
            Property::Keyword(_) => tags::KEYWORD,
            Property::Unknown(_) => tags::UNKNOWN,
        }
    }

    /// Shader property name (e.g. `_MainTex`)
    pub fn prop_name(&self) -> &str {
        match self {
            Property::Tex(p) => &p.prop_name,
            Property::Col(p) => &p.prop_name,
            Property::Vec(p) => &p.prop_name,
            Property::F(p) => &p.prop_name,
            Property::Range(p) => &p.prop_name,
            Property::TexOffset(p) => &p.prop_name,
            Property::TexScale(p) => &p.prop_name,
            Property::Keyword(p) => &p.prop_name,
            Property::Unknown(p) => &p.prop_name,
        }
    }
}

/// Texture reference (`tex`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TexProperty {
    #[serde(rename = "PropName")]
    pub prop_name: String,

    #[serde(flatten)]
    pub texture: Texture,
}

/// Texture payload, discriminated by `SubTag`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "SubTag")]
pub enum Texture {
    #[serde(rename = "tex2d")]
    Tex2d {
        #[serde(rename = "Tex2D")]
        image: Tex2dSubProperty,
    },

    #[serde(rename = "cube")]
    Cube {
        #[serde(rename = "Tex2D")]
        image: Tex2dSubProperty,
    },

    /// Render texture; both strings are legacy data kept as-is
    #[serde(rename = "texRT")]
    TexRt {
        #[serde(rename = "TexRT")]
        render_texture: TexRtSubProperty,
    },

    #[serde(rename = "null")]
    Null,
}

impl Texture {
    /// The `SubTag` of this payload
    pub fn sub_tag(&self) -> &'static str {
        match self {
            Texture::Tex2d { .. } => tags::TEX2D,
            Texture::Cube { .. } => tags::CUBE,
            Texture::TexRt { .. } => tags::TEX_RT,
            Texture::Null => tags::NULL,
        }
    }
}

/// Image-backed texture (`tex2d` / `cube`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tex2dSubProperty {
    /// Texture asset name
    pub name: String,
    /// Texture asset path
    pub path: String,
    /// UV offset (x, y)
    pub offset: [f32; 2],
    /// UV scale (x, y)
    pub scale: [f32; 2],
}

impl Default for Tex2dSubProperty {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            offset: [0.0, 0.0],
            scale: [1.0, 1.0],
        }
    }
}

/// Render-texture payload (`texRT`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TexRtSubProperty {
    pub discarded_str1: String,
    pub discarded_str2: String,
}

/// Color (`col`): r/g/b conventionally 0-255, a 0.0-1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColProperty {
    pub prop_name: String,
    pub color: [f32; 4],
}

/// Four-component vector (`vec`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VecProperty {
    pub prop_name: String,
    pub vector: [f32; 4],
}

/// Scalar (`f`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FProperty {
    pub prop_name: String,
    pub number: f32,
}

/// Range slider value (`range`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RangeProperty {
    pub prop_name: String,
    pub number: f32,
}

/// Texture offset (`tex_offset`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TexOffsetProperty {
    pub prop_name: String,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Texture scale (`tex_scale`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TexScaleProperty {
    pub prop_name: String,
    pub scale_x: f32,
    pub scale_y: f32,
}

/// Shader keyword toggles (`keyword`)
///
/// The stored `Count` is always derived from the keyword list; a count read
/// from JSON is discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "KeywordPropertyRepr", into = "KeywordPropertyRepr")]
pub struct KeywordProperty {
    pub prop_name: String,
    pub keywords: Vec<Keyword>,
}

impl KeywordProperty {
    pub fn count(&self) -> usize {
        self.keywords.len()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct KeywordPropertyRepr {
    prop_name: String,
    #[serde(default)]
    count: usize,
    #[serde(default)]
    keywords: Vec<Keyword>,
}

impl From<KeywordPropertyRepr> for KeywordProperty {
    fn from(repr: KeywordPropertyRepr) -> Self {
        Self {
            prop_name: repr.prop_name,
            keywords: repr.keywords,
        }
    }
}

impl From<KeywordProperty> for KeywordPropertyRepr {
    fn from(prop: KeywordProperty) -> Self {
        Self {
            count: prop.count(),
            prop_name: prop.prop_name,
            keywords: prop.keywords,
        }
    }
}

/// A single keyword toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Keyword {
    pub key: String,
    pub value: bool,
}

/// Placeholder for an unsupported property kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnknownProperty {
    pub prop_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tex2d_json_shape() {
        let prop = Property::Tex(TexProperty {
            prop_name: "_MainTex".to_string(),
            texture: Texture::Tex2d {
                image: Tex2dSubProperty {
                    name: "body01".to_string(),
                    path: "Assets/body01.png".to_string(),
                    ..Default::default()
                },
            },
        });

        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json["TypeName"], "tex");
        assert_eq!(json["PropName"], "_MainTex");
        assert_eq!(json["SubTag"], "tex2d");
        assert_eq!(json["Tex2D"]["Name"], "body01");
        assert_eq!(json["Tex2D"]["Scale"][0], 1.0);

        let back: Property = serde_json::from_value(json).unwrap();
        assert_eq!(back, prop);
    }

    #[test]
    fn test_null_texture_parses() {
        let json = r#"{"TypeName":"tex","PropName":"_ToonRamp","SubTag":"null"}"#;
        let prop: Property = serde_json::from_str(json).unwrap();
        match prop {
            Property::Tex(tex) => {
                assert_eq!(tex.prop_name, "_ToonRamp");
                assert_eq!(tex.texture, Texture::Null);
            }
            other => panic!("expected tex, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_count_is_derived() {
        let json = r#"{
            "TypeName": "keyword",
            "PropName": "_Keywords",
            "Count": 7,
            "Keywords": [{"Key": "_ALPHATEST_ON", "Value": true}]
        }"#;
        let prop: Property = serde_json::from_str(json).unwrap();
        let Property::Keyword(kw) = &prop else {
            panic!("expected keyword property");
        };
        assert_eq!(kw.count(), 1);

        let out = serde_json::to_value(&prop).unwrap();
        assert_eq!(out["Count"], 1);
    }

    #[test]
    fn test_offset_and_scale_tags() {
        let offset = Property::TexOffset(TexOffsetProperty {
            prop_name: "_MainTex".to_string(),
            offset_x: 0.5,
            offset_y: 0.25,
        });
        let json = serde_json::to_value(&offset).unwrap();
        assert_eq!(json["TypeName"], "tex_offset");
        assert_eq!(json["OffsetX"], 0.5);

        let scale: Property = serde_json::from_str(
            r#"{"TypeName":"tex_scale","PropName":"_MainTex","ScaleX":2.0,"ScaleY":3.0}"#,
        )
        .unwrap();
        assert_eq!(scale.type_name(), tags::TEX_SCALE);
        assert_eq!(scale.prop_name(), "_MainTex");
    }

    #[test]
    fn test_unrecognized_tag_is_rejected() {
        let json = r#"{"TypeName":"matrix","PropName":"_M"}"#;
        assert!(serde_json::from_str::<Property>(json).is_err());
    }
}
