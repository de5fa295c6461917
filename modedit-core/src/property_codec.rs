//! Property <-> editable record conversion
//!
//! Editing widgets work on a flat record holding the union of every
//! property's fields. This module projects a [`Property`] onto that record
//! and rebuilds a property from an edited record.
//!
//! Rebuilding never fails on bad numeric text (see [`crate::coerce`]). A
//! record whose tag or texture sub-tag cannot be rebuilt is omitted; batch
//! conversion reports every omission alongside the rebuilt list.

use serde::{Deserialize, Serialize};

use crate::coerce::{coerce, RawNumber};
use crate::types::{
    tags, ColProperty, FProperty, Keyword, KeywordProperty, Property, RangeProperty,
    Tex2dSubProperty, TexOffsetProperty, TexProperty, TexRtSubProperty, TexScaleProperty,
    Texture, VecProperty,
};

/// Flat, form-shaped projection of a single property
///
/// Only the fields relevant to `type_name` are populated. Numeric fields
/// accept either a number or the raw text of an input box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableRecord {
    #[serde(rename = "TypeName", default)]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_name: Option<String>,

    // tex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tex2d_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tex2d_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discarded_str1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discarded_str2: Option<String>,

    // tex, tex_offset, tex_scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<RawNumber>,

    // col
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_r: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_g: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_b: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_a: Option<RawNumber>,

    // vec
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vec0: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vec1: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vec2: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vec3: Option<RawNumber>,

    // f, range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<RawNumber>,

    // keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<EditableKeyword>>,
}

impl EditableRecord {
    fn tagged(type_name: &str, prop_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            prop_name: Some(prop_name.to_string()),
            ..Default::default()
        }
    }
}

/// A keyword row as edited in a form
///
/// `value` is kept as raw JSON: only a literal `true` turns a keyword on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditableKeyword {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Why a record could not be rebuilt into a property
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OmitReason {
    #[error("texture sub-tag {0:?} cannot be reconstructed")]
    UnsupportedSubTag(Option<String>),

    #[error("property type '{0}' cannot be reconstructed")]
    UnsupportedType(String),
}

/// A record left out of a batch reconstruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmittedEntry {
    /// Position of the record in the input batch
    pub index: usize,
    pub type_name: String,
    pub sub_tag: Option<String>,
    pub prop_name: Option<String>,
    pub reason: OmitReason,
}

/// Result of rebuilding a property list from edited records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconstruction {
    /// Rebuilt properties, in input order
    pub properties: Vec<Property>,
    /// Records that were dropped
    pub omitted: Vec<OmittedEntry>,
}

impl Reconstruction {
    /// True when no record was dropped
    pub fn is_lossless(&self) -> bool {
        self.omitted.is_empty()
    }
}

/// Project a property onto its editable record
pub fn to_editable(property: &Property) -> EditableRecord {
    match property {
        Property::Tex(tex) => {
            let mut record = EditableRecord::tagged(tags::TEX, &tex.prop_name);
            record.sub_tag = Some(tex.texture.sub_tag().to_string());
            match &tex.texture {
                Texture::Tex2d { image } | Texture::Cube { image } => {
                    record.tex2d_name = Some(image.name.clone());
                    record.tex2d_path = Some(image.path.clone());
                    record.offset_x = Some(image.offset[0].into());
                    record.offset_y = Some(image.offset[1].into());
                    record.scale_x = Some(image.scale[0].into());
                    record.scale_y = Some(image.scale[1].into());
                }
                Texture::TexRt { render_texture } => {
                    record.discarded_str1 = Some(render_texture.discarded_str1.clone());
                    record.discarded_str2 = Some(render_texture.discarded_str2.clone());
                }
                Texture::Null => {}
            }
            record
        }
        Property::Col(col) => {
            let [r, g, b, a] = col.color;
            EditableRecord {
                color_r: Some(r.into()),
                color_g: Some(g.into()),
                color_b: Some(b.into()),
                color_a: Some(a.into()),
                ..EditableRecord::tagged(tags::COL, &col.prop_name)
            }
        }
        Property::Vec(vec) => {
            let [v0, v1, v2, v3] = vec.vector;
            EditableRecord {
                vec0: Some(v0.into()),
                vec1: Some(v1.into()),
                vec2: Some(v2.into()),
                vec3: Some(v3.into()),
                ..EditableRecord::tagged(tags::VEC, &vec.prop_name)
            }
        }
        Property::F(f) => EditableRecord {
            number: Some(f.number.into()),
            ..EditableRecord::tagged(tags::F, &f.prop_name)
        },
        Property::Range(range) => EditableRecord {
            number: Some(range.number.into()),
            ..EditableRecord::tagged(tags::RANGE, &range.prop_name)
        },
        Property::TexOffset(offset) => EditableRecord {
            offset_x: Some(offset.offset_x.into()),
            offset_y: Some(offset.offset_y.into()),
            ..EditableRecord::tagged(tags::TEX_OFFSET, &offset.prop_name)
        },
        Property::TexScale(scale) => EditableRecord {
            scale_x: Some(scale.scale_x.into()),
            scale_y: Some(scale.scale_y.into()),
            ..EditableRecord::tagged(tags::TEX_SCALE, &scale.prop_name)
        },
        Property::Keyword(keyword) => EditableRecord {
            keywords: Some(
                keyword
                    .keywords
                    .iter()
                    .map(|k| EditableKeyword {
                        key: Some(k.key.clone()),
                        value: Some(serde_json::Value::Bool(k.value)),
                    })
                    .collect(),
            ),
            ..EditableRecord::tagged(tags::KEYWORD, &keyword.prop_name)
        },
        Property::Unknown(_) => EditableRecord::tagged(tags::UNKNOWN, tags::UNKNOWN),
    }
}

/// Rebuild a property from an edited record, or `None` if it cannot be rebuilt
pub fn from_editable(record: &EditableRecord) -> Option<Property> {
    reconstruct(record).ok()
}

/// Project a property list, preserving order
pub fn to_editable_list(properties: &[Property]) -> Vec<EditableRecord> {
    properties.iter().map(to_editable).collect()
}

/// Rebuild a property list, preserving order and reporting dropped records
pub fn from_editable_list(records: &[EditableRecord]) -> Reconstruction {
    let mut out = Reconstruction {
        properties: Vec::with_capacity(records.len()),
        omitted: Vec::new(),
    };

    for (index, record) in records.iter().enumerate() {
        match reconstruct(record) {
            Ok(property) => out.properties.push(property),
            Err(reason) => {
                tracing::warn!(
                    index,
                    type_name = %record.type_name,
                    sub_tag = ?record.sub_tag,
                    "Dropping property: {}",
                    reason
                );
                out.omitted.push(OmittedEntry {
                    index,
                    type_name: record.type_name.clone(),
                    sub_tag: record.sub_tag.clone(),
                    prop_name: record.prop_name.clone(),
                    reason,
                });
            }
        }
    }

    out
}

fn reconstruct(record: &EditableRecord) -> Result<Property, OmitReason> {
    let prop_name = record.prop_name.clone().unwrap_or_default();

    let property = match record.type_name.as_str() {
        tags::TEX => Property::Tex(TexProperty {
            texture: texture_from_record(record)?,
            prop_name,
        }),
        tags::COL => Property::Col(ColProperty {
            prop_name,
            color: [
                num(&record.color_r, 0.0),
                num(&record.color_g, 0.0),
                num(&record.color_b, 0.0),
                num(&record.color_a, 0.0),
            ],
        }),
        tags::VEC => Property::Vec(VecProperty {
            prop_name,
            vector: [
                num(&record.vec0, 0.0),
                num(&record.vec1, 0.0),
                num(&record.vec2, 0.0),
                num(&record.vec3, 0.0),
            ],
        }),
        tags::F => Property::F(FProperty {
            prop_name,
            number: num(&record.number, 0.0),
        }),
        tags::RANGE => Property::Range(RangeProperty {
            prop_name,
            number: num(&record.number, 0.0),
        }),
        tags::TEX_OFFSET => Property::TexOffset(TexOffsetProperty {
            prop_name,
            offset_x: num(&record.offset_x, 0.0),
            offset_y: num(&record.offset_y, 0.0),
        }),
        tags::TEX_SCALE => Property::TexScale(TexScaleProperty {
            prop_name,
            scale_x: num(&record.scale_x, 0.0),
            scale_y: num(&record.scale_y, 0.0),
        }),
        tags::KEYWORD => Property::Keyword(KeywordProperty {
            prop_name,
            keywords: record
                .keywords
                .iter()
                .flatten()
                .map(|k| Keyword {
                    key: k.key.clone().unwrap_or_default(),
                    value: matches!(k.value, Some(serde_json::Value::Bool(true))),
                })
                .collect(),
        }),
        other => return Err(OmitReason::UnsupportedType(other.to_string())),
    };

    Ok(property)
}

fn texture_from_record(record: &EditableRecord) -> Result<Texture, OmitReason> {
    let image = || Tex2dSubProperty {
        name: record.tex2d_name.clone().unwrap_or_default(),
        path: record.tex2d_path.clone().unwrap_or_default(),
        offset: [num(&record.offset_x, 0.0), num(&record.offset_y, 0.0)],
        scale: [num(&record.scale_x, 1.0), num(&record.scale_y, 1.0)],
    };

    match record.sub_tag.as_deref() {
        Some(tags::TEX2D) => Ok(Texture::Tex2d { image: image() }),
        Some(tags::CUBE) => Ok(Texture::Cube { image: image() }),
        Some(tags::TEX_RT) => Ok(Texture::TexRt {
            render_texture: TexRtSubProperty {
                discarded_str1: record.discarded_str1.clone().unwrap_or_default(),
                discarded_str2: record.discarded_str2.clone().unwrap_or_default(),
            },
        }),
        Some(tags::NULL) => Ok(Texture::Null),
        other => Err(OmitReason::UnsupportedSubTag(other.map(str::to_string))),
    }
}

/// Coerce to the stored width; values outside the `f32` range fall back
fn num(raw: &Option<RawNumber>, fallback: f64) -> f32 {
    let n = coerce(raw.as_ref(), fallback) as f32;
    if n.is_finite() {
        n
    } else {
        fallback as f32
    }
}
