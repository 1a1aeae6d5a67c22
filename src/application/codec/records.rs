//! Serialized record shapes.
//!
//! Records mirror the file format one-to-one and carry no invariants; the
//! decoder hands their contents to a factory, which does all validation.

use serde::{Deserialize, Serialize};

use crate::domain::{
    CodeLessonView, Color, Direction, GridView, LessonKind, LessonVariant, LessonView, Method,
    ParameterView, Primitive, TileView, UnitView, VisualLessonView,
};

/// Unit record, generic over the lesson representation.
///
/// Encoding uses [`LessonRecord`]; decoding reads each lesson as a raw JSON
/// object first so the variant can be chosen structurally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRecord<L> {
    pub name: String,
    pub lessons: Vec<L>,
}

/// Lesson record. Serialized without a tag: only the variant's own fields
/// are written.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LessonRecord {
    Code(CodeLessonRecord),
    Visual(VisualLessonRecord),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLessonRecord {
    pub name: String,
    pub starting_code: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub method_name: String,
    pub parameters: Vec<ParameterRecord>,
    pub return_type: Primitive,
    pub test: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualLessonRecord {
    pub name: String,
    pub starting_code: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub allowed_methods: Vec<Method>,
    pub required_strings: Vec<String>,
    pub starting_grids: Vec<GridRecord>,
    pub ending_grids: Vec<GridRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRecord {
    #[serde(rename = "type")]
    pub param_type: Primitive,
    pub name: String,
}

/// Grid record. Coordinates are signed so that a negative value reaches the
/// factory checks instead of failing as a type mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRecord {
    pub tiles: Vec<Vec<TileRecord>>,
    pub size: i64,
    pub player_x: i64,
    pub player_y: i64,
    pub player_direction: Direction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    /// Absent when the tile has no color of its own.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "argb")]
    pub color: Option<Color>,
    pub barrier_top: bool,
    pub barrier_right: bool,
    pub barrier_bottom: bool,
    pub barrier_left: bool,
    pub balls: i32,
}

impl UnitRecord<LessonRecord> {
    pub fn from_view<U: UnitView>(unit: &U) -> Self {
        Self {
            name: unit.name().to_string(),
            lessons: unit.lessons().iter().map(LessonRecord::from_view).collect(),
        }
    }
}

impl LessonRecord {
    pub fn from_view<L: LessonKind>(lesson: &L) -> Self {
        match lesson.variant() {
            LessonVariant::Code(l) => LessonRecord::Code(CodeLessonRecord {
                name: l.name().to_string(),
                starting_code: l.starting_code().to_string(),
                description: l.description().to_string(),
                hint: l.hint().map(str::to_string),
                method_name: l.method_name().to_string(),
                parameters: l
                    .parameters()
                    .iter()
                    .map(|p| ParameterRecord {
                        param_type: p.param_type(),
                        name: p.name().to_string(),
                    })
                    .collect(),
                return_type: l.return_type(),
                test: l.test().to_string(),
            }),
            LessonVariant::Visual(l) => LessonRecord::Visual(VisualLessonRecord {
                name: l.name().to_string(),
                starting_code: l.starting_code().to_string(),
                description: l.description().to_string(),
                hint: l.hint().map(str::to_string),
                allowed_methods: l.allowed_methods().to_vec(),
                required_strings: l.required_strings().to_vec(),
                starting_grids: l.starting_grids().iter().map(GridRecord::from_view).collect(),
                ending_grids: l.ending_grids().iter().map(GridRecord::from_view).collect(),
            }),
        }
    }
}

impl GridRecord {
    pub fn from_view<G: GridView>(grid: &G) -> Self {
        Self {
            tiles: grid
                .tiles()
                .iter()
                .map(|row| row.iter().map(TileRecord::from_view).collect())
                .collect(),
            size: grid.size() as i64,
            player_x: grid.player_x() as i64,
            player_y: grid.player_y() as i64,
            player_direction: grid.player_direction(),
        }
    }
}

impl TileRecord {
    pub fn from_view<T: TileView>(tile: &T) -> Self {
        Self {
            color: tile.color(),
            barrier_top: tile.barrier_top(),
            barrier_right: tile.barrier_right(),
            barrier_bottom: tile.barrier_bottom(),
            barrier_left: tile.barrier_left(),
            balls: tile.balls() as i32,
        }
    }
}

/// Colors as a single 32-bit ARGB integer: written signed, read signed or unsigned.
mod argb {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::Serializer;

    use crate::domain::Color;

    pub fn serialize<S: Serializer>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error> {
        match color {
            Some(c) => serializer.serialize_i32(c.to_i32()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Color>, D::Error> {
        let Some(value) = Option::<i64>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(signed) = i32::try_from(value) {
            return Ok(Some(Color::from_i32(signed)));
        }
        u32::try_from(value)
            .map(|unsigned| Some(Color::from_argb(unsigned)))
            .map_err(|_| de::Error::custom(format!("color {value} is not a 32-bit ARGB value")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unset_color_when_serializing_tile_then_field_omitted() {
        let tile = TileRecord {
            color: None,
            barrier_top: true,
            barrier_right: false,
            barrier_bottom: false,
            barrier_left: false,
            balls: 1,
        };
        let json = serde_json::to_string(&tile).unwrap();
        assert!(!json.contains("color"), "{json}");
        assert!(json.contains("\"barrierTop\":true"), "{json}");
    }

    #[test]
    fn given_opaque_color_when_serializing_then_signed_int() {
        let tile = TileRecord {
            color: Some(Color::WHITE),
            barrier_top: false,
            barrier_right: false,
            barrier_bottom: false,
            barrier_left: false,
            balls: 0,
        };
        let json = serde_json::to_string(&tile).unwrap();
        assert!(json.starts_with("{\"color\":-1,"), "{json}");
    }

    #[test]
    fn given_unsigned_or_out_of_range_color_when_deserializing_then_checked() {
        let read = |color: &str| {
            serde_json::from_str::<TileRecord>(&format!(
                r#"{{"color":{color},"barrierTop":false,"barrierRight":false,"barrierBottom":false,"barrierLeft":false,"balls":0}}"#
            ))
        };
        assert_eq!(read("4294967295").unwrap().color, Some(Color::WHITE));
        assert_eq!(read("-16777216").unwrap().color, Some(Color::BLACK));
        assert_eq!(read("null").unwrap().color, None);
        assert!(read("4294967296").is_err());
    }

    #[test]
    fn given_parameter_when_serializing_then_type_key_and_variant_name() {
        let p = ParameterRecord {
            param_type: Primitive::IntArray,
            name: "xs".into(),
        };
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"type":"INT_ARRAY","name":"xs"}"#
        );
    }
}
