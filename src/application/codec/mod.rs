//! JSON codec for unit sequences.
//!
//! Encoding walks the read-only views, so either facet can be written.
//! Decoding parses text into records and rebuilds every entity through an
//! [`EntityFactory`]; a record the factory rejects fails the whole load.
//! Lesson variants carry no tag and are told apart by their exclusive
//! required field: `methodName` for code lessons, `allowedMethods` for
//! visual lessons.

pub mod records;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    CodeLessonArgs, DomainError, DomainResult, EntityFactory, Factory, Unit, UnitView,
    VisualLessonArgs,
};

pub use records::{
    CodeLessonRecord, GridRecord, LessonRecord, ParameterRecord, TileRecord, UnitRecord,
    VisualLessonRecord,
};

const CODE_LESSON_KEY: &str = "methodName";
const VISUAL_LESSON_KEY: &str = "allowedMethods";

/// Output layout for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub pretty: bool,
    pub indent: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 2,
        }
    }
}

/// Encode `units` as a JSON array of unit records.
pub fn encode<U: UnitView>(units: &[U], options: &EncodeOptions) -> ApplicationResult<String> {
    let records: Vec<_> = units.iter().map(UnitRecord::from_view).collect();
    debug!("encode: {} units", records.len());

    let mut out = Vec::new();
    let written = if options.pretty {
        let indent = " ".repeat(options.indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        records.serialize(&mut serializer)
    } else {
        serde_json::to_writer(&mut out, &records)
    };
    written.map_err(|e| ApplicationError::Parse {
        context: "encode units".into(),
        source: e,
    })?;
    String::from_utf8(out).map_err(|e| ApplicationError::OperationFailed {
        context: "encode units".into(),
        source: Box::new(e),
    })
}

/// Decode frozen units.
pub fn decode(text: &str) -> ApplicationResult<Vec<Unit>> {
    decode_with(&Factory, text)
}

/// Decode units, building every entity through `factory`.
pub fn decode_with<F: EntityFactory>(factory: &F, text: &str) -> ApplicationResult<Vec<F::Unit>> {
    let records: Vec<UnitRecord<Map<String, Value>>> =
        serde_json::from_str(text).map_err(|e| ApplicationError::Parse {
            context: "units".into(),
            source: e,
        })?;
    debug!("decode: {} unit records", records.len());

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| decode_unit(factory, record, &format!("units[{i}]")))
        .collect()
}

fn decode_unit<F: EntityFactory>(
    factory: &F,
    record: UnitRecord<Map<String, Value>>,
    location: &str,
) -> ApplicationResult<F::Unit> {
    trace!(%location, name = %record.name, lessons = record.lessons.len(), "unit");
    let lessons = record
        .lessons
        .into_iter()
        .enumerate()
        .map(|(i, fields)| decode_lesson(factory, fields, &format!("{location}.lessons[{i}]")))
        .collect::<ApplicationResult<Vec<_>>>()?;
    factory
        .unit(record.name, lessons)
        .map_err(|e| invalid(location, e))
}

/// Pick the variant from the exclusive field, then read the full record.
fn decode_lesson<F: EntityFactory>(
    factory: &F,
    fields: Map<String, Value>,
    location: &str,
) -> ApplicationResult<F::Lesson> {
    let is_code = fields.contains_key(CODE_LESSON_KEY);
    let is_visual = fields.contains_key(VISUAL_LESSON_KEY);
    match (is_code, is_visual) {
        (true, false) => {
            let record: CodeLessonRecord = from_fields(fields, location)?;
            trace!(%location, name = %record.name, "code lesson");
            decode_code_lesson(factory, record, location)
        }
        (false, true) => {
            let record: VisualLessonRecord = from_fields(fields, location)?;
            trace!(%location, name = %record.name, "visual lesson");
            decode_visual_lesson(factory, record, location)
        }
        (true, true) => Err(ApplicationError::Malformed {
            message: format!(
                "{location}: lesson has both `{CODE_LESSON_KEY}` and `{VISUAL_LESSON_KEY}`"
            ),
        }),
        (false, false) => Err(ApplicationError::Malformed {
            message: format!(
                "{location}: lesson has neither `{CODE_LESSON_KEY}` nor `{VISUAL_LESSON_KEY}`"
            ),
        }),
    }
}

fn decode_code_lesson<F: EntityFactory>(
    factory: &F,
    record: CodeLessonRecord,
    location: &str,
) -> ApplicationResult<F::Lesson> {
    let parameters = record
        .parameters
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            factory
                .parameter(p.param_type, p.name)
                .map_err(|e| invalid(&format!("{location}.parameters[{i}]"), e))
        })
        .collect::<ApplicationResult<Vec<_>>>()?;
    factory
        .code_lesson(CodeLessonArgs {
            name: record.name,
            starting_code: record.starting_code,
            description: record.description,
            hint: record.hint,
            method_name: record.method_name,
            parameters,
            return_type: record.return_type,
            test: record.test,
        })
        .map_err(|e| invalid(location, e))
}

fn decode_visual_lesson<F: EntityFactory>(
    factory: &F,
    record: VisualLessonRecord,
    location: &str,
) -> ApplicationResult<F::Lesson> {
    let starting_grids = decode_grids(factory, record.starting_grids, location, "startingGrids")?;
    let ending_grids = decode_grids(factory, record.ending_grids, location, "endingGrids")?;
    factory
        .visual_lesson(VisualLessonArgs {
            name: record.name,
            starting_code: record.starting_code,
            description: record.description,
            hint: record.hint,
            allowed_methods: record.allowed_methods,
            required_strings: record.required_strings,
            starting_grids,
            ending_grids,
        })
        .map_err(|e| invalid(location, e))
}

fn decode_grids<F: EntityFactory>(
    factory: &F,
    records: Vec<GridRecord>,
    location: &str,
    field: &str,
) -> ApplicationResult<Vec<F::Grid>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, g)| decode_grid(factory, g, &format!("{location}.{field}[{i}]")))
        .collect()
}

fn decode_grid<F: EntityFactory>(
    factory: &F,
    record: GridRecord,
    location: &str,
) -> ApplicationResult<F::Grid> {
    let tiles = record
        .tiles
        .into_iter()
        .enumerate()
        .map(|(r, row)| {
            row.into_iter()
                .enumerate()
                .map(|(c, t)| {
                    factory
                        .tile(
                            t.color,
                            t.barrier_top,
                            t.barrier_right,
                            t.barrier_bottom,
                            t.barrier_left,
                            t.balls,
                        )
                        .map_err(|e| invalid(&format!("{location}.tiles[{r}][{c}]"), e))
                })
                .collect::<ApplicationResult<Vec<_>>>()
        })
        .collect::<ApplicationResult<Vec<_>>>()?;

    let dimensions = (|| -> DomainResult<_> {
        Ok((
            to_index("size", record.size)?,
            to_index("playerX", record.player_x)?,
            to_index("playerY", record.player_y)?,
        ))
    })();
    let (size, player_x, player_y) = dimensions.map_err(|e| invalid(location, e))?;

    factory
        .grid(tiles, size, player_x, player_y, record.player_direction)
        .map_err(|e| invalid(location, e))
}

fn to_index(field: &'static str, value: i64) -> DomainResult<usize> {
    usize::try_from(value).map_err(|_| DomainError::invalid(field, format!("{value} is negative")))
}

fn from_fields<T: serde::de::DeserializeOwned>(
    fields: Map<String, Value>,
    location: &str,
) -> ApplicationResult<T> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| ApplicationError::Parse {
        context: location.to_string(),
        source: e,
    })
}

fn invalid(location: &str, source: DomainError) -> ApplicationError {
    ApplicationError::Invalid {
        location: location.to_string(),
        source,
    }
}
