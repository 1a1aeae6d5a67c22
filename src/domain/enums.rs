//! Closed lookup tables: value types, facing directions and the robot method catalog.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value-type tokens usable as parameter and return types.
///
/// Serialized by variant name (`INT_ARRAY`); displayed by source token (`int[]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Primitive {
    String,
    StringArray,
    Char,
    CharArray,
    Byte,
    ByteArray,
    Short,
    ShortArray,
    Int,
    IntArray,
    Long,
    LongArray,
    Float,
    FloatArray,
    Double,
    DoubleArray,
    Boolean,
    BooleanArray,
    Void,
}

impl Primitive {
    pub const ALL: [Primitive; 19] = [
        Primitive::String,
        Primitive::StringArray,
        Primitive::Char,
        Primitive::CharArray,
        Primitive::Byte,
        Primitive::ByteArray,
        Primitive::Short,
        Primitive::ShortArray,
        Primitive::Int,
        Primitive::IntArray,
        Primitive::Long,
        Primitive::LongArray,
        Primitive::Float,
        Primitive::FloatArray,
        Primitive::Double,
        Primitive::DoubleArray,
        Primitive::Boolean,
        Primitive::BooleanArray,
        Primitive::Void,
    ];

    /// Token used when rendering a method signature.
    pub fn token(self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::StringArray => "String[]",
            Primitive::Char => "char",
            Primitive::CharArray => "char[]",
            Primitive::Byte => "byte",
            Primitive::ByteArray => "byte[]",
            Primitive::Short => "short",
            Primitive::ShortArray => "short[]",
            Primitive::Int => "int",
            Primitive::IntArray => "int[]",
            Primitive::Long => "long",
            Primitive::LongArray => "long[]",
            Primitive::Float => "float",
            Primitive::FloatArray => "float[]",
            Primitive::Double => "double",
            Primitive::DoubleArray => "double[]",
            Primitive::Boolean => "boolean",
            Primitive::BooleanArray => "boolean[]",
            Primitive::Void => "void",
        }
    }

    pub fn is_void(self) -> bool {
        self == Primitive::Void
    }

    pub fn is_array(self) -> bool {
        self.token().ends_with("[]")
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Direction the robot is facing. Ordinals cycle clockwise from `Top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }

    /// Wrap any ordinal onto the cycle using floor modulo, so `-1` is `Left`.
    pub fn from_ordinal(ordinal: i64) -> Self {
        Self::ALL[ordinal.rem_euclid(4) as usize]
    }

    /// Exact ordinal lookup, `None` outside `0..=3`.
    pub fn try_from_ordinal(ordinal: i64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Top => "TOP",
            Direction::Right => "RIGHT",
            Direction::Bottom => "BOTTOM",
            Direction::Left => "LEFT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn turn_right(self) -> Self {
        Self::from_ordinal(i64::from(self.ordinal()) + 1)
    }

    pub fn turn_left(self) -> Self {
        Self::from_ordinal(i64::from(self.ordinal()) - 1)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

const DIRECTION_NAMES: &[&str] = &["TOP", "RIGHT", "BOTTOM", "LEFT"];

/// Accepts the variant name or an exact ordinal in `0..=3`.
impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DirectionVisitor;

        impl Visitor<'_> for DirectionVisitor {
            type Value = Direction;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a direction name or an ordinal in 0..=3")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Direction, E> {
                Direction::from_name(v).ok_or_else(|| E::unknown_variant(v, DIRECTION_NAMES))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Direction, E> {
                Direction::try_from_ordinal(v).ok_or_else(|| {
                    E::invalid_value(de::Unexpected::Signed(v), &"an ordinal in 0..=3")
                })
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Direction, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(Direction::try_from_ordinal)
                    .ok_or_else(|| {
                        E::invalid_value(de::Unexpected::Unsigned(v), &"an ordinal in 0..=3")
                    })
            }
        }

        deserializer.deserialize_any(DirectionVisitor)
    }
}

/// Built-in robot operations offered to visual lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Method {
    Move,
    TurnLeft,
    TurnRight,
    PlaceBall,
    TakeBall,
    BallIsPresent,
    Paint,
    FrontIsClear,
    LeftIsClear,
    RightIsClear,
}

impl Method {
    pub const ALL: [Method; 10] = [
        Method::Move,
        Method::TurnLeft,
        Method::TurnRight,
        Method::PlaceBall,
        Method::TakeBall,
        Method::BallIsPresent,
        Method::Paint,
        Method::FrontIsClear,
        Method::LeftIsClear,
        Method::RightIsClear,
    ];

    /// Call signature shown to the learner, including return type and parameters.
    pub fn signature(self) -> &'static str {
        match self {
            Method::Move => "void move()",
            Method::TurnLeft => "void turnLeft()",
            Method::TurnRight => "void turnRight()",
            Method::PlaceBall => "void placeBall()",
            Method::TakeBall => "void takeBall()",
            Method::BallIsPresent => "boolean ballIsPresent()",
            Method::Paint => "void paint(Color color)",
            Method::FrontIsClear => "boolean frontIsClear()",
            Method::LeftIsClear => "boolean leftIsClear()",
            Method::RightIsClear => "boolean rightIsClear()",
        }
    }

    /// Description lines, one rendered line each.
    pub fn description(self) -> &'static [&'static str] {
        match self {
            Method::Move => &[
                "Moves Falco forward once",
                "throws RanIntoBarrierException if Falco moves into a barrier",
            ],
            Method::TurnLeft => &["Turns Falco counter-clockwise(to the left)"],
            Method::TurnRight => &["Turns Falco clockwise(to the right)"],
            Method::PlaceBall => &["Places one ball on the tile Falco is currently on"],
            Method::TakeBall => &[
                "Takes one ball from the tile Falco is currently on",
                "throws BallNotFoundException if no ball is present",
            ],
            Method::BallIsPresent => &[
                "Returns a boolean based on if a ball is present on the tile Falco is currently on",
                "Returns true if a ball is present",
                "Returns false if a ball is not present",
            ],
            Method::Paint => &["Paints the given color on the tile Falco is currently on"],
            Method::FrontIsClear => &[
                "Returns a boolean based on if there is a barrier in front of Falco or not",
                "Returns true if no barrier is present",
                "Returns false if a barrier is present",
            ],
            Method::LeftIsClear => &[
                "Returns a boolean based on if there is a barrier to the left of Falco or not",
                "Returns true if no barrier is present",
                "Returns false if a barrier is present",
            ],
            Method::RightIsClear => &[
                "Returns a boolean based on if there is a barrier to the right of Falco or not",
                "Returns true if no barrier is present",
                "Returns false if a barrier is present",
            ],
        }
    }

    /// Serialized name, e.g. `TURN_LEFT`.
    pub fn name(self) -> &'static str {
        match self {
            Method::Move => "MOVE",
            Method::TurnLeft => "TURN_LEFT",
            Method::TurnRight => "TURN_RIGHT",
            Method::PlaceBall => "PLACE_BALL",
            Method::TakeBall => "TAKE_BALL",
            Method::BallIsPresent => "BALL_IS_PRESENT",
            Method::Paint => "PAINT",
            Method::FrontIsClear => "FRONT_IS_CLEAR",
            Method::LeftIsClear => "LEFT_IS_CLEAR",
            Method::RightIsClear => "RIGHT_IS_CLEAR",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}
