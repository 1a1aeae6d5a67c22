//! Mutable parameters and tiles.

use crate::domain::color::Color;
use crate::domain::entities::{Parameter, Tile};
use crate::domain::enums::Primitive;
use crate::domain::error::DomainResult;
use crate::domain::factory::{check_balls, check_parameter_type};
use crate::domain::view::{ParameterView, TileView};

/// Editable parameter. Name uniqueness is enforced by the owning lesson.
#[derive(Debug, Clone)]
pub struct MutableParameter {
    param_type: Primitive,
    name: String,
}

impl MutableParameter {
    pub fn new(param_type: Primitive, name: impl Into<String>) -> DomainResult<Self> {
        check_parameter_type(param_type)?;
        Ok(Self {
            param_type,
            name: name.into(),
        })
    }

    pub fn set_param_type(&mut self, param_type: Primitive) -> DomainResult<()> {
        check_parameter_type(param_type)?;
        self.param_type = param_type;
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn freeze(&self) -> Parameter {
        Parameter {
            param_type: self.param_type,
            name: self.name.clone(),
        }
    }
}

impl ParameterView for MutableParameter {
    fn param_type(&self) -> Primitive {
        self.param_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl From<&Parameter> for MutableParameter {
    fn from(p: &Parameter) -> Self {
        Self {
            param_type: p.param_type,
            name: p.name.clone(),
        }
    }
}

/// Editable tile. `Default` is the blank tile: no color, no barriers, no balls.
#[derive(Debug, Clone, Default)]
pub struct MutableTile {
    color: Option<Color>,
    barrier_top: bool,
    barrier_right: bool,
    barrier_bottom: bool,
    barrier_left: bool,
    balls: u32,
}

impl MutableTile {
    pub fn new(
        color: Option<Color>,
        barrier_top: bool,
        barrier_right: bool,
        barrier_bottom: bool,
        barrier_left: bool,
        balls: i32,
    ) -> DomainResult<Self> {
        Ok(Self {
            color,
            barrier_top,
            barrier_right,
            barrier_bottom,
            barrier_left,
            balls: check_balls(balls)?,
        })
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_barrier_top(&mut self, barrier: bool) {
        self.barrier_top = barrier;
    }

    pub fn set_barrier_right(&mut self, barrier: bool) {
        self.barrier_right = barrier;
    }

    pub fn set_barrier_bottom(&mut self, barrier: bool) {
        self.barrier_bottom = barrier;
    }

    pub fn set_barrier_left(&mut self, barrier: bool) {
        self.barrier_left = barrier;
    }

    /// Set all four barriers in top, right, bottom, left order.
    pub fn set_barriers(&mut self, top: bool, right: bool, bottom: bool, left: bool) {
        self.barrier_top = top;
        self.barrier_right = right;
        self.barrier_bottom = bottom;
        self.barrier_left = left;
    }

    pub fn set_balls(&mut self, balls: i32) -> DomainResult<()> {
        self.balls = check_balls(balls)?;
        Ok(())
    }

    pub fn freeze(&self) -> Tile {
        Tile {
            color: self.color,
            barrier_top: self.barrier_top,
            barrier_right: self.barrier_right,
            barrier_bottom: self.barrier_bottom,
            barrier_left: self.barrier_left,
            balls: self.balls,
        }
    }
}

impl TileView for MutableTile {
    fn color(&self) -> Option<Color> {
        self.color
    }

    fn barrier_top(&self) -> bool {
        self.barrier_top
    }

    fn barrier_right(&self) -> bool {
        self.barrier_right
    }

    fn barrier_bottom(&self) -> bool {
        self.barrier_bottom
    }

    fn barrier_left(&self) -> bool {
        self.barrier_left
    }

    fn balls(&self) -> u32 {
        self.balls
    }
}

impl From<&Tile> for MutableTile {
    fn from(t: &Tile) -> Self {
        Self {
            color: t.color,
            barrier_top: t.barrier_top,
            barrier_right: t.barrier_right,
            barrier_bottom: t.barrier_bottom,
            barrier_left: t.barrier_left,
            balls: t.balls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_negative_balls_when_setting_then_rejected_and_unchanged() {
        let mut tile = MutableTile::new(None, false, false, false, false, 4).unwrap();
        let err = tile.set_balls(-1).unwrap_err();
        assert_eq!(err.field(), "balls");
        assert_eq!(tile.balls(), 4);
        tile.set_balls(0).unwrap();
        assert_eq!(tile.balls(), 0);
    }

    #[test]
    fn given_void_when_setting_parameter_type_then_rejected() {
        assert!(MutableParameter::new(Primitive::Void, "x").is_err());
        let mut p = MutableParameter::new(Primitive::Int, "x").unwrap();
        assert!(p.set_param_type(Primitive::Void).is_err());
        assert_eq!(p.param_type(), Primitive::Int);
        p.set_param_type(Primitive::CharArray).unwrap();
        assert_eq!(p.declaration(), "char[] x");
    }

    #[test]
    fn given_barriers_when_set_together_then_all_applied() {
        let mut tile = MutableTile::default();
        tile.set_barriers(true, false, true, false);
        tile.set_color(Some(Color::WHITE));
        let frozen = tile.freeze();
        assert!(frozen.barrier_top() && !frozen.barrier_right());
        assert!(frozen.barrier_bottom() && !frozen.barrier_left());
        assert_eq!(frozen.color(), Some(Color::WHITE));
    }
}
