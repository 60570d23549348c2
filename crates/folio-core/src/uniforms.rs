//! Named shader parameter blocks.
//!
//! Materials are described as name → value maps so defaults can be tweaked
//! without touching GPU layouts. A block is validated once, when a material is
//! built from it; after that the material holds plain typed fields.

use crate::error::SceneError;
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Vec2,
    Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            UniformValue::Float(v) => v.is_finite(),
            UniformValue::Vec2(v) => v.is_finite(),
            UniformValue::Vec3(v) => v.is_finite(),
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

#[derive(Clone, Debug)]
pub struct UniformBlock {
    label: &'static str,
    values: FnvHashMap<&'static str, UniformValue>,
}

impl UniformBlock {
    pub fn new(
        label: &'static str,
        entries: impl IntoIterator<Item = (&'static str, UniformValue)>,
    ) -> Result<Self, SceneError> {
        let mut values = FnvHashMap::default();
        for (name, value) in entries {
            if !value.is_finite() {
                return Err(SceneError::NonFinite { block: label, name });
            }
            if values.insert(name, value).is_some() {
                return Err(SceneError::Duplicate { block: label, name });
            }
        }
        Ok(Self { label, values })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    /// Overwrite an existing entry. The kind must match and the value must be finite.
    pub fn set(&mut self, name: &'static str, value: UniformValue) -> Result<(), SceneError> {
        let current = self.lookup(name)?;
        if current.kind() != value.kind() {
            return Err(self.mismatch(name, current.kind(), value.kind()));
        }
        if !value.is_finite() {
            return Err(SceneError::NonFinite {
                block: self.label,
                name,
            });
        }
        self.values.insert(name, value);
        Ok(())
    }

    pub fn float(&self, name: &'static str) -> Result<f32, SceneError> {
        match self.lookup(name)? {
            UniformValue::Float(v) => Ok(v),
            other => Err(self.mismatch(name, UniformKind::Float, other.kind())),
        }
    }

    pub fn vec2(&self, name: &'static str) -> Result<Vec2, SceneError> {
        match self.lookup(name)? {
            UniformValue::Vec2(v) => Ok(v),
            other => Err(self.mismatch(name, UniformKind::Vec2, other.kind())),
        }
    }

    pub fn vec3(&self, name: &'static str) -> Result<Vec3, SceneError> {
        match self.lookup(name)? {
            UniformValue::Vec3(v) => Ok(v),
            other => Err(self.mismatch(name, UniformKind::Vec3, other.kind())),
        }
    }

    fn lookup(&self, name: &'static str) -> Result<UniformValue, SceneError> {
        self.get(name).ok_or(SceneError::MissingUniform {
            block: self.label,
            name,
        })
    }

    fn mismatch(&self, name: &'static str, expected: UniformKind, found: UniformKind) -> SceneError {
        SceneError::KindMismatch {
            block: self.label,
            name,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicates_and_non_finite_values() {
        let dup = UniformBlock::new(
            "t",
            [
                ("time", UniformValue::Float(0.0)),
                ("time", UniformValue::Float(1.0)),
            ],
        );
        assert_eq!(
            dup.unwrap_err(),
            SceneError::Duplicate {
                block: "t",
                name: "time"
            }
        );
        let nan = UniformBlock::new("t", [("time", UniformValue::Float(f32::NAN))]);
        assert!(matches!(nan, Err(SceneError::NonFinite { .. })));
    }

    #[test]
    fn typed_reads_check_kind() {
        let block = UniformBlock::new("t", [("size", UniformValue::Float(50.0))]).unwrap();
        assert_eq!(block.float("size"), Ok(50.0));
        assert!(matches!(
            block.vec3("size"),
            Err(SceneError::KindMismatch {
                expected: UniformKind::Vec3,
                found: UniformKind::Float,
                ..
            })
        ));
        assert!(matches!(
            block.float("missing"),
            Err(SceneError::MissingUniform { .. })
        ));
    }

    #[test]
    fn set_keeps_schema() {
        let mut block = UniformBlock::new("t", [("pointer", UniformValue::Vec2(Vec2::ZERO))]).unwrap();
        assert!(block.set("pointer", UniformValue::Vec2(Vec2::ONE)).is_ok());
        assert!(block.set("pointer", UniformValue::Float(1.0)).is_err());
        assert!(block.set("other", UniformValue::Float(1.0)).is_err());
        assert_eq!(block.vec2("pointer"), Ok(Vec2::ONE));
    }
}
