//! A serde [`Serializer`] producing [`FieldValue`]s directly.
//!
//! Going through `serde_json::Value` would turn NaN and infinities into
//! `null`, so [`snapshot_of`](super::snapshot_of) uses this serializer to keep
//! every `f64` as it is.
//!
//! The value model follows serde_json's: options and units become `Absent`,
//! enum variants are externally tagged, map keys must be strings, numbers or
//! booleans, and sequences of numbers (including empty ones) become `Reals`.

use super::{FieldValue, StateSnapshot};
use crate::error::{ComparisonError, Result};
use serde::ser::{self, Serialize, Serializer};
use std::collections::BTreeMap;

/// Serializer whose output is a [`FieldValue`].
pub(super) struct FieldSerializer;

impl Serializer for FieldSerializer {
    type Ok = FieldValue;
    type Error = ComparisonError;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = MapBuilder;
    type SerializeStructVariant = MapBuilder;

    fn serialize_bool(self, v: bool) -> Result<FieldValue> {
        Ok(FieldValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<FieldValue> {
        Ok(FieldValue::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<FieldValue> {
        // beyond i64 only the magnitude is kept
        Ok(match i64::try_from(v) {
            Ok(i) => FieldValue::Integer(i),
            Err(_) => FieldValue::Real(v as f64),
        })
    }

    fn serialize_f32(self, v: f32) -> Result<FieldValue> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<FieldValue> {
        Ok(FieldValue::Real(v))
    }

    fn serialize_char(self, v: char) -> Result<FieldValue> {
        Ok(FieldValue::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<FieldValue> {
        Ok(FieldValue::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<FieldValue> {
        Ok(FieldValue::Reals(v.iter().map(|&b| f64::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<FieldValue> {
        Ok(FieldValue::Absent)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<FieldValue> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<FieldValue> {
        Ok(FieldValue::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<FieldValue> {
        Ok(FieldValue::Absent)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<FieldValue> {
        Ok(FieldValue::Text(variant.to_string()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<FieldValue> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<FieldValue> {
        Ok(tagged(Some(variant), value.serialize(FieldSerializer)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(None, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(None, len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(None, len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(Some(variant), len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapBuilder> {
        Ok(MapBuilder::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<MapBuilder> {
        Ok(MapBuilder::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<MapBuilder> {
        Ok(MapBuilder::new(Some(variant)))
    }
}

/// Wrap `value` as `{variant: value}` for enum variants.
fn tagged(variant: Option<&'static str>, value: FieldValue) -> FieldValue {
    match variant {
        None => value,
        Some(name) => {
            let mut fields = BTreeMap::new();
            fields.insert(name.to_string(), value);
            FieldValue::Nested(StateSnapshot { fields })
        }
    }
}

/// Collects sequence and tuple elements.
pub(super) struct SeqBuilder {
    variant: Option<&'static str>,
    items: Vec<FieldValue>,
}

impl SeqBuilder {
    fn new(variant: Option<&'static str>, len: usize) -> Self {
        Self {
            variant,
            items: Vec::with_capacity(len),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(FieldSerializer)?);
        Ok(())
    }

    fn finish(self) -> FieldValue {
        tagged(self.variant, FieldValue::sequence(self.items))
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = FieldValue;
    type Error = ComparisonError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = FieldValue;
    type Error = ComparisonError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = FieldValue;
    type Error = ComparisonError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = FieldValue;
    type Error = ComparisonError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

/// Collects map entries and struct fields.
pub(super) struct MapBuilder {
    variant: Option<&'static str>,
    fields: BTreeMap<String, FieldValue>,
    pending_key: Option<String>,
}

impl MapBuilder {
    fn new(variant: Option<&'static str>) -> Self {
        Self {
            variant,
            fields: BTreeMap::new(),
            pending_key: None,
        }
    }

    fn finish(self) -> FieldValue {
        tagged(
            self.variant,
            FieldValue::Nested(StateSnapshot {
                fields: self.fields,
            }),
        )
    }
}

fn key_text(key: FieldValue) -> Result<String> {
    match key {
        FieldValue::Text(s) => Ok(s),
        FieldValue::Integer(i) => Ok(i.to_string()),
        FieldValue::Real(r) => Ok(r.to_string()),
        FieldValue::Bool(b) => Ok(b.to_string()),
        other => Err(ComparisonError::InvalidInput(format!(
            "map keys must be strings, numbers or booleans, got {}",
            other.kind()
        ))),
    }
}

impl ser::SerializeMap for MapBuilder {
    type Ok = FieldValue;
    type Error = ComparisonError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.pending_key = Some(key_text(key.serialize(FieldSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self.pending_key.take().ok_or_else(|| {
            ComparisonError::InvalidInput("map value serialized before its key".to_string())
        })?;
        self.fields.insert(key, value.serialize(FieldSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for MapBuilder {
    type Ok = FieldValue;
    type Error = ComparisonError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.fields.insert(key.to_string(), value.serialize(FieldSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for MapBuilder {
    type Ok = FieldValue;
    type Error = ComparisonError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.fields.insert(key.to_string(), value.serialize(FieldSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FieldValue> {
        Ok(self.finish())
    }
}
