// serde front end of the form encoder.
//
// `RecordSerializer` accepts exactly one struct (possibly behind a reference, `Box`, newtype or
// `Some`) and writes each of its fields through `ValueSerializer`, which reduces a field value to
// a single text value, a file, or nothing at all.

use serde::ser::{self, Impossible, Serialize};

use super::{file::FILE_TOKEN, writer::MultipartWriter};
use crate::error::EncodingError;

pub(crate) enum FieldValue {
    Text(String),
    Bytes(Vec<u8>),
    File { filename: String, contents: Vec<u8> },
}

macro_rules! not_a_record {
    ($($method:ident($($arg:ty),*)),* $(,)?) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Self::Ok, Self::Error> {
                Err(EncodingError::NotARecord)
            }
        )*
    };
}

pub(crate) struct RecordSerializer<'w> {
    pub(crate) writer: &'w mut MultipartWriter,
}

impl<'w> ser::Serializer for RecordSerializer<'w> {
    type Ok = ();
    type Error = EncodingError;

    type SerializeSeq = Impossible<(), EncodingError>;
    type SerializeTuple = Impossible<(), EncodingError>;
    type SerializeTupleStruct = Impossible<(), EncodingError>;
    type SerializeTupleVariant = Impossible<(), EncodingError>;
    type SerializeMap = Impossible<(), EncodingError>;
    type SerializeStruct = FieldsSerializer<'w>;
    type SerializeStructVariant = Impossible<(), EncodingError>;

    not_a_record! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_none(),
        serialize_unit(),
        serialize_unit_struct(&'static str),
        serialize_unit_variant(&'static str, u32, &'static str),
    }

    fn serialize_some<T>(self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        Err(EncodingError::NotARecord)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodingError> {
        Err(EncodingError::NotARecord)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, EncodingError> {
        Err(EncodingError::NotARecord)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodingError> {
        Err(EncodingError::NotARecord)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodingError> {
        Err(EncodingError::NotARecord)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodingError> {
        Err(EncodingError::NotARecord)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, EncodingError> {
        Ok(FieldsSerializer {
            writer: self.writer,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, EncodingError> {
        Err(EncodingError::NotARecord)
    }
}

pub(crate) struct FieldsSerializer<'w> {
    writer: &'w mut MultipartWriter,
}

impl ser::SerializeStruct for FieldsSerializer<'_> {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(ValueSerializer).map_err(|e| e.in_field(key))? {
            None => tracing::trace!(field = key, "omitting empty form field"),
            Some(FieldValue::Text(text)) => self.writer.write_field(key, &text),
            Some(FieldValue::File { filename, contents }) => {
                tracing::trace!(field = key, %filename, bytes = contents.len(), "writing form file");
                self.writer.write_file(key, &filename, &contents)
            }
            Some(FieldValue::Bytes(_)) => {
                return Err(EncodingError::Unsupported {
                    field: key,
                    kind: "bytes",
                })
            }
        }
        Ok(())
    }

    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

/// Reduces one field value to its form representation. `Ok(None)` means the field is absent.
pub(crate) struct ValueSerializer;

type Unsupported = Impossible<Option<FieldValue>, EncodingError>;

fn text<T: ToString>(value: T) -> Result<Option<FieldValue>, EncodingError> {
    Ok(Some(FieldValue::Text(value.to_string())))
}

// `Display` gives the shortest representation that round-trips at the value's own precision,
// without an exponent. Non-finite values are spelled `+Inf`, `-Inf` and `NaN`.
fn float_text<F>(value: F) -> Result<Option<FieldValue>, EncodingError>
where
    F: Into<f64> + ToString + Copy,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        text("NaN")
    } else if wide.is_infinite() {
        text(if wide > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        text(value)
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<FieldValue>;
    type Error = EncodingError;

    type SerializeSeq = Unsupported;
    type SerializeTuple = Unsupported;
    type SerializeTupleStruct = FilePartSerializer;
    type SerializeTupleVariant = Unsupported;
    type SerializeMap = Unsupported;
    type SerializeStruct = Unsupported;
    type SerializeStructVariant = Unsupported;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, EncodingError> {
        float_text(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, EncodingError> {
        float_text(v)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, EncodingError> {
        text(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, EncodingError> {
        Ok(Some(FieldValue::Bytes(v.to_vec())))
    }

    fn serialize_none(self) -> Result<Self::Ok, EncodingError> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, EncodingError> {
        Err(EncodingError::unsupported("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, EncodingError> {
        Err(EncodingError::unsupported("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, EncodingError> {
        text(variant)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        Err(EncodingError::unsupported("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodingError> {
        Err(EncodingError::unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, EncodingError> {
        Err(EncodingError::unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodingError> {
        if name == FILE_TOKEN {
            Ok(FilePartSerializer::default())
        } else {
            Err(EncodingError::unsupported("tuple struct"))
        }
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodingError> {
        Err(EncodingError::unsupported("enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodingError> {
        Err(EncodingError::unsupported("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, EncodingError> {
        Err(EncodingError::unsupported("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, EncodingError> {
        Err(EncodingError::unsupported("enum variant"))
    }
}

/// Collects the `(filename, bytes)` pair a `FormFile` serializes as.
#[derive(Default)]
pub(crate) struct FilePartSerializer {
    filename: Option<String>,
    contents: Option<Vec<u8>>,
}

impl ser::SerializeTupleStruct for FilePartSerializer {
    type Ok = Option<FieldValue>;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(ValueSerializer)? {
            Some(FieldValue::Text(name)) if self.filename.is_none() => self.filename = Some(name),
            Some(FieldValue::Bytes(bytes)) if self.contents.is_none() => {
                self.contents = Some(bytes)
            }
            _ => return Err(EncodingError::Custom("malformed file field".to_string())),
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, EncodingError> {
        match (self.filename, self.contents) {
            (Some(filename), Some(contents)) => Ok(Some(FieldValue::File { filename, contents })),
            _ => Err(EncodingError::Custom("malformed file field".to_string())),
        }
    }
}
