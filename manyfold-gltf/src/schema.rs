//! Enumerated glTF schema values and their wire codes

use crate::error::ValidationError;
use gltf_json as json;

/// Accessor component type, discriminants are the glTF wire codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ComponentType {
    Byte = 5120,
    UnsignedByte = 5121,
    Short = 5122,
    UnsignedShort = 5123,
    UnsignedInt = 5125,
    Float = 5126,
}

impl ComponentType {
    pub(crate) fn to_json(self) -> json::accessor::ComponentType {
        use json::accessor::ComponentType as C;
        match self {
            Self::Byte => C::I8,
            Self::UnsignedByte => C::U8,
            Self::Short => C::I16,
            Self::UnsignedShort => C::U16,
            Self::UnsignedInt => C::U32,
            Self::Float => C::F32,
        }
    }
}

impl TryFrom<u32> for ComponentType {
    type Error = ValidationError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            5120 => Ok(Self::Byte),
            5121 => Ok(Self::UnsignedByte),
            5122 => Ok(Self::Short),
            5123 => Ok(Self::UnsignedShort),
            5125 => Ok(Self::UnsignedInt),
            5126 => Ok(Self::Float),
            other => Err(ValidationError::UnknownComponentType(other)),
        }
    }
}

/// Accessor element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Mat2 => "MAT2",
            Self::Mat3 => "MAT3",
            Self::Mat4 => "MAT4",
        }
    }

    /// Number of components per element, which is also the required
    /// length of an accessor's min/max arrays
    pub const fn components(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 | Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }

    pub(crate) fn to_json(self) -> json::accessor::Type {
        use json::accessor::Type as T;
        match self {
            Self::Scalar => T::Scalar,
            Self::Vec2 => T::Vec2,
            Self::Vec3 => T::Vec3,
            Self::Vec4 => T::Vec4,
            Self::Mat2 => T::Mat2,
            Self::Mat3 => T::Mat3,
            Self::Mat4 => T::Mat4,
        }
    }
}

impl TryFrom<&str> for ElementType {
    type Error = ValidationError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        match name {
            "SCALAR" => Ok(Self::Scalar),
            "VEC2" => Ok(Self::Vec2),
            "VEC3" => Ok(Self::Vec3),
            "VEC4" => Ok(Self::Vec4),
            "MAT2" => Ok(Self::Mat2),
            "MAT3" => Ok(Self::Mat3),
            "MAT4" => Ok(Self::Mat4),
            other => Err(ValidationError::UnknownElementType(other.to_string())),
        }
    }
}

/// GPU buffer binding target of a bufferView
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Target {
    ArrayBuffer = 34962,
    ElementArrayBuffer = 34963,
}

impl Target {
    pub(crate) fn to_json(self) -> json::buffer::Target {
        match self {
            Self::ArrayBuffer => json::buffer::Target::ArrayBuffer,
            Self::ElementArrayBuffer => json::buffer::Target::ElementArrayBuffer,
        }
    }
}

impl TryFrom<u32> for Target {
    type Error = ValidationError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            34962 => Ok(Self::ArrayBuffer),
            34963 => Ok(Self::ElementArrayBuffer),
            other => Err(ValidationError::UnknownTarget(other)),
        }
    }
}
