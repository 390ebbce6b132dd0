//=========================================================================
// Shader Data Types
//
// Semantic types of vertex attributes with their fixed byte size and
// component count.
//
// Lookup table:
// ```text
//  Type     Scalar  Components  Bytes
//  Float*   f32     1..4        4·n
//  Int*     i32     1..4        4·n
//  Short*   i16     1..4        2·n
//  Byte*    u8      1..4        1·n
// ```
//
//=========================================================================

use std::fmt;
use std::str::FromStr;

use crate::renderer::RenderError;

//=== ScalarType ==========================================================

/// Component type of a [`ShaderDataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Float,
    Int,
    Short,
    Byte,
}

impl ScalarType {
    pub const fn size(self) -> u32 {
        match self {
            Self::Float | Self::Int => 4,
            Self::Short => 2,
            Self::Byte => 1,
        }
    }
}

//=== ShaderDataType ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderDataType {
    Float,
    Float2,
    Float3,
    Float4,
    Int,
    Int2,
    Int3,
    Int4,
    Short,
    Short2,
    Short3,
    Short4,
    Byte,
    Byte2,
    Byte3,
    Byte4,
}

impl ShaderDataType {
    pub const ALL: [ShaderDataType; 16] = [
        Self::Float,
        Self::Float2,
        Self::Float3,
        Self::Float4,
        Self::Int,
        Self::Int2,
        Self::Int3,
        Self::Int4,
        Self::Short,
        Self::Short2,
        Self::Short3,
        Self::Short4,
        Self::Byte,
        Self::Byte2,
        Self::Byte3,
        Self::Byte4,
    ];

    pub const fn scalar_type(self) -> ScalarType {
        match self {
            Self::Float | Self::Float2 | Self::Float3 | Self::Float4 => ScalarType::Float,
            Self::Int | Self::Int2 | Self::Int3 | Self::Int4 => ScalarType::Int,
            Self::Short | Self::Short2 | Self::Short3 | Self::Short4 => ScalarType::Short,
            Self::Byte | Self::Byte2 | Self::Byte3 | Self::Byte4 => ScalarType::Byte,
        }
    }

    pub const fn component_count(self) -> u32 {
        match self {
            Self::Float | Self::Int | Self::Short | Self::Byte => 1,
            Self::Float2 | Self::Int2 | Self::Short2 | Self::Byte2 => 2,
            Self::Float3 | Self::Int3 | Self::Short3 | Self::Byte3 => 3,
            Self::Float4 | Self::Int4 | Self::Short4 | Self::Byte4 => 4,
        }
    }

    /// Byte size of one attribute of this type.
    pub const fn size(self) -> u32 {
        self.scalar_type().size() * self.component_count()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Float => "Float",
            Self::Float2 => "Float2",
            Self::Float3 => "Float3",
            Self::Float4 => "Float4",
            Self::Int => "Int",
            Self::Int2 => "Int2",
            Self::Int3 => "Int3",
            Self::Int4 => "Int4",
            Self::Short => "Short",
            Self::Short2 => "Short2",
            Self::Short3 => "Short3",
            Self::Short4 => "Short4",
            Self::Byte => "Byte",
            Self::Byte2 => "Byte2",
            Self::Byte3 => "Byte3",
            Self::Byte4 => "Byte4",
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for ShaderDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a type by its exact name (`"Float3"`, `"Short2"`, ...).
impl FromStr for ShaderDataType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| RenderError::UnsupportedType(s.to_string()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_table_sizes() {
        assert_eq!(ShaderDataType::Float.size(), 4);
        assert_eq!(ShaderDataType::Float3.size(), 12);
        assert_eq!(ShaderDataType::Float4.size(), 16);
        assert_eq!(ShaderDataType::Int2.size(), 8);
        assert_eq!(ShaderDataType::Short2.size(), 4);
        assert_eq!(ShaderDataType::Short3.size(), 6);
        assert_eq!(ShaderDataType::Byte4.size(), 4);
    }

    #[test]
    fn lookup_table_component_counts() {
        assert_eq!(ShaderDataType::Float.component_count(), 1);
        assert_eq!(ShaderDataType::Float3.component_count(), 3);
        assert_eq!(ShaderDataType::Short2.component_count(), 2);
        assert_eq!(ShaderDataType::Byte4.component_count(), 4);
    }

    #[test]
    fn names_parse_back() {
        for t in ShaderDataType::ALL {
            assert_eq!(t.to_string().parse::<ShaderDataType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_name_is_explicit_error() {
        match "Mat3".parse::<ShaderDataType>() {
            Err(RenderError::UnsupportedType(name)) => assert_eq!(name, "Mat3"),
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
        assert!("float3".parse::<ShaderDataType>().is_err(), "names are case-sensitive");
    }
}
