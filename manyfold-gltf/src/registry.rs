//! Append-only catalogs of bufferViews and accessors

use crate::error::ValidationError;
use crate::schema::{ComponentType, ElementType, Target};
use gltf_json as json;
use gltf_json::validation::Checked::Valid;

/// Buffer view index returned by [`BufferViewRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferViewIndex(pub u32);

impl BufferViewIndex {
    pub fn as_json_index(&self) -> json::Index<json::buffer::View> {
        json::Index::new(self.0)
    }
}

/// Accessor index returned by [`AccessorRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessorIndex(pub u32);

impl AccessorIndex {
    pub fn as_json_index(&self) -> json::Index<json::Accessor> {
        json::Index::new(self.0)
    }
}

/// Per-component min/max arrays of an accessor
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min: Vec<json::Value>,
    pub max: Vec<json::Value>,
}

impl Bounds {
    pub fn from_f32(min: &[f32], max: &[f32]) -> Self {
        Self {
            min: min.iter().copied().map(json::Value::from).collect(),
            max: max.iter().copied().map(json::Value::from).collect(),
        }
    }

    pub fn from_u32(min: &[u32], max: &[u32]) -> Self {
        Self {
            min: min.iter().copied().map(json::Value::from).collect(),
            max: max.iter().copied().map(json::Value::from).collect(),
        }
    }

    fn validate(&self, element_type: ElementType) -> Result<(), ValidationError> {
        let expected = element_type.components();
        for (field, values) in [("min", &self.min), ("max", &self.max)] {
            if values.len() != expected {
                return Err(ValidationError::BoundsLength {
                    field,
                    element_type: element_type.as_str(),
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct BufferViewRegistry {
    views: Vec<json::buffer::View>,
}

impl BufferViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn views(&self) -> &[json::buffer::View] {
        &self.views
    }

    pub fn into_views(self) -> Vec<json::buffer::View> {
        self.views
    }

    /// Register a view over `byte_length` bytes of `buffer` starting at `byte_offset`.
    ///
    /// `target` accepts either a [`Target`] or its raw wire code; unknown codes
    /// fail without registering anything.
    pub fn register<T>(
        &mut self,
        buffer: u32,
        byte_offset: usize,
        byte_length: usize,
        byte_stride: Option<usize>,
        target: Option<T>,
    ) -> Result<BufferViewIndex, ValidationError>
    where
        T: TryInto<Target>,
        ValidationError: From<T::Error>,
    {
        let target: Option<Target> = target.map(TryInto::try_into).transpose()?;

        let index = BufferViewIndex(self.views.len() as u32);
        self.views.push(json::buffer::View {
            buffer: json::Index::new(buffer),
            byte_length: byte_length.into(),
            byte_offset: Some(byte_offset.into()),
            byte_stride: byte_stride.map(json::buffer::Stride),
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: target.map(|t| Valid(t.to_json())),
        });
        tracing::trace!(
            view = index.0,
            byte_offset,
            byte_length,
            ?byte_stride,
            ?target,
            "registered bufferView"
        );
        Ok(index)
    }
}

#[derive(Debug, Default)]
pub struct AccessorRegistry {
    accessors: Vec<json::Accessor>,
}

impl AccessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    pub fn accessors(&self) -> &[json::Accessor] {
        &self.accessors
    }

    pub fn into_accessors(self) -> Vec<json::Accessor> {
        self.accessors
    }

    /// Register an accessor reading `count` elements from `buffer_view`.
    ///
    /// `component_type` and `element_type` accept the typed enums or their
    /// raw wire values (`5126`, `"VEC3"`). Validation of both, and of the
    /// bounds length, happens before the accessor is pushed.
    pub fn register<C, E>(
        &mut self,
        buffer_view: BufferViewIndex,
        byte_offset: usize,
        component_type: C,
        count: usize,
        element_type: E,
        bounds: Option<Bounds>,
    ) -> Result<AccessorIndex, ValidationError>
    where
        C: TryInto<ComponentType>,
        ValidationError: From<C::Error>,
        E: TryInto<ElementType>,
        ValidationError: From<E::Error>,
    {
        let component_type: ComponentType = component_type.try_into()?;
        let element_type: ElementType = element_type.try_into()?;
        if let Some(bounds) = &bounds {
            bounds.validate(element_type)?;
        }
        let (min, max) = match bounds {
            Some(Bounds { min, max }) => (
                Some(json::Value::Array(min)),
                Some(json::Value::Array(max)),
            ),
            None => (None, None),
        };

        let index = AccessorIndex(self.accessors.len() as u32);
        self.accessors.push(json::Accessor {
            buffer_view: Some(buffer_view.as_json_index()),
            byte_offset: Some(byte_offset.into()),
            count: count.into(),
            component_type: Valid(json::accessor::GenericComponentType(
                component_type.to_json(),
            )),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(element_type.to_json()),
            min,
            max,
            name: None,
            normalized: false,
            sparse: None,
        });
        tracing::trace!(
            accessor = index.0,
            view = buffer_view.0,
            ?component_type,
            element_type = element_type.as_str(),
            count,
            "registered accessor"
        );
        Ok(index)
    }
}
