//! Per-export mutable state

use crate::buffer::BinaryBuffer;
use crate::registry::{AccessorRegistry, BufferViewRegistry};
use gltf_json as json;
use std::collections::BTreeSet;

/// Everything one export call accumulates.
///
/// A new context is created for every export; ids and offsets are plain
/// counters, so a context must never be shared between calls.
#[derive(Debug, Default)]
pub struct ExportContext {
    pub buffer: BinaryBuffer,
    pub buffer_views: BufferViewRegistry,
    pub accessors: AccessorRegistry,
    pub buffers: Vec<json::Buffer>,
    pub meshes: Vec<json::Mesh>,
    pub nodes: Vec<json::Node>,
    /// Node ids in traversal order, these become the scene's root nodes
    pub scene_nodes: Vec<u32>,
    pub extensions_used: BTreeSet<String>,
}

impl ExportContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the buffer that owns the accumulated payload, creating its
    /// record on first use
    pub fn owning_buffer(&mut self) -> u32 {
        if self.buffers.is_empty() {
            self.buffers.push(json::Buffer {
                byte_length: 0u64.into(),
                extensions: Default::default(),
                extras: Default::default(),
                name: None,
                uri: None,
            });
        }
        (self.buffers.len() - 1) as u32
    }

    /// Bring the owning buffer's byteLength up to the accumulator length
    pub fn sync_buffer_length(&mut self) {
        let len = self.buffer.len();
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.byte_length = len.into();
        }
    }

    /// Record an extension as used; repeated names are stored once
    pub fn use_extension(&mut self, name: &str) {
        self.extensions_used.insert(name.to_owned());
    }
}
