//! Minimal scene graph consumed by the exporter
//!
//! Host applications convert their own meshes into these types. Only what the
//! exporter reads is modelled: positions, triangle faces and, for progressive
//! meshes, the ordered vertex-split stream.

use glam::Vec3;

/// Triangle as three vertex indices, wound a -> b -> c
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub const fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Indexed triangle geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Geometry {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Bounding box over all vertex positions, `None` when there are no vertices.
    ///
    /// NaN coordinates are skipped by the component-wise min/max; the encoders
    /// reject non-finite positions before bounds are computed.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let (first, rest) = self.vertices.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(Aabb { min, max })
    }

    /// A geometry is renderable when it has at least one vertex and one face
    pub fn is_renderable(&self) -> bool {
        !self.vertices.is_empty() && !self.faces.is_empty()
    }
}

/// One refinement step of a progressive mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSplit {
    pub vertex: u32,
    pub left: u32,
    pub right: u32,
    pub displacement: Vec3,
}

/// Base geometry plus the ordered splits that refine it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressiveMesh {
    pub geometry: Geometry,
    pub vertex_splits: Vec<VertexSplit>,
}

/// Mesh payload attached to a scene node
#[derive(Debug, Clone, PartialEq)]
pub enum MeshKind {
    Static(Geometry),
    Progressive(ProgressiveMesh),
}

impl MeshKind {
    pub fn geometry(&self) -> &Geometry {
        match self {
            MeshKind::Static(geometry) => geometry,
            MeshKind::Progressive(progressive) => &progressive.geometry,
        }
    }
}

impl From<Geometry> for MeshKind {
    fn from(geometry: Geometry) -> Self {
        MeshKind::Static(geometry)
    }
}

impl From<ProgressiveMesh> for MeshKind {
    fn from(progressive: ProgressiveMesh) -> Self {
        MeshKind::Progressive(progressive)
    }
}

/// Scene graph node; group nodes carry no mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneNode {
    pub name: Option<String>,
    pub mesh: Option<MeshKind>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(children: Vec<SceneNode>) -> Self {
        Self {
            name: None,
            mesh: None,
            children,
        }
    }

    pub fn mesh(mesh: impl Into<MeshKind>) -> Self {
        Self {
            name: None,
            mesh: Some(mesh.into()),
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Visit this node and its descendants depth-first, parents before children
    pub fn traverse<'a>(&'a self, visit: &mut impl FnMut(&'a SceneNode)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }
}
