//=========================================================================
// Shader Sources
//
// Per-stage GLSL source text, either assembled directly or parsed from a
// single sectioned file.
//
// Sectioned file convention:
// ```text
//  // anything here is discarded
//  #region Vertex
//  ...vertex source...
//  #region Fragment
//  ...fragment source...
// ```
// A line containing `#region <Stage>` switches the current stage; the
// marker line itself is not part of any source.
//
//=========================================================================

use std::fs;
use std::path::Path;

use crate::renderer::RenderError;

//=== ShaderStage =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessellationControl,
    TessellationEvaluation,
    Compute,
}

impl ShaderStage {
    /// All stages in pipeline order.
    pub const ALL: [ShaderStage; 6] = [
        Self::Vertex,
        Self::TessellationControl,
        Self::TessellationEvaluation,
        Self::Geometry,
        Self::Fragment,
        Self::Compute,
    ];

    /// Name used after `#region` in sectioned files.
    pub const fn region_name(self) -> &'static str {
        match self {
            Self::Vertex => "Vertex",
            Self::Fragment => "Fragment",
            Self::Geometry => "Geometry",
            Self::TessellationControl => "TessellationControl",
            Self::TessellationEvaluation => "TessellationEvaluation",
            Self::Compute => "Compute",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Vertex => 0,
            Self::Fragment => 1,
            Self::Geometry => 2,
            Self::TessellationControl => 3,
            Self::TessellationEvaluation => 4,
            Self::Compute => 5,
        }
    }

    //--- region_marker() --------------------------------------------------
    //
    // Stage announced by `line`, if any. No stage name is a prefix of
    // another, so prefix matching is unambiguous.
    //
    fn region_marker(line: &str) -> Option<Self> {
        let rest = &line[line.find("#region ")? + "#region ".len()..];
        Self::ALL
            .into_iter()
            .find(|stage| rest.trim_start().starts_with(stage.region_name()))
    }
}

//=== ShaderSources =======================================================

/// Source text per stage; a stage is present iff its source is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    stages: [String; 6],
}

impl ShaderSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex + fragment pair, the common case.
    pub fn vertex_fragment(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::new()
            .with_stage(ShaderStage::Vertex, vertex)
            .with_stage(ShaderStage::Fragment, fragment)
    }

    pub fn with_stage(mut self, stage: ShaderStage, source: impl Into<String>) -> Self {
        self.set(stage, source);
        self
    }

    pub fn set(&mut self, stage: ShaderStage, source: impl Into<String>) {
        self.stages[stage.slot()] = source.into();
    }

    //--- Parsing ----------------------------------------------------------

    /// Splits sectioned text into stages. Text before the first marker is
    /// discarded; a repeated marker appends to that stage.
    pub fn parse(text: &str) -> Self {
        let mut sources = Self::new();
        let mut current: Option<ShaderStage> = None;

        for line in text.lines() {
            if let Some(stage) = ShaderStage::region_marker(line) {
                current = Some(stage);
                continue;
            }
            if let Some(stage) = current {
                let source = &mut sources.stages[stage.slot()];
                source.push_str(line);
                source.push('\n');
            }
        }

        sources
    }

    /// Reads and parses a sectioned shader file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Reads a vertex and a fragment source from two whole files.
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, RenderError> {
        let read = |path: &Path| fs::read_to_string(path).map_err(|e| RenderError::io(path, e));
        let vertex = read(vertex_path.as_ref())?;
        let fragment = read(fragment_path.as_ref())?;
        Ok(Self::vertex_fragment(vertex, fragment))
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, stage: ShaderStage) -> Option<&str> {
        let source = self.stages[stage.slot()].as_str();
        (!source.trim().is_empty()).then_some(source)
    }

    pub fn has(&self, stage: ShaderStage) -> bool {
        self.get(stage).is_some()
    }

    /// Present stages in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> + '_ {
        ShaderStage::ALL
            .into_iter()
            .filter_map(|stage| self.get(stage).map(|src| (stage, src)))
    }

    pub fn is_compute_only(&self) -> bool {
        self.has(ShaderStage::Compute) && self.stages().all(|(s, _)| s == ShaderStage::Compute)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
