use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHasher};

use crate::backend::Backend;
use crate::error::ShaderError;
use crate::shader::{ProgramHandle, ShaderCompiler};

/// Identity of a vertex/fragment source pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

impl SourceId {
    pub fn of(vertex: &str, fragment: &str) -> Self {
        let mut hasher = FxHasher::default();
        vertex.hash(&mut hasher);
        fragment.hash(&mut hasher);
        SourceId(hasher.finish())
    }
}

/// Linked programs shared between every [`ShaderProgram`](crate::ShaderProgram)
/// built from the same sources. A program stays alive while the cache or any
/// shader program still holds it.
pub struct ProgramCache<B: Backend> {
    programs: FxHashMap<SourceId, Rc<ProgramHandle<B>>>,
}

impl<B: Backend> Default for ProgramCache<B> {
    fn default() -> Self {
        Self { programs: FxHashMap::default() }
    }
}

impl<B: Backend> ProgramCache<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compile<C: ShaderCompiler<B> + ?Sized>(
        &mut self,
        gl: &Rc<B>,
        compiler: &C,
        vertex: &str,
        fragment: &str,
    ) -> Result<Rc<ProgramHandle<B>>, ShaderError> {
        let id = SourceId::of(vertex, fragment);
        if let Some(program) = self.programs.get(&id) {
            return Ok(Rc::clone(program));
        }

        let program = Rc::new(compiler.compile(gl, vertex, fragment)?);
        log::debug!("cached program {:?} as {:?}", program.raw(), id);
        self.programs.insert(id, Rc::clone(&program));
        Ok(program)
    }

    pub fn contains(&self, vertex: &str, fragment: &str) -> bool {
        self.programs.contains_key(&SourceId::of(vertex, fragment))
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Drops the cache's references. Programs still used elsewhere survive.
    pub fn clear(&mut self) {
        self.programs.clear();
    }
}
