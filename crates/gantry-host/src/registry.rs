//! Scene factory registry.
//!
//! Scenes are constructed by name through registered factories. A factory
//! provides a headless build and, optionally, a draw-enabled build; the
//! host selects the variant from its own configuration. The registry
//! reports which capability contract the built scene satisfies via the
//! [`SceneInstance`] tag the factory returns.

use gantry_core::{ArgError, SceneInstance};
use indexmap::IndexMap;
use std::error::Error;
use std::fmt;

/// Errors from scene setup.
#[derive(Debug)]
pub enum SetupError {
    /// No `scene` argument was supplied.
    MissingSceneArg,
    /// The requested name has no registered factory.
    UnknownScene {
        /// The requested name.
        name: String,
        /// Registered names, in registration order.
        known: Vec<String>,
    },
    /// The constructed scene rejected the startup arguments.
    SceneArgs(ArgError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSceneArg => write!(f, "no scene requested (missing --scene argument)"),
            Self::UnknownScene { name, known } => {
                write!(f, "unknown scene '{name}' (registered: {})", known.join(", "))
            }
            Self::SceneArgs(e) => write!(f, "scene rejected arguments: {e}"),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SceneArgs(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArgError> for SetupError {
    fn from(e: ArgError) -> Self {
        Self::SceneArgs(e)
    }
}

/// Constructs scene instances on request.
///
/// `build` produces the headless variant. `build_draw` produces the
/// draw-enabled variant and defaults to the headless one for scenes
/// whose simulation is independent of rendering.
pub trait SceneFactory: Send {
    /// Construct the headless variant.
    fn build(&self) -> SceneInstance;

    /// Construct the draw-enabled variant.
    fn build_draw(&self) -> SceneInstance {
        self.build()
    }
}

impl<F> SceneFactory for F
where
    F: Fn() -> SceneInstance + Send,
{
    fn build(&self) -> SceneInstance {
        self()
    }
}

/// Name-keyed collection of scene factories.
///
/// Registration order is preserved for deterministic diagnostics.
#[derive(Default)]
pub struct SceneRegistry {
    factories: IndexMap<String, Box<dyn SceneFactory>>,
}

impl SceneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: Box<dyn SceneFactory>) {
        self.factories.insert(name.into(), factory);
    }

    /// Register a plain constructor function under `name`.
    pub fn register_fn(&mut self, name: impl Into<String>, build: fn() -> SceneInstance) {
        self.register(name, Box::new(build));
    }

    /// Construct the scene registered under `name`.
    pub fn build(&self, name: &str, draw: bool) -> Result<SceneInstance, SetupError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SetupError::UnknownScene {
                name: name.to_string(),
                known: self.names().map(str::to_string).collect(),
            })?;
        Ok(if draw {
            factory.build_draw()
        } else {
            factory.build()
        })
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Whether `name` has a registered factory.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::Scene;

    struct Stub;
    impl Scene for Stub {
        fn name(&self) -> &str {
            "stub"
        }
        fn update(&mut self, _timestep: f64) {}
        fn reset(&mut self) {}
        fn time(&self) -> f64 {
            0.0
        }
        fn is_done(&self) -> bool {
            false
        }
        fn is_episode_end(&self) -> bool {
            false
        }
    }

    fn stub() -> SceneInstance {
        SceneInstance::Plain(Box::new(Stub))
    }

    #[test]
    fn build_returns_registered_scene() {
        let mut reg = SceneRegistry::new();
        reg.register_fn("stub", stub);
        let inst = reg.build("stub", false).unwrap();
        assert_eq!(inst.scene().name(), "stub");
        assert!(!inst.is_rl());
    }

    #[test]
    fn unknown_name_lists_known_scenes() {
        let mut reg = SceneRegistry::new();
        reg.register_fn("stub", stub);
        let err = reg.build("missing", false).unwrap_err();
        match err {
            SetupError::UnknownScene { name, known } => {
                assert_eq!(name, "missing");
                assert_eq!(known, vec!["stub"]);
            }
            other => panic!("expected UnknownScene, got {other:?}"),
        }
    }

    #[test]
    fn draw_build_defaults_to_headless() {
        let mut reg = SceneRegistry::new();
        reg.register_fn("stub", stub);
        let inst = reg.build("stub", true).unwrap();
        assert_eq!(inst.scene().name(), "stub");
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut reg = SceneRegistry::new();
        reg.register_fn("b", stub);
        reg.register_fn("a", stub);
        let names: Vec<_> = reg.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
