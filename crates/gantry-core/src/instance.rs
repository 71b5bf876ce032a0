//! The [`SceneInstance`] tagged capability variant.

use crate::scene::{RlScene, Scene};

/// An owned, live simulation instance, tagged with the capability it was
/// built with.
///
/// The factory that constructs a scene knows statically whether its
/// concrete type implements [`RlScene`], so the capability is recorded
/// once, at construction, as the variant tag. Per-call queries reduce to
/// a match on that tag — there is no dynamic type check on any hot path,
/// and the tag can never disagree with the boxed value.
///
/// Exactly one `SceneInstance` is live per host at a time; replacing a
/// scene drops the old instance before the new one is constructed.
pub enum SceneInstance {
    /// A scene satisfying only the base [`Scene`] contract.
    Plain(Box<dyn Scene>),
    /// A scene additionally satisfying the [`RlScene`] contract.
    Rl(Box<dyn RlScene>),
}

impl SceneInstance {
    /// Borrow the base capability.
    pub fn scene(&self) -> &dyn Scene {
        match self {
            Self::Plain(s) => s.as_ref(),
            Self::Rl(s) => s.as_ref(),
        }
    }

    /// Mutably borrow the base capability.
    pub fn scene_mut(&mut self) -> &mut dyn Scene {
        match self {
            Self::Plain(s) => s.as_mut(),
            Self::Rl(s) => s.as_mut(),
        }
    }

    /// Borrow the RL capability, if this instance was built with it.
    pub fn rl(&self) -> Option<&dyn RlScene> {
        match self {
            Self::Plain(_) => None,
            Self::Rl(s) => Some(s.as_ref()),
        }
    }

    /// Mutably borrow the RL capability, if present.
    pub fn rl_mut(&mut self) -> Option<&mut dyn RlScene> {
        match self {
            Self::Plain(_) => None,
            Self::Rl(s) => Some(s.as_mut()),
        }
    }

    /// Whether the RL capability is present.
    pub fn is_rl(&self) -> bool {
        matches!(self, Self::Rl(_))
    }
}

impl std::fmt::Debug for SceneInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneInstance")
            .field("name", &self.scene().name())
            .field("rl", &self.is_rl())
            .finish()
    }
}
