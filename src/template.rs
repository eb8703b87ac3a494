use std::fmt;

/// Partial application for shape constructors.
///
/// Holds a base parameter value and a build function; [`Self::create`]
/// builds a shape from the base as-is, [`Self::create_with`] lets the caller
/// adjust a copy of the base first. The base itself is never consumed, so a
/// template can stamp out any number of variants.
#[derive(Clone)]
pub struct Template<P, S> {
    base: P,
    build: fn(P) -> S,
}

impl<P: Clone, S> Template<P, S> {
    pub fn new(base: P, build: fn(P) -> S) -> Self {
        Self { base, build }
    }

    pub fn base(&self) -> &P {
        &self.base
    }

    pub fn create(&self) -> S {
        (self.build)(self.base.clone())
    }

    pub fn create_with(&self, tweak: impl FnOnce(&mut P)) -> S {
        let mut params = self.base.clone();
        tweak(&mut params);
        (self.build)(params)
    }
}

impl<P: fmt::Debug, S> fmt::Debug for Template<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template").field("base", &self.base).finish()
    }
}
