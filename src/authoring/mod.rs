pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod point;
pub(crate) mod transform_stack;
