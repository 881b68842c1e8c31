mod kind;
mod util;

pub use kind::*;
pub use util::*;

use crate::errors::*;

err_impl! {KindError,
    #[error("unknown resource kind: {0}")]
    UnknownKind(String),
}

pub trait KubeResourceExt {
    fn namespaced_name(&self) -> String;
    fn congroup_id(&self) -> String;
}

#[cfg(test)]
pub mod tests;
