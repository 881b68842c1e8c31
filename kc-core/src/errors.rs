pub use anyhow::{
    anyhow,
    bail,
    ensure,
};
pub use paste::paste;
pub use thiserror::Error;

pub type EmptyResult = anyhow::Result<()>;

// Declares a thiserror enum whose variants each wrap a single value, along with a snake_case
// constructor per variant that accepts anything convertible into that value and hands back an
// anyhow::Error, e.g. `KindError::unknown_kind("pods")`.
#[macro_export]
macro_rules! err_impl {
    ($errtype:ident, $(#[$errinfo:meta] $item:ident($dtype:ty),)+) => {
        #[derive(Debug, $crate::errors::Error)]
        pub enum $errtype {
            $(#[$errinfo] $item($dtype)),+
        }

        $crate::errors::paste! {
            impl $errtype {
                $(
                    pub fn [<$item:snake>](val: impl Into<$dtype>) -> anyhow::Error {
                        anyhow::Error::new($errtype::$item(val.into()))
                    }
                )+
            }
        }
    };
}

pub use err_impl;

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    err_impl! {WidgetError,
        #[error("widget not found: {0}")]
        WidgetNotFound(String),

        #[error("too many widgets: {0}")]
        TooManyWidgets(usize),
    }

    #[rstest]
    fn test_err_impl_constructors() {
        let err = WidgetError::widget_not_found("sprocket");
        assert_eq!(err.to_string(), "widget not found: sprocket");
        assert!(matches!(err.downcast_ref::<WidgetError>(), Some(WidgetError::WidgetNotFound(_))));

        assert_eq!(WidgetError::too_many_widgets(3usize).to_string(), "too many widgets: 3");
    }
}
