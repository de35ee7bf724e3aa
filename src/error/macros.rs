//! Error macros for modelpath

/// Macro for returning invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::ModelPathError::invalid_value($context, $value))
    };
}
