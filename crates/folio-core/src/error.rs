use crate::uniforms::UniformKind;

/// Problems found while validating scene configuration and uniform blocks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("uniform `{name}` missing from block `{block}`")]
    MissingUniform {
        block: &'static str,
        name: &'static str,
    },
    #[error("uniform `{name}` in block `{block}` is a {found:?}, expected {expected:?}")]
    KindMismatch {
        block: &'static str,
        name: &'static str,
        expected: UniformKind,
        found: UniformKind,
    },
    #[error("uniform `{name}` in block `{block}` is not finite")]
    NonFinite {
        block: &'static str,
        name: &'static str,
    },
    #[error("uniform `{name}` declared twice in block `{block}`")]
    Duplicate {
        block: &'static str,
        name: &'static str,
    },
    #[error("invalid scene config: {0}")]
    InvalidConfig(&'static str),
}
