pub mod error;
pub mod hooks;
pub mod platform;

pub use error::{Error, Result};
pub use hooks::{
    AllowList, AllowPattern, BUILTIN_ALLOW_LIST, Decision, EXIT_ALLOW, EXIT_BLOCK, GuardConfig,
    HookRequest, MalformedInput, PROJECT_ROOT, PathGuard,
};
pub use platform::path;
