mod config;
mod guard;
mod types;

pub use config::{
    AllowList, AllowPattern, BUILTIN_ALLOW_LIST, GuardConfig, MalformedInput, PROJECT_ROOT,
};
pub use guard::PathGuard;
pub use types::{Decision, EXIT_ALLOW, EXIT_BLOCK, HookRequest};
