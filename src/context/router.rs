//! Router panel toggle.

use super::{ContextGenerator, Environment};
use crate::error::ContextError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterUi {
    pub disable_router: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RouterUiContext;

impl ContextGenerator for RouterUiContext {
    type Output = RouterUi;

    fn name(&self) -> &'static str {
        "router_setting"
    }

    fn description(&self) -> &'static str {
        "router panel visibility"
    }

    fn generate(&self, env: &Environment<'_>) -> Result<RouterUi, ContextError> {
        Ok(RouterUi {
            disable_router: !env.config.has_supported_profile(),
        })
    }
}
