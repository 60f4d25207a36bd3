//! Subdomain permission guard.

use super::error::ProductError;
use crate::context::ApiKeyContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Modify,
}

/// Exact membership test. An empty target never matches.
pub fn is_subdomain_allowed(allowed: &[String], target: &str) -> bool {
    !target.is_empty() && allowed.iter().any(|s| s == target)
}

/// Fails closed: a missing context is an error, never a pass.
///
/// For `Modify` the target must be the subdomain stored on the resource,
/// not one supplied by the caller.
pub fn authorize(ctx: Option<&ApiKeyContext>, target: &str, action: Action) -> Result<(), ProductError> {
    let ctx = ctx.ok_or_else(|| {
        tracing::error!("authorized subdomains missing from request context");
        ProductError::AuthContext
    })?;

    if is_subdomain_allowed(&ctx.allowed_subdomains, target) {
        return Ok(());
    }

    tracing::warn!(
        key_id = %ctx.key_id,
        subdomain = %target,
        "subdomain not authorized for api key"
    );
    let verb = match action {
        Action::Create => "create",
        Action::Modify => "modify",
    };
    Err(ProductError::Permission(format!(
        "You do not have permission to {} resources in this subdomain.",
        verb
    )))
}
