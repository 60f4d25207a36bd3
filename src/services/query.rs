//! Tenant scoping for product listings.

use crate::context::SessionContext;
use crate::filter::{QueryFilter, QueryOptions};

/// Rewrites client query options so they can only see the caller's tenant.
///
/// Returns `None` when the caller has no resolved subdomain; the listing is
/// then empty. Otherwise every client filter on `subdomain` is removed and an
/// equality filter on the caller's subdomain is appended. The limit is capped
/// at `max_limit` when one is configured.
pub fn scope_to_subdomain(
    mut options: QueryOptions,
    session: &SessionContext,
    max_limit: Option<usize>,
) -> Option<QueryOptions> {
    let subdomain = session.subdomain()?;

    options.filters.retain(|f| f.field != "subdomain");
    options.filters.push(QueryFilter::eq("subdomain", subdomain));

    if let Some(max) = max_limit {
        options.limit = Some(options.limit.map_or(max, |l| l.min(max)));
    }
    Some(options)
}
