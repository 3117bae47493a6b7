/// Compute effective limit with precedence: local arg -> global flag -> fallback.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback)
}

/// Offset for a listing: an explicit offset wins, otherwise the 1-based page.
#[must_use]
pub fn effective_offset(offset: Option<u32>, page: Option<u32>, limit: u32) -> u32 {
    offset.unwrap_or_else(|| page.unwrap_or(1).saturating_sub(1).saturating_mul(limit))
}
