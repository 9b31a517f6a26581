/// Maximum number of nameservers kept per zone cut.
pub const MAX_NAMESERVERS: usize = 3;

/// Maximum number of CNAME hops followed from the queried name.
pub const MAX_CNAME_STEPS: usize = 4;

/// Maximum number of labels accepted in a queried name.
pub const MAX_DOMAIN_LEVELS: usize = 10;
