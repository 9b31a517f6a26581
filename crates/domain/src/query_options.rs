/// Header flags applied to a single outgoing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub recursion_desired: bool,
}

impl QueryOptions {
    pub const fn recursive() -> Self {
        Self {
            recursion_desired: true,
        }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::recursive()
    }
}
