/// Name that is granted the admin flag unless configured otherwise.
pub const DEFAULT_ADMIN_NAME: &str = "Admin";

/// Longest accepted display name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Decides which identity is the administrator when it is first created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminPolicy {
    admin_name: String,
}

impl AdminPolicy {
    pub fn new(admin_name: impl Into<String>) -> Self {
        Self {
            admin_name: admin_name.into(),
        }
    }

    /// Exact, case-sensitive match against the reserved admin name.
    pub fn is_admin(&self, name: &str) -> bool {
        name == self.admin_name
    }
}

impl Default for AdminPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_NAME)
    }
}

/// Trim a login name, returning `None` if nothing usable is left.
pub fn normalize_name(name: &str) -> Option<&str> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        None
    } else {
        Some(name)
    }
}
